//! Report snapshot: the insight panel laid out as one tall SVG document.
//!
//! Charts reuse the scenes the screen draws, so the exported pages show the
//! same geometry as the dashboard.

use std::fmt::Write;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::charts::render::{render_charts, ChartVisual, PiePanel, RenderedChart, TableVisual};
use crate::charts::scene::{approx_text_width, escape, fmt_num, Scene};
use crate::core::format::{doc_paragraphs, planning_text, structured_lines};
use crate::core::tabs::{InsightTabs, TabKind};
use crate::core::SectionMap;

pub const REPORT_WIDTH: f64 = 800.0;
const PADDING: f64 = 24.0;
const CONTENT_WIDTH: f64 = REPORT_WIDTH - PADDING * 2.0;
const INK: &str = "#1f2430";
const MUTED: &str = "#5c6370";
const STAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute] UTC");

#[derive(Debug, Clone, PartialEq)]
pub enum ReportBody {
    Charts(Vec<RenderedChart>),
    Lines(Vec<(String, String)>),
    Preformatted(String),
    Paragraphs(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: String,
    pub body: ReportBody,
}

/// Everything the report shows, captured at click time.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportModel {
    pub title: String,
    pub generated: OffsetDateTime,
    pub sections: Vec<ReportSection>,
}

impl ReportModel {
    pub fn collect(title: String, sections: &SectionMap, tabs: &InsightTabs) -> Self {
        let sections = tabs
            .tabs()
            .into_iter()
            .map(|tab| {
                let body = match tab.kind {
                    TabKind::Section(index) => ReportBody::Charts(
                        sections
                            .sections()
                            .get(index)
                            .map(|section| render_charts(&section.charts))
                            .unwrap_or_default(),
                    ),
                    TabKind::Structured => ReportBody::Lines(
                        tabs.structured().map(structured_lines).unwrap_or_default(),
                    ),
                    TabKind::Planning => ReportBody::Preformatted(
                        tabs.planning().map(planning_text).unwrap_or_default(),
                    ),
                    TabKind::RelatedDocs => ReportBody::Paragraphs(
                        tabs.related_docs().map(doc_paragraphs).unwrap_or_default(),
                    ),
                };
                ReportSection {
                    title: tab.title,
                    body,
                }
            })
            .collect();
        Self {
            title,
            generated: OffsetDateTime::now_utc(),
            sections,
        }
    }
}

/// Rendered SVG markup with its pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    pub markup: String,
    pub width: f64,
    pub height: f64,
}

struct Layout {
    body: String,
    y: f64,
}

impl Layout {
    fn text(&mut self, x: f64, content: &str, size: f64, fill: &str, weight: &str) {
        self.y += size * 1.4;
        let _ = writeln!(
            self.body,
            "<text x='{}' y='{}' font-size='{}' font-weight='{}' fill='{}' font-family='sans-serif'>{}</text>",
            fmt_num(x),
            fmt_num(self.y - size * 0.3),
            fmt_num(size),
            weight,
            fill,
            escape(content)
        );
    }

    fn wrapped(&mut self, content: &str, size: f64, fill: &str, family: &str) {
        for line in wrap_text(content, CONTENT_WIDTH, size) {
            self.y += size * 1.5;
            let _ = writeln!(
                self.body,
                "<text x='{}' y='{}' font-size='{}' fill='{}' font-family='{}' xml:space='preserve'>{}</text>",
                fmt_num(PADDING),
                fmt_num(self.y - size * 0.35),
                fmt_num(size),
                fill,
                family,
                escape(&line)
            );
        }
    }

    fn scene(&mut self, x: f64, scene: &Scene) {
        let _ = writeln!(
            self.body,
            "<g transform='translate({} {})'>",
            fmt_num(x),
            fmt_num(self.y)
        );
        self.body.push_str(&scene.svg_body());
        self.body.push_str("</g>\n");
    }

    fn rule(&mut self) {
        self.y += 16.0;
        let _ = writeln!(
            self.body,
            "<line x1='{}' y1='{}' x2='{}' y2='{}' stroke='#e3e6ee' stroke-width='1'/>",
            fmt_num(PADDING),
            fmt_num(self.y),
            fmt_num(REPORT_WIDTH - PADDING),
            fmt_num(self.y)
        );
        self.y += 16.0;
    }
}

pub fn report_svg(model: &ReportModel) -> SvgDocument {
    let mut layout = Layout {
        body: String::new(),
        y: PADDING,
    };
    layout.text(PADDING, &model.title, 20.0, INK, "bold");
    if let Ok(stamp) = model.generated.format(STAMP_FORMAT) {
        layout.text(PADDING, &stamp, 11.0, MUTED, "normal");
    }
    layout.y += 12.0;

    for section in &model.sections {
        layout.text(PADDING, &section.title, 16.0, INK, "bold");
        layout.y += 8.0;
        match &section.body {
            ReportBody::Charts(charts) => {
                for chart in charts {
                    chart_block(&mut layout, chart);
                }
            }
            ReportBody::Lines(lines) => {
                for (key, value) in lines {
                    layout.wrapped(&format!("{key}: {value}"), 13.0, INK, "sans-serif");
                }
            }
            ReportBody::Preformatted(text) => {
                for line in text.lines() {
                    layout.wrapped(line, 11.0, INK, "monospace");
                }
            }
            ReportBody::Paragraphs(paragraphs) => {
                for paragraph in paragraphs {
                    for line in paragraph.lines() {
                        layout.wrapped(line, 13.0, INK, "sans-serif");
                    }
                    layout.y += 8.0;
                }
            }
        }
        layout.rule();
    }

    let height = (layout.y + PADDING).ceil();
    let mut markup = String::with_capacity(layout.body.len() + 256);
    let _ = writeln!(
        markup,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>",
        w = fmt_num(REPORT_WIDTH),
        h = fmt_num(height)
    );
    let _ = writeln!(
        markup,
        "<rect width='{}' height='{}' fill='#ffffff'/>",
        fmt_num(REPORT_WIDTH),
        fmt_num(height)
    );
    markup.push_str(&layout.body);
    markup.push_str("</svg>\n");

    SvgDocument {
        markup,
        width: REPORT_WIDTH,
        height,
    }
}

fn chart_block(layout: &mut Layout, chart: &RenderedChart) {
    layout.text(PADDING, &chart.title, 13.0, INK, "bold");
    layout.y += 4.0;
    match &chart.visual {
        Some(ChartVisual::Plot(scene)) => {
            layout.scene(PADDING, scene);
            layout.y += scene.height;
        }
        Some(ChartVisual::Table(table)) => table_block(layout, table),
        Some(ChartVisual::PieGrid(panels)) => pie_block(layout, panels),
        None => layout.text(PADDING, &crate::t!("chart-unavailable"), 12.0, MUTED, "normal"),
    }
    layout.y += 12.0;
}

fn table_block(layout: &mut Layout, table: &TableVisual) {
    let columns = table.headers.len().max(1);
    let cell = CONTENT_WIDTH / columns as f64;
    let max_width = cell - 8.0;
    let row = |layout: &mut Layout, cells: &[String], weight: &str| {
        layout.y += 20.0;
        for (idx, value) in cells.iter().enumerate() {
            let shown = wrap_text(value, max_width, 12.0)
                .into_iter()
                .next()
                .unwrap_or_default();
            let _ = writeln!(
                layout.body,
                "<text x='{}' y='{}' font-size='12' font-weight='{}' fill='{}' font-family='sans-serif'>{}</text>",
                fmt_num(PADDING + cell * idx as f64 + 4.0),
                fmt_num(layout.y - 6.0),
                weight,
                INK,
                escape(&shown)
            );
        }
        let _ = writeln!(
            layout.body,
            "<line x1='{}' y1='{}' x2='{}' y2='{}' stroke='#e3e6ee' stroke-width='1'/>",
            fmt_num(PADDING),
            fmt_num(layout.y),
            fmt_num(REPORT_WIDTH - PADDING),
            fmt_num(layout.y)
        );
    };
    row(layout, &table.headers, "bold");
    for cells in &table.rows {
        row(layout, cells, "normal");
    }
}

fn pie_block(layout: &mut Layout, panels: &[PiePanel]) {
    let per_row = ((CONTENT_WIDTH / 240.0).floor() as usize).max(1);
    for group in panels.chunks(per_row) {
        let top = layout.y;
        let mut tallest: f64 = 0.0;
        for (idx, panel) in group.iter().enumerate() {
            let x = PADDING + idx as f64 * 240.0;
            layout.y = top;
            layout.text(x, &panel.caption, 12.0, MUTED, "bold");
            layout.scene(x, &panel.scene);
            tallest = tallest.max(layout.y - top + panel.scene.height);
        }
        layout.y = top + tallest + 8.0;
    }
}

/// Greedy line wrap by approximate glyph width. Words longer than a line are
/// broken by character.
pub fn wrap_text(text: &str, max_width: f64, size: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if approx_text_width(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for ch in word.chars() {
            current.push(ch);
            if approx_text_width(&current, size) > max_width {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
