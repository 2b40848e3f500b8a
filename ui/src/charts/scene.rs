//! Positioned marks for one chart.
//!
//! A [`Scene`] is the geometry every chart kind resolves to. The on-screen
//! view draws it as inline SVG elements and the report exporter serializes
//! the very same marks with [`Scene::svg_body`], so both outputs agree.

use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        opacity: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
        width: f64,
        dashed: bool,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: String,
        width: f64,
    },
    /// Closed, filled polygon.
    Area {
        points: Vec<(f64, f64)>,
        fill: String,
        opacity: f64,
        stroke: String,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
    },
    Path {
        d: String,
        fill: String,
        stroke: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        anchor: Anchor,
        size: f64,
        fill: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub marks: Vec<Mark>,
    pub legend: Vec<LegendEntry>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            marks: Vec::new(),
            legend: Vec::new(),
        }
    }

    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", fmt_num(self.width), fmt_num(self.height))
    }

    /// Lay the legend out as a centred row of swatches along the bottom edge.
    pub fn set_legend(&mut self, entries: Vec<LegendEntry>) {
        const SWATCH: f64 = 10.0;
        const GAP: f64 = 18.0;

        let widths: Vec<f64> = entries
            .iter()
            .map(|entry| SWATCH + 6.0 + approx_text_width(&entry.label, 11.0))
            .collect();
        let total: f64 = widths.iter().sum::<f64>() + GAP * entries.len().saturating_sub(1) as f64;
        let mut x = ((self.width - total) / 2.0).max(4.0);
        let y = self.height - 14.0;

        for (entry, width) in entries.iter().zip(widths) {
            self.marks.push(Mark::Rect {
                x,
                y: y - SWATCH / 2.0,
                width: SWATCH,
                height: SWATCH,
                fill: entry.color.clone(),
                opacity: 1.0,
            });
            self.marks.push(Mark::Text {
                x: x + SWATCH + 6.0,
                y: y + 4.0,
                content: entry.label.clone(),
                anchor: Anchor::Start,
                size: 11.0,
                fill: entry.color.clone(),
            });
            x += width + GAP;
        }
        self.legend = entries;
    }

    /// SVG markup for the marks only (no outer `<svg>` element).
    pub fn svg_body(&self) -> String {
        let mut out = String::new();
        for mark in &self.marks {
            mark.write_svg(&mut out);
        }
        out
    }
}

impl Mark {
    pub fn write_svg(&self, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = match self {
            Mark::Rect {
                x,
                y,
                width,
                height,
                fill,
                opacity,
            } => writeln!(
                out,
                "<rect x='{}' y='{}' width='{}' height='{}' fill='{}' fill-opacity='{}'/>",
                fmt_num(*x),
                fmt_num(*y),
                fmt_num(*width),
                fmt_num(*height),
                escape(fill),
                fmt_num(*opacity)
            ),
            Mark::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                width,
                dashed,
            } => writeln!(
                out,
                "<line x1='{}' y1='{}' x2='{}' y2='{}' stroke='{}' stroke-width='{}'{}/>",
                fmt_num(*x1),
                fmt_num(*y1),
                fmt_num(*x2),
                fmt_num(*y2),
                escape(stroke),
                fmt_num(*width),
                if *dashed {
                    " stroke-dasharray='3 3'"
                } else {
                    ""
                }
            ),
            Mark::Polyline {
                points,
                stroke,
                width,
            } => writeln!(
                out,
                "<polyline points='{}' fill='none' stroke='{}' stroke-width='{}'/>",
                points_attr(points),
                escape(stroke),
                fmt_num(*width)
            ),
            Mark::Area {
                points,
                fill,
                opacity,
                stroke,
            } => writeln!(
                out,
                "<polygon points='{}' fill='{}' fill-opacity='{}' stroke='{}'/>",
                points_attr(points),
                escape(fill),
                fmt_num(*opacity),
                escape(stroke)
            ),
            Mark::Circle { cx, cy, r, fill } => writeln!(
                out,
                "<circle cx='{}' cy='{}' r='{}' fill='{}'/>",
                fmt_num(*cx),
                fmt_num(*cy),
                fmt_num(*r),
                escape(fill)
            ),
            Mark::Path { d, fill, stroke } => writeln!(
                out,
                "<path d='{}' fill='{}' stroke='{}'/>",
                escape(d),
                escape(fill),
                escape(stroke)
            ),
            Mark::Text {
                x,
                y,
                content,
                anchor,
                size,
                fill,
            } => writeln!(
                out,
                "<text x='{}' y='{}' text-anchor='{}' font-size='{}' fill='{}' font-family='sans-serif'>{}</text>",
                fmt_num(*x),
                fmt_num(*y),
                anchor.as_str(),
                fmt_num(*size),
                escape(fill),
                escape(content)
            ),
        };
    }
}

/// `x,y x,y …` list for `points` attributes.
pub fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two decimals at most, trailing zeros dropped.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".into();
    }
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".into()
    } else {
        text.to_string()
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Rough advance width for sans-serif text; wide glyphs (CJK, emoji) count double.
pub fn approx_text_width(text: &str, size: f64) -> f64 {
    text.chars()
        .map(|ch| if ch.is_ascii() { 0.56 } else { 1.0 })
        .sum::<f64>()
        * size
}
