//! Descriptor → visual dispatch.
//!
//! [`render_charts`] turns every descriptor into a [`RenderedChart`]. The
//! card (title) is always produced; the visual is `None` when the chart type
//! is unknown or the descriptor lacks what its encoding needs. One bad entry
//! never affects its siblings.

use serde_json::{Map, Value};

use super::descriptor::{self, numeric, ChartDescriptor, ChartKind};
use super::palette::{self, series_color};
use super::scale::{nice_ticks, tick_label, BandScale, LinearScale};
use super::scene::{approx_text_width, Anchor, LegendEntry, Mark, Scene};

pub const PLOT_WIDTH: f64 = 640.0;
pub const PLOT_HEIGHT: f64 = 300.0;
pub const BOX_HEIGHT: f64 = 200.0;
pub const PIE_SIZE: f64 = 220.0;
/// Hard display cap for table rows.
pub const TABLE_ROW_LIMIT: usize = 9;

const Y_TICKS: usize = 5;
const MAX_X_LABELS: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub title: String,
    pub visual: Option<ChartVisual>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartVisual {
    Plot(Scene),
    Table(TableVisual),
    PieGrid(Vec<PiePanel>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableVisual {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiePanel {
    pub caption: String,
    pub scene: Scene,
}

pub fn render_charts(descriptors: &[ChartDescriptor]) -> Vec<RenderedChart> {
    descriptors.iter().map(render_chart).collect()
}

pub fn render_chart(descriptor: &ChartDescriptor) -> RenderedChart {
    let visual = descriptor.kind().and_then(|kind| build_visual(kind, descriptor));
    if visual.is_none() {
        tracing::debug!(
            chart_type = %descriptor.chart_type,
            title = %descriptor.title,
            "descriptor renders no visual"
        );
    }
    RenderedChart {
        title: descriptor.title.clone(),
        visual,
    }
}

fn build_visual(kind: ChartKind, d: &ChartDescriptor) -> Option<ChartVisual> {
    match kind {
        ChartKind::Bar => {
            let fields = d.series_fields();
            let series = fields
                .iter()
                .enumerate()
                .map(|(idx, field)| SeriesSpec {
                    field: field.clone(),
                    label: bar_series_name(field),
                    color: series_color(idx).to_string(),
                })
                .collect();
            bar_scene(d, series).map(ChartVisual::Plot)
        }
        ChartKind::Histogram => {
            let field = d.y_field.clone()?;
            let series = vec![SeriesSpec {
                field,
                label: crate::t!("series-frequency"),
                color: series_color(0).to_string(),
            }];
            bar_scene(d, series).map(ChartVisual::Plot)
        }
        ChartKind::Line => {
            let series = palette_series(&d.series_fields());
            line_scene(d, series, true).map(ChartVisual::Plot)
        }
        ChartKind::MultiLine => {
            let fields = d.y_fields.clone().unwrap_or_default();
            line_scene(d, palette_series(&fields), false).map(ChartVisual::Plot)
        }
        ChartKind::LineBand => line_band_scene(d).map(ChartVisual::Plot),
        ChartKind::Scatter => scatter_scene(d).map(ChartVisual::Plot),
        ChartKind::Table => table_visual(d).map(ChartVisual::Table),
        ChartKind::RocCurve => roc_scene(d).map(ChartVisual::Plot),
        ChartKind::BarLineCombo => combo_scene(d).map(ChartVisual::Plot),
        ChartKind::PieMultiple => pie_panels(d).map(ChartVisual::PieGrid),
        ChartKind::Boxplot => boxplot_scene(d).map(ChartVisual::Plot),
    }
}

#[derive(Debug, Clone)]
struct SeriesSpec {
    field: String,
    label: String,
    color: String,
}

fn palette_series(fields: &[String]) -> Vec<SeriesSpec> {
    fields
        .iter()
        .enumerate()
        .map(|(idx, field)| SeriesSpec {
            field: field.clone(),
            label: field.clone(),
            color: series_color(idx).to_string(),
        })
        .collect()
}

fn bar_series_name(field: &str) -> String {
    match field {
        "actual" => crate::t!("series-actual"),
        "predicted" => crate::t!("series-predicted"),
        other => other.to_string(),
    }
}

fn legend_of(series: &[SeriesSpec]) -> Vec<LegendEntry> {
    series
        .iter()
        .map(|s| LegendEntry {
            label: s.label.clone(),
            color: s.color.clone(),
        })
        .collect()
}

/// Plot area inside a scene.
#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Frame {
    fn plot(width: f64, height: f64, right_axis: bool) -> Self {
        Self {
            left: 56.0,
            right: width - if right_axis { 56.0 } else { 20.0 },
            top: 16.0,
            bottom: height - 54.0,
        }
    }
}

fn value_column(records: &[&Map<String, Value>], field: &str) -> Vec<Option<f64>> {
    records
        .iter()
        .map(|row| row.get(field).and_then(numeric))
        .collect()
}

fn category_labels(records: &[&Map<String, Value>], field: Option<&str>) -> Vec<String> {
    records
        .iter()
        .map(|row| {
            field
                .and_then(|f| row.get(f))
                .map(descriptor::label)
                .unwrap_or_default()
        })
        .collect()
}

fn extent<'a>(columns: impl IntoIterator<Item = &'a Vec<Option<f64>>>) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for value in columns.into_iter().flatten().flatten() {
        lo = lo.min(*value);
        hi = hi.max(*value);
    }
    (lo <= hi).then_some((lo, hi))
}

fn value_scale(
    frame: &Frame,
    extent: Option<(f64, f64)>,
    include_zero: bool,
) -> (LinearScale, Vec<f64>) {
    let (mut lo, mut hi) = extent.unwrap_or((0.0, 1.0));
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    LinearScale::nice(lo, hi, (frame.bottom, frame.top), Y_TICKS)
}

fn draw_value_axis(
    scene: &mut Scene,
    frame: &Frame,
    scale: &LinearScale,
    ticks: &[f64],
    side: Anchor,
    grid: bool,
) {
    for tick in ticks {
        let y = scale.map(*tick);
        if grid {
            scene.push(Mark::Line {
                x1: frame.left,
                y1: y,
                x2: frame.right,
                y2: y,
                stroke: palette::GRID.into(),
                width: 1.0,
                dashed: true,
            });
        }
        let (x, anchor) = match side {
            Anchor::End => (frame.right + 6.0, Anchor::Start),
            _ => (frame.left - 6.0, Anchor::End),
        };
        scene.push(Mark::Text {
            x,
            y: y + 4.0,
            content: tick_label(*tick),
            anchor,
            size: 11.0,
            fill: palette::AXIS_TEXT.into(),
        });
    }
}

fn draw_baseline(scene: &mut Scene, frame: &Frame) {
    scene.push(Mark::Line {
        x1: frame.left,
        y1: frame.bottom,
        x2: frame.right,
        y2: frame.bottom,
        stroke: palette::AXIS_TEXT.into(),
        width: 1.0,
        dashed: false,
    });
}

fn draw_category_axis(scene: &mut Scene, frame: &Frame, bands: &BandScale, labels: &[String]) {
    let every = labels.len().div_ceil(MAX_X_LABELS).max(1);
    let max_width = bands.step() * every as f64 - 4.0;
    for (idx, label) in labels.iter().enumerate() {
        if idx % every != 0 {
            continue;
        }
        scene.push(Mark::Text {
            x: bands.center(idx),
            y: frame.bottom + 18.0,
            content: fit_label(label, max_width, 11.0),
            anchor: Anchor::Middle,
            size: 11.0,
            fill: palette::AXIS_TEXT.into(),
        });
    }
}

fn draw_linear_x_axis(scene: &mut Scene, frame: &Frame, scale: &LinearScale, ticks: &[f64]) {
    for tick in ticks {
        scene.push(Mark::Text {
            x: scale.map(*tick),
            y: frame.bottom + 18.0,
            content: tick_label(*tick),
            anchor: Anchor::Middle,
            size: 11.0,
            fill: palette::AXIS_TEXT.into(),
        });
    }
}

fn fit_label(label: &str, max_width: f64, size: f64) -> String {
    if approx_text_width(label, size) <= max_width {
        return label.to_string();
    }
    let mut out = String::new();
    for ch in label.chars() {
        let candidate = format!("{out}{ch}…");
        if approx_text_width(&candidate, size) > max_width {
            break;
        }
        out.push(ch);
    }
    format!("{out}…")
}

fn bar_scene(d: &ChartDescriptor, series: Vec<SeriesSpec>) -> Option<Scene> {
    if series.is_empty() {
        return None;
    }
    let records = d.records();
    let labels = category_labels(&records, d.x_field.as_deref());
    let columns: Vec<Vec<Option<f64>>> = series
        .iter()
        .map(|s| value_column(&records, &s.field))
        .collect();

    let mut scene = Scene::new(PLOT_WIDTH, PLOT_HEIGHT);
    let frame = Frame::plot(PLOT_WIDTH, PLOT_HEIGHT, false);
    let (scale, ticks) = value_scale(&frame, extent(&columns), true);
    draw_value_axis(&mut scene, &frame, &scale, &ticks, Anchor::Start, true);

    let bands = BandScale::new(records.len(), (frame.left, frame.right), 0.2);
    let inner = BandScale::new(series.len(), (0.0, bands.bandwidth()), 0.1);
    let zero = scale.map(0.0);

    for (row, _) in records.iter().enumerate() {
        for (s_idx, entry) in series.iter().enumerate() {
            let Some(value) = columns[s_idx][row] else {
                continue;
            };
            let y = scale.map(value);
            scene.push(Mark::Rect {
                x: bands.start(row) + inner.start(s_idx),
                y: y.min(zero),
                width: inner.bandwidth(),
                height: (zero - y).abs(),
                fill: entry.color.clone(),
                opacity: 1.0,
            });
        }
    }

    draw_baseline(&mut scene, &frame);
    draw_category_axis(&mut scene, &frame, &bands, &labels);
    scene.set_legend(legend_of(&series));
    Some(scene)
}

fn line_scene(d: &ChartDescriptor, series: Vec<SeriesSpec>, dots: bool) -> Option<Scene> {
    if series.is_empty() {
        return None;
    }
    let records = d.records();
    let labels = category_labels(&records, d.x_field.as_deref());
    let columns: Vec<Vec<Option<f64>>> = series
        .iter()
        .map(|s| value_column(&records, &s.field))
        .collect();

    let mut scene = Scene::new(PLOT_WIDTH, PLOT_HEIGHT);
    let frame = Frame::plot(PLOT_WIDTH, PLOT_HEIGHT, false);
    let (scale, ticks) = value_scale(&frame, extent(&columns), false);
    draw_value_axis(&mut scene, &frame, &scale, &ticks, Anchor::Start, true);
    let bands = BandScale::new(records.len(), (frame.left, frame.right), 0.0);

    for (entry, column) in series.iter().zip(&columns) {
        let points = column_points(&bands, &scale, column);
        push_series_line(&mut scene, &points, &entry.color, 2.0, dots);
    }

    draw_baseline(&mut scene, &frame);
    draw_category_axis(&mut scene, &frame, &bands, &labels);
    scene.set_legend(legend_of(&series));
    Some(scene)
}

fn column_points(bands: &BandScale, scale: &LinearScale, column: &[Option<f64>]) -> Vec<(f64, f64)> {
    column
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| value.map(|v| (bands.center(idx), scale.map(v))))
        .collect()
}

fn push_series_line(scene: &mut Scene, points: &[(f64, f64)], color: &str, width: f64, dots: bool) {
    if points.len() > 1 {
        scene.push(Mark::Polyline {
            points: points.to_vec(),
            stroke: color.to_string(),
            width,
        });
    }
    if dots || points.len() == 1 {
        for (cx, cy) in points {
            scene.push(Mark::Circle {
                cx: *cx,
                cy: *cy,
                r: 3.0,
                fill: color.to_string(),
            });
        }
    }
}

fn line_band_scene(d: &ChartDescriptor) -> Option<Scene> {
    let band = d.band.as_ref()?;
    let (upper_field, lower_field) = (band.upper.as_deref()?, band.lower.as_deref()?);
    let y_field = d.y_field.as_deref()?;
    let records = d.records();
    let labels = category_labels(&records, d.x_field.as_deref());
    let upper = value_column(&records, upper_field);
    let lower = value_column(&records, lower_field);
    let center = value_column(&records, y_field);

    let mut scene = Scene::new(PLOT_WIDTH, PLOT_HEIGHT);
    let frame = Frame::plot(PLOT_WIDTH, PLOT_HEIGHT, false);
    let (scale, ticks) = value_scale(&frame, extent([&upper, &lower, &center]), false);
    draw_value_axis(&mut scene, &frame, &scale, &ticks, Anchor::Start, true);
    let bands = BandScale::new(records.len(), (frame.left, frame.right), 0.0);

    let upper_points = column_points(&bands, &scale, &upper);
    let lower_points = column_points(&bands, &scale, &lower);
    if upper_points.len() > 1 && lower_points.len() > 1 {
        let mut polygon = upper_points.clone();
        polygon.extend(lower_points.iter().rev().copied());
        scene.push(Mark::Area {
            points: polygon,
            fill: palette::BAND_FILL.into(),
            opacity: 0.3,
            stroke: "none".into(),
        });
    }
    push_series_line(&mut scene, &upper_points, palette::BAND_FILL, 1.0, false);
    push_series_line(&mut scene, &lower_points, palette::BAND_FILL, 1.0, false);
    let center_points = column_points(&bands, &scale, &center);
    push_series_line(&mut scene, &center_points, palette::BAND_LINE, 2.0, true);

    draw_baseline(&mut scene, &frame);
    draw_category_axis(&mut scene, &frame, &bands, &labels);
    scene.set_legend(vec![
        LegendEntry {
            label: upper_field.to_string(),
            color: palette::BAND_FILL.into(),
        },
        LegendEntry {
            label: lower_field.to_string(),
            color: palette::BAND_FILL.into(),
        },
        LegendEntry {
            label: y_field.to_string(),
            color: palette::BAND_LINE.into(),
        },
    ]);
    Some(scene)
}

/// Numeric x/y pairs from the rows; rows missing either value are skipped.
fn xy_pairs(records: &[&Map<String, Value>], x_field: &str, y_field: &str) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter_map(|row| {
            let x = row.get(x_field).and_then(numeric)?;
            let y = row.get(y_field).and_then(numeric)?;
            Some((x, y))
        })
        .collect()
}

fn xy_frame(
    scene: &mut Scene,
    pairs: &[(f64, f64)],
    frame: &Frame,
) -> (LinearScale, LinearScale) {
    let (x_lo, x_hi) = pairs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (x, _)| {
            (lo.min(*x), hi.max(*x))
        });
    let (y_lo, y_hi) = pairs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| {
            (lo.min(*y), hi.max(*y))
        });
    let x_extent = if x_lo <= x_hi { (x_lo, x_hi) } else { (0.0, 1.0) };
    let y_extent = if y_lo <= y_hi { (y_lo, y_hi) } else { (0.0, 1.0) };

    let (x_scale, x_ticks) = LinearScale::nice(x_extent.0, x_extent.1, (frame.left, frame.right), 6);
    let (y_scale, y_ticks) = LinearScale::nice(y_extent.0, y_extent.1, (frame.bottom, frame.top), Y_TICKS);
    draw_value_axis(scene, frame, &y_scale, &y_ticks, Anchor::Start, true);
    draw_baseline(scene, frame);
    draw_linear_x_axis(scene, frame, &x_scale, &x_ticks);
    (x_scale, y_scale)
}

fn axis_caption(scene: &mut Scene, frame: &Frame, x_label: &str, y_label: &str) {
    scene.push(Mark::Text {
        x: (frame.left + frame.right) / 2.0,
        y: frame.bottom + 34.0,
        content: x_label.to_string(),
        anchor: Anchor::Middle,
        size: 11.0,
        fill: palette::INK.into(),
    });
    scene.push(Mark::Text {
        x: frame.left,
        y: frame.top - 4.0,
        content: y_label.to_string(),
        anchor: Anchor::Start,
        size: 11.0,
        fill: palette::INK.into(),
    });
}

fn scatter_scene(d: &ChartDescriptor) -> Option<Scene> {
    let x_field = d.x_field.as_deref()?;
    let y_field = d.y_field.as_deref()?;
    let pairs = xy_pairs(&d.records(), x_field, y_field);

    let mut scene = Scene::new(PLOT_WIDTH, PLOT_HEIGHT);
    let frame = Frame::plot(PLOT_WIDTH, PLOT_HEIGHT, false);
    let (x_scale, y_scale) = xy_frame(&mut scene, &pairs, &frame);
    for (x, y) in &pairs {
        scene.push(Mark::Circle {
            cx: x_scale.map(*x),
            cy: y_scale.map(*y),
            r: 4.0,
            fill: palette::SCATTER_FILL.into(),
        });
    }
    axis_caption(&mut scene, &frame, x_field, y_field);
    let name = d
        .category_field
        .clone()
        .unwrap_or_else(|| crate::t!("series-data"));
    scene.set_legend(vec![LegendEntry {
        label: name,
        color: palette::SCATTER_FILL.into(),
    }]);
    Some(scene)
}

fn roc_scene(d: &ChartDescriptor) -> Option<Scene> {
    let records = d.records();
    if records.is_empty() {
        return None;
    }
    let x_field = d.x_field.as_deref().unwrap_or("fpr");
    let y_field = d.y_field.as_deref().unwrap_or("tpr");
    let pairs = xy_pairs(&records, x_field, y_field);

    let mut scene = Scene::new(PLOT_WIDTH, PLOT_HEIGHT);
    let frame = Frame::plot(PLOT_WIDTH, PLOT_HEIGHT, false);
    let (x_scale, y_scale) = xy_frame(&mut scene, &pairs, &frame);
    let points: Vec<(f64, f64)> = pairs
        .iter()
        .map(|(x, y)| (x_scale.map(*x), y_scale.map(*y)))
        .collect();
    push_series_line(&mut scene, &points, palette::ROC_STROKE, 2.0, false);
    axis_caption(&mut scene, &frame, x_field, y_field);
    scene.set_legend(vec![LegendEntry {
        label: crate::t!("series-roc"),
        color: palette::ROC_STROKE.into(),
    }]);
    Some(scene)
}

fn combo_scene(d: &ChartDescriptor) -> Option<Scene> {
    let fields = d.y_fields.as_ref()?;
    let (bar_field, line_field) = match fields.as_slice() {
        [bar, line, ..] => (bar.as_str(), line.as_str()),
        _ => return None,
    };
    let records = d.records();
    let labels = category_labels(&records, d.x_field.as_deref());
    let bars = value_column(&records, bar_field);
    let line = value_column(&records, line_field);

    let mut scene = Scene::new(PLOT_WIDTH, PLOT_HEIGHT);
    let frame = Frame::plot(PLOT_WIDTH, PLOT_HEIGHT, true);
    let (left, left_ticks) = value_scale(&frame, extent([&bars]), true);
    let (right, right_ticks) = value_scale(&frame, extent([&line]), true);
    draw_value_axis(&mut scene, &frame, &left, &left_ticks, Anchor::Start, true);
    draw_value_axis(&mut scene, &frame, &right, &right_ticks, Anchor::End, false);

    let bands = BandScale::new(records.len(), (frame.left, frame.right), 0.2);
    let zero = left.map(0.0);
    for (idx, value) in bars.iter().enumerate() {
        let Some(value) = value else { continue };
        let y = left.map(*value);
        scene.push(Mark::Rect {
            x: bands.start(idx),
            y: y.min(zero),
            width: bands.bandwidth(),
            height: (zero - y).abs(),
            fill: series_color(0).into(),
            opacity: 1.0,
        });
    }
    let points = column_points(&bands, &right, &line);
    push_series_line(&mut scene, &points, palette::COMBO_LINE, 2.0, true);

    draw_baseline(&mut scene, &frame);
    draw_category_axis(&mut scene, &frame, &bands, &labels);
    scene.set_legend(vec![
        LegendEntry {
            label: bar_field.to_string(),
            color: series_color(0).into(),
        },
        LegendEntry {
            label: line_field.to_string(),
            color: palette::COMBO_LINE.into(),
        },
    ]);
    Some(scene)
}

fn table_visual(d: &ChartDescriptor) -> Option<TableVisual> {
    let columns = d.columns.as_ref().filter(|c| !c.is_empty())?;
    let records = d.records();
    if records.is_empty() {
        return None;
    }
    let rows = records
        .iter()
        .take(TABLE_ROW_LIMIT)
        .map(|row| {
            columns
                .iter()
                .map(|col| row.get(col).map(descriptor::label).unwrap_or_default())
                .collect()
        })
        .collect();
    Some(TableVisual {
        headers: columns.clone(),
        rows,
    })
}

fn pie_panels(d: &ChartDescriptor) -> Option<Vec<PiePanel>> {
    let fields = d.pie_fields.as_ref()?;
    let groups = d.data.as_object()?;
    let panels: Vec<PiePanel> = fields
        .iter()
        .filter_map(|field| {
            let entries = groups.get(&field.data_key)?.as_array()?;
            let slices: Vec<(String, f64)> = entries
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|entry| {
                    let value = entry.get("value").and_then(numeric)?;
                    let name = entry
                        .get(&field.name_key)
                        .map(descriptor::label)
                        .unwrap_or_default();
                    Some((name, value))
                })
                .collect();
            Some(PiePanel {
                caption: field.title.clone(),
                scene: pie_scene(&slices),
            })
        })
        .collect();
    (!panels.is_empty()).then_some(panels)
}

fn pie_scene(slices: &[(String, f64)]) -> Scene {
    const RADIUS: f64 = 64.0;
    let mut scene = Scene::new(PIE_SIZE, PIE_SIZE);
    let (cx, cy) = (PIE_SIZE / 2.0, PIE_SIZE / 2.0);
    let total: f64 = slices.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        return scene;
    }

    // Start at twelve o'clock, clockwise.
    let mut angle = -std::f64::consts::FRAC_PI_2;
    for (idx, (name, value)) in slices.iter().enumerate() {
        let share = value.max(0.0) / total;
        if share <= 0.0 {
            continue;
        }
        let sweep = share * std::f64::consts::TAU;
        let color = series_color(idx).to_string();
        if share >= 0.9999 {
            scene.push(Mark::Circle {
                cx,
                cy,
                r: RADIUS,
                fill: color,
            });
        } else {
            scene.push(Mark::Path {
                d: wedge_path(cx, cy, RADIUS, angle, angle + sweep),
                fill: color,
                stroke: "#ffffff".into(),
            });
        }

        let mid = angle + sweep / 2.0;
        let (lx, ly) = (cx + (RADIUS + 10.0) * mid.cos(), cy + (RADIUS + 10.0) * mid.sin());
        scene.push(Mark::Text {
            x: lx,
            y: ly + 3.0,
            content: format!("{name} ({:.1}%)", share * 100.0),
            anchor: if mid.cos() >= 0.0 { Anchor::Start } else { Anchor::End },
            size: 9.0,
            fill: series_color(idx).into(),
        });
        angle += sweep;
    }
    scene
}

fn wedge_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    use super::scene::fmt_num;
    let (x0, y0) = (cx + r * start.cos(), cy + r * start.sin());
    let (x1, y1) = (cx + r * end.cos(), cy + r * end.sin());
    let large = if end - start > std::f64::consts::PI { 1 } else { 0 };
    format!(
        "M{} {} L{} {} A{} {} 0 {} 1 {} {} Z",
        fmt_num(cx),
        fmt_num(cy),
        fmt_num(x0),
        fmt_num(y0),
        fmt_num(r),
        fmt_num(r),
        large,
        fmt_num(x1),
        fmt_num(y1)
    )
}

fn boxplot_scene(d: &ChartDescriptor) -> Option<Scene> {
    let stats = d.stats.as_ref()?.complete()?;
    let mut scene = Scene::new(PLOT_WIDTH, BOX_HEIGHT);
    let frame = Frame {
        left: 64.0,
        right: PLOT_WIDTH - 24.0,
        top: 16.0,
        bottom: BOX_HEIGHT - 54.0,
    };

    let (a, b) = (stats.min * 0.95, stats.max * 1.05);
    let domain = (a.min(b), a.max(b));
    let scale = LinearScale::new(domain, (frame.left, frame.right));
    let ticks: Vec<f64> = nice_ticks(domain.0, domain.1, 6)
        .into_iter()
        .filter(|t| *t >= domain.0 && *t <= domain.1)
        .collect();
    for tick in &ticks {
        let x = scale.map(*tick);
        scene.push(Mark::Line {
            x1: x,
            y1: frame.top,
            x2: x,
            y2: frame.bottom,
            stroke: palette::GRID.into(),
            width: 1.0,
            dashed: true,
        });
    }
    draw_baseline(&mut scene, &frame);
    draw_linear_x_axis(&mut scene, &frame, &scale, &ticks);

    let mid = (frame.top + frame.bottom) / 2.0;
    let half = (frame.bottom - frame.top) / 4.0;
    let median_color = series_color(2).to_string();

    scene.push(Mark::Rect {
        x: frame.left,
        y: mid - half,
        width: (scale.map(stats.median) - frame.left).max(0.0),
        height: half * 2.0,
        fill: median_color.clone(),
        opacity: 0.35,
    });
    scene.push(Mark::Line {
        x1: scale.map(stats.min),
        y1: mid,
        x2: scale.map(stats.max),
        y2: mid,
        stroke: palette::INK.into(),
        width: 1.5,
        dashed: false,
    });
    for whisker in [stats.min, stats.max] {
        let x = scale.map(whisker);
        scene.push(Mark::Line {
            x1: x,
            y1: mid - half / 2.0,
            x2: x,
            y2: mid + half / 2.0,
            stroke: palette::INK.into(),
            width: 1.5,
            dashed: false,
        });
    }
    let (q1, q3) = (scale.map(stats.q1), scale.map(stats.q3));
    scene.push(Mark::Area {
        points: vec![
            (q1, mid - half),
            (q3, mid - half),
            (q3, mid + half),
            (q1, mid + half),
        ],
        fill: "#ffffff".into(),
        opacity: 0.6,
        stroke: palette::INK.into(),
    });
    let median_x = scale.map(stats.median);
    scene.push(Mark::Line {
        x1: median_x,
        y1: mid - half,
        x2: median_x,
        y2: mid + half,
        stroke: median_color.clone(),
        width: 3.0,
        dashed: false,
    });
    scene.push(Mark::Text {
        x: frame.left - 8.0,
        y: mid + 4.0,
        content: "BEP".into(),
        anchor: Anchor::End,
        size: 11.0,
        fill: palette::AXIS_TEXT.into(),
    });
    scene.set_legend(vec![LegendEntry {
        label: crate::t!("series-median"),
        color: median_color,
    }]);
    Some(scene)
}
