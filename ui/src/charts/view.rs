use dioxus::prelude::*;

use super::descriptor::ChartDescriptor;
use super::render::{render_charts, ChartVisual, RenderedChart, TableVisual};
use super::scene::{fmt_num, points_attr, Mark, Scene};

/// Renders every descriptor as a titled card, in input order.
#[component]
pub fn ChartList(charts: Vec<ChartDescriptor>) -> Element {
    let rendered = render_charts(&charts);

    rsx! {
        div { class: "chart-list",
            for (idx, chart) in rendered.into_iter().enumerate() {
                ChartCard { key: "{idx}", chart }
            }
        }
    }
}

#[component]
pub fn ChartCard(chart: RenderedChart) -> Element {
    let RenderedChart { title, visual } = chart;

    rsx! {
        article { class: "chart-card",
            h4 { class: "chart-card__title", "{title}" }
            match visual {
                Some(ChartVisual::Plot(scene)) => rsx! { SceneSvg { scene } },
                Some(ChartVisual::Table(table)) => rsx! { ChartTable { table } },
                Some(ChartVisual::PieGrid(panels)) => rsx! {
                    div { class: "chart-card__pies",
                        for (idx, panel) in panels.into_iter().enumerate() {
                            figure { key: "{idx}", class: "chart-card__pie",
                                figcaption { class: "chart-card__caption", "{panel.caption}" }
                                SceneSvg { scene: panel.scene }
                            }
                        }
                    }
                },
                None => rsx! {
                    p { class: "chart-card__empty", {crate::t!("chart-unavailable")} }
                },
            }
        }
    }
}

#[component]
fn SceneSvg(scene: Scene) -> Element {
    let view_box = scene.view_box();
    let max_width = fmt_num(scene.width);

    rsx! {
        svg {
            class: "chart-card__svg",
            view_box: "{view_box}",
            style: "max-width: {max_width}px",
            role: "img",
            for (idx, mark) in scene.marks.into_iter().enumerate() {
                MarkNode { key: "{idx}", mark }
            }
        }
    }
}

#[component]
fn MarkNode(mark: Mark) -> Element {
    match mark {
        Mark::Rect {
            x,
            y,
            width,
            height,
            fill,
            opacity,
        } => rsx! {
            rect {
                x: fmt_num(x),
                y: fmt_num(y),
                width: fmt_num(width),
                height: fmt_num(height),
                fill,
                fill_opacity: fmt_num(opacity),
            }
        },
        Mark::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            width,
            dashed,
        } => rsx! {
            line {
                x1: fmt_num(x1),
                y1: fmt_num(y1),
                x2: fmt_num(x2),
                y2: fmt_num(y2),
                stroke,
                stroke_width: fmt_num(width),
                stroke_dasharray: if dashed { "3 3" } else { "none" },
            }
        },
        Mark::Polyline {
            points,
            stroke,
            width,
        } => rsx! {
            polyline {
                points: points_attr(&points),
                fill: "none",
                stroke,
                stroke_width: fmt_num(width),
            }
        },
        Mark::Area {
            points,
            fill,
            opacity,
            stroke,
        } => rsx! {
            polygon {
                points: points_attr(&points),
                fill,
                fill_opacity: fmt_num(opacity),
                stroke,
            }
        },
        Mark::Circle { cx, cy, r, fill } => rsx! {
            circle { cx: fmt_num(cx), cy: fmt_num(cy), r: fmt_num(r), fill }
        },
        Mark::Path { d, fill, stroke } => rsx! {
            path { d, fill, stroke }
        },
        Mark::Text {
            x,
            y,
            content,
            anchor,
            size,
            fill,
        } => rsx! {
            text {
                x: fmt_num(x),
                y: fmt_num(y),
                text_anchor: anchor.as_str(),
                font_size: fmt_num(size),
                fill,
                "{content}"
            }
        },
    }
}

#[component]
fn ChartTable(table: TableVisual) -> Element {
    rsx! {
        div { class: "chart-table__scroll",
            table { class: "chart-table",
                thead {
                    tr {
                        for (idx, header) in table.headers.iter().enumerate() {
                            th { key: "{idx}", "{header}" }
                        }
                    }
                }
                tbody {
                    for (row_idx, row) in table.rows.iter().enumerate() {
                        tr { key: "{row_idx}",
                            for (col_idx, cell) in row.iter().enumerate() {
                                td { key: "{col_idx}", "{cell}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
