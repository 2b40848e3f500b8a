use dioxus::prelude::*;
use serde_json::{Map, Value};

use crate::charts::ChartDescriptor;
use crate::chat::ChatWidget;
use crate::core::{dummy_charts, InsightTabs, SectionMap};
use crate::export::ReportExportButton;
use crate::insights::InsightPanel;
use crate::t;

/// Main page. Owns the section map and tab state that the chat widget feeds.
#[component]
pub fn Dashboard() -> Element {
    let mut sections = use_signal(SectionMap::builtin);
    let mut tabs = use_signal(|| InsightTabs::new(sections.peek().titles()));

    // Forecast charts become (or replace) the trailing section.
    let mut attach_forecast = move |charts: Vec<ChartDescriptor>| {
        if charts.is_empty() {
            return;
        }
        let title = t!("section-forecast");
        sections.with_mut(|map| *map = std::mem::take(map).with_external(&title, charts));
        let titles = sections.read().titles();
        tabs.write().rebase(titles);
        tracing::info!(%title, "forecast section attached");
    };

    rsx! {
        section { class: "page page-dashboard",
            div { class: "dashboard__actions",
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| attach_forecast(dummy_charts()),
                    {t!("dashboard-dummy-button")}
                }
                ReportExportButton { sections, tabs }
            }

            article { class: "report-paper",
                h2 { class: "report-paper__title", {t!("report-title")} }
                if tabs.read().is_empty() {
                    p { class: "report-paper__empty", {t!("insights-empty")} }
                } else {
                    InsightPanel {
                        sections,
                        tabs,
                        on_tab_change: move |index: usize| {
                            tracing::debug!(index, "insight tab in view");
                        },
                    }
                }
            }

            ChatWidget {
                on_insights: move |charts: Vec<ChartDescriptor>| attach_forecast(charts),
                on_structured: move |payload: Map<String, Value>| {
                    tabs.write().absorb_structured(payload);
                },
                on_planning: move |payload: Value| {
                    tabs.write().absorb_planning(payload);
                },
                on_related_docs: move |payload: String| {
                    tabs.write().absorb_related_docs(payload);
                },
            }
        }
    }
}
