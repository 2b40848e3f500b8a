use std::rc::Rc;

use dioxus::prelude::*;

use crate::charts::ChartList;
use crate::core::format::{doc_paragraphs, planning_text, structured_lines};
use crate::core::tabs::{InsightTabs, Tab, TabKind};
use crate::core::visibility::{visible_ratio, VisibilityTracker};
use crate::core::SectionMap;

/// Tabbed, scrollable insight report.
///
/// The active tab follows the scroll position only: clicking a tab scrolls
/// its section into view and the visibility tracker picks the change up
/// from there.
#[component]
pub fn InsightPanel(
    sections: Signal<SectionMap>,
    tabs: Signal<InsightTabs>,
    on_tab_change: Option<EventHandler<usize>>,
) -> Element {
    let mut tabs = tabs;
    let mut tracker = use_signal(VisibilityTracker::default);
    let mut container = use_signal(|| Option::<Rc<MountedData>>::None);
    let mut anchors = use_signal(Vec::<Option<Rc<MountedData>>>::new);

    let tab_list = tabs.read().tabs();
    let tab_count = tab_list.len();

    // Re-subscribe whenever the tab set changes.
    use_effect(use_reactive((&tab_count,), move |(tab_count,)| {
        tracker.write().reset(tab_count);
        anchors.write().resize(tab_count, None);
    }));

    let observe = move || {
        let Some(view) = container() else {
            return;
        };
        let nodes = anchors();
        spawn(async move {
            let Some(ratios) = measure(view, nodes).await else {
                return;
            };
            let crossed = tracker.write().observe(&ratios);
            if let Some(index) = crossed {
                if tabs.write().activate(index) {
                    tracing::debug!(index, "active insight tab changed");
                    if let Some(handler) = on_tab_change {
                        handler.call(index);
                    }
                }
            }
        });
    };

    let scroll_to_tab = move |index: usize| {
        let target = anchors.read().get(index).cloned().flatten();
        if let Some(node) = target {
            spawn(async move {
                let _ = node.scroll_to(ScrollBehavior::Smooth).await;
            });
        }
    };

    let active = tabs.read().active();

    rsx! {
        div { class: "insight-panel",
            nav { class: "insight-panel__tabs", role: "tablist",
                for (idx, tab) in tab_list.iter().enumerate() {
                    button {
                        key: "{idx}",
                        r#type: "button",
                        role: "tab",
                        class: if idx == active { "insight-tab insight-tab--active" } else { "insight-tab" },
                        aria_selected: idx == active,
                        onclick: move |_| scroll_to_tab(idx),
                        "{tab.title}"
                    }
                }
            }

            div {
                class: "insight-panel__scroll",
                onmounted: move |evt| {
                    container.set(Some(evt.data()));
                    observe();
                },
                onscroll: move |_| observe(),
                for (idx, tab) in tab_list.iter().cloned().enumerate() {
                    section {
                        key: "{idx}",
                        class: "insight-section",
                        onmounted: move |evt| {
                            let mut slots = anchors.write();
                            if slots.len() <= idx {
                                slots.resize(idx + 1, None);
                            }
                            slots[idx] = Some(evt.data());
                        },
                        h3 { class: "insight-section__title", "{tab.title}" }
                        TabBody { tab, sections, tabs }
                        hr { class: "insight-section__divider" }
                    }
                }
            }
        }
    }
}

#[component]
fn TabBody(tab: Tab, sections: Signal<SectionMap>, tabs: Signal<InsightTabs>) -> Element {
    match tab.kind {
        TabKind::Section(index) => {
            let charts = sections
                .read()
                .sections()
                .get(index)
                .map(|section| section.charts.clone())
                .unwrap_or_default();
            rsx! { ChartList { charts } }
        }
        TabKind::Structured => {
            let lines = tabs
                .read()
                .structured()
                .map(structured_lines)
                .unwrap_or_default();
            rsx! {
                div { class: "insight-structured",
                    for (key, value) in lines {
                        p { key: "{key}", class: "insight-structured__line",
                            strong { "{key}" }
                            ": {value}"
                        }
                    }
                }
            }
        }
        TabKind::Planning => {
            let text = tabs.read().planning().map(planning_text).unwrap_or_default();
            rsx! {
                pre { class: "insight-planning", "{text}" }
            }
        }
        TabKind::RelatedDocs => {
            let paragraphs = tabs
                .read()
                .related_docs()
                .map(doc_paragraphs)
                .unwrap_or_default();
            rsx! {
                div { class: "insight-docs",
                    for (idx, paragraph) in paragraphs.into_iter().enumerate() {
                        p { key: "{idx}", class: "insight-docs__paragraph", "{paragraph}" }
                    }
                }
            }
        }
    }
}

/// Visible ratio of every anchored section inside the scroll container.
async fn measure(
    container: Rc<MountedData>,
    anchors: Vec<Option<Rc<MountedData>>>,
) -> Option<Vec<f64>> {
    let view = container.get_client_rect().await.ok()?;
    let viewport = (view.min_y(), view.max_y());
    let mut ratios = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        let ratio = match anchor {
            Some(node) => match node.get_client_rect().await {
                Ok(rect) => visible_ratio((rect.min_y(), rect.max_y()), viewport),
                Err(_) => 0.0,
            },
            None => 0.0,
        };
        ratios.push(ratio);
    }
    Some(ratios)
}
