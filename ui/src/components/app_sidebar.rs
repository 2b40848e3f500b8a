use crate::i18n::{self};
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

const SIDEBAR_CSS: Asset = asset!("/assets/styling/sidebar.css");
const SIDEBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/sidebar.css"
));

/// Platform-supplied menu links.
///
/// `ui` does not know the launchers' `Route` enums, so each platform
/// registers one builder per menu entry. Every builder receives the
/// localized label and returns a `Link` that contains exactly that label.
///
/// ```ignore
/// use ui::components::app_sidebar::{register_nav, NavBuilder};
/// register_nav(NavBuilder {
///     dashboard: |label| rsx!( Link { class: "sidebar__link", to: Route::Dashboard {}, "{label}" } ),
///     upload: |label| rsx!( Link { class: "sidebar__link", to: Route::UploadData {}, "{label}" } ),
///     projects: |label| rsx!( Link { class: "sidebar__link", to: Route::ManageProject {}, "{label}" } ),
///     quick_chat: |label| rsx!( Link { class: "sidebar__link", to: Route::QuickChat {}, "{label}" } ),
/// });
/// ```
pub struct NavBuilder {
    pub dashboard: fn(label: &str) -> Element,
    pub upload: fn(label: &str) -> Element,
    pub projects: fn(label: &str) -> Element,
    pub quick_chat: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    if NAV_BUILDER.set(builder).is_err() {
        tracing::debug!("navigation builder already registered");
    }
}

/// Menu filter used by the search field: case-insensitive substring match,
/// blank queries keep every entry.
pub fn matches_query(label: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || label.to_lowercase().contains(&query.to_lowercase())
}

#[component]
pub fn AppSidebar(children: Element) -> Element {
    i18n::init();

    let mut current_lang = use_signal(|| "en-US".to_string());
    let langs = use_signal(i18n::available_languages);
    let mut collapsed = use_signal(|| false);
    let mut query = use_signal(String::new);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!(%err, lang = %val, "language switch failed"),
        }
    };

    let filter = query();
    let menu: Option<Vec<Element>> = NAV_BUILDER.get().map(|b| {
        let entries: [(String, fn(&str) -> Element); 4] = [
            (t!("nav-dashboard"), b.dashboard),
            (t!("nav-upload"), b.upload),
            (t!("nav-projects"), b.projects),
            (t!("nav-quick-chat"), b.quick_chat),
        ];
        entries
            .into_iter()
            .filter(|(label, _)| matches_query(label, &filter))
            .map(|(label, build)| build(&label))
            .collect()
    });

    let sidebar_class = if collapsed() {
        "sidebar sidebar--collapsed"
    } else {
        "sidebar"
    };

    rsx! {
        document::Link { rel: "stylesheet", href: SIDEBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{SIDEBAR_CSS_INLINE}" }
        }

        aside {
            id: "sidebar",
            class: "{sidebar_class}",
            div { style: "display:none", "{lang_marker}" }
            div { class: "sidebar__header",
                span { class: "sidebar__brand",
                    span { class: "sidebar__brand-mark", aria_hidden: "true", "◆" }
                    if !collapsed() {
                        span { class: "sidebar__brand-name", {t!("brand-name")} }
                    }
                }
                button {
                    r#type: "button",
                    class: "sidebar__toggle",
                    aria_label: t!("nav-toggle"),
                    aria_expanded: !collapsed(),
                    onclick: move |_| collapsed.set(!collapsed()),
                    "☰"
                }
            }

            if !collapsed() {
                input {
                    class: "sidebar__search",
                    r#type: "search",
                    placeholder: t!("nav-search-placeholder"),
                    value: "{query}",
                    oninput: move |evt| query.set(evt.value()),
                }

                if let Some(links) = menu {
                    nav { class: "sidebar__links",
                        for link in links {
                            {link}
                        }
                    }
                } else {
                    nav { class: "sidebar__links", {children} }
                }

                if show_switcher {
                    div { class: "sidebar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            for code in langs() {
                                option { key: "{code}", value: "{code}", "{code}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_matches_case_insensitively() {
        assert!(matches_query("Upload Data", "upload"));
        assert!(matches_query("Manage Project", "  "));
        assert!(!matches_query("Dashboard", "chat"));
        assert!(matches_query("대시보드", "대시"));
    }
}
