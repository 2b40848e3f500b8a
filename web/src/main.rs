use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::components::app_sidebar::{register_nav, NavBuilder};
use ui::components::AppSidebar;
use ui::core::DashboardConfig;
use ui::views::{Dashboard, ManageProject, QuickChat, UploadData};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebShell)]
    #[route("/")]
    Dashboard {},
    #[route("/invoices")]
    UploadData {},
    #[route("/projects")]
    ManageProject {},
    #[route("/chat")]
    QuickChat {},
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_dashboard(label: &str) -> Element {
    rsx!(Link { class: "sidebar__link", to: Route::Dashboard {}, "{label}" })
}
fn nav_upload(label: &str) -> Element {
    rsx!(Link { class: "sidebar__link", to: Route::UploadData {}, "{label}" })
}
fn nav_projects(label: &str) -> Element {
    rsx!(Link { class: "sidebar__link", to: Route::ManageProject {}, "{label}" })
}
fn nav_quick_chat(label: &str) -> Element {
    rsx!(Link { class: "sidebar__link", to: Route::QuickChat {}, "{label}" })
}

fn main() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    if let Err(err) = dioxus::logger::init(level) {
        eprintln!("logger already initialized: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);
    use_context_provider(DashboardConfig::load);

    register_nav(NavBuilder {
        dashboard: nav_dashboard,
        upload: nav_upload,
        projects: nav_projects,
        quick_chat: nav_quick_chat,
    });

    rsx! {
        document::Title { "Decision Mate" }
        document::Style { "{MAIN_CSS_INLINE}" }

        div {
            key: "{lang_code()}",
            Router::<Route> {}
        }
    }
}

/// Sidebar layout around the routed page.
#[component]
fn WebShell() -> Element {
    rsx! {
        div { class: "app-shell",
            AppSidebar {}
            main { class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}
