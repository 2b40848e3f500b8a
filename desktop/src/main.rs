#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use std::path::PathBuf;

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::components::app_sidebar::{register_nav, NavBuilder};
use ui::components::AppSidebar;
use ui::core::DashboardConfig;
use ui::views::{Dashboard, ManageProject, QuickChat, UploadData};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopShell)]
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

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    if let Err(err) = dioxus::logger::init(level) {
        eprintln!("logger already initialized: {err}");
    }
}

#[cfg(feature = "desktop")]
fn main() {
    init_logging();
    let resource_dir = resolve_resource_dir();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("Decision Mate – v{}", env!("CARGO_PKG_VERSION")))
                        .with_maximized(true),
                )
                .with_resource_directory(resource_dir),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    init_logging();
    LaunchBuilder::server().launch(App);
}

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

#[component]
fn App() -> Element {
    ui::i18n::init();

    // The sidebar's locale switcher writes this; keying the router on it
    // remounts every page with fresh strings.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);
    use_context_provider(DashboardConfig::load);

    register_nav(NavBuilder {
        dashboard: nav_dashboard,
        upload: nav_upload,
        projects: nav_projects,
        quick_chat: nav_quick_chat,
    });

    // Some window managers ignore the initial maximize request.
    #[cfg(feature = "desktop")]
    {
        let win = dioxus::desktop::use_window();
        use_effect(move || {
            win.set_maximized(true);
        });
    }

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        div {
            key: "{lang_code()}",
            Router::<Route> { }
        }
    }
}

#[cfg(feature = "desktop")]
fn resolve_resource_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../ui/assets"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}

/// Sidebar layout around the routed page.
#[component]
fn DesktopShell() -> Element {
    rsx! {
        div { class: "app-shell",
            AppSidebar {}
            main { class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}
