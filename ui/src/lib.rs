//! Shared UI crate for Decision Mate. Views, components and the
//! platform-neutral dashboard core live here; `web` and `desktop` only
//! launch it.

pub mod charts;
pub mod chat;
pub mod core;
pub mod export;
pub mod i18n;
pub mod insights;
pub mod views;

pub mod components {
    pub mod app_sidebar;
    pub use app_sidebar::register_nav;
    pub use app_sidebar::AppSidebar;
    pub use app_sidebar::NavBuilder;
}

#[cfg(test)]
mod tests {
    mod i18n_completeness;
}
