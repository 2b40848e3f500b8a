//! Insight report panel: section tabs plus the chat-derived extras.

pub mod panel;

pub use panel::InsightPanel;
