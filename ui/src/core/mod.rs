//! Platform-neutral dashboard state: sections, tabs, scroll tracking, the
//! chat transcript and settings. Nothing here touches the DOM.

pub mod config;
pub mod format;
pub mod platform;
pub mod sections;
pub mod tabs;
pub mod transcript;
pub mod visibility;

pub use config::{ConfigError, DashboardConfig};
pub use sections::{dummy_charts, Section, SectionError, SectionMap};
pub use tabs::{InsightTabs, Tab, TabKind};
pub use transcript::{
    ChatMessage, ChatReply, ChatRequest, QuickLog, ReplyForwards, ReplyHandlers, Role, Transcript,
};
pub use visibility::{visible_ratio, VisibilityTracker};
