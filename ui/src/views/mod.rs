mod dashboard;
mod placeholders;
mod quick_chat;

pub use dashboard::Dashboard;
pub use placeholders::{ManageProject, UploadData};
pub use quick_chat::QuickChat;
