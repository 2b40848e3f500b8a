//! Chat widgets and the clients behind them.

pub mod client;
pub mod quick;
pub mod widget;

pub use client::{deliver, ChatError, ChatTransport, HttpChatClient, QuickAskClient};
pub use quick::QuickAskBox;
pub use widget::ChatWidget;
