// src/lib.rs

pub mod api;
pub mod app;
pub mod chat_message;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod errors;
pub mod key_handlers;
pub mod log_view;
pub mod logging;
pub mod models;
pub mod session;
pub mod status_indicator;
pub mod submission;
pub mod ui;

pub use api::{HttpQueryClient, QueryOutcome, QueryTransport};
pub use config::ChatConfig;
pub use conversation::Conversation;
pub use errors::{ChatError, ChatResult};
pub use models::{Message, MessageStatus, Sender};
pub use session::ChatSession;
