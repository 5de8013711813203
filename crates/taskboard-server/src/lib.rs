//! # taskboard-server
//!
//! REST surface of the task manager: every route lives under
//! `/api/taskManager`, answers JSON, and localizes messages and errors for
//! the caller's locale.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod locale;
pub mod messages;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use server::{AppState, TaskboardServer};
