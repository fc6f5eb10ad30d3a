//! qbot library root.

pub mod cli;
pub mod command;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod transport;

pub use cli::Cli;
pub use command::{CommandTable, Notification};
pub use config::{load_settings, Settings};
pub use core::{Item, Queue, UserCache};
pub use dispatch::{Engine, Event};
pub use error::{Error, Result};
pub use transport::{TelegramTransport, Transport};
