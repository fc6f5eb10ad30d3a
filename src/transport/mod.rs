//! Chat transport abstraction.
//!
//! The dispatch engine only talks to the chat platform through `Transport`.
//! `telegram` is the production implementation; tests use `mock`.

pub mod telegram;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::command::Visibility;
use crate::core::UserInfo;
use crate::error::Result;

pub use telegram::TelegramTransport;

/// Who the bot is on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: String,
    pub name: String,
}

/// A chat message addressed to, or overheard by, the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    pub channel: String,
    pub user: String,
    pub text: String,
    pub visibility: Visibility,
}

impl MessageEvent {
    pub fn public(channel: &str, user: &str, text: &str) -> Self {
        Self {
            channel: channel.to_string(),
            user: user.to_string(),
            text: text.to_string(),
            visibility: Visibility::Public,
        }
    }

    pub fn direct(channel: &str, user: &str, text: &str) -> Self {
        Self {
            visibility: Visibility::Direct,
            ..Self::public(channel, user, text)
        }
    }
}

/// Something the transport received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    Message(MessageEvent),
    /// A user appeared or changed their display name
    UserChange(UserInfo),
}

/// Chat platform connection.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Authenticate and report the bot's own identity.
    async fn connect(&self) -> Result<BotIdentity>;

    /// Users known up front, for the initial identity cache.
    async fn users(&self) -> Result<Vec<UserInfo>>;

    /// Wait for the next event. An error means the connection is gone.
    async fn receive(&self) -> Result<Incoming>;

    /// Round trip to the platform to prove the link is alive.
    async fn ping(&self) -> Result<()>;

    /// Post a message to a channel.
    async fn send(&self, channel: &str, text: &str) -> Result<()>;

    /// Disconnect.
    async fn close(&self) -> Result<()>;
}
