//! Queue commands.
//!
//! Every command is a pure function from the current queue and the parsed
//! chat message to a new queue plus a notification. Commands never perform
//! I/O; the dispatch engine decides what to do with their results.

pub mod info;
pub mod moderation;
pub mod parse;
pub mod response;
pub mod token;

use std::collections::HashMap;

use crate::core::{Item, Queue, UserCache};

pub use response::Responses;

/// Message to post back to a channel. An empty message means "say nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub channel: String,
    pub message: String,
}

impl Notification {
    pub fn new(channel: &str, message: impl Into<String>) -> Self {
        Self {
            channel: channel.to_string(),
            message: message.into(),
        }
    }

    /// No response required.
    pub fn none(channel: &str) -> Self {
        Self::new(channel, String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}

/// Read-only state a command may consult.
pub struct Context<'a> {
    /// The bot's own user id
    pub bot_id: &'a str,
    /// The bot's display name
    pub bot_name: &'a str,
    pub users: &'a UserCache,
}

impl<'a> Context<'a> {
    pub fn new(bot_id: &'a str, bot_name: &'a str, users: &'a UserCache) -> Self {
        Self {
            bot_id,
            bot_name,
            users,
        }
    }

    pub fn responses(&self) -> Responses<'a> {
        Responses::new(self.users)
    }

    /// Audit trail of queue changes.
    pub fn log_activity(&self, item: &Item, action: &str) {
        let name = self.users.name(&item.id).unwrap_or("unknown");
        tracing::info!(
            target: "qbot::activity",
            "{} ({}) [{}] {}",
            name,
            item.id,
            item.reason,
            action
        );
    }
}

/// `(queue, context, channel, actor, args) -> (queue, notification)`
pub type CommandFn = fn(&Queue, &Context<'_>, &str, &str, &str) -> (Queue, Notification);

/// Where a message was posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Group or channel visible to everyone in it
    Public,
    /// One-to-one conversation with the bot
    Direct,
}

/// Keyword -> command lookup, one table per visibility class.
#[derive(Clone, Default)]
pub struct CommandTable {
    public: HashMap<String, CommandFn>,
    direct: HashMap<String, CommandFn>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command for public channels.
    pub fn public(mut self, keyword: &str, command: CommandFn) -> Self {
        self.public.insert(keyword.to_lowercase(), command);
        self
    }

    /// Register a command for direct messages.
    pub fn direct(mut self, keyword: &str, command: CommandFn) -> Self {
        self.direct.insert(keyword.to_lowercase(), command);
        self
    }

    /// Register a command for both classes.
    pub fn everywhere(self, keyword: &str, command: CommandFn) -> Self {
        self.public(keyword, command).direct(keyword, command)
    }

    pub fn lookup(&self, keyword: &str, visibility: Visibility) -> Option<CommandFn> {
        let table = match visibility {
            Visibility::Public => &self.public,
            Visibility::Direct => &self.direct,
        };
        table.get(&keyword.to_lowercase()).copied()
    }

    /// The bot's command set. Queue changes are only accepted in public.
    pub fn standard() -> Self {
        Self::new()
            .public("join", token::join)
            .public("leave", token::leave)
            .public("done", token::done)
            .public("yield", token::yield_token)
            .public("barge", token::barge)
            .public("boot", moderation::boot)
            .public("oust", moderation::oust)
            .public("delegate", moderation::delegate)
            .everywhere("list", info::list)
            .everywhere("help", info::help)
    }
}
