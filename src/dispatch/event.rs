//! Events consumed by the dispatch engine and command addressing.

use crate::command::parse::split_word;
use crate::command::Visibility;
use crate::core::UserInfo;
use crate::transport::{Incoming, MessageEvent};

/// One unit of work for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Message(MessageEvent),
    UserChange(UserInfo),
    /// Time to prove the transport is still alive
    LivenessTick,
    /// The receive loop lost the connection
    LinkFailure(String),
}

impl From<Incoming> for Event {
    fn from(incoming: Incoming) -> Self {
        match incoming {
            Incoming::Message(msg) => Event::Message(msg),
            Incoming::UserChange(user) => Event::UserChange(user),
        }
    }
}

impl Event {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Message(_) => "message",
            Event::UserChange(_) => "user change",
            Event::LivenessTick => "liveness tick",
            Event::LinkFailure(_) => "link failure",
        }
    }
}

fn is_bot_name(name: &str, bot_name: &str) -> bool {
    name.eq_ignore_ascii_case(bot_name)
}

/// Extract `(keyword, args)` from a chat message addressed to the bot.
///
/// Accepted forms are `/cmd args`, `/cmd@bot args` and `@bot cmd args`.
/// Direct messages may also drop the slash or mention. The keyword comes
/// back lowercased; argument case is preserved.
pub fn parse_command<'a>(text: &'a str, bot_name: &str, visibility: Visibility) -> Option<(String, &'a str)> {
    let (first, rest) = split_word(text);

    let (keyword, args) = if let Some(command) = first.strip_prefix('/') {
        match command.split_once('@') {
            Some((keyword, target)) if is_bot_name(target, bot_name) => (keyword, rest),
            Some(_) => return None,
            None => (command, rest),
        }
    } else if let Some(mention) = first.strip_prefix('@') {
        let mention = mention.trim_end_matches([':', ',']);
        if !is_bot_name(mention, bot_name) {
            return None;
        }
        split_word(rest)
    } else if visibility == Visibility::Direct {
        (first, rest)
    } else {
        return None;
    };

    if keyword.is_empty() {
        return None;
    }
    Some((keyword.to_lowercase(), args))
}
