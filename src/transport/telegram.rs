//! Telegram transport - long polling with `getUpdates`.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use teloxide::payloads::GetUpdatesSetters;
use teloxide::prelude::*;
use teloxide::types::{Message, UpdateKind, User};
use tokio::sync::Mutex;

use super::{BotIdentity, Incoming, MessageEvent, Transport};
use crate::command::Visibility;
use crate::config::TelegramSettings;
use crate::core::UserInfo;
use crate::error::{Error, Result};

/// Polling cursor and names seen so far.
#[derive(Default)]
struct PollState {
    /// Next update id to ask for
    offset: i32,
    pending: VecDeque<Incoming>,
    names: HashMap<String, String>,
}

pub struct TelegramTransport {
    bot: Bot,
    settings: TelegramSettings,
    state: Mutex<PollState>,
}

impl TelegramTransport {
    pub fn new(token: &str, settings: &TelegramSettings) -> Self {
        Self {
            bot: Bot::new(token),
            settings: settings.clone(),
            state: Mutex::new(PollState::default()),
        }
    }
}

/// Username if the user has one, first name otherwise.
fn display_name(user: &User) -> String {
    user.username
        .clone()
        .unwrap_or_else(|| user.first_name.clone())
}

/// Turn a Telegram message into transport events.
///
/// A sender whose display name is new or different is announced with a
/// `UserChange` before the message itself.
fn events_from_message(names: &mut HashMap<String, String>, msg: &Message) -> Vec<Incoming> {
    let Some(user) = msg.from.as_ref() else {
        return Vec::new();
    };
    let Some(text) = msg.text() else {
        return Vec::new();
    };

    let mut events = Vec::new();
    let id = user.id.0.to_string();
    let name = display_name(user);

    if names.get(&id) != Some(&name) {
        names.insert(id.clone(), name.clone());
        events.push(Incoming::UserChange(UserInfo::new(id.clone(), name)));
    }

    let visibility = if msg.chat.is_private() {
        Visibility::Direct
    } else {
        Visibility::Public
    };

    events.push(Incoming::Message(MessageEvent {
        channel: msg.chat.id.0.to_string(),
        user: id,
        text: text.to_string(),
        visibility,
    }));
    events
}

fn parse_chat_id(channel: &str) -> Result<ChatId> {
    channel
        .parse::<i64>()
        .map(ChatId)
        .map_err(|_| Error::Transport(format!("Invalid Telegram chat id: {}", channel)))
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn connect(&self) -> Result<BotIdentity> {
        tracing::info!("Connecting to Telegram...");
        let me = self.bot.get_me().await?;
        let identity = BotIdentity {
            id: me.user.id.0.to_string(),
            name: display_name(&me.user),
        };
        tracing::debug!("Bot identity: {} ({})", identity.name, identity.id);
        Ok(identity)
    }

    async fn users(&self) -> Result<Vec<UserInfo>> {
        let Some(chat) = self.settings.home_chat_id else {
            tracing::info!("No home chat configured, users will be learned from messages");
            return Ok(Vec::new());
        };

        let admins = self.bot.get_chat_administrators(ChatId(chat)).await?;
        let users: Vec<UserInfo> = admins
            .iter()
            .map(|member| UserInfo::new(member.user.id.0.to_string(), display_name(&member.user)))
            .collect();

        let mut state = self.state.lock().await;
        for user in &users {
            state.names.insert(user.id.clone(), user.name.clone());
        }

        tracing::debug!("Loaded {} users from chat {}", users.len(), chat);
        Ok(users)
    }

    async fn receive(&self) -> Result<Incoming> {
        let mut state = self.state.lock().await;
        loop {
            if let Some(incoming) = state.pending.pop_front() {
                return Ok(incoming);
            }

            let updates = self
                .bot
                .get_updates()
                .offset(state.offset)
                .timeout(self.settings.poll_timeout_secs)
                .await
                .map_err(|e| Error::Link(e.to_string()))?;

            for update in updates {
                state.offset = update.id.0 as i32 + 1;
                if let UpdateKind::Message(msg) = update.kind {
                    let events = events_from_message(&mut state.names, &msg);
                    state.pending.extend(events);
                }
            }
        }
    }

    async fn ping(&self) -> Result<()> {
        self.bot.get_me().await?;
        Ok(())
    }

    async fn send(&self, channel: &str, text: &str) -> Result<()> {
        let chat = parse_chat_id(channel)?;
        self.bot.send_message(chat, text).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        // Acknowledge everything handed out so it is not redelivered on restart.
        let offset = self.state.lock().await.offset;
        if offset > 0 {
            self.bot.get_updates().offset(offset).limit(1).timeout(0).await?;
        }
        tracing::info!("Telegram transport closed");
        Ok(())
    }
}
