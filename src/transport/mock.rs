//! In-memory transport for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{BotIdentity, Incoming, Transport};
use crate::core::UserInfo;
use crate::error::{Error, Result};

/// How `ping` behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingMode {
    Ok,
    Fail,
    /// Never answers
    Hang,
}

pub struct MockTransport {
    identity: BotIdentity,
    users: Vec<UserInfo>,
    incoming: Mutex<VecDeque<Result<Incoming>>>,
    sent: Mutex<Vec<(String, String)>>,
    ping: Mutex<PingMode>,
    fail_sends: AtomicBool,
    closed: AtomicBool,
}

impl MockTransport {
    pub fn new(bot_id: &str, bot_name: &str) -> Self {
        Self {
            identity: BotIdentity {
                id: bot_id.to_string(),
                name: bot_name.to_string(),
            },
            users: Vec::new(),
            incoming: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            ping: Mutex::new(PingMode::Ok),
            fail_sends: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    pub fn with_users(mut self, users: Vec<UserInfo>) -> Self {
        self.users = users;
        self
    }

    /// Queue something for `receive` to return.
    pub fn push(&self, incoming: Result<Incoming>) {
        self.incoming.lock().unwrap().push_back(incoming);
    }

    pub fn set_ping(&self, mode: PingMode) {
        *self.ping.lock().unwrap() = mode;
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// `(channel, text)` pairs sent so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&self) -> Result<BotIdentity> {
        Ok(self.identity.clone())
    }

    async fn users(&self) -> Result<Vec<UserInfo>> {
        Ok(self.users.clone())
    }

    async fn receive(&self) -> Result<Incoming> {
        let next = self.incoming.lock().unwrap().pop_front();
        match next {
            Some(incoming) => incoming,
            // Nothing left: block like an idle connection.
            None => std::future::pending().await,
        }
    }

    async fn ping(&self) -> Result<()> {
        let mode = *self.ping.lock().unwrap();
        match mode {
            PingMode::Ok => Ok(()),
            PingMode::Fail => Err(Error::Transport("ping refused".to_string())),
            PingMode::Hang => std::future::pending().await,
        }
    }

    async fn send(&self, channel: &str, text: &str) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(Error::Transport("send refused".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel.to_string(), text.to_string()));
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
