//! Side-effect sinks fed by the engine after each state transition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::command::Notification;
use crate::core::Queue;
use crate::error::{Error, Result};
use crate::transport::Transport;

/// Delivers command responses.
#[async_trait]
pub trait Notify: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<()>;
}

/// Durably records the queue.
///
/// Implementations must tolerate being handed an unchanged queue.
pub trait Persist: Send + Sync {
    fn persist(&mut self, queue: &Queue) -> Result<()>;
}

/// Posts notifications back through the chat transport.
pub struct TransportNotifier {
    transport: Arc<dyn Transport>,
}

impl TransportNotifier {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Notify for TransportNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        if notification.is_empty() {
            return Ok(());
        }
        self.transport
            .send(&notification.channel, &notification.message)
            .await
            .map_err(|e| Error::Notify(format!("{}: {}", notification.channel, e)))
    }
}
