//! The dispatch engine: single owner of the queue.
//!
//! Producers push `Event`s into one bounded channel; the engine applies them
//! strictly one at a time. A command's notification is delivered and the new
//! queue persisted before the next event is looked at.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::event::{parse_command, Event};
use super::shutdown::ShutdownToken;
use super::sink::{Notify, Persist, TransportNotifier};
use crate::command::{CommandTable, Context};
use crate::core::{Queue, UserCache, UserInfo};
use crate::error::{Error, Result};
use crate::transport::{BotIdentity, MessageEvent, Transport};

/// Default bound on a liveness probe round trip.
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    /// No new events accepted; already queued ones are finished
    Draining,
    Stopped,
}

pub struct Engine {
    identity: BotIdentity,
    queue: Queue,
    users: UserCache,
    commands: CommandTable,
    transport: Arc<dyn Transport>,
    notifier: Box<dyn Notify>,
    persister: Box<dyn Persist>,
    ping_timeout: Duration,
    state: EngineState,
}

impl Engine {
    pub fn new(
        identity: BotIdentity,
        queue: Queue,
        users: UserCache,
        transport: Arc<dyn Transport>,
        persister: impl Persist + 'static,
    ) -> Self {
        Self {
            identity,
            queue,
            users,
            commands: CommandTable::standard(),
            notifier: Box::new(TransportNotifier::new(transport.clone())),
            transport,
            persister: Box::new(persister),
            ping_timeout: DEFAULT_PING_TIMEOUT,
            state: EngineState::Running,
        }
    }

    pub fn with_commands(mut self, commands: CommandTable) -> Self {
        self.commands = commands;
        self
    }

    pub fn with_ping_timeout(mut self, timeout: Duration) -> Self {
        self.ping_timeout = timeout;
        self
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn users(&self) -> &UserCache {
        &self.users
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn identity(&self) -> &BotIdentity {
        &self.identity
    }

    /// Apply one event.
    ///
    /// Delivery and persistence failures are logged; a delivery failure is
    /// also returned. A fatal error moves the engine to `Draining`.
    pub async fn step(&mut self, event: Event) -> Result<()> {
        match self.state {
            EngineState::Stopped => return Err(Error::Stopped),
            EngineState::Draining
                if matches!(event, Event::LivenessTick | Event::LinkFailure(_)) =>
            {
                tracing::debug!("Draining, skipping {}", event.kind());
                return Ok(());
            }
            _ => {}
        }

        tracing::debug!("Dispatching {}", event.kind());
        let result = match event {
            Event::Message(msg) => self.handle_message(msg).await,
            Event::UserChange(user) => {
                self.handle_user_change(user);
                Ok(())
            }
            Event::LivenessTick => self.check_liveness().await,
            Event::LinkFailure(reason) => Err(Error::Link(reason)),
        };

        if let Err(e) = &result {
            if e.is_fatal() && self.state == EngineState::Running {
                self.state = EngineState::Draining;
            }
        }
        result
    }

    async fn handle_message(&mut self, msg: MessageEvent) -> Result<()> {
        if msg.user == self.identity.id {
            return Ok(());
        }

        let Some((keyword, args)) = parse_command(&msg.text, &self.identity.name, msg.visibility)
        else {
            return Ok(());
        };

        let Some(command) = self.commands.lookup(&keyword, msg.visibility) else {
            tracing::debug!("Ignoring unknown command '{}' from {}", keyword, msg.user);
            return Ok(());
        };

        let (queue, notification) = {
            let ctx = Context::new(&self.identity.id, &self.identity.name, &self.users);
            command(&self.queue, &ctx, &msg.channel, &msg.user, args)
        };

        let delivered = if notification.is_empty() {
            Ok(())
        } else {
            self.notifier.notify(&notification).await
        };
        if let Err(e) = &delivered {
            tracing::warn!("{}", e);
        }

        if queue != self.queue {
            self.queue = queue;
            tracing::debug!("Queue is now {}", self.queue);
            if let Err(e) = self.persister.persist(&self.queue) {
                tracing::error!("{}", e);
            }
        }

        delivered
    }

    fn handle_user_change(&mut self, user: UserInfo) {
        match self.users.update(&user.id, &user.name) {
            None => tracing::info!("New user cached: {} ({})", user.name, user.id),
            Some(old) if old != user.name => {
                tracing::info!("User renamed: {} -> {} ({})", old, user.name, user.id)
            }
            Some(_) => {}
        }
    }

    async fn check_liveness(&self) -> Result<()> {
        match tokio::time::timeout(self.ping_timeout, self.transport.ping()).await {
            Ok(Ok(())) => {
                tracing::debug!("Liveness probe ok");
                Ok(())
            }
            Ok(Err(e)) => Err(Error::Liveness(e.to_string())),
            Err(_) => Err(Error::Liveness(format!(
                "no answer within {}s",
                self.ping_timeout.as_secs_f32()
            ))),
        }
    }

    /// Consume events until shutdown, a fatal error or every producer is
    /// gone. Events already queued at that point are still applied.
    ///
    /// Returns the fatal error, if that is what ended the loop.
    pub async fn run(&mut self, mut events: mpsc::Receiver<Event>, mut shutdown: ShutdownToken) -> Result<()> {
        tracing::info!("Dispatch engine running with {} queue entries", self.queue.len());

        let mut outcome = Ok(());
        loop {
            tokio::select! {
                biased;

                _ = shutdown.wait() => {
                    tracing::info!("Shutdown requested, draining events");
                    break;
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        tracing::info!("All event producers have stopped");
                        break;
                    };
                    if let Err(e) = self.step(event).await {
                        if e.is_fatal() {
                            tracing::error!("Dispatch engine stopping: {}", e);
                            outcome = Err(e);
                            break;
                        }
                    }
                }
            }
        }

        self.drain(&mut events).await;
        self.state = EngineState::Stopped;
        tracing::info!("Dispatch engine stopped");
        outcome
    }

    async fn drain(&mut self, events: &mut mpsc::Receiver<Event>) {
        self.state = EngineState::Draining;
        events.close();

        let mut drained = 0;
        while let Some(event) = events.recv().await {
            if let Err(e) = self.step(event).await {
                tracing::debug!("While draining: {}", e);
            }
            drained += 1;
        }
        if drained > 0 {
            tracing::info!("Drained {} queued events", drained);
        }
    }
}
