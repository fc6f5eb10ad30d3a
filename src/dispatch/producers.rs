//! Tasks that feed the engine's event channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::event::Event;
use super::shutdown::ShutdownToken;
use crate::error::Error;
use crate::transport::Transport;

/// Forward everything the transport receives. A receive error is reported
/// as a `LinkFailure` and ends the loop.
pub fn spawn_receiver(
    transport: Arc<dyn Transport>,
    events: mpsc::Sender<Event>,
    mut shutdown: ShutdownToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let incoming = tokio::select! {
                _ = shutdown.wait() => break,
                incoming = transport.receive() => incoming,
            };

            let event = match incoming {
                // Shutdown raced the receive: nothing new is accepted.
                Ok(_) if shutdown.is_shutdown() => break,
                Ok(incoming) => Event::from(incoming),
                Err(e) => {
                    tracing::error!("Receive loop failed: {}", e);
                    let reason = match e {
                        Error::Link(reason) => reason,
                        other => other.to_string(),
                    };
                    let _ = events.send(Event::LinkFailure(reason)).await;
                    break;
                }
            };

            if events.send(event).await.is_err() {
                break;
            }
        }
        tracing::debug!("Receive loop stopped");
    })
}

/// Emit a `LivenessTick` every `every`, starting one period from now.
///
/// `every` must be non-zero.
pub fn spawn_keepalive(
    every: Duration,
    events: mpsc::Sender<Event>,
    mut shutdown: ShutdownToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                _ = ticker.tick() => {
                    if events.send(Event::LivenessTick).await.is_err() {
                        break;
                    }
                }
            }
        }
        tracing::debug!("Keepalive stopped");
    })
}
