//! Command line surface and process lifecycle for qbot.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use crate::config::{load_settings, validate_settings, Settings};
use crate::core::{load_snapshot, FilePersister, Queue, UserCache};
use crate::dispatch::{
    shutdown_channel, shutdown_signal, spawn_keepalive, spawn_receiver, Engine,
};
use crate::transport::{TelegramTransport, Transport};

/// qbot - a chat bot that manages a single-holder token queue.
#[derive(Parser, Debug)]
#[command(name = "qbot")]
#[command(version)]
#[command(about = "Token queue bot for Telegram", long_about = None)]
pub struct Cli {
    /// Telegram bot token
    #[arg(env = "QBOT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// JSON file holding the queue between restarts
    #[arg(env = "QBOT_DATA_FILE")]
    pub data_file: PathBuf,

    /// Settings file (defaults to ~/.qbot/settings.json)
    #[arg(long, env = "QBOT_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Chat whose administrators seed the user list
    #[arg(long, allow_negative_numbers = true)]
    pub home_chat: Option<i64>,

    /// Seconds between liveness probes
    #[arg(long)]
    pub ping_interval: Option<u64>,

    /// Seconds to wait for a liveness probe
    #[arg(long)]
    pub ping_timeout: Option<u64>,

    /// Debug logging (also QBOT_DEBUG=true)
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Settings file values with command line overrides applied.
    pub fn resolve_settings(&self) -> Result<Settings> {
        let mut settings = load_settings(self.settings.as_deref())?;

        if let Some(chat) = self.home_chat {
            settings.telegram.home_chat_id = Some(chat);
        }
        if let Some(secs) = self.ping_interval {
            settings.liveness.interval_secs = secs;
        }
        if let Some(secs) = self.ping_timeout {
            settings.liveness.timeout_secs = secs;
        }

        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Connect, serve until a signal or a fatal link error, then clean up.
    pub async fn run(self) -> Result<()> {
        let settings = self.resolve_settings().context("Failed to load settings")?;

        let queue = load_snapshot(&self.data_file)
            .with_context(|| format!("Failed to load queue from {}", self.data_file.display()))?;

        let transport = Arc::new(TelegramTransport::new(&self.token, &settings.telegram));
        let identity = transport.connect().await.context("Failed to connect to Telegram")?;
        let users = transport.users().await.context("Failed to load users")?;

        let mut cache = UserCache::new(users);
        cache.update(&identity.id, &identity.name);
        tracing::info!(
            "Connected as @{} with {} known users, {} queue entries",
            identity.name,
            cache.len(),
            queue.len()
        );

        let persister = FilePersister::new(&self.data_file, queue.clone());
        tracing::info!("Queue snapshot: {}", persister.path().display());
        let engine = Engine::new(identity, queue, cache, transport.clone(), persister)
            .with_ping_timeout(settings.liveness.timeout());

        let queue = serve(transport, engine, &settings, shutdown_signal()).await?;
        tracing::info!("Stopped cleanly with {} queue entries", queue.len());
        Ok(())
    }
}

/// Run the engine and its producers until `stop` resolves or the engine
/// gives up. Both paths wait for every producer before closing the
/// transport.
pub async fn serve<F>(
    transport: Arc<dyn Transport>,
    mut engine: Engine,
    settings: &Settings,
    stop: F,
) -> Result<Queue>
where
    F: Future<Output = &'static str>,
{
    let (shutdown_tx, shutdown) = shutdown_channel();
    let (events_tx, events_rx) = mpsc::channel(settings.event_buffer);

    let producers = vec![
        spawn_receiver(transport.clone(), events_tx.clone(), shutdown.clone()),
        spawn_keepalive(settings.liveness.interval(), events_tx, shutdown.clone()),
    ];

    let mut engine_task = tokio::spawn(async move {
        let outcome = engine.run(events_rx, shutdown).await;
        (engine, outcome)
    });

    let (engine, outcome) = tokio::select! {
        joined = &mut engine_task => joined?,
        signal = stop => {
            tracing::info!("Received {}, shutting down", signal);
            shutdown_tx.shutdown();
            engine_task.await?
        }
    };

    shutdown_tx.shutdown();
    for producer in producers {
        if let Err(e) = producer.await {
            tracing::warn!("Producer task failed: {}", e);
        }
    }

    if let Err(e) = transport.close().await {
        tracing::warn!("Failed to close transport: {}", e);
    }

    outcome.context("Dispatch engine failed")?;
    Ok(engine.queue().clone())
}
