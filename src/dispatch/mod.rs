//! Event dispatch: fan-in producers, one engine, side-effect sinks.

pub mod engine;
pub mod event;
pub mod producers;
pub mod shutdown;
pub mod sink;

pub use engine::{Engine, EngineState};
pub use event::{parse_command, Event};
pub use producers::{spawn_keepalive, spawn_receiver};
pub use shutdown::{shutdown_channel, shutdown_signal, ShutdownSender, ShutdownToken};
pub use sink::{Notify, Persist, TransportNotifier};
