//! Core module - the token queue, identity cache and snapshot storage.
//!
//! Everything here is free of transport concerns:
//! - `Queue` value type and its primitives
//! - User id / display name cache
//! - JSON snapshot load and save

pub mod queue;
pub mod snapshot;
pub mod users;

pub use queue::{Item, Queue};
pub use snapshot::{load_snapshot, save_snapshot, FilePersister};
pub use users::{UserCache, UserInfo};
