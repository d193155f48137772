//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Input events mapped to game actions
//! - Fixed tick timing from variable frame deltas

pub mod input;
pub mod storage;
pub mod time;

pub use input::{Action, action_for_key};
pub use storage::{KeyValueStore, MemoryStorage, StorageError};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use time::TickScheduler;
