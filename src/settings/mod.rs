//! Persisted gesture settings: stable key set and settings store access.

pub mod keys;
pub mod store;

pub use keys::GestureKey;
pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore};
