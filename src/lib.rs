//! Touchscreen gesture settings controller.
//!
//! Mediates between a set of boolean gesture toggle controls and two external
//! collaborators: persisted settings stores and a hardware gesture-mode
//! updater. `GestureSettingsController` applies the mutual-exclusion rule
//! between hand-wave and proximity-wake, persists the haptic-feedback toggle
//! immediately, and coalesces every other gesture change into a single
//! debounced hardware sync.
//!
//! The settings stores and the updater are injected as trait objects so host
//! applications can back them with a platform settings provider and a real
//! firmware driver, while tests use the in-memory implementations.

// Module declarations
pub mod controller;
pub mod error;
pub mod hardware;
pub mod settings;
pub mod utils;

// Re-export commonly used types
pub use controller::GestureSettingsController;
pub use error::{GestureSettingsError, Result};
pub use hardware::{GestureModeUpdater, GestureSnapshot};
pub use settings::keys::GestureKey;
pub use settings::store::{FileSettingsStore, MemorySettingsStore, SettingsStore};
