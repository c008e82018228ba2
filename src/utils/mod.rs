//! Utility modules: debounce timer and logging setup.

pub mod debounce;
pub mod logging;

pub use debounce::DebounceTimer;
