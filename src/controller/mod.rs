//! Gesture settings controller.

pub mod gesture_controller;

pub use gesture_controller::GestureSettingsController;
