//! Hardware gesture-mode collaborator.
//!
//! The firmware exposes a single gesture-mode value encoding which touchscreen
//! gestures are active. This module defines the snapshot handed to the driver
//! and the updater trait the controller calls after the debounce window
//! elapses. The driver itself is a host responsibility.

use crate::error::Result;
use crate::settings::keys::GestureKey;

/// Toggle states captured at sync time, handed to the gesture-mode updater.
///
/// Haptic feedback is absent by design: it only affects the persisted
/// setting, never the firmware gesture mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureSnapshot {
    /// Hand-wave-to-wake enabled
    pub hand_wave: bool,
    /// Proximity-sensor wake enabled
    pub proximity_wake: bool,
    /// Letter C gesture enabled
    pub letter_c: bool,
    /// Letter E gesture enabled
    pub letter_e: bool,
    /// Letter S gesture enabled
    pub letter_s: bool,
    /// Letter V gesture enabled
    pub letter_v: bool,
    /// Letter W gesture enabled
    pub letter_w: bool,
    /// Letter Z gesture enabled
    pub letter_z: bool,
}

impl GestureSnapshot {
    /// Firmware bitmask for the six letter gestures, one bit per letter
    pub fn mode_bits(self) -> u8 {
        u8::from(self.letter_c)
            | u8::from(self.letter_e) << 1
            | u8::from(self.letter_s) << 2
            | u8::from(self.letter_v) << 3
            | u8::from(self.letter_w) << 4
            | u8::from(self.letter_z) << 5
    }

    /// The state of one gesture toggle in this snapshot.
    /// Haptic feedback is not part of the snapshot and reads as false.
    pub fn get(self, key: GestureKey) -> bool {
        match key {
            GestureKey::HandWave => self.hand_wave,
            GestureKey::ProximityWake => self.proximity_wake,
            GestureKey::HapticFeedback => false,
            GestureKey::LetterC => self.letter_c,
            GestureKey::LetterE => self.letter_e,
            GestureKey::LetterS => self.letter_s,
            GestureKey::LetterV => self.letter_v,
            GestureKey::LetterW => self.letter_w,
            GestureKey::LetterZ => self.letter_z,
        }
    }
}

/// Pushes the gesture mode to hardware.
///
/// Called at most once per debounce window with the toggle states current at
/// fire time. Failures are swallowed by the controller after a warn log; the
/// sync is best-effort and there is no retry.
pub trait GestureModeUpdater: Send + Sync {
    /// Apply the gesture configuration to the firmware
    fn update_gesture_mode(&self, snapshot: &GestureSnapshot) -> Result<()>;
}
