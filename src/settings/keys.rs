//! Stable key set for the gesture toggle controls.
//!
//! Each toggle control is identified by a fixed string key matching the one
//! used by the platform settings provider. The key set is closed: nine gesture
//! toggles plus the read-only doze gate consulted at screen construction.

/// Settings key for the ambient-display doze gate (secure store, read-only)
pub const DOZE_ENABLED_KEY: &str = "doze_enabled";

/// Settings key under which the haptic feedback toggle is persisted
pub const HAPTIC_FEEDBACK_KEY: &str = "touchscreen_gesture_haptic_feedback";

/// A gesture toggle control identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKey {
    /// Hand-wave-to-wake (ambient display, mutually exclusive with proximity wake)
    HandWave,
    /// Proximity-sensor wake (ambient display, mutually exclusive with hand wave)
    ProximityWake,
    /// Haptic feedback on gesture recognition (persisted, no hardware sync)
    HapticFeedback,
    /// Draw the letter C to launch the camera
    LetterC,
    /// Draw the letter E
    LetterE,
    /// Draw the letter S
    LetterS,
    /// Draw the letter V
    LetterV,
    /// Draw the letter W
    LetterW,
    /// Draw the letter Z
    LetterZ,
}

impl GestureKey {
    /// All gesture toggle controls, in no significant order
    pub const ALL: [GestureKey; 9] = [
        GestureKey::HandWave,
        GestureKey::ProximityWake,
        GestureKey::HapticFeedback,
        GestureKey::LetterC,
        GestureKey::LetterE,
        GestureKey::LetterS,
        GestureKey::LetterV,
        GestureKey::LetterW,
        GestureKey::LetterZ,
    ];

    /// The stable string key identifying this control in the settings provider
    pub fn key(self) -> &'static str {
        match self {
            GestureKey::HandWave => "gesture_hand_wave",
            GestureKey::ProximityWake => "proximity_wake_enable",
            GestureKey::HapticFeedback => HAPTIC_FEEDBACK_KEY,
            GestureKey::LetterC => "touchscreen_c_gesture",
            GestureKey::LetterE => "touchscreen_e_gesture",
            GestureKey::LetterS => "touchscreen_s_gesture",
            GestureKey::LetterV => "touchscreen_v_gesture",
            GestureKey::LetterW => "touchscreen_w_gesture",
            GestureKey::LetterZ => "touchscreen_z_gesture",
        }
    }

    /// Look up a control by its stable string key
    pub fn from_key(key: &str) -> Option<GestureKey> {
        GestureKey::ALL.into_iter().find(|k| k.key() == key)
    }

    /// Whether this is one of the six letter-shaped gestures
    pub fn is_letter(self) -> bool {
        matches!(
            self,
            GestureKey::LetterC
                | GestureKey::LetterE
                | GestureKey::LetterS
                | GestureKey::LetterV
                | GestureKey::LetterW
                | GestureKey::LetterZ
        )
    }

    /// Whether a change to this control schedules a debounced hardware sync.
    /// Haptic feedback only affects the persisted setting, never the firmware.
    pub fn schedules_hardware_sync(self) -> bool {
        !matches!(self, GestureKey::HapticFeedback)
    }
}
