//! Controller mediating gesture toggle controls, settings stores, and the
//! hardware gesture-mode updater.
//!
//! Change handling follows three rules:
//! - Hand-wave and proximity-wake are mutually exclusive. Enabling one forces
//!   the other control unchecked; the incoming change itself is never
//!   rejected.
//! - Haptic feedback commits and persists immediately (integer 1/0 under its
//!   settings key) and never touches the firmware.
//! - Every other gesture change arms a single-slot debounce timer. After the
//!   quiet period the current toggle states are snapshotted and pushed to the
//!   updater; a failure there is logged and swallowed.

use crate::hardware::{GestureModeUpdater, GestureSnapshot};
use crate::settings::keys::{DOZE_ENABLED_KEY, GestureKey, HAPTIC_FEEDBACK_KEY};
use crate::settings::store::SettingsStore;
use crate::utils::debounce::DebounceTimer;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Quiet period before a gesture change is pushed to hardware
pub const GESTURE_SYNC_DELAY: Duration = Duration::from_millis(500);

/// Mediates between the gesture toggle controls and the settings stores plus
/// the hardware updater. One instance per settings screen; dropping it
/// cancels any pending hardware sync.
pub struct GestureSettingsController {
    /// Checked state per toggle control, shared with the sync timer callback
    states: Arc<Mutex<HashMap<GestureKey, bool>>>,
    /// System settings store (read/write, haptic feedback)
    system_store: Arc<dyn SettingsStore>,
    /// Whether the ambient-display controls are offered (doze gate, read once)
    ambient_display_enabled: bool,
    /// Single-slot debounced hardware sync
    sync_timer: DebounceTimer,
}

impl GestureSettingsController {
    /// Create a controller with the default 500 ms sync delay.
    ///
    /// Reads the doze gate from the secure store (default enabled) to decide
    /// whether the ambient-display controls are offered. All toggle controls
    /// start unchecked; call [`on_activate`](Self::on_activate) to bind the
    /// haptic control to its persisted state.
    pub fn new(
        secure_store: &dyn SettingsStore,
        system_store: Arc<dyn SettingsStore>,
        updater: Arc<dyn GestureModeUpdater>,
    ) -> Self {
        Self::with_sync_delay(secure_store, system_store, updater, GESTURE_SYNC_DELAY)
    }

    /// Create a controller with an explicit sync delay
    pub fn with_sync_delay(
        secure_store: &dyn SettingsStore,
        system_store: Arc<dyn SettingsStore>,
        updater: Arc<dyn GestureModeUpdater>,
        sync_delay: Duration,
    ) -> Self {
        let ambient_display_enabled = secure_store.get_int(DOZE_ENABLED_KEY, 1) != 0;
        if !ambient_display_enabled {
            info!("Doze disabled; ambient display controls are not offered");
        }

        let states: Arc<Mutex<HashMap<GestureKey, bool>>> = Arc::new(Mutex::new(
            GestureKey::ALL.into_iter().map(|key| (key, false)).collect(),
        ));

        // The timer callback owns its own handles; the controller can be
        // dropped while a fire is in flight without racing the snapshot.
        let callback_states = Arc::clone(&states);
        let sync_timer = DebounceTimer::new(
            sync_delay,
            Box::new(move || {
                let snapshot = Self::snapshot_of(&callback_states.lock());
                debug!("Pushing gesture mode to hardware: {:?}", snapshot);
                if let Err(e) = updater.update_gesture_mode(&snapshot) {
                    // Best-effort sync; nothing useful to do on failure
                    warn!("Gesture mode update failed: {}", e);
                }
            }),
        );

        Self {
            states,
            system_store,
            ambient_display_enabled,
            sync_timer,
        }
    }

    /// Screen activation (`onResume` equivalent): rebind the haptic control to
    /// the persisted setting, defaulting to enabled when the key is absent.
    pub fn on_activate(&self) {
        let haptic = self.system_store.get_int(HAPTIC_FEEDBACK_KEY, 1) != 0;
        self.states.lock().insert(GestureKey::HapticFeedback, haptic);
        debug!("Activated; haptic feedback control set to {}", haptic);
    }

    /// Handle a change intent for one toggle control.
    ///
    /// Returns true in every case: the proposed value is always accepted, and
    /// mutual exclusion is achieved by forcing the *other* control unchecked.
    pub fn handle_change(&self, key: GestureKey, proposed: bool) -> bool {
        {
            let mut states = self.states.lock();

            if proposed {
                match key {
                    GestureKey::HandWave => {
                        states.insert(GestureKey::ProximityWake, false);
                    }
                    GestureKey::ProximityWake => {
                        states.insert(GestureKey::HandWave, false);
                    }
                    _ => {}
                }
            }

            states.insert(key, proposed);
        }

        if key == GestureKey::HapticFeedback {
            self.system_store
                .put_int(HAPTIC_FEEDBACK_KEY, i32::from(proposed));
            info!("Haptic feedback persisted as {}", i32::from(proposed));
        } else {
            debug!("Gesture change on {:?}; arming hardware sync", key);
            self.sync_timer.arm();
        }

        true
    }

    /// Displayed state of one toggle control
    pub fn is_checked(&self, key: GestureKey) -> bool {
        self.states.lock().get(&key).copied().unwrap_or(false)
    }

    /// Whether the ambient-display controls are offered
    pub fn ambient_display_enabled(&self) -> bool {
        self.ambient_display_enabled
    }

    fn snapshot_of(states: &HashMap<GestureKey, bool>) -> GestureSnapshot {
        let get = |key: GestureKey| states.get(&key).copied().unwrap_or(false);
        GestureSnapshot {
            hand_wave: get(GestureKey::HandWave),
            proximity_wake: get(GestureKey::ProximityWake),
            letter_c: get(GestureKey::LetterC),
            letter_e: get(GestureKey::LetterE),
            letter_s: get(GestureKey::LetterS),
            letter_v: get(GestureKey::LetterV),
            letter_w: get(GestureKey::LetterW),
            letter_z: get(GestureKey::LetterZ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GestureSettingsError, StringError};
    use crate::settings::store::MemorySettingsStore;
    use proptest::prelude::*;

    /// Updater test double recording every snapshot it receives
    #[derive(Default)]
    struct RecordingUpdater {
        calls: Mutex<Vec<GestureSnapshot>>,
    }

    impl RecordingUpdater {
        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        fn last_call(&self) -> Option<GestureSnapshot> {
            self.calls.lock().last().copied()
        }
    }

    impl GestureModeUpdater for RecordingUpdater {
        fn update_gesture_mode(&self, snapshot: &GestureSnapshot) -> crate::error::Result<()> {
            self.calls.lock().push(*snapshot);
            Ok(())
        }
    }

    /// Updater test double that always fails
    struct FailingUpdater;

    impl GestureModeUpdater for FailingUpdater {
        fn update_gesture_mode(&self, _snapshot: &GestureSnapshot) -> crate::error::Result<()> {
            Err(GestureSettingsError::HardwareUpdateFailed(StringError::new(
                "sysfs write failed",
            )))
        }
    }

    const TEST_DELAY: Duration = Duration::from_millis(30);

    fn test_controller() -> (
        GestureSettingsController,
        Arc<MemorySettingsStore>,
        Arc<RecordingUpdater>,
    ) {
        let secure = MemorySettingsStore::new();
        let system = Arc::new(MemorySettingsStore::new());
        let updater = Arc::new(RecordingUpdater::default());
        let controller = GestureSettingsController::with_sync_delay(
            &secure,
            Arc::clone(&system) as Arc<dyn SettingsStore>,
            Arc::clone(&updater) as Arc<dyn GestureModeUpdater>,
            TEST_DELAY,
        );
        (controller, system, updater)
    }

    fn wait_for_sync() {
        std::thread::sleep(TEST_DELAY * 5);
    }

    #[test]
    fn test_hand_wave_forces_proximity_wake_off() {
        let (controller, _, _) = test_controller();

        assert!(controller.handle_change(GestureKey::ProximityWake, true));
        assert!(controller.is_checked(GestureKey::ProximityWake));

        assert!(controller.handle_change(GestureKey::HandWave, true));
        assert!(controller.is_checked(GestureKey::HandWave));
        assert!(!controller.is_checked(GestureKey::ProximityWake));
    }

    #[test]
    fn test_proximity_wake_forces_hand_wave_off() {
        let (controller, _, _) = test_controller();

        assert!(controller.handle_change(GestureKey::HandWave, true));
        assert!(controller.handle_change(GestureKey::ProximityWake, true));

        assert!(controller.is_checked(GestureKey::ProximityWake));
        assert!(!controller.is_checked(GestureKey::HandWave));
    }

    #[test]
    fn test_disabling_has_no_cross_effect() {
        let (controller, _, _) = test_controller();

        controller.handle_change(GestureKey::HandWave, true);
        controller.handle_change(GestureKey::HandWave, false);
        // Turning hand wave off leaves proximity wake alone
        assert!(!controller.is_checked(GestureKey::ProximityWake));

        controller.handle_change(GestureKey::ProximityWake, true);
        controller.handle_change(GestureKey::HandWave, false);
        assert!(controller.is_checked(GestureKey::ProximityWake));
    }

    #[test]
    fn test_haptic_toggle_persists_immediately() {
        let (controller, system, _) = test_controller();

        assert!(controller.handle_change(GestureKey::HapticFeedback, true));
        assert_eq!(system.get_int(HAPTIC_FEEDBACK_KEY, -1), 1);

        assert!(controller.handle_change(GestureKey::HapticFeedback, false));
        assert_eq!(system.get_int(HAPTIC_FEEDBACK_KEY, -1), 0);
    }

    #[test]
    fn test_haptic_toggle_never_schedules_hardware_sync() {
        let (controller, _, updater) = test_controller();

        controller.handle_change(GestureKey::HapticFeedback, true);
        controller.handle_change(GestureKey::HapticFeedback, false);
        wait_for_sync();

        assert_eq!(updater.call_count(), 0);
    }

    #[test]
    fn test_activate_defaults_haptic_to_enabled() {
        let (controller, _, _) = test_controller();
        controller.on_activate();
        assert!(controller.is_checked(GestureKey::HapticFeedback));
    }

    #[test]
    fn test_activate_reads_persisted_haptic_state() {
        let (controller, system, _) = test_controller();
        system.put_int(HAPTIC_FEEDBACK_KEY, 0);
        controller.on_activate();
        assert!(!controller.is_checked(GestureKey::HapticFeedback));

        // Not cached across activations
        system.put_int(HAPTIC_FEEDBACK_KEY, 1);
        controller.on_activate();
        assert!(controller.is_checked(GestureKey::HapticFeedback));
    }

    #[test]
    fn test_rapid_toggles_coalesce_into_one_sync_with_final_state() {
        let (controller, _, updater) = test_controller();

        controller.handle_change(GestureKey::LetterC, true);
        controller.handle_change(GestureKey::LetterE, true);
        controller.handle_change(GestureKey::LetterC, false);
        wait_for_sync();

        assert_eq!(updater.call_count(), 1);
        let snapshot = updater.last_call().unwrap();
        assert!(!snapshot.letter_c);
        assert!(snapshot.letter_e);
    }

    #[test]
    fn test_separated_changes_sync_separately() {
        let (controller, _, updater) = test_controller();

        controller.handle_change(GestureKey::LetterV, true);
        wait_for_sync();
        controller.handle_change(GestureKey::LetterV, false);
        wait_for_sync();

        assert_eq!(updater.call_count(), 2);
        assert!(!updater.last_call().unwrap().letter_v);
    }

    #[test]
    fn test_updater_failure_is_swallowed_and_state_kept() {
        let secure = MemorySettingsStore::new();
        let system = Arc::new(MemorySettingsStore::new());
        let controller = GestureSettingsController::with_sync_delay(
            &secure,
            Arc::clone(&system) as Arc<dyn SettingsStore>,
            Arc::new(FailingUpdater),
            TEST_DELAY,
        );

        assert!(controller.handle_change(GestureKey::LetterW, true));
        wait_for_sync();

        // The toggle stays checked; the failed sync is invisible
        assert!(controller.is_checked(GestureKey::LetterW));
    }

    #[test]
    fn test_drop_cancels_pending_sync() {
        let (controller, _, updater) = test_controller();
        controller.handle_change(GestureKey::LetterZ, true);
        drop(controller);
        wait_for_sync();
        assert_eq!(updater.call_count(), 0);
    }

    #[test]
    fn test_doze_gate_controls_ambient_display() {
        let secure = MemorySettingsStore::new();
        let (controller, _, _) = test_controller();
        assert!(controller.ambient_display_enabled());

        secure.put_int(DOZE_ENABLED_KEY, 0);
        let system = Arc::new(MemorySettingsStore::new());
        let gated = GestureSettingsController::with_sync_delay(
            &secure,
            system as Arc<dyn SettingsStore>,
            Arc::new(RecordingUpdater::default()),
            TEST_DELAY,
        );
        assert!(!gated.ambient_display_enabled());
    }

    #[test]
    fn test_all_controls_start_unchecked() {
        let (controller, _, _) = test_controller();
        for key in GestureKey::ALL {
            assert!(!controller.is_checked(key));
        }
    }

    fn wake_key_strategy() -> impl Strategy<Value = GestureKey> {
        prop_oneof![
            Just(GestureKey::HandWave),
            Just(GestureKey::ProximityWake),
        ]
    }

    proptest! {
        /// Hand wave and proximity wake are never both checked, regardless of
        /// the order of change intents.
        #[test]
        fn prop_wake_gestures_mutually_exclusive(
            events in prop::collection::vec((wake_key_strategy(), any::<bool>()), 0..32)
        ) {
            let (controller, _, _) = test_controller();
            for (key, value) in events {
                prop_assert!(controller.handle_change(key, value));
                prop_assert!(
                    !(controller.is_checked(GestureKey::HandWave)
                        && controller.is_checked(GestureKey::ProximityWake))
                );
            }
        }
    }
}
