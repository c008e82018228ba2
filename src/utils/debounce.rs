//! Single-slot cancellable debounce timer.
//!
//! A dedicated worker thread holds at most one pending deadline. Arming while
//! a deadline is pending replaces it, so a burst of arms collapses into one
//! fire after the configured delay of quiet. Dropping the timer cancels any
//! outstanding deadline and joins the worker.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

enum Command {
    Arm,
    Cancel,
}

/// Cancellable single-slot timer: arm, cancel, fire once per quiet period.
pub struct DebounceTimer {
    sender: Option<mpsc::Sender<Command>>,
    worker: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    /// Spawn the timer worker. `on_fire` runs on the worker thread each time
    /// a deadline elapses without being superseded.
    pub fn new(delay: Duration, on_fire: Box<dyn Fn() + Send>) -> Self {
        let (sender, receiver) = mpsc::channel::<Command>();

        let worker = std::thread::Builder::new()
            .name("gesture-sync-timer".to_string())
            .spawn(move || {
                let mut deadline: Option<Instant> = None;

                loop {
                    match deadline {
                        // Idle: block until a command arrives
                        None => match receiver.recv() {
                            Ok(Command::Arm) => deadline = Some(Instant::now() + delay),
                            Ok(Command::Cancel) => {}
                            Err(_) => break,
                        },
                        // Pending: wait out the deadline, superseded by any new arm
                        Some(when) => {
                            let now = Instant::now();
                            if now >= when {
                                deadline = None;
                                on_fire();
                                continue;
                            }
                            match receiver.recv_timeout(when - now) {
                                Ok(Command::Arm) => {
                                    debug!("Debounce deadline superseded");
                                    deadline = Some(Instant::now() + delay);
                                }
                                Ok(Command::Cancel) => deadline = None,
                                Err(RecvTimeoutError::Timeout) => {
                                    deadline = None;
                                    on_fire();
                                }
                                Err(RecvTimeoutError::Disconnected) => break,
                            }
                        }
                    }
                }
                debug!("Debounce timer worker exited");
            })
            .expect("failed to spawn debounce timer thread");

        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Arm the timer, replacing any pending deadline
    pub fn arm(&self) {
        if let Some(sender) = &self.sender
            && sender.send(Command::Arm).is_err()
        {
            warn!("Debounce timer worker is gone; arm ignored");
        }
    }

    /// Cancel the pending deadline, if any
    pub fn cancel(&self) {
        if let Some(sender) = &self.sender
            && sender.send(Command::Cancel).is_err()
        {
            warn!("Debounce timer worker is gone; cancel ignored");
        }
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        // Disconnecting the channel stops the worker without firing a pending deadline
        drop(self.sender.take());
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!("Debounce timer worker panicked");
        }
    }
}
