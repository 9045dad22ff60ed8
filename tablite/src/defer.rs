//! Deferred result delivery.
//!
//! Tablite operations are synchronous, but embedders sometimes want a result
//! handed over later: to simulate IO latency in tests, to debounce a refresh,
//! or to bridge into a callback-shaped API. [deferred] parks an
//! already-computed result and releases it after a delay; [deliver_after]
//! pushes it into a callback instead. Both ride on one process-wide timer
//! thread, and both cancel when their guard is dropped.

use once_cell::sync::Lazy;
use timer::{Guard, Timer};

use crate::errors::{ErrorKind, TabliteError, TabliteResult};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

static DELIVERY_TIMER: Lazy<Timer> = Lazy::new(Timer::new);

/// A result parked for later delivery.
///
/// Dropping the `Deferred` before the delay elapses cancels the delivery.
pub struct Deferred<T> {
    receiver: Receiver<T>,
    _guard: Option<Guard>,
}

impl<T> Deferred<T> {
    /// Blocks until the parked result is delivered, then returns it.
    ///
    /// # Errors
    ///
    /// Returns an [ErrorKind::InternalError] error if the delivery was
    /// cancelled before the result arrived.
    pub fn wait(self) -> TabliteResult<T> {
        self.receiver.recv().map_err(|_| {
            log::error!("Deferred delivery was cancelled before the result arrived");
            TabliteError::new(
                "Deferred delivery was cancelled before the result arrived",
                ErrorKind::InternalError,
            )
        })
    }

    /// Takes the result if it has already been delivered.
    ///
    /// Returns `None` while the delay is still running.
    pub fn try_take(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }
}

/// Keeps a callback delivery alive.
///
/// Dropping the guard before the delay elapses cancels the delivery.
#[must_use = "dropping the guard cancels the delivery"]
pub struct DeliveryGuard {
    _guard: Option<Guard>,
}

/// Parks an already-computed result and releases it after the delay.
///
/// # Examples
///
/// ```rust,ignore
/// use std::time::Duration;
/// use tablite::defer::deferred;
///
/// let matched = db.read(&doc!{ key: "A" })?;
/// let parked = deferred(matched, Duration::from_millis(500));
/// // ... do other work ...
/// let matched = parked.wait()?;
/// ```
pub fn deferred<T: Send + 'static>(result: T, delay: Duration) -> Deferred<T> {
    let (sender, receiver) = channel();
    let guard = schedule(delay, result, move |value| {
        // the receiver may already be gone; nothing to deliver to then
        let _ = sender.send(value);
    });
    Deferred {
        receiver,
        _guard: guard,
    }
}

/// Hands an already-computed result to a callback after the delay.
///
/// The returned guard must be kept alive for the delivery to happen.
pub fn deliver_after<T, F>(result: T, delay: Duration, callback: F) -> DeliveryGuard
where
    T: Send + 'static,
    F: FnOnce(T) + Send + 'static,
{
    let guard = schedule(delay, result, callback);
    DeliveryGuard { _guard: guard }
}

/// Schedules a one-shot delivery on the shared timer thread.
///
/// The timer wants an `FnMut` closure, so the result and the `FnOnce`
/// delivery ride in an `Option` slot that the first tick takes.
fn schedule<T, F>(delay: Duration, result: T, deliver: F) -> Option<Guard>
where
    T: Send + 'static,
    F: FnOnce(T) + Send + 'static,
{
    match chrono::Duration::from_std(delay) {
        Ok(chrono_delay) => {
            let mut slot = Some((result, deliver));
            Some(DELIVERY_TIMER.schedule_with_delay(chrono_delay, move || {
                if let Some((value, deliver)) = slot.take() {
                    deliver(value);
                }
            }))
        }
        Err(e) => {
            log::error!(
                "Failed to convert delay to chrono::Duration: {}, skipping delivery",
                e
            );
            None
        }
    }
}
