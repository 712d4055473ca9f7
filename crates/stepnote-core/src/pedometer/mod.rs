//! Step feed abstraction.
//!
//! Wraps the platform pedometer behind a small contract: an availability
//! probe that fails closed, and a callback subscription with an idempotent
//! cancel handle. The milestone engine never talks to sensor hardware
//! directly; it only sees cumulative readings.

use serde::{Deserialize, Serialize};

use crate::error::FeedError;

mod simulated;

pub use simulated::SimulatedFeed;

/// A single cumulative step-count reading.
///
/// Counts are cumulative since the subscription was opened and
/// non-decreasing while it stays open. A new subscription (e.g. after an
/// app restart) starts a fresh window at zero.
pub type StepReading = u32;

/// Pedometer availability, mirroring the three observable states of the
/// platform probe. Probe failures report [`Availability::Unavailable`]
/// rather than propagating an error to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// The probe has not resolved yet.
    Checking,
    Available,
    Unavailable,
}

impl Availability {
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Availability::Checking => "checking",
            Availability::Available => "available",
            Availability::Unavailable => "unavailable",
        };
        f.write_str(s)
    }
}

/// Handle to an active feed subscription.
///
/// Cancelling releases the underlying sensor resources. Cancel is
/// idempotent, and dropping the handle cancels as well, so an unmounting
/// consumer cannot leak a subscription.
pub struct Subscription {
    on_cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(on_cancel: impl FnOnce() + 'static) -> Self {
        Self {
            on_cancel: Some(Box::new(on_cancel)),
        }
    }

    /// Cancel the subscription. Calling this more than once is a no-op.
    pub fn cancel(&mut self) {
        if let Some(release) = self.on_cancel.take() {
            release();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.on_cancel.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Contract for anything that can deliver cumulative step readings.
///
/// Readings are delivered in non-decreasing order of step count, but there
/// is no guarantee on wall-clock latency: the feed may coalesce or delay
/// ticks, and a single reading may jump past several milestone thresholds
/// at once. Consumers must not assume readings increase by exactly one.
pub trait StepFeed {
    /// Probe sensor availability. Never fails; probe errors surface as
    /// [`Availability::Unavailable`].
    fn availability(&self) -> Availability;

    /// Open a subscription delivering readings to `on_reading`.
    ///
    /// At most one subscription may be active per feed.
    ///
    /// # Errors
    /// Returns an error if the sensor is unavailable or a subscription
    /// is already active.
    fn subscribe(
        &mut self,
        on_reading: Box<dyn FnMut(StepReading)>,
    ) -> Result<Subscription, FeedError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn cancel_is_idempotent() {
        let released = Rc::new(Cell::new(0u32));
        let counter = released.clone();
        let mut sub = Subscription::new(move || counter.set(counter.get() + 1));

        assert!(!sub.is_cancelled());
        sub.cancel();
        sub.cancel();
        sub.cancel();
        assert!(sub.is_cancelled());
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn drop_cancels_once() {
        let released = Rc::new(Cell::new(0u32));
        let counter = released.clone();
        {
            let _sub = Subscription::new(move || counter.set(counter.get() + 1));
        }
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn explicit_cancel_then_drop_releases_once() {
        let released = Rc::new(Cell::new(0u32));
        let counter = released.clone();
        {
            let mut sub = Subscription::new(move || counter.set(counter.get() + 1));
            sub.cancel();
        }
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn availability_display() {
        assert_eq!(Availability::Checking.to_string(), "checking");
        assert_eq!(Availability::Available.to_string(), "available");
        assert_eq!(Availability::Unavailable.to_string(), "unavailable");
        assert!(Availability::Available.is_available());
        assert!(!Availability::Checking.is_available());
    }
}
