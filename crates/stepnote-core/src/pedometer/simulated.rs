//! Deterministic simulated step feed.
//!
//! Used by tests and the CLI to replay step-count sequences without real
//! sensor hardware. Two modes:
//! - scripted: an explicit reading sequence, delivered verbatim
//! - walk: a seeded random monotonic walk, reproducible per seed

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

use crate::error::FeedError;

use super::{Availability, StepFeed, StepReading, Subscription};

/// A step feed that replays a fixed reading sequence synchronously on
/// subscribe. Readings are delivered in non-decreasing order, matching the
/// platform feed's ordering guarantee.
#[derive(Debug, Clone)]
pub struct SimulatedFeed {
    availability: Availability,
    script: Vec<StepReading>,
    subscribed: bool,
}

impl SimulatedFeed {
    /// An available feed that will deliver `script` on subscribe.
    /// Out-of-order readings are clamped so the delivered sequence is
    /// non-decreasing.
    pub fn scripted(script: Vec<StepReading>) -> Self {
        let mut clamped = Vec::with_capacity(script.len());
        let mut high = 0;
        for reading in script {
            high = high.max(reading);
            clamped.push(high);
        }
        Self {
            availability: Availability::Available,
            script: clamped,
            subscribed: false,
        }
    }

    /// A feed whose availability probe fails closed.
    pub fn unavailable() -> Self {
        Self {
            availability: Availability::Unavailable,
            script: Vec::new(),
            subscribed: false,
        }
    }

    /// A seeded random walk: `ticks` readings, each advancing the
    /// cumulative count by up to `max_burst` steps. The same seed always
    /// produces the same walk.
    pub fn walk(seed: u64, ticks: u32, max_burst: u32) -> Self {
        let mut rng = Mcg128Xsl64::seed_from_u64(seed);
        let mut script = Vec::with_capacity(ticks as usize);
        let mut count: StepReading = 0;
        for _ in 0..ticks {
            count = count.saturating_add(rng.gen_range(0..=max_burst));
            script.push(count);
        }
        Self {
            availability: Availability::Available,
            script,
            subscribed: false,
        }
    }

    /// The readings this feed will deliver.
    pub fn script(&self) -> &[StepReading] {
        &self.script
    }
}

impl StepFeed for SimulatedFeed {
    fn availability(&self) -> Availability {
        self.availability
    }

    fn subscribe(
        &mut self,
        mut on_reading: Box<dyn FnMut(StepReading)>,
    ) -> Result<Subscription, FeedError> {
        if !self.availability.is_available() {
            return Err(FeedError::SensorUnavailable);
        }
        if self.subscribed {
            return Err(FeedError::AlreadySubscribed);
        }
        self.subscribed = true;

        // Deterministic feed: deliver the whole script before returning.
        for reading in &self.script {
            on_reading(*reading);
        }
        Ok(Subscription::new(|| {}))
    }
}
