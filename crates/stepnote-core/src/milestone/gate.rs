//! Prompt gate: serializes milestone prompts so at most one is visible.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --present(threshold, message)--> Busy
//! Busy --release()--> Idle
//! ```
//!
//! `release()` covers both user choices (decline and accept). The caller
//! is expected to re-scan pending milestones against the last known step
//! count whenever the gate returns to idle; [`super::MilestoneEngine`]
//! does exactly that.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    Idle,
    Busy,
}

/// The prompt currently presented to the user, while the gate is busy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePrompt {
    pub steps: u32,
    pub message: String,
    pub presented_at: DateTime<Utc>,
}

/// Gate holding the "is a prompt currently being shown" flag.
///
/// No explicit queue: crossings detected while the gate is busy are never
/// marked achieved, so they are naturally re-detected once it frees up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptGate {
    active: Option<ActivePrompt>,
}

impl PromptGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        if self.active.is_some() {
            GateState::Busy
        } else {
            GateState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActivePrompt> {
        self.active.as_ref()
    }

    /// Present a milestone prompt, transitioning the gate to busy.
    ///
    /// Calling this while busy is a programming invariant violation (the
    /// tracker guarantees it never happens); it is logged and ignored
    /// rather than crashing. Returns whether the prompt was presented.
    pub fn present(&mut self, steps: u32, message: impl Into<String>) -> bool {
        if let Some(ref current) = self.active {
            eprintln!(
                "prompt gate: present({steps}) while prompt for {} is active; ignoring",
                current.steps
            );
            return false;
        }
        self.active = Some(ActivePrompt {
            steps,
            message: message.into(),
            presented_at: Utc::now(),
        });
        true
    }

    /// Dismiss the active prompt, transitioning the gate back to idle.
    /// Returns the prompt that was active, if any.
    pub fn release(&mut self) -> Option<ActivePrompt> {
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_then_release() {
        let mut gate = PromptGate::new();
        assert_eq!(gate.state(), GateState::Idle);

        assert!(gate.present(10, "first milestone"));
        assert_eq!(gate.state(), GateState::Busy);
        assert_eq!(gate.active().unwrap().steps, 10);

        let prompt = gate.release().unwrap();
        assert_eq!(prompt.steps, 10);
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn present_while_busy_is_a_no_op() {
        let mut gate = PromptGate::new();
        assert!(gate.present(10, "first"));
        assert!(!gate.present(1000, "second"));
        // The original prompt is untouched.
        assert_eq!(gate.active().unwrap().steps, 10);
    }

    #[test]
    fn release_when_idle_returns_none() {
        let mut gate = PromptGate::new();
        assert!(gate.release().is_none());
    }
}
