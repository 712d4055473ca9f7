//! Threshold-based writing prompts.
//!
//! Separate from the milestone table: these are reflection questions
//! offered when the step count crosses a prompt threshold between two
//! consecutive readings, not congratulatory messages.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A prompt threshold and its candidate questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEntry {
    pub steps: u32,
    pub prompts: Vec<String>,
}

/// Ascending table of writing prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptBank {
    entries: Vec<PromptEntry>,
}

impl Default for PromptBank {
    fn default() -> Self {
        let entry = |steps: u32, prompts: &[&str]| PromptEntry {
            steps,
            prompts: prompts.iter().map(|s| s.to_string()).collect(),
        };
        Self {
            entries: vec![
                entry(20, &["What's been on your mind during this walk?"]),
                entry(
                    500,
                    &["Think about a challenge you're facing. How might movement help you solve it?"],
                ),
                entry(1000, &["What's something you'd like to learn more about?"]),
                entry(2000, &["What's a small win you've had recently?"]),
            ],
        }
    }
}

impl PromptBank {
    pub fn new(entries: Vec<PromptEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PromptEntry] {
        &self.entries
    }

    /// A prompt for the first threshold crossed between `previous` and
    /// `steps`, or `None` when no threshold was crossed. When an entry has
    /// several candidates one is picked at random.
    pub fn prompt_for_steps(
        &self,
        steps: u32,
        previous: u32,
        rng: &mut impl Rng,
    ) -> Option<&str> {
        for entry in &self.entries {
            if previous < entry.steps && steps >= entry.steps && !entry.prompts.is_empty() {
                let pick = rng.gen_range(0..entry.prompts.len());
                return Some(&entry.prompts[pick]);
            }
        }
        None
    }
}
