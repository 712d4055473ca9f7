//! The milestone table: ordered (threshold, message) pairs.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A step-count threshold paired with its congratulatory message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub steps: u32,
    pub message: String,
}

impl Milestone {
    pub fn new(steps: u32, message: impl Into<String>) -> Self {
        Self {
            steps,
            message: message.into(),
        }
    }
}

/// Immutable, ascending-ordered milestone table with unique thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneTable {
    milestones: Vec<Milestone>,
}

impl Default for MilestoneTable {
    fn default() -> Self {
        Self {
            milestones: vec![
                Milestone::new(10, "Great start! You've taken your first 100 steps!"),
                Milestone::new(1000, "You're on a roll! 1,000 steps completed!"),
                Milestone::new(5000, "Halfway there! Keep going!"),
                Milestone::new(10000, "Amazing! You've hit your 10,000 steps goal! \u{1F389}"),
            ],
        }
    }
}

impl MilestoneTable {
    /// Build a table from the given milestones.
    ///
    /// # Errors
    /// Returns an error if any threshold is zero or the thresholds are not
    /// strictly ascending (which also rules out duplicates).
    pub fn new(milestones: Vec<Milestone>) -> Result<Self, ValidationError> {
        if milestones.is_empty() {
            return Err(ValidationError::EmptyCollection("milestones".into()));
        }
        let mut previous: Option<u32> = None;
        for m in &milestones {
            if m.steps == 0 {
                return Err(ValidationError::ZeroThreshold);
            }
            if let Some(prev) = previous {
                if m.steps <= prev {
                    return Err(ValidationError::NonAscendingThresholds {
                        previous: prev,
                        current: m.steps,
                    });
                }
            }
            previous = Some(m.steps);
        }
        Ok(Self { milestones })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Milestone> {
        self.milestones.iter()
    }

    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    /// Look up a milestone by its exact threshold.
    pub fn get(&self, steps: u32) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.steps == steps)
    }

    /// The first milestone strictly above `steps`, if any.
    pub fn next_after(&self, steps: u32) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.steps > steps)
    }

    /// Distance to the next milestone, for the stats display.
    pub fn steps_to_next(&self, steps: u32) -> Option<u32> {
        self.next_after(steps).map(|m| m.steps - steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        let table = MilestoneTable::default();
        assert_eq!(table.len(), 4);
        // Default table passes its own validation.
        let milestones: Vec<Milestone> = table.iter().cloned().collect();
        assert!(MilestoneTable::new(milestones).is_ok());
    }

    #[test]
    fn rejects_zero_threshold() {
        let result = MilestoneTable::new(vec![Milestone::new(0, "nope")]);
        assert!(matches!(result, Err(ValidationError::ZeroThreshold)));
    }

    #[test]
    fn rejects_duplicate_thresholds() {
        let result = MilestoneTable::new(vec![
            Milestone::new(100, "a"),
            Milestone::new(100, "b"),
        ]);
        assert!(matches!(
            result,
            Err(ValidationError::NonAscendingThresholds { .. })
        ));
    }

    #[test]
    fn rejects_descending_thresholds() {
        let result = MilestoneTable::new(vec![
            Milestone::new(1000, "a"),
            Milestone::new(10, "b"),
        ]);
        assert!(matches!(
            result,
            Err(ValidationError::NonAscendingThresholds {
                previous: 1000,
                current: 10
            })
        ));
    }

    #[test]
    fn rejects_empty_table() {
        assert!(MilestoneTable::new(Vec::new()).is_err());
    }

    #[test]
    fn next_after_and_distance() {
        let table = MilestoneTable::default();
        assert_eq!(table.next_after(0).unwrap().steps, 10);
        assert_eq!(table.next_after(10).unwrap().steps, 1000);
        assert_eq!(table.next_after(9999).unwrap().steps, 10000);
        assert!(table.next_after(10000).is_none());

        assert_eq!(table.steps_to_next(0), Some(10));
        assert_eq!(table.steps_to_next(400), Some(600));
        assert_eq!(table.steps_to_next(12000), None);
    }

    #[test]
    fn get_by_threshold() {
        let table = MilestoneTable::default();
        assert!(table.get(5000).unwrap().message.contains("Halfway"));
        assert!(table.get(5001).is_none());
    }
}
