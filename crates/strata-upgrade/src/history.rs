//! Upgrade history tracking.
//!
//! The history records which steps have been applied, in order, so that a
//! runner can reject a step it has already seen or one that arrives out of
//! sequence. It serializes to JSON for callers that persist it between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, UpgradeError};
use crate::executor::UpgradeStep;

/// A record of an applied upgrade step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedStep {
    /// Step id.
    pub id: String,
    /// Step sequence number.
    pub sequence: u64,
    /// When the step was applied.
    pub applied_at: DateTime<Utc>,
}

/// The steps applied so far, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpgradeHistory {
    applied: Vec<AppliedStep>,
}

impl UpgradeHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            applied: Vec::new(),
        }
    }

    /// Parses a history from JSON.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the history to JSON.
    ///
    /// # Errors
    ///
    /// Propagates serialization errors.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns true if a step with this id has been applied.
    #[must_use]
    pub fn is_applied(&self, id: &str) -> bool {
        self.applied.iter().any(|step| step.id == id)
    }

    /// The sequence number of the last applied step.
    #[must_use]
    pub fn last_sequence(&self) -> Option<u64> {
        self.applied.last().map(|step| step.sequence)
    }

    /// All applied steps, oldest first.
    #[must_use]
    pub fn applied(&self) -> &[AppliedStep] {
        &self.applied
    }

    /// Checks that `step` may be applied next.
    ///
    /// # Errors
    ///
    /// Fails with [`UpgradeError::DuplicateStepId`] if the id was applied
    /// before, and with [`UpgradeError::NonIncreasingSequence`] if the
    /// sequence number does not exceed the last applied one.
    pub fn check_next(&self, step: &UpgradeStep) -> Result<()> {
        if self.is_applied(&step.id) {
            return Err(UpgradeError::DuplicateStepId(step.id.clone()));
        }
        match self.last_sequence() {
            Some(previous) if step.sequence <= previous => {
                Err(UpgradeError::NonIncreasingSequence {
                    id: step.id.clone(),
                    sequence: step.sequence,
                    previous,
                })
            }
            _ => Ok(()),
        }
    }

    /// Records a step as applied now.
    pub fn record_applied(&mut self, step: &UpgradeStep) {
        self.applied.push(AppliedStep {
            id: step.id.clone(),
            sequence: step.sequence,
            applied_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_checks() {
        let mut history = UpgradeHistory::new();
        let first = UpgradeStep::new("create-agreement", 10);
        assert!(history.check_next(&first).is_ok());
        history.record_applied(&first);

        assert!(matches!(
            history.check_next(&UpgradeStep::new("create-agreement", 20)),
            Err(UpgradeError::DuplicateStepId(_))
        ));
        assert!(matches!(
            history.check_next(&UpgradeStep::new("add-currency", 10)),
            Err(UpgradeError::NonIncreasingSequence {
                sequence: 10,
                previous: 10,
                ..
            })
        ));
        assert!(history.check_next(&UpgradeStep::new("add-currency", 11)).is_ok());
        assert_eq!(history.last_sequence(), Some(10));
    }

    #[test]
    fn test_history_json_round_trip() {
        let mut history = UpgradeHistory::new();
        history.record_applied(&UpgradeStep::new("create-agreement", 1));
        history.record_applied(&UpgradeStep::new("add-currency", 2));

        let restored = UpgradeHistory::from_json(&history.to_json().unwrap()).unwrap();
        assert_eq!(restored, history);
        assert_eq!(restored.applied()[1].id, "add-currency");
    }
}
