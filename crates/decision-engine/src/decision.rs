//! Decision Engine
//!
//! Resolves a multi-option branching decision into a vector of named metric
//! deltas. The decision catalog entry is never mutated; only the
//! caller-supplied score vector changes.

use game_core::{Decision, GameError, ImpactBatch, ScoreVector};

/// Lifecycle of one presented decision. `Resolved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionState {
    Presented,
    OptionSelected,
    Resolved,
}

/// One in-play instance of a catalog decision.
#[derive(Debug)]
pub struct DecisionInstance<'a> {
    decision: &'a Decision,
    state: DecisionState,
    resolved: Option<ImpactBatch>,
}

impl<'a> DecisionInstance<'a> {
    pub fn new(decision: &'a Decision) -> Self {
        Self {
            decision,
            state: DecisionState::Presented,
            resolved: None,
        }
    }

    pub fn state(&self) -> DecisionState {
        self.state
    }

    pub fn decision(&self) -> &Decision {
        self.decision
    }

    /// Resolve the decision with the chosen option, applying its impact
    /// batch to `score` as one atomic operation. Duplicate metric names
    /// within the option are summed before application.
    ///
    /// Calling this again on a resolved instance is an idempotent replay:
    /// the previously computed batch is returned and nothing is re-applied.
    pub fn select_option(
        &mut self,
        option_id: &str,
        score: &mut ScoreVector,
    ) -> Result<ImpactBatch, GameError> {
        if let Some(batch) = &self.resolved {
            tracing::debug!(
                decision = %self.decision.id,
                "replayed select_option on resolved decision"
            );
            return Ok(batch.clone());
        }

        let option = self.decision.option(option_id).ok_or_else(|| {
            GameError::InvalidOption {
                decision_id: self.decision.id.clone(),
                option_id: option_id.to_string(),
            }
        })?;
        self.state = DecisionState::OptionSelected;

        let mut batch = ImpactBatch::new();
        for impact in &option.impacts {
            *batch.entry(impact.metric.clone()).or_insert(0.0) += impact.delta;
        }

        score.apply_batch(&batch);
        self.state = DecisionState::Resolved;
        self.resolved = Some(batch.clone());
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{DecisionOption, Impact};

    fn sample_decision() -> Decision {
        Decision {
            id: "d1".to_string(),
            title: "Quarterly budget".to_string(),
            description: "Where does the surplus go?".to_string(),
            options: vec![
                DecisionOption {
                    id: "a".to_string(),
                    text: "Expand sales".to_string(),
                    impacts: vec![
                        Impact { metric: "revenue".to_string(), delta: 5.0 },
                        Impact { metric: "morale".to_string(), delta: -2.0 },
                        Impact { metric: "revenue".to_string(), delta: 3.0 },
                    ],
                },
                DecisionOption {
                    id: "b".to_string(),
                    text: "Staff bonuses".to_string(),
                    impacts: vec![Impact { metric: "morale".to_string(), delta: 4.0 }],
                },
            ],
        }
    }

    #[test]
    fn duplicate_metrics_sum_into_one_batch() {
        let d = sample_decision();
        let mut instance = DecisionInstance::new(&d);
        let mut score = ScoreVector::new();

        let batch = instance.select_option("a", &mut score).unwrap();
        assert_eq!(batch.get("revenue"), Some(&8.0));
        assert_eq!(batch.get("morale"), Some(&-2.0));
        assert_eq!(batch.len(), 2);

        assert_eq!(score.get("revenue"), 8.0);
        assert_eq!(score.get("morale"), -2.0);
    }

    #[test]
    fn only_named_metrics_change() {
        let d = sample_decision();
        let mut instance = DecisionInstance::new(&d);
        let mut score = ScoreVector::new();
        score.add("cash", 10.0);

        instance.select_option("b", &mut score).unwrap();
        assert_eq!(score.get("cash"), 10.0);
        assert_eq!(score.get("morale"), 4.0);
        assert_eq!(score.get("revenue"), 0.0);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let d = sample_decision();
        let mut instance = DecisionInstance::new(&d);
        let mut score = ScoreVector::new();

        let err = instance.select_option("zzz", &mut score).unwrap_err();
        assert!(matches!(err, GameError::InvalidOption { .. }));
        assert_eq!(instance.state(), DecisionState::Presented);
        assert!(score.is_empty());
    }

    #[test]
    fn replay_returns_cached_batch_without_reapplying() {
        let d = sample_decision();
        let mut instance = DecisionInstance::new(&d);
        let mut score = ScoreVector::new();

        instance.select_option("a", &mut score).unwrap();
        assert_eq!(instance.state(), DecisionState::Resolved);

        // Replay, even naming a different option, is a no-op.
        let batch = instance.select_option("b", &mut score).unwrap();
        assert_eq!(batch.get("revenue"), Some(&8.0));
        assert_eq!(score.get("revenue"), 8.0);
        assert_eq!(score.get("morale"), -2.0);
    }
}
