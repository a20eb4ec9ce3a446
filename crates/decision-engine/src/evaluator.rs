//! Metric Evaluator
//!
//! Judges a player's good/bad guess about one financial metric against its
//! labeled truth. Pure functions over their inputs; no side effects.

use serde::{Deserialize, Serialize};

use game_core::{GameError, MetricQuestion};

/// The player's call on a metric question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Guess {
    Good,
    Bad,
}

/// Result of evaluating one guess. The explanation is always the question's
/// authored rationale, returned verbatim whether the guess was right or
/// wrong, so the UI can always show it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub correct: bool,
    pub explanation: String,
}

/// Evaluate a good/bad guess against the question's labeled truth.
pub fn evaluate_guess(question: &MetricQuestion, guess: Guess) -> GuessOutcome {
    let guessed_good = matches!(guess, Guess::Good);
    GuessOutcome {
        correct: guessed_good == question.is_good,
        explanation: question.explanation.clone(),
    }
}

/// Normalized company-minus-industry difference, used by Market Adventure's
/// continuous scoring. Either value failing to parse as a number is an
/// `InvalidMetricValue` error rather than a silent guess.
pub fn value_spread(question: &MetricQuestion) -> Result<f64, GameError> {
    let company = question.company_value.as_number()?;
    let industry = question.industry_value.as_number()?;
    Ok(company - industry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::MetricValue;

    fn question(is_good: bool) -> MetricQuestion {
        MetricQuestion {
            id: Some("q1".to_string()),
            metric: "Operating Margin".to_string(),
            company_value: MetricValue::Text("18.5%".to_string()),
            industry_value: MetricValue::Number(12.0),
            is_good,
            explanation: "Margins above the industry average signal pricing power.".to_string(),
        }
    }

    #[test]
    fn correct_iff_guess_matches_truth() {
        let q = question(true);
        assert!(evaluate_guess(&q, Guess::Good).correct);
        assert!(!evaluate_guess(&q, Guess::Bad).correct);

        let q = question(false);
        assert!(evaluate_guess(&q, Guess::Bad).correct);
        assert!(!evaluate_guess(&q, Guess::Good).correct);
    }

    #[test]
    fn explanation_returned_verbatim_on_wrong_guess() {
        let q = question(true);
        let outcome = evaluate_guess(&q, Guess::Bad);
        assert!(!outcome.correct);
        assert_eq!(outcome.explanation, q.explanation);
    }

    #[test]
    fn spread_normalizes_display_strings() {
        let q = question(true);
        assert_eq!(value_spread(&q).unwrap(), 6.5);
    }

    #[test]
    fn spread_rejects_unparseable_values() {
        let mut q = question(true);
        q.company_value = MetricValue::Text("pending".to_string());
        assert!(matches!(
            value_spread(&q),
            Err(GameError::InvalidMetricValue(_))
        ));
    }
}
