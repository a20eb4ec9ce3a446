pub mod decision;
pub mod evaluator;

pub use decision::{DecisionInstance, DecisionState};
pub use evaluator::{evaluate_guess, value_spread, Guess, GuessOutcome};
