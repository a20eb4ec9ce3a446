pub mod controller;
pub mod scoring;
pub mod session;

pub use controller::{AdvanceOutcome, GameSessionController, ResponseResult, SessionOutcome};
pub use scoring::{ModeRule, ScoringRules};
pub use session::{ContentItem, PlayerResponse, Session, SessionState};
