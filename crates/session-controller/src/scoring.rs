//! Mode-specific scoring rules.
//!
//! How a finished session's score vector converts into XP and tickets is
//! configuration, not engine logic: each mode carries its own rule and the
//! defaults here can be replaced wholesale by the content loader.

use std::collections::HashMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use game_core::GameMode;

/// Scoring parameters for one game mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeRule {
    /// Points added to the question's metric for a correct guess.
    pub points_per_correct: f64,
    /// Scale a correct guess by the normalized company/industry spread
    /// instead of a flat point award (Market Adventure).
    pub spread_scored: bool,
    /// XP granted per point of (non-negative) session score.
    pub xp_per_point: f64,
    /// Tickets granted per point of (non-negative) session score.
    pub tickets_per_point: f64,
    /// Flat XP for finishing the whole queue.
    pub completion_bonus_xp: u64,
    /// Wall-clock budget; responses after the deadline force completion.
    #[serde(default, with = "seconds")]
    pub time_budget: Option<Duration>,
}

mod seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(d) => s.serialize_some(&d.num_seconds()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<i64>::deserialize(d)?.map(Duration::seconds))
    }
}

impl Default for ModeRule {
    fn default() -> Self {
        Self {
            points_per_correct: 1.0,
            spread_scored: false,
            xp_per_point: 10.0,
            tickets_per_point: 2.0,
            completion_bonus_xp: 25,
            time_budget: None,
        }
    }
}

/// Per-mode scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRules {
    rules: HashMap<GameMode, ModeRule>,
}

impl Default for ScoringRules {
    fn default() -> Self {
        let mut rules = HashMap::new();
        rules.insert(GameMode::BoardRoom, ModeRule::default());
        rules.insert(GameMode::InvestorSimulator, ModeRule::default());
        rules.insert(
            GameMode::MacroMastermind,
            ModeRule {
                xp_per_point: 12.0,
                ..ModeRule::default()
            },
        );
        rules.insert(
            GameMode::MarketAdventure,
            ModeRule {
                spread_scored: true,
                ..ModeRule::default()
            },
        );
        rules.insert(
            GameMode::TimeAttack,
            ModeRule {
                xp_per_point: 15.0,
                tickets_per_point: 3.0,
                time_budget: Some(Duration::seconds(60)),
                ..ModeRule::default()
            },
        );
        Self { rules }
    }
}

impl ScoringRules {
    pub fn new(rules: HashMap<GameMode, ModeRule>) -> Self {
        Self { rules }
    }

    pub fn rule(&self, mode: GameMode) -> ModeRule {
        self.rules.get(&mode).cloned().unwrap_or_default()
    }
}
