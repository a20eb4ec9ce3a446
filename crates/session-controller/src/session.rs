//! Session state for one bounded play-through of a single game mode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use decision_engine::Guess;
use game_core::{Decision, GameMode, MetricQuestion, ScoreVector};

/// One queued piece of content: either a metric question (guess-driven
/// modes) or a branching decision (Board Room and friends).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ContentItem {
    Question(MetricQuestion),
    Decision(Decision),
}

/// One player input fed to `advance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerResponse {
    Guess(Guess),
    Choice { option_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting responses.
    Active,
    /// All content consumed, or the Time Attack budget expired; waiting
    /// for `finish`.
    Complete,
    /// Committed to player progress. Terminal.
    Finished,
}

/// One play-through handle: created by `start`, passed through every
/// controller call, ended by `finish` or `abandon`. Not cloneable, so a
/// session cannot be committed twice.
#[derive(Debug)]
pub struct Session {
    pub(crate) mode: GameMode,
    pub(crate) items: Vec<ContentItem>,
    pub(crate) cursor: usize,
    pub(crate) score: ScoreVector,
    pub(crate) correct: u32,
    pub(crate) answered: u32,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) deadline: Option<DateTime<Utc>>,
    pub(crate) time_expired: bool,
    pub(crate) finished: bool,
}

impl Session {
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> &ScoreVector {
        &self.score
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The content item the next response will be judged against.
    pub fn current_item(&self) -> Option<&ContentItem> {
        self.items.get(self.cursor)
    }

    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.cursor)
    }

    pub fn state(&self) -> SessionState {
        if self.finished {
            SessionState::Finished
        } else if self.time_expired || self.cursor >= self.items.len() {
            SessionState::Complete
        } else {
            SessionState::Active
        }
    }

    /// True when the Time Attack budget forced completion early.
    pub fn time_expired(&self) -> bool {
        self.time_expired
    }
}
