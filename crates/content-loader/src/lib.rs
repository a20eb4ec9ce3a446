//! Content Loader
//!
//! Deserializes the authored game catalogs (questions, decisions, level
//! ladder, rewards, scoring rules) and applies the fatal load-time checks:
//! a malformed ladder, a decision with zero options, or a duplicate id
//! must prevent any session from starting, since there is no meaningful
//! runtime recovery for broken content.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use game_core::{ContentError, Decision, LevelRequirement, MetricQuestion, Reward};
use progression::Ladder;
use reward_store::RewardCatalog;
use session_controller::ScoringRules;

/// The raw authored bundle, as serialized by the content pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameContent {
    #[serde(default)]
    pub questions: Vec<MetricQuestion>,
    #[serde(default)]
    pub decisions: Vec<Decision>,
    pub ladder: Vec<LevelRequirement>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub scoring: Option<ScoringRules>,
}

/// A validated bundle, safe to start sessions against.
#[derive(Debug, Clone)]
pub struct LoadedContent {
    pub questions: Vec<MetricQuestion>,
    pub decisions: Vec<Decision>,
    pub ladder: Ladder,
    pub rewards: RewardCatalog,
    pub scoring: ScoringRules,
}

impl GameContent {
    /// Run the load-time checks and build the validated bundle.
    pub fn validate(self) -> Result<LoadedContent, ContentError> {
        let ladder = Ladder::new(self.ladder)?;
        let rewards = RewardCatalog::new(self.rewards)?;

        let mut seen = HashSet::new();
        for decision in &self.decisions {
            if decision.options.is_empty() {
                return Err(ContentError::EmptyDecision(decision.id.clone()));
            }
            if !seen.insert(decision.id.clone()) {
                return Err(ContentError::DuplicateId(decision.id.clone()));
            }
        }

        tracing::info!(
            questions = self.questions.len(),
            decisions = self.decisions.len(),
            max_level = ladder.max_level(),
            "content catalog loaded"
        );

        Ok(LoadedContent {
            questions: self.questions,
            decisions: self.decisions,
            ladder,
            rewards,
            scoring: self.scoring.unwrap_or_default(),
        })
    }
}

/// Parse and validate a JSON catalog.
pub fn load_str(json: &str) -> Result<LoadedContent, ContentError> {
    let content: GameContent =
        serde_json::from_str(json).map_err(|e| ContentError::Parse(e.to_string()))?;
    content.validate()
}

/// Parse and validate a JSON catalog file.
pub fn load_file(path: &Path) -> anyhow::Result<LoadedContent> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading content catalog {}", path.display()))?;
    Ok(load_str(&raw)?)
}
