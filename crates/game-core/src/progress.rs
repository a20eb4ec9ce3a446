use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::score::ScoreVector;

/// Persistent per-player state. Owned on the player's behalf by the
/// progression and reward components; UI code never writes it directly.
///
/// `version` is bumped by every committed mutation so a remote store can
/// enforce single-writer-per-player with an optimistic check: two devices
/// that both read version N cannot both commit N+1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub total_xp: u64,
    pub current_level: u32,
    pub ticket_balance: u64,
    pub acquired_rewards: BTreeSet<String>,
    pub lifetime_scores: ScoreVector,
    pub version: u64,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerProgress {
    /// A fresh player: level 1, empty wallet, nothing acquired.
    pub fn new() -> Self {
        Self {
            total_xp: 0,
            current_level: 1,
            ticket_balance: 0,
            acquired_rewards: BTreeSet::new(),
            lifetime_scores: ScoreVector::new(),
            version: 0,
        }
    }

    pub fn has_acquired(&self, reward_id: &str) -> bool {
        self.acquired_rewards.contains(reward_id)
    }

    /// Mark one committed mutation for the optimistic concurrency check.
    pub fn bump_version(&mut self) {
        self.version += 1;
    }
}
