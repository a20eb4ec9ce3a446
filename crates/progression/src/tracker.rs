//! Progression Tracker
//!
//! Converts accumulated experience into a discrete level via the ladder,
//! emitting level-up events with attached reward grants.

use serde::{Deserialize, Serialize};

use game_core::{GameError, PlayerProgress};

use crate::ladder::Ladder;

/// Emitted once per level gained, in ascending level order, carrying that
/// level's reward grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelUp {
    pub level: u32,
    pub tickets_granted: u64,
    pub description: String,
}

/// Add experience to a player's progress and commit the resulting level.
///
/// A single call that crosses several thresholds grants every intervening
/// level's rewards, not just the final one. Ticket grants are credited to
/// the wallet as part of the same commit. Level never decreases.
pub fn add_xp(
    ladder: &Ladder,
    progress: &mut PlayerProgress,
    amount: i64,
) -> Result<Vec<LevelUp>, GameError> {
    if amount < 0 {
        return Err(GameError::InvalidAmount(amount));
    }

    let total = progress.total_xp + amount as u64;
    let new_level = ladder.level_for_xp(total);

    let mut events = Vec::new();
    for entry in ladder.levels_between(progress.current_level, new_level) {
        events.push(LevelUp {
            level: entry.level,
            tickets_granted: entry.rewards.tickets,
            description: entry.rewards.description.clone(),
        });
        progress.ticket_balance += entry.rewards.tickets;
        tracing::info!(level = entry.level, tickets = entry.rewards.tickets, "level up");
    }

    progress.total_xp = total;
    progress.current_level = new_level;
    progress.bump_version();
    Ok(events)
}
