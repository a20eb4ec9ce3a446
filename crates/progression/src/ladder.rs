//! Level Ladder
//!
//! The ordered list of level requirements mapping experience thresholds to
//! levels. A malformed ladder is a content bug, rejected at load time
//! before any session runs.

use game_core::{ContentError, LevelRequirement, LevelRewardGrant};

/// A validated level ladder. Construction is the only way to get one, so
/// every `Ladder` in circulation satisfies the ordering invariants.
#[derive(Debug, Clone)]
pub struct Ladder {
    entries: Vec<LevelRequirement>,
}

impl Ladder {
    /// Validate and build a ladder. Requirements: non-empty, starts at
    /// level 1 with xp 0, strictly increasing in both level and xp.
    pub fn new(mut entries: Vec<LevelRequirement>) -> Result<Self, ContentError> {
        if entries.is_empty() {
            return Err(ContentError::MalformedLadder("ladder is empty".to_string()));
        }

        entries.sort_by_key(|e| e.level);

        let first = &entries[0];
        if first.level != 1 || first.xp_required != 0 {
            return Err(ContentError::MalformedLadder(format!(
                "ladder must start at level 1 with 0 xp, found level {} at {} xp",
                first.level, first.xp_required
            )));
        }

        for pair in entries.windows(2) {
            if pair[1].level <= pair[0].level {
                return Err(ContentError::MalformedLadder(format!(
                    "duplicate level {}",
                    pair[1].level
                )));
            }
            if pair[1].xp_required <= pair[0].xp_required {
                return Err(ContentError::MalformedLadder(format!(
                    "xp for level {} ({}) does not exceed level {} ({})",
                    pair[1].level, pair[1].xp_required, pair[0].level, pair[0].xp_required
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The greatest ladder level whose xp threshold is within `total_xp`.
    /// Capped at the last defined entry; no extrapolation beyond it.
    pub fn level_for_xp(&self, total_xp: u64) -> u32 {
        self.entries
            .iter()
            .take_while(|e| e.xp_required <= total_xp)
            .last()
            .map(|e| e.level)
            .unwrap_or(1)
    }

    pub fn grant_for(&self, level: u32) -> Option<&LevelRewardGrant> {
        self.entries
            .iter()
            .find(|e| e.level == level)
            .map(|e| &e.rewards)
    }

    /// Ladder levels in the half-open range (after, upto], ascending.
    pub fn levels_between(&self, after: u32, upto: u32) -> impl Iterator<Item = &LevelRequirement> {
        self.entries
            .iter()
            .filter(move |e| e.level > after && e.level <= upto)
    }

    pub fn max_level(&self) -> u32 {
        // Non-empty by construction.
        self.entries.last().map(|e| e.level).unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rung(level: u32, xp: u64) -> LevelRequirement {
        LevelRequirement {
            level,
            xp_required: xp,
            rewards: LevelRewardGrant {
                tickets: 10 * level as u64,
                description: format!("Reached level {level}"),
            },
        }
    }

    #[test]
    fn valid_ladder_builds() {
        let ladder = Ladder::new(vec![rung(1, 0), rung(2, 100), rung(3, 250)]).unwrap();
        assert_eq!(ladder.max_level(), 3);
    }

    #[test]
    fn ladder_missing_level_one_is_fatal() {
        assert!(Ladder::new(vec![rung(2, 0), rung(3, 100)]).is_err());
    }

    #[test]
    fn ladder_with_nonzero_base_xp_is_fatal() {
        assert!(Ladder::new(vec![rung(1, 50), rung(2, 100)]).is_err());
    }

    #[test]
    fn non_increasing_xp_is_fatal() {
        assert!(Ladder::new(vec![rung(1, 0), rung(2, 100), rung(3, 100)]).is_err());
    }

    #[test]
    fn empty_ladder_is_fatal() {
        assert!(Ladder::new(vec![]).is_err());
    }

    #[test]
    fn lookup_matches_thresholds() {
        let ladder = Ladder::new(vec![rung(1, 0), rung(2, 100), rung(3, 250)]).unwrap();
        assert_eq!(ladder.level_for_xp(0), 1);
        assert_eq!(ladder.level_for_xp(99), 1);
        assert_eq!(ladder.level_for_xp(100), 2);
        assert_eq!(ladder.level_for_xp(249), 2);
        assert_eq!(ladder.level_for_xp(250), 3);
        // Capped at the last entry.
        assert_eq!(ladder.level_for_xp(1_000_000), 3);
    }
}
