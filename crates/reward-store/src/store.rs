//! Reward Store
//!
//! Owns the reward catalog, the ticket wallet, and the one-way acquisition
//! transition for each reward.

use std::collections::BTreeMap;

use game_core::{ContentError, GameError, PlayerProgress, Reward, RewardStatus};

/// The purchasable reward catalog for one player.
#[derive(Debug, Clone)]
pub struct RewardCatalog {
    rewards: BTreeMap<String, Reward>,
}

impl RewardCatalog {
    /// Build a catalog from authored entries. Duplicate ids are a content
    /// bug and fatal at load time.
    pub fn new(entries: Vec<Reward>) -> Result<Self, ContentError> {
        let mut rewards = BTreeMap::new();
        for reward in entries {
            if rewards.contains_key(&reward.id) {
                return Err(ContentError::DuplicateId(reward.id));
            }
            rewards.insert(reward.id.clone(), reward);
        }
        Ok(Self { rewards })
    }

    /// Mark catalog entries already acquired by this player as unlocked,
    /// for a catalog freshly loaded against persisted progress.
    pub fn sync_with_progress(&mut self, progress: &PlayerProgress) {
        for (id, reward) in self.rewards.iter_mut() {
            if progress.has_acquired(id) {
                reward.status = RewardStatus::Unlocked;
            }
        }
    }

    pub fn get(&self, reward_id: &str) -> Option<&Reward> {
        self.rewards.get(reward_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reward> {
        self.rewards.values()
    }

    /// Spend tickets to unlock a reward. The debit and the Locked ->
    /// Unlocked flip commit together or not at all: every failure path
    /// leaves both the wallet and the catalog untouched.
    pub fn purchase(
        &mut self,
        reward_id: &str,
        progress: &mut PlayerProgress,
    ) -> Result<&Reward, GameError> {
        let reward = self
            .rewards
            .get_mut(reward_id)
            .ok_or_else(|| GameError::UnknownReward(reward_id.to_string()))?;

        if reward.status.is_unlocked() || progress.has_acquired(reward_id) {
            return Err(GameError::AlreadyAcquired(reward_id.to_string()));
        }

        if progress.ticket_balance < reward.ticket_cost {
            return Err(GameError::InsufficientTickets {
                needed: reward.ticket_cost,
                available: progress.ticket_balance,
            });
        }

        progress.ticket_balance -= reward.ticket_cost;
        reward.status = RewardStatus::Unlocked;
        progress.acquired_rewards.insert(reward.id.clone());
        progress.bump_version();
        tracing::info!(reward = %reward.id, cost = reward.ticket_cost, "reward unlocked");
        Ok(reward)
    }
}

/// Pure affordability query, used to disable UI affordances without
/// performing the transaction.
pub fn can_afford(reward: &Reward, progress: &PlayerProgress) -> bool {
    progress.ticket_balance >= reward.ticket_cost
}

/// Credit earned tickets to the wallet (session payout, level grants).
pub fn credit_tickets(progress: &mut PlayerProgress, amount: u64) {
    progress.ticket_balance += amount;
    progress.bump_version();
    tracing::debug!(amount, balance = progress.ticket_balance, "tickets credited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::RewardKind;

    fn reward(id: &str, cost: u64) -> Reward {
        Reward {
            id: id.to_string(),
            name: id.to_string(),
            description: "test reward".to_string(),
            ticket_cost: cost,
            status: RewardStatus::Locked,
            kind: RewardKind::Theme,
            icon: None,
        }
    }

    #[test]
    fn duplicate_ids_rejected_at_load() {
        let err = RewardCatalog::new(vec![reward("x", 1), reward("x", 2)]).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateId(_)));
    }

    #[test]
    fn unknown_reward() {
        let mut catalog = RewardCatalog::new(vec![reward("theme_dark", 50)]).unwrap();
        let mut progress = PlayerProgress::new();
        assert!(matches!(
            catalog.purchase("nope", &mut progress),
            Err(GameError::UnknownReward(_))
        ));
    }

    #[test]
    fn insufficient_tickets_leaves_wallet_untouched() {
        let mut catalog = RewardCatalog::new(vec![reward("theme_dark", 50)]).unwrap();
        let mut progress = PlayerProgress::new();
        progress.ticket_balance = 30;

        let err = catalog.purchase("theme_dark", &mut progress).unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientTickets { needed: 50, available: 30 }
        ));
        assert_eq!(progress.ticket_balance, 30);
        assert_eq!(catalog.get("theme_dark").unwrap().status, RewardStatus::Locked);
    }

    #[test]
    fn successful_purchase_debits_and_unlocks_together() {
        let mut catalog = RewardCatalog::new(vec![reward("theme_dark", 50)]).unwrap();
        let mut progress = PlayerProgress::new();
        progress.ticket_balance = 60;

        let unlocked = catalog.purchase("theme_dark", &mut progress).unwrap();
        assert_eq!(unlocked.status, RewardStatus::Unlocked);
        assert_eq!(progress.ticket_balance, 10);
        assert!(progress.has_acquired("theme_dark"));
    }

    #[test]
    fn purchase_is_replay_safe() {
        let mut catalog = RewardCatalog::new(vec![reward("badge_bull", 20)]).unwrap();
        let mut progress = PlayerProgress::new();
        progress.ticket_balance = 100;

        catalog.purchase("badge_bull", &mut progress).unwrap();
        assert_eq!(progress.ticket_balance, 80);

        let err = catalog.purchase("badge_bull", &mut progress).unwrap_err();
        assert!(matches!(err, GameError::AlreadyAcquired(_)));
        assert_eq!(progress.ticket_balance, 80);
    }

    #[test]
    fn affordability_is_a_pure_query() {
        let r = reward("unlock_pro", 40);
        let mut progress = PlayerProgress::new();
        assert!(!can_afford(&r, &progress));
        progress.ticket_balance = 40;
        assert!(can_afford(&r, &progress));
        assert_eq!(progress.ticket_balance, 40);
    }

    #[test]
    fn catalog_syncs_against_persisted_progress() {
        let mut catalog = RewardCatalog::new(vec![reward("a", 5), reward("b", 5)]).unwrap();
        let mut progress = PlayerProgress::new();
        progress.acquired_rewards.insert("b".to_string());

        catalog.sync_with_progress(&progress);
        assert_eq!(catalog.get("a").unwrap().status, RewardStatus::Locked);
        assert_eq!(catalog.get("b").unwrap().status, RewardStatus::Unlocked);
    }
}
