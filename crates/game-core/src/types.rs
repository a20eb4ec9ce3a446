use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// The five playable game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    BoardRoom,
    InvestorSimulator,
    MacroMastermind,
    MarketAdventure,
    TimeAttack,
}

impl GameMode {
    /// Human-readable label for the mode
    pub fn to_label(&self) -> &'static str {
        match self {
            GameMode::BoardRoom => "Board Room",
            GameMode::InvestorSimulator => "Investor Simulator",
            GameMode::MacroMastermind => "Macro Mastermind",
            GameMode::MarketAdventure => "Market Adventure",
            GameMode::TimeAttack => "Time Attack",
        }
    }
}

/// A metric value as authored: either a raw number or a formatted display
/// string ("$1.2B", "14.5%"). Numeric comparisons go through `as_number`
/// so they never depend on display formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Normalize into a comparable number. Strips currency/percent
    /// decoration and expands K/M/B/T display suffixes.
    pub fn as_number(&self) -> Result<f64, GameError> {
        match self {
            MetricValue::Number(n) => Ok(*n),
            MetricValue::Text(s) => parse_display_number(s)
                .ok_or_else(|| GameError::InvalidMetricValue(s.clone())),
        }
    }
}

fn parse_display_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let (body, multiplier) = match cleaned.chars().last()? {
        'k' | 'K' => (&cleaned[..cleaned.len() - 1], 1e3),
        'm' | 'M' => (&cleaned[..cleaned.len() - 1], 1e6),
        'b' | 'B' => (&cleaned[..cleaned.len() - 1], 1e9),
        't' | 'T' => (&cleaned[..cleaned.len() - 1], 1e12),
        _ => (cleaned.as_str(), 1.0),
    };

    body.parse::<f64>().ok().map(|n| n * multiplier)
}

/// One financial-metric question: the player judges whether the company's
/// value for the metric is good or bad relative to its industry average.
/// Immutable once authored; a session consumes it, never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricQuestion {
    #[serde(default)]
    pub id: Option<String>,
    pub metric: String,
    pub company_value: MetricValue,
    pub industry_value: MetricValue,
    pub is_good: bool,
    pub explanation: String,
}

/// A single (metric, signed delta) effect of choosing a decision option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Impact {
    pub metric: String,
    pub delta: f64,
}

/// One selectable branch of a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionOption {
    pub id: String,
    pub text: String,
    pub impacts: Vec<Impact>,
}

/// A multi-option branching decision. Loaded at content-init time and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub id: String,
    pub title: String,
    pub description: String,
    pub options: Vec<DecisionOption>,
}

impl Decision {
    pub fn option(&self, option_id: &str) -> Option<&DecisionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Tickets and flavor text granted on reaching a level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRewardGrant {
    pub tickets: u64,
    pub description: String,
}

/// One rung of the level ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRequirement {
    pub level: u32,
    pub xp_required: u64,
    pub rewards: LevelRewardGrant,
}

/// Acquisition state of a reward. Two-state variant rather than a bool so
/// the one-way Locked -> Unlocked transition cannot be expressed in reverse
/// by ordinary mutation paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardStatus {
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Badge,
    Theme,
    Unlock,
}

/// A purchasable catalog entry gated behind the ticket economy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ticket_cost: u64,
    #[serde(default = "RewardStatus::locked")]
    pub status: RewardStatus,
    pub kind: RewardKind,
    #[serde(default)]
    pub icon: Option<String>,
}

impl RewardStatus {
    fn locked() -> Self {
        RewardStatus::Locked
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, RewardStatus::Unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_value_passes_through() {
        let v = MetricValue::Number(42.5);
        assert_eq!(v.as_number().unwrap(), 42.5);
    }

    #[test]
    fn display_strings_normalize() {
        assert_eq!(
            MetricValue::Text("$2B".to_string()).as_number().unwrap(),
            2e9
        );
        assert_eq!(
            MetricValue::Text("14.5%".to_string()).as_number().unwrap(),
            14.5
        );
        assert_eq!(
            MetricValue::Text("1,234.5".to_string()).as_number().unwrap(),
            1234.5
        );
        assert_eq!(
            MetricValue::Text("-2.5M".to_string()).as_number().unwrap(),
            -2.5e6
        );
    }

    #[test]
    fn unparseable_value_is_an_error() {
        let v = MetricValue::Text("n/a".to_string());
        assert!(matches!(
            v.as_number(),
            Err(crate::GameError::InvalidMetricValue(_))
        ));
    }

    #[test]
    fn untagged_serde_accepts_both_shapes() {
        let q: MetricQuestion = serde_json::from_str(
            r#"{
                "metric": "P/E Ratio",
                "company_value": 18.2,
                "industry_value": "22.4",
                "is_good": true,
                "explanation": "Lower P/E than the industry average."
            }"#,
        )
        .unwrap();
        assert_eq!(q.company_value.as_number().unwrap(), 18.2);
        assert_eq!(q.industry_value.as_number().unwrap(), 22.4);
        assert!(q.id.is_none());
    }
}
