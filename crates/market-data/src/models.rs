use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Real-time quote for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub current: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub previous_close: f64,
    pub timestamp: DateTime<Utc>,
}

/// Company profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: String,
    pub name: String,
    pub industry: Option<String>,
    pub market_cap: Option<f64>,
    pub currency: Option<String>,
    pub logo: Option<String>,
}

/// The fundamental ratios the question builder draws on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasicFinancials {
    pub symbol: String,
    pub pe_ratio: Option<f64>,
    pub net_margin: Option<f64>,
    pub roe: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub current_ratio: Option<f64>,
}

/// Analyst price target consensus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTarget {
    pub symbol: String,
    pub target_high: Option<f64>,
    pub target_low: Option<f64>,
    pub target_mean: Option<f64>,
    pub target_median: Option<f64>,
    pub last_updated: Option<String>,
}

/// One month of aggregated analyst recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationTrend {
    pub symbol: String,
    pub period: String,
    pub strong_buy: i32,
    pub buy: i32,
    pub hold: i32,
    pub sell: i32,
    pub strong_sell: i32,
}
