use async_trait::async_trait;

use game_core::GameError;

use crate::models::{BasicFinancials, CompanyProfile, PriceTarget, Quote, RecommendationTrend};

/// Uniform result-or-error surface over the raw market-data API, so the
/// engine's consumers never branch on transport-specific conventions.
/// The game engine itself never calls this; a content-mapping step turns
/// its output into MetricQuestion records first.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn quote(&self, symbol: &str) -> Result<Quote, GameError>;
    async fn company_profile(&self, symbol: &str) -> Result<CompanyProfile, GameError>;
    async fn basic_financials(&self, symbol: &str) -> Result<BasicFinancials, GameError>;
    async fn price_target(&self, symbol: &str) -> Result<PriceTarget, GameError>;
    async fn recommendation_trends(
        &self,
        symbol: &str,
    ) -> Result<Vec<RecommendationTrend>, GameError>;
}
