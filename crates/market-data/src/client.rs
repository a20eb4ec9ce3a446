use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use game_core::GameError;

use crate::models::{BasicFinancials, CompanyProfile, PriceTarget, Quote, RecommendationTrend};
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://finnhub.io/api/v1";

/// Sliding-window rate limiter: at most `max_requests` per `window` duration.
#[derive(Clone)]
struct RateLimiter {
    timestamps: Arc<Mutex<VecDeque<Instant>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            timestamps: Arc::new(Mutex::new(VecDeque::new())),
            max_requests,
            window,
        }
    }

    async fn acquire(&self) {
        loop {
            let mut ts = self.timestamps.lock().await;
            let now = Instant::now();

            // Remove timestamps outside the window
            while let Some(&front) = ts.front() {
                if now.duration_since(front) >= self.window {
                    ts.pop_front();
                } else {
                    break;
                }
            }

            if ts.len() < self.max_requests {
                ts.push_back(now);
                return;
            }

            let oldest = *ts.front().expect("non-empty at limit");
            let sleep_dur =
                self.window.saturating_sub(now.duration_since(oldest)) + Duration::from_millis(50);
            drop(ts);
            tracing::debug!(
                "Rate limiter: waiting {:.1}s for Finnhub API slot",
                sleep_dur.as_secs_f64()
            );
            tokio::time::sleep(sleep_dur).await;
        }
    }
}

/// Finnhub REST client behind the `MarketDataProvider` trait.
#[derive(Clone)]
pub struct FinnhubClient {
    api_key: String,
    client: Client,
    rate_limiter: RateLimiter,
}

impl FinnhubClient {
    pub fn new(api_key: String) -> Self {
        // Free tier allows 60 req/min; paid plans should raise this via env.
        let rate_limit: usize = std::env::var("FINNHUB_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            client,
            rate_limiter: RateLimiter::new(rate_limit, Duration::from_secs(60)),
        }
    }

    /// Send a request with rate limiting and automatic 429 retry.
    async fn send_request(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GameError> {
        let request = builder
            .build()
            .map_err(|e| GameError::MarketData(e.to_string()))?;

        for attempt in 0..3u32 {
            self.rate_limiter.acquire().await;
            let req_clone = request
                .try_clone()
                .ok_or_else(|| GameError::MarketData("Cannot clone request".to_string()))?;
            let response = self
                .client
                .execute(req_clone)
                .await
                .map_err(|e| GameError::MarketData(e.to_string()))?;

            if response.status().as_u16() != 429 {
                return Ok(response);
            }

            let wait_secs = 15u64;
            tracing::warn!(
                "Finnhub 429 rate limited, waiting {}s before retry {}/3",
                wait_secs,
                attempt + 1
            );
            tokio::time::sleep(Duration::from_secs(wait_secs)).await;
        }

        Err(GameError::MarketData(
            "Rate limited by Finnhub after 3 retries".to_string(),
        ))
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        symbol: &str,
    ) -> Result<T, GameError> {
        let url = format!("{BASE_URL}{path}");
        let response = self
            .send_request(
                self.client
                    .get(&url)
                    .query(&[("symbol", symbol), ("token", &self.api_key)]),
            )
            .await?;

        if !response.status().is_success() {
            return Err(GameError::MarketData(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GameError::MarketData(e.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for FinnhubClient {
    async fn quote(&self, symbol: &str) -> Result<Quote, GameError> {
        let raw: RawQuote = self.get_json("/quote", symbol).await?;
        Ok(Quote {
            symbol: symbol.to_string(),
            current: raw.c,
            high: raw.h,
            low: raw.l,
            open: raw.o,
            previous_close: raw.pc,
            timestamp: DateTime::from_timestamp(raw.t, 0).unwrap_or_else(Utc::now),
        })
    }

    async fn company_profile(&self, symbol: &str) -> Result<CompanyProfile, GameError> {
        let raw: RawProfile = self.get_json("/stock/profile2", symbol).await?;
        Ok(CompanyProfile {
            symbol: symbol.to_string(),
            name: raw.name.unwrap_or_else(|| symbol.to_string()),
            industry: raw.finnhub_industry,
            market_cap: raw.market_capitalization.map(|m| m * 1e6),
            currency: raw.currency,
            logo: raw.logo,
        })
    }

    async fn basic_financials(&self, symbol: &str) -> Result<BasicFinancials, GameError> {
        let raw: RawMetrics = self.get_json("/stock/metric?metric=all", symbol).await?;
        let m = raw.metric;
        Ok(BasicFinancials {
            symbol: symbol.to_string(),
            pe_ratio: metric_f64(&m, "peTTM"),
            net_margin: metric_f64(&m, "netProfitMarginTTM"),
            roe: metric_f64(&m, "roeTTM"),
            debt_to_equity: metric_f64(&m, "totalDebt/totalEquityQuarterly"),
            revenue_growth: metric_f64(&m, "revenueGrowthTTMYoy"),
            current_ratio: metric_f64(&m, "currentRatioQuarterly"),
        })
    }

    async fn price_target(&self, symbol: &str) -> Result<PriceTarget, GameError> {
        let raw: RawPriceTarget = self.get_json("/stock/price-target", symbol).await?;
        Ok(PriceTarget {
            symbol: symbol.to_string(),
            target_high: raw.target_high,
            target_low: raw.target_low,
            target_mean: raw.target_mean,
            target_median: raw.target_median,
            last_updated: raw.last_updated,
        })
    }

    async fn recommendation_trends(
        &self,
        symbol: &str,
    ) -> Result<Vec<RecommendationTrend>, GameError> {
        let raw: Vec<RawRecommendation> = self.get_json("/stock/recommendation", symbol).await?;
        Ok(raw
            .into_iter()
            .map(|r| RecommendationTrend {
                symbol: symbol.to_string(),
                period: r.period,
                strong_buy: r.strong_buy,
                buy: r.buy,
                hold: r.hold,
                sell: r.sell,
                strong_sell: r.strong_sell,
            })
            .collect())
    }
}

fn metric_f64(metrics: &serde_json::Value, key: &str) -> Option<f64> {
    metrics.get(key).and_then(|v| v.as_f64())
}

// Raw Finnhub response shapes

#[derive(Deserialize)]
struct RawQuote {
    c: f64,
    h: f64,
    l: f64,
    o: f64,
    pc: f64,
    t: i64,
}

#[derive(Deserialize)]
struct RawProfile {
    name: Option<String>,
    #[serde(rename = "finnhubIndustry")]
    finnhub_industry: Option<String>,
    #[serde(rename = "marketCapitalization")]
    market_capitalization: Option<f64>,
    currency: Option<String>,
    logo: Option<String>,
}

#[derive(Deserialize)]
struct RawMetrics {
    #[serde(default)]
    metric: serde_json::Value,
}

#[derive(Deserialize)]
struct RawPriceTarget {
    #[serde(rename = "targetHigh")]
    target_high: Option<f64>,
    #[serde(rename = "targetLow")]
    target_low: Option<f64>,
    #[serde(rename = "targetMean")]
    target_mean: Option<f64>,
    #[serde(rename = "targetMedian")]
    target_median: Option<f64>,
    #[serde(rename = "lastUpdated")]
    last_updated: Option<String>,
}

#[derive(Deserialize)]
struct RawRecommendation {
    period: String,
    #[serde(rename = "strongBuy")]
    strong_buy: i32,
    buy: i32,
    hold: i32,
    sell: i32,
    #[serde(rename = "strongSell")]
    strong_sell: i32,
}
