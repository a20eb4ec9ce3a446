pub mod client;
pub mod models;
pub mod provider;
pub mod questions;

pub use client::FinnhubClient;
pub use models::*;
pub use provider::MarketDataProvider;
pub use questions::{build_metric_questions, IndustryAverages};
