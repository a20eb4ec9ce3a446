//! Metric Question Builder
//!
//! Maps raw fundamentals into the MetricQuestion records the game engine
//! consumes. This is the only place raw market data is shaped for play;
//! the engine never calls the market-data API directly.

use game_core::{MetricQuestion, MetricValue};

use crate::models::BasicFinancials;

/// Industry-average baselines the company's ratios are judged against.
#[derive(Debug, Clone, Default)]
pub struct IndustryAverages {
    pub pe_ratio: Option<f64>,
    pub net_margin: Option<f64>,
    pub roe: Option<f64>,
    pub debt_to_equity: Option<f64>,
}

/// Whether a higher or lower value beats the industry average.
enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Build one question per metric for which both the company value and the
/// industry baseline are available.
pub fn build_metric_questions(
    financials: &BasicFinancials,
    industry: &IndustryAverages,
) -> Vec<MetricQuestion> {
    let symbol = &financials.symbol;
    let specs = [
        (
            "P/E Ratio",
            financials.pe_ratio,
            industry.pe_ratio,
            Direction::LowerIsBetter,
            "pays less per dollar of earnings than",
        ),
        (
            "Net Margin",
            financials.net_margin,
            industry.net_margin,
            Direction::HigherIsBetter,
            "keeps more of each revenue dollar than",
        ),
        (
            "Return on Equity",
            financials.roe,
            industry.roe,
            Direction::HigherIsBetter,
            "earns more on shareholder capital than",
        ),
        (
            "Debt to Equity",
            financials.debt_to_equity,
            industry.debt_to_equity,
            Direction::LowerIsBetter,
            "carries less leverage than",
        ),
    ];

    let mut questions = Vec::new();
    for (metric, company, baseline, direction, better_clause) in specs {
        let (Some(company), Some(baseline)) = (company, baseline) else {
            continue;
        };

        let is_good = match direction {
            Direction::HigherIsBetter => company > baseline,
            Direction::LowerIsBetter => company < baseline,
        };
        let explanation = if is_good {
            format!(
                "{symbol}'s {metric} of {company:.2} {better_clause} the industry average of {baseline:.2}."
            )
        } else {
            format!(
                "{symbol}'s {metric} of {company:.2} trails the industry average of {baseline:.2}."
            )
        };

        questions.push(MetricQuestion {
            id: Some(format!("{symbol}:{metric}")),
            metric: metric.to_string(),
            company_value: MetricValue::Number(company),
            industry_value: MetricValue::Number(baseline),
            is_good,
            explanation,
        });
    }

    tracing::debug!(symbol = %symbol, count = questions.len(), "built metric questions");
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn financials() -> BasicFinancials {
        BasicFinancials {
            symbol: "ACME".to_string(),
            pe_ratio: Some(18.0),
            net_margin: Some(0.22),
            roe: Some(0.15),
            debt_to_equity: None,
            revenue_growth: Some(0.08),
            current_ratio: Some(1.4),
        }
    }

    fn industry() -> IndustryAverages {
        IndustryAverages {
            pe_ratio: Some(24.0),
            net_margin: Some(0.30),
            roe: Some(0.11),
            debt_to_equity: Some(1.2),
        }
    }

    #[test]
    fn skips_metrics_missing_either_side() {
        let questions = build_metric_questions(&financials(), &industry());
        // debt_to_equity has no company value, so three questions remain.
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| q.metric != "Debt to Equity"));
    }

    #[test]
    fn direction_determines_truth_label() {
        let questions = build_metric_questions(&financials(), &industry());

        let pe = questions.iter().find(|q| q.metric == "P/E Ratio").unwrap();
        assert!(pe.is_good); // 18 < 24, lower is better

        let margin = questions.iter().find(|q| q.metric == "Net Margin").unwrap();
        assert!(!margin.is_good); // 0.22 < 0.30, higher is better

        let roe = questions.iter().find(|q| q.metric == "Return on Equity").unwrap();
        assert!(roe.is_good); // 0.15 > 0.11
    }

    #[test]
    fn values_land_as_numbers_ready_for_comparison() {
        let questions = build_metric_questions(&financials(), &industry());
        for q in &questions {
            assert!(q.company_value.as_number().is_ok());
            assert!(q.industry_value.as_number().is_ok());
            assert!(!q.explanation.is_empty());
        }
    }
}
