use serde::Serialize;
use tracing::trace;

use super::completeness::is_complete;
use super::factors::{clamp_score, fee_score, governance_score, liquidity_score, minimum_score};
use super::weights::WEIGHTS;
use crate::explain::generate_why_included;
use crate::fund::Fund;

/// The four sub-scores behind a composite score, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub fee_score: f64,
    pub liquidity_score: f64,
    pub governance_score: f64,
    pub minimum_score: f64,
}

/// Which sub-score to read from a breakdown (clusters sort by one of these).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubScore {
    Fee,
    Liquidity,
    Governance,
    Minimum,
}

impl ScoreBreakdown {
    pub fn compute(fund: &Fund) -> Self {
        Self {
            fee_score: fee_score(fund),
            liquidity_score: liquidity_score(fund),
            governance_score: governance_score(fund),
            minimum_score: minimum_score(fund),
        }
    }

    pub fn get(&self, which: SubScore) -> f64 {
        match which {
            SubScore::Fee => self.fee_score,
            SubScore::Liquidity => self.liquidity_score,
            SubScore::Governance => self.governance_score,
            SubScore::Minimum => self.minimum_score,
        }
    }

    /// Weighted blend of the sub-scores, rounded to one decimal.
    pub fn composite(&self) -> f64 {
        let raw = self.fee_score * WEIGHTS.fee
            + self.liquidity_score * WEIGHTS.liquidity
            + self.governance_score * WEIGHTS.governance
            + self.minimum_score * WEIGHTS.minimum;
        clamp_score(round_one_decimal(raw))
    }
}

/// A fund with its derived score. Recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredFund<'a> {
    pub fund: &'a Fund,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub is_complete: bool,
    pub why_included: String,
}

/// Score a single fund. Never fails: missing fields fall back to neutral values.
pub fn calculate_fund_score(fund: &Fund) -> ScoredFund<'_> {
    let breakdown = ScoreBreakdown::compute(fund);
    let score = breakdown.composite();
    let is_complete = is_complete(fund);
    let why_included = generate_why_included(fund, &breakdown);

    trace!(
        fund = %fund.id,
        score,
        fee = breakdown.fee_score,
        liquidity = breakdown.liquidity_score,
        governance = breakdown.governance_score,
        minimum = breakdown.minimum_score,
        is_complete,
        "scored fund"
    );

    ScoredFund {
        fund,
        score,
        breakdown,
        is_complete,
        why_included,
    }
}

/// Score every fund, preserving input order.
pub fn score_funds(funds: &[Fund]) -> Vec<ScoredFund<'_>> {
    funds.iter().map(calculate_fund_score).collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fund() -> Fund {
        Fund {
            id: "alpha".to_string(),
            name: "Alpha Fund".to_string(),
            category: Some("Debt".to_string()),
            description: Some("Senior secured lending.".to_string()),
            management_fee: Some(1.0),
            minimum_investment: Some(400_000.0),
            term: Some(3.0),
            cmvm_id: Some("1789".to_string()),
            redemption_terms: crate::fund::RedemptionTerms {
                frequency: "weekly".to_string(),
                minimum_holding_period: None,
            },
            ..Fund::default()
        }
    }

    #[test]
    fn test_breakdown_values() {
        let fund = sample_fund();
        let result = calculate_fund_score(&fund);
        assert!((result.breakdown.fee_score - 80.0).abs() < 1e-9);
        assert!((result.breakdown.liquidity_score - 77.0).abs() < 1e-9);
        assert!((result.breakdown.governance_score - 20.0).abs() < 1e-9);
        assert_eq!(result.breakdown.minimum_score, 100.0);
        assert!(result.is_complete);
    }

    #[test]
    fn test_composite_is_weighted_and_rounded() {
        let breakdown = ScoreBreakdown {
            fee_score: 100.0,
            liquidity_score: 50.0,
            governance_score: 33.3,
            minimum_score: 0.0,
        };
        // 35 + 17.5 + 6.66 + 0 = 59.16 -> 59.2
        assert!((breakdown.composite() - 59.2).abs() < 1e-9);
    }

    #[test]
    fn test_empty_fund_scores_neutral_and_bounded() {
        let fund = Fund::default();
        let result = calculate_fund_score(&fund);
        // fee 50, liquidity 50, governance 0, minimum 50
        assert!((result.score - 40.0).abs() < 1e-9);
        assert!(!result.is_complete);
    }

    #[test]
    fn test_score_bounds_for_extremes() {
        let cheap = Fund {
            management_fee: Some(0.0),
            performance_fee: Some(0.0),
            term: Some(0.0),
            minimum_investment: Some(1.0),
            redemption_terms: crate::fund::RedemptionTerms {
                frequency: "daily".to_string(),
                minimum_holding_period: None,
            },
            ..Fund::default()
        };
        let pricey = Fund {
            management_fee: Some(40.0),
            performance_fee: Some(90.0),
            term: Some(30.0),
            minimum_investment: Some(50_000_000.0),
            ..Fund::default()
        };
        for fund in [&cheap, &pricey, &sample_fund()] {
            let result = calculate_fund_score(fund);
            assert!(result.score >= 0.0 && result.score <= 100.0);
            for which in [
                SubScore::Fee,
                SubScore::Liquidity,
                SubScore::Governance,
                SubScore::Minimum,
            ] {
                let value = result.breakdown.get(which);
                assert!((0.0..=100.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let fund = sample_fund();
        let first = calculate_fund_score(&fund);
        let second = calculate_fund_score(&fund);
        assert_eq!(first.score.to_bits(), second.score.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_funds_preserves_order() {
        let mut other = sample_fund();
        other.id = "beta".to_string();
        let funds = vec![sample_fund(), other];
        let scored = score_funds(&funds);
        assert_eq!(scored[0].fund.id, "alpha");
        assert_eq!(scored[1].fund.id, "beta");
    }
}
