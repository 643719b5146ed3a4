pub mod completeness;
pub mod engine;
pub mod factors;
pub mod weights;

pub use completeness::{is_complete, missing_core_fields};
pub use engine::{calculate_fund_score, score_funds, ScoreBreakdown, ScoredFund, SubScore};
pub use factors::{fee_score, governance_score, liquidity_score, minimum_score, RedemptionFrequency};
pub use weights::{ScoreWeights, WEIGHTS};
