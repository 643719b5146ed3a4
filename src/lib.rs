//! Fund ranking and data-integrity engine.
//!
//! Scores fund snapshots on fees, liquidity, governance disclosure and minimum
//! investment, groups them into thematic shortlists, and checks marketing copy
//! for claims that contradict the structured fund data. The core is pure: no
//! I/O, clock or randomness outside `config` and `fund::load`.

pub mod cluster;
pub mod config;
pub mod contradiction;
pub mod explain;
pub mod fund;
pub mod output;
pub mod scoring;

pub use cluster::{get_best_funds_by_category, get_sorted_best_funds, FundCluster};
pub use contradiction::{detect_fund_contradictions, get_contradiction_summary, ContradictionResult};
pub use fund::Fund;
pub use scoring::{calculate_fund_score, ScoreBreakdown, ScoredFund};
