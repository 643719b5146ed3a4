pub mod detector;
pub mod rules;
pub mod summary;
pub mod types;

pub use detector::{detect_all, detect_fund_contradictions};
pub use rules::{rules, ContradictionRule, RuleId, TEXT_PATTERNS};
pub use summary::get_contradiction_summary;
pub use types::{Contradiction, ContradictionResult, Location, Severity};
