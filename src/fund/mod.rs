pub mod load;
pub mod types;

pub use load::load_funds;
pub use types::{has_text, Fund, RedemptionTerms};
