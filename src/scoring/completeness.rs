use crate::fund::Fund;

/// Largest number of core disclosure fields a fund may lack and still be ranked.
pub const MAX_MISSING_CORE_FIELDS: usize = 1;

/// Names of the core fields this fund is missing, in a fixed order.
pub fn missing_core_fields(fund: &Fund) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if fund.management_fee.is_none() {
        missing.push("managementFee");
    }
    if fund.minimum_investment.is_none() {
        missing.push("minimumInvestment");
    }
    if !fund.has_category() {
        missing.push("category");
    }
    if !fund.has_description() {
        missing.push("description");
    }
    missing
}

/// Completeness Gate: a fund may be ranked when it lacks at most one of
/// management fee, minimum investment, category and description.
pub fn is_complete(fund: &Fund) -> bool {
    missing_core_fields(fund).len() <= MAX_MISSING_CORE_FIELDS
}
