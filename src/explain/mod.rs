//! Short human-readable justifications for rankings and cluster membership.
//!
//! Everything here is a pure function of its inputs.

use crate::fund::{has_text, Fund};
use crate::scoring::factors::{governance_signals_present, RedemptionFrequency, GOVERNANCE_SIGNALS};
use crate::scoring::ScoreBreakdown;

// Business-owned tuning parameters.

/// Sub-score at or above which a dimension is called out as a standout.
pub const STANDOUT_THRESHOLD: f64 = 80.0;
/// Fee + liquidity total above which the fallback calls the profile balanced.
pub const BALANCED_PROFILE_THRESHOLD: f64 = 140.0;

const MAX_REASONS: usize = 2;

/// Category keywords and the phrase used when a fund's category contains them.
pub const CATEGORY_PHRASES: &[(&str, &str)] = &[
    ("debt", "debt-focused strategy"),
    ("infrastructure", "infrastructure exposure"),
    ("real estate", "real estate exposure"),
    ("private equity", "private equity exposure"),
    ("venture", "venture capital exposure"),
];

/// Build the generic justification for a ranked fund.
///
/// Candidate phrases are checked in a fixed order and the first two that apply
/// are joined into one sentence. When none apply the fee + liquidity shape
/// decides between two fallback phrases.
pub fn generate_why_included(fund: &Fund, breakdown: &ScoreBreakdown) -> String {
    let mut reasons: Vec<&str> = Vec::new();

    if breakdown.fee_score >= STANDOUT_THRESHOLD {
        reasons.push("low combined fees");
    }
    if breakdown.liquidity_score >= STANDOUT_THRESHOLD {
        reasons.push("flexible liquidity");
    }
    if breakdown.governance_score >= STANDOUT_THRESHOLD {
        reasons.push("strong governance disclosure");
    }
    if breakdown.minimum_score >= STANDOUT_THRESHOLD {
        reasons.push("accessible minimum investment");
    }
    if fund.verified {
        reasons.push("verified fund data");
    }
    if has_text(&fund.cmvm_id) {
        reasons.push("CMVM-registered");
    }
    if let Some(phrase) = category_phrase(fund) {
        reasons.push(phrase);
    }

    if reasons.is_empty() {
        return if breakdown.fee_score + breakdown.liquidity_score > BALANCED_PROFILE_THRESHOLD {
            "Balanced fee and liquidity profile.".to_string()
        } else {
            "Strong overall profile.".to_string()
        };
    }

    sentence(&reasons[..reasons.len().min(MAX_REASONS)])
}

fn category_phrase(fund: &Fund) -> Option<&'static str> {
    let category = fund.category_lower();
    CATEGORY_PHRASES
        .iter()
        .find(|(keyword, _)| category.contains(keyword))
        .map(|(_, phrase)| *phrase)
}

/// Cluster reason: the fee terms that put the fund among the cheapest.
pub fn why_low_fees(fund: &Fund) -> String {
    let performance_fee = fund.performance_fee.filter(|fee| *fee > 0.0);
    match (fund.management_fee, performance_fee) {
        (Some(management), None) => {
            format!("Management fee of {}% with no performance fee.", management)
        }
        (Some(management), Some(performance)) => format!(
            "Management fee of {}% plus {}% performance fee.",
            management, performance
        ),
        (None, Some(performance)) => format!(
            "Performance fee of {}% with no disclosed management fee.",
            performance
        ),
        (None, None) => "Fee terms not disclosed.".to_string(),
    }
}

/// Cluster reason: redemption frequency and lock-up.
pub fn why_flexible_liquidity(fund: &Fund) -> String {
    let frequency = RedemptionFrequency::of(fund);
    let lead = capitalize(&format!("{} redemptions", frequency.label()));
    match fund.lock_up_months() {
        Some(months) => format!("{} after a {}-month minimum holding period.", lead, months),
        None => format!("{} with no minimum holding period.", lead),
    }
}

/// Cluster reason: why the fund qualifies as capital-preserving.
pub fn why_capital_preservation(fund: &Fund) -> String {
    let lead = if fund.risk_band_lower() == "conservative" {
        "Conservative risk band".to_string()
    } else {
        match fund.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => format!("{} strategy", category),
            _ => "Capital preservation mandate".to_string(),
        }
    };
    match fund.auditor.as_deref().map(str::trim) {
        Some(auditor) if !auditor.is_empty() => format!("{}, audited by {}.", lead, auditor),
        _ => format!("{}.", lead),
    }
}

/// Cluster reason: the growth strategy and its horizon.
pub fn why_growth_exposure(fund: &Fund) -> String {
    let lead = match fund.category.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() => format!("{} strategy", category),
        _ => "Growth strategy".to_string(),
    };
    match fund.term {
        Some(years) if years > 0.0 => format!("{}, {}-year term.", lead, years),
        _ => format!("{}.", lead),
    }
}

/// Cluster reason: which governance signals the fund discloses.
pub fn why_transparency(fund: &Fund) -> String {
    let present = governance_signals_present(fund);
    if present.is_empty() {
        return "No governance disclosures on file.".to_string();
    }
    let highlights = join_list(&present[..present.len().min(3)]);
    format!(
        "Discloses {} of {} governance signals, including {}.",
        present.len(),
        GOVERNANCE_SIGNALS.len(),
        highlights
    )
}

fn sentence(parts: &[&str]) -> String {
    format!("{}.", capitalize(&parts.join(" and ")))
}

fn join_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
