use crate::explain;
use crate::fund::Fund;
use crate::scoring::factors::RedemptionFrequency;
use crate::scoring::{ScoredFund, SubScore};

/// A named thematic shortlist.
///
/// `qualifies` filters the scored, complete population; members are then
/// re-sorted by `dominant` rather than the composite score, and `why` replaces
/// the generic justification with one built from cluster-relevant fields.
#[derive(Clone, Copy)]
pub struct ClusterDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub dominant: SubScore,
    pub qualifies: fn(&ScoredFund) -> bool,
    pub why: fn(&Fund) -> String,
}

/// Category keywords that mark a fund as capital-preserving.
pub const PRESERVATION_CATEGORY_KEYWORDS: &[&str] = &["debt", "infrastructure"];
/// Category keywords that mark a fund as growth-oriented.
pub const GROWTH_CATEGORY_KEYWORDS: &[&str] =
    &["equity", "venture", "growth", "technology", "startup"];
/// Risk bands that mark a fund as growth-oriented.
pub const GROWTH_RISK_BANDS: &[&str] = &["aggressive", "growth", "high"];
/// Governance score a fund needs to enter the transparency shortlist.
pub const TRANSPARENCY_MIN_GOVERNANCE: f64 = 50.0;

pub const CLUSTERS: [ClusterDefinition; 5] = [
    ClusterDefinition {
        id: "lowest-fees",
        title: "Lowest Fees",
        description: "Funds with the lowest combined management and performance fees.",
        dominant: SubScore::Fee,
        qualifies: has_disclosed_fees,
        why: explain::why_low_fees,
    },
    ClusterDefinition {
        id: "flexible-liquidity",
        title: "Flexible Liquidity",
        description: "Funds that let you redeem at least monthly.",
        dominant: SubScore::Liquidity,
        qualifies: redeems_at_least_monthly,
        why: explain::why_flexible_liquidity,
    },
    ClusterDefinition {
        id: "capital-preservation",
        title: "Capital Preservation",
        description: "Debt, infrastructure and conservative funds focused on protecting capital.",
        dominant: SubScore::Governance,
        qualifies: preserves_capital,
        why: explain::why_capital_preservation,
    },
    ClusterDefinition {
        id: "growth-exposure",
        title: "Growth Exposure",
        description: "Equity and venture strategies aiming for capital growth.",
        dominant: SubScore::Fee,
        qualifies: seeks_growth,
        why: explain::why_growth_exposure,
    },
    ClusterDefinition {
        id: "highest-transparency",
        title: "Highest Transparency",
        description: "Funds with the most complete regulatory and governance disclosure.",
        dominant: SubScore::Governance,
        qualifies: is_transparent,
        why: explain::why_transparency,
    },
];

fn has_disclosed_fees(scored: &ScoredFund) -> bool {
    scored.fund.management_fee.is_some()
}

fn redeems_at_least_monthly(scored: &ScoredFund) -> bool {
    RedemptionFrequency::of(scored.fund).at_least_as_frequent_as(RedemptionFrequency::Monthly)
}

fn preserves_capital(scored: &ScoredFund) -> bool {
    let category = scored.fund.category_lower();
    PRESERVATION_CATEGORY_KEYWORDS
        .iter()
        .any(|keyword| category.contains(keyword))
        || scored.fund.risk_band_lower() == "conservative"
}

fn seeks_growth(scored: &ScoredFund) -> bool {
    let category = scored.fund.category_lower();
    let risk_band = scored.fund.risk_band_lower();
    GROWTH_CATEGORY_KEYWORDS
        .iter()
        .any(|keyword| category.contains(keyword))
        || GROWTH_RISK_BANDS.contains(&risk_band.as_str())
}

fn is_transparent(scored: &ScoredFund) -> bool {
    scored.breakdown.governance_score >= TRANSPARENCY_MIN_GOVERNANCE
}
