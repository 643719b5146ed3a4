use crate::fund::{has_text, Fund};

// Business-owned tuning parameters. These encode product judgment; change them
// only with sign-off from whoever owns the ranking policy.

/// Combined fee (percent) at which the fee score reaches zero.
pub const FEE_CEILING_PCT: f64 = 5.0;
/// Share of profits assumed to be captured when a performance fee applies.
pub const PERFORMANCE_CAPTURE_FACTOR: f64 = 50.0;
/// Discount applied to performance fees because they are conditional.
pub const PERFORMANCE_FEE_DIVISOR: f64 = 10.0;
/// Minimum investment at or below which the minimum score is 100.
pub const STANDARD_MINIMUM_EUR: f64 = 500_000.0;
/// Points lost per `MINIMUM_PENALTY_STEP_EUR` above the standard minimum.
pub const MINIMUM_PENALTY_POINTS: f64 = 10.0;
pub const MINIMUM_PENALTY_STEP_EUR: f64 = 100_000.0;
/// Liquidity base for a zero-year term; decays linearly to 0 at `TERM_HORIZON_YEARS`.
pub const TERM_BASE_MAX: f64 = 60.0;
pub const TERM_HORIZON_YEARS: f64 = 10.0;
/// Detailed descriptions longer than this count as a disclosure signal.
pub const DETAILED_DESCRIPTION_MIN_CHARS: usize = 200;

/// Neutral contribution for data we do not have. Unknown is not penalized.
pub const NEUTRAL_SCORE: f64 = 50.0;

const GOVERNANCE_SCALE: f64 = 10.0;

/// Normalized redemption frequency.
///
/// Variants are declared from most to least liquid, so `Ord` ranks them:
/// `Daily < Weekly < ... < EndOfTerm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RedemptionFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
    EndOfTerm,
    Unrecognized,
}

impl RedemptionFrequency {
    /// Parse a free-form frequency. Blank values mean redemption only at the end of term.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "daily" => RedemptionFrequency::Daily,
            "weekly" => RedemptionFrequency::Weekly,
            "monthly" => RedemptionFrequency::Monthly,
            "quarterly" => RedemptionFrequency::Quarterly,
            "annual" | "annually" | "yearly" => RedemptionFrequency::Annual,
            "" | "end of term" | "end-of-term" | "at maturity" => RedemptionFrequency::EndOfTerm,
            _ => RedemptionFrequency::Unrecognized,
        }
    }

    pub fn of(fund: &Fund) -> Self {
        Self::parse(&fund.redemption_terms.frequency)
    }

    /// Liquidity bonus points for this bucket.
    pub fn bonus(&self) -> f64 {
        match self {
            RedemptionFrequency::Daily => 40.0,
            RedemptionFrequency::Weekly => 35.0,
            RedemptionFrequency::Monthly => 30.0,
            RedemptionFrequency::Quarterly => 20.0,
            RedemptionFrequency::Annual => 10.0,
            RedemptionFrequency::EndOfTerm => 0.0,
            RedemptionFrequency::Unrecognized => 15.0,
        }
    }

    /// True when redemptions happen at least as often as `other`.
    /// Unrecognized values are never considered at least as frequent as anything.
    pub fn at_least_as_frequent_as(&self, other: RedemptionFrequency) -> bool {
        *self != RedemptionFrequency::Unrecognized && *self <= other
    }

    pub fn label(&self) -> &'static str {
        match self {
            RedemptionFrequency::Daily => "daily",
            RedemptionFrequency::Weekly => "weekly",
            RedemptionFrequency::Monthly => "monthly",
            RedemptionFrequency::Quarterly => "quarterly",
            RedemptionFrequency::Annual => "annual",
            RedemptionFrequency::EndOfTerm => "end of term",
            RedemptionFrequency::Unrecognized => "other",
        }
    }
}

/// Effective combined fee in percent, or `None` when neither fee is known.
pub fn combined_fee(fund: &Fund) -> Option<f64> {
    if fund.management_fee.is_none() && fund.performance_fee.is_none() {
        return None;
    }
    let management = fund.management_fee.unwrap_or(0.0);
    let performance = fund.performance_fee.unwrap_or(0.0);
    let performance_drag =
        (performance / 100.0 * PERFORMANCE_CAPTURE_FACTOR) / PERFORMANCE_FEE_DIVISOR;
    Some(management + performance_drag)
}

/// Fee score against a fixed 5% combined ceiling.
pub fn fee_score(fund: &Fund) -> f64 {
    match combined_fee(fund) {
        None => NEUTRAL_SCORE,
        Some(combined) => clamp_score(100.0 - (combined / FEE_CEILING_PCT) * 100.0),
    }
}

/// Liquidity from term length plus a redemption-frequency bonus.
pub fn liquidity_score(fund: &Fund) -> f64 {
    let base = match fund.term {
        None => NEUTRAL_SCORE,
        Some(years) => {
            let remaining = (1.0 - years / TERM_HORIZON_YEARS).clamp(0.0, 1.0);
            TERM_BASE_MAX * remaining
        }
    };
    let bonus = RedemptionFrequency::of(fund).bonus();
    clamp_score(base + bonus)
}

/// One disclosure signal: label plus weight on the 10-point scale.
#[derive(Clone, Copy)]
pub struct GovernanceSignal {
    pub label: &'static str,
    pub points: f64,
    pub present: fn(&Fund) -> bool,
}

pub const GOVERNANCE_SIGNALS: [GovernanceSignal; 9] = [
    GovernanceSignal {
        label: "CMVM registration",
        points: 2.0,
        present: |f: &Fund| has_text(&f.cmvm_id),
    },
    GovernanceSignal {
        label: "auditor",
        points: 1.5,
        present: |f: &Fund| has_text(&f.auditor),
    },
    GovernanceSignal {
        label: "custodian",
        points: 1.5,
        present: |f: &Fund| has_text(&f.custodian),
    },
    GovernanceSignal {
        label: "NAV frequency",
        points: 1.0,
        present: |f: &Fund| has_text(&f.nav_frequency),
    },
    GovernanceSignal {
        label: "ISIN",
        points: 1.0,
        present: |f: &Fund| has_text(&f.isin),
    },
    GovernanceSignal {
        label: "detailed description",
        points: 1.0,
        present: |f: &Fund| {
            f.detailed_description
                .as_deref()
                .is_some_and(|d| d.chars().count() > DETAILED_DESCRIPTION_MIN_CHARS)
        },
    },
    GovernanceSignal {
        label: "FAQs",
        points: 0.5,
        present: |f: &Fund| !f.faqs.is_empty(),
    },
    GovernanceSignal {
        label: "documents",
        points: 0.5,
        present: |f: &Fund| !f.documents.is_empty(),
    },
    GovernanceSignal {
        label: "website",
        points: 0.5,
        present: |f: &Fund| has_text(&f.website_url),
    },
];

/// Labels of the disclosure signals this fund provides, in table order.
pub fn governance_signals_present(fund: &Fund) -> Vec<&'static str> {
    GOVERNANCE_SIGNALS
        .iter()
        .filter(|signal| (signal.present)(fund))
        .map(|signal| signal.label)
        .collect()
}

/// Presence points across the disclosure signals, as a percentage.
pub fn governance_score(fund: &Fund) -> f64 {
    let points: f64 = GOVERNANCE_SIGNALS
        .iter()
        .filter(|signal| (signal.present)(fund))
        .map(|signal| signal.points)
        .sum();
    clamp_score(points / GOVERNANCE_SCALE * 100.0)
}

/// Accessibility of the minimum ticket. Excess above the standard threshold
/// is penalized linearly.
pub fn minimum_score(fund: &Fund) -> f64 {
    match fund.minimum_investment {
        None => NEUTRAL_SCORE,
        Some(amount) if amount <= STANDARD_MINIMUM_EUR => 100.0,
        Some(amount) => {
            let excess = amount - STANDARD_MINIMUM_EUR;
            clamp_score(100.0 - (excess / MINIMUM_PENALTY_STEP_EUR) * MINIMUM_PENALTY_POINTS)
        }
    }
}

/// Clamp into [0, 100]. Non-finite inputs (e.g. NaN fees) collapse to 0.
pub fn clamp_score(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}
