use once_cell::sync::Lazy;
use regex::Regex;

use super::types::Severity;
use crate::fund::Fund;
use crate::scoring::factors::RedemptionFrequency;

pub const FIELD_FREQUENCY: &str = "redemptionTerms.frequency";
pub const FIELD_HOLDING_PERIOD: &str = "redemptionTerms.minimumHoldingPeriod";
pub const FIELD_MANAGEMENT_FEE: &str = "managementFee";
pub const FIELD_PERFORMANCE_FEE: &str = "performanceFee";
pub const FIELD_TAGS: &str = "tags";

pub const TAG_CLOSED_END: &str = "Closed-end Fund";
pub const TAG_OPEN_ENDED: &str = "Open Ended";
pub const TAG_NO_LOCK_UP: &str = "No Lock-Up";
pub const TAG_DAILY_NAV: &str = "Daily NAV";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    DailyLiquidityClaim,
    WeeklyLiquidityClaim,
    NoLockUpClaim,
    NoManagementFeeClaim,
    NoPerformanceFeeClaim,
    OpenEndedClaim,
    ClosedEndClaim,
    NoLockUpTag,
    DailyNavTag,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::DailyLiquidityClaim => "daily-liquidity-claim",
            RuleId::WeeklyLiquidityClaim => "weekly-liquidity-claim",
            RuleId::NoLockUpClaim => "no-lock-up-claim",
            RuleId::NoManagementFeeClaim => "no-management-fee-claim",
            RuleId::NoPerformanceFeeClaim => "no-performance-fee-claim",
            RuleId::OpenEndedClaim => "open-ended-claim",
            RuleId::ClosedEndClaim => "closed-end-claim",
            RuleId::NoLockUpTag => "no-lock-up-tag",
            RuleId::DailyNavTag => "daily-nav-tag",
        }
    }
}

/// Free-text claim patterns, keyed by the rule they feed. Within a rule the
/// first pattern that matches wins.
pub const TEXT_PATTERNS: &[(RuleId, &str)] = &[
    (RuleId::DailyLiquidityClaim, r"(?i)\bdaily\s+liquidity\b"),
    (RuleId::DailyLiquidityClaim, r"(?i)\bdaily\s+redemptions?\b"),
    (RuleId::DailyLiquidityClaim, r"(?i)\bredeem(?:able)?\s+daily\b"),
    (RuleId::DailyLiquidityClaim, r"(?i)\bliquidity\s+on\s+a\s+daily\s+basis\b"),
    (RuleId::WeeklyLiquidityClaim, r"(?i)\bweekly\s+liquidity\b"),
    (RuleId::WeeklyLiquidityClaim, r"(?i)\bweekly\s+redemptions?\b"),
    (RuleId::WeeklyLiquidityClaim, r"(?i)\bredeem(?:able)?\s+weekly\b"),
    (RuleId::NoLockUpClaim, r"(?i)\bno\s+lock[\s-]?ups?\b"),
    (RuleId::NoLockUpClaim, r"(?i)\bwithout\s+(?:a\s+|any\s+)?lock[\s-]?ups?\b"),
    (RuleId::NoLockUpClaim, r"(?i)\block[\s-]?up[\s-]free\b"),
    (RuleId::NoLockUpClaim, r"(?i)\binstant\s+liquidity\b"),
    (RuleId::NoLockUpClaim, r"(?i)\bimmediate\s+liquidity\b"),
    (RuleId::NoManagementFeeClaim, r"(?i)\bno\s+management\s+fees?\b"),
    (RuleId::NoManagementFeeClaim, r"(?i)\bzero\s+management\s+fees?\b"),
    (RuleId::NoManagementFeeClaim, r"(?i)\b0\s?%\s+management\s+fees?\b"),
    (RuleId::NoPerformanceFeeClaim, r"(?i)\bno\s+performance\s+fees?\b"),
    (RuleId::NoPerformanceFeeClaim, r"(?i)\bzero\s+performance\s+fees?\b"),
    (RuleId::NoPerformanceFeeClaim, r"(?i)\b0\s?%\s+performance\s+fees?\b"),
    (RuleId::OpenEndedClaim, r"(?i)\bopen[\s-]?ended\b"),
    (RuleId::OpenEndedClaim, r"(?i)\bopen[\s-]end\s+fund\b"),
    (RuleId::ClosedEndClaim, r"(?i)\bclosed[\s-]?end(?:ed)?\b"),
];

/// One row of the rule table.
///
/// Rules with patterns compare free text against structured data. Rules
/// without patterns compare tags against structured data and fire whenever
/// `applies_to` holds.
pub struct ContradictionRule {
    pub id: RuleId,
    pub field: &'static str,
    pub severity: Severity,
    /// True when the structured data contradicts this rule's kind of claim.
    pub applies_to: fn(&Fund) -> bool,
    pub structured_value: fn(&Fund) -> String,
    pub message: fn(&Fund) -> String,
    /// Tag that carries the claim, for tag rules.
    pub claim_tag: Option<&'static str>,
    pub patterns: Vec<Regex>,
}

impl ContradictionRule {
    pub fn is_text_rule(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// First pattern match in `text`, as a byte range.
    pub fn first_match(&self, text: &str) -> Option<(usize, usize)> {
        self.patterns
            .iter()
            .find_map(|re| re.find(text))
            .map(|m| (m.start(), m.end()))
    }
}

impl std::fmt::Debug for ContradictionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContradictionRule")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("severity", &self.severity)
            .field("patterns", &self.patterns.len())
            .finish()
    }
}

static RULES: Lazy<Vec<ContradictionRule>> = Lazy::new(build_rules);

/// The rule table, in evaluation order.
pub fn rules() -> &'static [ContradictionRule] {
    &RULES
}

pub fn rule(id: RuleId) -> Option<&'static ContradictionRule> {
    rules().iter().find(|r| r.id == id)
}

fn compile_patterns(id: RuleId) -> Vec<Regex> {
    TEXT_PATTERNS
        .iter()
        .filter(|(rule_id, _)| *rule_id == id)
        .map(|(_, pattern)| Regex::new(pattern).expect("claim pattern regex"))
        .collect()
}

fn frequency_is_known(fund: &Fund) -> bool {
    !fund.redemption_terms.frequency.trim().is_empty()
}

fn frequency_value(fund: &Fund) -> String {
    fund.redemption_terms.frequency.trim().to_string()
}

fn holding_period_value(fund: &Fund) -> String {
    format!(
        "{} months",
        fund.redemption_terms.minimum_holding_period.unwrap_or(0)
    )
}

fn positive(fee: Option<f64>) -> bool {
    fee.is_some_and(|f| f > 0.0)
}

fn build_rules() -> Vec<ContradictionRule> {
    let table = vec![
        ContradictionRule {
            id: RuleId::DailyLiquidityClaim,
            field: FIELD_FREQUENCY,
            severity: Severity::Error,
            applies_to: |f: &Fund| {
                frequency_is_known(f) && RedemptionFrequency::of(f) != RedemptionFrequency::Daily
            },
            structured_value: frequency_value,
            message: |f: &Fund| {
                format!(
                    "Text claims daily liquidity but redemption frequency is {}",
                    frequency_value(f)
                )
            },
            claim_tag: None,
            patterns: compile_patterns(RuleId::DailyLiquidityClaim),
        },
        ContradictionRule {
            id: RuleId::WeeklyLiquidityClaim,
            field: FIELD_FREQUENCY,
            severity: Severity::Error,
            applies_to: |f: &Fund| {
                frequency_is_known(f)
                    && !RedemptionFrequency::of(f)
                        .at_least_as_frequent_as(RedemptionFrequency::Weekly)
            },
            structured_value: frequency_value,
            message: |f: &Fund| {
                format!(
                    "Text claims weekly liquidity but redemption frequency is {}",
                    frequency_value(f)
                )
            },
            claim_tag: None,
            patterns: compile_patterns(RuleId::WeeklyLiquidityClaim),
        },
        ContradictionRule {
            id: RuleId::NoLockUpClaim,
            field: FIELD_HOLDING_PERIOD,
            severity: Severity::Error,
            applies_to: |f: &Fund| f.lock_up_months().is_some(),
            structured_value: holding_period_value,
            message: |f: &Fund| {
                format!(
                    "Text claims no lock-up but minimum holding period is {}",
                    holding_period_value(f)
                )
            },
            claim_tag: None,
            patterns: compile_patterns(RuleId::NoLockUpClaim),
        },
        ContradictionRule {
            id: RuleId::NoManagementFeeClaim,
            field: FIELD_MANAGEMENT_FEE,
            severity: Severity::Error,
            applies_to: |f: &Fund| positive(f.management_fee),
            structured_value: |f: &Fund| format!("{}%", f.management_fee.unwrap_or(0.0)),
            message: |f: &Fund| {
                format!(
                    "Text claims no management fee but management fee is {}%",
                    f.management_fee.unwrap_or(0.0)
                )
            },
            claim_tag: None,
            patterns: compile_patterns(RuleId::NoManagementFeeClaim),
        },
        ContradictionRule {
            id: RuleId::NoPerformanceFeeClaim,
            field: FIELD_PERFORMANCE_FEE,
            severity: Severity::Error,
            applies_to: |f: &Fund| positive(f.performance_fee),
            structured_value: |f: &Fund| format!("{}%", f.performance_fee.unwrap_or(0.0)),
            message: |f: &Fund| {
                format!(
                    "Text claims no performance fee but performance fee is {}%",
                    f.performance_fee.unwrap_or(0.0)
                )
            },
            claim_tag: None,
            patterns: compile_patterns(RuleId::NoPerformanceFeeClaim),
        },
        ContradictionRule {
            id: RuleId::OpenEndedClaim,
            field: FIELD_TAGS,
            severity: Severity::Error,
            applies_to: |f: &Fund| f.has_tag(TAG_CLOSED_END),
            structured_value: |f: &Fund| {
                f.find_tag(TAG_CLOSED_END)
                    .unwrap_or(TAG_CLOSED_END)
                    .to_string()
            },
            message: |_: &Fund| {
                format!(
                    "Text describes the fund as open-ended but it is tagged \"{}\"",
                    TAG_CLOSED_END
                )
            },
            claim_tag: None,
            patterns: compile_patterns(RuleId::OpenEndedClaim),
        },
        ContradictionRule {
            id: RuleId::ClosedEndClaim,
            field: FIELD_TAGS,
            severity: Severity::Error,
            applies_to: |f: &Fund| f.has_tag(TAG_OPEN_ENDED),
            structured_value: |f: &Fund| {
                f.find_tag(TAG_OPEN_ENDED)
                    .unwrap_or(TAG_OPEN_ENDED)
                    .to_string()
            },
            message: |_: &Fund| {
                format!(
                    "Text describes the fund as closed-end but it is tagged \"{}\"",
                    TAG_OPEN_ENDED
                )
            },
            claim_tag: None,
            patterns: compile_patterns(RuleId::ClosedEndClaim),
        },
        ContradictionRule {
            id: RuleId::NoLockUpTag,
            field: FIELD_HOLDING_PERIOD,
            severity: Severity::Warning,
            applies_to: |f: &Fund| f.has_tag(TAG_NO_LOCK_UP) && f.lock_up_months().is_some(),
            structured_value: holding_period_value,
            message: |f: &Fund| {
                format!(
                    "Tagged \"{}\" but minimum holding period is {}",
                    TAG_NO_LOCK_UP,
                    holding_period_value(f)
                )
            },
            claim_tag: Some(TAG_NO_LOCK_UP),
            patterns: Vec::new(),
        },
        ContradictionRule {
            id: RuleId::DailyNavTag,
            field: FIELD_FREQUENCY,
            severity: Severity::Warning,
            applies_to: |f: &Fund| {
                f.has_tag(TAG_DAILY_NAV)
                    && frequency_is_known(f)
                    && RedemptionFrequency::of(f) != RedemptionFrequency::Daily
            },
            structured_value: frequency_value,
            message: |f: &Fund| {
                format!(
                    "Tagged \"{}\" but redemption frequency is {}",
                    TAG_DAILY_NAV,
                    frequency_value(f)
                )
            },
            claim_tag: Some(TAG_DAILY_NAV),
            patterns: Vec::new(),
        },
    ];

    tracing::debug!(
        rules = table.len(),
        patterns = TEXT_PATTERNS.len(),
        "compiled contradiction rules"
    );
    table
}
