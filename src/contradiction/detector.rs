use tracing::debug;

use super::rules::{rules, ContradictionRule};
use super::types::{Contradiction, ContradictionResult, Location};
use crate::fund::Fund;

/// Characters of context kept on each side of a match in `conflicting_text`.
pub const EXCERPT_CONTEXT_CHARS: usize = 40;

/// Check one fund's copy and tags against its structured data.
///
/// Text rules run over `description` then `detailedDescription`, each in rule
/// table order; tag rules run once afterwards. Each text rule reports at most
/// one contradiction per text field.
pub fn detect_fund_contradictions(fund: &Fund) -> ContradictionResult {
    let mut contradictions = Vec::new();
    contradictions.extend(check_text(
        fund,
        fund.description.as_deref(),
        Location::Description,
    ));
    contradictions.extend(check_text(
        fund,
        fund.detailed_description.as_deref(),
        Location::DetailedDescription,
    ));
    contradictions.extend(check_tags(fund));

    let result = ContradictionResult::new(fund.id.clone(), contradictions);
    debug!(
        fund = %fund.id,
        errors = result.error_count,
        warnings = result.warning_count,
        "checked fund copy"
    );
    result
}

/// Run the detector over a batch, preserving input order.
pub fn detect_all(funds: &[Fund]) -> Vec<ContradictionResult> {
    funds.iter().map(detect_fund_contradictions).collect()
}

fn check_text(fund: &Fund, text: Option<&str>, location: Location) -> Vec<Contradiction> {
    let Some(text) = text else {
        return Vec::new();
    };

    rules()
        .iter()
        .filter(|rule| rule.is_text_rule() && (rule.applies_to)(fund))
        .filter_map(|rule| {
            let (start, end) = rule.first_match(text)?;
            Some(build(rule, fund, excerpt(text, start, end), location))
        })
        .collect()
}

fn check_tags(fund: &Fund) -> Vec<Contradiction> {
    rules()
        .iter()
        .filter(|rule| !rule.is_text_rule() && (rule.applies_to)(fund))
        .map(|rule| {
            let claim = rule
                .claim_tag
                .map(|tag| fund.find_tag(tag).unwrap_or(tag).to_string())
                .unwrap_or_default();
            build(rule, fund, claim, Location::AutoGenerated)
        })
        .collect()
}

fn build(
    rule: &ContradictionRule,
    fund: &Fund,
    conflicting_text: String,
    location: Location,
) -> Contradiction {
    Contradiction {
        rule: rule.id.as_str(),
        field: rule.field,
        structured_value: (rule.structured_value)(fund),
        conflicting_text,
        location,
        severity: rule.severity,
        message: (rule.message)(fund),
    }
}

/// Cut the match out of `text` with some surrounding context, on char boundaries.
fn excerpt(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(EXCERPT_CONTEXT_CHARS)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);
    let to = text[end..]
        .char_indices()
        .nth(EXCERPT_CONTEXT_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    let mut out = String::new();
    if from > 0 {
        out.push('…');
    }
    out.push_str(text[from..to].trim());
    if to < text.len() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contradiction::types::Severity;
    use crate::fund::RedemptionTerms;

    fn sample_fund(description: &str, frequency: &str, holding: Option<u32>) -> Fund {
        Fund {
            id: "fund-1".to_string(),
            name: "Sample Fund".to_string(),
            description: Some(description.to_string()),
            redemption_terms: RedemptionTerms {
                frequency: frequency.to_string(),
                minimum_holding_period: holding,
            },
            ..Fund::default()
        }
    }

    #[test]
    fn test_daily_liquidity_vs_quarterly() {
        let fund = sample_fund("Investors enjoy daily liquidity.", "quarterly", None);
        let result = detect_fund_contradictions(&fund);
        assert_eq!(result.contradictions.len(), 1);
        assert_eq!(result.error_count, 1);
        let c = &result.contradictions[0];
        assert_eq!(c.field, "redemptionTerms.frequency");
        assert_eq!(c.severity, Severity::Error);
        assert_eq!(c.location, Location::Description);
        assert_eq!(c.structured_value, "quarterly");
        assert_eq!(c.conflicting_text, "Investors enjoy daily liquidity.");
    }

    #[test]
    fn test_daily_liquidity_with_daily_frequency_is_fine() {
        let fund = sample_fund("Investors enjoy daily liquidity.", "Daily", None);
        assert!(!detect_fund_contradictions(&fund).has_contradictions);
    }

    #[test]
    fn test_unknown_frequency_is_not_contradicted() {
        let fund = sample_fund("Investors enjoy daily liquidity.", "", None);
        assert!(!detect_fund_contradictions(&fund).has_contradictions);
    }

    #[test]
    fn test_no_lock_up_vs_holding_period() {
        let fund = sample_fund("There is no lock-up on your investment.", "monthly", Some(12));
        let result = detect_fund_contradictions(&fund);
        assert_eq!(result.error_count, 1);
        let c = &result.contradictions[0];
        assert_eq!(c.field, "redemptionTerms.minimumHoldingPeriod");
        assert!(c.message.contains("12 months"));
    }

    #[test]
    fn test_weekly_claim_vs_monthly() {
        let fund = sample_fund("Weekly redemptions available.", "monthly", None);
        let result = detect_fund_contradictions(&fund);
        assert_eq!(result.contradictions.len(), 1);
        assert_eq!(result.contradictions[0].rule, "weekly-liquidity-claim");

        let daily = sample_fund("Weekly redemptions available.", "daily", None);
        assert!(!detect_fund_contradictions(&daily).has_contradictions);
    }

    #[test]
    fn test_overlapping_patterns_count_once_per_field() {
        let fund = sample_fund(
            "No lock-up, instant liquidity and immediate liquidity for all.",
            "monthly",
            Some(6),
        );
        let result = detect_fund_contradictions(&fund);
        assert_eq!(result.contradictions.len(), 1);
    }

    #[test]
    fn test_each_text_field_scanned_independently() {
        let mut fund = sample_fund("No management fees.", "monthly", None);
        fund.detailed_description = Some("We charge no management fee at all.".to_string());
        fund.management_fee = Some(1.5);
        let result = detect_fund_contradictions(&fund);
        assert_eq!(result.contradictions.len(), 2);
        assert_eq!(result.contradictions[0].location, Location::Description);
        assert_eq!(
            result.contradictions[1].location,
            Location::DetailedDescription
        );
        assert_eq!(result.contradictions[0].structured_value, "1.5%");
    }

    #[test]
    fn test_missing_text_fields_yield_nothing() {
        let mut fund = sample_fund("", "quarterly", Some(12));
        fund.description = None;
        fund.management_fee = Some(2.0);
        assert!(!detect_fund_contradictions(&fund).has_contradictions);
    }

    #[test]
    fn test_performance_fee_claim() {
        let mut fund = sample_fund("Zero performance fees.", "monthly", None);
        fund.performance_fee = Some(20.0);
        let result = detect_fund_contradictions(&fund);
        assert_eq!(result.contradictions.len(), 1);
        assert_eq!(result.contradictions[0].field, "performanceFee");

        fund.performance_fee = Some(0.0);
        assert!(!detect_fund_contradictions(&fund).has_contradictions);
    }

    #[test]
    fn test_open_ended_claim_vs_closed_tag() {
        let mut fund = sample_fund("An open-ended fund.", "monthly", None);
        fund.tags.insert("Closed-end Fund".to_string());
        let result = detect_fund_contradictions(&fund);
        assert_eq!(result.contradictions.len(), 1);
        assert_eq!(result.contradictions[0].field, "tags");
        assert_eq!(result.contradictions[0].structured_value, "Closed-end Fund");
    }

    #[test]
    fn test_closed_end_claim_vs_open_tag() {
        let mut fund = sample_fund("This closed-end vehicle", "monthly", None);
        fund.tags.insert("Open Ended".to_string());
        let result = detect_fund_contradictions(&fund);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.contradictions[0].rule, "closed-end-claim");
    }

    #[test]
    fn test_tag_rules_are_warnings_without_text() {
        let mut fund = sample_fund("", "quarterly", Some(12));
        fund.description = None;
        fund.tags.insert("No Lock-Up".to_string());
        fund.tags.insert("Daily NAV".to_string());
        let result = detect_fund_contradictions(&fund);
        assert_eq!(result.warning_count, 2);
        assert_eq!(result.error_count, 0);
        assert!(result
            .contradictions
            .iter()
            .all(|c| c.location == Location::AutoGenerated));
        // Rule table order: lock-up tag before daily NAV tag.
        assert_eq!(result.contradictions[0].rule, "no-lock-up-tag");
        assert_eq!(result.contradictions[0].conflicting_text, "No Lock-Up");
        assert_eq!(result.contradictions[1].rule, "daily-nav-tag");
    }

    #[test]
    fn test_text_then_tags_ordering() {
        let mut fund = sample_fund("Daily liquidity and no lock-up.", "quarterly", Some(12));
        fund.tags.insert("No Lock-Up".to_string());
        let result = detect_fund_contradictions(&fund);
        let rules: Vec<_> = result.contradictions.iter().map(|c| c.rule).collect();
        assert_eq!(
            rules,
            vec!["daily-liquidity-claim", "no-lock-up-claim", "no-lock-up-tag"]
        );
        assert_eq!(result.error_count, 2);
        assert_eq!(result.warning_count, 1);
    }

    #[test]
    fn test_detect_all_preserves_order() {
        let a = sample_fund("Daily liquidity", "quarterly", None);
        let mut b = sample_fund("Nothing to see", "quarterly", None);
        b.id = "fund-2".to_string();
        let results = detect_all(&[a, b]);
        assert_eq!(results[0].fund_id, "fund-1");
        assert!(results[0].has_contradictions);
        assert!(!results[1].has_contradictions);
    }

    #[test]
    fn test_excerpt_trims_long_text() {
        let prefix = "x".repeat(100);
        let suffix = "y".repeat(100);
        let text = format!("{} daily liquidity {}", prefix, suffix);
        let start = text.find("daily").unwrap();
        let end = start + "daily liquidity".len();
        let out = excerpt(&text, start, end);
        assert!(out.starts_with('…'));
        assert!(out.ends_with('…'));
        assert!(out.contains("daily liquidity"));
        assert!(out.chars().count() <= "daily liquidity".len() + 2 * EXCERPT_CONTEXT_CHARS + 2);
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let text = "Ações com liquidez diária — daily liquidity garantida ✓";
        let start = text.find("daily").unwrap();
        let end = start + "daily liquidity".len();
        let out = excerpt(text, start, end);
        assert!(out.contains("daily liquidity"));
    }
}
