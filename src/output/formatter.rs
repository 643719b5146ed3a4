use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::cluster::FundCluster;
use crate::contradiction::{get_contradiction_summary, ContradictionResult, Severity};
use crate::scoring::factors::{combined_fee, RedemptionFrequency};
use crate::scoring::{missing_core_fields, ScoredFund};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with one decimal.
/// If the fund is incomplete, appends asterisk to mark it as unrankable
pub fn format_score(score: f64, is_complete: bool) -> String {
    if is_complete {
        format!("{:.1}", score)
    } else {
        format!("{:.1}*", score)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn category_of(scored: &ScoredFund) -> String {
    scored
        .fund
        .category
        .clone()
        .unwrap_or_else(|| "-".to_string())
}

/// Format funds as a ranked table with columns: Index, Score, Name, Category
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column is right-aligned, 6 chars wide (fits "100.0*")
pub fn format_ranked_table(funds: &[ScoredFund], use_colors: bool) -> String {
    if funds.is_empty() {
        return "No rankable funds found.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let score_width = 6;
    let separator = "  ";

    funds
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format_score(scored.score, scored.is_complete);
            let score_padded = format!("{:>width$}", score_str, width = score_width);
            let category = category_of(scored);

            let fixed_width =
                index_width + 1 + score_width + separator.len() * 2 + category.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&scored.fund.name, width - fixed_width)
                }
                Some(_) => truncate_name(&scored.fund.name, 20),
                None => scored.fund.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    name,
                    separator,
                    category.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, name, separator, category
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format funds as tab-separated values for scripting
/// Columns: score, id, name, why_included (no headers, no colors)
pub fn format_tsv(funds: &[ScoredFund]) -> String {
    funds
        .iter()
        .map(|scored| {
            format!(
                "{:.1}\t{}\t{}\t{}",
                scored.score, scored.fund.id, scored.fund.name, scored.why_included
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format clusters as titled sections, one indented line per member
pub fn format_clusters(clusters: &[FundCluster], use_colors: bool) -> String {
    if clusters.is_empty() {
        return "No clusters with enough qualifying funds.".to_string();
    }

    clusters
        .iter()
        .map(|cluster| {
            let header = if use_colors {
                format!("{}\n{}", cluster.title.bold(), cluster.description.dimmed())
            } else {
                format!("{}\n{}", cluster.title, cluster.description)
            };
            let members = cluster
                .funds
                .iter()
                .enumerate()
                .map(|(idx, scored)| {
                    format!(
                        "  {:>2}. {:>5.1}  {} - {}",
                        idx + 1,
                        scored.score,
                        scored.fund.name,
                        scored.why_included
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}\n{}", header, members)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format a single scored fund with detailed multi-line output
pub fn format_fund_detail(scored: &ScoredFund, use_colors: bool) -> String {
    let fund = scored.fund;
    let fees = match combined_fee(fund) {
        Some(fee) => format!("{:.2}%", fee),
        None => "unknown".to_string(),
    };
    let frequency = RedemptionFrequency::of(fund).label();
    let completeness = if scored.is_complete {
        "complete".to_string()
    } else {
        format!(
            "incomplete (missing {})",
            missing_core_fields(fund).join(", ")
        )
    };
    let b = &scored.breakdown;

    let title = if use_colors {
        format!("{} ({})", fund.name.bold(), fund.id.cyan())
    } else {
        format!("{} ({})", fund.name, fund.id)
    };

    format!(
        "{}\n  Score: {}\n  Fee: {:.1} (combined fee {})\n  Liquidity: {:.1} (redeems {})\n  \
         Governance: {:.1}\n  Minimum: {:.1}\n  Data: {}\n  Why: {}",
        title,
        format_score(scored.score, scored.is_complete),
        b.fee_score,
        fees,
        b.liquidity_score,
        frequency,
        b.governance_score,
        b.minimum_score,
        completeness,
        scored.why_included
    )
}

/// Format one fund's contradiction findings for review
pub fn format_contradiction_report(result: &ContradictionResult, use_colors: bool) -> String {
    let summary = get_contradiction_summary(result);
    let header = if use_colors {
        format!("{}: {}", result.fund_id.bold(), summary)
    } else {
        format!("{}: {}", result.fund_id, summary)
    };

    let lines: Vec<String> = result
        .contradictions
        .iter()
        .map(|c| {
            let tag = format!("[{}]", c.severity.as_str());
            let tag = if use_colors {
                match c.severity {
                    Severity::Error => tag.red().to_string(),
                    Severity::Warning => tag.yellow().to_string(),
                }
            } else {
                tag
            };
            format!(
                "  {} {} ({}): {}\n      \"{}\"",
                tag,
                c.field,
                c.location.as_str(),
                c.message,
                c.conflicting_text
            )
        })
        .collect();

    if lines.is_empty() {
        header
    } else {
        format!("{}\n{}", header, lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contradiction::detect_fund_contradictions;
    use crate::fund::{Fund, RedemptionTerms};
    use crate::scoring::calculate_fund_score;

    fn sample_fund() -> Fund {
        Fund {
            id: "atlas".to_string(),
            name: "Atlas Credit Fund".to_string(),
            category: Some("Debt".to_string()),
            description: Some("Senior lending with daily liquidity.".to_string()),
            management_fee: Some(1.0),
            minimum_investment: Some(500_000.0),
            redemption_terms: RedemptionTerms {
                frequency: "quarterly".to_string(),
                minimum_holding_period: None,
            },
            ..Fund::default()
        }
    }

    #[test]
    fn test_format_score_complete() {
        assert_eq!(format_score(69.0, true), "69.0");
    }

    #[test]
    fn test_format_score_incomplete() {
        assert_eq!(format_score(40.0, false), "40.0*");
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Short name", 20), "Short name");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(
            truncate_name("This is a very long name", 15),
            "This is a ve..."
        );
    }

    #[test]
    fn test_truncate_name_very_narrow() {
        assert_eq!(truncate_name("Hello world", 3), "Hel");
    }

    #[test]
    fn test_format_ranked_table_empty() {
        assert_eq!(format_ranked_table(&[], false), "No rankable funds found.");
    }

    #[test]
    fn test_format_ranked_table_single() {
        let fund = sample_fund();
        let scored = vec![calculate_fund_score(&fund)];
        let result = format_ranked_table(&scored, false);
        assert!(result.starts_with(" 1."));
        assert!(result.contains("Atlas Credit Fund"));
        assert!(result.contains("Debt"));
    }

    #[test]
    fn test_format_tsv_columns() {
        let fund = sample_fund();
        let scored = vec![calculate_fund_score(&fund)];
        let result = format_tsv(&scored);
        assert_eq!(result.split('\t').count(), 4);
        assert!(result.contains("\tatlas\tAtlas Credit Fund\t"));
    }

    #[test]
    fn test_format_tsv_empty() {
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_clusters_empty() {
        assert_eq!(
            format_clusters(&[], false),
            "No clusters with enough qualifying funds."
        );
    }

    #[test]
    fn test_format_fund_detail_incomplete() {
        let fund = Fund {
            id: "bare".to_string(),
            name: "Bare Fund".to_string(),
            ..Fund::default()
        };
        let scored = calculate_fund_score(&fund);
        let result = format_fund_detail(&scored, false);
        assert!(result.contains("Bare Fund (bare)"));
        assert!(result.contains("Score: 40.0*"));
        assert!(result.contains("combined fee unknown"));
        assert!(result.contains("missing managementFee, minimumInvestment, category, description"));
    }

    #[test]
    fn test_format_contradiction_report() {
        let fund = sample_fund();
        let result = detect_fund_contradictions(&fund);
        let report = format_contradiction_report(&result, false);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "atlas: Found 1 error");
        assert!(lines[1].contains("[error] redemptionTerms.frequency (description)"));
        assert!(lines[2].contains("daily liquidity"));
    }

    #[test]
    fn test_format_contradiction_report_clean() {
        let mut fund = sample_fund();
        fund.description = None;
        let result = detect_fund_contradictions(&fund);
        assert_eq!(
            format_contradiction_report(&result, false),
            "atlas: No contradictions found"
        );
    }
}
