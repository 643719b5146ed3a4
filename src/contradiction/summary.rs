use super::types::ContradictionResult;

/// One-line summary for review tooling, e.g. "Found 2 errors and 1 warning".
pub fn get_contradiction_summary(result: &ContradictionResult) -> String {
    if !result.has_contradictions {
        return "No contradictions found".to_string();
    }

    let mut parts = Vec::new();
    if result.error_count > 0 {
        parts.push(pluralize(result.error_count, "error"));
    }
    if result.warning_count > 0 {
        parts.push(pluralize(result.warning_count, "warning"));
    }
    format!("Found {}", parts.join(" and "))
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
