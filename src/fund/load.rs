use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::types::Fund;

/// Load a snapshot of funds from a YAML or JSON file
///
/// The format is chosen by extension: `.json` is parsed as JSON, anything else
/// as YAML. The file must hold a sequence of fund records.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The content cannot be parsed as a list of funds
pub fn load_funds(path: &Path) -> Result<Vec<Fund>> {
    if !path.exists() {
        anyhow::bail!("Fund snapshot not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fund snapshot at {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let funds = if is_json {
        parse_json(&content).with_context(|| {
            format!(
                "Failed to parse fund snapshot: invalid JSON in {}",
                path.display()
            )
        })?
    } else {
        parse_yaml(&content).with_context(|| {
            format!(
                "Failed to parse fund snapshot: invalid YAML in {}",
                path.display()
            )
        })?
    };

    tracing::debug!(
        path = %path.display(),
        count = funds.len(),
        "loaded fund snapshot"
    );
    Ok(funds)
}

pub fn parse_json(content: &str) -> Result<Vec<Fund>> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_yaml(content: &str) -> Result<Vec<Fund>> {
    Ok(serde_saphyr::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_yaml_snapshot() {
        let yaml = r#"
- id: a
  name: Alpha Fund
  category: Debt
  managementFee: 1.0
  minimumInvestment: 400000
  redemptionTerms:
    frequency: weekly
- id: b
  name: Beta Fund
"#;
        let funds = parse_yaml(yaml).unwrap();
        assert_eq!(funds.len(), 2);
        assert_eq!(funds[0].category.as_deref(), Some("Debt"));
        assert_eq!(funds[0].redemption_terms.frequency, "weekly");
        assert_eq!(funds[1].redemption_terms.frequency, "");
        assert!(funds[1].management_fee.is_none());
    }

    #[test]
    fn test_parse_json_accepts_null_collections() {
        let json = r#"[{"id":"a","name":"A","documents":null,"faqs":null,"tags":null}]"#;
        let funds = parse_json(json).unwrap();
        assert_eq!(funds.len(), 1);
        assert!(funds[0].documents.is_empty());
        assert!(funds[0].faqs.is_empty());
        assert!(funds[0].tags.is_empty());
    }

    #[test]
    fn test_parse_json_accepts_null_frequency() {
        let json = r#"[{"id":"a","name":"A","redemptionTerms":{"frequency":null}}]"#;
        let funds = parse_json(json).unwrap();
        assert_eq!(funds[0].redemption_terms.frequency, "");
    }

    #[test]
    fn test_faqs_and_documents_count_in_any_shape() {
        let json = r#"[{
            "id": "a",
            "name": "A",
            "faqs": ["What is the lock-up?"],
            "documents": [{"title": "Prospectus", "url": "https://example.com/p.pdf"}]
        }]"#;
        let funds = parse_json(json).unwrap();
        assert_eq!(funds[0].faqs.len(), 1);
        assert_eq!(funds[0].documents.len(), 1);
    }

    #[test]
    fn test_parse_yaml_accepts_nulls() {
        let yaml = r#"
- id: a
  name: Alpha Fund
  tags: ~
  documents: null
  faqs:
  redemptionTerms:
    frequency: ~
"#;
        let funds = parse_yaml(yaml).unwrap();
        assert!(funds[0].tags.is_empty());
        assert!(funds[0].documents.is_empty());
        assert!(funds[0].faqs.is_empty());
        assert_eq!(funds[0].redemption_terms.frequency, "");
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let temp_path = env::temp_dir().join("fund_rank_test_missing.yaml");
        let _ = std::fs::remove_file(&temp_path);

        let err = load_funds(&temp_path).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_json_file() {
        let temp_path = env::temp_dir().join("fund_rank_test_snapshot.json");
        std::fs::write(&temp_path, r#"[{"id": "x", "name": "X Fund", "term": 5}]"#).unwrap();

        let funds = load_funds(&temp_path).unwrap();
        assert_eq!(funds.len(), 1);
        assert_eq!(funds[0].term, Some(5.0));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_invalid_yaml_mentions_path() {
        let temp_path = env::temp_dir().join("fund_rank_test_invalid.yaml");
        std::fs::write(&temp_path, "- id: [unterminated").unwrap();

        let err = load_funds(&temp_path).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));

        let _ = std::fs::remove_file(&temp_path);
    }
}
