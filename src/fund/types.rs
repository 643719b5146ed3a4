use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Read-only snapshot of a fund as supplied by the fund repository.
///
/// Every numeric and governance field is optional, and an explicit `null`
/// reads the same as an absent key. Missing values degrade to neutral
/// contributions during scoring instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manager_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeSet<String>,

    // Percent per year
    #[serde(default)]
    pub management_fee: Option<f64>,
    // Percent of profits
    #[serde(default)]
    pub performance_fee: Option<f64>,
    // EUR
    #[serde(default)]
    pub minimum_investment: Option<f64>,
    // Years
    #[serde(default)]
    pub term: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub redemption_terms: RedemptionTerms,

    #[serde(default)]
    pub cmvm_id: Option<String>,
    #[serde(default)]
    pub auditor: Option<String>,
    #[serde(default)]
    pub custodian: Option<String>,
    #[serde(default)]
    pub nav_frequency: Option<String>,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    /// Only presence counts, so entries are kept in whatever shape they arrive.
    #[serde(default, deserialize_with = "null_as_default")]
    pub documents: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub faqs: Vec<Value>,

    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub detailed_description: Option<String>,
    #[serde(default)]
    pub risk_band: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionTerms {
    #[serde(default, deserialize_with = "null_as_default")]
    pub frequency: String,
    // Months
    #[serde(default)]
    pub minimum_holding_period: Option<u32>,
}

/// Read `null` as the type's empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// True when an optional text field carries something other than whitespace.
pub fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl Fund {
    pub fn has_category(&self) -> bool {
        has_text(&self.category)
    }

    pub fn has_description(&self) -> bool {
        has_text(&self.description)
    }

    /// Minimum holding period in months, treating zero as no lock-up.
    pub fn lock_up_months(&self) -> Option<u32> {
        self.redemption_terms
            .minimum_holding_period
            .filter(|months| *months > 0)
    }

    /// Lowercased category, or an empty string when unknown.
    pub fn category_lower(&self) -> String {
        self.category
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .unwrap_or_default()
    }

    /// Lowercased risk band, or an empty string when unknown.
    pub fn risk_band_lower(&self) -> String {
        self.risk_band
            .as_deref()
            .map(|r| r.trim().to_lowercase())
            .unwrap_or_default()
    }

    /// Check for a tag ignoring case and punctuation ("No Lock-Up" == "no lockup").
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = normalize_tag(tag);
        self.tags.iter().any(|t| normalize_tag(t) == wanted)
    }

    /// Return the tag as written on the fund, for reporting.
    pub fn find_tag(&self, tag: &str) -> Option<&str> {
        let wanted = normalize_tag(tag);
        self.tags
            .iter()
            .find(|t| normalize_tag(t) == wanted)
            .map(String::as_str)
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
