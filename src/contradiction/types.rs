use serde::Serialize;

/// Where the conflicting claim was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Location {
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "detailedDescription")]
    DetailedDescription,
    /// Claim came from tags or other structured data, not from copy.
    #[serde(rename = "auto-generated")]
    AutoGenerated,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Description => "description",
            Location::DetailedDescription => "detailedDescription",
            Location::AutoGenerated => "auto-generated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A claim in a fund's copy or tags that conflicts with its structured data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contradiction {
    pub rule: &'static str,
    pub field: &'static str,
    pub structured_value: String,
    pub conflicting_text: String,
    pub location: Location,
    pub severity: Severity,
    pub message: String,
}

/// All contradictions found for one fund, with counts derived from the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContradictionResult {
    pub fund_id: String,
    pub has_contradictions: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub contradictions: Vec<Contradiction>,
}

impl ContradictionResult {
    pub fn new(fund_id: String, contradictions: Vec<Contradiction>) -> Self {
        let error_count = contradictions
            .iter()
            .filter(|c| c.severity == Severity::Error)
            .count();
        let warning_count = contradictions.len() - error_count;
        Self {
            fund_id,
            has_contradictions: !contradictions.is_empty(),
            error_count,
            warning_count,
            contradictions,
        }
    }
}
