use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cluster::{CLUSTER_LIMIT, DEFAULT_BEST_LIMIT};

/// Top-level configuration file.
///
/// Example YAML:
/// ```yaml
/// funds: ./funds.yaml
/// ranking:
///   limit: 8
///   cluster_limit: 6
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default fund snapshot used when `--funds` is not given.
    /// A relative path is resolved against the config file's directory.
    #[serde(default)]
    pub funds: Option<PathBuf>,

    #[serde(default)]
    pub ranking: Option<RankingConfig>,
}

/// Shortlist sizes. Scoring weights and thresholds are not configurable.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RankingConfig {
    /// Length of the overall shortlist (default: 8)
    #[serde(default)]
    pub limit: Option<usize>,

    /// Funds kept per cluster (default: 6)
    #[serde(default)]
    pub cluster_limit: Option<usize>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_BEST_LIMIT),
            cluster_limit: Some(CLUSTER_LIMIT),
        }
    }
}

impl RankingConfig {
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_BEST_LIMIT)
    }

    pub fn effective_cluster_limit(&self) -> usize {
        self.cluster_limit.unwrap_or(CLUSTER_LIMIT)
    }

    /// Apply a command-line `--limit` on top of the file value, so both go
    /// through the same validation.
    pub fn with_limit_override(mut self, limit: Option<usize>) -> Self {
        if limit.is_some() {
            self.limit = limit;
        }
        self
    }
}
