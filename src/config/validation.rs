use super::schema::RankingConfig;
use crate::cluster::MIN_CLUSTER_SIZE;

/// Validate ranking configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_ranking(config: &RankingConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(limit) = config.limit {
        if limit == 0 {
            errors.push("ranking.limit: must be at least 1".to_string());
        }
    }

    if let Some(cluster_limit) = config.cluster_limit {
        if cluster_limit < MIN_CLUSTER_SIZE {
            errors.push(format!(
                "ranking.cluster_limit: must be at least {} (smaller clusters are dropped), got {}",
                MIN_CLUSTER_SIZE, cluster_limit
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
