use serde::Serialize;
use tracing::debug;

use super::definitions::{ClusterDefinition, CLUSTERS};
use crate::fund::Fund;
use crate::scoring::{score_funds, ScoredFund};

/// Default length of the overall shortlist.
pub const DEFAULT_BEST_LIMIT: usize = 8;
/// Default number of funds kept per cluster.
pub const CLUSTER_LIMIT: usize = 6;
/// Clusters with fewer qualifying funds than this are dropped.
pub const MIN_CLUSTER_SIZE: usize = 2;

/// A named shortlist, ordered by the cluster's dominant sub-score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundCluster<'a> {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub funds: Vec<ScoredFund<'a>>,
}

/// Score all funds, keep complete ones and return the top `limit` by composite
/// score. The sort is stable: funds with equal scores keep their input order.
pub fn get_sorted_best_funds(funds: &[Fund], limit: usize) -> Vec<ScoredFund<'_>> {
    let mut ranked = complete_scored(funds);
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

/// Build the thematic clusters with the default per-cluster limit.
pub fn get_best_funds_by_category(funds: &[Fund]) -> Vec<FundCluster<'_>> {
    get_best_funds_by_category_with_limit(funds, CLUSTER_LIMIT)
}

/// Build the thematic clusters, keeping at most `cluster_limit` funds in each.
///
/// Membership is non-exclusive. Clusters that end up with fewer than
/// `MIN_CLUSTER_SIZE` funds are left out of the result.
pub fn get_best_funds_by_category_with_limit(
    funds: &[Fund],
    cluster_limit: usize,
) -> Vec<FundCluster<'_>> {
    let eligible = complete_scored(funds);

    CLUSTERS
        .iter()
        .filter_map(|definition| {
            let cluster = build_cluster(definition, &eligible, cluster_limit);
            if cluster.funds.len() < MIN_CLUSTER_SIZE {
                debug!(
                    cluster = definition.id,
                    members = cluster.funds.len(),
                    "dropping cluster below minimum size"
                );
                None
            } else {
                Some(cluster)
            }
        })
        .collect()
}

fn build_cluster<'a>(
    definition: &ClusterDefinition,
    eligible: &[ScoredFund<'a>],
    limit: usize,
) -> FundCluster<'a> {
    let mut members: Vec<ScoredFund<'a>> = eligible
        .iter()
        .filter(|scored| (definition.qualifies)(scored))
        .cloned()
        .collect();

    // Dominant sub-score first; composite breaks ties, then input order (stable sort).
    members.sort_by(|a, b| {
        let dominant = b
            .breakdown
            .get(definition.dominant)
            .total_cmp(&a.breakdown.get(definition.dominant));
        dominant.then_with(|| b.score.total_cmp(&a.score))
    });
    members.truncate(limit);

    for member in &mut members {
        member.why_included = (definition.why)(member.fund);
    }

    FundCluster {
        id: definition.id,
        title: definition.title,
        description: definition.description,
        funds: members,
    }
}

fn complete_scored(funds: &[Fund]) -> Vec<ScoredFund<'_>> {
    score_funds(funds)
        .into_iter()
        .filter(|scored| scored.is_complete)
        .collect()
}
