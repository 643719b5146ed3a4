pub mod definitions;
pub mod engine;

pub use definitions::{ClusterDefinition, CLUSTERS};
pub use engine::{
    get_best_funds_by_category, get_best_funds_by_category_with_limit, get_sorted_best_funds,
    FundCluster, CLUSTER_LIMIT, DEFAULT_BEST_LIMIT, MIN_CLUSTER_SIZE,
};
