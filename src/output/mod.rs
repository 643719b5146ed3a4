pub mod formatter;

pub use formatter::{
    format_clusters, format_contradiction_report, format_fund_detail, format_ranked_table,
    format_score, format_tsv, should_use_colors,
};
