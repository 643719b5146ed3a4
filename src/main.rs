use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use fund_rank::config::{validate_ranking, Config};
use fund_rank::fund::Fund;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_CONTRADICTIONS: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the best complete funds by composite score (default if no subcommand)
    Rank {
        /// Number of funds to show (overrides config)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show thematic shortlists, each sorted by its own dominant criterion
    Clusters,
    /// Show the score breakdown for one fund
    Score {
        /// Fund id as it appears in the snapshot
        id: String,
    },
    /// Check fund copy for claims that contradict structured data
    Check {
        /// Only check this fund id
        id: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "fund-rank")]
#[command(
    about = "Rank investment funds and flag copy that contradicts fund data",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/fund-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Fund snapshot file, YAML or JSON (overrides config)
    #[arg(short, long, global = true)]
    funds: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn find_fund<'a>(funds: &'a [Fund], id: &str) -> &'a Fund {
    match funds.iter().find(|f| f.id == id) {
        Some(fund) => fund,
        None => {
            eprintln!("No fund with id '{}' in snapshot.", id);
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Rank { limit: None });
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config: Config = match fund_rank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate ranking config at startup, including a --limit override
    let limit_override = match &command {
        Commands::Rank { limit } => *limit,
        _ => None,
    };
    let ranking = config
        .ranking
        .clone()
        .unwrap_or_default()
        .with_limit_override(limit_override);
    if let Err(errors) = validate_ranking(&ranking) {
        eprintln!("Ranking config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Resolve and load the fund snapshot
    let funds_path = match cli.funds.map(PathBuf::from).or(config.funds) {
        Some(path) => path,
        None => {
            eprintln!("No fund snapshot given.");
            eprintln!("Pass --funds <file> or add to ~/.config/fund-rank/config.yaml:");
            eprintln!("  funds: /path/to/funds.yaml");
            std::process::exit(EXIT_CONFIG);
        }
    };

    let funds = match fund_rank::fund::load_funds(&funds_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };
    info!(count = funds.len(), path = %funds_path.display(), "loaded funds");

    if funds.is_empty() {
        warn!("fund snapshot is empty");
    }

    let use_colors = fund_rank::output::should_use_colors();
    let mut exit_code = EXIT_SUCCESS;

    match command {
        Commands::Rank { .. } => {
            let limit = ranking.effective_limit();
            let ranked = fund_rank::get_sorted_best_funds(&funds, limit);
            debug!(ranked = ranked.len(), limit, "ranked funds");

            match cli.format {
                Format::Table => {
                    println!(
                        "{}",
                        fund_rank::output::format_ranked_table(&ranked, use_colors)
                    );
                    if cli.verbose {
                        for scored in &ranked {
                            println!();
                            println!(
                                "{}",
                                fund_rank::output::format_fund_detail(scored, use_colors)
                            );
                        }
                    }
                }
                Format::Tsv => println!("{}", fund_rank::output::format_tsv(&ranked)),
                Format::Json => print_json(&ranked),
            }
        }
        Commands::Clusters => {
            let clusters = fund_rank::cluster::get_best_funds_by_category_with_limit(
                &funds,
                ranking.effective_cluster_limit(),
            );
            debug!(clusters = clusters.len(), "built clusters");

            match cli.format {
                Format::Table => println!(
                    "{}",
                    fund_rank::output::format_clusters(&clusters, use_colors)
                ),
                Format::Tsv => {
                    for cluster in &clusters {
                        for scored in &cluster.funds {
                            println!(
                                "{}\t{:.1}\t{}\t{}\t{}",
                                cluster.id,
                                scored.score,
                                scored.fund.id,
                                scored.fund.name,
                                scored.why_included
                            );
                        }
                    }
                }
                Format::Json => print_json(&clusters),
            }
        }
        Commands::Score { id } => {
            let fund = find_fund(&funds, &id);
            let scored = fund_rank::calculate_fund_score(fund);
            match cli.format {
                Format::Table => println!(
                    "{}",
                    fund_rank::output::format_fund_detail(&scored, use_colors)
                ),
                Format::Tsv => println!(
                    "{}",
                    fund_rank::output::format_tsv(std::slice::from_ref(&scored))
                ),
                Format::Json => print_json(&scored),
            }
        }
        Commands::Check { id } => {
            let results = match id {
                Some(id) => {
                    let fund = find_fund(&funds, &id);
                    vec![fund_rank::detect_fund_contradictions(fund)]
                }
                None => fund_rank::contradiction::detect_all(&funds),
            };

            match cli.format {
                Format::Table => {
                    for result in results.iter().filter(|r| r.has_contradictions || cli.verbose) {
                        println!(
                            "{}",
                            fund_rank::output::format_contradiction_report(result, use_colors)
                        );
                    }
                    let flagged = results.iter().filter(|r| r.has_contradictions).count();
                    println!(
                        "{} of {} funds have contradictions.",
                        flagged,
                        results.len()
                    );
                }
                Format::Tsv => {
                    for result in &results {
                        for c in &result.contradictions {
                            println!(
                                "{}\t{}\t{}\t{}\t{}",
                                result.fund_id,
                                c.severity.as_str(),
                                c.field,
                                c.location.as_str(),
                                c.message
                            );
                        }
                    }
                }
                Format::Json => print_json(&results),
            }

            // Error-severity findings gate publication
            if results.iter().any(|r| r.error_count > 0) {
                exit_code = EXIT_CONTRADICTIONS;
            }
        }
    }

    debug!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(exit_code);
}
