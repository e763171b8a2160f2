#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the candy map tools.

use std::path::PathBuf;

use candy_map_cli::RuleOptions;
use candy_map_property::RecordFilter;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "candy_map",
    about = "Rank streets by how good they are for trick-or-treating"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RuleArgs {
    /// Street rules TOML to use instead of the built-in patterns
    #[arg(long)]
    street_rules: Option<PathBuf>,
    /// Scoring rules TOML to use instead of the built-in tables
    #[arg(long)]
    scoring_rules: Option<PathBuf>,
    /// Year sale ages are measured against (default comes from the scoring rules)
    #[arg(long)]
    reference_year: Option<i32>,
}

impl From<RuleArgs> for RuleOptions {
    fn from(args: RuleArgs) -> Self {
        Self {
            street_rules: args.street_rules,
            scoring_rules: args.scoring_rules,
            reference_year: args.reference_year,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top streets as JSON
    Rank {
        /// Property records JSON array (`-` for stdin)
        #[arg(long, default_value = "-")]
        input: PathBuf,
        /// Number of streets to return (default 3, capped at 50)
        #[arg(long)]
        count: Option<usize>,
        /// Only rank residential records in this assessor neighborhood
        #[arg(long)]
        neighborhood: Option<String>,
        /// Only rank residential records (implied by `--neighborhood`)
        #[arg(long)]
        residential_only: bool,
        /// Print the full report, including records with no recognizable street
        #[arg(long)]
        show_skipped: bool,
        #[command(flatten)]
        rules: RuleArgs,
    },
    /// Print one JSON line per record with its score breakdown
    Score {
        /// Property records JSON array (`-` for stdin)
        #[arg(long, default_value = "-")]
        input: PathBuf,
        #[command(flatten)]
        rules: RuleArgs,
    },
    /// Print the canonical street for each location string
    Normalize {
        /// Raw `property_location` strings
        #[arg(required = true)]
        locations: Vec<String>,
        /// Street rules TOML to use instead of the built-in patterns
        #[arg(long)]
        street_rules: Option<PathBuf>,
    },
    /// List the distinct assessor neighborhoods in a dataset
    Neighborhoods {
        /// Property records JSON array (`-` for stdin)
        #[arg(long, default_value = "-")]
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            input,
            count,
            neighborhood,
            residential_only,
            show_skipped,
            rules,
        } => {
            let records = candy_map_cli::read_records(&input)?;
            let ranker = RuleOptions::from(rules).ranker()?;
            let filter = neighborhood.map_or(
                RecordFilter {
                    neighborhood: None,
                    residential_only,
                },
                RecordFilter::residential_in,
            );
            println!(
                "{}",
                candy_map_cli::rank(&records, &filter, &ranker, count, show_skipped)?
            );
        }
        Commands::Score { input, rules } => {
            let records = candy_map_cli::read_records(&input)?;
            let options = RuleOptions::from(rules);
            for line in candy_map_cli::score(&records, &options.normalizer()?, &options.scorer()?)?
            {
                println!("{line}");
            }
        }
        Commands::Normalize {
            locations,
            street_rules,
        } => {
            let options = RuleOptions {
                street_rules,
                ..RuleOptions::default()
            };
            for line in candy_map_cli::normalize(&locations, &options.normalizer()?) {
                println!("{line}");
            }
        }
        Commands::Neighborhoods { input } => {
            let records = candy_map_cli::read_records(&input)?;
            for name in candy_map_property::neighborhoods(&records) {
                println!("{name}");
            }
        }
    }

    Ok(())
}
