//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Basketry CLI - Product affinity analysis over transaction line items.
#[derive(Debug, Parser)]
#[command(name = "basketry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BASKETRY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (item ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank the strongest item pairs
    Top(TopArgs),

    /// Recommend items to pair with one item
    Recommend(RecommendArgs),

    /// Show basket and item statistics
    Stats(StatsArgs),
}

/// Line-item input shared by every command.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Delimited file with one `transaction_id,item_id` record per line
    pub file: PathBuf,

    /// Field delimiter (overrides the config file)
    #[arg(short, long)]
    pub delimiter: Option<char>,
}

/// Arguments for the top command.
#[derive(Debug, Args)]
pub struct TopArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Ranking metric
    #[arg(short, long, value_enum)]
    pub metric: Option<MetricArg>,

    /// Minimum pair support (0.0-1.0)
    #[arg(long)]
    pub min_support: Option<f64>,

    /// Minimum confidence in either direction (0.0-1.0)
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Maximum number of pairs
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,
}

/// Arguments for the recommend command.
#[derive(Debug, Args)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Item to find partners for
    pub item: String,

    /// Maximum number of recommendations
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,
}

/// Arguments for the stats command.
#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Metric argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum MetricArg {
    /// Fraction of baskets containing the pair
    Support,
    /// Stronger of the two directional confidences
    Confidence,
    /// Co-occurrence relative to independence
    Lift,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<MetricArg> for basketry_domain::Metric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Support => basketry_domain::Metric::Support,
            MetricArg::Confidence => basketry_domain::Metric::Confidence,
            MetricArg::Lift => basketry_domain::Metric::Lift,
        }
    }
}
