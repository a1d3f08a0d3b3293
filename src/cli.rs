use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::{DatasetSettings, RankingConfig};
use crate::ranking::types::{DecayDirection, EdgeMerge, EdgePolicy};

#[derive(Parser, Debug)]
#[command(author, version, about = "PageRank leaderboard from pairwise contest results")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Deduplicate, build the contest graph and print the leaderboard
    Rank {
        #[command(flatten)]
        input: InputArgs,

        /// Write the leaderboard as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        ranking: RankingArgs,
    },
    /// Write the deduplicated, canonically ordered records as CSV
    Dedup {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the canonical form of each name
    Normalize {
        /// Raw competitor names
        #[arg(required = true)]
        names: Vec<String>,

        #[command(flatten)]
        aliases: AliasArgs,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct InputArgs {
    /// Contest records (.csv or .json)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Ignore contests before this date (YYYY-MM-DD); undated contests are dropped too
    #[arg(long)]
    pub min_date: Option<NaiveDate>,

    /// Fail on malformed records instead of skipping them
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    #[command(flatten)]
    pub aliases: AliasArgs,
}

impl InputArgs {
    pub fn dataset_settings(&self) -> DatasetSettings {
        DatasetSettings {
            min_date: self.min_date,
            strict: self.strict,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct AliasArgs {
    /// Extra alias rules (JSON array), applied after the built-in ones
    #[arg(long)]
    pub aliases: Option<PathBuf>,

    /// Skip the built-in nickname and suffix rules
    #[arg(long, default_value_t = false)]
    pub no_default_aliases: bool,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct RankingArgs {
    #[arg(long, value_enum, default_value_t = EdgePolicy::LoserToWinner)]
    pub policy: EdgePolicy,

    #[arg(long, value_enum, default_value_t = DecayDirection::RecentBiased)]
    pub decay: DecayDirection,

    /// How repeated edges between the same pair combine
    #[arg(long, value_enum, default_value_t = EdgeMerge::Overwrite)]
    pub edge_merge: EdgeMerge,

    #[arg(short = 'n', long, default_value_t = 10)]
    pub top_n: usize,

    #[arg(long, default_value_t = 0.85)]
    pub damping: f64,

    #[arg(long, default_value_t = 1000)]
    pub max_iterations: usize,

    #[arg(long, default_value_t = 1e-6)]
    pub tolerance: f64,

    /// Years after which a contest weighs 1/e
    #[arg(long, default_value_t = 8.0)]
    pub half_life: f64,

    /// Lower bound for any edge weight
    #[arg(long, default_value_t = 0.1)]
    pub weight_min: f64,

    /// Fraction of a full edge each side of a draw receives
    #[arg(long, default_value_t = 0.5)]
    pub draw_share: f64,

    /// Age contests against this year instead of the current one
    #[arg(long)]
    pub reference_year: Option<i32>,
}

impl RankingArgs {
    pub fn to_config(&self) -> RankingConfig {
        RankingConfig {
            edge_policy: self.policy,
            damping_factor: self.damping,
            max_iterations: self.max_iterations,
            convergence_tolerance: self.tolerance,
            top_n: self.top_n,
            half_life_years: self.half_life,
            weight_min: self.weight_min,
            draw_share: self.draw_share,
            decay_direction: self.decay,
            edge_merge: self.edge_merge,
            reference_year: self.reference_year,
        }
    }
}
