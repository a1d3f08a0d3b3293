use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub type Competitor = String;
pub type ScoreValue = f64;

/// Which way rank mass flows along a contest edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Loser endorses winner ("beat-them" prestige)
    #[default]
    LoserToWinner,
    /// Winner endorses loser (quality of opposition faced)
    WinnerToLoser,
    /// Direction collapsed
    Undirected,
}

impl EdgePolicy {
    pub fn is_directed(&self) -> bool {
        !matches!(self, EdgePolicy::Undirected)
    }

    /// Orders a decisive result as `(source, target)`
    pub fn orient<'a>(&self, winner: &'a str, loser: &'a str) -> (&'a str, &'a str) {
        match self {
            EdgePolicy::LoserToWinner => (loser, winner),
            EdgePolicy::WinnerToLoser | EdgePolicy::Undirected => (winner, loser),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EdgePolicy::LoserToWinner => "loser_to_winner",
            EdgePolicy::WinnerToLoser => "winner_to_loser",
            EdgePolicy::Undirected => "undirected",
        }
    }
}

/// Temporal bias of the edge weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DecayDirection {
    /// Current form: recent contests weigh close to 1.0
    #[default]
    RecentBiased,
    /// All-time resume: older contests are boosted
    Consolidated,
}

impl DecayDirection {
    pub fn sign(&self) -> f64 {
        match self {
            DecayDirection::RecentBiased => -1.0,
            DecayDirection::Consolidated => 1.0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DecayDirection::RecentBiased => "recent_biased",
            DecayDirection::Consolidated => "consolidated",
        }
    }
}

/// What happens when an edge is inserted twice between the same ordered pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMerge {
    /// Later weight replaces the earlier one
    #[default]
    Overwrite,
    /// Weights accumulate
    Sum,
}
