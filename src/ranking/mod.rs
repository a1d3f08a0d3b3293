pub mod engine;
pub mod graph;
pub mod pagerank;
pub mod types;
pub mod weighting;

pub use engine::{RankingEngine, compute_ranking};
pub use graph::{CompetitorGraph, GraphBuilder};
pub use types::{DecayDirection, EdgeMerge, EdgePolicy};
pub use weighting::{TimeDecay, edge_weight};
