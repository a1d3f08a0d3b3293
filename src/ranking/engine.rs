use chrono::NaiveDate;
use log::info;

use super::graph::{CompetitorGraph, GraphBuilder};
use super::pagerank::{PageRankSettings, pagerank};
use super::types::ScoreValue;
use super::weighting::TimeDecay;
use crate::config::RankingConfig;
use crate::dedup::ContestDeduplicator;
use crate::domain::{ContestRecord, RankedEntry};
use crate::errors::RankingError;
use crate::normalization::NameNormalizer;

const SCORE_DECIMALS: i32 = 4;

/// Dedup → graph → PageRank → leaderboard, for one fixed configuration
pub struct RankingEngine {
    config: RankingConfig,
    decay: TimeDecay,
    deduplicator: ContestDeduplicator,
}

impl RankingEngine {
    pub fn new(config: RankingConfig, normalizer: NameNormalizer) -> Result<Self, RankingError> {
        config.validate()?;
        let decay = TimeDecay::from_config(&config);

        Ok(Self {
            config,
            decay,
            deduplicator: ContestDeduplicator::new(normalizer),
        })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn reference_year(&self) -> i32 {
        self.decay.reference_year
    }

    pub fn edge_weight(&self, date: NaiveDate) -> f64 {
        self.decay.weight(date)
    }

    pub fn deduplicate(&self, records: &[ContestRecord]) -> Vec<ContestRecord> {
        self.deduplicator.deduplicate(records)
    }

    pub fn build_graph(&self, records: &[ContestRecord]) -> CompetitorGraph {
        let builder = GraphBuilder::new(
            self.deduplicator.normalizer(),
            self.decay,
            self.config.edge_policy,
            self.config.draw_share,
            self.config.edge_merge,
        );
        let graph = builder.build(records);
        info!(
            "Built {} graph: {} competitors, {} edges",
            self.config.edge_policy.as_str(),
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Every competitor in the graph with its unrounded score, best first
    pub fn score_graph(&self, graph: &CompetitorGraph) -> Vec<(String, ScoreValue)> {
        let outcome = pagerank(&graph.out_edges(), &self.pagerank_settings());

        let mut scored: Vec<(String, ScoreValue)> = graph
            .competitors()
            .into_iter()
            .zip(outcome.scores.iter())
            .map(|(name, &score)| (name.to_string(), score))
            .collect();

        // stable: ties keep graph insertion order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }

    pub fn compute(&self, records: &[ContestRecord]) -> Vec<RankedEntry> {
        info!(
            "Computing PageRank on {} raw records, policy={}, decay={}",
            records.len(),
            self.config.edge_policy.as_str(),
            self.config.decay_direction.as_str()
        );

        let deduped = self.deduplicate(records);
        let graph = self.build_graph(&deduped);
        let scored = self.score_graph(&graph);

        let ranked = build_leaderboard(scored, self.config.top_n);
        if let Some(leader) = ranked.first() {
            info!("Leader: {} ({:.4})", leader.competitor, leader.score);
        }
        ranked
    }

    fn pagerank_settings(&self) -> PageRankSettings {
        PageRankSettings {
            damping_factor: self.config.damping_factor,
            max_iterations: self.config.max_iterations,
            convergence_tolerance: self.config.convergence_tolerance,
        }
    }
}

fn build_leaderboard(scored: Vec<(String, ScoreValue)>, top_n: usize) -> Vec<RankedEntry> {
    scored
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, (competitor, score))| RankedEntry {
            rank: idx + 1,
            competitor,
            score: round_score(score),
        })
        .collect()
}

fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}

/// Ranks `records` with the built-in alias table
pub fn compute_ranking(
    records: &[ContestRecord],
    config: &RankingConfig,
) -> Result<Vec<RankedEntry>, RankingError> {
    let engine = RankingEngine::new(config.clone(), NameNormalizer::default())?;
    Ok(engine.compute(records))
}
