use std::path::PathBuf;

use chrono::NaiveDate;

use crate::errors::RankingError;
use crate::ranking::types::{DecayDirection, EdgeMerge, EdgePolicy};

pub const ALIASES_ENV: &str = "RINGRANK_ALIASES";

#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    pub edge_policy: EdgePolicy,
    pub damping_factor: f64,
    pub max_iterations: usize,
    pub convergence_tolerance: f64,
    pub top_n: usize,
    pub half_life_years: f64,
    pub weight_min: f64,
    pub draw_share: f64,
    pub decay_direction: DecayDirection,
    pub edge_merge: EdgeMerge,
    /// Year contests are aged against; `None` means the current year
    pub reference_year: Option<i32>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            edge_policy: EdgePolicy::LoserToWinner,
            damping_factor: 0.85,
            max_iterations: 1000,
            convergence_tolerance: 1e-6,
            top_n: 10,
            half_life_years: 8.0,
            weight_min: 0.1,
            draw_share: 0.5,
            decay_direction: DecayDirection::RecentBiased,
            edge_merge: EdgeMerge::Overwrite,
            reference_year: None,
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), RankingError> {
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(RankingError::invalid_config(
                "damping_factor",
                format!("must be within [0, 1], got {}", self.damping_factor),
            ));
        }
        if self.max_iterations == 0 {
            return Err(RankingError::invalid_config("max_iterations", "must be at least 1"));
        }
        if !(self.convergence_tolerance > 0.0) {
            return Err(RankingError::invalid_config(
                "convergence_tolerance",
                format!("must be positive, got {}", self.convergence_tolerance),
            ));
        }
        if !(self.half_life_years.is_finite() && self.half_life_years > 0.0) {
            return Err(RankingError::invalid_config(
                "half_life_years",
                format!("must be a positive number, got {}", self.half_life_years),
            ));
        }
        if !(self.weight_min.is_finite() && self.weight_min >= 0.0) {
            return Err(RankingError::invalid_config(
                "weight_min",
                format!("must be a finite non-negative number, got {}", self.weight_min),
            ));
        }
        if !(self.draw_share.is_finite() && self.draw_share >= 0.0) {
            return Err(RankingError::invalid_config(
                "draw_share",
                format!("must be a finite non-negative number, got {}", self.draw_share),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSettings {
    /// Drop contests before this date (and undated ones) when set
    pub min_date: Option<NaiveDate>,
    /// Reject malformed records instead of skipping them
    pub strict: bool,
}

/// Everything one CLI run needs; alias file location falls back to `RINGRANK_ALIASES`
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ranking: RankingConfig,
    pub dataset: DatasetSettings,
    pub aliases_path: Option<PathBuf>,
    pub default_aliases: bool,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            ranking: RankingConfig::default(),
            dataset: DatasetSettings::default(),
            aliases_path: std::env::var_os(ALIASES_ENV).map(PathBuf::from),
            default_aliases: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
