use chrono::{Datelike, Local, NaiveDate};

use super::types::DecayDirection;
use crate::config::RankingConfig;

const MAX_DECAY_EXPONENT: f64 = 50.0;

/// Exponential time decay over whole calendar years
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDecay {
    pub half_life_years: f64,
    pub weight_min: f64,
    pub direction: DecayDirection,
    pub reference_year: i32,
}

impl TimeDecay {
    pub fn from_config(config: &RankingConfig) -> Self {
        Self {
            half_life_years: config.half_life_years,
            weight_min: config.weight_min,
            direction: config.decay_direction,
            reference_year: config.reference_year.unwrap_or_else(current_year),
        }
    }

    pub fn weight(&self, date: NaiveDate) -> f64 {
        let years_ago = calculate_years_ago(date, self.reference_year);
        apply_exponential_decay(years_ago, self.half_life_years, self.direction)
            .max(self.weight_min)
    }
}

/// Recent-biased weight of a contest dated `date`, aged against the current year
pub fn edge_weight(date: NaiveDate, half_life_years: f64, weight_min: f64) -> f64 {
    TimeDecay {
        half_life_years,
        weight_min,
        direction: DecayDirection::RecentBiased,
        reference_year: current_year(),
    }
    .weight(date)
}

pub fn current_year() -> i32 {
    Local::now().year()
}

fn calculate_years_ago(date: NaiveDate, reference_year: i32) -> i32 {
    reference_year - date.year()
}

fn apply_exponential_decay(years_ago: i32, half_life_years: f64, direction: DecayDirection) -> f64 {
    // weight = exp(±years_ago / tau), exponent bounded so weights and their sums stay finite
    let exponent = direction.sign() * f64::from(years_ago) / half_life_years;
    exponent.clamp(-MAX_DECAY_EXPONENT, MAX_DECAY_EXPONENT).exp()
}
