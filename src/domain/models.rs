use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::RankingError;

/// One observed contest outcome between two competitors.
///
/// `a_won` is `Some(true)` when A beat B, `Some(false)` when B beat A and
/// `None` for a draw. Records without a date still take part in dedup but
/// never reach the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestRecord {
    pub competitor_a: String,
    pub competitor_b: String,
    pub a_won: Option<bool>,
    pub date: Option<NaiveDate>,
}

impl ContestRecord {
    pub fn new(
        competitor_a: impl Into<String>,
        competitor_b: impl Into<String>,
        a_won: Option<bool>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            competitor_a: competitor_a.into(),
            competitor_b: competitor_b.into(),
            a_won,
            date,
        }
    }

    /// A beat B on `date`
    pub fn win(a: impl Into<String>, b: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(a, b, Some(true), Some(date))
    }

    pub fn draw(a: impl Into<String>, b: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(a, b, None, Some(date))
    }

    pub fn is_draw(&self) -> bool {
        self.a_won.is_none()
    }

    /// Returns `(winner, loser)` for a decisive record
    pub fn winner_loser(&self) -> Option<(&str, &str)> {
        match self.a_won {
            Some(true) => Some((self.competitor_a.as_str(), self.competitor_b.as_str())),
            Some(false) => Some((self.competitor_b.as_str(), self.competitor_a.as_str())),
            None => None,
        }
    }

    /// A decisive record needs both names to be usable
    pub fn is_malformed(&self) -> bool {
        !self.is_draw() && (self.competitor_a.trim().is_empty() || self.competitor_b.trim().is_empty())
    }

    pub fn validate(&self, index: usize) -> Result<(), RankingError> {
        if self.is_malformed() {
            return Err(RankingError::MalformedRecord {
                index,
                reason: format!(
                    "empty competitor name in decisive record ({:?} vs {:?})",
                    self.competitor_a, self.competitor_b
                ),
            });
        }
        Ok(())
    }
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub competitor: String,
    pub score: f64,
}
