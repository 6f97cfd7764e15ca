//! Domain Services
//!
//! Pure computations over loaded ratings.

use crate::domain::value_objects::{MAX_SCORE, MIN_SCORE, Score};

/// Aggregate view of every rating a video has received
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    /// Arithmetic mean, `0.0` when there are no ratings
    pub average_rating: f64,
    pub total_ratings: u64,
    /// `distribution[i]` counts scores equal to `i + 1`
    pub distribution: [u64; 5],
}

impl RatingStats {
    /// Single pass over the scores
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = Score>,
    {
        let mut distribution = [0u64; 5];
        let mut total: u64 = 0;
        let mut sum: i64 = 0;

        for score in scores {
            let value = score.value();
            debug_assert!((MIN_SCORE..=MAX_SCORE).contains(&value));
            distribution[(value - MIN_SCORE) as usize] += 1;
            total += 1;
            sum += i64::from(value);
        }

        let average_rating = if total == 0 {
            0.0
        } else {
            sum as f64 / total as f64
        };

        Self {
            average_rating,
            total_ratings: total,
            distribution,
        }
    }

    /// `(score, count)` pairs from 1 to 5
    pub fn buckets(&self) -> impl Iterator<Item = (i32, u64)> + '_ {
        (MIN_SCORE..=MAX_SCORE).zip(self.distribution.iter().copied())
    }
}
