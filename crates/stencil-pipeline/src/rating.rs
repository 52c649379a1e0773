//! Overall rating from the six criterion scores.
//!
//! ```text
//! rating = clamp(round(total / max_possible * 5), 1, 5)
//! ```
//!
//! Rounding is half away from zero ([`f64::round`]), so a ratio landing
//! exactly on `x.5` rounds up: a total of 15/30 rates 3, 9/30 rates 2.

use serde::{Deserialize, Serialize};

use crate::types::{Criterion, ScoreSet};

/// Best possible score for a single criterion.
pub const MAX_SCORE: u8 = 5;
/// Worst possible score for a single criterion.
pub const MIN_SCORE: u8 = 1;

/// Highest achievable total across all criteria (`5 * 6`).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn max_possible() -> u32 {
    MAX_SCORE as u32 * Criterion::ALL.len() as u32
}

/// Map a score total onto the 1–5 rating scale.
///
/// Always returns a value in `1..=5`, including for totals outside
/// `0..=max_possible` and for `max_possible == 0`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rating(total: u32, max_possible: u32) -> u8 {
    let scaled = (f64::from(total) / f64::from(max_possible) * f64::from(MAX_SCORE)).round();
    if scaled.is_nan() {
        return MIN_SCORE;
    }
    scaled.clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}

/// Total, maximum and overall rating of a score set.
#[must_use]
pub fn aggregate(scores: &ScoreSet) -> (u8, u32, u32) {
    let total = scores.total();
    let max = max_possible();
    (rating(total, max), total, max)
}

/// One-line verdict for a rating.
#[must_use]
pub const fn rating_label(rating: u8) -> &'static str {
    match rating {
        5 => "Excellent for stencils!",
        4 => "Good stencil candidate",
        3 => "Fair - may need adjustments",
        2 => "Poor - significant issues",
        1 => "Not suitable for stencils",
        _ => "Unknown rating",
    }
}

/// Rating drawn as five stars, filled up to `rating`.
#[must_use]
pub fn stars(rating: u8) -> String {
    (1..=MAX_SCORE)
        .map(|i| if i <= rating { '★' } else { '☆' })
        .collect()
}

/// Coarse quality band of an individual criterion score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreClass {
    /// 4 or 5.
    Good,
    /// 3.
    Fair,
    /// 1 or 2.
    Poor,
}

impl ScoreClass {
    #[must_use]
    pub const fn of(score: u8) -> Self {
        if score >= 4 {
            Self::Good
        } else if score >= 3 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}
