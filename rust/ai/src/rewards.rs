//! Per-category reward weights.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use squares_engine::hand::HandCategory;
use thiserror::Error;

/// Number of scoring categories, pair through royal flush.
pub const NUM_CATEGORIES: usize = 9;

#[derive(Debug, Error, PartialEq)]
pub enum RewardError {
    #[error("expected 9 reward weights, got {0}")]
    Length(usize),
    #[error("reward weight for {category} must be finite and non-negative, got {value}")]
    Weight { category: &'static str, value: f64 },
    #[error("invalid reward weight '{0}'")]
    Parse(String),
}

/// Nine non-negative weights, one per scoring category, pair first.
///
/// Only relative magnitudes matter: the policy compares weighted
/// probabilities across cells, it never reads them as points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct RewardVector([f64; NUM_CATEGORIES]);

impl RewardVector {
    pub fn new(weights: [f64; NUM_CATEGORIES]) -> Result<Self, RewardError> {
        for (category, &value) in HandCategory::ALL_SCORING.iter().zip(&weights) {
            if !value.is_finite() || value < 0.0 {
                return Err(RewardError::Weight {
                    category: category.name(),
                    value,
                });
            }
        }
        Ok(Self(weights))
    }

    /// Weights learned offline for search-assisted play. Rare categories
    /// carry large weights so a live straight-flush draw dominates.
    pub fn trained() -> Self {
        Self([
            1.940_334_707_737_084_5,
            7.466_401_194_624_19,
            50.475_839_949_524_15,
            604.212_055_192_447_3,
            64.038_231_780_167_25,
            174.291_938_997_821_38,
            1_505.882_352_941_176_6,
            257.787_325_456_498_37,
            34_285.714_285_714_29,
        ])
    }

    /// Untrained starting weights.
    pub fn baseline() -> Self {
        Self([1.0, 3.0, 6.0, 12.0, 5.0, 10.0, 16.0, 30.0, 30.0])
    }

    /// Weight of a scoring category; high card weighs nothing.
    pub fn weight(&self, category: HandCategory) -> f64 {
        category.reward_index().map_or(0.0, |i| self.0[i])
    }

    pub fn as_array(&self) -> &[f64; NUM_CATEGORIES] {
        &self.0
    }
}

impl Default for RewardVector {
    fn default() -> Self {
        Self::trained()
    }
}

impl TryFrom<Vec<f64>> for RewardVector {
    type Error = RewardError;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        let len = v.len();
        let weights: [f64; NUM_CATEGORIES] = v.try_into().map_err(|_| RewardError::Length(len))?;
        Self::new(weights)
    }
}

impl From<RewardVector> for Vec<f64> {
    fn from(r: RewardVector) -> Self {
        r.0.to_vec()
    }
}

/// Parses a comma-separated list such as `"1,3,6,12,5,10,16,30,30"`.
impl FromStr for RewardVector {
    type Err = RewardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let weights = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| RewardError::Parse(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(weights)
    }
}

impl fmt::Display for RewardVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|w| w.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
