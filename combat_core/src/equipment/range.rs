//! RollRange - Inclusive integer range used for damage and sickness rolls

use crate::config::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[min, max]` range. Always satisfies `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(u32, u32)", into = "(u32, u32)")]
pub struct RollRange {
    min: u32,
    max: u32,
}

impl RollRange {
    /// The empty range; rolls always yield 0
    pub const ZERO: RollRange = RollRange { min: 0, max: 0 };

    /// Create a range, rejecting `min > max`
    pub fn new(min: u32, max: u32) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::invalid(format!(
                "range minimum {} exceeds maximum {}",
                min, max
            )));
        }
        Ok(RollRange { min, max })
    }

    /// A range that always rolls `value`
    pub const fn fixed(value: u32) -> Self {
        RollRange {
            min: value,
            max: value,
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// A range whose maximum is 0 never contributes anything
    pub fn is_zero(&self) -> bool {
        self.max == 0
    }

    /// Uniform draw in `[min, max]`
    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    /// Sum of `count` independent draws
    pub fn roll_many(&self, count: u32, rng: &mut impl Rng) -> u32 {
        (0..count).fold(0u32, |total, _| total.saturating_add(self.roll(rng)))
    }
}

impl Default for RollRange {
    fn default() -> Self {
        RollRange::ZERO
    }
}

impl TryFrom<(u32, u32)> for RollRange {
    type Error = ConfigError;

    fn try_from((min, max): (u32, u32)) -> Result<Self, Self::Error> {
        RollRange::new(min, max)
    }
}

impl From<RollRange> for (u32, u32) {
    fn from(range: RollRange) -> Self {
        (range.min, range.max)
    }
}

impl fmt::Display for RollRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}
