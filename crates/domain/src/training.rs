use std::fmt;

use derive_more::{Display, Into};

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reps(u32);

impl Reps {
    /// Anything above this is considered a logging mistake rather than a real set.
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Result<Self, RepsError> {
        if value > Self::MAX {
            return Err(RepsError::OutOfRange(value));
        }

        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be 100 or less ({0} > 100)")]
    OutOfRange(u32),
}

/// Weight of a set. Zero means the set was done without added weight.
#[derive(Debug, Default, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub const BODYWEIGHT: Weight = Weight(0.0);

    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_bodyweight(self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 135.0 is written as "135", 12.5 stays "12.5"
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be a non-negative finite number")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}
