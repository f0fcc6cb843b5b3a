//! Inclusive numeric ranges used to clamp and remap tile attributes.

use serde::{Deserialize, Serialize};

/// An inclusive `[min, max]` range of floating point values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Smallest range covering every value, `None` for an empty input.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self::new(v, v)),
            Some(range) => Some(Self::new(range.min.min(v), range.max.max(v))),
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        self.min + self.span() / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into the range. NaN maps to `min`.
    pub fn coerce(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Linearly remap a value from this range into `target`.
    ///
    /// A degenerate source range maps everything to the target midpoint.
    pub fn map_to(&self, value: f64, target: &ValueRange) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return target.midpoint();
        }
        target.min + (value - self.min) / span * target.span()
    }
}
