//! Validation of the user-supplied forecast horizon

use crate::error::{ForecastError, Result};
use std::fmt;
use std::str::FromStr;

/// Number of future monthly periods to forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Horizon(usize);

impl Horizon {
    pub fn new(periods: usize) -> Self {
        Self(periods)
    }

    /// Parse raw user text. Only ASCII digits are accepted: no sign, no
    /// whitespace, no decimal point.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ForecastError::InvalidHorizon(input.to_string()));
        }

        input
            .parse::<usize>()
            .map(Self)
            .map_err(|_| ForecastError::InvalidHorizon(input.to_string()))
    }

    pub fn periods(self) -> usize {
        self.0
    }
}

impl FromStr for Horizon {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
