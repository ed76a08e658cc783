// config.rs - Simulation configuration

use std::time::Duration;

use crate::error::{LifeError, Result};

pub const DEFAULT_ROWS: usize = 24;
pub const DEFAULT_COLS: usize = 24;
pub const DEFAULT_INTERVAL_MS: u64 = 100;

const MUST_BE_POSITIVE: &str = "must be greater than zero";
const TOO_MANY_CELLS: &str = "does not fit in memory";

fn invalid(field: &'static str, reason: &'static str) -> LifeError {
    LifeError::InvalidConfiguration { field, reason }
}

/// Grid dimensions and step interval, fixed for the lifetime of a simulation.
///
/// Fields are private so a `Config` that exists has always been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    rows: usize,
    cols: usize,
    interval_ms: u64,
}

impl Config {
    pub fn new(rows: usize, cols: usize, interval_ms: u64) -> Result<Self> {
        if rows == 0 {
            return Err(invalid("rows", MUST_BE_POSITIVE));
        }
        if cols == 0 {
            return Err(invalid("cols", MUST_BE_POSITIVE));
        }
        if interval_ms == 0 {
            return Err(invalid("interval_ms", MUST_BE_POSITIVE));
        }
        if rows.checked_mul(cols).is_none() {
            return Err(invalid("rows x cols", TOO_MANY_CELLS));
        }
        Ok(Self { rows, cols, interval_ms })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_board() {
        let config = Config::default();
        assert_eq!((config.rows(), config.cols()), (24, 24));
        assert_eq!(config.interval(), Duration::from_millis(100));
    }

    #[test]
    fn zero_values_are_rejected() {
        assert_eq!(Config::new(0, 10, 100), Err(invalid("rows", MUST_BE_POSITIVE)));
        assert_eq!(Config::new(10, 0, 100), Err(invalid("cols", MUST_BE_POSITIVE)));
        assert_eq!(Config::new(10, 10, 0), Err(invalid("interval_ms", MUST_BE_POSITIVE)));
        assert_eq!(
            Config::new(0, 10, 100).unwrap_err().to_string(),
            "invalid configuration: rows must be greater than zero"
        );
    }

    #[test]
    fn cell_count_overflow_is_rejected() {
        assert_eq!(
            Config::new(usize::MAX, 2, 100),
            Err(invalid("rows x cols", TOO_MANY_CELLS))
        );
        assert_eq!(
            Config::new(usize::MAX / 2 + 1, 2, 100),
            Err(invalid("rows x cols", TOO_MANY_CELLS))
        );
        assert!(Config::new(usize::MAX, 1, 100).is_ok());
    }

    #[test]
    fn non_square_grid_is_accepted() {
        let config = Config::new(3, 7, 1).unwrap();
        assert_eq!((config.rows(), config.cols(), config.interval_ms()), (3, 7, 1));
    }
}
