// error.rs - Error types for the automaton engine

use std::ops::RangeInclusive;
use std::time::Duration;

use thiserror::Error;

use crate::engine::RunStatus;

/// A configuration value outside its accepted range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rows must be in {min}..={max}, got {value}")]
    RowsOutOfRange { value: usize, min: usize, max: usize },

    #[error("cols must be in {min}..={max}, got {value}")]
    ColsOutOfRange { value: usize, min: usize, max: usize },

    #[error("live percent must be in {min}..={max}, got {value}")]
    LivePercentOutOfRange { value: u8, min: u8, max: u8 },

    #[error("tick interval must be in {min:?}..={max:?}, got {value:?}")]
    TickIntervalOutOfRange { value: Duration, min: Duration, max: Duration },

    /// A toroidal grid must be at least as wide as the largest neighborhood
    /// reaches, so every sampled coordinate wraps at most once.
    #[error("toroidal grid must be at least {min}x{min}, got {rows}x{cols}")]
    TooSmallToWrap { rows: usize, cols: usize, min: usize },
}

impl ConfigError {
    pub(crate) fn rows(value: usize, range: &RangeInclusive<usize>) -> Self {
        Self::RowsOutOfRange { value, min: *range.start(), max: *range.end() }
    }

    pub(crate) fn cols(value: usize, range: &RangeInclusive<usize>) -> Self {
        Self::ColsOutOfRange { value, min: *range.start(), max: *range.end() }
    }
}

/// Explicit rows that do not form a valid grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("cell ({row}, {col}) is {value}, expected 0 or 1")]
    InvalidCell { row: usize, col: usize, value: u8 },
}

/// Errors returned by [`crate::Engine`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The background runtime driving the ticker could not be built.
    #[error("failed to start scheduler runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("simulation must be stopped, currently {0}")]
    NotStopped(RunStatus),
}
