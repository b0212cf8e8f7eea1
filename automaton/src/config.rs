// config.rs - Simulation settings and their accepted ranges

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::boundary::BoundaryMode;
use crate::error::ConfigError;
use crate::grid::{DEFAULT_COLS, DEFAULT_ROWS};
use crate::neighborhood::NeighborhoodKind;

pub const DIMENSION_RANGE: RangeInclusive<usize> = 10..=100;
pub const LIVE_PERCENT_RANGE: RangeInclusive<u8> = 10..=80;
pub const TICK_INTERVAL_MIN: Duration = Duration::from_millis(100);
pub const TICK_INTERVAL_MAX: Duration = Duration::from_millis(200);

/// Where the initial cells come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    /// Random fill at `live_percent`.
    #[default]
    Automatic,
    /// Cells are drawn by hand; resets leave the grid empty.
    Manual,
}

impl InputMode {
    pub const ALL: [InputMode; 2] = [InputMode::Automatic, InputMode::Manual];

    pub fn display_name(self) -> &'static str {
        match self {
            InputMode::Automatic => "Automatic",
            InputMode::Manual    => "Manual",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    pub live_percent: u8,
    pub boundary: BoundaryMode,
    pub neighborhood: NeighborhoodKind,
    pub input: InputMode,
    pub tick_interval: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            live_percent: 20,
            boundary: BoundaryMode::Finite,
            neighborhood: NeighborhoodKind::VonNeumann,
            input: InputMode::Automatic,
            tick_interval: TICK_INTERVAL_MIN,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !DIMENSION_RANGE.contains(&self.rows) {
            return Err(ConfigError::rows(self.rows, &DIMENSION_RANGE));
        }
        if !DIMENSION_RANGE.contains(&self.cols) {
            return Err(ConfigError::cols(self.cols, &DIMENSION_RANGE));
        }
        self.validate_settings()
    }

    /// Everything except the dimension range. The shape still has to be
    /// wide enough to wrap when the boundary is toroidal.
    pub(crate) fn validate_settings(&self) -> Result<(), ConfigError> {
        // Checked against every kind, since the neighborhood can be switched at any time
        let min = NeighborhoodKind::MAX_RADIUS;
        if self.boundary == BoundaryMode::Toroidal && (self.rows < min || self.cols < min) {
            return Err(ConfigError::TooSmallToWrap { rows: self.rows, cols: self.cols, min });
        }
        if !LIVE_PERCENT_RANGE.contains(&self.live_percent) {
            return Err(ConfigError::LivePercentOutOfRange {
                value: self.live_percent,
                min: *LIVE_PERCENT_RANGE.start(),
                max: *LIVE_PERCENT_RANGE.end(),
            });
        }
        if !(TICK_INTERVAL_MIN..=TICK_INTERVAL_MAX).contains(&self.tick_interval) {
            return Err(ConfigError::TickIntervalOutOfRange {
                value: self.tick_interval,
                min: TICK_INTERVAL_MIN,
                max: TICK_INTERVAL_MAX,
            });
        }
        Ok(())
    }

    /// Pulls every numeric field into its accepted range.
    pub fn clamped(self) -> Self {
        Self {
            rows: self.rows.clamp(*DIMENSION_RANGE.start(), *DIMENSION_RANGE.end()),
            cols: self.cols.clamp(*DIMENSION_RANGE.start(), *DIMENSION_RANGE.end()),
            live_percent: self.live_percent.clamp(*LIVE_PERCENT_RANGE.start(), *LIVE_PERCENT_RANGE.end()),
            tick_interval: self.tick_interval.clamp(TICK_INTERVAL_MIN, TICK_INTERVAL_MAX),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_small_grids() {
        let config = SimulationConfig { rows: 5, ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RowsOutOfRange { value: 5, min: 10, max: 100 })
        );
        let config = SimulationConfig { cols: 101, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::ColsOutOfRange { value: 101, .. })));
    }

    #[test]
    fn rejects_live_percent_and_interval() {
        let config = SimulationConfig { live_percent: 90, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::LivePercentOutOfRange { value: 90, .. })));
        let config = SimulationConfig { tick_interval: Duration::from_millis(5), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::TickIntervalOutOfRange { .. })));
    }

    #[test]
    fn toroidal_needs_room_to_wrap() {
        let config = SimulationConfig {
            rows: 1,
            cols: 3,
            boundary: BoundaryMode::Toroidal,
            ..Default::default()
        };
        assert_eq!(
            config.validate_settings(),
            Err(ConfigError::TooSmallToWrap { rows: 1, cols: 3, min: 2 })
        );

        let config = SimulationConfig { rows: 2, cols: 2, ..config };
        assert_eq!(config.validate_settings(), Ok(()));

        let config = SimulationConfig { rows: 1, cols: 1, boundary: BoundaryMode::Finite, ..config };
        assert_eq!(config.validate_settings(), Ok(()));
    }

    #[test]
    fn clamped_is_always_valid() {
        let config = SimulationConfig {
            rows: 0,
            cols: 1000,
            live_percent: 0,
            tick_interval: Duration::from_secs(3),
            ..Default::default()
        }
        .clamped();
        assert_eq!((config.rows, config.cols, config.live_percent), (10, 100, 10));
        assert_eq!(config.tick_interval, TICK_INTERVAL_MAX);
        assert_eq!(config.validate(), Ok(()));
    }
}
