//! Binary 2-D cellular automaton with pluggable neighborhoods.
//!
//! A [`Grid`] of 0/1 cells is advanced one epoch at a time by an [`Engine`].
//! Each epoch every cell samples the coordinates produced by its
//! [`NeighborhoodKind`], resolves them through the [`BoundaryMode`] (finite
//! edges read as dead, toroidal edges wrap) and applies the kind's
//! birth/survival [`Rule`].
//!
//! ```no_run
//! use automaton::{Engine, NeighborhoodKind, SimulationConfig};
//!
//! let config = SimulationConfig { neighborhood: NeighborhoodKind::Moore, ..Default::default() };
//! let mut engine = Engine::new(config)?;
//! engine.start();
//! loop {
//!     engine.pump();
//!     println!("epoch {}: {} live", engine.epoch(), engine.live_count());
//!     std::thread::sleep(std::time::Duration::from_millis(50));
//! }
//! # Ok::<(), automaton::EngineError>(())
//! ```

pub mod boundary;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod neighborhood;
pub mod patterns;
pub mod point;
pub mod scheduler;

pub use boundary::BoundaryMode;
pub use config::{InputMode, SimulationConfig};
pub use engine::{Engine, EngineStats, RunStatus, next_cell_state};
pub use error::{ConfigError, EngineError, ShapeError};
pub use grid::Grid;
pub use neighborhood::{NeighborhoodKind, Rule};
pub use patterns::{PATTERNS, Pattern};
pub use point::GridPoint;
pub use scheduler::Ticker;
