// engine.rs - Epoch stepping, run state and the tick-driven loop

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tokio::task::JoinError;

use crate::boundary::BoundaryMode;
use crate::config::{InputMode, SimulationConfig};
use crate::error::EngineError;
use crate::grid::Grid;
use crate::neighborhood::NeighborhoodKind;
use crate::patterns::Pattern;
use crate::point::GridPoint;
use crate::scheduler::{TickWaker, Ticker};

/// Committed generations remembered for cycle detection.
const HISTORY_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunStatus {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl RunStatus {
    pub fn display_name(self) -> &'static str {
        match self {
            RunStatus::Stopped => "Stopped",
            RunStatus::Running => "Running",
            RunStatus::Paused  => "Paused",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Counters published after every committed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStats {
    pub epoch: u64,
    pub live_count: usize,
    pub status: RunStatus,
    /// The current generation repeats one of the last few.
    pub cycle_detected: bool,
}

/// Next state of `cell`, reading neighbors from `grid` under `mode`.
pub fn next_cell_state(grid: &Grid, cell: GridPoint, kind: NeighborhoodKind, mode: BoundaryMode) -> u8 {
    let live: usize = kind
        .neighbors(cell)
        .into_iter()
        .map(|point| usize::from(grid.read(point, mode)))
        .sum();
    kind.rule().next_state(grid.read(cell, mode), live)
}

/// Row coroutine: evaluates one row of the next generation.
async fn evolve_row(
    current: Arc<Grid>,
    row: usize,
    kind: NeighborhoodKind,
    mode: BoundaryMode,
) -> (usize, Vec<u8>) {
    let mut cells = Vec::with_capacity(current.cols());
    for col in 0..current.cols() {
        let cell = GridPoint::new(row as i32, col as i32);
        cells.push(next_cell_state(&current, cell, kind, mode));
        tokio::task::yield_now().await;  // Cooperative yielding
    }
    (row, cells)
}

/// Owns the one grid of a running simulation.
///
/// The engine is driven from a single thread: commands, [`Engine::step`] and
/// [`Engine::pump`] all take `&mut self`. The periodic timer lives on a
/// background runtime and only hands ticks back to [`Engine::pump`]. Do not
/// call `step` or `pump` from inside an async context; stepping blocks on
/// the engine's own runtime.
pub struct Engine {
    config: SimulationConfig,
    grid: Grid,
    /// Neighborhood snapshotted when the run last entered `Running`.
    active: NeighborhoodKind,
    epoch: u64,
    live_count: usize,
    status: RunStatus,
    cycle_detected: bool,
    history: VecDeque<u64>,
    rng: StdRng,
    stats: watch::Sender<EngineStats>,
    waker: Option<TickWaker>,
    ticker: Ticker,
    runtime: Runtime,
}

impl Engine {
    /// A stopped engine with a grid filled according to `config.input`.
    pub fn new(config: SimulationConfig) -> Result<Self, EngineError> {
        Self::build(config, StdRng::from_entropy())
    }

    /// Like [`Engine::new`] with a reproducible random source.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self, EngineError> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    /// A stopped engine starting from an explicit grid. The grid's shape
    /// replaces `config.rows`/`config.cols` and is not range-checked, except
    /// that a toroidal grid must be at least
    /// [`NeighborhoodKind::MAX_RADIUS`] cells along each axis.
    pub fn with_grid(config: SimulationConfig, grid: Grid) -> Result<Self, EngineError> {
        let config = SimulationConfig { rows: grid.rows(), cols: grid.cols(), ..config };
        config.validate_settings()?;
        let mut engine = Self::assemble(config, grid, StdRng::from_entropy())?;
        engine.rebase();
        Ok(engine)
    }

    fn build(config: SimulationConfig, rng: StdRng) -> Result<Self, EngineError> {
        config.validate()?;
        let grid = Grid::new(config.rows, config.cols);
        let mut engine = Self::assemble(config, grid, rng)?;
        engine.refill();
        Ok(engine)
    }

    fn assemble(config: SimulationConfig, grid: Grid, rng: StdRng) -> Result<Self, EngineError> {
        let runtime = Runtime::new()?;
        let (stats, _) = watch::channel(EngineStats::default());
        Ok(Self {
            active: config.neighborhood,
            config,
            grid,
            epoch: 0,
            live_count: 0,
            status: RunStatus::Stopped,
            cycle_detected: false,
            history: VecDeque::with_capacity(HISTORY_LEN),
            rng,
            stats,
            waker: None,
            ticker: Ticker::new(),
            runtime,
        })
    }

    pub fn config(&self) -> &SimulationConfig { &self.config }
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn status(&self) -> RunStatus { self.status }
    pub fn epoch(&self) -> u64 { self.epoch }
    pub fn live_count(&self) -> usize { self.live_count }

    /// Neighborhood the next epoch will use.
    pub fn stepping_neighborhood(&self) -> NeighborhoodKind {
        match self.status {
            RunStatus::Running => self.active,
            RunStatus::Stopped | RunStatus::Paused => self.config.neighborhood,
        }
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            epoch: self.epoch,
            live_count: self.live_count,
            status: self.status,
            cycle_detected: self.cycle_detected,
        }
    }

    /// Receiver that sees the stats after every committed change.
    pub fn subscribe(&self) -> watch::Receiver<EngineStats> {
        self.stats.subscribe()
    }

    /// Called from the timer thread after each tick, e.g. to request a repaint.
    pub fn set_tick_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    /// Changes the selected neighborhood. A running simulation keeps the one
    /// it started with until it next enters `Running`.
    pub fn select_neighborhood(&mut self, kind: NeighborhoodKind) {
        self.config.neighborhood = kind;
    }

    /// Applies a new configuration. Only allowed while stopped.
    ///
    /// A new shape, live percentage or input mode refills the grid; boundary,
    /// neighborhood and tick interval changes keep the current cells.
    pub fn reconfigure(&mut self, config: SimulationConfig) -> Result<(), EngineError> {
        if self.status != RunStatus::Stopped {
            return Err(EngineError::NotStopped(self.status));
        }
        config.validate()?;

        let reshape = (config.rows, config.cols) != (self.grid.rows(), self.grid.cols());
        let refill = reshape
            || config.live_percent != self.config.live_percent
            || config.input != self.config.input;

        log::info!("reconfigured: {config:?}");
        self.config = config;
        if reshape {
            self.grid.reshape(self.config.rows, self.config.cols);
        }
        if refill {
            self.epoch = 0;
            self.refill();
        } else {
            self.publish();
        }
        Ok(())
    }

    /// Enters `Running` and arms the periodic loop, snapshotting the selected
    /// neighborhood. Calling it while running restarts the timer.
    pub fn start(&mut self) {
        let previous = self.status;
        self.active = self.config.neighborhood;
        self.ticker.start(self.runtime.handle(), self.config.tick_interval, self.waker.clone());
        self.status = RunStatus::Running;
        match previous {
            RunStatus::Paused => log::info!("resumed at epoch {} with {}", self.epoch, self.active),
            _                 => log::info!("started with {} ({})", self.active, self.config.boundary),
        }
        self.publish();
    }

    /// Halts the loop, keeping grid and epoch. No-op unless running.
    pub fn pause(&mut self) -> bool {
        if self.status != RunStatus::Running {
            log::debug!("pause ignored while {}", self.status);
            return false;
        }
        self.ticker.cancel();
        self.status = RunStatus::Paused;
        log::info!("paused at epoch {}", self.epoch);
        self.publish();
        true
    }

    /// Continues a paused run. No-op unless paused.
    pub fn resume(&mut self) -> bool {
        if self.status != RunStatus::Paused {
            log::debug!("resume ignored while {}", self.status);
            return false;
        }
        self.start();
        true
    }

    /// Cancels the loop, zeroes the epoch and refills the grid: random in
    /// automatic mode, empty in manual mode.
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.status = RunStatus::Stopped;
        self.epoch = 0;
        self.refill();
        log::info!("reset ({} input, {} live)", self.config.input, self.live_count);
    }

    /// Flips one cell. Manual input while stopped only.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> bool {
        if self.status != RunStatus::Stopped || self.config.input != InputMode::Manual {
            log::debug!("toggle ignored ({} input, {})", self.config.input, self.status);
            return false;
        }
        if self.grid.toggle(row, col).is_none() {
            log::debug!("toggle ignored, ({row}, {col}) is outside the grid");
            return false;
        }
        self.rebase();
        true
    }

    /// Re-rolls the random grid. Automatic input while stopped only.
    pub fn randomize(&mut self) -> bool {
        if self.status != RunStatus::Stopped || self.config.input != InputMode::Automatic {
            log::debug!("randomize ignored ({} input, {})", self.config.input, self.status);
            return false;
        }
        self.epoch = 0;
        self.refill();
        true
    }

    /// Replaces the grid with a centred preset. Stopped only.
    pub fn load_pattern(&mut self, pattern: &Pattern) -> bool {
        if self.status != RunStatus::Stopped {
            log::debug!("pattern ignored while {}", self.status);
            return false;
        }
        let placed = pattern.apply(&mut self.grid);
        self.epoch = 0;
        log::info!("loaded pattern {} ({placed} cells)", pattern.name);
        self.rebase();
        true
    }

    /// Computes the next state of one cell without committing anything.
    pub fn evaluate_cell(&self, row: usize, col: usize) -> u8 {
        let cell = GridPoint::new(row as i32, col as i32);
        next_cell_state(&self.grid, cell, self.stepping_neighborhood(), self.config.boundary)
    }

    /// Advances one epoch. Every cell reads the generation that existed when
    /// the epoch began; the next generation is committed in one replace.
    pub fn step(&mut self) -> EngineStats {
        let kind = self.stepping_neighborhood();
        kind.assert_consistent();
        let mode = self.config.boundary;

        // Shared read-only snapshot for the row tasks
        let current = Arc::new(self.grid.clone());
        let (rows, cols) = (current.rows(), current.cols());

        let next = self.runtime.block_on(async move {
            let handles: Vec<_> = (0..rows)
                .map(|row| tokio::spawn(evolve_row(Arc::clone(&current), row, kind, mode)))
                .collect();

            let mut next = vec![0u8; rows * cols];
            for handle in handles {
                let (row, cells) = match handle.await {
                    Ok(done) => done,
                    Err(err) => rethrow(err),
                };
                next[row * cols..(row + 1) * cols].copy_from_slice(&cells);
            }
            next
        });

        let live_count = next.iter().filter(|&&c| c == 1).count();
        self.grid.replace(next);
        self.epoch += 1;
        self.live_count = live_count;
        self.remember_generation();
        log::trace!("epoch {}: {} live", self.epoch, self.live_count);
        self.publish();
        self.stats()
    }

    /// Runs one epoch per tick delivered since the last call.
    /// Returns the number of epochs advanced.
    pub fn pump(&mut self) -> usize {
        let ticks = self.ticker.drain();
        let mut stepped = 0;
        while stepped < ticks && self.status == RunStatus::Running {
            self.step();
            stepped += 1;
        }
        stepped
    }

    /// Fills the grid according to the input mode and starts a fresh history.
    fn refill(&mut self) {
        match self.config.input {
            InputMode::Automatic => self.grid.reset_random(self.config.live_percent, &mut self.rng),
            InputMode::Manual    => self.grid.reset_zero(),
        }
        self.rebase();
    }

    /// Recounts the grid after an edit and forgets earlier generations.
    fn rebase(&mut self) {
        self.live_count = self.grid.live_count();
        self.history.clear();
        self.cycle_detected = false;
        self.remember_generation();
        self.publish();
    }

    fn remember_generation(&mut self) {
        let fingerprint = self.grid.fingerprint();
        self.cycle_detected = self.history.contains(&fingerprint);
        if self.cycle_detected && self.status == RunStatus::Running {
            log::debug!("cycle detected at epoch {}", self.epoch);
        }
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(fingerprint);
    }

    fn publish(&self) {
        self.stats.send_replace(self.stats());
    }
}

/// Re-raises a row task's panic on the stepping thread.
fn rethrow(err: JoinError) -> ! {
    match err.try_into_panic() {
        Ok(payload) => std::panic::resume_unwind(payload),
        Err(err) => panic!("row task did not complete: {err}"),
    }
}
