// simulation.rs - The simulation object: grids, playing flag, generation counter

use std::fmt;

use tracing::debug;

use crate::config::Config;
use crate::engine;
use crate::error::Result;
use crate::grid::{CellState, Grid, GridStore};
use crate::patterns::{self, Pattern};

/// What the start/pause button should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlLabel {
    Start,
    Pause,
    Continue,
}

impl fmt::Display for ControlLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ControlLabel::Start => "start",
            ControlLabel::Pause => "pause",
            ControlLabel::Continue => "continue",
        })
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    pub generation: u64,
    pub playing: bool,
    pub label: ControlLabel,
}

impl Snapshot {
    pub fn population(&self) -> usize {
        self.grid.population()
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    config: Config,
    store: GridStore,
    playing: bool,
    started: bool,
    generation: u64,
}

impl Simulation {
    pub fn new(config: Config) -> Self {
        debug!(
            rows = config.rows(),
            cols = config.cols(),
            interval_ms = config.interval_ms(),
            "simulation created"
        );
        Self {
            config,
            store: GridStore::new(config.rows(), config.cols()),
            playing: false,
            started: false,
            generation: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.store.rows()
    }

    pub fn cols(&self) -> usize {
        self.store.cols()
    }

    pub fn get_state(&self, row: usize, col: usize) -> Result<CellState> {
        self.store.get(row, col)
    }

    /// Flips one cell of the current generation. Allowed while playing; the
    /// edit is seen by the next rule evaluation.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<CellState> {
        let state = self.store.get(row, col)?.toggled();
        self.store.set(row, col, state)?;
        Ok(state)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        self.store.set(row, col, state)
    }

    pub fn start(&mut self) {
        if !self.playing {
            debug!("continue the game");
            self.playing = true;
            self.started = true;
        }
    }

    pub fn pause(&mut self) {
        if self.playing {
            debug!("pause the game");
            self.playing = false;
        }
    }

    pub fn clear(&mut self) {
        debug!("clear the game: stop playing, clear the grid");
        self.playing = false;
        self.started = false;
        self.generation = 0;
        self.store.reset();
    }

    /// Computes one generation regardless of the playing flag.
    pub fn step(&mut self) {
        engine::step(&mut self.store);
        self.generation += 1;
    }

    /// Scheduler entry point: steps only while playing.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.step();
        true
    }

    pub fn load_pattern(&mut self, pattern: &Pattern) {
        self.clear();
        let placed = patterns::apply_pattern(&mut self.store, pattern);
        debug!(pattern = pattern.name, placed, "pattern loaded");
    }

    pub fn randomize(&mut self, seed: u64) {
        self.clear();
        patterns::apply_random_pattern(&mut self.store, seed);
        debug!(seed, population = self.store.population(), "random fill");
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.store.population()
    }

    pub fn control_label(&self) -> ControlLabel {
        match (self.playing, self.started) {
            (true, _) => ControlLabel::Pause,
            (false, true) => ControlLabel::Continue,
            (false, false) => ControlLabel::Start,
        }
    }

    pub fn grid(&self) -> &Grid {
        self.store.current()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.store.current().clone(),
            generation: self.generation,
            playing: self.playing,
            label: self.control_label(),
        }
    }

    /// Halts and releases the simulation, handing back the final generation.
    pub fn teardown(mut self) -> Grid {
        self.pause();
        debug!(generation = self.generation, "simulation torn down");
        self.store.current().clone()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;

    fn small() -> Simulation {
        Simulation::new(Config::new(6, 6, 100).unwrap())
    }

    #[test]
    fn fresh_simulation_is_idle_and_empty() {
        let sim = Simulation::default();
        assert_eq!((sim.rows(), sim.cols()), (24, 24));
        assert!(!sim.is_playing());
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.population(), 0);
        assert_eq!(sim.control_label(), ControlLabel::Start);
    }

    #[test]
    fn toggle_flips_and_reports_new_state() {
        let mut sim = small();
        assert_eq!(sim.toggle_cell(1, 1), Ok(CellState::Alive));
        assert_eq!(sim.get_state(1, 1), Ok(CellState::Alive));
        assert_eq!(sim.toggle_cell(1, 1), Ok(CellState::Dead));
        assert_eq!(sim.get_state(1, 1), Ok(CellState::Dead));
    }

    #[test]
    fn toggle_out_of_bounds_fails() {
        let mut sim = small();
        assert_eq!(
            sim.toggle_cell(6, 0),
            Err(LifeError::OutOfBounds { row: 6, col: 0, rows: 6, cols: 6 })
        );
        assert_eq!(sim.population(), 0);
    }

    #[test]
    fn tick_only_steps_while_playing() {
        let mut sim = small();
        assert!(!sim.tick());
        assert_eq!(sim.generation(), 0);

        sim.start();
        assert!(sim.tick());
        assert_eq!(sim.generation(), 1);

        sim.pause();
        assert!(!sim.tick());
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn manual_step_ignores_playing_flag() {
        let mut sim = small();
        sim.step();
        sim.step();
        assert_eq!(sim.generation(), 2);
        assert!(!sim.is_playing());
    }

    #[test]
    fn label_follows_start_pause_clear() {
        let mut sim = small();
        sim.start();
        assert_eq!(sim.control_label(), ControlLabel::Pause);
        sim.pause();
        assert_eq!(sim.control_label(), ControlLabel::Continue);
        sim.start();
        assert_eq!(sim.control_label().to_string(), "pause");
        sim.clear();
        assert_eq!(sim.control_label().to_string(), "start");
    }

    #[test]
    fn clear_while_playing_halts_and_resets() {
        let mut sim = small();
        sim.toggle_cell(2, 2).unwrap();
        sim.start();
        sim.tick();

        sim.clear();

        assert!(!sim.is_playing());
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.population(), 0);
        assert!(!sim.tick());
    }

    #[test]
    fn load_pattern_halts_and_restarts_count() {
        let mut sim = small();
        sim.start();
        sim.tick();
        sim.load_pattern(patterns::find("Block").unwrap());

        assert!(!sim.is_playing());
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.population(), 4);
        assert_eq!(sim.get_state(2, 2), Ok(CellState::Alive));
    }

    #[test]
    fn randomize_halts_and_restarts_count() {
        let mut sim = small();
        sim.start();
        sim.tick();
        sim.randomize(7);

        assert!(!sim.is_playing());
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.control_label(), ControlLabel::Start);
        assert!(sim.population() > 0);
        assert!(!sim.tick());
    }

    #[test]
    fn toggle_while_playing_feeds_next_tick() {
        let mut sim = small();
        for col in 1..4 {
            sim.toggle_cell(2, col).unwrap();
        }
        sim.start();
        assert!(sim.tick());

        // Vertical blinker plus two arms makes a plus sign.
        sim.toggle_cell(2, 1).unwrap();
        sim.toggle_cell(2, 3).unwrap();
        assert!(sim.is_playing());
        assert!(sim.tick());

        // The plus becomes a ring; an untouched blinker would be horizontal again.
        assert_eq!(sim.population(), 8);
        assert_eq!(sim.get_state(2, 2), Ok(CellState::Dead));
        for (r, c) in [(1, 1), (1, 3), (3, 1), (3, 3), (1, 2), (3, 2)] {
            assert_eq!(sim.get_state(r, c), Ok(CellState::Alive), "({r}, {c})");
        }
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut sim = small();
        sim.toggle_cell(0, 5).unwrap();
        sim.start();
        let snap = sim.snapshot();
        assert!(snap.playing);
        assert_eq!(snap.label, ControlLabel::Pause);
        assert_eq!(snap.population(), 1);
        assert_eq!(snap.grid.get(0, 5), Ok(CellState::Alive));
    }

    #[test]
    fn teardown_returns_final_grid() {
        let mut sim = small();
        sim.toggle_cell(3, 4).unwrap();
        sim.start();
        let grid = sim.teardown();
        assert_eq!(grid.get(3, 4), Ok(CellState::Alive));
    }
}
