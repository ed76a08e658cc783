//! Conway's Game of Life on a fixed, edge-clipped grid.
//!
//! [`Simulation`] is the core: a double-buffered [`GridStore`] advanced by the
//! [`engine`], plus the playing flag and command methods a front end calls.
//! [`scheduler`] runs a simulation as a cancellable repeating tokio task.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod scheduler;
pub mod simulation;

pub use config::Config;
pub use error::{LifeError, Result};
pub use grid::{CellState, Grid, GridStore};
pub use patterns::{Pattern, PATTERNS};
pub use scheduler::{Command, SimulationHandle};
pub use simulation::{ControlLabel, Simulation, Snapshot};
