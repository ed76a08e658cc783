// scheduler.rs - Cancellable repeating task that drives a Simulation
//
// The task owns the Simulation outright. Commands arrive over a channel and
// are handled one at a time, interleaved with ticks, so a step never overlaps
// a toggle or a read. Renderers watch the published snapshot.

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

use crate::error::{LifeError, Result};
use crate::patterns::Pattern;
use crate::simulation::{Simulation, Snapshot};

#[derive(Debug, Clone, Copy)]
pub enum Command {
    Toggle { row: usize, col: usize },
    Start,
    Pause,
    Clear,
    Step,
    LoadPattern(&'static Pattern),
    Randomize(u64),
    Shutdown,
}

/// Cheap, cloneable front door to a running scheduler task.
#[derive(Debug, Clone)]
pub struct SimulationHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<Snapshot>,
    rows: usize,
    cols: usize,
}

impl SimulationHandle {
    pub fn send(&self, command: Command) -> Result<()> {
        self.commands.send(command).map_err(|_| LifeError::SchedulerStopped)
    }

    /// Bounds are checked here so a bad coordinate fails at the caller.
    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.send(Command::Toggle { row, col })
    }

    pub fn start(&self) -> Result<()> {
        self.send(Command::Start)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(Command::Pause)
    }

    pub fn clear(&self) -> Result<()> {
        self.send(Command::Clear)
    }

    pub fn step(&self) -> Result<()> {
        self.send(Command::Step)
    }

    pub fn load_pattern(&self, pattern: &'static Pattern) -> Result<()> {
        self.send(Command::LoadPattern(pattern))
    }

    pub fn randomize(&self, seed: u64) -> Result<()> {
        self.send(Command::Randomize(seed))
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Latest published state.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Waits for the next published snapshot.
    pub async fn changed(&mut self) -> Result<Snapshot> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| LifeError::SchedulerStopped)?;
        Ok(self.snapshots.borrow_and_update().clone())
    }
}

/// Spawns the scheduler on the current runtime.
pub fn spawn(simulation: Simulation) -> (SimulationHandle, JoinHandle<Simulation>) {
    spawn_on(simulation, &Handle::current())
}

/// Spawns the scheduler on `runtime`. The join handle yields the simulation
/// back once the task is shut down or every handle is dropped.
pub fn spawn_on(
    simulation: Simulation,
    runtime: &Handle,
) -> (SimulationHandle, JoinHandle<Simulation>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(simulation.snapshot());

    let handle = SimulationHandle {
        commands: command_tx,
        snapshots: snapshot_rx,
        rows: simulation.rows(),
        cols: simulation.cols(),
    };
    let task = runtime.spawn(run(simulation, command_rx, snapshot_tx));
    (handle, task)
}

async fn run(
    mut simulation: Simulation,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<Snapshot>,
) -> Simulation {
    debug!("starting scheduler");
    let interval = simulation.config().interval();
    // Armed only while playing.
    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            biased;

            command = commands.recv() => {
                match command {
                    None | Some(Command::Shutdown) => break,
                    Some(command) => deadline = apply(&mut simulation, command, deadline),
                }
            }
            _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = if simulation.tick() {
                    trace!(generation = simulation.generation(), "tick");
                    Some(Instant::now() + interval)
                } else {
                    None
                };
            }
        }
        snapshots.send_replace(simulation.snapshot());
    }

    simulation.pause();
    snapshots.send_replace(simulation.snapshot());
    debug!(generation = simulation.generation(), "scheduler stopped");
    simulation
}

fn apply(
    simulation: &mut Simulation,
    command: Command,
    deadline: Option<Instant>,
) -> Option<Instant> {
    match command {
        Command::Toggle { row, col } => {
            if let Err(e) = simulation.toggle_cell(row, col) {
                warn!(%e, "toggle rejected");
            }
            deadline
        }
        Command::Start if simulation.is_playing() => deadline,
        Command::Start => {
            simulation.start();
            Some(Instant::now())
        }
        Command::Pause => {
            simulation.pause();
            None
        }
        Command::Clear => {
            simulation.clear();
            None
        }
        Command::Step => {
            simulation.step();
            deadline
        }
        Command::LoadPattern(pattern) => {
            simulation.load_pattern(pattern);
            None
        }
        Command::Randomize(seed) => {
            simulation.randomize(seed);
            None
        }
        Command::Shutdown => None,
    }
}
