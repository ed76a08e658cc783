// error.rs - Error types for the simulation core

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifeError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },
    #[error("the scheduler task has stopped")]
    SchedulerStopped,
}

pub type Result<T> = std::result::Result<T, LifeError>;
