// engine.rs - One generation of B3/S23 over a GridStore

use tracing::trace;

use crate::error::{LifeError, Result};
use crate::grid::{CellState, GridStore};

#[rustfmt::skip]
static OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Moore-neighborhood positions of `(row, col)` that lie inside a
/// `rows x cols` grid. Positions past an edge are skipped, never wrapped.
pub fn neighbor_positions(
    rows: usize,
    cols: usize,
    row: usize,
    col: usize,
) -> impl Iterator<Item = (usize, usize)> {
    OFFSETS.iter().filter_map(move |&(dr, dc)| {
        let nr = row.checked_add_signed(dr)?;
        let nc = col.checked_add_signed(dc)?;
        (nr < rows && nc < cols).then_some((nr, nc))
    })
}

/// The rule table.
pub fn next_state(state: CellState, live_neighbors: u8) -> CellState {
    match (state, live_neighbors) {
        (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive, // Survival
        (CellState::Dead, 3) => CellState::Alive,                          // Birth
        _ => CellState::Dead,                                              // Death or stays dead
    }
}

pub fn count_live_neighbors(store: &GridStore, row: usize, col: usize) -> Result<u8> {
    check_bounds(store, row, col)?;
    Ok(live_neighbors(store, row, col))
}

/// Writes the next state of `(row, col)` into the `next` buffer. Reads `current` only.
pub fn apply_rule(store: &mut GridStore, row: usize, col: usize) -> Result<()> {
    check_bounds(store, row, col)?;
    let state = next_state(store.current().cell(row, col), live_neighbors(store, row, col));
    store.set_next(row, col, state)
}

/// Computes every cell of `next` from an untouched `current`, then advances.
pub fn step(store: &mut GridStore) {
    let (rows, cols) = (store.rows(), store.cols());
    for row in 0..rows {
        for col in 0..cols {
            let state = next_state(store.current().cell(row, col), live_neighbors(store, row, col));
            store.put_next(row, col, state);
        }
    }
    store.advance();
    trace!(population = store.population(), "generation computed");
}

fn live_neighbors(store: &GridStore, row: usize, col: usize) -> u8 {
    let current = store.current();
    neighbor_positions(store.rows(), store.cols(), row, col)
        .filter(|&(nr, nc)| current.cell(nr, nc).is_alive())
        .count() as u8
}

fn check_bounds(store: &GridStore, row: usize, col: usize) -> Result<()> {
    if store.current().contains(row, col) {
        Ok(())
    } else {
        Err(LifeError::OutOfBounds {
            row,
            col,
            rows: store.rows(),
            cols: store.cols(),
        })
    }
}
