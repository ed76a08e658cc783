// grid.rs - Grid types for Conway's Game of Life

use crate::error::{LifeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    Alive,
    #[default]
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }
}

/// A dense `rows x cols` matrix of cell states, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// All-dead grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Dead; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState> {
        self.index_of(row, col).map(|i| self.cells[i])
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        let i = self.index_of(row, col)?;
        self.cells[i] = state;
        Ok(())
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Row-major iterator over `(row, col, state)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &state)| (i / cols, i % cols, state))
    }

    pub(crate) fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    // Caller guarantees the coordinate is in bounds.
    pub(crate) fn cell(&self, row: usize, col: usize) -> CellState {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn put(&mut self, row: usize, col: usize, state: CellState) {
        self.cells[row * self.cols + col] = state;
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize> {
        if self.contains(row, col) {
            Ok(row * self.cols + col)
        } else {
            Err(LifeError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

/// The double buffer: `current` is what everyone reads, `next` is scratch
/// space written by the generation engine and consumed by [`GridStore::advance`].
#[derive(Debug, Clone)]
pub struct GridStore {
    current: Grid,
    next: Grid,
}

impl GridStore {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            current: Grid::new(rows, cols),
            next: Grid::new(rows, cols),
        }
    }

    pub fn rows(&self) -> usize {
        self.current.rows()
    }

    pub fn cols(&self) -> usize {
        self.current.cols()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState> {
        self.current.get(row, col)
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        self.current.set(row, col, state)
    }

    pub fn set_next(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        self.next.set(row, col, state)
    }

    pub(crate) fn put(&mut self, row: usize, col: usize, state: CellState) {
        self.current.put(row, col, state);
    }

    pub(crate) fn put_next(&mut self, row: usize, col: usize, state: CellState) {
        self.next.put(row, col, state);
    }

    /// `current` takes the contents of `next`, then `next` is cleared to dead.
    pub fn advance(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.next.fill(CellState::Dead);
    }

    pub fn reset(&mut self) {
        self.current.fill(CellState::Dead);
        self.next.fill(CellState::Dead);
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn population(&self) -> usize {
        self.current.population()
    }

    #[cfg(test)]
    pub(crate) fn next(&self) -> &Grid {
        &self.next
    }
}
