// patterns.rs - Named seed patterns and random fill

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::{CellState, GridStore};

/// A seed pattern as `(row, col)` offsets from its top-left corner.
#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0)
    }

    /// Offset that centers the pattern; `(0, 0)` on an axis where it does not fit.
    pub fn centered_origin(&self, rows: usize, cols: usize) -> (usize, usize) {
        (rows.saturating_sub(self.height()) / 2, cols.saturating_sub(self.width()) / 2)
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 24),
            (1, 22), (1, 24),
            (2, 12), (2, 13), (2, 20), (2, 21), (2, 34), (2, 35),
            (3, 11), (3, 15), (3, 20), (3, 21), (3, 34), (3, 35),
            (4, 0), (4, 1), (4, 10), (4, 16), (4, 20), (4, 21),
            (5, 0), (5, 1), (5, 10), (5, 14), (5, 16), (5, 17), (5, 22), (5, 24),
            (6, 10), (6, 16), (6, 24),
            (7, 11), (7, 15),
            (8, 12), (8, 13),
        ],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Clears the store and stamps `pattern` centered in it. Cells that fall
/// outside the grid are dropped. Returns how many cells were placed.
pub fn apply_pattern(store: &mut GridStore, pattern: &Pattern) -> usize {
    store.reset();
    let (top, left) = pattern.centered_origin(store.rows(), store.cols());
    pattern
        .cells
        .iter()
        .filter(|&&(r, c)| store.set(top + r, left + c, CellState::Alive).is_ok())
        .count()
}

/// Clears the store and fills roughly a third of the cells, deterministically per seed.
pub fn apply_random_pattern(store: &mut GridStore, seed_value: u64) {
    store.reset();

    let mut hasher = DefaultHasher::new();
    seed_value.hash(&mut hasher);
    let mut seed = hasher.finish();

    for row in 0..store.rows() {
        for col in 0..store.cols() {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if (seed >> 33) % 3 == 0 {
                store.put(row, col, CellState::Alive);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_extents() {
        let glider = find("glider").unwrap();
        assert_eq!((glider.height(), glider.width()), (3, 3));
        let pulsar = find("Pulsar").unwrap();
        assert_eq!((pulsar.height(), pulsar.width()), (13, 13));
        assert_eq!(pulsar.cells.len(), 48);
        assert_eq!(find("Gosper Glider Gun").unwrap().cells.len(), 36);
        assert!(find("no such thing").is_none());
    }

    #[test]
    fn pattern_is_centered() {
        let mut store = GridStore::new(5, 5);
        let placed = apply_pattern(&mut store, find("Blinker").unwrap());
        assert_eq!(placed, 3);
        for col in 1..4 {
            assert_eq!(store.get(2, col), Ok(CellState::Alive));
        }
        assert_eq!(store.population(), 3);
    }

    #[test]
    fn oversized_pattern_is_clipped() {
        let mut store = GridStore::new(24, 24);
        let gun = find("Gosper Glider Gun").unwrap();
        let placed = apply_pattern(&mut store, gun);
        assert!(placed < gun.cells.len());
        assert_eq!(store.population(), placed);
    }

    #[test]
    fn apply_pattern_replaces_previous_cells() {
        let mut store = GridStore::new(10, 10);
        store.set(0, 0, CellState::Alive).unwrap();
        apply_pattern(&mut store, find("Block").unwrap());
        assert_eq!(store.get(0, 0), Ok(CellState::Dead));
        assert_eq!(store.population(), 4);
    }

    #[test]
    fn random_fill_is_deterministic_per_seed() {
        let mut a = GridStore::new(24, 24);
        let mut b = GridStore::new(24, 24);
        apply_random_pattern(&mut a, 7);
        apply_random_pattern(&mut b, 7);
        assert_eq!(a.current(), b.current());

        let population = a.population();
        assert!(population > 0 && population < 24 * 24);
    }
}
