//! Static board description and winning-line enumeration.
//!
//! Boards are flattened row-major with row 0 at the top:
//! ```text
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Top
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! ...
//! Row 5: [35][36][37][38][39][40][41]  <- Bottom
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Dimensions, run length needed to win, and whether marks fall to the
/// bottom of their column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub width: usize,
    pub height: usize,
    pub run_length: usize,
    pub gravity: bool,
}

/// A winning line: `run_length` flattened board positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combo {
    cells: Vec<usize>,
}

impl Combo {
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }
}

impl BoardGeometry {
    /// 7 wide, 6 high, four in a row, gravity.
    pub const fn connect_four() -> Self {
        BoardGeometry {
            width: 7,
            height: 6,
            run_length: 4,
            gravity: true,
        }
    }

    /// 3×3, three in a row, marks placed directly.
    pub const fn noughts_and_crosses() -> Self {
        BoardGeometry {
            width: 3,
            height: 3,
            run_length: 3,
            gravity: false,
        }
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.width == 0 || self.height == 0 {
            return Err(GeometryError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        if self.run_length < 2 {
            return Err(GeometryError::RunTooShort(self.run_length));
        }
        if self.run_length > self.width.max(self.height) {
            return Err(GeometryError::RunDoesNotFit {
                run_length: self.run_length,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of distinct actions: columns under gravity, cells otherwise.
    pub fn action_count(&self) -> usize {
        if self.gravity {
            self.width
        } else {
            self.cell_count()
        }
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    #[inline]
    pub fn row_of(&self, index: usize) -> usize {
        index / self.width
    }

    #[inline]
    pub fn col_of(&self, index: usize) -> usize {
        index % self.width
    }

    /// Position directly beneath `index`, or `None` on the bottom row.
    #[inline]
    pub fn below(&self, index: usize) -> Option<usize> {
        let below = index + self.width;
        (below < self.cell_count()).then_some(below)
    }

    /// Enumerate every winning line.
    ///
    /// Order is fixed: horizontal, vertical, diagonal sloping down, diagonal
    /// sloping up; within each direction by base row then base column.
    pub fn combos(&self) -> Vec<Combo> {
        let (w, h, run) = (self.width, self.height, self.run_length);
        let mut combos = Vec::new();
        if run == 0 {
            return combos;
        }

        let mut line = |base: usize, step: isize| {
            let cells = (0..run)
                .map(|k| (base as isize + k as isize * step) as usize)
                .collect();
            combos.push(Combo { cells });
        };

        if run <= w {
            for row in 0..h {
                for col in 0..=w - run {
                    line(row * w + col, 1);
                }
            }
        }
        if run <= h {
            for row in 0..=h - run {
                for col in 0..w {
                    line(row * w + col, w as isize);
                }
            }
        }
        if run <= w && run <= h {
            for row in 0..=h - run {
                for col in 0..=w - run {
                    line(row * w + col, w as isize + 1);
                }
            }
            for row in run - 1..h {
                for col in 0..=w - run {
                    line(row * w + col, -(w as isize - 1));
                }
            }
        }

        combos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_connect_four_has_69_combos() {
        assert_eq!(BoardGeometry::connect_four().combos().len(), 69);
    }

    #[test]
    fn test_noughts_and_crosses_has_classic_lines() {
        let combos: HashSet<Vec<usize>> = BoardGeometry::noughts_and_crosses()
            .combos()
            .into_iter()
            .map(|c| {
                let mut cells = c.cells().to_vec();
                cells.sort_unstable();
                cells
            })
            .collect();
        let classic: HashSet<Vec<usize>> = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8],
            [2, 4, 6],
        ]
        .iter()
        .map(|c| c.to_vec())
        .collect();
        assert_eq!(combos, classic);
    }

    #[test]
    fn test_combos_are_stable() {
        let geometry = BoardGeometry::connect_four();
        assert_eq!(geometry.combos(), geometry.combos());
    }

    #[test]
    fn test_connect_four_direction_samples() {
        let combos = BoardGeometry::connect_four().combos();
        // first horizontal, first vertical, first diagonal down, first diagonal up
        assert_eq!(combos[0].cells(), &[0, 1, 2, 3]);
        assert_eq!(combos[24].cells(), &[0, 7, 14, 21]);
        assert_eq!(combos[45].cells(), &[0, 8, 16, 24]);
        assert_eq!(combos[57].cells(), &[21, 15, 9, 3]);
    }

    #[test]
    fn test_combos_stay_in_bounds() {
        let geometry = BoardGeometry::connect_four();
        for combo in geometry.combos() {
            assert_eq!(combo.cells().len(), 4);
            assert!(combo.cells().iter().all(|&i| i < geometry.cell_count()));
        }
    }

    #[test]
    fn test_action_count() {
        assert_eq!(BoardGeometry::connect_four().action_count(), 7);
        assert_eq!(BoardGeometry::noughts_and_crosses().action_count(), 9);
    }

    #[test]
    fn test_below() {
        let geometry = BoardGeometry::connect_four();
        assert_eq!(geometry.below(3), Some(10));
        assert_eq!(geometry.below(38), None);
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        let mut geometry = BoardGeometry::connect_four();
        geometry.run_length = 8;
        assert!(geometry.validate().is_err());
        geometry.run_length = 1;
        assert!(geometry.validate().is_err());
        geometry.run_length = 4;
        geometry.width = 0;
        assert!(geometry.validate().is_err());
        assert!(BoardGeometry::noughts_and_crosses().validate().is_ok());
    }
}
