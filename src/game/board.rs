use std::fmt;

use super::geometry::BoardGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    MarkA,
    MarkB,
}

impl Cell {
    /// Numeric mark: 0 empty, 1 for player one, 2 for player two.
    pub fn mark(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::MarkA => 1,
            Cell::MarkB => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '•',
            Cell::MarkA => 'X',
            Cell::MarkB => 'O',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    CellOccupied,
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    geometry: BoardGeometry,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(geometry: BoardGeometry) -> Self {
        Board {
            geometry,
            cells: vec![Cell::Empty; geometry.cell_count()],
        }
    }

    /// Build a board from numeric marks (0 empty, 1, 2). Returns `None` if the
    /// length does not match the geometry or a mark is unknown.
    pub fn from_marks(geometry: BoardGeometry, marks: &[u8]) -> Option<Self> {
        if marks.len() != geometry.cell_count() {
            return None;
        }
        let cells = marks
            .iter()
            .map(|&m| match m {
                0 => Some(Cell::Empty),
                1 => Some(Cell::MarkA),
                2 => Some(Cell::MarkB),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Board { geometry, cells })
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Numeric view of the board, the shape collaborators encode from.
    pub fn marks(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.mark()).collect()
    }

    /// Get the cell at a flattened index
    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Row 0 is the top
    pub fn get_at(&self, row: usize, col: usize) -> Cell {
        self.cells[self.geometry.index(row, col)]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.geometry.width {
            return true;
        }
        self.cells[col] != Cell::Empty
    }

    /// True iff `action` is in range and its column/cell has room.
    pub fn can_play(&self, action: usize) -> bool {
        if action >= self.geometry.action_count() {
            return false;
        }
        if self.geometry.gravity {
            !self.is_column_full(action)
        } else {
            self.cells[action] == Cell::Empty
        }
    }

    /// Get list of playable actions, ascending
    pub fn legal_actions(&self) -> Vec<usize> {
        (0..self.geometry.action_count())
            .filter(|&action| self.can_play(action))
            .collect()
    }

    /// Put a mark on a specific cell (no gravity).
    pub fn place_at(&mut self, index: usize, cell: Cell) -> Result<(), MoveError> {
        match self.cells.get(index) {
            None => Err(MoveError::OutOfRange),
            Some(Cell::Empty) => {
                self.cells[index] = cell;
                Ok(())
            }
            Some(_) => Err(MoveError::CellOccupied),
        }
    }

    /// Drop a piece in a column, returns the flattened index where it landed
    pub fn drop_in_column(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= self.geometry.width {
            return Err(MoveError::OutOfRange);
        }

        // Find the lowest empty row in this column
        for row in (0..self.geometry.height).rev() {
            let index = self.geometry.index(row, col);
            if self.cells[index] == Cell::Empty {
                self.cells[index] = cell;
                return Ok(index);
            }
        }

        Err(MoveError::ColumnFull)
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.geometry.width;
        for (i, row) in self.cells.chunks(width).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
