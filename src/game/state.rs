use super::{Board, BoardGeometry, MoveError, Player};

/// The mutable board and whose turn it is.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
}

impl GameState {
    /// Create initial game state
    pub fn initial(geometry: BoardGeometry) -> Self {
        GameState {
            board: Board::new(geometry),
            current_player: Player::One, // One starts
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.other();
    }

    /// Mark a cell directly for the current player (no gravity).
    pub fn place_at(&mut self, index: usize) -> Result<usize, MoveError> {
        self.board
            .place_at(index, self.current_player.to_cell())
            .map(|()| index)
    }

    /// Drop the current player's piece into a column.
    pub fn drop_in_column(&mut self, column: usize) -> Result<usize, MoveError> {
        self.board
            .drop_in_column(column, self.current_player.to_cell())
    }

    /// Apply an action for the current player without switching turns.
    /// Returns the flattened index that was marked.
    pub fn apply_move(&mut self, action: usize) -> Result<usize, MoveError> {
        if self.board.geometry().gravity {
            self.drop_in_column(action)
        } else {
            self.place_at(action)
        }
    }
}
