//! Pure terminal and legality predicates over a board.

use super::{Board, BoardGeometry, Cell, Combo, Player};

/// Legality and terminal checks for one geometry. Combos are enumerated
/// once on construction and reused for every query.
#[derive(Debug, Clone)]
pub struct Rules {
    geometry: BoardGeometry,
    combos: Vec<Combo>,
}

impl Rules {
    pub fn new(geometry: BoardGeometry) -> Self {
        Rules {
            geometry,
            combos: geometry.combos(),
        }
    }

    /// True iff the action is in range and its column/cell has room.
    pub fn is_legal(&self, board: &Board, action: usize) -> bool {
        board.can_play(action)
    }

    /// Get list of legal actions, ascending
    pub fn legal_actions(&self, board: &Board) -> Vec<usize> {
        board.legal_actions()
    }

    /// True iff some combo is entirely marked by `player`.
    pub fn has_won(&self, board: &Board, player: Player) -> bool {
        let mark = player.to_cell();
        self.combos
            .iter()
            .any(|combo| combo.cells().iter().all(|&i| board.get(i) == mark))
    }

    /// True iff the player after `acting` holds all but one cell of some combo
    /// and could claim the last one on their next move.
    ///
    /// Under gravity the empty cell must be playable right now: on the bottom
    /// row or resting on an occupied cell. Checking only the cell directly
    /// beneath is enough because a column never has a gap under a mark.
    pub fn opponent_can_win_next(&self, board: &Board, acting: Player) -> bool {
        let opponent = acting.other().to_cell();
        let needed = self.geometry.run_length - 1;

        self.combos.iter().any(|combo| {
            let mut owned = 0;
            let mut empty = None;
            for &i in combo.cells() {
                match board.get(i) {
                    c if c == opponent => owned += 1,
                    Cell::Empty => {
                        if empty.is_some() {
                            return false;
                        }
                        empty = Some(i);
                    }
                    _ => return false,
                }
            }
            match empty {
                Some(slot) if owned == needed => self.is_playable(board, slot),
                _ => false,
            }
        })
    }

    /// Draw check: the board is full or has a single empty cell left.
    pub fn is_full_or_one_away(&self, board: &Board) -> bool {
        board.occupied_count() + 1 >= self.geometry.cell_count()
    }

    fn is_playable(&self, board: &Board, index: usize) -> bool {
        if !self.geometry.gravity {
            return true;
        }
        match self.geometry.below(index) {
            None => true,
            Some(below) => board.get(below) != Cell::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c4() -> (Rules, Board) {
        let geometry = BoardGeometry::connect_four();
        (Rules::new(geometry), Board::new(geometry))
    }

    fn nac(marks: &[u8]) -> (Rules, Board) {
        let geometry = BoardGeometry::noughts_and_crosses();
        (
            Rules::new(geometry),
            Board::from_marks(geometry, marks).unwrap(),
        )
    }

    #[test]
    fn test_is_legal_gravity() {
        let (rules, mut board) = c4();
        for _ in 0..6 {
            board.drop_in_column(4, Cell::MarkA).unwrap();
        }
        assert!(rules.is_legal(&board, 0));
        assert!(!rules.is_legal(&board, 4));
        assert!(!rules.is_legal(&board, 7));
        assert!(!rules.is_legal(&board, 41));
        assert_eq!(rules.legal_actions(&board), vec![0, 1, 2, 3, 5, 6]);
    }

    #[test]
    fn test_is_legal_direct() {
        let (rules, board) = nac(&[1, 0, 0, 0, 2, 0, 0, 0, 0]);
        assert!(!rules.is_legal(&board, 0));
        assert!(!rules.is_legal(&board, 4));
        assert!(rules.is_legal(&board, 8));
        assert!(!rules.is_legal(&board, 9));
        assert_eq!(rules.legal_actions(&board).len(), 7);
    }

    #[test]
    fn test_has_won_empty_board() {
        let (rules, board) = c4();
        assert!(!rules.has_won(&board, Player::One));
        assert!(!rules.has_won(&board, Player::Two));
    }

    #[test]
    fn test_has_won_horizontal() {
        let (rules, mut board) = c4();
        for col in 1..4 {
            board.drop_in_column(col, Cell::MarkA).unwrap();
        }
        assert!(!rules.has_won(&board, Player::One));
        board.drop_in_column(4, Cell::MarkA).unwrap();
        assert!(rules.has_won(&board, Player::One));
        assert!(!rules.has_won(&board, Player::Two));
    }

    #[test]
    fn test_has_won_diagonal() {
        let (rules, mut board) = c4();
        // `/` from (5,0) to (2,3)
        board.drop_in_column(0, Cell::MarkB).unwrap();
        board.drop_in_column(1, Cell::MarkA).unwrap();
        board.drop_in_column(1, Cell::MarkB).unwrap();
        board.drop_in_column(2, Cell::MarkA).unwrap();
        board.drop_in_column(2, Cell::MarkA).unwrap();
        board.drop_in_column(2, Cell::MarkB).unwrap();
        board.drop_in_column(3, Cell::MarkA).unwrap();
        board.drop_in_column(3, Cell::MarkA).unwrap();
        board.drop_in_column(3, Cell::MarkA).unwrap();
        assert!(!rules.has_won(&board, Player::Two));
        board.drop_in_column(3, Cell::MarkB).unwrap();
        assert!(rules.has_won(&board, Player::Two));
    }

    #[test]
    fn test_has_won_noughts_and_crosses() {
        let (rules, board) = nac(&[2, 1, 2, 1, 1, 1, 0, 2, 0]);
        assert!(rules.has_won(&board, Player::One));
        assert!(!rules.has_won(&board, Player::Two));
    }

    #[test]
    fn test_opponent_can_win_next_reachable() {
        let (rules, mut board) = c4();
        // Player Two holds three on the bottom row, fourth cell on the bottom row
        for col in 0..3 {
            board.drop_in_column(col, Cell::MarkB).unwrap();
        }
        assert!(rules.opponent_can_win_next(&board, Player::One));
        // Not a threat from Player Two's own perspective
        assert!(!rules.opponent_can_win_next(&board, Player::Two));
    }

    #[test]
    fn test_opponent_can_win_next_unsupported() {
        let (rules, mut board) = c4();
        // Player Two holds three on row 4; cell (4,3) has nothing beneath it
        for col in 0..3 {
            board.drop_in_column(col, Cell::MarkA).unwrap();
            board.drop_in_column(col, Cell::MarkB).unwrap();
        }
        assert!(!rules.opponent_can_win_next(&board, Player::One));

        // Once (5,3) is filled, (4,3) becomes playable
        board.drop_in_column(3, Cell::MarkA).unwrap();
        assert!(rules.opponent_can_win_next(&board, Player::One));
    }

    #[test]
    fn test_opponent_can_win_next_multi_gap_column() {
        let (rules, mut board) = c4();
        // Player Two holds three on row 2; the open slot (2,3) sits above
        // several empty cells in column 3
        for col in 0..3 {
            for _ in 0..3 {
                board.drop_in_column(col, Cell::MarkA).unwrap();
            }
            board.drop_in_column(col, Cell::MarkB).unwrap();
        }
        assert!(!rules.opponent_can_win_next(&board, Player::One));

        board.drop_in_column(3, Cell::MarkA).unwrap();
        assert!(!rules.opponent_can_win_next(&board, Player::One));
        board.drop_in_column(3, Cell::MarkA).unwrap();
        assert!(!rules.opponent_can_win_next(&board, Player::One));
        board.drop_in_column(3, Cell::MarkA).unwrap();
        assert!(rules.opponent_can_win_next(&board, Player::One));

        // An occupied cell directly beneath implies the whole column beneath is
        for row in 3..6 {
            assert_ne!(board.get_at(row, 3), Cell::Empty);
        }
    }

    #[test]
    fn test_opponent_can_win_next_vertical() {
        let (rules, mut board) = c4();
        for _ in 0..3 {
            board.drop_in_column(6, Cell::MarkA).unwrap();
        }
        assert!(rules.opponent_can_win_next(&board, Player::Two));
        board.drop_in_column(6, Cell::MarkB).unwrap();
        assert!(!rules.opponent_can_win_next(&board, Player::Two));
    }

    #[test]
    fn test_opponent_can_win_next_blocked_line() {
        let (rules, mut board) = c4();
        for col in 0..3 {
            board.drop_in_column(col, Cell::MarkB).unwrap();
        }
        board.drop_in_column(3, Cell::MarkA).unwrap();
        assert!(!rules.opponent_can_win_next(&board, Player::One));
    }

    #[test]
    fn test_opponent_can_win_next_no_gravity() {
        let (rules, board) = nac(&[2, 1, 2, 1, 1, 0, 0, 2, 0]);
        // Player One threatens the middle row at 5
        assert!(rules.opponent_can_win_next(&board, Player::Two));
        let (rules, board) = nac(&[2, 1, 0, 2, 1, 1, 1, 2, 2]);
        // Player Two has no open pair; Player One threatens the 2-4-6 diagonal
        assert!(!rules.opponent_can_win_next(&board, Player::One));
        assert!(rules.opponent_can_win_next(&board, Player::Two));
    }

    #[test]
    fn test_is_full_or_one_away() {
        let (rules, mut board) = c4();
        for col in 0..7 {
            let rows = if col < 5 { 6 } else { 5 };
            for _ in 0..rows {
                board.drop_in_column(col, Cell::MarkA).unwrap();
            }
        }
        // two empty cells
        assert!(!rules.is_full_or_one_away(&board));
        board.drop_in_column(5, Cell::MarkB).unwrap();
        // one empty cell
        assert!(rules.is_full_or_one_away(&board));
        board.drop_in_column(6, Cell::MarkB).unwrap();
        assert!(rules.is_full_or_one_away(&board));
    }
}
