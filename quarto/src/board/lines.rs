use std::fmt;

use super::{Board, BOARD_SIZE};

const N: usize = BOARD_SIZE as usize;

/// One of the ten lines of four cells that can win the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    /// All cells with the given x coordinate.
    Row(u8),
    /// All cells with the given y coordinate.
    Column(u8),
    /// The cells `(i, i)`.
    Diagonal,
    /// The cells `(i, 5 - i)`.
    AntiDiagonal,
}

impl Line {
    /// Every line, in the order they are checked.
    pub const ALL: [Line; 10] = [
        Line::Row(1),
        Line::Row(2),
        Line::Row(3),
        Line::Row(4),
        Line::Column(1),
        Line::Column(2),
        Line::Column(3),
        Line::Column(4),
        Line::Diagonal,
        Line::AntiDiagonal,
    ];

    /// The `(x, y)` coordinates of the cells in this line.
    pub fn cells(self) -> [(u8, u8); N] {
        let mut cells = [(0, 0); N];
        for (k, cell) in (1..=BOARD_SIZE).zip(cells.iter_mut()) {
            *cell = match self {
                Line::Row(x) => (x, k),
                Line::Column(y) => (k, y),
                Line::Diagonal => (k, k),
                Line::AntiDiagonal => (k, BOARD_SIZE + 1 - k),
            };
        }
        cells
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(x) => write!(f, "row {}", x),
            Line::Column(y) => write!(f, "column {}", y),
            Line::Diagonal => write!(f, "diagonal"),
            Line::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

/// The bitwise AND of the piece codes in a line.
///
/// Non-zero exactly when no cell is empty and all pieces share at least one
/// attribute. See [`Piece::code()`](crate::Piece::code).
pub fn line_code(codes: [u8; N]) -> u8 {
    codes.into_iter().fold(u8::MAX, |acc, code| acc & code)
}

impl Board {
    /// The piece codes of all cells, indexed by `[x - 1][y - 1]`. Empty cells are `0`.
    pub fn code_grid(&self) -> [[u8; N]; N] {
        let mut grid = [[0; N]; N];
        for pos in self.positions() {
            if let Some(piece) = pos.piece().and_then(|id| self.pieces().get(&id)) {
                grid[usize::from(pos.x - 1)][usize::from(pos.y - 1)] = piece.code();
            }
        }
        grid
    }

    /// Returns the first line of four pieces sharing an attribute, if any.
    pub fn winning_line(&self) -> Option<Line> {
        let grid = self.code_grid();
        Line::ALL.into_iter().find(|line| {
            let codes = line
                .cells()
                .map(|(x, y)| grid[usize::from(x - 1)][usize::from(y - 1)]);
            line_code(codes) != 0
        })
    }

    pub fn is_win(&self) -> bool {
        self.winning_line().is_some()
    }

    /// True if every cell is occupied.
    ///
    /// This does not look at lines, so check [`Self::is_win()`] first.
    pub fn is_tie(&self) -> bool {
        self.num_empty_cells() == 0
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::{Piece, PieceId};

    /// A full board without any winning line, indexed by `[x - 1][y - 1]`.
    const DRAWN_LAYOUT: [[PieceId; N]; N] = [
        [12, 7, 8, 6],
        [9, 16, 3, 15],
        [4, 10, 14, 5],
        [13, 2, 11, 1],
    ];

    fn board_with(placed: &[(u8, u8, PieceId)]) -> Board {
        let mut board = Board::new("player");
        for &(x, y, piece) in placed {
            board.place(x, y, piece);
        }
        board
    }

    fn shares_attribute(pieces: [Piece; 4]) -> bool {
        let [a, rest @ ..] = pieces;
        rest.iter().all(|p| p.length == a.length)
            || rest.iter().all(|p| p.shape == a.shape)
            || rest.iter().all(|p| p.color == a.color)
            || rest.iter().all(|p| p.hole == a.hole)
    }

    quickcheck! {
        fn line_code_detects_shared_attribute(a: Piece, b: Piece, c: Piece, d: Piece) -> bool {
            let pieces = [a, b, c, d];
            (line_code(pieces.map(|p| p.code())) != 0) == shares_attribute(pieces)
        }

        fn empty_cell_breaks_any_line(a: Piece, b: Piece, c: Piece, d: Piece, hole: usize) -> bool {
            let mut codes = [a, b, c, d].map(|p| p.code());
            codes[hole % 4] = 0;
            line_code(codes) == 0
        }
    }

    #[test]
    fn line_cells() {
        assert_eq!(Line::Row(2).cells(), [(2, 1), (2, 2), (2, 3), (2, 4)]);
        assert_eq!(Line::Column(3).cells(), [(1, 3), (2, 3), (3, 3), (4, 3)]);
        assert_eq!(Line::Diagonal.cells(), [(1, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(Line::AntiDiagonal.cells(), [(1, 4), (2, 3), (3, 2), (4, 1)]);
    }

    #[test]
    fn white_row_wins() {
        // 1, 4, 10 and 11 are all white, but otherwise mixed
        let board = board_with(&[(3, 1, 1), (3, 2, 4), (3, 3, 10), (3, 4, 11)]);
        assert_eq!(board.winning_line(), Some(Line::Row(3)));
        assert!(board.is_win());
        assert!(!board.is_tie());
    }

    #[test]
    fn incomplete_line_does_not_win() {
        let board = board_with(&[(3, 1, 1), (3, 2, 4), (3, 3, 10)]);
        assert_eq!(board.winning_line(), None);
    }

    #[test]
    fn column_and_diagonals_win() {
        // All tall
        let column = board_with(&[(1, 2, 1), (2, 2, 7), (3, 2, 9), (4, 2, 15)]);
        assert_eq!(column.winning_line(), Some(Line::Column(2)));

        // All solid
        let diagonal = board_with(&[(1, 1, 9), (2, 2, 12), (3, 3, 14), (4, 4, 15)]);
        assert_eq!(diagonal.winning_line(), Some(Line::Diagonal));

        // All round
        let anti = board_with(&[(1, 4, 1), (2, 3, 6), (3, 2, 10), (4, 1, 13)]);
        assert_eq!(anti.winning_line(), Some(Line::AntiDiagonal));
    }

    #[test]
    fn mixed_full_line_does_not_win() {
        // 1 is tall round white hollow, 16 is short square black solid
        let board = board_with(&[(1, 1, 1), (1, 2, 16), (1, 3, 2), (1, 4, 3)]);
        assert_eq!(board.winning_line(), None);
    }

    #[test]
    fn full_board_without_line_is_tie() {
        let mut placed = Vec::new();
        for (x, row) in (1..).zip(DRAWN_LAYOUT) {
            for (y, piece) in (1..).zip(row) {
                placed.push((x, y, piece));
            }
        }
        let board = board_with(&placed);
        assert!(!board.is_win());
        assert!(board.is_tie());
    }
}
