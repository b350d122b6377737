mod lines;

use std::collections::BTreeMap;

pub use lines::*;
use serde::{Deserialize, Serialize};

use crate::{is_valid_piece_id, Action, IllegalMove, Piece, PieceId, PIECES};

/// The board is `BOARD_SIZE` x `BOARD_SIZE` cells, with coordinates starting at 1.
pub const BOARD_SIZE: u8 = 4;

/// A single cell on the board, including coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
    /// The piece in this cell, or `0` if the cell is empty.
    #[serde(rename = "piece-id")]
    pub piece_id: PieceId,
}

impl Position {
    pub fn piece(&self) -> Option<PieceId> {
        (self.piece_id != 0).then_some(self.piece_id)
    }
}

/// The state of one match, which is also what gets published after every move.
///
/// All rule checks happen in [`Self::validate()`]. The mutating methods
/// trust their input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pieces: BTreeMap<PieceId, Piece>,
    /// Always `BOARD_SIZE * BOARD_SIZE` cells, ordered by x first, then y.
    positions: Vec<Position>,
    /// The name of the player to move.
    turn: String,
    /// The piece the player to move has to place, `0` before the first move
    /// and after the last one.
    picked: PieceId,
}

/// A validated action, ready to be applied with [`Board::apply()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    x: u8,
    y: u8,
    handed: Option<PieceId>,
}

impl Move {
    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// The piece handed to the opponent. `None` for the placement that
    /// fills the board.
    pub fn handed(&self) -> Option<PieceId> {
        self.handed
    }
}

impl Board {
    /// Creates an empty board with the full piece pool.
    pub fn new(first_player: &str) -> Self {
        let pieces = (1..).zip(PIECES).collect();
        let mut positions = Vec::with_capacity(usize::from(BOARD_SIZE * BOARD_SIZE));
        for x in 1..=BOARD_SIZE {
            for y in 1..=BOARD_SIZE {
                positions.push(Position { x, y, piece_id: 0 });
            }
        }
        Self {
            pieces,
            positions,
            turn: String::from(first_player),
            picked: 0,
        }
    }

    pub fn pieces(&self) -> &BTreeMap<PieceId, Piece> {
        &self.pieces
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn turn(&self) -> &str {
        &self.turn
    }

    pub fn set_turn(&mut self, player: &str) {
        self.turn = String::from(player);
    }

    /// The piece the player to move has to place.
    pub fn picked(&self) -> Option<PieceId> {
        (self.picked != 0).then_some(self.picked)
    }

    pub fn set_picked(&mut self, piece: PieceId) {
        self.picked = piece;
    }

    /// Returns the piece at the given cell, if there is one.
    pub fn piece_at(&self, x: u8, y: u8) -> Option<PieceId> {
        self.positions
            .iter()
            .find(|pos| pos.x == x && pos.y == y)
            .and_then(Position::piece)
    }

    /// Is this piece somewhere on the board?
    pub fn is_placed(&self, piece: PieceId) -> bool {
        piece != 0 && self.positions.iter().any(|pos| pos.piece_id == piece)
    }

    pub fn num_empty_cells(&self) -> usize {
        self.positions
            .iter()
            .filter(|pos| pos.piece().is_none())
            .count()
    }

    /// Puts a piece into the cell at `(x, y)`. Placing `0` leaves the cell empty.
    pub fn place(&mut self, x: u8, y: u8, piece: PieceId) {
        if let Some(pos) = self
            .positions
            .iter_mut()
            .find(|pos| pos.x == x && pos.y == y)
        {
            pos.piece_id = piece;
        }
    }

    /// Checks an action against the current board without changing it.
    ///
    /// On the opening move no piece has been picked yet, so nothing will be
    /// placed, but the target cell still has to be a valid, empty cell.
    ///
    /// The placement that fills the last empty cell does not hand over a
    /// piece, because there are none left. Its `picked` field is ignored.
    pub fn validate(&self, action: &Action) -> Result<Move, IllegalMove> {
        let (x, y) = match (to_coordinate(action.x), to_coordinate(action.y)) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                return Err(IllegalMove::OutOfBounds {
                    x: action.x,
                    y: action.y,
                })
            }
        };

        if let Some(occupant) = self.piece_at(x, y) {
            return Err(IllegalMove::CellOccupied { x, y, occupant });
        }

        if self.picked().is_some() && self.num_empty_cells() == 1 {
            return Ok(Move { x, y, handed: None });
        }

        let handed = PieceId::try_from(action.picked)
            .ok()
            .filter(|&piece| is_valid_piece_id(piece))
            .ok_or(IllegalMove::PieceOutOfRange {
                piece: action.picked,
            })?;
        if self.picked() == Some(handed) {
            return Err(IllegalMove::HandedBackReceivedPiece { piece: handed });
        }
        if self.is_placed(handed) {
            return Err(IllegalMove::PieceAlreadyPlaced { piece: handed });
        }

        Ok(Move {
            x,
            y,
            handed: Some(handed),
        })
    }

    /// Places the picked piece and records the piece handed to the opponent.
    ///
    /// Does not change whose turn it is.
    pub fn apply(&mut self, mv: Move) {
        self.place(mv.x, mv.y, self.picked);
        self.set_picked(mv.handed.unwrap_or(0));
    }
}

fn to_coordinate(value: i64) -> Option<u8> {
    u8::try_from(value)
        .ok()
        .filter(|coord| (1..=BOARD_SIZE).contains(coord))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(x: i64, y: i64, picked: i64) -> Action {
        Action { picked, x, y }
    }

    /// A board where `player` has just received `picked`, with the given
    /// pieces already placed.
    fn board_with(placed: &[(u8, u8, PieceId)], picked: PieceId) -> Board {
        let mut board = Board::new("player");
        for &(x, y, piece) in placed {
            board.place(x, y, piece);
        }
        board.set_picked(picked);
        board
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new("alice");
        assert_eq!(board.positions().len(), 16);
        assert_eq!(board.num_empty_cells(), 16);
        assert_eq!(board.pieces().len(), 16);
        assert_eq!(board.turn(), "alice");
        assert_eq!(board.picked(), None);
        assert_eq!(board.positions()[1], Position { x: 1, y: 2, piece_id: 0 });
    }

    #[test]
    fn legal_opening_move() {
        let mut board = Board::new("alice");
        let mv = board.validate(&action(1, 1, 5)).unwrap();
        assert_eq!(mv.handed(), Some(5));
        board.apply(mv);
        // Nothing to place yet, only the hand-over happens
        assert_eq!(board.num_empty_cells(), 16);
        assert_eq!(board.picked(), Some(5));
    }

    #[test]
    fn rejects_out_of_bounds() {
        let board = Board::new("alice");
        for (x, y) in [(0, 1), (5, 1), (1, 0), (1, 5), (-1, 2), (300, 2), (4_294_967_296, 1)] {
            assert_eq!(
                board.validate(&action(x, y, 5)),
                Err(IllegalMove::OutOfBounds { x, y })
            );
        }
    }

    #[test]
    fn rejects_occupied_cell() {
        let board = board_with(&[(2, 3, 7)], 1);
        assert_eq!(
            board.validate(&action(2, 3, 5)),
            Err(IllegalMove::CellOccupied {
                x: 2,
                y: 3,
                occupant: 7
            })
        );
    }

    #[test]
    fn rejects_handing_back_received_piece() {
        let board = board_with(&[], 4);
        assert_eq!(
            board.validate(&action(1, 1, 4)),
            Err(IllegalMove::HandedBackReceivedPiece { piece: 4 })
        );
    }

    #[test]
    fn rejects_piece_on_board() {
        let board = board_with(&[(4, 4, 9)], 1);
        assert_eq!(
            board.validate(&action(1, 1, 9)),
            Err(IllegalMove::PieceAlreadyPlaced { piece: 9 })
        );
    }

    #[test]
    fn rejects_unknown_piece() {
        let board = board_with(&[], 1);
        for piece in [0, 17, -3] {
            assert_eq!(
                board.validate(&action(1, 1, piece)),
                Err(IllegalMove::PieceOutOfRange { piece })
            );
        }
    }

    #[test]
    fn failed_validation_leaves_board_untouched() {
        let board = board_with(&[(1, 1, 3)], 2);
        let before = board.clone();
        assert!(board.validate(&action(1, 1, 5)).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn apply_places_received_piece() {
        let mut board = board_with(&[], 1);
        let mv = board.validate(&action(1, 1, 2)).unwrap();
        board.apply(mv);
        assert_eq!(board.piece_at(1, 1), Some(1));
        assert_eq!(board.picked(), Some(2));
        assert!(board.is_placed(1));
        assert!(!board.is_placed(2));
    }

    #[test]
    fn final_placement_hands_over_nothing() {
        let mut placed = Vec::new();
        let mut piece = 1;
        for x in 1..=BOARD_SIZE {
            for y in 1..=BOARD_SIZE {
                if (x, y) != (4, 4) {
                    placed.push((x, y, piece));
                    piece += 1;
                }
            }
        }
        let mut board = board_with(&placed, 16);
        // The handed piece is irrelevant, even if it would be illegal otherwise
        let mv = board.validate(&action(4, 4, 16)).unwrap();
        assert_eq!(mv.handed(), None);
        board.apply(mv);
        assert_eq!(board.piece_at(4, 4), Some(16));
        assert_eq!(board.picked(), None);
        assert_eq!(board.num_empty_cells(), 0);
    }

    #[test]
    fn snapshot_wire_format() {
        let board = board_with(&[(1, 1, 1)], 2);
        let json: serde_json::Value = serde_json::to_value(&board).unwrap();
        assert_eq!(json["turn"], "player");
        assert_eq!(json["picked"], 2);
        assert_eq!(json["positions"][0]["piece-id"], 1);
        assert_eq!(json["pieces"]["16"]["color"], "black");
        let parsed: Board = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, board);
    }
}
