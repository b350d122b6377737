use crate::PieceId;

/// The error type for [`Board::validate()`](crate::Board::validate), i.e. the
/// reason why a submitted action was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    OutOfBounds { x: i64, y: i64 },
    CellOccupied { x: u8, y: u8, occupant: PieceId },
    PieceOutOfRange { piece: i64 },
    HandedBackReceivedPiece { piece: PieceId },
    PieceAlreadyPlaced { piece: PieceId },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::OutOfBounds { x, y } =>
                write!(f, "Target cell ({}, {}) is outside of the 4x4 board", x, y),
            IllegalMove::CellOccupied { x, y, occupant } =>
                write!(f, "Target cell ({}, {}) is already occupied by piece {}", x, y, occupant),
            IllegalMove::PieceOutOfRange { piece } =>
                write!(f, "Handed piece {} does not exist, ids range from 1 to 16", piece),
            IllegalMove::HandedBackReceivedPiece { piece } =>
                write!(f, "Tried to hand back piece {}, which was just received", piece),
            IllegalMove::PieceAlreadyPlaced { piece } =>
                write!(f, "Handed piece {} is already on the board", piece),
        }
    }
}
