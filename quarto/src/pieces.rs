use serde::{Deserialize, Serialize};

/// Identifies one of the sixteen pieces. Valid ids are `1..=16`; `0` is used
/// on the wire to mean "no piece".
pub type PieceId = u8;

/// The number of distinct pieces, which is also the number of cells.
pub const NUM_PIECES: u8 = 16;

/// A Quarto piece, described by four binary attributes.
///
/// Every combination of attributes exists exactly once in [`PIECES`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub length: Length,
    pub shape: Shape,
    pub color: Color,
    pub hole: Hole,
}

/// The height of a [piece](Piece).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    Tall,
}

/// The outline of a [piece](Piece).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Round,
    Square,
}

/// The color of a [piece](Piece).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

/// Whether a [piece](Piece) has a hole in its top.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hole {
    Hollow,
    Solid,
}

impl Piece {
    /// Encodes the attributes as an 8-bit code.
    ///
    /// Each attribute owns two adjacent bits and sets exactly one of them,
    /// depending on its value:
    ///
    /// | attribute | bits          |
    /// |-----------|---------------|
    /// | color     | white 1, black 2 |
    /// | hole      | hollow 4, solid 8 |
    /// | length    | short 16, tall 32 |
    /// | shape     | square 64, round 128 |
    ///
    /// The bitwise AND of several codes is therefore non-zero exactly when
    /// all of those pieces agree on at least one attribute. An empty cell has
    /// the code `0`, which wipes out any AND it takes part in.
    pub fn code(&self) -> u8 {
        let color = match self.color {
            Color::White => 0b0000_0001,
            Color::Black => 0b0000_0010,
        };
        let hole = match self.hole {
            Hole::Hollow => 0b0000_0100,
            Hole::Solid => 0b0000_1000,
        };
        let length = match self.length {
            Length::Short => 0b0001_0000,
            Length::Tall => 0b0010_0000,
        };
        let shape = match self.shape {
            Shape::Square => 0b0100_0000,
            Shape::Round => 0b1000_0000,
        };
        color | hole | length | shape
    }

    /// Looks up a piece in the catalog. Returns `None` for ids outside `1..=16`.
    pub fn from_id(id: PieceId) -> Option<Piece> {
        id.checked_sub(1)
            .and_then(|idx| PIECES.get(usize::from(idx)))
            .copied()
    }
}

/// Returns `true` if `id` names a piece in the catalog.
pub fn is_valid_piece_id(id: PieceId) -> bool {
    (1..=NUM_PIECES).contains(&id)
}

/// The piece catalog. The piece with id `n` is at index `n - 1`.
pub static PIECES: [Piece; NUM_PIECES as usize] = [
    Piece {
        length: Length::Tall,
        shape: Shape::Round,
        color: Color::White,
        hole: Hole::Hollow,
    },
    Piece {
        length: Length::Short,
        shape: Shape::Round,
        color: Color::White,
        hole: Hole::Hollow,
    },
    Piece {
        length: Length::Tall,
        shape: Shape::Square,
        color: Color::White,
        hole: Hole::Hollow,
    },
    Piece {
        length: Length::Short,
        shape: Shape::Square,
        color: Color::White,
        hole: Hole::Hollow,
    },
    Piece {
        length: Length::Tall,
        shape: Shape::Round,
        color: Color::Black,
        hole: Hole::Hollow,
    },
    Piece {
        length: Length::Short,
        shape: Shape::Round,
        color: Color::Black,
        hole: Hole::Hollow,
    },
    Piece {
        length: Length::Tall,
        shape: Shape::Square,
        color: Color::Black,
        hole: Hole::Hollow,
    },
    Piece {
        length: Length::Short,
        shape: Shape::Square,
        color: Color::Black,
        hole: Hole::Hollow,
    },
    Piece {
        length: Length::Tall,
        shape: Shape::Round,
        color: Color::White,
        hole: Hole::Solid,
    },
    Piece {
        length: Length::Short,
        shape: Shape::Round,
        color: Color::White,
        hole: Hole::Solid,
    },
    Piece {
        length: Length::Tall,
        shape: Shape::Square,
        color: Color::White,
        hole: Hole::Solid,
    },
    Piece {
        length: Length::Short,
        shape: Shape::Square,
        color: Color::White,
        hole: Hole::Solid,
    },
    Piece {
        length: Length::Tall,
        shape: Shape::Round,
        color: Color::Black,
        hole: Hole::Solid,
    },
    Piece {
        length: Length::Short,
        shape: Shape::Round,
        color: Color::Black,
        hole: Hole::Solid,
    },
    Piece {
        length: Length::Tall,
        shape: Shape::Square,
        color: Color::Black,
        hole: Hole::Solid,
    },
    Piece {
        length: Length::Short,
        shape: Shape::Square,
        color: Color::Black,
        hole: Hole::Solid,
    },
];
