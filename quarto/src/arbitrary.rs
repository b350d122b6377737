use crate::{Color, Hole, Length, Piece, Shape};

impl quickcheck::Arbitrary for Length {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Length::Short, Length::Tall]).unwrap()
    }
}

impl quickcheck::Arbitrary for Shape {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Shape::Round, Shape::Square]).unwrap()
    }
}

impl quickcheck::Arbitrary for Color {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Color::Black, Color::White]).unwrap()
    }
}

impl quickcheck::Arbitrary for Hole {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Hole::Hollow, Hole::Solid]).unwrap()
    }
}

impl quickcheck::Arbitrary for Piece {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self {
            length: Length::arbitrary(g),
            shape: Shape::arbitrary(g),
            color: Color::arbitrary(g),
            hole: Hole::arbitrary(g),
        }
    }
}
