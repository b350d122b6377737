use crate::{Board, BOARD_SIZE};

/// Draws the board as a box of piece ids, with x going down and y going right.
pub fn visualize(board: &Board) -> String {
    let mut result = String::from("     ");
    for y in 1..=BOARD_SIZE {
        result += &format!("{:>3}", y);
    }
    // Draw the top of the box
    result += "\n    ╭";
    for _ in 1..=BOARD_SIZE {
        result += "───";
    }
    result += "─╮\n";

    for x in 1..=BOARD_SIZE {
        result += &format!("{:>3} │", x);
        for y in 1..=BOARD_SIZE {
            match board.piece_at(x, y) {
                Some(piece) => result += &format!("{:>3}", piece),
                None => result += "  ·",
            }
        }
        result += " │\n";
    }

    // Draw the bottom of the box
    result += "    ╰";
    for _ in 1..=BOARD_SIZE {
        result += "───";
    }
    result += "─╯\n";

    let picked = board
        .picked()
        .map_or_else(|| String::from("-"), |piece| piece.to_string());
    result += &format!("turn: {}, picked: {}", board.turn(), picked);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_pieces_and_state() {
        let mut board = Board::new("bob");
        board.place(1, 1, 12);
        board.place(4, 3, 5);
        board.set_picked(2);
        let expected = [
            "       1  2  3  4",
            "    ╭─────────────╮",
            "  1 │ 12  ·  ·  · │",
            "  2 │  ·  ·  ·  · │",
            "  3 │  ·  ·  ·  · │",
            "  4 │  ·  ·  5  · │",
            "    ╰─────────────╯",
            "turn: bob, picked: 2",
        ]
        .join("\n");
        assert_eq!(visualize(&board), expected);
    }
}
