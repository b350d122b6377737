use std::collections::BTreeMap;

use quarto::{Line, MatchResult, Scores, Status, ROUND};

use crate::{Foul, Player};

pub const WIN_POINTS: u32 = 3;
pub const LOSS_POINTS: u32 = 0;
pub const TIE_POINTS: u32 = 1;
pub const WALKOVER_POINTS: u32 = 1;

/// How a match ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    WinnerDeclared {
        winner: Player,
        loser: Player,
        line: Line,
    },
    LoserByInvalidMove {
        loser: Player,
        winner: Player,
        foul: Foul,
    },
    LoserByTimeout {
        loser: Player,
        winner: Player,
    },
    Tie {
        players: [Player; 2],
    },
    /// Only one player registered.
    Walkover {
        winner: Player,
    },
    /// The match never started.
    AbortedInsufficientPlayers {
        found: usize,
    },
}

impl Outcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Outcome::AbortedInsufficientPlayers { .. })
    }

    /// Points per player owner id.
    pub fn scores(&self) -> Scores {
        let points: Vec<(&Player, u32)> = match self {
            Outcome::WinnerDeclared { winner, loser, .. }
            | Outcome::LoserByInvalidMove { winner, loser, .. }
            | Outcome::LoserByTimeout { winner, loser } => {
                vec![(winner, WIN_POINTS), (loser, LOSS_POINTS)]
            }
            Outcome::Tie { players: [a, b] } => vec![(a, TIE_POINTS), (b, TIE_POINTS)],
            Outcome::Walkover { winner } => vec![(winner, WALKOVER_POINTS)],
            Outcome::AbortedInsufficientPlayers { .. } => vec![],
        };
        points
            .into_iter()
            .map(|(player, points)| (player.id.clone(), BTreeMap::from([(ROUND, points)])))
            .collect()
    }

    /// The record that gets published at the end of the match.
    pub fn to_result(&self, room_id: &str) -> MatchResult {
        MatchResult {
            room_id: String::from(room_id),
            status: if self.is_aborted() {
                Status::Fail
            } else {
                Status::Success
            },
            message: self.to_string(),
            scores: self.scores(),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::WinnerDeclared { winner, line, .. } => {
                write!(f, "{} won with four matching pieces in {}", winner.name, line)
            }
            Outcome::LoserByInvalidMove { loser, foul, .. } => {
                write!(f, "{} lost by an invalid move. {}", loser.name, foul)
            }
            Outcome::LoserByTimeout { loser, .. } => {
                write!(f, "{} lost by running out of time", loser.name)
            }
            Outcome::Tie { .. } => write!(f, "Tie, the board is full"),
            Outcome::Walkover { winner } => {
                write!(f, "{} won by walkover, no opponent registered", winner.name)
            }
            Outcome::AbortedInsufficientPlayers { found: 0 } => write!(f, "no players registered"),
            Outcome::AbortedInsufficientPlayers { found } => {
                write!(f, "{} players registered, but a match needs two", found)
            }
        }
    }
}
