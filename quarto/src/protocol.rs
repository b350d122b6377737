use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The move a player submits on their turn.
///
/// The piece the player received from the opponent goes to `(x, y)`, and
/// `picked` is handed to the opponent for their next placement.
///
/// The fields are signed because they come straight from the player, and
/// nothing has been validated yet. See [`Board::validate()`](crate::Board::validate).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub picked: i64,
    pub x: i64,
    pub y: i64,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{x: {}, y: {}, picked: {}}}", self.x, self.y, self.picked)
    }
}

/// The round under which all scores of a match are reported.
pub const ROUND: u32 = 1;

/// Scores per player owner id, each a map from round to points.
pub type Scores = BTreeMap<String, BTreeMap<u32, u32>>;

/// The final record of a match, published exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "run_id")]
    pub room_id: String,
    pub status: Status,
    pub message: String,
    #[serde(default)]
    pub scores: Scores,
}

/// Whether a match could be played at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Success,
    Fail,
}
