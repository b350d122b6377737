use quarto::IllegalMove;

/// A rule violation that makes a player lose immediately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Foul {
    /// An action was sent under the name of the player on turn, but by a
    /// different owner.
    SpoofedOwner {
        name: String,
        expected: String,
        actual: String,
    },
    IllegalMove(IllegalMove),
}

impl std::error::Error for Foul {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Foul::IllegalMove(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for Foul {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Foul::SpoofedOwner {
                name,
                expected,
                actual,
            } => write!(
                f,
                "Action for '{}' was sent by owner '{}' instead of '{}'",
                name, actual, expected
            ),
            Foul::IllegalMove(err) => write!(f, "Illegal move: {}", err),
        }
    }
}

impl From<IllegalMove> for Foul {
    fn from(err: IllegalMove) -> Self {
        Foul::IllegalMove(err)
    }
}

/// The error type for judging one message. These are not rule violations.
#[derive(Debug)]
pub enum JudgeError {
    /// The payload of an action could not be parsed. The message is dropped
    /// and the player keeps their turn.
    MalformedAction {
        player: String,
        source: serde_json::Error,
    },
    /// The board says it's the turn of someone who isn't registered. This
    /// can only be a bug in the referee.
    TurnHeldByStranger { turn: String },
}

impl std::error::Error for JudgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JudgeError::MalformedAction { source, .. } => Some(source),
            JudgeError::TurnHeldByStranger { .. } => None,
        }
    }
}

impl std::fmt::Display for JudgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JudgeError::MalformedAction { player, .. } => {
                write!(f, "Could not parse the action sent by '{}'", player)
            }
            JudgeError::TurnHeldByStranger { turn } => {
                write!(f, "It is the turn of '{}', who is not a registered player", turn)
            }
        }
    }
}
