mod error;
mod game;
mod outcome;
mod player;
mod recording;
mod referee;
mod registration;
mod stdio;
mod store;
mod transport;
pub use error::*;
pub use game::*;
pub use outcome::*;
pub use player::*;
pub use recording::*;
pub use referee::*;
pub use registration::*;
pub use stdio::*;
pub use store::*;
pub use transport::*;

use std::time::Duration;

pub struct Config {
    /// Identifies the match in the published result.
    pub room_id: String,
    pub timing: Timing,
    /// Decides who moves first.
    pub rng: rand::rngs::StdRng,
    pub recorder: Option<recording::Recorder>,
}

/// How long the referee waits for things.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Total time players have to register.
    pub registration_timeout: Duration,
    /// How often to look for registered players.
    pub poll_interval: Duration,
    /// Time each player has for a move.
    pub turn_timeout: Duration,
    /// Pause between attempts to publish something.
    pub retry_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            registration_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(2),
            turn_timeout: Duration::from_secs(3),
            retry_interval: Duration::from_secs(1),
        }
    }
}
