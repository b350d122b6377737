use quarto::{Action, Board};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::error::{Foul, JudgeError};
use crate::{Object, ObjectType, Outcome, Player};

/// What became of one incoming message.
#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Not an action by the player on turn. Nothing changed.
    Ignored,
    /// The move was applied and it's the other player's turn.
    Accepted,
    Finished(Outcome),
}

/// One match between two registered players.
///
/// This only judges messages, waiting for them is up to the
/// [`Referee`](crate::Referee).
pub struct Game {
    players: [Player; 2],
    board: Board,
}

impl Game {
    /// Starts a match with a randomly chosen first player.
    pub fn new(mut players: [Player; 2], rng: &mut StdRng) -> Self {
        players.shuffle(rng);
        let board = Board::new(&players[0].name);
        Self { players, board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Judges one message from the action stream.
    ///
    /// Returns an error only if the message could not be understood, or the
    /// game state is corrupt, not when a rule is broken.
    pub fn judge(&mut self, object: &Object) -> Result<Verdict, JudgeError> {
        if object.key.kind != ObjectType::Action {
            debug!(key = %object.key, "Ignoring object that is not an action");
            return Ok(Verdict::Ignored);
        }

        let current_player_idx = self.current_player_idx()?;
        let current_player = &self.players[current_player_idx];
        if object.key.name != current_player.name {
            info!(
                player = %object.key.name,
                turn = %current_player.name,
                "Ignoring action sent out of turn"
            );
            return Ok(Verdict::Ignored);
        }
        if object.meta.owner != current_player.id {
            info!(
                player = %current_player.name,
                owner = %object.meta.owner,
                "Action was sent by the wrong owner"
            );
            let foul = Foul::SpoofedOwner {
                name: current_player.name.clone(),
                expected: current_player.id.clone(),
                actual: object.meta.owner.clone(),
            };
            return Ok(Verdict::Finished(self.loss_by_foul(current_player_idx, foul)));
        }

        let action: Action =
            serde_json::from_str(&object.value).map_err(|source| JudgeError::MalformedAction {
                player: current_player.name.clone(),
                source,
            })?;

        let mv = match self.board.validate(&action) {
            Ok(mv) => mv,
            Err(err) => {
                info!(player = %current_player.name, %action, reason = %err, "Invalid action");
                return Ok(Verdict::Finished(
                    self.loss_by_foul(current_player_idx, err.into()),
                ));
            }
        };
        debug!(player = %current_player.name, %action, "Applying action");
        self.board.apply(mv);

        if let Some(line) = self.board.winning_line() {
            info!(player = %current_player.name, %line, "Winning action");
            return Ok(Verdict::Finished(Outcome::WinnerDeclared {
                winner: self.players[current_player_idx].clone(),
                loser: self.players[1 - current_player_idx].clone(),
                line,
            }));
        }

        if self.board.is_tie() {
            info!("The board is full without a winning line");
            return Ok(Verdict::Finished(Outcome::Tie {
                players: self.players.clone(),
            }));
        }

        self.change_turn()?;
        Ok(Verdict::Accepted)
    }

    /// The player on turn ran out of time.
    pub fn timeout(&self) -> Result<Outcome, JudgeError> {
        let idx = self.current_player_idx()?;
        Ok(Outcome::LoserByTimeout {
            loser: self.players[idx].clone(),
            winner: self.players[1 - idx].clone(),
        })
    }

    fn loss_by_foul(&self, loser_idx: usize, foul: Foul) -> Outcome {
        Outcome::LoserByInvalidMove {
            loser: self.players[loser_idx].clone(),
            winner: self.players[1 - loser_idx].clone(),
            foul,
        }
    }

    fn current_player_idx(&self) -> Result<usize, JudgeError> {
        let turn = self.board.turn();
        self.players
            .iter()
            .position(|player| player.name == turn)
            .ok_or_else(|| JudgeError::TurnHeldByStranger {
                turn: String::from(turn),
            })
    }

    fn change_turn(&mut self) -> Result<(), JudgeError> {
        let next_idx = 1 - self.current_player_idx()?;
        self.board.set_turn(&self.players[next_idx].name);
        Ok(())
    }
}
