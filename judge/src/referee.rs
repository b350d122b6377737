use anyhow::Context;
use quarto::{visualize, Board, MatchResult, Scores, Status};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};

use crate::{
    register_players, set_with_retry, Config, Game, JudgeError, Key, Object, ObjectType, Outcome,
    Registration, Transport, Verdict,
};

/// Runs a single match from registration to the published result.
pub struct Referee<T> {
    transport: T,
    actions: UnboundedReceiver<Object>,
    config: Config,
}

impl<T: Transport> Referee<T> {
    /// Subscribes to actions. Fails if the transport refuses, before anyone
    /// is told that a match is on.
    pub async fn new(transport: T, config: Config) -> anyhow::Result<Self> {
        let actions = transport
            .watch(Key::filter(ObjectType::Action))
            .await
            .context("Could not watch for actions")?;
        Ok(Self {
            transport,
            actions,
            config,
        })
    }

    /// Waits for players, plays the match if there are two, and publishes
    /// the result.
    ///
    /// An error means the referee itself failed, not that a player did. If
    /// that happens during the match, a failed result is still published.
    pub async fn run(mut self) -> anyhow::Result<Outcome> {
        let outcome = match register_players(&self.transport, &self.config.timing).await {
            Registration::Complete(players) => {
                // Nothing counts before the first board is out
                while let Ok(object) = self.actions.try_recv() {
                    debug!(key = %object.key, "Dropping action sent before the match started");
                }
                let mut game = Game::new(players, &mut self.config.rng);
                let [first, second] = game.players();
                info!(
                    first = %first.name,
                    second = %second.name,
                    room_id = %self.config.room_id,
                    "Match starts"
                );
                let played = match self.publish_board(game.board()).await {
                    Ok(()) => self.play(&mut game).await,
                    Err(err) => Err(err),
                };
                match played {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        error!(error = %format!("{:#}", err), "The match could not be finished");
                        let result = MatchResult {
                            room_id: self.config.room_id.clone(),
                            status: Status::Fail,
                            message: format!("{:#}", err),
                            scores: Scores::new(),
                        };
                        self.publish_result(&result).await?;
                        return Err(err);
                    }
                }
            }
            Registration::Walkover(winner) => {
                warn!(player = %winner.name, "Only one player registered");
                Outcome::Walkover { winner }
            }
            Registration::Aborted { found } => {
                error!(found, "Could not find two players");
                Outcome::AbortedInsufficientPlayers { found }
            }
        };
        info!(%outcome, "Match over");

        self.publish_result(&outcome.to_result(&self.config.room_id)).await?;
        Ok(outcome)
    }

    /// Publishes the end-of-game record and writes the recording, if any.
    async fn publish_result(&mut self, result: &MatchResult) -> anyhow::Result<()> {
        let value = serde_json::to_string(result)?;
        set_with_retry(
            &self.transport,
            &Key::end_of_game(),
            &value,
            self.config.timing.retry_interval,
        )
        .await;

        if let Some(recorder) = self.config.recorder.as_mut() {
            let path = recorder.write_match_recording(&self.config.room_id)?;
            info!(path = %path.display(), "Wrote match recording");
        }
        Ok(())
    }

    /// The turn loop. Every player gets `turn_timeout` from the moment it
    /// becomes their turn, no matter how many other messages arrive.
    async fn play(&mut self, game: &mut Game) -> anyhow::Result<Outcome> {
        loop {
            let deadline = tokio::time::sleep(self.config.timing.turn_timeout);
            tokio::pin!(deadline);

            loop {
                let object = tokio::select! {
                    _ = &mut deadline => {
                        let outcome = game.timeout()?;
                        info!(player = %game.board().turn(), "Turn timed out");
                        return Ok(outcome);
                    }
                    received = self.actions.recv() => match received {
                        Some(object) => object,
                        None => anyhow::bail!("The action stream closed during the match"),
                    },
                };

                let judged = game.judge(&object);
                if let Some(recorder) = self.config.recorder.as_mut() {
                    recorder.store_message(&object, verdict_label(&judged));
                }
                match judged {
                    Ok(Verdict::Ignored) => {}
                    Ok(Verdict::Accepted) => {
                        debug!("Board:\n{}", visualize(game.board()));
                        self.publish_board(game.board()).await?;
                        break;
                    }
                    Ok(Verdict::Finished(outcome)) => {
                        if matches!(
                            outcome,
                            Outcome::WinnerDeclared { .. } | Outcome::Tie { .. }
                        ) {
                            debug!("Final board:\n{}", visualize(game.board()));
                            self.publish_board(game.board()).await?;
                        }
                        return Ok(outcome);
                    }
                    Err(JudgeError::MalformedAction { player, source }) => {
                        warn!(%player, error = %source, "Dropping action that could not be parsed");
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }

    async fn publish_board(&self, board: &Board) -> anyhow::Result<()> {
        let value = serde_json::to_string(board)?;
        set_with_retry(
            &self.transport,
            &Key::board(),
            &value,
            self.config.timing.retry_interval,
        )
        .await;
        Ok(())
    }
}

fn verdict_label(judged: &Result<Verdict, JudgeError>) -> &'static str {
    match judged {
        Ok(Verdict::Ignored) => "ignored",
        Ok(Verdict::Accepted) => "accepted",
        Ok(Verdict::Finished(_)) => "finished",
        Err(JudgeError::MalformedAction { .. }) => "malformed",
        Err(JudgeError::TurnHeldByStranger { .. }) => "error",
    }
}
