use std::time::Duration;

use tracing::{debug, warn};

use crate::{Key, ObjectType, Player, Timing, Transport};

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// What was found when registration ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Registration {
    /// Exactly two players, in the order they registered.
    Complete([Player; 2]),
    /// Only one player showed up before the deadline.
    Walkover(Player),
    /// No players, or too many.
    Aborted { found: usize },
}

/// Polls for registered players until two are found or the registration
/// deadline passes.
///
/// At the deadline, one last lookup decides the outcome.
pub async fn register_players<T: Transport + ?Sized>(
    transport: &T,
    timing: &Timing,
) -> Registration {
    let filter = Key::filter(ObjectType::Register);
    let deadline = tokio::time::sleep(timing.registration_timeout);
    tokio::pin!(deadline);
    // `interval()` panics on a zero period
    let mut ticker = tokio::time::interval(timing.poll_interval.max(MIN_POLL_INTERVAL));

    loop {
        tokio::select! {
            _ = &mut deadline => {
                return match <[Player; 2]>::try_from(find_players(transport, &filter).await) {
                    Ok(players) => Registration::Complete(players),
                    Err(mut players) if players.len() == 1 => {
                        Registration::Walkover(players.remove(0))
                    }
                    Err(players) => Registration::Aborted {
                        found: players.len(),
                    },
                };
            }
            _ = ticker.tick() => {
                let players = find_players(transport, &filter).await;
                debug!(found = players.len(), "Polled for players");
                if let Ok(players) = <[Player; 2]>::try_from(players) {
                    return Registration::Complete(players);
                }
            }
        }
    }
}

/// A failed lookup counts as finding nobody.
async fn find_players<T: Transport + ?Sized>(transport: &T, filter: &Key) -> Vec<Player> {
    match transport.find(filter).await {
        Ok(objects) => objects.iter().map(Player::from_registration).collect(),
        Err(err) => {
            warn!(error = %err, "Could not look up registered players");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;
    use crate::{MemoryStore, Meta, Object, REFEREE_NAME};

    fn register(store: &MemoryStore, name: &str, owner: &str) {
        store.put(Object {
            key: Key::new(ObjectType::Register, name),
            meta: Meta::new(owner),
            value: String::new(),
        });
    }

    #[tokio::test(start_paused = true)]
    async fn two_players_start_right_away() {
        let store = MemoryStore::new(REFEREE_NAME);
        register(&store, "player1", "alice");
        register(&store, "player2", "bob");

        let start = Instant::now();
        let registration = register_players(&store, &Timing::default()).await;
        assert_eq!(
            registration,
            Registration::Complete([Player::new("player1", "alice"), Player::new("player2", "bob")])
        );
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn late_second_player_is_picked_up() {
        let store = MemoryStore::new(REFEREE_NAME);
        register(&store, "player1", "alice");
        let late = store.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            register(&late, "player2", "bob");
        });

        let start = Instant::now();
        let registration = register_players(&store, &Timing::default()).await;
        assert!(matches!(registration, Registration::Complete(_)));
        // Picked up by the next poll after the registration
        assert!(start.elapsed() >= Duration::from_secs(5));
        assert!(start.elapsed() <= Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn single_player_wins_by_walkover() {
        let store = MemoryStore::new(REFEREE_NAME);
        register(&store, "player1", "alice");

        let start = Instant::now();
        let registration = register_players(&store, &Timing::default()).await;
        assert_eq!(registration, Registration::Walkover(Player::new("player1", "alice")));
        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_poll_interval_still_polls() {
        let store = MemoryStore::new(REFEREE_NAME);
        register(&store, "player1", "alice");
        let late = store.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            register(&late, "player2", "bob");
        });

        let timing = Timing {
            poll_interval: Duration::ZERO,
            ..Timing::default()
        };
        let start = Instant::now();
        let registration = register_players(&store, &timing).await;
        assert!(matches!(registration, Registration::Complete(_)));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn nobody_aborts() {
        let store = MemoryStore::new(REFEREE_NAME);
        let registration = register_players(&store, &Timing::default()).await;
        assert_eq!(registration, Registration::Aborted { found: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn too_many_players_abort() {
        let store = MemoryStore::new(REFEREE_NAME);
        register(&store, "player1", "alice");
        register(&store, "player2", "bob");
        register(&store, "player3", "carol");
        let registration = register_players(&store, &Timing::default()).await;
        assert_eq!(registration, Registration::Aborted { found: 3 });
    }
}
