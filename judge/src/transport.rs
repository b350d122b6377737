use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

/// The namespace all objects of this game live in.
pub const NAMESPACE: &str = "quarto";
/// The name under which the referee publishes the final result.
pub const REFEREE_NAME: &str = "referee";
/// The name under which board snapshots are published.
pub const BOARD_NAME: &str = "board";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectType {
    /// A move submitted by a player.
    Action,
    /// A board snapshot published by the referee.
    Verdict,
    /// A player announcing that it takes part in the match.
    Register,
    /// The final result.
    EndOfGame,
}

/// Addresses an object in the store.
///
/// When used as a filter, an empty `namespace` or `name` matches anything.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub namespace: String,
    #[serde(rename = "type")]
    pub kind: ObjectType,
    pub name: String,
}

impl Key {
    /// A key in the game's namespace.
    pub fn new(kind: ObjectType, name: &str) -> Self {
        Self {
            namespace: String::from(NAMESPACE),
            kind,
            name: String::from(name),
        }
    }

    /// Matches every object of this type in the game's namespace.
    pub fn filter(kind: ObjectType) -> Self {
        Self::new(kind, "")
    }

    pub fn board() -> Self {
        Self::new(ObjectType::Verdict, BOARD_NAME)
    }

    pub fn end_of_game() -> Self {
        Self::new(ObjectType::EndOfGame, REFEREE_NAME)
    }

    /// Does `key` fall under this filter?
    pub fn matches(&self, key: &Key) -> bool {
        (self.namespace.is_empty() || self.namespace == key.namespace)
            && self.kind == key.kind
            && (self.name.is_empty() || self.name == key.name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ObjectType::Action => "action",
            ObjectType::Verdict => "verdict",
            ObjectType::Register => "register",
            ObjectType::EndOfGame => "end-of-game",
        };
        write!(f, "{}/{}/{}", self.namespace, kind, self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// The identity that wrote the object.
    pub owner: String,
}

impl Meta {
    pub fn new(owner: &str) -> Self {
        Self {
            owner: String::from(owner),
        }
    }
}

/// A stored object. The value is usually JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub key: Key,
    pub meta: Meta,
    #[serde(default)]
    pub value: String,
}

/// A shared key-value store with change notifications, through which the
/// referee talks to the players.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Subscribes to all objects matching `filter` that are written from now on.
    async fn watch(&self, filter: Key) -> anyhow::Result<UnboundedReceiver<Object>>;

    /// Returns all objects currently matching `filter`.
    async fn find(&self, filter: &Key) -> anyhow::Result<Vec<Object>>;

    /// Creates or replaces the object at `key`.
    async fn set(&self, key: Key, value: String) -> anyhow::Result<()>;
}

/// Calls [`Transport::set()`] until it succeeds, pausing `backoff` between attempts.
pub async fn set_with_retry<T: Transport + ?Sized>(
    transport: &T,
    key: &Key,
    value: &str,
    backoff: Duration,
) {
    let mut attempt: u32 = 1;
    loop {
        match transport.set(key.clone(), String::from(value)).await {
            Ok(()) => return,
            Err(err) => {
                warn!(%key, attempt, error = %err, "Could not set object, retrying");
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}
