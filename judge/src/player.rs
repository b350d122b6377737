use crate::Object;

/// A registered player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    /// The role under which the player submits actions, e.g. `"player1"`.
    pub name: String,
    /// The owner identity, used to authorize actions and to report scores.
    pub id: String,
}

impl Player {
    pub fn new(name: &str, id: &str) -> Self {
        Self {
            name: String::from(name),
            id: String::from(id),
        }
    }

    /// The player behind a registration object.
    pub fn from_registration(object: &Object) -> Self {
        Self::new(&object.key.name, &object.meta.owner)
    }
}
