use serde::{Deserialize, Serialize};

/// An invader occupying exactly one city at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alien {
    /// Unique name of the alien.
    pub name: String,
    /// Name of the city the alien is currently in.
    pub city: String,
}

impl Alien {
    /// Create an alien located in `city`.
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
        }
    }
}
