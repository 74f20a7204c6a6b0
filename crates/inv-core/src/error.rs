/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur when manipulating a world map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// An alien was sent into a city that does not exist.
    #[error("cannot unleash alien \"{alien}\" into non-existing city \"{city}\"")]
    UnknownCity {
        /// The alien that was being placed.
        alien: String,
        /// The city that could not be found.
        city: String,
    },

    /// A random city was requested but the world has no cities left.
    #[error("the world has no cities")]
    EmptyWorld,

    /// A direction token outside east/north/west/south.
    #[error("wrong direction \"{0}\"")]
    InvalidDirection(String),

    /// An alien with the same name is already alive.
    #[error("alien already exists: \"{0}\"")]
    DuplicateAlien(String),
}
