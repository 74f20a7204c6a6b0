use inv_core::WorldError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that abort a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The world map rejected an operation.
    #[error(transparent)]
    World(#[from] WorldError),

    /// Every name of the configured length is already taken by a living alien.
    #[error("no free alien names of length {length} left")]
    NameSpaceExhausted {
        /// The configured name length.
        length: usize,
    },
}
