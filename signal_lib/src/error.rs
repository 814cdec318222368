//! Errors returned by the signal controller.

/// An error raised while configuring or starting a signal.
#[derive(thiserror::Error, Debug)]
pub enum SignalError {
    /// `simulate` was called on a controller whose cycle thread is already running.
    #[error("the signal cycle has already been started")]
    AlreadyStarted,

    /// The cycle range is empty or starts at zero.
    #[error("invalid cycle range - found: `{min_ms}..{max_ms}` ms, expected a non-empty range starting above 0")]
    InvalidCycleRange {
        /// Lower bound in milliseconds (inclusive).
        min_ms: u64,
        /// Upper bound in milliseconds (exclusive).
        max_ms: u64,
    },

    /// The OS refused to create the cycle thread.
    #[error("failed to spawn the signal cycle thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    /// The configuration text could not be parsed.
    #[error("invalid signal configuration: {0}")]
    Config(#[from] serde_json::Error),
}
