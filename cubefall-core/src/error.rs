/// Error types for the simulation core

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Invalid shape parameters, a zero-length axis, or out-of-range options.
    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),
}

impl CoreError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}
