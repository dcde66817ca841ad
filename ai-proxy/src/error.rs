use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    /// The provider failed or answered with an unexpected shape.
    /// The cause is logged, the caller only sees a generic message.
    #[error("AI service temporarily unavailable")]
    Provider(String),

    #[error("Gemini model not found. Please check model availability.")]
    ModelUnavailable(String),
}
