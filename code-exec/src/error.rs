use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing input; no network call was made
    #[error("{0}")]
    Validation(String),

    /// A required credential is missing; no network call was made
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The create-submission call failed and was not retried
    #[error("Submission failed: {0}")]
    Submission(#[source] judge_client::Error),

    /// The poll budget ran out before the job finished; outcome unknown
    #[error("Code execution timeout after {attempts} polls")]
    Timeout {
        attempts: u32,
        last_error: Option<String>,
    },

    #[error("Code execution cancelled")]
    Cancelled,
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
