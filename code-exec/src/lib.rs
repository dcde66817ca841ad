//! # Code Execution Service
//!
//! Runs code snippets on a remote Judge0 deployment. A request is validated
//! against a closed language table, submitted as an asynchronous job, polled
//! under a bounded attempt budget and normalized into an [`ExecutionResult`].
//!
//! A program that ran and failed is still a successful execution: its failure
//! is carried in the result's `error` channel. Only orchestration failures
//! (validation, configuration, submission, timeout, cancellation) are errors.

mod error;
mod executor;
mod languages;
mod service;
mod types;

pub use error::Error;
pub use executor::{
    PollPolicy, RemoteExecutor, Sleeper, SubmissionBackend, TokioSleeper,
};
pub use languages::{Language, LANGUAGES};
pub use service::CodeExecutionService;
pub use tokio_util::sync::CancellationToken;
pub use types::{
    ExecutionJob, ExecutionRequest, ExecutionResult, ExecutionStatus, Outcome, ResourceLimits,
};

/// Result type for code execution operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
