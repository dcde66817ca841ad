//! # Judge Client
//!
//! A small typed client for the Judge0 submissions API. Judge0 runs source code
//! asynchronously: a submission is created and answered with an opaque token,
//! and the token is later used to fetch the submission's status and output.
//!
//! ## Example
//!
//! ```rust,no_run
//! use judge_client::{Judge0Client, Judge0Config, SubmissionRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Judge0Client::new(Judge0Config::new("your-api-key".to_string()))?;
//!
//!     let token = client
//!         .create_submission(&SubmissionRequest::new("print(1)", 71))
//!         .await?;
//!     let submission = client.get_submission(&token).await?;
//!
//!     println!("{}: {}", submission.status.id, submission.status.description);
//!     Ok(())
//! }
//! ```
//!
//! The client never retries on its own; callers decide which failures are
//! worth another attempt.

mod client;
mod config;
mod error;
mod types;

pub use client::Judge0Client;
pub use config::{Judge0Config, DEFAULT_API_HOST, DEFAULT_API_URL};
pub use error::Error;
pub use types::*;

/// Result type for Judge0 API operations
pub type Result<T> = std::result::Result<T, Error>;
