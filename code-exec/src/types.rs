use judge_client::Submission;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::{error::Error, languages::Language};

/// Judge0 reports this description for a clean run
pub const ACCEPTED_DESCRIPTION: &str = "Accepted";

/// Highest status id that still means "not finished" (1 = In Queue, 2 = Processing)
pub const LAST_RUNNING_STATUS: u32 = 2;

/// Code execution request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Source code to execute
    pub code: String,
    /// Human-readable language name, resolved through the language table
    pub language: String,
}

impl ExecutionRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
        }
    }

    /// Check the request and resolve its language without touching the network
    pub fn validate(&self) -> Result<Language, Error> {
        if self.code.is_empty() || self.language.is_empty() {
            return Err(Error::Validation(
                "Code and language are required".to_string(),
            ));
        }
        Language::lookup(&self.language)
    }
}

/// A submitted job, alive only for the duration of one execute call
#[derive(Debug, Clone)]
pub struct ExecutionJob {
    pub token: String,
    pub submitted_at: Instant,
}

/// Classified result of a finished job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "description")]
pub enum Outcome {
    Accepted,
    CompileError,
    RuntimeError,
    Other(String),
}

/// Execution status as reported by a single poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    Queued,
    Processing,
    Finished(Outcome),
}

impl ExecutionStatus {
    /// Classify a Judge0 status id and description
    pub fn classify(id: u32, description: &str) -> Self {
        match id {
            2 => ExecutionStatus::Processing,
            id if id <= LAST_RUNNING_STATUS => ExecutionStatus::Queued,
            3 => ExecutionStatus::Finished(Outcome::Accepted),
            6 => ExecutionStatus::Finished(Outcome::CompileError),
            7..=12 => ExecutionStatus::Finished(Outcome::RuntimeError),
            _ => ExecutionStatus::Finished(Outcome::Other(description.to_string())),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, ExecutionStatus::Finished(_))
    }
}

/// Normalized result of a finished job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Token of the job this result came from
    pub token: String,
    pub outcome: Outcome,
    pub stdout: String,
    pub stderr: String,
    pub compile_output: String,
    pub status_description: String,
    /// Judge time as sent, e.g. `"0.012"`
    pub reported_time: Option<String>,
    /// `reported_time` parsed
    pub elapsed_time: Option<Duration>,
    /// Peak memory in kilobytes
    pub memory_used: Option<u64>,
}

impl ExecutionResult {
    pub fn from_submission(token: String, outcome: Outcome, submission: Submission) -> Self {
        let elapsed_time = submission
            .time
            .as_deref()
            .and_then(|t| t.trim().parse::<f64>().ok())
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok());

        Self {
            token,
            outcome,
            stdout: submission.stdout.unwrap_or_default(),
            stderr: submission.stderr.unwrap_or_default(),
            compile_output: submission.compile_output.unwrap_or_default(),
            status_description: submission.status.description,
            reported_time: submission.time,
            elapsed_time,
            memory_used: submission.memory,
        }
    }

    /// Program output, empty when the program printed nothing
    pub fn output(&self) -> &str {
        &self.stdout
    }

    /// The single narrative error channel shown to the caller.
    ///
    /// stderr wins over compile output, which wins over a non-accepted
    /// status description.
    pub fn error(&self) -> &str {
        if !self.stderr.is_empty() {
            &self.stderr
        } else if !self.compile_output.is_empty() {
            &self.compile_output
        } else if self.status_description != ACCEPTED_DESCRIPTION {
            &self.status_description
        } else {
            ""
        }
    }
}

/// Limits sent with every submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum CPU time (seconds)
    pub cpu_time: u32,
    /// Maximum memory (kilobytes)
    pub memory: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            cpu_time: 5,
            memory: 128_000, // 128MB
        }
    }
}
