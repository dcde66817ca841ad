use async_trait::async_trait;
use judge_client::{Judge0Client, Submission, SubmissionRequest};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    error::Error,
    languages::Language,
    types::{ExecutionJob, ExecutionRequest, ExecutionResult, ExecutionStatus, ResourceLimits},
};

/// The asynchronous job API the executor drives
#[async_trait]
pub trait SubmissionBackend: Send + Sync {
    /// Create a job and return its token
    async fn submit(&self, request: &SubmissionRequest) -> judge_client::Result<String>;

    /// Fetch the job's current state
    async fn fetch(&self, token: &str) -> judge_client::Result<Submission>;
}

#[async_trait]
impl SubmissionBackend for Judge0Client {
    async fn submit(&self, request: &SubmissionRequest) -> judge_client::Result<String> {
        self.create_submission(request).await
    }

    async fn fetch(&self, token: &str) -> judge_client::Result<Submission> {
        self.get_submission(token).await
    }
}

/// Waits between polls
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Poll budget for a single execution
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            interval: Duration::from_secs(1),
        }
    }
}

enum JobState {
    Submitted(ExecutionJob),
    Polling {
        job: ExecutionJob,
        attempt: u32,
        last_error: Option<String>,
    },
    Finished(ExecutionResult),
    TimedOut {
        attempts: u32,
        last_error: Option<String>,
    },
    Cancelled,
}

/// Submits code to a remote judge and polls it to completion.
///
/// Holds no per-execution state; every call owns its own token and attempt
/// counter, so one executor can serve any number of concurrent calls.
pub struct RemoteExecutor {
    backend: Arc<dyn SubmissionBackend>,
    sleeper: Arc<dyn Sleeper>,
    policy: PollPolicy,
    limits: ResourceLimits,
}

impl RemoteExecutor {
    pub fn new(backend: Arc<dyn SubmissionBackend>) -> Self {
        Self {
            backend,
            sleeper: Arc::new(TokioSleeper),
            policy: PollPolicy::default(),
            limits: ResourceLimits::default(),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Validate, submit and poll a request to completion
    pub async fn execute(
        &self,
        request: &ExecutionRequest,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, Error> {
        let language = request.validate()?;
        self.run(&request.code, language, cancel).await
    }

    /// Submit and poll already validated source
    pub async fn run(
        &self,
        code: &str,
        language: Language,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let job = self.submit(code, language).await?;
        let mut state = JobState::Submitted(job);

        loop {
            state = match state {
                JobState::Submitted(job) => JobState::Polling {
                    job,
                    attempt: 0,
                    last_error: None,
                },
                JobState::Polling {
                    attempt,
                    last_error,
                    ..
                } if attempt >= self.policy.max_attempts => JobState::TimedOut {
                    attempts: attempt,
                    last_error,
                },
                JobState::Polling {
                    job,
                    attempt,
                    last_error,
                } => self.poll_once(job, attempt, last_error, cancel).await,
                JobState::Finished(result) => {
                    info!(
                        "Execution {} finished with status: {}",
                        result.token, result.status_description
                    );
                    return Ok(result);
                }
                JobState::TimedOut {
                    attempts,
                    last_error,
                } => {
                    warn!("Execution timed out after {} polls", attempts);
                    return Err(Error::Timeout {
                        attempts,
                        last_error,
                    });
                }
                JobState::Cancelled => {
                    info!("Execution cancelled");
                    return Err(Error::Cancelled);
                }
            };
        }
    }

    async fn submit(&self, code: &str, language: Language) -> Result<ExecutionJob, Error> {
        let request = SubmissionRequest {
            source_code: code.to_string(),
            language_id: language.runtime_id(),
            stdin: String::new(),
            cpu_time_limit: self.limits.cpu_time,
            memory_limit: self.limits.memory,
        };

        debug!("Submitting {} code ({} bytes)", language, code.len());

        let token = self
            .backend
            .submit(&request)
            .await
            .map_err(Error::Submission)?;

        Ok(ExecutionJob {
            token,
            submitted_at: Instant::now(),
        })
    }

    async fn poll_once(
        &self,
        job: ExecutionJob,
        attempt: u32,
        last_error: Option<String>,
        cancel: &CancellationToken,
    ) -> JobState {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return JobState::Cancelled,
            _ = self.sleeper.sleep(self.policy.interval) => {}
        }

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return JobState::Cancelled,
            fetched = self.backend.fetch(&job.token) => fetched,
        };
        let attempt = attempt + 1;

        match fetched {
            Ok(submission) => {
                let status =
                    ExecutionStatus::classify(submission.status.id, &submission.status.description);
                debug!(
                    "Poll {} for {}: {:?} after {:?}",
                    attempt,
                    job.token,
                    status,
                    job.submitted_at.elapsed()
                );
                match status {
                    ExecutionStatus::Finished(outcome) => JobState::Finished(
                        ExecutionResult::from_submission(job.token, outcome, submission),
                    ),
                    _ => JobState::Polling {
                        job,
                        attempt,
                        last_error,
                    },
                }
            }
            Err(e) => {
                warn!("Poll {} for {} failed: {}", attempt, job.token, e);
                JobState::Polling {
                    job,
                    attempt,
                    last_error: Some(e.to_string()),
                }
            }
        }
    }
}
