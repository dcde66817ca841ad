use async_trait::async_trait;
use judge_client::{Submission, SubmissionRequest};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{RemoteExecutor, Sleeper, SubmissionBackend};

/// What a single poll returns
#[derive(Clone)]
pub enum PollStep {
    Respond(Submission),
    NetworkFailure,
}

/// In-memory judge that replays a fixed poll script for every token it hands out
pub struct ScriptedBackend {
    script: Vec<PollStep>,
    submit_failure: Option<u16>,
    submit_calls: AtomicUsize,
    submissions: Mutex<Vec<SubmissionRequest>>,
    polls: Mutex<HashMap<String, usize>>,
    poll_log: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(script: Vec<PollStep>) -> Self {
        Self {
            script,
            submit_failure: None,
            submit_calls: AtomicUsize::new(0),
            submissions: Mutex::new(Vec::new()),
            polls: Mutex::new(HashMap::new()),
            poll_log: Mutex::new(Vec::new()),
        }
    }

    pub fn responding(submissions: Vec<Submission>) -> Self {
        Self::new(submissions.into_iter().map(PollStep::Respond).collect())
    }

    pub fn failing_submission(status_code: u16) -> Self {
        Self {
            submit_failure: Some(status_code),
            ..Self::new(Vec::new())
        }
    }

    pub fn submit_count(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn poll_count(&self) -> usize {
        self.poll_log.lock().unwrap().len()
    }

    /// Tokens in the order they were polled
    pub fn poll_log(&self) -> Vec<String> {
        self.poll_log.lock().unwrap().clone()
    }

    pub fn last_submission(&self) -> Option<SubmissionRequest> {
        self.submissions.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SubmissionBackend for ScriptedBackend {
    async fn submit(&self, request: &SubmissionRequest) -> judge_client::Result<String> {
        let n = self.submit_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.submissions.lock().unwrap().push(request.clone());

        if let Some(status_code) = self.submit_failure {
            return Err(judge_client::Error::Api {
                status_code,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(format!("job-{}", n))
    }

    async fn fetch(&self, token: &str) -> judge_client::Result<Submission> {
        self.poll_log.lock().unwrap().push(token.to_string());

        let index = {
            let mut polls = self.polls.lock().unwrap();
            let counter = polls.entry(token.to_string()).or_insert(0);
            let index = *counter;
            *counter += 1;
            index
        };

        // Past the end of the script the last step repeats
        let step = self
            .script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
            .expect("poll script must not be empty");

        match step {
            PollStep::Respond(submission) => Ok(submission),
            PollStep::NetworkFailure => Err(judge_client::Error::MalformedResponse(
                "connection reset by peer".to_string(),
            )),
        }
    }
}

/// Sleeper that returns immediately and remembers every requested delay
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        tokio::task::yield_now().await;
    }
}

pub fn executor_for(
    backend: Arc<ScriptedBackend>,
    sleeper: Arc<RecordingSleeper>,
) -> RemoteExecutor {
    RemoteExecutor::new(backend).with_sleeper(sleeper)
}
