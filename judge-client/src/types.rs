use serde::{Deserialize, Serialize};

/// Body of `POST /submissions`
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRequest {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
    /// CPU time limit in seconds
    pub cpu_time_limit: u32,
    /// Memory limit in kilobytes
    pub memory_limit: u64,
}

impl SubmissionRequest {
    pub fn new(source_code: impl Into<String>, language_id: u32) -> Self {
        Self {
            source_code: source_code.into(),
            language_id,
            stdin: String::new(),
            cpu_time_limit: 5,
            memory_limit: 128_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionToken {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStatus {
    pub id: u32,
    pub description: String,
}

/// Body of `GET /submissions/{token}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub token: Option<String>,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Wall time in seconds, reported as a decimal string
    #[serde(default)]
    pub time: Option<String>,
    /// Peak memory in kilobytes
    #[serde(default)]
    pub memory: Option<u64>,
}
