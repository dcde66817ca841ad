use chrono::{DateTime, Utc};
use code_exec::ExecutionResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored account; never serialized as-is
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// bcrypt hash, salt included
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user, attached to authenticated requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: Uuid,
    pub title: String,
    pub code: String,
    pub language: String,
    /// Owner
    pub user: Uuid,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub run_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: AuthUser,
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSnippetRequest {
    pub title: String,
    pub code: String,
    pub language: String,
    pub tags: Option<Vec<String>>,
    pub is_public: bool,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSnippetRequest {
    pub title: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetSummary {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Snippet> for SnippetSummary {
    fn from(snippet: &Snippet) -> Self {
        Self {
            id: snippet.id,
            title: snippet.title.clone(),
            language: snippet.language.clone(),
            created_at: snippet.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_codes: usize,
    pub recent_codes: Vec<SnippetSummary>,
}

/// Editor projection returned by `GET /code/load/:id`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedSnippet {
    pub id: Uuid,
    pub title: String,
    pub code: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Snippet> for LoadedSnippet {
    fn from(snippet: Snippet) -> Self {
        Self {
            id: snippet.id,
            title: snippet.title,
            code: snippet.code,
            language: snippet.language,
            created_at: snippet.created_at,
            updated_at: snippet.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunRequest {
    pub code: String,
    pub language: String,
    /// Saved snippet whose run counter should be bumped; anything that is
    /// not a UUID string is treated as absent
    #[serde(deserialize_with = "lenient_uuid")]
    pub snippet_id: Option<Uuid>,
}

fn lenient_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunResponse {
    pub output: String,
    pub error: String,
    pub status: String,
    /// Seconds, as the judge's decimal string
    pub time: Option<String>,
    /// Kilobytes
    pub memory: Option<u64>,
}

impl From<&ExecutionResult> for RunResponse {
    fn from(result: &ExecutionResult) -> Self {
        Self {
            output: result.output().to_string(),
            error: result.error().to_string(),
            status: result.status_description.clone(),
            time: result.reported_time.clone(),
            memory: result.memory_used,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExplainErrorRequest {
    pub error_message: String,
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnswerQuestionRequest {
    pub question: String,
    pub code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImproveCodeRequest {
    pub code: String,
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExplanationResponse {
    pub explanation: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}
