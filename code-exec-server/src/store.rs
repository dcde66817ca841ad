//! In-memory user and snippet stores

use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    auth::{hash_password, verify_password, DEFAULT_PASSWORD_COST},
    models::{CreateSnippetRequest, Snippet, UpdateSnippetRequest, User},
};

pub const LIST_LIMIT: usize = 20;
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, PartialEq, Eq)]
pub enum StoreError {
    DuplicateEmail,
    PasswordHash(String),
}

pub struct UserStore {
    users: RwLock<HashMap<Uuid, User>>,
    password_cost: u32,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::with_password_cost(DEFAULT_PASSWORD_COST)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// bcrypt cost for new passwords; existing hashes carry their own
    pub fn with_password_cost(password_cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            password_cost,
        }
    }

    pub async fn create(&self, name: &str, email: &str, password: &str) -> Result<User, StoreError> {
        let email = normalize_email(email);
        if self.users.read().await.values().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let password = password.to_string();
        let cost = self.password_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| StoreError::PasswordHash(e.to_string()))?
            .map_err(|e| StoreError::PasswordHash(e.to_string()))?;

        // Checked again: another registration may have won while hashing
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email,
            password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Returns the user only when the password matches
    pub async fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        let email = normalize_email(email);
        let user = self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .unwrap_or(false);

        matches.then_some(user)
    }

    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }
}

/// Snippets kept in insertion order, so iterating in reverse is newest first
#[derive(Default)]
pub struct SnippetStore {
    snippets: RwLock<Vec<Snippet>>,
}

fn matches_search(snippet: &Snippet, needle: &str) -> bool {
    snippet.title.to_lowercase().contains(needle)
        || snippet.language.to_lowercase().contains(needle)
        || snippet
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(needle))
}

impl SnippetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, owner: Uuid, request: CreateSnippetRequest) -> Snippet {
        let now = Utc::now();
        let snippet = Snippet {
            id: Uuid::new_v4(),
            title: request.title,
            code: request.code,
            language: request.language,
            user: owner,
            tags: request.tags.unwrap_or_default(),
            is_public: request.is_public,
            run_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.snippets.write().await.push(snippet.clone());
        snippet
    }

    /// Newest first, at most [`LIST_LIMIT`] entries
    pub async fn list(&self, owner: Uuid, search: Option<&str>) -> Vec<Snippet> {
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let snippets = self.snippets.read().await;
        snippets
            .iter()
            .rev()
            .filter(|s| s.user == owner)
            .filter(|s| needle.as_deref().map_or(true, |n| matches_search(s, n)))
            .take(LIST_LIMIT)
            .cloned()
            .collect()
    }

    pub async fn count(&self, owner: Uuid) -> usize {
        self.snippets
            .read()
            .await
            .iter()
            .filter(|s| s.user == owner)
            .count()
    }

    pub async fn recent(&self, owner: Uuid) -> Vec<Snippet> {
        let snippets = self.snippets.read().await;
        snippets
            .iter()
            .rev()
            .filter(|s| s.user == owner)
            .take(RECENT_LIMIT)
            .cloned()
            .collect()
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Option<Snippet> {
        self.snippets
            .read()
            .await
            .iter()
            .find(|s| s.id == id && s.user == owner)
            .cloned()
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: UpdateSnippetRequest,
    ) -> Option<Snippet> {
        let mut snippets = self.snippets.write().await;
        let snippet = snippets
            .iter_mut()
            .find(|s| s.id == id && s.user == owner)?;

        if let Some(title) = changes.title {
            snippet.title = title;
        }
        if let Some(code) = changes.code {
            snippet.code = code;
        }
        if let Some(language) = changes.language {
            snippet.language = language;
        }
        if let Some(tags) = changes.tags {
            snippet.tags = tags;
        }
        if let Some(is_public) = changes.is_public {
            snippet.is_public = is_public;
        }
        snippet.updated_at = Utc::now();

        Some(snippet.clone())
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> bool {
        let mut snippets = self.snippets.write().await;
        let before = snippets.len();
        snippets.retain(|s| !(s.id == id && s.user == owner));
        snippets.len() != before
    }

    /// Bumps the run counter; returns the new count
    pub async fn record_run(&self, owner: Uuid, id: Uuid) -> Option<u64> {
        let mut snippets = self.snippets.write().await;
        let snippet = snippets
            .iter_mut()
            .find(|s| s.id == id && s.user == owner)?;
        snippet.run_count += 1;
        Some(snippet.run_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, language: &str, tags: &[&str]) -> CreateSnippetRequest {
        CreateSnippetRequest {
            title: title.to_string(),
            code: "print(1)".to_string(),
            language: language.to_string(),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            is_public: false,
        }
    }

    #[tokio::test]
    async fn test_users_are_unique_by_normalized_email() {
        let store = UserStore::with_password_cost(4);
        let user = store
            .create("Ada", " Ada@Example.com ", "secret")
            .await
            .unwrap();
        assert_eq!(user.email, "ada@example.com");

        let duplicate = store.create("Other", "ada@example.com", "x").await;
        assert_eq!(duplicate.unwrap_err(), StoreError::DuplicateEmail);

        assert!(store.authenticate("ADA@example.com", "secret").await.is_some());
        assert!(store.authenticate("ada@example.com", "wrong").await.is_none());
        assert!(store.authenticate("nobody@example.com", "secret").await.is_none());
        assert_eq!(store.get(user.id).await.unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_list_is_owner_scoped_newest_first_and_limited() {
        let store = SnippetStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        for i in 0..25 {
            store
                .create(owner, request(&format!("snippet {}", i), "python", &[]))
                .await;
        }
        store.create(other, request("foreign", "rust", &[])).await;

        let listed = store.list(owner, None).await;
        assert_eq!(listed.len(), LIST_LIMIT);
        assert_eq!(listed[0].title, "snippet 24");
        assert!(listed.iter().all(|s| s.user == owner));

        assert_eq!(store.count(owner).await, 25);
        assert_eq!(store.recent(owner).await.len(), RECENT_LIMIT);
        assert_eq!(store.count(other).await, 1);
    }

    #[tokio::test]
    async fn test_search_matches_title_language_and_tags() {
        let store = SnippetStore::new();
        let owner = Uuid::new_v4();
        store.create(owner, request("Fibonacci", "python", &[])).await;
        store.create(owner, request("Sorting", "rust", &["Algorithms"])).await;
        store.create(owner, request("Hello", "javascript", &[])).await;

        let titles = |found: Vec<Snippet>| -> Vec<String> {
            found.into_iter().map(|s| s.title).collect()
        };

        assert_eq!(titles(store.list(owner, Some("fib")).await), ["Fibonacci"]);
        assert_eq!(titles(store.list(owner, Some("RUST")).await), ["Sorting"]);
        assert_eq!(titles(store.list(owner, Some("algo")).await), ["Sorting"]);
        assert_eq!(store.list(owner, Some("  ")).await.len(), 3);
    }

    #[tokio::test]
    async fn test_partial_update_and_delete() {
        let store = SnippetStore::new();
        let owner = Uuid::new_v4();
        let snippet = store.create(owner, request("Draft", "python", &["a"])).await;

        let updated = store
            .update(
                owner,
                snippet.id,
                UpdateSnippetRequest {
                    title: Some("Final".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.code, snippet.code);
        assert_eq!(updated.tags, vec!["a".to_string()]);
        assert!(updated.updated_at >= snippet.updated_at);

        let stranger = Uuid::new_v4();
        assert!(store
            .update(stranger, snippet.id, UpdateSnippetRequest::default())
            .await
            .is_none());
        assert!(!store.delete(stranger, snippet.id).await);

        assert!(store.delete(owner, snippet.id).await);
        assert!(store.get(owner, snippet.id).await.is_none());
    }

    #[tokio::test]
    async fn test_record_run_counts_per_snippet() {
        let store = SnippetStore::new();
        let owner = Uuid::new_v4();
        let snippet = store.create(owner, request("Loop", "go", &[])).await;

        assert_eq!(store.record_run(owner, snippet.id).await, Some(1));
        assert_eq!(store.record_run(owner, snippet.id).await, Some(2));
        assert_eq!(store.record_run(Uuid::new_v4(), snippet.id).await, None);
        assert_eq!(store.get(owner, snippet.id).await.unwrap().run_count, 2);
    }
}
