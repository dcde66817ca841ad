use std::sync::Arc;
use tracing::info;

use crate::{client::TextGenerator, error::Error, prompts};

/// Coding helper backed by a text generator.
///
/// Without a generator every call validates its input and then fails with
/// [`Error::Configuration`], so a missing credential never reaches the network.
#[derive(Clone)]
pub struct AiAssistant {
    generator: Result<Arc<dyn TextGenerator>, String>,
}

impl AiAssistant {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Ok(generator),
        }
    }

    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            generator: Err(reason.into()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_ok()
    }

    pub async fn explain_error(&self, error_message: &str, code: &str) -> Result<String, Error> {
        if error_message.is_empty() || code.is_empty() {
            return Err(Error::Validation(
                "Error message and code are required".to_string(),
            ));
        }
        info!("Explaining error for {} bytes of code", code.len());
        self.ask(&prompts::explain_error(error_message, code)).await
    }

    pub async fn answer_question(
        &self,
        question: &str,
        code: Option<&str>,
    ) -> Result<String, Error> {
        if question.is_empty() {
            return Err(Error::Validation("Question is required".to_string()));
        }
        info!("Answering question ({} bytes)", question.len());
        self.ask(&prompts::answer_question(question, code)).await
    }

    pub async fn improve_code(&self, code: &str, language: &str) -> Result<String, Error> {
        if code.is_empty() || language.is_empty() {
            return Err(Error::Validation(
                "Code and language are required".to_string(),
            ));
        }
        info!("Suggesting improvements for {} code", language);
        self.ask(&prompts::improve_code(code, language)).await
    }

    async fn ask(&self, prompt: &str) -> Result<String, Error> {
        let generator = self
            .generator
            .as_ref()
            .map_err(|reason| Error::Configuration(reason.clone()))?;
        generator.generate(prompt).await
    }
}
