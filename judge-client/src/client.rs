use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::{
    config::Judge0Config,
    error::Error,
    types::{Submission, SubmissionRequest, SubmissionToken},
};

/// Client for the Judge0 submissions API
#[derive(Debug, Clone)]
pub struct Judge0Client {
    client: Client,
    config: Judge0Config,
}

impl Judge0Client {
    /// Create a new Judge0Client with the given configuration
    pub fn new(config: Judge0Config) -> Result<Self, Error> {
        if config.api_key.is_empty() {
            return Err(Error::Configuration("Judge0 API key not configured".into()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Judge0Config {
        &self.config
    }

    /// Queue a submission without waiting for it to run, returning its token
    pub async fn create_submission(&self, request: &SubmissionRequest) -> Result<String, Error> {
        let response = self
            .authorize(self.client.post(format!(
                "{}/submissions?base64_encoded=false&wait=false",
                self.config.api_url
            )))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body = response.json::<SubmissionToken>().await?;

        if body.token.is_empty() {
            return Err(Error::MalformedResponse(
                "submission response carried an empty token".into(),
            ));
        }

        debug!("Created submission {}", body.token);
        Ok(body.token)
    }

    /// Fetch the current state of a submission by token
    pub async fn get_submission(&self, token: &str) -> Result<Submission, Error> {
        let response = self
            .authorize(self.client.get(format!(
                "{}/submissions/{}?base64_encoded=false",
                self.config.api_url, token
            )))
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        response.json::<Submission>().await.map_err(Error::HttpClient)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("X-RapidAPI-Key", &self.config.api_key);
        match &self.config.api_host {
            Some(host) => builder.header("X-RapidAPI-Host", host),
            None => builder,
        }
    }

    async fn check_status(response: Response) -> Result<Response, Error> {
        if !response.status().is_success() {
            return Err(Error::Api {
                status_code: response.status().as_u16(),
                message: response.text().await?,
            });
        }
        Ok(response)
    }
}
