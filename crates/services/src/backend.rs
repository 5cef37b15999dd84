use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use quiz_core::model::{Feedback, KnowledgeVector, Question, QuestionId, TopicId};

use crate::error::BackendError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

/// A question together with the knowledge vector returned alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRound {
    pub question: Question,
    pub knowledge: KnowledgeVector,
}

/// Backend verdict for a submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerVerdict {
    pub feedback: Feedback,
    pub knowledge: KnowledgeVector,
}

/// Read-only mastery snapshot from the stats endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    pub knowledge: KnowledgeVector,
    pub topics: Vec<String>,
}

/// Contract of the remote learning backend.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// `GET /api/question`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport, status or payload failures.
    async fn fetch_question(&self) -> Result<QuestionRound, BackendError>;

    /// `POST /api/submit`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport, status or payload failures.
    async fn submit_answer(&self, answer: usize) -> Result<AnswerVerdict, BackendError>;

    /// `GET /api/stats`
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport, status or payload failures.
    async fn fetch_stats(&self) -> Result<StatsSnapshot, BackendError>;
}

/// `QuizBackend` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns `BackendError::Network` if the HTTP client cannot be built.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status()));
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[async_trait]
impl QuizBackend for HttpBackend {
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn fetch_question(&self) -> Result<QuestionRound, BackendError> {
        let response = self
            .client
            .get(self.config.endpoint("/api/question"))
            .send()
            .await?;
        let payload: QuestionPayload = Self::read_json(response).await?;
        payload.into_round()
    }

    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn submit_answer(&self, answer: usize) -> Result<AnswerVerdict, BackendError> {
        let response = self
            .client
            .post(self.config.endpoint("/api/submit"))
            .json(&SubmitRequest { answer })
            .send()
            .await?;
        let payload: SubmitPayload = Self::read_json(response).await?;
        Ok(payload.into())
    }

    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn fetch_stats(&self) -> Result<StatsSnapshot, BackendError> {
        let response = self
            .client
            .get(self.config.endpoint("/api/stats"))
            .send()
            .await?;
        let payload: StatsPayload = Self::read_json(response).await?;
        Ok(payload.into())
    }
}

#[derive(Debug, Serialize)]
struct SubmitRequest {
    answer: usize,
}

#[derive(Debug, Deserialize)]
struct QuestionPayload {
    qid: u64,
    topic: u32,
    question: String,
    options: Vec<String>,
    #[serde(default)]
    knowledge: KnowledgeVector,
}

impl QuestionPayload {
    fn into_round(self) -> Result<QuestionRound, BackendError> {
        let question = Question::new(
            QuestionId::new(self.qid),
            TopicId::new(self.topic),
            self.question,
            self.options,
        )?;
        Ok(QuestionRound {
            question,
            knowledge: self.knowledge,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SubmitPayload {
    correct: bool,
    #[serde(default)]
    feedback: String,
    #[serde(default)]
    knowledge: KnowledgeVector,
}

impl From<SubmitPayload> for AnswerVerdict {
    fn from(payload: SubmitPayload) -> Self {
        Self {
            feedback: Feedback::new(payload.correct, payload.feedback),
            knowledge: payload.knowledge,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatsPayload {
    #[serde(default)]
    knowledge: KnowledgeVector,
    #[serde(default)]
    topics: Vec<String>,
}

impl From<StatsPayload> for StatsSnapshot {
    fn from(payload: StatsPayload) -> Self {
        Self {
            knowledge: payload.knowledge,
            topics: payload.topics,
        }
    }
}
