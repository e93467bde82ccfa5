use std::env;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use story_core::model::{
    AnswerRecord, ChapterId, QuizId, QuizQuestion, QuizResult, Story, StoryFilter, StoryId,
    UserId, UserProgress,
};

use crate::content::ContentGateway;
use crate::error::GatewayError;

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Connection settings for the content API.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base_url: Url,
}

impl GatewayConfig {
    /// API location used when `STORY_API_URL` is unset.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080";

    /// Reads `STORY_API_URL`, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidBaseUrl` if the value does not parse.
    pub fn from_env() -> Result<Self, GatewayError> {
        let raw =
            env::var("STORY_API_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_owned());
        Self::new(&raw)
    }

    /// Builds a config from an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidBaseUrl` if the URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }
}

//
// ─── HTTP GATEWAY ──────────────────────────────────────────────────────────────
//

/// [`ContentGateway`] backed by the real content API over HTTP.
#[derive(Clone)]
pub struct HttpContentGateway {
    client: Client,
    base_url: Url,
}

impl HttpContentGateway {
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
        }
    }

    /// Builds a gateway from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidBaseUrl` if `STORY_API_URL` is invalid.
    pub fn from_env() -> Result<Self, GatewayError> {
        Ok(Self::new(GatewayConfig::from_env()?))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[async_trait]
impl ContentGateway for HttpContentGateway {
    async fn list_stories(&self, filter: &StoryFilter) -> Result<Vec<Story>, GatewayError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(language) = filter.language() {
            params.push(("language", language.to_owned()));
        }
        if let Some(difficulty) = filter.difficulty() {
            params.push(("difficulty", difficulty.as_str().to_owned()));
        }
        if let Some(keyword) = filter.keyword() {
            params.push(("keyword", keyword.to_owned()));
        }
        params.push(("page", filter.page().to_string()));
        params.push(("size", filter.size().to_string()));

        let response = self
            .client
            .get(self.url("stories"))
            .query(&params)
            .send()
            .await?;
        let listing: StoriesResponse = decode(response, None).await?;
        Ok(listing.into_stories())
    }

    async fn get_story(&self, id: StoryId) -> Result<Story, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("stories/{id}")))
            .send()
            .await?;
        decode(response, Some(format!("story {id}"))).await
    }

    async fn popular_stories(&self, limit: u32) -> Result<Vec<Story>, GatewayError> {
        let response = self
            .client
            .get(self.url("stories/popular"))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        decode(response, None).await
    }

    async fn quiz_questions(
        &self,
        story_id: StoryId,
        chapter_id: Option<ChapterId>,
    ) -> Result<Vec<QuizQuestion>, GatewayError> {
        let path = match chapter_id {
            Some(chapter) => format!("quiz/story/{story_id}/chapter/{chapter}"),
            None => format!("quiz/story/{story_id}"),
        };
        let response = self.client.get(self.url(&path)).send().await?;
        decode(response, Some(format!("quiz for story {story_id}"))).await
    }

    async fn submit_quiz(
        &self,
        user_id: UserId,
        quiz_id: QuizId,
        answers: &[AnswerRecord],
    ) -> Result<QuizResult, GatewayError> {
        let body = QuizSubmission { user_id, answers };
        let response = self
            .client
            .post(self.url(&format!("quiz/{quiz_id}/submit")))
            .json(&body)
            .send()
            .await?;
        decode(response, None).await
    }

    async fn user_progress(&self, user_id: UserId) -> Result<Vec<UserProgress>, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("progress/user/{user_id}")))
            .send()
            .await?;
        decode(response, None).await
    }

    async fn story_progress(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<UserProgress, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("progress/user/{user_id}/story/{story_id}")))
            .send()
            .await?;
        decode(response, Some(format!("progress for story {story_id}"))).await
    }

    async fn start_story(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<UserProgress, GatewayError> {
        let response = self
            .client
            .post(self.url(&format!("progress/user/{user_id}/story/{story_id}/start")))
            .send()
            .await?;
        decode(response, Some(format!("story {story_id}"))).await
    }

    async fn complete_chapter(
        &self,
        user_id: UserId,
        story_id: StoryId,
        chapter_number: u32,
    ) -> Result<UserProgress, GatewayError> {
        let path = format!(
            "progress/user/{user_id}/story/{story_id}/chapter/{chapter_number}/complete"
        );
        let response = self
            .client
            .post(self.url(&path))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        decode(response, Some(format!("story {story_id}"))).await
    }
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    missing: Option<String>,
) -> Result<T, GatewayError> {
    if response.status() == StatusCode::NOT_FOUND {
        if let Some(what) = missing {
            return Err(GatewayError::NotFound(what));
        }
    }
    if !response.status().is_success() {
        return Err(GatewayError::HttpStatus(response.status()));
    }
    Ok(response.json().await?)
}

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

/// The listing endpoint answers either a page envelope with a `content`
/// array or a bare array, depending on deployment. Accept both.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum StoriesResponse {
    Paged { content: Vec<Story> },
    Plain(Vec<Story>),
}

impl StoriesResponse {
    fn into_stories(self) -> Vec<Story> {
        match self {
            StoriesResponse::Paged { content } => content,
            StoriesResponse::Plain(stories) => stories,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuizSubmission<'a> {
    user_id: UserId,
    answers: &'a [AnswerRecord],
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
