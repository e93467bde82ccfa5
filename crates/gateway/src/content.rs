use async_trait::async_trait;

use story_core::model::{
    AnswerRecord, ChapterId, QuizId, QuizQuestion, QuizResult, Story, StoryFilter, StoryId,
    UserId, UserProgress,
};

use crate::error::GatewayError;

/// Contract for the remote content API.
///
/// Services hold this as `Arc<dyn ContentGateway>` so the HTTP client can be
/// swapped for the in-memory implementation in tests.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// Fetch one page of stories matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails or the response cannot be
    /// decoded.
    async fn list_stories(&self, filter: &StoryFilter) -> Result<Vec<Story>, GatewayError>;

    /// Fetch a single story by id.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if no such story exists, or other
    /// gateway errors.
    async fn get_story(&self, id: StoryId) -> Result<Story, GatewayError>;

    /// Fetch the most-read stories, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    async fn popular_stories(&self, limit: u32) -> Result<Vec<Story>, GatewayError>;

    /// Fetch the quiz questions for a story, optionally scoped to one chapter.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    async fn quiz_questions(
        &self,
        story_id: StoryId,
        chapter_id: Option<ChapterId>,
    ) -> Result<Vec<QuizQuestion>, GatewayError>;

    /// Submit a completed answer sheet for grading.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the submission fails; the caller may retry
    /// with the same records.
    async fn submit_quiz(
        &self,
        user_id: UserId,
        quiz_id: QuizId,
        answers: &[AnswerRecord],
    ) -> Result<QuizResult, GatewayError>;

    /// Fetch all story progress records for a user.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    async fn user_progress(&self, user_id: UserId) -> Result<Vec<UserProgress>, GatewayError>;

    /// Fetch a user's progress on one story.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if the user has no record for the
    /// story, or other gateway errors.
    async fn story_progress(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<UserProgress, GatewayError>;

    /// Mark a story as started, creating a progress record if needed.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the request fails.
    async fn start_story(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<UserProgress, GatewayError>;

    /// Record completion of one chapter and return the updated progress.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if the story is unknown, or other
    /// gateway errors.
    async fn complete_chapter(
        &self,
        user_id: UserId,
        story_id: StoryId,
        chapter_number: u32,
    ) -> Result<UserProgress, GatewayError>;
}
