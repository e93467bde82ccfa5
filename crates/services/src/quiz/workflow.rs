use std::sync::Arc;

use gateway::ContentGateway;
use story_core::model::{ChapterId, QuizId, QuizResult, StoryId, UserId};

use super::session::QuizSession;
use crate::error::QuizError;

/// Orchestrates quiz loading, one-shot submission, and retakes.
#[derive(Clone)]
pub struct QuizWorkflow {
    gateway: Arc<dyn ContentGateway>,
    user_id: UserId,
}

impl QuizWorkflow {
    #[must_use]
    pub fn new(gateway: Arc<dyn ContentGateway>, user_id: UserId) -> Self {
        Self { gateway, user_id }
    }

    /// Loads the quiz for a story, or for one of its chapters, and opens a
    /// session on the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Fetch` when the gateway fails and
    /// `QuizError::NoQuestions` when the story has no quiz.
    pub async fn start(
        &self,
        story_id: StoryId,
        chapter_id: Option<ChapterId>,
    ) -> Result<QuizSession, QuizError> {
        let questions = self
            .gateway
            .quiz_questions(story_id, chapter_id)
            .await
            .map_err(QuizError::Fetch)?;
        QuizSession::new(story_id, chapter_id, questions)
    }

    /// Submits the whole answer buffer for grading and freezes the session
    /// with the result. Unanswered questions are submitted as null answers.
    ///
    /// A failed submission leaves the session untouched, so the caller can
    /// retry.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadySubmitted` for a finished session and
    /// `QuizError::Submission` when the gateway rejects the submission.
    pub async fn submit(&self, session: &mut QuizSession) -> Result<QuizResult, QuizError> {
        if session.is_complete() {
            return Err(QuizError::AlreadySubmitted);
        }

        session.commit_draft();
        let records = session.build_records();
        // The grading endpoint addresses a story's quiz by the story id.
        let quiz_id = QuizId::new(session.story_id().value());
        let result = self
            .gateway
            .submit_quiz(self.user_id, quiz_id, &records)
            .await
            .map_err(QuizError::Submission)?;

        session.complete(result.clone());
        Ok(result)
    }

    /// Reloads the questions and resets the session for another attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotCompleted` if nothing has been submitted yet,
    /// `QuizError::Fetch` when the reload fails, and
    /// `QuizError::NoQuestions` when the quiz has disappeared.
    pub async fn retake(&self, session: &mut QuizSession) -> Result<(), QuizError> {
        if !session.is_complete() {
            return Err(QuizError::NotCompleted);
        }

        let questions = self
            .gateway
            .quiz_questions(session.story_id(), session.chapter_id())
            .await
            .map_err(QuizError::Fetch)?;
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        session.reset_with(questions);
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
