//! Shared error types for the services crate.

use thiserror::Error;

use gateway::GatewayError;
use story_core::model::FilterError;

/// Errors emitted by `StoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoryServiceError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Errors emitted by quiz sessions and the quiz workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for this quiz")]
    NoQuestions,
    #[error("quiz already submitted")]
    AlreadySubmitted,
    #[error("current question has no answer yet")]
    MissingAnswer,
    #[error("already at the first question")]
    AtFirstQuestion,
    #[error("already at the last question")]
    AtLastQuestion,
    #[error("quiz has not been submitted yet")]
    NotCompleted,
    #[error("failed to load quiz questions: {0}")]
    Fetch(#[source] GatewayError),
    #[error("failed to submit quiz answers: {0}")]
    Submission(#[source] GatewayError),
}
