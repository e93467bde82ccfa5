use std::fmt;

use story_core::model::{
    AnswerRecord, AnswerValue, ChapterId, QuizQuestion, QuizResult, StoryId,
};

use super::progress::QuizProgress;
use super::scoring::check_answer;
use crate::error::QuizError;

/// In-memory run through one quiz.
///
/// Steps through the questions one at a time, buffering answers locally
/// until the whole quiz is submitted in one shot. The answer being edited
/// lives in a draft slot and is committed to the buffer on navigation, so
/// moving back and forth restores what the learner picked earlier. Once a
/// result is recorded the session is read-only until a retake resets it.
pub struct QuizSession {
    story_id: StoryId,
    chapter_id: Option<ChapterId>,
    questions: Vec<QuizQuestion>,
    position: usize,
    draft: Option<AnswerValue>,
    answers: Vec<Option<AnswerValue>>,
    result: Option<QuizResult>,
}

impl QuizSession {
    /// Creates a session over the given questions, positioned on the first.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` if `questions` is empty.
    pub fn new(
        story_id: StoryId,
        chapter_id: Option<ChapterId>,
        questions: Vec<QuizQuestion>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        let answers = vec![None; questions.len()];
        Ok(Self {
            story_id,
            chapter_id,
            questions,
            position: 0,
            draft: None,
            answers,
            result: None,
        })
    }

    #[must_use]
    pub fn story_id(&self) -> StoryId {
        self.story_id
    }

    #[must_use]
    pub fn chapter_id(&self) -> Option<ChapterId> {
        self.chapter_id
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The question on screen. The position never leaves the question list,
    /// so there is always one.
    #[must_use]
    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.position]
    }

    /// The answer currently drafted for the question on screen.
    #[must_use]
    pub fn current_answer(&self) -> Option<&AnswerValue> {
        self.draft.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.questions.len()
    }

    /// Total number of questions in this quiz.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Number of questions with an answer, counting the draft for the
    /// question on screen.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        let committed = self
            .answers
            .iter()
            .enumerate()
            .filter(|(index, answer)| *index != self.position && answer.is_some())
            .count();
        committed + usize::from(self.draft.is_some())
    }

    /// Number of questions still without an answer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total_questions().saturating_sub(self.answered_count())
    }

    /// Returns a summary of the current quiz progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.total_questions(),
            answered: self.answered_count(),
            remaining: self.remaining(),
            position: self.position,
            is_complete: self.is_complete(),
        }
    }

    /// Drafts an answer for the question on screen. A choice of zero and a
    /// flag of false are real answers; only blank text clears the draft.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadySubmitted` after submission.
    pub fn set_answer(&mut self, answer: impl Into<AnswerValue>) -> Result<(), QuizError> {
        if self.is_complete() {
            return Err(QuizError::AlreadySubmitted);
        }

        self.draft = match answer.into() {
            AnswerValue::Text(text) if text.trim().is_empty() => None,
            answer => Some(answer),
        };
        Ok(())
    }

    /// Commits the draft and moves to the next question, restoring any
    /// answer drafted for it earlier.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadySubmitted` after submission,
    /// `QuizError::MissingAnswer` when the question on screen has no draft,
    /// and `QuizError::AtLastQuestion` on the final question.
    pub fn advance(&mut self) -> Result<(), QuizError> {
        if self.is_complete() {
            return Err(QuizError::AlreadySubmitted);
        }
        if self.draft.is_none() {
            return Err(QuizError::MissingAnswer);
        }
        if self.is_last() {
            return Err(QuizError::AtLastQuestion);
        }

        self.commit_draft();
        self.position += 1;
        self.draft = self.answers[self.position].clone();
        Ok(())
    }

    /// Commits the draft and moves back one question. Going back does not
    /// require an answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadySubmitted` after submission and
    /// `QuizError::AtFirstQuestion` on the first question.
    pub fn retreat(&mut self) -> Result<(), QuizError> {
        if self.is_complete() {
            return Err(QuizError::AlreadySubmitted);
        }
        if self.is_first() {
            return Err(QuizError::AtFirstQuestion);
        }

        self.commit_draft();
        self.position -= 1;
        self.draft = self.answers[self.position].clone();
        Ok(())
    }

    pub(crate) fn commit_draft(&mut self) {
        self.answers[self.position] = self.draft.clone();
    }

    /// One submission row per question, unanswered ones with a null answer.
    pub(crate) fn build_records(&self) -> Vec<AnswerRecord> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(question, answer)| AnswerRecord {
                question_id: question.id,
                answer: answer.clone(),
                is_correct: check_answer(question, answer.as_ref()),
            })
            .collect()
    }

    pub(crate) fn complete(&mut self, result: QuizResult) {
        self.result = Some(result);
    }

    /// Replaces the question list and clears every run-specific field.
    pub(crate) fn reset_with(&mut self, questions: Vec<QuizQuestion>) {
        self.answers = vec![None; questions.len()];
        self.questions = questions;
        self.position = 0;
        self.draft = None;
        self.result = None;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("story_id", &self.story_id)
            .field("chapter_id", &self.chapter_id)
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("answered", &self.answered_count())
            .field("is_complete", &self.is_complete())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
