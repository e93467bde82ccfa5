use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use story_core::Clock;
use story_core::model::{
    AnswerRecord, ChapterId, ProgressStatus, QuestionId, QuizId, QuizQuestion, QuizResult,
    Story, StoryFilter, StoryId, UserId, UserProgress,
};

use crate::content::ContentGateway;
use crate::error::GatewayError;

/// Fraction of the maximum score required to pass a quiz, in percent.
const PASS_THRESHOLD: f64 = 70.0;

/// In-memory content gateway for tests and prototyping.
///
/// Stories and questions are seeded through the `insert_*` methods; listing
/// and grading then behave like the real API. Quiz ids alias story ids, as
/// they do upstream.
#[derive(Clone, Default)]
pub struct InMemoryContentGateway {
    stories: Arc<Mutex<HashMap<StoryId, Story>>>,
    questions: Arc<Mutex<HashMap<(StoryId, Option<ChapterId>), Vec<QuizQuestion>>>>,
    progress: Arc<Mutex<HashMap<(UserId, StoryId), UserProgress>>>,
    clock: Clock,
}

impl InMemoryContentGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the clock used for progress timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Seeds or replaces one story.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Connection` if the store is poisoned.
    pub fn insert_story(&self, story: Story) -> Result<(), GatewayError> {
        let mut guard = self
            .stories
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        guard.insert(story.id, story);
        Ok(())
    }

    /// Seeds the question set for a story, optionally scoped to a chapter.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Connection` if the store is poisoned.
    pub fn insert_questions(
        &self,
        story_id: StoryId,
        chapter_id: Option<ChapterId>,
        questions: Vec<QuizQuestion>,
    ) -> Result<(), GatewayError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        guard.insert((story_id, chapter_id), questions);
        Ok(())
    }

    fn points_by_question(&self) -> Result<HashMap<QuestionId, u32>, GatewayError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        let mut points = HashMap::new();
        for question in guard.values().flatten() {
            if question.is_scorable() {
                points.insert(question.id, question.points);
            }
        }
        Ok(points)
    }
}

#[async_trait]
impl ContentGateway for InMemoryContentGateway {
    async fn list_stories(&self, filter: &StoryFilter) -> Result<Vec<Story>, GatewayError> {
        let guard = self
            .stories
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        // The listing endpoint has no tags parameter, so tags are ignored
        // here exactly as they are upstream.
        let mut matched: Vec<Story> = guard
            .values()
            .filter(|story| story.is_active)
            .filter(|story| {
                filter
                    .language()
                    .is_none_or(|language| story.language.eq_ignore_ascii_case(language))
            })
            .filter(|story| {
                filter
                    .difficulty()
                    .is_none_or(|difficulty| story.difficulty == difficulty)
            })
            .filter(|story| {
                filter.keyword().is_none_or(|keyword| {
                    let needle = keyword.to_ascii_lowercase();
                    story.title.to_ascii_lowercase().contains(&needle)
                        || story.content.to_ascii_lowercase().contains(&needle)
                })
            })
            .cloned()
            .collect();
        matched.sort_by_key(|story| story.id);

        let start = (filter.page() as usize).saturating_mul(filter.size() as usize);
        Ok(matched
            .into_iter()
            .skip(start)
            .take(filter.size() as usize)
            .collect())
    }

    async fn get_story(&self, id: StoryId) -> Result<Story, GatewayError> {
        let guard = self
            .stories
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        guard
            .get(&id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("story {id}")))
    }

    async fn popular_stories(&self, limit: u32) -> Result<Vec<Story>, GatewayError> {
        // Read counts are not modeled; active stories in id order stand in
        // for the popularity ranking.
        let guard = self
            .stories
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        let mut active: Vec<Story> = guard
            .values()
            .filter(|story| story.is_active)
            .cloned()
            .collect();
        active.sort_by_key(|story| story.id);
        active.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(active)
    }

    async fn quiz_questions(
        &self,
        story_id: StoryId,
        chapter_id: Option<ChapterId>,
    ) -> Result<Vec<QuizQuestion>, GatewayError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        Ok(guard.get(&(story_id, chapter_id)).cloned().unwrap_or_default())
    }

    async fn submit_quiz(
        &self,
        _user_id: UserId,
        _quiz_id: QuizId,
        answers: &[AnswerRecord],
    ) -> Result<QuizResult, GatewayError> {
        let points = self.points_by_question()?;

        let mut score = 0;
        let mut max_score = 0;
        for record in answers {
            let Some(&question_points) = points.get(&record.question_id) else {
                continue;
            };
            max_score += question_points;
            if record.is_correct {
                score += question_points;
            }
        }

        let percentage = if max_score == 0 {
            0.0
        } else {
            f64::from(score) / f64::from(max_score) * 100.0
        };
        let passed = percentage >= PASS_THRESHOLD;
        let message = if passed {
            "Congratulations! You passed!".to_owned()
        } else {
            "Keep studying!".to_owned()
        };

        Ok(QuizResult {
            score,
            max_score,
            percentage,
            passed,
            message,
            answers: answers.to_vec(),
        })
    }

    async fn user_progress(&self, user_id: UserId) -> Result<Vec<UserProgress>, GatewayError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        let mut records: Vec<UserProgress> = guard
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.story_id);
        Ok(records)
    }

    async fn story_progress(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<UserProgress, GatewayError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        guard
            .get(&(user_id, story_id))
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("progress for story {story_id}")))
    }

    async fn start_story(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<UserProgress, GatewayError> {
        {
            let stories = self
                .stories
                .lock()
                .map_err(|e| GatewayError::Connection(e.to_string()))?;
            if !stories.contains_key(&story_id) {
                return Err(GatewayError::NotFound(format!("story {story_id}")));
            }
        }

        let now = self.clock.now();
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        let record = guard
            .entry((user_id, story_id))
            .or_insert_with(|| UserProgress::started(user_id, story_id, now));
        record.last_accessed = now;
        Ok(record.clone())
    }

    async fn complete_chapter(
        &self,
        user_id: UserId,
        story_id: StoryId,
        chapter_number: u32,
    ) -> Result<UserProgress, GatewayError> {
        let chapter_count = {
            let stories = self
                .stories
                .lock()
                .map_err(|e| GatewayError::Connection(e.to_string()))?;
            let story = stories
                .get(&story_id)
                .ok_or_else(|| GatewayError::NotFound(format!("story {story_id}")))?;
            // single-part stories count as one chapter
            u32::try_from(story.chapters().len()).unwrap_or(u32::MAX).max(1)
        };

        let now = self.clock.now();
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        let record = guard
            .get_mut(&(user_id, story_id))
            .ok_or_else(|| GatewayError::NotFound(format!("progress for story {story_id}")))?;

        let finished = chapter_number >= chapter_count;
        record.completion_percentage =
            (chapter_number.min(chapter_count) * 100) / chapter_count;
        record.current_chapter = if finished {
            chapter_count
        } else {
            chapter_number + 1
        };
        record.is_completed = finished;
        record.status = if finished {
            ProgressStatus::Completed
        } else {
            ProgressStatus::InProgress
        };
        record.last_accessed = now;
        Ok(record.clone())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
