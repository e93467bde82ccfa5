use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{StoryId, UserId};

/// Lifecycle of a reader's work on one story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
    Paused,
}

/// A reader's progress through one story, as tracked by the content API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub user_id: UserId,
    pub story_id: StoryId,
    /// Whole-number percentage, 0 to 100.
    pub completion_percentage: u32,
    pub current_chapter: u32,
    /// Accumulated reading time in minutes.
    pub time_spent: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_score: Option<u32>,
    #[serde(default)]
    pub vocabulary_learned: Vec<String>,
    pub is_completed: bool,
    pub status: ProgressStatus,
    pub last_accessed: DateTime<Utc>,
}

impl UserProgress {
    /// A fresh record for a story the reader just opened.
    #[must_use]
    pub fn started(user_id: UserId, story_id: StoryId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            story_id,
            completion_percentage: 0,
            current_chapter: 1,
            time_spent: 0,
            quiz_score: None,
            vocabulary_learned: Vec::new(),
            is_completed: false,
            status: ProgressStatus::InProgress,
            last_accessed: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_screaming_wire_form() {
        let json = serde_json::to_string(&ProgressStatus::InProgress).unwrap();
        assert_eq!(json, r#""IN_PROGRESS""#);

        let back: ProgressStatus = serde_json::from_str(r#""NOT_STARTED""#).unwrap();
        assert_eq!(back, ProgressStatus::NotStarted);
    }

    #[test]
    fn progress_decodes_from_api_json() {
        let json = r#"{
            "userId": 1,
            "storyId": 3,
            "completionPercentage": 40,
            "currentChapter": 2,
            "timeSpent": 12,
            "vocabularyLearned": ["mercado", "sábado"],
            "isCompleted": false,
            "status": "IN_PROGRESS",
            "lastAccessed": "2024-06-01T10:00:00Z"
        }"#;

        let progress: UserProgress = serde_json::from_str(json).unwrap();
        assert_eq!(progress.user_id, UserId::new(1));
        assert_eq!(progress.completion_percentage, 40);
        assert_eq!(progress.quiz_score, None);
        assert_eq!(progress.vocabulary_learned.len(), 2);
    }

    #[test]
    fn started_record_begins_at_chapter_one() {
        let now = crate::time::fixed_now();
        let progress = UserProgress::started(UserId::new(1), StoryId::new(9), now);
        assert_eq!(progress.current_chapter, 1);
        assert_eq!(progress.status, ProgressStatus::InProgress);
        assert!(!progress.is_completed);
        assert_eq!(progress.last_accessed, now);
    }
}
