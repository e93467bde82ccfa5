use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{ChapterId, StoryId};

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Five-level difficulty scale for stories.
///
/// Ordering follows the learning progression, so `Beginner < Proficient`
/// holds and ranges like `..=Intermediate` behave as expected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Beginner,
    Elementary,
    Intermediate,
    Advanced,
    Proficient,
}

impl DifficultyLevel {
    /// Wire form used by the content API (`"BEGINNER"`, ...).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "BEGINNER",
            DifficultyLevel::Elementary => "ELEMENTARY",
            DifficultyLevel::Intermediate => "INTERMEDIATE",
            DifficultyLevel::Advanced => "ADVANCED",
            DifficultyLevel::Proficient => "PROFICIENT",
        }
    }

    /// Human-readable label (`"Beginner"`, ...).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "Beginner",
            DifficultyLevel::Elementary => "Elementary",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
            DifficultyLevel::Proficient => "Proficient",
        }
    }

    /// All levels in ascending order.
    #[must_use]
    pub fn all() -> [DifficultyLevel; 5] {
        [
            DifficultyLevel::Beginner,
            DifficultyLevel::Elementary,
            DifficultyLevel::Intermediate,
            DifficultyLevel::Advanced,
            DifficultyLevel::Proficient,
        ]
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a difficulty string does not name a known level.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty level: {0}")]
pub struct ParseDifficultyError(String);

impl FromStr for DifficultyLevel {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DifficultyLevel::all()
            .into_iter()
            .find(|level| trimmed.eq_ignore_ascii_case(level.as_str()))
            .ok_or_else(|| ParseDifficultyError(trimmed.to_owned()))
    }
}

//
// ─── STORY TYPES ───────────────────────────────────────────────────────────────
//

/// A reading-practice story as served by the content API.
///
/// Field names mirror the API's camelCase JSON. Optional fields are absent
/// rather than null when serialized back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    pub content: String,
    pub language: String,
    pub difficulty: DifficultyLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Estimated reading time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_count: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapters: Option<Vec<Chapter>>,
}

impl Story {
    /// Chapters in reading order, or an empty slice for single-part stories.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        self.chapters.as_deref().unwrap_or_default()
    }

    /// Whether the story carries narration audio.
    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.audio_url.is_some()
    }
}

/// One chapter of a multi-part story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ChapterId,
    pub title: String,
    pub chapter_number: u32,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Chapter audio length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub is_unlocked: bool,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
