#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod time;

pub use error::Error;
pub use time::Clock;

pub use model::{
    AnswerRecord, AnswerValue, Chapter, ChapterId, DifficultyLevel, FilterError, ProgressStatus,
    QuestionId, QuestionKind, QuizId, QuizQuestion, QuizResult, Story, StoryFilter, StoryId,
    UserId, UserProgress,
};
