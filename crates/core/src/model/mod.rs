mod filter;
mod ids;
mod progress;
mod quiz;
mod story;

pub use filter::{DEFAULT_PAGE_SIZE, FilterError, StoryFilter};
pub use ids::{ChapterId, ParseIdError, QuestionId, QuizId, StoryId, UserId};

pub use progress::{ProgressStatus, UserProgress};
pub use quiz::{AnswerRecord, AnswerValue, QuestionKind, QuizQuestion, QuizResult};
pub use story::{Chapter, DifficultyLevel, ParseDifficultyError, Story};
