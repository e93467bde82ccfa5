#![forbid(unsafe_code)]

pub mod cache;
pub mod current_story;
pub mod error;
pub mod progress_service;
pub mod quiz;
pub mod story_service;

pub use story_core::Clock;

pub use cache::{CacheEntry, CacheStore, DEFAULT_TTL, listing_cache_key};
pub use current_story::CurrentStory;
pub use error::{ProgressServiceError, QuizError, StoryServiceError};
pub use progress_service::ProgressService;
pub use quiz::{QuizProgress, QuizSession, QuizWorkflow};
pub use story_service::StoryService;
