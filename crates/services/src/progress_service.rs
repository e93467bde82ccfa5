use std::sync::Arc;

use gateway::ContentGateway;
use story_core::model::{StoryId, UserId, UserProgress};

use crate::error::ProgressServiceError;

/// Reading-progress operations for one backend.
///
/// Progress rows are small and change on every interaction, so this service
/// deliberately does not cache; each call goes straight to the gateway.
#[derive(Clone)]
pub struct ProgressService {
    gateway: Arc<dyn ContentGateway>,
}

impl ProgressService {
    #[must_use]
    pub fn new(gateway: Arc<dyn ContentGateway>) -> Self {
        Self { gateway }
    }

    /// Every progress row for a user, most recently touched first.
    ///
    /// # Errors
    ///
    /// Propagates gateway errors.
    pub async fn user_progress(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UserProgress>, ProgressServiceError> {
        Ok(self.gateway.user_progress(user_id).await?)
    }

    /// A user's progress in one story.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` (wrapped) when the user has not
    /// started the story.
    pub async fn story_progress(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<UserProgress, ProgressServiceError> {
        Ok(self.gateway.story_progress(user_id, story_id).await?)
    }

    /// Marks a story as started, returning the new or existing row.
    /// Starting an already-started story is a no-op apart from the
    /// last-accessed timestamp.
    ///
    /// # Errors
    ///
    /// Propagates gateway errors.
    pub async fn start_story(
        &self,
        user_id: UserId,
        story_id: StoryId,
    ) -> Result<UserProgress, ProgressServiceError> {
        Ok(self.gateway.start_story(user_id, story_id).await?)
    }

    /// Records that the user finished reading a chapter, returning the
    /// updated row with its recomputed completion percentage.
    ///
    /// # Errors
    ///
    /// Propagates gateway errors.
    pub async fn complete_chapter(
        &self,
        user_id: UserId,
        story_id: StoryId,
        chapter_number: u32,
    ) -> Result<UserProgress, ProgressServiceError> {
        Ok(self
            .gateway
            .complete_chapter(user_id, story_id, chapter_number)
            .await?)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    use gateway::{GatewayError, InMemoryContentGateway};
    use story_core::model::{Chapter, ChapterId, DifficultyLevel, ProgressStatus, Story};
    use story_core::time::fixed_now;

    fn build_story(id: u64, chapter_count: u32) -> Story {
        let chapters = (1..=chapter_count)
            .map(|n| Chapter {
                id: ChapterId::new(id * 100 + u64::from(n)),
                title: format!("Chapter {n}"),
                chapter_number: n,
                content: "...".to_owned(),
                audio_url: None,
                duration: None,
                is_unlocked: n == 1,
            })
            .collect();
        Story {
            id: StoryId::new(id),
            title: format!("Story {id}"),
            content: "...".to_owned(),
            language: "en".to_owned(),
            difficulty: DifficultyLevel::Elementary,
            audio_url: None,
            estimated_duration: None,
            vocabulary_count: None,
            tags: Vec::new(),
            is_active: true,
            created_at: fixed_now(),
            updated_at: None,
            chapters: Some(chapters),
        }
    }

    fn build_service() -> (ProgressService, Arc<InMemoryContentGateway>) {
        let gateway = Arc::new(InMemoryContentGateway::new());
        gateway.insert_story(build_story(1, 4)).unwrap();
        (ProgressService::new(gateway.clone()), gateway)
    }

    #[tokio::test]
    async fn starting_a_story_creates_a_progress_row() {
        let (service, _) = build_service();
        let user = UserId::new(7);

        let progress = service.start_story(user, StoryId::new(1)).await.unwrap();
        assert_eq!(progress.status, ProgressStatus::InProgress);
        assert_eq!(progress.completion_percentage, 0);

        let fetched = service.story_progress(user, StoryId::new(1)).await.unwrap();
        assert_eq!(fetched.story_id, StoryId::new(1));
    }

    #[tokio::test]
    async fn chapter_completion_moves_the_percentage() {
        let (service, _) = build_service();
        let user = UserId::new(7);
        service.start_story(user, StoryId::new(1)).await.unwrap();

        let after_two = service
            .complete_chapter(user, StoryId::new(1), 2)
            .await
            .unwrap();
        assert_eq!(after_two.completion_percentage, 50);
        assert_eq!(after_two.status, ProgressStatus::InProgress);

        let done = service
            .complete_chapter(user, StoryId::new(1), 4)
            .await
            .unwrap();
        assert_eq!(done.completion_percentage, 100);
        assert_eq!(done.status, ProgressStatus::Completed);
        assert!(done.is_completed);
    }

    #[tokio::test]
    async fn unstarted_story_has_no_progress_row() {
        let (service, _) = build_service();

        let err = service
            .story_progress(UserId::new(7), StoryId::new(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProgressServiceError::Gateway(GatewayError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn user_progress_lists_every_started_story() {
        let (service, gateway) = build_service();
        gateway.insert_story(build_story(2, 1)).unwrap();
        let user = UserId::new(9);

        service.start_story(user, StoryId::new(1)).await.unwrap();
        service.start_story(user, StoryId::new(2)).await.unwrap();

        let rows = service.user_progress(user).await.unwrap();
        assert_eq!(rows.len(), 2);
    }
}
