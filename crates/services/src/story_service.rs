use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use gateway::ContentGateway;
use story_core::Clock;
use story_core::model::{Story, StoryFilter, StoryId};

use crate::cache::{CacheStore, DEFAULT_TTL, listing_cache_key};
use crate::current_story::CurrentStory;
use crate::error::StoryServiceError;

/// Cached access to the story catalog.
///
/// Listings are cached per normalized query, single stories per id. A read
/// serves the cached value while it is younger than the TTL and otherwise
/// fetches through the gateway, replacing the entry only on success. All
/// freshness decisions go through the service clock, so tests pin a fixed
/// clock and advance it instead of sleeping.
///
/// Clones share the same caches and current-story slot.
#[derive(Clone)]
pub struct StoryService {
    gateway: Arc<dyn ContentGateway>,
    clock: Clock,
    ttl: Duration,
    listings: CacheStore<String, Vec<Story>>,
    stories: CacheStore<StoryId, Story>,
    current: CurrentStory,
}

impl StoryService {
    #[must_use]
    pub fn new(gateway: Arc<dyn ContentGateway>) -> Self {
        Self {
            gateway,
            clock: Clock::System,
            ttl: DEFAULT_TTL,
            listings: CacheStore::new(),
            stories: CacheStore::new(),
            current: CurrentStory::new(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Stories matching `filter`, from cache when fresh.
    ///
    /// # Errors
    ///
    /// Propagates `GatewayError` unchanged; the cache keeps whatever it had.
    pub async fn get_stories(
        &self,
        filter: &StoryFilter,
    ) -> Result<Vec<Story>, StoryServiceError> {
        let key = listing_cache_key(filter);
        if let Some(stories) = self.listings.get_if_fresh(&key, self.clock.now(), self.ttl) {
            return Ok(stories);
        }

        let stories = self.gateway.list_stories(filter).await?;
        self.listings.put(key, stories.clone(), self.clock.now());
        Ok(stories)
    }

    /// One story by id, from cache when fresh. The returned story is also
    /// published as the current story.
    ///
    /// # Errors
    ///
    /// Propagates `GatewayError` unchanged; the cache keeps whatever it had.
    pub async fn get_story(&self, id: StoryId) -> Result<Story, StoryServiceError> {
        if let Some(story) = self.stories.get_if_fresh(&id, self.clock.now(), self.ttl) {
            self.current.set(story.clone());
            return Ok(story);
        }

        let story = self.gateway.get_story(id).await?;
        self.stories.put(id, story.clone(), self.clock.now());
        self.current.set(story.clone());
        Ok(story)
    }

    /// Fetches `filter`'s listing from the gateway regardless of cache
    /// state, replacing the cached entry on success.
    ///
    /// # Errors
    ///
    /// Propagates `GatewayError` unchanged; on failure the previously cached
    /// listing stays in place.
    pub async fn refresh(&self, filter: &StoryFilter) -> Result<Vec<Story>, StoryServiceError> {
        let stories = self.gateway.list_stories(filter).await?;
        self.listings
            .put(listing_cache_key(filter), stories.clone(), self.clock.now());
        Ok(stories)
    }

    /// Fetches one story from the gateway regardless of cache state,
    /// replacing the cached entry and republishing the current story on
    /// success.
    ///
    /// # Errors
    ///
    /// Propagates `GatewayError` unchanged; on failure the previously cached
    /// story stays in place.
    pub async fn refresh_story(&self, id: StoryId) -> Result<Story, StoryServiceError> {
        let story = self.gateway.get_story(id).await?;
        self.stories.put(id, story.clone(), self.clock.now());
        self.current.set(story.clone());
        Ok(story)
    }

    /// Empties both cache namespaces. The next read of any key fetches.
    pub fn clear_cache(&self) {
        self.listings.clear();
        self.stories.clear();
    }

    /// Stories in one language, through the cached listing path.
    ///
    /// # Errors
    ///
    /// Returns `StoryServiceError::Filter` for a blank language, otherwise
    /// propagates gateway errors.
    pub async fn stories_by_language(
        &self,
        language: impl Into<String>,
    ) -> Result<Vec<Story>, StoryServiceError> {
        let filter = StoryFilter::new().with_language(language)?;
        self.get_stories(&filter).await
    }

    /// Keyword search, through the cached listing path.
    ///
    /// # Errors
    ///
    /// Propagates gateway errors.
    pub async fn search(
        &self,
        keyword: impl Into<String>,
    ) -> Result<Vec<Story>, StoryServiceError> {
        let filter = StoryFilter::new().with_keyword(keyword);
        self.get_stories(&filter).await
    }

    /// The most-read stories, fetched live on every call. Popularity has no
    /// place in the query-keyed cache.
    ///
    /// # Errors
    ///
    /// Propagates gateway errors.
    pub async fn popular_stories(&self, limit: u32) -> Result<Vec<Story>, StoryServiceError> {
        Ok(self.gateway.popular_stories(limit).await?)
    }

    /// Publishes `story` as the one being read.
    pub fn set_current_story(&self, story: Story) {
        self.current.set(story);
    }

    /// The story currently being read, if any.
    #[must_use]
    pub fn current_story(&self) -> Option<Story> {
        self.current.get()
    }

    /// Empties the current-story slot.
    pub fn clear_current_story(&self) {
        self.current.clear();
    }

    /// Observes current-story changes; the receiver replays the latest
    /// value immediately.
    #[must_use]
    pub fn subscribe_current_story(&self) -> watch::Receiver<Option<Story>> {
        self.current.subscribe()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
