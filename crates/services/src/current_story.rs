use std::sync::Arc;

use tokio::sync::watch;

use story_core::model::Story;

/// Single-slot holder for the story currently being read.
///
/// Writes replace the slot (last write wins) and wake subscribers; a late
/// subscriber immediately observes the latest value instead of waiting for
/// the next write. Clones share the same slot.
#[derive(Clone)]
pub struct CurrentStory {
    slot: Arc<watch::Sender<Option<Story>>>,
}

impl Default for CurrentStory {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrentStory {
    #[must_use]
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
        }
    }

    /// Publishes `story` as the one being read.
    pub fn set(&self, story: Story) {
        self.slot.send_replace(Some(story));
    }

    /// Empties the slot, e.g. when the reader closes the story view.
    pub fn clear(&self) {
        self.slot.send_replace(None);
    }

    /// The story currently in the slot, if any.
    #[must_use]
    pub fn get(&self) -> Option<Story> {
        self.slot.borrow().clone()
    }

    /// A receiver that replays the latest value and observes future writes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Story>> {
        self.slot.subscribe()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
