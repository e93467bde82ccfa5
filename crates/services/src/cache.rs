use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

use story_core::model::StoryFilter;

/// Default TTL for cached content: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

//
// ─── CACHE ENTRY ───────────────────────────────────────────────────────────────
//

/// A cached value and the instant it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub value: T,
    pub stored_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    #[must_use]
    pub fn new(value: T, stored_at: DateTime<Utc>) -> Self {
        Self { value, stored_at }
    }

    /// Fresh while strictly younger than `ttl`; an entry exactly `ttl` old
    /// is already stale.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now
            .signed_duration_since(self.stored_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        age < ttl
    }
}

//
// ─── CACHE STORE ───────────────────────────────────────────────────────────────
//

/// Keyed in-memory cache with timestamped entries.
///
/// The store never decides freshness on its own: reads either return the raw
/// entry or take the caller's `now` and TTL, so services stay deterministic
/// under a fixed clock. Clones share the same underlying map.
#[derive(Clone)]
pub struct CacheStore<K, V> {
    entries: Arc<Mutex<HashMap<K, CacheEntry<V>>>>,
}

impl<K, V> Default for CacheStore<K, V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored entry for `key` regardless of its age.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<CacheEntry<V>> {
        self.lock().get(key).cloned()
    }

    /// Returns the value for `key` if the entry is still fresh at `now`.
    #[must_use]
    pub fn get_if_fresh(&self, key: &K, now: DateTime<Utc>, ttl: Duration) -> Option<V> {
        self.lock()
            .get(key)
            .filter(|entry| entry.is_fresh(now, ttl))
            .map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key`, timestamped at `now`. Replaces any
    /// previous entry wholesale.
    pub fn put(&self, key: K, value: V, now: DateTime<Utc>) {
        self.lock().insert(key, CacheEntry::new(value, now));
    }

    /// Drops the entry for `key`, if any.
    pub fn invalidate(&self, key: &K) {
        self.lock().remove(key);
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, CacheEntry<V>>> {
        // entries are replaced wholesale, so the map is consistent even if a
        // writer panicked
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

//
// ─── LISTING KEYS ──────────────────────────────────────────────────────────────
//

/// Canonical cache key for a story listing query.
///
/// Five pipe-joined fields in fixed order: language, difficulty, keyword,
/// page, size, with `all`, `all` and the empty string standing in for absent
/// values. The default filter keys as `all|all||0|20`. Tags never reach the
/// listing query, so they are not part of the key.
#[must_use]
pub fn listing_cache_key(filter: &StoryFilter) -> String {
    let language = filter.language().unwrap_or("all");
    let difficulty = filter.difficulty().map_or("all", |level| level.as_str());
    let keyword = filter.keyword().unwrap_or("");
    format!(
        "{language}|{difficulty}|{keyword}|{page}|{size}",
        page = filter.page(),
        size = filter.size()
    )
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use story_core::model::DifficultyLevel;
    use story_core::time::fixed_now;

    #[test]
    fn entry_is_fresh_strictly_inside_ttl() {
        let stored = fixed_now();
        let entry = CacheEntry::new("value", stored);
        let ttl = Duration::from_secs(300);

        assert!(entry.is_fresh(stored, ttl));
        assert!(entry.is_fresh(stored + ChronoDuration::seconds(299), ttl));
        // an entry aged exactly to the TTL is stale
        assert!(!entry.is_fresh(stored + ChronoDuration::seconds(300), ttl));
        assert!(!entry.is_fresh(stored + ChronoDuration::seconds(301), ttl));
    }

    #[test]
    fn entry_from_the_future_is_stale() {
        let stored = fixed_now();
        let entry = CacheEntry::new("value", stored);
        assert!(!entry.is_fresh(stored - ChronoDuration::seconds(1), DEFAULT_TTL));
    }

    #[test]
    fn store_roundtrips_and_invalidates() {
        let store: CacheStore<String, u32> = CacheStore::new();
        let now = fixed_now();

        assert!(store.is_empty());
        store.put("a".to_owned(), 1, now);
        store.put("b".to_owned(), 2, now);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&"a".to_owned()).map(|e| e.value), Some(1));

        store.invalidate(&"a".to_owned());
        assert!(store.get(&"a".to_owned()).is_none());
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn put_replaces_entry_and_timestamp() {
        let store: CacheStore<String, u32> = CacheStore::new();
        let first = fixed_now();
        let second = first + ChronoDuration::minutes(10);

        store.put("k".to_owned(), 1, first);
        store.put("k".to_owned(), 2, second);

        let entry = store.get(&"k".to_owned()).unwrap();
        assert_eq!(entry.value, 2);
        assert_eq!(entry.stored_at, second);
    }

    #[test]
    fn get_if_fresh_honors_the_callers_clock() {
        let store: CacheStore<String, u32> = CacheStore::new();
        let stored = fixed_now();
        store.put("k".to_owned(), 7, stored);

        let within = stored + ChronoDuration::minutes(4);
        assert_eq!(store.get_if_fresh(&"k".to_owned(), within, DEFAULT_TTL), Some(7));

        let beyond = stored + ChronoDuration::minutes(5);
        assert_eq!(store.get_if_fresh(&"k".to_owned(), beyond, DEFAULT_TTL), None);
        // the stale entry itself is still there
        assert!(store.get(&"k".to_owned()).is_some());
    }

    #[test]
    fn clones_share_the_same_entries() {
        let store: CacheStore<String, u32> = CacheStore::new();
        let clone = store.clone();
        store.put("k".to_owned(), 9, fixed_now());
        assert_eq!(clone.get(&"k".to_owned()).map(|e| e.value), Some(9));
    }

    #[test]
    fn default_filter_keys_with_sentinels() {
        assert_eq!(listing_cache_key(&StoryFilter::new()), "all|all||0|20");
    }

    #[test]
    fn language_only_filter_keeps_the_other_sentinels() {
        let filter = StoryFilter::new().with_language("en").unwrap();
        assert_eq!(listing_cache_key(&filter), "en|all||0|20");
    }

    #[test]
    fn full_filter_keys_all_five_fields() {
        let filter = StoryFilter::new()
            .with_language("ES")
            .unwrap()
            .with_difficulty(DifficultyLevel::Intermediate)
            .with_keyword(" mercado ")
            .with_page(2)
            .with_size(50)
            .unwrap();
        assert_eq!(listing_cache_key(&filter), "es|INTERMEDIATE|mercado|2|50");
    }

    #[test]
    fn equal_queries_produce_equal_keys() {
        let a = StoryFilter::new().with_language("EN").unwrap().with_keyword("tea");
        let b = StoryFilter::new().with_language(" en ").unwrap().with_keyword(" tea ");
        assert_eq!(listing_cache_key(&a), listing_cache_key(&b));
    }

    #[test]
    fn tags_do_not_change_the_key() {
        let untagged = StoryFilter::new().with_language("en").unwrap();
        let tagged = StoryFilter::new()
            .with_language("en")
            .unwrap()
            .with_tags(vec!["travel".to_owned()]);
        assert_eq!(listing_cache_key(&untagged), listing_cache_key(&tagged));
    }
}
