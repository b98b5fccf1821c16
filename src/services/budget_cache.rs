//! Per-user budget cache
//!
//! The list of events a user has picked for budgeting. It lives in the
//! key-value store under a key derived from the user id and is separate from
//! the enrollment ledger: removing an item here does not unenroll.

use tracing::{debug, warn};

use crate::error::EventsxResult;
use crate::models::{CachedBudgetItem, EventId, Money, UserId};
use crate::storage::KeyValueStore;

use super::budget;

/// Key used when no user is logged in
pub const LEGACY_CACHE_KEY: &str = "calculatorEvents";

/// Store key for a user's budget cache, or the shared fallback key
pub fn cache_key(user_id: Option<UserId>) -> String {
    match user_id {
        Some(id) => format!("{}_{}", LEGACY_CACHE_KEY, id.as_uuid()),
        None => LEGACY_CACHE_KEY.to_string(),
    }
}

/// Drop the shared fallback cache once a user is identified
///
/// Returns true if anything was removed. Does nothing without a user.
pub fn discard_legacy_cache(store: &dyn KeyValueStore, user_id: Option<UserId>) -> EventsxResult<bool> {
    if user_id.is_none() {
        return Ok(false);
    }

    if store.get(LEGACY_CACHE_KEY)?.is_some() {
        store.remove(LEGACY_CACHE_KEY)?;
        debug!("discarded shared budget cache");
        return Ok(true);
    }

    Ok(false)
}

/// A loaded budget cache
///
/// Changes are held in memory until [`BudgetCache::save`] is called.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetCache {
    key: String,
    items: Vec<CachedBudgetItem>,
}

impl BudgetCache {
    /// An empty cache for the given user
    pub fn empty(user_id: Option<UserId>) -> Self {
        Self {
            key: cache_key(user_id),
            items: Vec::new(),
        }
    }

    /// Load the cache for a user
    ///
    /// A missing or unparseable record loads as an empty cache.
    pub fn load(store: &dyn KeyValueStore, user_id: Option<UserId>) -> EventsxResult<Self> {
        let key = cache_key(user_id);

        let items = match store.get(&key)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "ignoring malformed budget cache");
                Vec::new()
            }),
            None => Vec::new(),
        };

        Ok(Self { key, items })
    }

    /// Persist the cache, overwriting whatever is stored under its key
    pub fn save(&self, store: &dyn KeyValueStore) -> EventsxResult<()> {
        let raw = serde_json::to_string(&self.items)?;
        store.set(&self.key, &raw)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn items(&self) -> &[CachedBudgetItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Add an item unless one with the same id is already cached
    ///
    /// Returns true if the item was added.
    pub fn insert(&mut self, item: CachedBudgetItem) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the item at a zero-based position
    pub fn remove_at(&mut self, index: usize) -> Option<CachedBudgetItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Remove every item, returning how many there were
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }

    /// Sum of cached ticket prices
    pub fn ticket_total(&self) -> Money {
        budget::ticket_total(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventCategory;
    use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
    use chrono::NaiveDate;

    fn item(title: &str, price: i64) -> CachedBudgetItem {
        CachedBudgetItem {
            id: EventId::new(),
            title: title.into(),
            price: Some(Money::from_units(price)),
            date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            category: EventCategory::Networking,
        }
    }

    #[test]
    fn test_cache_key() {
        let user = UserId::new();
        assert_eq!(cache_key(None), "calculatorEvents");
        assert_eq!(
            cache_key(Some(user)),
            format!("calculatorEvents_{}", user.as_uuid())
        );
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut cache = BudgetCache::empty(None);
        let networking = item("Networking Night", 15);

        assert!(cache.insert(networking.clone()));
        assert!(!cache.insert(networking.clone()));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(networking.id));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = MemoryKeyValueStore::new();
        let user = Some(UserId::new());

        let mut cache = BudgetCache::load(&store, user).unwrap();
        assert!(cache.is_empty());
        cache.insert(item("Web Design Sprint", 10));
        cache.insert(item("Career Prep Seminar", 0));
        cache.save(&store).unwrap();

        let reloaded = BudgetCache::load(&store, user).unwrap();
        assert_eq!(reloaded, cache);
        assert_eq!(reloaded.ticket_total(), Money::from_units(10));
    }

    #[test]
    fn test_malformed_data_loads_empty() {
        let store = MemoryKeyValueStore::new();
        store.set(LEGACY_CACHE_KEY, "{not json").unwrap();

        let cache = BudgetCache::load(&store, None).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_corrupt_store_file_loads_empty() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");
        std::fs::write(&path, "{\"calculatorEvents\": [1,").unwrap();
        let store = FileKeyValueStore::new(path);

        let mut cache = BudgetCache::load(&store, None).unwrap();
        assert!(cache.is_empty());

        cache.insert(item("Networking Night", 15));
        cache.save(&store).unwrap();
        assert_eq!(BudgetCache::load(&store, None).unwrap().len(), 1);
    }

    #[test]
    fn test_users_do_not_see_each_other() {
        let store = MemoryKeyValueStore::new();
        let alice = Some(UserId::new());
        let bob = Some(UserId::new());

        let mut cache = BudgetCache::load(&store, alice).unwrap();
        cache.insert(item("Networking Night", 15));
        cache.save(&store).unwrap();

        assert!(BudgetCache::load(&store, bob).unwrap().is_empty());
        assert_eq!(BudgetCache::load(&store, alice).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_at_and_clear() {
        let mut cache = BudgetCache::empty(None);
        cache.insert(item("A", 1));
        cache.insert(item("B", 2));
        cache.insert(item("C", 3));

        assert_eq!(cache.remove_at(1).unwrap().title, "B");
        assert!(cache.remove_at(5).is_none());
        assert_eq!(cache.ticket_total(), Money::from_units(4));

        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_discard_legacy_cache() {
        let store = MemoryKeyValueStore::new();
        store.set(LEGACY_CACHE_KEY, "[]").unwrap();

        assert!(!discard_legacy_cache(&store, None).unwrap());
        assert!(store.get(LEGACY_CACHE_KEY).unwrap().is_some());

        assert!(discard_legacy_cache(&store, Some(UserId::new())).unwrap());
        assert!(store.get(LEGACY_CACHE_KEY).unwrap().is_none());
        assert!(!discard_legacy_cache(&store, Some(UserId::new())).unwrap());
    }
}
