//! Bounded result cache keyed by query signature
use crate::processor::{ContextWindow, SearchMatch};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Cache key for a whole search. Root order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub pattern: String,
    pub roots: Vec<String>,
    pub context_after: usize,
    pub context_before: usize,
}

impl QueryKey {
    pub fn new<S: AsRef<str>>(pattern: &str, roots: &[S], window: ContextWindow) -> Self {
        Self {
            pattern: pattern.to_string(),
            roots: roots.iter().map(|r| r.as_ref().to_string()).collect(),
            context_after: window.after,
            context_before: window.before,
        }
    }
}

/// Insertion-ordered cache. When full, the oldest inserted entry is evicted,
/// regardless of how recently it was read.
///
/// Entries never expire, so a hit may be stale if files changed since it was stored.
#[derive(Debug)]
pub struct ResultCache {
    capacity: usize,
    entries: HashMap<QueryKey, Arc<[SearchMatch]>>,
    order: VecDeque<QueryKey>,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<Arc<[SearchMatch]>> {
        self.entries.get(key).cloned()
    }

    /// Stores `results` under `key`. Replacing an existing key keeps its original
    /// insertion position. A zero-capacity cache stores nothing.
    pub fn put(&mut self, key: QueryKey, results: Arc<[SearchMatch]>) {
        if self.capacity == 0 {
            return;
        }

        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = results;
            return;
        }

        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, results);
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn key(pattern: &str) -> QueryKey {
        QueryKey::new(pattern, &["notes"], ContextWindow::default())
    }

    fn results(line: usize) -> Arc<[SearchMatch]> {
        vec![SearchMatch {
            file_path: PathBuf::from("a.md"),
            line_number: line,
            line_content: "x".to_string(),
            context_before: vec![],
            context_after: vec![],
        }]
        .into()
    }

    #[test]
    fn evicts_oldest_inserted_first() {
        let mut cache = ResultCache::new(3);
        for p in ["a", "b", "c", "d"] {
            cache.put(key(p), results(1));
        }

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains(&key("a")));
        for p in ["b", "c", "d"] {
            assert!(cache.contains(&key(p)));
        }
    }

    #[test]
    fn reads_do_not_affect_eviction_order() {
        let mut cache = ResultCache::new(2);
        cache.put(key("a"), results(1));
        cache.put(key("b"), results(1));
        assert!(cache.get(&key("a")).is_some());

        cache.put(key("c"), results(1));
        assert!(!cache.contains(&key("a")));
        assert!(cache.contains(&key("b")));
    }

    #[test]
    fn replacing_a_key_keeps_its_position() {
        let mut cache = ResultCache::new(2);
        cache.put(key("a"), results(1));
        cache.put(key("b"), results(1));
        cache.put(key("a"), results(7));
        assert_eq!(cache.get(&key("a")).unwrap()[0].line_number, 7);

        cache.put(key("c"), results(1));
        assert!(!cache.contains(&key("a")));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = ResultCache::new(0);
        cache.put(key("a"), results(1));
        assert!(cache.is_empty());
    }

    #[test]
    fn root_order_is_part_of_the_key() {
        let w = ContextWindow::default();
        assert_ne!(
            QueryKey::new("x", &["notes", "sources"], w),
            QueryKey::new("x", &["sources", "notes"], w)
        );
    }

    #[test]
    fn context_is_part_of_the_key() {
        let mut cache = ResultCache::new(4);
        cache.put(key("a"), results(1));
        let wider = QueryKey::new("a", &["notes"], ContextWindow { after: 1, before: 0 });
        assert!(cache.get(&wider).is_none());
    }
}
