//! LRU Tracker Module
//!
//! Recency ordering of live entries with O(1) promote, remove and evict.

use std::collections::HashMap;

use crate::cache::CacheEntry;

/// Null link in the node arena.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node {
    entry: CacheEntry,
    prev: usize,
    next: usize,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Entries live in an arena of nodes doubly linked by index, and a map
/// resolves keys to arena slots:
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
///
/// Slots freed by removal are recycled for later inserts.
#[derive(Debug)]
pub struct LruTracker {
    nodes: Vec<Node>,
    free: Vec<usize>,
    slots: HashMap<String, usize>,
    head: usize,
    tail: usize,
}

impl Default for LruTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            slots: HashMap::new(),
            head: NIL,
            tail: NIL,
        }
    }

    // == Promote ==
    /// Moves an existing key to the front and refreshes its timestamp.
    ///
    /// Returns false if the key is not tracked.
    pub fn promote(&mut self, key: &str) -> bool {
        match self.slots.get(key) {
            Some(&idx) => {
                self.detach(idx);
                self.attach_front(idx);
                self.nodes[idx].entry.touch();
                true
            }
            None => false,
        }
    }

    // == Promote Or Insert ==
    /// Marks a key as recently used, inserting it with `size` if new.
    ///
    /// Returns true if a new entry was created. The size of an existing
    /// entry is never changed.
    pub fn promote_or_insert(&mut self, key: &str, size: u64) -> bool {
        if self.promote(key) {
            return false;
        }

        let idx = self.allocate(CacheEntry::new(key.to_string(), size));
        self.attach_front(idx);
        self.slots.insert(key.to_string(), idx);
        true
    }

    // == Remove ==
    /// Removes a key from the tracker, returning its entry.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let idx = self.slots.remove(key)?;
        Some(self.release(idx))
    }

    // == Peek Oldest ==
    /// Returns the least recently used entry without removing it.
    pub fn peek_oldest(&self) -> Option<&CacheEntry> {
        (self.tail != NIL).then(|| &self.nodes[self.tail].entry)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used entry.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<CacheEntry> {
        if self.tail == NIL {
            return None;
        }
        let idx = self.tail;
        self.slots.remove(&self.nodes[idx].entry.key);
        Some(self.release(idx))
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Looks up the entry for a key without touching it.
    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.slots.get(key).map(|&idx| &self.nodes[idx].entry)
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.slots.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Sum of the sizes of all tracked entries.
    pub fn total_size(&self) -> u64 {
        self.iter().map(|entry| entry.size).sum()
    }

    // == Iteration ==
    /// Entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tracker: self,
            cursor: self.head,
        }
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|entry| entry.key.as_str())
    }

    fn allocate(&mut self, entry: CacheEntry) -> usize {
        let node = Node {
            entry,
            prev: NIL,
            next: NIL,
        };
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Unlinks a slot, returns it to the free list and hands back its entry.
    fn release(&mut self, idx: usize) -> CacheEntry {
        self.detach(idx);
        self.free.push(idx);
        std::mem::take(&mut self.nodes[idx].entry)
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);

        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }

        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }

    fn attach_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;
        if self.head == NIL {
            self.tail = idx;
        } else {
            self.nodes[self.head].prev = idx;
        }
        self.head = idx;
    }
}

// == Iterator ==
/// Front-to-back iterator over tracked entries.
pub struct Iter<'a> {
    tracker: &'a LruTracker,
    cursor: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CacheEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let node = &self.tracker.nodes[self.cursor];
        self.cursor = node.next;
        Some(&node.entry)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_with(keys: &[&str]) -> LruTracker {
        let mut lru = LruTracker::new();
        for key in keys {
            lru.promote_or_insert(key, 1);
        }
        lru
    }

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert!(lru.peek_oldest().is_none());
    }

    #[test]
    fn test_lru_insert_new_keys() {
        let lru = tracker_with(&["key1", "key2", "key3"]);

        assert_eq!(lru.len(), 3);
        // key1 is oldest (added first)
        assert_eq!(lru.peek_oldest().unwrap().key, "key1");
        assert_eq!(lru.keys().collect::<Vec<_>>(), vec!["key3", "key2", "key1"]);
    }

    #[test]
    fn test_lru_promote_existing_key() {
        let mut lru = tracker_with(&["key1", "key2", "key3"]);

        assert!(!lru.promote_or_insert("key1", 999));

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest().unwrap().key, "key2");
        // size is fixed at insertion
        assert_eq!(lru.get("key1").unwrap().size, 1);
    }

    #[test]
    fn test_lru_promote_missing_key() {
        let mut lru = tracker_with(&["key1"]);
        assert!(!lru.promote("nope"));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_promote_refreshes_timestamp() {
        let mut lru = tracker_with(&["key1"]);
        let before = lru.get("key1").unwrap().last_access;

        std::thread::sleep(std::time::Duration::from_millis(5));
        lru.promote("key1");

        assert!(lru.get("key1").unwrap().last_access > before);
    }

    #[test]
    fn test_lru_evict_oldest() {
        let mut lru = tracker_with(&["key1", "key2", "key3"]);

        assert_eq!(lru.evict_oldest().unwrap().key, "key1");
        assert_eq!(lru.len(), 2);
        assert!(!lru.contains("key1"));

        assert_eq!(lru.evict_oldest().unwrap().key, "key2");
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_evict_empty() {
        let mut lru = LruTracker::new();
        assert!(lru.evict_oldest().is_none());
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = tracker_with(&["key1", "key2", "key3"]);

        let removed = lru.remove("key2").unwrap();

        assert_eq!(removed.key, "key2");
        assert_eq!(lru.len(), 2);
        assert!(!lru.contains("key2"));
        assert_eq!(lru.keys().collect::<Vec<_>>(), vec!["key3", "key1"]);
    }

    #[test]
    fn test_lru_remove_nonexistent_key() {
        let mut lru = tracker_with(&["key1", "key2"]);

        assert!(lru.remove("nonexistent").is_none());
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn test_lru_remove_head_and_tail() {
        let mut lru = tracker_with(&["a", "b", "c"]);

        lru.remove("c");
        lru.remove("a");

        assert_eq!(lru.keys().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(lru.peek_oldest().unwrap().key, "b");

        lru.remove("b");
        assert!(lru.is_empty());
        assert!(lru.peek_oldest().is_none());
        assert_eq!(lru.keys().count(), 0);
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = tracker_with(&["a", "b", "c"]);

        // [c, b, a] -> touch a, c, b -> [b, c, a]
        lru.promote("a");
        lru.promote("c");
        lru.promote("b");

        assert_eq!(lru.evict_oldest().unwrap().key, "a");
        assert_eq!(lru.evict_oldest().unwrap().key, "c");
        assert_eq!(lru.evict_oldest().unwrap().key, "b");
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut lru = LruTracker::new();

        assert!(lru.promote_or_insert("key1", 1));
        assert!(!lru.promote_or_insert("key1", 1));
        assert!(!lru.promote_or_insert("key1", 1));

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest().unwrap().key, "key1");
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_slots_are_recycled() {
        let mut lru = tracker_with(&["a", "b"]);
        lru.remove("a");
        lru.promote_or_insert("c", 1);

        assert_eq!(lru.nodes.len(), 2);
        assert_eq!(lru.keys().collect::<Vec<_>>(), vec!["c", "b"]);
    }

    #[test]
    fn test_lru_total_size_and_clear() {
        let mut lru = LruTracker::new();
        lru.promote_or_insert("a", 10);
        lru.promote_or_insert("b", 20);
        assert_eq!(lru.total_size(), 30);

        lru.clear();

        assert!(lru.is_empty());
        assert_eq!(lru.total_size(), 0);
        assert!(lru.peek_oldest().is_none());
        assert!(lru.promote_or_insert("a", 5));
        assert_eq!(lru.total_size(), 5);
    }
}
