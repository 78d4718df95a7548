use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Last successful payload per query key.
///
/// Entries never expire and are never evicted.
/// Cloning returns a handle to the same map.
pub struct ResponseCache<V> {
    entries: Rc<RefCell<HashMap<String, V>>>,
}

impl<V> Clone for ResponseCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<V> Default for ResponseCache<V> {
    fn default() -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl<V> ResponseCache<V>
where
    V: Clone,
{
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the payload stored under `key`.
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.borrow().get(key).cloned()
    }

    /// Stores `value` under `key`, replacing any previous payload.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.entries.borrow_mut().insert(key.into(), value);
    }

    /// True if a payload is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<V> std::fmt::Debug for ResponseCache<V>
where
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.entries.borrow())
            .finish()
    }
}
