//! A single-entry cache keyed by the request that produced it.
//!
//! Only the most recently requested key is current. A result arriving for any
//! other key is stale and is discarded instead of being stored.

/// Load state of the current key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<V> {
    /// Requested, no result yet (or the fetch failed).
    Pending,
    Loaded(V),
}

#[derive(Debug, Clone)]
pub struct KeyedLatest<K, V> {
    current: Option<(K, Entry<V>)>,
}

impl<K, V> Default for KeyedLatest<K, V> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<K: PartialEq, V> KeyedLatest<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `key` current. Returns `true` when a fetch for it must be issued,
    /// i.e. the key differs from the current one. Re-requesting the current
    /// key keeps whatever was already loaded.
    pub fn request(&mut self, key: K) -> bool {
        if self.current_key() == Some(&key) {
            return false;
        }
        self.current = Some((key, Entry::Pending));
        true
    }

    /// Drop the current key and its value.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Store a result for `key`. Returns `false` (and stores nothing) when
    /// `key` is not the current key.
    pub fn accept(&mut self, key: &K, value: V) -> bool {
        match &mut self.current {
            Some((current, entry)) if current == key => {
                *entry = Entry::Loaded(value);
                true
            }
            _ => false,
        }
    }

    /// Whether `key` is the current key.
    pub fn is_current(&self, key: &K) -> bool {
        self.current_key() == Some(key)
    }

    pub fn current_key(&self) -> Option<&K> {
        self.current.as_ref().map(|(k, _)| k)
    }

    /// The loaded value of the current key, if any.
    pub fn get(&self) -> Option<&V> {
        match &self.current {
            Some((_, Entry::Loaded(v))) => Some(v),
            _ => None,
        }
    }
}
