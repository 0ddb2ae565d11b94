use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Conflicting insertion into a [`BiLookup`].
///
/// The table keeps the entry that was inserted first; the rejected pair is
/// reported so a broken wire table fails loudly instead of shadowing values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("duplicate key {key} (already mapped to {existing})")]
    DuplicateKey { key: String, existing: String },

    #[error("duplicate value {value} (already mapped from {existing})")]
    DuplicateValue { value: String, existing: String },
}

/// Exact two-way mapping between a closed set of keys and their wire values.
///
/// Misses never fail: [`BiLookup::get_by_key`] and [`BiLookup::get_by_second`]
/// return the `Default` of the target type, which callers treat as "no mapping".
#[derive(Clone)]
pub struct BiLookup<K, V> {
    forward: HashMap<K, V>,
    reverse: HashMap<V, K>,
}

impl<K, V> BiLookup<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Eq + Hash + Clone + fmt::Debug,
{
    /// An empty table.
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    /// Build a table from `(key, value)` pairs, rejecting any duplicate key or value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, LookupError> {
        let mut lookup = Self::new();
        for (key, value) in pairs {
            lookup.add(key, value)?;
        }
        Ok(lookup)
    }

    /// Insert a pair into both directions.
    ///
    /// Nothing is inserted (in either direction) when the key or the value is
    /// already present; existing entries are never overwritten.
    pub fn add(&mut self, key: K, value: V) -> Result<(), LookupError> {
        if let Some(existing) = self.forward.get(&key) {
            return Err(LookupError::DuplicateKey {
                key: format!("{key:?}"),
                existing: format!("{existing:?}"),
            });
        }
        if let Some(existing) = self.reverse.get(&value) {
            return Err(LookupError::DuplicateValue {
                value: format!("{value:?}"),
                existing: format!("{existing:?}"),
            });
        }
        self.forward.insert(key.clone(), value.clone());
        self.reverse.insert(value, key);
        Ok(())
    }

    /// Mapped value for `key`, or `V::default()` when unmapped.
    pub fn get_by_key(&self, key: &K) -> V
    where
        V: Default,
    {
        self.forward.get(key).cloned().unwrap_or_default()
    }

    /// Mapped key for `value`, or `K::default()` when unmapped.
    pub fn get_by_second<Q>(&self, value: &Q) -> K
    where
        K: Default,
        V: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.reverse.get(value).cloned().unwrap_or_default()
    }

    /// Mapped value for `key`, if any.
    pub fn find_by_key(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    /// Mapped key for `value`, if any.
    pub fn find_by_second<Q>(&self, value: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.reverse.get(value)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterate over `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.forward.iter()
    }
}

impl<K, V> Default for BiLookup<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Eq + Hash + Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BiLookup<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.forward.iter()).finish()
    }
}
