//! Per-snapshot value maps.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of one snapshot in a comparison.
///
/// Ordered, compared and hashed by declaration index alone; the name is
/// carried for display.
#[derive(Debug, Clone, Serialize)]
pub struct ApiId {
    index: usize,
    name: Arc<str>,
}

impl ApiId {
    pub fn new(index: usize, name: impl Into<Arc<str>>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for ApiId {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for ApiId {}

impl PartialOrd for ApiId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl Hash for ApiId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl std::fmt::Display for ApiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Snapshot → value, iterated in snapshot declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiMap<V> {
    entries: BTreeMap<ApiId, V>,
}

impl<V> Default for ApiMap<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> ApiMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for this snapshot.
    pub fn insert(&mut self, id: ApiId, value: V) -> Option<V> {
        self.entries.insert(id, value)
    }

    pub fn get(&self, id: &ApiId) -> Option<&V> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &ApiId) -> Option<&mut V> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &ApiId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ApiId, V> {
        self.entries.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, ApiId, V> {
        self.entries.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, ApiId, V> {
        self.entries.values()
    }

    /// Entry for `id`, for building maps incrementally.
    pub fn entry(&mut self, id: ApiId) -> btree_map::Entry<'_, ApiId, V> {
        self.entries.entry(id)
    }

    /// Derive a map with the same snapshots.
    pub fn map<'a, U>(&'a self, mut f: impl FnMut(&'a V) -> U) -> ApiMap<U> {
        ApiMap {
            entries: self
                .entries
                .iter()
                .map(|(id, v)| (id.clone(), f(v)))
                .collect(),
        }
    }

    /// Fallible [`ApiMap::map`]; stops at the first error.
    pub fn try_map<'a, U, E>(&'a self, mut f: impl FnMut(&'a V) -> Result<U, E>) -> Result<ApiMap<U>, E> {
        let mut entries = BTreeMap::new();
        for (id, v) in &self.entries {
            entries.insert(id.clone(), f(v)?);
        }
        Ok(ApiMap { entries })
    }

    /// Project a value from every snapshot in `ids`, absent ones as `None`.
    pub fn project<'a, U>(
        &'a self,
        ids: impl IntoIterator<Item = &'a ApiId>,
        mut f: impl FnMut(&'a V) -> U,
    ) -> ApiMap<Option<U>> {
        ApiMap {
            entries: ids
                .into_iter()
                .map(|id| (id.clone(), self.entries.get(id).map(&mut f)))
                .collect(),
        }
    }
}

impl<V: PartialEq> ApiMap<V> {
    /// True when every snapshot holds an equal value. Vacuously true for
    /// zero or one snapshot.
    pub fn all_equal(&self) -> bool {
        let mut values = self.entries.values();
        match values.next() {
            None => true,
            Some(first) => values.all(|v| v == first),
        }
    }
}

impl<V> FromIterator<(ApiId, V)> for ApiMap<V> {
    fn from_iter<I: IntoIterator<Item = (ApiId, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, V> IntoIterator for &'a ApiMap<V> {
    type Item = (&'a ApiId, &'a V);
    type IntoIter = btree_map::Iter<'a, ApiId, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_follows_declaration_order() {
        let first = ApiId::new(0, "zeta");
        let second = ApiId::new(1, "alpha");

        let mut map = ApiMap::new();
        map.insert(second.clone(), "b");
        map.insert(first.clone(), "a");

        let names: Vec<&str> = map.keys().map(ApiId::name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_all_equal() {
        let mut map = ApiMap::new();
        assert!(map.all_equal());
        map.insert(ApiId::new(0, "a"), 1);
        assert!(map.all_equal());
        map.insert(ApiId::new(1, "b"), 1);
        assert!(map.all_equal());
        map.insert(ApiId::new(2, "c"), 2);
        assert!(!map.all_equal());
    }

    #[test]
    fn test_project_fills_absent_snapshots() {
        let a = ApiId::new(0, "a");
        let b = ApiId::new(1, "b");
        let mut map = ApiMap::new();
        map.insert(b.clone(), 5);

        let projected = map.project([&a, &b], |v| v * 2);
        assert_eq!(projected.get(&a), Some(&None));
        assert_eq!(projected.get(&b), Some(&Some(10)));
    }

    #[test]
    fn test_api_id_serializes_with_name() {
        let id = ApiId::new(2, "v3");
        let json = serde_json::to_value(&id).expect("serialize");
        assert_eq!(json, serde_json::json!({"index": 2, "name": "v3"}));
    }
}
