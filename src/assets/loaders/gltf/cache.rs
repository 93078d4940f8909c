use rustc_hash::FxHashMap;

use crate::errors::Result;

/// Index-keyed construction memo for one resource category.
///
/// Keys are raw glTF array indices, never content: two indices with identical
/// payloads produce two resources. A cache lives for a single load call.
#[derive(Debug)]
pub struct ResourceCache<R> {
    label: &'static str,
    entries: FxHashMap<usize, R>,
}

impl<R: Clone> ResourceCache<R> {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: FxHashMap::default(),
        }
    }

    /// Returns the resource built for `index`, running `factory` on first use.
    ///
    /// A failing factory leaves the cache untouched.
    pub fn get_or_create<F>(&mut self, index: usize, factory: F) -> Result<R>
    where
        F: FnOnce() -> Result<R>,
    {
        if let Some(existing) = self.entries.get(&index) {
            log::debug!("{} cache hit for index {index}", self.label);
            return Ok(existing.clone());
        }
        let created = factory()?;
        self.entries.insert(index, created.clone());
        Ok(created)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&R> {
        self.entries.get(&index)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
