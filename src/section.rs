use std::ops::Index;

use indexmap::IndexMap;
use indexmap::map::Entry as MapEntry;

use crate::value::Value;

/// A named, insertion-ordered group of key/value pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    entries: IndexMap<String, Entry>,
}

/// A stored value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub value: Value,
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Written by a `key = value` line inside this section.
    Direct,
    /// Copied from the named parent section.
    Inherited { from: String },
}

impl Section {
    #[must_use]
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            entries: IndexMap::with_capacity(32),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn origin(&self, key: &str) -> Option<&Origin> {
        self.entries.get(key).map(|entry| &entry.origin)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys and values in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.as_str(), &entry.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assign `key` directly, replacing whatever was there.
    ///
    /// Returns the previous entry. A replaced key keeps its original position.
    pub(crate) fn assign(&mut self, key: String, value: Value) -> Option<Entry> {
        self.entries.insert(
            key,
            Entry {
                value,
                origin: Origin::Direct,
            },
        )
    }

    /// Copy every key of `parent` that this section does not have yet.
    ///
    /// Returns the number of keys copied.
    pub(crate) fn inherit(&mut self, parent: &Section) -> usize {
        let mut copied = 0;

        for (key, entry) in &parent.entries {
            if let MapEntry::Vacant(slot) = self.entries.entry(key.clone()) {
                slot.insert(Entry {
                    value: entry.value.clone(),
                    origin: Origin::Inherited {
                        from: parent.name.clone(),
                    },
                });
                copied += 1;
            }
        }

        copied
    }
}

impl Index<&str> for Section {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `key` is not present in the section.
    fn index(&self, key: &str) -> &Value {
        self.get(key)
            .unwrap_or_else(|| panic!("no key {key:?} in section {:?}", self.name))
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a str, &'a Value);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Value)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
