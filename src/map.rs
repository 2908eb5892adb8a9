//! Ordered option map for a single section.
//!
//! This module provides [`Section`], a wrapper around [`IndexMap`] that keeps
//! options in first-insertion order. The index map is at once the section's
//! option order and its value table, so the two can never disagree.
//!
//! Sections are only mutated through [`Config`](crate::Config), which normalizes
//! names before they reach the map. Lookups here normalize as well.
//!
//! ## Examples
//!
//! ```rust
//! use ingot::Config;
//!
//! let mut config = Config::new();
//! config.add_option("server", "host", "localhost");
//! config.add_option("server", "port", "8080");
//!
//! let section = config.section("server").unwrap();
//! assert_eq!(section.get("host"), Some("localhost"));
//! let keys: Vec<_> = section.keys().collect();
//! assert_eq!(keys, vec!["Host", "Port"]);
//! ```

use crate::name::normalize;
use indexmap::IndexMap;

/// The options of one section, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section(IndexMap<String, String>);

impl Section {
    #[must_use]
    pub(crate) fn new() -> Self {
        Section(IndexMap::new())
    }

    /// Sets `option` to `value`. Returns `true` when the option is new; an
    /// existing option keeps its position.
    pub(crate) fn insert(&mut self, option: String, value: String) -> bool {
        self.0.insert(option, value).is_none()
    }

    pub(crate) fn remove(&mut self, option: &str) -> bool {
        self.0.shift_remove(option).is_some()
    }

    /// Returns the value stored under `option`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ingot::Config;
    ///
    /// let config: Config = "[s]\nkey=value\n".parse().unwrap();
    /// let section = config.section("s").unwrap();
    /// assert_eq!(section.get("key"), Some("value"));
    /// assert_eq!(section.get("Key"), Some("value"));
    /// assert_eq!(section.get("missing"), None);
    /// ```
    #[must_use]
    pub fn get(&self, option: &str) -> Option<&str> {
        self.0.get(normalize(option).as_str()).map(String::as_str)
    }

    /// Returns `true` if the section holds `option`.
    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        self.0.contains_key(normalize(option).as_str())
    }

    /// Returns the number of options in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the section has no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the normalized option names, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// Returns an iterator over `(option, value)` pairs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
