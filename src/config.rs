//! The ordered configuration store.
//!
//! [`Config`] keeps sections, and the options inside each section, in
//! first-insertion order with constant-time lookup. Every section and option
//! name is passed through [`normalize`] before it is stored or looked up, so
//! callers may use either casing of the first letter.
//!
//! ## Ordering
//!
//! - Adding a section or option that already exists leaves its position alone;
//!   overwriting an option's value does not move it.
//! - Removing an entry and adding it again moves it to the end.
//!
//! ## Examples
//!
//! ```rust
//! use ingot::Config;
//!
//! let mut config = Config::new();
//! assert!(config.add_section("general"));
//! assert!(!config.add_section("General"));
//! assert!(config.add_option("general", "name", "ingot"));
//! assert!(!config.add_option("general", "name", "forge"));
//!
//! assert_eq!(config.get("general", "name"), Some("forge"));
//! let names: Vec<_> = config.section_names().collect();
//! assert_eq!(names, vec!["General"]);
//! ```

use crate::map::Section;
use crate::name::normalize;
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// An in-memory, order-preserving representation of a sectioned configuration.
///
/// The store has no internal locking; share it behind an external lock or hand
/// it to one owner at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    sections: IndexMap<String, Section>,
}

impl Config {
    /// Creates an empty configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ingot::Config;
    ///
    /// let config = Config::new();
    /// assert!(config.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Config {
            sections: IndexMap::new(),
        }
    }

    /// Adds an empty section.
    ///
    /// Returns `true` if the section was added and `false` if it already existed.
    pub fn add_section(&mut self, section: &str) -> bool {
        let section = normalize(section);
        if self.sections.contains_key(&section) {
            return false;
        }
        self.sections.insert(section, Section::new());
        true
    }

    /// Removes a section and all of its options.
    ///
    /// Returns `true` if the section was removed and `false` if it did not exist.
    pub fn remove_section(&mut self, section: &str) -> bool {
        self.sections.shift_remove(&normalize(section)).is_some()
    }

    /// Sets an option in a section, creating the section if needed.
    ///
    /// Returns `true` if the option is new and `false` if an existing value was
    /// overwritten.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ingot::Config;
    ///
    /// let mut config = Config::new();
    /// assert!(config.add_option("db", "user", "admin"));
    /// assert!(config.contains_section("Db"));
    /// assert!(!config.add_option("Db", "User", "root"));
    /// assert_eq!(config.get("db", "user"), Some("root"));
    /// ```
    pub fn add_option(&mut self, section: &str, option: &str, value: impl Into<String>) -> bool {
        self.sections
            .entry(normalize(section))
            .or_insert_with(Section::new)
            .insert(normalize(option), value.into())
    }

    /// Removes an option from a section.
    ///
    /// Both names are normalized. Returns `true` if the option was removed and
    /// `false` if the option, or its section, did not exist.
    pub fn remove_option(&mut self, section: &str, option: &str) -> bool {
        match self.sections.get_mut(&normalize(section)) {
            Some(options) => options.remove(&normalize(option)),
            None => false,
        }
    }

    /// Returns the section with the given name.
    #[must_use]
    pub fn section(&self, section: &str) -> Option<&Section> {
        self.sections.get(&normalize(section))
    }

    /// Returns the value of `option` in `section`.
    #[must_use]
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(option))
    }

    /// Returns `true` if the configuration holds `section`.
    #[must_use]
    pub fn contains_section(&self, section: &str) -> bool {
        self.sections.contains_key(&normalize(section))
    }

    /// Returns `true` if `section` exists and holds `option`.
    #[must_use]
    pub fn contains_option(&self, section: &str, option: &str) -> bool {
        self.section(section).is_some_and(|s| s.contains(option))
    }

    /// Returns an iterator over the normalized section names, in insertion order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.keys().map(String::as_str)
    }

    /// Returns an iterator over `(name, section)` pairs, in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> + '_ {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the configuration has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a String, &'a Section);
    type IntoIter = indexmap::map::Iter<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

impl Serialize for Config {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (name, section) in &self.sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (option, value) in self.iter() {
            map.serialize_entry(option, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ConfigVisitor;

        impl<'de> Visitor<'de> for ConfigVisitor {
            type Value = Config;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of sections to maps of options")
            }

            fn visit_map<M>(self, mut access: M) -> std::result::Result<Config, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut config = Config::new();
                while let Some((section, options)) =
                    access.next_entry::<String, OrderedOptions>()?
                {
                    config.add_section(&section);
                    for (option, value) in options.0 {
                        config.add_option(&section, &option, value);
                    }
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(ConfigVisitor)
    }
}

/// Options of one section as delivered by a deserializer, kept in arrival order.
struct OrderedOptions(Vec<(String, String)>);

impl<'de> Deserialize<'de> for OrderedOptions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OptionsVisitor;

        impl<'de> Visitor<'de> for OptionsVisitor {
            type Value = OrderedOptions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of option names to string values")
            }

            fn visit_map<M>(self, mut access: M) -> std::result::Result<OrderedOptions, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut options = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, String>()? {
                    options.push(entry);
                }
                Ok(OrderedOptions(options))
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}

impl From<BTreeMap<String, BTreeMap<String, String>>> for Config {
    fn from(map: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        let mut config = Config::new();
        for (section, options) in map {
            config.add_section(&section);
            for (option, value) in options {
                config.add_option(&section, &option, value);
            }
        }
        config
    }
}
