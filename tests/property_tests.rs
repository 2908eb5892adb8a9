//! Property-based tests for the laws the store and codec promise
//!
//! - text in canonical form survives a read and a write byte for byte;
//! - sections and options keep first-insertion order;
//! - a record generated into a configuration populates back to itself.

use ingot::{record, Config, Policy};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Names in the written convention: lower-case first letter, no `=` or spaces.
fn name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,8}"
}

/// Values with no surrounding whitespace, which parsing would trim.
fn value() -> impl Strategy<Value = String> {
    "([a-zA-Z0-9_.,:/=-]([a-zA-Z0-9_.,:/= -]{0,14}[a-zA-Z0-9_.,:/=-])?)?"
}

fn canonical_text() -> impl Strategy<Value = String> {
    prop::collection::btree_map(
        name(),
        prop::collection::btree_map(name(), value(), 0..6),
        0..6,
    )
    .prop_map(|sections| {
        let mut text = String::new();
        for (section, options) in sections {
            text.push_str(&format!("[{section}]\n"));
            for (option, value) in options {
                text.push_str(&format!("{option}={value}\n"));
            }
        }
        text
    })
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Scalars {
        pub flag: bool,
        pub small: i8,
        pub count: i64,
        pub size: u32,
        pub big: u64,
        pub ratio: f64,
        pub label: String,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Document {
        pub first: Scalars,
        pub second: Scalars,
    }
}

prop_compose! {
    fn scalars()(
        flag in any::<bool>(),
        small in any::<i8>(),
        count in any::<i64>(),
        size in any::<u32>(),
        big in any::<u64>(),
        ratio in -1e300f64..1e300,
        label in value(),
    ) -> Scalars {
        Scalars { flag, small, count, size, big, ratio, label }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Limits {
    low: i32,
    high: u16,
    scale: f32,
    name: String,
}

proptest! {
    #[test]
    fn prop_canonical_text_round_trips(text in canonical_text()) {
        let config: Config = text.parse().unwrap();
        prop_assert_eq!(config.to_string(), text);
    }

    #[test]
    fn prop_reparse_is_stable(text in canonical_text()) {
        let config: Config = text.parse().unwrap();
        let again: Config = config.to_string().parse().unwrap();
        prop_assert_eq!(again.to_bytes(), config.to_bytes());
    }

    #[test]
    fn prop_first_insertion_order(
        ops in prop::collection::vec((0usize..5, 0usize..5), 0..40)
    ) {
        let mut config = Config::new();
        let mut sections: Vec<String> = Vec::new();
        let mut options: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (s, o) in ops {
            let section = format!("s{s}");
            let option = format!("o{o}");
            config.add_option(&section, &option, "v");

            if !sections.contains(&section) {
                sections.push(section.clone());
            }
            let seen = options.entry(section).or_default();
            if !seen.contains(&option) {
                seen.push(option);
            }
        }

        let expected: Vec<String> = sections.iter().map(|s| ingot::normalize(s)).collect();
        prop_assert_eq!(config.section_names().collect::<Vec<_>>(), expected);
        for section in &sections {
            let keys: Vec<&str> = config.section(section).unwrap().keys().collect();
            let expected: Vec<String> = options[section].iter().map(|o| ingot::normalize(o)).collect();
            prop_assert_eq!(keys, expected);
        }
    }

    #[test]
    fn prop_removal_keeps_relative_order(
        names in prop::collection::btree_set(name(), 1..10),
        victim in any::<prop::sample::Index>(),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut config = Config::new();
        for name in &names {
            config.add_section(name);
        }

        let removed = victim.get(&names).clone();
        prop_assert!(config.remove_section(&removed));

        let expected: Vec<String> = names
            .iter()
            .filter(|n| **n != removed)
            .map(|n| ingot::normalize(n))
            .collect();
        prop_assert_eq!(config.section_names().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn prop_record_binding_symmetry(first in scalars(), second in scalars()) {
        let document = Document { first, second };
        let text = Config::from_record(&document).unwrap().to_string();

        let config: Config = text.parse().unwrap();
        let mut back = Document::default();
        config.populate(&mut back, Policy::Strict).unwrap();
        prop_assert_eq!(back, document);
    }

    #[test]
    fn prop_serde_round_trip(
        low in any::<i32>(),
        high in any::<u16>(),
        scale in -1e30f32..1e30,
        name in value(),
    ) {
        let mut doc = BTreeMap::new();
        doc.insert("limits".to_string(), Limits { low, high, scale, name });

        let text = ingot::to_string(&doc).unwrap();
        let back: BTreeMap<String, Limits> = ingot::from_str(&text).unwrap();
        prop_assert_eq!(back, doc);
    }
}
