//! Colour and label lookup tables for the card bands.
//!
//! A [Theme] is plain configuration: built once (from defaults or a config
//! file) and handed to the layout planner by reference.

use crate::colour::{colours, Colour};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    /// Raw difficulty tag -> label printed on the card. Labels are upper-cased when drawn.
    pub difficulty_labels: BTreeMap<String, String>,
    /// Header colour keyed on the upper-cased display label
    pub difficulty_colours: BTreeMap<String, Colour>,
    /// Category name in another language -> the canonical name used for colour lookup
    pub category_aliases: BTreeMap<String, String>,
    /// Footer colour keyed on the canonical category name
    pub category_colours: BTreeMap<String, Colour>,
    /// Header colour for difficulties missing from `difficulty_colours`
    pub fallback_difficulty_colour: Colour,
    /// Footer colour for categories missing from `category_colours`
    pub fallback_category_colour: Colour,
}

impl Default for Theme {
    fn default() -> Self {
        let labels = [
            ("curious", "BITCOINER"),
            ("bitcoiner", "CYPHERPUNK"),
            ("satoshi", "SATOSHI"),
        ];
        let difficulty_colours = [
            ("BITCOINER", Colour::new_rgb(0.5, 0.8, 1.0)),
            ("CYPHERPUNK", Colour::new_rgb(1.0, 0.8, 0.3)),
            ("SATOSHI", Colour::new_rgb(1.0, 0.5, 0.5)),
        ];
        let aliases = [
            ("Bitcoin Geschichte und Adoption", "Bitcoin History and Adoption"),
            ("Technologie und Sicherheit", "Technology and Security"),
            ("Proof of Work und Mining", "Proof of Work and Mining"),
        ];
        let category_colours = [
            ("Bitcoin History and Adoption", Colour::new_rgb(0.2, 0.7, 0.4)),
            ("Technology and Security", Colour::new_rgb(0.3, 0.3, 0.9)),
            ("Proof of Work and Mining", Colour::new_rgb(0.9, 0.6, 0.2)),
        ];

        Theme {
            difficulty_labels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            difficulty_colours: difficulty_colours
                .iter()
                .map(|(k, c)| (k.to_string(), *c))
                .collect(),
            category_aliases: aliases
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            category_colours: category_colours
                .iter()
                .map(|(k, c)| (k.to_string(), *c))
                .collect(),
            fallback_difficulty_colour: colours::WHITE,
            fallback_category_colour: colours::GREY,
        }
    }
}

impl Theme {
    /// The label printed for a raw difficulty tag: its alias if one is
    /// configured, otherwise the tag itself, upper-cased either way
    pub fn difficulty_label(&self, difficulty: &str) -> String {
        let difficulty = difficulty.trim();
        self.difficulty_labels
            .get(difficulty)
            .or_else(|| self.difficulty_labels.get(&difficulty.to_lowercase()))
            .map(String::as_str)
            .unwrap_or(difficulty)
            .to_uppercase()
    }

    pub fn difficulty_colour(&self, difficulty: &str) -> Colour {
        self.difficulty_colours
            .get(&self.difficulty_label(difficulty))
            .copied()
            .unwrap_or(self.fallback_difficulty_colour)
    }

    /// The name a category is known by for colour lookup
    pub fn canonical_category<'a>(&'a self, category: &'a str) -> &'a str {
        self.category_aliases
            .get(category)
            .map(String::as_str)
            .unwrap_or(category)
    }

    pub fn category_colour(&self, category: &str) -> Colour {
        self.category_colours
            .get(self.canonical_category(category))
            .copied()
            .unwrap_or(self.fallback_category_colour)
    }
}
