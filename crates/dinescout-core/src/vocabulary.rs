//! Cuisine vocabulary used to turn image-classifier output into search tags.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Concepts at or below this confidence are discarded.
pub const CONFIDENCE_THRESHOLD: f64 = 0.85;

/// Recognised cuisine, dish and beverage terms, all lower-case.
pub const CUISINE_TERMS: [&str; 102] = [
    // International cuisines
    "pizza", "sushi", "burger", "pasta", "chinese", "indian", "mexican", "italian", "thai",
    "japanese", "korean", "vietnamese", "greek", "french", "spanish", "mediterranean", "american",
    "british", "turkish", "lebanese", "brazilian", "argentinian", "german", "caribbean", "persian",
    "russian", "african",
    // Meat
    "steak", "barbecue", "bbq", "ribs", "brisket", "meat", "lamb", "mutton", "beef", "pork",
    "chicken", "duck", "kebab", "shawarma", "biryani", "tandoori", "roast", "grilled",
    "fried chicken", "teriyaki",
    // Seafood
    "fish", "lobster", "shrimp", "crab", "oyster", "salmon", "tuna", "calamari", "seafood",
    "grilled fish",
    // Street food
    "hot dog", "tacos", "burrito", "quesadilla", "nachos", "dim sum", "dumplings", "bao",
    "noodles", "ramen",
    // Vegetarian and vegan
    "vegetarian", "vegan", "salad", "tofu", "paneer", "falafel", "hummus", "lentil", "legumes",
    "plant-based",
    // Desserts and bakery
    "cake", "ice cream", "pastry", "donut", "waffle", "brownie", "cookies", "chocolate", "pudding",
    "cheesecake", "mousse", "macaron", "gelato", "custard", "tart",
    // Beverages
    "coffee", "tea", "smoothie", "milkshake", "juice", "cocktail", "mocktail", "wine", "beer",
    "whiskey",
];

static CUISINE_TERM_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CUISINE_TERMS.into_iter().collect());

/// A label returned by an image classifier with its confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConcept {
    pub name: String,
    pub value: f64,
}

impl ClassifierConcept {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// `term` must already be lower-case.
#[must_use]
pub fn is_cuisine_term(term: &str) -> bool {
    CUISINE_TERM_SET.contains(term)
}

/// Reduces classifier concepts to search tags.
///
/// Keeps concepts above [`CONFIDENCE_THRESHOLD`] whose lower-cased name is a
/// cuisine term, in the order the classifier returned them. Duplicates are
/// kept.
#[must_use]
pub fn extract_search_tags(concepts: &[ClassifierConcept]) -> Vec<String> {
    concepts
        .iter()
        .filter(|concept| concept.value > CONFIDENCE_THRESHOLD)
        .map(|concept| concept.name.to_lowercase())
        .filter(|name| is_cuisine_term(name))
        .collect()
}
