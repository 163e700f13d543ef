//! Sentiment lexicon definition and loading
//!
//! Entries are matched by substring containment on lowercased text, so an
//! entry can fire inside a longer word ("hope" inside "hopeful").

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::{Result, TextProcessingError};

/// The four disjoint lexicon categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LexiconCategory {
    VeryNegative,
    Negative,
    Positive,
    Negation,
}

impl fmt::Display for LexiconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexiconCategory::VeryNegative => "very_negative",
            LexiconCategory::Negative => "negative",
            LexiconCategory::Positive => "positive",
            LexiconCategory::Negation => "negation",
        };
        f.write_str(name)
    }
}

/// On-disk lexicon layout (TOML)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconFile {
    #[serde(default)]
    pub very_negative: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negation: Vec<String>,
}

/// Which categories a text hits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexiconSignals {
    pub has_very_negative: bool,
    pub has_negative: bool,
    pub has_positive: bool,
    pub has_negation: bool,
}

/// Categorized term lists, lowercased and deduplicated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    very_negative: Vec<String>,
    negative: Vec<String>,
    positive: Vec<String>,
    negation: Vec<String>,
}

impl Lexicon {
    /// Build a lexicon from raw term lists
    ///
    /// Terms are trimmed and lowercased; blank terms are dropped. A term may
    /// belong to only one category.
    pub fn new(file: LexiconFile) -> Result<Self> {
        let lexicon = Self {
            very_negative: normalize(file.very_negative),
            negative: normalize(file.negative),
            positive: normalize(file.positive),
            negation: normalize(file.negation),
        };

        let mut seen: HashSet<&str> = HashSet::new();
        for category in CATEGORIES {
            for term in lexicon.terms(category) {
                if !seen.insert(term.as_str()) {
                    return Err(TextProcessingError::LexiconError(format!(
                        "term {:?} appears in more than one category (last seen in {})",
                        term, category
                    )));
                }
            }
        }

        Ok(lexicon)
    }

    /// Parse a lexicon from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(content)?;
        Self::new(file)
    }

    /// Load a lexicon from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn terms(&self, category: LexiconCategory) -> &[String] {
        match category {
            LexiconCategory::VeryNegative => &self.very_negative,
            LexiconCategory::Negative => &self.negative,
            LexiconCategory::Positive => &self.positive,
            LexiconCategory::Negation => &self.negation,
        }
    }

    /// Whether `text_lower` contains any term of the category
    pub fn contains(&self, category: LexiconCategory, text_lower: &str) -> bool {
        self.terms(category)
            .iter()
            .any(|term| text_lower.contains(term.as_str()))
    }

    /// Terms of the category present in `text_lower`
    pub fn matches<'a>(
        &'a self,
        category: LexiconCategory,
        text_lower: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.terms(category)
            .iter()
            .map(String::as_str)
            .filter(move |term| text_lower.contains(term))
    }

    /// Category hits for a text (lowercased here)
    pub fn signals(&self, text: &str) -> LexiconSignals {
        let text_lower = text.to_lowercase();
        LexiconSignals {
            has_very_negative: self.contains(LexiconCategory::VeryNegative, &text_lower),
            has_negative: self.contains(LexiconCategory::Negative, &text_lower),
            has_positive: self.contains(LexiconCategory::Positive, &text_lower),
            has_negation: self.contains(LexiconCategory::Negation, &text_lower),
        }
    }

    pub fn to_file(&self) -> LexiconFile {
        LexiconFile {
            very_negative: self.very_negative.clone(),
            negative: self.negative.clone(),
            positive: self.positive.clone(),
            negation: self.negation.clone(),
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        default_lexicon()
    }
}

const CATEGORIES: [LexiconCategory; 4] = [
    LexiconCategory::VeryNegative,
    LexiconCategory::Negative,
    LexiconCategory::Positive,
    LexiconCategory::Negation,
];

fn normalize(terms: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    terms
        .into_iter()
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

/// Built-in lexicon for chat messages
pub fn default_lexicon() -> Lexicon {
    Lexicon {
        very_negative: normalize(owned(&[
            "hopeless",
            "terrible",
            "depressed",
            "suicidal",
            "can't handle",
            "worthless",
            "miserable",
            "devastated",
        ])),
        negative: normalize(owned(&[
            "sad",
            "disappointed",
            "disappoints",
            "scared",
            "afraid",
            "anxious",
            "not good",
            "bad",
            "upset",
            "hurt",
            "pain",
            "stressed",
            "awful",
        ])),
        positive: normalize(owned(&[
            "happy",
            "good",
            "great",
            "excited",
            "feeling better",
            "joy",
            "glad",
            "love",
            "good mood",
            "hope",
            "amazing",
            "brilliant",
            "confident",
            "successful",
            "kind",
            "strong",
            "vibrant",
            "excellent",
            "peaceful",
            "inspiring",
        ])),
        negation: normalize(owned(&[
            "no", "not", "never", "none", "nobody", "nothing", "nowhere", "neither", "nor",
            "don't", "isn't", "aren't", "can't", "won't", "haven't",
        ])),
    }
}
