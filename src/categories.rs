//! Category data source: word lists and question pairs by category key.
//!
//! Categories come from a small builtin set or a CSV file with the columns
//! `category,kind,text,imposter` (`kind` is `word` or `question`; `imposter`
//! is only read for questions).

use crate::models::QuestionPair;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Where round secrets come from. Missing categories resolve to None, never an error.
pub trait SecretSource {
    fn words(&self, category: &str) -> Option<&[String]>;
    fn questions(&self, category: &str) -> Option<&[QuestionPair]>;
}

/// Errors loading a category file.
#[derive(Debug)]
pub enum CategoryError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// A row whose `kind` is neither `word` nor `question`.
    UnknownKind(String),
}

impl std::fmt::Display for CategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryError::Io(e) => write!(f, "Could not read category file: {}", e),
            CategoryError::Csv(e) => write!(f, "Malformed category file: {}", e),
            CategoryError::UnknownKind(kind) => write!(f, "Unknown category row kind '{}'", kind),
        }
    }
}

impl std::error::Error for CategoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CategoryError::Io(e) => Some(e),
            CategoryError::Csv(e) => Some(e),
            CategoryError::UnknownKind(_) => None,
        }
    }
}

impl From<std::io::Error> for CategoryError {
    fn from(e: std::io::Error) -> Self {
        CategoryError::Io(e)
    }
}

impl From<csv::Error> for CategoryError {
    fn from(e: csv::Error) -> Self {
        CategoryError::Csv(e)
    }
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    category: String,
    kind: String,
    text: String,
    #[serde(default)]
    imposter: Option<String>,
}

/// In-memory category store. Keys are lowercased.
#[derive(Clone, Debug, Default)]
pub struct CategoryStore {
    words: BTreeMap<String, Vec<String>>,
    questions: BTreeMap<String, Vec<QuestionPair>>,
}

const BUILTIN_WORDS: &[(&str, &[&str])] = &[
    (
        "animals",
        &["giraffe", "penguin", "octopus", "kangaroo", "hedgehog", "flamingo", "tortoise", "owl"],
    ),
    (
        "food",
        &["pizza", "sushi", "pancake", "burrito", "lasagna", "croissant", "popcorn", "dumpling"],
    ),
    (
        "places",
        &["airport", "library", "beach", "hospital", "museum", "casino", "submarine", "circus"],
    ),
];

const BUILTIN_QUESTIONS: &[(&str, &[(&str, &str)])] = &[(
    "icebreakers",
    &[
        (
            "How many hours do you sleep per night?",
            "How many hours do you spend on your phone per day?",
        ),
        (
            "What is your favourite movie?",
            "What movie would you never watch again?",
        ),
        (
            "Where would you go on your dream holiday?",
            "Where did you go on your worst holiday?",
        ),
        (
            "How many cups of coffee do you drink a day?",
            "How many glasses of water do you drink a day?",
        ),
    ],
)];

fn normalize_key(category: &str) -> String {
    category.trim().to_lowercase()
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The categories shipped with the game.
    pub fn builtin() -> Self {
        let mut store = Self::new();
        for (category, words) in BUILTIN_WORDS {
            for word in *words {
                store.add_word(category, *word);
            }
        }
        for (category, pairs) in BUILTIN_QUESTIONS {
            for (real, imposter) in *pairs {
                store.add_question(category, *real, *imposter);
            }
        }
        store
    }

    /// Add a word. Empty words are ignored; returns whether it was added.
    pub fn add_word(&mut self, category: &str, word: impl Into<String>) -> bool {
        let word = word.into().trim().to_string();
        if word.is_empty() {
            return false;
        }
        self.words.entry(normalize_key(category)).or_default().push(word);
        true
    }

    /// Add a question pair. Invalid pairs (empty or identical prompts) are ignored.
    pub fn add_question(
        &mut self,
        category: &str,
        real: impl Into<String>,
        imposter: impl Into<String>,
    ) -> bool {
        match QuestionPair::new(real, imposter) {
            Some(pair) => {
                self.questions.entry(normalize_key(category)).or_default().push(pair);
                true
            }
            None => false,
        }
    }

    /// Load from CSV (with a header row). Invalid rows are skipped with a warning.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CategoryError> {
        let mut store = Self::new();
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        for (line, row) in rdr.deserialize::<CategoryRow>().enumerate() {
            let row = row?;
            let added = match row.kind.to_lowercase().as_str() {
                "word" => store.add_word(&row.category, row.text),
                "question" => store.add_question(
                    &row.category,
                    row.text,
                    row.imposter.unwrap_or_default(),
                ),
                other => return Err(CategoryError::UnknownKind(other.to_string())),
            };
            if !added {
                log::warn!("Skipping invalid category row {} in '{}'", line + 2, row.category);
            }
        }
        Ok(store)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, CategoryError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Word-mode category names, sorted.
    pub fn word_categories(&self) -> Vec<String> {
        self.words.keys().cloned().collect()
    }

    /// Question-mode category names, sorted.
    pub fn question_categories(&self) -> Vec<String> {
        self.questions.keys().cloned().collect()
    }
}

impl SecretSource for CategoryStore {
    fn words(&self, category: &str) -> Option<&[String]> {
        self.words.get(&normalize_key(category)).map(Vec::as_slice)
    }

    fn questions(&self, category: &str) -> Option<&[QuestionPair]> {
        self.questions.get(&normalize_key(category)).map(Vec::as_slice)
    }
}
