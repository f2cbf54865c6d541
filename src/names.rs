//! Folder name generation.
//!
//! Names are [`WORD_COUNT`] dictionary words joined by [`SEPARATOR`], e.g.
//! `apple-river-stone-lamp`. Uniqueness is not guaranteed here; the
//! reservation loop in [`crate::provision`] claims names against the
//! external store.
use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

use rand::Rng as _;

use crate::assets::{self, AssetSource};
use crate::error::{PrivateFolderError, Result};

/// Number of words in a generated name.
pub const WORD_COUNT: usize = 4;

/// Separator placed between words.
pub const SEPARATOR: &str = "-";

/// A source of candidate folder names.
pub trait NameSource: fmt::Debug {
    /// Produce the next candidate.
    ///
    /// # Errors
    ///
    /// Returns an error if no candidate can be produced.
    fn candidate(&self) -> Result<String>;
}

/// Random names drawn uniformly from a dictionary.
#[derive(Debug, Clone)]
pub struct WordListNames {
    words: Vec<String>,
}

impl WordListNames {
    /// Build a generator from the bundled [`assets::WORDS`] dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateFolderError::WordListUnavailable`] if the dictionary
    /// is missing, not UTF-8, or empty.
    pub fn from_assets(source: &dyn AssetSource) -> Result<Self> {
        let bytes = source
            .read(assets::WORDS)
            .map_err(|e| PrivateFolderError::WordListUnavailable(e.to_string()))?;
        let text = std::str::from_utf8(&bytes)
            .map_err(|e| PrivateFolderError::WordListUnavailable(e.to_string()))?;
        Self::from_words(text.lines())
    }

    /// Build a generator from an explicit list. Blank lines and `#` comments
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateFolderError::WordListUnavailable`] if no words remain.
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let words: Vec<String> = words
            .into_iter()
            .map(str::trim)
            .filter(|w| !w.is_empty() && !w.starts_with('#'))
            .map(String::from)
            .collect();
        if words.is_empty() {
            return Err(PrivateFolderError::WordListUnavailable(
                "dictionary is empty".to_string(),
            ));
        }
        Ok(Self { words })
    }

    /// Number of words in the dictionary.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`; construction rejects empty dictionaries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl NameSource for WordListNames {
    fn candidate(&self) -> Result<String> {
        let mut rng = rand::thread_rng();
        let picked: Option<Vec<&str>> = (0..WORD_COUNT)
            .map(|_| {
                self.words
                    .get(rng.gen_range(0..self.words.len()))
                    .map(String::as_str)
            })
            .collect();
        picked
            .map(|words| words.join(SEPARATOR))
            .ok_or_else(|| PrivateFolderError::WordListUnavailable("dictionary is empty".into()))
    }
}

/// A predetermined sequence of names, returned in order.
///
/// Used to make collision handling deterministic. Fails with
/// [`PrivateFolderError::NameSourceExhausted`] once the sequence runs out.
#[derive(Debug, Default)]
pub struct ScriptedNames {
    names: Mutex<VecDeque<String>>,
}

impl ScriptedNames {
    /// Create a source that yields `names` in order.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Mutex::new(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of names not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.names.lock().map_or(0, |guard| guard.len())
    }
}

impl NameSource for ScriptedNames {
    fn candidate(&self) -> Result<String> {
        self.names
            .lock()
            .map_err(|_| PrivateFolderError::NameSourceExhausted)?
            .pop_front()
            .ok_or(PrivateFolderError::NameSourceExhausted)
    }
}
