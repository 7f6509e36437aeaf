use include_dir::{include_dir, Dir};
use log::debug;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{Error, Result};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

const DEFAULT_LANGUAGE: &str = "english.json";

/// On-disk word list layout shared with the embedded lists.
#[derive(Deserialize, Clone, Debug)]
struct WordList {
    #[allow(dead_code)]
    name: String,
    #[allow(dead_code)]
    size: u32,
    words: Vec<String>,
}

/// An ordered list of candidate words. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Corpus {
    words: Vec<String>,
}

impl Corpus {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// One word per line, blank lines ignored.
    pub fn from_lines(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let list: WordList = serde_json::from_str(text)?;
        Ok(Self::new(list.words))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        debug!("loaded word file {}", path.as_ref().display());
        if path.as_ref().extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&text)
        } else {
            Ok(Self::from_lines(&text))
        }
    }

    /// The English list compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::embedded_list(DEFAULT_LANGUAGE)
    }

    fn embedded_list(name: &'static str) -> Result<Self> {
        let text = LANG_DIR
            .get_file(name)
            .and_then(|file| file.contents_utf8())
            .ok_or(Error::MissingWordList(name))?;
        Self::from_json(text)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lowercases the corpus and keeps the words whose length in code points lies
/// in `[min, max]`. Length is measured after lowercasing since some letters
/// lowercase to more than one code point.
pub fn filter_words(corpus: &Corpus, min: usize, max: usize) -> Result<Vec<String>> {
    if min > max {
        return Err(Error::InvalidBounds { min, max });
    }

    let words: Vec<String> = corpus
        .words()
        .iter()
        .map(|word| word.to_lowercase())
        .filter(|word| (min..=max).contains(&word.chars().count()))
        .collect();

    if words.is_empty() {
        return Err(Error::EmptyCorpus { min, max });
    }

    Ok(words)
}
