use crate::{
    corpus::{filter_words, Corpus},
    error::Result,
};
use log::debug;
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

/// Anything that can hand the session more target words.
pub trait WordSource {
    fn next_words(&mut self, n: usize) -> Result<Vec<String>>;
}

/// Draws bounded-length words from a corpus, uniformly and with replacement
#[derive(Debug)]
pub struct WordGenerator<R: Rng = SmallRng> {
    corpus: Corpus,
    min_length: usize,
    max_length: usize,
    // bumped whenever the corpus or bounds change
    revision: u64,
    working_set: Vec<String>,
    working_revision: Option<u64>,
    rng: R,
}

impl WordGenerator<SmallRng> {
    pub fn new(corpus: Corpus, min_length: usize, max_length: usize) -> Self {
        Self::with_rng(corpus, min_length, max_length, SmallRng::from_entropy())
    }
}

impl<R: Rng> WordGenerator<R> {
    pub fn with_rng(corpus: Corpus, min_length: usize, max_length: usize, rng: R) -> Self {
        Self {
            corpus,
            min_length,
            max_length,
            revision: 0,
            working_set: Vec::new(),
            working_revision: None,
            rng,
        }
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.min_length, self.max_length)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn set_bounds(&mut self, min_length: usize, max_length: usize) {
        if (min_length, max_length) != self.bounds() {
            self.min_length = min_length;
            self.max_length = max_length;
            self.revision += 1;
        }
    }

    pub fn set_corpus(&mut self, corpus: Corpus) {
        self.corpus = corpus;
        self.revision += 1;
    }

    /// Rebuilds the filtered word set if bounds or corpus changed since the last build.
    pub fn refresh(&mut self) -> Result<&[String]> {
        if self.working_revision != Some(self.revision) {
            self.working_set = filter_words(&self.corpus, self.min_length, self.max_length)?;
            self.working_revision = Some(self.revision);
            debug!(
                "rebuilt word set: {} words of length {}..={}",
                self.working_set.len(),
                self.min_length,
                self.max_length
            );
        }
        Ok(&self.working_set)
    }

    pub fn generate(&mut self, n: usize) -> Result<Vec<String>> {
        self.refresh()?;
        let words = &self.working_set;
        let rng = &mut self.rng;
        Ok((0..n)
            .filter_map(|_| words.choose(rng).cloned())
            .collect())
    }
}

impl<R: Rng> WordSource for WordGenerator<R> {
    fn next_words(&mut self, n: usize) -> Result<Vec<String>> {
        self.generate(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;

    fn seeded(corpus: Corpus, min: usize, max: usize) -> WordGenerator<StdRng> {
        WordGenerator::with_rng(corpus, min, max, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_generate_exact_count() {
        let mut generator = seeded(Corpus::new(["cat", "dog", "fish"]), 3, 4);
        let words = generator.generate(5).unwrap();
        assert_eq!(words.len(), 5);
        for word in &words {
            assert!(["cat", "dog", "fish"].contains(&word.as_str()));
        }
    }

    #[test]
    fn test_generate_zero_words() {
        let mut generator = seeded(Corpus::new(["cat"]), 1, 5);
        assert!(generator.generate(0).unwrap().is_empty());
    }

    #[test]
    fn test_generate_lowercases() {
        let mut generator = seeded(Corpus::new(["HELLO"]), 1, 5);
        assert_eq!(generator.generate(2).unwrap(), ["hello", "hello"]);
    }

    #[test]
    fn test_generate_empty_working_set_fails() {
        let mut generator = seeded(Corpus::new(["cat"]), 4, 6);
        assert_matches!(generator.generate(1), Err(Error::EmptyCorpus { .. }));
    }

    #[test]
    fn test_set_bounds_rebuilds_before_next_generate() {
        let mut generator = seeded(Corpus::new(["a", "abcdef"]), 1, 1);
        assert_eq!(generator.generate(3).unwrap(), ["a", "a", "a"]);

        generator.set_bounds(6, 6);
        assert_eq!(generator.bounds(), (6, 6));
        assert_eq!(generator.generate(2).unwrap(), ["abcdef", "abcdef"]);
    }

    #[test]
    fn test_set_corpus_does_not_touch_previous_words() {
        let mut generator = seeded(Corpus::new(["old"]), 1, 5);
        let before = generator.generate(3).unwrap();

        generator.set_corpus(Corpus::new(["new"]));
        let after = generator.generate(3).unwrap();

        assert_eq!(before, ["old", "old", "old"]);
        assert_eq!(after, ["new", "new", "new"]);
    }

    #[test]
    fn test_same_bounds_keep_working_set() {
        let mut generator = seeded(Corpus::new(["cat"]), 3, 3);
        generator.refresh().unwrap();
        let revision = generator.revision;
        generator.set_bounds(3, 3);
        assert_eq!(generator.revision, revision);
    }

    #[test]
    fn test_invalid_bounds_after_change() {
        let mut generator = seeded(Corpus::new(["cat"]), 3, 3);
        generator.set_bounds(5, 2);
        assert_matches!(generator.next_words(1), Err(Error::InvalidBounds { .. }));
    }
}
