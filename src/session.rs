use std::{ops::Range, time::Duration};

use log::{debug, info};

use crate::{
    error::{Error, Result},
    stats::{CommittedWord, Metrics, Stats},
    window::Window,
    word_generator::{WordGenerator, WordSource},
};

/// How a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Endless stream, finished by a timeout notification
    Timed(Duration),
    /// Fixed number of words, finished by committing the last one
    Words(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub window: Window,
    pub mode: Mode,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window.words_per_line == 0 {
            return Err(Error::InvalidDimension {
                name: "words per line",
            });
        }
        if self.window.lines_per_page == 0 {
            return Err(Error::InvalidDimension {
                name: "lines per page",
            });
        }
        match self.mode {
            Mode::Timed(duration) if duration.as_secs() == 0 => Err(Error::InvalidDuration),
            Mode::Words(0) => Err(Error::InvalidWordCount),
            _ => Ok(()),
        }
    }

    fn initial_len(&self) -> usize {
        match self.mode {
            Mode::Timed(_) => self.window.page_len(),
            Mode::Words(count) => count.min(self.window.page_len()),
        }
    }
}

/// Inbound notifications, applied one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Char(char),
    Commit,
    Backspace,
    Tick(Duration),
    Timeout,
    Interrupt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Active,
    Done(Stats),
    /// Cancelled from outside; no results are produced.
    Interrupted,
}

/// How a single rendered character relates to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharState {
    Correct,
    Wrong,
    /// Typed past the end of the target word
    Overtyped,
    Unreached,
}

/// Mutable core of a typing test.
///
/// `prev_words[i]` is what was committed for `target_stream[i]`; the word
/// being typed always belongs to `target_stream[prev_words.len()]`.
#[derive(Debug, Clone)]
pub struct SessionState {
    config: SessionConfig,
    target_stream: Vec<String>,
    current_word: Vec<char>,
    prev_words: Vec<String>,
    metrics: Metrics,
    elapsed: Duration,
    started: bool,
    phase: Phase,
}

impl SessionState {
    pub fn new<S: WordSource>(config: SessionConfig, source: &mut S) -> Result<Self> {
        config.validate()?;
        let target_stream = source.next_words(config.initial_len())?;
        debug!("session starts with {} target words", target_stream.len());

        Ok(Self {
            config,
            target_stream,
            current_word: Vec::new(),
            prev_words: Vec::new(),
            metrics: Metrics::default(),
            elapsed: Duration::ZERO,
            started: false,
            phase: Phase::Active,
        })
    }

    /// Value-in, value-out form of [`SessionState::handle`].
    pub fn apply<S: WordSource>(mut self, event: Event, source: &mut S) -> Self {
        self.handle(event, source);
        self
    }

    pub fn handle<S: WordSource>(&mut self, event: Event, source: &mut S) {
        if self.phase != Phase::Active {
            return;
        }

        match event {
            Event::Char(c) => self.type_char(c),
            Event::Commit => self.commit(source),
            Event::Backspace => self.backspace(),
            Event::Tick(dt) => {
                if self.started {
                    self.elapsed += dt;
                }
            }
            Event::Timeout => self.finish(),
            Event::Interrupt => {
                info!("session interrupted");
                self.phase = Phase::Interrupted;
            }
        }
    }

    fn type_char(&mut self, c: char) {
        self.started = true;
        let expected = self
            .target_stream
            .get(self.active_index())
            .and_then(|target| target.chars().nth(self.current_word.len()));
        self.metrics.record(expected == Some(c));
        self.current_word.push(c);
    }

    fn commit<S: WordSource>(&mut self, source: &mut S) {
        if self.current_word.is_empty() {
            return;
        }

        let word: String = self.current_word.drain(..).collect();
        self.prev_words.push(word);

        if let Mode::Words(count) = self.config.mode {
            if self.prev_words.len() >= count {
                self.finish();
                return;
            }
        }

        self.replenish(source);
        self.check_invariants();
    }

    fn replenish<S: WordSource>(&mut self, source: &mut S) {
        let window = self.config.window;
        if !window.needs_more(self.active_index(), self.target_stream.len()) {
            return;
        }

        let wanted = match self.config.mode {
            Mode::Timed(_) => window.words_per_line,
            Mode::Words(count) => window
                .words_per_line
                .min(count.saturating_sub(self.target_stream.len())),
        };
        if wanted == 0 {
            return;
        }

        match source.next_words(wanted) {
            Ok(words) => {
                debug!(
                    "appending {} words at active index {}",
                    words.len(),
                    self.active_index()
                );
                self.target_stream.extend(words);
            }
            // bounds were validated when the session was built
            Err(err) => panic!("word source failed mid-session: {err}"),
        }
    }

    fn backspace(&mut self) {
        if self.current_word.pop().is_some() {
            return;
        }

        let Some(prev) = self.prev_words.last() else {
            return;
        };
        let index = self.prev_words.len() - 1;
        let correct = self.target_stream.get(index) == Some(prev);
        let visible = index >= self.config.window.start(self.target_stream.len());
        if correct || !visible {
            return;
        }

        if let Some(prev) = self.prev_words.pop() {
            self.current_word = prev.chars().collect();
        }
    }

    fn finish(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        let duration = match self.config.mode {
            Mode::Timed(duration) => duration,
            Mode::Words(_) => self.elapsed,
        };
        let stats = Stats::compute(&self.metrics, self.committed_words(), duration);
        info!("session finished: {stats}");
        self.phase = Phase::Done(stats);
    }

    /// Finalizes an active session; later calls return the same stats.
    pub fn finalize(&mut self) -> Option<Stats> {
        self.finish();
        self.stats().copied()
    }

    fn check_invariants(&self) {
        debug_assert!(self.prev_words.len() <= self.target_stream.len());
        if self.phase == Phase::Active {
            assert!(
                self.active_index() < self.target_stream.len(),
                "target stream ends at {} before active word {}",
                self.target_stream.len(),
                self.active_index()
            );
            debug_assert!(self
                .config
                .window
                .contains(self.active_index(), self.target_stream.len()));
        }
    }

    fn committed_words(&self) -> impl Iterator<Item = CommittedWord> + '_ {
        self.prev_words
            .iter()
            .zip(&self.target_stream)
            .map(|(typed, target)| CommittedWord {
                chars: typed.chars().count(),
                correct: typed == target,
            })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn target_stream(&self) -> &[String] {
        &self.target_stream
    }

    pub fn prev_words(&self) -> &[String] {
        &self.prev_words
    }

    pub fn current_word(&self) -> &[char] {
        &self.current_word
    }

    pub fn current_text(&self) -> String {
        self.current_word.iter().collect()
    }

    pub fn active_index(&self) -> usize {
        self.prev_words.len()
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.config.window.bounds(self.target_stream.len())
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done(_))
    }

    pub fn is_interrupted(&self) -> bool {
        self.phase == Phase::Interrupted
    }

    pub fn stats(&self) -> Option<&Stats> {
        match &self.phase {
            Phase::Done(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn remaining(&self) -> Option<Duration> {
        match self.config.mode {
            Mode::Timed(duration) => Some(duration.saturating_sub(self.elapsed)),
            Mode::Words(_) => None,
        }
    }

    /// Per-character judgement of the word at `index` for highlighting.
    pub fn word_chars(&self, index: usize) -> Vec<(char, CharState)> {
        let target: Vec<char> = self
            .target_stream
            .get(index)
            .map(|w| w.chars().collect())
            .unwrap_or_default();
        let typed: Vec<char> = match index.cmp(&self.active_index()) {
            std::cmp::Ordering::Less => self.prev_words[index].chars().collect(),
            std::cmp::Ordering::Equal => self.current_word.clone(),
            std::cmp::Ordering::Greater => Vec::new(),
        };

        let mut out: Vec<(char, CharState)> = target
            .iter()
            .enumerate()
            .map(|(i, &expected)| match typed.get(i) {
                Some(&c) if c == expected => (expected, CharState::Correct),
                Some(&c) => (c, CharState::Wrong),
                None => (expected, CharState::Unreached),
            })
            .collect();
        out.extend(
            typed
                .iter()
                .skip(target.len())
                .map(|&c| (c, CharState::Overtyped)),
        );
        out
    }
}

/// A session bundled with the generator that feeds it.
#[derive(Debug)]
pub struct Session<S: WordSource = WordGenerator> {
    state: SessionState,
    source: S,
}

impl<S: WordSource> Session<S> {
    pub fn new(config: SessionConfig, mut source: S) -> Result<Self> {
        let state = SessionState::new(config, &mut source)?;
        Ok(Self { state, source })
    }

    pub fn handle(&mut self, event: Event) {
        self.state.handle(event, &mut self.source);
    }

    pub fn finalize(&mut self) -> Option<Stats> {
        self.state.finalize()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
