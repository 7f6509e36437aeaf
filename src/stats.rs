use std::{fmt, time::Duration};

/// Raw keystroke counters, recorded the moment each character is typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub correct_chars: usize,
    pub incorrect_chars: usize,
}

impl Metrics {
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct_chars += 1;
        } else {
            self.incorrect_chars += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.correct_chars + self.incorrect_chars
    }
}

/// A committed word reduced to what the results need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommittedWord {
    pub chars: usize,
    pub correct: bool,
}

/// Final results of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub wpm: u32,
    /// `None` when nothing was typed
    pub accuracy: Option<u32>,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
    pub correct_words: usize,
    pub committed_words: usize,
    pub duration: Duration,
}

impl Stats {
    pub fn compute<I>(metrics: &Metrics, words: I, duration: Duration) -> Self
    where
        I: IntoIterator<Item = CommittedWord>,
    {
        let mut committed_words = 0;
        let mut correct_words = 0;
        let mut correct_word_chars = 0;
        for word in words {
            committed_words += 1;
            if word.correct {
                correct_words += 1;
                correct_word_chars += word.chars;
            }
        }

        Self {
            wpm: words_per_minute(correct_word_chars, duration),
            accuracy: accuracy(metrics),
            correct_chars: metrics.correct_chars,
            incorrect_chars: metrics.incorrect_chars,
            correct_words,
            committed_words,
            duration,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.accuracy {
            Some(acc) => write!(f, "{} wpm / {}% acc", self.wpm, acc),
            None => write!(f, "{} wpm / --% acc", self.wpm),
        }
    }
}

pub fn accuracy(metrics: &Metrics) -> Option<u32> {
    let total = metrics.total();
    if total == 0 {
        return None;
    }
    Some((100 * metrics.correct_chars / total) as u32)
}

/// Only characters of fully correct words count; five characters make a word.
pub fn words_per_minute(correct_word_chars: usize, duration: Duration) -> u32 {
    let secs = duration.as_secs_f64();
    if secs <= 0.0 {
        return 0;
    }
    ((correct_word_chars as f64 / 5.0) * (60.0 / secs)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(chars: usize, correct: bool) -> CommittedWord {
        CommittedWord { chars, correct }
    }

    #[test]
    fn test_metrics_record() {
        let mut metrics = Metrics::default();
        metrics.record(true);
        metrics.record(true);
        metrics.record(false);
        assert_eq!(metrics.correct_chars, 2);
        assert_eq!(metrics.incorrect_chars, 1);
        assert_eq!(metrics.total(), 3);
    }

    #[test]
    fn test_accuracy_truncates() {
        let metrics = Metrics {
            correct_chars: 300,
            incorrect_chars: 20,
        };
        assert_eq!(accuracy(&metrics), Some(93));
    }

    #[test]
    fn test_accuracy_without_keystrokes() {
        assert_eq!(accuracy(&Metrics::default()), None);
    }

    #[test]
    fn test_wpm_sixty_seconds() {
        assert_eq!(words_per_minute(300, Duration::from_secs(60)), 60);
    }

    #[test]
    fn test_wpm_fractional_minutes() {
        // 50 chars in 45s: 10 words / 0.75 min
        assert_eq!(words_per_minute(50, Duration::from_secs(45)), 13);
    }

    #[test]
    fn test_wpm_zero_duration() {
        assert_eq!(words_per_minute(100, Duration::ZERO), 0);
    }

    #[test]
    fn test_compute_counts_only_correct_words() {
        let metrics = Metrics {
            correct_chars: 300,
            incorrect_chars: 20,
        };
        let words = vec![word(150, true), word(150, true), word(40, false)];
        let stats = Stats::compute(&metrics, words, Duration::from_secs(60));

        assert_eq!(stats.wpm, 60);
        assert_eq!(stats.accuracy, Some(93));
        assert_eq!(stats.correct_words, 2);
        assert_eq!(stats.committed_words, 3);
    }

    #[test]
    fn test_compute_empty_session() {
        let stats = Stats::compute(&Metrics::default(), [], Duration::from_secs(30));
        assert_eq!(stats.wpm, 0);
        assert_eq!(stats.accuracy, None);
        assert_eq!(stats.to_string(), "0 wpm / --% acc");
    }

    #[test]
    fn test_display() {
        let metrics = Metrics {
            correct_chars: 9,
            incorrect_chars: 1,
        };
        let stats = Stats::compute(&metrics, [word(10, true)], Duration::from_secs(12));
        assert_eq!(stats.to_string(), "10 wpm / 90% acc");
    }
}
