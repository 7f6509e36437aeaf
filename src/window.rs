use std::ops::Range;

/// Geometry of the scrolling page over the target stream.
///
/// The page is always the tail of the stream; replenishment keeps the active
/// word at or before the centre line so it never scrolls out of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub words_per_line: usize,
    pub lines_per_page: usize,
}

impl Window {
    pub fn new(words_per_line: usize, lines_per_page: usize) -> Self {
        Self {
            words_per_line,
            lines_per_page,
        }
    }

    pub fn page_len(&self) -> usize {
        self.words_per_line * self.lines_per_page
    }

    /// Words between the centre line and the end of the page.
    pub fn headroom(&self) -> usize {
        self.words_per_line * (self.lines_per_page / 2)
    }

    pub fn bounds(&self, stream_len: usize) -> Range<usize> {
        stream_len.saturating_sub(self.page_len())..stream_len
    }

    pub fn start(&self, stream_len: usize) -> usize {
        self.bounds(stream_len).start
    }

    pub fn contains(&self, index: usize, stream_len: usize) -> bool {
        self.bounds(stream_len).contains(&index)
    }

    /// True once the active word has reached the centre line of the page.
    pub fn needs_more(&self, active: usize, stream_len: usize) -> bool {
        active + self.headroom() >= stream_len
    }

    /// Splits the visible part of `stream` into rendered rows, paired with
    /// the stream index of each row's first word.
    pub fn lines<'a, T>(&self, stream: &'a [T]) -> Vec<(usize, &'a [T])> {
        let start = self.start(stream.len());
        stream[start..]
            .chunks(self.words_per_line.max(1))
            .enumerate()
            .map(|(row, words)| (start + row * self.words_per_line.max(1), words))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_len() {
        assert_eq!(Window::new(5, 3).page_len(), 15);
    }

    #[test]
    fn test_bounds_is_tail_of_stream() {
        let window = Window::new(5, 3);
        assert_eq!(window.bounds(20), 5..20);
        assert_eq!(window.bounds(15), 0..15);
    }

    #[test]
    fn test_bounds_clamped_for_short_stream() {
        let window = Window::new(5, 3);
        assert_eq!(window.bounds(4), 0..4);
        assert_eq!(window.bounds(0), 0..0);
    }

    #[test]
    fn test_contains() {
        let window = Window::new(2, 2);
        assert!(!window.contains(1, 6));
        assert!(window.contains(2, 6));
        assert!(window.contains(5, 6));
        assert!(!window.contains(6, 6));
    }

    #[test]
    fn test_needs_more_at_centre_line() {
        let window = Window::new(5, 3);
        // centre line starts five words before the end of a fifteen word stream
        assert!(!window.needs_more(9, 15));
        assert!(window.needs_more(10, 15));
    }

    #[test]
    fn test_single_line_triggers_at_end() {
        let window = Window::new(4, 1);
        assert_eq!(window.headroom(), 0);
        assert!(!window.needs_more(3, 4));
        assert!(window.needs_more(4, 4));
    }

    #[test]
    fn test_lines_chunks_visible_words() {
        let window = Window::new(2, 2);
        let stream = ["a", "b", "c", "d", "e", "f"];
        let lines = window.lines(&stream);
        assert_eq!(lines, vec![(2, &["c", "d"][..]), (4, &["e", "f"][..])]);
    }
}
