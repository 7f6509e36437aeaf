use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::session::{CharState, SessionState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

fn char_style(state: CharState) -> Style {
    match state {
        CharState::Correct => Style::default().fg(Color::White),
        CharState::Wrong => Style::default().fg(Color::Red),
        CharState::Overtyped => Style::default().fg(Color::Rgb(0xba, 0x22, 0x22)),
        CharState::Unreached => Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
    }
}

fn cursor_style() -> Style {
    Style::default()
        .fg(Color::Rgb(0xf5, 0xe6, 0x14))
        .add_modifier(Modifier::UNDERLINED)
}

/// Renders a session: the visible page while typing, results once done.
pub struct SessionView<'a> {
    pub state: &'a SessionState,
}

impl<'a> SessionView<'a> {
    pub fn new(state: &'a SessionState) -> Self {
        Self { state }
    }

    /// One styled row per visible line of the page.
    pub fn page_lines(&self) -> Vec<Line<'static>> {
        let state = self.state;
        let window = state.config().window;
        let active = state.active_index();

        window
            .lines(state.target_stream())
            .into_iter()
            .map(|(first, words)| {
                let mut spans = Vec::new();
                for index in first..first + words.len() {
                    if index > first {
                        spans.push(Span::raw(" "));
                    }
                    let chars = state.word_chars(index);
                    let cursor = (index == active).then(|| state.current_word().len());
                    for (offset, (c, judged)) in chars.iter().enumerate() {
                        let style = if cursor == Some(offset) {
                            cursor_style()
                        } else {
                            char_style(*judged)
                        };
                        spans.push(Span::styled(c.to_string(), style));
                    }
                    if cursor == Some(chars.len()) {
                        spans.push(Span::styled(" ", cursor_style()));
                    }
                }
                Line::from(spans)
            })
            .collect()
    }

    fn render_typing(&self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let lines = self.page_lines();
        let page_height = state.config().window.lines_per_page as u16;
        let widest = state
            .config()
            .window
            .lines(state.target_stream())
            .iter()
            .map(|(_, words)| words.iter().join(" ").width())
            .max()
            .unwrap_or_default();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(area.height.saturating_sub(page_height + 2) / 2),
                Constraint::Length(2),
                Constraint::Length(page_height),
                Constraint::Min(0),
            ])
            .split(area);

        if let Some(remaining) = state.remaining() {
            let timer = Paragraph::new(Span::styled(
                format!("{:.1}", remaining.as_secs_f64()),
                Style::default().add_modifier(Modifier::BOLD | Modifier::DIM),
            ))
            .alignment(Alignment::Center);
            timer.render(chunks[1], buf);
        }

        // left-aligned rows in a centred column keep the cursor from jumping
        let pad = chunks[2].width.saturating_sub(widest as u16) / 2;
        let column = Rect {
            x: chunks[2].x + pad,
            width: chunks[2].width - pad,
            ..chunks[2]
        };
        Paragraph::new(lines).render(column, buf);
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer) {
        let Some(stats) = self.state.stats() else {
            return;
        };
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let accuracy = stats
            .accuracy
            .map_or_else(|| "--".to_string(), |acc| acc.to_string());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format!("{} wpm   {}% acc", stats.wpm, accuracy),
            bold,
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        Paragraph::new(format!(
            "{} correct / {} incorrect keystrokes",
            stats.correct_chars, stats.incorrect_chars
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

        Paragraph::new(format!(
            "{} of {} words correct in {:.0}s",
            stats.correct_words,
            stats.committed_words,
            stats.duration.as_secs_f64()
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        Paragraph::new(Span::styled(
            "(r)etry / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[5], buf);
    }
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.state.is_done() {
            self.render_results(area, buf);
        } else {
            self.render_typing(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Result,
        session::{Event, Mode, SessionConfig},
        window::Window,
        word_generator::WordSource,
    };
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    struct Fixed(&'static str);

    impl WordSource for Fixed {
        fn next_words(&mut self, n: usize) -> Result<Vec<String>> {
            Ok(vec![self.0.to_string(); n])
        }
    }

    fn session() -> (SessionState, Fixed) {
        let mut source = Fixed("cat");
        let config = SessionConfig {
            window: Window::new(2, 2),
            mode: Mode::Timed(Duration::from_secs(30)),
        };
        (SessionState::new(config, &mut source).unwrap(), source)
    }

    fn screen_text(state: &SessionState) -> String {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(SessionView::new(state), f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn page_lines_match_window() {
        let (state, _) = session();
        let lines = SessionView::new(&state).page_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "cat cat");
    }

    #[test]
    fn overtyped_chars_extend_the_line() {
        let (mut state, mut source) = session();
        for c in "cats".chars() {
            state.handle(Event::Char(c), &mut source);
        }
        let lines = SessionView::new(&state).page_lines();
        assert_eq!(lines[0].to_string(), "cats  cat");
    }

    #[test]
    fn cursor_marks_next_char() {
        let (mut state, mut source) = session();
        state.handle(Event::Char('c'), &mut source);
        let lines = SessionView::new(&state).page_lines();
        assert_eq!(lines[0].spans[1].style, cursor_style());
    }

    #[test]
    fn typing_screen_shows_timer_and_words() {
        let (state, _) = session();
        let text = screen_text(&state);
        assert!(text.contains("30.0"));
        assert!(text.contains("cat cat"));
    }

    #[test]
    fn results_screen_shows_stats() {
        let (mut state, mut source) = session();
        state.handle(Event::Timeout, &mut source);
        let text = screen_text(&state);
        assert!(text.contains("0 wpm"));
        assert!(text.contains("--% acc"));
    }
}
