use crate::interactive::ui::components::{Component, is_exit_prompt};
use crate::interactive::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

#[derive(Default)]
pub struct SearchBar {
    query: String,
    cursor_position: usize,
    message: Option<String>,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: String) {
        if query != self.query {
            self.cursor_position = query.chars().count();
            self.query = query;
        }
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    pub fn get_query(&self) -> &str {
        &self.query
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    /// Find the previous word boundary from the given position
    fn find_prev_word_boundary(&self, from: usize) -> usize {
        let chars: Vec<char> = self.query.chars().collect();
        let mut pos = from;

        while pos > 0 && chars.get(pos - 1).is_some_and(|c| c.is_whitespace()) {
            pos -= 1;
        }
        while pos > 0 && chars.get(pos - 1).is_some_and(|c| !c.is_whitespace()) {
            pos -= 1;
        }

        pos
    }

    /// Find the next word boundary from the given position
    fn find_next_word_boundary(&self, from: usize) -> usize {
        let chars: Vec<char> = self.query.chars().collect();
        let mut pos = from;
        let len = chars.len();

        while pos < len && chars.get(pos).is_some_and(|c| !c.is_whitespace()) {
            pos += 1;
        }
        while pos < len && chars.get(pos).is_some_and(|c| c.is_whitespace()) {
            pos += 1;
        }

        pos
    }

    /// Delete chars `start..end`, returning whether the query changed
    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end || end > self.query.chars().count() {
            return false;
        }

        let byte_start = self.byte_offset(start);
        let byte_end = self.byte_offset(end);
        self.query.drain(byte_start..byte_end);
        self.cursor_position = start;
        true
    }

    fn changed(&self) -> Option<Message> {
        Some(Message::QueryChanged(self.query.clone()))
    }
}

impl Component for SearchBar {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
        let input_text = if self.cursor_position < self.query.chars().count() {
            let split = self.byte_offset(self.cursor_position);
            let (before, rest) = self.query.split_at(split);
            let mut rest_chars = rest.chars();
            let under_cursor = rest_chars.next().unwrap_or(' ').to_string();

            vec![
                Span::raw(before.to_string()),
                Span::styled(under_cursor, cursor_style),
                Span::raw(rest_chars.as_str().to_string()),
            ]
        } else {
            vec![
                Span::raw(self.query.clone()),
                Span::styled(" ", cursor_style),
            ]
        };

        let mut title = "Search repositories".to_string();
        if let Some(msg) = &self.message {
            title.push_str(&format!(" - {msg}"));
        }
        let title_style = if is_exit_prompt(&self.message) {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };

        let input = Paragraph::new(Line::from(input_text))
            .block(
                Block::default()
                    .title(Span::styled(title, title_style))
                    .borders(Borders::ALL),
            )
            .style(Style::default().fg(Color::Yellow));

        f.render_widget(input, area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                // Ctrl+A - beginning of line
                KeyCode::Char('a') => {
                    self.cursor_position = 0;
                    None
                }
                // Ctrl+E - end of line
                KeyCode::Char('e') => {
                    self.cursor_position = self.query.chars().count();
                    None
                }
                // Ctrl+B - back one character
                KeyCode::Char('b') => {
                    self.cursor_position = self.cursor_position.saturating_sub(1);
                    None
                }
                // Ctrl+F - forward one character
                KeyCode::Char('f') => {
                    if self.cursor_position < self.query.chars().count() {
                        self.cursor_position += 1;
                    }
                    None
                }
                // Ctrl+H - same as backspace
                KeyCode::Char('h') => {
                    let pos = self.cursor_position;
                    if pos > 0 && self.delete_range(pos - 1, pos) {
                        return self.changed();
                    }
                    None
                }
                // Ctrl+D - delete character under cursor
                KeyCode::Char('d') => {
                    let pos = self.cursor_position;
                    if self.delete_range(pos, pos + 1) {
                        return self.changed();
                    }
                    None
                }
                // Ctrl+W - delete word before cursor
                KeyCode::Char('w') => {
                    let start = self.find_prev_word_boundary(self.cursor_position);
                    if self.delete_range(start, self.cursor_position) {
                        return self.changed();
                    }
                    None
                }
                // Ctrl+U - delete to beginning of line
                KeyCode::Char('u') => {
                    if self.delete_range(0, self.cursor_position) {
                        return self.changed();
                    }
                    None
                }
                // Ctrl+K - delete to end of line
                KeyCode::Char('k') => {
                    let len = self.query.chars().count();
                    if self.delete_range(self.cursor_position, len) {
                        return self.changed();
                    }
                    None
                }
                _ => None,
            };
        }

        if key.modifiers.contains(KeyModifiers::ALT) {
            return match key.code {
                // Alt+B - back one word
                KeyCode::Char('b') => {
                    self.cursor_position = self.find_prev_word_boundary(self.cursor_position);
                    None
                }
                // Alt+F - forward one word
                KeyCode::Char('f') => {
                    self.cursor_position = self.find_next_word_boundary(self.cursor_position);
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let byte_pos = self.byte_offset(self.cursor_position);
                self.query.insert(byte_pos, c);
                self.cursor_position += 1;
                self.changed()
            }
            KeyCode::Backspace => {
                let pos = self.cursor_position;
                if pos > 0 && self.delete_range(pos - 1, pos) {
                    return self.changed();
                }
                None
            }
            KeyCode::Delete => {
                let pos = self.cursor_position;
                if self.delete_range(pos, pos + 1) {
                    return self.changed();
                }
                None
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.cursor_position < self.query.chars().count() {
                    self.cursor_position += 1;
                }
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.query.chars().count();
                None
            }
            _ => None,
        }
    }
}
