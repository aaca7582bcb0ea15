use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

#[derive(Default)]
pub struct ResultList {
    results: Vec<String>,
    state: ListState,
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_results(&mut self, results: Vec<String>, selected_index: usize) {
        self.results = results;
        if self.results.is_empty() {
            self.state.select(None);
        } else {
            self.state
                .select(Some(selected_index.min(self.results.len() - 1)));
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }
}

impl Component for ResultList {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // List
                Constraint::Length(1), // Status
            ])
            .split(area);

        let block = Block::default()
            .title(format!("Results ({})", self.results.len()))
            .borders(Borders::ALL);

        if self.results.is_empty() {
            let empty = Paragraph::new("No results")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(empty, chunks[0]);
        } else {
            let items: Vec<ListItem> = self
                .results
                .iter()
                .map(|full_name| ListItem::new(Line::from(full_name.as_str())))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");
            f.render_stateful_widget(list, chunks[0], &mut self.state);
        }

        let status = Paragraph::new("↑/↓: Navigate | PgUp/PgDn: Page | Esc: Exit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Up => Some(Message::ScrollUp),
            KeyCode::Down => Some(Message::ScrollDown),
            KeyCode::Char('p') if key.modifiers == KeyModifiers::CONTROL => {
                Some(Message::ScrollUp)
            }
            KeyCode::Char('n') if key.modifiers == KeyModifiers::CONTROL => {
                Some(Message::ScrollDown)
            }
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            _ => None,
        }
    }
}
