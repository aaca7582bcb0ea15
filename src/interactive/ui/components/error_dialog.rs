use crate::error::ErrorMessage;
use crate::interactive::constants::{ERROR_DIALOG_HEIGHT, ERROR_DIALOG_MAX_WIDTH};
use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Modal popup for the pipeline's current error. Dismissing it never touches
/// the result list.
#[derive(Default)]
pub struct ErrorDialog {
    error: Option<ErrorMessage>,
}

impl ErrorDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error(&mut self, error: Option<ErrorMessage>) {
        self.error = error;
    }

    pub fn is_visible(&self) -> bool {
        self.error.is_some()
    }

    fn popup_area(area: Rect) -> Rect {
        let width = ERROR_DIALOG_MAX_WIDTH.min(area.width);
        let height = ERROR_DIALOG_HEIGHT.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }
}

impl Component for ErrorDialog {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let Some(error) = &self.error else {
            return;
        };

        let popup = Self::popup_area(area);
        let lines = vec![
            Line::from(error.text.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                "Enter/Esc to dismiss",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let dialog = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        " Error ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, popup);
        f.render_widget(dialog, popup);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        if !self.is_visible() {
            return None;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(Message::DismissError),
            _ => None,
        }
    }
}
