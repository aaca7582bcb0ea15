#[cfg(test)]
mod tests {
    use super::super::Component;
    use super::super::error_dialog::*;
    use crate::error::ErrorMessage;
    use crate::interactive::ui::events::Message;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn create_key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn render_to_string(dialog: &mut ErrorDialog, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| dialog.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_hidden_without_error() {
        let mut dialog = ErrorDialog::new();

        assert!(!dialog.is_visible());
        assert!(dialog.handle_key(create_key_event(KeyCode::Enter)).is_none());

        let content = render_to_string(&mut dialog, 40, 10);
        assert!(!content.contains("Error"));
    }

    #[test]
    fn test_renders_error_text() {
        let mut dialog = ErrorDialog::new();
        dialog.set_error(Some(ErrorMessage::new("Server responded with HTTP 500")));

        let content = render_to_string(&mut dialog, 80, 20);
        assert!(content.contains("Error"));
        assert!(content.contains("Server responded with HTTP 500"));
        assert!(content.contains("Enter/Esc to dismiss"));
    }

    #[test]
    fn test_enter_and_esc_dismiss() {
        let mut dialog = ErrorDialog::new();
        dialog.set_error(Some(ErrorMessage::new("boom")));

        assert!(matches!(
            dialog.handle_key(create_key_event(KeyCode::Enter)),
            Some(Message::DismissError)
        ));
        assert!(matches!(
            dialog.handle_key(create_key_event(KeyCode::Esc)),
            Some(Message::DismissError)
        ));
        assert!(dialog.handle_key(create_key_event(KeyCode::Char('q'))).is_none());
    }

    #[test]
    fn test_renders_in_small_area() {
        let mut dialog = ErrorDialog::new();
        dialog.set_error(Some(ErrorMessage::new("Network error: connection refused")));

        // Smaller than the dialog's preferred size
        let content = render_to_string(&mut dialog, 20, 4);
        assert!(content.contains("Error"));
    }
}
