use crate::interactive::constants::SEARCH_BAR_HEIGHT;
use crate::interactive::ui::app_state::AppState;
use crate::interactive::ui::components::{
    Component, error_dialog::ErrorDialog, result_list::ResultList, search_bar::SearchBar,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

pub struct Renderer {
    search_bar: SearchBar,
    result_list: ResultList,
    error_dialog: ErrorDialog,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            search_bar: SearchBar::new(),
            result_list: ResultList::new(),
            error_dialog: ErrorDialog::new(),
        }
    }

    pub fn render(&mut self, f: &mut Frame, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_BAR_HEIGHT), // Search bar
                Constraint::Min(0),                    // Results
            ])
            .split(f.area());

        self.search_bar.set_query(state.search.query.clone());
        self.search_bar.set_message(state.ui.message.clone());
        self.result_list
            .update_results(state.search.results.clone(), state.search.selected_index);
        self.error_dialog.set_error(state.error.clone());

        self.search_bar.render(f, chunks[0]);
        self.result_list.render(f, chunks[1]);

        // Overlay last so it covers the list
        if self.error_dialog.is_visible() {
            self.error_dialog.render(f, f.area());
        }
    }

    pub fn get_search_bar_mut(&mut self) -> &mut SearchBar {
        &mut self.search_bar
    }

    pub fn get_result_list_mut(&mut self) -> &mut ResultList {
        &mut self.result_list
    }

    pub fn get_error_dialog_mut(&mut self) -> &mut ErrorDialog {
        &mut self.error_dialog
    }
}
