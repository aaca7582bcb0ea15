use crate::error::ErrorMessage;
use crate::interactive::constants::{EXIT_PROMPT, PAGE_SIZE};
use crate::interactive::ui::commands::Command;
use crate::interactive::ui::events::Message;
use crate::pipeline::{Phase, PipelineEvent};

pub struct AppState {
    pub search: SearchState,
    pub error: Option<ErrorMessage>,
    pub ui: UiState,
}

pub struct SearchState {
    pub query: String,
    pub results: Vec<String>,
    pub selected_index: usize,
    pub phase: Phase,
}

pub struct UiState {
    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            search: SearchState {
                query: String::new(),
                results: Vec::new(),
                selected_index: 0,
                phase: Phase::Idle,
            },
            error: None,
            ui: UiState { message: None },
        }
    }

    pub fn selected_result(&self) -> Option<&String> {
        self.search.results.get(self.search.selected_index)
    }

    pub fn update(&mut self, msg: Message) -> Command {
        match msg {
            Message::QueryChanged(query) => {
                self.search.query = query.clone();
                Command::SetQuery(query)
            }
            Message::SelectResult(index) => {
                if index < self.search.results.len() {
                    self.search.selected_index = index;
                }
                Command::None
            }
            Message::ScrollUp => {
                self.search.selected_index = self.search.selected_index.saturating_sub(1);
                Command::None
            }
            Message::ScrollDown => {
                self.move_selection_down(1);
                Command::None
            }
            Message::PageUp => {
                self.search.selected_index = self.search.selected_index.saturating_sub(PAGE_SIZE);
                Command::None
            }
            Message::PageDown => {
                self.move_selection_down(PAGE_SIZE);
                Command::None
            }
            Message::DismissError => match self.error.take() {
                Some(error) => Command::DismissError(error.id),
                None => Command::None,
            },
            Message::Pipeline(event) => {
                self.apply_pipeline_event(event);
                Command::None
            }
            Message::SetStatus(status) => {
                self.ui.message = Some(status);
                Command::None
            }
            Message::ClearStatus => {
                self.ui.message = None;
                Command::None
            }
        }
    }

    fn apply_pipeline_event(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::ResultsChanged(results) => {
                self.search.results = results;
                self.search.selected_index = 0;
            }
            PipelineEvent::ErrorChanged(error) => {
                self.error = error;
            }
            PipelineEvent::PhaseChanged(phase) => {
                self.search.phase = phase;
                // The exit prompt outlives phase changes until the next key press
                if self.ui.message.as_deref() == Some(EXIT_PROMPT) {
                    return;
                }
                self.ui.message = match phase {
                    Phase::Idle => None,
                    Phase::Debouncing => Some("typing...".to_string()),
                    Phase::Fetching => Some("[searching...]".to_string()),
                };
            }
        }
    }

    fn move_selection_down(&mut self, step: usize) {
        let last = self.search.results.len().saturating_sub(1);
        self.search.selected_index = (self.search.selected_index + step).min(last);
    }
}
