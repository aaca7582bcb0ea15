use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, poll},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::pipeline::{PipelineController, PipelineEvent};

pub mod constants;
pub mod ui;


use self::constants::{DOUBLE_CTRL_C_TIMEOUT_SECS, EVENT_POLL_INTERVAL_MS, EXIT_PROMPT};
use self::ui::{
    app_state::AppState, commands::Command, components::Component, events::Message,
    renderer::Renderer,
};

/// Terminal front end for a [`PipelineController`].
///
/// The loop is synchronous; pipeline notifications cross over from the async side
/// through a std channel fed by a subscribed observer.
pub struct InteractiveSearch {
    state: AppState,
    renderer: Renderer,
    controller: PipelineController,
    pipeline_events: Receiver<PipelineEvent>,
    last_ctrl_c_press: Option<Instant>,
}

impl InteractiveSearch {
    pub fn new(controller: PipelineController, initial_query: &str) -> Self {
        let (tx, rx) = mpsc::channel();
        controller.subscribe(move |event: &PipelineEvent| {
            // The receiver is gone only after the UI has exited
            let _ = tx.send(event.clone());
        });

        let mut search = Self {
            state: AppState::new(),
            renderer: Renderer::new(),
            controller,
            pipeline_events: rx,
            last_ctrl_c_press: None,
        };
        if !initial_query.is_empty() {
            search.handle_message(Message::QueryChanged(initial_query.to_string()));
        }
        search
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Hands the controller back so the caller can shut it down.
    pub fn into_controller(self) -> PipelineController {
        self.controller
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = self.setup_terminal()?;
        let result = self.run_app(&mut terminal);
        self.cleanup_terminal(&mut terminal)?;
        result
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn cleanup_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                self.renderer.render(f, &self.state);
            })?;

            self.drain_pipeline_events();

            if poll(Duration::from_millis(EVENT_POLL_INTERVAL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_input(key)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Applies every notification the pipeline has published since the last call.
    pub fn drain_pipeline_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.pipeline_events.try_recv() {
            self.handle_message(Message::Pipeline(event));
            applied += 1;
        }
        applied
    }

    /// Returns `true` when the UI should exit.
    pub fn handle_input(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if let Some(last_press) = self.last_ctrl_c_press {
                if last_press.elapsed() < Duration::from_secs(DOUBLE_CTRL_C_TIMEOUT_SECS) {
                    return Ok(true);
                }
            }
            self.last_ctrl_c_press = Some(Instant::now());
            self.handle_message(Message::SetStatus(EXIT_PROMPT.to_string()));
            return Ok(false);
        }

        if self.state.ui.message.as_deref() == Some(EXIT_PROMPT) {
            self.last_ctrl_c_press = None;
            self.handle_message(Message::ClearStatus);
        }

        // The error dialog is modal
        if self.state.error.is_some() {
            self.renderer
                .get_error_dialog_mut()
                .set_error(self.state.error.clone());
            if let Some(msg) = self.renderer.get_error_dialog_mut().handle_key(key) {
                self.handle_message(msg);
            }
            return Ok(false);
        }

        let message = match key.code {
            KeyCode::Esc => return Ok(true),
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
                self.renderer.get_result_list_mut().handle_key(key)
            }
            KeyCode::Char('p') | KeyCode::Char('n')
                if key.modifiers == KeyModifiers::CONTROL =>
            {
                self.renderer.get_result_list_mut().handle_key(key)
            }
            _ => {
                let search_bar = self.renderer.get_search_bar_mut();
                search_bar.set_query(self.state.search.query.clone());
                search_bar.handle_key(key)
            }
        };

        if let Some(msg) = message {
            self.handle_message(msg);
        }
        Ok(false)
    }

    fn handle_message(&mut self, msg: Message) {
        let command = self.state.update(msg);
        self.execute_command(command);
    }

    fn execute_command(&mut self, command: Command) {
        match command {
            Command::None => {}
            Command::SetQuery(query) => {
                debug!(query = %query, "query edited");
                self.controller.set_query(query);
            }
            Command::DismissError(id) => {
                self.controller.dismiss_error(&id);
            }
        }
    }
}
