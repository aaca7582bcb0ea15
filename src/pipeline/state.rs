use super::dedupe::Deduplicator;
use crate::error::{ErrorMessage, FetchError};
use crate::query::{QueryUrlBuilder, SearchRequest};
use crate::schemas::SearchResult;
use tracing::{debug, trace, warn};

/// Identifies one dispatched request. Only the latest may publish.
pub type RequestToken = u64;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Phase {
    #[default]
    Idle,
    Debouncing,
    Fetching,
}

#[derive(Debug)]
pub enum Message {
    /// The input slot was written
    QueryChanged(String),
    /// A query survived the debounce window
    QuerySettled(String),
    SearchCompleted {
        token: RequestToken,
        outcome: Result<SearchResult, FetchError>,
    },
    /// The user acknowledged the error with this id
    DismissError(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    None,
    Fetch {
        token: RequestToken,
        request: SearchRequest,
    },
    /// Abort the in-flight fetch; its result could no longer be published
    CancelFetch,
}

/// Change notification delivered to subscribers
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineEvent {
    ResultsChanged(Vec<String>),
    ErrorChanged(Option<ErrorMessage>),
    PhaseChanged(Phase),
}

#[derive(Debug)]
pub struct Transition {
    pub command: Command,
    pub events: Vec<PipelineEvent>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PipelineSnapshot {
    pub query: String,
    pub results: Vec<String>,
    pub error: Option<ErrorMessage>,
    pub phase: Phase,
    pub active_token: RequestToken,
}

pub struct PipelineState {
    builder: QueryUrlBuilder,
    dedupe: Deduplicator<String>,
    query: String,
    results: Vec<String>,
    error: Option<ErrorMessage>,
    active_token: RequestToken,
    in_flight: Option<RequestToken>,
    settling: bool,
}

impl PipelineState {
    pub fn new(builder: QueryUrlBuilder) -> Self {
        Self {
            builder,
            dedupe: Deduplicator::new(),
            query: String::new(),
            results: Vec::new(),
            error: None,
            active_token: 0,
            in_flight: None,
            settling: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn error(&self) -> Option<&ErrorMessage> {
        self.error.as_ref()
    }

    pub fn active_token(&self) -> RequestToken {
        self.active_token
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.settling {
            Phase::Debouncing
        } else if self.in_flight.is_some() {
            Phase::Fetching
        } else {
            Phase::Idle
        }
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            query: self.query.clone(),
            results: self.results.clone(),
            error: self.error.clone(),
            phase: self.phase(),
            active_token: self.active_token,
        }
    }

    pub fn update(&mut self, message: Message) -> Transition {
        let phase_before = self.phase();
        let mut events = Vec::new();

        let command = match message {
            Message::QueryChanged(query) => {
                self.query = query;
                self.settling = true;
                Command::None
            }
            Message::QuerySettled(query) => {
                self.settling = false;
                self.settle(query, &mut events)
            }
            Message::SearchCompleted { token, outcome } => {
                self.complete(token, outcome, &mut events);
                Command::None
            }
            Message::DismissError(id) => {
                // A newer error may have replaced the one the user saw
                if self.error.as_ref().map(|e| e.id.as_str()) == Some(id.as_str()) {
                    self.set_error(None, &mut events);
                } else {
                    debug!(id = %id, "dismissed error is no longer current, keeping it");
                }
                Command::None
            }
        };

        let phase = self.phase();
        if phase != phase_before {
            events.push(PipelineEvent::PhaseChanged(phase));
        }

        Transition { command, events }
    }

    fn settle(&mut self, query: String, events: &mut Vec<PipelineEvent>) -> Command {
        if !self.dedupe.admit(&query) {
            debug!(query = %query, "query unchanged since last dispatch, skipping");
            return Command::None;
        }

        match self.builder.build(&query) {
            Ok(None) => {
                // An emptied search box keeps the list on screen
                self.set_error(None, events);
                Command::None
            }
            Ok(Some(request)) => {
                let token = self.next_token();
                self.in_flight = Some(token);
                debug!(token, query = %query, "dispatching search");
                Command::Fetch { token, request }
            }
            Err(e) => {
                let token = self.next_token();
                warn!(token, error = %e, "rejected query");
                self.set_error(Some(ErrorMessage::from(&e)), events);
                if self.in_flight.take().is_some() {
                    Command::CancelFetch
                } else {
                    Command::None
                }
            }
        }
    }

    fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<SearchResult, FetchError>,
        events: &mut Vec<PipelineEvent>,
    ) {
        if token != self.active_token || self.in_flight != Some(token) {
            trace!(token, active = self.active_token, "dropping stale search result");
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                self.set_results(result.full_names(), events);
                self.set_error(None, events);
            }
            Err(e) => {
                warn!(token, error = %e, "search failed");
                self.set_error(Some(ErrorMessage::from(&e)), events);
            }
        }
    }

    fn next_token(&mut self) -> RequestToken {
        self.active_token += 1;
        self.active_token
    }

    fn set_results(&mut self, results: Vec<String>, events: &mut Vec<PipelineEvent>) {
        if self.results != results {
            self.results = results;
            events.push(PipelineEvent::ResultsChanged(self.results.clone()));
        }
    }

    fn set_error(&mut self, error: Option<ErrorMessage>, events: &mut Vec<PipelineEvent>) {
        if self.error != error {
            self.error = error;
            events.push(PipelineEvent::ErrorChanged(self.error.clone()));
        }
    }
}
