use super::clock::Clock;
use super::debounce::debounce;
use super::state::{
    Command, Message, PipelineEvent, PipelineSnapshot, PipelineState, RequestToken,
};
use crate::config::PipelineConfig;
use crate::error::FetchError;
use crate::query::QueryUrlBuilder;
use crate::schemas::SearchResult;
use crate::search::SearchFetcher;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

/// Receives every state change, synchronously, on the publishing task.
pub trait PipelineObserver: Send + 'static {
    fn on_event(&mut self, event: &PipelineEvent);
}

impl<F> PipelineObserver for F
where
    F: FnMut(&PipelineEvent) + Send + 'static,
{
    fn on_event(&mut self, event: &PipelineEvent) {
        self(event)
    }
}

enum Request {
    Update(Message),
    Subscribe(Box<dyn PipelineObserver>),
    Snapshot(oneshot::Sender<PipelineSnapshot>),
}

struct Completion {
    token: RequestToken,
    outcome: Result<SearchResult, FetchError>,
    elapsed: Duration,
}

/// Handle to a running query pipeline.
///
/// All state lives on one spawned task; this handle only sends it requests. Dropping
/// the handle stops the task and aborts any pending timer or in-flight fetch.
pub struct PipelineController {
    requests: mpsc::UnboundedSender<Request>,
    task: JoinHandle<()>,
}

impl PipelineController {
    /// Starts the pipeline on the current tokio runtime.
    pub fn spawn<F: SearchFetcher>(
        config: &PipelineConfig,
        fetcher: F,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (requests, inbox) = mpsc::unbounded_channel();
        let (query_tx, query_rx) = watch::channel(String::new());
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        let worker = PipelineWorker {
            state: PipelineState::new(QueryUrlBuilder::from_config(config)),
            fetcher: Arc::new(fetcher),
            observers: Vec::new(),
            clock: clock.clone(),
            query_tx,
            completions_tx,
            in_flight: None,
        };
        let task = tokio::spawn(worker.run(
            inbox,
            query_rx,
            completions_rx,
            config.debounce,
            clock,
        ));

        Self { requests, task }
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.send(Request::Update(Message::QueryChanged(query.into())));
    }

    /// Clears the current error if its id is `id`; results are left alone.
    pub fn dismiss_error(&self, id: &str) {
        self.send(Request::Update(Message::DismissError(id.to_string())));
    }

    pub fn subscribe(&self, observer: impl PipelineObserver) {
        self.send(Request::Subscribe(Box::new(observer)));
    }

    /// `None` once the pipeline has stopped.
    pub async fn snapshot(&self) -> Option<PipelineSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Request::Snapshot(tx));
        rx.await.ok()
    }

    pub async fn shutdown(self) {
        let Self { requests, task } = self;
        drop(requests);
        if let Err(e) = task.await {
            debug!(error = %e, "pipeline task ended abnormally");
        }
    }

    fn send(&self, request: Request) {
        if self.requests.send(request).is_err() {
            debug!("pipeline task is gone, request dropped");
        }
    }
}

struct PipelineWorker {
    state: PipelineState,
    fetcher: Arc<dyn SearchFetcher>,
    observers: Vec<Box<dyn PipelineObserver>>,
    clock: Arc<dyn Clock>,
    query_tx: watch::Sender<String>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    in_flight: Option<AbortHandle>,
}

impl PipelineWorker {
    async fn run(
        mut self,
        mut inbox: mpsc::UnboundedReceiver<Request>,
        query_rx: watch::Receiver<String>,
        mut completions_rx: mpsc::UnboundedReceiver<Completion>,
        delay: Duration,
        clock: Arc<dyn Clock>,
    ) {
        let mut settled = debounce(query_stream(query_rx), delay, clock);

        loop {
            tokio::select! {
                request = inbox.recv() => match request {
                    Some(Request::Update(message)) => self.apply(message),
                    Some(Request::Subscribe(observer)) => self.observers.push(observer),
                    Some(Request::Snapshot(reply)) => {
                        let _ = reply.send(self.state.snapshot());
                    }
                    None => break,
                },
                Some(query) = settled.next() => self.apply(Message::QuerySettled(query)),
                Some(Completion { token, outcome, elapsed }) = completions_rx.recv() => {
                    debug!(token, elapsed_ms = elapsed.as_millis() as u64, "fetch finished");
                    self.apply(Message::SearchCompleted { token, outcome });
                }
            }
        }

        self.cancel_fetch();
        debug!("pipeline stopped");
    }

    fn apply(&mut self, message: Message) {
        if let Message::QueryChanged(query) = &message {
            self.query_tx.send_replace(query.clone());
        }

        let transition = self.state.update(message);
        for event in &transition.events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
        self.execute(transition.command);

        if !self.state.is_fetching() {
            self.in_flight = None;
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::None => {}
            Command::Fetch { token, request } => {
                self.cancel_fetch();
                let fetch = self.fetcher.fetch(request);
                let completions = self.completions_tx.clone();
                let clock = self.clock.clone();
                let started = clock.now();
                let handle = tokio::spawn(async move {
                    let outcome = fetch.await;
                    let elapsed = clock.now().saturating_duration_since(started);
                    let _ = completions.send(Completion {
                        token,
                        outcome,
                        elapsed,
                    });
                });
                self.in_flight = Some(handle.abort_handle());
            }
            Command::CancelFetch => self.cancel_fetch(),
        }
    }

    fn cancel_fetch(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

/// Yields the input slot's value each time it is written
fn query_stream(rx: watch::Receiver<String>) -> impl Stream<Item = String> {
    futures::stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let query = rx.borrow_and_update().clone();
        Some((query, rx))
    })
}
