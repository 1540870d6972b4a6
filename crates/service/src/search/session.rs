use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

use super::index::{SearchIndex, SearchableService};

/// Observable state of a search box.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Debouncing { query: String },
    Querying { query: String },
    ResultsShown { query: String, results: Vec<SearchableService> },
    NoResults { query: String },
}

impl SessionState {
    /// True once a scheduled query has produced an outcome.
    pub fn is_settled(&self) -> bool {
        matches!(self, SessionState::ResultsShown { .. } | SessionState::NoResults { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub debounce: Duration,
    pub limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self { Self { debounce: Duration::from_millis(150), limit: 8 } }
}

impl From<&configs::SearchConfig> for SessionConfig {
    fn from(c: &configs::SearchConfig) -> Self {
        Self { debounce: Duration::from_millis(c.debounce_ms), limit: c.default_limit }
    }
}

/// Returned when input is sent after the session task has stopped.
#[derive(Debug, thiserror::Error)]
#[error("search session closed")]
pub struct SessionClosed;

/// Debounced query loop over a [`SearchIndex`].
///
/// Keystrokes go into a channel consumed by one task. Each nonempty input
/// restarts the timer; only the input still pending when the timer fires is
/// queried, so superseded inputs never reach the index. Empty input returns
/// to `Idle` and drops the pending query.
pub struct SearchSession {
    input: mpsc::UnboundedSender<String>,
    state: watch::Receiver<SessionState>,
    task: JoinHandle<()>,
}

impl SearchSession {
    pub fn spawn(index: Arc<SearchIndex>, cfg: SessionConfig) -> Self {
        let (input, rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(SessionState::Idle);
        let task = tokio::spawn(run(index, cfg, rx, state_tx));
        Self { input, state, task }
    }

    pub fn input(&self, text: impl Into<String>) -> Result<(), SessionClosed> {
        self.input.send(text.into()).map_err(|_| SessionClosed)
    }

    pub fn clear(&self) -> Result<(), SessionClosed> { self.input(String::new()) }

    pub fn state(&self) -> SessionState { self.state.borrow().clone() }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> { self.state.clone() }
}

impl Drop for SearchSession {
    fn drop(&mut self) { self.task.abort(); }
}

async fn run(
    index: Arc<SearchIndex>,
    cfg: SessionConfig,
    mut rx: mpsc::UnboundedReceiver<String>,
    state: watch::Sender<SessionState>,
) {
    let mut pending: Option<String> = None;
    let mut deadline = Instant::now();

    loop {
        tokio::select! {
            msg = rx.recv() => {
                let Some(text) = msg else { break };
                if text.trim().is_empty() {
                    if pending.take().is_some() {
                        trace!("pending query dropped");
                    }
                    state.send_replace(SessionState::Idle);
                    continue;
                }
                deadline = Instant::now() + cfg.debounce;
                state.send_replace(SessionState::Debouncing { query: text.clone() });
                pending = Some(text);
            }
            _ = sleep_until(deadline), if pending.is_some() => {
                let Some(query) = pending.take() else { continue };
                state.send_replace(SessionState::Querying { query: query.clone() });
                let results = index.query(&query, cfg.limit);
                debug!(query = %query, hits = results.len(), "search session query");
                let next = if results.is_empty() {
                    SessionState::NoResults { query }
                } else {
                    SessionState::ResultsShown { query, results }
                };
                state.send_replace(next);
            }
        }
    }
}
