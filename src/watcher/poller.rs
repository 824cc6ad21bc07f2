//! Reference change poller

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::error::PollError;
use super::snapshot::Snapshot;
use crate::domain::RefChange;
use crate::lister::RefLister;

/// Polls one repository's references and emits a RefChange for every transition
pub struct RefPoller {
    name: String,
    lister: Arc<dyn RefLister>,
    sink: mpsc::Sender<RefChange>,
    period: Duration,
    snapshot: Snapshot,
    /// Events already diffed into the snapshot but not yet accepted by the sink
    pending: VecDeque<RefChange>,
}

impl RefPoller {
    /// Create a new RefPoller
    ///
    /// `name` tags every emitted event. The snapshot starts empty, so the
    /// first poll reports every listed reference as created.
    pub fn new(
        name: impl Into<String>,
        lister: Arc<dyn RefLister>,
        sink: mpsc::Sender<RefChange>,
        period: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            lister,
            sink,
            period,
            snapshot: Snapshot::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Run a single fetch -> diff -> emit cycle
    ///
    /// Returns the number of events sent, including any left over from a
    /// cycle that was cancelled mid-emission. Sending waits while the sink
    /// is full. Cancelling this future never drops an event: unsent events
    /// stay queued and go out first on the next call. On an enumeration
    /// failure the snapshot is left untouched.
    pub async fn poll_once(&mut self) -> Result<usize, PollError> {
        let mut emitted = self.flush().await?;

        let refs = self.lister.list_refs().await.map_err(|source| PollError::Enumeration {
            name: self.name.clone(),
            source,
        })?;
        let listed = refs.len();

        self.pending.extend(self.snapshot.advance(&self.name, refs));
        emitted += self.flush().await?;

        debug!(name = %self.name, refs = listed, events = emitted, "Poll cycle complete");
        Ok(emitted)
    }

    /// Send queued events in order
    ///
    /// A slot is reserved before an event leaves the queue, so cancellation
    /// while waiting on a full sink keeps the event queued.
    async fn flush(&mut self) -> Result<usize, PollError> {
        let mut sent = 0;
        while !self.pending.is_empty() {
            let permit = self.sink.reserve().await.map_err(|_| PollError::SinkClosed {
                name: self.name.clone(),
            })?;
            if let Some(change) = self.pending.pop_front() {
                permit.send(change);
                sent += 1;
            }
        }
        Ok(sent)
    }

    /// Run the polling loop until shutdown or failure
    ///
    /// Shutdown is signalled by a message on `shutdown_rx` or by dropping
    /// every sender for it; it is honoured before each cycle, while a cycle
    /// is in flight and during the wait between cycles. Returns `Ok(())` on
    /// shutdown and the first `PollError` otherwise.
    pub async fn run(mut self, mut shutdown_rx: mpsc::Receiver<()>) -> Result<(), PollError> {
        info!(
            name = %self.name,
            repo = %self.lister.describe(),
            period = ?self.period,
            "Watching repository"
        );

        let result = loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break Ok(()),
                polled = self.poll_once() => {
                    if let Err(e) = polled {
                        error!(name = %self.name, error = %e, "Polling stopped");
                        break Err(e);
                    }
                }
            }

            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break Ok(()),
                _ = tokio::time::sleep(self.period) => {}
            }
        };

        info!(name = %self.name, "Stopped watching repository");
        result
    }
}

/// Watch one repository until shutdown or failure
///
/// Convenience wrapper around [`RefPoller::new`] and [`RefPoller::run`].
pub async fn poll_repository(
    name: impl Into<String>,
    lister: Arc<dyn RefLister>,
    sink: mpsc::Sender<RefChange>,
    period: Duration,
    shutdown_rx: mpsc::Receiver<()>,
) -> Result<(), PollError> {
    RefPoller::new(name, lister, sink, period).run(shutdown_rx).await
}
