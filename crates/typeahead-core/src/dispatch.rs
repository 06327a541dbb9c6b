//! Fire-and-forget fetch workers
//!
//! Every dispatch gets its own worker thread; nothing is debounced, coalesced or
//! cancelled. Superseded fetches run to completion and are filtered out later by
//! sequence number, so several may be in flight at once.

use crate::{Candidate, Ticket};
use anyhow::Result;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Anything that can produce raw candidates for a query
pub trait CandidateSource: Send + Sync + 'static {
    fn fetch(&self, query: &str) -> Result<Vec<Candidate>>;
}

/// Result of one dispatch, sent back from its worker
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub query: String,
    pub outcome: Result<Vec<Candidate>>,
    pub duration: Duration,
}

pub struct Dispatcher<S> {
    source: Arc<S>,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
    in_flight: usize,
}

impl<S: CandidateSource> Dispatcher<S> {
    pub fn new(source: S) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<Completion>();
        Self {
            source: Arc::new(source),
            completion_tx,
            completion_rx,
            in_flight: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of dispatches whose completion has not been received yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start fetching for `ticket` on a new worker thread
    pub fn dispatch(&mut self, ticket: Ticket) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        let completion_tx = self.completion_tx.clone();
        self.in_flight += 1;

        log::debug!("Dispatching seq {} for {:?}", ticket.seq, ticket.query);

        thread::spawn(move || {
            let start = Instant::now();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| source.fetch(&ticket.query)))
                .unwrap_or_else(|_| Err(anyhow::anyhow!("fetch worker panicked")));

            let _ = completion_tx.send(Completion {
                seq: ticket.seq,
                query: ticket.query,
                outcome,
                duration: start.elapsed(),
            });
        })
    }

    /// Next finished dispatch, if any (non-blocking)
    pub fn try_next(&mut self) -> Option<Completion> {
        let completion = self.completion_rx.try_recv().ok()?;
        self.in_flight -= 1;
        Some(completion)
    }

    /// Block until a dispatch finishes; `None` when nothing is in flight
    pub fn next_blocking(&mut self) -> Option<Completion> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.completion_rx.recv().ok()?;
        self.in_flight -= 1;
        Some(completion)
    }
}
