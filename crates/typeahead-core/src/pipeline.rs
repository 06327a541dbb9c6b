//! Session + dispatcher glue

use crate::dispatch::{CandidateSource, Completion, Dispatcher};
use crate::session::{DisplayList, Session};
use std::time::Duration;

/// What happened to one completed dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Results replaced the display list
    Accepted { seq: u64, len: usize },
    /// A newer query was dispatched in the meantime; results dropped
    Stale { seq: u64 },
    /// The fetch failed; logged and otherwise ignored
    Failed { seq: u64 },
}

impl Outcome {
    pub fn seq(&self) -> u64 {
        match *self {
            Outcome::Accepted { seq, .. } | Outcome::Stale { seq } | Outcome::Failed { seq } => seq,
        }
    }
}

pub struct Pipeline<S> {
    session: Session,
    dispatcher: Dispatcher<S>,
    last_duration: Option<Duration>,
}

impl<S: CandidateSource> Pipeline<S> {
    pub fn new(source: S) -> Self {
        Self {
            session: Session::new(),
            dispatcher: Dispatcher::new(source),
            last_duration: None,
        }
    }

    /// Record `text` as the current query and fetch candidates for it.
    ///
    /// Returns the sequence number assigned to this dispatch.
    pub fn submit(&mut self, text: &str) -> u64 {
        let ticket = self.session.begin(text);
        let seq = ticket.seq;
        self.dispatcher.dispatch(ticket);
        seq
    }

    /// Settle every completion that has arrived so far (non-blocking)
    pub fn pump(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(completion) = self.dispatcher.try_next() {
            outcomes.push(self.settle(completion));
        }
        outcomes
    }

    /// Wait for the next completion and settle it; `None` when nothing is in flight
    pub fn wait(&mut self) -> Option<Outcome> {
        let completion = self.dispatcher.next_blocking()?;
        Some(self.settle(completion))
    }

    fn settle(&mut self, completion: Completion) -> Outcome {
        let Completion {
            seq,
            query,
            outcome,
            duration,
        } = completion;

        match outcome {
            Ok(candidates) => match self.session.accept(seq, candidates) {
                Some(display) => {
                    self.last_duration = Some(duration);
                    Outcome::Accepted {
                        seq,
                        len: display.len(),
                    }
                }
                None => Outcome::Stale { seq },
            },
            Err(e) => {
                log::warn!("Autocomplete fetch for {:?} (seq {}) failed: {:#}", query, seq, e);
                Outcome::Failed { seq }
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn display(&self) -> &DisplayList {
        self.session.display()
    }

    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    /// Fetch time of the results currently on display
    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    pub fn source(&self) -> &S {
        self.dispatcher.source()
    }
}
