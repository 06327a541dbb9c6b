//! Query-to-ranked-list pipeline for search-as-you-type clients.
//!
//! Architecture:
//! - [`Session`]: current query text, the dispatch sequence counter and the
//!   display list. Only the owner (the UI event loop) mutates it.
//! - [`Dispatcher`]: fire-and-forget fetches, one worker thread per dispatch,
//!   completions reported back over an mpsc channel
//! - [`rank`]: pure ranking of a raw candidate set into a pinned top item plus
//!   an alphabetical remainder
//! - [`Pipeline`]: glue that gates completions on their sequence number
//!
//! ```text
//!  keystroke ──► Pipeline::submit ──► Session::begin (seq = n)
//!                      │
//!                      └──► Dispatcher ──► worker thread ──► CandidateSource::fetch
//!                                                                │
//!  Pipeline::pump ◄── completion channel ◄────────────────────────┘
//!        │
//!        └──► Session::accept(seq, candidates)   (dropped unless seq == n)
//! ```

pub mod candidate;
pub mod dispatch;
pub mod pipeline;
pub mod rank;
pub mod session;

pub use candidate::{Candidate, CandidateId};
pub use dispatch::{CandidateSource, Completion, Dispatcher};
pub use pipeline::{Outcome, Pipeline};
pub use rank::{rank, select_top, Ranking};
pub use session::{DisplayEntry, DisplayList, ItemKey, Session, Ticket};
