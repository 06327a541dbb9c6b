//! Query state and the display list it drives

use crate::rank::{rank, Ranking};
use crate::{Candidate, CandidateId};
use std::collections::HashMap;
use std::fmt;

/// Render key for a display entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    /// The candidate's own id, unique within its response
    Id(CandidateId),
    /// Session-local fallback for missing or duplicated ids
    Generated(u64),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Id(id) => write!(f, "id:{}", id),
            ItemKey::Generated(n) => write!(f, "gen:{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntry {
    pub key: ItemKey,
    pub candidate: Candidate,
    pub is_top: bool,
}

/// Candidates in list-model order: alphabetical remainder first, top candidate last
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    entries: Vec<DisplayEntry>,
}

impl DisplayList {
    pub fn entries(&self) -> &[DisplayEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&DisplayEntry> {
        self.entries.last().filter(|e| e.is_top)
    }

    /// Entries starting from the one nearest the input (the top candidate)
    pub fn nearest_first(&self) -> impl Iterator<Item = &DisplayEntry> {
        self.entries.iter().rev()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.candidate.name.as_str())
            .collect()
    }
}

/// Handed out by [`Session::begin`] for every dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub query: String,
}

/// Owned search state: current query, dispatch counter and display list
#[derive(Debug, Default)]
pub struct Session {
    query: String,
    latest_seq: u64,
    accepted_seq: Option<u64>,
    display: DisplayList,
    next_generated_key: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new query and claim the next sequence number for it
    pub fn begin(&mut self, text: &str) -> Ticket {
        self.query = text.to_string();
        self.latest_seq += 1;
        Ticket {
            seq: self.latest_seq,
            query: self.query.clone(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Sequence number of the dispatch whose results are on display
    pub fn accepted_seq(&self) -> Option<u64> {
        self.accepted_seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    pub fn display(&self) -> &DisplayList {
        &self.display
    }

    /// Accept the candidates fetched for dispatch `seq`.
    ///
    /// Returns `None` without touching anything when `seq` has been superseded.
    /// Otherwise the display list is rebuilt from scratch and replaced in one step.
    pub fn accept(&mut self, seq: u64, candidates: Vec<Candidate>) -> Option<&DisplayList> {
        if !self.is_current(seq) {
            log::debug!(
                "Discarding stale results for seq {} (latest is {})",
                seq,
                self.latest_seq
            );
            return None;
        }

        let display = self.assemble(rank(candidates));
        log::debug!("Accepted {} results for seq {}", display.len(), seq);

        self.display = display;
        self.accepted_seq = Some(seq);
        Some(&self.display)
    }

    fn assemble(&mut self, ranking: Ranking) -> DisplayList {
        let has_top = ranking.top.is_some();
        let list = ranking.into_list();

        let mut id_counts: HashMap<&CandidateId, usize> = HashMap::new();
        for id in list.iter().filter_map(|c| c.id.as_ref()) {
            *id_counts.entry(id).or_default() += 1;
        }
        let keys: Vec<ItemKey> = list
            .iter()
            .map(|c| match &c.id {
                Some(id) if id_counts.get(id) == Some(&1) => ItemKey::Id(id.clone()),
                _ => {
                    self.next_generated_key += 1;
                    ItemKey::Generated(self.next_generated_key)
                }
            })
            .collect();

        let last = list.len().saturating_sub(1);
        let entries = list
            .into_iter()
            .zip(keys)
            .enumerate()
            .map(|(i, (candidate, key))| DisplayEntry {
                key,
                candidate,
                is_top: has_top && i == last,
            })
            .collect();

        DisplayList { entries }
    }
}
