//! Ranking of raw candidate sets
//!
//! The most popular candidate is pinned as the "top" item no matter what the
//! query is; everything else is listed alphabetically (case-insensitive).

use crate::Candidate;

/// Ranked candidates, before they are laid out for display
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    /// Highest-popularity candidate, `None` only for an empty set
    pub top: Option<Candidate>,
    /// All other candidates, ascending by lowercased name
    pub remainder: Vec<Candidate>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    pub fn len(&self) -> usize {
        self.remainder.len() + usize::from(self.top.is_some())
    }

    /// Flatten into list-model order: remainder first, top last
    pub fn into_list(self) -> Vec<Candidate> {
        let mut list = self.remainder;
        list.extend(self.top);
        list
    }
}

/// Index of the candidate with the highest popularity.
///
/// Single forward scan; a later candidate only wins with a strictly greater score,
/// so ties go to the earliest one. NaN scores lose to any real score and only win
/// when every score is NaN.
pub fn select_top(candidates: &[Candidate]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        let wins = best.is_none_or(|b| {
            let current = candidates[b].popularity;
            (current.is_nan() && !candidate.popularity.is_nan())
                || candidate.popularity > current
        });
        if wins {
            best = Some(i);
        }
    }
    best
}

/// Sort by lowercased name, keeping input order for equal keys
pub fn sort_by_name(candidates: &mut [Candidate]) {
    candidates.sort_by_cached_key(|c| c.name.to_lowercase());
}

/// Rank a raw candidate set: pin the most popular one, sort the rest by name
pub fn rank(mut candidates: Vec<Candidate>) -> Ranking {
    let Some(top_index) = select_top(&candidates) else {
        return Ranking::default();
    };

    let top = candidates.remove(top_index);
    sort_by_name(&mut candidates);

    Ranking {
        top: Some(top),
        remainder: candidates,
    }
}
