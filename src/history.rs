//! Lookups over the raw visit history.
//!
//! A park counts as visited only when its history holds at least one visit
//! log. A record that merely carries a rating is not a visit.

use crate::date::{in_window, newest_first};
use crate::model::{Park, Rating, UserParkHistory, VisitLog};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryIndex {
    visit_counts: BTreeMap<String, usize>,
    ratings: BTreeMap<String, Rating>,
    visited: BTreeSet<String>,
}

impl HistoryIndex {
    pub fn build(histories: &[UserParkHistory]) -> Self {
        let mut index = HistoryIndex::default();
        for h in histories.iter() {
            let count = index.visit_counts.entry(h.park_id.clone()).or_insert(0);
            *count += h.visits.len();
            if *count > 0 {
                index.visited.insert(h.park_id.clone());
            }
            if let Some(r) = h.rating {
                index.ratings.insert(h.park_id.clone(), r);
            }
        }
        index
    }

    pub fn is_visited(&self, park_id: &str) -> bool {
        self.visited.contains(park_id)
    }

    pub fn visited_park_ids(&self) -> &BTreeSet<String> {
        &self.visited
    }

    pub fn visit_count(&self, park_id: &str) -> usize {
        self.visit_counts.get(park_id).copied().unwrap_or(0)
    }

    pub fn rating(&self, park_id: &str) -> Option<Rating> {
        self.ratings.get(park_id).copied()
    }

    /// Distinct visited park ids, including ids the catalog does not know.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn total_visits(&self) -> usize {
        self.visit_counts.values().sum()
    }

    pub fn max_visit_count(&self) -> usize {
        self.visit_counts.values().copied().max().unwrap_or(0)
    }

    pub fn rated_count(&self) -> usize {
        self.ratings.len()
    }

    pub fn ratings(&self) -> impl Iterator<Item = Rating> + '_ {
        self.ratings.values().copied()
    }
}

/// All visits for one park, newest first. Equal dates keep their stored order.
pub fn sorted_visits(histories: &[UserParkHistory], park_id: &str) -> Vec<VisitLog> {
    let mut out: Vec<VisitLog> = histories
        .iter()
        .filter(|h| h.park_id == park_id)
        .flat_map(|h| h.visits.iter().cloned())
        .collect();
    out.sort_by(|a, b| newest_first(&a.date, &b.date));
    out
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct JournalEntry {
    pub park_id: String,
    pub park_name: String,
    pub state: String,
    pub date: String,
    pub notes: String,
    pub rating: Option<Rating>,
}

/// Every visit joined with its park, newest first.
///
/// Visits to parks missing from the catalog are dropped. The window is
/// inclusive; when one is given, visits with unparsable dates are excluded.
pub fn journal_entries(
    histories: &[UserParkHistory],
    parks: &[Park],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    park_id: Option<&str>,
) -> Vec<JournalEntry> {
    let mut out: Vec<JournalEntry> = Vec::new();
    for h in histories.iter() {
        if park_id.is_some_and(|id| id != h.park_id) {
            continue;
        }
        let park = match parks.iter().find(|p| p.id == h.park_id) {
            Some(p) => p,
            None => {
                log::debug!("journal: skipping {} visit(s) to unknown park {}", h.visits.len(), h.park_id);
                continue;
            }
        };
        for v in h.visits.iter() {
            if !in_window(&v.date, from, to) {
                continue;
            }
            out.push(JournalEntry {
                park_id: park.id.clone(),
                park_name: park.name.clone(),
                state: park.state.clone(),
                date: v.date.clone(),
                notes: v.notes.clone(),
                rating: h.rating,
            });
        }
    }
    out.sort_by(|a, b| newest_first(&a.date, &b.date));
    out
}
