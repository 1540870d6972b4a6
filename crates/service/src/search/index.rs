use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fuzzy::{field_score, fold};

/// Flat projection of a service used for client and server side search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchableService {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category_name: String,
    pub category_slug: String,
}

/// Tuning knobs of the index.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Maximum accepted field score; 0 requires an exact substring, 1 accepts anything.
    pub threshold: f64,
    /// Queries shorter than this (in characters, after trimming) return nothing.
    pub min_query_len: usize,
    /// Queries are cut to this many characters; scoring is O(query x field).
    pub max_query_len: usize,
}

impl Default for SearchOptions {
    fn default() -> Self { Self { threshold: 0.3, min_query_len: 2, max_query_len: 64 } }
}

impl From<&configs::SearchConfig> for SearchOptions {
    fn from(c: &configs::SearchConfig) -> Self {
        Self { threshold: c.threshold, min_query_len: c.min_query_len, max_query_len: c.max_query_len }
    }
}

/// One ranked result. Lower scores are better.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub item: SearchableService,
    pub score: f64,
}

// name 2, description 1, category_name 0.5, normalized to sum to 1
const WEIGHT_TOTAL: f64 = 3.5;
const WEIGHTS: [f64; 3] = [2.0 / WEIGHT_TOTAL, 1.0 / WEIGHT_TOTAL, 0.5 / WEIGHT_TOTAL];

struct Entry {
    record: SearchableService,
    keys: [Vec<char>; 3],
}

/// Immutable index; rebuild it when the service list changes.
pub struct SearchIndex {
    entries: Vec<Entry>,
    opts: SearchOptions,
    lookups: AtomicUsize,
}

impl SearchIndex {
    pub fn new(records: Vec<SearchableService>) -> Self { Self::with_options(records, SearchOptions::default()) }

    pub fn with_options(records: Vec<SearchableService>, opts: SearchOptions) -> Self {
        let entries = records
            .into_iter()
            .map(|record| {
                let keys = [fold(&record.name), fold(&record.description), fold(&record.category_name)];
                Entry { record, keys }
            })
            .collect();
        Self { entries, opts, lookups: AtomicUsize::new(0) }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn records(&self) -> impl Iterator<Item = &SearchableService> { self.entries.iter().map(|e| &e.record) }

    /// Number of lookups that actually scanned the index.
    pub fn query_count(&self) -> usize { self.lookups.load(Ordering::Relaxed) }

    /// Ranked records for `text`, at most `limit`.
    pub fn query(&self, text: &str, limit: usize) -> Vec<SearchableService> {
        self.search(text, limit).into_iter().map(|h| h.item).collect()
    }

    /// Like [`query`](Self::query) but keeps the combined scores.
    pub fn search(&self, text: &str, limit: usize) -> Vec<SearchHit> {
        let text = text.trim();
        if text.chars().count() < self.opts.min_query_len.max(1) || limit == 0 {
            return Vec::new();
        }
        self.lookups.fetch_add(1, Ordering::Relaxed);

        let mut pattern = fold(text);
        pattern.truncate(self.opts.max_query_len.max(self.opts.min_query_len));
        let mut scored: Vec<(usize, f64)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(pos, entry)| self.score_entry(&pattern, entry).map(|s| (pos, s)))
            .collect();

        // position keeps equal scores in insertion order
        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        scored
            .into_iter()
            .take(limit)
            .map(|(pos, score)| SearchHit { item: self.entries[pos].record.clone(), score })
            .collect()
    }

    fn score_entry(&self, pattern: &[char], entry: &Entry) -> Option<f64> {
        let mut total = 1.0f64;
        let mut matched = false;
        for (key, weight) in entry.keys.iter().zip(WEIGHTS) {
            let score = field_score(pattern, key);
            if score <= self.opts.threshold {
                matched = true;
                total *= score.max(f64::EPSILON).powf(weight);
            }
        }
        matched.then_some(total)
    }
}
