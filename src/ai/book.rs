//! Opening book: known early sequences mapped to a precomputed reply.
//!
//! Keys are the concatenated Othello notation of every move played so far,
//! in order (`""` for the first move, `"d3"` after black opens d3, `"d3c5"`
//! after white replies c5, ...). A hit bypasses search entirely.

use rustc_hash::FxHashMap;

use crate::core::Coord;
use crate::engine::Move;

/// Book lines covering the four symmetric first moves and the main
/// diagonal-opening continuations.
const LINES: &[(&str, &str)] = &[
    ("", "d3"),
    // First replies (the diagonal opening and its mirror images).
    ("d3", "c5"),
    ("c4", "e3"),
    ("e6", "f4"),
    ("f5", "d6"),
    // Second replies.
    ("d3c5", "f6"),
    ("c4e3", "f6"),
    ("e6f4", "c3"),
    ("f5d6", "c3"),
];

/// A lookup table from move-sequence keys to the recorded best reply.
#[derive(Clone, Debug)]
pub struct OpeningBook {
    entries: FxHashMap<String, Coord>,
}

impl OpeningBook {
    /// An empty book; every probe misses.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// The built-in standard lines.
    #[must_use]
    pub fn standard() -> Self {
        // Every reply in LINES is valid notation; the tests replay each
        // line to keep the table honest.
        let entries = LINES
            .iter()
            .filter_map(|&(key, reply)| {
                reply.parse().ok().map(|coord| (key.to_string(), coord))
            })
            .collect();

        Self { entries }
    }

    /// The canonical key for a played sequence.
    #[must_use]
    pub fn key_for(history: &[Move]) -> String {
        history.iter().map(Move::notation).collect()
    }

    /// Look up the recorded reply for the sequence played so far.
    #[must_use]
    pub fn probe(&self, history: &[Move]) -> Option<Coord> {
        self.entries.get(&Self::key_for(history)).copied()
    }

    /// Number of recorded lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, reply)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Coord)> {
        self.entries.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self::standard()
    }
}
