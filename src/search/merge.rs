//! Combining per-worker match lists.

use crate::search::Match;

/// All matches of one search, in merge order.
///
/// Workers own their local lists until they finish; the caller concatenates
/// them band by band, so nothing is shared while scanning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSet {
    matches: Vec<Match>,
}

impl ResultSet {
    /// Concatenates worker outputs in the order given.
    pub fn merge<I>(locals: I) -> Self
    where
        I: IntoIterator<Item = Vec<Match>>,
    {
        let mut matches = Vec::new();
        for local in locals {
            matches.extend(local);
        }
        Self { matches }
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// True when the needle occurred nowhere.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matches in merge order.
    pub fn iter(&self) -> std::slice::Iter<'_, Match> {
        self.matches.iter()
    }

    /// Borrows the matches as a slice.
    pub fn as_slice(&self) -> &[Match] {
        &self.matches
    }

    /// Whether the anchor at (`row`, `col`) was reported.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.matches.contains(&Match { row, col })
    }

    /// Unwraps the underlying list.
    pub fn into_vec(self) -> Vec<Match> {
        self.matches
    }
}

impl IntoIterator for ResultSet {
    type Item = Match;
    type IntoIter = std::vec::IntoIter<Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}
