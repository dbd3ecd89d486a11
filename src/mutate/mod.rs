//! Keyword mutation pipeline
//!
//! Stages run per keyword in a fixed order:
//! case permutation -> substitution -> numbering -> years -> paddings.
//! The estimator mirrors the same stages arithmetically so the output
//! volume is known before anything is written.

pub mod case;
pub mod engine;
pub mod estimator;
pub mod numbering;
pub mod padding;
pub mod sink;
pub mod substitution;
pub mod years;

pub use engine::MutationEngine;
pub use sink::{CountingSink, FileSink, LineSink, MemorySink};

use std::collections::HashSet;

/// Insertion-ordered set of mutations for one keyword
#[derive(Debug, Clone, Default)]
pub struct MutationSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl MutationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mutation, returning `true` if it was not present yet
    pub fn insert(&mut self, mutation: String) -> bool {
        if self.seen.contains(&mutation) {
            return false;
        }
        self.seen.insert(mutation.clone());
        self.items.push(mutation);
        true
    }

    pub fn contains(&self, mutation: &str) -> bool {
        self.seen.contains(mutation)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Mutation at insertion position `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Sum of the UTF-8 lengths of every mutation
    pub fn byte_total(&self) -> usize {
        self.items.iter().map(String::len).sum()
    }
}

impl FromIterator<String> for MutationSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = MutationSet::new();
        for mutation in iter {
            set.insert(mutation);
        }
        set
    }
}
