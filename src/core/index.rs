use std::collections::HashMap;

use crate::core::sequence::ChromosomeSequence;

/// Loaded chromosomes, keyed by identifier.
/// Preserves chromosome order from the input file.
///
/// Built once by the loader and read-only afterwards; share it by reference
/// (or behind an `Arc`) with any number of readers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    /// Map of chromosome name to sequence
    sequences: HashMap<String, ChromosomeSequence>,
    /// Chromosome order (first occurrence in the input file)
    order: Vec<String>,
}

impl ReferenceIndex {
    /// Create an empty index
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Commit a completed record.
    ///
    /// A repeated identifier replaces the earlier sequence but keeps its
    /// original position in the order. Returns `true` if an entry was replaced.
    pub(crate) fn insert(&mut self, name: String, sequence: ChromosomeSequence) -> bool {
        if let Some(existing) = self.sequences.get_mut(&name) {
            *existing = sequence;
            return true;
        }
        self.order.push(name.clone());
        self.sequences.insert(name, sequence);
        false
    }

    /// Look up a chromosome by identifier
    #[inline]
    #[must_use]
    pub fn sequence_for(&self, name: &str) -> Option<&ChromosomeSequence> {
        self.sequences.get(name)
    }

    /// Check if a chromosome was loaded
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    /// Chromosome identifiers in file order
    #[must_use]
    pub fn chromosomes(&self) -> &[String] {
        &self.order
    }

    /// Iterate `(name, sequence)` pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChromosomeSequence)> {
        self.order
            .iter()
            .filter_map(|name| self.sequences.get(name).map(|seq| (name.as_str(), seq)))
    }

    /// Number of chromosomes
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all chromosome lengths
    #[must_use]
    pub fn total_bases(&self) -> u64 {
        self.sequences.values().map(|s| s.len() as u64).sum()
    }
}
