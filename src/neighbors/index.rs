//! Nearest-neighbour candidates by Hamming distance

use super::trie::HammingTrie;
use crate::catalog::Catalog;
use tracing::debug;

/// Trie over every entry's answer vector plus a ranked candidate stack
///
/// A query fills the stack with every entry at distance 2 and then every
/// entry at distance 1, so popping yields the closer entries first.
///
/// # Examples
/// ```
/// use twenty_questions::catalog::loader::parse_catalog;
/// use twenty_questions::neighbors::HammingIndex;
///
/// let catalog = parse_catalog("A\n1 0 1\nB\n1 1 1\nC\n0 1 0\n", "thing\nQ1\nQ2\nQ3\n").unwrap();
/// let mut index = HammingIndex::new(&catalog);
///
/// index.find_neighbors_of_entry(0);
/// assert_eq!(index.get_neighbor(), Some("B"));
/// assert_eq!(index.get_neighbor(), None);
/// ```
pub struct HammingIndex<'a> {
    catalog: &'a Catalog,
    trie: HammingTrie,
    pending: Vec<usize>,
}

impl<'a> HammingIndex<'a> {
    /// Build the trie over every entry of `catalog`
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        let mut trie = HammingTrie::new(catalog.question_count());
        for (index, entry) in catalog.entries().iter().enumerate() {
            trie.insert(entry.answers(), index);
        }

        debug!(
            entries = catalog.entry_count(),
            nodes = trie.node_count(),
            "hamming trie built"
        );

        Self {
            catalog,
            trie,
            pending: Vec::new(),
        }
    }

    /// Entries whose vector is exactly `bits`
    #[must_use]
    pub fn lookup(&self, bits: &[bool]) -> &[usize] {
        self.trie.lookup(bits)
    }

    /// Replace the candidate stack with the neighbours of `vector`
    ///
    /// Entries at distance 1 come out of [`next_neighbor`](Self::next_neighbor)
    /// before entries at distance 2. Entries with exactly `vector` are not
    /// candidates. Returns the number of candidates found.
    pub fn find_neighbors_of(&mut self, vector: &[bool]) -> usize {
        self.pending.clear();

        let width = self.trie.width();
        if vector.len() != width {
            return 0;
        }

        for i in 0..width {
            for j in (i + 1)..width {
                let found = self
                    .trie
                    .lookup_with(|p| if p == i || p == j { !vector[p] } else { vector[p] });
                self.pending.extend_from_slice(found);
            }
        }

        let distance_two = self.pending.len();

        for i in 0..width {
            let found = self
                .trie
                .lookup_with(|p| if p == i { !vector[p] } else { vector[p] });
            self.pending.extend_from_slice(found);
        }

        debug!(
            distance_one = self.pending.len() - distance_two,
            distance_two, "neighbours found"
        );

        self.pending.len()
    }

    /// Replace the candidate stack with the neighbours of a catalog entry
    ///
    /// # Panics
    /// Panics if `entry` is out of range
    pub fn find_neighbors_of_entry(&mut self, entry: usize) -> usize {
        let catalog = self.catalog;
        self.find_neighbors_of(catalog.entry(entry).answers())
    }

    /// Next candidate entry index, closest first
    pub fn next_neighbor(&mut self) -> Option<usize> {
        self.pending.pop()
    }

    /// Next candidate name, closest first
    ///
    /// `None` once every neighbour has been handed out.
    pub fn get_neighbor(&mut self) -> Option<&'a str> {
        let catalog = self.catalog;
        self.next_neighbor().map(|e| catalog.entry(e).name())
    }

    /// Candidates not yet handed out
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}
