//! Binary trie keyed by answer vectors

/// One trie node; terminals at full depth hold entry indices
#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: [Option<usize>; 2],
    entries: Vec<usize>,
}

/// Arena-backed binary trie over fixed-length bit vectors
///
/// Every entry inserted under the same vector is kept, in insertion order.
#[derive(Debug, Clone)]
pub struct HammingTrie {
    nodes: Vec<TrieNode>,
    width: usize,
}

impl HammingTrie {
    /// Empty trie for vectors of `width` bits
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            width,
        }
    }

    /// Vector length this trie is keyed on
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of allocated nodes, root included
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Store `entry` under `bits`
    ///
    /// # Panics
    /// Panics if `bits` is not exactly `width` long
    pub fn insert(&mut self, bits: &[bool], entry: usize) {
        assert_eq!(bits.len(), self.width, "vector width mismatch");

        let mut node = 0;
        for &bit in bits {
            let slot = usize::from(bit);
            node = if let Some(child) = self.nodes[node].children[slot] {
                child
            } else {
                let child = self.nodes.len();
                self.nodes.push(TrieNode::default());
                self.nodes[node].children[slot] = Some(child);
                child
            };
        }

        self.nodes[node].entries.push(entry);
    }

    /// Entries stored under exactly `bits`
    #[must_use]
    pub fn lookup(&self, bits: &[bool]) -> &[usize] {
        if bits.len() != self.width {
            return &[];
        }
        self.lookup_with(|position| bits[position])
    }

    /// Entries stored under the vector whose bit `i` is `bit(i)`
    pub(crate) fn lookup_with(&self, bit: impl Fn(usize) -> bool) -> &[usize] {
        let mut node = 0;
        for position in 0..self.width {
            match self.nodes[node].children[usize::from(bit(position))] {
                Some(child) => node = child,
                None => return &[],
            }
        }
        &self.nodes[node].entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_inserted_vectors() {
        let mut trie = HammingTrie::new(3);
        trie.insert(&[true, false, true], 0);
        trie.insert(&[false, false, true], 1);

        assert_eq!(trie.lookup(&[true, false, true]), &[0]);
        assert_eq!(trie.lookup(&[false, false, true]), &[1]);
        assert!(trie.lookup(&[true, true, true]).is_empty());
    }

    #[test]
    fn collisions_keep_every_entry() {
        let mut trie = HammingTrie::new(2);
        trie.insert(&[true, false], 4);
        trie.insert(&[true, false], 7);
        assert_eq!(trie.lookup(&[true, false]), &[4, 7]);
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let mut trie = HammingTrie::new(3);
        trie.insert(&[true, true, true], 0);
        trie.insert(&[true, true, false], 1);
        // root + two shared + two leaves
        assert_eq!(trie.node_count(), 5);
    }

    #[test]
    fn wrong_width_lookup_is_empty() {
        let mut trie = HammingTrie::new(2);
        trie.insert(&[true, true], 0);
        assert!(trie.lookup(&[true]).is_empty());
        assert!(trie.lookup(&[true, true, true]).is_empty());
    }
}
