//! Hamming-distance neighbour search over answer vectors
//!
//! Used as a fallback candidate stream once the decision tree's own guesses
//! have been rejected.

mod index;
mod trie;

pub use index::HammingIndex;
pub use trie::HammingTrie;
