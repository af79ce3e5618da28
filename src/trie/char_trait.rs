use std::fmt::Debug;
use std::hash::Hash;

/// Trait for types that can serve as edge labels in a trie.
///
/// This trait is automatically implemented for any type satisfying all the
/// required bounds (`char`, `u8`, `u16`, `u32`, etc.).
///
/// - `Copy`: edges store labels by value
/// - `Eq + Ord`: sparse child lists are kept sorted by label
/// - `Hash`: alphabet lookup tables and shard selection
/// - `Debug`: error messages and debug printing of nodes
pub trait TrieChar: Copy + Eq + Ord + Hash + Debug {}

impl<T: Copy + Eq + Ord + Hash + Debug> TrieChar for T {}
