//! # libtrie
//!
//! A [trie](https://en.wikipedia.org/wiki/Trie) (prefix tree) string set for Rust.
//!
//! A trie stores a set of words as a tree keyed by symbols, so words with a common
//! prefix share the nodes that spell it. Membership and prefix queries take time
//! proportional to the length of the query, independent of how many words are stored.
//!
//! ## Features
//!
//! - **Generic over symbol type**: works with `char`, `u8`, `u16`, or any type implementing
//!   [`TrieChar`](trie::TrieChar)
//! - **Validated alphabets**: every word is checked against an [`Alphabet`](trie::Alphabet)
//!   and foreign symbols are reported as [`TrieError::InvalidSymbol`](trie::TrieError)
//! - **Dense or sparse nodes**: small alphabets index children directly, large ones keep
//!   a sorted child list that doesn't allocate until a node has three children
//! - **Ordered**: words iterate in lexicographic order, optionally below a prefix
//! - **Thread-safe sharing**: [`ShardedTrie`](trie::sharded::ShardedTrie) (feature
//!   `sharded`, on by default) splits the set into independently locked shards
//!
//! ## Quick Start
//!
//! ```
//! use libtrie::trie::{Lowercase, Trie};
//!
//! let mut trie = Trie::new(Lowercase);
//! assert!(!trie.add("bar").unwrap()); // first insertion
//! assert!(!trie.add("ball").unwrap());
//! assert!(trie.add("bar").unwrap()); // already present
//!
//! assert!(trie.contains("bar").unwrap());
//! assert!(!trie.contains("ba").unwrap());
//! assert!(trie.has_prefix("ba").unwrap());
//! assert!(trie.add("Bar").is_err()); // 'B' is not lowercase
//! ```
//!
//! ## Generic Usage
//!
//! The trie is generic over the edge label type:
//!
//! ```
//! use libtrie::trie::builder::build_trie;
//! use libtrie::trie::{Symbols, Unbounded};
//!
//! let trie = build_trie(Unbounded::new(), [[1u8, 2, 3], [1, 2, 4], [2, 3, 4]]).unwrap();
//! assert!(trie.contains([1, 2, 3]).unwrap());
//! assert!(!trie.contains([1, 2, 5]).unwrap());
//!
//! let dna = Symbols::new(*b"ACGT");
//! let trie = build_trie(dna, [b"GATTACA", b"CATTAGA"]).unwrap();
//! assert!(trie.has_prefix(*b"GATT").unwrap());
//! assert!(trie.contains(*b"GAUTACA").is_err());
//! ```

#![warn(missing_docs)]

/// Core trie data structure: node types, alphabets, builder, and character trait.
pub mod trie;
