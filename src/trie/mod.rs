/// Symbol sets a trie accepts and how they map onto child tables.
pub mod alphabet;
/// Word input types, trie errors, and bulk construction from word lists.
pub mod builder;
/// Trait for types that can serve as trie edge labels.
pub mod char_trait;
/// Trie node and children module containing the core tree structure.
pub mod children;
/// The trie set, which owns its whole node tree.
pub mod owned;
/// Trie split into independently locked shards for use across threads.
#[cfg(feature = "sharded")]
pub mod sharded;

pub use alphabet::{Alphabet, Label, Lowercase, Symbols, Unbounded};
pub use builder::{IntoWord, TrieError};
pub use char_trait::TrieChar;
pub use children::TrieNode;
pub use owned::{Trie, Words};
