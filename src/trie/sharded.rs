//! A trie that can be shared between threads.
//!
//! Words are distributed over independently locked sub-tries by their first
//! symbol, so writers adding words that start differently rarely contend.

use std::fmt;
use std::hash::BuildHasher;

use hashbrown::DefaultHashBuilder;
use parking_lot::RwLock;
use tracing::debug;

use super::alphabet::Alphabet;
use super::builder::{IntoWord, TrieError};
use super::owned::Trie;

/// A set of words that can be read and extended through `&self`.
///
/// Every word lives in exactly one shard, chosen by hashing its first symbol;
/// the empty word lives in the first shard. Each operation locks a single
/// shard, except [`len`](ShardedTrie::len) and
/// [`into_words`](ShardedTrie::into_words) which visit all of them.
///
/// # Examples
///
/// ```
/// use std::thread;
/// use libtrie::trie::sharded::ShardedTrie;
/// use libtrie::trie::Lowercase;
///
/// let trie = ShardedTrie::new(Lowercase, 4);
/// thread::scope(|s| {
///     s.spawn(|| trie.add("left").unwrap());
///     s.spawn(|| trie.add("right").unwrap());
/// });
/// assert!(trie.contains("left").unwrap());
/// assert_eq!(trie.len(), 2);
/// ```
pub struct ShardedTrie<A: Alphabet + Clone> {
    shards: Box<[RwLock<Trie<A>>]>,
    hasher: DefaultHashBuilder,
}

impl<A: Alphabet + Clone> ShardedTrie<A> {
    /// Creates an empty trie split into `shards` sub-tries (at least one).
    pub fn new(alphabet: A, shards: usize) -> Self {
        let shards = shards.max(1);
        debug!(shards, "creating sharded trie");
        ShardedTrie {
            shards: (0..shards)
                .map(|_| RwLock::new(Trie::new(alphabet.clone())))
                .collect(),
            hasher: DefaultHashBuilder::default(),
        }
    }

    /// Returns the number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, word: &[A::Symbol]) -> &RwLock<Trie<A>> {
        let index = match word.first() {
            None => 0,
            Some(symbol) => (self.hasher.hash_one(symbol) % self.shards.len() as u64) as usize,
        };
        &self.shards[index]
    }

    /// Adds a word; returns `true` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::InvalidSymbol`] if the word contains a symbol outside
    /// the alphabet.
    pub fn add(&self, word: impl IntoWord<A::Symbol>) -> Result<bool, TrieError<A::Symbol>> {
        let word = word.collect_word();
        self.shard(&word).write().add(&word[..])
    }

    /// Returns true if `word` was added.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::InvalidSymbol`] if the word contains a symbol outside
    /// the alphabet.
    pub fn contains(&self, word: impl IntoWord<A::Symbol>) -> Result<bool, TrieError<A::Symbol>> {
        let word = word.collect_word();
        self.shard(&word).read().contains(&word[..])
    }

    /// Returns true if some stored word starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::InvalidSymbol`] if the prefix contains a symbol outside
    /// the alphabet.
    pub fn has_prefix(&self, prefix: impl IntoWord<A::Symbol>) -> Result<bool, TrieError<A::Symbol>> {
        let prefix = prefix.collect_word();
        if prefix.is_empty() {
            return Ok(true);
        }
        self.shard(&prefix).read().has_prefix(&prefix[..])
    }

    /// Returns the number of stored words across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    /// True if no shard holds a word.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    /// Returns the total number of nodes, counting each shard's root.
    pub fn node_count(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().node_count()).sum()
    }

    /// Consumes the trie and returns every stored word in lexicographic order.
    pub fn into_words(self) -> Vec<Vec<A::Symbol>> {
        let mut words: Vec<_> = self
            .shards
            .into_vec()
            .into_iter()
            .flat_map(|shard| shard.into_inner().words().collect::<Vec<_>>())
            .collect();
        words.sort_unstable();
        words
    }
}

impl<A: Alphabet + Clone> fmt::Debug for ShardedTrie<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedTrie")
            .field("shards", &self.shards.len())
            .field("words", &self.len())
            .finish()
    }
}
