//! Example: building an autocompleting word list on top of a Trie.
//!
//! This shows how to create a small high-level API on top of the trie: word
//! lookup, prefix checking, completion, and walking the raw node tree.
//!
//! Run with: RUST_LOG=debug cargo run --example wordlist

use libtrie::trie::builder::build_trie;
use libtrie::trie::{Lowercase, Trie, TrieError, TrieNode};
use tracing_subscriber::EnvFilter;

/// A convenient wrapper around a trie for word validation and completion.
struct Wordlist {
    trie: Trie<Lowercase>,
}

impl Wordlist {
    fn new(trie: Trie<Lowercase>) -> Self {
        Wordlist { trie }
    }

    /// Returns true if the word is in the wordlist; foreign symbols just mean "no".
    fn is_word(&self, word: &str) -> bool {
        self.trie.contains(word).unwrap_or(false)
    }

    /// Returns up to `limit` words starting with `prefix`, in order.
    fn complete(&self, prefix: &str, limit: usize) -> Result<Vec<String>, TrieError<char>> {
        Ok(self
            .trie
            .words_with_prefix(prefix)?
            .take(limit)
            .map(String::from_iter)
            .collect())
    }

    /// Returns the length of the longest path in the tree.
    fn depth(&self) -> usize {
        fn walk(node: &TrieNode<char>) -> usize {
            node.children().map(|(_, child)| 1 + walk(child)).max().unwrap_or(0)
        }
        walk(self.trie.root())
    }
}

fn main() -> Result<(), TrieError<char>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let words = ["bake", "baked", "baker", "cake", "caked", "fake", "lake", "bar", "ball"];
    let wordlist = Wordlist::new(build_trie(Lowercase, words)?);

    // Word lookup
    println!("Word lookup:");
    for word in ["bake", "baker", "bakes", "cake", "lake", "make", "Lake"] {
        println!("  {word}: {}", if wordlist.is_word(word) { "yes" } else { "no" });
    }

    // Prefix checking
    println!("\nPrefix checking:");
    for prefix in ["ba", "cak", "ma", "fak"] {
        let found = wordlist.trie.has_prefix(prefix)?;
        println!("  {prefix}*: {}", if found { "yes" } else { "no" });
    }

    // Completion
    println!("\nCompletions:");
    for prefix in ["ba", "ca", "l"] {
        println!("  {prefix}*: {:?}", wordlist.complete(prefix, 3)?);
    }

    // Rejected input
    if let Err(err) = wordlist.complete("Ba", 3) {
        println!("\nRejected: {err}");
    }

    println!(
        "\n{} words, {} nodes, depth {}",
        wordlist.trie.len(),
        wordlist.trie.node_count(),
        wordlist.depth()
    );
    Ok(())
}
