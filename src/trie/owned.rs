use std::fmt;

use smallvec::SmallVec;
use tracing::trace;

use super::alphabet::{Alphabet, Label, Lowercase};
use super::builder::{IntoWord, TrieError};
use super::char_trait::TrieChar;
use super::children::TrieNode;

/// A set of words stored as a prefix tree.
///
/// Words that share a prefix share the nodes spelling it. Every node is owned by
/// its parent and the root by the trie, so dropping the trie releases every node
/// exactly once. Words can be added but not removed.
///
/// All operations validate their input against the trie's [`Alphabet`] before
/// touching the tree: a word with a foreign symbol is rejected with
/// [`TrieError::InvalidSymbol`] and leaves the trie unchanged.
///
/// # Examples
///
/// ```
/// use libtrie::trie::{Lowercase, Trie};
///
/// let mut trie = Trie::new(Lowercase);
/// assert!(!trie.add("bar").unwrap());
/// assert!(!trie.add("ball").unwrap());
/// assert!(trie.add("bar").unwrap()); // already present
///
/// assert!(trie.contains("ball").unwrap());
/// assert!(!trie.contains("ba").unwrap());
/// assert!(trie.has_prefix("ba").unwrap());
/// assert!(trie.contains("Ball").is_err());
/// ```
#[derive(Clone)]
pub struct Trie<A: Alphabet = Lowercase> {
    alphabet: A,
    root: TrieNode<A::Symbol>,
    /// Number of stored words.
    len: usize,
    /// Number of nodes, root included.
    nodes: usize,
}

type Labels<C> = SmallVec<[Label<C>; 32]>;

impl<A: Alphabet> Trie<A> {
    /// Creates an empty trie holding only the root node.
    pub fn new(alphabet: A) -> Self {
        Trie {
            alphabet,
            root: TrieNode::new(),
            len: 0,
            nodes: 1,
        }
    }

    /// Returns the alphabet this trie accepts.
    pub fn alphabet(&self) -> &A {
        &self.alphabet
    }

    /// Returns a reference to the root node.
    ///
    /// Use [`children()`](TrieNode::children) and
    /// [`is_terminal()`](TrieNode::is_terminal) to walk the tree.
    pub fn root(&self) -> &TrieNode<A::Symbol> {
        &self.root
    }

    /// Returns the number of stored words.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no word, not even the empty one, is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes in the tree, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Maps every symbol of `word` to its label, failing on the first symbol
    /// outside the alphabet.
    fn path(&self, word: impl IntoWord<A::Symbol>) -> Result<Labels<A::Symbol>, TrieError<A::Symbol>> {
        word.collect_word()
            .into_iter()
            .enumerate()
            .map(|(index, symbol)| {
                self.alphabet.label(symbol).ok_or_else(|| {
                    trace!(?symbol, index, "symbol rejected by alphabet");
                    TrieError::InvalidSymbol { symbol, index }
                })
            })
            .collect()
    }

    /// Follows `path` from the root, stopping as soon as an edge is missing.
    fn find(&self, path: &[Label<A::Symbol>]) -> Option<&TrieNode<A::Symbol>> {
        path.iter().try_fold(&self.root, |node, &label| node.get(label))
    }

    /// Adds a word to the trie.
    ///
    /// Returns `true` if the word was already present (the trie is unchanged),
    /// `false` if this is its first insertion. The empty word is valid and is
    /// recorded on the root.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::InvalidSymbol`] if the word contains a symbol outside
    /// the alphabet. Nothing is added in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtrie::trie::{Lowercase, Trie};
    ///
    /// let mut trie = Trie::new(Lowercase);
    /// assert!(!trie.add("cat").unwrap());
    /// assert!(trie.add("cat").unwrap());
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn add(&mut self, word: impl IntoWord<A::Symbol>) -> Result<bool, TrieError<A::Symbol>> {
        let path = self.path(word)?;
        let mut node = &mut self.root;
        let mut created = 0;
        for label in path {
            let (child, new) = node.get_or_insert(label);
            created += usize::from(new);
            node = child;
        }
        let existed = node.mark_terminal();
        self.nodes += created;
        if !existed {
            self.len += 1;
        }
        Ok(existed)
    }

    /// Adds every word from `words`, returning how many of them were new.
    ///
    /// # Errors
    ///
    /// Stops at the first word with a symbol outside the alphabet. Words before
    /// it remain added.
    pub fn try_extend<W: IntoWord<A::Symbol>>(
        &mut self,
        words: impl IntoIterator<Item = W>,
    ) -> Result<usize, TrieError<A::Symbol>> {
        let mut added = 0;
        for word in words {
            added += usize::from(!self.add(word)?);
        }
        Ok(added)
    }

    /// Returns true if `word` was added to the trie.
    ///
    /// A path that exists only as the prefix of longer words is not a member.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::InvalidSymbol`] if the word contains a symbol outside
    /// the alphabet.
    pub fn contains(&self, word: impl IntoWord<A::Symbol>) -> Result<bool, TrieError<A::Symbol>> {
        let path = self.path(word)?;
        Ok(self.find(&path).is_some_and(TrieNode::is_terminal))
    }

    /// Returns true if some stored word starts with `prefix`.
    ///
    /// Every trie has the empty prefix, even an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::InvalidSymbol`] if the prefix contains a symbol outside
    /// the alphabet.
    pub fn has_prefix(&self, prefix: impl IntoWord<A::Symbol>) -> Result<bool, TrieError<A::Symbol>> {
        let path = self.path(prefix)?;
        Ok(self.find(&path).is_some())
    }

    /// Returns the longest stored word that is a prefix of `word` (or `word` itself).
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::InvalidSymbol`] if the word contains a symbol outside
    /// the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtrie::trie::{Lowercase, Trie};
    ///
    /// let mut trie = Trie::new(Lowercase);
    /// trie.add("ball").unwrap();
    /// trie.add("balloon").unwrap();
    /// let found = trie.longest_prefix_of("balloons").unwrap();
    /// assert_eq!(found, Some("balloon".chars().collect()));
    /// assert_eq!(trie.longest_prefix_of("bal").unwrap(), None);
    /// ```
    pub fn longest_prefix_of(
        &self,
        word: impl IntoWord<A::Symbol>,
    ) -> Result<Option<Vec<A::Symbol>>, TrieError<A::Symbol>> {
        let path = self.path(word)?;
        let mut node = &self.root;
        let mut longest = node.is_terminal().then_some(0);
        for (depth, &label) in path.iter().enumerate() {
            match node.get(label) {
                Some(child) => node = child,
                None => break,
            }
            if node.is_terminal() {
                longest = Some(depth + 1);
            }
        }
        Ok(longest.map(|len| path[..len].iter().map(Label::symbol).collect()))
    }

    /// Returns an iterator over all stored words in lexicographic order.
    pub fn words(&self) -> Words<'_, A::Symbol> {
        Words::new(&self.root, Vec::new())
    }

    /// Returns an iterator, in lexicographic order, over the stored words that
    /// start with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::InvalidSymbol`] if the prefix contains a symbol outside
    /// the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtrie::trie::builder::build_trie;
    /// use libtrie::trie::Lowercase;
    ///
    /// let trie = build_trie(Lowercase, ["bake", "baker", "cake", "bakes"]).unwrap();
    /// let words: Vec<String> = trie
    ///     .words_with_prefix("bake")
    ///     .unwrap()
    ///     .map(String::from_iter)
    ///     .collect();
    /// assert_eq!(words, ["bake", "baker", "bakes"]);
    /// ```
    pub fn words_with_prefix(
        &self,
        prefix: impl IntoWord<A::Symbol>,
    ) -> Result<Words<'_, A::Symbol>, TrieError<A::Symbol>> {
        let path = self.path(prefix)?;
        Ok(match self.find(&path) {
            Some(node) => Words::new(node, path.iter().map(Label::symbol).collect()),
            None => Words::empty(),
        })
    }

    /// Removes every word, releasing all nodes except the root.
    pub fn clear(&mut self) {
        self.root.clear();
        self.len = 0;
        self.nodes = 1;
    }
}

impl<A: Alphabet + Default> Default for Trie<A> {
    fn default() -> Self {
        Trie::new(A::default())
    }
}

impl<A: Alphabet> fmt::Debug for Trie<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("words", &self.len)
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<'t, A: Alphabet> IntoIterator for &'t Trie<A> {
    type Item = Vec<A::Symbol>;
    type IntoIter = Words<'t, A::Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.words()
    }
}

/// A lexicographic iterator over the words below a node.
///
/// Returned by [`Trie::words`] and [`Trie::words_with_prefix`]. A word is
/// yielded before any longer word it is a prefix of.
#[derive(Clone)]
pub struct Words<'t, C: TrieChar> {
    /// Nodes still to visit: (prefix length before the node, edge label, node).
    stack: Vec<(usize, Option<C>, &'t TrieNode<C>)>,
    prefix: Vec<C>,
}

impl<'t, C: TrieChar> Words<'t, C> {
    fn new(node: &'t TrieNode<C>, prefix: Vec<C>) -> Self {
        Words {
            stack: vec![(prefix.len(), None, node)],
            prefix,
        }
    }

    fn empty() -> Self {
        Words {
            stack: Vec::new(),
            prefix: Vec::new(),
        }
    }
}

impl<C: TrieChar> Iterator for Words<'_, C> {
    type Item = Vec<C>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, label, node)) = self.stack.pop() {
            self.prefix.truncate(depth);
            self.prefix.extend(label);
            let depth = self.prefix.len();
            // Pushed in reverse so the smallest label is visited first.
            self.stack
                .extend(node.children().rev().map(|(c, child)| (depth, Some(c), child)));
            if node.is_terminal() {
                return Some(self.prefix.clone());
            }
        }
        None
    }
}

impl<C: TrieChar> std::iter::FusedIterator for Words<'_, C> {}
