use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::alphabet::Alphabet;
use super::char_trait::TrieChar;
use super::owned::Trie;

/// Trait for types that can be used as a word when adding to or querying a trie.
///
/// Implemented for common string and sequence types so that [`Trie::add`],
/// [`Trie::contains`] and [`build_trie`] accept them directly without manual conversion.
pub trait IntoWord<C: TrieChar> {
    /// Collects this word into a symbol buffer.
    fn collect_word(self) -> SmallVec<[C; 32]>;
}

// String types → char

impl IntoWord<char> for &str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for &&str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for &String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

// Generic sequence types → C

impl<C: TrieChar> IntoWord<C> for &[C] {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

impl<C: TrieChar> IntoWord<C> for Vec<C> {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.into_iter().collect()
    }
}

impl<C: TrieChar> IntoWord<C> for &Vec<C> {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

impl<C: TrieChar, const N: usize> IntoWord<C> for [C; N] {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.into_iter().collect()
    }
}

impl<C: TrieChar, const N: usize> IntoWord<C> for &[C; N] {
    fn collect_word(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

/// Errors that can occur when adding words to or querying a trie.
///
/// A word or prefix that is simply absent is never an error.
#[derive(Debug, Error)]
pub enum TrieError<C: TrieChar> {
    /// A word contained a symbol outside the trie's alphabet.
    ///
    /// `index` is the position of the offending symbol within the word.
    #[error("symbol {symbol:?} at index {index} is not in the alphabet")]
    InvalidSymbol {
        /// The rejected symbol.
        symbol: C,
        /// Position of the symbol in the word.
        index: usize,
    },
    /// Reading a word list failed.
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds a trie from an iterator of words.
///
/// Each word must implement [`IntoWord`], allowing this function to accept
/// `&str`, `String`, slices, vectors, arrays, or any other supported word type.
/// Words may come in any order and may repeat.
///
/// # Errors
///
/// Returns [`TrieError::InvalidSymbol`] for the first word containing a symbol
/// outside `alphabet`.
///
/// # Examples
///
/// Building from strings:
///
/// ```
/// use libtrie::trie::builder::build_trie;
/// use libtrie::trie::Lowercase;
///
/// let trie = build_trie(Lowercase, ["cherry", "apple", "banana"]).unwrap();
/// assert!(trie.contains("banana").unwrap());
/// assert!(!trie.contains("apricot").unwrap());
/// ```
///
/// Building from byte sequences:
///
/// ```
/// use libtrie::trie::builder::build_trie;
/// use libtrie::trie::Unbounded;
///
/// let words: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2, 4], vec![2, 3, 4]];
/// let trie = build_trie(Unbounded::new(), words).unwrap();
/// assert!(trie.contains([1, 2, 3]).unwrap());
/// assert!(!trie.contains([1, 2, 5]).unwrap());
/// ```
pub fn build_trie<A, W>(
    alphabet: A,
    words: impl IntoIterator<Item = W>,
) -> Result<Trie<A>, TrieError<A::Symbol>>
where
    A: Alphabet,
    W: IntoWord<A::Symbol>,
{
    let mut trie = Trie::new(alphabet);
    let added = trie.try_extend(words)?;
    debug!(added, nodes = trie.node_count(), "built trie");
    Ok(trie)
}

/// Builds a trie from a word list file.
///
/// Reads words from a text file (one word per line). Trailing whitespace is
/// trimmed, lines starting with '#' are treated as comments and ignored, and
/// empty lines are skipped.
///
/// # Errors
///
/// Returns [`TrieError::Io`] if the file can't be read and
/// [`TrieError::InvalidSymbol`] for the first word outside `alphabet`.
///
/// # Examples
///
/// ```no_run
/// use libtrie::trie::builder::build_trie_from_file;
/// use libtrie::trie::Lowercase;
///
/// let trie = build_trie_from_file(Lowercase, "dictionary.txt").unwrap();
/// ```
pub fn build_trie_from_file<A>(
    alphabet: A,
    path: impl AsRef<Path>,
) -> Result<Trie<A>, TrieError<char>>
where
    A: Alphabet<Symbol = char>,
{
    let path = path.as_ref();
    let mut trie = Trie::new(alphabet);
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    // read_line into one reused buffer instead of lines(), which allocates a
    // fresh String for every line.
    let mut buf = String::with_capacity(80);
    let mut line_no = 0usize;
    loop {
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let word = buf.trim_end();
        if !word.is_empty() && !is_comment(word) {
            if let Err(err) = trie.add(word) {
                warn!(path = %path.display(), line = line_no, %err, "rejected word list entry");
                return Err(err);
            }
        }
        buf.clear();
    }
    debug!(
        path = %path.display(),
        lines = line_no,
        words = trie.len(),
        nodes = trie.node_count(),
        "loaded word list"
    );
    Ok(trie)
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
