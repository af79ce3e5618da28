use std::fmt;
use std::marker::PhantomData;

use hashbrown::HashMap;

use super::char_trait::TrieChar;

/// A validated edge label: a symbol that belongs to some [`Alphabet`], together
/// with where it lives in a node's child table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label<C> {
    /// The symbol owns slot `slot` of a fixed table with `width` slots.
    Dense {
        /// The symbol itself.
        symbol: C,
        /// Position of the symbol in the alphabet, `< width`.
        slot: usize,
        /// Number of symbols in the alphabet.
        width: usize,
    },
    /// The symbol is looked up in a sorted list of children.
    Sparse {
        /// The symbol itself.
        symbol: C,
    },
}

impl<C: Copy> Label<C> {
    /// Returns the symbol this label stands for.
    #[inline]
    pub fn symbol(&self) -> C {
        match *self {
            Label::Dense { symbol, .. } | Label::Sparse { symbol } => symbol,
        }
    }
}

/// The set of symbols a trie accepts, and how children are laid out per node.
///
/// Alphabets with a small, fixed symbol set return [`Label::Dense`] labels so that
/// every node indexes its children directly. Large or unbounded alphabets return
/// [`Label::Sparse`] labels and children are kept in a sorted list instead.
///
/// Dense slot order must agree with the symbol order (`Ord`) so that tries iterate
/// their words lexicographically regardless of layout.
pub trait Alphabet {
    /// The edge label type.
    type Symbol: TrieChar;

    /// Returns the label for `symbol`, or `None` if it is not part of the alphabet.
    fn label(&self, symbol: Self::Symbol) -> Option<Label<Self::Symbol>>;

    /// True if `symbol` is part of the alphabet.
    #[inline]
    fn contains(&self, symbol: Self::Symbol) -> bool {
        self.label(symbol).is_some()
    }
}

/// The 26 lowercase ASCII letters `'a'..='z'`, stored densely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lowercase;

impl Lowercase {
    const WIDTH: usize = 26;
}

impl Alphabet for Lowercase {
    type Symbol = char;

    #[inline]
    fn label(&self, symbol: char) -> Option<Label<char>> {
        symbol.is_ascii_lowercase().then(|| Label::Dense {
            symbol,
            slot: (symbol as u8 - b'a') as usize,
            width: Self::WIDTH,
        })
    }
}

/// An explicit, finite alphabet built from a list of symbols, stored densely.
///
/// Slots are assigned in ascending symbol order; duplicate symbols collapse.
///
/// ```
/// use libtrie::trie::{Alphabet, Symbols};
///
/// let dna: Symbols<u8> = Symbols::new(*b"ACGT");
/// assert_eq!(dna.len(), 4);
/// assert!(dna.contains(b'G'));
/// assert!(!dna.contains(b'U'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Symbols<C: TrieChar> {
    slots: HashMap<C, usize>,
}

impl<C: TrieChar> Symbols<C> {
    /// Creates an alphabet containing exactly the given symbols.
    pub fn new(symbols: impl IntoIterator<Item = C>) -> Self {
        let mut sorted: Vec<C> = symbols.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        Symbols {
            slots: sorted.into_iter().enumerate().map(|(slot, c)| (c, slot)).collect(),
        }
    }

    /// Returns the number of distinct symbols.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the alphabet has no symbols, so only the empty word can be stored.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<C: TrieChar> FromIterator<C> for Symbols<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Symbols::new(iter)
    }
}

impl<C: TrieChar> fmt::Debug for Symbols<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut symbols: Vec<_> = self.slots.iter().collect();
        symbols.sort_unstable_by_key(|&(_, slot)| *slot);
        f.debug_set().entries(symbols.into_iter().map(|(c, _)| c)).finish()
    }
}

impl<C: TrieChar> Alphabet for Symbols<C> {
    type Symbol = C;

    #[inline]
    fn label(&self, symbol: C) -> Option<Label<C>> {
        self.slots.get(&symbol).map(|&slot| Label::Dense {
            symbol,
            slot,
            width: self.slots.len(),
        })
    }
}

/// Accepts every value of `C`; children are stored sparsely.
///
/// Use this for `char` text beyond ASCII, or for raw byte strings.
pub struct Unbounded<C>(PhantomData<fn() -> C>);

impl<C> Unbounded<C> {
    /// Creates the alphabet.
    pub const fn new() -> Self {
        Unbounded(PhantomData)
    }
}

impl<C> Default for Unbounded<C> {
    fn default() -> Self {
        Unbounded::new()
    }
}

impl<C> Clone for Unbounded<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Unbounded<C> {}

impl<C> fmt::Debug for Unbounded<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unbounded<{}>", std::any::type_name::<C>())
    }
}

impl<C: TrieChar> Alphabet for Unbounded<C> {
    type Symbol = C;

    #[inline]
    fn label(&self, symbol: C) -> Option<Label<C>> {
        Some(Label::Sparse { symbol })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lowercase_slots_follow_letters() {
        assert_eq!(
            Lowercase.label('a'),
            Some(Label::Dense { symbol: 'a', slot: 0, width: 26 })
        );
        assert_eq!(
            Lowercase.label('z'),
            Some(Label::Dense { symbol: 'z', slot: 25, width: 26 })
        );
    }

    #[test]
    fn lowercase_rejects_everything_else() {
        for ch in ['A', 'Z', '`', '{', '0', ' ', 'é', 'ß'] {
            assert!(!Lowercase.contains(ch), "{ch:?}");
        }
    }

    #[test]
    fn symbols_are_sorted_and_deduplicated() {
        let alphabet = Symbols::new(['t', 'g', 'a', 'c', 'a', 'g']);
        assert_eq!(alphabet.len(), 4);
        let slots: Vec<_> = ['a', 'c', 'g', 't']
            .into_iter()
            .map(|ch| match alphabet.label(ch) {
                Some(Label::Dense { slot, width, .. }) => (slot, width),
                other => panic!("unexpected label {other:?}"),
            })
            .collect();
        assert_eq!(slots, [(0, 4), (1, 4), (2, 4), (3, 4)]);
        assert_eq!(alphabet.label('u'), None);
    }

    #[test]
    fn symbols_debug_lists_in_slot_order() {
        let alphabet: Symbols<u8> = b"TGCA".iter().copied().collect();
        assert_eq!(format!("{alphabet:?}"), "{65, 67, 71, 84}");
    }

    #[test]
    fn empty_symbols() {
        let alphabet = Symbols::<char>::new([]);
        assert!(alphabet.is_empty());
        assert!(!alphabet.contains('a'));
    }

    #[test]
    fn unbounded_accepts_anything() {
        let alphabet = Unbounded::<char>::new();
        for ch in ['a', 'Ö', '授', '\0', char::MAX] {
            assert_eq!(alphabet.label(ch), Some(Label::Sparse { symbol: ch }));
        }
    }
}
