use std::fmt;
use std::iter::Flatten;
use std::slice;

use smallvec::SmallVec;

use super::alphabet::Label;
use super::char_trait::TrieChar;

type Edge<C> = (C, Box<TrieNode<C>>);

/// The children of a TrieNode.
///
/// Sparse children are kept sorted by label and don't allocate until there are
/// at least three of them. Dense children are a fixed table with one slot per
/// alphabet symbol, allocated when the first child is added.
pub(crate) enum Children<C: TrieChar> {
    /// Sorted (label, child) pairs.
    Sparse(SmallVec<[Edge<C>; 2]>),
    /// One slot per alphabet position.
    Dense(Box<[Option<Edge<C>>]>),
}

impl<C: TrieChar> Default for Children<C> {
    fn default() -> Self {
        Children::Sparse(SmallVec::new())
    }
}

impl<C: TrieChar> Children<C> {
    fn dense(width: usize) -> Self {
        Children::Dense((0..width).map(|_| None).collect())
    }

    /// Returns the child for `label`, or None if no such edge exists.
    #[inline]
    fn get(&self, label: Label<C>) -> Option<&TrieNode<C>> {
        let edge = match (self, label) {
            (Children::Dense(slots), Label::Dense { slot, .. }) => slots.get(slot)?.as_ref(),
            (Children::Dense(slots), Label::Sparse { symbol }) => {
                slots.iter().flatten().find(|(c, _)| *c == symbol)
            }
            (Children::Sparse(edges), label) => {
                let symbol = label.symbol();
                edges
                    .binary_search_by(|(c, _)| c.cmp(&symbol))
                    .ok()
                    .and_then(|i| edges.get(i))
            }
        };
        edge.map(|(_, node)| &**node)
    }

    /// Returns the child for `label`, adding an empty one if absent.
    ///
    /// The flag is true if the child was created by this call. A dense table
    /// that can't hold `label` is converted to the sparse representation first.
    fn get_or_insert(&mut self, label: Label<C>) -> (&mut TrieNode<C>, bool) {
        let symbol = label.symbol();
        if let Label::Dense { width, .. } = label {
            if self.is_empty() && matches!(self, Children::Sparse(_)) {
                *self = Children::dense(width);
            }
        }
        let dense_slot = match (&*self, label) {
            (Children::Dense(slots), Label::Dense { slot, .. }) if slot < slots.len() => Some(slot),
            _ => None,
        };
        match (dense_slot, self) {
            (Some(slot), Children::Dense(slots)) => {
                let entry = &mut slots[slot];
                let created = entry.is_none();
                let (_, node) = entry.get_or_insert_with(|| (symbol, Box::default()));
                (&mut **node, created)
            }
            (_, children) => sparse_get_or_insert(children.sparse_mut(), symbol),
        }
    }

    /// Converts to the sparse representation if needed and returns the edge list.
    fn sparse_mut(&mut self) -> &mut SmallVec<[Edge<C>; 2]> {
        if let Children::Dense(slots) = self {
            let edges = slots.iter_mut().filter_map(Option::take).collect();
            *self = Children::Sparse(edges);
        }
        match self {
            Children::Sparse(edges) => edges,
            Children::Dense(_) => unreachable!("dense children were just converted"),
        }
    }

    /// Returns children with the same labels and layout as `self`, pointing at
    /// `clones` instead, which must hold one node per child in label order.
    fn with_clones(&self, clones: Vec<TrieNode<C>>) -> Children<C> {
        let mut clones = clones.into_iter().map(Box::new);
        match self {
            Children::Sparse(edges) => {
                Children::Sparse(edges.iter().zip(clones).map(|((c, _), node)| (*c, node)).collect())
            }
            Children::Dense(slots) => Children::Dense(
                slots
                    .iter()
                    .map(|slot| {
                        let (c, _) = slot.as_ref()?;
                        clones.next().map(|node| (*c, node))
                    })
                    .collect(),
            ),
        }
    }

    /// Moves every child node into `out`, leaving no children behind.
    fn drain_into(&mut self, out: &mut Vec<Box<TrieNode<C>>>) {
        match self {
            Children::Sparse(edges) => out.extend(edges.drain(..).map(|(_, node)| node)),
            Children::Dense(slots) => {
                out.extend(slots.iter_mut().filter_map(Option::take).map(|(_, node)| node))
            }
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Children::Sparse(edges) => edges.is_empty(),
            Children::Dense(slots) => slots.iter().all(Option::is_none),
        }
    }
}

fn sparse_get_or_insert<C: TrieChar>(
    edges: &mut SmallVec<[Edge<C>; 2]>,
    symbol: C,
) -> (&mut TrieNode<C>, bool) {
    match edges.binary_search_by(|(c, _)| c.cmp(&symbol)) {
        Ok(pos) => (&mut *edges[pos].1, false),
        Err(pos) => {
            edges.insert(pos, (symbol, Box::default()));
            (&mut *edges[pos].1, true)
        }
    }
}

/// An iterator over the children of a TrieNode, in ascending label order.
#[derive(Clone)]
pub struct ChildIter<'t, C: TrieChar> {
    inner: ChildIterInner<'t, C>,
}

#[derive(Clone)]
enum ChildIterInner<'t, C: TrieChar> {
    Sparse(slice::Iter<'t, Edge<C>>),
    Dense(Flatten<slice::Iter<'t, Option<Edge<C>>>>),
}

impl<'t, C: TrieChar> Iterator for ChildIter<'t, C> {
    type Item = (C, &'t TrieNode<C>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (c, node) = match &mut self.inner {
            ChildIterInner::Sparse(edges) => edges.next()?,
            ChildIterInner::Dense(slots) => slots.next()?,
        };
        Some((*c, &**node))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            ChildIterInner::Sparse(edges) => edges.size_hint(),
            ChildIterInner::Dense(slots) => slots.size_hint(),
        }
    }
}

impl<C: TrieChar> DoubleEndedIterator for ChildIter<'_, C> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let (c, node) = match &mut self.inner {
            ChildIterInner::Sparse(edges) => edges.next_back()?,
            ChildIterInner::Dense(slots) => slots.next_back()?,
        };
        Some((*c, &**node))
    }
}

/// A node in the prefix tree.
///
/// Every node exclusively owns its children, so dropping a node releases its
/// whole subtree. The release walks the subtree with an explicit stack, so
/// arbitrarily deep tries can be dropped without exhausting the call stack.
/// Cloning walks the tree the same way.
pub struct TrieNode<C: TrieChar> {
    children: Children<C>,
    terminal: bool,
}

impl<C: TrieChar> Default for TrieNode<C> {
    fn default() -> Self {
        TrieNode::new()
    }
}

impl<C: TrieChar> TrieNode<C> {
    /// Creates a node with no children that does not end a word.
    pub fn new() -> Self {
        TrieNode {
            children: Children::default(),
            terminal: false,
        }
    }

    /// True if the path from the root to this node spells a stored word.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Returns an iterator over all children of this node, in label order.
    #[inline]
    pub fn children(&self) -> ChildIter<'_, C> {
        let inner = match &self.children {
            Children::Sparse(edges) => ChildIterInner::Sparse(edges.iter()),
            Children::Dense(slots) => ChildIterInner::Dense(slots.iter().flatten()),
        };
        ChildIter { inner }
    }

    /// Returns the number of children.
    pub fn child_count(&self) -> usize {
        match &self.children {
            Children::Sparse(edges) => edges.len(),
            Children::Dense(slots) => slots.iter().flatten().count(),
        }
    }

    /// True if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the node that `label`'s edge leads to, or None if no such edge exists.
    #[inline]
    pub(crate) fn get(&self, label: Label<C>) -> Option<&TrieNode<C>> {
        self.children.get(label)
    }

    /// Returns the child for `label`, creating it if absent.
    ///
    /// The flag is true if the child was created by this call.
    #[inline]
    pub(crate) fn get_or_insert(&mut self, label: Label<C>) -> (&mut TrieNode<C>, bool) {
        self.children.get_or_insert(label)
    }

    /// Sets the terminal flag and returns its previous value.
    #[inline]
    pub(crate) fn mark_terminal(&mut self) -> bool {
        std::mem::replace(&mut self.terminal, true)
    }

    /// Detaches and releases every descendant, leaving a bare node.
    pub(crate) fn clear(&mut self) {
        self.terminal = false;
        let mut stack = Vec::new();
        self.children.drain_into(&mut stack);
        release(stack);
        self.children = Children::default();
    }
}

impl<C: TrieChar> Clone for TrieNode<C> {
    fn clone(&self) -> Self {
        // Post-order walk: a node is copied once copies of all its children sit
        // on top of `built`, in label order.
        let mut pending = vec![(self, false)];
        let mut built: Vec<TrieNode<C>> = Vec::new();
        while let Some((node, expanded)) = pending.pop() {
            if expanded {
                let first_child = built.len() - node.child_count();
                let clones = built.split_off(first_child);
                built.push(TrieNode {
                    children: node.children.with_clones(clones),
                    terminal: node.terminal,
                });
            } else {
                pending.push((node, true));
                pending.extend(node.children().rev().map(|(_, child)| (child, false)));
            }
        }
        built.pop().unwrap_or_default()
    }
}

impl<C: TrieChar> fmt::Debug for TrieNode<C> {
    /// Shows this node only; children are listed by label.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: SmallVec<[C; 8]> = self.children().map(|(c, _)| c).collect();
        f.debug_struct("TrieNode")
            .field("terminal", &self.terminal)
            .field("children", &labels)
            .finish()
    }
}

impl<C: TrieChar> Drop for TrieNode<C> {
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }
        let mut stack = Vec::new();
        self.children.drain_into(&mut stack);
        release(stack);
    }
}

/// Drops nodes depth-first, detaching each node's children before the node
/// itself is freed so no drop recurses.
fn release<C: TrieChar>(mut stack: Vec<Box<TrieNode<C>>>) {
    while let Some(mut node) = stack.pop() {
        node.children.drain_into(&mut stack);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sparse(c: char) -> Label<char> {
        Label::Sparse { symbol: c }
    }

    fn dense(c: char) -> Label<char> {
        Label::Dense {
            symbol: c,
            slot: (c as u8 - b'a') as usize,
            width: 26,
        }
    }

    fn labels(n: &TrieNode<char>) -> Vec<char> {
        n.children().map(|(c, _)| c).collect()
    }

    #[test]
    fn no_children() {
        let n = TrieNode::<char>::new();
        assert!(n.children().next().is_none());
        assert_eq!(n.child_count(), 0);
        assert!(n.is_leaf());
        assert!(!n.is_terminal());
    }

    #[test]
    fn one_child() {
        let mut n = TrieNode::new();
        let (_, created) = n.get_or_insert(sparse('a'));
        assert!(created);
        assert_eq!(labels(&n), ['a']);
        assert_eq!(n.child_count(), 1);
        assert!(matches!(&n.children, Children::Sparse(e) if !e.spilled()));
    }

    #[test]
    fn two_children() {
        let mut n = TrieNode::new();
        n.get_or_insert(sparse('b'));
        n.get_or_insert(sparse('a'));
        assert_eq!(labels(&n), ['a', 'b']);
        assert_eq!(n.child_count(), 2);
        assert!(matches!(&n.children, Children::Sparse(e) if !e.spilled()));
    }

    #[test]
    fn three_children_are_sorted() {
        let mut n = TrieNode::new();
        for c in ['c', 'a', 'b'] {
            n.get_or_insert(sparse(c));
        }
        assert_eq!(labels(&n), ['a', 'b', 'c']);
        assert_eq!(n.child_count(), 3);
        assert!(matches!(&n.children, Children::Sparse(e) if e.spilled()));
    }

    #[test]
    fn existing_child_is_returned() {
        let mut n = TrieNode::new();
        n.get_or_insert(sparse('x')).0.mark_terminal();
        let (child, created) = n.get_or_insert(sparse('x'));
        assert!(!created);
        assert!(child.is_terminal());
        assert_eq!(n.child_count(), 1);
    }

    #[test]
    fn dense_children_use_slots() {
        let mut n = TrieNode::new();
        for c in ['q', 'b', 'z'] {
            assert!(n.get_or_insert(dense(c)).1);
        }
        match &n.children {
            Children::Dense(slots) => assert_eq!(slots.len(), 26),
            Children::Sparse(_) => panic!("expected dense children"),
        }
        assert_eq!(labels(&n), ['b', 'q', 'z']);
        assert!(n.get(dense('q')).is_some());
        assert!(n.get(dense('a')).is_none());
        assert_eq!(n.child_count(), 3);
    }

    #[test]
    fn dense_table_accepts_sparse_label() {
        let mut n = TrieNode::new();
        n.get_or_insert(dense('m'));
        assert!(n.get(sparse('m')).is_some());
        n.get_or_insert(sparse('!'));
        assert!(matches!(n.children, Children::Sparse(_)));
        assert_eq!(labels(&n), ['!', 'm']);
    }

    #[test]
    fn children_iterate_backwards() {
        let mut n = TrieNode::new();
        for c in ['a', 'b', 'c'] {
            n.get_or_insert(dense(c));
        }
        let rev: Vec<char> = n.children().rev().map(|(c, _)| c).collect();
        assert_eq!(rev, ['c', 'b', 'a']);
    }

    #[test]
    fn a_thousand_children() {
        let mut n = TrieNode::new();
        let letters: Vec<char> = (0..).filter_map(std::char::from_u32).take(1000).collect();
        for &ch in letters.iter().rev() {
            n.get_or_insert(sparse(ch));
        }
        let mut children = n.children();
        for ch in letters {
            assert_eq!(children.next().map(|(c, _)| c), Some(ch));
        }
        assert!(children.next().is_none());
        assert_eq!(n.child_count(), 1000);
    }

    #[test]
    fn clear_detaches_everything() {
        let mut n = TrieNode::new();
        n.mark_terminal();
        n.get_or_insert(dense('a')).0.get_or_insert(dense('b'));
        n.clear();
        assert!(n.is_leaf());
        assert!(!n.is_terminal());
        assert!(matches!(&n.children, Children::Sparse(e) if e.is_empty()));
    }

    #[test]
    fn clone_keeps_labels_and_layout() {
        let mut n = TrieNode::new();
        n.get_or_insert(dense('c')).0.mark_terminal();
        n.get_or_insert(dense('a')).0.get_or_insert(sparse('x')).0.mark_terminal();
        let copy = n.clone();
        assert!(matches!(&copy.children, Children::Dense(slots) if slots.len() == 26));
        assert_eq!(labels(&copy), ['a', 'c']);
        let a = copy.get(dense('a')).unwrap();
        assert!(!a.is_terminal());
        assert!(matches!(&a.children, Children::Sparse(_)));
        assert!(a.get(sparse('x')).unwrap().is_terminal());
        assert!(copy.get(dense('c')).unwrap().is_terminal());
    }

    #[test]
    fn debug_lists_child_labels() {
        let mut n = TrieNode::new();
        n.mark_terminal();
        n.get_or_insert(sparse('b'));
        n.get_or_insert(sparse('a')).0.get_or_insert(sparse('z'));
        assert_eq!(
            format!("{n:?}"),
            "TrieNode { terminal: true, children: ['a', 'b'] }"
        );
    }

    #[test]
    fn deep_chain_clones_without_overflow() {
        let mut root = TrieNode::new();
        let mut node = &mut root;
        for _ in 0..200_000 {
            node = node.get_or_insert(sparse('a')).0;
        }
        node.mark_terminal();
        let copy = root.clone();
        let mut depth = 0;
        let mut node = &copy;
        while let Some((_, child)) = node.children().next() {
            node = child;
            depth += 1;
        }
        assert_eq!(depth, 200_000);
        assert!(node.is_terminal());
        assert_eq!(format!("{root:?}"), "TrieNode { terminal: false, children: ['a'] }");
    }

    #[test]
    fn deep_chain_drops_without_overflow() {
        let mut root = TrieNode::new();
        let mut node = &mut root;
        for _ in 0..200_000 {
            node = node.get_or_insert(sparse('a')).0;
        }
        node.mark_terminal();
        drop(root);
    }
}
