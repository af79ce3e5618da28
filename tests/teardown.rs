//! Dropping a trie must release every allocation its nodes made, exactly once.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use libtrie::trie::builder::build_trie;
use libtrie::trie::{Lowercase, Trie, TrieNode, Unbounded};

struct CountingAlloc;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn adjust(delta: isize) {
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

fn live_allocations() -> isize {
    LIVE.with(Cell::get)
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            adjust(1);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        adjust(-1);
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

const WORDS: [&str; 8] = ["bar", "ball", "balloon", "bat", "cat", "catalog", "", "zebra"];
/// No node here has more than two children.
const NARROW_WORDS: [&str; 6] = ["bar", "ball", "balloon", "cat", "catalog", ""];

/// Runs every code path once so lazily initialized statics (such as tracing
/// callsite registration) are in place before anything is counted.
fn warm_up() {
    drop(build_trie(Lowercase, WORDS));
    let mut trie = Trie::new(Unbounded::<char>::new());
    let _ = trie.try_extend(WORDS);
    trie.clear();
}

fn inner_nodes(root: &TrieNode<char>) -> usize {
    let mut stack = vec![root];
    let mut inner = 0;
    while let Some(node) = stack.pop() {
        inner += usize::from(!node.is_leaf());
        stack.extend(node.children().map(|(_, child)| child));
    }
    inner
}

#[test]
fn dense_trie_releases_every_node() {
    warm_up();
    let before = live_allocations();
    let trie = build_trie(Lowercase, WORDS).unwrap();
    let nodes = trie.node_count();
    // Every node but the root is boxed, and every node with children owns
    // one slot table.
    let tables = inner_nodes(trie.root());
    assert_eq!(nodes, 22);
    assert_eq!(tables, 17);
    assert_eq!(live_allocations() - before, (nodes - 1 + tables) as isize);
    drop(trie);
    assert_eq!(live_allocations(), before);
}

#[test]
fn sparse_trie_releases_every_node() {
    warm_up();
    let before = live_allocations();
    let mut trie = Trie::new(Unbounded::<char>::new());
    trie.try_extend(NARROW_WORDS).unwrap();
    // Children spill to the heap only from the third child on, so here each
    // non-root node is exactly one allocation.
    assert_eq!(live_allocations() - before, (trie.node_count() - 1) as isize);
    drop(trie);
    assert_eq!(live_allocations(), before);
}

#[test]
fn clear_releases_all_but_the_root() {
    warm_up();
    let before = live_allocations();
    let mut trie = Trie::new(Unbounded::<char>::new());
    trie.try_extend(WORDS).unwrap();
    trie.clear();
    assert_eq!(live_allocations(), before);
    assert_eq!(trie.node_count(), 1);
}

#[test]
fn deep_trie_releases_every_node() {
    warm_up();
    let word = "a".repeat(50_000);
    let before = live_allocations();
    let mut trie = Trie::new(Unbounded::<char>::new());
    trie.add(word.as_str()).unwrap();
    assert_eq!(live_allocations() - before, 50_000);
    drop(trie);
    assert_eq!(live_allocations(), before);
}
