//! End-to-end scenarios, run once per balancing strategy.

use std::cmp::Ordering;

use nexus_tree::{Avl, Balance, Direction, Place, RedBlack, Tree, TreeLink, TreeNode};

#[derive(Debug)]
struct Item {
    key: i64,
    seq: u32,
    link: TreeLink<usize>,
}

impl Item {
    fn new(key: i64) -> Self {
        Self::with_seq(key, 0)
    }

    fn with_seq(key: i64, seq: u32) -> Self {
        Self {
            key,
            seq,
            link: TreeLink::new(),
        }
    }
}

impl TreeNode<usize> for Item {
    fn link(&self) -> &TreeLink<usize> {
        &self.link
    }
    fn link_mut(&mut self) -> &mut TreeLink<usize> {
        &mut self.link
    }
}

type ItemCmp = fn(&Item, &Item) -> Ordering;

fn by_key(a: &Item, b: &Item) -> Ordering {
    a.key.cmp(&b.key)
}

fn tree<B: Balance>() -> Tree<Item, usize, ItemCmp, B> {
    Tree::with_balance(by_key as ItemCmp, B::default())
}

fn key_of(storage: &slab::Slab<Item>, idx: Option<usize>) -> Option<i64> {
    idx.map(|idx| storage[idx].key)
}

// ============================================================================
// Scenarios
// ============================================================================

fn five_three_eight_one<B: Balance>() {
    let mut storage = slab::Slab::new();
    let mut tree = tree::<B>();

    let mut idx_of = Vec::new();
    for key in [5, 3, 8, 1] {
        let idx = storage.insert(Item::new(key));
        let pos = tree.find(&storage, &storage[idx]);
        assert!(!pos.is_found());
        tree.insert(&mut storage, idx, pos);
        idx_of.push(idx);
    }
    tree.verify(&storage).unwrap();

    assert_eq!(key_of(&storage, tree.first()), Some(1));
    assert_eq!(key_of(&storage, tree.last()), Some(8));

    let pos = tree.find(&storage, &Item::new(8));
    assert_eq!(pos.found(), Some(idx_of[2]));

    // Target 4 lands between 3 and 5.
    let pos = tree.find(&storage, &Item::new(4));
    assert!(!pos.is_found());
    assert!(matches!(pos.place(), Place::Vacant { .. }));
    assert_eq!(
        key_of(&storage, tree.nearest(&storage, pos, Direction::Before)),
        Some(3)
    );
    assert_eq!(
        key_of(&storage, tree.nearest(&storage, pos, Direction::After)),
        Some(5)
    );

    tree.remove(&mut storage, idx_of[3]);
    assert_eq!(key_of(&storage, tree.first()), Some(3));
    assert_eq!(tree.len(), 3);
    tree.verify(&storage).unwrap();
}

fn empty_drain_then_destroy<B: Balance>() {
    let mut storage: slab::Slab<Item> = slab::Slab::new();
    let mut tree = tree::<B>();

    assert_eq!(tree.pop_first(&mut storage), None);
    assert!(tree.is_empty());
    tree.destroy();
}

fn single_element<B: Balance>() {
    let mut storage = slab::Slab::new();
    let mut tree = tree::<B>();

    let idx = storage.insert(Item::new(42));
    tree.add(&mut storage, idx);

    assert_eq!(tree.len(), 1);
    assert_eq!(key_of(&storage, tree.first()), Some(42));
    assert_eq!(key_of(&storage, tree.last()), Some(42));

    tree.remove(&mut storage, idx);
    assert!(tree.is_empty());
    assert_eq!(tree.first(), None);
    assert_eq!(tree.last(), None);
    tree.verify(&storage).unwrap();
}

fn duplicates_keep_direction_order<B: Balance>() {
    let mut storage = slab::Slab::new();
    let mut tree = tree::<B>();

    for key in [10, 30] {
        let idx = storage.insert(Item::new(key));
        tree.add(&mut storage, idx);
    }

    // Chain of equal keys, each placed after the previous one.
    let anchor = storage.insert(Item::with_seq(20, 0));
    tree.add(&mut storage, anchor);
    let mut prev = anchor;
    for seq in 1..32 {
        let idx = storage.insert(Item::with_seq(20, seq));
        tree.insert_here(&mut storage, idx, prev, Direction::After);
        prev = idx;
    }

    // Another chain placed before the anchor, each ahead of the last.
    let mut next = anchor;
    for seq in 1..16 {
        let idx = storage.insert(Item::with_seq(20, 100 + seq));
        tree.insert_here(&mut storage, idx, next, Direction::Before);
        next = idx;
    }
    tree.verify(&storage).unwrap();

    let seqs: Vec<u32> = tree
        .iter(&storage)
        .filter(|(_, item)| item.key == 20)
        .map(|(_, item)| item.seq)
        .collect();
    let expected: Vec<u32> = (1..16).rev().map(|s| 100 + s).chain(0..32).collect();
    assert_eq!(seqs, expected);

    assert_eq!(key_of(&storage, tree.first()), Some(10));
    assert_eq!(key_of(&storage, tree.last()), Some(30));
}

fn insert_here_moves_endpoints<B: Balance>() {
    let mut storage = slab::Slab::new();
    let mut tree = tree::<B>();

    let mid = storage.insert(Item::new(0));
    tree.add(&mut storage, mid);

    let low = storage.insert(Item::new(-5));
    tree.insert_here(&mut storage, low, mid, Direction::Before);
    let high = storage.insert(Item::new(5));
    tree.insert_here(&mut storage, high, mid, Direction::After);

    assert_eq!(tree.first(), Some(low));
    assert_eq!(tree.last(), Some(high));
    tree.verify(&storage).unwrap();
}

fn walk_covers_everything<B: Balance>() {
    let mut storage = slab::Slab::new();
    let mut tree = tree::<B>();
    for key in (0..100).map(|k| (k * 37) % 100) {
        let idx = storage.insert(Item::new(key));
        tree.add(&mut storage, idx);
    }

    let mut forward = Vec::new();
    let mut cursor = tree.first();
    while let Some(idx) = cursor {
        forward.push(storage[idx].key);
        cursor = tree.walk(&storage, idx, Direction::After);
    }
    assert_eq!(forward, (0..100).collect::<Vec<_>>());

    let mut backward = Vec::new();
    let mut cursor = tree.last();
    while let Some(idx) = cursor {
        backward.push(storage[idx].key);
        cursor = tree.walk(&storage, idx, Direction::Before);
    }
    assert_eq!(backward, (0..100).rev().collect::<Vec<_>>());
}

fn drain_with_lookups<B: Balance>() {
    let mut storage = slab::Slab::new();
    let mut tree = tree::<B>();
    for key in [4, 9, 1, 7, 3, 8, 2] {
        let idx = storage.insert(Item::new(key));
        tree.add(&mut storage, idx);
    }

    let mut yielded = Vec::new();
    while let Some(idx) = tree.pop_first(&mut storage) {
        let item = storage.remove(idx);
        assert!(!item.link.is_linked());
        assert!(!tree.contains(&storage, &item));
        tree.verify(&storage).unwrap();
        yielded.push(item.key);
    }

    assert_eq!(yielded, vec![1, 2, 3, 4, 7, 8, 9]);
    assert!(storage.is_empty());
    tree.destroy();
}

fn swap_trees<B: Balance>() {
    let mut storage = slab::Slab::new();
    let mut a = tree::<B>();
    let mut b = tree::<B>();

    for key in [1, 2, 3] {
        let idx = storage.insert(Item::new(key));
        a.add(&mut storage, idx);
    }
    let idx = storage.insert(Item::new(99));
    b.add(&mut storage, idx);

    a.swap(&mut b);
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 3);
    assert_eq!(key_of(&storage, a.first()), Some(99));
    assert_eq!(key_of(&storage, b.last()), Some(3));
    a.verify(&storage).unwrap();
    b.verify(&storage).unwrap();
}

fn two_trees_share_storage<B: Balance>() {
    let mut storage = slab::Slab::new();
    let mut evens = tree::<B>();
    let mut odds = tree::<B>();

    for key in 0..20 {
        let idx = storage.insert(Item::new(key));
        if key % 2 == 0 {
            evens.add(&mut storage, idx);
        } else {
            odds.add(&mut storage, idx);
        }
    }

    // Move the minimum of one tree into the other.
    let moved = evens.pop_first(&mut storage).unwrap();
    odds.add(&mut storage, moved);

    assert_eq!(evens.len(), 9);
    assert_eq!(odds.len(), 11);
    assert_eq!(key_of(&storage, odds.first()), Some(0));
    evens.verify(&storage).unwrap();
    odds.verify(&storage).unwrap();
}

macro_rules! scenarios {
    ($($strategy:ident => $balance:ty),* $(,)?) => {
        $(
            mod $strategy {
                use super::*;

                #[test]
                fn five_three_eight_one() {
                    super::five_three_eight_one::<$balance>();
                }

                #[test]
                fn empty_drain_then_destroy() {
                    super::empty_drain_then_destroy::<$balance>();
                }

                #[test]
                fn single_element() {
                    super::single_element::<$balance>();
                }

                #[test]
                fn duplicates_keep_direction_order() {
                    super::duplicates_keep_direction_order::<$balance>();
                }

                #[test]
                fn insert_here_moves_endpoints() {
                    super::insert_here_moves_endpoints::<$balance>();
                }

                #[test]
                fn walk_covers_everything() {
                    super::walk_covers_everything::<$balance>();
                }

                #[test]
                fn drain_with_lookups() {
                    super::drain_with_lookups::<$balance>();
                }

                #[test]
                fn swap_trees() {
                    super::swap_trees::<$balance>();
                }

                #[test]
                fn two_trees_share_storage() {
                    super::two_trees_share_storage::<$balance>();
                }
            }
        )*
    };
}

scenarios! {
    red_black => RedBlack,
    avl => Avl,
}
