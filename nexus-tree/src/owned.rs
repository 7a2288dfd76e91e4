//! OwnedTree - a tree that owns its storage.

use core::cmp::Ordering;

use slab::Slab;

use crate::{Avl, Balance, Corruption, Full, OrdFn, RedBlack, Tree, TreeNode};

/// A balanced tree bundled with a bounded slab of its elements.
///
/// This is a convenience wrapper around [`Tree`] + [`Slab`] for cases where
/// the elements are not shared with other structures. Elements are moved in
/// on insert and handed back on removal.
///
/// # Example
///
/// ```
/// use nexus_tree::{OwnedTree, TreeLink, TreeNode};
///
/// #[derive(Debug)]
/// struct Level {
///     price: u64,
///     qty: u64,
///     link: TreeLink<usize>,
/// }
///
/// impl Level {
///     fn new(price: u64, qty: u64) -> Self {
///         Self { price, qty, link: TreeLink::new() }
///     }
/// }
///
/// impl TreeNode<usize> for Level {
///     fn link(&self) -> &TreeLink<usize> { &self.link }
///     fn link_mut(&mut self) -> &mut TreeLink<usize> { &mut self.link }
/// }
///
/// let mut book = OwnedTree::with_capacity(16, |a: &Level, b: &Level| a.price.cmp(&b.price));
///
/// book.try_insert(Level::new(101, 5)).unwrap();
/// let mid = book.try_insert(Level::new(100, 7)).unwrap();
/// book.try_insert(Level::new(99, 2)).unwrap();
///
/// assert_eq!(book.first().map(|l| l.price), Some(99));
///
/// let level = book.remove(mid).unwrap();
/// assert_eq!(level.qty, 7);
/// assert_eq!(book.len(), 2);
/// ```
pub struct OwnedTree<T, C, B: Balance = RedBlack> {
    storage: Slab<T>,
    tree: Tree<T, usize, C, B>,
    capacity: usize,
}

impl<T, C> OwnedTree<T, C, RedBlack>
where
    T: TreeNode<usize>,
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty red-black tree holding at most `capacity` elements.
    pub fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self::with_balance(capacity, cmp, RedBlack)
    }
}

impl<T, C> OwnedTree<T, C, Avl>
where
    T: TreeNode<usize>,
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty AVL tree holding at most `capacity` elements.
    pub fn avl_with_capacity(capacity: usize, cmp: C) -> Self {
        Self::with_balance(capacity, cmp, Avl)
    }
}

impl<T, B> OwnedTree<T, OrdFn<T>, B>
where
    T: TreeNode<usize> + Ord,
    B: Balance,
{
    /// Creates an empty tree ordered by `T`'s [`Ord`] implementation.
    pub fn ordered(capacity: usize) -> Self {
        Self {
            storage: Slab::with_capacity(capacity),
            tree: Tree::ordered(),
            capacity,
        }
    }
}

impl<T, C, B> OwnedTree<T, C, B>
where
    T: TreeNode<usize>,
    C: Fn(&T, &T) -> Ordering,
    B: Balance,
{
    /// Creates an empty tree with an explicit balancing strategy.
    ///
    /// Storage for `capacity` elements is allocated up front.
    pub fn with_balance(capacity: usize, cmp: C, balance: B) -> Self {
        Self {
            storage: Slab::with_capacity(capacity),
            tree: Tree::with_balance(cmp, balance),
            capacity,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the maximum number of elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Inserts `value` after any equal elements already present.
    ///
    /// Returns the index of the stored element.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if the tree is at capacity.
    ///
    /// # Panics
    ///
    /// Panics if `value` is already linked into a tree.
    pub fn try_insert(&mut self, value: T) -> Result<usize, Full<T>> {
        assert!(!value.in_tree(), "element already linked into a tree");
        if self.storage.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "owned tree is full");
            return Err(Full(value));
        }

        let idx = self.storage.insert(value);
        self.tree.add(&mut self.storage, idx);
        Ok(idx)
    }

    /// Returns the element at `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.storage.get(idx)
    }

    /// Returns the smallest element.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.tree.first().and_then(|idx| self.storage.get(idx))
    }

    /// Returns the largest element.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.tree.last().and_then(|idx| self.storage.get(idx))
    }

    /// Returns the index of an element comparing equal to `target`.
    pub fn find(&self, target: &T) -> Option<usize> {
        self.tree.find(&self.storage, target).found()
    }

    /// Returns the index of an element matching `key` under `cmp`.
    pub fn find_by<K, F>(&self, key: &K, cmp: F) -> Option<usize>
    where
        K: ?Sized,
        F: FnMut(&K, &T) -> Ordering,
    {
        self.tree.find_by(&self.storage, key, cmp).found()
    }

    /// Returns the index of the element after `idx`.
    ///
    /// Returns `None` if `idx` is the last element or not present.
    pub fn next(&self, idx: usize) -> Option<usize> {
        if !self.storage.contains(idx) {
            return None;
        }
        self.tree.next(&self.storage, idx)
    }

    /// Returns the index of the element before `idx`.
    ///
    /// Returns `None` if `idx` is the first element or not present.
    pub fn prev(&self, idx: usize) -> Option<usize> {
        if !self.storage.contains(idx) {
            return None;
        }
        self.tree.prev(&self.storage, idx)
    }

    /// Removes and returns the element at `idx`.
    ///
    /// Returns `None` if the index is not occupied.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if !self.storage.contains(idx) {
            return None;
        }
        self.tree.remove(&mut self.storage, idx);
        Some(self.storage.remove(idx))
    }

    /// Removes and returns the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        let idx = self.tree.pop_first(&mut self.storage)?;
        Some(self.storage.remove(idx))
    }

    /// Removes and returns the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        let idx = self.tree.pop_last(&mut self.storage)?;
        Some(self.storage.remove(idx))
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.tree.clear(&mut self.storage);
        self.storage.clear();
    }

    /// Returns an iterator over the elements in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.tree.iter(&self.storage).map(|(_, elem)| elem)
    }

    /// Checks the tree's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`Corruption`] found.
    pub fn verify(&self) -> Result<(), Corruption<usize>> {
        self.tree.verify(&self.storage)
    }
}

impl<T, C, B: Balance> core::fmt::Debug for OwnedTree<T, C, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OwnedTree")
            .field("tree", &self.tree)
            .field("capacity", &self.capacity)
            .finish()
    }
}
