//! Link plumbing shared by the balancing strategies.
//!
//! Everything here works on indices through the caller's storage. A missing
//! index means the tree and storage disagree, which is a caller bug, so
//! lookups panic instead of returning errors.

use core::marker::PhantomData;

use crate::{Direction, Index, Storage, TreeLink, TreeNode};

#[inline]
pub(crate) fn link<'a, T, S>(storage: &'a S, idx: S::Index) -> &'a TreeLink<S::Index>
where
    T: TreeNode<S::Index> + 'a,
    S: Storage<T>,
{
    storage.get(idx).expect("tree index missing from storage").link()
}

/// Descends from `idx` as far as possible toward `dir`.
#[inline]
pub(crate) fn extreme<T, S>(storage: &S, mut idx: S::Index, dir: Direction) -> S::Index
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
    loop {
        let child = link::<T, S>(storage, idx).child(dir);
        if child.is_none() {
            return idx;
        }
        idx = child;
    }
}

/// Returns the in-order neighbour of `idx` on the `dir` side, or `NONE`.
pub(crate) fn step<T, S>(storage: &S, idx: S::Index, dir: Direction) -> S::Index
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
    let child = link::<T, S>(storage, idx).child(dir);
    if child.is_some() {
        return extreme::<T, S>(storage, child, dir.reverse());
    }

    // Climb until we arrive from the opposite side.
    let mut node = idx;
    let mut parent = link::<T, S>(storage, node).parent();
    while parent.is_some() && link::<T, S>(storage, parent).child(dir) == node {
        node = parent;
        parent = link::<T, S>(storage, node).parent();
    }
    parent
}

/// Mutable view over the links of one tree.
pub struct Links<'a, T, S: Storage<T>> {
    root: &'a mut S::Index,
    storage: &'a mut S,
    _marker: PhantomData<fn(&T)>,
}

impl<'a, T, S> Links<'a, T, S>
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
    #[inline]
    pub(crate) fn new(root: &'a mut S::Index, storage: &'a mut S) -> Self {
        Self {
            root,
            storage,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn root(&self) -> S::Index {
        *self.root
    }

    #[inline]
    fn link_mut(&mut self, idx: S::Index) -> &mut TreeLink<S::Index> {
        self.storage
            .get_mut(idx)
            .expect("tree index missing from storage")
            .link_mut()
    }

    #[inline]
    pub fn parent(&self, idx: S::Index) -> S::Index {
        link::<T, S>(&*self.storage, idx).parent()
    }

    #[inline]
    pub fn child(&self, idx: S::Index, dir: Direction) -> S::Index {
        link::<T, S>(&*self.storage, idx).child(dir)
    }

    #[inline]
    pub fn tag(&self, idx: S::Index) -> i8 {
        link::<T, S>(&*self.storage, idx).tag()
    }

    #[inline]
    pub fn set_tag(&mut self, idx: S::Index, tag: i8) {
        self.link_mut(idx).set_tag(tag);
    }

    /// Sets `idx`'s child on `dir` and, if present, points the child back.
    #[inline]
    pub fn set_child(&mut self, idx: S::Index, dir: Direction, child: S::Index) {
        self.link_mut(idx).set_child(dir, child);
        if child.is_some() {
            self.link_mut(child).set_parent(idx);
        }
    }

    #[inline]
    pub fn extreme(&self, idx: S::Index, dir: Direction) -> S::Index {
        extreme::<T, S>(&*self.storage, idx, dir)
    }

    /// Which side of `parent` holds `child`.
    #[inline]
    pub fn side_of(&self, child: S::Index, parent: S::Index) -> Direction {
        if self.child(parent, Direction::Before) == child {
            Direction::Before
        } else {
            Direction::After
        }
    }

    /// Makes `new` take `old`'s slot under `parent` (or the root slot).
    pub fn replace_child(&mut self, parent: S::Index, old: S::Index, new: S::Index) {
        if parent.is_none() {
            *self.root = new;
        } else {
            let dir = self.side_of(old, parent);
            self.link_mut(parent).set_child(dir, new);
        }
        if new.is_some() {
            self.link_mut(new).set_parent(parent);
        }
    }

    /// Links a fresh leaf under `parent` on `dir` (or as root).
    pub fn attach_leaf(&mut self, idx: S::Index, parent: S::Index, dir: Direction, tag: i8) {
        {
            let link = self.link_mut(idx);
            assert!(!link.is_linked(), "element already linked into a tree");
            link.attach(parent, tag);
        }
        if parent.is_none() {
            *self.root = idx;
        } else {
            debug_assert!(self.child(parent, dir).is_none(), "attach slot occupied");
            self.link_mut(parent).set_child(dir, idx);
        }
    }

    /// Rotates `idx` down toward `dir`; its child on the other side moves up.
    ///
    /// Returns the child that took `idx`'s place.
    pub fn rotate(&mut self, idx: S::Index, dir: Direction) -> S::Index {
        let up = dir.reverse();
        let pivot = self.child(idx, up);
        debug_assert!(pivot.is_some(), "rotation without pivot");

        let inner = self.child(pivot, dir);
        self.link_mut(idx).set_child(up, inner);
        if inner.is_some() {
            self.link_mut(inner).set_parent(idx);
        }

        let parent = self.parent(idx);
        self.replace_child(parent, idx, pivot);

        self.link_mut(pivot).set_child(dir, idx);
        self.link_mut(idx).set_parent(pivot);
        pivot
    }

    /// Copies `old`'s position, children and tag onto `new`.
    ///
    /// `new` must already be detached from wherever it was.
    pub fn transplant(&mut self, old: S::Index, new: S::Index) {
        let parent = self.parent(old);
        let before = self.child(old, Direction::Before);
        let after = self.child(old, Direction::After);
        let tag = self.tag(old);

        self.replace_child(parent, old, new);
        self.set_child(new, Direction::Before, before);
        self.set_child(new, Direction::After, after);
        self.set_tag(new, tag);
    }

    /// Unlinks `idx` from the tree, leaving every other element in order.
    ///
    /// An element with two children trades places with its successor first,
    /// so the slot that actually disappears always had at most one child.
    /// The returned [`Splice`] describes that slot for rebalancing.
    pub fn splice(&mut self, idx: S::Index) -> Splice<S::Index> {
        let before = self.child(idx, Direction::Before);
        let after = self.child(idx, Direction::After);

        if before.is_none() || after.is_none() {
            let child = if before.is_some() { before } else { after };
            let parent = self.parent(idx);
            let dir = if parent.is_some() {
                self.side_of(idx, parent)
            } else {
                Direction::Before
            };
            let tag = self.tag(idx);
            self.replace_child(parent, idx, child);
            return Splice {
                parent,
                dir,
                child,
                tag,
            };
        }

        let successor = self.extreme(after, Direction::Before);
        let tag = self.tag(successor);
        let orphan = self.child(successor, Direction::After);

        if successor == after {
            // Successor keeps its own after-subtree and steps up one level.
            let parent = self.parent(idx);
            let idx_tag = self.tag(idx);
            self.replace_child(parent, idx, successor);
            self.set_child(successor, Direction::Before, before);
            self.set_tag(successor, idx_tag);
            return Splice {
                parent: successor,
                dir: Direction::After,
                child: orphan,
                tag,
            };
        }

        let successor_parent = self.parent(successor);
        self.link_mut(successor_parent)
            .set_child(Direction::Before, orphan);
        if orphan.is_some() {
            self.link_mut(orphan).set_parent(successor_parent);
        }
        self.transplant(idx, successor);

        Splice {
            parent: successor_parent,
            dir: Direction::Before,
            child: orphan,
            tag,
        }
    }
}

/// The slot vacated by [`Links::splice`].
#[derive(Debug, Clone, Copy)]
pub struct Splice<Idx> {
    /// Parent of the vacated slot, `NONE` if it was the root.
    pub parent: Idx,
    /// Side of `parent` the slot is on.
    pub dir: Direction,
    /// Element now occupying the slot, possibly `NONE`.
    pub child: Idx,
    /// Tag of the element that physically left the slot.
    pub tag: i8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Node {
        link: TreeLink<usize>,
    }

    impl TreeNode<usize> for Node {
        fn link(&self) -> &TreeLink<usize> {
            &self.link
        }
        fn link_mut(&mut self) -> &mut TreeLink<usize> {
            &mut self.link
        }
    }

    // Builds   1
    //         / \
    //        0   3
    //           / \
    //          2   4
    fn sample() -> (Vec<Node>, usize) {
        let mut storage: Vec<Node> = (0..5).map(|_| Node::default()).collect();
        let mut root = usize::NONE;
        {
            let mut links = Links::<Node, Vec<Node>>::new(&mut root, &mut storage);
            links.attach_leaf(1, usize::NONE, Direction::Before, 0);
            links.attach_leaf(0, 1, Direction::Before, 0);
            links.attach_leaf(3, 1, Direction::After, 0);
            links.attach_leaf(2, 3, Direction::Before, 0);
            links.attach_leaf(4, 3, Direction::After, 0);
        }
        (storage, root)
    }

    fn in_order(storage: &Vec<Node>, root: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut idx = extreme::<Node, _>(storage, root, Direction::Before);
        while idx.is_some() {
            out.push(idx);
            idx = step::<Node, _>(storage, idx, Direction::After);
        }
        out
    }

    #[test]
    fn step_walks_in_order() {
        let (storage, root) = sample();
        assert_eq!(in_order(&storage, root), vec![0, 1, 2, 3, 4]);

        assert_eq!(step::<Node, _>(&storage, 2, Direction::Before), 1);
        assert_eq!(step::<Node, _>(&storage, 0, Direction::Before), usize::NONE);
        assert_eq!(step::<Node, _>(&storage, 4, Direction::After), usize::NONE);
    }

    #[test]
    fn rotate_keeps_order() {
        let (mut storage, mut root) = sample();
        {
            let mut links = Links::<Node, Vec<Node>>::new(&mut root, &mut storage);
            let pivot = links.rotate(1, Direction::Before);
            assert_eq!(pivot, 3);
            assert_eq!(links.root(), 3);
            assert_eq!(links.parent(3), usize::NONE);
            assert_eq!(links.child(1, Direction::After), 2);
            assert_eq!(links.parent(2), 1);
        }
        assert_eq!(in_order(&storage, root), vec![0, 1, 2, 3, 4]);

        {
            let mut links = Links::<Node, Vec<Node>>::new(&mut root, &mut storage);
            links.rotate(3, Direction::After);
            assert_eq!(links.root(), 1);
        }
        assert_eq!(in_order(&storage, root), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "already linked")]
    fn attach_twice_panics() {
        let (mut storage, mut root) = sample();
        let mut links = Links::<Node, Vec<Node>>::new(&mut root, &mut storage);
        links.attach_leaf(2, 0, Direction::After, 0);
    }
}
