//! Ordered tree over caller-owned elements.
//!
//! The tree stores only its root, cached endpoints, a count and the
//! comparator. Elements live in user-provided storage and embed their own
//! links via the [`TreeNode`] trait.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::balance::links::{Links, extreme, link, step};
use crate::{Balance, Direction, Index, Place, Position, RedBlack, Storage, TreeNode};

/// Comparator type of trees ordered by `T: Ord`.
pub type OrdFn<T> = fn(&T, &T) -> Ordering;

/// A tree ordered by the element type's own [`Ord`].
pub type OrdTree<T, Idx = usize, B = RedBlack> = Tree<T, Idx, OrdFn<T>, B>;

/// An intrusive balanced search tree over external storage.
///
/// Ordering comes from the comparator supplied at construction. Equal
/// elements may coexist; [`insert_here`](Tree::insert_here) places them
/// deterministically. The minimum and maximum are cached, so
/// [`first`](Tree::first) and [`last`](Tree::last) are O(1).
///
/// The tree does no locking. Callers serialize access, and a
/// find-then-insert sequence must not be interleaved with other mutations.
///
/// # Example
///
/// ```
/// use nexus_tree::{Tree, TreeLink, TreeNode};
///
/// struct Order {
///     price: u64,
///     link: TreeLink<usize>,
/// }
///
/// impl Order {
///     fn new(price: u64) -> Self {
///         Self { price, link: TreeLink::new() }
///     }
/// }
///
/// impl TreeNode<usize> for Order {
///     fn link(&self) -> &TreeLink<usize> { &self.link }
///     fn link_mut(&mut self) -> &mut TreeLink<usize> { &mut self.link }
/// }
///
/// let mut storage = vec![Order::new(5), Order::new(3), Order::new(8), Order::new(1)];
/// let mut tree = Tree::new(|a: &Order, b: &Order| a.price.cmp(&b.price));
///
/// for idx in 0..storage.len() {
///     tree.add(&mut storage, idx);
/// }
///
/// assert_eq!(tree.first(), Some(3)); // price 1
/// assert_eq!(tree.last(), Some(2)); // price 8
///
/// let prices: Vec<u64> = tree.iter(&storage).map(|(_, o)| o.price).collect();
/// assert_eq!(prices, vec![1, 3, 5, 8]);
/// ```
pub struct Tree<T, Idx: Index, C, B: Balance = RedBlack> {
    root: Idx,
    first: Idx,
    last: Idx,
    len: usize,
    /// Bumped on every structural change; stamps [`Position`] tokens.
    epoch: u64,
    cmp: C,
    _marker: PhantomData<(fn(&T), B)>,
}

impl<T, Idx: Index, C> Tree<T, Idx, C, RedBlack>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty red-black tree ordered by `cmp`.
    pub fn new(cmp: C) -> Self {
        Self::with_balance(cmp, RedBlack)
    }
}

impl<T: Ord, Idx: Index, B: Balance> Tree<T, Idx, OrdFn<T>, B> {
    /// Creates an empty tree ordered by `T`'s [`Ord`] implementation.
    pub fn ordered() -> Self {
        Self::with_balance(<T as Ord>::cmp, B::default())
    }
}

impl<T, Idx, C, B> Tree<T, Idx, C, B>
where
    Idx: Index,
    C: Fn(&T, &T) -> Ordering,
    B: Balance,
{
    /// Creates an empty tree ordered by `cmp`, balanced by strategy `B`.
    ///
    /// ```
    /// use nexus_tree::{Avl, Tree};
    ///
    /// let tree = Tree::with_balance(|a: &u64, b: &u64| a.cmp(b), Avl);
    /// # let _: &Tree<u64, usize, _, Avl> = &tree;
    /// assert!(tree.is_empty());
    /// ```
    pub fn with_balance(cmp: C, _balance: B) -> Self {
        Self {
            root: Idx::NONE,
            first: Idx::NONE,
            last: Idx::NONE,
            len: 0,
            epoch: 0,
            cmp,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements in the tree.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Returns the minimum element's index. O(1).
    #[doc(alias = "minimum")]
    #[inline]
    pub fn first(&self) -> Option<Idx> {
        self.first.into_option()
    }

    /// Returns the maximum element's index. O(1).
    #[doc(alias = "maximum")]
    #[inline]
    pub fn last(&self) -> Option<Idx> {
        self.last.into_option()
    }

    /// Returns the comparator.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    #[inline]
    fn touch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Searches for an element comparing equal to `target`.
    ///
    /// The returned position either names the match or marks where `target`
    /// would be inserted. Pass it to [`insert`](Tree::insert) before any
    /// other mutation.
    pub fn find<S>(&self, storage: &S, target: &T) -> Position<Idx>
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        self.find_by(storage, target, |target, elem| (self.cmp)(target, elem))
    }

    /// Searches with a key-to-element comparison instead of a whole element.
    ///
    /// `cmp` must order keys consistently with the tree's comparator.
    pub fn find_by<K, S, F>(&self, storage: &S, key: &K, mut cmp: F) -> Position<Idx>
    where
        K: ?Sized,
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
        F: FnMut(&K, &T) -> Ordering,
    {
        let mut node = self.root;
        if node.is_none() {
            return Position::new(Place::Empty, self.epoch);
        }

        loop {
            let elem = storage.get(node).expect("tree index missing from storage");
            let dir = match cmp(key, elem) {
                Ordering::Equal => return Position::new(Place::Found(node), self.epoch),
                Ordering::Less => Direction::Before,
                Ordering::Greater => Direction::After,
            };

            let next = elem.link().child(dir);
            if next.is_none() {
                return Position::new(
                    Place::Vacant {
                        neighbor: node,
                        direction: dir,
                    },
                    self.epoch,
                );
            }
            node = next;
        }
    }

    /// Returns `true` if an element equal to `target` is in the tree.
    #[inline]
    pub fn contains<S>(&self, storage: &S, target: &T) -> bool
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        self.find(storage, target).is_found()
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Inserts `idx` at a position returned by [`find`](Tree::find).
    ///
    /// A [`Place::Found`] position inserts after the equal element; the tree
    /// never deduplicates.
    ///
    /// # Panics
    ///
    /// Panics if the tree changed since `position` was produced, or if `idx`
    /// is already linked into a tree.
    pub fn insert<S>(&mut self, storage: &mut S, idx: Idx, position: Position<Idx>)
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        assert_eq!(
            position.epoch(),
            self.epoch,
            "stale position: tree changed since find"
        );

        match position.place() {
            Place::Empty => {
                assert!(self.root.is_none(), "empty-tree position on a non-empty tree");
                B::link(
                    &mut Links::new(&mut self.root, storage),
                    idx,
                    Idx::NONE,
                    Direction::Before,
                );
                self.first = idx;
                self.last = idx;
                self.len = 1;
                self.touch();
            }
            Place::Found(existing) => self.insert_here(storage, idx, existing, Direction::After),
            Place::Vacant {
                neighbor,
                direction,
            } => self.insert_here(storage, idx, neighbor, direction),
        }
    }

    /// Inserts `idx` immediately before or after `neighbor` in tree order,
    /// without consulting the comparator.
    ///
    /// The caller is responsible for keeping the tree sorted; this is the
    /// way to place equal elements in a chosen order.
    ///
    /// # Panics
    ///
    /// Panics if `neighbor` is not in this tree or `idx` is already linked.
    pub fn insert_here<S>(&mut self, storage: &mut S, idx: Idx, neighbor: Idx, direction: Direction)
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        let neighbor_link = link::<T, S>(storage, neighbor);
        assert!(neighbor_link.is_linked(), "neighbor is not in the tree");
        assert!(self.owns(storage, neighbor), "neighbor belongs to another tree");

        // Occupied slot: attach at the adjacent element's free side instead.
        let child = neighbor_link.child(direction);
        let (parent, dir) = if child.is_none() {
            (neighbor, direction)
        } else {
            (
                extreme::<T, S>(storage, child, direction.reverse()),
                direction.reverse(),
            )
        };

        B::link(&mut Links::new(&mut self.root, storage), idx, parent, dir);

        if neighbor == self.first && direction == Direction::Before {
            self.first = idx;
        }
        if neighbor == self.last && direction == Direction::After {
            self.last = idx;
        }
        self.len += 1;
        self.touch();
    }

    /// Inserts `idx` after every element comparing equal to it.
    ///
    /// Elements with equal keys therefore iterate in the order they were
    /// added.
    pub fn add<S>(&mut self, storage: &mut S, idx: Idx)
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        // Equal steers right, so the search always ends at a vacant slot.
        let position = {
            let target = storage.get(idx).expect("invalid index");
            self.find_by(&*storage, target, |target, elem| {
                (self.cmp)(target, elem).then(Ordering::Greater)
            })
        };
        self.insert(storage, idx, position);
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes `idx` from the tree.
    ///
    /// The element stays in storage with a reset link.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not in this tree.
    pub fn remove<S>(&mut self, storage: &mut S, idx: Idx)
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        assert!(
            link::<T, S>(storage, idx).is_linked(),
            "element is not in the tree"
        );
        assert!(self.owns(storage, idx), "element belongs to another tree");

        // Endpoints need adjacency, which detaching rewires.
        if idx == self.first {
            self.first = step::<T, S>(storage, idx, Direction::After);
        }
        if idx == self.last {
            self.last = step::<T, S>(storage, idx, Direction::Before);
        }

        B::unlink(&mut Links::new(&mut self.root, storage), idx);
        storage
            .get_mut(idx)
            .expect("invalid index")
            .link_mut()
            .reset();

        self.len -= 1;
        self.touch();
    }

    /// Removes and returns the minimum element.
    ///
    /// The tree is fully consistent after every call, so this doubles as an
    /// incremental teardown: call it until `None`, releasing each element as
    /// it comes out, with other queries allowed in between.
    pub fn pop_first<S>(&mut self, storage: &mut S) -> Option<Idx>
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        let idx = self.first.into_option()?;
        self.remove(storage, idx);
        Some(idx)
    }

    /// Removes and returns the maximum element.
    pub fn pop_last<S>(&mut self, storage: &mut S) -> Option<Idx>
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        let idx = self.last.into_option()?;
        self.remove(storage, idx);
        Some(idx)
    }

    /// Returns an iterator that removes elements in ascending order.
    ///
    /// Dropping the iterator removes whatever is left.
    pub fn drain<'a, S>(&'a mut self, storage: &'a mut S) -> Drain<'a, T, Idx, C, B, S>
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        Drain {
            tree: self,
            storage,
        }
    }

    /// Unlinks every element at once in O(n), without rebalancing.
    ///
    /// Unlike [`pop_first`](Tree::pop_first), the tree is only consistent
    /// again once this returns.
    pub fn clear<S>(&mut self, storage: &mut S)
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if self.len > 0 {
            tracing::debug!(len = self.len, "unlinking all tree elements");
        }

        // Post-order walk: cut each child edge on the way down, reset on the
        // way up. Needs no stack.
        let mut node = self.root;
        while node.is_some() {
            let link = storage.get_mut(node).expect("invalid index").link_mut();
            let before = link.child(Direction::Before);
            if before.is_some() {
                link.set_child(Direction::Before, Idx::NONE);
                node = before;
                continue;
            }
            let after = link.child(Direction::After);
            if after.is_some() {
                link.set_child(Direction::After, Idx::NONE);
                node = after;
                continue;
            }
            let parent = link.parent();
            link.reset();
            node = parent;
        }

        self.root = Idx::NONE;
        self.first = Idx::NONE;
        self.last = Idx::NONE;
        self.len = 0;
        self.touch();
    }

    /// Consumes an empty tree.
    ///
    /// # Panics
    ///
    /// Panics if the tree still has elements. Drain it with
    /// [`pop_first`](Tree::pop_first) or [`clear`](Tree::clear) first.
    pub fn destroy(self) {
        assert!(
            self.is_empty(),
            "destroying a tree that still holds {} elements",
            self.len
        );
        tracing::trace!("tree destroyed");
    }

    /// Exchanges the contents of two trees in O(1).
    ///
    /// Positions produced by either tree before the swap become stale.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
        let epoch = self.epoch.max(other.epoch).wrapping_add(1);
        self.epoch = epoch;
        other.epoch = epoch;
        tracing::trace!(len = self.len, other_len = other.len, "trees swapped");
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Returns the in-order neighbour of member `idx` on the `direction`
    /// side, or `None` past either end.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not in the tree.
    pub fn walk<S>(&self, storage: &S, idx: Idx, direction: Direction) -> Option<Idx>
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        assert!(
            link::<T, S>(storage, idx).is_linked(),
            "element is not in the tree"
        );
        debug_assert!(self.owns(storage, idx), "element belongs to another tree");
        step::<T, S>(storage, idx, direction).into_option()
    }

    /// Returns the element after `idx`.
    #[inline]
    pub fn next<S>(&self, storage: &S, idx: Idx) -> Option<Idx>
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        self.walk(storage, idx, Direction::After)
    }

    /// Returns the element before `idx`.
    #[inline]
    pub fn prev<S>(&self, storage: &S, idx: Idx) -> Option<Idx>
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        self.walk(storage, idx, Direction::Before)
    }

    /// Returns the element nearest to `position` on the `direction` side.
    ///
    /// For a found position that is the match's neighbour. For a vacant one
    /// it is the element the target would sit next to, e.g. the smallest
    /// element greater than the target for [`Direction::After`].
    ///
    /// # Panics
    ///
    /// Panics if the tree changed since `position` was produced.
    pub fn nearest<S>(&self, storage: &S, position: Position<Idx>, direction: Direction) -> Option<Idx>
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        assert_eq!(
            position.epoch(),
            self.epoch,
            "stale position: tree changed since find"
        );

        match position.place() {
            Place::Empty => None,
            Place::Found(idx) => self.walk(storage, idx, direction),
            Place::Vacant {
                neighbor,
                direction: side,
            } => {
                if side == direction {
                    step::<T, S>(storage, neighbor, direction).into_option()
                } else {
                    Some(neighbor)
                }
            }
        }
    }

    /// Returns an iterator over `(index, element)` pairs in ascending order.
    #[inline]
    pub fn iter<'a, S>(&self, storage: &'a S) -> Iter<'a, T, S>
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        Iter {
            storage,
            front: self.first,
            back: self.last,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if `idx`'s root is this tree's root.
    fn owns<S>(&self, storage: &S, idx: Idx) -> bool
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        let mut node = idx;
        loop {
            let parent = link::<T, S>(storage, node).parent();
            if parent.is_none() {
                return node == self.root;
            }
            node = parent;
        }
    }

    // ========================================================================
    // Verification
    // ========================================================================

    /// Checks every structural invariant of the tree.
    ///
    /// O(n). Intended for tests and debugging; a correct program never
    /// sees an error.
    pub fn verify<S>(&self, storage: &S) -> Result<(), Corruption<Idx>>
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        let result = self.verify_inner(storage);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "tree verification failed");
        }
        result
    }

    fn verify_inner<S>(&self, storage: &S) -> Result<(), Corruption<Idx>>
    where
        T: TreeNode<Idx>,
        S: Storage<T, Index = Idx>,
    {
        if self.root.is_some() && link::<T, S>(storage, self.root).parent().is_some() {
            return Err(Corruption::Link(self.root));
        }
        let count = count_links::<T, S>(storage, self.root)?;
        if count != self.len {
            return Err(Corruption::Count {
                expected: self.len,
                found: count,
            });
        }

        let (first, last) = if self.root.is_none() {
            (Idx::NONE, Idx::NONE)
        } else {
            (
                extreme::<T, S>(storage, self.root, Direction::Before),
                extreme::<T, S>(storage, self.root, Direction::After),
            )
        };
        for (expected, cached) in [(first, self.first), (last, self.last)] {
            if expected != cached {
                return Err(Corruption::Endpoint {
                    expected: expected.into_option(),
                    cached: cached.into_option(),
                });
            }
        }

        let mut prev: Option<&T> = None;
        for (idx, elem) in self.iter(storage) {
            if prev.is_some_and(|prev| (self.cmp)(prev, elem) == Ordering::Greater) {
                return Err(Corruption::Order(idx));
            }
            prev = Some(elem);
        }

        B::check::<T, S>(storage, self.root).map_err(Corruption::Balance)
    }
}

/// Counts the subtree at `idx`, checking each child points back at its parent.
fn count_links<T, S>(storage: &S, idx: S::Index) -> Result<usize, Corruption<S::Index>>
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
    if idx.is_none() {
        return Ok(0);
    }

    let node = link::<T, S>(storage, idx);
    if !node.is_linked() {
        return Err(Corruption::Link(idx));
    }

    let mut count = 1;
    for dir in [Direction::Before, Direction::After] {
        let child = node.child(dir);
        if child.is_some() && link::<T, S>(storage, child).parent() != idx {
            return Err(Corruption::Link(child));
        }
        count += count_links::<T, S>(storage, child)?;
    }
    Ok(count)
}

impl<T, Idx: Index, C, B: Balance> fmt::Debug for Tree<T, Idx, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root)
            .field("first", &self.first)
            .field("last", &self.last)
            .field("balance", &B::default())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Corruption
// =============================================================================

/// Structural damage found by [`Tree::verify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption<Idx> {
    /// Element count disagrees with the cached length.
    Count {
        /// Cached length.
        expected: usize,
        /// Elements reachable from the root.
        found: usize,
    },
    /// A cached endpoint is not the actual minimum or maximum.
    Endpoint {
        /// Actual endpoint.
        expected: Option<Idx>,
        /// Cached endpoint.
        cached: Option<Idx>,
    },
    /// Parent/child links disagree at this element.
    Link(Idx),
    /// This element sorts before its in-order predecessor.
    Order(Idx),
    /// The balancing rule is broken at this element.
    Balance(Idx),
}

impl<Idx: fmt::Debug> fmt::Display for Corruption<Idx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Corruption::Count { expected, found } => {
                write!(f, "tree holds {found} elements but records {expected}")
            }
            Corruption::Endpoint { expected, cached } => {
                write!(f, "cached endpoint {cached:?} should be {expected:?}")
            }
            Corruption::Link(idx) => write!(f, "broken link at element {idx:?}"),
            Corruption::Order(idx) => write!(f, "element {idx:?} is out of order"),
            Corruption::Balance(idx) => write!(f, "balance violated at element {idx:?}"),
        }
    }
}

impl<Idx: fmt::Debug> std::error::Error for Corruption<Idx> {}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over `(index, element)` pairs in ascending order.
pub struct Iter<'a, T, S: Storage<T>> {
    storage: &'a S,
    front: S::Index,
    back: S::Index,
    remaining: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: 'a, S> Iterator for Iter<'a, T, S>
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
    type Item = (S::Index, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = self.front;
        let elem = self.storage.get(idx).expect("tree index missing from storage");
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = step::<T, S>(self.storage, idx, Direction::After);
        }
        Some((idx, elem))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S> DoubleEndedIterator for Iter<'a, T, S>
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = self.back;
        let elem = self.storage.get(idx).expect("tree index missing from storage");
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = step::<T, S>(self.storage, idx, Direction::Before);
        }
        Some((idx, elem))
    }
}

impl<'a, T: 'a, S> ExactSizeIterator for Iter<'a, T, S>
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
}

impl<'a, T: 'a, S> FusedIterator for Iter<'a, T, S>
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
}

/// Iterator that removes elements from a tree in ascending order.
///
/// Yields indices; the elements stay in storage with reset links.
pub struct Drain<'a, T, Idx, C, B, S>
where
    Idx: Index,
    C: Fn(&T, &T) -> Ordering,
    B: Balance,
    T: TreeNode<Idx>,
    S: Storage<T, Index = Idx>,
{
    tree: &'a mut Tree<T, Idx, C, B>,
    storage: &'a mut S,
}

impl<T, Idx, C, B, S> Iterator for Drain<'_, T, Idx, C, B, S>
where
    Idx: Index,
    C: Fn(&T, &T) -> Ordering,
    B: Balance,
    T: TreeNode<Idx>,
    S: Storage<T, Index = Idx>,
{
    type Item = Idx;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.tree.pop_first(self.storage)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T, Idx, C, B, S> Drop for Drain<'_, T, Idx, C, B, S>
where
    Idx: Index,
    C: Fn(&T, &T) -> Ordering,
    B: Balance,
    T: TreeNode<Idx>,
    S: Storage<T, Index = Idx>,
{
    fn drop(&mut self) {
        // Exhaust remaining elements so the tree ends up empty
        for _ in self.by_ref() {}
    }
}
