//! AVL balancing.
//!
//! Each element's tag is its balance factor: height of the after-subtree
//! minus height of the before-subtree, kept within -1..=1.

use super::Balance;
use super::links::{Links, Splice, link};
use crate::{Direction, Index, Storage, TreeNode};

/// AVL tree strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Avl;

/// Balance contribution of one extra level on `dir`.
#[inline]
const fn weight(dir: Direction) -> i8 {
    match dir {
        Direction::Before => -1,
        Direction::After => 1,
    }
}

impl Balance for Avl {
    fn link<T, S>(links: &mut Links<'_, T, S>, idx: S::Index, parent: S::Index, dir: Direction)
    where
        T: TreeNode<S::Index>,
        S: Storage<T>,
    {
        links.attach_leaf(idx, parent, dir, 0);

        // Walk up while subtrees keep growing taller.
        let mut child = idx;
        let mut node = parent;
        while node.is_some() {
            let side = links.side_of(child, node);
            let balance = links.tag(node) + weight(side);
            match balance {
                0 => {
                    links.set_tag(node, 0);
                    return;
                }
                -1 | 1 => {
                    links.set_tag(node, balance);
                    child = node;
                    node = links.parent(node);
                }
                _ => {
                    rotate(links, node, balance);
                    return;
                }
            }
        }
    }

    fn unlink<T, S>(links: &mut Links<'_, T, S>, idx: S::Index)
    where
        T: TreeNode<S::Index>,
        S: Storage<T>,
    {
        let Splice {
            parent: mut node,
            mut dir,
            ..
        } = links.splice(idx);

        // Walk up while subtrees keep getting shorter.
        while node.is_some() {
            let balance = links.tag(node) - weight(dir);
            let grand = links.parent(node);
            let top = match balance {
                -1 | 1 => {
                    links.set_tag(node, balance);
                    return;
                }
                0 => {
                    links.set_tag(node, 0);
                    node
                }
                _ => {
                    let (top, shorter) = rotate(links, node, balance);
                    if !shorter {
                        return;
                    }
                    top
                }
            };

            if grand.is_none() {
                return;
            }
            dir = links.side_of(top, grand);
            node = grand;
        }
    }

    fn check<T, S>(storage: &S, root: S::Index) -> Result<(), S::Index>
    where
        T: TreeNode<S::Index>,
        S: Storage<T>,
    {
        height::<T, S>(storage, root).map(|_| ())
    }
}

/// Fixes an element whose balance reached +-2.
///
/// Returns the new subtree root and whether the subtree got shorter than
/// it was before the imbalance.
fn rotate<T, S>(links: &mut Links<'_, T, S>, node: S::Index, balance: i8) -> (S::Index, bool)
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
    let heavy = if balance < 0 {
        Direction::Before
    } else {
        Direction::After
    };
    let sign = weight(heavy);
    let child = links.child(node, heavy);
    let child_balance = links.tag(child);

    if child_balance == -sign {
        // Child leans the other way: double rotation through the grandchild.
        let grandchild = links.child(child, heavy.reverse());
        let grand_balance = links.tag(grandchild);

        links.rotate(child, heavy);
        links.rotate(node, heavy.reverse());

        links.set_tag(node, if grand_balance == sign { -sign } else { 0 });
        links.set_tag(child, if grand_balance == -sign { sign } else { 0 });
        links.set_tag(grandchild, 0);
        return (grandchild, true);
    }

    links.rotate(node, heavy.reverse());
    if child_balance == 0 {
        // Only reachable on removal.
        links.set_tag(child, -sign);
        links.set_tag(node, sign);
        (child, false)
    } else {
        links.set_tag(child, 0);
        links.set_tag(node, 0);
        (child, true)
    }
}

fn height<T, S>(storage: &S, idx: S::Index) -> Result<u32, S::Index>
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
    if idx.is_none() {
        return Ok(0);
    }

    let node = link::<T, S>(storage, idx);
    let before = height::<T, S>(storage, node.child(Direction::Before))?;
    let after = height::<T, S>(storage, node.child(Direction::After))?;
    let diff = i64::from(after) - i64::from(before);

    if diff != i64::from(node.tag()) || !(-1..=1).contains(&diff) {
        return Err(idx);
    }

    Ok(before.max(after) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeLink;
    use crate::balance::links::extreme;

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

    fn build(n: usize, dir: Direction) -> (Vec<Node>, usize) {
        let mut storage: Vec<Node> = (0..n).map(|_| Node::default()).collect();
        let mut root = usize::NONE;
        for idx in 0..n {
            let end = if root.is_none() {
                usize::NONE
            } else {
                extreme::<Node, _>(&storage, root, dir)
            };
            let mut links = Links::<Node, Vec<Node>>::new(&mut root, &mut storage);
            Avl::link(&mut links, idx, end, dir);
        }
        (storage, root)
    }

    #[test]
    fn weights() {
        assert_eq!(weight(Direction::Before), -1);
        assert_eq!(weight(Direction::After), 1);
    }

    #[test]
    fn sorted_inserts_form_perfect_tree() {
        for dir in [Direction::Before, Direction::After] {
            let (storage, root) = build(127, dir);
            assert_eq!(height::<Node, Vec<Node>>(&storage, root), Ok(7));
        }
    }

    #[test]
    fn removals_keep_balance() {
        let (mut storage, mut root) = build(300, Direction::After);
        for idx in (0..300).step_by(2).chain((1..300).step_by(5)) {
            if !storage[idx].link().is_linked() {
                continue;
            }
            let mut links = Links::<Node, Vec<Node>>::new(&mut root, &mut storage);
            Avl::unlink(&mut links, idx);
            storage[idx].link_mut().reset();
            assert!(Avl::check::<Node, Vec<Node>>(&storage, root).is_ok());
        }
    }

    #[test]
    fn check_rejects_wrong_factor() {
        let (mut storage, root) = build(7, Direction::After);
        storage[root].link_mut().set_tag(1);
        assert_eq!(Avl::check::<Node, Vec<Node>>(&storage, root), Err(root));
    }
}
