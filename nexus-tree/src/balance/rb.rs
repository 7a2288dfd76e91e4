//! Red-black balancing.
//!
//! Root is black, a red element has no red child, and every path from an
//! element down to an empty slot crosses the same number of black elements.

use super::Balance;
use super::links::{Links, Splice, link};
use crate::{Direction, Index, Storage, TreeNode};

const RED: i8 = 0;
const BLACK: i8 = 1;

/// Red-black tree strategy (the default).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedBlack;

#[inline]
fn is_black<T, S>(links: &Links<'_, T, S>, idx: S::Index) -> bool
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
    idx.is_none() || links.tag(idx) == BLACK
}

impl Balance for RedBlack {
    fn link<T, S>(links: &mut Links<'_, T, S>, idx: S::Index, parent: S::Index, dir: Direction)
    where
        T: TreeNode<S::Index>,
        S: Storage<T>,
    {
        links.attach_leaf(idx, parent, dir, RED);

        let mut node = idx;
        loop {
            let parent = links.parent(node);
            if parent.is_none() {
                links.set_tag(node, BLACK);
                return;
            }
            if links.tag(parent) == BLACK {
                return;
            }

            // A red parent is never the root, so the grandparent exists.
            let grand = links.parent(parent);
            let side = links.side_of(parent, grand);
            let uncle = links.child(grand, side.reverse());

            if !is_black(links, uncle) {
                links.set_tag(parent, BLACK);
                links.set_tag(uncle, BLACK);
                links.set_tag(grand, RED);
                node = grand;
                continue;
            }

            let mut parent = parent;
            if links.side_of(node, parent) != side {
                links.rotate(parent, side);
                parent = node;
            }
            links.set_tag(parent, BLACK);
            links.set_tag(grand, RED);
            links.rotate(grand, side.reverse());
            return;
        }
    }

    fn unlink<T, S>(links: &mut Links<'_, T, S>, idx: S::Index)
    where
        T: TreeNode<S::Index>,
        S: Storage<T>,
    {
        let Splice {
            parent,
            dir,
            child,
            tag,
        } = links.splice(idx);

        if tag == BLACK {
            repair(links, child, parent, dir);
        }
    }

    fn check<T, S>(storage: &S, root: S::Index) -> Result<(), S::Index>
    where
        T: TreeNode<S::Index>,
        S: Storage<T>,
    {
        if root.is_some() && link::<T, S>(storage, root).tag() != BLACK {
            return Err(root);
        }
        black_height::<T, S>(storage, root).map(|_| ())
    }
}

/// Restores the black-height rule after a black element left the slot
/// `dir` of `parent`, now held by `node`.
fn repair<T, S>(
    links: &mut Links<'_, T, S>,
    mut node: S::Index,
    mut parent: S::Index,
    mut dir: Direction,
) where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
    while parent.is_some() && is_black(links, node) {
        let far = dir.reverse();
        let mut sibling = links.child(parent, far);

        if links.tag(sibling) == RED {
            links.set_tag(sibling, BLACK);
            links.set_tag(parent, RED);
            links.rotate(parent, dir);
            sibling = links.child(parent, far);
        }

        let near_nephew = links.child(sibling, dir);
        let far_nephew = links.child(sibling, far);

        if is_black(links, near_nephew) && is_black(links, far_nephew) {
            links.set_tag(sibling, RED);
            node = parent;
            parent = links.parent(node);
            if parent.is_some() {
                dir = links.side_of(node, parent);
            }
            continue;
        }

        if is_black(links, far_nephew) {
            links.set_tag(near_nephew, BLACK);
            links.set_tag(sibling, RED);
            links.rotate(sibling, far);
            sibling = links.child(parent, far);
        }

        let parent_tag = links.tag(parent);
        links.set_tag(sibling, parent_tag);
        links.set_tag(parent, BLACK);
        let far_nephew = links.child(sibling, far);
        links.set_tag(far_nephew, BLACK);
        links.rotate(parent, dir);
        node = links.root();
        break;
    }

    if node.is_some() {
        links.set_tag(node, BLACK);
    }
}

fn black_height<T, S>(storage: &S, idx: S::Index) -> Result<u32, S::Index>
where
    T: TreeNode<S::Index>,
    S: Storage<T>,
{
    if idx.is_none() {
        return Ok(1);
    }

    let node = link::<T, S>(storage, idx);
    let before = node.child(Direction::Before);
    let after = node.child(Direction::After);

    if node.tag() == RED {
        for child in [before, after] {
            if child.is_some() && link::<T, S>(storage, child).tag() == RED {
                return Err(idx);
            }
        }
    } else if node.tag() != BLACK {
        return Err(idx);
    }

    let left = black_height::<T, S>(storage, before)?;
    let right = black_height::<T, S>(storage, after)?;
    if left != right {
        return Err(idx);
    }

    Ok(left + u32::from(node.tag() == BLACK))
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

    // Appends each index after the current maximum, the worst case for an
    // unbalanced tree.
    fn ascending(n: usize) -> (Vec<Node>, usize) {
        let mut storage: Vec<Node> = (0..n).map(|_| Node::default()).collect();
        let mut root = usize::NONE;
        for idx in 0..n {
            let max = if root.is_none() {
                usize::NONE
            } else {
                extreme::<Node, _>(&storage, root, Direction::After)
            };
            let mut links = Links::<Node, Vec<Node>>::new(&mut root, &mut storage);
            RedBlack::link(&mut links, idx, max, Direction::After);
        }
        (storage, root)
    }

    fn depth(storage: &Vec<Node>, idx: usize) -> usize {
        if idx.is_none() {
            return 0;
        }
        let link = storage[idx].link();
        1 + depth(storage, link.child(Direction::Before))
            .max(depth(storage, link.child(Direction::After)))
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let (storage, root) = ascending(1000);
        assert_eq!(RedBlack::check::<Node, Vec<Node>>(&storage, root), Ok(()));
        assert_eq!(storage[root].link().tag(), BLACK);
        // 2 * log2(1001) < 20
        assert!(depth(&storage, root) <= 20);
    }

    #[test]
    fn removals_keep_rules() {
        let (mut storage, mut root) = ascending(200);
        for idx in (0..200).step_by(3).chain((1..200).step_by(7)) {
            if !storage[idx].link().is_linked() {
                continue;
            }
            let mut links = Links::<Node, Vec<Node>>::new(&mut root, &mut storage);
            RedBlack::unlink(&mut links, idx);
            storage[idx].link_mut().reset();
            assert_eq!(RedBlack::check::<Node, Vec<Node>>(&storage, root), Ok(()));
        }
    }

    #[test]
    fn check_rejects_red_root() {
        let (mut storage, root) = ascending(3);
        storage[root].link_mut().set_tag(RED);
        assert_eq!(RedBlack::check::<Node, Vec<Node>>(&storage, root), Err(root));
    }
}
