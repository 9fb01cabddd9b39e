use std::{borrow::Borrow, cmp::Ordering};

use crate::Error;

/// A single key stored in an [`AvlTree`](crate::AvlTree), and the balanced
/// subtree rooted at it.
///
/// Nodes are read-only outside of the tree; the accessors exist to inspect the
/// tree shape.
#[derive(Debug, Clone)]
pub struct Node<K> {
    /// Child nodes pointers.
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 1, and an absent subtree a height of 0.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of far more entries than fit in memory.
    height: u8,

    key: K,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// Allocate a new leaf holding `key`, returning [`Error::OutOfMemory`]
    /// instead of aborting if the allocation fails.
    pub(crate) fn try_boxed(key: K) -> Result<Box<Self>, Error> {
        let mut slot = Vec::new();
        slot.try_reserve_exact(1)?;
        slot.push(Self::new(key));

        let slot = slot.into_boxed_slice();
        debug_assert_eq!(slot.len(), 1);

        // SAFETY: the boxed slice holds exactly one initialised element, so it
        // was allocated with the layout of [Self; 1], which is identical to the
        // layout of Self.
        Ok(unsafe { Box::from_raw(Box::into_raw(slot).cast::<Self>()) })
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The height of the subtree rooted at this node (1 for a leaf).
    pub fn height(&self) -> u8 {
        self.height
    }

    /// The subtree of keys strictly less than [`Node::key()`], if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The subtree of keys strictly greater than [`Node::key()`], if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The height of the left subtree minus the height of the right subtree.
    ///
    /// Positive when left heavy, negative when right heavy, and never outside
    /// of `-1..=1` between tree operations.
    pub fn balance_factor(&self) -> i8 {
        balance(self)
    }

    /// Return the node holding the minimum key of the subtree rooted at
    /// `self`.
    pub(crate) fn min_node(&self) -> &Self {
        let mut current = self;
        while let Some(left) = current.left() {
            current = left;
        }
        current
    }

    pub(crate) fn search<Q>(&self, key: &Q) -> Option<&Self>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = match key.cmp(self.key.borrow()) {
            Ordering::Less => self.left(),
            Ordering::Equal => return Some(self),
            Ordering::Greater => self.right(),
        }?;

        node.search(key)
    }
}

pub(crate) fn height<K>(n: Option<&Node<K>>) -> u8 {
    n.map(|v| v.height()).unwrap_or_default()
}

fn update_height<K>(n: &mut Node<K>) {
    n.height = 1 + height(n.left()).max(height(n.right()));
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// left heavy, and a negative number when right heavy.
fn balance<K>(n: &Node<K>) -> i8 {
    // Correctness: the height is a u8, the maximal value of which fits in an
    // i16 without truncation or sign inversion.
    (height(n.left()) as i16 - height(n.right()) as i16) as i8
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated).
fn rotate_left<K>(x: &mut Box<Node<K>>) {
    let mut p = x.right.take().expect("left rotation requires a right child");
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update_height(&mut p);

    x.left = Some(p);
    update_height(x);
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated).
fn rotate_right<K>(y: &mut Box<Node<K>>) {
    let mut p = y.left.take().expect("right rotation requires a left child");
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);

    y.right = Some(p);
    update_height(y);
}

/// Insert `key` into the subtree occupying `slot`, rebalancing each node on
/// the path back up to `slot`.
///
/// Returns `Ok(false)` and leaves the subtree untouched if `key` is already
/// present. If the new node cannot be allocated the error is returned before
/// any node is modified.
pub(crate) fn insert<K>(slot: &mut Option<Box<Node<K>>>, key: K) -> Result<bool, Error>
where
    K: Ord,
{
    let node = match slot {
        Some(v) => v,
        None => {
            *slot = Some(Node::try_boxed(key)?);
            return Ok(true);
        }
    };

    let child = match key.cmp(&node.key) {
        Ordering::Less => &mut node.left,
        Ordering::Equal => return Ok(false),
        Ordering::Greater => &mut node.right,
    };

    // Any rotation below this node absorbs the height increase, so if this
    // node ends up unbalanced the child was not replaced and this ordering
    // still describes which grandchild subtree grew.
    let descent = child.as_deref().map(|v| key.cmp(&v.key));

    if !insert(child, key)? {
        // The tree structure has not been modified, so it does not require
        // rebalancing.
        return Ok(false);
    }

    update_height(node);

    match (balance(node), descent) {
        // Left-Left
        (2, Some(Ordering::Less)) => rotate_right(node),
        // Left-Right
        (2, Some(Ordering::Greater)) => {
            rotate_left(node.left.as_mut().expect("left heavy node has a left child"));
            rotate_right(node);
        }
        // Right-Right
        (-2, Some(Ordering::Greater)) => rotate_left(node),
        // Right-Left
        (-2, Some(Ordering::Less)) => {
            rotate_right(node.right.as_mut().expect("right heavy node has a right child"));
            rotate_left(node);
        }
        (-1..=1, _) => { /* The tree is well balanced */ }
        (b, d) => unreachable!("unbalanced after insert: balance={b}, descent={d:?}"),
    }

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1.
    debug_assert!(balance(node).abs() <= 1);

    Ok(true)
}

/// Remove `key` from the subtree occupying `slot`, returning the stored key if
/// it was found.
///
/// Every node on the path back up to `slot` is rebalanced, which may rotate
/// at each level.
pub(crate) fn remove<K, Q>(slot: &mut Option<Box<Node<K>>>, key: &Q) -> Option<K>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let node = slot.as_mut()?;

    let removed = match key.cmp(node.key.borrow()) {
        Ordering::Less => remove(&mut node.left, key)?,
        Ordering::Greater => remove(&mut node.right, key)?,
        Ordering::Equal => {
            let mut old = slot.take()?;

            // This node may have 0, 1 or 2 child node(s).
            //
            // With at most one child, that child (if any) replaces it. With
            // two, the in-order successor (the left-most node of the right
            // subtree) is unlinked and takes its place, adopting both
            // children.
            *slot = match (old.left.take(), old.right.take()) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(mut right)) => {
                    let mut successor = match extract_subtree_min(&mut right) {
                        Some(mut min) => {
                            // The minimum node has no children after being
                            // unlinked from "right".
                            debug_assert!(min.left.is_none());
                            debug_assert!(min.right.is_none());

                            min.right = Some(right);
                            min
                        }
                        // "right" has no left child, so it is the successor.
                        None => right,
                    };

                    successor.left = Some(left);
                    Some(successor)
                }
            };

            old.key
        }
    };

    // The subtree root may have been replaced, or removed entirely.
    if let Some(v) = slot.as_mut() {
        rebalance_after_remove(v);
    }

    Some(removed)
}

/// Extracts the node holding the minimum subtree value in a descendent of
/// `root`, if any, linking the right subtree of the extracted node to in its
/// place.
///
/// Returns [`None`] if `root` itself holds the minimum.
fn extract_subtree_min<K>(root: &mut Box<Node<K>>) -> Option<Box<Node<K>>> {
    // Descend left to the leaf.
    let v = match extract_subtree_min(root.left.as_mut()?) {
        Some(v) => Some(v),
        None => {
            // The left child is the end of the left edge.
            //
            // ```text
            //                 6
            //                / \
            //    here ->   <4>   7
            //                \
            //                 5
            // ```
            //
            // Unlink the right node of the left root, which will become the new
            // left node of "root" (if any).
            let left_right = root.left.as_mut().and_then(|v| v.right.take());

            std::mem::replace(&mut root.left, left_right)
        }
    };

    rebalance_after_remove(root);
    v
}

fn rebalance_after_remove<K>(v: &mut Box<Node<K>>) {
    // Recompute the height of the relocated node.
    update_height(v);

    // And rebalance the subtree, tie-breaking on the balance of the heavier
    // child.
    match balance(v) {
        (2..) if v.left().map(balance).unwrap_or_default() >= 0 => {
            rotate_right(v);
        }
        (2..) => {
            rotate_left(v.left.as_mut().expect("left heavy node has a left child"));
            rotate_right(v);
        }
        (..=-2) if v.right().map(balance).unwrap_or_default() <= 0 => {
            rotate_left(v);
        }
        (..=-2) => {
            rotate_right(v.right.as_mut().expect("right heavy node has a right child"));
            rotate_left(v);
        }

        #[allow(clippy::manual_range_patterns)]
        -1 | 0 | 1 => { /* balanced */ }
    }

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1 after removing a value.
    debug_assert!(balance(v).abs() <= 1);
}
