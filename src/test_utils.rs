use std::fmt::{Debug, Display, Write};

use proptest::prelude::*;

use crate::{node::height, AvlTree, Node};

const KEY_MAX: u16 = 64;

/// Generate arbitrary keys from [0..[`KEY_MAX`]).
///
/// A small key domain encourages multiple operations to act on the same key.
pub(crate) fn arbitrary_key() -> impl Strategy<Value = u16> {
    0..KEY_MAX
}

/// Return the keys of `t` in in-order traversal order.
pub(crate) fn in_order<K>(t: &AvlTree<K>) -> Vec<&K> {
    fn recurse<'a, K>(n: Option<&'a Node<K>>, out: &mut Vec<&'a K>) {
        if let Some(n) = n {
            recurse(n.left(), out);
            out.push(n.key());
            recurse(n.right(), out);
        }
    }

    let mut out = Vec::with_capacity(t.len());
    recurse(t.root(), &mut out);
    out
}

/// Assert the BST and AVL properties of tree nodes, ensuring the tree is
/// well-formed.
pub(crate) fn validate_tree_structure<K>(t: &AvlTree<K>)
where
    K: Ord + Debug,
{
    let root = match t.root() {
        Some(v) => v,
        None => {
            assert_eq!(t.len(), 0);
            assert_eq!(t.height(), 0);
            return;
        }
    };

    assert_eq!(t.height(), root.height());

    let mut n_nodes = 0;

    // Perform a pre-order traversal of the tree.
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        n_nodes += 1;

        // Prepare to visit the children
        stack.extend(n.left().iter().chain(n.right().iter()));

        // Invariant 1: the left child always contains a value strictly
        // less than this node.
        assert!(n.left().map(|v| v.key() < n.key()).unwrap_or(true));

        // Invariant 2: the right child always contains a value strictly
        // greater than this node.
        assert!(n.right().map(|v| v.key() > n.key()).unwrap_or(true));

        // Invariant 3: the height of this node is always +1 of the
        // maximum child height, where an absent child has height 0.
        let left_height = height(n.left());
        let right_height = height(n.right());
        let want_height = left_height.max(right_height) + 1;

        assert_eq!(
            n.height(),
            want_height,
            "expect node with key {:?} to have height {}, has {}",
            n.key(),
            want_height,
            n.height(),
        );

        // Invariant 4: the absolute height difference between the left
        // subtree and right subtree (the "balance factor") cannot
        // exceed 1.
        let balance = (left_height as i64 - right_height as i64).abs();
        assert!(balance <= 1, "balance={balance}, node={n:?}");
        assert_eq!(n.balance_factor() as i64, left_height as i64 - right_height as i64);
    }

    // Invariant 5: the tree tracks the number of nodes it holds.
    assert_eq!(n_nodes, t.len());

    // And the in-order traversal is strictly increasing, covering the BST
    // property across subtrees rather than only between parent and child.
    let keys = in_order(t);
    for window in keys.windows(2) {
        assert!(window[0] < window[1], "out of order: {window:?}");
    }
}

/// Render the subtree rooted at `n` as a Graphviz digraph, for debugging
/// failing tests.
pub(crate) fn print_dot<K>(n: &Node<K>) -> String
where
    K: Display,
{
    let mut buf = String::new();

    writeln!(buf, "digraph {{").unwrap();
    writeln!(buf, r#"bgcolor = "transparent";"#).unwrap();
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    )
    .unwrap();
    recurse(n, &mut buf);
    writeln!(buf, "}}").unwrap();

    buf
}

fn recurse<K, W>(n: &Node<K>, buf: &mut W)
where
    W: std::fmt::Write,
    K: Display,
{
    writeln!(
        buf,
        r#""{}" [label="{} | {{ h={} | b={} }}"];"#,
        n.key(),
        n.key(),
        n.height(),
        n.balance_factor(),
    )
    .unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    n.key(),
                    v.key()
                )
                .unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "\"null_{}\" [shape=point,style=invis];", n.key()).unwrap();
                writeln!(buf, "\"{}\" -> \"null_{}\" [style=invis];", n.key(), n.key()).unwrap();
            }
        };
    }
}
