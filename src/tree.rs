use std::{alloc::Layout, borrow::Borrow};

use crate::{
    node::{self, Node},
    Error,
};

/// An ordered set of unique keys, stored in a height-balanced (AVL) binary
/// search tree.
///
/// Insertion, lookup and removal are `O(log n)`.
#[derive(Debug, Clone)]
pub struct AvlTree<K> {
    root: Option<Box<Node<K>>>,
    len: usize,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K> AvlTree<K> {
    /// Construct an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The height of the tree, which is 0 when empty and 1 for a single key.
    pub fn height(&self) -> u8 {
        node::height(self.root())
    }

    /// The root [`Node`] of the tree, if any.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Remove and release all keys in the tree.
    pub fn clear(&mut self) {
        // Dropping the root drops every descendant after the node owning it.
        drop(self.root.take());
        self.len = 0;
    }
}

impl<K> AvlTree<K>
where
    K: Ord,
{
    /// Insert `key` into the tree, returning true if it was not already
    /// present.
    ///
    /// Inserting a key that already exists is a no-op and returns false.
    ///
    /// # Aborts
    ///
    /// Like the standard library collections, this aborts the process via
    /// [`std::alloc::handle_alloc_error()`] if the new node cannot be
    /// allocated. Use [`AvlTree::try_insert()`] to handle allocation failure.
    pub fn insert(&mut self, key: K) -> bool {
        match self.try_insert(key) {
            Ok(v) => v,
            Err(Error::OutOfMemory(_)) => std::alloc::handle_alloc_error(Layout::new::<Node<K>>()),
        }
    }

    /// Insert `key` into the tree, returning `Ok(true)` if it was not already
    /// present.
    ///
    /// If the new node cannot be allocated, [`Error::OutOfMemory`] is returned
    /// and the tree is left unchanged.
    pub fn try_insert(&mut self, key: K) -> Result<bool, Error> {
        let inserted = node::insert(&mut self.root, key)?;
        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }

    /// Remove `key` from the tree, returning true if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Remove `key` from the tree, returning the stored key if it was present.
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let v = node::remove(&mut self.root, key)?;
        self.len -= 1;
        Some(v)
    }

    /// Return the [`Node`] holding `key`, if any.
    pub fn search<Q>(&self, key: &Q) -> Option<&Node<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root()?.search(key)
    }

    /// Return a reference to the stored key equal to `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).map(Node::key)
    }

    /// Returns true if `key` is stored in the tree.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Return the minimum key in the tree, if any.
    pub fn first(&self) -> Option<&K> {
        self.root().map(|v| v.min_node().key())
    }
}
