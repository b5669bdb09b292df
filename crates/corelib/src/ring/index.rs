//! Ordered index backing the ring.
//!
//! An AVL tree keyed by ring position. Inserts, removals and neighbour
//! queries are all O(log n) in the number of stored placements.
//!
//! The index is linear, not circular: [`RingIndex::next`] past the largest
//! key and [`RingIndex::previous`] before the smallest return `None`, and the
//! caller wraps to [`RingIndex::first`] / [`RingIndex::last`].

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::error::{Error, Result};

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    /// Height of the subtree rooted here; a leaf has height 1.
    height: u32,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> i64 {
        i64::from(height(&self.left)) - i64::from(height(&self.right))
    }
}

fn height<K, V>(link: &Link<K, V>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Restore the AVL property at `node`, assuming both subtrees satisfy it.
fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        if node.left.as_ref().map_or(0, |l| l.balance_factor()) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        if node.right.as_ref().map_or(0, |r| r.balance_factor()) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

fn insert<K: Ord, V>(link: Link<K, V>, key: K, value: V) -> (Box<Node<K, V>>, Option<V>) {
    let Some(mut node) = link else {
        return (Node::leaf(key, value), None);
    };

    let replaced = match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, replaced) = insert(node.left.take(), key, value);
            node.left = Some(child);
            replaced
        }
        Ordering::Greater => {
            let (child, replaced) = insert(node.right.take(), key, value);
            node.right = Some(child);
            replaced
        }
        Ordering::Equal => {
            // Shape is unchanged on overwrite.
            let old = mem::replace(&mut node.value, value);
            return (node, Some(old));
        }
    };

    (rebalance(node), replaced)
}

/// Detach the minimum node of a subtree, returning the rebalanced remainder.
fn take_min<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

fn remove<K: Ord, V>(link: Link<K, V>, key: &K) -> (Link<K, V>, Option<V>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, removed) = remove(node.left.take(), key);
            node.left = child;
            (Some(rebalance(node)), removed)
        }
        Ordering::Greater => {
            let (child, removed) = remove(node.right.take(), key);
            node.right = child;
            (Some(rebalance(node)), removed)
        }
        Ordering::Equal => {
            let Node {
                value, left, right, ..
            } = *node;
            let replacement = match (left, right) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    let (rest, mut successor) = take_min(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    Some(rebalance(successor))
                }
            };
            (replacement, Some(value))
        }
    }
}

/// Ordered map with strict successor / predecessor queries.
pub struct RingIndex<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K: Ord, V> RingIndex<K, V> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert or overwrite the entry at `key`, returning the previous value.
    ///
    /// # Arguments
    /// * `key` - Position to store at
    /// * `value` - Value for that position; replaces any existing one
    ///
    /// # Performance
    /// O(log n), with at most one rebalance per level on the way back up.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ringcore::RingIndex;
    ///
    /// let mut index = RingIndex::new();
    /// assert_eq!(index.set(10u32, "a"), None);
    /// assert_eq!(index.set(10u32, "b"), Some("a"));
    /// assert_eq!(index.len(), 1);
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let (root, replaced) = insert(self.root.take(), key, value);
        self.root = Some(root);
        if replaced.is_none() {
            self.len += 1;
        }
        replaced
    }

    /// Remove the entry at `key`. A missing key is a no-op returning `None`.
    pub fn clear(&mut self, key: &K) -> Option<V> {
        let (root, removed) = remove(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// The entry with the smallest key strictly greater than `key`.
    ///
    /// Does not wrap; see [`next_wrapping`](Self::next_wrapping).
    ///
    /// # Arguments
    /// * `key` - Lookup point; need not be stored in the index
    ///
    /// # Performance
    /// O(log n), one root-to-leaf descent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ringcore::RingIndex;
    ///
    /// let mut index = RingIndex::new();
    /// index.set(10u32, "a");
    /// index.set(20u32, "b");
    /// assert_eq!(index.next(&10), Some((&20, &"b")));
    /// assert_eq!(index.next(&15), Some((&20, &"b")));
    /// assert_eq!(index.next(&20), None);
    /// ```
    pub fn next(&self, key: &K) -> Option<(&K, &V)> {
        let mut best = None;
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            if node.key > *key {
                best = Some(node);
                cursor = node.left.as_deref();
            } else {
                cursor = node.right.as_deref();
            }
        }
        best.map(|node| (&node.key, &node.value))
    }

    /// The entry with the largest key strictly less than `key`.
    ///
    /// Does not wrap; see [`previous_wrapping`](Self::previous_wrapping).
    ///
    /// # Arguments
    /// * `key` - Lookup point; need not be stored in the index
    ///
    /// # Performance
    /// O(log n), one root-to-leaf descent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ringcore::RingIndex;
    ///
    /// let mut index = RingIndex::new();
    /// index.set(10u32, "a");
    /// index.set(20u32, "b");
    /// assert_eq!(index.previous(&20), Some((&10, &"a")));
    /// assert_eq!(index.previous(&15), Some((&10, &"a")));
    /// assert_eq!(index.previous(&10), None);
    /// ```
    pub fn previous(&self, key: &K) -> Option<(&K, &V)> {
        let mut best = None;
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            if node.key < *key {
                best = Some(node);
                cursor = node.right.as_deref();
            } else {
                cursor = node.left.as_deref();
            }
        }
        best.map(|node| (&node.key, &node.value))
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Result<(&K, &V)> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyIndex)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok((&node.key, &node.value))
    }

    /// The entry with the largest key.
    pub fn last(&self) -> Result<(&K, &V)> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyIndex)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok((&node.key, &node.value))
    }

    /// Successor of `key`, wrapping to the first entry past the end.
    pub fn next_wrapping(&self, key: &K) -> Result<(&K, &V)> {
        match self.next(key) {
            Some(entry) => Ok(entry),
            None => self.first(),
        }
    }

    /// Predecessor of `key`, wrapping to the last entry before the start.
    pub fn previous_wrapping(&self, key: &K) -> Result<(&K, &V)> {
        match self.previous(key) {
            Some(entry) => Ok(entry),
            None => self.last(),
        }
    }

    /// In-order iterator over all entries.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::with_capacity(height(&self.root) as usize),
            remaining: self.len,
        };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Height of the tree; 0 when empty.
    pub fn height(&self) -> u32 {
        height(&self.root)
    }
}

impl<K: Ord, V> Default for RingIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for RingIndex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// In-order iterator over a [`RingIndex`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut cursor: Option<&'a Node<K, V>>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K: Ord, V> IntoIterator for &'a RingIndex<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
