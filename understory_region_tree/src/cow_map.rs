// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistent ordered map with O(1) copy-on-write clones.
//!
//! [`CowMap`] is an AVL tree whose nodes are shared through [`Arc`]. Cloning a map
//! only clones the root handle. A mutation walks from the root to the affected
//! node and calls [`Arc::make_mut`] on every node it passes: nodes that are
//! uniquely owned are modified in place, nodes that are shared with another map
//! are copied first (path copying). A copied node keeps pointing at the same
//! children, so everything off the touched path stays shared.
//!
//! As a result, mutating a clone never changes what the original observes and
//! vice versa, and the cost of a mutation is proportional to the path it rewrites
//! rather than to the size of the map. `Arc` is used rather than `Rc` so that
//! independent clones can be handed to different threads.

use alloc::sync::Arc;
use core::cmp::Ordering;
use core::fmt::{self, Debug};
use core::mem;

use smallvec::SmallVec;
use understory_axis::{AxisOrder, NaturalOrder};

type Link<K, V> = Option<Arc<Node<K, V>>>;

/// Iterator stack, one node per tree level. An AVL tree of a million entries is
/// at most 28 levels deep; deeper paths spill to the heap.
type Stack<'a, K, V> = SmallVec<[&'a Node<K, V>; 32]>;

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    height: u8,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn fix_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance(&self) -> i16 {
        i16::from(height(&self.left)) - i16::from(height(&self.right))
    }
}

fn height<K, V>(link: &Link<K, V>) -> u8 {
    link.as_ref().map_or(0, |n| n.height)
}

fn balance<K, V>(link: &Link<K, V>) -> i16 {
    link.as_ref().map_or(0, |n| n.balance())
}

fn rotate_right<K: Clone, V: Clone>(link: &mut Link<K, V>) {
    let Some(mut root) = link.take() else {
        return;
    };
    let node = Arc::make_mut(&mut root);
    let Some(mut pivot) = node.left.take() else {
        *link = Some(root);
        return;
    };
    let p = Arc::make_mut(&mut pivot);
    node.left = p.right.take();
    node.fix_height();
    p.right = Some(root);
    p.fix_height();
    *link = Some(pivot);
}

fn rotate_left<K: Clone, V: Clone>(link: &mut Link<K, V>) {
    let Some(mut root) = link.take() else {
        return;
    };
    let node = Arc::make_mut(&mut root);
    let Some(mut pivot) = node.right.take() else {
        *link = Some(root);
        return;
    };
    let p = Arc::make_mut(&mut pivot);
    node.right = p.left.take();
    node.fix_height();
    p.left = Some(root);
    p.fix_height();
    *link = Some(pivot);
}

/// Restores the AVL balance of the subtree at `link` after one of its children
/// changed height by at most one.
fn rebalance<K: Clone, V: Clone>(link: &mut Link<K, V>) {
    let Some(arc) = link.as_mut() else {
        return;
    };
    let node = Arc::make_mut(arc);
    node.fix_height();
    let bf = node.balance();
    if bf > 1 {
        if balance(&node.left) < 0 {
            rotate_left(&mut node.left);
        }
        rotate_right(link);
    } else if bf < -1 {
        if balance(&node.right) > 0 {
            rotate_right(&mut node.right);
        }
        rotate_left(link);
    }
}

fn insert_at<K: Clone, V: Clone, O: AxisOrder<K>>(
    link: &mut Link<K, V>,
    key: K,
    value: V,
    order: &O,
) -> Option<V> {
    if link.is_none() {
        *link = Some(Arc::new(Node::leaf(key, value)));
        return None;
    }
    let node = Arc::make_mut(link.as_mut()?);
    let replaced = match order.compare(&key, &node.key) {
        Ordering::Less => insert_at(&mut node.left, key, value, order),
        Ordering::Greater => insert_at(&mut node.right, key, value, order),
        Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
    };
    if replaced.is_none() {
        rebalance(link);
    }
    replaced
}

fn pop_min<K: Clone, V: Clone>(link: &mut Link<K, V>) -> Option<(K, V)> {
    if link.as_ref()?.left.is_some() {
        let node = Arc::make_mut(link.as_mut()?);
        let min = pop_min(&mut node.left);
        rebalance(link);
        min
    } else {
        let node = Arc::unwrap_or_clone(link.take()?);
        *link = node.right;
        Some((node.key, node.value))
    }
}

/// Removes the node at `link`, splicing in its in-order successor when it has
/// two children.
fn unlink<K: Clone, V: Clone>(link: &mut Link<K, V>) -> Option<V> {
    let Node {
        value, left, right, ..
    } = Arc::unwrap_or_clone(link.take()?);
    match (left, right) {
        (None, child) | (child, None) => *link = child,
        (left, mut right) => {
            let (key, successor) = pop_min(&mut right)?;
            *link = Some(Arc::new(Node {
                key,
                value: successor,
                height: 1,
                left,
                right,
            }));
            rebalance(link);
        }
    }
    Some(value)
}

fn remove_at<K: Clone, V: Clone, O: AxisOrder<K>>(
    link: &mut Link<K, V>,
    key: &K,
    order: &O,
) -> Option<V> {
    let ord = order.compare(key, &link.as_ref()?.key);
    let removed = match ord {
        Ordering::Equal => return unlink(link),
        Ordering::Less => remove_at(&mut Arc::make_mut(link.as_mut()?).left, key, order),
        Ordering::Greater => remove_at(&mut Arc::make_mut(link.as_mut()?).right, key, order),
    };
    if removed.is_some() {
        rebalance(link);
    }
    removed
}

fn update_range_at<K, V, O, F>(link: &mut Link<K, V>, start: &K, end: &K, order: &O, f: &mut F)
where
    K: Clone,
    V: Clone,
    O: AxisOrder<K>,
    F: FnMut(&K, &mut V),
{
    let Some(arc) = link.as_mut() else {
        return;
    };
    let node = Arc::make_mut(arc);
    let at_or_after_start = !order.less(&node.key, start);
    let before_end = order.less(&node.key, end);
    if at_or_after_start {
        update_range_at(&mut node.left, start, end, order, f);
    }
    if at_or_after_start && before_end {
        f(&node.key, &mut node.value);
    }
    if before_end {
        update_range_at(&mut node.right, start, end, order, f);
    }
}

/// A persistent ordered map with O(1) copy-on-write [`Clone`].
///
/// Keys are ordered by an [`AxisOrder`] policy `O`, which defaults to
/// [`NaturalOrder`]. Keys and values must be [`Clone`] to be mutated, since a
/// shared node is copied before it is written.
///
/// ```rust
/// use understory_region_tree::CowMap;
///
/// let mut a = CowMap::new();
/// a.insert(1, "one");
/// a.insert(2, "two");
///
/// let mut b = a.clone();
/// b.insert(3, "three");
/// b.remove(&1);
///
/// assert_eq!(a.iter().map(|(k, _)| *k).collect::<Vec<_>>(), [1, 2]);
/// assert_eq!(b.iter().map(|(k, _)| *k).collect::<Vec<_>>(), [2, 3]);
/// ```
pub struct CowMap<K, V, O = NaturalOrder> {
    root: Link<K, V>,
    len: usize,
    order: O,
}

impl<K, V> CowMap<K, V> {
    /// Create an empty map ordered by [`Ord`].
    pub const fn new() -> Self {
        Self {
            root: None,
            len: 0,
            order: NaturalOrder,
        }
    }
}

impl<K, V, O: Default> Default for CowMap<K, V, O> {
    fn default() -> Self {
        Self::with_order(O::default())
    }
}

impl<K, V, O: Clone> Clone for CowMap<K, V, O> {
    /// Shares the whole tree with the new map; only the root handle is cloned.
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
            order: self.order.clone(),
        }
    }
}

impl<K: Debug, V: Debug, O> Debug for CowMap<K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, O> CowMap<K, V, O> {
    /// Create an empty map ordered by `order`.
    pub const fn with_order(order: O) -> Self {
        Self {
            root: None,
            len: 0,
            order,
        }
    }

    /// The ordering policy.
    pub const fn order(&self) -> &O {
        &self.order
    }

    /// Number of entries.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the map has no entries.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove all entries. Nodes shared with clones stay alive for them.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// All entries in ascending key order.
    pub fn iter(&self) -> Ascend<'_, K, V> {
        let mut it = Ascend {
            stack: SmallVec::new(),
        };
        it.push_left_spine(&self.root);
        it
    }

    /// The entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// The entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }
}

impl<K, V, O: AxisOrder<K>> CowMap<K, V, O> {
    /// The value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut link = &self.root;
        while let Some(node) = link.as_deref() {
            link = match self.order.compare(key, &node.key) {
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    /// Whether an entry is stored under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Entries with keys at or after `key`, in ascending order.
    ///
    /// Stop early by dropping the iterator; nothing past the last yielded entry
    /// is visited.
    pub fn ascend_from(&self, key: &K) -> Ascend<'_, K, V> {
        let mut stack = Stack::new();
        let mut link = &self.root;
        while let Some(node) = link.as_deref() {
            if self.order.less(&node.key, key) {
                link = &node.right;
            } else {
                stack.push(node);
                link = &node.left;
            }
        }
        Ascend { stack }
    }

    /// Entries with keys at or before `key`, in descending order.
    ///
    /// The first item, if any, is the floor of `key`: its greatest lower-or-equal
    /// stored key.
    pub fn descend_from(&self, key: &K) -> Descend<'_, K, V> {
        let mut stack = Stack::new();
        let mut link = &self.root;
        while let Some(node) = link.as_deref() {
            if self.order.less(key, &node.key) {
                link = &node.left;
            } else {
                stack.push(node);
                link = &node.right;
            }
        }
        Descend { stack }
    }
}

impl<K: Clone, V: Clone, O: AxisOrder<K>> CowMap<K, V, O> {
    /// Insert `value` under `key`, returning the value it replaced.
    ///
    /// When an equivalent key is already stored, the stored key is kept.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let replaced = insert_at(&mut self.root, key, value, &self.order);
        if replaced.is_none() {
            self.len += 1;
        }
        replaced
    }

    /// Remove the entry under `key`, returning its value.
    ///
    /// A miss leaves the map untouched, including any structure it shares with
    /// clones.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        if !self.contains_key(key) {
            return None;
        }
        let removed = remove_at(&mut self.root, key, &self.order);
        debug_assert!(removed.is_some(), "key vanished between lookup and removal");
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Call `f` on every entry with a key in `[start, end)`, in ascending order,
    /// allowing the value to be replaced in place.
    ///
    /// Runs in O(log N + K) for K visited entries and copies only shared nodes on
    /// the paths leading to them. An empty range touches nothing.
    pub fn update_range<F: FnMut(&K, &mut V)>(&mut self, start: &K, end: &K, mut f: F) {
        if !self.order.less(start, end) {
            return;
        }
        update_range_at(&mut self.root, start, end, &self.order, &mut f);
    }
}

/// Ascending iterator over a [`CowMap`], created by [`CowMap::iter`] and
/// [`CowMap::ascend_from`].
pub struct Ascend<'a, K, V> {
    stack: Stack<'a, K, V>,
}

impl<'a, K, V> Ascend<'a, K, V> {
    fn push_left_spine(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link.as_deref() {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, K, V> Iterator for Ascend<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        Some((&node.key, &node.value))
    }
}

impl<K, V> Debug for Ascend<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ascend")
            .field("pending_nodes", &self.stack.len())
            .finish_non_exhaustive()
    }
}

/// Descending iterator over a [`CowMap`], created by [`CowMap::descend_from`].
pub struct Descend<'a, K, V> {
    stack: Stack<'a, K, V>,
}

impl<'a, K, V> Iterator for Descend<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let mut link = &node.left;
        while let Some(child) = link.as_deref() {
            self.stack.push(child);
            link = &child.right;
        }
        Some((&node.key, &node.value))
    }
}

impl<K, V> Debug for Descend<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descend")
            .field("pending_nodes", &self.stack.len())
            .finish_non_exhaustive()
    }
}
