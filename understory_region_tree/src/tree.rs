// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region tree: boundary lifecycle, range updates, compaction, and queries.

use core::fmt::{self, Debug};

use smallvec::SmallVec;
use understory_axis::{AxisOrder, IntervalFormatter, NaturalOrder};

use crate::cow_map::CowMap;
use crate::equivalence::{Equal, PropertyEq};

/// Boundaries found to be redundant during a scan, removed once the scan ends.
type Staged<B> = SmallVec<[B; 8]>;

/// A partition of a one-dimensional axis into regions tagged with properties.
///
/// Each stored boundary `b` starts a region that extends to the next stored
/// boundary, or to +∞ for the last one. Points before the first boundary carry
/// the zero property, `P::default()`. Zero regions are never reported by queries.
///
/// The tree keeps itself compacted:
///
/// - boundaries are strictly increasing under the ordering policy `O`;
/// - adjacent regions never carry equivalent properties under `E`;
/// - the last region always carries a zero property.
///
/// When `E` evolves (see [`PropertyEq`]), neighbors can become equivalent without
/// any update touching them. Such boundaries are removed lazily by
/// [`enumerate`](Self::enumerate), [`enumerate_all`](Self::enumerate_all) and
/// [`is_empty`](Self::is_empty) when they walk past them, which is why those take
/// `&mut self`. Lazy removal is never needed for the next query to be correct.
///
/// [`Clone`] is O(1). The clone shares storage with the original until one of them
/// is updated, and updates on either side are never visible to the other.
///
/// ## Example
///
/// ```rust
/// use understory_region_tree::RegionTree;
///
/// let mut tree = RegionTree::<i32, i32>::new();
/// tree.update(&1, &5, |p| p + 1);
/// tree.update(&2, &6, |p| p + 2);
///
/// let mut runs = Vec::new();
/// tree.enumerate(&0, &10, |start, end, p| {
///     runs.push((*start, *end, *p));
///     true
/// });
/// assert_eq!(runs, [(1, 2, 1), (2, 5, 3), (5, 6, 2)]);
/// ```
pub struct RegionTree<B, P, E = Equal, O = NaturalOrder> {
    regions: CowMap<B, P, O>,
    eq: E,
    zero: P,
}

impl<B, P: Default> RegionTree<B, P> {
    /// Create an empty tree with natural boundary order and [`PartialEq`] properties.
    pub fn new() -> Self {
        Self::with_policies(NaturalOrder, Equal)
    }
}

impl<B, P: Default, E> RegionTree<B, P, E> {
    /// Create an empty tree with natural boundary order and a custom equivalence.
    pub fn with_equivalence(eq: E) -> Self {
        Self::with_policies(NaturalOrder, eq)
    }
}

impl<B, P: Default, E, O> RegionTree<B, P, E, O> {
    /// Create an empty tree with custom ordering and equivalence policies.
    pub fn with_policies(order: O, eq: E) -> Self {
        Self {
            regions: CowMap::with_order(order),
            eq,
            zero: P::default(),
        }
    }
}

impl<B, P: Default, E: Default, O: Default> Default for RegionTree<B, P, E, O> {
    fn default() -> Self {
        Self::with_policies(O::default(), E::default())
    }
}

impl<B, P: Clone, E: Clone, O: Clone> Clone for RegionTree<B, P, E, O> {
    /// O(1): the clone shares all storage until either tree is updated.
    fn clone(&self) -> Self {
        Self {
            regions: self.regions.clone(),
            eq: self.eq.clone(),
            zero: self.zero.clone(),
        }
    }
}

impl<B, P, E, O> Debug for RegionTree<B, P, E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionTree")
            .field("boundaries", &self.regions.len())
            .finish_non_exhaustive()
    }
}

impl<B, P, E, O> RegionTree<B, P, E, O> {
    /// Number of stored boundaries.
    ///
    /// This is a diagnostic: lazily compactable boundaries are counted until a
    /// read removes them.
    pub const fn boundary_count(&self) -> usize {
        self.regions.len()
    }
}

impl<B, P, E, O> RegionTree<B, P, E, O>
where
    B: Clone,
    P: Clone,
    E: PropertyEq<P>,
    O: AxisOrder<B>,
{
    /// Replace the property of every point in `[start, end)` with `f` of its
    /// current property.
    ///
    /// `f` is called once per distinct region inside the range, not once per
    /// point, so it must be a pure function of its argument. An empty range
    /// (`start >= end`) is a no-op.
    ///
    /// Afterwards, boundaries made redundant by the update are removed. That scan
    /// continues past `end` until the first boundary that is still needed, with
    /// no fixed bound; each removed boundary was inserted by an earlier update,
    /// so the cost is amortized.
    pub fn update<F>(&mut self, start: &B, end: &B, mut f: F)
    where
        F: FnMut(&P) -> P,
    {
        if !self.regions.order().less(start, end) {
            return;
        }
        self.ensure_boundary(start);
        self.ensure_boundary(end);
        self.regions.update_range(start, end, |_, p| *p = f(&*p));
        self.compact(start, end);
    }

    /// Emit every maximal run of non-zero property overlapping `[start, end)`,
    /// clipped to that range, in ascending order.
    ///
    /// Adjacent runs never carry equivalent properties. Enumeration stops once
    /// `emit` returns `false`.
    ///
    /// Boundaries found to be redundant along the way are removed, including
    /// those passed before an early stop.
    pub fn enumerate<F>(&mut self, start: &B, end: &B, emit: F)
    where
        F: FnMut(&B, &B, &P) -> bool,
    {
        if self.regions.len() < 2 || !self.regions.order().less(start, end) {
            return;
        }
        let mut staged = Staged::new();
        self.scan(Some((start, end)), |b| staged.push(b.clone()), emit);
        self.retire(staged);
    }

    /// Emit every maximal run of non-zero property, in ascending order.
    ///
    /// Same contract as [`enumerate`](Self::enumerate) over the whole axis.
    pub fn enumerate_all<F>(&mut self, emit: F)
    where
        F: FnMut(&B, &B, &P) -> bool,
    {
        let mut staged = Staged::new();
        self.scan(None, |b| staged.push(b.clone()), emit);
        self.retire(staged);
    }

    /// Like [`enumerate`](Self::enumerate), but never modifies the tree.
    ///
    /// Redundant boundaries are merged over in the output and left in place.
    pub fn visit<F>(&self, start: &B, end: &B, emit: F)
    where
        F: FnMut(&B, &B, &P) -> bool,
    {
        if self.regions.len() < 2 || !self.regions.order().less(start, end) {
            return;
        }
        self.scan(Some((start, end)), |_| {}, emit);
    }

    /// Whether every point of the axis carries a zero property.
    ///
    /// Leading boundaries whose property has become zero are removed.
    pub fn is_empty(&mut self) -> bool {
        if self.regions.len() < 2 {
            return true;
        }
        let staged: Staged<B> = self
            .regions
            .iter()
            .take_while(|(_, p)| self.is_zero(p))
            .map(|(b, _)| b.clone())
            .collect();
        self.retire(staged);
        self.regions.len() < 2
    }

    /// Whether `pred` holds for the property of any point in `[start, end)`.
    ///
    /// Zero-property points are tested too, with whatever value the tree stores
    /// for them. Returns `false` for an empty range.
    pub fn any<F>(&self, start: &B, end: &B, mut pred: F) -> bool
    where
        F: FnMut(&P) -> bool,
    {
        let order = self.regions.order();
        if !order.less(start, end) {
            return false;
        }
        if pred(self.prop_at(start)) {
            return true;
        }
        self.regions
            .ascend_from(start)
            .take_while(|(b, _)| order.less(b, end))
            .filter(|(b, _)| order.less(start, b))
            .any(|(_, p)| pred(p))
    }

    /// Render every non-zero run, one `interval = property` line each, using
    /// `formatter` for the intervals. An empty tree renders as `<empty>`.
    ///
    /// Rendering never modifies the tree.
    pub fn display<'a, F>(&'a self, formatter: &'a F) -> RegionsDisplay<'a, B, P, E, O, F>
    where
        F: IntervalFormatter<B>,
    {
        RegionsDisplay {
            tree: self,
            formatter,
        }
    }

    /// Panic if the tree is out of order, a property is not equivalent to
    /// itself, or the last region is not zero.
    ///
    /// Meant for tests and debugging; a failure means the ordering or
    /// equivalence policy broke its contract.
    pub fn check_invariants(&self) {
        let order = self.regions.order();
        let mut prev: Option<&B> = None;
        for (b, p) in self.regions.iter() {
            if let Some(prev) = prev {
                assert!(order.less(prev, b), "region boundaries not increasing");
            }
            assert!(
                self.eq.equivalent(p, p),
                "region property is not equivalent to itself"
            );
            prev = Some(b);
        }
        if let Some((_, last)) = self.regions.last_key_value() {
            assert!(self.is_zero(last), "last region must have the zero property");
        }
    }

    /// [`check_invariants`](Self::check_invariants), and also panic if two
    /// adjacent regions carry equivalent properties.
    ///
    /// Only holds while the equivalence relation has not gained pairs since the
    /// last update; after that, redundant boundaries may linger until a read
    /// reaches them.
    pub fn check_invariants_strict(&self) {
        self.check_invariants();
        let mut prev = &self.zero;
        for (_, p) in self.regions.iter() {
            assert!(
                !self.eq.equivalent(prev, p),
                "adjacent regions have equivalent properties"
            );
            prev = p;
        }
    }

    fn is_zero(&self, p: &P) -> bool {
        self.eq.equivalent(p, &self.zero)
    }

    /// Property of the region covering `at`.
    fn prop_at(&self, at: &B) -> &P {
        self.regions
            .descend_from(at)
            .next()
            .map_or(&self.zero, |(_, p)| p)
    }

    /// Property of the region that ends at `at`, if a boundary precedes it.
    fn prop_before(&self, at: &B) -> Option<&P> {
        let order = self.regions.order();
        self.regions
            .descend_from(at)
            .find(|(b, _)| order.less(b, at))
            .map(|(_, p)| p)
    }

    /// Split the region covering `at` so that a boundary sits exactly at `at`.
    fn ensure_boundary(&mut self, at: &B) {
        let covering = match self.regions.descend_from(at).next() {
            Some((b, _)) if !self.regions.order().less(b, at) => return,
            Some((_, p)) => p.clone(),
            None => self.zero.clone(),
        };
        self.regions.insert(at.clone(), covering);
    }

    /// Remove redundant boundaries from `start` onwards, stopping at the first
    /// needed boundary past `end`.
    fn compact(&mut self, start: &B, end: &B) {
        let mut staged = Staged::new();
        let order = self.regions.order();
        let mut prev = self.prop_before(start).unwrap_or(&self.zero);
        for (b, p) in self.regions.ascend_from(start) {
            if self.eq.equivalent(prev, p) {
                staged.push(b.clone());
            } else if order.less(end, b) {
                break;
            } else {
                prev = p;
            }
        }
        self.retire(staged);
    }

    fn retire(&mut self, staged: Staged<B>) {
        for b in &staged {
            let removed = self.regions.remove(b);
            debug_assert!(removed.is_some(), "staged boundary was already removed");
        }
    }

    /// Walk the boundaries in `window` (or all of them), merging runs of
    /// equivalent properties.
    ///
    /// `redundant` receives each boundary that starts a region equivalent to the
    /// one before it. `emit` receives non-zero runs until it returns `false`.
    fn scan<R, F>(&self, window: Option<(&B, &B)>, mut redundant: R, mut emit: F)
    where
        R: FnMut(&B),
        F: FnMut(&B, &B, &P) -> bool,
    {
        let order = self.regions.order();
        let (mut run_start, mut run_prop, boundaries) = match window {
            Some((start, _)) => (
                Some(start),
                self.prop_before(start).unwrap_or(&self.zero),
                self.regions.ascend_from(start),
            ),
            None => (None, &self.zero, self.regions.iter()),
        };
        let end = window.map(|(_, end)| end);
        for (b, p) in boundaries {
            if end.is_some_and(|end| !order.less(b, end)) {
                break;
            }
            if self.eq.equivalent(run_prop, p) {
                redundant(b);
                continue;
            }
            if let Some(s) = run_start
                && order.less(s, b)
                && !self.is_zero(run_prop)
                && !emit(s, b, run_prop)
            {
                return;
            }
            run_start = Some(b);
            run_prop = p;
        }
        // The region running to +∞ is zero, so only a window has a final run.
        if let (Some(s), Some(end)) = (run_start, end)
            && !self.is_zero(run_prop)
        {
            emit(s, end, run_prop);
        }
    }
}

/// [`Display`](fmt::Display) adapter returned by [`RegionTree::display`].
pub struct RegionsDisplay<'a, B, P, E, O, F> {
    tree: &'a RegionTree<B, P, E, O>,
    formatter: &'a F,
}

impl<B, P, E, O, F> Debug for RegionsDisplay<'_, B, P, E, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionsDisplay")
            .field("tree", self.tree)
            .finish_non_exhaustive()
    }
}

impl<B, P, E, O, F> fmt::Display for RegionsDisplay<'_, B, P, E, O, F>
where
    B: Clone,
    P: Clone + Debug,
    E: PropertyEq<P>,
    O: AxisOrder<B>,
    F: IntervalFormatter<B>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = Ok(());
        let mut empty = true;
        self.tree.scan(
            None,
            |_| {},
            |start, end, prop| {
                empty = false;
                result = self.formatter.write_interval(f, start, end);
                if result.is_ok() {
                    result = writeln!(f, " = {prop:?}");
                }
                result.is_ok()
            },
        );
        result?;
        if empty { f.write_str("<empty>") } else { Ok(()) }
    }
}
