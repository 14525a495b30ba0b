// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordering policies for axis boundaries.

use core::cmp::Ordering;

/// A strict total order over boundary values of type `B`.
///
/// Implementations must be consistent: `compare(a, b)` is the reverse of
/// `compare(b, a)`, and the relation is transitive. Only the relative order of
/// boundaries is ever observed; no arithmetic is assumed.
///
/// Any `Fn(&B, &B) -> Ordering` is an ordering policy, which is convenient for
/// keys that are ordered in a non-standard way:
///
/// ```rust
/// use core::cmp::Ordering;
/// use understory_axis::AxisOrder;
///
/// let reversed = |a: &i32, b: &i32| b.cmp(a);
/// assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
/// ```
pub trait AxisOrder<B: ?Sized> {
    /// Compare two boundaries.
    fn compare(&self, a: &B, b: &B) -> Ordering;

    /// Whether `a` sorts strictly before `b`.
    #[inline]
    fn less(&self, a: &B, b: &B) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// Orders boundaries by their [`Ord`] implementation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<B: Ord + ?Sized> AxisOrder<B> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &B, b: &B) -> Ordering {
        a.cmp(b)
    }
}

impl<B: ?Sized, F> AxisOrder<B> for F
where
    F: Fn(&B, &B) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &B, b: &B) -> Ordering {
        self(a, b)
    }
}
