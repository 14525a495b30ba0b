// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property equivalence policies.

/// An equivalence relation over region properties.
///
/// The relation must be reflexive and symmetric. It may evolve over time, but
/// only by gaining pairs: once `equivalent(a, b)` has returned `true` for two
/// values, it must keep doing so. A property is *zero* when it is equivalent to
/// the tree's zero value (`P::default()`).
///
/// Any `Fn(&P, &P) -> bool` is an equivalence policy. Closures that read shared
/// state (a [`Cell`](core::cell::Cell) holding a watermark, say) can make values
/// equivalent after the fact; the tree then compacts them lazily.
pub trait PropertyEq<P: ?Sized> {
    /// Whether `a` and `b` can be used interchangeably.
    fn equivalent(&self, a: &P, b: &P) -> bool;
}

/// Equivalence by [`PartialEq`]. This relation never evolves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Equal;

impl<P: PartialEq + ?Sized> PropertyEq<P> for Equal {
    #[inline]
    fn equivalent(&self, a: &P, b: &P) -> bool {
        a == b
    }
}

impl<P: ?Sized, F> PropertyEq<P> for F
where
    F: Fn(&P, &P) -> bool,
{
    #[inline]
    fn equivalent(&self, a: &P, b: &P) -> bool {
        self(a, b)
    }
}
