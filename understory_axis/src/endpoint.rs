// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclusive/exclusive interval ends encoded as ordered values.

use core::cmp::Ordering;

use crate::order::AxisOrder;

/// Whether an interval contains its end value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Inclusivity {
    /// The end value is part of the interval.
    Inclusive,
    /// The end value is not part of the interval.
    Exclusive,
}

/// A boundary value, optionally nudged by an infinitesimal amount.
///
/// `Endpoint { b, plus_epsilon: true }` sits just after `b` and before any value
/// greater than `b`. This lets half-open structures express every openness
/// combination: the interval `(1, 5]` becomes the half-open endpoint interval
/// `[1+, 5+)`.
///
/// The derived ordering compares `b` first and then `plus_epsilon`, with
/// `false < true`. Use [`EndpointOrder`] when `B` is ordered by a custom
/// [`AxisOrder`] instead of [`Ord`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Endpoint<B> {
    /// The boundary value.
    pub b: B,
    /// Whether the endpoint sits just after `b`.
    pub plus_epsilon: bool,
}

impl<B> Endpoint<B> {
    /// The endpoint exactly at `b`.
    #[inline]
    pub const fn at(b: B) -> Self {
        Self {
            b,
            plus_epsilon: false,
        }
    }

    /// The endpoint just after `b`.
    #[inline]
    pub const fn after(b: B) -> Self {
        Self {
            b,
            plus_epsilon: true,
        }
    }

    /// The endpoint that starts an interval at `b`.
    ///
    /// An exclusive start excludes `b` itself, so it sits just after `b`.
    #[inline]
    pub fn start(b: B, inclusivity: Inclusivity) -> Self {
        match inclusivity {
            Inclusivity::Inclusive => Self::at(b),
            Inclusivity::Exclusive => Self::after(b),
        }
    }

    /// The endpoint that ends an interval at `b`.
    ///
    /// An inclusive end includes `b` itself, so it sits just after `b`.
    #[inline]
    pub fn end(b: B, inclusivity: Inclusivity) -> Self {
        match inclusivity {
            Inclusivity::Inclusive => Self::after(b),
            Inclusivity::Exclusive => Self::at(b),
        }
    }

    /// Both endpoints of an interval, as `(start, end)`.
    #[inline]
    pub fn interval(
        start: B,
        start_inclusivity: Inclusivity,
        end: B,
        end_inclusivity: Inclusivity,
    ) -> (Self, Self) {
        (
            Self::start(start, start_inclusivity),
            Self::end(end, end_inclusivity),
        )
    }

    /// The inclusivity of this endpoint when it starts an interval.
    #[inline]
    pub const fn start_inclusivity(&self) -> Inclusivity {
        if self.plus_epsilon {
            Inclusivity::Exclusive
        } else {
            Inclusivity::Inclusive
        }
    }

    /// The inclusivity of this endpoint when it ends an interval.
    #[inline]
    pub const fn end_inclusivity(&self) -> Inclusivity {
        if self.plus_epsilon {
            Inclusivity::Inclusive
        } else {
            Inclusivity::Exclusive
        }
    }
}

/// Lifts an [`AxisOrder`] over `B` to an order over [`Endpoint<B>`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointOrder<O>(pub O);

impl<B, O: AxisOrder<B>> AxisOrder<Endpoint<B>> for EndpointOrder<O> {
    #[inline]
    fn compare(&self, a: &Endpoint<B>, b: &Endpoint<B>) -> Ordering {
        self.0
            .compare(&a.b, &b.b)
            .then(a.plus_epsilon.cmp(&b.plus_epsilon))
    }
}
