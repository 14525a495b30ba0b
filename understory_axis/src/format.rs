// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable rendering of boundaries and intervals.

use alloc::string::String;
use core::fmt::{self, Display, Write};

use crate::endpoint::Endpoint;

/// Renders boundaries and intervals of type `B` as text.
///
/// Implementations write into any [`fmt::Write`] sink; the `format_*` helpers
/// collect the output into a [`String`].
pub trait IntervalFormatter<B> {
    /// Write a bare boundary.
    fn write_boundary(&self, out: &mut dyn Write, b: &B) -> fmt::Result;

    /// Write the interval spanning `start` to `end`.
    fn write_interval(&self, out: &mut dyn Write, start: &B, end: &B) -> fmt::Result;

    /// Format a bare boundary into a new string.
    fn format_boundary(&self, b: &B) -> String {
        collect(|out| self.write_boundary(out, b))
    }

    /// Format an interval into a new string.
    fn format_interval(&self, start: &B, end: &B) -> String {
        collect(|out| self.write_interval(out, start, end))
    }
}

fn collect(write: impl FnOnce(&mut dyn Write) -> fmt::Result) -> String {
    let mut s = String::new();
    // Writing into a `String` cannot fail.
    let _ = write(&mut s);
    s
}

/// Formats [`Display`] boundaries as half-open intervals: `[start, end)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BasicFormatter;

impl<B: Display> IntervalFormatter<B> for BasicFormatter {
    fn write_boundary(&self, out: &mut dyn Write, b: &B) -> fmt::Result {
        write!(out, "{b}")
    }

    fn write_interval(&self, out: &mut dyn Write, start: &B, end: &B) -> fmt::Result {
        write!(out, "[{start}, {end})")
    }
}

/// Formats [`Endpoint`] intervals with their openness, e.g. `(1, 5]`.
///
/// The inner formatter renders the underlying boundary values. A bare endpoint
/// boundary that sits just after its value is suffixed with `+`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointFormatter<F> {
    inner: F,
}

impl<F> EndpointFormatter<F> {
    /// Wrap a formatter for the underlying boundary type.
    pub const fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<B, F: IntervalFormatter<B>> IntervalFormatter<Endpoint<B>> for EndpointFormatter<F> {
    fn write_boundary(&self, out: &mut dyn Write, e: &Endpoint<B>) -> fmt::Result {
        self.inner.write_boundary(out, &e.b)?;
        if e.plus_epsilon {
            out.write_char('+')?;
        }
        Ok(())
    }

    fn write_interval(
        &self,
        out: &mut dyn Write,
        start: &Endpoint<B>,
        end: &Endpoint<B>,
    ) -> fmt::Result {
        out.write_char(if start.plus_epsilon { '(' } else { '[' })?;
        self.inner.write_boundary(out, &start.b)?;
        out.write_str(", ")?;
        self.inner.write_boundary(out, &end.b)?;
        out.write_char(if end.plus_epsilon { ']' } else { ')' })
    }
}
