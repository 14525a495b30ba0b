// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_axis --heading-base-level=0

//! Understory Axis: ordering and interval text helpers for one-dimensional axes.
//!
//! This crate holds the small collaborators that axis-based structures (such as
//! `understory_region_tree`) are parameterized over:
//!
//! - [`AxisOrder`]: a total order over boundary values. [`NaturalOrder`] uses [`Ord`];
//!   any `Fn(&B, &B) -> Ordering` closure works too.
//! - [`Endpoint`]: encodes an inclusive or exclusive interval end as a `(value, plus_epsilon)`
//!   pair, so that comparing endpoints reduces to ordinary ordered comparison.
//! - [`IntervalFormatter`] and [`IntervalParser`]: a human-readable interval syntax,
//!   `[start, end)` for half-open intervals and `(`/`]` for the other openness combinations.
//!
//! Axis boundaries are opaque: only their relative order matters, and nothing here
//! performs arithmetic on them.
//!
//! # Example
//!
//! ```rust
//! use understory_axis::{
//!     BasicFormatter, BasicParser, Endpoint, EndpointFormatter, EndpointParser, Inclusivity,
//!     IntervalFormatter, IntervalParser,
//! };
//!
//! // Half-open integer intervals.
//! let (start, end, rest) = BasicParser::<i32>::new()
//!     .parse_interval_prefix("[1, 5) +3")
//!     .unwrap();
//! assert_eq!((start, end, rest), (1, 5, "+3"));
//!
//! // Endpoints support all four openness combinations and round-trip through text.
//! let (s, e) = Endpoint::interval(1, Inclusivity::Exclusive, 5, Inclusivity::Inclusive);
//! let fmt = EndpointFormatter::new(BasicFormatter);
//! let text = fmt.format_interval(&s, &e);
//! assert_eq!(text, "(1, 5]");
//! assert_eq!(EndpointParser::new(BasicParser::new()).parse_interval(&text), Ok((s, e)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod endpoint;
mod format;
mod order;
mod parse;

pub use endpoint::{Endpoint, EndpointOrder, Inclusivity};
pub use format::{BasicFormatter, EndpointFormatter, IntervalFormatter};
pub use order::{AxisOrder, NaturalOrder};
pub use parse::{BasicParser, EndpointParser, IntervalParser, ParseError};
