// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_region_tree --heading-base-level=0

//! Understory Region Tree: a self-compacting partition of a one-dimensional axis.
//!
//! A [`RegionTree`] splits an unbounded, ordered axis into contiguous regions, each
//! tagged with a property. Range updates rewrite the property of every point in a
//! half-open range; queries report the maximal runs of non-zero property.
//!
//! - Boundaries are opaque values ordered by an [`AxisOrder`] policy ([`NaturalOrder`]
//!   by default). Use [`Endpoint`](understory_axis::Endpoint) boundaries for closed or
//!   open interval ends.
//! - Properties are compared by a [`PropertyEq`] policy ([`Equal`] by default). The
//!   policy may evolve and make values equivalent after the fact (for example, when
//!   a watermark expires old entries); the tree then compacts lazily during reads.
//! - Adjacent regions with equivalent properties are always merged, so the tree stays
//!   proportional to the number of distinct runs.
//! - Clones are O(1) and fully independent, backed by [`CowMap`], a persistent
//!   ordered map with path copying.
//!
//! # Example
//!
//! ```rust
//! use understory_axis::BasicFormatter;
//! use understory_region_tree::RegionTree;
//!
//! let mut tree = RegionTree::<i32, i32>::new();
//! tree.update(&1, &5, |p| p + 1);
//! tree.update(&2, &6, |p| p + 2);
//!
//! // Snapshots are cheap and independent.
//! let snapshot = tree.clone();
//! tree.update(&1, &3, |p| p - 1);
//!
//! assert_eq!(
//!     snapshot.display(&BasicFormatter).to_string(),
//!     "[1, 2) = 1\n[2, 5) = 3\n[5, 6) = 2\n"
//! );
//! assert_eq!(
//!     tree.display(&BasicFormatter).to_string(),
//!     "[2, 3) = 2\n[3, 5) = 3\n[5, 6) = 2\n"
//! );
//! ```
//!
//! Expiring properties with an evolving equivalence:
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_region_tree::RegionTree;
//!
//! // Properties are expiry times; anything older than the watermark counts as zero.
//! let watermark = Rc::new(Cell::new(0_u32));
//! let w = Rc::clone(&watermark);
//! let expired = move |a: &u32, b: &u32| a == b || (*a < w.get() && *b < w.get());
//!
//! let mut leases = RegionTree::<u64, u32, _>::with_equivalence(expired);
//! leases.update(&0, &100, |_| 10);
//! leases.update(&50, &150, |_| 20);
//! assert!(!leases.is_empty());
//!
//! watermark.set(15);
//! let mut live = Vec::new();
//! leases.enumerate_all(|start, end, expiry| {
//!     live.push((*start, *end, *expiry));
//!     true
//! });
//! assert_eq!(live, [(50, 150, 20)]);
//!
//! watermark.set(25);
//! assert!(leases.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod cow_map;
mod equivalence;
#[cfg(test)]
mod naive;
mod tree;

pub use cow_map::CowMap;
pub use equivalence::{Equal, PropertyEq};
pub use tree::{RegionTree, RegionsDisplay};
pub use understory_axis::{AxisOrder, NaturalOrder};
