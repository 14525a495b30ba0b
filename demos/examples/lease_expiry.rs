// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expiring range leases with an evolving property equivalence.
//!
//! Each region holds the expiry time of the lease covering it. Raising the
//! clock makes every expired lease equivalent to "no lease", without touching
//! the tree; stale boundaries are dropped the next time a read walks past them.
//!
//! Run:
//! - `cargo run -p understory_demos --example lease_expiry`

use std::cell::Cell;
use std::rc::Rc;

use understory_axis::BasicFormatter;
use understory_region_tree::{PropertyEq, RegionTree};

/// Extend the lease on `[start, end)` to at least `until`.
fn grant<E: PropertyEq<u32>>(tree: &mut RegionTree<u64, u32, E>, start: u64, end: u64, until: u32) {
    tree.update(&start, &end, |p| (*p).max(until));
}

fn main() {
    let clock = Rc::new(Cell::new(0_u32));
    let now = Rc::clone(&clock);
    let expired = move |a: &u32, b: &u32| a == b || (*a <= now.get() && *b <= now.get());

    // Keys are block offsets; a lease extends any older lease it overlaps.
    let mut leases = RegionTree::<u64, u32, _>::with_equivalence(expired);
    grant(&mut leases, 0, 4096, 10);
    grant(&mut leases, 1024, 2048, 30);
    grant(&mut leases, 8192, 12288, 20);

    println!("t=0\n{}", leases.display(&BasicFormatter));
    println!("boundaries stored: {}", leases.boundary_count());

    for t in [15, 25, 35] {
        clock.set(t);
        // Shared reads see the new clock immediately but leave storage alone.
        let mut live = 0_u64;
        leases.visit(&0, &u64::MAX, |start, end, _| {
            live += end - start;
            true
        });
        println!("\nt={t}: {live} blocks leased");
        println!("{}", leases.display(&BasicFormatter));
        println!("boundaries before sweep: {}", leases.boundary_count());
        leases.enumerate_all(|_, _, _| true);
        println!("boundaries after sweep: {}", leases.boundary_count());
    }

    assert!(leases.is_empty());
}
