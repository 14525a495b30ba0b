// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cheap snapshots of an annotated key space.
//!
//! Every edit is applied to a clone of the previous version, so all versions
//! stay readable. Clones share storage until they are written, and each write
//! copies only the path it touches.
//!
//! Run:
//! - `cargo run -p understory_demos --example versioned_annotations`

use understory_axis::BasicFormatter;
use understory_region_tree::RegionTree;

#[derive(Clone, Debug, Default, PartialEq)]
enum Owner {
    #[default]
    Nobody,
    Team(&'static str),
}

fn main() {
    let edits: [(&str, &str, Owner); 4] = [
        ("apple", "melon", Owner::Team("fruit")),
        ("carrot", "kale", Owner::Team("veg")),
        ("date", "fig", Owner::Nobody),
        ("kale", "zucchini", Owner::Team("veg")),
    ];

    let mut current = RegionTree::<&str, Owner>::new();
    let mut versions = vec![current.clone()];
    for (start, end, owner) in edits {
        current.update(&start, &end, |_| owner.clone());
        versions.push(current.clone());
    }

    for (i, version) in versions.iter().enumerate() {
        println!(
            "version {i} ({} boundaries):\n{}\n",
            version.boundary_count(),
            version.display(&BasicFormatter)
        );
    }

    // Who owned "grape" over time?
    for (i, version) in versions.iter_mut().enumerate() {
        let mut owner = Owner::Nobody;
        version.enumerate(&"grape", &"grape\0", |_, _, o| {
            owner = o.clone();
            false
        });
        println!("version {i}: grape -> {owner:?}");
    }
}
