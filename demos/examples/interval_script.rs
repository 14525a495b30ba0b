// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a region tree from an interval script.
//!
//! Each line is an interval with inclusive or exclusive ends followed by a
//! signed delta, e.g. `(1, 5] +2`. Endpoint boundaries let a half-open tree
//! represent every openness combination exactly.
//!
//! Run:
//! - `cargo run -p understory_demos --example interval_script`

use understory_axis::{
    BasicFormatter, BasicParser, Endpoint, EndpointFormatter, EndpointParser, IntervalParser,
};
use understory_region_tree::RegionTree;

const SCRIPT: &str = "\
[0, 10) +1
(2, 4] +2
[4, 4] -2
[6, 8) -1
10, 12) +1
(7, 9] nine
";

fn main() {
    let parser = EndpointParser::new(BasicParser::<i64>::new());
    let formatter = EndpointFormatter::new(BasicFormatter);
    let mut tree = RegionTree::<Endpoint<i64>, i64>::new();

    for line in SCRIPT.lines() {
        let (start, end, rest) = match parser.parse_interval_prefix(line) {
            Ok(parsed) => parsed,
            Err(err) => {
                println!("skipping {line:?}: {err}");
                continue;
            }
        };
        let delta = match rest.parse::<i64>() {
            Ok(delta) => delta,
            Err(err) => {
                println!("skipping {line:?}: bad delta {rest:?} ({err})");
                continue;
            }
        };
        tree.update(&start, &end, |p| p + delta);
        println!("after {line}:\n{}\n", tree.display(&formatter));
    }

    tree.check_invariants_strict();
}
