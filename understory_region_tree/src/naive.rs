// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense per-point reference model used to cross-check the tree in tests.

use alloc::vec;
use alloc::vec::Vec;

/// One `i32` property per integer point of `[0, len)`.
#[derive(Clone, Debug)]
pub(crate) struct Dense {
    values: Vec<i32>,
}

impl Dense {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            values: vec![0; len],
        }
    }

    pub(crate) fn add(&mut self, start: usize, end: usize, delta: i32) {
        for v in self.values.iter_mut().take(end).skip(start) {
            *v += delta;
        }
    }

    pub(crate) fn set(&mut self, start: usize, end: usize, value: i32) {
        for v in self.values.iter_mut().take(end).skip(start) {
            *v = value;
        }
    }

    /// Maximal runs of equal non-zero values within `[start, end)`.
    pub(crate) fn runs(&self, start: usize, end: usize) -> Vec<(usize, usize, i32)> {
        self.runs_by(start, end, |v| v)
    }

    /// Like [`runs`](Self::runs), with every value first mapped through `view`.
    pub(crate) fn runs_by(
        &self,
        start: usize,
        end: usize,
        view: impl Fn(i32) -> i32,
    ) -> Vec<(usize, usize, i32)> {
        let mut out = Vec::new();
        if start >= end {
            return out;
        }
        let mut run_start = start;
        for i in start + 1..=end {
            if i == end || view(self.values[i]) != view(self.values[run_start]) {
                let v = view(self.values[run_start]);
                if v != 0 {
                    out.push((run_start, i, v));
                }
                run_start = i;
            }
        }
        out
    }

    pub(crate) fn any(&self, start: usize, end: usize, pred: impl Fn(i32) -> bool) -> bool {
        start < end && self.values[start..end].iter().any(|v| pred(*v))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.is_empty_by(|v| v)
    }

    pub(crate) fn is_empty_by(&self, view: impl Fn(i32) -> i32) -> bool {
        self.values.iter().all(|v| view(*v) == 0)
    }
}
