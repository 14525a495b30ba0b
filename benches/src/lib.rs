// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Workload generators shared by the region tree benchmarks.
//!
//! The mix models a range-annotation workload: ranges start at a uniformly
//! random boundary and span an exponentially distributed number of boundaries;
//! 5% of operations increment the range, 5% reset it, and the rest enumerate it.
//!
//! Run:
//! - `cargo bench -p understory_benches`

use rand::Rng;

/// Length of the shared prefix of [`byte_keys`], which makes comparisons
/// expensive.
pub const BYTE_KEY_PREFIX_LEN: usize = 500;

/// `n` ascending integer boundaries.
pub fn int_keys(n: usize) -> Vec<u64> {
    (0..n as u64).collect()
}

/// `n` ascending byte-string boundaries sharing a long common prefix.
pub fn byte_keys(n: usize) -> Vec<Vec<u8>> {
    let prefix: Vec<u8> = (b'a'..=b'z').cycle().take(BYTE_KEY_PREFIX_LEN).collect();
    (0..n)
        .map(|i| {
            let mut key = prefix.clone();
            key.extend_from_slice(format!("-{i:05}").as_bytes());
            key
        })
        .collect()
}

/// One step of the benchmark workload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Op {
    /// Add one to every property in the range.
    Increment,
    /// Reset every property in the range to zero.
    Reset,
    /// Enumerate the non-zero runs in the range.
    Enumerate,
}

/// Draw the next operation.
pub fn pick_op<R: Rng>(rng: &mut R) -> Op {
    match rng.random_range(0..100) {
        0..5 => Op::Increment,
        5..10 => Op::Reset,
        _ => Op::Enumerate,
    }
}

/// Draw a range `(start, end)` of indices into a key slice of length `len`.
///
/// `start < end < len`, and `end - start - 1` is exponentially distributed with
/// mean `mean_len` before clamping. `len` must be at least 2.
#[allow(
    clippy::cast_possible_truncation,
    reason = "range lengths are clamped to the key count right after"
)]
pub fn pick_range<R: Rng>(rng: &mut R, len: usize, mean_len: usize) -> (usize, usize) {
    debug_assert!(len >= 2, "need at least two keys to form a range");
    let start = rng.random_range(0..len - 1);
    let u: f64 = rng.random();
    let extra = (-(1.0 - u).ln() * mean_len as f64) as usize;
    let end = start.saturating_add(1).saturating_add(extra).min(len - 1);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn keys_are_ascending() {
        let ints = int_keys(50);
        assert!(ints.windows(2).all(|w| w[0] < w[1]));
        let bytes = byte_keys(50);
        assert!(bytes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(bytes[0].len(), BYTE_KEY_PREFIX_LEN + 6);
    }

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let (s, e) = pick_range(&mut rng, 100, 10);
            assert!(s < e && e < 100, "bad range {s}..{e}");
        }
    }

    #[test]
    fn op_mix_is_mostly_reads() {
        let mut rng = StdRng::seed_from_u64(7);
        let reads = (0..10_000)
            .filter(|_| pick_op(&mut rng) == Op::Enumerate)
            .count();
        assert!((8_500..9_500).contains(&reads), "unexpected mix: {reads}");
    }
}
