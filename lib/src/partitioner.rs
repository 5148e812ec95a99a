// Copyright 2019 Lyndon Brown
//
// This file is part of the `adaptar` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Greedy range partitioning, a direct port of
//! `original_source/inc/argum/partitioner.h`'s `Partitioner<S>`.
//!
//! Given a total length `n` and `m` ranges `[a_i, b_i]`, finds counts `n_1..n_m, n_{m+1}` such
//! that `n_1 + .. + n_{m+1} == n`, `a_i <= n_i <= b_i`, and the partitioning is greedy: each range
//! consumes as much as it can, left to right, before the remainder (the `m+1`-th slot) absorbs
//! whatever is left.

pub const INFINITY: u32 = u32::MAX;

#[derive(Debug, Default)]
pub struct Partitioner {
    ranges: Vec<(u32, u32)>, // (minimum, length-above-minimum)
    minimum_expected: u32,
}

impl Partitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one range `[a, b]` (a positional's min/max occurrence count). `a <= b` required.
    pub fn add_range(&mut self, a: u32, b: u32) {
        assert!(a <= b, "partitioner range minimum ({a}) exceeds its maximum ({b})");
        let length = if b != INFINITY { b - a } else { INFINITY };
        self.ranges.push((a, length));
        self.minimum_expected = self.minimum_expected.saturating_add(a);
    }

    /// Number of partitions this will produce: one per added range, plus the remainder slot.
    pub fn partitions_count(&self) -> usize {
        self.ranges.len() + 1
    }

    /// The smallest total length that a successful partition requires.
    pub fn minimum_sequence_size(&self) -> u32 {
        self.minimum_expected
    }

    /// Partition `n` across the registered ranges, greedily, left to right. Returns `None` if `n`
    /// is smaller than [`minimum_sequence_size`](Self::minimum_sequence_size).
    pub fn partition(&self, n: u32) -> Option<Vec<u32>> {
        if n < self.minimum_expected {
            return None;
        }
        let mut remaining = n - self.minimum_expected;
        let mut results = Vec::with_capacity(self.partitions_count());
        for &(min, length) in &self.ranges {
            let take = remaining.min(length);
            remaining -= take;
            results.push(min + take);
        }
        results.push(remaining);
        Some(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_unbounded_range_takes_everything() {
        let mut p = Partitioner::new();
        p.add_range(0, INFINITY);
        assert_eq!(p.partition(5), Some(vec![5, 0]));
    }

    #[test]
    fn greedy_left_to_right() {
        let mut p = Partitioner::new();
        p.add_range(1, 3); // e.g. a positional taking 1..=3
        p.add_range(0, INFINITY); // the rest absorbed by a trailing catch-all
        // n=2: first range greedily wants up to 3 but only has 2 available total.
        assert_eq!(p.partition(2), Some(vec![2, 0]));
        // n=10: first range caps at 3, remainder carries the other 7.
        assert_eq!(p.partition(10), Some(vec![3, 7]));
    }

    #[test]
    fn below_minimum_fails() {
        let mut p = Partitioner::new();
        p.add_range(2, 4);
        assert_eq!(p.partition(1), None);
    }

    #[test]
    fn multiple_fixed_ranges() {
        let mut p = Partitioner::new();
        p.add_range(1, 1);
        p.add_range(2, 2);
        p.add_range(0, INFINITY);
        assert_eq!(p.partition(3), Some(vec![1, 2, 0]));
        assert_eq!(p.partition(5), Some(vec![1, 2, 2]));
        assert_eq!(p.minimum_sequence_size(), 3);
    }
}
