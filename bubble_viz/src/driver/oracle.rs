// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{RunCounters, ValueVec};

/// What a textbook optimized bubble sort does to `values`, computed without any of the
/// animation machinery. Useful to check the [`crate::SortDriver`] against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortStats {
    pub sorted: ValueVec,
    pub counters: RunCounters,
}

/// - Outer pass `i` in `0..n-1`, inner index `j` in `0..n-i-1`.
/// - Stops after the first pass with no swaps.
/// - `iterations` counts only the passes that performed at least one swap.
#[must_use]
pub fn bubble_sort_stats(values: &[u8]) -> SortStats {
    let mut sorted = ValueVec::from_slice(values);
    let mut counters = RunCounters::default();
    let n = sorted.len();

    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..(n - i - 1) {
            counters.comparisons += 1;
            if sorted[j] > sorted[j + 1] {
                sorted.swap(j, j + 1);
                counters.swaps += 1;
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
        counters.iterations += 1;
    }

    SortStats { sorted, counters }
}

/// Number of pairs `(a, b)` with `a` before `b` and `a > b`. Every adjacent swap fixes
/// exactly one of these, so this is also the swap count of any adjacent swap sort.
#[must_use]
pub fn count_inversions(values: &[u8]) -> u32 {
    let mut count = 0;
    for (index, a) in values.iter().enumerate() {
        for b in &values[index + 1..] {
            if a > b {
                count += 1;
            }
        }
    }
    count
}
