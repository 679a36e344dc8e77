// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Smallest array that can be sorted.
pub const ARRAY_LEN_MIN: usize = 2;
/// Largest array that can be sorted. This is also the inline capacity of
/// [`crate::ElementVec`] and [`crate::ValueVec`], so they never spill to the heap.
pub const ARRAY_LEN_MAX: usize = 15;

/// Range of values a user is allowed to type in.
pub const VALUE_MIN: u8 = 1;
pub const VALUE_MAX: u8 = 99;

/// Shape of the array produced by [`crate::ArrayStateStore::randomize`]. The values are
/// kept small so the bars stay small.
pub const RANDOM_ARRAY_LEN: usize = 10;
pub const RANDOM_VALUE_MIN: u8 = 10;
pub const RANDOM_VALUE_MAX: u8 = 39;
