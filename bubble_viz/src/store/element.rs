// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallvec::SmallVec;

use crate::ARRAY_LEN_MAX;

/// One bar in the visualization.
///
/// - `is_comparing` is only `true` while this element is one of the two that are
///   highlighted by an active comparison or swap.
/// - `is_sorted` is `true` once the element's final position is guaranteed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element {
    pub value: u8,
    pub is_comparing: bool,
    pub is_sorted: bool,
}

impl Element {
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self {
            value,
            is_comparing: false,
            is_sorted: false,
        }
    }
}

impl From<u8> for Element {
    fn from(value: u8) -> Self { Self::new(value) }
}

pub type ElementVec = SmallVec<[Element; ARRAY_LEN_MAX]>;
pub type ValueVec = SmallVec<[u8; ARRAY_LEN_MAX]>;
