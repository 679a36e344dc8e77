// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Element, ElementVec, RunControlState, RunCounters, ValueVec};

/// Immutable copy of everything the rendering surface needs. A new one is published
/// after every mutation of [`crate::ArrayStateStore`], with all of that mutation's
/// changes applied.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct StoreSnapshot {
    pub elements: ElementVec,
    pub counters: RunCounters,
    pub control: RunControlState,
}

impl StoreSnapshot {
    #[must_use]
    pub fn from_values(values: &[u8]) -> Self {
        Self {
            elements: values.iter().copied().map(Element::new).collect(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.elements.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.elements.is_empty() }

    #[must_use]
    pub fn values(&self) -> ValueVec { self.elements.iter().map(|it| it.value).collect() }

    /// Positions of the elements that are currently highlighted.
    #[must_use]
    pub fn comparing_indices(&self) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(index, it)| it.is_comparing.then_some(index))
            .collect()
    }

    #[must_use]
    pub fn is_any_comparing(&self) -> bool { self.elements.iter().any(|it| it.is_comparing) }

    #[must_use]
    pub fn is_all_sorted(&self) -> bool { self.elements.iter().all(|it| it.is_sorted) }
}
