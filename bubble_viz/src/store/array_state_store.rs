// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::{Arc, Mutex, MutexGuard, PoisonError}};

use rand::Rng;

use crate::{ARRAY_LEN_MAX, ARRAY_LEN_MIN, DEBUG_STORE_MOD, IndexError,
            RANDOM_ARRAY_LEN, RANDOM_VALUE_MAX, RANDOM_VALUE_MIN, StoreSnapshot,
            SubscriberList, SubscriptionId, VALUE_MAX, VALUE_MIN, ValidationError,
            ValueVec};

/// Holds the authoritative [`StoreSnapshot`] and publishes a copy of it to every
/// subscriber after each mutation.
///
/// This is a cheap to clone handle, all clones share the same state. Every operation
/// locks, mutates, publishes, and unlocks, so:
/// 1. No subscriber can observe a half applied operation.
/// 2. Subscribers observe snapshots in the exact order the operations were applied.
///
/// Operations that fail (bad index, bad input) change nothing and publish nothing.
#[derive(Clone)]
pub struct ArrayStateStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    snapshot: StoreSnapshot,
    subscribers: SubscriberList,
}

impl Debug for ArrayStateStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ArrayStateStore")
            .field("snapshot", &inner.snapshot)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

mod constructor {
    use super::*;

    impl ArrayStateStore {
        /// Creates a store holding a freshly randomized array.
        #[must_use]
        pub fn new_random() -> Self {
            Self::from_snapshot(StoreSnapshot::from_values(&generate_random_values()))
        }

        /// Creates a store holding the given values.
        ///
        /// # Errors
        ///
        /// Returns a [`ValidationError`] if the values don't satisfy the length and range
        /// rules.
        pub fn try_from_values(values: &[u8]) -> Result<Self, ValidationError> {
            validate_values(values)?;
            Ok(Self::from_snapshot(StoreSnapshot::from_values(values)))
        }

        fn from_snapshot(snapshot: StoreSnapshot) -> Self {
            Self {
                inner: Arc::new(Mutex::new(StoreInner {
                    snapshot,
                    subscribers: SubscriberList::default(),
                })),
            }
        }
    }
}

mod read_access {
    use super::*;

    impl ArrayStateStore {
        /// The most recently published snapshot.
        #[must_use]
        pub fn snapshot(&self) -> StoreSnapshot { self.lock().snapshot.clone() }

        #[must_use]
        pub fn values(&self) -> ValueVec { self.lock().snapshot.values() }

        #[must_use]
        pub fn len(&self) -> usize { self.lock().snapshot.len() }

        #[must_use]
        pub fn is_empty(&self) -> bool { self.lock().snapshot.is_empty() }

        #[must_use]
        pub fn is_sorting(&self) -> bool { self.lock().snapshot.control.sorting }
    }
}

mod subscriptions {
    use super::*;

    impl ArrayStateStore {
        /// Register a subscriber. See [`crate::SubscriberFn`] for the rules it must
        /// follow.
        pub fn subscribe(
            &self,
            fn_ref: impl Fn(&StoreSnapshot) + Send + Sync + 'static,
        ) -> SubscriptionId {
            self.lock().subscribers.push(fn_ref)
        }

        /// Returns `true` if the subscriber was registered.
        pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
            self.lock().subscribers.remove(id)
        }
    }
}

/// Wholesale replacement of the array. These are never invoked while a sort is in
/// progress, [`crate::SortController`] disables them in that state.
mod reset_ops {
    use super::*;

    impl ArrayStateStore {
        /// Replace the array with `values` (all flags cleared), zero the counters, clear
        /// `complete` and `sorting`.
        ///
        /// # Errors
        ///
        /// The input is re-validated, and a [`ValidationError`] is returned if it
        /// doesn't satisfy the length and range rules. Nothing is changed in that case.
        pub fn reset(&self, values: &[u8]) -> Result<(), ValidationError> {
            validate_values(values)?;
            self.apply(|snapshot| replace_array(snapshot, values));
            DEBUG_STORE_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(message = "ArrayStateStore::reset", values = ?values);
            });
            Ok(())
        }

        /// Same as [`Self::reset`] with [`RANDOM_ARRAY_LEN`] values drawn uniformly
        /// from [`RANDOM_VALUE_MIN`]..=[`RANDOM_VALUE_MAX`].
        pub fn randomize(&self) {
            let values = generate_random_values();
            self.apply(|snapshot| replace_array(snapshot, &values));
            DEBUG_STORE_MOD.then(|| {
                tracing::debug!(message = "ArrayStateStore::randomize", values = ?values);
            });
        }
    }

    fn replace_array(snapshot: &mut StoreSnapshot, values: &[u8]) {
        let running = snapshot.control.running;
        *snapshot = StoreSnapshot::from_values(values);
        // The run flag belongs to the user, a reset doesn't touch it.
        snapshot.control.running = running;
    }
}

/// Mutations that the [`crate::SortDriver`] performs while it is sorting.
mod driver_ops {
    use super::*;

    impl ArrayStateStore {
        /// Sets `is_comparing` on the elements at `i` and `j`.
        ///
        /// # Errors
        ///
        /// Returns an [`IndexError`] if `i` or `j` is out of bounds.
        pub fn set_comparing(&self, i: usize, j: usize, value: bool) -> Result<(), IndexError> {
            self.try_apply(|snapshot| {
                check_index(snapshot, i)?;
                check_index(snapshot, j)?;
                snapshot.elements[i].is_comparing = value;
                snapshot.elements[j].is_comparing = value;
                Ok(())
            })
        }

        /// Exchanges the values at `i` and `j`. The flags stay where they are.
        ///
        /// # Errors
        ///
        /// Returns an [`IndexError`] if `i` or `j` is out of bounds.
        pub fn swap_values(&self, i: usize, j: usize) -> Result<(), IndexError> {
            self.try_apply(|snapshot| {
                check_index(snapshot, i)?;
                check_index(snapshot, j)?;
                let elements = &mut snapshot.elements;
                let value_i = elements[i].value;
                elements[i].value = elements[j].value;
                elements[j].value = value_i;
                Ok(())
            })
        }

        /// Sets `is_sorted` for every element at position `from_index` or later. When
        /// `from_index` is equal to the length, this is a no-op (but still publishes).
        ///
        /// # Errors
        ///
        /// Returns an [`IndexError`] if `from_index` is greater than the length.
        pub fn mark_settled_suffix(&self, from_index: usize) -> Result<(), IndexError> {
            self.try_apply(|snapshot| {
                let len = snapshot.len();
                if from_index > len {
                    return Err(IndexError {
                        index: from_index,
                        len,
                    });
                }
                for element in &mut snapshot.elements[from_index..] {
                    element.is_sorted = true;
                }
                Ok(())
            })
        }

        pub fn increment_iteration(&self) {
            self.apply(|snapshot| snapshot.counters.iterations += 1);
        }

        pub fn increment_comparison(&self) {
            self.apply(|snapshot| snapshot.counters.comparisons += 1);
        }

        pub fn increment_swap(&self) { self.apply(|snapshot| snapshot.counters.swaps += 1); }
    }

    fn check_index(snapshot: &StoreSnapshot, index: usize) -> Result<(), IndexError> {
        let len = snapshot.len();
        if index < len {
            Ok(())
        } else {
            Err(IndexError { index, len })
        }
    }
}

/// Transitions of [`crate::RunControlState`].
///
/// ```text
/// Idle ──try_begin_sorting──► Sorting ──finish_sorting──► Complete
///  ▲                            │ ▲                          │  │
///  └───────cancel_sorting───────┘ └────try_begin_sorting─────┘  │
///  ▲                                                            │
///  └───────────────────────reset / randomize────────────────────┘
/// ```
mod run_control_ops {
    use super::*;

    impl ArrayStateStore {
        /// Mirror the user's run flag into the published state. Raising it on a complete
        /// array clears `complete`, since a new run over the sorted array is about to
        /// begin.
        pub fn set_running(&self, running: bool) {
            self.apply(|snapshot| {
                snapshot.control.running = running;
                if running {
                    snapshot.control.complete = false;
                }
            });
        }

        /// Atomically performs `Idle -> Sorting` or `Complete -> Sorting`. Returns the
        /// values to seed the driver's private working copy with, or [None] if a sort
        /// is already in progress (in which case nothing is published).
        #[must_use]
        pub fn try_begin_sorting(&self) -> Option<ValueVec> {
            let mut inner = self.lock();
            let control = &mut inner.snapshot.control;
            if control.sorting {
                return None;
            }
            control.sorting = true;
            control.complete = false;
            let seed = inner.snapshot.values();
            inner.subscribers.publish(&inner.snapshot);
            Some(seed)
        }

        /// `Sorting -> Idle`, for cooperative cancellation. Any highlight that is still
        /// showing is cleared so that no element is stuck with `is_comparing`.
        pub fn cancel_sorting(&self) {
            self.apply(|snapshot| {
                snapshot.control.sorting = false;
                for element in &mut snapshot.elements {
                    element.is_comparing = false;
                }
            });
        }

        /// `Sorting -> Complete`. Every element is marked sorted and un-highlighted, and
        /// `running` and `sorting` are both cleared, in one publication.
        pub fn finish_sorting(&self) {
            self.apply(|snapshot| {
                mark_all_sorted(snapshot);
                snapshot.control.running = false;
                snapshot.control.sorting = false;
                snapshot.control.complete = true;
            });
        }
    }

    fn mark_all_sorted(snapshot: &mut StoreSnapshot) {
        for element in &mut snapshot.elements {
            element.is_sorted = true;
            element.is_comparing = false;
        }
    }
}

mod publish {
    use super::*;

    impl ArrayStateStore {
        /// Lock poisoning is recovered from, because every operation fully validates
        /// before it mutates anything.
        pub(super) fn lock(&self) -> MutexGuard<'_, StoreInner> {
            self.inner.lock().unwrap_or_else(PoisonError::into_inner)
        }

        pub(super) fn apply(&self, mutate: impl FnOnce(&mut StoreSnapshot)) {
            let mut inner = self.lock();
            mutate(&mut inner.snapshot);
            inner.subscribers.publish(&inner.snapshot);
        }

        pub(super) fn try_apply<E>(
            &self,
            mutate: impl FnOnce(&mut StoreSnapshot) -> Result<(), E>,
        ) -> Result<(), E> {
            let mut inner = self.lock();
            mutate(&mut inner.snapshot)?;
            inner.subscribers.publish(&inner.snapshot);
            Ok(())
        }
    }
}

/// Length in [`ARRAY_LEN_MIN`]..=[`ARRAY_LEN_MAX`] and every value in
/// [`VALUE_MIN`]..=[`VALUE_MAX`].
///
/// # Errors
///
/// Returns the first rule that is violated, values are checked before the length.
pub fn validate_values(values: &[u8]) -> Result<(), ValidationError> {
    if let Some(value) = values
        .iter()
        .find(|it| !(VALUE_MIN..=VALUE_MAX).contains(*it))
    {
        return Err(ValidationError::OutOfRange {
            token: value.to_string(),
        });
    }
    match values.len() {
        count if count < ARRAY_LEN_MIN => Err(ValidationError::TooFew { count }),
        count if count > ARRAY_LEN_MAX => Err(ValidationError::TooMany { count }),
        _ => Ok(()),
    }
}

#[must_use]
pub fn generate_random_values() -> ValueVec {
    let mut rng = rand::rng();
    (0..RANDOM_ARRAY_LEN)
        .map(|_| rng.random_range(RANDOM_VALUE_MIN..=RANDOM_VALUE_MAX))
        .collect()
}
