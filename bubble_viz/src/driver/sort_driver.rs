// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::Display;

use crate::{ArrayStateStore, CommonResult, DEBUG_DRIVER_MOD, RunFlag, SpeedControl};

/// How a call to [`SortDriver::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RunOutcome {
    /// The algorithm terminated and the store is now complete.
    Completed,
    /// The run flag was lowered. The store is idle, and a new run will start over from
    /// the first pass using whatever the array looks like now.
    Cancelled,
    /// Nothing happened: the run flag was not raised, or another run is already in
    /// progress.
    Rejected,
}

/// Walks bubble sort one comparison at a time, publishing every highlight and swap
/// through the [`ArrayStateStore`] and suspending between them so a human can follow.
///
/// The driver sorts a private working copy that is seeded from the store when the run
/// begins. It never reads the store back while it runs, it only publishes to it.
#[derive(Debug, Clone)]
pub struct SortDriver {
    store: ArrayStateStore,
}

impl SortDriver {
    #[must_use]
    pub fn new(store: ArrayStateStore) -> Self { Self { store } }

    #[must_use]
    pub fn store(&self) -> &ArrayStateStore { &self.store }

    /// Runs the sort until it completes, or until `run_flag` is lowered.
    ///
    /// Cancellation is polled at every comparison boundary. Lowering the flag also cuts
    /// short any delay that is in flight, and the rest of the step in progress is then
    /// published without waiting. The store is left with `sorting == false` and no
    /// element highlighted.
    ///
    /// The delay is read from `speed` right before each suspension.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::IndexError`] if the array in the store changed length while
    /// the sort was running. This is a bug in the caller, the store is returned to idle.
    pub async fn run(
        &self,
        run_flag: &RunFlag,
        speed: &SpeedControl,
    ) -> CommonResult<RunOutcome> {
        if !run_flag.is_raised() {
            return Ok(RunOutcome::Rejected);
        }

        let Some(working_copy) = self.store.try_begin_sorting() else {
            DEBUG_DRIVER_MOD.then(|| {
                tracing::debug!(message = "SortDriver::run -> rejected, already sorting");
            });
            return Ok(RunOutcome::Rejected);
        };

        DEBUG_DRIVER_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "SortDriver::run -> start",
                values = ?working_copy.as_slice(),
                delay_ms = %speed.get().as_millis()
            );
        });

        let result = self.sort(working_copy.into_vec(), run_flag, speed).await;

        match &result {
            Ok(RunOutcome::Completed) => {
                self.store.finish_sorting();
                run_flag.lower();
            }
            Ok(_) | Err(_) => self.store.cancel_sorting(),
        }

        DEBUG_DRIVER_MOD.then(|| {
            tracing::debug!(
                message = "SortDriver::run -> end",
                outcome = ?result,
                counters = ?self.store.snapshot().counters
            );
        });

        result
    }

    async fn sort(
        &self,
        mut working_copy: Vec<u8>,
        run_flag: &RunFlag,
        speed: &SpeedControl,
    ) -> CommonResult<RunOutcome> {
        let store = &self.store;
        let n = working_copy.len();

        for i in 0..n.saturating_sub(1) {
            let mut swapped = false;

            for j in 0..(n - i - 1) {
                if !run_flag.is_raised() {
                    return Ok(RunOutcome::Cancelled);
                }

                store.increment_comparison();
                store.set_comparing(j, j + 1, true)?;
                suspend(run_flag, speed).await;

                if working_copy[j] > working_copy[j + 1] {
                    store.increment_swap();
                    swapped = true;
                    working_copy.swap(j, j + 1);
                    store.swap_values(j, j + 1)?;
                    suspend(run_flag, speed).await;
                }

                store.set_comparing(j, j + 1, false)?;

                tracing::trace!(
                    message = "SortDriver::sort -> step",
                    pass = i,
                    index = j,
                    values = ?working_copy
                );
            }

            // A pass without swaps means the array is sorted.
            if !swapped {
                break;
            }

            store.increment_iteration();
            store.mark_settled_suffix(n - i - 1)?;
        }

        Ok(RunOutcome::Completed)
    }
}

/// Sleep for the current delay, or until the run flag is lowered, whichever happens
/// first.
async fn suspend(run_flag: &RunFlag, speed: &SpeedControl) {
    let delay = speed.get().as_duration();
    tokio::select! {
        () = tokio::time::sleep(delay) => {}
        () = run_flag.lowered() => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use tokio::time::{Duration, Instant};

    use super::*;
    use crate::{RunControlState, RunCounters, Speed, StoreSnapshot, bubble_sort_stats};

    fn new_driver(values: &[u8]) -> (SortDriver, Arc<Mutex<Vec<StoreSnapshot>>>) {
        let store = ArrayStateStore::try_from_values(values).unwrap();
        let acc = Arc::new(Mutex::new(vec![]));
        let acc_clone = acc.clone();
        store.subscribe(move |snapshot| acc_clone.lock().unwrap().push(snapshot.clone()));
        (SortDriver::new(store), acc)
    }

    #[tokio::test(start_paused = true)]
    async fn test_worked_example() {
        let (driver, _) = new_driver(&[5, 2, 9, 1, 5]);
        let run_flag = RunFlag::new(true);

        let outcome = driver.run(&run_flag, &SpeedControl::default()).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed);

        let snapshot = driver.store().snapshot();
        assert_eq!(snapshot.values().as_slice(), &[1, 2, 5, 5, 9]);
        assert_eq!(
            snapshot.counters,
            RunCounters {
                iterations: 3,
                comparisons: 10,
                swaps: 5,
            }
        );
        assert_eq!(
            snapshot.control,
            RunControlState {
                running: false,
                sorting: false,
                complete: true,
            }
        );
        assert!(snapshot.is_all_sorted());
        assert!(!snapshot.is_any_comparing());
        assert!(!run_flag.is_raised());
    }

    #[tokio::test(start_paused = true)]
    async fn test_publication_order_for_one_swap() {
        let (driver, published) = new_driver(&[2, 1]);
        driver
            .run(&RunFlag::new(true), &SpeedControl::default())
            .await
            .unwrap();

        let published = published.lock().unwrap();
        let steps: Vec<(u32, u32, Vec<usize>, Vec<u8>)> = published
            .iter()
            .map(|it| {
                (
                    it.counters.comparisons,
                    it.counters.swaps,
                    it.comparing_indices(),
                    it.values().to_vec(),
                )
            })
            .collect();

        assert_eq!(
            steps,
            vec![
                (0, 0, vec![], vec![2, 1]),     // begin sorting
                (1, 0, vec![], vec![2, 1]),     // comparison counter
                (1, 0, vec![0, 1], vec![2, 1]), // highlight
                (1, 1, vec![0, 1], vec![2, 1]), // swap counter
                (1, 1, vec![0, 1], vec![1, 2]), // swapped values
                (1, 1, vec![], vec![1, 2]),     // clear highlight
                (1, 1, vec![], vec![1, 2]),     // iteration counter
                (1, 1, vec![], vec![1, 2]),     // settled suffix
                (1, 1, vec![], vec![1, 2]),     // complete
            ]
        );
        assert_eq!(published[6].counters.iterations, 1);
        assert!(published[7].elements[1].is_sorted);
        assert!(!published[7].elements[0].is_sorted);
        assert!(published[8].control.complete);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_sorted_is_one_pass() {
        let (driver, _) = new_driver(&[1, 2, 3, 4, 5]);
        driver
            .run(&RunFlag::new(true), &SpeedControl::default())
            .await
            .unwrap();

        let snapshot = driver.store().snapshot();
        assert_eq!(
            snapshot.counters,
            RunCounters {
                iterations: 0,
                comparisons: 4,
                swaps: 0,
            }
        );
        assert!(snapshot.control.complete);
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_a_completed_array_again_is_one_pass() {
        let (driver, published) = new_driver(&[5, 2, 9, 1, 5]);
        let speed = SpeedControl::default();
        let outcome = driver.run(&RunFlag::new(true), &speed).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
        let before = driver.store().snapshot().counters;
        published.lock().unwrap().clear();

        let run_flag = RunFlag::new(true);
        let outcome = driver.run(&run_flag, &speed).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed);

        let snapshot = driver.store().snapshot();
        assert_eq!(snapshot.values().as_slice(), &[1, 2, 5, 5, 9]);
        assert_eq!(
            snapshot.counters,
            RunCounters {
                iterations: before.iterations,
                comparisons: before.comparisons + 4,
                swaps: before.swaps,
            }
        );
        assert_eq!(
            snapshot.control,
            RunControlState {
                running: false,
                sorting: false,
                complete: true,
            }
        );
        assert!(snapshot.is_all_sorted());
        assert!(!snapshot.is_any_comparing());
        assert!(!run_flag.is_raised());

        let published = published.lock().unwrap();
        // The second run left Complete as soon as it began.
        assert!(published[0].control.sorting);
        assert!(!published[0].control.complete);
        assert!(published.iter().all(|it| it.control.is_consistent()));
        assert!(published.iter().all(|it| it.counters.swaps == before.swaps));
    }

    #[tokio::test(start_paused = true)]
    async fn test_matches_oracle() {
        let inputs: [&[u8]; 5] = [
            &[99, 1],
            &[3, 3, 1, 1],
            &[10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 11, 12, 13, 14, 15],
            &[42, 17, 17, 8, 99, 1, 56],
            &[1, 99, 2, 98],
        ];
        for input in inputs {
            let (driver, _) = new_driver(input);
            driver
                .run(&RunFlag::new(true), &SpeedControl::default())
                .await
                .unwrap();
            let expected = bubble_sort_stats(input);
            let snapshot = driver.store().snapshot();
            assert_eq!(snapshot.values(), expected.sorted);
            assert_eq!(snapshot.counters, expected.counters);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_when_flag_lowered_or_already_sorting() {
        let (driver, published) = new_driver(&[2, 1]);

        let outcome = driver
            .run(&RunFlag::new(false), &SpeedControl::default())
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::Rejected);
        assert!(published.lock().unwrap().is_empty());

        let _seed = driver.store().try_begin_sorting();
        let outcome = driver
            .run(&RunFlag::new(true), &SpeedControl::default())
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::Rejected);
        // The other "run" still owns the array.
        assert!(driver.store().is_sorting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_at_comparison_boundary_then_resume() {
        let (driver, published) = new_driver(&[5, 2, 9, 1, 5]);
        let run_flag = RunFlag::new(true);

        // Lower the flag as soon as the third comparison is published.
        let flag_clone = run_flag.clone();
        driver.store().subscribe(move |snapshot| {
            if snapshot.counters.comparisons == 3 {
                flag_clone.lower();
            }
        });

        let outcome = driver.run(&run_flag, &SpeedControl::default()).await.unwrap();
        assert_eq!(outcome, RunOutcome::Cancelled);

        let snapshot = driver.store().snapshot();
        assert_eq!(snapshot.counters.comparisons, 3);
        assert!(!snapshot.control.sorting);
        assert!(!snapshot.control.complete);
        assert!(!snapshot.is_any_comparing());
        // The third comparison (9, 1) still finished its swap.
        assert_eq!(snapshot.values().as_slice(), &[2, 5, 1, 9, 5]);
        assert!(published.lock().unwrap().iter().all(|it| it.control.is_consistent()));

        // Resume starts over from the first pass, counters keep going up.
        let resume_flag = RunFlag::new(true);
        let outcome = driver.run(&resume_flag, &SpeedControl::default()).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
        let snapshot = driver.store().snapshot();
        assert_eq!(snapshot.values().as_slice(), &[1, 2, 5, 5, 9]);
        assert!(snapshot.counters.comparisons > 3);
        assert!(snapshot.is_all_sorted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lowering_the_flag_interrupts_the_delay() {
        let (driver, _) = new_driver(&[3, 2, 1]);
        let run_flag = RunFlag::new(true);
        let speed = SpeedControl::new(Speed::try_new(1_000).unwrap());

        let flag_clone = run_flag.clone();
        let task = tokio::spawn({
            let driver = driver.clone();
            let speed = speed.clone();
            async move { driver.run(&flag_clone, &speed).await }
        });

        let start = Instant::now();
        tokio::time::sleep(Duration::from_millis(100)).await;
        run_flag.lower();

        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome, RunOutcome::Cancelled);
        // Neither the highlight delay nor the swap delay was waited out.
        assert!(start.elapsed() < Duration::from_millis(1_000));
        // The step that was in flight finished, then the driver stopped.
        let snapshot = driver.store().snapshot();
        assert_eq!(snapshot.values().as_slice(), &[2, 3, 1]);
        assert_eq!(snapshot.counters.comparisons, 1);
        assert_eq!(snapshot.counters.swaps, 1);
        assert!(!snapshot.control.complete);
        assert!(!snapshot.is_any_comparing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_change_applies_to_next_delay() {
        let (driver, _) = new_driver(&[1, 2, 3]);
        let speed = SpeedControl::new(Speed::try_new(1_000).unwrap());

        // Two comparisons, no swaps: two delays.
        let speed_clone = speed.clone();
        driver.store().subscribe(move |snapshot| {
            if snapshot.counters.comparisons == 1 && snapshot.is_any_comparing() {
                speed_clone.set(Speed::try_new(100).unwrap());
            }
        });

        let start = Instant::now();
        driver.run(&RunFlag::new(true), &speed).await.unwrap();
        // The first delay was read after the change (the highlight publishes first).
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(1_000));
    }
}
