// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::convert::identity;

use futures_util::FutureExt;
use miette::IntoDiagnostic;
use tokio::task::JoinHandle;

use crate::{ArrayStateStore,
            CommonResult,
            ControlAvailability,
            ControlEvent,
            ControlResponse,
            DEBUG_CONTROLLER_MOD,
            RunFlag,
            RunOutcome,
            SortDriver,
            Speed,
            SpeedControl,
            ValidationError,
            parse_user_input};

/// Handle to the spawned [`SortDriver::run`] task.
pub type DriverTask = JoinHandle<CommonResult<RunOutcome>>;

/// The transition handler for the visualizer's state machine. It owns the user's intent
/// (the [`RunFlag`] and the [`SpeedControl`]), applies the [`ControlAvailability`]
/// rules to every [`ControlEvent`], and makes sure that exactly one driver task is
/// started on each `running: false -> true` edge.
///
/// The UI never touches the store or the driver directly, it dispatches events here
/// and renders the snapshots that the store publishes.
#[derive(Debug)]
pub struct SortController {
    store: ArrayStateStore,
    run_flag: RunFlag,
    speed: SpeedControl,
    driver_task: Option<DriverTask>,
    input_error: Option<ValidationError>,
}

mod constructor {
    use super::*;

    impl SortController {
        #[must_use]
        pub fn new(store: ArrayStateStore, speed: Speed) -> Self {
            Self {
                store,
                run_flag: RunFlag::default(),
                speed: SpeedControl::new(speed),
                driver_task: None,
                input_error: None,
            }
        }
    }
}

mod accessors {
    use super::*;

    impl SortController {
        #[must_use]
        pub fn store(&self) -> &ArrayStateStore { &self.store }

        #[must_use]
        pub fn speed(&self) -> Speed { self.speed.get() }

        #[must_use]
        pub fn run_flag(&self) -> &RunFlag { &self.run_flag }

        /// The last rejected input, cleared by the next successful submit or reset.
        #[must_use]
        pub fn input_error(&self) -> Option<&ValidationError> { self.input_error.as_ref() }

        #[must_use]
        pub fn availability(&self) -> ControlAvailability {
            self.store.snapshot().control.into()
        }
    }
}

mod dispatch {
    use super::*;

    impl SortController {
        /// Apply a single [`ControlEvent`]. This never blocks, the sort itself runs in a
        /// separate task.
        ///
        /// This must be called from within a tokio runtime, since starting a run spawns
        /// a task.
        pub fn dispatch_action(&mut self, event: ControlEvent) -> ControlResponse {
            self.reap_driver_task();

            let availability = self.availability();

            let response = match event {
                ControlEvent::ToggleRun if availability.toggle_run => self.toggle_run(),
                ControlEvent::Reset if availability.reset => {
                    self.store.randomize();
                    self.input_error = None;
                    ControlResponse::Applied
                }
                ControlEvent::SubmitInput(ref text) if availability.submit_input => {
                    self.submit_input(text)
                }
                ControlEvent::SetSpeed(speed) => {
                    self.speed.set(speed);
                    ControlResponse::Applied
                }
                ControlEvent::Faster => {
                    self.speed.faster();
                    ControlResponse::Applied
                }
                ControlEvent::Slower => {
                    self.speed.slower();
                    ControlResponse::Applied
                }
                ControlEvent::ToggleRun
                | ControlEvent::Reset
                | ControlEvent::SubmitInput(_) => ControlResponse::Disabled,
            };

            DEBUG_CONTROLLER_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "SortController::dispatch_action",
                    event = %event,
                    response = ?response,
                    delay_ms = %self.speed.get().as_millis()
                );
            });

            response
        }

        fn toggle_run(&mut self) -> ControlResponse {
            let running = self.run_flag.toggle();
            self.store.set_running(running);
            if running && !self.store.is_sorting() {
                self.spawn_driver_task();
            }
            ControlResponse::Applied
        }

        fn submit_input(&mut self, text: &str) -> ControlResponse {
            let result = parse_user_input(text)
                .and_then(|values| self.store.reset(&values));
            match result {
                Ok(()) => {
                    self.input_error = None;
                    ControlResponse::Applied
                }
                Err(err) => {
                    self.input_error = Some(err.clone());
                    ControlResponse::InvalidInput(err)
                }
            }
        }
    }
}

mod driver_task {
    use super::*;

    impl SortController {
        pub(super) fn spawn_driver_task(&mut self) {
            let driver = SortDriver::new(self.store.clone());
            let run_flag = self.run_flag.clone();
            let speed = self.speed.clone();

            // A previous task can still be unwinding after it published its
            // cancellation. It won't touch the store again, so it is detached.
            if let Some(previous) = self.driver_task.take() {
                DEBUG_CONTROLLER_MOD.then(|| {
                    tracing::debug!(
                        message = "SortController -> detaching previous driver task",
                        is_finished = %previous.is_finished()
                    );
                });
            }

            self.driver_task = Some(tokio::spawn(async move {
                driver.run(&run_flag, &speed).await
            }));
        }

        /// Forget the driver task if it has ended, and clean up after it if it failed.
        pub(super) fn reap_driver_task(&mut self) {
            if !self
                .driver_task
                .as_ref()
                .is_some_and(JoinHandle::is_finished)
            {
                return;
            }
            let Some(task) = self.driver_task.take() else {
                return;
            };
            if let Some(join_result) = task.now_or_never() {
                let result = join_result.into_diagnostic().and_then(identity);
                let _unused = self.on_driver_exit(result);
            }
        }

        /// Waits for the current driver task to end, if there is one.
        ///
        /// # Errors
        ///
        /// Returns an error if the driver task failed or panicked.
        pub async fn wait_for_driver(&mut self) -> CommonResult<Option<RunOutcome>> {
            let Some(task) = self.driver_task.take() else {
                return Ok(None);
            };
            let result = task.await.into_diagnostic().and_then(identity);
            self.on_driver_exit(result).map(Some)
        }

        /// Lower the run flag and wait for the driver to stop. Used when quitting.
        ///
        /// # Errors
        ///
        /// Returns an error if the driver task failed or panicked.
        pub async fn shutdown(&mut self) -> CommonResult<Option<RunOutcome>> {
            self.run_flag.lower();
            self.store.set_running(false);
            self.wait_for_driver().await
        }

        fn on_driver_exit(
            &self,
            result: CommonResult<RunOutcome>,
        ) -> CommonResult<RunOutcome> {
            match &result {
                Ok(outcome) => {
                    DEBUG_CONTROLLER_MOD.then(|| {
                        tracing::debug!(
                            message = "SortController -> driver task ended",
                            outcome = %outcome
                        );
                    });
                }
                Err(report) => {
                    tracing::error!(
                        message = "SortController -> driver task failed",
                        error = ?report
                    );
                    // The store is already idle, bring the user's intent back in line.
                    self.run_flag.lower();
                    self.store.set_running(false);
                }
            }
            result
        }
    }
}
