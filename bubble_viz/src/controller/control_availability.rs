// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::RunControlState;

/// Which controls are enabled, derived only from the [`RunControlState`].
///
/// | Control      | Enabled when                                     |
/// | :----------- | :----------------------------------------------- |
/// | Start/Pause  | not waiting for a pause to land                  |
/// | Reset        | not sorting                                      |
/// | Submit input | not sorting                                      |
/// | Speed        | always                                           |
///
/// "Waiting for a pause to land" is `sorting && !running`: the run flag has been lowered
/// but the driver hasn't reached its next comparison boundary yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlAvailability {
    pub toggle_run: bool,
    pub reset: bool,
    pub submit_input: bool,
    pub speed: bool,
}

impl From<RunControlState> for ControlAvailability {
    fn from(control: RunControlState) -> Self {
        let RunControlState {
            running, sorting, ..
        } = control;
        Self {
            toggle_run: !(sorting && !running),
            reset: !sorting,
            submit_input: !sorting,
            speed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(false, false, false, true, true ; "idle")]
    #[test_case(true, false, false, true, true ; "idle, about to start")]
    #[test_case(true, true, false, true, false ; "sorting")]
    #[test_case(false, true, false, false, false ; "pausing")]
    #[test_case(false, false, true, true, true ; "complete, can run again")]
    fn test_availability(
        running: bool,
        sorting: bool,
        complete: bool,
        toggle_run: bool,
        reset: bool,
    ) {
        let it = ControlAvailability::from(RunControlState {
            running,
            sorting,
            complete,
        });
        assert_eq!(
            it,
            ControlAvailability {
                toggle_run,
                reset,
                submit_input: reset,
                speed: true,
            }
        );
    }
}
