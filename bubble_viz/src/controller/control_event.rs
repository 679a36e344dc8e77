// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::Display;

use crate::{Speed, ValidationError};

/// Everything the user can do to the visualizer. These are dispatched to
/// [`crate::SortController::dispatch_action`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ControlEvent {
    /// Start or pause.
    ToggleRun,
    /// Replace the array with a fresh random one.
    Reset,
    /// Replace the array with the parsed contents of the input field.
    SubmitInput(String),
    SetSpeed(Speed),
    /// Shorter delay.
    Faster,
    /// Longer delay.
    Slower,
}

/// What happened to a [`ControlEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlResponse {
    Applied,
    /// The control is disabled in the current state, nothing changed.
    Disabled,
    /// The input field contents were rejected, nothing changed. The error is also kept
    /// around for display, see [`crate::SortController::input_error`].
    InvalidInput(ValidationError),
}
