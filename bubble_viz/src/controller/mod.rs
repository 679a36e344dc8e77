// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Enable or disable debug logging for the controller module.
pub const DEBUG_CONTROLLER_MOD: bool = true;

// Attach sources.
pub mod control_availability;
pub mod control_event;
pub mod sort_controller;

// Re-export.
pub use control_availability::*;
pub use control_event::*;
pub use sort_controller::*;
