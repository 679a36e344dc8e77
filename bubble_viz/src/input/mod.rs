// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Enable or disable debug logging for the input module.
pub const DEBUG_INPUT_MOD: bool = false;

// Attach sources.
pub mod parse_user_input;

// Re-export.
pub use parse_user_input::*;
