// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Enable or disable debug logging for the ui module.
pub const DEBUG_UI_MOD: bool = true;

// Attach sources.
pub mod clap_config;
pub mod headless;
pub mod input_field;
pub mod key_bindings;
pub mod render;
pub mod terminal_app;

// Re-export.
pub use clap_config::*;
pub use headless::*;
pub use input_field::*;
pub use key_bindings::*;
pub use render::*;
pub use terminal_app::*;
