// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Enable or disable debug logging for the driver module. Per step logging is at the
/// `trace` level.
pub const DEBUG_DRIVER_MOD: bool = true;

// Attach sources.
pub mod oracle;
pub mod run_flag;
pub mod sort_driver;
pub mod speed;

// Re-export.
pub use oracle::*;
pub use run_flag::*;
pub use sort_driver::*;
pub use speed::*;
