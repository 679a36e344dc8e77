// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;
pub mod writer_config;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
pub use writer_config::*;
