// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Enable or disable debug logging for the store module.
pub const DEBUG_STORE_MOD: bool = false;

// Attach sources.
pub mod array_state_store;
pub mod element;
pub mod run_state;
pub mod store_constants;
pub mod store_snapshot;
pub mod subscribers;

// Re-export.
pub use array_state_store::*;
pub use element::*;
pub use run_state::*;
pub use store_constants::*;
pub use store_snapshot::*;
pub use subscribers::*;
