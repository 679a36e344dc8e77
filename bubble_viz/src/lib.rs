// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_bubble_viz
//!
//! An animated bubble sort visualizer. The interesting part is not the sort (it is the
//! textbook optimized bubble sort) but the way it is driven:
//!
//! 1. The [`ArrayStateStore`] holds the authoritative array of [`Element`]s, the
//!    [`RunCounters`], and the [`RunControlState`]. Every mutation publishes an immutable
//!    [`StoreSnapshot`] to all subscribers, in program order.
//! 2. The [`SortDriver`] walks the passes on a private working copy, one comparison at a
//!    time, publishing each highlight and swap through the store and suspending for the
//!    configured [`Speed`] in between so a human can follow along.
//! 3. The [`RunFlag`] is the user's intent ("advance the sort"). The driver polls it at
//!    every comparison boundary, and lowering it also cuts an in-flight delay short.
//! 4. The [`SortController`] is the explicit state machine transition handler: it starts
//!    exactly one driver task on the `running: false -> true` edge, and applies the
//!    enable/disable rules of the control surface.
//!
//! ```text
//!   ┌──────────────┐ ControlEvent ┌────────────────┐ spawn  ┌────────────┐
//!   │ ui (keys)    ├─────────────►│ SortController ├───────►│ SortDriver │
//!   └──────▲───────┘              └───────┬────────┘        └─────┬──────┘
//!          │ StoreSnapshot                │ reset / randomize     │ publish
//!          │                      ┌───────▼────────┐              │
//!          └──────────────────────┤ ArrayStateStore│◄─────────────┘
//!                                 └────────────────┘
//! ```
//!
//! The [`ui`] module is a read-only rendering surface plus key bindings, built on
//! `crossterm`. It can be swapped out for any other renderer that subscribes to the
//! store.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod controller;
pub mod core;
pub mod driver;
pub mod input;
pub mod store;
pub mod ui;

// Re-export.
pub use controller::*;
pub use crate::core::*;
pub use driver::*;
pub use input::*;
pub use store::*;
pub use ui::*;
