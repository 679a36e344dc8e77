// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! There are two kinds of errors in this crate, and they are handled very differently:
//!
//! | Error               | Cause                                       | Recoverable?                 |
//! | :------------------ | :------------------------------------------ | :--------------------------- |
//! | [`ValidationError`] | The user typed something that isn't allowed | Yes, shown inline in the UI  |
//! | [`IndexError`]      | Driver and store disagree on array length   | No, it is a bug              |
//!
//! Validation errors never reach the store or the driver. They are filtered out at the
//! input boundary, see [`crate::parse_user_input`].

use crate::{ARRAY_LEN_MAX, ARRAY_LEN_MIN, VALUE_MAX, VALUE_MIN};

/// Type alias to make it easy to work with [`miette::Result`] and [`miette::Report`],
/// which are [`std::error::Error`] wrappers. Works hand in hand w/ [`ValidationError`],
/// [`IndexError`] and any other type of error.
pub type CommonResult<T> = miette::Result<T>;

/// Problems with user supplied input. The [`Display`](std::fmt::Display) impl is the
/// exact message that is surfaced next to the input field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ValidationError {
    #[error("Please enter comma-separated numbers")]
    #[diagnostic(
        code(r3bl_bubble_viz::input::empty),
        help("Example: 5, 3, 9, 1")
    )]
    EmptyInput,

    #[error("\"{token}\" is not a valid number")]
    #[diagnostic(code(r3bl_bubble_viz::input::not_a_number))]
    NotANumber { token: String },

    #[error("Numbers must be between {} and {}", VALUE_MIN, VALUE_MAX)]
    #[diagnostic(code(r3bl_bubble_viz::input::out_of_range))]
    OutOfRange { token: String },

    #[error("Please enter at least {} numbers", ARRAY_LEN_MIN)]
    #[diagnostic(code(r3bl_bubble_viz::input::too_few))]
    TooFew { count: usize },

    #[error("Please enter no more than {} numbers", ARRAY_LEN_MAX)]
    #[diagnostic(code(r3bl_bubble_viz::input::too_many))]
    TooMany { count: usize },
}

/// Out of bounds access into the array held by the store. This indicates that the
/// driver and the store have gone out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("Index {index} is out of bounds for an array of length {len}")]
#[diagnostic(
    code(r3bl_bubble_viz::store::index_out_of_bounds),
    help("The array length can't change while a sort is running. This is a bug.")
)]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}
