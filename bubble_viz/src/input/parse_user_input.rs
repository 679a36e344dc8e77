// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The only boundary where user typed text becomes an array. Nothing that fails here
//! ever reaches the [`crate::ArrayStateStore`].

use std::num::IntErrorKind;

use crate::{ARRAY_LEN_MAX,
            ARRAY_LEN_MIN,
            DEBUG_INPUT_MOD,
            VALUE_MAX,
            VALUE_MIN,
            ValidationError,
            ValueVec};

/// Separator between the numbers in the input field.
pub const INPUT_SEPARATOR: char = ',';

/// Parse comma-separated numbers, eg: `"5, 3, 9, 1"`.
///
/// Tokens are trimmed, then checked in input order, and the first bad token is the one
/// that is reported. The count is only checked once every token is a number in range.
///
/// # Errors
///
/// - [`ValidationError::EmptyInput`] if there is nothing but whitespace.
/// - [`ValidationError::NotANumber`] for a token that doesn't start with a base 10
///   integer (this includes an empty token, eg: `"5,,3"`). Anything after the leading
///   integer is ignored, eg: `"3.5"` is `3`.
/// - [`ValidationError::OutOfRange`] for an integer outside `1..=99`.
/// - [`ValidationError::TooFew`] / [`ValidationError::TooMany`] for a count outside
///   `2..=15`.
pub fn parse_user_input(input: &str) -> Result<ValueVec, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let mut acc = ValueVec::new();
    let mut count = 0;

    for token in input.split(INPUT_SEPARATOR).map(str::trim) {
        let value = parse_token(token)?;
        count += 1;
        // Don't grow past the inline capacity, the count is all that matters from here.
        if acc.len() < ARRAY_LEN_MAX {
            acc.push(value);
        }
    }

    let result = match count {
        it if it < ARRAY_LEN_MIN => Err(ValidationError::TooFew { count: it }),
        it if it > ARRAY_LEN_MAX => Err(ValidationError::TooMany { count: it }),
        _ => Ok(acc),
    };

    DEBUG_INPUT_MOD.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "parse_user_input",
            input = %input,
            result = ?result
        );
    });

    result
}

/// Reads the leading number of a token: an optional sign followed by base 10 digits.
/// Whatever comes after the digits is ignored, so `"12abc"` is `12` and `"3.5"` is `3`.
fn parse_token(token: &str) -> Result<u8, ValidationError> {
    let not_a_number = || ValidationError::NotANumber {
        token: token.to_string(),
    };
    let out_of_range = || ValidationError::OutOfRange {
        token: token.to_string(),
    };

    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let sign_len = token.len() - unsigned.len();
    let digit_len = unsigned
        .find(|it: char| !it.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digit_len == 0 {
        return Err(not_a_number());
    }

    let leading_number = &token[..sign_len + digit_len];
    let parsed = leading_number.parse::<i64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
        _ => not_a_number(),
    })?;

    u8::try_from(parsed)
        .ok()
        .filter(|it| (VALUE_MIN..=VALUE_MAX).contains(it))
        .ok_or_else(out_of_range)
}
