// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Note that if you wrap this up in a non blocking writer, as shown below, it doesn't
/// work:
///
/// ```ignore
/// tracing_appender::non_blocking(try_create("foo")?);
/// ```
///
/// # Errors
///
/// Returns an error if the parent folder or the file name can't be derived from
/// `path_str`.
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(&path_str);

    let parent = match path.parent() {
        // A bare file name has an empty parent, which means the current folder.
        Some(it) if it.as_os_str().is_empty() => PathBuf::from("."),
        Some(it) => it.to_path_buf(),
        None => miette::bail!(
            "Can't access folder for {}. It might not exist, or don't have required permissions.",
            path.display()
        ),
    };

    let Some(file_stem) = path.file_name() else {
        miette::bail!(
            "Can't access file name {}. It might not exist, or don't have required permissions.",
            path.display()
        );
    };

    Ok(tracing_appender::rolling::never(parent, file_stem))
}
