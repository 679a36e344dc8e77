// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, registry::LookupSpan};

use super::{DynLayer, rolling_file_appender_impl};

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
#[macro_export]
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(true)
            .with_thread_names(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
    };
}

/// Where log output goes.
///
/// - `tracing_log_file_path_and_prefix`: [String] is the file path and prefix to use for
///   the log file. Eg: `/tmp/bubble_viz` or `bubble_viz`.
/// - [`DisplayPreference`] is the preferred display to use for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String /* tracing_log_file_path_and_prefix */),
    DisplayAndFile(
        DisplayPreference,
        String, /* tracing_log_file_path_and_prefix */
    ),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl WriterConfig {
    /// This erases the concrete type of the writer, and returns a boxed layer. This is
    /// useful for composition of layers. There's more info in the docs
    /// [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/index.html#runtime-configuration-with-layers).
    ///
    /// # Errors
    ///
    /// This never fails today, the [`miette::Result`] keeps the signature symmetric with
    /// [`WriterConfig::try_create_file_layer`].
    pub fn try_create_display_layer<S>(
        &self,
        level_filter: LevelFilter,
    ) -> miette::Result<Option<Box<DynLayer<S>>>>
    where
        S: tracing_core::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        // Shared configuration regardless of where logs are output to.
        let fmt_layer = create_fmt!();

        // Configure the writer based on the desired log target, and return it.
        Ok(match self {
            WriterConfig::DisplayAndFile(display_pref, _)
            | WriterConfig::Display(display_pref) => match display_pref {
                DisplayPreference::Stdout => Some(Box::new(
                    fmt_layer
                        .with_writer(std::io::stdout)
                        .with_filter(level_filter),
                )),
                DisplayPreference::Stderr => Some(Box::new(
                    fmt_layer
                        .with_writer(std::io::stderr)
                        .with_filter(level_filter),
                )),
            },
            _ => None,
        })
    }

    /// Same as [`WriterConfig::try_create_display_layer`] but for the log file.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be created.
    pub fn try_create_file_layer<S>(
        &self,
        level_filter: LevelFilter,
    ) -> miette::Result<Option<Box<DynLayer<S>>>>
    where
        S: tracing_core::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        // Shared configuration regardless of where logs are output to.
        let fmt_layer = create_fmt!().with_ansi(false);

        Ok(match self {
            WriterConfig::DisplayAndFile(_, tracing_log_file_path_and_prefix)
            | WriterConfig::File(tracing_log_file_path_and_prefix) => {
                let file = rolling_file_appender_impl::try_create(
                    tracing_log_file_path_and_prefix.as_str(),
                )?;
                Some(Box::new(
                    fmt_layer.with_writer(file).with_filter(level_filter),
                ))
            }
            _ => None,
        })
    }
}
