// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::Parser;
use r3bl_bubble_viz::{ArrayStateStore, CLIArg, CommonResult, DisplayPreference,
                      SortController, TracingConfig, init_tracing, run_headless,
                      run_interactive, throws};

/// `mimalloc` is a replacement for the default global allocator. It's optimized for
/// multi-threaded use cases where lots of small objects are created and destroyed.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> CommonResult<()> {
    throws!({
        let cli_arg = CLIArg::parse();

        // If the terminal UI is showing, logs can only go to a file.
        let global_options = &cli_arg.global_options;
        if global_options.enable_logging {
            let log_file = global_options.log_file.clone();
            let tracing_config = if cli_arg.headless {
                TracingConfig::new_file_and_display(log_file, DisplayPreference::Stderr)
            } else {
                TracingConfig::new_file(log_file)
            };
            init_tracing(tracing_config.with_level_filter(global_options.log_level))?;
        }

        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);

        let store = match &cli_arg.values {
            Some(values) => ArrayStateStore::try_from_values(values)?,
            None => ArrayStateStore::new_random(),
        };
        let controller = SortController::new(store, cli_arg.speed);

        if cli_arg.headless {
            run_headless(controller, &mut std::io::stdout().lock()).await?;
        } else {
            run_interactive(controller).await?;
        }

        tracing::debug!(message = "Stop logging...");
    })
}
