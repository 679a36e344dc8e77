// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::{Args, Parser};
use tracing_core::LevelFilter;

use crate::{Speed, ValueVec, parse_user_input};

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "bubble")]
#[command(about = "🫧 Watch bubble sort compare and swap, one step at a time")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(false))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version} 💻\n\nRun with no arguments to sort a random array. Keys: space start/pause, r reset, +/- speed, i custom input, q quit.\nUSAGE 📓:\n  bubble [\x1b[34moptions\x1b[0m]\n\n[options]\n{options}"
)]
pub struct CLIArg {
    #[arg(
        long,
        short = 'v',
        value_parser = parse_values_arg,
        help = "Comma-separated numbers to sort, eg: \"5,2,9,1,5\". 2 to 15 numbers, each from 1 to 99. A random array is used when this is not given."
    )]
    pub values: Option<ValueVec>,

    #[arg(
        long,
        short = 's',
        value_parser = parse_speed_arg,
        default_value = "500",
        help = "Delay between steps in ms, from 100 to 1000 in steps of 100."
    )]
    pub speed: Speed,

    #[arg(
        long,
        help = "Don't start the interactive UI. Run the sort to completion and print every step."
    )]
    pub headless: bool,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `bubble_viz_log.txt` for debugging."
    )]
    pub enable_logging: bool,

    #[arg(
        global = true,
        long,
        help = "Log to this file instead of `bubble_viz_log.txt`. Only used with --enable-logging."
    )]
    pub log_file: Option<String>,

    #[arg(
        global = true,
        long,
        default_value = "debug",
        help = "One of: off, error, warn, info, debug, trace."
    )]
    pub log_level: LevelFilter,
}

fn parse_values_arg(arg: &str) -> Result<ValueVec, String> {
    parse_user_input(arg).map_err(|err| err.to_string())
}

fn parse_speed_arg(arg: &str) -> Result<Speed, String> {
    arg.parse::<Speed>().map_err(|err| err.to_string())
}
