// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns a [`StoreSnapshot`] into styled lines of text. This is pure, so all of the
//! layout is tested without a terminal. Painting the lines is done by
//! [`crate::paint_lines`].

use std::fmt::Write as _;

use strum_macros::Display;

use crate::{ControlAvailability,
            Element,
            InputField,
            RunControlState,
            RunPhase,
            Speed,
            StoreSnapshot,
            ValidationError};

pub const TITLE: &str = "Bubble Sort Visualizer";
pub const COMPLETE_BANNER: &str = "Sorting Complete!";
pub const INPUT_PLACEHOLDER: &str = "e.g. 64, 34, 25, 12, 22";

/// Rows used by the tallest bar.
pub const BAR_MAX_HEIGHT: u32 = 10;
pub const BAR_FILL: &str = "███ ";
pub const BAR_EMPTY: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SpanStyle {
    Plain,
    Title,
    Unsorted,
    Comparing,
    Sorted,
    Stat,
    Success,
    Error,
    Dim,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: SpanStyle,
}

impl StyledSpan {
    #[must_use]
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

pub type StyledLine = Vec<StyledSpan>;

/// Everything that is shown besides the store's snapshot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub speed: Speed,
    pub input_field: InputField,
    pub input_error: Option<ValidationError>,
}

/// Text of a line without its styles.
#[must_use]
pub fn line_to_string(line: &StyledLine) -> String {
    line.iter().fold(String::new(), |mut acc, span| {
        acc.push_str(&span.text);
        acc
    })
}

#[must_use]
pub fn render_lines(snapshot: &StoreSnapshot, view: &ViewState) -> Vec<StyledLine> {
    let availability = ControlAvailability::from(snapshot.control);

    let mut lines = vec![vec![StyledSpan::new(TITLE, SpanStyle::Title)], vec![]];
    lines.extend(render_bars(snapshot));
    lines.push(render_values_row(snapshot));
    lines.push(render_index_row(snapshot));
    lines.push(vec![]);
    lines.push(render_legend());
    lines.push(render_stats(snapshot, view.speed));
    lines.push(render_status(snapshot));
    lines.push(vec![]);
    lines.extend(render_input(view, availability));
    lines.push(vec![]);
    lines.push(render_help(snapshot.control, availability));
    lines
}

/// Highlight wins over sorted, so the final swap into place is still visible.
#[must_use]
pub fn element_style(element: &Element) -> SpanStyle {
    if element.is_comparing {
        SpanStyle::Comparing
    } else if element.is_sorted {
        SpanStyle::Sorted
    } else {
        SpanStyle::Unsorted
    }
}

/// Height in rows, in `1..=BAR_MAX_HEIGHT`, relative to the biggest value.
#[must_use]
pub fn bar_height(value: u8, max_value: u8) -> u32 {
    let max_value = u32::from(max_value.max(1));
    (u32::from(value) * BAR_MAX_HEIGHT)
        .div_ceil(max_value)
        .clamp(1, BAR_MAX_HEIGHT)
}

fn render_bars(snapshot: &StoreSnapshot) -> Vec<StyledLine> {
    let max_value = snapshot
        .elements
        .iter()
        .map(|it| it.value)
        .max()
        .unwrap_or(1);

    (1..=BAR_MAX_HEIGHT)
        .rev()
        .map(|row| {
            snapshot
                .elements
                .iter()
                .map(|element| {
                    if bar_height(element.value, max_value) >= row {
                        StyledSpan::new(BAR_FILL, element_style(element))
                    } else {
                        StyledSpan::new(BAR_EMPTY, SpanStyle::Plain)
                    }
                })
                .collect()
        })
        .collect()
}

fn render_values_row(snapshot: &StoreSnapshot) -> StyledLine {
    snapshot
        .elements
        .iter()
        .map(|it| StyledSpan::new(format!("{:^3} ", it.value), element_style(it)))
        .collect()
}

fn render_index_row(snapshot: &StoreSnapshot) -> StyledLine {
    let text = (0..snapshot.len()).fold(String::new(), |mut acc, index| {
        // Writing to a String can't fail.
        let _unused = write!(acc, "{index:^3} ");
        acc
    });
    vec![StyledSpan::new(text, SpanStyle::Dim)]
}

fn render_legend() -> StyledLine {
    vec![
        StyledSpan::new("■ ", SpanStyle::Unsorted),
        StyledSpan::new("Unsorted   ", SpanStyle::Plain),
        StyledSpan::new("■ ", SpanStyle::Comparing),
        StyledSpan::new("Comparing   ", SpanStyle::Plain),
        StyledSpan::new("■ ", SpanStyle::Sorted),
        StyledSpan::new("Sorted", SpanStyle::Plain),
    ]
}

fn render_stats(snapshot: &StoreSnapshot, speed: Speed) -> StyledLine {
    let counters = snapshot.counters;
    let stat = |label: &str, value: String| {
        [
            StyledSpan::new(format!("{label}: "), SpanStyle::Plain),
            StyledSpan::new(value, SpanStyle::Stat),
        ]
    };
    [
        stat("Iterations", counters.iterations.to_string()),
        stat("  Comparisons", counters.comparisons.to_string()),
        stat("  Swaps", counters.swaps.to_string()),
        stat("  Speed", format!("{}ms", speed.as_millis())),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn render_status(snapshot: &StoreSnapshot) -> StyledLine {
    let span = match snapshot.control.phase() {
        RunPhase::Complete => StyledSpan::new(COMPLETE_BANNER, SpanStyle::Success),
        RunPhase::Sorting => StyledSpan::new("Sorting...", SpanStyle::Stat),
        RunPhase::Pausing => StyledSpan::new("Pausing...", SpanStyle::Dim),
        RunPhase::Idle if snapshot.counters.comparisons == 0 => {
            StyledSpan::new("Ready", SpanStyle::Dim)
        }
        RunPhase::Idle => StyledSpan::new("Paused", SpanStyle::Dim),
    };
    vec![span]
}

fn render_input(view: &ViewState, availability: ControlAvailability) -> Vec<StyledLine> {
    let field = &view.input_field;
    let label = StyledSpan::new("Custom array: ", SpanStyle::Plain);

    let mut input_line = vec![label];
    if field.is_editing {
        input_line.push(StyledSpan::new(field.buffer.clone(), SpanStyle::Plain));
        input_line.push(StyledSpan::new("_", SpanStyle::Stat));
        input_line.push(StyledSpan::new(
            "   Enter to apply, Esc to cancel",
            SpanStyle::Dim,
        ));
    } else {
        if field.buffer.is_empty() {
            input_line.push(StyledSpan::new(INPUT_PLACEHOLDER, SpanStyle::Dim));
        } else {
            input_line.push(StyledSpan::new(field.buffer.clone(), SpanStyle::Plain));
        }
        let hint = if availability.submit_input {
            "   press i to edit"
        } else {
            "   disabled while sorting"
        };
        input_line.push(StyledSpan::new(hint, SpanStyle::Dim));
    }

    let mut lines = vec![input_line];
    if let Some(err) = &view.input_error {
        lines.push(vec![StyledSpan::new(err.to_string(), SpanStyle::Error)]);
    }
    lines
}

fn render_help(control: RunControlState, availability: ControlAvailability) -> StyledLine {
    let toggle_label = if control.running { "pause" } else { "start" };
    let items = [
        ("space", toggle_label, availability.toggle_run),
        ("r", "reset", availability.reset),
        ("+/-", "speed", availability.speed),
        ("i", "input", availability.submit_input),
        ("q", "quit", true),
    ];

    let mut line = vec![];
    for (index, (key, label, is_enabled)) in items.into_iter().enumerate() {
        if index > 0 {
            line.push(StyledSpan::new("  ", SpanStyle::Plain));
        }
        let (key_style, label_style) = if is_enabled {
            (SpanStyle::Stat, SpanStyle::Plain)
        } else {
            (SpanStyle::Dim, SpanStyle::Dim)
        };
        line.push(StyledSpan::new(key, key_style));
        line.push(StyledSpan::new(format!(" {label}"), label_style));
    }
    line
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::RunCounters;

    fn find_line<'a>(lines: &'a [StyledLine], needle: &str) -> Option<&'a StyledLine> {
        lines.iter().find(|it| line_to_string(it).contains(needle))
    }

    #[test_case(99, 99, 10)]
    #[test_case(1, 99, 1)]
    #[test_case(50, 99, 6)]
    #[test_case(10, 39, 3)]
    #[test_case(5, 0, 10 ; "max is clamped")]
    fn test_bar_height(value: u8, max_value: u8, expected: u32) {
        assert_eq!(bar_height(value, max_value), expected);
    }

    #[test]
    fn test_bars_are_bottom_aligned() {
        let snapshot = StoreSnapshot::from_values(&[1, 99]);
        let lines = render_lines(&snapshot, &ViewState::default());

        // Line 0 is the title, line 1 is blank, then the bars from the top row down.
        let top = &lines[2];
        assert_eq!(line_to_string(top), format!("{BAR_EMPTY}{BAR_FILL}"));
        let bottom = &lines[1 + BAR_MAX_HEIGHT as usize];
        assert_eq!(line_to_string(bottom), format!("{BAR_FILL}{BAR_FILL}"));
        assert_eq!(bottom[0].style, SpanStyle::Unsorted);
    }

    #[test]
    fn test_values_and_indices() {
        let snapshot = StoreSnapshot::from_values(&[5, 12, 9]);
        let lines = render_lines(&snapshot, &ViewState::default());
        let values_row = &lines[2 + BAR_MAX_HEIGHT as usize];
        assert_eq!(line_to_string(values_row), " 5  12   9  ");
        let index_row = &lines[3 + BAR_MAX_HEIGHT as usize];
        assert_eq!(line_to_string(index_row), " 0   1   2  ");
    }

    #[test]
    fn test_comparing_and_sorted_styles() {
        let mut snapshot = StoreSnapshot::from_values(&[3, 1, 2]);
        snapshot.elements[0].is_comparing = true;
        snapshot.elements[1].is_comparing = true;
        snapshot.elements[2].is_sorted = true;

        let styles: Vec<SpanStyle> = snapshot.elements.iter().map(element_style).collect();
        assert_eq!(
            styles,
            vec![SpanStyle::Comparing, SpanStyle::Comparing, SpanStyle::Sorted]
        );
    }

    #[test]
    fn test_stats_and_complete_banner() {
        let mut snapshot = StoreSnapshot::from_values(&[1, 2, 5, 5, 9]);
        snapshot.counters = RunCounters {
            iterations: 3,
            comparisons: 10,
            swaps: 5,
        };
        snapshot.control.complete = true;

        let lines = render_lines(&snapshot, &ViewState::default());
        let stats = find_line(&lines, "Iterations").unwrap();
        assert_eq!(
            line_to_string(stats),
            "Iterations: 3  Comparisons: 10  Swaps: 5  Speed: 500ms"
        );
        let banner = find_line(&lines, COMPLETE_BANNER).unwrap();
        assert_eq!(banner[0].style, SpanStyle::Success);
    }

    #[test]
    fn test_no_banner_while_sorting() {
        let mut snapshot = StoreSnapshot::from_values(&[2, 1]);
        snapshot.control.running = true;
        snapshot.control.sorting = true;
        let lines = render_lines(&snapshot, &ViewState::default());
        assert!(find_line(&lines, COMPLETE_BANNER).is_none());
        assert!(find_line(&lines, "Sorting...").is_some());
        assert!(find_line(&lines, "disabled while sorting").is_some());
        assert!(find_line(&lines, "space pause").is_some());
    }

    #[test]
    fn test_input_error_is_shown() {
        let snapshot = StoreSnapshot::from_values(&[2, 1]);
        let view = ViewState {
            input_field: InputField {
                buffer: "5,x".into(),
                is_editing: false,
            },
            input_error: Some(ValidationError::NotANumber { token: "x".into() }),
            ..Default::default()
        };
        let lines = render_lines(&snapshot, &view);
        let error_line = find_line(&lines, "is not a valid number").unwrap();
        assert_eq!(line_to_string(error_line), "\"x\" is not a valid number");
        assert_eq!(error_line[0].style, SpanStyle::Error);
        assert!(find_line(&lines, "Custom array: 5,x").is_some());
    }

    #[test]
    fn test_help_dims_disabled_controls() {
        // Paused, waiting for the driver to reach its next comparison.
        let mut snapshot = StoreSnapshot::from_values(&[2, 1]);
        snapshot.control.sorting = true;
        let lines = render_lines(&snapshot, &ViewState::default());
        let help = lines.last().unwrap();
        assert_eq!(
            line_to_string(help),
            "space start  r reset  +/- speed  i input  q quit"
        );
        assert_eq!(help[0].style, SpanStyle::Dim);
        assert_eq!(help[3].style, SpanStyle::Dim);
        assert_eq!(help[6].style, SpanStyle::Stat);
    }

    #[test]
    fn test_help_start_enabled_when_complete() {
        let mut snapshot = StoreSnapshot::from_values(&[1, 2]);
        snapshot.control.complete = true;
        let lines = render_lines(&snapshot, &ViewState::default());
        let help = lines.last().unwrap();
        assert_eq!(help[0].style, SpanStyle::Stat);
        assert_eq!(help[3].style, SpanStyle::Stat);
    }
}
