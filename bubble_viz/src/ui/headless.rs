// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::Write;

use miette::IntoDiagnostic;
use tokio::sync::mpsc;

use crate::{COMPLETE_BANNER,
            CommonResult,
            ControlEvent,
            ControlResponse,
            Element,
            RunOutcome,
            SortController,
            StoreSnapshot};

/// One line per published snapshot, eg: ` 2  5 [9][1] 5*  comparisons=3 swaps=1
/// iterations=0`. Highlighted elements are in brackets, sorted ones have a `*`.
#[must_use]
pub fn format_snapshot_line(snapshot: &StoreSnapshot) -> String {
    let elements = snapshot
        .elements
        .iter()
        .map(format_element)
        .collect::<Vec<_>>()
        .join(" ");
    let counters = snapshot.counters;
    format!(
        "{elements}  comparisons={} swaps={} iterations={}",
        counters.comparisons, counters.swaps, counters.iterations
    )
}

fn format_element(element: &Element) -> String {
    match (element.is_comparing, element.is_sorted) {
        (true, _) => format!("[{}]", element.value),
        (false, true) => format!("{}*", element.value),
        (false, false) => element.value.to_string(),
    }
}

/// Runs the sort to completion without a terminal UI, writing every published snapshot
/// to `writer` as it happens, followed by the final statistics.
///
/// # Errors
///
/// Returns an error if the driver fails, or if writing fails.
pub async fn run_headless(
    mut controller: SortController,
    writer: &mut impl Write,
) -> CommonResult<Option<RunOutcome>> {
    let (line_sender, mut line_receiver) = mpsc::unbounded_channel::<String>();
    let subscription_id = controller.store().subscribe(move |snapshot| {
        // The receiver outlives the subscription.
        let _unused = line_sender.send(format_snapshot_line(snapshot));
    });

    writeln!(writer, "{}", format_snapshot_line(&controller.store().snapshot()))
        .into_diagnostic()?;

    let run_sort = async {
        let outcome = match controller.dispatch_action(ControlEvent::ToggleRun) {
            ControlResponse::Applied => controller.wait_for_driver().await,
            _ => Ok(None),
        };
        // Closes the channel, which ends the printing below.
        controller.store().unsubscribe(subscription_id);
        outcome
    };

    let print_lines = async {
        while let Some(line) = line_receiver.recv().await {
            writeln!(writer, "{line}").into_diagnostic()?;
        }
        CommonResult::Ok(())
    };

    let (outcome, printed) = tokio::join!(run_sort, print_lines);
    printed?;
    let outcome = outcome?;

    let snapshot = controller.store().snapshot();
    if snapshot.control.complete {
        writeln!(writer, "{COMPLETE_BANNER}").into_diagnostic()?;
    }
    let counters = snapshot.counters;
    writeln!(
        writer,
        "Iterations: {}  Comparisons: {}  Swaps: {}",
        counters.iterations, counters.comparisons, counters.swaps
    )
    .into_diagnostic()?;

    Ok(outcome)
}
