// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{Write, stdout};

use crossterm::{cursor::{Hide, MoveTo, Show},
                event::{Event, EventStream},
                execute,
                queue,
                style::{Attribute, Color, Print, ResetColor, SetAttribute,
                        SetForegroundColor},
                terminal::{self, Clear, ClearType, EnterAlternateScreen,
                           LeaveAlternateScreen}};
use futures_util::StreamExt;
use miette::IntoDiagnostic;
use tokio::sync::watch;

use crate::{CommonResult,
            ControlEvent,
            ControlResponse,
            DEBUG_UI_MOD,
            SortController,
            SpanStyle,
            StoreSnapshot,
            StyledLine,
            UiCommand,
            ViewState,
            map_key_event,
            ok,
            render_lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    Continue,
    Exit,
}

/// The interactive app, minus the terminal. Key presses come in as [`UiCommand`]s,
/// the store's snapshots come in via [`TerminalApp::set_snapshot`], and
/// [`TerminalApp::render`] produces the lines to paint.
#[derive(Debug)]
pub struct TerminalApp {
    controller: SortController,
    view_state: ViewState,
    snapshot: StoreSnapshot,
}

impl TerminalApp {
    #[must_use]
    pub fn new(controller: SortController) -> Self {
        let snapshot = controller.store().snapshot();
        let view_state = ViewState {
            speed: controller.speed(),
            ..Default::default()
        };
        Self {
            controller,
            view_state,
            snapshot,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &SortController { &self.controller }

    #[must_use]
    pub fn view_state(&self) -> &ViewState { &self.view_state }

    pub fn set_snapshot(&mut self, snapshot: StoreSnapshot) { self.snapshot = snapshot; }

    #[must_use]
    pub fn render(&self) -> Vec<StyledLine> { render_lines(&self.snapshot, &self.view_state) }

    /// Must be called from within a tokio runtime, see
    /// [`SortController::dispatch_action`].
    pub fn handle_command(&mut self, command: UiCommand) -> Continuation {
        DEBUG_UI_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "TerminalApp::handle_command", command = ?command);
        });

        let field = &mut self.view_state.input_field;
        match command {
            UiCommand::Quit => return Continuation::Exit,
            UiCommand::BeginEditing => {
                if self.controller.availability().submit_input {
                    field.begin_editing();
                }
            }
            UiCommand::InsertChar(ch) => field.insert(ch),
            UiCommand::Backspace => field.backspace(),
            UiCommand::CancelEditing => field.cancel_editing(),
            UiCommand::SubmitEditing => {
                let text = field.submit();
                let response = self.dispatch(ControlEvent::SubmitInput(text));
                // Keep editing so the typo can be fixed.
                if let ControlResponse::InvalidInput(_) = response {
                    self.view_state.input_field.begin_editing();
                }
            }
            UiCommand::Control(event) => {
                self.dispatch(event);
            }
        }
        Continuation::Continue
    }

    fn dispatch(&mut self, event: ControlEvent) -> ControlResponse {
        let response = self.controller.dispatch_action(event);
        self.view_state.speed = self.controller.speed();
        self.view_state.input_error = self.controller.input_error().cloned();
        // Reset and submit publish synchronously, show their result right away.
        self.snapshot = self.controller.store().snapshot();
        response
    }

    /// Stop any sort that is still running.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver task failed.
    pub async fn shutdown(&mut self) -> CommonResult<()> {
        self.controller.shutdown().await?;
        ok!()
    }
}

/// Takes over the terminal (raw mode, alternate screen) and runs the event loop until
/// the user quits.
///
/// # Errors
///
/// Returns an error if the terminal can't be set up or written to.
pub async fn run_interactive(controller: SortController) -> CommonResult<()> {
    let mut app = TerminalApp::new(controller);

    // Only the latest snapshot matters for painting.
    let (snapshot_sender, mut snapshot_receiver) = watch::channel(app.snapshot.clone());
    let subscription_id = app.controller.store().subscribe(move |snapshot| {
        snapshot_sender.send_replace(snapshot.clone());
    });

    let result = {
        let _guard = RawModeGuard::try_enter()?;
        main_event_loop(&mut app, &mut snapshot_receiver).await
    };

    app.controller.store().unsubscribe(subscription_id);
    app.shutdown().await?;

    DEBUG_UI_MOD.then(|| {
        tracing::debug!(message = "run_interactive -> exit", result = ?result);
    });

    result
}

async fn main_event_loop(
    app: &mut TerminalApp,
    snapshot_receiver: &mut watch::Receiver<StoreSnapshot>,
) -> CommonResult<()> {
    let mut event_stream = EventStream::new();
    let mut output = stdout();

    paint_lines(&mut output, &app.render()).into_diagnostic()?;

    loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        let is_editing = app.view_state.input_field.is_editing;
                        let Some(command) = map_key_event(key_event, is_editing) else {
                            continue;
                        };
                        if app.handle_command(command) == Continuation::Exit {
                            break;
                        }
                    }
                    Some(Ok(Event::Resize(..))) => {}
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => return Err(err).into_diagnostic(),
                    None => break,
                }
            }
            Ok(()) = snapshot_receiver.changed() => {
                app.set_snapshot(snapshot_receiver.borrow_and_update().clone());
            }
        }

        paint_lines(&mut output, &app.render()).into_diagnostic()?;
    }

    Ok(())
}

/// Paint every line from the top left corner, after clearing the screen. Raw mode
/// doesn't return the carriage on a newline, so each row is positioned explicitly.
///
/// # Errors
///
/// Returns an error if writing to the terminal fails.
pub fn paint_lines(writer: &mut impl Write, lines: &[StyledLine]) -> std::io::Result<()> {
    queue!(writer, MoveTo(0, 0), Clear(ClearType::All))?;

    for (row, line) in lines.iter().enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(writer, MoveTo(0, row))?;
        for span in line {
            if let Some(color) = span_color(span.style) {
                queue!(writer, SetForegroundColor(color))?;
            }
            match span.style {
                SpanStyle::Title | SpanStyle::Success => {
                    queue!(writer, SetAttribute(Attribute::Bold))?;
                }
                SpanStyle::Dim => queue!(writer, SetAttribute(Attribute::Dim))?,
                _ => {}
            }
            queue!(
                writer,
                Print(&span.text),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }
    }

    writer.flush()
}

fn span_color(style: SpanStyle) -> Option<Color> {
    match style {
        SpanStyle::Plain | SpanStyle::Dim => None,
        SpanStyle::Title => Some(Color::Magenta),
        SpanStyle::Unsorted => Some(Color::Blue),
        SpanStyle::Comparing => Some(Color::Yellow),
        SpanStyle::Sorted | SpanStyle::Success => Some(Color::Green),
        SpanStyle::Stat => Some(Color::Cyan),
        SpanStyle::Error => Some(Color::Red),
    }
}

/// Raw mode and the alternate screen for as long as this is alive.
#[derive(Debug)]
struct RawModeGuard;

impl RawModeGuard {
    fn try_enter() -> CommonResult<Self> {
        terminal::enable_raw_mode().into_diagnostic()?;
        execute!(stdout(), EnterAlternateScreen, Hide).into_diagnostic()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // We don't care about the result of these operations.
        execute!(stdout(), Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ArrayStateStore, Speed, ValidationError, line_to_string};

    fn new_app(values: &[u8]) -> TerminalApp {
        TerminalApp::new(SortController::new(
            ArrayStateStore::try_from_values(values).unwrap(),
            Speed::default(),
        ))
    }

    fn type_text(app: &mut TerminalApp, text: &str) {
        for ch in text.chars() {
            app.handle_command(UiCommand::InsertChar(ch));
        }
    }

    #[tokio::test]
    async fn test_submit_valid_input() {
        let mut app = new_app(&[2, 1]);
        app.handle_command(UiCommand::BeginEditing);
        type_text(&mut app, "9, 8, 7");
        app.handle_command(UiCommand::SubmitEditing);

        assert!(!app.view_state().input_field.is_editing);
        assert_eq!(app.view_state().input_error, None);
        assert_eq!(
            app.controller().store().values().as_slice(),
            &[9, 8, 7]
        );
        // The new array is painted without waiting for the subscriber.
        assert_eq!(app.snapshot.values().as_slice(), &[9, 8, 7]);
    }

    #[tokio::test]
    async fn test_submit_invalid_input_keeps_editing() {
        let mut app = new_app(&[2, 1]);
        app.handle_command(UiCommand::BeginEditing);
        type_text(&mut app, "100,2");
        app.handle_command(UiCommand::SubmitEditing);

        assert!(app.view_state().input_field.is_editing);
        assert_eq!(
            app.view_state().input_error,
            Some(ValidationError::OutOfRange {
                token: "100".into()
            })
        );
        assert_eq!(app.controller().store().values().as_slice(), &[2, 1]);
        let lines = app.render();
        assert!(
            lines
                .iter()
                .any(|it| line_to_string(it) == "Numbers must be between 1 and 99")
        );
    }

    #[tokio::test]
    async fn test_speed_and_quit() {
        let mut app = new_app(&[2, 1]);
        app.handle_command(UiCommand::Control(ControlEvent::Faster));
        assert_eq!(app.view_state().speed.as_millis(), 400);
        assert_eq!(app.handle_command(UiCommand::Quit), Continuation::Exit);
    }

    #[test]
    fn test_paint_lines_writes_text() {
        let app = new_app(&[2, 1]);
        let mut buffer: Vec<u8> = vec![];
        paint_lines(&mut buffer, &app.render()).unwrap();
        let output = String::from_utf8_lossy(&buffer);
        assert!(output.contains(crate::TITLE));
        assert!(output.contains("Comparisons"));
    }
}
