// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use strum_macros::Display;

use crate::ControlEvent;

/// What a key press means to the app. Events that need the contents of the input field
/// (eg: submit) are resolved by the caller, which owns the field.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum UiCommand {
    Control(ControlEvent),
    BeginEditing,
    InsertChar(char),
    Backspace,
    SubmitEditing,
    CancelEditing,
    Quit,
}

/// Key bindings. While the input field is being edited, printable keys go to the field
/// instead of being shortcuts.
///
/// | Key          | Not editing    | Editing         |
/// | :----------- | :------------- | :-------------- |
/// | `Ctrl+C`     | quit           | quit            |
/// | `space`      | start / pause  | type            |
/// | `r`          | reset          | type            |
/// | `+` / `=`    | faster         | type            |
/// | `-` / `_`    | slower         | type            |
/// | `i`          | edit input     | type            |
/// | `q` / `Esc`  | quit           | `Esc` cancels   |
/// | `Enter`      |                | submit          |
/// | `Backspace`  |                | delete          |
#[must_use]
pub fn map_key_event(key_event: KeyEvent, is_editing: bool) -> Option<UiCommand> {
    // Only presses. Some terminals also report release and repeat.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c' | 'C') => Some(UiCommand::Quit),
            _ => None,
        };
    }

    if is_editing {
        return match key_event.code {
            KeyCode::Enter => Some(UiCommand::SubmitEditing),
            KeyCode::Esc => Some(UiCommand::CancelEditing),
            KeyCode::Backspace => Some(UiCommand::Backspace),
            KeyCode::Char(ch) => Some(UiCommand::InsertChar(ch)),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Char(' ') => Some(UiCommand::Control(ControlEvent::ToggleRun)),
        KeyCode::Char('r' | 'R') => Some(UiCommand::Control(ControlEvent::Reset)),
        KeyCode::Char('+' | '=') => Some(UiCommand::Control(ControlEvent::Faster)),
        KeyCode::Char('-' | '_') => Some(UiCommand::Control(ControlEvent::Slower)),
        KeyCode::Char('i' | 'I') => Some(UiCommand::BeginEditing),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(UiCommand::Quit),
        _ => None,
    }
}
