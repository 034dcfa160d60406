//! Inline terminal picker
//!
//! Renders the candidate list on stderr below the prompt, moves the
//! selection with the arrow keys (or j/k), and confirms with Enter. Esc,
//! q, and Ctrl-C abort. Raw mode and cursor visibility are restored by a
//! drop guard on every exit path.

use std::io::{self, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Attribute;
use crossterm::terminal::ClearType;
use crossterm::{cursor, execute, queue, style, terminal};

use codespace_switch_core::error::CodespaceError;
use codespace_switch_core::select::Picker;

/// Interactive single-choice menu rendered inline on stderr
///
/// stdout stays clean for whatever the command prints afterwards.
#[derive(Debug, Default)]
pub struct TerminalPicker;

impl TerminalPicker {
    pub fn new() -> Self {
        Self
    }
}

impl Picker for TerminalPicker {
    fn pick(
        &self,
        keys: &[String],
        annotate: &dyn Fn(&str) -> String,
    ) -> Result<Option<String>, CodespaceError> {
        if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
            return Err(CodespaceError::Io(io::Error::other(
                "interactive selection needs a terminal; pass the codespace name instead",
            )));
        }
        run_menu(keys, annotate).map_err(CodespaceError::Io)
    }
}

fn run_menu(keys: &[String], annotate: &dyn Fn(&str) -> String) -> io::Result<Option<String>> {
    let lines: Vec<String> = keys
        .iter()
        .map(|key| format!("{key}  {}", annotate(key)))
        .collect();

    let mut err = io::stderr();
    writeln!(err, "Select a codespace (enter confirms, esc cancels):")?;

    let _guard = RawModeGuard::enable(&mut err)?;
    let mut selected = 0usize;
    draw(&mut err, &lines, selected, true)?;

    loop {
        if let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        {
            match (code, modifiers) {
                (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => return Ok(None),
                (KeyCode::Esc, _) | (KeyCode::Char('q'), _) => return Ok(None),
                (KeyCode::Enter, _) => return Ok(Some(keys[selected].clone())),
                (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                    selected = step(selected, lines.len(), -1);
                    draw(&mut err, &lines, selected, false)?;
                }
                (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                    selected = step(selected, lines.len(), 1);
                    draw(&mut err, &lines, selected, false)?;
                }
                _ => {}
            }
        }
    }
}

/// Move the selection by one step, clamped to the list bounds
fn step(selected: usize, len: usize, delta: isize) -> usize {
    if delta < 0 {
        selected.saturating_sub(1)
    } else {
        (selected + 1).min(len.saturating_sub(1))
    }
}

fn draw(out: &mut impl Write, lines: &[String], selected: usize, first: bool) -> io::Result<()> {
    if !first {
        queue!(out, cursor::MoveUp(lines.len() as u16))?;
    }
    for (i, line) in lines.iter().enumerate() {
        queue!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine)
        )?;
        if i == selected {
            queue!(
                out,
                style::SetAttribute(Attribute::Bold),
                style::Print(format!("> {line}")),
                style::SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, style::Print(format!("  {line}")))?;
        }
        queue!(out, style::Print("\r\n"))?;
    }
    out.flush()
}

/// Restores the terminal on drop, whatever path the menu exits through
struct RawModeGuard;

impl RawModeGuard {
    fn enable(out: &mut impl Write) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut err = io::stderr();
        let _ = execute!(err, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}
