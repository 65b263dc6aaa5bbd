//! Raw-mode line editor with arrow-key history recall.

use autohire_core::CommandHistory;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, Write};

/// Result of one line-editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Submit(String),
    /// Ctrl-C or Ctrl-D.
    Exit,
}

/// Read one line in raw mode. ArrowUp/ArrowDown walk the command
/// history, replacing the buffer; stepping past the newest entry
/// restores an empty buffer.
pub fn read_line(prompt: &str, history: &mut CommandHistory) -> io::Result<LineOutcome> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    enable_raw_mode()?;
    let outcome = edit_loop(prompt, history, &mut stdout);
    disable_raw_mode()?;
    writeln!(stdout)?;
    stdout.flush()?;
    outcome
}

fn edit_loop(
    prompt: &str,
    history: &mut CommandHistory,
    stdout: &mut io::Stdout,
) -> io::Result<LineOutcome> {
    let mut buffer = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Ok(LineOutcome::Exit);
            }
            KeyCode::Enter => return Ok(LineOutcome::Submit(buffer)),
            KeyCode::Up => {
                if let Some(entry) = history.previous() {
                    buffer = entry.to_string();
                    redraw(prompt, &buffer, stdout)?;
                }
            }
            KeyCode::Down => {
                // Outside browse mode Down must not clobber a
                // partially typed line.
                if history.is_browsing() {
                    buffer = history.next().map(str::to_string).unwrap_or_default();
                    redraw(prompt, &buffer, stdout)?;
                }
            }
            KeyCode::Backspace => {
                if buffer.pop().is_some() {
                    redraw(prompt, &buffer, stdout)?;
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.push(c);
                write!(stdout, "{c}")?;
                stdout.flush()?;
            }
            _ => {}
        }
    }
}

fn redraw(prompt: &str, buffer: &str, stdout: &mut io::Stdout) -> io::Result<()> {
    // Clear the current line and repaint prompt plus buffer.
    write!(stdout, "\r\x1b[2K{prompt}{buffer}")?;
    stdout.flush()
}

/// Plain (cooked-mode) prompt used for form fields and file paths.
pub fn ask(prompt: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Re-ask until a non-empty value is given.
pub fn ask_required(prompt: &str) -> io::Result<String> {
    loop {
        let value = ask(prompt)?;
        if !value.is_empty() {
            return Ok(value);
        }
        println!("  (required)");
    }
}
