use std::{
    io::{self, Write},
    panic,
    sync::Once,
};

use anyhow::Result;
use crossterm::{
    cursor, event, queue,
    style::{self, Color},
    terminal,
};

use crate::screen::{TerminalPos, TerminalSize};

static PANIC_HOOK: Once = Once::new();

fn setup_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let current_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            // we can't do anything to recover if end_terminal returns an error,
            // so just ignore the Result
            let _ = end_terminal(&mut io::stdout());
            current_hook(panic_info);
        }));
    });
}

pub fn init_terminal<W: Write>(out: &mut W) -> Result<()> {
    setup_panic_hook();
    terminal::enable_raw_mode()?;

    queue!(out, terminal::EnterAlternateScreen)?;
    queue!(out, terminal::DisableLineWrap)?;
    queue!(out, event::EnableBracketedPaste)?;
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    out.flush()?;

    Ok(())
}

pub fn end_terminal<W: Write>(out: &mut W) -> Result<()> {
    queue!(out, style::ResetColor)?;
    queue!(out, event::DisableBracketedPaste)?;
    queue!(out, cursor::Show)?;
    queue!(out, terminal::EnableLineWrap)?;
    queue!(out, terminal::LeaveAlternateScreen)?;
    out.flush()?;

    terminal::disable_raw_mode()?;
    Ok(())
}

pub fn size() -> Result<TerminalSize> {
    let (x, y) = terminal::size()?;
    Ok(TerminalSize { x, y })
}

pub(crate) fn start_draw<W: Write>(out: &mut W) -> Result<()> {
    queue!(out, terminal::BeginSynchronizedUpdate)?;
    queue!(out, cursor::Hide)?;
    Ok(())
}

pub(crate) fn end_draw<W: Write>(out: &mut W, cursor_pos: Option<TerminalPos>) -> Result<()> {
    if let Some(pos) = cursor_pos {
        move_cursor(out, pos)?;
        queue!(out, cursor::Show)?;
    }
    queue!(out, terminal::EndSynchronizedUpdate)?;

    out.flush()?;
    Ok(())
}

pub(crate) fn clear_all<W: Write>(out: &mut W) -> Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    out.flush()?;
    Ok(())
}

fn move_cursor<W: Write>(out: &mut W, pos: TerminalPos) -> Result<()> {
    queue!(out, cursor::MoveTo(pos.x, pos.y))?;
    Ok(())
}

pub(crate) fn draw_colored_text<W: Write, T: AsRef<str>>(
    out: &mut W,
    pos: TerminalPos,
    text: T,
    foreground: Option<Color>,
    background: Option<Color>,
) -> Result<()> {
    move_cursor(out, pos)?;

    if let Some(foreground) = foreground {
        queue!(out, style::SetForegroundColor(foreground))?;
    }

    if let Some(background) = background {
        queue!(out, style::SetBackgroundColor(background))?;
    }

    queue!(out, style::Print(text.as_ref()))?;

    if foreground.is_some() || background.is_some() {
        queue!(out, style::ResetColor)?;
    }

    Ok(())
}
