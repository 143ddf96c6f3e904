use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        self, BeginSynchronizedUpdate, DisableLineWrap, EnableLineWrap, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus alternate screen for as long as the value lives.
pub struct TerminalSession {
    pub terminal: Tui,
    restored: bool,
}

impl TerminalSession {
    pub fn begin() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, DisableLineWrap, cursor::Hide)?;
        let backend = CrosstermBackend::new(out);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn end(mut self) -> Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        let mut out = io::stdout();
        execute!(
            out,
            BeginSynchronizedUpdate,
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen,
            EndSynchronizedUpdate
        )?;
        terminal::disable_raw_mode()?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Screen-wide mouse reporting, released when dropped. Owned by the
/// dashboard loop so click observation never outlives it.
pub struct MouseCapture(());

impl MouseCapture {
    pub fn acquire() -> Result<Self> {
        execute!(io::stdout(), EnableMouseCapture).context("enabling mouse capture")?;
        tracing::debug!("mouse capture on");
        Ok(Self(()))
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture);
        tracing::debug!("mouse capture off");
    }
}
