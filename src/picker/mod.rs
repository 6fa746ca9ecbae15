//! Interactive terminal picker
//!
//! Draws the selector once with whatever the store holds, then hydrates the
//! store from the persisted slot and keeps redrawing until the user confirms
//! or quits.

mod event;

pub use event::{Event, Handler};

use crate::registry::AgentDescriptor;
use crate::selection::{AgentContext, AgentProvider, SelectionError};
use crate::storage::KeyValueStore;
use crate::widget::{SelectorState, render_selector, selector_height};
use anyhow::Result;
use ratatui::crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
};
use std::io;
use tracing::{debug, info};

/// Result of handling one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep running
    Continue,
    /// User left without choosing
    Quit,
    /// User confirmed this agent
    Selected(&'static AgentDescriptor),
}

/// Picker state bound to a selection context
#[derive(Debug)]
pub struct Picker<S> {
    ctx: AgentContext<S>,
    state: SelectorState,
}

impl<S: KeyValueStore> Picker<S> {
    /// Create a picker with the cursor on the current selection
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingProvider`] if the provider is gone.
    pub fn new(ctx: AgentContext<S>) -> Result<Self, SelectionError> {
        let mut state = SelectorState::new();
        state.start(&ctx.read()?);
        Ok(Self { ctx, state })
    }

    /// Selector cursor and filter
    #[must_use]
    pub const fn state(&self) -> &SelectorState {
        &self.state
    }

    /// Apply the persisted selection and move the cursor onto it
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingProvider`] if the provider is gone.
    pub fn hydrate(&mut self) -> Result<(), SelectionError> {
        let current = self.ctx.hydrate()?;
        debug!("Picker hydrated with {:?}", current);
        if self.state.filter.is_empty() {
            self.state.start(&current);
        }
        Ok(())
    }

    /// Handle a key press
    ///
    /// # Errors
    ///
    /// Propagates selection errors raised while confirming.
    pub fn handle_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> Result<Outcome, SelectionError> {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Ok(Outcome::Quit),
            KeyCode::Esc => Ok(Outcome::Quit),
            KeyCode::Enter => Ok(self
                .state
                .confirm(&self.ctx)?
                .map_or(Outcome::Continue, Outcome::Selected)),
            KeyCode::Up => {
                self.state.select_prev();
                Ok(Outcome::Continue)
            }
            KeyCode::Down | KeyCode::Tab => {
                self.state.select_next();
                Ok(Outcome::Continue)
            }
            KeyCode::Backspace => {
                self.state.handle_filter_backspace();
                Ok(Outcome::Continue)
            }
            KeyCode::Char(c) => {
                self.state.handle_filter_char(c);
                Ok(Outcome::Continue)
            }
            _ => Ok(Outcome::Continue),
        }
    }

    /// Draw the selector centered in the frame
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingProvider`] if the provider is gone.
    pub fn draw(&self, frame: &mut Frame<'_>) -> Result<(), SelectionError> {
        let current = self.ctx.read()?;
        let area = centered_rect_absolute(70, selector_height(&self.state), frame.area());
        render_selector(frame, area, &self.state, &current);
        Ok(())
    }
}

/// Run the picker on the real terminal.
///
/// Returns the confirmed agent, or `None` if the user quit.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven or no store is provided.
pub fn run<S: KeyValueStore>(
    provider: &AgentProvider<S>,
    handler: &Handler,
) -> Result<Option<&'static AgentDescriptor>> {
    let mut picker = Picker::new(provider.use_agent()?)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut picker, handler);

    // Restore every piece of terminal state even if an earlier step fails
    let raw_mode = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();

    let chosen = result?;
    raw_mode?;
    screen?;
    cursor?;
    Ok(chosen)
}

fn run_loop<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    picker: &mut Picker<S>,
    handler: &Handler,
) -> Result<Option<&'static AgentDescriptor>> {
    draw(terminal, picker)?;
    picker.hydrate()?;

    loop {
        draw(terminal, picker)?;

        match handler.next()? {
            Event::Key(key) => match picker.handle_key(key.code, key.modifiers)? {
                Outcome::Continue => {}
                Outcome::Quit => {
                    info!("Picker closed without a selection");
                    return Ok(None);
                }
                Outcome::Selected(agent) => return Ok(Some(agent)),
            },
            Event::Tick | Event::Resize(_, _) => {}
        }
    }
}

fn draw<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    picker: &Picker<S>,
) -> Result<()> {
    let mut draw_result = Ok(());
    terminal.draw(|frame| draw_result = picker.draw(frame))?;
    draw_result?;
    Ok(())
}

/// Rectangle `percent_x` wide and `height` rows tall, centered in `area`
#[must_use]
pub fn centered_rect_absolute(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical_padding = area.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_padding),
            Constraint::Length(height),
            Constraint::Length(vertical_padding),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
