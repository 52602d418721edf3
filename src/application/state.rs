//! Application state management for the terminal calculator.
//!
//! This module contains the controller that owns the calculator and the UI
//! state. Input handlers only ever call into [`App`]; they never touch the
//! expression buffer directly.

use super::keypad::{button_at, position_of, ButtonAction, KEYPAD_COLS, KEYPAD_ROWS};
use crate::domain::{Calculator, CalculatorConfig};
use tracing::debug;

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Calculator input
    Normal,
    /// Help screen is displayed
    Help,
}

/// Main application state containing the calculator and UI state.
///
/// # Examples
///
/// ```
/// use scicalc::application::{App, ButtonAction};
///
/// let mut app = App::default();
/// app.press(ButtonAction::Input("2"));
/// app.press(ButtonAction::Input("^"));
/// app.press(ButtonAction::Input("3"));
/// app.press(ButtonAction::Evaluate);
/// assert_eq!(app.display(), "8");
/// ```
pub struct App {
    /// The expression buffer and its commands
    pub calculator: Calculator,
    /// Current application mode
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Keypad button with keyboard focus as (row, col)
    pub focused: (usize, usize),
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Loaded configuration
    pub config: CalculatorConfig,
}

impl Default for App {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

impl App {
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            calculator: Calculator::from_config(&config),
            mode: AppMode::Normal,
            help_scroll: 0,
            focused: position_of(ButtonAction::Evaluate).unwrap_or((0, 0)),
            status_message: None,
            config,
        }
    }

    /// The text currently shown on the display.
    pub fn display(&self) -> &str {
        self.calculator.display()
    }

    /// Performs the action of a keypad button.
    ///
    /// A failed command leaves the error marker on the display and explains
    /// the failure on the status line.
    pub fn press(&mut self, action: ButtonAction) {
        debug!(?action, "button pressed");
        self.status_message = None;

        match action {
            ButtonAction::Input(token) => self.calculator.append(token),
            ButtonAction::Clear => self.calculator.clear(),
            ButtonAction::Backspace => self.calculator.delete_last(),
            ButtonAction::Evaluate => {
                self.calculator.evaluate();
            }
            ButtonAction::Square => {
                self.calculator.square();
            }
            ButtonAction::Inverse => {
                self.calculator.inverse();
            }
        }

        if let Some(err) = self.calculator.last_error() {
            self.status_message = Some(format!("Error: {}", err));
        }
    }

    /// Moves keyboard focus by the given offsets, skipping empty cells.
    ///
    /// Focus stays put at the edges of the grid.
    pub fn move_focus(&mut self, row_delta: isize, col_delta: isize) {
        let (mut row, mut col) = self.focused;
        loop {
            let next_row = row as isize + row_delta;
            let next_col = col as isize + col_delta;
            if next_row < 0
                || next_col < 0
                || next_row >= KEYPAD_ROWS as isize
                || next_col >= KEYPAD_COLS as isize
                || (row_delta == 0 && col_delta == 0)
            {
                return;
            }
            row = next_row as usize;
            col = next_col as usize;
            if button_at(row, col).is_some() {
                self.focused = (row, col);
                return;
            }
        }
    }

    /// Presses the focused button.
    pub fn activate_focused(&mut self) {
        let (row, col) = self.focused;
        if let Some(button) = button_at(row, col) {
            self.press(button.action);
        }
    }

    /// Presses the button at a grid position and moves focus to it.
    pub fn press_at(&mut self, row: usize, col: usize) {
        if let Some(button) = button_at(row, col) {
            self.focused = (row, col);
            self.press(button.action);
        }
    }

    /// Records the outcome of copying the display to the clipboard.
    ///
    /// # Arguments
    ///
    /// * `result` - Copied text or error message
    pub fn set_copy_result(&mut self, result: Result<String, String>) {
        self.status_message = Some(match result {
            Ok(text) => format!("Copied {} to clipboard", text),
            Err(error) => format!("Copy failed: {}", error),
        });
    }

    /// Opens or closes the help screen.
    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Normal => {
                self.help_scroll = 0;
                AppMode::Help
            }
            AppMode::Help => AppMode::Normal,
        };
    }
}
