use super::ui::{keypad_hit, screen_layout};
use crate::application::{App, AppMode, ButtonAction};
use crate::infrastructure::ClipboardService;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

pub struct InputHandler;

/// Maps a typed character to the keypad token it stands for.
fn token_for_char(c: char) -> Option<&'static str> {
    let token = match c {
        '0' => "0",
        '1' => "1",
        '2' => "2",
        '3' => "3",
        '4' => "4",
        '5' => "5",
        '6' => "6",
        '7' => "7",
        '8' => "8",
        '9' => "9",
        '.' => ".",
        '+' => "+",
        '-' => "-",
        '*' => "*",
        '/' => "/",
        '^' => "^",
        '(' => "(",
        ')' => ")",
        'p' | 'π' => "π",
        'e' => "e",
        'r' | '√' => "√",
        's' => "sin",
        'c' => "cos",
        't' => "tan",
        'l' => "log",
        'n' => "ln",
        _ => return None,
    };
    Some(token)
}

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    /// Routes a mouse event. `area` is the full terminal area last drawn.
    pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, area: Rect) {
        match app.mode {
            AppMode::Normal => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    let keypad = screen_layout(area).keypad;
                    if let Some((row, col)) = keypad_hit(keypad, mouse.column, mouse.row) {
                        app.press_at(row, col);
                    }
                }
            }
            AppMode::Help => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    app.help_scroll = app.help_scroll.saturating_sub(1);
                }
                MouseEventKind::ScrollDown => {
                    app.help_scroll += 1;
                }
                MouseEventKind::Down(_) => {
                    app.mode = AppMode::Normal;
                }
                _ => {}
            },
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            // Ctrl+C is handled by the main loop
            return;
        }

        if let KeyCode::Char(c) = key {
            if let Some(token) = token_for_char(c) {
                app.press(ButtonAction::Input(token));
                return;
            }
        }

        match key {
            KeyCode::Char('=') | KeyCode::Enter => {
                app.press(ButtonAction::Evaluate);
            }
            KeyCode::Char('S') => {
                app.press(ButtonAction::Square);
            }
            KeyCode::Char('I') => {
                app.press(ButtonAction::Inverse);
            }
            KeyCode::Char('y') => {
                Self::copy_display(app);
            }
            KeyCode::Char(' ') => {
                app.activate_focused();
            }
            KeyCode::Backspace => {
                app.press(ButtonAction::Backspace);
            }
            KeyCode::Esc | KeyCode::Delete => {
                app.press(ButtonAction::Clear);
            }
            KeyCode::Up => app.move_focus(-1, 0),
            KeyCode::Down => app.move_focus(1, 0),
            KeyCode::Left => app.move_focus(0, -1),
            KeyCode::Right => app.move_focus(0, 1),
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.toggle_help();
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn copy_display(app: &mut App) {
        let result = if app.display().is_empty() {
            Err("display is empty".to_string())
        } else {
            ClipboardService::copy_text(app.display())
        };
        app.set_copy_result(result);
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.toggle_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
