use crate::application::{button_at, App, AppMode, ButtonStyle, KEYPAD_COLS, KEYPAD_ROWS};
use crate::domain::ThemeConfig;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::str::FromStr;
use tracing::warn;

/// Colors resolved from the configured theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub display_text: Color,
    pub button_text: Color,
    pub digit_button: Color,
    pub accent_button: Color,
    pub control_button: Color,
    pub focus: Color,
}

fn parse_color(name: &str, value: &str, fallback: &str) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        warn!(name, value, "invalid theme color, using default");
        Color::from_str(fallback).unwrap_or(Color::Reset)
    })
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = ThemeConfig::default();
        Self {
            background: parse_color("background", &config.background, &defaults.background),
            display_text: parse_color("display_text", &config.display_text, &defaults.display_text),
            button_text: parse_color("button_text", &config.button_text, &defaults.button_text),
            digit_button: parse_color("digit_button", &config.digit_button, &defaults.digit_button),
            accent_button: parse_color("accent_button", &config.accent_button, &defaults.accent_button),
            control_button: parse_color("control_button", &config.control_button, &defaults.control_button),
            focus: parse_color("focus", &config.focus, &defaults.focus),
        }
    }

    fn button_color(&self, style: ButtonStyle) -> Color {
        match style {
            ButtonStyle::Digit => self.digit_button,
            ButtonStyle::Accent => self.accent_button,
            ButtonStyle::Control => self.control_button,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

/// Screen regions, computed the same way for drawing and mouse hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub display: Rect,
    pub keypad: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        display: chunks[1],
        keypad: chunks[2],
        status: chunks[3],
    }
}

/// Splits the keypad area into one rectangle per grid cell, row by row.
pub fn keypad_cells(area: Rect) -> Vec<Vec<Rect>> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, KEYPAD_ROWS as u32); KEYPAD_ROWS])
        .split(area);

    rows.iter()
        .map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, KEYPAD_COLS as u32); KEYPAD_COLS])
                .split(*row)
                .to_vec()
        })
        .collect()
}

/// Returns the grid position of the keypad cell under a screen coordinate.
pub fn keypad_hit(area: Rect, column: u16, row: u16) -> Option<(usize, usize)> {
    let point = Position::new(column, row);
    keypad_cells(area).iter().enumerate().find_map(|(r, cells)| {
        cells
            .iter()
            .position(|cell| cell.contains(point))
            .map(|c| (r, c))
    })
}

pub fn render_ui(f: &mut Frame, app: &App, theme: &Theme) {
    let layout = screen_layout(f.area());

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        f.area(),
    );

    render_header(f, layout.header);
    render_display(f, app, theme, layout.display);
    render_keypad(f, app, theme, layout.keypad);
    render_status_bar(f, app, layout.status);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("scicalc - Scientific Calculator")
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_display(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let display = Paragraph::new(app.display())
        .alignment(Alignment::Right)
        .style(
            Style::default()
                .fg(theme.display_text)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(display, area);
}

fn render_keypad(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    for (row, cells) in keypad_cells(area).into_iter().enumerate() {
        for (col, cell) in cells.into_iter().enumerate() {
            let Some(button) = button_at(row, col) else {
                continue;
            };

            let mut style = Style::default()
                .fg(theme.button_text)
                .bg(theme.button_color(button.style));
            if app.focused == (row, col) {
                style = style.bg(theme.focus).add_modifier(Modifier::BOLD);
            }

            // Center the label vertically inside the bordered cell
            let padding = cell.height.saturating_sub(3) / 2;
            let mut lines = vec![""; padding as usize];
            lines.push(button.label);

            let widget = Paragraph::new(lines.join("\n"))
                .alignment(Alignment::Center)
                .style(style)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(theme.background).bg(theme.background)),
                );
            f.render_widget(widget, cell);
        }
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Normal => app.status_message.clone().unwrap_or_else(|| {
            "Enter/=: evaluate | Esc: clear | ⌫: delete | S: x² | I: 1/x | y: copy | F1/?: help | q: quit"
                .to_string()
        }),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let style = match app.mode {
        AppMode::Normal if app.calculator.is_showing_error() => Style::default().fg(Color::Red),
        AppMode::Normal => Style::default(),
        AppMode::Help => Style::default().fg(Color::Cyan),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("scicalc Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

pub fn get_help_text() -> &'static str {
    r#"SCICALC EXPRESSION REFERENCE

=== ARITHMETIC ===
+ - * /         Add, subtract, multiply, divide      2+3*4 → 14
^ or **         Power (right-associative)            2^3^2 → 512
( )             Grouping                             (2+3)*4 → 20
-x              Negation binds looser than power     -2^2 → -4
2π, 3(4)        Implicit multiplication              2π → 6.28318531

=== FUNCTIONS (radians) ===
√x, √(x)        Square root                          √(16) → 4
sin(x) cos(x) tan(x)                                 sin(0) → 0
log(x)          Base-10 logarithm                    log(1000) → 3
ln(x)           Natural logarithm                    ln(e) → 1

=== CONSTANTS ===
π or pi         3.14159265...
e               2.71828183...

=== COMMANDS ===
=               Evaluate, rounded to 8 decimal places
x²              Square the number on the display
1/x             Reciprocal of the number on the display
C               Clear the display
⌫               Delete the last character

Failed commands show "Error"; the status line says why.
The next key after "Error" starts a new expression.

=== KEYBOARD ===
0-9 . + - * / ^ ( )   Type themselves
p               π
e               e
r               √
s c t           sin cos tan
l n             log ln
Enter or =      Evaluate
Backspace       Delete last character
Esc or Delete   Clear
S               Square (x²)
I               Inverse (1/x)
y               Copy the display to the clipboard
Arrow keys      Move keypad focus
Space           Press the focused button
F1 or ?         Show this help
q or Ctrl+C     Quit

=== MOUSE ===
Left click      Press a keypad button

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#
}
