//! Keypad layout shared by rendering, keyboard focus and mouse hit testing.

/// What pressing a button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Append a token to the display
    Input(&'static str),
    Clear,
    Backspace,
    Evaluate,
    Square,
    Inverse,
}

/// Visual class of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Digit,
    Accent,
    Control,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub action: ButtonAction,
    pub style: ButtonStyle,
}

const fn input(label: &'static str) -> Option<Button> {
    Some(Button {
        label,
        action: ButtonAction::Input(label),
        style: ButtonStyle::Digit,
    })
}

const fn command(label: &'static str, action: ButtonAction, style: ButtonStyle) -> Option<Button> {
    Some(Button { label, action, style })
}

pub const KEYPAD_ROWS: usize = 8;
pub const KEYPAD_COLS: usize = 4;

/// Button grid, top row first. `None` is an empty cell.
pub const KEYPAD: [[Option<Button>; KEYPAD_COLS]; KEYPAD_ROWS] = [
    [
        command("C", ButtonAction::Clear, ButtonStyle::Accent),
        input("("),
        input(")"),
        command("⌫", ButtonAction::Backspace, ButtonStyle::Control),
    ],
    [input("7"), input("8"), input("9"), input("/")],
    [input("4"), input("5"), input("6"), input("*")],
    [input("1"), input("2"), input("3"), input("-")],
    [input("0"), input("."), input("^"), input("+")],
    [
        input("sin"),
        input("cos"),
        input("tan"),
        command("=", ButtonAction::Evaluate, ButtonStyle::Accent),
    ],
    [input("ln"), input("π"), input("e"), input("√")],
    [
        command("x²", ButtonAction::Square, ButtonStyle::Accent),
        command("1/x", ButtonAction::Inverse, ButtonStyle::Accent),
        input("log"),
        None,
    ],
];

/// Returns the button at a grid position, if there is one.
pub fn button_at(row: usize, col: usize) -> Option<Button> {
    KEYPAD.get(row).and_then(|cells| cells.get(col)).copied().flatten()
}

/// Finds the grid position of the button with the given action.
pub fn position_of(action: ButtonAction) -> Option<(usize, usize)> {
    KEYPAD.iter().enumerate().find_map(|(row, cells)| {
        cells
            .iter()
            .position(|cell| cell.is_some_and(|button| button.action == action))
            .map(|col| (row, col))
    })
}
