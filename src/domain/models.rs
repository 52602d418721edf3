use serde::{Deserialize, Serialize};

/// The in-progress expression shown on the calculator display.
///
/// A flat string with no structural validation; it is only parsed when
/// evaluated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    text: String,
}

impl Expression {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push_str(&mut self, token: &str) {
        self.text.push_str(token);
    }

    /// Removes the last character. Multi-byte symbols such as `√` go in one step.
    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Colors used by the terminal UI, as `#RRGGBB` strings or named colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: String,
    pub display_text: String,
    pub button_text: String,
    pub digit_button: String,
    pub accent_button: String,
    pub control_button: String,
    pub focus: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#1C1C1C".to_string(),
            display_text: "#FFFFFF".to_string(),
            button_text: "#FFFFFF".to_string(),
            digit_button: "#505050".to_string(),
            accent_button: "#FF9500".to_string(),
            control_button: "#333333".to_string(),
            focus: "#6B6B6B".to_string(),
        }
    }
}

/// User configuration loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Decimal places kept when displaying an evaluated result.
    pub precision: usize,
    pub theme: ThemeConfig,
}

impl CalculatorConfig {
    pub const DEFAULT_PRECISION: usize = 8;
    pub const MAX_PRECISION: usize = 15;

    /// Returns the precision clamped to what an `f64` can meaningfully show.
    pub fn effective_precision(&self) -> usize {
        self.precision.min(Self::MAX_PRECISION)
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            precision: Self::DEFAULT_PRECISION,
            theme: ThemeConfig::default(),
        }
    }
}
