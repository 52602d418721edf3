//! Calculator services: the expression buffer and its evaluation commands.
//!
//! Every failure is caught at the command boundary and turned into the
//! [`ERROR_MARKER`] display string. The underlying [`EvalError`] is kept so
//! callers can tell syntax, domain and arithmetic failures apart.

use super::errors::{EvalError, EvalResult};
use super::models::{CalculatorConfig, Expression};
use super::parser::{ExpressionEvaluator, FunctionRegistry, Parser};
use tracing::{debug, warn};

/// Text shown on the display after a failed command.
pub const ERROR_MARKER: &str = "Error";

/// Parses and evaluates an expression against the given registry.
///
/// # Examples
///
/// ```
/// use scicalc::domain::{evaluate_expression, FunctionRegistry};
///
/// let registry = FunctionRegistry::new();
/// assert_eq!(evaluate_expression("2^3", &registry).unwrap(), 8.0);
/// assert!(evaluate_expression("1/0", &registry).is_err());
/// ```
pub fn evaluate_expression(input: &str, registry: &FunctionRegistry) -> EvalResult<f64> {
    let mut parser = Parser::new(input)?;
    let ast = parser.parse()?;
    ExpressionEvaluator::new(registry).evaluate(&ast)
}

/// Formats a value rounded to `precision` decimal places.
///
/// Trailing zeros are dropped, so integral results have no fractional part,
/// and negative zero is shown as `0`.
///
/// ```
/// use scicalc::domain::format_result;
///
/// assert_eq!(format_result(8.0, 8), "8");
/// assert_eq!(format_result(std::f64::consts::PI, 8), "3.14159265");
/// assert_eq!(format_result(0.1 + 0.2, 8), "0.3");
/// ```
pub fn format_result(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    normalize_zero(trimmed)
}

/// Formats a value with the shortest representation that round-trips.
fn format_exact(value: f64) -> String {
    normalize_zero(&value.to_string())
}

fn normalize_zero(text: &str) -> String {
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Parses the whole display as a single finite number.
fn parse_single_value(text: &str) -> EvalResult<f64> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| EvalError::Syntax(format!("not a number: {:?}", text)))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Syntax(format!("not a finite number: {:?}", text)))
    }
}

/// The calculator's expression buffer together with its commands.
///
/// # Examples
///
/// ```
/// use scicalc::domain::Calculator;
///
/// let mut calc = Calculator::default();
/// calc.append("√");
/// calc.append("(16)");
/// assert_eq!(calc.evaluate(), "4");
///
/// calc.clear();
/// calc.append("1/0");
/// assert_eq!(calc.evaluate(), "Error");
/// ```
pub struct Calculator {
    expression: Expression,
    registry: FunctionRegistry,
    precision: usize,
    last_error: Option<EvalError>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(CalculatorConfig::DEFAULT_PRECISION)
    }
}

impl Calculator {
    /// Creates an empty calculator rounding results to `precision` decimal places.
    pub fn new(precision: usize) -> Self {
        Self {
            expression: Expression::default(),
            registry: FunctionRegistry::new(),
            precision,
            last_error: None,
        }
    }

    /// Creates a calculator configured from `config`.
    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::new(config.effective_precision())
    }

    /// The current display text.
    pub fn display(&self) -> &str {
        self.expression.as_str()
    }

    /// The failure behind the error marker, if one is showing.
    pub fn last_error(&self) -> Option<&EvalError> {
        self.last_error.as_ref()
    }

    pub fn is_showing_error(&self) -> bool {
        self.last_error.is_some()
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Appends a token without validating it.
    ///
    /// When the display shows the error marker, the token starts a new
    /// expression instead of being appended to the marker.
    pub fn append(&mut self, token: &str) {
        if self.last_error.take().is_some() {
            self.expression.clear();
        }
        self.expression.push_str(token);
    }

    pub fn clear(&mut self) {
        self.expression.clear();
        self.last_error = None;
    }

    /// Removes the last character; the error marker is removed as a whole.
    pub fn delete_last(&mut self) {
        if self.last_error.is_some() {
            self.clear();
        } else {
            self.expression.pop();
        }
    }

    /// Evaluates the display and replaces it with the rounded result.
    pub fn evaluate(&mut self) -> String {
        let result = evaluate_expression(self.expression.as_str(), &self.registry)
            .map(|value| format_result(value, self.precision));
        self.apply("evaluate", result)
    }

    /// Replaces a single numeric display value with its square.
    pub fn square(&mut self) -> String {
        let result = parse_single_value(self.expression.as_str()).and_then(|value| {
            let squared = value * value;
            if squared.is_finite() {
                Ok(format_exact(squared))
            } else {
                Err(EvalError::Arithmetic("square overflowed".to_string()))
            }
        });
        self.apply("square", result)
    }

    /// Replaces a single numeric display value with its reciprocal.
    pub fn inverse(&mut self) -> String {
        let result = parse_single_value(self.expression.as_str()).and_then(|value| {
            if value == 0.0 {
                Err(EvalError::Arithmetic("division by zero".to_string()))
            } else {
                Ok(format_exact(1.0 / value))
            }
        });
        self.apply("inverse", result)
    }

    fn apply(&mut self, command: &str, result: EvalResult<String>) -> String {
        match result {
            Ok(text) => {
                debug!(command, input = self.expression.as_str(), output = %text, "command succeeded");
                self.expression.replace(text);
                self.last_error = None;
            }
            Err(err) => {
                warn!(command, input = self.expression.as_str(), kind = ?err.kind(), "{}", err);
                self.expression.replace(ERROR_MARKER);
                self.last_error = Some(err);
            }
        }
        self.expression.as_str().to_string()
    }
}
