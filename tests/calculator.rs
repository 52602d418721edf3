use scicalc::application::{App, ButtonAction};
use scicalc::domain::{Calculator, ErrorKind, EvalError, ERROR_MARKER};

fn evaluate(input: &str) -> String {
    let mut calc = Calculator::default();
    calc.append(input);
    calc.evaluate()
}

#[test]
fn evaluates_plain_arithmetic_with_precedence() {
    let cases = [
        ("1+2*3", "7"),
        ("(1+2)*3", "9"),
        ("10-4-3", "3"),
        ("100/10/5", "2"),
        ("2*3^2", "18"),
        ("-3+5", "2"),
        ("1/3", "0.33333333"),
        ("2/3", "0.66666667"),
        ("1.5*4", "6"),
    ];
    for (input, expected) in cases {
        assert_eq!(evaluate(input), expected, "evaluating {input}");
    }
}

#[test]
fn evaluates_documented_examples() {
    assert_eq!(evaluate("2^3"), "8");
    assert_eq!(evaluate("√(16)"), "4");
    assert_eq!(evaluate("1/0"), ERROR_MARKER);
}

#[test]
fn square_and_inverse_on_single_values() {
    let mut calc = Calculator::default();
    calc.append("5");
    assert_eq!(calc.square(), "25");

    let mut calc = Calculator::default();
    calc.append("abc");
    assert_eq!(calc.square(), "Error");

    let mut calc = Calculator::default();
    calc.append("4");
    assert_eq!(calc.inverse(), "0.25");

    let mut calc = Calculator::default();
    calc.append("0");
    assert_eq!(calc.inverse(), "Error");
}

#[test]
fn delete_last_on_empty_buffer_is_a_no_op() {
    let mut calc = Calculator::default();
    calc.delete_last();
    calc.delete_last();
    assert_eq!(calc.display(), "");
    assert!(calc.last_error().is_none());
}

#[test]
fn clear_always_yields_an_empty_buffer() {
    let sequences: [&[&str]; 4] = [
        &[],
        &["1", "+", "2"],
        &["sin", "(", "π", ")", "^", "√"],
        &["Error", "e", "ln", "log"],
    ];
    for tokens in sequences {
        let mut calc = Calculator::default();
        for token in tokens {
            calc.append(token);
        }
        calc.clear();
        assert_eq!(calc.display(), "");

        calc.append("9");
        assert_eq!(calc.display(), "9");
    }
}

#[test]
fn failures_are_classified() {
    let cases = [
        ("2+", ErrorKind::Syntax),
        ("sin", ErrorKind::Syntax),
        ("1/(2-2)", ErrorKind::Arithmetic),
        ("√(-4)", ErrorKind::Domain),
        ("ln(0)", ErrorKind::Domain),
    ];
    for (input, kind) in cases {
        let mut calc = Calculator::default();
        calc.append(input);
        assert_eq!(calc.evaluate(), ERROR_MARKER);
        assert_eq!(calc.last_error().map(EvalError::kind), Some(kind), "evaluating {input}");
    }
}

#[test]
fn keypad_session() {
    let mut app = App::default();
    for token in ["(", "1", "+", "2", ")", "^", "2"] {
        app.press(ButtonAction::Input(token));
    }
    app.press(ButtonAction::Evaluate);
    assert_eq!(app.display(), "9");

    app.press(ButtonAction::Inverse);
    assert_eq!(app.display(), "0.1111111111111111");

    app.press(ButtonAction::Clear);
    app.press(ButtonAction::Input("log"));
    app.press(ButtonAction::Input("("));
    app.press(ButtonAction::Input("0"));
    app.press(ButtonAction::Input(")"));
    app.press(ButtonAction::Evaluate);
    assert_eq!(app.display(), "Error");
    assert!(app.status_message.as_deref().unwrap_or_default().contains("logarithm"));

    app.press(ButtonAction::Backspace);
    assert_eq!(app.display(), "");
}
