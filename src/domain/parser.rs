//! Expression parser for calculator input.
//!
//! This module implements a recursive descent parser for the calculator's
//! expression language. The display text is tokenized as a whole, so user
//! facing symbols such as `√` and `π` are recognized as tokens rather than
//! rewritten as text before evaluation.
//!
//! # BNF Grammar
//!
//! ```bnf
//! Expression     ::= Addition
//! Addition       ::= Multiplication ( ( "+" | "-" ) Multiplication )*
//! Multiplication ::= Unary ( ( "*" | "/" ) Unary | Implicit )*
//! Implicit       ::= Unary    (only when it starts with an identifier, "√" or "(")
//! Unary          ::= ( "+" | "-" ) Unary | Power
//! Power          ::= Root ( ( "**" | "^" ) Unary )?
//! Root           ::= "√" Root | Primary
//! Primary        ::= Number | Constant | FunctionCall | "(" Expression ")"
//! FunctionCall   ::= Identifier "(" ArgumentList? ")"
//! ArgumentList   ::= Expression ( "," Expression )*
//! Number         ::= [0-9]+ ( "." [0-9]* )? | "." [0-9]+
//! Constant       ::= "π" | "pi" | "e"
//! Identifier     ::= [a-z]+
//! ```
//!
//! Precedence from lowest to highest:
//! - Addition and subtraction
//! - Multiplication, division and implicit multiplication (`2π`, `3(4)`)
//! - Unary sign, so `-2^2` is `-(2^2)`
//! - Power (right-associative, `2^3^2` is `2^(3^2)`)
//! - Square root prefix `√`
//! - Parentheses, numbers, constants and function calls

use std::collections::HashMap;
use std::f64::consts::{E, PI};

use super::errors::{EvalError, EvalResult};

/// Represents a token in the expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Number(f64),
    Identifier(String),

    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
    PowerAlt,     // ^ alternative to **
    Sqrt,

    // Delimiters
    LeftParen,
    RightParen,
    Comma,

    // End of input
    Eof,
}

/// Represents an Abstract Syntax Tree node for expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Constant(String),

    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
    },

    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
    },

    FunctionCall {
        name: String,
        args: Vec<Expr>,
    },
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

/// Lexical analyzer for tokenizing expressions.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            input: chars,
            position: 0,
            current_char,
        }
    }

    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Reads a number token. Either side of the decimal point may be empty,
    /// but not both.
    fn read_number(&mut self) -> EvalResult<f64> {
        let mut number_str = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                number_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if self.current_char == Some('.') {
            number_str.push('.');
            self.advance();

            while let Some(ch) = self.current_char {
                if ch.is_ascii_digit() {
                    number_str.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        if number_str == "." {
            return Err(EvalError::Syntax("lone decimal point".to_string()));
        }

        let value = number_str
            .parse::<f64>()
            .map_err(|_| EvalError::Syntax(format!("invalid number: {}", number_str)))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::Arithmetic("number too large".to_string()))
        }
    }

    /// Reads an identifier. Only ASCII letters are consumed, so digits never
    /// become part of a name.
    fn read_identifier(&mut self) -> String {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_ascii_alphabetic() {
                identifier.push(ch.to_ascii_lowercase());
                self.advance();
            } else {
                break;
            }
        }

        identifier
    }

    /// Gets the next token from the input.
    pub fn next_token(&mut self) -> EvalResult<Token> {
        self.skip_whitespace();

        match self.current_char {
            None => Ok(Token::Eof),

            Some(ch) => match ch {
                '0'..='9' | '.' => {
                    let number = self.read_number()?;
                    Ok(Token::Number(number))
                }

                'A'..='Z' | 'a'..='z' => Ok(Token::Identifier(self.read_identifier())),

                'π' => {
                    self.advance();
                    Ok(Token::Identifier("π".to_string()))
                }

                '√' => {
                    self.advance();
                    Ok(Token::Sqrt)
                }

                '+' => {
                    self.advance();
                    Ok(Token::Plus)
                }

                '-' => {
                    self.advance();
                    Ok(Token::Minus)
                }

                '*' => {
                    self.advance();
                    if self.current_char == Some('*') {
                        self.advance();
                        Ok(Token::Power)
                    } else {
                        Ok(Token::Multiply)
                    }
                }

                '/' => {
                    self.advance();
                    Ok(Token::Divide)
                }

                '^' => {
                    self.advance();
                    Ok(Token::PowerAlt)
                }

                '(' => {
                    self.advance();
                    Ok(Token::LeftParen)
                }

                ')' => {
                    self.advance();
                    Ok(Token::RightParen)
                }

                ',' => {
                    self.advance();
                    Ok(Token::Comma)
                }

                _ => Err(EvalError::Syntax(format!("unexpected character: '{}'", ch))),
            },
        }
    }
}

/// Function signature for built-in and user-defined functions.
pub type FunctionImpl = fn(&[f64]) -> EvalResult<f64>;

/// Registry of named functions and constants.
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionImpl>,
    constants: HashMap<String, f64>,
}

fn single_argument(name: &str, args: &[f64]) -> EvalResult<f64> {
    match args {
        [value] => Ok(*value),
        _ => Err(EvalError::Syntax(format!(
            "{} requires exactly 1 argument",
            name.to_uppercase()
        ))),
    }
}

impl FunctionRegistry {
    /// Creates a new function registry with built-in functions and constants.
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
            constants: HashMap::new(),
        };

        registry.register_builtin_functions();
        registry.register_builtin_constants();
        registry
    }

    /// Registers a new function in the registry.
    pub fn register_function(&mut self, name: &str, func: FunctionImpl) {
        self.functions.insert(name.to_lowercase(), func);
    }

    /// Registers a named constant.
    pub fn register_constant(&mut self, name: &str, value: f64) {
        self.constants.insert(name.to_lowercase(), value);
    }

    /// Gets a function by name.
    pub fn get_function(&self, name: &str) -> Option<&FunctionImpl> {
        self.functions.get(&name.to_lowercase())
    }

    /// Gets a constant by name.
    pub fn get_constant(&self, name: &str) -> Option<f64> {
        self.constants.get(&name.to_lowercase()).copied()
    }

    fn register_builtin_functions(&mut self) {
        self.register_function("sqrt", |args| {
            let value = single_argument("sqrt", args)?;
            if value < 0.0 {
                Err(EvalError::Domain("square root of negative number".to_string()))
            } else {
                Ok(value.sqrt())
            }
        });

        self.register_function("log", |args| {
            let value = single_argument("log", args)?;
            if value <= 0.0 {
                Err(EvalError::Domain("logarithm of non-positive number".to_string()))
            } else {
                Ok(value.log10())
            }
        });

        self.register_function("ln", |args| {
            let value = single_argument("ln", args)?;
            if value <= 0.0 {
                Err(EvalError::Domain("logarithm of non-positive number".to_string()))
            } else {
                Ok(value.ln())
            }
        });

        self.register_function("sin", |args| Ok(single_argument("sin", args)?.sin()));
        self.register_function("cos", |args| Ok(single_argument("cos", args)?.cos()));
        self.register_function("tan", |args| Ok(single_argument("tan", args)?.tan()));
    }

    fn register_builtin_constants(&mut self) {
        self.register_constant("pi", PI);
        self.register_constant("π", PI);
        self.register_constant("e", E);
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Deepest nesting of parentheses, signs, roots and powers accepted.
pub const MAX_DEPTH: usize = 256;

/// Most tokens accepted in one expression. This also bounds the height of
/// operator chains such as `1+1+...+1`.
pub const MAX_TOKENS: usize = 1024;

/// Recursive descent parser for calculator expressions.
///
/// Recursion is bounded by [`MAX_DEPTH`] and [`MAX_TOKENS`], so hostile
/// input fails with a syntax error instead of exhausting the stack.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    token_count: usize,
    depth: usize,
}

impl Parser {
    /// Creates a new parser for the given expression.
    pub fn new(input: &str) -> EvalResult<Self> {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token()?;

        Ok(Self {
            lexer,
            current_token,
            token_count: 1,
            depth: 0,
        })
    }

    fn advance(&mut self) -> EvalResult<()> {
        self.token_count += 1;
        if self.token_count > MAX_TOKENS {
            return Err(EvalError::Syntax("expression too long".to_string()));
        }
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> EvalResult<T>) -> EvalResult<T> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::Syntax("expression nested too deeply".to_string()));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn expect(&mut self, expected: Token) -> EvalResult<()> {
        if std::mem::discriminant(&self.current_token) == std::mem::discriminant(&expected) {
            self.advance()
        } else {
            Err(EvalError::Syntax(format!(
                "expected {:?}, found {:?}",
                expected, self.current_token
            )))
        }
    }

    /// Parses the top-level expression.
    pub fn parse(&mut self) -> EvalResult<Expr> {
        if self.current_token == Token::Eof {
            return Err(EvalError::Syntax("empty expression".to_string()));
        }

        let expr = self.parse_addition()?;

        if self.current_token != Token::Eof {
            return Err(EvalError::Syntax(format!(
                "unexpected token at end: {:?}",
                self.current_token
            )));
        }

        Ok(expr)
    }

    /// Parses addition and subtraction expressions.
    fn parse_addition(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_multiplication()?;

        while matches!(self.current_token, Token::Plus | Token::Minus) {
            let op = match self.current_token {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Subtract,
                _ => unreachable!(),
            };
            self.advance()?;
            let right = self.parse_multiplication()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator: op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses multiplication and division, including implicit multiplication.
    fn parse_multiplication(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token {
                Token::Multiply => {
                    self.advance()?;
                    BinaryOp::Multiply
                }
                Token::Divide => {
                    self.advance()?;
                    BinaryOp::Divide
                }
                Token::Identifier(_) | Token::Sqrt | Token::LeftParen => BinaryOp::Multiply,
                _ => break,
            };
            let right = self.parse_unary()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator: op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses unary sign expressions.
    fn parse_unary(&mut self) -> EvalResult<Expr> {
        let operator = match self.current_token {
            Token::Plus => UnaryOp::Plus,
            Token::Minus => UnaryOp::Minus,
            _ => return self.parse_power(),
        };
        self.advance()?;
        let operand = self.nested(Self::parse_unary)?;
        Ok(Expr::Unary {
            operator,
            operand: Box::new(operand),
        })
    }

    /// Parses power expressions (right-associative).
    fn parse_power(&mut self) -> EvalResult<Expr> {
        let left = self.parse_root()?;

        if matches!(self.current_token, Token::Power | Token::PowerAlt) {
            self.advance()?;
            let right = self.nested(Self::parse_unary)?;
            Ok(Expr::Binary {
                left: Box::new(left),
                operator: BinaryOp::Power,
                right: Box::new(right),
            })
        } else {
            Ok(left)
        }
    }

    /// Parses the `√` prefix.
    fn parse_root(&mut self) -> EvalResult<Expr> {
        if self.current_token == Token::Sqrt {
            self.advance()?;
            let operand = self.nested(Self::parse_root)?;
            Ok(Expr::FunctionCall {
                name: "sqrt".to_string(),
                args: vec![operand],
            })
        } else {
            self.parse_primary()
        }
    }

    /// Parses primary expressions (highest precedence).
    fn parse_primary(&mut self) -> EvalResult<Expr> {
        match &self.current_token {
            Token::Number(value) => {
                let value = *value;
                self.advance()?;
                Ok(Expr::Number(value))
            }

            Token::Identifier(name) => {
                let name = name.clone();
                self.advance()?;

                if self.current_token == Token::LeftParen {
                    self.advance()?;
                    let args = self.nested(Self::parse_argument_list)?;
                    self.expect(Token::RightParen)?;
                    Ok(Expr::FunctionCall { name, args })
                } else {
                    Ok(Expr::Constant(name))
                }
            }

            Token::LeftParen => {
                self.advance()?;
                let expr = self.nested(Self::parse_addition)?;
                self.expect(Token::RightParen)?;
                Ok(expr)
            }

            _ => Err(EvalError::Syntax(format!(
                "unexpected token: {:?}",
                self.current_token
            ))),
        }
    }

    fn parse_argument_list(&mut self) -> EvalResult<Vec<Expr>> {
        let mut args = Vec::new();

        if self.current_token == Token::RightParen {
            return Ok(args);
        }

        args.push(self.parse_addition()?);

        while self.current_token == Token::Comma {
            self.advance()?;
            args.push(self.parse_addition()?);
        }

        Ok(args)
    }
}

/// Expression evaluator that walks the AST and computes results.
pub struct ExpressionEvaluator<'a> {
    function_registry: &'a FunctionRegistry,
}

/// Rejects a non-finite value produced from finite inputs.
fn check_finite(value: f64, operation: &str) -> EvalResult<f64> {
    if value.is_nan() {
        Err(EvalError::Domain(format!("{} is undefined", operation)))
    } else if value.is_infinite() {
        Err(EvalError::Arithmetic(format!("{} overflowed", operation)))
    } else {
        Ok(value)
    }
}

impl<'a> ExpressionEvaluator<'a> {
    /// Creates a new expression evaluator.
    pub fn new(function_registry: &'a FunctionRegistry) -> Self {
        Self { function_registry }
    }

    /// Evaluates an expression AST to a finite numeric result.
    pub fn evaluate(&self, expr: &Expr) -> EvalResult<f64> {
        match expr {
            Expr::Number(value) => Ok(*value),

            Expr::Constant(name) => self
                .function_registry
                .get_constant(name)
                .ok_or_else(|| EvalError::Syntax(format!("unknown identifier: {}", name))),

            Expr::Binary { left, operator, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;

                match operator {
                    BinaryOp::Add => check_finite(left_val + right_val, "addition"),
                    BinaryOp::Subtract => check_finite(left_val - right_val, "subtraction"),
                    BinaryOp::Multiply => check_finite(left_val * right_val, "multiplication"),
                    BinaryOp::Divide => {
                        if right_val == 0.0 {
                            Err(EvalError::Arithmetic("division by zero".to_string()))
                        } else {
                            check_finite(left_val / right_val, "division")
                        }
                    }
                    BinaryOp::Power => {
                        if left_val == 0.0 && right_val < 0.0 {
                            Err(EvalError::Arithmetic("division by zero".to_string()))
                        } else {
                            check_finite(left_val.powf(right_val), "power")
                        }
                    }
                }
            }

            Expr::Unary { operator, operand } => {
                let operand_val = self.evaluate(operand)?;

                match operator {
                    UnaryOp::Plus => Ok(operand_val),
                    UnaryOp::Minus => Ok(-operand_val),
                }
            }

            Expr::FunctionCall { name, args } => {
                let func = self
                    .function_registry
                    .get_function(name)
                    .ok_or_else(|| EvalError::Syntax(format!("unknown function: {}", name)))?;

                let arg_values = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<EvalResult<Vec<f64>>>()?;
                check_finite(func(&arg_values)?, name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    fn eval(input: &str) -> EvalResult<f64> {
        let registry = FunctionRegistry::new();
        let ast = Parser::new(input)?.parse()?;
        ExpressionEvaluator::new(&registry).evaluate(&ast)
    }

    #[test]
    fn test_lexer_numbers() {
        let mut lexer = Lexer::new("42 3.14 .5 7.");

        assert_eq!(lexer.next_token().unwrap(), Token::Number(42.0));
        assert_eq!(lexer.next_token().unwrap(), Token::Number(3.14));
        assert_eq!(lexer.next_token().unwrap(), Token::Number(0.5));
        assert_eq!(lexer.next_token().unwrap(), Token::Number(7.0));
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_lexer_operators() {
        let mut lexer = Lexer::new("+ - * / ** ^ √");

        assert_eq!(lexer.next_token().unwrap(), Token::Plus);
        assert_eq!(lexer.next_token().unwrap(), Token::Minus);
        assert_eq!(lexer.next_token().unwrap(), Token::Multiply);
        assert_eq!(lexer.next_token().unwrap(), Token::Divide);
        assert_eq!(lexer.next_token().unwrap(), Token::Power);
        assert_eq!(lexer.next_token().unwrap(), Token::PowerAlt);
        assert_eq!(lexer.next_token().unwrap(), Token::Sqrt);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_lexer_identifiers() {
        let mut lexer = Lexer::new("sin COS Tan πe log2");

        assert_eq!(lexer.next_token().unwrap(), Token::Identifier("sin".to_string()));
        assert_eq!(lexer.next_token().unwrap(), Token::Identifier("cos".to_string()));
        assert_eq!(lexer.next_token().unwrap(), Token::Identifier("tan".to_string()));
        assert_eq!(lexer.next_token().unwrap(), Token::Identifier("π".to_string()));
        assert_eq!(lexer.next_token().unwrap(), Token::Identifier("e".to_string()));
        assert_eq!(lexer.next_token().unwrap(), Token::Identifier("log".to_string()));
        assert_eq!(lexer.next_token().unwrap(), Token::Number(2.0));
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_lexer_error_handling() {
        assert!(Lexer::new("@").next_token().is_err());
        assert!(Lexer::new(".").next_token().is_err());
        assert!(Lexer::new("%").next_token().is_err());
    }

    #[test]
    fn test_parser_operator_precedence() {
        // 2 + 3 * 4 is parsed as 2 + (3 * 4)
        let expr = Parser::new("2 + 3 * 4").unwrap().parse().unwrap();
        match expr {
            Expr::Binary { left, operator: BinaryOp::Add, right } => {
                assert_eq!(*left, Expr::Number(2.0));
                match right.as_ref() {
                    Expr::Binary { operator: BinaryOp::Multiply, .. } => {}
                    _ => panic!("Expected multiplication as right operand"),
                }
            }
            _ => panic!("Expected addition at top level"),
        }
    }

    #[test]
    fn test_parser_power_right_associative() {
        let expr = Parser::new("2 ^ 3 ^ 2").unwrap().parse().unwrap();
        match expr {
            Expr::Binary { left, operator: BinaryOp::Power, right } => {
                assert_eq!(*left, Expr::Number(2.0));
                match right.as_ref() {
                    Expr::Binary { left: pow_left, operator: BinaryOp::Power, right: pow_right } => {
                        assert_eq!(**pow_left, Expr::Number(3.0));
                        assert_eq!(**pow_right, Expr::Number(2.0));
                    }
                    _ => panic!("Expected power as right operand"),
                }
            }
            _ => panic!("Expected power at top level"),
        }
    }

    #[test]
    fn test_parser_unary_binds_looser_than_power() {
        let expr = Parser::new("-2^2").unwrap().parse().unwrap();
        match expr {
            Expr::Unary { operator: UnaryOp::Minus, operand } => {
                assert!(matches!(operand.as_ref(), Expr::Binary { operator: BinaryOp::Power, .. }));
            }
            _ => panic!("Expected unary minus at top level"),
        }
    }

    #[test]
    fn test_parser_sqrt_prefix() {
        let expr = Parser::new("√(16)").unwrap().parse().unwrap();
        assert_eq!(
            expr,
            Expr::FunctionCall {
                name: "sqrt".to_string(),
                args: vec![Expr::Number(16.0)],
            }
        );
    }

    #[test]
    fn test_parser_constants_and_functions() {
        let expr = Parser::new("sin(pi)").unwrap().parse().unwrap();
        assert_eq!(
            expr,
            Expr::FunctionCall {
                name: "sin".to_string(),
                args: vec![Expr::Constant("pi".to_string())],
            }
        );
    }

    #[test]
    fn test_parser_implicit_multiplication() {
        let expr = Parser::new("2π").unwrap().parse().unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                left: Box::new(Expr::Number(2.0)),
                operator: BinaryOp::Multiply,
                right: Box::new(Expr::Constant("π".to_string())),
            }
        );

        // Two adjacent numbers are not a product
        assert!(Parser::new("2 3").unwrap().parse().is_err());
    }

    #[test]
    fn test_parser_error_handling() {
        assert!(Parser::new("2 +").unwrap().parse().is_err());
        assert!(Parser::new("(2 + 3").unwrap().parse().is_err());
        assert!(Parser::new("sin(").unwrap().parse().is_err());
        assert!(Parser::new("").unwrap().parse().is_err());
        assert!(Parser::new("2)").unwrap().parse().is_err());
    }

    #[test]
    fn test_lexer_rejects_oversized_number() {
        let err = Lexer::new(&"9".repeat(400)).next_token().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arithmetic);
    }

    #[test]
    fn test_parser_nesting_limit() {
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(eval(&nested(MAX_DEPTH)).unwrap(), 1.0);

        let err = eval(&nested(MAX_DEPTH + 1)).unwrap_err();
        assert_eq!(err, EvalError::Syntax("expression nested too deeply".to_string()));

        assert!(eval(&format!("{}4", "√".repeat(MAX_DEPTH + 1))).is_err());
        assert!(eval(&format!("{}1", "-".repeat(MAX_DEPTH + 1))).is_err());
        assert!(eval(&"2^".repeat(MAX_DEPTH + 1)).is_err());
        assert!(eval(&"(".repeat(10_000)).is_err());
        assert!(eval(&format!("{}1", "√".repeat(10_000))).is_err());
    }

    #[test]
    fn test_parser_token_limit() {
        assert_eq!(eval(&format!("{}1", "1+".repeat(100))).unwrap(), 101.0);

        let err = eval(&format!("{}1", "1+".repeat(MAX_TOKENS))).unwrap_err();
        assert_eq!(err, EvalError::Syntax("expression too long".to_string()));
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("2+3*4").unwrap(), 14.0);
        assert_eq!(eval("(2+3)*4").unwrap(), 20.0);
        assert_eq!(eval("2^3").unwrap(), 8.0);
        assert_eq!(eval("2**3").unwrap(), 8.0);
        assert_eq!(eval("2^3^2").unwrap(), 512.0);
        assert_eq!(eval("-2^2").unwrap(), -4.0);
        assert_eq!(eval("2^-1").unwrap(), 0.5);
        assert_eq!(eval("10/4").unwrap(), 2.5);
        assert_eq!(eval("3(4)").unwrap(), 12.0);
    }

    #[test]
    fn test_evaluate_functions_and_constants() {
        assert_eq!(eval("√(16)").unwrap(), 4.0);
        assert_eq!(eval("√16").unwrap(), 4.0);
        assert_eq!(eval("sqrt(2)*sqrt(2)").unwrap().round(), 2.0);
        assert!((eval("log(1000)").unwrap() - 3.0).abs() < 1e-12);
        assert!((eval("ln(e)").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(eval("sin(0)").unwrap(), 0.0);
        assert_eq!(eval("cos(0)").unwrap(), 1.0);
        assert_eq!(eval("π").unwrap(), PI);
        assert_eq!(eval("2e").unwrap(), 2.0 * E);
    }

    #[test]
    fn test_evaluate_error_kinds() {
        assert_eq!(eval("1/0").unwrap_err().kind(), ErrorKind::Arithmetic);
        assert_eq!(eval("0^-1").unwrap_err().kind(), ErrorKind::Arithmetic);
        assert_eq!(eval("10^400").unwrap_err().kind(), ErrorKind::Arithmetic);
        assert_eq!(eval("√(-1)").unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(eval("log(0)").unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(eval("ln(-2)").unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(eval("(-8)^0.5").unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(eval("foo").unwrap_err().kind(), ErrorKind::Syntax);
        assert_eq!(eval("foo(1)").unwrap_err().kind(), ErrorKind::Syntax);
        assert_eq!(eval("sin(1,2)").unwrap_err().kind(), ErrorKind::Syntax);
        assert_eq!(eval("2+").unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_function_registry() {
        let mut registry = FunctionRegistry::new();

        assert!(registry.get_function("sqrt").is_some());
        assert!(registry.get_function("LOG").is_some());
        assert!(registry.get_function("unknown").is_none());
        assert_eq!(registry.get_constant("PI"), Some(PI));
        assert_eq!(registry.get_constant("π"), Some(PI));

        registry.register_function("double", |args| {
            if args.len() == 1 {
                Ok(args[0] * 2.0)
            } else {
                Err(EvalError::Syntax("DOUBLE requires exactly 1 argument".to_string()))
            }
        });

        let double_func = registry.get_function("double").unwrap();
        assert_eq!(double_func(&[5.0]).unwrap(), 10.0);
    }
}
