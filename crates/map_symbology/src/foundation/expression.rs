//! Deferred numeric expressions
//!
//! Style properties such as render order may be data-driven: instead of a
//! literal number, a stylesheet can supply an expression like
//! `"[priority] * 2"` that is evaluated later against per-feature
//! attributes. [`NumericExpression`] holds either form; the attribute
//! source is abstracted behind [`VariableResolver`].

use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigBlock};

/// Source of variable values during expression evaluation.
///
/// Typically backed by a feature's attribute table; the evaluation context
/// itself lives outside this crate.
pub trait VariableResolver {
    /// Look up a variable by name, returning `None` when unknown
    fn resolve(&self, name: &str) -> Option<f64>;
}

impl VariableResolver for HashMap<String, f64> {
    fn resolve(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

/// Resolver with no variables; every lookup misses
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariables;

impl VariableResolver for NoVariables {
    fn resolve(&self, _name: &str) -> Option<f64> {
        None
    }
}

/// A numeric value that is either a literal or a deferred expression.
///
/// Construction never fails: text that parses as a plain number becomes
/// [`NumericExpression::Literal`], anything else is held unevaluated as
/// [`NumericExpression::Deferred`] until [`eval`](Self::eval) is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NumericExpression {
    /// A plain number, no evaluation required
    Literal(f64),
    /// An unevaluated infix expression, e.g. `"[pop] / 1000 + 5"`
    Deferred(String),
}

impl NumericExpression {
    /// Build an expression from raw stylesheet text
    pub fn new(expr: &str) -> Self {
        let trimmed = expr.trim();
        match trimmed.parse::<f64>() {
            Ok(v) => Self::Literal(v),
            Err(_) => Self::Deferred(trimmed.to_string()),
        }
    }

    /// The literal value, if this expression is one
    pub fn literal(&self) -> Option<f64> {
        match self {
            Self::Literal(v) => Some(*v),
            Self::Deferred(_) => None,
        }
    }

    /// Evaluate against the given variable source.
    ///
    /// Supports `+ - * /`, parentheses, unary minus, and `[name]`
    /// variable references. Malformed expressions and unresolvable
    /// variables degrade to `0.0` rather than failing; stylesheet
    /// evaluation must never abort rendering.
    pub fn eval(&self, vars: &dyn VariableResolver) -> f64 {
        match self {
            Self::Literal(v) => *v,
            Self::Deferred(expr) => match eval_infix(expr, vars) {
                Some(v) => v,
                None => {
                    debug!("malformed numeric expression {expr:?}, evaluating to 0");
                    0.0
                }
            },
        }
    }
}

impl Default for NumericExpression {
    fn default() -> Self {
        Self::Literal(0.0)
    }
}

impl From<f64> for NumericExpression {
    fn from(v: f64) -> Self {
        Self::Literal(v)
    }
}

impl fmt::Display for NumericExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "{v}"),
            Self::Deferred(s) => f.write_str(s),
        }
    }
}

impl ConfigBlock for NumericExpression {
    fn get_config(&self) -> Config {
        Config::new("expression").with_value(self.to_string())
    }

    fn merge_config(&mut self, conf: &Config) {
        if let Some(text) = conf.value_opt() {
            *self = Self::new(text);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Var(String),
    Op(char),
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();
    while let Some(&(i, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut end = i;
                while let Some(&(j, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        end = j + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Num(expr[i..end].parse().ok()?));
            }
            '[' => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, ']')) => break,
                        Some((_, c)) => name.push(c),
                        None => return None,
                    }
                }
                tokens.push(Token::Var(name));
            }
            '+' | '-' | '*' | '/' => {
                chars.next();
                // unary minus in prefix position
                let prefix = matches!(
                    tokens.last(),
                    None | Some(Token::Op(_)) | Some(Token::LParen)
                );
                if ch == '-' && prefix {
                    tokens.push(Token::Op('n'));
                } else if ch == '+' && prefix {
                    // unary plus, drop it
                } else {
                    tokens.push(Token::Op(ch));
                }
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            _ => return None,
        }
    }
    Some(tokens)
}

fn precedence(op: char) -> u8 {
    match op {
        'n' => 3,
        '*' | '/' => 2,
        _ => 1,
    }
}

/// Shunting-yard evaluation of a tokenized infix expression
fn eval_infix(expr: &str, vars: &dyn VariableResolver) -> Option<f64> {
    let tokens = tokenize(expr)?;
    let mut output: Vec<f64> = Vec::new();
    let mut ops: Vec<Token> = Vec::new();

    fn apply(output: &mut Vec<f64>, op: char) -> Option<()> {
        if op == 'n' {
            let v = output.pop()?;
            output.push(-v);
            return Some(());
        }
        let rhs = output.pop()?;
        let lhs = output.pop()?;
        output.push(match op {
            '+' => lhs + rhs,
            '-' => lhs - rhs,
            '*' => lhs * rhs,
            _ => lhs / rhs,
        });
        Some(())
    }

    for token in tokens {
        match token {
            Token::Num(v) => output.push(v),
            Token::Var(name) => {
                let value = vars.resolve(&name).unwrap_or_else(|| {
                    debug!("unresolved expression variable [{name}], using 0");
                    0.0
                });
                output.push(value);
            }
            Token::Op(op) => {
                while let Some(Token::Op(top)) = ops.last() {
                    // 'n' is right-associative, binary operators are left-associative
                    let pop = if op == 'n' {
                        precedence(*top) > precedence(op)
                    } else {
                        precedence(*top) >= precedence(op)
                    };
                    if !pop {
                        break;
                    }
                    let top = *top;
                    ops.pop();
                    apply(&mut output, top)?;
                }
                ops.push(Token::Op(op));
            }
            Token::LParen => ops.push(Token::LParen),
            Token::RParen => loop {
                match ops.pop() {
                    Some(Token::Op(op)) => apply(&mut output, op)?,
                    Some(Token::LParen) => break,
                    _ => return None,
                }
            },
        }
    }
    while let Some(token) = ops.pop() {
        match token {
            Token::Op(op) => apply(&mut output, op)?,
            _ => return None,
        }
    }
    match output.as_slice() {
        [v] => Some(*v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NO_VARS: NoVariables = NoVariables;

    #[test]
    fn test_literal_classification() {
        assert_eq!(NumericExpression::new("42").literal(), Some(42.0));
        assert_eq!(NumericExpression::new(" -1.5 ").literal(), Some(-1.5));
        assert_eq!(NumericExpression::new("[order] + 1").literal(), None);
    }

    #[test]
    fn test_eval_arithmetic() {
        let e = NumericExpression::new("(1 + 2) * 4 - 6 / 2");
        assert_relative_eq!(e.eval(&NO_VARS), 9.0);
    }

    #[test]
    fn test_eval_unary_minus() {
        let e = NumericExpression::new("2 * -(3 + 1)");
        assert_relative_eq!(e.eval(&NO_VARS), -8.0);
    }

    #[test]
    fn test_eval_with_variables() {
        let mut vars = HashMap::new();
        vars.insert("priority".to_string(), 7.0);
        let e = NumericExpression::new("[priority] * 2");
        assert_relative_eq!(e.eval(&vars), 14.0);
    }

    #[test]
    fn test_unresolved_variable_is_zero() {
        let e = NumericExpression::new("[missing] + 5");
        assert_relative_eq!(e.eval(&NO_VARS), 5.0);
    }

    #[test]
    fn test_malformed_expression_is_zero() {
        let e = NumericExpression::new("2 +");
        assert_relative_eq!(e.eval(&NO_VARS), 0.0);
        let e = NumericExpression::new("(1 + 2");
        assert_relative_eq!(e.eval(&NO_VARS), 0.0);
    }

    #[test]
    fn test_display_round_trips_source_text() {
        let e = NumericExpression::new("[pop] / 1000");
        assert_eq!(e.to_string(), "[pop] / 1000");
        assert_eq!(NumericExpression::new("0").to_string(), "0");
    }
}
