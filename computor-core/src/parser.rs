//! Binding-power driven parser that simultaneously parses and evaluates.
//!
//! There is no separate AST: each token's prefix/infix handler is called directly out of the
//! `expression` loop and returns a [`Value`]. Handlers are plain functions rather than methods on
//! a trait object, selected through a lookup table keyed by `TokenKind`, which keeps the loop
//! itself about ten lines, same as the original.

use crate::error::ComputorError;
use crate::number::Complex;
use crate::polynomial::Variable;
use crate::scanner::{self, Token, TokenKind};
use crate::value::Value;
use std::collections::HashMap;

type PrefixFn = fn(&mut Interpreter) -> Result<Value, ComputorError>;
type InfixFn = fn(&mut Interpreter, Value) -> Result<Value, ComputorError>;

/// Materialised token stream, parse cursor, and the variables bound while parsing one line.
///
/// `variables` does not survive past a single [`parse`] call.
struct Interpreter {
    tokens: Vec<Token>,
    cursor: usize,
    previous: Token,
    variables: HashMap<String, Value>,
}

impl Interpreter {
    fn new(tokens: Vec<Token>) -> Self {
        Interpreter {
            tokens,
            cursor: 0,
            previous: Token::new(TokenKind::End),
            variables: HashMap::new(),
        }
    }

    fn current(&self) -> &Token {
        self.tokens
            .get(self.cursor)
            .unwrap_or_else(|| self.tokens.last().expect("token stream always ends in End"))
    }

    fn advance(&mut self) -> Token {
        let token = self
            .tokens
            .get(self.cursor)
            .cloned()
            .unwrap_or_else(|| Token::new(TokenKind::End));
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        self.previous = token.clone();
        token
    }

    /// `t = current; advance; left = t.prefix(); while current.bp > min_bp { ... left = t.infix(left) }`.
    fn expression(&mut self, min_bp: u8) -> Result<Value, ComputorError> {
        let token = self.advance();
        if token.kind == TokenKind::End {
            return Err(ComputorError::UnexpectedEnd);
        }
        let prefix = prefix_fn(&token.kind)
            .ok_or_else(|| ComputorError::Syntax(format!("unexpected token '{}'", token.kind)))?;
        let mut left = prefix(self)?;

        while self.current().bp() > min_bp {
            let token = self.advance();
            let infix = infix_fn(&token.kind).ok_or_else(|| {
                ComputorError::Syntax(format!("unexpected token '{}'", token.kind))
            })?;
            left = infix(self, left)?;
        }
        Ok(left)
    }

    fn expect_rparen(&mut self) -> Result<(), ComputorError> {
        let token = self.advance();
        if token.kind == TokenKind::RParen {
            Ok(())
        } else {
            Err(ComputorError::Syntax(format!(
                "expected ')', found '{}'",
                token.kind
            )))
        }
    }
}

fn prefix_fn(kind: &TokenKind) -> Option<PrefixFn> {
    Some(match kind {
        TokenKind::Number(_) => number_prefix,
        TokenKind::Name(_) => name_prefix,
        TokenKind::Plus => plus_prefix,
        TokenKind::Minus => minus_prefix,
        TokenKind::LParen => lparen_prefix,
        TokenKind::FunctionName(_) | TokenKind::Constant | TokenKind::Needle => {
            not_implemented_prefix
        }
        TokenKind::Undefined(_) => undefined_prefix,
        _ => return None,
    })
}

fn infix_fn(kind: &TokenKind) -> Option<InfixFn> {
    Some(match kind {
        TokenKind::Plus => plus_infix,
        TokenKind::Minus => minus_infix,
        TokenKind::Times => times_infix,
        TokenKind::Divide => divide_infix,
        TokenKind::Modulo => modulo_infix,
        TokenKind::Power => power_infix,
        TokenKind::Equals => equals_infix,
        TokenKind::Name(_) => name_infix,
        TokenKind::TimesMatrix | TokenKind::FunctionName(_) | TokenKind::Constant | TokenKind::Needle => {
            not_implemented_infix
        }
        _ => return None,
    })
}

fn number_prefix(interp: &mut Interpreter) -> Result<Value, ComputorError> {
    match &interp.previous.kind {
        TokenKind::Number(lexeme) => Ok(Value::Number(Complex::parse(lexeme)?)),
        _ => unreachable!(),
    }
}

/// Bound names return their stored value; unbound names are implicitly declared (degree-1
/// variables) only on a line that also contains an `=` somewhere; otherwise this is a use of an
/// undefined variable.
fn name_prefix(interp: &mut Interpreter) -> Result<Value, ComputorError> {
    let name = match &interp.previous.kind {
        TokenKind::Name(name) => name.clone(),
        _ => unreachable!(),
    };
    let key = name.to_lowercase();
    if let Some(value) = interp.variables.get(&key) {
        return Ok(value.clone());
    }
    if scanner::contains_equals(&interp.tokens) {
        let variable = Value::Variable(Variable::new(name.clone(), 1.0));
        interp.variables.insert(key, variable.clone());
        return Ok(variable);
    }
    Err(ComputorError::Resolve(format!(
        "Variable {} is not defined",
        name
    )))
}

/// A NAME never actually reaches infix position in this grammar (nothing gives it a binding
/// power), but is wired defensively to the same behaviour as its prefix.
fn name_infix(interp: &mut Interpreter, _left: Value) -> Result<Value, ComputorError> {
    name_prefix(interp)
}

fn plus_prefix(interp: &mut Interpreter) -> Result<Value, ComputorError> {
    interp.expression(100)
}

fn plus_infix(interp: &mut Interpreter, left: Value) -> Result<Value, ComputorError> {
    left.add(interp.expression(10)?)
}

fn minus_prefix(interp: &mut Interpreter) -> Result<Value, ComputorError> {
    Ok(interp.expression(100)?.neg())
}

fn minus_infix(interp: &mut Interpreter, left: Value) -> Result<Value, ComputorError> {
    left.sub(interp.expression(10)?)
}

fn times_infix(interp: &mut Interpreter, left: Value) -> Result<Value, ComputorError> {
    left.mul(interp.expression(20)?)
}

fn divide_infix(interp: &mut Interpreter, left: Value) -> Result<Value, ComputorError> {
    left.div(interp.expression(20)?)
}

fn modulo_infix(interp: &mut Interpreter, left: Value) -> Result<Value, ComputorError> {
    left.rem(interp.expression(20)?)
}

/// Consumes its right-hand side at `bp - 5` (25, not 30) so that `a^b^c` groups right-associatively
/// as `a^(b^c)`.
fn power_infix(interp: &mut Interpreter, left: Value) -> Result<Value, ComputorError> {
    left.pow(interp.expression(25)?)
}

fn lparen_prefix(interp: &mut Interpreter) -> Result<Value, ComputorError> {
    let value = interp.expression(0)?;
    interp.expect_rparen()?;
    Ok(value)
}

/// `left = right` canonicalises to `Polynomial(left) - Polynomial(right)`, the one place a bare
/// value gets promoted to a `Polynomial` even when both sides are plain numbers.
fn equals_infix(interp: &mut Interpreter, left: Value) -> Result<Value, ComputorError> {
    let right = interp.expression(0)?;
    Ok(left.equation(right))
}

fn not_implemented_prefix(interp: &mut Interpreter) -> Result<Value, ComputorError> {
    Err(ComputorError::Syntax(format!(
        "not implemented: {}",
        interp.previous.kind
    )))
}

fn not_implemented_infix(interp: &mut Interpreter, _left: Value) -> Result<Value, ComputorError> {
    Err(ComputorError::Syntax(format!(
        "not implemented: {}",
        interp.previous.kind
    )))
}

fn undefined_prefix(interp: &mut Interpreter) -> Result<Value, ComputorError> {
    match interp.previous.kind {
        TokenKind::Undefined(c) => Err(ComputorError::Syntax(format!("unknown token {}", c))),
        _ => unreachable!(),
    }
}

/// Scans, parses, and evaluates one line.
///
/// A fresh [`Interpreter`] (and so a fresh, empty variable map) is built for every call — this
/// implementation does not let variable bindings survive across lines.
pub fn parse(text: &str) -> Result<Value, ComputorError> {
    let tokens = scanner::scan(text);
    let mut interp = Interpreter::new(tokens);
    let result = interp.expression(0)?;
    if interp.current().kind != TokenKind::End {
        return Err(ComputorError::Syntax(format!(
            "unexpected token '{}'",
            interp.current().kind
        )));
    }
    Ok(result)
}
