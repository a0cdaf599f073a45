//! Formula evaluation.
//!
//! Evaluates a validated [`Formula`] with a value stack and an operator
//! stack. `*` and `/` are applied as soon as their right operand arrives;
//! `+` and `-` wait until the next additive operator, a closing parenthesis
//! or the end of the formula. That is enough to give multiplication and
//! division higher precedence without a precedence table, and keeps every
//! operator left-associative.
//!
//! Failures (unknown variables, division by zero) are returned as
//! [`FormulaError`] values rather than panics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::formula::Formula;
use super::token::{Operator, Token};

/// A formula that could not be evaluated, with a human-readable reason.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{reason}")]
pub struct FormulaError {
    pub reason: String,
}

impl FormulaError {
    pub fn new(reason: impl Into<String>) -> FormulaError {
        FormulaError {
            reason: reason.into(),
        }
    }
}

enum Pending {
    Paren,
    Op(Operator),
}

impl Formula {
    /// Evaluate the formula, resolving variables through `lookup`.
    ///
    /// `lookup` returns `None` for names with no numeric value; that becomes a
    /// [`FormulaError`], as does any division by zero.
    pub fn evaluate<F>(&self, mut lookup: F) -> Result<f64, FormulaError>
    where
        F: FnMut(&str) -> Option<f64>,
    {
        let mut values: Vec<f64> = Vec::new();
        let mut pending: Vec<Pending> = Vec::new();

        for token in self.tokens() {
            match token {
                Token::Number(n) => push_operand(*n, &mut values, &mut pending)?,
                Token::Variable(name) => {
                    let value = lookup(name).ok_or_else(|| {
                        FormulaError::new(format!("undefined variable {name}"))
                    })?;
                    push_operand(value, &mut values, &mut pending)?;
                }
                Token::Operator(op) if op.is_multiplicative() => {
                    pending.push(Pending::Op(*op));
                }
                Token::Operator(op) => {
                    apply_pending_additive(&mut values, &mut pending)?;
                    pending.push(Pending::Op(*op));
                }
                Token::LeftParen => pending.push(Pending::Paren),
                Token::RightParen => {
                    apply_pending_additive(&mut values, &mut pending)?;
                    match pending.pop() {
                        Some(Pending::Paren) => {}
                        _ => return Err(malformed()),
                    }
                    // A parenthesized group is the right operand of any
                    // multiplication waiting in front of it.
                    let group = pop_value(&mut values)?;
                    push_operand(group, &mut values, &mut pending)?;
                }
            }
        }

        apply_pending_additive(&mut values, &mut pending)?;

        match (values.pop(), values.is_empty(), pending.is_empty()) {
            (Some(result), true, true) => Ok(result),
            _ => Err(malformed()),
        }
    }
}

/// Push an operand, first folding it into a pending `*` or `/`.
fn push_operand(
    value: f64,
    values: &mut Vec<f64>,
    pending: &mut Vec<Pending>,
) -> Result<(), FormulaError> {
    let op = match pending.last() {
        Some(Pending::Op(op)) if op.is_multiplicative() => *op,
        _ => {
            values.push(value);
            return Ok(());
        }
    };
    pending.pop();
    let left = pop_value(values)?;
    values.push(apply(op, left, value)?);
    Ok(())
}

/// If the top pending operator is `+` or `-`, apply it to the top two values.
fn apply_pending_additive(
    values: &mut Vec<f64>,
    pending: &mut Vec<Pending>,
) -> Result<(), FormulaError> {
    let op = match pending.last() {
        Some(Pending::Op(op)) if !op.is_multiplicative() => *op,
        _ => return Ok(()),
    };
    pending.pop();
    let right = pop_value(values)?;
    let left = pop_value(values)?;
    values.push(apply(op, left, right)?);
    Ok(())
}

fn apply(op: Operator, left: f64, right: f64) -> Result<f64, FormulaError> {
    match op {
        Operator::Add => Ok(left + right),
        Operator::Sub => Ok(left - right),
        Operator::Mul => Ok(left * right),
        Operator::Div if right == 0.0 => Err(FormulaError::new("division by zero")),
        Operator::Div => Ok(left / right),
    }
}

fn pop_value(values: &mut Vec<f64>) -> Result<f64, FormulaError> {
    values.pop().ok_or_else(malformed)
}

// Unreachable for formulas that passed validation.
fn malformed() -> FormulaError {
    FormulaError::new("malformed expression")
}
