//! Parsed, validated infix formulas.
//!
//! A [`Formula`] is built once from text and is immutable afterwards. The
//! constructor checks the token grammar and stores a canonical string
//! (uppercase variables, reprinted numbers, no whitespace) that defines
//! equality, hashing and display.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use super::token::{Token, tokenize};

/// Reasons formula text is rejected at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaFormatError {
    #[error("formula is empty")]
    Empty,

    #[error("invalid token '{0}'")]
    InvalidToken(String),

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("formula cannot start with '{0}'")]
    InvalidStart(String),

    #[error("formula cannot end with '{0}'")]
    InvalidEnd(String),

    #[error("'{token}' cannot follow '{previous}'")]
    InvalidSequence { previous: String, token: String },
}

/// A syntactically valid formula over numbers, variables, parentheses and `+ - * /`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Formula {
    tokens: Vec<Token>,
    canonical: String,
}

impl Formula {
    /// Parse and validate formula text (without a leading `=`).
    pub fn new(text: &str) -> Result<Formula, FormulaFormatError> {
        let tokens = tokenize(text)?;
        validate(&tokens)?;
        let canonical = tokens.iter().map(ToString::to_string).collect();
        Ok(Formula { tokens, canonical })
    }

    /// Distinct variable names referenced by the formula, uppercased.
    pub fn get_variables(&self) -> HashSet<String> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Variable(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// The canonical form, e.g. `X1+0.067*(Y2-3)`.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    pub(crate) fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

fn validate(tokens: &[Token]) -> Result<(), FormulaFormatError> {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Err(FormulaFormatError::Empty);
    };

    let mut depth = 0usize;
    for token in tokens {
        match token {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(FormulaFormatError::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(FormulaFormatError::UnbalancedParentheses);
    }

    if !(first.is_operand() || *first == Token::LeftParen) {
        return Err(FormulaFormatError::InvalidStart(first.to_string()));
    }
    if !(last.is_operand() || *last == Token::RightParen) {
        return Err(FormulaFormatError::InvalidEnd(last.to_string()));
    }

    for pair in tokens.windows(2) {
        let (previous, token) = (&pair[0], &pair[1]);
        let allowed = match previous {
            // After an opener, an operand or another opener must follow.
            Token::LeftParen | Token::Operator(_) => {
                token.is_operand() || *token == Token::LeftParen
            }
            // After something complete, only an operator or a closer.
            Token::Number(_) | Token::Variable(_) | Token::RightParen => {
                matches!(token, Token::Operator(_) | Token::RightParen)
            }
        };
        if !allowed {
            return Err(FormulaFormatError::InvalidSequence {
                previous: previous.to_string(),
                token: token.to_string(),
            });
        }
    }

    Ok(())
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl std::str::FromStr for Formula {
    type Err = FormulaFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::new(s)
    }
}

impl TryFrom<String> for Formula {
    type Error = FormulaFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Formula::new(&value)
    }
}

impl From<Formula> for String {
    fn from(formula: Formula) -> String {
        formula.canonical
    }
}
