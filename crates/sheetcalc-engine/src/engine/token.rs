//! Formula tokenizer.
//!
//! Splits formula text into parentheses, the four arithmetic operators,
//! variables (`[A-Za-z]+[0-9]+`) and non-negative numeric literals.
//! Whitespace only separates tokens: "x 23" is a bad token followed by a
//! number, while "x23" is a single variable.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::format::canonical_number;
use super::formula::FormulaFormatError;

/// Binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// True for `*` and `/`.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Mul | Operator::Div)
    }

    fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }
}

/// A single formula token. Variables are already uppercased.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    LeftParen,
    RightParen,
    Operator(Operator),
    Number(f64),
    Variable(String),
}

impl Token {
    /// Numbers and variables.
    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Variable(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::Number(n) => f.write_str(&canonical_number(*n)),
            Token::Variable(name) => f.write_str(name),
        }
    }
}

fn token_re() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?<lparen>\()",
            r"|(?<rparen>\))",
            r"|(?<op>[+\-*/])",
            r"|(?<var>[A-Za-z]+[0-9]+)",
            r"|(?<num>(?:[0-9]+\.[0-9]*|[0-9]*\.[0-9]+|[0-9]+)(?:[eE][+\-]?[0-9]+)?)",
            r"|(?<ws>\s+)",
        ))
        .expect("formula token regex must compile")
    })
}

/// Split `formula` into tokens.
///
/// Any text the grammar does not recognize (including a literal too large
/// to be a finite double) is reported as [`FormulaFormatError::InvalidToken`].
pub fn tokenize(formula: &str) -> Result<Vec<Token>, FormulaFormatError> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for caps in token_re().captures_iter(formula) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last_end {
            return Err(FormulaFormatError::InvalidToken(
                formula[last_end..whole.start()].to_string(),
            ));
        }
        last_end = whole.end();

        if caps.name("ws").is_some() {
            continue;
        }
        let text = whole.as_str();
        let token = if caps.name("lparen").is_some() {
            Token::LeftParen
        } else if caps.name("rparen").is_some() {
            Token::RightParen
        } else if let Some(op) = Operator::from_symbol(text) {
            Token::Operator(op)
        } else if caps.name("var").is_some() {
            Token::Variable(text.to_ascii_uppercase())
        } else {
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => Token::Number(n),
                _ => return Err(FormulaFormatError::InvalidToken(text.to_string())),
            }
        };
        tokens.push(token);
    }

    if last_end < formula.len() {
        return Err(FormulaFormatError::InvalidToken(
            formula[last_end..].to_string(),
        ));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_simple_expression() {
        let tokens = tokenize("(a1 + 2.5) * x23").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LeftParen,
                Token::Variable("A1".to_string()),
                Token::Operator(Operator::Add),
                Token::Number(2.5),
                Token::RightParen,
                Token::Operator(Operator::Mul),
                Token::Variable("X23".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_number_forms() {
        let tokens = tokenize("5. .5 6.7E-2 1e+3 42").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(5.0),
                Token::Number(0.5),
                Token::Number(0.067),
                Token::Number(1000.0),
                Token::Number(42.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_whitespace_only_is_empty() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  \t\n").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_rejects_unknown_text() {
        assert_eq!(
            tokenize("x + 1"),
            Err(FormulaFormatError::InvalidToken("x".to_string()))
        );
        assert_eq!(
            tokenize("2 $ 3"),
            Err(FormulaFormatError::InvalidToken("$".to_string()))
        );
        assert_eq!(
            tokenize("1 + a1_"),
            Err(FormulaFormatError::InvalidToken("_".to_string()))
        );
    }

    #[test]
    fn test_tokenize_rejects_overflowing_literal() {
        assert!(matches!(
            tokenize("1e999"),
            Err(FormulaFormatError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_adjacent_variables_split_on_digit_boundary() {
        let tokens = tokenize("a1b2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Variable("A1".to_string()),
                Token::Variable("B2".to_string()),
            ]
        );
    }

    #[test]
    fn test_token_display_is_canonical() {
        let text: String = tokenize("( x1 + 5.000 )")
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(text, "(X1+5)");
    }
}
