use std::fmt;

use crate::lexer::{Token, TokenKind};

/// Column of a token in the input line, counted in characters from zero.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Position(pub usize);

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "column {}", self.0 + 1)
    }
}

/// Everything that can stop an evaluation. None of these are recoverable for
/// the line being evaluated.
#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum CalcError {
    #[error("empty input detected, please enter an expression")]
    EmptyInput,

    #[error("unexpected token {found} at {position}, expected {expected}")]
    UnexpectedToken {
        expected: TokenKind,
        found: Token,
        position: Position,
    },

    #[error("division by zero at {position}")]
    DivisionByZero { position: Position },

    #[error("number literal at {position} does not fit in a 64-bit integer")]
    LiteralTooLarge { position: Position },

    #[error("arithmetic overflow at {position}")]
    Overflow { position: Position },
}

impl CalcError {
    /// True for errors caused by input that does not match the grammar.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, CalcError::UnexpectedToken { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Operator;

    #[test]
    fn test_messages() {
        let err = CalcError::UnexpectedToken {
            expected: TokenKind::Number,
            found: Token::Operator(Operator::Mul),
            position: Position(4),
        };
        assert_eq!(err.to_string(), "unexpected token '*' at column 5, expected a number");
        assert!(err.is_syntax_error());

        let err = CalcError::DivisionByZero { position: Position(2) };
        assert_eq!(err.to_string(), "division by zero at column 3");
        assert!(!err.is_syntax_error());
    }
}
