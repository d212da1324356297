use log::debug;

use crate::error::{CalcError, Position};
use crate::lexer::{Lexer, Operator, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Reject tokens left over after a complete expression. When unset they
    /// are never read, so `3 + 4 5` evaluates to 7.
    pub strict_end_of_input: bool,
}

/// Recursive descent over
///
/// ```text
/// expr   = term (('+' | '-') term)*
/// term   = factor (('*' | '/') factor)*
/// factor = NUMBER
/// ```
///
/// folding each rule into an integer as soon as it is recognised. There is a
/// single token of lookahead and nothing is ever re-read.
pub struct Evaluator<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    position: Position,
}

impl<'a> Evaluator<'a> {
    /// Takes over `lexer` and reads its first token.
    pub fn new(mut lexer: Lexer<'a>) -> Evaluator<'a> {
        let current_token = lexer.next_token();
        let position = lexer.token_start();
        Evaluator {
            lexer,
            current_token,
            position,
        }
    }

    pub fn current_token(&self) -> Token {
        self.current_token
    }

    /// Evaluates a whole line, honouring `options`.
    pub fn compute(&mut self, options: &Options) -> Result<i64, CalcError> {
        let result = self.expr()?;
        if options.strict_end_of_input {
            self.advance_expect(TokenKind::End)?;
        }
        debug!("result {}", result);
        Ok(result)
    }

    /// Consumes the current token if it is of `kind` and returns it, otherwise
    /// fails without moving.
    pub fn advance_expect(&mut self, kind: TokenKind) -> Result<Token, CalcError> {
        if self.current_token.kind() != kind {
            return Err(CalcError::UnexpectedToken {
                expected: kind,
                found: self.current_token,
                position: self.position,
            });
        }
        let consumed = self.current_token;
        self.current_token = self.lexer.next_token();
        self.position = self.lexer.token_start();
        Ok(consumed)
    }

    pub fn factor(&mut self) -> Result<i64, CalcError> {
        let position = self.position;
        match self.advance_expect(TokenKind::Number)? {
            Token::NumberTooLarge => Err(CalcError::LiteralTooLarge { position }),
            token => Ok(token.value()),
        }
    }

    pub fn term(&mut self) -> Result<i64, CalcError> {
        let mut result = self.factor()?;
        loop {
            let op = match self.current_token {
                Token::Operator(op @ Operator::Mul) | Token::Operator(op @ Operator::Div) => op,
                _ => break,
            };
            result = self.fold(result, op, Self::factor)?;
        }
        Ok(result)
    }

    pub fn expr(&mut self) -> Result<i64, CalcError> {
        let mut result = self.term()?;
        loop {
            let op = match self.current_token {
                Token::Operator(op @ Operator::Add) | Token::Operator(op @ Operator::Sub) => op,
                _ => break,
            };
            result = self.fold(result, op, Self::term)?;
        }
        Ok(result)
    }

    /// Consumes `op`, evaluates its right operand with `operand` and combines
    /// it with `lhs`.
    fn fold<F>(&mut self, lhs: i64, op: Operator, operand: F) -> Result<i64, CalcError>
    where
        F: FnOnce(&mut Self) -> Result<i64, CalcError>,
    {
        let position = self.position;
        self.advance_expect(Token::Operator(op).kind())?;
        let rhs = operand(self)?;
        let result = apply(op, lhs, rhs, position)?;
        debug!("{} {} {} = {}", lhs, op.symbol(), rhs, result);
        Ok(result)
    }
}

/// Checked so that overflow is reported rather than wrapped. Division
/// truncates toward zero.
fn apply(op: Operator, lhs: i64, rhs: i64, position: Position) -> Result<i64, CalcError> {
    let result = match op {
        Operator::Add => lhs.checked_add(rhs),
        Operator::Sub => lhs.checked_sub(rhs),
        Operator::Mul => lhs.checked_mul(rhs),
        Operator::Div => {
            if rhs == 0 {
                return Err(CalcError::DivisionByZero { position });
            }
            lhs.checked_div(rhs)
        }
    };
    result.ok_or(CalcError::Overflow { position })
}
