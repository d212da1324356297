use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use log::trace;

use crate::error::{CalcError, Position};

#[derive(Debug, PartialEq, Clone, Eq, Hash, Copy)]
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
}

#[derive(Debug, PartialEq, Clone, Eq, Copy)]
pub enum Token {
    Number(i64),
    Operator(Operator),
    /// A character that is not whitespace, a digit or an operator.
    Invalid(char),
    /// A digit run that does not fit in an `i64`. Only an error once the
    /// evaluator consumes it as an operand.
    NumberTooLarge,
    EOF,
}

/// The classification of a token without its payload, used when the
/// evaluator states what it expects next.
#[derive(Debug, PartialEq, Clone, Eq, Hash, Copy)]
pub enum TokenKind {
    Number,
    Plus,
    Minus,
    Mul,
    Div,
    End,
    Invalid,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(_) | Token::NumberTooLarge => TokenKind::Number,
            Token::Operator(Operator::Add) => TokenKind::Plus,
            Token::Operator(Operator::Sub) => TokenKind::Minus,
            Token::Operator(Operator::Mul) => TokenKind::Mul,
            Token::Operator(Operator::Div) => TokenKind::Div,
            Token::Invalid(_) => TokenKind::Invalid,
            Token::EOF => TokenKind::End,
        }
    }

    /// The literal value; only meaningful for numbers, zero for everything else.
    pub fn value(&self) -> i64 {
        match self {
            Token::Number(n) => *n,
            _ => 0,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, "'{}'", op.symbol()),
            Token::Invalid(c) => write!(f, "'{}'", c.escape_debug()),
            Token::NumberTooLarge => write!(f, "number too large"),
            Token::EOF => write!(f, "end of input"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Number => write!(f, "a number"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Mul => write!(f, "'*'"),
            TokenKind::Div => write!(f, "'/'"),
            TokenKind::End => write!(f, "end of input"),
            TokenKind::Invalid => write!(f, "an invalid character"),
        }
    }
}

/// Same set as C's `isspace` in the default locale.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    column: usize,
    start: usize,
    exhausted: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Lexer<'a> {
        Lexer {
            chars: src.chars().peekable(),
            column: 0,
            start: 0,
            exhausted: false,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c.is_some() {
            self.column += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if !is_space(c) {
                break;
            }
            self.advance();
        }
    }

    /// Consumes the rest of a digit run whose first digit is `first`.
    fn integer(&mut self, first: char) -> Token {
        let mut result = Some(digit(first));
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.advance();
            result = result
                .and_then(|n| n.checked_mul(10))
                .and_then(|n| n.checked_add(digit(c)));
        }
        result.map_or(Token::NumberTooLarge, Token::Number)
    }

    /// Produces the next token, moving the cursor past it. Once the input is
    /// exhausted every further call returns `Token::EOF`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.column;
        let token = match self.advance() {
            Some(c) => match c {
                '0'..='9' => self.integer(c),
                '+' => Token::Operator(Operator::Add),
                '-' => Token::Operator(Operator::Sub),
                '*' => Token::Operator(Operator::Mul),
                '/' => Token::Operator(Operator::Div),
                _ => Token::Invalid(c),
            },
            None => Token::EOF,
        };
        trace!("lexed {:?} at {}", token, self.token_start());
        token
    }

    /// Where the most recently produced token starts.
    pub fn token_start(&self) -> Position {
        Position(self.start)
    }
}

fn digit(c: char) -> i64 {
    i64::from(c as u8 - b'0')
}

/// Yields every token up to, but not including, the end of input. A number
/// that does not fit is reported as an error and ends the sequence.
impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, CalcError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.next_token() {
            Token::EOF => {
                self.exhausted = true;
                None
            }
            Token::NumberTooLarge => {
                self.exhausted = true;
                Some(Err(CalcError::LiteralTooLarge {
                    position: self.token_start(),
                }))
            }
            token => Some(Ok(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex() {
        const INPUT: &str = "12 + 3*45";
        let mut lexer = Lexer::new(INPUT);
        assert_eq!(Token::Number(12), lexer.next_token());
        assert_eq!(Token::Operator(Operator::Add), lexer.next_token());
        assert_eq!(Token::Number(3), lexer.next_token());
        assert_eq!(Token::Operator(Operator::Mul), lexer.next_token());
        assert_eq!(Token::Number(45), lexer.next_token());
        assert_eq!(Token::EOF, lexer.next_token());
    }

    #[test]
    fn test_end_is_repeatable() {
        let mut lexer = Lexer::new("7");
        assert_eq!(Token::Number(7), lexer.next_token());
        for _ in 0..3 {
            assert_eq!(Token::EOF, lexer.next_token());
        }
        assert_eq!(Token::EOF, Lexer::new("").next_token());
        assert_eq!(Token::EOF, Lexer::new(" \t\r\n").next_token());
    }

    #[test]
    fn test_whitespace_skipped() {
        let kinds: Vec<TokenKind> = Lexer::new("\t1 \x0B-\x0C2\r")
            .map(|t| t.unwrap().kind())
            .collect();
        assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Minus, TokenKind::Number]);
    }

    #[test]
    fn test_invalid_is_consumed() {
        let mut lexer = Lexer::new("a+é");
        assert_eq!(Token::Invalid('a'), lexer.next_token());
        assert_eq!(Token::Operator(Operator::Add), lexer.next_token());
        assert_eq!(Token::Invalid('é'), lexer.next_token());
        assert_eq!(Token::EOF, lexer.next_token());
    }

    #[test]
    fn test_positions() {
        let mut lexer = Lexer::new("  10 /x");
        lexer.next_token();
        assert_eq!(Position(2), lexer.token_start());
        lexer.next_token();
        assert_eq!(Position(5), lexer.token_start());
        lexer.next_token();
        assert_eq!(Position(6), lexer.token_start());
        lexer.next_token();
        assert_eq!(Position(7), lexer.token_start());
    }

    #[test]
    fn test_literal_too_large() {
        let mut lexer = Lexer::new("1 + 99999999999999999999 * 2");
        lexer.next_token();
        lexer.next_token();
        assert_eq!(Token::NumberTooLarge, lexer.next_token());
        assert_eq!(Position(4), lexer.token_start());
        assert_eq!(TokenKind::Number, Token::NumberTooLarge.kind());
        // the whole digit run is consumed
        assert_eq!(Token::Operator(Operator::Mul), lexer.next_token());

        let max = i64::MAX.to_string();
        assert_eq!(Token::Number(i64::MAX), Lexer::new(&max).next_token());
    }

    #[test]
    fn test_iterator_stops_at_oversized_number() {
        let mut lexer = Lexer::new("1 + 99999999999999999999 * 2");
        assert_eq!(Some(Ok(Token::Number(1))), lexer.next());
        assert_eq!(Some(Ok(Token::Operator(Operator::Add))), lexer.next());
        assert_eq!(
            Some(Err(CalcError::LiteralTooLarge { position: Position(4) })),
            lexer.next()
        );
        assert_eq!(None, lexer.next());
        assert_eq!(None, lexer.next());
    }

    #[test]
    fn test_token_kind_and_value() {
        assert_eq!(TokenKind::Div, Token::Operator(Operator::Div).kind());
        assert_eq!(TokenKind::End, Token::EOF.kind());
        assert_eq!(0, Token::Invalid('?').value());
        assert_eq!(42, Token::Number(42).value());
    }
}
