use std::fmt::Display;

use anyhow::Result;
use colored::*;
use itertools::Itertools;

use super::error::*;
use super::options::{Capacity, Limits};
use super::source::is_space;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Number(i64),
    Variable(String),
    Plus,
    Minus,
    Mult,
    Div,
    LeftParen,
    RightParen,

    /// Terminates every token sequence
    End,
}

impl Token {
    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Variable(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Plus | Token::Minus | Token::Mult | Token::Div)
    }

    /// Binding strength of a binary operator. Parentheses bind 0.
    pub fn precedence(&self) -> u8 {
        match self {
            Token::Plus | Token::Minus => 1,
            Token::Mult | Token::Div => 2,
            _ => 0,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Variable(name) => write!(f, "{}", name),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Mult => write!(f, "*"),
            Token::Div => write!(f, "/"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::End => write!(f, "<end>"),
        }
    }
}

trait CharExt {
    fn is_identifier_head(&self) -> bool;
    fn is_identifier(&self) -> bool;
}

impl CharExt for char {
    fn is_identifier_head(&self) -> bool {
        self.is_ascii_alphabetic() || *self == '_'
    }

    fn is_identifier(&self) -> bool {
        self.is_identifier_head() || self.is_ascii_digit()
    }
}

fn take_while(program: &[char], index: &mut usize, pred: fn(char) -> bool) -> String {
    let mut buf = String::new();
    while let Some(ch) = program.get(*index) {
        if !pred(*ch) {
            break;
        }
        buf.push(*ch);

        *index += 1;
    }
    buf
}

fn starts_number(program: &[char], index: usize) -> bool {
    match program.get(index) {
        Some(c) if c.is_ascii_digit() => true,
        // `-` directly before a digit is a sign even after an operand: `a-5` is `a`, `-5`.
        Some('-') => program
            .get(index + 1)
            .map_or(false, |c| c.is_ascii_digit()),
        _ => false,
    }
}

fn tokenize_number(program: &[char], index: &mut usize) -> Result<Token> {
    let mut text = String::new();
    if let Some('-') = program.get(*index) {
        text.push('-');
        *index += 1;
    }
    text += &take_while(program, index, |c| c.is_ascii_digit());

    let value = text
        .parse::<i64>()
        .map_err(|_| Error::InvalidInteger(text.clone()))?;
    Ok(Token::Number(value))
}

fn tokenize_identifier(program: &[char], index: &mut usize, limits: &Limits) -> Result<Token> {
    let name = take_while(program, index, |c| c.is_identifier());
    if name.chars().count() > limits.max_identifier_len {
        return Err(Error::IdentifierTooLong(name, limits.max_identifier_len).into());
    }
    Ok(Token::Variable(name))
}

/// Get tokens from an expression, terminated by [`Token::End`].
///
/// Unknown characters do not stop the scan. They are skipped and pushed to
/// `skipped` as they are found, so they survive a later fatal error.
pub fn tokenize(
    expr: &str,
    limits: &Limits,
    skipped: &mut Vec<Error>,
) -> Result<Vec<Token>> {
    let program: Vec<char> = expr.chars().collect();

    let mut tokens = Vec::new();

    let mut i = 0;
    while let Some(ch) = program.get(i) {
        let token = match ch {
            c if is_space(*c) => {
                i += 1;
                continue;
            }
            _ if starts_number(&program, i) => tokenize_number(&program, &mut i)?,
            c if c.is_identifier_head() => tokenize_identifier(&program, &mut i, limits)?,
            c => {
                i += 1;
                match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Mult,
                    '/' => Token::Div,
                    '(' => Token::LeftParen,
                    ')' => Token::RightParen,
                    c => {
                        skipped.push(Error::UnknownCharacter(*c));
                        continue;
                    }
                }
            }
        };

        if tokens.len() >= limits.max_tokens {
            return Err(Error::CapacityExceeded {
                what: Capacity::Tokens,
                limit: limits.max_tokens,
            }
            .into());
        }
        tokens.push(token);
    }

    tokens.push(Token::End);
    Ok(tokens)
}

pub fn show_tokens(tokens: &[Token]) {
    println!(
        "{} {}",
        "Tokens:".cyan(),
        tokens.iter().map(|t| format!("{:?}", t)).join(" ").dimmed()
    );
}
