//! Infix to postfix (reverse Polish notation) conversion.
//!
//! Operators are left-associative, `*` and `/` bind tighter than `+` and `-`.
//! The output holds only operands and binary operators.

use anyhow::Result;
use colored::*;
use itertools::Itertools;

use super::{error::*, tokenizer::Token};

/// Convert infix tokens to postfix order.
///
/// Stops at [`Token::End`]. Unless `strict_parens` is set, a `)` without a
/// matching `(` empties the operator stack and an unclosed `(` is dropped.
pub fn to_postfix(tokens: &[Token], strict_parens: bool) -> Result<Vec<Token>> {
    let mut output = Vec::new();
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::End => break,
            t if t.is_operand() => output.push(t.clone()),
            Token::LeftParen => stack.push(Token::LeftParen),
            Token::RightParen => {
                let mut matched = false;
                while let Some(top) = stack.pop() {
                    if top == Token::LeftParen {
                        matched = true;
                        break;
                    }
                    output.push(top);
                }
                if !matched && strict_parens {
                    return Err(Error::UnbalancedParenthesis.into());
                }
            }
            op => {
                while let Some(top) = stack.last() {
                    if *top == Token::LeftParen || top.precedence() < op.precedence() {
                        break;
                    }
                    output.extend(stack.pop());
                }
                stack.push(op.clone());
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top == Token::LeftParen {
            if strict_parens {
                return Err(Error::UnbalancedParenthesis.into());
            }
            continue;
        }
        output.push(top);
    }

    Ok(output)
}

pub fn show_postfix(postfix: &[Token]) {
    println!(
        "{} {}",
        "Postfix:".cyan(),
        postfix.iter().join(" ").dimmed()
    );
}
