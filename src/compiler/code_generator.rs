//! Postfix evaluation with code generation.
//!
//! Every operand pushed on the evaluation stack gets a fresh temporary
//! register. The value of each operand is folded at compile time next to the
//! code computing it: variables contribute their last known value, not a
//! re-read of memory.

use anyhow::Result;
use mips64_asm::instruction::{Instruction, Register};

use super::{context::Context, error::*, tokenizer::Token};
use crate::bug;

/// Temporary register allocator. Starts at `r1`, never reuses a register.
#[derive(Clone, PartialEq, Debug)]
pub struct RegisterCounter(u32);

impl RegisterCounter {
    pub fn new() -> Self {
        Self(1)
    }

    pub fn reset(&mut self) {
        self.0 = 1;
    }

    pub fn gen(&mut self) -> Register {
        let reg = Register::new(self.0);
        self.0 += 1;
        reg
    }
}

impl Default for RegisterCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// A value on the evaluation stack and the register holding it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Operand {
    pub register: Register,
    pub value: i64,
}

/// Emit code for `postfix` and return the operand holding its result.
pub fn generate(postfix: &[Token], ctx: &mut Context) -> Result<Operand> {
    let mut stack: Vec<Operand> = Vec::new();

    for token in postfix {
        let operand = match token {
            Token::Number(value) => {
                let register = ctx.registers.gen();
                ctx.emit(Instruction::li(register, *value))?;
                Operand {
                    register,
                    value: *value,
                }
            }
            Token::Variable(name) => {
                let (offset, value) = match ctx.symbols.lookup(name) {
                    Some(var) => (var.offset, var.value),
                    None => return Err(Error::UndeclaredVariable(name.clone()).into()),
                };
                let register = ctx.registers.gen();
                ctx.emit(Instruction::ld(register, name, offset))?;
                Operand { register, value }
            }
            op if op.is_operator() => {
                let right = stack.pop().ok_or(Error::MalformedExpression)?;
                let left = stack.pop().ok_or(Error::MalformedExpression)?;

                let register = ctx.registers.gen();
                let value = generate_binary(ctx, op, left, right, register)?;
                Operand { register, value }
            }
            _ => return Err(bug!(format!("`{}` in a postfix sequence", token))),
        };
        stack.push(operand);
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        _ => Err(Error::MalformedExpression.into()),
    }
}

fn generate_binary(
    ctx: &mut Context,
    op: &Token,
    left: Operand,
    right: Operand,
    rd: Register,
) -> Result<i64> {
    let (l, r) = (left.register, right.register);

    match op {
        Token::Plus => {
            ctx.emit(Instruction::daddu(rd, l, r))?;
            Ok(left.value.wrapping_add(right.value))
        }
        Token::Minus => {
            ctx.emit(Instruction::dsubu(rd, l, r))?;
            Ok(left.value.wrapping_sub(right.value))
        }
        Token::Mult => {
            ctx.emit(Instruction::dmult(l, r))?;
            ctx.emit(Instruction::mflo(rd))?;
            Ok(left.value.wrapping_mul(right.value))
        }
        Token::Div => {
            ctx.emit(Instruction::ddiv(l, r))?;
            ctx.emit(Instruction::mflo(rd))?;
            // Division by zero folds to 0.
            if right.value == 0 {
                Ok(0)
            } else {
                Ok(left.value.wrapping_div(right.value))
            }
        }
        _ => Err(bug!(format!("`{}` is not a binary operator", op))),
    }
}
