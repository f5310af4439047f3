use anyhow::Result;
use mips64_asm::instruction::{Instruction, Register};

use super::{
    code_generator::{generate, Operand},
    context::Context,
    error::*,
    options::Limits,
    rpn::{show_postfix, to_postfix},
    source::is_space,
    tokenizer::{show_tokens, tokenize},
};
use crate::bug;

pub const DECLARATION_KEYWORD: &str = "int";

#[derive(Debug, PartialEq, Eq)]
pub enum Statement<'a> {
    /// `int <name> = <expr>`
    Declaration { name: &'a str, expr: &'a str },
    /// Evaluated for its instructions only
    BareExpression(&'a str),
    Empty,
}

/// Decide the form of a statement. The terminating `;` is already stripped.
pub fn classify<'a>(statement: &'a str, limits: &Limits) -> Result<Statement<'a>, Error> {
    let statement = statement.trim();
    if statement.is_empty() {
        return Ok(Statement::Empty);
    }

    let rest = match statement.strip_prefix(DECLARATION_KEYWORD) {
        Some(rest) if rest.starts_with(is_space) => rest.trim_start(),
        _ => return Ok(Statement::BareExpression(statement)),
    };

    let (target, expr) = rest.split_once('=').ok_or(Error::MissingAssignment)?;
    let name = target
        .split(is_space)
        .next()
        .unwrap_or_default();

    match name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return Err(Error::InvalidVariableName(name.to_string())),
    }
    if name.chars().count() > limits.max_identifier_len {
        return Err(Error::IdentifierTooLong(
            name.to_string(),
            limits.max_identifier_len,
        ));
    }

    Ok(Statement::Declaration {
        name,
        expr: expr.trim(),
    })
}

/// Tokenize, convert and generate code for one expression.
pub fn compile_expression(expr: &str, ctx: &mut Context) -> Result<Operand> {
    let mut skipped = Vec::new();
    let tokens = tokenize(expr, &ctx.options.limits, &mut skipped);
    for err in skipped {
        ctx.report(err);
    }
    let tokens = tokens?;
    if ctx.options.dump_tokens {
        show_tokens(&tokens);
    }

    let postfix = to_postfix(&tokens, ctx.options.strict_parens)?;
    if ctx.options.dump_rpn {
        show_postfix(&postfix);
    }

    ctx.registers.reset();
    generate(&postfix, ctx)
}

fn compile_statement(statement: &str, ctx: &mut Context) -> Result<()> {
    match classify(statement, &ctx.options.limits)? {
        Statement::Empty => Ok(()),
        Statement::BareExpression(expr) => {
            // An expression statement has no effect beyond its code.
            compile_expression(expr, ctx)?;
            Ok(())
        }
        Statement::Declaration { name, expr } => {
            ctx.symbols.declare(name)?;

            let result = compile_expression(expr, ctx)?;

            let offset = ctx
                .symbols
                .lookup(name)
                .map(|var| var.offset)
                .ok_or_else(|| bug!(format!("`{}` vanished after declaration", name)))?;

            if result.register != Register::result() {
                ctx.emit(Instruction::mv(Register::result(), result.register))?;
            }
            ctx.emit(Instruction::sd(Register::result(), name, offset))?;

            // Only a fully stored declaration updates the known value.
            if let Some(var) = ctx.symbols.lookup_mut(name) {
                var.value = result.value;
            }
            Ok(())
        }
    }
}

/// Compile one statement, recording any error in `ctx` instead of returning it.
pub fn process_statement(statement: &str, ctx: &mut Context) {
    ctx.begin_statement(statement.trim());
    if let Err(err) = compile_statement(statement, ctx) {
        ctx.report(into_error(err));
    }
    ctx.end_statement();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_default(statement: &str) -> Result<Statement<'_>, Error> {
        classify(statement, &Limits::default())
    }

    fn asm(ctx: &Context) -> Vec<String> {
        ctx.instructions.iter().map(|i| i.generate_asm()).collect()
    }

    #[test]
    fn test_classify_declaration() {
        assert_eq!(
            classify_default("  int x = 1 + 2 "),
            Ok(Statement::Declaration {
                name: "x",
                expr: "1 + 2"
            })
        );
        assert_eq!(
            classify_default("int _tmp1=a"),
            Ok(Statement::Declaration {
                name: "_tmp1",
                expr: "a"
            })
        );
    }

    #[test]
    fn test_classify_bare_expression() {
        assert_eq!(classify_default("3+4"), Ok(Statement::BareExpression("3+4")));
        assert_eq!(
            classify_default("integer + 1"),
            Ok(Statement::BareExpression("integer + 1"))
        );
        assert_eq!(classify_default("int"), Ok(Statement::BareExpression("int")));
        assert_eq!(classify_default("   "), Ok(Statement::Empty));
    }

    #[test]
    fn test_classify_errors() {
        assert_eq!(classify_default("int x"), Err(Error::MissingAssignment));
        assert_eq!(
            classify_default("int 1x = 3"),
            Err(Error::InvalidVariableName("1x".to_string()))
        );
        assert_eq!(
            classify_default("int = 3"),
            Err(Error::InvalidVariableName("".to_string()))
        );

        let limits = Limits {
            max_identifier_len: 3,
            ..Limits::default()
        };
        assert_eq!(
            classify("int abcd = 1", &limits),
            Err(Error::IdentifierTooLong("abcd".to_string(), 3))
        );
    }

    #[test]
    fn test_declaration_moves_and_stores() {
        let mut ctx = Context::default();
        process_statement("int a = -50", &mut ctx);
        assert!(ctx.is_ok());
        assert_eq!(
            asm(&ctx),
            vec!["DADDIU r1, r0, -50", "DADDU r3, r1, r0", "SD r3, a(r29)"]
        );
        assert_eq!(ctx.symbols.lookup("a").unwrap().value, -50);
    }

    #[test]
    fn test_declaration_result_already_in_r3() {
        let mut ctx = Context::default();
        process_statement("int a = 1 + 2", &mut ctx);
        assert_eq!(
            asm(&ctx),
            vec![
                "DADDIU r1, r0, 1",
                "DADDIU r2, r0, 2",
                "DADDU r3, r1, r2",
                "SD r3, a(r29)"
            ]
        );
    }

    #[test]
    fn test_bare_expression_has_no_store() {
        let mut ctx = Context::default();
        process_statement("3+4", &mut ctx);
        assert!(ctx.is_ok());
        assert!(ctx.symbols.is_empty());
        assert_eq!(asm(&ctx).len(), 3);
        assert!(asm(&ctx).iter().all(|a| !a.starts_with("SD")));
    }

    #[test]
    fn test_registers_reset_per_statement() {
        let mut ctx = Context::default();
        process_statement("1 + 2", &mut ctx);
        process_statement("int b = 5", &mut ctx);
        assert_eq!(asm(&ctx)[3], "DADDIU r1, r0, 5");
    }

    #[test]
    fn test_failed_declaration_keeps_offset_but_no_store() {
        let mut ctx = Context::default();
        process_statement("int a = b + 1", &mut ctx);
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(
            ctx.errors[0].err,
            Error::UndeclaredVariable("b".to_string())
        );
        assert_eq!(ctx.errors[0].statement, Some("int a = b + 1".to_string()));

        let a = ctx.symbols.lookup("a").unwrap();
        assert_eq!((a.offset, a.value), (8, 0));
        assert!(ctx.instructions.is_empty());
    }

    #[test]
    fn test_unknown_character_continues() {
        let mut ctx = Context::default();
        process_statement("int a = 2 $ * 3", &mut ctx);
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.errors[0].err, Error::UnknownCharacter('$'));
        assert_eq!(ctx.symbols.lookup("a").unwrap().value, 6);
        assert_eq!(asm(&ctx).last().unwrap(), "SD r3, a(r29)");
    }

    #[test]
    fn test_unknown_character_reported_before_fatal_error() {
        let mut ctx = Context::default();
        process_statement("int a = 1 $ + 99999999999999999999", &mut ctx);
        assert_eq!(ctx.error_count(), 2);
        assert_eq!(ctx.errors[0].err, Error::UnknownCharacter('$'));
        assert_eq!(
            ctx.errors[1].err,
            Error::InvalidInteger("99999999999999999999".to_string())
        );
        assert!(ctx.instructions.is_empty());
    }

    #[test]
    fn test_classify_vertical_tab_separates_keyword() {
        assert_eq!(
            classify_default("int\x0Bx\x0B= 1"),
            Ok(Statement::Declaration { name: "x", expr: "1" })
        );
    }

    #[test]
    fn test_strict_parens_option() {
        let mut ctx = Context::default();
        ctx.options.strict_parens = true;
        process_statement("int a = (1 + 2", &mut ctx);
        assert_eq!(ctx.errors[0].err, Error::UnbalancedParenthesis);
        assert!(ctx.instructions.is_empty());
    }
}
