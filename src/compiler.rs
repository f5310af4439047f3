pub mod cli_option;
pub mod code_generator;
pub mod common;
pub mod context;
pub mod error;
pub mod options;
pub mod report;
pub mod rpn;
pub mod source;
pub mod statement;
pub mod symbol_table;
pub mod tokenizer;

use context::Context;
use options::CompileOptions;

/// Compile already split statements into `ctx`.
pub fn compile_statements<'a, I>(statements: I, ctx: &mut Context)
where
    I: IntoIterator<Item = &'a str>,
{
    for statement in statements {
        statement::process_statement(statement, ctx);
    }
}

/// Compile a whole program text. Errors are collected in the returned context.
pub fn compile(program: &str, options: CompileOptions) -> Context {
    let mut ctx = Context::new(options);

    if let Err(err) = source::check_semicolons(program) {
        ctx.report(err);
    }

    let program = source::normalize(program);
    compile_statements(source::split_statements(&program), &mut ctx);

    ctx
}
