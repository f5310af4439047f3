use bisdac::compiler::{compile, context::Context, options::CompileOptions};

#[macro_export]
macro_rules! assert_error {
    ( $ctx:expr, $p:pat ) => {
        let has_error = $ctx.errors.iter().any(|e| match &e.err {
            $p => true,
            _ => false,
        });
        assert!(
            has_error,
            "{} must have an error {}, but has {:?}",
            stringify!($ctx),
            stringify!($p),
            $ctx.errors
        );
    };
}

#[allow(dead_code)]
pub fn compile_default(program: &str) -> Context {
    compile(program, CompileOptions::default())
}

#[allow(dead_code)]
pub fn value_of(ctx: &Context, name: &str) -> Option<i64> {
    ctx.symbols.lookup(name).map(|v| v.value)
}

#[allow(dead_code)]
pub fn asm(ctx: &Context) -> Vec<String> {
    ctx.records().into_iter().map(|r| r.assembly).collect()
}
