mod common;

use std::{env, fs, path::PathBuf};

use bisdac::compiler::{
    common::{read_program, DEFAULT_PROGRAM},
    error::Error,
};
use common::{compile_default, value_of};
use function_name::named;

fn temp_path(name: &str) -> PathBuf {
    env::temp_dir().join(format!("bisdac-{}-{}.txt", name, std::process::id()))
}

#[test]
#[named]
fn creates_default_program_test() {
    let path = temp_path(function_name!());
    let _ = fs::remove_file(&path);

    let program = read_program(&path).unwrap();
    assert_eq!(program, DEFAULT_PROGRAM);
    assert!(path.exists());

    let ctx = compile_default(&program);
    assert!(ctx.is_ok());
    assert_eq!(value_of(&ctx, "c"), Some(-75));

    fs::remove_file(&path).unwrap();
}

#[test]
#[named]
fn reads_existing_program_test() {
    let path = temp_path(function_name!());
    fs::write(&path, "int x = 6\n  * 7;\n\n3 + x;\n").unwrap();

    let program = read_program(&path).unwrap();
    let ctx = compile_default(&program);
    assert!(ctx.is_ok(), "{:?}", ctx.errors);
    assert_eq!(value_of(&ctx, "x"), Some(42));

    fs::remove_file(&path).unwrap();
}

#[test]
#[named]
fn unreadable_program_test() {
    // A directory cannot be read as a program.
    let path = temp_path(function_name!());
    let _ = fs::remove_dir(&path);
    fs::create_dir(&path).unwrap();

    assert!(matches!(read_program(&path), Err(Error::Io(_))));

    fs::remove_dir(&path).unwrap();
}

#[test]
fn missing_semicolon_test() {
    let ctx = compile_default("int a = 1;\nint b = a + 1\n");
    assert_eq!(ctx.error_count(), 1);
    assert_error!(ctx, Error::MissingSemicolon);
    assert_eq!(ctx.errors[0].statement, None);

    // The unterminated statement is still compiled.
    assert_eq!(value_of(&ctx, "b"), Some(2));
}
