use std::fs::File;

use anyhow::Result;
use colored::*;
use mips64_asm::assembler::{dump_instructions, write_listing as write_asm_listing};
use serde_json::{json, Value};

use super::context::Context;

pub fn print_errors(ctx: &Context) {
    for err in &ctx.errors {
        eprintln!("{}", err.to_string().red());
    }
}

pub fn print_console(program: &str, ctx: &Context) {
    println!("{}", "Input Code:".cyan());
    println!("===========\n{}\n===========\n", program);

    print_errors(ctx);
    if !ctx.is_ok() {
        let summary = format!("[BUILD FAILED] {} error(s) found.", ctx.error_count());
        println!("\n{}", summary.red());
        return;
    }

    println!("{}", "MIPS64 ASSEMBLY OUTPUT:".green());
    println!("=======================\n");

    println!(".data");
    for var in ctx.symbols.iter() {
        println!("{} offset --> {}", var.name, var.offset);
    }
    println!();

    dump_instructions(&ctx.records());

    println!("{}", "FINAL VARIABLE VALUES:".green());
    println!("======================");
    for var in ctx.symbols.iter() {
        println!(" {} = {}", var.name, var.value);
    }
}

/// Everything produced by the run, including partial output on failure.
pub fn to_json(ctx: &Context) -> Value {
    let errors: Vec<_> = ctx.errors.iter().map(|err| err.to_string()).collect();
    let variables: Vec<_> = ctx
        .symbols
        .iter()
        .map(|var| json!({ "name": var.name, "offset": var.offset, "value": var.value }))
        .collect();
    let instructions: Vec<_> = ctx
        .records()
        .into_iter()
        .map(|record| {
            json!({
                "assembly": record.assembly,
                "binary": record.binary,
                "hex": record.hex,
            })
        })
        .collect();

    json!({
        "ok": ctx.is_ok(),
        "errors": errors,
        "variables": variables,
        "instructions": instructions,
    })
}

pub fn write_listing(path: &str, ctx: &Context) -> Result<()> {
    let symbols: Vec<_> = ctx
        .symbols
        .iter()
        .map(|var| (var.name.clone(), var.offset))
        .collect();
    let mut file = File::create(path)?;
    write_asm_listing(&mut file, &symbols, &ctx.records())
}
