use anyhow::Result;
use clap::Parser;

use bisdac::compiler::{
    cli_option::CliOption,
    common::read_program,
    compile,
    options::{CompileOptions, OutputFormat},
    report,
};

fn main() -> Result<()> {
    let opt = CliOption::parse();

    let program = read_program(&opt.filename)?;
    let ctx = compile(&program, CompileOptions::from(&opt));

    match opt.format {
        OutputFormat::Console => report::print_console(&program, &ctx),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report::to_json(&ctx))?)
        }
    }

    if let Some(output) = &opt.output {
        report::write_listing(output, &ctx)?;
    }

    if !ctx.is_ok() {
        std::process::exit(1);
    }
    Ok(())
}
