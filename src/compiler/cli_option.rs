use clap::Parser;

use super::options::{Limits, OutputFormat};

#[derive(Parser)]
#[clap(author, version, about, long_about=None)]
/// A compiler of integer declarations and arithmetic expressions into MIPS64 instructions
pub struct CliOption {
    /// Path of the program. It is created with a sample program if it does not exist.
    #[clap(value_parser, default_value = "input.txt")]
    pub filename: String,

    /// Write the assembly listing to this file as well.
    #[clap(short, long)]
    pub output: Option<String>,

    /// `console` or `json`
    #[clap(long, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,

    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub dump_tokens: bool,

    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub dump_rpn: bool,

    /// Reject unbalanced parentheses.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub strict_parens: bool,

    #[clap(long, default_value_t = Limits::default().max_tokens)]
    pub max_tokens: usize,

    #[clap(long, default_value_t = Limits::default().max_variables)]
    pub max_variables: usize,

    #[clap(long, default_value_t = Limits::default().max_instructions)]
    pub max_instructions: usize,

    #[clap(long, default_value_t = Limits::default().max_identifier_len)]
    pub max_identifier_len: usize,
}
