use strum_macros::{Display, EnumString};

use super::cli_option::CliOption;

/// What a [`Limits`] entry bounds.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Capacity {
    Tokens,
    Variables,
    Instructions,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Limits {
    /// Tokens in a single statement
    pub max_tokens: usize,
    pub max_variables: usize,
    /// Instructions in the whole program
    pub max_instructions: usize,
    pub max_identifier_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            max_variables: 100,
            max_instructions: 4096,
            max_identifier_len: 31,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CompileOptions {
    pub limits: Limits,
    /// Report `)` without `(` and unclosed `(` instead of ignoring them.
    pub strict_parens: bool,
    pub dump_tokens: bool,
    pub dump_rpn: bool,
}

impl From<&CliOption> for CompileOptions {
    fn from(opt: &CliOption) -> Self {
        Self {
            limits: Limits {
                max_tokens: opt.max_tokens,
                max_variables: opt.max_variables,
                max_instructions: opt.max_instructions,
                max_identifier_len: opt.max_identifier_len,
            },
            strict_parens: opt.strict_parens,
            dump_tokens: opt.dump_tokens,
            dump_rpn: opt.dump_rpn,
        }
    }
}
