//! Program text handling before statements reach the driver.

use itertools::Itertools;

use super::error::Error;

pub const STATEMENT_TERMINATOR: char = ';';

/// Space, tab, newline, vertical tab, form feed or carriage return.
pub fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

/// Report text left after the last `;`.
pub fn check_semicolons(program: &str) -> Result<(), Error> {
    let tail = program.rsplit(STATEMENT_TERMINATOR).next().unwrap_or_default();
    if tail.trim().is_empty() {
        Ok(())
    } else {
        Err(Error::MissingSemicolon)
    }
}

/// Collapse every whitespace run into one space and trim both ends.
pub fn normalize(program: &str) -> String {
    program.split(is_space).filter(|s| !s.is_empty()).join(" ")
}

/// Trimmed, non-empty statements without their terminators.
pub fn split_statements(program: &str) -> impl Iterator<Item = &str> {
    program
        .split(STATEMENT_TERMINATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
