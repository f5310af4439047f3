use anyhow::Result;
use mips64_asm::{
    assembler::{assemble, InstrRecord},
    instruction::Instruction,
};

use super::{
    code_generator::RegisterCounter,
    error::*,
    options::{Capacity, CompileOptions},
    symbol_table::SymbolTable,
};

/// State of one compilation run, threaded through every statement.
pub struct Context {
    pub options: CompileOptions,
    pub symbols: SymbolTable,
    /// Emitted program, append-only
    pub instructions: Vec<Instruction>,
    pub registers: RegisterCounter,
    pub errors: Vec<ErrorWithStatement>,

    /// Statement being compiled, attached to reported errors
    statement: Option<String>,
}

impl Context {
    pub fn new(options: CompileOptions) -> Context {
        let symbols = SymbolTable::new(options.limits.max_variables);
        Context {
            options,
            symbols,
            instructions: Vec::new(),
            registers: RegisterCounter::new(),
            errors: Vec::new(),
            statement: None,
        }
    }

    pub fn begin_statement(&mut self, statement: &str) {
        self.statement = Some(statement.to_string());
    }

    pub fn end_statement(&mut self) {
        self.statement = None;
    }

    pub fn report(&mut self, err: Error) {
        let err = err.with_statement(self.statement.clone());
        self.errors.push(err);
    }

    pub fn emit(&mut self, inst: Instruction) -> Result<()> {
        let limit = self.options.limits.max_instructions;
        if self.instructions.len() >= limit {
            return Err(Error::CapacityExceeded {
                what: Capacity::Instructions,
                limit,
            }
            .into());
        }
        self.instructions.push(inst);
        Ok(())
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn records(&self) -> Vec<InstrRecord> {
        assemble(&self.instructions)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}
