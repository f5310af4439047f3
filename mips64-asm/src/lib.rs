pub mod assembler;
pub mod instruction;
