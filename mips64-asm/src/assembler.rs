use std::io::Write;

use anyhow::Result;
use colored::*;
use itertools::Itertools;

use crate::instruction::*;

/// Field widths of an encoded word, most significant first:
/// opcode, rs, rt, rd, shamt, funct.
pub const FIELD_WIDTHS: [usize; 6] = [6, 5, 5, 5, 5, 6];

/// An assembled instruction in its three textual forms.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InstrRecord {
    pub assembly: String,
    /// 32 binary digits, MSB first
    pub binary: String,
    /// 8 upper-case hex digits
    pub hex: String,
}

impl InstrRecord {
    pub fn new(inst: &Instruction) -> InstrRecord {
        let code = inst.generate_code();
        InstrRecord {
            assembly: inst.generate_asm(),
            binary: format!("{:032b}", code),
            hex: format!("{:08X}", code),
        }
    }

    /// Binary string split at the R-format field boundaries.
    pub fn binary_fields(&self) -> Vec<&str> {
        let mut rest = self.binary.as_str();
        FIELD_WIDTHS
            .iter()
            .map(|width| {
                let (field, tail) = rest.split_at(*width);
                rest = tail;
                field
            })
            .collect()
    }
}

impl From<&Instruction> for InstrRecord {
    fn from(inst: &Instruction) -> Self {
        InstrRecord::new(inst)
    }
}

pub fn assemble(instructions: &[Instruction]) -> Vec<InstrRecord> {
    instructions.iter().map(InstrRecord::from).collect()
}

pub fn dump_instructions(records: &[InstrRecord]) {
    println!("{}", "MIPS64 Instructions:".red());
    for record in records {
        println!(" Assembly: {}", record.assembly);
        println!(" Binary:   {}", record.binary_fields().iter().join(" "));
        println!(
            "           {}",
            "[Opcode][ rs ][ rt ][ rd ][shmt][funct]".dimmed()
        );
        println!("            Hex: 0x{}", record.hex);
        println!();
    }
}

/// Write an assembly listing: `.data` offsets, then one instruction per line.
pub fn write_listing<W: Write>(
    out: &mut W,
    symbols: &[(String, i64)],
    records: &[InstrRecord],
) -> Result<()> {
    writeln!(out, ".data")?;
    for (name, offset) in symbols {
        writeln!(out, "  # {} offset --> {}", name, offset)?;
    }
    writeln!(out)?;
    writeln!(out, ".text")?;
    for record in records {
        writeln!(out, "  {:<24} # 0x{}", record.assembly, record.hex)?;
    }
    Ok(())
}
