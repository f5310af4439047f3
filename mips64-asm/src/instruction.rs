use std::fmt::Display;

use strum_macros::Display as StrumDisplay;

pub type Code = u32;

pub const OPCODE_SPECIAL: Code = 0x00;
pub const OPCODE_DADDIU: Code = 0x19;
pub const OPCODE_LD: Code = 0x37;
pub const OPCODE_SD: Code = 0x3F;

pub const FUNCT_DADDU: Code = 0x2D;
pub const FUNCT_DSUBU: Code = 0x2F;
pub const FUNCT_DMULT: Code = 0x1C;
pub const FUNCT_DDIV: Code = 0x1E;
pub const FUNCT_MFLO: Code = 0x12;

#[derive(Clone, PartialEq, Debug)]
pub enum Instruction {
    R(RInstruction),
    I(IInstruction),
}

impl Instruction {
    // Pseudo instructions

    /// `rd = 0 + imm`
    pub fn li(rd: Register, imm: i64) -> Instruction {
        Instruction::I(IInstruction {
            op: IInstructionOp::Daddiu,
            imm: Immediate::new(imm),
            rs: Register::zero(),
            rt: rd,
        })
    }

    /// `rd = rs + 0`
    pub fn mv(rd: Register, rs: Register) -> Instruction {
        Instruction::daddu(rd, rs, Register::zero())
    }

    // Frequently used instructions

    pub fn daddu(rd: Register, rs: Register, rt: Register) -> Instruction {
        Instruction::R(RInstruction {
            op: RInstructionOp::Daddu,
            rs,
            rt,
            rd,
        })
    }

    pub fn dsubu(rd: Register, rs: Register, rt: Register) -> Instruction {
        Instruction::R(RInstruction {
            op: RInstructionOp::Dsubu,
            rs,
            rt,
            rd,
        })
    }

    /// Multiply `rs` by `rt` into HI/LO
    pub fn dmult(rs: Register, rt: Register) -> Instruction {
        Instruction::R(RInstruction {
            op: RInstructionOp::Dmult,
            rs,
            rt,
            rd: Register::zero(),
        })
    }

    /// Divide `rs` by `rt`, quotient into LO
    pub fn ddiv(rs: Register, rt: Register) -> Instruction {
        Instruction::R(RInstruction {
            op: RInstructionOp::Ddiv,
            rs,
            rt,
            rd: Register::zero(),
        })
    }

    pub fn mflo(rd: Register) -> Instruction {
        Instruction::R(RInstruction {
            op: RInstructionOp::Mflo,
            rs: Register::zero(),
            rt: Register::zero(),
            rd,
        })
    }

    /// Load `mem[base + offset]` to `rt`
    pub fn ld(rt: Register, name: &str, offset: i64) -> Instruction {
        Instruction::I(IInstruction {
            op: IInstructionOp::Ld,
            imm: Immediate::symbol(name, offset),
            rs: Register::base(),
            rt,
        })
    }

    /// Store `rt` to `mem[base + offset]`
    pub fn sd(rt: Register, name: &str, offset: i64) -> Instruction {
        Instruction::I(IInstruction {
            op: IInstructionOp::Sd,
            imm: Immediate::symbol(name, offset),
            rs: Register::base(),
            rt,
        })
    }

    pub fn generate_code(&self) -> Code {
        match self {
            Instruction::R(ri) => ri.generate_code(),
            Instruction::I(ii) => ii.generate_code(),
        }
    }

    pub fn generate_asm(&self) -> String {
        match self {
            Instruction::R(ri) => ri.generate_asm(),
            Instruction::I(ii) => ii.generate_asm(),
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.generate_asm())
    }
}

/// SPECIAL-opcode instruction: `opcode | rs | rt | rd | shamt | funct`
#[derive(Clone, PartialEq, Debug)]
pub struct RInstruction {
    pub op: RInstructionOp,
    pub rs: Register,
    pub rt: Register,
    pub rd: Register,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, StrumDisplay)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RInstructionOp {
    Daddu,
    Dsubu,
    Dmult,
    Ddiv,
    /// Move From LO
    Mflo,
}

/// Immediate-format instruction: `opcode | rs | rt | imm16`
#[derive(Clone, PartialEq, Debug)]
pub struct IInstruction {
    pub op: IInstructionOp,
    pub imm: Immediate,
    pub rs: Register,
    pub rt: Register,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, StrumDisplay)]
#[strum(serialize_all = "UPPERCASE")]
pub enum IInstructionOp {
    Daddiu,
    /// Load Doubleword
    Ld,
    /// Store Doubleword
    Sd,
}

pub trait GenerateCode {
    fn generate_code(&self) -> Code;
    fn generate_asm(&self) -> String;
}

impl GenerateCode for RInstruction {
    fn generate_code(&self) -> Code {
        use RInstructionOp::*;

        let rs = self.rs.as_int();
        let rt = self.rt.as_int();
        let rd = self.rd.as_int();
        let shamt = 0;

        let funct = match self.op {
            Daddu => FUNCT_DADDU,
            Dsubu => FUNCT_DSUBU,
            Dmult => FUNCT_DMULT,
            Ddiv => FUNCT_DDIV,
            Mflo => FUNCT_MFLO,
        };

        (OPCODE_SPECIAL << 26) | (rs << 21) | (rt << 16) | (rd << 11) | (shamt << 6) | funct
    }

    fn generate_asm(&self) -> String {
        use RInstructionOp::*;

        match self.op {
            Daddu | Dsubu => format!("{} {}, {}, {}", self.op, self.rd, self.rs, self.rt),
            Dmult | Ddiv => format!("{} {}, {}", self.op, self.rs, self.rt),
            Mflo => format!("{} {}", self.op, self.rd),
        }
    }
}

impl GenerateCode for IInstruction {
    fn generate_code(&self) -> Code {
        use IInstructionOp::*;

        // Not range-checked: only the low 16 bits are encoded.
        let imm = (self.imm.value() as Code) & 0xffff;
        let rs = self.rs.as_int();
        let rt = self.rt.as_int();

        let opcode = match self.op {
            Daddiu => OPCODE_DADDIU,
            Ld => OPCODE_LD,
            Sd => OPCODE_SD,
        };

        (opcode << 26) | (rs << 21) | (rt << 16) | imm
    }

    fn generate_asm(&self) -> String {
        use IInstructionOp::*;

        match self.op {
            Daddiu => format!("{} {}, {}, {}", self.op, self.rt, self.rs, self.imm),
            Ld | Sd => format!("{} {}, {}({})", self.op, self.rt, self.imm, self.rs),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Register(u32);

impl Register {
    pub fn new(i: u32) -> Register {
        Register(i)
    }

    /// Hardwired zero
    pub fn zero() -> Register {
        Register(0)
    }

    /// Declarations move their result here before storing it.
    pub fn result() -> Register {
        Register(3)
    }

    /// Base of every variable slot
    pub fn base() -> Register {
        Register(29)
    }

    pub fn as_int(&self) -> u32 {
        self.0
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum Immediate {
    Value(i64),
    /// Memory offset of a named variable. Rendered by name in assembly.
    Symbol { name: String, offset: i64 },
}

impl Immediate {
    pub fn new(value: i64) -> Immediate {
        Immediate::Value(value)
    }

    pub fn symbol(name: &str, offset: i64) -> Immediate {
        Immediate::Symbol {
            name: name.to_string(),
            offset,
        }
    }

    pub fn value(&self) -> i64 {
        match self {
            Immediate::Value(value) => *value,
            Immediate::Symbol { offset, .. } => *offset,
        }
    }
}

impl Display for Immediate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Immediate::Value(value) => write!(f, "{}", value),
            Immediate::Symbol { name, .. } => write!(f, "{}", name),
        }
    }
}
