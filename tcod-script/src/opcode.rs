use strum::{Display, EnumString, FromRepr, IntoStaticStr};

/// Instruction word layout: `OOSSPPPP`
/// - `OO`: opcode
/// - `SS`: sub-opcode
/// - `PPPP`: parameter, sign-extended unless the opcode says otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, FromRepr)]
#[repr(u8)]
pub enum Opcode {
    #[strum(serialize = "nop")]
    Nop = 0,
    #[strum(serialize = "operator")]
    Operator = 1,
    #[strum(serialize = "ldimm")]
    LoadImmediate = 2,
    #[strum(serialize = "ldvar")]
    LoadVar = 3,
    #[strum(serialize = "setvar")]
    SetVar = 4,
    #[strum(serialize = "setvector")]
    SetVector = 5,
    #[strum(serialize = "pop")]
    Pop = 6,
    #[strum(serialize = "call")]
    Call = 7,
    #[strum(serialize = "return")]
    Return = 8,
    #[strum(serialize = "callstd")]
    CallStd = 9,
    #[strum(serialize = "jmptrue")]
    JumpIfTrue = 10,
    #[strum(serialize = "jmpfalse")]
    JumpIfFalse = 11,
    #[strum(serialize = "jmp")]
    Jump = 12,
    #[strum(serialize = "reserve")]
    Reserve = 13,
    #[strum(serialize = "release")]
    Release = 14,
    #[strum(serialize = "exit")]
    Exit = 15,
    #[strum(serialize = "setline")]
    SetLine = 16,
    /// Loads a non-copyable variable; a following `setvar` moves it.
    #[strum(serialize = "ldncpvar")]
    LoadNoCopyVar = 17,
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Opcode::from_repr(v).ok_or(v)
    }
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        self.into()
    }

    /// `jmptrue`, `jmpfalse` and `jmp`.
    pub fn is_branch(self) -> bool {
        matches!(self, Opcode::JumpIfTrue | Opcode::JumpIfFalse | Opcode::Jump)
    }
}

/// `ldimm` sub-opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum ImmediateType {
    None = 0,
    Int = 1,
    Float = 2,
    /// Byte offset into STRG, carried in the parameter.
    Str = 3,
    /// Index into VECT, carried in the parameter.
    Vector = 4,
    Type44 = 0x2c,
    CodePtr = 0x35,
}

impl ImmediateType {
    /// Whether the literal lives in the next raw word.
    pub fn is_two_word(self) -> bool {
        matches!(
            self,
            ImmediateType::None | ImmediateType::Int | ImmediateType::Float | ImmediateType::CodePtr
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonics() {
        assert_eq!(Opcode::try_from(2).map(Opcode::mnemonic), Ok("ldimm"));
        assert_eq!(Opcode::LoadNoCopyVar.to_string(), "ldncpvar");
        assert_eq!("jmpfalse".parse::<Opcode>().ok(), Some(Opcode::JumpIfFalse));
        assert_eq!(Opcode::try_from(18), Err(18));
    }
}
