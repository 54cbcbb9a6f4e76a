//! CODE word decoding.
//!
//! One forward pass over the words: every instruction is recorded at its
//! starting position, a two-word `ldimm` swallows its literal word.

use std::borrow::Cow;

use crate::diag::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::error::{LoadError, LoadResult};
use crate::labels::LabelTable;
use crate::names::NameTable;
use crate::namespace::VarRef;
use crate::opcode::{ImmediateType, Opcode};
use crate::sections::{Head, StringPool, Vector3};

/// `ldimm` literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Immediate {
    None(u32),
    Int(i32),
    Float(f32),
    /// STRG byte offset and the string found there, if any.
    Str { offset: i16, text: Option<String> },
    /// VECT index and the vector found there, if any.
    Vector { index: i16, value: Option<Vector3> },
    Type44(u16),
    CodePtr(u32),
    Unsupported { ty: u8, raw: u16 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// nop, pop, return, reserve, release, exit: operands carried as is.
    Opaque,
    Operator(u8),
    LoadImmediate(Immediate),
    /// ldvar, setvar, ldncpvar
    Variable(VarRef),
    SetVector { coord: u8, var: VarRef },
    /// call, jmptrue, jmpfalse, jmp
    Control { target: u32 },
    CallStd { class_id: u8, func_id: i16 },
    SetLine(i16),
    Illegal,
}

/// A decoded instruction. Plain data: everything needed to print it is
/// either in here or in the label table.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub position: u32,
    /// Raw opcode byte, kept for illegal opcodes.
    pub code: u8,
    pub sub_opcode: u8,
    pub parameter: i16,
    pub op: Op,
    /// Words consumed, 1 or 2.
    pub width: u32,
}

impl Instruction {
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_repr(self.code)
    }

    #[inline]
    pub fn next_position(&self) -> u32 {
        self.position + self.width
    }

    pub fn mnemonic(&self) -> Cow<'static, str> {
        match self.opcode() {
            Some(op) => Cow::Borrowed(op.mnemonic()),
            None => Cow::Owned(format!("illegal{}", self.code)),
        }
    }

    /// Destination word of a control-flow instruction.
    pub fn target(&self) -> Option<u32> {
        match self.op {
            Op::Control { target } => Some(target),
            _ => None,
        }
    }

    pub fn is_call(&self) -> bool {
        self.opcode() == Some(Opcode::Call)
    }

    pub fn is_branch(&self) -> bool {
        self.opcode().is_some_and(Opcode::is_branch)
    }
}

/// What the decoder may consult besides the word itself.
pub struct DecodeContext<'a> {
    pub word_count: usize,
    pub head: &'a Head,
    pub names: &'a dyn NameTable,
    pub strings: Option<&'a StringPool>,
    pub vectors: Option<&'a [Vector3]>,
}

/// Decode the word at `position`. `trailing` is the following raw word,
/// if CODE has one.
pub fn decode_word(
    position: u32,
    word: u32,
    trailing: Option<u32>,
    ctx: &DecodeContext,
) -> LoadResult<(Instruction, Vec<Diagnostic>)> {
    let code = (word >> 24) as u8;
    let sub_opcode = (word >> 16) as u8;
    let parameter = word as u16 as i16;

    let mut found = Vec::new();
    let mut flag = |kind| found.push(Diagnostic::at_word(position, kind));
    let mut width = 1;

    let Ok(opcode) = Opcode::try_from(code) else {
        flag(DiagnosticKind::IllegalOpcode(code));
        let insn = Instruction { position, code, sub_opcode, parameter, op: Op::Illegal, width };
        return Ok((insn, found));
    };

    let op = match opcode {
        Opcode::Nop
        | Opcode::Pop
        | Opcode::Return
        | Opcode::Reserve
        | Opcode::Release
        | Opcode::Exit => Op::Opaque,

        Opcode::Operator => {
            if ctx.names.lookup_operator(sub_opcode).is_none() {
                flag(DiagnosticKind::InvalidOperator(sub_opcode));
            }
            Op::Operator(sub_opcode)
        }

        Opcode::LoadImmediate => {
            let ty = ImmediateType::from_repr(sub_opcode);
            let literal = match ty {
                Some(ty) if ty.is_two_word() => {
                    width = 2;
                    trailing.ok_or(LoadError::TruncatedImmediate { position, words: ctx.word_count })?
                }
                _ => 0,
            };

            let imm = match ty {
                Some(ImmediateType::None) => Immediate::None(literal),
                Some(ImmediateType::Int) => Immediate::Int(literal as i32),
                Some(ImmediateType::Float) => Immediate::Float(f32::from_bits(literal)),
                Some(ImmediateType::CodePtr) => Immediate::CodePtr(literal),
                Some(ImmediateType::Type44) => Immediate::Type44(parameter as u16),
                Some(ImmediateType::Str) => {
                    let mut text = None;
                    if parameter < 0 {
                        flag(DiagnosticKind::NegativeStringOffset(parameter));
                    } else if let Some(pool) = ctx.strings {
                        text = pool.get(parameter as usize);
                        if text.is_none() {
                            flag(DiagnosticKind::StringOffsetOutOfRange(parameter));
                        }
                    }
                    Immediate::Str { offset: parameter, text }
                }
                Some(ImmediateType::Vector) => {
                    let mut value = None;
                    if parameter < 0 {
                        flag(DiagnosticKind::NegativeVectorIndex(parameter));
                    } else if let Some(vectors) = ctx.vectors {
                        value = vectors.get(parameter as usize).copied();
                        if value.is_none() {
                            flag(DiagnosticKind::VectorIndexOutOfRange(parameter));
                        }
                    }
                    Immediate::Vector { index: parameter, value }
                }
                None => {
                    flag(DiagnosticKind::UnsupportedImmediate(sub_opcode));
                    Immediate::Unsupported { ty: sub_opcode, raw: parameter as u16 }
                }
            };
            Op::LoadImmediate(imm)
        }

        Opcode::LoadVar | Opcode::SetVar | Opcode::LoadNoCopyVar => {
            let var = VarRef::from_fields(sub_opcode, parameter);
            if let Some(kind) = var.check() {
                flag(kind);
            }
            if opcode == Opcode::SetVar && var.is_special() {
                flag(DiagnosticKind::ImmutableReference);
            }
            Op::Variable(var)
        }

        Opcode::SetVector => {
            let coord = sub_opcode >> 4;
            let var = VarRef::from_fields(sub_opcode, parameter);
            if coord >= 3 {
                flag(DiagnosticKind::VectorCoordOutOfRange(coord));
            }
            if var.is_special() {
                flag(DiagnosticKind::InvalidVectorStorage(var.level));
            } else if let Some(kind) = var.check() {
                flag(kind);
            }
            Op::SetVector { coord, var }
        }

        Opcode::Call | Opcode::JumpIfTrue | Opcode::JumpIfFalse | Opcode::Jump => {
            let target = ((sub_opcode as u32) << 16) | (parameter as u16 as u32);
            if target as usize >= ctx.word_count {
                flag(DiagnosticKind::TargetOutOfRange { mnemonic: opcode.mnemonic(), target });
            } else if opcode == Opcode::Call && !ctx.head.declares(target) {
                flag(DiagnosticKind::UnreferencedCall(target));
            }
            Op::Control { target }
        }

        Opcode::CallStd => {
            if ctx.names.lookup_class(sub_opcode).is_none() {
                flag(DiagnosticKind::UnknownClass(sub_opcode));
            } else if ctx.names.is_ambiguous(sub_opcode, parameter) {
                flag(DiagnosticKind::AmbiguousFunction { class: sub_opcode, function: parameter });
            }
            Op::CallStd { class_id: sub_opcode, func_id: parameter }
        }

        Opcode::SetLine => Op::SetLine(parameter),
    };

    let insn = Instruction { position, code, sub_opcode, parameter, op, width };
    Ok((insn, found))
}

/// Decode every word of CODE, naming control-flow targets as they are met.
pub fn decode_code(
    words: &[u32],
    ctx: &DecodeContext,
    labels: &mut LabelTable,
    diags: &mut Diagnostics,
) -> LoadResult<Vec<Instruction>> {
    let mut out = Vec::with_capacity(words.len());
    let mut position = 0usize;

    while let Some(&word) = words.get(position) {
        let (insn, found) = decode_word(position as u32, word, words.get(position + 1).copied(), ctx)?;
        labels.observe(&insn, words.len());
        diags.extend(found);
        position = insn.next_position() as usize;
        out.push(insn);
    }

    log::debug!(
        "decoded {} instructions from {} words, {} labels",
        out.len(),
        words.len(),
        labels.len()
    );
    Ok(out)
}
