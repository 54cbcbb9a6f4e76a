//! Text listing.
//!
//! The layout is consumed by other tools and must stay byte-for-byte
//! stable: tab indent, 14-column mnemonic field, fixed separators.

use std::io::{self, Write};

use crate::decode::{Immediate, Instruction, Op};
use crate::fmt::format_g;
use crate::labels::LabelTable;
use crate::names::NameTable;
use crate::opcode::Opcode;
use crate::script::Script;
use crate::sections::FunctionTable;

pub const SUBROUTINE_SEPARATOR: &str = "\n\n;=================SUBROUTINE===================\n";
pub const BLOCK_SEPARATOR: &str = ";----------------------------------------------\n";

const MNEMONIC_WIDTH: usize = 14;
const VECTOR_COORDS: [&str; 3] = ["vx", "vy", "vz"];

/// Read-only view used to print single instructions.
pub struct InstructionFormatter<'a> {
    pub names: &'a dyn NameTable,
    pub labels: &'a LabelTable,
}

impl InstructionFormatter<'_> {
    /// Mnemonic column followed by the operand text.
    pub fn line(&self, insn: &Instruction) -> String {
        format!("{:<width$}{}", insn.mnemonic(), self.operand(insn), width = MNEMONIC_WIDTH)
    }

    pub fn operand(&self, insn: &Instruction) -> String {
        let (sub, param) = (insn.sub_opcode, insn.parameter);
        match &insn.op {
            Op::Illegal => format!("{sub}, {param}"),
            Op::Opaque => match insn.opcode() {
                Some(Opcode::Pop | Opcode::Reserve | Opcode::Release) if param != 0 => {
                    format!("{sub}(, {param})")
                }
                Some(Opcode::Pop | Opcode::Reserve | Opcode::Release) => sub.to_string(),
                _ if (sub, param) == (0, 0) => String::new(),
                _ => format!("({sub}, {param})"),
            },
            Op::Operator(id) => match self.names.lookup_operator(*id) {
                Some(name) => name.to_string(),
                None => id.to_string(),
            },
            Op::LoadImmediate(imm) => immediate(imm),
            Op::Variable(var) => var.resolve().display(self.names).to_string(),
            Op::SetVector { coord, var } => {
                let resolved = var.resolve();
                let var = resolved.display(self.names);
                match VECTOR_COORDS.get(*coord as usize) {
                    Some(name) => format!("{name}, {var}"),
                    None => format!("{coord}, {var}"),
                }
            }
            Op::Control { target } => match self.labels.get(*target) {
                Some(label) => label.to_string(),
                None => format!("0x{target:x}"),
            },
            Op::CallStd { class_id, func_id } => self.std_function(*class_id, *func_id),
            Op::SetLine(line) => line.to_string(),
        }
    }

    fn std_function(&self, class_id: u8, func_id: i16) -> String {
        let Some(class) = self.names.lookup_class(class_id) else {
            return format!("{class_id}::{func_id}");
        };
        let func = match self.names.lookup_function(class_id, func_id) {
            Some((_, name)) => name.to_string(),
            None => func_id.to_string(),
        };
        if class_id == 0 {
            func
        } else {
            format!("{class}::{func}")
        }
    }
}

fn immediate(imm: &Immediate) -> String {
    match imm {
        Immediate::None(0) => "none_t, =None".to_string(),
        Immediate::None(v) => format!("none_t, ={v}"),
        Immediate::Int(v) => format!("int, ={v}"),
        Immediate::Float(v) => format!("float, ={}", format_g(*v as f64, 7)),
        Immediate::Str { text: Some(s), .. } => format!("str, =\"{s}\""),
        Immediate::Str { offset, text: None } => format!("str, ={offset}"),
        Immediate::Vector { value: Some(v), .. } => format!("vector, ={v}"),
        Immediate::Vector { index, value: None } => format!("vector, ={index}"),
        Immediate::Type44(v) => format!("type44, {v}"),
        Immediate::CodePtr(v) => format!("codeptr_t, =0x{v:x}"),
        Immediate::Unsupported { ty, raw } => format!("{ty}, {raw}"),
    }
}

fn starts_subroutine(label: &str, ftbl: Option<&FunctionTable>) -> bool {
    label.starts_with("sub_") || ftbl.is_some_and(|t| t.contains_name(label))
}

fn label_or_hex(labels: &LabelTable, position: u32) -> String {
    match labels.get(position) {
        Some(label) => label.to_string(),
        None => format!("0x{position:x}"),
    }
}

/// Write the listing of every known section, in fixed order.
pub fn render<W: Write>(script: &Script, out: &mut W) -> io::Result<()> {
    let labels = script.labels();

    if let Some(ftbl) = &script.ftbl {
        writeln!(out, ".section \"FTBL\":")?;
        for entry in &ftbl.entries {
            let label = labels.get(entry.code_offset).unwrap_or(&entry.name);
            writeln!(out, "\t.function {label}, \"{}\"", entry.name)?;
        }
        writeln!(out)?;
    }

    writeln!(out, ".section \"HEAD\":")?;
    writeln!(out, "\t.set __ENTRY_POINT__, {}", label_or_hex(labels, script.head.entry_point))?;
    for &offset in &script.head.functions {
        writeln!(out, "\t.function {}", label_or_hex(labels, offset))?;
    }
    writeln!(out)?;

    writeln!(out, ".section \"CODE\":")?;
    let fmt = InstructionFormatter { names: script.names(), labels };
    for insn in script.instructions() {
        let label = labels.get(insn.position);
        let mut separated = false;
        match label {
            Some(l) if starts_subroutine(l, script.ftbl.as_ref()) => {
                out.write_all(SUBROUTINE_SEPARATOR.as_bytes())?;
                separated = true;
            }
            Some(l) if l.starts_with("loc_") => {
                out.write_all(BLOCK_SEPARATOR.as_bytes())?;
                separated = true;
            }
            _ => {}
        }
        if let Some(l) = label {
            writeln!(out, "{l}:")?;
        }
        if insn.opcode() == Some(Opcode::SetLine) && !separated {
            writeln!(out)?;
        }
        writeln!(out, "\t{}", fmt.line(insn))?;
    }
    writeln!(out)?;

    if let Some(strings) = &script.strings {
        writeln!(out, ".section \"STRG\":")?;
        if !strings.is_empty() {
            for s in strings.pieces() {
                writeln!(out, "\t\"{s}\",")?;
            }
        }
        writeln!(out)?;
    }

    if let Some(vectors) = &script.vectors {
        writeln!(out, ".section \"VECT\":")?;
        for v in vectors {
            writeln!(out, "\t.vector {v}")?;
        }
        writeln!(out)?;
    }

    if let Some(characters) = &script.characters {
        writeln!(out, ".section \"GIRI\":")?;
        for c in characters {
            writeln!(out, "\t.character (grpID = {}, resID = {})", c.group_id, c.resource_id)?;
        }
        writeln!(out)?;
    }

    if let Some(globals) = &script.globals {
        writeln!(out, ".section \"GVAR\":")?;
        for var in globals {
            writeln!(out, "\t.global_var {var}")?;
        }
        writeln!(out)?;
    }

    if let Some(arrays) = &script.arrays {
        writeln!(out, ".section \"ARRY\":")?;
        for array in arrays {
            writeln!(out, "\t.array {array}")?;
        }
        writeln!(out)?;
    }

    Ok(())
}

pub fn render_to_string(script: &Script) -> io::Result<String> {
    let mut out = Vec::new();
    render(script, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

impl Script {
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        render(self, out)
    }

    pub fn listing(&self) -> io::Result<String> {
        render_to_string(self)
    }
}
