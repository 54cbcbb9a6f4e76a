//! Variable storage namespaces addressed by `ldvar`, `setvar`, `ldncpvar`
//! and `setvector`.
//!
//! The low nibble of the sub-opcode picks the storage level:
//! - 0: global variable table, index = parameter
//! - 1: current call frame, index = parameter (either sign)
//! - 2: last call result, parameter must be 0
//! - 3: specials, sub-ranged by parameter:
//!   - `[0, 0x80)` singleton class instances
//!   - `[0x80, 0x120]` live characters
//!   - `(0x120, 0x200)` reserved
//!   - `[0x200, 0x300)` arrays

use std::fmt;

use crate::diag::DiagnosticKind;
use crate::names::NameTable;

const SINGLETON_LAST: i16 = 0x7f;
const CHARACTER_BASE: i16 = 0x80;
const CHARACTER_LAST: i16 = 0x120;
const ARRAY_BASE: i16 = 0x200;
const ARRAY_LAST: i16 = 0x2ff;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarRef {
    pub level: u8,
    pub index: i16,
}

impl VarRef {
    pub fn from_fields(sub_opcode: u8, parameter: i16) -> Self {
        Self { level: sub_opcode & 0x0f, index: parameter }
    }

    /// Levels above 3 are read as specials, as the interpreter does.
    #[inline]
    pub fn is_special(&self) -> bool {
        self.level >= 3
    }

    pub fn resolve(&self) -> VarName {
        let i = self.index;
        match self.level {
            0 => VarName::Global(i),
            1 => VarName::Stack(i),
            2 => VarName::LastResult,
            _ => match i {
                0..=SINGLETON_LAST => VarName::Singleton(i as u8),
                CHARACTER_BASE..=CHARACTER_LAST => VarName::Character(i - CHARACTER_BASE),
                ARRAY_BASE..=ARRAY_LAST => VarName::Array(i - ARRAY_BASE),
                _ => VarName::InvalidSpecial(i),
            },
        }
    }

    /// Validity rule of the level, independent of the accessing opcode.
    pub fn check(&self) -> Option<DiagnosticKind> {
        match (self.level, self.resolve()) {
            (0, _) if self.index < 0 => Some(DiagnosticKind::NegativeGlobalIndex(self.index)),
            (2, _) if self.index != 0 => Some(DiagnosticKind::NonZeroLastResult(self.index)),
            (_, VarName::InvalidSpecial(i)) => Some(DiagnosticKind::InvalidSpecialVariable(i)),
            _ => None,
        }
    }
}

/// A resolved variable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarName {
    Global(i16),
    Stack(i16),
    LastResult,
    /// Implicit instance of the standard class with this id.
    Singleton(u8),
    Character(i16),
    Array(i16),
    InvalidSpecial(i16),
}

impl VarName {
    pub fn display<'a>(&'a self, names: &'a dyn NameTable) -> DisplayVar<'a> {
        DisplayVar { var: self, names }
    }
}

pub struct DisplayVar<'a> {
    var: &'a VarName,
    names: &'a dyn NameTable,
}

impl fmt::Display for DisplayVar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.var {
            VarName::Global(i) => write!(f, "$globals[{i}]"),
            VarName::Stack(i) => write!(f, "$stack[{i}]"),
            VarName::LastResult => write!(f, "$lastResult"),
            VarName::Character(i) => write!(f, "$characters[{i}]"),
            VarName::Array(i) => write!(f, "$arrays[{i}]"),
            VarName::InvalidSpecial(i) => write!(f, "$invalidSpecials[{i}]"),
            VarName::Singleton(id) => {
                let mut chars = self.names.lookup_class(id).unwrap_or_default().chars();
                match chars.next() {
                    // `$dialogs` for class `Dialogs`
                    Some(first) => write!(f, "${}{}", first.to_lowercase(), chars.as_str()),
                    None => write!(f, "$singletons[{id}]"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::StdNames;

    fn special(index: i16) -> VarRef {
        VarRef { level: 3, index }
    }

    fn show(var: VarRef) -> String {
        var.resolve().display(StdNames::get()).to_string()
    }

    #[test]
    fn special_ranges() {
        assert_eq!(special(0x85).resolve(), VarName::Character(5));
        assert_eq!(special(0x120).resolve(), VarName::Character(0xa0));
        assert_eq!(special(0x250).resolve(), VarName::Array(0x50));
        assert_eq!(special(0x180).resolve(), VarName::InvalidSpecial(0x180));
        assert_eq!(special(0x300).resolve(), VarName::InvalidSpecial(0x300));
        assert_eq!(special(-1).resolve(), VarName::InvalidSpecial(-1));
    }

    #[test]
    fn reserved_hole_is_flagged_but_renders() {
        let var = special(0x180);
        assert_eq!(var.check(), Some(DiagnosticKind::InvalidSpecialVariable(0x180)));
        assert_eq!(show(var), "$invalidSpecials[384]");
    }

    #[test]
    fn level_rules() {
        assert_eq!(VarRef { level: 0, index: -2 }.check(), Some(DiagnosticKind::NegativeGlobalIndex(-2)));
        assert_eq!(VarRef { level: 1, index: -2 }.check(), None);
        assert_eq!(VarRef { level: 2, index: 1 }.check(), Some(DiagnosticKind::NonZeroLastResult(1)));
        assert_eq!(VarRef { level: 2, index: 0 }.check(), None);
    }

    #[test]
    fn names() {
        assert_eq!(show(VarRef::from_fields(0x10, 4)), "$globals[4]");
        assert_eq!(show(VarRef::from_fields(0x01, -3)), "$stack[-3]");
        assert_eq!(show(VarRef::from_fields(0x02, 0)), "$lastResult");
        assert_eq!(show(special(40)), "$dialogs");
        assert_eq!(show(special(0)), "$singletons[0]");
        assert_eq!(show(special(5)), "$singletons[5]");
        assert_eq!(show(special(0x85)), "$characters[5]");
        assert_eq!(show(special(0x250)), "$arrays[80]");
    }
}
