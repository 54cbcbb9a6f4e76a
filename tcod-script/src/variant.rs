use std::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::fmt::format_g;

/// Type tags with a known meaning.
///
/// - 0: none_t
/// - 1: int
/// - 2: float
/// - 3: str (offset into STRG)
/// - 4: vector
/// - 7: list
/// - 8: msg (message id)
/// - 35: character
/// - 37: pkm
/// - 44: type44
/// - 53: codeptr_t
pub fn type_name(ty: i16) -> Option<&'static str> {
    Some(match ty {
        0 => "none_t",
        1 => "int",
        2 => "float",
        3 => "str",
        4 => "vector",
        7 => "list",
        8 => "msg",
        35 => "character",
        37 => "pkm",
        44 => "type44",
        53 => "codeptr_t",
        _ => return None,
    })
}

/// Payload of a [`ScriptVar`] as selected by its type tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarValue {
    Int(i32),
    Float(f32),
    /// Opaque reference or id; meaning depends on the tag.
    Ref(u32),
}

/// An 8-byte typed script variable as stored in GVAR and ARRY.
///
/// Layout (big-endian):
/// - 0x00: i16 type tag
/// - 0x02: 2 bytes padding
/// - 0x04: 4-byte payload (i32, f32 or reference)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptVar {
    pub ty: i16,
    pub raw: [u8; 4],
}

impl ScriptVar {
    pub const SIZE: usize = 8;

    /// Reads one variable from the start of `bytes`, `None` if fewer than 8 bytes remain.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let bytes = bytes.get(..Self::SIZE)?;
        Some(Self {
            ty: BigEndian::read_i16(&bytes[0..2]),
            raw: [bytes[4], bytes[5], bytes[6], bytes[7]],
        })
    }

    #[inline]
    pub fn raw_u32(&self) -> u32 {
        u32::from_be_bytes(self.raw)
    }

    pub fn value(&self) -> VarValue {
        match self.ty {
            1 => VarValue::Int(i32::from_be_bytes(self.raw)),
            2 => VarValue::Float(f32::from_be_bytes(self.raw)),
            _ => VarValue::Ref(self.raw_u32()),
        }
    }
}

impl fmt::Display for ScriptVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ty, self.value()) {
            (0, VarValue::Ref(0)) => write!(f, "None"),
            (0, VarValue::Ref(v)) => write!(f, "none_t({v})"),
            (_, VarValue::Int(v)) => write!(f, "{v}"),
            (_, VarValue::Float(v)) => write!(f, "{}", format_g(v as f64, 7)),
            (ty, VarValue::Ref(v)) => match type_name(ty) {
                Some(name) => write!(f, "{name}(*0x{v:x})"),
                None => write!(f, "{ty}(*0x{v:x})"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(hex: &str) -> ScriptVar {
        ScriptVar::parse(&hex::decode(hex).unwrap()).unwrap()
    }

    #[test]
    fn display_forms() {
        assert_eq!(var("0000000000000000").to_string(), "None");
        assert_eq!(var("0000000000000007").to_string(), "none_t(7)");
        assert_eq!(var("00010000ffffffd6").to_string(), "-42");
        assert_eq!(var("000200003fc00000").to_string(), "1.5");
        assert_eq!(var("000300000000001c").to_string(), "str(*0x1c)");
        assert_eq!(var("00230000deadbeef").to_string(), "character(*0xdeadbeef)");
        assert_eq!(var("0063000000000010").to_string(), "99(*0x10)");
    }

    #[test]
    fn short_input() {
        assert_eq!(ScriptVar::parse(&[0; 7]), None);
    }
}
