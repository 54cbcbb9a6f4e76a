//! Parsed views of the individual sections.
//!
//! Every parser here is best-effort: a table that claims more entries than
//! its payload holds is cut short with a diagnostic instead of failing.

use std::fmt;

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;
use itertools::Itertools;
use serde::Serialize;
use tcod_nls::{Decoder, TextDecoder};

use crate::container::{Section, SectionTag};
use crate::diag::{DiagnosticKind, Diagnostics, Location};
use crate::fmt::format_repr;
use crate::variant::ScriptVar;

/// Name offsets in FTBL are relative to the section header, not the payload.
const FTBL_NAME_BIAS: i64 = 0x20;
/// Array offsets in ARRY are relative to the section's count field.
const ARRY_OFFSET_BIAS: i64 = 0x10;

/// Split the payload into `count` entries of `stride` bytes.
fn fixed_entries<'a>(section: &'a Section, stride: usize, diags: &mut Diagnostics) -> std::slice::Chunks<'a, u8> {
    let declared = section.count();
    let available = section.payload.len() / stride;
    if declared > available {
        diags.report(
            Location::Section { tag: section.tag, index: available },
            DiagnosticKind::TruncatedTable { declared, available },
        );
    }
    let len = declared.min(available) * stride;
    section.payload[..len].chunks(stride)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionEntry {
    pub code_offset: u32,
    pub name: String,
}

/// FTBL: named functions.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    pub entries: Vec<FunctionEntry>,
}

impl FunctionTable {
    pub fn parse(section: &Section, decoder: &Decoder, diags: &mut Diagnostics) -> Self {
        let payload = &section.payload;
        let mut entries = Vec::new();

        for (i, raw) in fixed_entries(section, 8, diags).enumerate() {
            let code_offset = BigEndian::read_u32(&raw[0..4]);
            let name_offset = BigEndian::read_u32(&raw[4..8]) as i64 - FTBL_NAME_BIAS;
            if name_offset < 0 || name_offset as usize >= payload.len() {
                log::debug!("FTBL[{i}]: name offset {name_offset} out of bounds, entry skipped");
                continue;
            }
            let name = decoder.decode_cstr(&payload[name_offset as usize..]).into_owned();
            entries.push(FunctionEntry { code_offset, name });
        }

        Self { entries }
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }
}

/// HEAD: function entry points plus the program entry point.
#[derive(Debug, Clone, Default)]
pub struct Head {
    pub entry_point: u32,
    pub functions: Vec<u32>,
}

impl Head {
    pub fn parse(section: &Section, diags: &mut Diagnostics) -> Self {
        let functions = fixed_entries(section, 4, diags).map(BigEndian::read_u32).collect();
        Self { entry_point: section.value_offset, functions }
    }

    pub fn declares(&self, position: u32) -> bool {
        self.functions.contains(&position)
    }
}

/// CODE: the raw instruction words.
pub fn code_words(section: &Section, diags: &mut Diagnostics) -> Vec<u32> {
    let payload = &section.payload;
    let trailing = payload.len() % 4;
    if trailing != 0 {
        diags.report(
            Location::Container(section.offset + section.total_size as usize - trailing),
            DiagnosticKind::TrailingCodeBytes(trailing),
        );
    }
    payload.chunks_exact(4).map(BigEndian::read_u32).collect()
}

/// STRG: one NUL-delimited run of strings, referenced by byte offset.
#[derive(Debug, Clone)]
pub struct StringPool {
    raw: Bytes,
    decoder: Decoder,
}

impl StringPool {
    pub fn new(raw: impl Into<Bytes>, decoder: Decoder) -> Self {
        Self { raw: raw.into(), decoder }
    }

    pub fn parse(section: &Section, decoder: &Decoder) -> Self {
        Self::new(section.payload.clone(), *decoder)
    }

    /// The string starting at byte `offset`, `None` unless the offset lies
    /// inside the blob.
    pub fn get(&self, offset: usize) -> Option<String> {
        if offset >= self.len() {
            return None;
        }
        self.decoder.decode_cstr_at(&self.raw, offset).map(|s| s.into_owned())
    }

    /// Every NUL-separated piece, including the empty piece after a final NUL.
    pub fn pieces(&self) -> Vec<String> {
        self.raw.split(|b| *b == 0).map(|s| self.decoder.decode(s).into_owned()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}, {}, {}>",
            format_repr(self.x as f64),
            format_repr(self.y as f64),
            format_repr(self.z as f64)
        )
    }
}

/// VECT: constant vectors.
pub fn vectors(section: &Section, diags: &mut Diagnostics) -> Vec<Vector3> {
    fixed_entries(section, 12, diags)
        .map(|raw| Vector3 {
            x: BigEndian::read_f32(&raw[0..4]),
            y: BigEndian::read_f32(&raw[4..8]),
            z: BigEndian::read_f32(&raw[8..12]),
        })
        .collect()
}

/// GIRI entry. Index 0 is the player by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterRef {
    pub group_id: u32,
    pub resource_id: u32,
}

/// GIRI: characters referenced by the script.
pub fn characters(section: &Section, diags: &mut Diagnostics) -> Vec<CharacterRef> {
    fixed_entries(section, 8, diags)
        .map(|raw| CharacterRef {
            group_id: BigEndian::read_u32(&raw[0..4]),
            resource_id: BigEndian::read_u32(&raw[4..8]),
        })
        .collect()
}

/// GVAR: initial values of the global variables.
pub fn globals(section: &Section, diags: &mut Diagnostics) -> Vec<ScriptVar> {
    fixed_entries(section, ScriptVar::SIZE, diags)
        .filter_map(ScriptVar::parse)
        .collect()
}

/// One ARRY entry.
///
/// Header layout (big-endian):
/// - 0x00: i32 size
/// - 0x04: i32 iterator position
/// - 0x0a: i16 array number
/// - 0x10: `size` [`ScriptVar`]s
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptArray {
    pub iterator_pos: i32,
    pub array_no: i16,
    pub elements: Vec<ScriptVar>,
}

impl fmt::Display for ScriptArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.elements.iter().join(", "))
    }
}

/// ARRY: offset table followed by the array bodies.
pub fn arrays(section: &Section, diags: &mut Diagnostics) -> Vec<ScriptArray> {
    let payload = &section.payload;
    let table_len = (section.count() * 4) as i64;
    let mut out = Vec::new();

    let offsets: Vec<u32> = fixed_entries(section, 4, diags).map(BigEndian::read_u32).collect();
    for (i, off) in offsets.into_iter().enumerate() {
        let rel = off as i64 - ARRY_OFFSET_BIAS;
        if rel < table_len {
            log::debug!("ARRY[{i}]: offset 0x{off:X} points into the offset table, skipped");
            continue;
        }
        match parse_array(payload, rel as usize) {
            Some(array) => out.push(array),
            None => diags.report(
                Location::Section { tag: SectionTag::Arry, index: i },
                DiagnosticKind::TruncatedArray { offset: rel as usize },
            ),
        }
    }
    out
}

fn parse_array(payload: &[u8], at: usize) -> Option<ScriptArray> {
    let header = payload.get(at..at.checked_add(0x10)?)?;
    let size = BigEndian::read_i32(&header[0..4]).max(0) as usize;
    let iterator_pos = BigEndian::read_i32(&header[4..8]);
    let array_no = BigEndian::read_i16(&header[0x0a..0x0c]);

    let body_start = at + 0x10;
    let body = payload.get(body_start..body_start.checked_add(size.checked_mul(ScriptVar::SIZE)?)?)?;
    let elements = body.chunks_exact(ScriptVar::SIZE).filter_map(ScriptVar::parse).collect();

    Some(ScriptArray { iterator_pos, array_no, elements })
}
