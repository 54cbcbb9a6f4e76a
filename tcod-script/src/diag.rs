//! Recoverable findings. None of these stop loading; the affected element
//! is still rendered with a numeric fallback.

use std::fmt;

use crate::container::SectionTag;

/// Where a diagnostic was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Byte offset in the container.
    Container(usize),
    /// Element `index` of a section's parsed table.
    Section { tag: SectionTag, index: usize },
    /// Word position in CODE.
    Word(u32),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Container(off) => write!(f, "container+0x{off:X}"),
            Location::Section { tag, index } => write!(f, "{tag}[{index}]"),
            Location::Word(pos) => write!(f, "instruction #0x{pos:x}"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("missing TCOD magic (found {found:02X?})")]
    MissingMagic { found: Vec<u8> },

    #[error("section is 0x{size:X} bytes, smaller than its 0x20-byte header")]
    UndersizedSection { size: u32 },

    #[error("table declares {declared} entries but the payload only holds {available}")]
    TruncatedTable { declared: usize, available: usize },

    #[error("array at payload offset 0x{offset:X} does not fit in the payload")]
    TruncatedArray { offset: usize },

    #[error("CODE payload has {0} trailing bytes that do not form a word")]
    TrailingCodeBytes(usize),

    #[error("illegal opcode {0}")]
    IllegalOpcode(u8),

    #[error("invalid operator {0}")]
    InvalidOperator(u8),

    #[error("ldimm does not support immediate type {0}")]
    UnsupportedImmediate(u8),

    #[error("negative string offset {0}")]
    NegativeStringOffset(i16),

    #[error("string offset {0} is past the end of STRG")]
    StringOffsetOutOfRange(i16),

    #[error("negative vector id {0}")]
    NegativeVectorIndex(i16),

    #[error("vector id {0} is past the end of VECT")]
    VectorIndexOutOfRange(i16),

    #[error("negative global var id {0}")]
    NegativeGlobalIndex(i16),

    #[error("$lastResult accessed with non-zero id {0}")]
    NonZeroLastResult(i16),

    #[error("invalid special variable id {0}")]
    InvalidSpecialVariable(i16),

    #[error("cannot change immutable reference")]
    ImmutableReference,

    #[error("out-of-range vector coordinate index {0}")]
    VectorCoordOutOfRange(u8),

    #[error("invalid vector storage level {0}")]
    InvalidVectorStorage(u8),

    #[error("{mnemonic} destination 0x{target:x} is out of range")]
    TargetOutOfRange { mnemonic: &'static str, target: u32 },

    #[error("call to unreferenced function 0x{0:x}")]
    UnreferencedCall(u32),

    #[error("invalid class id {0}")]
    UnknownClass(u8),

    #[error("function {class}::{function} has conflicting definitions, using the last one")]
    AmbiguousFunction { class: u8, function: i16 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub location: Location,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(location: Location, kind: DiagnosticKind) -> Self {
        Self { location, kind }
    }

    pub fn at_word(position: u32, kind: DiagnosticKind) -> Self {
        Self::new(Location::Word(position), kind)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

/// Ordered sink for diagnostics. Every entry is also forwarded to `log`.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diag: Diagnostic) {
        log::warn!("{diag}");
        self.items.push(diag);
    }

    pub fn report(&mut self, location: Location, kind: DiagnosticKind) {
        self.push(Diagnostic::new(location, kind));
    }

    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for d in diags {
            self.push(d);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
