pub mod container;
pub mod decode;
pub mod diag;
pub mod error;
pub mod fmt;
pub mod labels;
pub mod names;
pub mod namespace;
pub mod opcode;
pub mod render;
pub mod script;
pub mod sections;
pub mod variant;

#[cfg(test)]
mod test_util;

pub use container::{ScriptProgram, Section, SectionTag};
pub use decode::{Immediate, Instruction, Op};
pub use diag::{Diagnostic, DiagnosticKind, Location};
pub use error::{LoadError, LoadResult};
pub use labels::LabelTable;
pub use names::{NameTable, StdNames};
pub use script::Script;
pub use tcod_nls::{Decoder, Encoding};
