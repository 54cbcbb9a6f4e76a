use std::path::Path;

use anyhow::Context;
use bytes::Bytes;
use tcod_nls::Decoder;

use crate::container::{ScriptProgram, SectionTag};
use crate::decode::{decode_code, DecodeContext, Instruction};
use crate::diag::{Diagnostic, Diagnostics};
use crate::error::LoadResult;
use crate::labels::LabelTable;
use crate::names::{NameTable, StdNames};
use crate::sections::{self, CharacterRef, FunctionTable, Head, ScriptArray, StringPool, Vector3};
use crate::variant::ScriptVar;

/// A fully decoded script file: the raw sections, their parsed views, the
/// instruction stream and the frozen label table.
pub struct Script {
    program: ScriptProgram,
    pub(crate) names: &'static dyn NameTable,
    pub(crate) ftbl: Option<FunctionTable>,
    pub(crate) head: Head,
    pub(crate) strings: Option<StringPool>,
    pub(crate) vectors: Option<Vec<Vector3>>,
    pub(crate) characters: Option<Vec<CharacterRef>>,
    pub(crate) globals: Option<Vec<ScriptVar>>,
    pub(crate) arrays: Option<Vec<ScriptArray>>,
    word_count: usize,
    instructions: Vec<Instruction>,
    labels: LabelTable,
    diagnostics: Vec<Diagnostic>,
}

impl Script {
    pub fn load(buf: impl Into<Bytes>, decoder: Decoder) -> LoadResult<Self> {
        Self::load_with(buf, decoder, StdNames::get())
    }

    pub fn load_with(buf: impl Into<Bytes>, decoder: Decoder, names: &'static dyn NameTable) -> LoadResult<Self> {
        let mut diags = Diagnostics::new();
        let program = ScriptProgram::load(buf.into(), &mut diags)?;

        let head = Head::parse(program.require(SectionTag::Head)?, &mut diags);
        let words = sections::code_words(program.require(SectionTag::Code)?, &mut diags);

        let ftbl = program
            .section(SectionTag::Ftbl)
            .map(|s| FunctionTable::parse(s, &decoder, &mut diags));
        let strings = program.section(SectionTag::Strg).map(|s| StringPool::parse(s, &decoder));
        let vectors = program.section(SectionTag::Vect).map(|s| sections::vectors(s, &mut diags));
        let characters = program
            .section(SectionTag::Giri)
            .map(|s| sections::characters(s, &mut diags));
        let globals = program.section(SectionTag::Gvar).map(|s| sections::globals(s, &mut diags));
        let arrays = program.section(SectionTag::Arry).map(|s| sections::arrays(s, &mut diags));

        let mut labels = LabelTable::seed(ftbl.as_ref(), &head);
        let ctx = DecodeContext {
            word_count: words.len(),
            head: &head,
            names,
            strings: strings.as_ref(),
            vectors: vectors.as_deref(),
        };
        let instructions = decode_code(&words, &ctx, &mut labels, &mut diags)?;

        Ok(Self {
            program,
            names,
            ftbl,
            head,
            strings,
            vectors,
            characters,
            globals,
            arrays,
            word_count: words.len(),
            instructions,
            labels,
            diagnostics: diags.into_vec(),
        })
    }

    pub fn open(path: impl AsRef<Path>, decoder: Decoder) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let buf = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let script = Self::load(buf, decoder).with_context(|| format!("loading {}", path.display()))?;
        Ok(script)
    }

    pub fn program(&self) -> &ScriptProgram {
        &self.program
    }

    pub fn functions(&self) -> &[sections::FunctionEntry] {
        self.ftbl.as_ref().map(|t| t.entries.as_slice()).unwrap_or_default()
    }

    pub fn vectors(&self) -> &[Vector3] {
        self.vectors.as_deref().unwrap_or_default()
    }

    pub fn characters(&self) -> &[CharacterRef] {
        self.characters.as_deref().unwrap_or_default()
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn names(&self) -> &dyn NameTable {
        self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::test_util::ContainerBuilder;

    #[test]
    fn three_byte_buffer() {
        let err = Script::load(vec![b'T', b'C', b'O'], Decoder::default()).err();
        assert_eq!(err, Some(LoadError::TruncatedContainerHeader { need: 0x10, len: 3 }));
    }

    #[test]
    fn head_and_code_are_mandatory() {
        let buf = ContainerBuilder::new().code(&[0x0800_0000]).build();
        let err = Script::load(buf, Decoder::default()).err();
        assert_eq!(err, Some(LoadError::MissingSection(SectionTag::Head)));

        let buf = ContainerBuilder::new().head(0, &[]).build();
        let err = Script::load(buf, Decoder::default()).err();
        assert_eq!(err, Some(LoadError::MissingSection(SectionTag::Code)));
    }

    #[test]
    fn call_to_entry_point_keeps_start_label() {
        let buf = ContainerBuilder::new()
            .head(1, &[1])
            .code(&[0x0700_0001, 0x0700_0001, 0x0800_0000])
            .build();
        let script = Script::load(buf, Decoder::default()).unwrap();
        assert_eq!(script.labels().get(1), Some("__start"));
        assert_eq!(script.labels().len(), 1);
        assert_eq!(script.instructions().len(), 3);
        assert_eq!(script.diagnostics().count(), 0);
    }
}
