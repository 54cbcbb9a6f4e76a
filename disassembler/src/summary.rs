use serde::Serialize;
use tcod_script::sections::{CharacterRef, FunctionEntry, Vector3};
use tcod_script::Script;

#[derive(Debug, Serialize)]
pub struct SectionSummary {
    pub tag: String,
    pub offset: usize,
    pub size: u32,
    pub element_count: i32,
}

/// Machine-readable overview of one disassembled file.
#[derive(Debug, Serialize)]
pub struct ScriptSummary<'a> {
    pub total_size: u32,
    pub entry_point: u32,
    pub sections: Vec<SectionSummary>,
    pub functions: &'a [FunctionEntry],
    pub vectors: &'a [Vector3],
    pub characters: &'a [CharacterRef],
    pub word_count: usize,
    pub instruction_count: usize,
    pub label_count: usize,
    pub diagnostics: Vec<String>,
}

impl<'a> ScriptSummary<'a> {
    pub fn new(script: &'a Script) -> Self {
        let program = script.program();
        Self {
            total_size: program.total_size,
            entry_point: script.head().entry_point,
            sections: program
                .sections()
                .iter()
                .map(|s| SectionSummary {
                    tag: s.tag.to_string(),
                    offset: s.offset,
                    size: s.total_size,
                    element_count: s.element_count,
                })
                .collect(),
            functions: script.functions(),
            vectors: script.vectors(),
            characters: script.characters(),
            word_count: script.word_count(),
            instruction_count: script.instructions().len(),
            label_count: script.labels().len(),
            diagnostics: script.diagnostics().map(|d| d.to_string()).collect(),
        }
    }
}
