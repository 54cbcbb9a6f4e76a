use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::decode::Instruction;
use crate::sections::{FunctionTable, Head};

pub const ENTRY_LABEL: &str = "__start";

/// Position to name. A position is named at most once; later writers
/// never replace an existing name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: BTreeMap<u32, String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared FTBL names first, then the HEAD entry point.
    pub fn seed(ftbl: Option<&FunctionTable>, head: &Head) -> Self {
        let mut table = Self::new();
        if let Some(ftbl) = ftbl {
            for entry in &ftbl.entries {
                table.assign(entry.code_offset, entry.name.clone());
            }
        }
        table.assign(head.entry_point, ENTRY_LABEL);
        table
    }

    pub fn get(&self, position: u32) -> Option<&str> {
        self.labels.get(&position).map(String::as_str)
    }

    /// Returns whether the name was taken.
    pub fn assign(&mut self, position: u32, name: impl Into<String>) -> bool {
        match self.labels.entry(position) {
            Entry::Vacant(slot) => {
                slot.insert(name.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Names the target of an in-range control-flow instruction, and the
    /// fall-through position of a branch.
    pub fn observe(&mut self, insn: &Instruction, word_count: usize) {
        let Some(target) = insn.target() else {
            return;
        };
        if target as usize >= word_count {
            return;
        }

        let prefix = if insn.is_call() { "sub" } else { "loc" };
        self.assign(target, format!("{prefix}_{target:x}"));

        if insn.is_branch() {
            let next = insn.position + 1;
            if (next as usize) < word_count {
                self.assign(next, format!("loc_{next:x}"));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.labels.iter().map(|(pos, name)| (*pos, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
