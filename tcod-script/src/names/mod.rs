//! Operator and standard-function names.
//!
//! The decoder only ever asks through [`NameTable`]; a miss is never an
//! error, callers fall back to the numeric id.

mod table;

use std::collections::{BTreeMap, HashMap};

pub use table::{ClassInfo, FunctionInfo, OperatorInfo, CLASSES, OPERATORS};

pub trait NameTable {
    fn lookup_operator(&self, id: u8) -> Option<&str>;

    /// Name of a standard class. Class 0 has an empty name.
    fn lookup_class(&self, class_id: u8) -> Option<&str>;

    /// `(class name, function name)` of a `callstd` target.
    fn lookup_function(&self, class_id: u8, func_id: i16) -> Option<(&str, &str)>;

    /// Whether several conflicting definitions share this id.
    fn is_ambiguous(&self, _class_id: u8, _func_id: i16) -> bool {
        false
    }
}

/// Several definitions declared under one `(class, function)` id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub class_id: u8,
    pub func_id: i32,
    /// Every definition in declaration order; the last one is used.
    pub definitions: Vec<FunctionInfo>,
}

/// Lookup over the built-in tables, built once.
#[derive(Debug)]
pub struct StdNames {
    operators: HashMap<u8, &'static OperatorInfo>,
    classes: HashMap<u8, &'static ClassInfo>,
    functions: HashMap<(u8, i32), &'static FunctionInfo>,
    ambiguities: Vec<Ambiguity>,
}

lazy_static::lazy_static! {
    static ref STD_NAMES: StdNames = StdNames::build(OPERATORS, CLASSES);
}

impl StdNames {
    pub fn get() -> &'static StdNames {
        &STD_NAMES
    }

    pub fn build(operators: &'static [OperatorInfo], classes: &'static [ClassInfo]) -> Self {
        let operators = operators.iter().map(|o| (o.index, o)).collect();

        let mut by_class = HashMap::new();
        let mut functions = HashMap::new();
        let mut seen: BTreeMap<(u8, i32), Vec<FunctionInfo>> = BTreeMap::new();
        for class in classes {
            by_class.insert(class.index, class);
            for func in class.funcs {
                // last declared wins
                functions.insert((class.index, func.index), func);
                seen.entry((class.index, func.index)).or_default().push(*func);
            }
        }

        let ambiguities = seen
            .into_iter()
            .filter(|(_, defs)| defs.windows(2).any(|w| w[0] != w[1]))
            .map(|((class_id, func_id), definitions)| Ambiguity { class_id, func_id, definitions })
            .collect();

        Self { operators, classes: by_class, functions, ambiguities }
    }

    pub fn ambiguities(&self) -> &[Ambiguity] {
        &self.ambiguities
    }
}

impl NameTable for StdNames {
    fn lookup_operator(&self, id: u8) -> Option<&str> {
        self.operators.get(&id).map(|o| o.name)
    }

    fn lookup_class(&self, class_id: u8) -> Option<&str> {
        self.classes.get(&class_id).map(|c| c.name)
    }

    fn lookup_function(&self, class_id: u8, func_id: i16) -> Option<(&str, &str)> {
        let class = self.classes.get(&class_id)?;
        let func = self.functions.get(&(class_id, func_id as i32))?;
        Some((class.name, func.name))
    }

    fn is_ambiguous(&self, class_id: u8, func_id: i16) -> bool {
        self.ambiguities
            .iter()
            .any(|a| a.class_id == class_id && a.func_id == func_id as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators() {
        let names = StdNames::get();
        assert_eq!(names.lookup_operator(35), Some("add"));
        assert_eq!(names.lookup_operator(53), Some("neq"));
        assert_eq!(names.lookup_operator(0), None);
    }

    #[test]
    fn functions() {
        let names = StdNames::get();
        assert_eq!(names.lookup_function(0, 137), Some(("", "rand")));
        assert_eq!(names.lookup_function(40, 17), Some(("Dialogs", "displayMsgBox")));
        assert_eq!(names.lookup_function(40, 18), None);
        assert_eq!(names.lookup_class(47), Some("Sound"));
        assert_eq!(names.lookup_function(99, 16), None);
    }

    #[test]
    fn conflicting_entries_resolve_last_and_are_flagged() {
        let names = StdNames::get();
        assert_eq!(names.lookup_function(37, 16), Some(("Pokemon", "playCry")));
        assert_eq!(names.lookup_function(0, 154), Some(("", "GCComListenerDestroy")));
        assert_eq!(names.lookup_function(52, 22), Some(("Daycare", "getPkm")));
        assert!(names.is_ambiguous(37, 16));
        assert!(names.is_ambiguous(0, 155));
        assert!(!names.is_ambiguous(0, 149));

        let ids: Vec<_> = names.ambiguities().iter().map(|a| (a.class_id, a.func_id)).collect();
        assert_eq!(ids, vec![(0, 154), (0, 155), (37, 16), (52, 22)]);
    }
}
