//! Source lines and extracted blocks
//!
//! The translator never builds a syntax tree. Each handler extracts a
//! contiguous run of lines as one of the block types below, renders it, and
//! drops it.

use std::ops::Range;

/// One input line and its zero-based index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub index: usize,
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    pub fn new(index: usize, text: &'a str) -> Self {
        SourceLine { index, text }
    }

    /// One-based line number for diagnostics
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Split source text into lines
pub fn source_lines(source: &str) -> Vec<SourceLine<'_>> {
    source
        .lines()
        .enumerate()
        .map(|(index, text)| SourceLine::new(index, text))
        .collect()
}

/// Texts of a run of lines
pub fn texts<'a>(lines: &[SourceLine<'a>]) -> Vec<&'a str> {
    lines.iter().map(|l| l.text).collect()
}

/// `typedef enum ... { ... } name;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumBlock {
    pub type_name: String,
    pub bit_width: u32,
    pub enumerators: Vec<String>,
    /// Cursor index just past the block
    pub end: usize,
}

/// `module_name #(...) instance_name (...);`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantiationBlock {
    pub module_name: String,
    pub instance_name: String,
    /// Consumed lines, relative to the slice the matcher was given
    pub range: Range<usize>,
}

/// `generate ... endgenerate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateBlock<'a> {
    pub inferred_label: Option<String>,
    pub raw_lines: Vec<SourceLine<'a>>,
    pub nested_instantiations: Vec<InstantiationBlock>,
}

/// Kind of procedural block, named after its keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProceduralKind {
    Always,
    AlwaysFf,
    AlwaysComb,
    AlwaysLatch,
    Initial,
}

impl ProceduralKind {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "always" => Some(ProceduralKind::Always),
            "always_ff" => Some(ProceduralKind::AlwaysFf),
            "always_comb" => Some(ProceduralKind::AlwaysComb),
            "always_latch" => Some(ProceduralKind::AlwaysLatch),
            "initial" => Some(ProceduralKind::Initial),
            _ => None,
        }
    }

    /// Stub name used when the block carries no label
    pub fn default_label(&self) -> &'static str {
        match self {
            ProceduralKind::Always => "always",
            ProceduralKind::AlwaysFf => "always_ff",
            ProceduralKind::AlwaysComb => "always_comb",
            ProceduralKind::AlwaysLatch => "always_latch",
            ProceduralKind::Initial => "initial",
        }
    }
}

/// `always* ... ` / `initial ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProceduralBlock<'a> {
    pub kind: ProceduralKind,
    pub label: String,
    pub raw_lines: Vec<SourceLine<'a>>,
}

/// Subroutine flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    Function,
    Task,
}

impl SubroutineKind {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "function" => Some(SubroutineKind::Function),
            "task" => Some(SubroutineKind::Task),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SubroutineKind::Function => "function",
            SubroutineKind::Task => "task",
        }
    }
}

/// `function ... endfunction` / `task ... endtask`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionBlock<'a> {
    pub kind: SubroutineKind,
    pub name: String,
    pub raw_lines: Vec<SourceLine<'a>>,
}

/// `assign target = expression;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignBlock {
    /// Base identifier of the target
    pub target_name: String,
    /// Target as written, including any bit or part select
    pub target: String,
    pub raw_expression: String,
    /// Cursor index just past the statement
    pub end: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_lines() {
        let lines = source_lines("a\n\nb");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], SourceLine::new(2, "b"));
        assert_eq!(lines[2].number(), 3);
        assert_eq!(texts(&lines), vec!["a", "", "b"]);
    }

    #[test]
    fn test_procedural_kind() {
        assert_eq!(ProceduralKind::from_keyword("always_ff"), Some(ProceduralKind::AlwaysFf));
        assert_eq!(ProceduralKind::from_keyword("always_x"), None);
        assert_eq!(ProceduralKind::Initial.default_label(), "initial");
    }
}
