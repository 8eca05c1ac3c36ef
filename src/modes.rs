//! Mode tracking structures for the hdldoc translator
//!
//! Contains context tracking for multi-line modes and scopes:
//! - BlockCommentMode: inside a `/** ... */` or `/*! ... */` comment
//! - NameScope: stub names already used inside one generate region

use std::collections::HashSet;

//===========================================================================
// BLOCK COMMENT MODE
// While active, every line passes through verbatim until `*/` is seen.
//===========================================================================

#[derive(Debug, Clone, Default)]
pub struct BlockCommentMode {
    active: bool,
}

impl BlockCommentMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enter on an opening line. Stays inactive if the line also closes.
    pub fn enter(&mut self, opening_line: &str) {
        let trimmed = opening_line.trim_start();
        let after_open = trimmed.get(3..).unwrap_or("");
        self.active = !after_open.contains("*/");
    }

    /// Feed a line seen while active; leaves the mode on `*/`
    pub fn observe(&mut self, line: &str) {
        if line.contains("*/") {
            self.active = false;
        }
    }
}

/// Check if a trimmed line opens a documentation block comment
pub fn is_doc_block_comment_start(trimmed: &str) -> bool {
    trimmed.starts_with("/*!") || trimmed.starts_with("/**")
}

/// Check if a trimmed line is a `///` documentation comment
pub fn is_doc_line_comment(trimmed: &str) -> bool {
    trimmed.starts_with("///")
}

//===========================================================================
// NAME SCOPE
// Disambiguates stub names inside one generate region: the first use keeps
// its name, later collisions get `_2`, `_3`, ... until free.
//===========================================================================

#[derive(Debug, Clone, Default)]
pub struct NameScope {
    used: HashSet<String>,
}

impl NameScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `name`, or the first free suffixed variant of it
    pub fn claim(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        if self.used.contains(&candidate) {
            let mut suffix = 2;
            loop {
                candidate = format!("{}_{}", name, suffix);
                if !self.used.contains(&candidate) {
                    break;
                }
                suffix += 1;
            }
        }
        self.used.insert(candidate.clone());
        candidate
    }
}
