//! Instantiation Matching Lowering
//!
//! Speculatively recognizes a module instantiation:
//!
//! ```text
//! adder #(
//!   .W(8)
//! ) add0 (
//!   .a(x),
//!   .b(y)
//! );
//! ```
//!
//! The matcher is a pure function over the input lines. It walks the
//! comment-stripped characters through an explicit state machine and either
//! returns the bounded line range or `None`, never touching caller state.

use crate::ast::{InstantiationBlock, SourceLine};
use crate::helpers::{cleaned_no_comments, is_ident_start, is_word_char};

/// Maximum number of lines one instantiation may span
pub const DEFAULT_LOOKAHEAD: usize = 300;

/// Words that can never name an instantiated definition
pub const RESERVED_KEYWORDS: &[&str] = &[
    // declarations
    "input", "output", "inout", "ref", "wire", "reg", "logic", "bit", "byte",
    "int", "integer", "shortint", "longint", "real", "time", "string", "genvar",
    "var", "const", "static", "automatic", "signed", "unsigned", "typedef",
    "struct", "union", "enum", "parameter", "localparam", "defparam",
    "specparam", "supply0", "supply1", "tri", "uwire", "wand", "wor", "event",
    "import", "export", "modport", "clocking", "virtual",
    // statements
    "assign", "deassign", "force", "release", "if", "else", "for", "foreach",
    "while", "do", "repeat", "forever", "case", "casex", "casez", "endcase",
    "begin", "end", "fork", "join", "join_any", "join_none", "return", "wait",
    "disable", "default", "assert", "assume", "cover", "property", "sequence",
    "endproperty", "endsequence",
    // regions and blocks
    "always", "always_ff", "always_comb", "always_latch", "initial", "final",
    "generate", "endgenerate", "function", "endfunction", "task", "endtask",
    "module", "endmodule", "macromodule", "interface", "endinterface",
    "package", "endpackage", "program", "endprogram", "class", "endclass",
];

pub fn is_reserved_keyword(word: &str) -> bool {
    RESERVED_KEYWORDS.contains(&word)
}

//=============================================================================
// STATE MACHINE
//=============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchState {
    /// Waiting for the referenced definition name
    ExpectDefinitionName,
    /// After the definition name: `#(` or the instance name
    MaybeParameterList,
    /// Saw `#`, waiting for `(`
    ExpectParameterOpen,
    /// Inside `#( ... )`
    ParameterList { depth: usize },
    /// Waiting for the instance name
    ExpectInstanceName,
    /// After the instance name: `[range]` or `(`
    AfterInstanceName,
    /// Inside an instance array range `[ ... ]`
    InstanceRange { depth: usize },
    /// Inside the port connection list
    ConsumingPortList { depth: usize },
    /// Port list closed, waiting for `;`
    ExpectTerminator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug)]
struct InstanceScanner {
    state: MatchState,
    ident: String,
    module_name: String,
    instance_name: String,
    in_block_comment: bool,
    in_string: bool,
    escape_next: bool,
}

impl InstanceScanner {
    fn new() -> Self {
        InstanceScanner {
            state: MatchState::ExpectDefinitionName,
            ident: String::new(),
            module_name: String::new(),
            instance_name: String::new(),
            in_block_comment: false,
            in_string: false,
            escape_next: false,
        }
    }

    fn in_list(&self) -> bool {
        matches!(
            self.state,
            MatchState::ParameterList { .. } | MatchState::ConsumingPortList { .. }
        )
    }

    /// Feed one source line; a line break counts as whitespace
    fn feed_line(&mut self, text: &str) -> Step {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if self.in_block_comment {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    self.in_block_comment = false;
                }
                continue;
            }

            if self.in_string {
                if self.escape_next {
                    self.escape_next = false;
                } else if c == '\\' {
                    self.escape_next = true;
                } else if c == '"' {
                    self.in_string = false;
                }
                continue;
            }

            if c == '/' && chars.peek() == Some(&'/') {
                break;
            }
            if c == '/' && chars.peek() == Some(&'*') {
                chars.next();
                self.in_block_comment = true;
                match self.step(' ') {
                    Step::Pending => continue,
                    done => return done,
                }
            }
            if c == '"' {
                if !self.in_list() {
                    return Step::Rejected;
                }
                self.in_string = true;
                continue;
            }

            match self.step(c) {
                Step::Pending => {}
                done => return done,
            }
        }
        self.step('\n')
    }

    /// Finish a pending identifier; `None` if it is reserved
    fn take_ident(&mut self) -> Option<String> {
        let word = std::mem::take(&mut self.ident);
        if is_reserved_keyword(&word) {
            None
        } else {
            Some(word)
        }
    }

    fn step(&mut self, c: char) -> Step {
        match self.state {
            MatchState::ExpectDefinitionName | MatchState::ExpectInstanceName => {
                if !self.ident.is_empty() {
                    if is_word_char(c) {
                        self.ident.push(c);
                        return Step::Pending;
                    }
                    let Some(word) = self.take_ident() else {
                        return Step::Rejected;
                    };
                    if self.state == MatchState::ExpectDefinitionName {
                        self.module_name = word;
                        self.state = MatchState::MaybeParameterList;
                    } else {
                        self.instance_name = word;
                        self.state = MatchState::AfterInstanceName;
                    }
                    return self.step(c);
                }
                if c.is_whitespace() {
                    Step::Pending
                } else if is_ident_start(c) {
                    self.ident.push(c);
                    Step::Pending
                } else {
                    Step::Rejected
                }
            }

            MatchState::MaybeParameterList => {
                if c.is_whitespace() {
                    Step::Pending
                } else if c == '#' {
                    self.state = MatchState::ExpectParameterOpen;
                    Step::Pending
                } else if is_ident_start(c) {
                    self.state = MatchState::ExpectInstanceName;
                    self.step(c)
                } else {
                    Step::Rejected
                }
            }

            MatchState::ExpectParameterOpen => {
                if c.is_whitespace() {
                    Step::Pending
                } else if c == '(' {
                    self.state = MatchState::ParameterList { depth: 1 };
                    Step::Pending
                } else {
                    Step::Rejected
                }
            }

            MatchState::ParameterList { depth } => match c {
                '(' => {
                    self.state = MatchState::ParameterList { depth: depth + 1 };
                    Step::Pending
                }
                ')' if depth == 1 => {
                    self.state = MatchState::ExpectInstanceName;
                    Step::Pending
                }
                ')' => {
                    self.state = MatchState::ParameterList { depth: depth - 1 };
                    Step::Pending
                }
                ';' => Step::Rejected,
                _ => Step::Pending,
            },

            MatchState::AfterInstanceName => {
                if c.is_whitespace() {
                    Step::Pending
                } else if c == '[' {
                    self.state = MatchState::InstanceRange { depth: 1 };
                    Step::Pending
                } else if c == '(' {
                    self.state = MatchState::ConsumingPortList { depth: 1 };
                    Step::Pending
                } else {
                    Step::Rejected
                }
            }

            MatchState::InstanceRange { depth } => match c {
                '[' => {
                    self.state = MatchState::InstanceRange { depth: depth + 1 };
                    Step::Pending
                }
                ']' if depth == 1 => {
                    self.state = MatchState::AfterInstanceName;
                    Step::Pending
                }
                ']' => {
                    self.state = MatchState::InstanceRange { depth: depth - 1 };
                    Step::Pending
                }
                ';' => Step::Rejected,
                _ => Step::Pending,
            },

            MatchState::ConsumingPortList { depth } => match c {
                '(' => {
                    self.state = MatchState::ConsumingPortList { depth: depth + 1 };
                    Step::Pending
                }
                ')' if depth == 1 => {
                    self.state = MatchState::ExpectTerminator;
                    Step::Pending
                }
                ')' => {
                    self.state = MatchState::ConsumingPortList { depth: depth - 1 };
                    Step::Pending
                }
                ';' => Step::Rejected,
                _ => Step::Pending,
            },

            MatchState::ExpectTerminator => {
                if c.is_whitespace() {
                    Step::Pending
                } else if c == ';' {
                    Step::Accepted
                } else {
                    Step::Rejected
                }
            }
        }
    }
}

//=============================================================================
// MATCHER
//=============================================================================

/// Try to match an instantiation starting at `lines[start]`.
///
/// Scans at most `window` lines. The start line must carry code. On success
/// the block's `range` covers every consumed line, up to and including the one
/// holding the terminating `;`.
pub fn match_instantiation(
    lines: &[SourceLine<'_>],
    start: usize,
    window: usize,
) -> Option<InstantiationBlock> {
    let first = lines.get(start)?;
    if cleaned_no_comments(first.text).trim().is_empty() {
        return None;
    }

    let limit = start.saturating_add(window.max(1)).min(lines.len());
    let mut scanner = InstanceScanner::new();

    for idx in start..limit {
        match scanner.feed_line(lines[idx].text) {
            Step::Pending => {}
            Step::Rejected => return None,
            Step::Accepted => {
                return Some(InstantiationBlock {
                    module_name: scanner.module_name,
                    instance_name: scanner.instance_name,
                    range: start..idx + 1,
                });
            }
        }
    }

    None
}

/// Every instantiation inside `region`, scanning line by line.
///
/// A matched instantiation is skipped as a whole; lines that do not start
/// one are stepped over individually.
pub fn find_instantiations(lines: &[SourceLine<'_>], window: usize) -> Vec<InstantiationBlock> {
    let mut found = Vec::new();
    let mut cursor = 0;
    while cursor < lines.len() {
        match match_instantiation(lines, cursor, window) {
            Some(block) => {
                cursor = block.range.end;
                found.push(block);
            }
            None => cursor += 1,
        }
    }
    found
}
