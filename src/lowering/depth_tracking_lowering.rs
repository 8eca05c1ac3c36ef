//! Depth Tracking Lowering
//!
//! Keyword-driven depth counters for multi-line constructs. Delimiters are
//! recognized as whole words only, and never inside comments or string
//! literals, so `endcase` is not an `end` and `$display("begin")` opens
//! nothing.

use crate::helpers::{split_line_comment, strip_block_comments, words};

/// Opening and closing keywords of one kind of block
#[derive(Debug, Clone, Copy)]
pub struct Delimiters {
    pub openers: &'static [&'static str],
    pub closers: &'static [&'static str],
    /// Words that turn a following opener into a plain statement
    pub statement_prefixes: &'static [&'static str],
}

/// Statement blocks inside procedural code
pub const PROCEDURAL_DELIMITERS: Delimiters = Delimiters {
    openers: &["begin", "case", "casex", "casez", "fork"],
    closers: &["end", "endcase", "join", "join_any", "join_none"],
    // `wait fork;` and `disable fork;`
    statement_prefixes: &["wait", "disable"],
};

pub const GENERATE_DELIMITERS: Delimiters = Delimiters {
    openers: &["generate"],
    closers: &["endgenerate"],
    statement_prefixes: &[],
};

pub const FUNCTION_DELIMITERS: Delimiters = Delimiters {
    openers: &["function"],
    closers: &["endfunction"],
    statement_prefixes: &[],
};

pub const TASK_DELIMITERS: Delimiters = Delimiters {
    openers: &["task"],
    closers: &["endtask"],
    statement_prefixes: &[],
};

/// Blank out the contents of `"..."` string literals
pub fn strip_string_literals(code: &str) -> String {
    let mut result = String::with_capacity(code.len());
    let mut in_string = false;
    let mut escape_next = false;

    for c in code.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }
        if in_string {
            match c {
                '\\' => escape_next = true,
                '"' => {
                    in_string = false;
                    result.push('"');
                }
                _ => {}
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        }
        result.push(c);
    }

    result
}

/// Code part of a line: no comments, no string contents
pub fn code_only(line: &str) -> String {
    let no_block = strip_block_comments(line);
    strip_string_literals(split_line_comment(&no_block).0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Open,
    Close,
}

/// Delimiter keywords of `code` in the order they appear
fn delimiters_in<'a>(code: &'a str, delims: &'a Delimiters) -> impl Iterator<Item = Delimiter> + 'a {
    let mut prev: Option<&str> = None;
    words(code).filter_map(move |word| {
        let after_prefix = prev.map_or(false, |p| delims.statement_prefixes.contains(&p));
        prev = Some(word);
        if delims.openers.contains(&word) && !after_prefix {
            Some(Delimiter::Open)
        } else if delims.closers.contains(&word) {
            Some(Delimiter::Close)
        } else {
            None
        }
    })
}

/// Opening and closing keyword counts on one line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelimiterCount {
    pub opens: usize,
    pub closes: usize,
}

/// Count `delims` keywords on the code part of a line
pub fn count_delimiters(line: &str, delims: &Delimiters) -> DelimiterCount {
    let code = code_only(line);
    let mut count = DelimiterCount::default();
    for delim in delimiters_in(&code, delims) {
        match delim {
            Delimiter::Open => count.opens += 1,
            Delimiter::Close => count.closes += 1,
        }
    }
    count
}

/// A closing keyword appeared with nothing open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Underflow;

/// Running nesting depth for one kind of block.
///
/// Keywords are applied in the order they appear on the line, so
/// `end else begin` keeps a depth of one. The depth never goes below zero:
/// a stray closer reports [`Underflow`] instead.
#[derive(Debug, Clone)]
pub struct BlockDepth {
    delims: Delimiters,
    depth: usize,
    opened: bool,
}

impl BlockDepth {
    pub fn new(delims: Delimiters) -> Self {
        BlockDepth {
            delims,
            depth: 0,
            opened: false,
        }
    }

    pub fn feed(&mut self, line: &str) -> Result<(), Underflow> {
        let code = code_only(line);
        for delim in delimiters_in(&code, &self.delims) {
            match delim {
                Delimiter::Open => {
                    self.depth += 1;
                    self.opened = true;
                }
                Delimiter::Close => {
                    self.depth = self.depth.checked_sub(1).ok_or(Underflow)?;
                }
            }
        }
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True once any opener has been seen
    pub fn has_opened(&self) -> bool {
        self.opened
    }

    /// True when something was opened and everything is closed again
    pub fn is_closed(&self) -> bool {
        self.opened && self.depth == 0
    }
}
