//! Look-ahead Lowering Utilities
//!
//! Functions that peek at neighbouring lines to name a block.

use crate::ast::{ProceduralKind, SourceLine};
use crate::helpers::{find_begin_label, first_word, split_line_comment, starts_with_keyword};

/// Label of a `begin : label` that opens the line after `idx`
pub fn check_next_line_begin_label<'a>(lines: &[SourceLine<'a>], idx: usize) -> Option<&'a str> {
    let next = lines.get(idx + 1)?.text;
    if !starts_with_keyword(next, "begin") {
        return None;
    }
    find_begin_label(next)
}

/// Label of a procedural block whose header is `lines[idx]`.
///
/// Prefers an inline `begin : label` on the header, then one opening the next
/// line. `None` means the caller should fall back to the kind's default.
pub fn procedural_label<'a>(lines: &[SourceLine<'a>], idx: usize) -> Option<&'a str> {
    let header = lines.get(idx)?.text;
    let keyword = first_word(header)?;
    let keyword_end = header.find(keyword)? + keyword.len();
    let tail = &header[keyword_end..];

    find_begin_label(split_line_comment(tail).0).or_else(|| check_next_line_begin_label(lines, idx))
}

/// Kind of procedural block opened by `line`, if any
pub fn procedural_kind(line: &str) -> Option<ProceduralKind> {
    first_word(line).and_then(ProceduralKind::from_keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::source_lines;

    #[test]
    fn test_check_next_line_begin_label() {
        let lines = source_lines("always_comb\n  begin : next_state\n  end");
        assert_eq!(check_next_line_begin_label(&lines, 0), Some("next_state"));
        assert_eq!(check_next_line_begin_label(&lines, 1), None);
        assert_eq!(check_next_line_begin_label(&lines, 2), None);
    }

    #[test]
    fn test_procedural_label_inline() {
        let lines = source_lines("always_ff @(posedge clk) begin : regs\nend");
        assert_eq!(procedural_label(&lines, 0), Some("regs"));
    }

    #[test]
    fn test_procedural_label_ignores_commented_label() {
        let lines = source_lines("always_ff @(posedge clk) begin // begin : nope\nend");
        assert_eq!(procedural_label(&lines, 0), None);
    }

    #[test]
    fn test_procedural_label_from_next_line() {
        let lines = source_lines("initial\nbegin: boot\nend");
        assert_eq!(procedural_label(&lines, 0), Some("boot"));
    }

    #[test]
    fn test_procedural_kind() {
        assert_eq!(procedural_kind("  always_latch"), Some(ProceduralKind::AlwaysLatch));
        assert_eq!(procedural_kind("// always_ff"), None);
    }
}
