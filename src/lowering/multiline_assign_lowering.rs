//! Multi-line Assignment Lowering
//!
//! Handles accumulation of continuous assignments that span lines:
//! ```text
//! assign grant = req &
//!                ~busy;
//! ```
//! Should become: `assign grant = req & ~busy;`
//!
//! Commented-out assignments are joined the same way once the leading `//`
//! marker is removed from every line.

use crate::ast::{AssignBlock, SourceLine};
use crate::helpers::{
    normalize_spaces, split_line_comment, starts_with_keyword, strip_block_comments,
    strip_leading_comment_marker, take_identifier,
};

/// Check if a line starts an `assign` statement.
///
/// Returns `Some(true)` when the statement is commented out.
pub fn assign_start(line: &str) -> Option<bool> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") {
        if trimmed.starts_with("///") {
            return None;
        }
        return starts_with_keyword(strip_leading_comment_marker(trimmed), "assign").then_some(true);
    }
    starts_with_keyword(trimmed, "assign").then_some(false)
}

/// Join the lines of an assignment until one carries the terminating `;`.
///
/// Returns the joined code and the cursor index just past the statement.
/// When `commented` is set every line must be a `//` line. Gives up after
/// `window` lines.
pub fn join_assign(
    lines: &[SourceLine<'_>],
    start: usize,
    commented: bool,
    window: usize,
) -> Option<(String, usize)> {
    let limit = start.saturating_add(window.max(1)).min(lines.len());
    let mut parts = Vec::new();

    for idx in start..limit {
        let text = lines[idx].text;
        let text = if commented {
            if !text.trim_start().starts_with("//") {
                return None;
            }
            strip_leading_comment_marker(text)
        } else {
            text
        };

        let no_block = strip_block_comments(text);
        let code = split_line_comment(&no_block).0.trim().to_string();
        let done = code.contains(';');
        parts.push(code);

        if done {
            return Some((normalize_spaces(&parts.join(" ")), idx + 1));
        }
    }

    None
}

/// Length of a run of `[...]` selects at the start of `s`
fn select_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut consumed = 0;
    for (idx, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                consumed = idx + 1;
            }
            c if depth == 0 && !c.is_whitespace() => break,
            _ => {}
        }
    }
    (depth == 0).then_some(consumed)
}

/// Parse a joined `assign <target> = <expr>;` statement.
///
/// The expression runs up to the first `;`. Comparisons (`==`) are not
/// assignments.
pub fn parse_assign(joined: &str, end: usize) -> Option<AssignBlock> {
    let rest = joined.trim_start().strip_prefix("assign")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let (name, after) = take_identifier(rest.trim_start())?;
    let after = after.trim_start();
    let select_end = select_len(after)?;
    let select: String = after[..select_end].split_whitespace().collect();
    let after = after[select_end..].trim_start();

    let rhs = after.strip_prefix('=')?;
    if rhs.starts_with('=') {
        return None;
    }
    let semi = rhs.find(';')?;
    let expression = rhs[..semi].trim();
    if expression.is_empty() {
        return None;
    }

    Some(AssignBlock {
        target_name: name.to_string(),
        target: format!("{}{}", name, select),
        raw_expression: expression.to_string(),
        end,
    })
}

/// Recognize the assignment starting at `lines[start]`
pub fn extract_assign(lines: &[SourceLine<'_>], start: usize, window: usize) -> Option<AssignBlock> {
    let commented = assign_start(lines.get(start)?.text)?;
    let (joined, end) = join_assign(lines, start, commented, window)?;
    parse_assign(&joined, end)
}
