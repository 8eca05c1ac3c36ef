//! Helper utility functions for the hdldoc translator
//!
//! Contains general-purpose text utilities used throughout the translator:
//! - Comment stripping (line and block comments)
//! - Whole-word tokenizing and keyword detection
//! - Identifier scanning
//! - Whitespace normalization

/// Check if a char can appear inside an identifier or keyword
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Check if a char can start an identifier
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if `s` is exactly one identifier: `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_word_char),
        _ => false,
    }
}

/// Split a leading identifier off `s`.
///
/// `"add0 (.a(x))"` → `Some(("add0", " (.a(x))"))`
pub fn take_identifier(s: &str) -> Option<(&str, &str)> {
    let first = s.chars().next()?;
    if !is_ident_start(first) {
        return None;
    }
    let end = s.find(|c: char| !is_word_char(c)).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

/// Iterate over the whole words of a line.
///
/// A word is a maximal run of identifier chars, so `endcase` never yields
/// `end` and `begin:label` yields `begin` then `label`.
pub fn words(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| !is_word_char(c)).filter(|w| !w.is_empty())
}

/// First word of a line, only if the trimmed line starts with it.
///
/// `"  always_ff @(posedge clk)"` → `Some("always_ff")`, `"// wire x"` → `None`
pub fn first_word(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let first = trimmed.chars().next()?;
    if !is_word_char(first) {
        return None;
    }
    words(trimmed).next()
}

/// Check if the trimmed line starts with the whole word `keyword`
pub fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    first_word(line) == Some(keyword)
}

/// Leading whitespace of a line
pub fn leading_whitespace(line: &str) -> &str {
    let end = line.len() - line.trim_start().len();
    &line[..end]
}

/// Collapse runs of whitespace into single spaces and trim
pub fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove one leading `//` marker (and the whitespace around it).
///
/// Used to read commented-out declarations the same way as active ones.
pub fn strip_leading_comment_marker(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix("//") {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

/// Split a line into its code part and its trailing `//` comment.
///
/// String literals are respected, so `"a//b"` is not a comment.
pub fn split_line_comment(line: &str) -> (&str, Option<&str>) {
    let mut in_string = false;
    let mut prev = ' ';
    for (idx, c) in line.char_indices() {
        if c == '"' && prev != '\\' {
            in_string = !in_string;
        }
        if !in_string && c == '/' && line[idx + 1..].starts_with('/') {
            return (&line[..idx], Some(&line[idx..]));
        }
        prev = c;
    }
    (line, None)
}

/// Replace every `/* ... */` comment with a single space.
///
/// An unterminated block comment swallows the rest of the text.
pub fn strip_block_comments(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("/*") {
        result.push_str(&rest[..open]);
        result.push(' ');
        match rest[open + 2..].find("*/") {
            Some(close) => rest = &rest[open + 2 + close + 2..],
            None => return result,
        }
    }
    result.push_str(rest);
    result
}

/// Remove both block and line comments from (possibly multi-line) text
pub fn cleaned_no_comments(text: &str) -> String {
    strip_block_comments(text)
        .lines()
        .map(|line| split_line_comment(line).0)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check if a trimmed line is a `//` comment
pub fn is_line_comment(trimmed: &str) -> bool {
    trimmed.starts_with("//")
}

/// Find a `begin : label` in `text` and return the label
pub fn find_begin_label(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(pos) = text[search_from..].find("begin") {
        let start = search_from + pos;
        let end = start + "begin".len();
        search_from = end;

        let boundary_before = text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
        let boundary_after = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
        if !boundary_before || !boundary_after {
            continue;
        }

        let after = text[end..].trim_start();
        if let Some(after_colon) = after.strip_prefix(':') {
            if let Some((label, _)) = take_identifier(after_colon.trim_start()) {
                return Some(label);
            }
        }
    }
    None
}
