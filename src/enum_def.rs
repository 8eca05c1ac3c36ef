//! Typedef enum parsing for hdldoc
//!
//! Handles:
//! - Registry of enum type names discovered so far
//! - `typedef enum [logic [MSB:LSB]] { ... } name;` blocks, active or
//!   commented out
//! - Declarations of variables using a registered enum type

use std::collections::HashSet;

use crate::ast::{EnumBlock, SourceLine};
use crate::error_msg::{ConstructKind, MalformedConstruct};
use crate::helpers::{
    is_word_char, normalize_spaces, split_line_comment, strip_leading_comment_marker,
    take_identifier,
};
use crate::hex_normalizer::sized_literal_to_c;

/// Width used when a typedef enum has no explicit bit range
pub const DEFAULT_ENUM_WIDTH: u32 = 32;

/// Registry of known enum type names
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    names: HashSet<String>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str) {
        self.names.insert(name.to_string());
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Check if a line starts a typedef enum, even behind a `//` marker
pub fn is_typedef_enum_start(line: &str) -> bool {
    let stripped = strip_leading_comment_marker(line).trim_start();
    let Some((first, rest)) = take_identifier(stripped) else {
        return false;
    };
    if !first.eq_ignore_ascii_case("typedef") {
        return false;
    }
    match take_identifier(rest.trim_start()) {
        Some((second, _)) => second.eq_ignore_ascii_case("enum"),
        None => false,
    }
}

/// Find the closing `} name ;` of a typedef and return `name`
pub fn find_typedef_close(text: &str) -> Option<&str> {
    for (pos, _) in text.match_indices('}') {
        let after = text[pos + 1..].trim_start();
        if let Some((name, rest)) = take_identifier(after) {
            if rest.trim_start().starts_with(';') {
                return Some(name);
            }
        }
    }
    None
}

/// Find `[MSB:LSB]` right after `enum` (and an optional base type)
fn find_enum_range(text: &str) -> Option<(u64, u64)> {
    for (pos, _) in text.match_indices("enum") {
        let before_ok = text[..pos].chars().next_back().map_or(true, |c| !is_word_char(c));
        if !before_ok {
            continue;
        }
        let mut rest = text[pos + "enum".len()..].trim_start();
        if let Some((word, after)) = take_identifier(rest) {
            if matches!(word, "logic" | "reg" | "bit") {
                rest = after.trim_start();
            } else {
                continue;
            }
        }
        let Some(inner) = rest.strip_prefix('[') else {
            continue;
        };
        let Some(close) = inner.find(']') else {
            continue;
        };
        let mut bounds = inner[..close].splitn(2, ':');
        let msb = bounds.next().map(str::trim).and_then(|s| s.parse().ok());
        let lsb = bounds.next().map(str::trim).and_then(|s| s.parse().ok());
        if let (Some(msb), Some(lsb)) = (msb, lsb) {
            return Some((msb, lsb));
        }
    }
    None
}

/// Bit width of an enum: `|MSB - LSB| + 1`, or the 32-bit default
pub fn enum_bit_width(text: &str) -> u32 {
    match find_enum_range(text) {
        Some((msb, lsb)) => msb.abs_diff(lsb).saturating_add(1).min(u32::MAX as u64) as u32,
        None => DEFAULT_ENUM_WIDTH,
    }
}

/// Enumerator list between the braces following `enum`
fn enum_body(text: &str) -> Option<&str> {
    let enum_pos = text.find("enum")?;
    let open = enum_pos + text[enum_pos..].find('{')?;
    let close = open + text[open..].find('}')?;
    Some(&text[open + 1..close])
}

/// Normalize one enumerator; an initializer goes through the width-aware
/// literal conversion
fn normalize_enumerator(item: &str, width: u32) -> String {
    let item = normalize_spaces(item);
    match item.split_once('=') {
        Some((name, value)) => format!(
            "{} = {}",
            name.trim(),
            sized_literal_to_c(value, Some(width))
        ),
        None => item,
    }
}

/// Parse the typedef enum starting at `start`.
///
/// Scans forward until a line holding `} name ;`. Commented-out lines are
/// read the same as active ones.
pub fn parse_typedef_enum(
    lines: &[SourceLine<'_>],
    start: usize,
) -> Result<EnumBlock, MalformedConstruct> {
    let close = lines[start..]
        .iter()
        .position(|line| find_typedef_close(line.text).is_some())
        .map(|offset| start + offset)
        .ok_or(MalformedConstruct::Unterminated {
            kind: ConstructKind::TypedefEnum,
            line: lines[start].number(),
        })?;

    let text = lines[start..=close]
        .iter()
        .map(|line| split_line_comment(strip_leading_comment_marker(line.text)).0)
        .collect::<Vec<_>>()
        .join("\n");

    let bit_width = enum_bit_width(&text);

    let enumerators = match enum_body(&text) {
        Some(body) => body
            .split(',')
            .map(|item| normalize_enumerator(item, bit_width))
            .filter(|item| !item.is_empty())
            .collect(),
        None => Vec::new(),
    };

    let type_name = find_typedef_close(&text)
        .map(str::to_string)
        .unwrap_or_else(|| format!("enum_{}", start));

    Ok(EnumBlock {
        type_name,
        bit_width,
        enumerators,
        end: close + 1,
    })
}

/// Match `<EnumType> <name>;` (optionally commented) against the registry.
///
/// Returns `(type_name, variable_name)`.
pub fn match_enum_declaration<'a>(
    line: &'a str,
    registry: &EnumRegistry,
) -> Option<(&'a str, &'a str)> {
    if registry.is_empty() {
        return None;
    }
    let stripped = strip_leading_comment_marker(line).trim_start();
    let (type_name, rest) = take_identifier(stripped)?;
    if !registry.is_enum(type_name) {
        return None;
    }
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    let (var_name, rest) = take_identifier(rest.trim_start())?;
    if !rest.trim_start().starts_with(';') {
        return None;
    }
    Some((type_name, var_name))
}

//=============================================================================
// TESTS
//=============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::source_lines;

    #[test]
    fn test_registry_lookup() {
        let mut reg = EnumRegistry::new();
        assert!(reg.is_empty());
        reg.register("state_t");
        reg.register("op_t");
        reg.register("state_t");
        assert!(reg.is_enum("state_t"));
        assert!(reg.is_enum("op_t"));
        assert!(!reg.is_enum("op"));
    }

    #[test]
    fn test_is_typedef_enum_start() {
        assert!(is_typedef_enum_start("typedef enum logic [1:0] {"));
        assert!(is_typedef_enum_start("  // typedef enum {A, B} ab_t;"));
        assert!(is_typedef_enum_start("TYPEDEF ENUM {A} a_t;"));
        assert!(!is_typedef_enum_start("typedef struct packed {"));
        assert!(!is_typedef_enum_start("typedef enumx {"));
    }

    #[test]
    fn test_find_typedef_close() {
        assert_eq!(find_typedef_close("} state_t;"), Some("state_t"));
        assert_eq!(find_typedef_close("  IDLE } st ;  // x"), Some("st"));
        assert_eq!(find_typedef_close("}"), None);
        assert_eq!(find_typedef_close("} state_t"), None);
    }

    #[test]
    fn test_enum_bit_width() {
        assert_eq!(enum_bit_width("typedef enum logic [1:0] {"), 2);
        assert_eq!(enum_bit_width("typedef enum logic [0:15] {"), 16);
        assert_eq!(enum_bit_width("typedef enum bit [ 31 : 0 ] {"), 32);
        assert_eq!(enum_bit_width("typedef enum [40:0] {"), 41);
        assert_eq!(enum_bit_width("typedef enum {"), DEFAULT_ENUM_WIDTH);
        assert_eq!(
            enum_bit_width("typedef enum logic [18446744073709551615:0] {"),
            u32::MAX
        );
    }

    #[test]
    fn test_parse_single_line() {
        let lines = source_lines("typedef enum logic [1:0] {A, B, C} state_t;");
        let block = parse_typedef_enum(&lines, 0).unwrap();
        assert_eq!(block.type_name, "state_t");
        assert_eq!(block.bit_width, 2);
        assert_eq!(block.enumerators, vec!["A", "B", "C"]);
        assert_eq!(block.end, 1);
    }

    #[test]
    fn test_parse_commented_multiline() {
        let src = "// typedef enum logic [3:0] {\n//   IDLE = 4'h0, // idle\n//   RUN,\n// } mode_t;\nwire x;";
        let lines = source_lines(src);
        let block = parse_typedef_enum(&lines, 0).unwrap();
        assert_eq!(block.type_name, "mode_t");
        assert_eq!(block.enumerators, vec!["IDLE = 0x0u", "RUN"]);
        assert_eq!(block.end, 4);
    }

    #[test]
    fn test_parse_unterminated() {
        let lines = source_lines("typedef enum {\n  A,\n  B\n");
        let err = parse_typedef_enum(&lines, 0).unwrap_err();
        assert_eq!(
            err,
            MalformedConstruct::Unterminated {
                kind: ConstructKind::TypedefEnum,
                line: 1
            }
        );
    }

    #[test]
    fn test_parse_without_body() {
        let lines = source_lines("typedef enum logic [7:0] } byte_t;");
        let block = parse_typedef_enum(&lines, 0).unwrap();
        assert_eq!(block.type_name, "byte_t");
        assert!(block.enumerators.is_empty());
    }

    #[test]
    fn test_match_enum_declaration() {
        let mut reg = EnumRegistry::new();
        assert_eq!(match_enum_declaration("state_t cur;", &reg), None);

        reg.register("state_t");
        assert_eq!(match_enum_declaration("  state_t cur;", &reg), Some(("state_t", "cur")));
        assert_eq!(match_enum_declaration("// state_t nxt ;", &reg), Some(("state_t", "nxt")));
        assert_eq!(match_enum_declaration("state_tx cur;", &reg), None);
        assert_eq!(match_enum_declaration("state_t cur, nxt;", &reg), None);
        assert_eq!(match_enum_declaration("state_t u0 (.a(b));", &reg), None);
    }
}
