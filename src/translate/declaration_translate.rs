//! Declaration Translation
//!
//! Parameters, ports and internal signals keep their text but always end in
//! exactly one `;`:
//! - `localparam W = 8`      → `localparam W = 8;`
//! - `input logic clk,`      → `input logic clk;`
//! - `wire a; // note`       → `wire a; // note`

use crate::helpers::{first_word, leading_whitespace, split_line_comment};

const DECLARATION_KEYWORDS: &[&str] = &[
    "parameter",
    "localparam",
    "input",
    "output",
    "inout",
    "wire",
    "reg",
    "logic",
    "bit",
];

/// Check if a line opens a parameter, port or signal declaration
pub fn is_declaration(line: &str) -> bool {
    first_word(line).map_or(false, |word| DECLARATION_KEYWORDS.contains(&word))
}

/// Force a single `;` terminator, keeping indentation and any trailing
/// `//` comment
pub fn normalize_decl_terminator(line: &str) -> String {
    let (code, comment) = split_line_comment(line);
    let code = code.trim_end();
    let indent = leading_whitespace(code);
    let body = code.trim_start();

    let body = match body.strip_suffix(',') {
        Some(stripped) => format!("{};", stripped.trim_end()),
        None if body.ends_with(';') => body.to_string(),
        None => format!("{};", body),
    };

    match comment {
        Some(comment) => format!("{}{} {}", indent, body, comment.trim_end()),
        None => format!("{}{}", indent, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("localparam WIDTH = 8", "localparam WIDTH = 8;" ; "append")]
    #[test_case("  input logic clk,", "  input logic clk;" ; "replace comma")]
    #[test_case("wire a;", "wire a;" ; "already terminated")]
    #[test_case("output [7:0] q ,  // data out", "output [7:0] q; // data out" ; "comment kept")]
    #[test_case("reg r;// state", "reg r; // state" ; "comment spaced")]
    #[test_case("parameter S = \"a//b\"", "parameter S = \"a//b\";" ; "string with slashes")]
    fn test_normalize_decl_terminator(input: &str, expected: &str) {
        assert_eq!(normalize_decl_terminator(input), expected);
    }

    #[test]
    fn test_is_declaration() {
        assert!(is_declaration("  parameter int N = 4"));
        assert!(is_declaration("logic [3:0] cnt;"));
        assert!(is_declaration("bit b;"));
        assert!(!is_declaration("logical_thing u0 (.a(b));"));
        assert!(!is_declaration("// wire a;"));
        assert!(!is_declaration("assign a = b;"));
    }
}
