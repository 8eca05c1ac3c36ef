//! Passthrough Translation
//!
//! Lines that carry no stub of their own are kept for traceability:
//! - design-unit boundaries (`module`, `endmodule`, `package`, ...)
//! - anything unrecognized
//!
//! Both become plain `//` comments.

use crate::helpers::first_word;

const REGION_KEYWORDS: &[&str] = &[
    "module",
    "endmodule",
    "macromodule",
    "interface",
    "endinterface",
    "package",
    "endpackage",
    "program",
    "endprogram",
];

/// Check if a line opens or closes a design unit
pub fn is_region_boundary(line: &str) -> bool {
    first_word(line).map_or(false, |word| REGION_KEYWORDS.contains(&word))
}

/// Keep a line as a comment, indentation dropped
pub fn render_as_comment(line: &str) -> String {
    format!("// {}", line.trim())
}
