//! Enum Definition Translation
//!
//! Translates typedef enums to width-typed enum classes.
//!
//! SystemVerilog:
//! ```text
//! typedef enum logic [1:0] {
//!   IDLE,
//!   RUN = 2'h2
//! } state_t;
//! ```
//!
//! Output:
//! ```text
//! enum class state_t : uint8_t {
//!   IDLE,
//!   RUN = 0x2u
//! };
//! ```

use log::{debug, warn};

use crate::ast::{EnumBlock, SourceLine};
use crate::enum_def::{
    is_typedef_enum_start, match_enum_declaration, parse_typedef_enum, EnumRegistry,
};

/// Result of processing a line that might start an enum construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumDefResult {
    /// A typedef enum was translated; `next` is the cursor after it
    Defined { rendered: String, next: usize },
    /// The typedef enum could not be bounded
    Malformed,
    /// Not a typedef enum line
    NotEnumDef,
}

/// Smallest unsigned C type that holds `bit_width` bits (at most 32)
pub fn ctype_for_width(bit_width: u32) -> &'static str {
    match bit_width {
        0..=8 => "uint8_t",
        9..=16 => "uint16_t",
        _ => "uint32_t",
    }
}

/// Render an enum class, one enumerator per line
pub fn render_enum(block: &EnumBlock) -> String {
    let mut out = format!(
        "enum class {} : {} {{\n",
        block.type_name,
        ctype_for_width(block.bit_width)
    );
    let last = block.enumerators.len().saturating_sub(1);
    for (idx, item) in block.enumerators.iter().enumerate() {
        let separator = if idx == last { "" } else { "," };
        out.push_str(&format!("  {}{}\n", item, separator));
    }
    out.push_str("};");
    out
}

/// Translate the typedef enum starting at `lines[cursor]` and register its
/// type name
pub fn process_enum_def(
    lines: &[SourceLine<'_>],
    cursor: usize,
    registry: &mut EnumRegistry,
) -> EnumDefResult {
    if !is_typedef_enum_start(lines[cursor].text) {
        return EnumDefResult::NotEnumDef;
    }

    let block = match parse_typedef_enum(lines, cursor) {
        Ok(block) => block,
        Err(err) => {
            debug!("{}", err);
            return EnumDefResult::Malformed;
        }
    };

    if block.enumerators.is_empty() {
        warn!(
            "typedef enum '{}' at line {} has no enumerators",
            block.type_name,
            lines[cursor].number()
        );
    }

    registry.register(&block.type_name);
    EnumDefResult::Defined {
        rendered: render_enum(&block),
        next: block.end,
    }
}

/// Translate `<EnumType> <name>;` into a plain declaration of the enum class
pub fn process_enum_declaration(line: &str, registry: &EnumRegistry) -> Option<String> {
    let (type_name, var_name) = match_enum_declaration(line, registry)?;
    Some(format!("{} {};", type_name, var_name))
}
