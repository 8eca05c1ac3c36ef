//! Preprocessor Directive Translation
//!
//! Translates backtick compiler directives to C preprocessor lines:
//! - `` `ifdef X `` → `#ifdef X`
//! - `` `elsif X `` → `#elif X`
//! - `` `define W 8'hFF `` → `#define W 0xFF`
//! - unknown directives (`` `timescale ``, `` `default_nettype ``) → `// ` comment

use crate::helpers::take_identifier;
use crate::hex_normalizer::normalize_sized_hex;

/// Check if a trimmed line is a backtick directive
pub fn is_directive(trimmed: &str) -> bool {
    trimmed.starts_with('`')
}

/// Translate one backtick directive line
pub fn translate_directive(line: &str) -> String {
    let trimmed = line.trim();
    let Some((kind, rest)) = trimmed.strip_prefix('`').and_then(take_identifier) else {
        return format!("// {}", trimmed);
    };
    let rest = rest.trim();

    match kind.to_ascii_lowercase().as_str() {
        "ifdef" => format!("#ifdef {}", rest),
        "ifndef" => format!("#ifndef {}", rest),
        "elsif" => format!("#elif {}", rest),
        "else" => "#else".to_string(),
        "endif" => "#endif".to_string(),
        "define" => format!("#define {}", normalize_sized_hex(rest)),
        "undef" => format!("#undef {}", rest),
        "include" => format!("#include {}", rest),
        _ if rest.is_empty() => format!("// `{}", kind),
        _ => format!("// `{} {}", kind, rest),
    }
}

/// Re-emit an existing `#define` with its sized literals normalized.
///
/// Returns `None` if the line is not a `#define`.
pub fn translate_c_define(line: &str) -> Option<String> {
    let after_hash = line.trim_start().strip_prefix('#')?.trim_start();
    let rest = after_hash.strip_prefix("define")?;
    if rest.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some(format!("#define {}", normalize_sized_hex(rest.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("`ifdef SYNTH", "#ifdef SYNTH" ; "ifdef")]
    #[test_case("  `ifndef FOO_SV", "#ifndef FOO_SV" ; "ifndef indented")]
    #[test_case("`elsif SIM", "#elif SIM" ; "elsif")]
    #[test_case("`else", "#else" ; "else")]
    #[test_case("`endif // SYNTH", "#endif" ; "endif drops tail")]
    #[test_case("`define MASK 64'hDEAD_BEEF", "#define MASK 0xDEADBEEF" ; "define normalized")]
    #[test_case("`undef MASK", "#undef MASK" ; "undef")]
    #[test_case("`include \"defs.svh\"", "#include \"defs.svh\"" ; "include")]
    #[test_case("`timescale 1ns/1ps", "// `timescale 1ns/1ps" ; "unknown kind")]
    #[test_case("`resetall", "// `resetall" ; "unknown bare")]
    #[test_case("`IFDEF X", "#ifdef X" ; "case insensitive")]
    #[test_case("` 8", "// ` 8" ; "no kind")]
    fn test_translate_directive(input: &str, expected: &str) {
        assert_eq!(translate_directive(input), expected);
    }

    #[test]
    fn test_translate_c_define() {
        assert_eq!(
            translate_c_define("#define RESET 32'h0000_00FF"),
            Some("#define RESET 0x000000FF".to_string())
        );
        assert_eq!(translate_c_define("  # define A 1"), Some("#define A 1".to_string()));
        assert_eq!(translate_c_define("#defined A"), None);
        assert_eq!(translate_c_define("#include <x.h>"), None);
    }

    #[test]
    fn test_is_directive() {
        assert!(is_directive("`ifdef X"));
        assert!(!is_directive("// `ifdef X"));
    }
}
