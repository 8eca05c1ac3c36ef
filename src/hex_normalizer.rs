//! SIZED LITERAL NORMALIZER
//!
//! Rewrites SystemVerilog sized hex literals into C hex literals.
//!
//! Examples:
//! - `64'hDEAD_BEEF`  → `0xDEADBEEF`      (payload form, no suffix)
//! - `16'h00ff`       → `0x00ffu`         (width-aware form)
//! - `64'h8000`       → `0x0000000000008000ULL`
//!
//! Both forms are idempotent: a literal that is already `0x...` is left alone.

use crate::helpers::is_word_char;

/// Widest literal that still gets zero-padded to its width
const MAX_PADDED_WIDTH: u32 = 64;

/// A sized hex literal as found in the source, before any rewriting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizedHex<'a> {
    /// Decimal width digits, e.g. `"64"`
    pub width: &'a str,
    /// Hex digits including `_` separators, e.g. `"DEAD_BEEF"`
    pub digits: &'a str,
}

impl SizedHex<'_> {
    /// Hex digits with grouping separators removed
    pub fn plain_digits(&self) -> String {
        self.digits.chars().filter(|c| *c != '_').collect()
    }

    pub fn bit_width(&self) -> Option<u32> {
        self.width.parse().ok()
    }
}

fn skip_spaces(s: &str) -> &str {
    s.trim_start_matches([' ', '\t'])
}

/// Match a sized hex literal at the very start of `s`.
///
/// Accepts `<width>'h<hex>` with optional spaces around `'` and `h`, either
/// case of `h`, and `_` separators. The literal must end at a word boundary.
/// Returns the literal and the number of bytes it spans.
pub fn match_sized_hex(s: &str) -> Option<(SizedHex<'_>, usize)> {
    let width_len = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if width_len == 0 {
        return None;
    }
    let width = &s[..width_len];

    let rest = skip_spaces(&s[width_len..]);
    let rest = skip_spaces(rest.strip_prefix('\'')?);
    let rest = rest.strip_prefix(['h', 'H'])?;
    let rest = skip_spaces(rest);

    let digits_len = rest
        .find(|c: char| !(c.is_ascii_hexdigit() || c == '_'))
        .unwrap_or(rest.len());
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    let tail = &rest[digits_len..];

    if tail.chars().next().map_or(false, is_word_char) {
        return None;
    }

    let consumed = s.len() - tail.len();
    Some((SizedHex { width, digits }, consumed))
}

/// Replace every sized hex literal in `text` with `0x<hex>`.
///
/// Used for `define payloads and for re-emitted `#define` lines. No suffix is
/// added; anything that is not a sized hex literal is copied unchanged.
pub fn normalize_sized_hex(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    let mut prev: Option<char> = None;

    while let Some(c) = rest.chars().next() {
        if c.is_ascii_digit() && prev.map_or(true, |p| !is_word_char(p)) {
            if let Some((literal, consumed)) = match_sized_hex(rest) {
                result.push_str("0x");
                result.push_str(&literal.plain_digits());
                prev = rest[..consumed].chars().next_back();
                rest = &rest[consumed..];
                continue;
            }
        }
        result.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }

    result
}

/// Convert a single numeric token into a C literal with an unsigned suffix.
///
/// Sized hex literals use their own width: more than 32 bits gets `ULL`,
/// otherwise `u`, and the digits are zero-padded to the width. Plain decimals
/// use `width_hint` the same way. Widths past 64 bits are not padded.
/// `0x...` tokens and anything unrecognized come back unchanged.
pub fn sized_literal_to_c(token: &str, width_hint: Option<u32>) -> String {
    let token = token.trim();

    if let Some((literal, consumed)) = match_sized_hex(token) {
        if consumed == token.len() {
            if let Some(bits) = literal.bit_width() {
                return format_hex_with_suffix(&literal.plain_digits(), bits);
            }
        }
        return token.to_string();
    }

    if token.len() > 2 && token.get(..2).map_or(false, |p| p.eq_ignore_ascii_case("0x")) {
        return token.to_string();
    }

    let decimal: String = token.chars().filter(|c| *c != '_').collect();
    if !decimal.is_empty() && decimal.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(value) = decimal.parse::<u128>() {
            let suffix = if width_hint.map_or(false, |w| w > 32) { "ULL" } else { "u" };
            return format!("{}{}", value, suffix);
        }
    }

    token.to_string()
}

fn format_hex_with_suffix(digits: &str, bits: u32) -> String {
    let significant = digits.trim_start_matches('0').to_ascii_lowercase();
    let significant = if significant.is_empty() { "0".to_string() } else { significant };
    let pad = if bits > MAX_PADDED_WIDTH { 0 } else { (bits as usize + 3) / 4 };
    let zeros = "0".repeat(pad.saturating_sub(significant.len()));
    let suffix = if bits > 32 { "ULL" } else { "u" };
    format!("0x{}{}{}", zeros, significant, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("`MASK 64'hDEAD_BEEF", "`MASK 0xDEADBEEF" ; "grouped")]
    #[test_case("A 8 ' h ff", "A 0xff" ; "spaced")]
    #[test_case("X 32'Hcafe_f00d + 4'h1", "X 0xcafef00d + 0x1" ; "two literals")]
    #[test_case("B 8'b1010_0101", "B 8'b1010_0101" ; "binary untouched")]
    #[test_case("C 0xDEADBEEF", "C 0xDEADBEEF" ; "already canonical")]
    #[test_case("D x64'hFF", "D x64'hFF" ; "no word boundary before")]
    #[test_case("E 8'hFFg", "E 8'hFFg" ; "no word boundary after")]
    fn test_normalize_sized_hex(input: &str, expected: &str) {
        assert_eq!(normalize_sized_hex(input), expected);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for text in ["64'hDEAD_BEEF", "`define A 4'hF", "no literals here", "1'h1,2'h2"] {
            let once = normalize_sized_hex(text);
            assert_eq!(normalize_sized_hex(&once), once);
        }
    }

    #[test]
    fn test_match_sized_hex_span() {
        let (lit, consumed) = match_sized_hex("16'h00_ff;").unwrap();
        assert_eq!(lit.width, "16");
        assert_eq!(lit.digits, "00_ff");
        assert_eq!(consumed, 9);
        assert!(match_sized_hex("'hff").is_none());
    }

    #[test_case("16'h00ff", None, "0x00ffu" ; "narrow")]
    #[test_case("64'h0000_8000", None, "0x0000000000008000ULL" ; "wide")]
    #[test_case("2'h3", Some(64), "0x3u" ; "own width wins")]
    #[test_case("0x10u", None, "0x10u" ; "canonical untouched")]
    #[test_case("42", Some(64), "42ULL" ; "decimal wide")]
    #[test_case("42", None, "42u" ; "decimal default")]
    #[test_case("FOO", None, "FOO" ; "symbol untouched")]
    #[test_case("€1", None, "€1" ; "multibyte start")]
    #[test_case("100000000'h1", None, "0x1ULL" ; "huge width unpadded")]
    #[test_case("128'hF", None, "0xfULL" ; "past 64 bits unpadded")]
    fn test_sized_literal_to_c(token: &str, hint: Option<u32>, expected: &str) {
        assert_eq!(sized_literal_to_c(token, hint), expected);
    }
}
