//! Block Extraction Lowering
//!
//! Consumes multi-line constructs as atomic units:
//! - procedural blocks (`always*`, `initial`)
//! - generate regions (`generate ... endgenerate`, nested)
//! - subroutines (`function ... endfunction`, `task ... endtask`)
//!
//! Every extractor returns a block whose delimiters are balanced, or a
//! [`MalformedConstruct`] without consuming anything.

use crate::ast::{FunctionBlock, ProceduralBlock, ProceduralKind, SourceLine, SubroutineKind};
use crate::error_msg::{ConstructKind, MalformedConstruct};
use crate::helpers::{cleaned_no_comments, first_word, is_word_char};
use crate::lowering::depth_tracking_lowering::{
    code_only, BlockDepth, Delimiters, FUNCTION_DELIMITERS, GENERATE_DELIMITERS,
    PROCEDURAL_DELIMITERS, TASK_DELIMITERS,
};
use crate::lowering::lookahead_lowering::{procedural_kind, procedural_label};

/// Collect lines from `start` until `delims` are balanced again
fn extract_balanced<'a>(
    lines: &[SourceLine<'a>],
    start: usize,
    delims: Delimiters,
    kind: ConstructKind,
) -> Result<Vec<SourceLine<'a>>, MalformedConstruct> {
    let mut depth = BlockDepth::new(delims);
    for (offset, line) in lines[start..].iter().enumerate() {
        depth.feed(line.text).map_err(|_| MalformedConstruct::NegativeDepth {
            kind,
            line: lines[start].number(),
            at: line.number(),
        })?;
        if depth.is_closed() {
            return Ok(lines[start..=start + offset].to_vec());
        }
    }
    Err(MalformedConstruct::Unterminated {
        kind,
        line: lines[start].number(),
    })
}

//=============================================================================
// PROCEDURAL BLOCKS
//=============================================================================

/// Extract the procedural block whose header is `lines[start]`.
///
/// With `begin`/`case`/`fork` the block runs until they are balanced. A body
/// without any of them is a single statement and ends at its first `;`.
pub fn extract_procedural<'a>(
    lines: &[SourceLine<'a>],
    start: usize,
    kind: ProceduralKind,
) -> Result<ProceduralBlock<'a>, MalformedConstruct> {
    let header = lines[start];
    let label = procedural_label(lines, start)
        .unwrap_or_else(|| kind.default_label())
        .to_string();

    let mut depth = BlockDepth::new(PROCEDURAL_DELIMITERS);
    for (offset, line) in lines[start..].iter().enumerate() {
        depth.feed(line.text).map_err(|_| MalformedConstruct::NegativeDepth {
            kind: ConstructKind::Procedural,
            line: header.number(),
            at: line.number(),
        })?;

        let single_statement_done =
            !depth.has_opened() && code_only(line.text).trim_end().ends_with(';');

        if depth.is_closed() || single_statement_done {
            return Ok(ProceduralBlock {
                kind,
                label,
                raw_lines: lines[start..=start + offset].to_vec(),
            });
        }
    }

    Err(MalformedConstruct::Unterminated {
        kind: ConstructKind::Procedural,
        line: header.number(),
    })
}

//=============================================================================
// GENERATE REGIONS
//=============================================================================

/// Extract `generate ... endgenerate` starting at `start`, nested regions
/// included
pub fn extract_generate<'a>(
    lines: &[SourceLine<'a>],
    start: usize,
) -> Result<Vec<SourceLine<'a>>, MalformedConstruct> {
    extract_balanced(lines, start, GENERATE_DELIMITERS, ConstructKind::Generate)
}

/// Name a generate region after the labels of the procedural blocks inside.
///
/// The most frequent label wins, ties going to the first seen. Without any
/// procedural label, the first `begin : label` of the region is used.
pub fn infer_generate_label(region: &[SourceLine<'_>]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for idx in 0..region.len() {
        if procedural_kind(region[idx].text).is_none() {
            continue;
        }
        if let Some(label) = procedural_label(region, idx) {
            match counts.iter_mut().find(|(name, _)| *name == label) {
                Some((_, count)) => *count += 1,
                None => counts.push((label, 1)),
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    if let Some((label, _)) = best {
        return Some(label.to_string());
    }

    region
        .iter()
        .find_map(|line| crate::helpers::find_begin_label(&code_only(line.text)).map(str::to_string))
}

//=============================================================================
// FUNCTIONS AND TASKS
//=============================================================================

/// Identifier ending right before byte `pos` of `text`
fn identifier_before(text: &str, pos: usize) -> Option<&str> {
    let head = text[..pos].trim_end();
    let start = head
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map(|(i, _)| i)?;
    let ident = &head[start..];
    if crate::helpers::is_valid_identifier(ident) {
        Some(ident)
    } else {
        None
    }
}

/// Declared name of a subroutine from its header line.
///
/// The name is the identifier before the argument list, or before `;` for
/// old-style headers. Parentheses inside a `[...]` return range are skipped.
pub fn subroutine_name(header: &str, kind: SubroutineKind) -> Option<String> {
    let code = cleaned_no_comments(header);
    let code = code.trim_start();
    let body = code.strip_prefix(kind.keyword())?;
    let body_start = code.len() - body.len();

    let mut bracket_depth = 0usize;
    for (offset, c) in body.char_indices() {
        match c {
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            '(' | ';' if bracket_depth == 0 => {
                return identifier_before(code, body_start + offset)
                    .filter(|name| *name != kind.keyword())
                    .map(str::to_string);
            }
            _ => {}
        }
    }
    None
}

/// Extract a function or task starting at `start` up to its end keyword
pub fn extract_subroutine<'a>(
    lines: &[SourceLine<'a>],
    start: usize,
    kind: SubroutineKind,
) -> Result<FunctionBlock<'a>, MalformedConstruct> {
    let (delims, construct) = match kind {
        SubroutineKind::Function => (FUNCTION_DELIMITERS, ConstructKind::Function),
        SubroutineKind::Task => (TASK_DELIMITERS, ConstructKind::Task),
    };
    let raw_lines = extract_balanced(lines, start, delims, construct)?;
    let name = subroutine_name(lines[start].text, kind)
        .unwrap_or_else(|| format!("sv_{}_{}", kind.keyword(), start));

    Ok(FunctionBlock {
        kind,
        name,
        raw_lines,
    })
}

/// Kind of subroutine opened by `line`, if any
pub fn subroutine_kind(line: &str) -> Option<SubroutineKind> {
    first_word(line).and_then(SubroutineKind::from_keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{source_lines, texts};
    use crate::lowering::depth_tracking_lowering::count_delimiters;

    fn assert_balanced(lines: &[SourceLine<'_>], delims: &Delimiters) {
        let (opens, closes) = lines.iter().fold((0, 0), |(o, c), line| {
            let count = count_delimiters(line.text, delims);
            (o + count.opens, c + count.closes)
        });
        assert_eq!(opens, closes);
    }

    #[test]
    fn test_extract_procedural_nested() {
        let src = "always_ff @(posedge clk) begin : regs\n  if (rst) begin\n    q <= 0;\n  end else begin\n    q <= d;\n  end\nend\nassign y = q;";
        let lines = source_lines(src);
        let block = extract_procedural(&lines, 0, ProceduralKind::AlwaysFf).unwrap();
        assert_eq!(block.kind, ProceduralKind::AlwaysFf);
        assert_eq!(block.label, "regs");
        assert_eq!(block.raw_lines.len(), 7);
        assert_balanced(&block.raw_lines, &PROCEDURAL_DELIMITERS);
    }

    #[test]
    fn test_extract_procedural_single_statement() {
        let lines = source_lines("always @(posedge clk)\n  q <= d;\nwire x;");
        let block = extract_procedural(&lines, 0, ProceduralKind::Always).unwrap();
        assert_eq!(block.label, "always");
        assert_eq!(texts(&block.raw_lines), vec!["always @(posedge clk)", "  q <= d;"]);

        let lines = source_lines("always_comb y = a & b;\nwire x;");
        let block = extract_procedural(&lines, 0, ProceduralKind::AlwaysComb).unwrap();
        assert_eq!(block.raw_lines.len(), 1);
        assert_eq!(block.label, "always_comb");
    }

    #[test]
    fn test_extract_procedural_case_block() {
        let src = "always_comb\n  unique case (sel)\n    0: y = a;\n    default: y = b;\n  endcase\nwire z;";
        let lines = source_lines(src);
        let block = extract_procedural(&lines, 0, ProceduralKind::AlwaysComb).unwrap();
        assert_eq!(block.raw_lines.len(), 5);
    }

    #[test]
    fn test_extract_procedural_underflow() {
        let lines = source_lines("initial end\n");
        let err = extract_procedural(&lines, 0, ProceduralKind::Initial).unwrap_err();
        assert!(matches!(err, MalformedConstruct::NegativeDepth { .. }));
    }

    #[test]
    fn test_extract_procedural_unterminated() {
        let lines = source_lines("always_ff @(posedge clk) begin\n  q <= d;\n");
        let err = extract_procedural(&lines, 0, ProceduralKind::AlwaysFf).unwrap_err();
        assert!(matches!(err, MalformedConstruct::Unterminated { line: 1, .. }));
    }

    #[test]
    fn test_extract_generate_nested() {
        let src = "generate\n  generate\n  endgenerate\n  foo u0 (.a(b));\nendgenerate\nwire w;";
        let lines = source_lines(src);
        let region = extract_generate(&lines, 0).unwrap();
        assert_eq!(region.len(), 5);
        assert_balanced(&region, &GENERATE_DELIMITERS);
    }

    #[test]
    fn test_infer_generate_label() {
        let src = "generate\n  always_ff @(posedge clk) begin : lane\n  end\n  always_comb begin : other\n  end\n  always_ff @(posedge clk) begin : lane\n  end\nendgenerate";
        let lines = source_lines(src);
        assert_eq!(infer_generate_label(&lines), Some("lane".to_string()));

        let lines = source_lines("generate\n  for (genvar i = 0; i < 4; i++) begin : g_bits\n  end\nendgenerate");
        assert_eq!(infer_generate_label(&lines), Some("g_bits".to_string()));

        let lines = source_lines("generate\n  foo u0 (.a(b));\nendgenerate");
        assert_eq!(infer_generate_label(&lines), None);
    }

    #[test]
    fn test_subroutine_name() {
        assert_eq!(
            subroutine_name("function automatic logic [$clog2(N)-1:0] encode(input x);", SubroutineKind::Function),
            Some("encode".to_string())
        );
        assert_eq!(
            subroutine_name("function [7:0] parity;", SubroutineKind::Function),
            Some("parity".to_string())
        );
        assert_eq!(
            subroutine_name("task automatic drive_bus ( // args", SubroutineKind::Task),
            Some("drive_bus".to_string())
        );
        assert_eq!(subroutine_name("function", SubroutineKind::Function), None);
    }

    #[test]
    fn test_extract_subroutine() {
        let src = "function int add(int a, int b);\n  return a + b;\nendfunction\nwire w;";
        let lines = source_lines(src);
        let block = extract_subroutine(&lines, 0, SubroutineKind::Function).unwrap();
        assert_eq!(block.name, "add");
        assert_eq!(block.raw_lines.len(), 3);

        let lines = source_lines("function f(input a);\n  return a;\n");
        assert!(extract_subroutine(&lines, 0, SubroutineKind::Function).is_err());
    }

    #[test]
    fn test_subroutine_kind() {
        assert_eq!(subroutine_kind("task t;"), Some(SubroutineKind::Task));
        assert_eq!(subroutine_kind("function f;"), Some(SubroutineKind::Function));
        assert_eq!(subroutine_kind("endfunction"), None);
    }
}
