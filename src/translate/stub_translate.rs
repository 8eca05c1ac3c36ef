//! Stub Rendering
//!
//! Renders recognized blocks as named, empty function stubs that carry the
//! original source as `//` commentary:
//! ```text
//! void add0() {
//!   // module instantiation (original SV below)
//!   // adder #(.W(8)) add0 ( .a(x), .b(y) );
//! }
//! ```

use crate::ast::{AssignBlock, FunctionBlock, ProceduralBlock, SourceLine, SubroutineKind};

pub const GENERATE_BANNER: &str = "// generate block (original SV below)";
pub const INSTANTIATION_BANNER: &str = "// module instantiation (original SV below)";
pub const FUNCTION_BANNER: &str = "// function block (original SV below)";
pub const TASK_BANNER: &str = "// task block (original SV below)";

/// Original line as an indented comment inside a stub body
pub fn comment_line(text: &str) -> String {
    format!("  // {}", text.trim_end())
}

/// `void <name>() {`, an optional banner, every line commented, `}`
fn render_stub(name: &str, banner: Option<&str>, lines: &[SourceLine<'_>]) -> Vec<String> {
    let mut out = vec![format!("void {}() {{", name)];
    if let Some(banner) = banner {
        out.push(format!("  {}", banner));
    }
    out.extend(lines.iter().map(|line| comment_line(line.text)));
    out.push("}".to_string());
    out
}

pub fn render_generate_stub(label: &str, region: &[SourceLine<'_>]) -> Vec<String> {
    render_stub(label, Some(GENERATE_BANNER), region)
}

pub fn render_instantiation_stub(name: &str, lines: &[SourceLine<'_>]) -> Vec<String> {
    render_stub(name, Some(INSTANTIATION_BANNER), lines)
}

/// The header line is kept as `// original: ...`, the body follows as plain
/// comments
pub fn render_procedural_stub(block: &ProceduralBlock<'_>) -> Vec<String> {
    let mut out = vec![format!("void {}() {{", block.label)];
    if let Some((header, body)) = block.raw_lines.split_first() {
        out.push(format!("  // original: {}", header.text.trim_end()));
        out.extend(body.iter().map(|line| comment_line(line.text)));
    }
    out.push("}".to_string());
    out
}

pub fn render_subroutine_stub(block: &FunctionBlock<'_>) -> Vec<String> {
    let banner = match block.kind {
        SubroutineKind::Function => FUNCTION_BANNER,
        SubroutineKind::Task => TASK_BANNER,
    };
    let mut out = vec![format!("void {}() {{", block.name), format!("  {}", banner)];
    out.extend(block.raw_lines.iter().map(|line| comment_line(line.text)));
    out.push("}".to_string());
    out
}

/// Doc annotation carrying the assignment. The trailing `\n` is literal text.
pub fn render_assign_annotation(block: &AssignBlock) -> String {
    format!("/// assign {} = {};\\n", block.target, block.raw_expression)
}

pub fn render_assign_stub(block: &AssignBlock) -> String {
    format!("void assign_{}();", block.target_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{source_lines, ProceduralKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_instantiation_stub() {
        let lines = source_lines("  adder u0 (.a(x));   ");
        assert_eq!(
            render_instantiation_stub("u0", &lines),
            vec![
                "void u0() {",
                "  // module instantiation (original SV below)",
                "  //   adder u0 (.a(x));",
                "}",
            ]
        );
    }

    #[test]
    fn test_render_procedural_stub() {
        let lines = source_lines("always_ff @(posedge clk) begin : regs\n  q <= d;\nend");
        let block = ProceduralBlock {
            kind: ProceduralKind::AlwaysFf,
            label: "regs".to_string(),
            raw_lines: lines,
        };
        assert_eq!(
            render_procedural_stub(&block),
            vec![
                "void regs() {",
                "  // original: always_ff @(posedge clk) begin : regs",
                "  //   q <= d;",
                "  // end",
                "}",
            ]
        );
    }

    #[test]
    fn test_render_task_stub() {
        let lines = source_lines("task reset();\nendtask");
        let block = FunctionBlock {
            kind: SubroutineKind::Task,
            name: "reset".to_string(),
            raw_lines: lines,
        };
        let out = render_subroutine_stub(&block);
        assert_eq!(out[1], "  // task block (original SV below)");
        assert_eq!(out[2], "  // task reset();");
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_render_assign() {
        let block = AssignBlock {
            target_name: "data".to_string(),
            target: "data[3:0]".to_string(),
            raw_expression: "nib".to_string(),
            end: 1,
        };
        assert_eq!(render_assign_annotation(&block), "/// assign data[3:0] = nib;\\n");
        assert_eq!(render_assign_stub(&block), "void assign_data();");
    }
}
