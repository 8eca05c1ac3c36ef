//! hdldoc
//!
//! Rewrites SystemVerilog sources into C-like stubs for documentation
//! extraction. Recognized constructs become named stubs that keep the original
//! text as commentary; everything else is passed through as a comment.

// Core modules
pub mod ast;
pub mod enum_def;
pub mod error_msg;
pub mod hex_normalizer;

// Modularized translator components
pub mod helpers;
pub mod modes;
pub mod output_emitter;
pub mod transpiler_state;

// Analysis and rendering passes
pub mod lowering;
pub mod translate;


pub use error_msg::{ConstructKind, MalformedConstruct, Result, TranslateError};
pub use transpiler_state::TranslationState;

use log::{debug, trace};

use ast::{source_lines, GenerateBlock, SourceLine};
use helpers::{is_line_comment, starts_with_keyword};
use lowering::{
    extract_assign, extract_generate, extract_procedural, extract_subroutine,
    find_instantiations, infer_generate_label, match_instantiation, procedural_kind,
    subroutine_kind, DEFAULT_LOOKAHEAD,
};
use modes::{is_doc_block_comment_start, is_doc_line_comment, NameScope};
use translate::{
    is_declaration, is_directive, is_region_boundary, normalize_decl_terminator,
    process_enum_declaration, process_enum_def, render_as_comment, render_assign_annotation,
    render_assign_stub, render_generate_stub, render_instantiation_stub, render_procedural_stub,
    render_subroutine_stub, translate_c_define, translate_directive, EnumDefResult,
};

//===========================================================================
// CONFIGURATION
//===========================================================================

/// Tunables of one translation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Maximum lines an instantiation or a multi-line assignment may span
    pub instantiation_lookahead: usize,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        TranslatorConfig {
            instantiation_lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

//===========================================================================
// MAIN TRANSLATOR
//===========================================================================

/// Translate a whole source text with the default configuration
pub fn translate_source(source: &str) -> String {
    translate_source_with(source, &TranslatorConfig::default())
}

/// Translate a whole source text.
///
/// Total: every input produces output and the pass always terminates.
pub fn translate_source_with(source: &str, config: &TranslatorConfig) -> String {
    let lines = source_lines(source);
    let mut state = TranslationState::new(config.clone());

    let mut cursor = 0;
    while cursor < lines.len() {
        let next = dispatch_line(&lines, cursor, &mut state);
        cursor = next.max(cursor + 1);
    }

    state.finish()
}

/// Classify `lines[cursor]`, emit its translation and return the next cursor.
///
/// Categories are tried in a fixed order and the first match wins. Handlers
/// that fail to bound their construct consume nothing, so the line falls to
/// a later category or is passed through as a comment.
pub fn dispatch_line(lines: &[SourceLine<'_>], cursor: usize, state: &mut TranslationState) -> usize {
    let line = lines[cursor].text;
    let trimmed = line.trim();
    let window = state.config.instantiation_lookahead;

    if state.block_comment.is_active() {
        state.out.line(line);
        state.block_comment.observe(line);
        return cursor + 1;
    }

    if is_doc_block_comment_start(trimmed) {
        state.flush_pending_comment();
        state.out.line(line);
        state.block_comment.enter(line);
        return cursor + 1;
    }

    if is_doc_line_comment(trimmed) {
        state.set_pending_comment(line);
        return cursor + 1;
    }

    if is_directive(trimmed) {
        state.emit_line(&translate_directive(line));
        return cursor + 1;
    }

    if let Some(define) = translate_c_define(line) {
        state.emit_line(&define);
        return cursor + 1;
    }

    if is_region_boundary(line) {
        state.emit_line(&render_as_comment(line));
        return cursor + 1;
    }

    match process_enum_def(lines, cursor, &mut state.enum_types) {
        EnumDefResult::Defined { rendered, next } => {
            trace!("line {}: typedef enum", lines[cursor].number());
            state.flush_pending_comment();
            state.out.lines(&rendered);
            return next;
        }
        EnumDefResult::Malformed => {
            state.emit_line(&render_as_comment(line));
            return cursor + 1;
        }
        EnumDefResult::NotEnumDef => {}
    }

    if let Some(declaration) = process_enum_declaration(line, &state.enum_types) {
        state.emit_line(&declaration);
        return cursor + 1;
    }

    if starts_with_keyword(line, "generate") {
        return match extract_generate(lines, cursor) {
            Ok(region) => {
                trace!("line {}: generate region of {} lines", lines[cursor].number(), region.len());
                let next = cursor + region.len();
                let block = GenerateBlock {
                    inferred_label: infer_generate_label(&region),
                    nested_instantiations: find_instantiations(&region, window),
                    raw_lines: region,
                };
                emit_generate(&block, state);
                next
            }
            Err(err) => pass_through_malformed(state, lines, cursor, &err),
        };
    }

    if let Some(kind) = procedural_kind(line) {
        return match extract_procedural(lines, cursor, kind) {
            Ok(block) => {
                trace!("line {}: procedural block '{}'", lines[cursor].number(), block.label);
                state.emit_structural(&render_procedural_stub(&block));
                cursor + block.raw_lines.len()
            }
            Err(err) => pass_through_malformed(state, lines, cursor, &err),
        };
    }

    if let Some(kind) = subroutine_kind(line) {
        return match extract_subroutine(lines, cursor, kind) {
            Ok(block) => {
                trace!("line {}: {} '{}'", lines[cursor].number(), kind.keyword(), block.name);
                state.emit_structural(&render_subroutine_stub(&block));
                cursor + block.raw_lines.len()
            }
            Err(err) => pass_through_malformed(state, lines, cursor, &err),
        };
    }

    if let Some(inst) = match_instantiation(lines, cursor, window) {
        trace!(
            "line {}: instantiation '{}' of '{}'",
            lines[cursor].number(),
            inst.instance_name,
            inst.module_name
        );
        state.emit_structural(&render_instantiation_stub(
            &inst.instance_name,
            &lines[inst.range.clone()],
        ));
        return inst.range.end;
    }

    if is_declaration(line) {
        state.emit_line(&normalize_decl_terminator(line));
        return cursor + 1;
    }

    if let Some(assign) = extract_assign(lines, cursor, window) {
        trace!("line {}: assign to '{}'", lines[cursor].number(), assign.target_name);
        // The annotation goes ahead of the pending comment
        state.out.line(&render_assign_annotation(&assign));
        state.flush_pending_comment();
        state.out.line(&render_assign_stub(&assign));
        return assign.end;
    }

    if is_line_comment(trimmed) {
        state.emit_line(line);
        return cursor + 1;
    }

    if trimmed.is_empty() {
        state.flush_pending_comment();
        state.out.blank();
        return cursor + 1;
    }

    state.emit_line(&render_as_comment(line));
    cursor + 1
}

/// Emit the stub of a generate region followed by one stub per instantiation
/// inside it. Instance names are made unique within the region.
fn emit_generate(block: &GenerateBlock<'_>, state: &mut TranslationState) {
    let fallback = state.next_generate_fallback();
    let label = block.inferred_label.as_deref().unwrap_or(&fallback);
    state.emit_structural(&render_generate_stub(label, &block.raw_lines));

    let mut names = NameScope::new();
    for inst in &block.nested_instantiations {
        let name = names.claim(&inst.instance_name);
        state.emit_structural(&render_instantiation_stub(
            &name,
            &block.raw_lines[inst.range.clone()],
        ));
    }
}

/// Keep the opening line of an unbounded construct as a comment
fn pass_through_malformed(
    state: &mut TranslationState,
    lines: &[SourceLine<'_>],
    cursor: usize,
    err: &MalformedConstruct,
) -> usize {
    debug!("{}; keeping the line as a comment", err);
    state.emit_line(&render_as_comment(lines[cursor].text));
    cursor + 1
}
