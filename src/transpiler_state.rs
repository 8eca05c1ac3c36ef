//! Translation State Management
//!
//! Contains the `TranslationState` struct which holds all mutable state
//! during one translation pass.

use crate::enum_def::EnumRegistry;
use crate::modes::BlockCommentMode;
use crate::output_emitter::OutputEmitter;
use crate::TranslatorConfig;

/// Main state container for the translator
///
/// Created per call to [`crate::translate_source_with`] and dropped at the
/// end. Handlers share nothing else besides the cursor.
#[derive(Debug)]
pub struct TranslationState {
    /// At most one buffered `///` line, waiting for the next stub
    pub pending_comment: Option<String>,

    /// Enum type names discovered so far
    pub enum_types: EnumRegistry,

    /// Inside a `/** ... */` or `/*! ... */` comment
    pub block_comment: BlockCommentMode,

    /// Next index for a fallback `gen_block_<n>` label
    pub generate_index: usize,

    pub out: OutputEmitter,
    pub config: TranslatorConfig,
}

impl TranslationState {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            pending_comment: None,
            enum_types: EnumRegistry::new(),
            block_comment: BlockCommentMode::new(),
            generate_index: 1,
            out: OutputEmitter::new(),
            config,
        }
    }

    /// Buffer a `///` line; an unflushed older one is replaced
    pub fn set_pending_comment(&mut self, line: &str) {
        self.pending_comment = Some(line.trim_end().to_string());
    }

    /// Emit and clear the pending comment, if any
    pub fn flush_pending_comment(&mut self) {
        if let Some(comment) = self.pending_comment.take() {
            self.out.line(&comment);
        }
    }

    /// Emit structural output: the pending comment goes first
    pub fn emit_structural(&mut self, lines: &[String]) {
        self.flush_pending_comment();
        for line in lines {
            self.out.line(line);
        }
    }

    /// Emit one structural line
    pub fn emit_line(&mut self, line: &str) {
        self.flush_pending_comment();
        self.out.line(line);
    }

    /// Fallback label of the next generate region. Called once per region,
    /// whether or not a label is inferred.
    pub fn next_generate_fallback(&mut self) -> String {
        let label = format!("gen_block_{}", self.generate_index);
        self.generate_index += 1;
        label
    }

    /// Flush what is left and hand back the output
    pub fn finish(mut self) -> String {
        self.flush_pending_comment();
        self.out.finish()
    }
}

impl Default for TranslationState {
    fn default() -> Self {
        Self::new(TranslatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_comment_replaced_and_flushed() {
        let mut state = TranslationState::default();
        state.set_pending_comment("/// old");
        state.set_pending_comment("/// new   ");
        state.emit_line("void f() {");
        assert!(state.pending_comment.is_none());
        assert_eq!(state.finish(), "/// new\nvoid f() {\n");
    }

    #[test]
    fn test_finish_flushes() {
        let mut state = TranslationState::default();
        state.set_pending_comment("/// trailing");
        assert_eq!(state.finish(), "/// trailing\n");
    }

    #[test]
    fn test_generate_fallback_counts() {
        let mut state = TranslationState::default();
        assert_eq!(state.next_generate_fallback(), "gen_block_1");
        assert_eq!(state.next_generate_fallback(), "gen_block_2");
    }
}
