//! Lowering Module
//!
//! Contains the analysis passes that recognize and bound multi-line
//! constructs before they are rendered. These modules handle depth counting,
//! look-ahead operations and block extraction.

// Depth tracking
pub mod depth_tracking_lowering;

// Look-ahead utilities
pub mod lookahead_lowering;

// Multi-line construct handling
pub mod block_extract_lowering;
pub mod multiline_assign_lowering;
pub mod instantiation_lowering;

// Re-exports for convenience
pub use depth_tracking_lowering::{
    count_delimiters,
    BlockDepth,
    Delimiters,
    FUNCTION_DELIMITERS,
    GENERATE_DELIMITERS,
    PROCEDURAL_DELIMITERS,
    TASK_DELIMITERS,
};
pub use lookahead_lowering::{check_next_line_begin_label, procedural_kind, procedural_label};
pub use block_extract_lowering::{
    extract_generate,
    extract_procedural,
    extract_subroutine,
    infer_generate_label,
    subroutine_kind,
};
pub use multiline_assign_lowering::{assign_start, extract_assign};
pub use instantiation_lowering::{find_instantiations, match_instantiation, DEFAULT_LOOKAHEAD};
