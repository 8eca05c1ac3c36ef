//! Translation Module
//!
//! Contains the renderers that turn recognized constructs into their
//! documentation-stub form. Each module handles one kind of construct.

// Line translations
pub mod directive_translate;
pub mod declaration_translate;
pub mod passthrough_translate;

// Definition translations
pub mod enum_def_translate;

// Block stubs
pub mod stub_translate;

// Re-exports for convenience
pub use directive_translate::{is_directive, translate_c_define, translate_directive};
pub use declaration_translate::{is_declaration, normalize_decl_terminator};
pub use passthrough_translate::{is_region_boundary, render_as_comment};
pub use enum_def_translate::{process_enum_declaration, process_enum_def, render_enum, EnumDefResult};
pub use stub_translate::{
    render_assign_annotation,
    render_assign_stub,
    render_generate_stub,
    render_instantiation_stub,
    render_procedural_stub,
    render_subroutine_stub,
};
