//! Font loading.
//!
//! Glyph rasterization and atlas management live in `render::shapes::text`.

mod font_system;

pub use font_system::{FontId, FontSystem};
