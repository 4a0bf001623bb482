//! Shape renderers.
//!
//! Paint order within a frame: all primitives in list order, then text.

mod common;

pub mod primitive;
pub mod text;

pub use primitive::PrimitiveRenderer;
pub use text::TextRenderer;
