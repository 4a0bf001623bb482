//! Paint model shared between the draw list and renderers.
//!
//! Only solid colors exist; every draw command carries one `Color`.

pub mod color;

pub use color::Color;
