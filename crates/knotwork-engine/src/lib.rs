//! Knotwork engine crate.
//!
//! Window, GPU surface, input translation and 2D renderers used by the
//! knotwork screensaver. The animation core only talks to this crate through
//! `scene::DrawList` and `input::InputEvent`.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;

mod error;

pub use error::EngineError;
