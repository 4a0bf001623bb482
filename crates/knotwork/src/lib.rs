//! Knotwork: an interactive screensaver of bouncing points and the smooth
//! closed curves ("knots") drawn through them.
//!
//! The simulation (`geometry`, `polyline`, `knot`, `screensaver`) only talks
//! to the engine through a [`canvas::Canvas`] over a `DrawList` and through
//! engine `InputEvent`s, so it runs headless in tests. `app` wires it to the
//! window and GPU runtime.

pub mod app;
pub mod canvas;
pub mod command;
pub mod config;
pub mod figure;
pub mod geometry;
pub mod help;
pub mod knot;
pub mod polyline;
pub mod screensaver;

pub use config::SaverConfig;
pub use figure::Figure;
pub use geometry::Vec2d;
pub use knot::Knot;
pub use polyline::Polyline;
pub use screensaver::{LoopState, Phase, Screensaver};
