use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

/// Straight segment with round caps.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    /// Stroke width in logical pixels.
    pub width: f32,
    pub color: Color,
}

/// Filled disc.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Filled axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

/// Single-line text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the text block in logical pixels.
    pub origin: Vec2,
}

/// Renderer-agnostic draw command.
///
/// Adding a primitive:
/// - add a payload struct and a variant here
/// - add a `push_*` helper on `DrawList`
/// - teach `render::shapes::primitive` (or a new renderer) to draw it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Line(LineCmd),
    Circle(CircleCmd),
    Rect(RectCmd),
    Text(TextCmd),
}
