use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

use super::cmd::{CircleCmd, DrawCmd, LineCmd, RectCmd, TextCmd};

/// Recorded draw stream for one frame.
///
/// `push_*` is O(1). `clear()` keeps the allocation, so a list reused across
/// frames stops allocating once warmed up.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded commands, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Commands in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    /// Records a segment. Non-positive widths are dropped.
    pub fn push_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if width <= 0.0 || !from.is_finite() || !to.is_finite() {
            return;
        }
        self.push(DrawCmd::Line(LineCmd { from, to, width, color }));
    }

    /// Records a solid circle. Non-positive radii are dropped.
    pub fn push_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 || !center.is_finite() {
            return;
        }
        self.push(DrawCmd::Circle(CircleCmd { center, radius, color }));
    }

    /// Records a solid rectangle. Empty rectangles are dropped.
    pub fn push_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() || !rect.is_finite() {
            return;
        }
        self.push(DrawCmd::Rect(RectCmd { rect, color }));
    }

    /// Records a text run.
    pub fn push_text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
    ) {
        self.push(DrawCmd::Text(TextCmd {
            text: text.into(),
            font,
            size,
            color,
            origin,
        }));
    }

    /// Iterates non-text commands, the set drawn by the primitive renderer.
    pub fn primitives(&self) -> impl Iterator<Item = &DrawCmd> {
        self.items.iter().filter(|c| !matches!(c, DrawCmd::Text(_)))
    }

    /// Iterates text commands in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextCmd> {
        self.items.iter().filter_map(|c| match c {
            DrawCmd::Text(t) => Some(t),
            _ => None,
        })
    }
}
