use knotwork_engine::paint::Color;

use crate::canvas::Canvas;
use crate::geometry::Vec2d;

/// A user-editable animated shape owned by the screensaver.
///
/// `Polyline` draws its anchors joined by straight segments; `Knot` draws a
/// smoothed curve through them. Resolution only means something for curves,
/// so those methods default to no-ops.
pub trait Figure {
    /// Moves every anchor one step inside a `width`×`height` canvas.
    fn advance(&mut self, width: f64, height: f64);

    fn draw_anchors(&self, canvas: &mut Canvas<'_>, radius: f32, color: Color);

    fn draw_outline(&self, canvas: &mut Canvas<'_>, width: f32, color: Color);

    fn add_anchor(&mut self, position: Vec2d);

    /// Removes one anchor at or near `position`; `false` if none matched.
    fn remove_anchor(&mut self, position: Vec2d) -> bool;

    /// Drops every anchor.
    fn clear(&mut self);

    fn increase_resolution(&mut self) {}

    fn decrease_resolution(&mut self) {}

    /// Samples per anchor, for figures that smooth.
    fn resolution(&self) -> Option<usize> {
        None
    }

    fn anchors(&self) -> &[Vec2d];

    fn anchor_count(&self) -> usize {
        self.anchors().len()
    }
}
