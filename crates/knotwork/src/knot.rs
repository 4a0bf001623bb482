use knotwork_engine::paint::Color;

use crate::canvas::Canvas;
use crate::figure::Figure;
use crate::geometry::Vec2d;
use crate::polyline::Polyline;

/// Samples per anchor when nothing else is configured.
pub const DEFAULT_RESOLUTION: usize = 15;

/// Weighted blend of `points[0..=degree]`.
///
/// `blend(p, a, 0) = p[0]` and
/// `blend(p, a, d) = p[d] * a + blend(p, a, d - 1) * (1 - a)`,
/// evaluated bottom-up.
///
/// # Panics
/// If `degree >= points.len()`.
pub fn blend(points: &[Vec2d], alpha: f64, degree: usize) -> Vec2d {
    points[1..=degree]
        .iter()
        .fold(points[0], |acc, &p| p * alpha + acc * (1.0 - alpha))
}

/// [`blend`] over the whole window. `None` for an empty window.
pub fn blend_window(points: &[Vec2d], alpha: f64) -> Option<Vec2d> {
    let degree = points.len().checked_sub(1)?;
    Some(blend(points, alpha, degree))
}

/// Closed smooth curve through a moving set of anchors.
///
/// Every anchor `a[i]` contributes `resolution` samples blended over the
/// window `(mid(a[i-2], a[i-1]), a[i-1], mid(a[i-1], a[i]))`, indices
/// wrapping around. The curve is rebuilt on each `advance`; with fewer than
/// three anchors it is empty.
pub struct Knot {
    anchors: Polyline,
    curve: Vec<Vec2d>,
    resolution: usize,
}

impl Knot {
    pub fn new() -> Self {
        Self::from_polyline(Polyline::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_polyline(Polyline::with_seed(seed))
    }

    fn from_polyline(anchors: Polyline) -> Self {
        Self { anchors, curve: Vec::new(), resolution: DEFAULT_RESOLUTION }
    }

    /// Sets samples per anchor; clamped to at least 1.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution.max(1);
        self
    }

    pub fn polyline(&self) -> &Polyline {
        &self.anchors
    }

    pub fn polyline_mut(&mut self) -> &mut Polyline {
        &mut self.anchors
    }

    /// Derived curve points from the last recomputation.
    pub fn curve(&self) -> &[Vec2d] {
        &self.curve
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn recompute_curve(&mut self) {
        self.curve.clear();

        let a = self.anchors.points();
        let n = a.len();
        if n < 3 {
            return;
        }

        let resolution = self.resolution;
        self.curve.reserve(n * resolution);
        let step = resolution as f64;

        for i in 0..n {
            // i-1 and i-2 wrap to the tail for the first anchors.
            let prev = a[(i + n - 1) % n];
            let prev2 = a[(i + n - 2) % n];
            let window = [Vec2d::midpoint(prev2, prev), prev, Vec2d::midpoint(prev, a[i])];

            self.curve
                .extend((0..resolution).filter_map(|k| blend_window(&window, k as f64 / step)));
        }
    }

    /// Physics step followed by a curve rebuild.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.anchors.advance(width, height);
        self.recompute_curve();
    }

    /// Renders the derived curve as a closed polyline.
    pub fn draw_outline(&self, canvas: &mut Canvas<'_>, width: f32, color: Color) {
        canvas.closed_polyline(&self.curve, width, color);
    }

    pub fn increase_resolution(&mut self) {
        self.resolution += 1;
    }

    pub fn decrease_resolution(&mut self) {
        self.resolution = self.resolution.saturating_sub(1).max(1);
    }
}

impl Default for Knot {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure for Knot {
    fn advance(&mut self, width: f64, height: f64) {
        Knot::advance(self, width, height);
    }

    fn draw_anchors(&self, canvas: &mut Canvas<'_>, radius: f32, color: Color) {
        self.anchors.draw_anchors(canvas, radius, color);
    }

    fn draw_outline(&self, canvas: &mut Canvas<'_>, width: f32, color: Color) {
        Knot::draw_outline(self, canvas, width, color);
    }

    fn add_anchor(&mut self, position: Vec2d) {
        self.anchors.add_anchor(position);
    }

    fn remove_anchor(&mut self, position: Vec2d) -> bool {
        self.anchors.remove_anchor(position)
    }

    fn clear(&mut self) {
        self.anchors.clear();
        self.curve.clear();
    }

    fn increase_resolution(&mut self) {
        Knot::increase_resolution(self);
    }

    fn decrease_resolution(&mut self) {
        Knot::decrease_resolution(self);
    }

    fn resolution(&self) -> Option<usize> {
        Some(self.resolution)
    }

    fn anchors(&self) -> &[Vec2d] {
        self.anchors.points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knotwork_engine::scene::DrawList;

    fn v(x: f64, y: f64) -> Vec2d {
        Vec2d::new(x, y)
    }

    fn recursive_blend(points: &[Vec2d], alpha: f64, degree: usize) -> Vec2d {
        if degree == 0 {
            return points[0];
        }
        points[degree] * alpha + recursive_blend(points, alpha, degree - 1) * (1.0 - alpha)
    }

    fn knot_with(points: &[Vec2d], resolution: usize) -> Knot {
        let mut knot = Knot::with_seed(3).with_resolution(resolution);
        for &p in points {
            knot.polyline_mut().add_anchor_with_velocity(p, Vec2d::ZERO);
        }
        knot.recompute_curve();
        knot
    }

    #[test]
    fn blend_endpoints() {
        let pts = [v(1.0, 2.0), v(5.0, 7.0), v(9.0, -3.0)];
        assert_eq!(blend(&pts, 0.0, 2), pts[0]);
        assert_eq!(blend(&pts, 1.0, 1), pts[1]);
        assert_eq!(blend(&pts, 0.3, 0), pts[0]);
    }

    #[test]
    fn fold_matches_recursion() {
        let pts = [v(0.0, 0.0), v(10.0, 3.0), v(7.5, 12.0), v(-4.0, 1.0)];
        for k in 0..=20 {
            let alpha = k as f64 / 20.0;
            for degree in 0..pts.len() {
                assert_eq!(blend(&pts, alpha, degree), recursive_blend(&pts, alpha, degree));
            }
        }
    }

    #[test]
    fn blend_window_uses_full_degree() {
        let pts = [v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0)];
        assert_eq!(blend_window(&pts, 0.5), Some(blend(&pts, 0.5, 2)));
        assert_eq!(blend_window(&[], 0.5), None);
    }

    #[test]
    fn fewer_than_three_anchors_give_no_curve() {
        let knot = knot_with(&[v(0.0, 0.0), v(10.0, 0.0)], 15);
        assert!(knot.curve().is_empty());
    }

    #[test]
    fn curve_has_resolution_samples_per_anchor() {
        let knot = knot_with(&[v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)], 4);
        assert_eq!(knot.curve().len(), 12);
        for p in knot.curve() {
            assert!(!knot.polyline().points().contains(p), "{p:?} is a raw anchor");
        }

        let knot = knot_with(&[v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0), v(0.0, 10.0)], 15);
        assert_eq!(knot.curve().len(), 60);
    }

    #[test]
    fn first_sample_is_window_start() {
        let knot = knot_with(&[v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)], 4);
        // i = 0: window starts at mid(a[-2], a[-1]) = mid((10,0), (10,10)).
        assert_eq!(knot.curve()[0], v(10.0, 5.0));
    }

    #[test]
    fn resolution_is_floor_clamped() {
        let mut knot = Knot::with_seed(0).with_resolution(1);
        knot.decrease_resolution();
        knot.decrease_resolution();
        assert_eq!(knot.resolution(), 1);
        knot.increase_resolution();
        assert_eq!(knot.resolution(), 2);

        assert_eq!(Knot::with_seed(0).with_resolution(0).resolution(), 1);
        assert_eq!(Knot::new().resolution(), DEFAULT_RESOLUTION);
    }

    #[test]
    fn resolution_change_applies_on_next_recompute() {
        let mut knot = knot_with(&[v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)], 4);
        knot.increase_resolution();
        assert_eq!(knot.curve().len(), 12);
        knot.advance(800.0, 600.0);
        assert_eq!(knot.curve().len(), 15);
    }

    #[test]
    fn outline_draws_curve_not_anchors() {
        let knot = knot_with(&[v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)], 4);
        let mut dl = DrawList::new();
        let mut canvas = Canvas::new(&mut dl, 800.0, 600.0);
        Figure::draw_outline(&knot, &mut canvas, 3.0, Color::WHITE);
        assert_eq!(dl.len(), 12);
    }

    #[test]
    fn clear_empties_anchors_and_curve() {
        let mut knot = knot_with(&[v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)], 4);
        Figure::clear(&mut knot);
        assert_eq!(knot.anchor_count(), 0);
        assert!(knot.curve().is_empty());
    }
}
