use core::ops::Range;

use knotwork_engine::paint::Color;

use crate::canvas::Canvas;
use crate::figure::Figure;
use crate::geometry::Vec2d;

/// Per-axis range new anchor speeds are drawn from, in pixels per frame.
pub const SPEED_RANGE: Range<f64> = 0.001..1.1;

/// Slack for the approximate removal pass, per axis.
const REMOVE_EPSILON: Vec2d = Vec2d::new(0.5, 0.5);

/// Ordered anchor points, each moving with its own velocity.
///
/// `points[i]` moves by `velocities[i]`; both vectors always have the same
/// length.
pub struct Polyline {
    points: Vec<Vec2d>,
    velocities: Vec<Vec2d>,
    rng: fastrand::Rng,
}

impl Polyline {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Polyline whose anchor speeds are reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self { points: Vec::new(), velocities: Vec::new(), rng }
    }

    pub fn points(&self) -> &[Vec2d] {
        &self.points
    }

    pub fn velocities(&self) -> &[Vec2d] {
        &self.velocities
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends an anchor with a random velocity from [`SPEED_RANGE`] on
    /// each axis.
    pub fn add_anchor(&mut self, position: Vec2d) {
        let velocity = Vec2d::new(self.random_speed(), self.random_speed());
        self.add_anchor_with_velocity(position, velocity);
    }

    /// Appends an anchor with a chosen velocity.
    pub fn add_anchor_with_velocity(&mut self, position: Vec2d, velocity: Vec2d) {
        self.points.push(position);
        self.velocities.push(velocity);
    }

    fn random_speed(&mut self) -> f64 {
        SPEED_RANGE.start + self.rng.f64() * (SPEED_RANGE.end - SPEED_RANGE.start)
    }

    /// Removes at most one anchor (and its velocity).
    ///
    /// The first anchor exactly equal to `target` wins. Otherwise the first
    /// anchor `p` in storage order with `target > p - eps || target < p + eps`
    /// is removed; with the componentwise order that accepts any anchor that
    /// is not diagonally offset across both axes. Misses are logged, never
    /// reported as errors.
    pub fn remove_anchor(&mut self, target: Vec2d) -> bool {
        let index = self.points.iter().position(|&p| p == target).or_else(|| {
            log::info!("no anchor at ({}, {}); trying close points", target.x, target.y);
            self.points
                .iter()
                .position(|&p| target > p - REMOVE_EPSILON || target < p + REMOVE_EPSILON)
        });

        match index {
            Some(i) => {
                self.points.remove(i);
                self.velocities.remove(i);
                true
            }
            None => {
                log::info!("no anchor near ({}, {}); nothing removed", target.x, target.y);
                false
            }
        }
    }

    /// Moves every anchor by its velocity, then reflects velocities that
    /// point out of the `width`×`height` box from where the anchor now is.
    pub fn advance(&mut self, width: f64, height: f64) {
        for (p, v) in self.points.iter_mut().zip(self.velocities.iter_mut()) {
            *p = *p + *v;

            if (p.x <= 0.0 && v.x < 0.0) || (p.x >= width && v.x > 0.0) {
                v.x = -v.x;
            }
            if (p.y <= 0.0 && v.y < 0.0) || (p.y >= height && v.y > 0.0) {
                v.y = -v.y;
            }
        }
    }

    pub fn draw_anchors(&self, canvas: &mut Canvas<'_>, radius: f32, color: Color) {
        for &p in &self.points {
            canvas.circle(p, radius, color);
        }
    }

    /// Segments between consecutive anchors, closed back to the first.
    pub fn draw_outline(&self, canvas: &mut Canvas<'_>, width: f32, color: Color) {
        canvas.closed_polyline(&self.points, width, color);
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.velocities.clear();
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure for Polyline {
    fn advance(&mut self, width: f64, height: f64) {
        Polyline::advance(self, width, height);
    }

    fn draw_anchors(&self, canvas: &mut Canvas<'_>, radius: f32, color: Color) {
        Polyline::draw_anchors(self, canvas, radius, color);
    }

    fn draw_outline(&self, canvas: &mut Canvas<'_>, width: f32, color: Color) {
        Polyline::draw_outline(self, canvas, width, color);
    }

    fn add_anchor(&mut self, position: Vec2d) {
        Polyline::add_anchor(self, position);
    }

    fn remove_anchor(&mut self, position: Vec2d) -> bool {
        Polyline::remove_anchor(self, position)
    }

    fn clear(&mut self) {
        Polyline::clear(self);
    }

    fn anchors(&self) -> &[Vec2d] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knotwork_engine::scene::{DrawCmd, DrawList};
    use proptest::prelude::*;

    fn v(x: f64, y: f64) -> Vec2d {
        Vec2d::new(x, y)
    }

    #[test]
    fn speeds_are_drawn_from_range() {
        let mut line = Polyline::with_seed(7);
        for i in 0..200 {
            line.add_anchor(v(i as f64, i as f64));
        }
        assert_eq!(line.points().len(), line.velocities().len());
        for vel in line.velocities() {
            assert!(SPEED_RANGE.contains(&vel.x), "{vel:?}");
            assert!(SPEED_RANGE.contains(&vel.y), "{vel:?}");
        }
    }

    #[test]
    fn same_seed_same_speeds() {
        let mut a = Polyline::with_seed(42);
        let mut b = Polyline::with_seed(42);
        a.add_anchor(v(1.0, 1.0));
        b.add_anchor(v(1.0, 1.0));
        assert_eq!(a.velocities(), b.velocities());
    }

    #[test]
    fn exact_removal_takes_matching_velocity() {
        let mut line = Polyline::with_seed(1);
        line.add_anchor_with_velocity(v(10.0, 10.0), v(0.1, 0.1));
        line.add_anchor_with_velocity(v(20.0, 20.0), v(0.2, 0.2));
        line.add_anchor_with_velocity(v(30.0, 30.0), v(0.3, 0.3));

        assert!(line.remove_anchor(v(20.0, 20.0)));
        assert_eq!(line.points(), &[v(10.0, 10.0), v(30.0, 30.0)]);
        assert_eq!(line.velocities(), &[v(0.1, 0.1), v(0.3, 0.3)]);
    }

    #[test]
    fn approximate_removal_takes_first_candidate_in_storage_order() {
        let mut line = Polyline::with_seed(1);
        line.add_anchor(v(300.0, 300.0));
        line.add_anchor(v(100.2, 100.1));

        // Not an exact hit; (300, 300) is stored first and lies up-right of
        // the target, so `target < p + eps` accepts it.
        assert!(line.remove_anchor(v(100.0, 100.0)));
        assert_eq!(line.points(), &[v(100.2, 100.1)]);
        assert_eq!(line.velocities().len(), 1);
    }

    #[test]
    fn removal_misses_when_offset_crosses_axes() {
        let mut line = Polyline::with_seed(1);
        line.add_anchor(v(50.0, 50.0));

        assert!(!line.remove_anchor(v(0.0, 100.0)));
        assert_eq!(line.len(), 1);
    }

    #[test]
    fn removal_from_empty_is_a_noop() {
        let mut line = Polyline::with_seed(1);
        assert!(!line.remove_anchor(v(1.0, 1.0)));
        assert!(line.is_empty());
    }

    #[test]
    fn advance_moves_then_reflects_at_far_edge() {
        let mut line = Polyline::with_seed(1);
        line.add_anchor_with_velocity(v(799.0, 300.0), v(0.5, 0.0));

        line.advance(800.0, 600.0);
        assert_eq!(line.points()[0], v(799.5, 300.0));
        assert_eq!(line.velocities()[0].x, 0.5);

        line.advance(800.0, 600.0);
        assert_eq!(line.points()[0], v(800.0, 300.0));
        assert_eq!(line.velocities()[0].x, -0.5);

        line.advance(800.0, 600.0);
        assert_eq!(line.points()[0], v(799.5, 300.0));
        assert_eq!(line.velocities()[0].x, -0.5);
    }

    #[test]
    fn advance_reflects_at_near_edge() {
        let mut line = Polyline::with_seed(1);
        line.add_anchor_with_velocity(v(0.5, 0.25), v(-1.0, -0.5));

        line.advance(800.0, 600.0);
        assert_eq!(line.points()[0], v(-0.5, -0.25));
        assert_eq!(line.velocities()[0], v(1.0, 0.5));
    }

    #[test]
    fn advance_reflects_y_at_height() {
        let mut line = Polyline::with_seed(1);
        line.add_anchor_with_velocity(v(300.0, 599.5), v(0.0, 0.5));
        line.add_anchor_with_velocity(v(799.5, 300.0), v(0.5, 0.25));

        line.advance(800.0, 600.0);
        assert_eq!(line.points()[0], v(300.0, 600.0));
        assert_eq!(line.velocities()[0], v(0.0, -0.5));

        // Hitting the right edge flips x only.
        assert_eq!(line.points()[1], v(800.0, 300.25));
        assert_eq!(line.velocities()[1], v(-0.5, 0.25));

        line.advance(800.0, 600.0);
        assert_eq!(line.points()[0], v(300.0, 599.5));
        assert_eq!(line.velocities()[0].y, -0.5);
    }

    #[test]
    fn boxed_polyline_draws_straight_segments() {
        let mut figure: Box<dyn Figure> = Box::new(Polyline::with_seed(3));
        figure.add_anchor(v(10.0, 10.0));
        figure.add_anchor(v(60.0, 10.0));
        figure.add_anchor(v(60.0, 40.0));

        assert_eq!(figure.resolution(), None);
        figure.increase_resolution();
        assert_eq!(figure.resolution(), None);
        assert_eq!(figure.anchor_count(), 3);

        let mut dl = DrawList::new();
        let mut canvas = Canvas::new(&mut dl, 800.0, 600.0);
        figure.draw_outline(&mut canvas, 3.0, Color::WHITE);

        let ends: Vec<_> = dl
            .items()
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Line(l) => Some((l.from, l.to)),
                _ => None,
            })
            .collect();
        // Closing segment first, then the anchors in order.
        let expected = [
            (v(60.0, 40.0), v(10.0, 10.0)),
            (v(10.0, 10.0), v(60.0, 10.0)),
            (v(60.0, 10.0), v(60.0, 40.0)),
        ];
        assert_eq!(ends.len(), expected.len());
        for ((from, to), (a, b)) in ends.iter().zip(expected) {
            assert_eq!((*from, *to), (a.to_vec2(), b.to_vec2()));
        }

        assert!(figure.remove_anchor(v(60.0, 40.0)));
        figure.clear();
        assert_eq!(figure.anchor_count(), 0);
    }

    #[test]
    fn draw_outline_wraps_and_anchors_are_circles() {
        let mut line = Polyline::with_seed(1);
        line.add_anchor(v(0.0, 0.0));
        line.add_anchor(v(5.0, 0.0));

        let mut dl = DrawList::new();
        let mut canvas = Canvas::new(&mut dl, 800.0, 600.0);
        line.draw_anchors(&mut canvas, 3.0, Color::WHITE);
        line.draw_outline(&mut canvas, 3.0, Color::WHITE);

        let circles = dl.items().iter().filter(|c| matches!(c, DrawCmd::Circle(_))).count();
        let lines = dl.items().iter().filter(|c| matches!(c, DrawCmd::Line(_))).count();
        assert_eq!((circles, lines), (2, 2));
    }

    #[test]
    fn clear_drops_everything() {
        let mut line = Polyline::with_seed(1);
        line.add_anchor(v(1.0, 2.0));
        line.clear();
        assert!(line.points().is_empty());
        assert!(line.velocities().is_empty());
    }

    proptest! {
        #[test]
        fn add_then_remove_restores_count(
            seed in any::<u64>(),
            existing in prop::collection::vec((0.0f64..800.0, 0.0f64..600.0), 0..8),
            x in 0.0f64..800.0,
            y in 0.0f64..600.0,
        ) {
            let mut line = Polyline::with_seed(seed);
            for (ex, ey) in existing {
                line.add_anchor(v(ex, ey));
            }
            let before = line.len();

            line.add_anchor(v(x, y));
            prop_assert!(line.remove_anchor(v(x, y)));

            prop_assert_eq!(line.len(), before);
            prop_assert_eq!(line.velocities().len(), before);
        }

        #[test]
        fn advance_inside_bounds_keeps_velocity_signs(
            x in 2.0f64..798.0,
            y in 2.0f64..598.0,
            vx in -1.1f64..1.1,
            vy in -1.1f64..1.1,
        ) {
            let mut line = Polyline::with_seed(0);
            line.add_anchor_with_velocity(v(x, y), v(vx, vy));
            line.advance(800.0, 600.0);

            let after = line.velocities()[0];
            prop_assert_eq!(after.x.signum(), vx.signum());
            prop_assert_eq!(after.y.signum(), vy.signum());
        }
    }
}
