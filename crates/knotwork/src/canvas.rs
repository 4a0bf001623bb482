use knotwork_engine::coords::Rect;
use knotwork_engine::paint::Color;
use knotwork_engine::scene::DrawList;
use knotwork_engine::text::FontId;

use crate::geometry::Vec2d;

/// Which of the two text faces a run uses.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Face {
    /// Monospace, for key names.
    Command,
    /// Serif, for descriptions.
    Description,
}

/// Loaded font handles. Either face may be missing if no font was found.
#[derive(Debug, Copy, Clone, Default)]
pub struct Fonts {
    pub command: Option<FontId>,
    pub description: Option<FontId>,
}

impl Fonts {
    fn get(&self, face: Face) -> Option<FontId> {
        match face {
            Face::Command => self.command,
            Face::Description => self.description.or(self.command),
        }
    }
}

/// Drawing surface handed to figures and the help panel each frame.
///
/// Records into the engine's `DrawList` in paint order; nothing touches the
/// GPU here, so everything drawn through a `Canvas` is testable headless.
pub struct Canvas<'a> {
    draw_list: &'a mut DrawList,
    fonts: Fonts,
    width: f64,
    height: f64,
}

impl<'a> Canvas<'a> {
    pub fn new(draw_list: &'a mut DrawList, width: f64, height: f64) -> Self {
        Self { draw_list, fonts: Fonts::default(), width, height }
    }

    pub fn with_fonts(mut self, fonts: Fonts) -> Self {
        self.fonts = fonts;
        self
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Covers the whole canvas with `color`.
    pub fn fill(&mut self, color: Color) {
        self.draw_list
            .push_rect(Rect::new(0.0, 0.0, self.width as f32, self.height as f32), color);
    }

    pub fn line(&mut self, from: Vec2d, to: Vec2d, width: f32, color: Color) {
        self.draw_list.push_line(from.to_vec2(), to.to_vec2(), width, color);
    }

    pub fn circle(&mut self, center: Vec2d, radius: f32, color: Color) {
        self.draw_list.push_circle(center.to_vec2(), radius, color);
    }

    /// Segments `points[i-1] -> points[i]` for every `i`, the first one
    /// closing the loop from the last point. Nothing for an empty slice.
    pub fn closed_polyline(&mut self, points: &[Vec2d], width: f32, color: Color) {
        let Some(&last) = points.last() else { return };
        let mut prev = last;
        for &p in points {
            self.line(prev, p, width, color);
            prev = p;
        }
    }

    /// Draws `text` with its top-left at `origin`. Skipped if the face has
    /// no font loaded.
    pub fn text(&mut self, text: &str, face: Face, origin: Vec2d, size: f32, color: Color) {
        let Some(font) = self.fonts.get(face) else {
            log::trace!("no font for {face:?}; skipping {text:?}");
            return;
        };
        self.draw_list.push_text(text, font, size, color, origin.to_vec2());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knotwork_engine::scene::DrawCmd;

    #[test]
    fn closed_polyline_wraps_to_first_point() {
        let mut dl = DrawList::new();
        let mut canvas = Canvas::new(&mut dl, 100.0, 100.0);
        let pts = [Vec2d::new(0.0, 0.0), Vec2d::new(10.0, 0.0), Vec2d::new(10.0, 10.0)];
        canvas.closed_polyline(&pts, 3.0, Color::WHITE);

        let segs: Vec<_> = dl
            .items()
            .iter()
            .map(|c| match c {
                DrawCmd::Line(l) => ((l.from.x, l.from.y), (l.to.x, l.to.y)),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            segs,
            vec![
                ((10.0, 10.0), (0.0, 0.0)),
                ((0.0, 0.0), (10.0, 0.0)),
                ((10.0, 0.0), (10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn empty_polyline_draws_nothing() {
        let mut dl = DrawList::new();
        Canvas::new(&mut dl, 10.0, 10.0).closed_polyline(&[], 3.0, Color::WHITE);
        assert!(dl.is_empty());
    }

    #[test]
    fn text_without_fonts_is_skipped() {
        let mut dl = DrawList::new();
        Canvas::new(&mut dl, 10.0, 10.0).text("F1", Face::Command, Vec2d::ZERO, 24.0, Color::WHITE);
        assert!(dl.is_empty());
    }

    #[test]
    fn fill_covers_canvas() {
        let mut dl = DrawList::new();
        Canvas::new(&mut dl, 800.0, 600.0).fill(Color::BLACK);
        match &dl.items()[0] {
            DrawCmd::Rect(r) => assert_eq!(r.rect, Rect::new(0.0, 0.0, 800.0, 600.0)),
            other => panic!("unexpected {other:?}"),
        }
    }
}
