use knotwork_engine::paint::Color;

use crate::canvas::{Canvas, Face};
use crate::geometry::Vec2d;

/// Key / description rows, top to bottom.
pub const HELP_ROWS: [(&str, &str); 8] = [
    ("F1", "Show Help"),
    ("R", "Restart"),
    ("P", "Pause/Play"),
    ("N", "New Figure"),
    ("Num+", "More points"),
    ("Num-", "Less points"),
    ("Left Mouse Button", "Create point"),
    ("Right Mouse Button", "Delete point"),
];

const FIRST_ROW_Y: f64 = 100.0;
const ROW_SPACING: f64 = 30.0;
const KEY_X: f64 = 100.0;
const DESCRIPTION_X: f64 = 500.0;
const TEXT_SIZE: f32 = 24.0;
const BORDER_WIDTH: f32 = 5.0;

fn background() -> Color {
    Color::from_rgb_u8(50, 50, 50)
}

fn border() -> Color {
    Color::from_rgb_u8(255, 50, 50)
}

fn text_color() -> Color {
    Color::from_rgb_u8(128, 128, 255)
}

/// Paints the help overlay over everything drawn so far.
pub fn draw_help(canvas: &mut Canvas<'_>) {
    canvas.fill(background());

    let (w, h) = (canvas.width(), canvas.height());
    let frame = [Vec2d::new(0.0, 0.0), Vec2d::new(w, 0.0), Vec2d::new(w, h), Vec2d::new(0.0, h)];
    canvas.closed_polyline(&frame, BORDER_WIDTH, border());

    for (i, (key, description)) in HELP_ROWS.iter().enumerate() {
        let y = FIRST_ROW_Y + ROW_SPACING * i as f64;
        canvas.text(key, Face::Command, Vec2d::new(KEY_X, y), TEXT_SIZE, text_color());
        canvas.text(description, Face::Description, Vec2d::new(DESCRIPTION_X, y), TEXT_SIZE, text_color());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Fonts;
    use knotwork_engine::scene::{DrawCmd, DrawList};
    use knotwork_engine::text::FontId;

    #[test]
    fn panel_background_then_border() {
        let mut dl = DrawList::new();
        draw_help(&mut Canvas::new(&mut dl, 800.0, 600.0));

        assert!(matches!(dl.items()[0], DrawCmd::Rect(_)));
        let borders: Vec<_> = dl
            .items()
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Line(l) => Some(l),
                _ => None,
            })
            .collect();
        assert_eq!(borders.len(), 4);
        assert!(borders.iter().all(|l| l.width == BORDER_WIDTH && l.color == border()));
        // No fonts loaded: no text commands.
        assert_eq!(dl.texts().count(), 0);
    }

    #[test]
    fn rows_are_laid_out_in_two_columns() {
        let (mono, serif) = (FontId::from_index(0), FontId::from_index(1));
        let mut dl = DrawList::new();
        let mut canvas = Canvas::new(&mut dl, 800.0, 600.0)
            .with_fonts(Fonts { command: Some(mono), description: Some(serif) });
        draw_help(&mut canvas);

        let texts: Vec<_> = dl.texts().collect();
        assert_eq!(texts.len(), HELP_ROWS.len() * 2);

        for (i, pair) in texts.chunks(2).enumerate() {
            let y = 100.0 + 30.0 * i as f32;
            assert_eq!(pair[0].text, HELP_ROWS[i].0);
            assert_eq!((pair[0].origin.x, pair[0].origin.y, pair[0].font), (100.0, y, mono));
            assert_eq!(pair[1].text, HELP_ROWS[i].1);
            assert_eq!((pair[1].origin.x, pair[1].origin.y, pair[1].font), (500.0, y, serif));
            assert_eq!(pair[0].size, 24.0);
            assert_eq!(pair[0].color, Color::from_rgb_u8(128, 128, 255));
        }
    }
}
