use knotwork_engine::core::AppControl;
use knotwork_engine::input::InputEvent;
use knotwork_engine::paint::Color;

use crate::canvas::Canvas;
use crate::command::Command;
use crate::config::SaverConfig;
use crate::figure::Figure;
use crate::help::draw_help;
use crate::knot::Knot;

/// Lifecycle of the animation loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Stopped,
    Running,
    Paused,
}

/// Mutable loop flags, owned by the [`Screensaver`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LoopState {
    pub phase: Phase,
    /// Outline hue in degrees, `0..360`.
    pub hue: u16,
    pub show_help: bool,
}

impl Default for LoopState {
    fn default() -> Self {
        Self { phase: Phase::Stopped, hue: 0, show_help: false }
    }
}

/// The figures plus the loop that edits, animates and draws them.
///
/// Input targets the latest figure (the last one) when adding anchors and
/// every figure when removing anchors or changing resolution.
pub struct Screensaver {
    figures: Vec<Box<dyn Figure>>,
    state: LoopState,
    width: f64,
    height: f64,
    smoothing_step: usize,
    anchor_radius: f32,
    line_width: f32,
    rng: fastrand::Rng,
}

impl Screensaver {
    /// Stopped loop holding one empty knot.
    pub fn new(config: &SaverConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        let mut saver = Self {
            figures: Vec::new(),
            state: LoopState::default(),
            width: config.width as f64,
            height: config.height as f64,
            smoothing_step: config.smoothing_step,
            anchor_radius: config.anchor_radius,
            line_width: config.line_width,
            rng,
        };
        saver.push_knot();
        saver
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn figures(&self) -> &[Box<dyn Figure>] {
        &self.figures
    }

    pub fn is_stopped(&self) -> bool {
        self.state.phase == Phase::Stopped
    }

    /// Enters `Running` with every figure emptied; the figure list is kept.
    pub fn start(&mut self) {
        for figure in &mut self.figures {
            figure.clear();
        }
        self.state.phase = Phase::Running;
        log::debug!("loop started with {} figure(s)", self.figures.len());
    }

    pub fn stop(&mut self) {
        self.state.phase = Phase::Stopped;
    }

    fn push_knot(&mut self) {
        let knot = Knot::with_seed(self.rng.u64(..)).with_resolution(self.smoothing_step);
        self.figures.push(Box::new(knot));
    }

    /// Applies one command. Ignored once stopped.
    pub fn apply(&mut self, command: Command) {
        if self.is_stopped() {
            return;
        }
        self.execute(command);
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Quit => {
                log::info!("quit requested");
                self.stop();
            }
            Command::Restart => {
                log::debug!("restart");
                self.start();
            }
            Command::TogglePause => {
                self.state.phase = match self.state.phase {
                    Phase::Running => Phase::Paused,
                    Phase::Paused => Phase::Running,
                    Phase::Stopped => Phase::Stopped,
                };
                log::debug!("phase is now {:?}", self.state.phase);
            }
            Command::ToggleHelp => self.state.show_help = !self.state.show_help,
            Command::NewFigure => {
                self.push_knot();
                log::debug!("new figure; {} total", self.figures.len());
            }
            Command::IncreaseResolution => {
                for figure in &mut self.figures {
                    figure.increase_resolution();
                }
            }
            Command::DecreaseResolution => {
                for figure in &mut self.figures {
                    figure.decrease_resolution();
                }
            }
            Command::AddPoint(at) => {
                if let Some(latest) = self.figures.last_mut() {
                    latest.add_anchor(at);
                }
            }
            Command::RemovePoint(at) => {
                for figure in &mut self.figures {
                    figure.remove_anchor(at);
                }
            }
        }
    }

    /// Runs one frame: applies `events` in order, then draws and advances.
    ///
    /// The stopped flag is checked only on entry. A quit inside `events`
    /// lets the rest of the batch and the drawing finish; the returned
    /// `Exit` then ends the loop after this frame is presented.
    pub fn frame<'e, I>(&mut self, events: I, canvas: &mut Canvas<'_>) -> AppControl
    where
        I: IntoIterator<Item = &'e InputEvent>,
    {
        if self.is_stopped() {
            return AppControl::Exit;
        }

        for event in events {
            if let Some(command) = Command::from_event(event) {
                self.execute(command);
            }
        }

        canvas.fill(Color::BLACK);

        self.state.hue = (self.state.hue + 1) % 360;
        let color = Color::from_hsl(self.state.hue as f32, 100.0, 50.0);
        let paused = self.state.phase == Phase::Paused;

        for figure in &mut self.figures {
            figure.draw_anchors(canvas, self.anchor_radius, Color::WHITE);
            figure.draw_outline(canvas, self.line_width, color);
            if !paused {
                figure.advance(self.width, self.height);
            }
        }

        if self.state.show_help {
            draw_help(canvas);
        }

        if self.is_stopped() {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2d;
    use knotwork_engine::input::{Key, MouseButton};
    use knotwork_engine::scene::{DrawCmd, DrawList};

    fn saver() -> Screensaver {
        let mut s = Screensaver::new(&SaverConfig::default().seed(Some(11)));
        s.start();
        s
    }

    fn run(s: &mut Screensaver, events: &[InputEvent]) -> (AppControl, DrawList) {
        let mut dl = DrawList::new();
        let control = s.frame(events, &mut Canvas::new(&mut dl, 800.0, 600.0));
        (control, dl)
    }

    fn click(x: f32, y: f32) -> InputEvent {
        InputEvent::button_pressed(MouseButton::Left, x, y)
    }

    #[test]
    fn starts_with_one_empty_knot() {
        let s = Screensaver::new(&SaverConfig::default());
        assert_eq!(s.figures().len(), 1);
        assert_eq!(s.figures()[0].anchor_count(), 0);
        assert_eq!(s.figures()[0].resolution(), Some(15));
        assert_eq!(s.state().phase, Phase::Stopped);
    }

    #[test]
    fn clicks_add_to_latest_figure() {
        let mut s = saver();
        run(&mut s, &[click(10.0, 10.0), InputEvent::key_pressed(Key::N), click(20.0, 20.0)]);

        assert_eq!(s.figures().len(), 2);
        assert_eq!(s.figures()[0].anchor_count(), 1);
        assert_eq!(s.figures()[1].anchor_count(), 1);
    }

    #[test]
    fn other_button_removes_from_every_figure() {
        let mut s = saver();
        let p = InputEvent::key_pressed(Key::P);
        // Pause first so the anchors stay where they were placed.
        run(&mut s, &[p.clone(), click(10.0, 10.0), InputEvent::key_pressed(Key::N), click(10.0, 10.0)]);
        run(&mut s, &[InputEvent::button_pressed(MouseButton::Right, 10.0, 10.0)]);

        assert!(s.figures().iter().all(|f| f.anchor_count() == 0));
    }

    #[test]
    fn paused_frames_leave_anchors_in_place() {
        let mut s = saver();
        run(&mut s, &[InputEvent::key_pressed(Key::P), click(100.0, 100.0), click(200.0, 150.0)]);
        let before = s.figures()[0].anchors().to_vec();

        for _ in 0..5 {
            run(&mut s, &[]);
        }
        assert_eq!(s.figures()[0].anchors(), before.as_slice());
        assert_eq!(s.state().phase, Phase::Paused);
    }

    #[test]
    fn running_frames_move_anchors() {
        let mut s = saver();
        run(&mut s, &[click(100.0, 100.0)]);
        let before = s.figures()[0].anchors()[0];
        run(&mut s, &[]);
        assert_ne!(s.figures()[0].anchors()[0], before);
    }

    #[test]
    fn restart_clears_anchors_but_keeps_figures() {
        let mut s = saver();
        run(&mut s, &[
            click(1.0, 1.0),
            InputEvent::key_pressed(Key::N),
            click(2.0, 2.0),
            InputEvent::key_pressed(Key::P),
        ]);
        run(&mut s, &[InputEvent::key_pressed(Key::R)]);

        assert_eq!(s.figures().len(), 2);
        assert!(s.figures().iter().all(|f| f.anchor_count() == 0));
        assert_eq!(s.state().phase, Phase::Running);
    }

    #[test]
    fn quit_finishes_the_frame_then_exits() {
        let mut s = saver();
        let (control, dl) = run(&mut s, &[InputEvent::key_pressed(Key::Escape), click(5.0, 5.0)]);

        assert_eq!(control, AppControl::Exit);
        assert!(s.is_stopped());
        // The click after the quit still lands, and the last frame is drawn.
        assert_eq!(s.figures()[0].anchor_count(), 1);
        assert!(matches!(&dl.items()[0], DrawCmd::Rect(r) if r.color == Color::BLACK));
        assert!(dl.items().iter().any(|c| matches!(c, DrawCmd::Circle(_))));

        let (control, dl) = run(&mut s, &[click(50.0, 50.0)]);
        assert_eq!(control, AppControl::Exit);
        assert!(dl.is_empty());
        assert_eq!(s.figures()[0].anchor_count(), 1);
    }

    #[test]
    fn stopped_loop_ignores_commands() {
        let mut s = saver();
        s.stop();
        s.apply(Command::AddPoint(Vec2d::new(1.0, 1.0)));
        assert_eq!(s.figures()[0].anchor_count(), 0);
    }

    #[test]
    fn close_request_stops() {
        let mut s = saver();
        let (control, _) = run(&mut s, &[InputEvent::CloseRequested]);
        assert_eq!(control, AppControl::Exit);
    }

    #[test]
    fn resolution_keys_touch_every_figure_with_floor() {
        let mut s = saver();
        run(&mut s, &[InputEvent::key_pressed(Key::N), InputEvent::key_pressed(Key::NumpadAdd)]);
        assert!(s.figures().iter().all(|f| f.resolution() == Some(16)));

        let minus: Vec<_> = (0..40).map(|_| InputEvent::key_pressed(Key::NumpadSubtract)).collect();
        run(&mut s, &minus);
        assert!(s.figures().iter().all(|f| f.resolution() == Some(1)));
    }

    #[test]
    fn hue_cycles_and_wraps() {
        let mut s = saver();
        run(&mut s, &[]);
        assert_eq!(s.state().hue, 1);
        for _ in 0..359 {
            run(&mut s, &[]);
        }
        assert_eq!(s.state().hue, 0);
    }

    #[test]
    fn frame_clears_then_draws_figures() {
        let mut s = saver();
        let (_, dl) = run(&mut s, &[click(100.0, 100.0), click(200.0, 100.0), click(150.0, 200.0)]);

        assert!(matches!(&dl.items()[0], DrawCmd::Rect(r) if r.color == Color::BLACK));
        let circles: Vec<_> = dl
            .items()
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Circle(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 3);
        assert!(circles.iter().all(|c| c.radius == 3.0 && c.color == Color::WHITE));
        // Curve is built on advance, so the first frame has no outline yet.
        let (_, dl) = run(&mut s, &[]);
        let segments = dl.items().iter().filter(|c| matches!(c, DrawCmd::Line(_))).count();
        assert_eq!(segments, 3 * 15);
    }

    #[test]
    fn help_overlay_is_drawn_after_figures() {
        let mut s = saver();
        let (_, dl) = run(&mut s, &[click(100.0, 100.0), InputEvent::key_pressed(Key::F1)]);
        assert!(s.state().show_help);

        let help_bg = Color::from_rgb_u8(50, 50, 50);
        let bg_index = dl
            .items()
            .iter()
            .position(|c| matches!(c, DrawCmd::Rect(r) if r.color == help_bg));
        let anchor_index = dl.items().iter().position(|c| matches!(c, DrawCmd::Circle(_)));
        assert!(anchor_index < bg_index, "{anchor_index:?} vs {bg_index:?}");

        run(&mut s, &[InputEvent::key_pressed(Key::F1)]);
        assert!(!s.state().show_help);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a = saver();
        let mut b = saver();
        for s in [&mut a, &mut b] {
            run(s, &[click(300.0, 300.0)]);
            run(s, &[]);
        }
        assert_eq!(a.figures()[0].anchors(), b.figures()[0].anchors());
        assert_ne!(a.figures()[0].anchors()[0], Vec2d::new(300.0, 300.0));
    }
}
