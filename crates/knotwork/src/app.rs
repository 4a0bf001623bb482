use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use knotwork_engine::core::{App as EngineApp, AppControl, FrameCtx};
use knotwork_engine::device::GpuInit;
use knotwork_engine::paint::Color;
use knotwork_engine::render::shapes::{PrimitiveRenderer, TextRenderer};
use knotwork_engine::scene::DrawList;
use knotwork_engine::text::{FontId, FontSystem};
use knotwork_engine::window::Runtime;

use crate::canvas::{Canvas, Fonts};
use crate::config::SaverConfig;
use crate::screensaver::Screensaver;

const MONOSPACE_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Courier.dfont",
    "C:\\Windows\\Fonts\\cour.ttf",
];

const SERIF_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSerif-Regular.ttf",
    "/System/Library/Fonts/Times.ttc",
    "C:\\Windows\\Fonts\\times.ttf",
];

/// Opens the window and runs the screensaver until it quits.
///
/// Fails if an explicitly configured font cannot be loaded, or on any fatal
/// window/GPU error.
pub fn run(config: SaverConfig) -> Result<()> {
    let mut font_system = FontSystem::new();
    let fonts = Fonts {
        command: load_face(&mut font_system, config.command_font.as_deref(), MONOSPACE_CANDIDATES)
            .context("failed to load command font")?,
        description: load_face(&mut font_system, config.description_font.as_deref(), SERIF_CANDIDATES)
            .context("failed to load description font")?,
    };
    if fonts.command.is_none() && fonts.description.is_none() {
        log::warn!("no system font found; help text will not be shown (use --font)");
    }

    let mut saver = Screensaver::new(&config);
    saver.start();

    log::info!(
        "starting {}x{} screensaver ({} samples per anchor)",
        config.width,
        config.height,
        config.smoothing_step
    );

    let app = SaverApp {
        saver,
        width: config.width as f64,
        height: config.height as f64,
        draw_list: DrawList::new(),
        font_system,
        fonts,
        primitives: PrimitiveRenderer::new(),
        text: TextRenderer::new(),
    };

    // Colors are authored as display values, so skip the sRGB encode.
    let gpu_init = GpuInit { prefer_srgb: false, ..GpuInit::default() };
    Runtime::run(config.runtime_config(), gpu_init, app)
}

/// Loads `explicit` if given (errors are fatal), else the first readable
/// candidate. `Ok(None)` when nothing was found.
fn load_face(
    system: &mut FontSystem,
    explicit: Option<&Path>,
    candidates: &[&str],
) -> Result<Option<FontId>> {
    if let Some(path) = explicit {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let id = system
            .load_font(&bytes)
            .with_context(|| format!("parsing {}", path.display()))?;
        return Ok(Some(id));
    }

    for candidate in candidates.iter().map(PathBuf::from) {
        let Ok(bytes) = std::fs::read(&candidate) else { continue };
        match system.load_font(&bytes) {
            Ok(id) => {
                log::debug!("using font {}", candidate.display());
                return Ok(Some(id));
            }
            Err(e) => log::warn!("skipping {}: {e}", candidate.display()),
        }
    }
    Ok(None)
}

/// Engine-facing side of the screensaver: owns the renderers and the
/// per-frame draw list.
struct SaverApp {
    saver: Screensaver,
    width: f64,
    height: f64,

    draw_list: DrawList,
    font_system: FontSystem,
    fonts: Fonts,
    primitives: PrimitiveRenderer,
    text: TextRenderer,
}

impl EngineApp for SaverApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        if ctx.time.frame_index % 600 == 0 {
            log::trace!("frame {} (dt {:.4}s)", ctx.time.frame_index, ctx.time.dt);
        }

        self.draw_list.clear();
        let control = {
            let mut canvas =
                Canvas::new(&mut self.draw_list, self.width, self.height).with_fonts(self.fonts);
            self.saver.frame(&ctx.input_frame.events, &mut canvas)
        };

        // A loop that was already stopped records nothing.
        if self.draw_list.is_empty() {
            return Ok(control);
        }

        let (dl, fs) = (&self.draw_list, &self.font_system);
        let (primitives, text) = (&mut self.primitives, &mut self.text);

        ctx.render(Color::BLACK, |rctx, target| {
            primitives.render(rctx, target, dl);
            text.render(rctx, target, dl, fs);
        })?;

        Ok(control)
    }
}
