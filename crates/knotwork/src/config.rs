use std::path::PathBuf;

use winit::dpi::LogicalSize;

use knotwork_engine::window::RuntimeConfig;

use crate::knot::DEFAULT_RESOLUTION;

/// Screensaver settings. `Default` reproduces the classic 800x600 setup.
#[derive(Debug, Clone, PartialEq)]
pub struct SaverConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Curve samples per anchor for new figures.
    pub smoothing_step: usize,
    pub anchor_radius: f32,
    pub line_width: f32,
    /// Seed for anchor velocities; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Monospace font for the help key column.
    pub command_font: Option<PathBuf>,
    /// Serif font for the help description column.
    pub description_font: Option<PathBuf>,
}

impl Default for SaverConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "MyScreenSaver".to_string(),
            smoothing_step: DEFAULT_RESOLUTION,
            anchor_radius: 3.0,
            line_width: 3.0,
            seed: None,
            command_font: None,
            description_font: None,
        }
    }
}

impl SaverConfig {
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Clamped to at least 1.
    pub fn smoothing_step(mut self, step: usize) -> Self {
        self.smoothing_step = step.max(1);
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn command_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.command_font = Some(path.into());
        self
    }

    pub fn description_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.description_font = Some(path.into());
        self
    }

    /// Fixed-size window matching the canvas.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width as f64, self.height as f64),
            resizable: false,
        }
    }
}
