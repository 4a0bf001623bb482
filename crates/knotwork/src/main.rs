use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use knotwork::{app, SaverConfig};
use knotwork_engine::logging::{init_logging, LoggingConfig};

/// Bouncing points joined by smooth closed curves.
///
/// Left click adds a point, any other button removes one. F1 shows the
/// remaining key bindings.
#[derive(Debug, Parser)]
#[command(name = "knotwork", version, about)]
struct Cli {
    /// Canvas width in pixels.
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Curve samples per anchor point.
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..))]
    steps: u64,

    /// Seed for point velocities, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Font file used for the help screen (both columns).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "knotwork=trace". Overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,
}

impl Cli {
    fn saver_config(&self) -> SaverConfig {
        let mut config = SaverConfig::default()
            .size(self.width, self.height)
            .smoothing_step(self.steps as usize)
            .seed(self.seed);
        if let Some(font) = &self.font {
            config = config.command_font(font).description_font(font);
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version land here too and are not failures.
            let usage_error = e.use_stderr();
            let _ = e.print();
            return if usage_error { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    init_logging(match &cli.log {
        Some(filter) => LoggingConfig::with_filter(filter),
        None => LoggingConfig::default(),
    });

    match app::run(cli.saver_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("knotwork failed: {e:#}");
            eprintln!("knotwork: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_classic_setup() {
        let cli = Cli::parse_from(["knotwork"]);
        assert_eq!(cli.saver_config(), SaverConfig::default());
    }

    #[test]
    fn cli_overrides() {
        let cli = Cli::parse_from([
            "knotwork", "--width", "1024", "--height", "768", "--steps", "4", "--seed", "9",
            "--font", "/tmp/mono.ttf",
        ]);
        let cfg = cli.saver_config();
        assert_eq!((cfg.width, cfg.height, cfg.smoothing_step), (1024, 768, 4));
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.command_font, Some(PathBuf::from("/tmp/mono.ttf")));
        assert_eq!(cfg.description_font, cfg.command_font);
    }

    #[test]
    fn zero_steps_is_a_usage_error() {
        assert!(Cli::try_parse_from(["knotwork", "--steps", "0"]).is_err());
    }
}
