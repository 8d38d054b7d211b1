use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing::{Level, warn};

use tiled_mandelbrot::core::data::render_config::{
    DEFAULT_ESCAPE_RADIUS, DEFAULT_GRID_TILES, DEFAULT_MAX_INFLIGHT, DEFAULT_MAX_ITERATIONS,
    DEFAULT_TILE_PX,
};
use tiled_mandelbrot::{
    Accelerator, AutoFilePresenter, FilePresenterPort, PgmFilePresenter, RayonAccelerator,
    RenderController, RenderSettings, SerialAccelerator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    Rayon,
    Serial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `.pgm` is written as binary PGM, other extensions go through `image`.
    Auto,
    /// Always write binary PGM.
    Pgm,
}

#[derive(Parser, Debug)]
#[command(name = "tiled-mandelbrot", version, allow_negative_numbers = true)]
struct Cli {
    /// Tiles across.
    #[arg(long, default_value_t = DEFAULT_GRID_TILES)]
    tiles_x: u32,

    /// Tiles down.
    #[arg(long, default_value_t = DEFAULT_GRID_TILES)]
    tiles_y: u32,

    /// Side of each square tile in pixels.
    #[arg(long, default_value_t = DEFAULT_TILE_PX)]
    tile_px: u32,

    /// Maximum tiles rendered per batch.
    #[arg(long, default_value_t = DEFAULT_MAX_INFLIGHT)]
    max_inflight: u32,

    /// Real coordinate of the left edge.
    #[arg(long, default_value_t = -2.0)]
    x0: f64,

    /// Real coordinate of the right edge.
    #[arg(long, default_value_t = 1.0)]
    x1: f64,

    /// Imaginary coordinate of the top edge.
    #[arg(long, default_value_t = -1.0)]
    y0: f64,

    /// Imaginary coordinate of the bottom edge.
    #[arg(long, default_value_t = 1.0)]
    y1: f64,

    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iter: u32,

    #[arg(long, default_value_t = DEFAULT_ESCAPE_RADIUS)]
    escape_radius: f64,

    #[arg(long, value_enum, default_value_t = Backend::Rayon)]
    backend: Backend,

    /// Worker threads for the rayon backend (defaults to rayon's global pool).
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    format: OutputFormat,

    /// Output image path.
    #[arg(long, default_value = "output/mandelbrot.pgm")]
    out: PathBuf,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            grid_tiles_x: self.tiles_x,
            grid_tiles_y: self.tiles_y,
            tile_px: self.tile_px,
            max_inflight: self.max_inflight,
            argand_x0: self.x0,
            argand_x1: self.x1,
            argand_y0: self.y0,
            argand_y1: self.y1,
            max_iter: self.max_iter,
            escape_radius: self.escape_radius,
        }
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .init();

    match cli.format {
        OutputFormat::Auto => run_on_backend(&cli, AutoFilePresenter::new()),
        OutputFormat::Pgm => run_on_backend(&cli, PgmFilePresenter::new()),
    }
}

fn run_on_backend<P: FilePresenterPort>(cli: &Cli, presenter: P) -> Result<(), Box<dyn Error>> {
    match cli.backend {
        Backend::Rayon => {
            let accelerator = match cli.threads {
                Some(threads) => RayonAccelerator::with_threads(threads)?,
                None => RayonAccelerator::new(),
            };

            run(cli, presenter, accelerator)
        }
        Backend::Serial => {
            if cli.threads.is_some() {
                warn!("--threads is ignored by the serial backend");
            }

            run(cli, presenter, SerialAccelerator::new())
        }
    }
}

fn run<P, A>(cli: &Cli, presenter: P, accelerator: A) -> Result<(), Box<dyn Error>>
where
    P: FilePresenterPort,
    A: Accelerator,
{
    let mut controller = RenderController::new(presenter, accelerator);

    controller.generate(cli.render_settings())?;

    create_parent_dir(&cli.out)?;
    controller.write(&cli.out)?;

    Ok(())
}

fn create_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_render_settings_defaults() {
        let cli = Cli::try_parse_from(["tiled-mandelbrot"]).unwrap();

        assert_eq!(cli.render_settings(), RenderSettings::default());
        assert_eq!(cli.backend, Backend::Rayon);
        assert_eq!(cli.format, OutputFormat::Auto);
        assert_eq!(cli.log_level(), Level::INFO);
    }

    #[test]
    fn test_negative_window_edges_parse() {
        let cli = Cli::try_parse_from([
            "tiled-mandelbrot",
            "--x0",
            "-0.75",
            "--x1",
            "-0.7",
            "--y0",
            "-0.1",
            "--y1",
            "0.1",
        ])
        .unwrap();

        let settings = cli.render_settings();

        assert_eq!(settings.argand_x0, -0.75);
        assert_eq!(settings.argand_x1, -0.7);
        assert_eq!(settings.argand_y0, -0.1);
    }

    #[test]
    fn test_backend_format_and_verbosity() {
        let cli = Cli::try_parse_from([
            "tiled-mandelbrot",
            "--backend",
            "serial",
            "--format",
            "pgm",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.backend, Backend::Serial);
        assert_eq!(cli.format, OutputFormat::Pgm);
        assert_eq!(cli.log_level(), Level::TRACE);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        assert!(Cli::try_parse_from(["tiled-mandelbrot", "--backend", "cuda"]).is_err());
    }

    #[test]
    fn test_run_writes_requested_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("small.pgm");
        let cli = Cli::try_parse_from([
            "tiled-mandelbrot",
            "--tiles-x",
            "2",
            "--tiles-y",
            "2",
            "--tile-px",
            "4",
            "--out",
            out.to_str().unwrap(),
        ])
        .unwrap();

        run(&cli, PgmFilePresenter::new(), SerialAccelerator::new()).unwrap();

        assert!(std::fs::read(&out).unwrap().starts_with(b"P5\n8 8\n255\n"));
    }
}
