use thiserror::Error;

use crate::core::data::argand_window::{ArgandWindow, ArgandWindowError};

pub const DEFAULT_GRID_TILES: u32 = 16;
pub const DEFAULT_TILE_PX: u32 = 64;
pub const DEFAULT_MAX_INFLIGHT: u32 = 8;
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;
pub const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("tile grid must have at least one tile on each axis: {x}x{y}")]
    EmptyGrid { x: u32, y: u32 },
    #[error("tile size must be greater than zero")]
    ZeroTileSize,
    #[error("maximum in-flight tiles must be greater than zero")]
    ZeroMaxInflight,
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,
    #[error("escape radius must be positive and finite: {0}")]
    InvalidEscapeRadius(f64),
    #[error("invalid argand window: {0}")]
    ArgandWindow(#[from] ArgandWindowError),
    #[error("image of {width}x{height} pixels is too large")]
    ImageTooLarge { width: u64, height: u64 },
}

/// Unvalidated render options, as collected from a caller or the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub grid_tiles_x: u32,
    pub grid_tiles_y: u32,
    pub tile_px: u32,
    pub max_inflight: u32,
    pub argand_x0: f64,
    pub argand_x1: f64,
    pub argand_y0: f64,
    pub argand_y1: f64,
    pub max_iter: u32,
    pub escape_radius: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let window = ArgandWindow::default();

        Self {
            grid_tiles_x: DEFAULT_GRID_TILES,
            grid_tiles_y: DEFAULT_GRID_TILES,
            tile_px: DEFAULT_TILE_PX,
            max_inflight: DEFAULT_MAX_INFLIGHT,
            argand_x0: window.x0(),
            argand_x1: window.x1(),
            argand_y0: window.y0(),
            argand_y1: window.y1(),
            max_iter: DEFAULT_MAX_ITERATIONS,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
        }
    }
}

/// Validated, immutable configuration for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    grid_tiles_x: u32,
    grid_tiles_y: u32,
    tile_px: u32,
    max_inflight: u32,
    window: ArgandWindow,
    max_iter: u32,
    escape_radius: f64,
}

impl RenderConfig {
    pub fn new(settings: RenderSettings) -> Result<Self, ConfigError> {
        if settings.grid_tiles_x == 0 || settings.grid_tiles_y == 0 {
            return Err(ConfigError::EmptyGrid {
                x: settings.grid_tiles_x,
                y: settings.grid_tiles_y,
            });
        }

        if settings.tile_px == 0 {
            return Err(ConfigError::ZeroTileSize);
        }

        if settings.max_inflight == 0 {
            return Err(ConfigError::ZeroMaxInflight);
        }

        if settings.max_iter == 0 {
            return Err(ConfigError::ZeroMaxIterations);
        }

        if !(settings.escape_radius.is_finite() && settings.escape_radius > 0.0) {
            return Err(ConfigError::InvalidEscapeRadius(settings.escape_radius));
        }

        let window = ArgandWindow::new(
            settings.argand_x0,
            settings.argand_x1,
            settings.argand_y0,
            settings.argand_y1,
        )?;

        let width = settings.grid_tiles_x as u64 * settings.tile_px as u64;
        let height = settings.grid_tiles_y as u64 * settings.tile_px as u64;
        let fits = width <= u32::MAX as u64
            && height <= u32::MAX as u64
            && (width as usize).checked_mul(height as usize).is_some();

        if !fits {
            return Err(ConfigError::ImageTooLarge { width, height });
        }

        Ok(Self {
            grid_tiles_x: settings.grid_tiles_x,
            grid_tiles_y: settings.grid_tiles_y,
            tile_px: settings.tile_px,
            max_inflight: settings.max_inflight,
            window,
            max_iter: settings.max_iter,
            escape_radius: settings.escape_radius,
        })
    }

    #[must_use]
    pub fn grid_tiles_x(&self) -> u32 {
        self.grid_tiles_x
    }

    #[must_use]
    pub fn grid_tiles_y(&self) -> u32 {
        self.grid_tiles_y
    }

    #[must_use]
    pub fn tile_px(&self) -> u32 {
        self.tile_px
    }

    #[must_use]
    pub fn max_inflight(&self) -> u32 {
        self.max_inflight
    }

    #[must_use]
    pub fn window(&self) -> ArgandWindow {
        self.window
    }

    #[must_use]
    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    #[must_use]
    pub fn escape_radius(&self) -> f64 {
        self.escape_radius
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.grid_tiles_x * self.tile_px
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.grid_tiles_y * self.tile_px
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.grid_tiles_x as usize * self.grid_tiles_y as usize
    }

    /// Number of tile buffers actually worth allocating: a batch can never
    /// hold more tiles than the grid has.
    #[must_use]
    pub fn effective_inflight(&self) -> usize {
        (self.max_inflight as usize).min(self.tile_count())
    }

    #[must_use]
    pub fn settings(&self) -> RenderSettings {
        RenderSettings {
            grid_tiles_x: self.grid_tiles_x,
            grid_tiles_y: self.grid_tiles_y,
            tile_px: self.tile_px,
            max_inflight: self.max_inflight,
            argand_x0: self.window.x0(),
            argand_x1: self.window.x1(),
            argand_y0: self.window.y0(),
            argand_y1: self.window.y1(),
            max_iter: self.max_iter,
            escape_radius: self.escape_radius,
        }
    }
}

impl TryFrom<RenderSettings> for RenderConfig {
    type Error = ConfigError;

    fn try_from(settings: RenderSettings) -> Result<Self, Self::Error> {
        Self::new(settings)
    }
}
