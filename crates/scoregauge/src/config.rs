use crate::error::GaugeError;
use crate::theme::ColorTable;
use directories::ProjectDirs;
use ringdraw::{ContainerId, Point};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reference canvas size the style constants are expressed against.
pub const DEFAULT_SIZE: f64 = 300.0;
pub const DEFAULT_CONTAINER: &str = "score-gauge";

fn default_size() -> f64 {
    DEFAULT_SIZE
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CanvasConfig {
    pub container_id: ContainerId,
    #[serde(default = "default_size")]
    pub size: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER)
    }
}

impl CanvasConfig {
    pub fn new(container_id: impl Into<ContainerId>) -> Self {
        Self {
            container_id: container_id.into(),
            size: DEFAULT_SIZE,
        }
    }

    pub fn with_size(self, size: f64) -> Self {
        Self { size, ..self }
    }

    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }
}

/// Ring geometry for the reference canvas.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArcStyleConfig {
    pub track_width: f64,
    pub total_arc_width: f64,
    pub inner_arc_width: f64,
    pub inner_arc_radius: f64,
    pub total_arc_radius: f64,
    pub label_size: f64,
    pub decrease_by: f64,
    pub tick_offset: f64,
    pub tick_dot_radius: f64,
    pub glow_offset: f64,
}

impl Default for ArcStyleConfig {
    fn default() -> Self {
        Self {
            track_width: 18.0,
            total_arc_width: 10.0,
            inner_arc_width: 8.0,
            inner_arc_radius: 105.0,
            total_arc_radius: 128.0,
            label_size: 42.0,
            decrease_by: 17.0,
            tick_offset: 14.0,
            tick_dot_radius: 0.75,
            glow_offset: 4.0,
        }
    }
}

impl ArcStyleConfig {
    pub fn fields(&self) -> [(&'static str, f64); 10] {
        [
            ("track_width", self.track_width),
            ("total_arc_width", self.total_arc_width),
            ("inner_arc_width", self.inner_arc_width),
            ("inner_arc_radius", self.inner_arc_radius),
            ("total_arc_radius", self.total_arc_radius),
            ("label_size", self.label_size),
            ("decrease_by", self.decrease_by),
            ("tick_offset", self.tick_offset),
            ("tick_dot_radius", self.tick_dot_radius),
            ("glow_offset", self.glow_offset),
        ]
    }

    /// Applies `f` to every constant.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            track_width: f(self.track_width),
            total_arc_width: f(self.total_arc_width),
            inner_arc_width: f(self.inner_arc_width),
            inner_arc_radius: f(self.inner_arc_radius),
            total_arc_radius: f(self.total_arc_radius),
            label_size: f(self.label_size),
            decrease_by: f(self.decrease_by),
            tick_offset: f(self.tick_offset),
            tick_dot_radius: f(self.tick_dot_radius),
            glow_offset: f(self.glow_offset),
        }
    }

    pub fn validate(&self) -> Result<(), GaugeError> {
        match self
            .fields()
            .into_iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            Some((name, value)) => Err(GaugeError::invalid_config(format!(
                "style.{name} must be positive and finite, got {value}"
            ))),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Added to the label's y position when drawing into a container that
    /// already held a gauge. Some hosts ignore the vertical text coordinate
    /// on redraw; about half the canvas size compensates there.
    pub redraw_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub style: ArcStyleConfig,
    pub colors: ColorTable,
    pub label: LabelSettings,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_theme_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "scoregauge", "scoregauge")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("theme.toml"))
}

pub fn load_theme(path: &Path) -> Result<Theme, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_theme(toml: &str) -> Result<Theme, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Theme from the user's config directory, or the built-in one.
pub fn load_or_default() -> Theme {
    let path = match get_theme_path() {
        Ok(p) if p.exists() => p,
        _ => return Theme::default(),
    };

    match load_theme(&path) {
        Ok(theme) => theme,
        Err(e) => {
            log::warn!("Ignoring theme at {}: {}", path.display(), e);
            Theme::default()
        }
    }
}

pub fn write_default_theme() -> std::io::Result<PathBuf> {
    let path =
        get_theme_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_THEME)?;
    }
    Ok(path)
}

pub const DEFAULT_THEME: &str = include_str!("default_theme.toml");
