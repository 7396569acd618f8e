use anyhow::{bail, Context, Result};
use config::{Config, ConfigError, Environment, File};
use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{RgbColor, Size},
};
use std::path::{Path, PathBuf};

/// Environment variables starting with `TRACER_` override the settings
/// files. Nested keys are separated by `__`, so `TRACER_TRACER__PROGRESS=40`
/// sets `tracer.progress` and `TRACER_DISPLAY__WIDTH=320` sets
/// `display.width`.
pub const ENV_PREFIX: &str = "TRACER";
pub const ENV_SEPARATOR: &str = "__";

/// Largest accepted display side, in pixels.
pub const MAX_DISPLAY_SIDE: u32 = 8192;

/// Merges `settings.toml` (or any other format `config` knows) from each of
/// `dirs` in order, then the environment. Missing files are skipped.
pub fn load<P: AsRef<Path>>(dirs: &[P]) -> Result<Config> {
    let mut settings = Config::default();
    for dir in dirs {
        let name = dir.as_ref().join("settings");
        settings
            .merge(File::with_name(&name.to_string_lossy()).required(false))
            .with_context(|| format!("Failed to read settings from `{}`", dir.as_ref().display()))?;
    }
    settings
        .merge(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
        .context("Failed to read settings from the environment")?;
    Ok(settings)
}

/// Everything the tracer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TracerConfig {
    /// Percentage of the arc that is done, `0..=100`.
    pub progress: f32,
    /// Label drawn in the middle of the ring.
    pub text: String,
    pub thickness: f32,
    pub start_angle: f32,
    pub arc_length: f32,
    /// Nominal radius, only used to compute the intrinsic size.
    pub radius: i32,
    pub padding: u32,
    pub completed_color: Rgb888,
    pub remaining_color: Rgb888,
    pub text_color: Rgb888,
    pub text_size: f32,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            progress: 0.0,
            text: String::new(),
            thickness: 20.0,
            start_angle: 110.0,
            arc_length: 320.0,
            radius: 500,
            padding: 0,
            completed_color: Rgb888::BLACK,
            remaining_color: Rgb888::BLACK,
            text_color: Rgb888::BLACK,
            text_size: 40.0,
        }
    }
}

/// Reads `key`, falling back to `default` when it is missing. Keys that are
/// present but can't be converted are reported as errors.
fn get_or<T>(
    config: &Config,
    key: &str,
    default: T,
    getter: impl FnOnce(&Config, &str) -> Result<T, ConfigError>,
) -> Result<T> {
    match getter(config, key) {
        Ok(value) => Ok(value),
        Err(ConfigError::NotFound(_)) => Ok(default),
        Err(e) => Err(e).with_context(|| format!("Invalid value for `{}`", key)),
    }
}

pub(crate) fn get_float(config: &Config, key: &str, default: f32) -> Result<f32> {
    get_or(config, key, f64::from(default), Config::get_float).map(|v| v as f32)
}

pub(crate) fn get_color(config: &Config, key: &str, default: Rgb888) -> Result<Rgb888> {
    match config.get_str(key) {
        Ok(value) => parse_color(&value).with_context(|| format!("Invalid color for `{}`", key)),
        Err(ConfigError::NotFound(_)) => Ok(default),
        Err(e) => Err(e).with_context(|| format!("Invalid value for `{}`", key)),
    }
}

pub(crate) fn get_u32(config: &Config, key: &str, default: u32) -> Result<u32> {
    let value = get_or(config, key, i64::from(default), Config::get_int)?;
    u32::try_from(value).with_context(|| format!("`{}` must be a non-negative integer", key))
}

fn get_display_side(config: &Config, key: &str, default: u32) -> Result<u32> {
    let value = get_u32(config, key, default)?;
    if !(1..=MAX_DISPLAY_SIDE).contains(&value) {
        bail!("`{}` must be between 1 and {}, got {}", key, MAX_DISPLAY_SIDE, value);
    }
    Ok(value)
}

/// Parses `#RRGGBB`, `#AARRGGBB` (alpha is ignored) or one of the names
/// `black` and `white`.
pub fn parse_color(value: &str) -> Result<Rgb888> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "black" => return Ok(Rgb888::BLACK),
        "white" => return Ok(Rgb888::WHITE),
        _ => {}
    }

    let Some(hex) = value.strip_prefix('#') else {
        bail!("Expected a color like `#RRGGBB`, got `{}`", value);
    };
    if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Expected 6 or 8 hex digits, got `{}`", value);
    }
    let argb = u32::from_str_radix(hex, 16)
        .with_context(|| format!("`{}` is not a hex color", value))?;

    let [_, r, g, b] = argb.to_be_bytes();
    Ok(Rgb888::new(r, g, b))
}

impl TracerConfig {
    /// Builds a configuration from the `tracer.*` keys of `config`. Missing
    /// keys keep their defaults.
    pub fn from_settings(config: &Config) -> Result<Self> {
        let defaults = Self::default();

        let radius = get_or(config, "tracer.radius", i64::from(defaults.radius), Config::get_int)?;
        let radius = i32::try_from(radius).context("`tracer.radius` is out of range")?;

        Ok(Self {
            progress: get_float(config, "tracer.progress", defaults.progress)?,
            text: get_or(config, "tracer.text", defaults.text, Config::get_str)?,
            thickness: get_float(config, "tracer.arc_thickness", defaults.thickness)?,
            start_angle: get_float(config, "tracer.start_deg", defaults.start_angle)?,
            arc_length: get_float(config, "tracer.arc_len", defaults.arc_length)?,
            radius,
            padding: get_u32(config, "tracer.padding", defaults.padding)?,
            completed_color: get_color(config, "tracer.completed_color", defaults.completed_color)?,
            remaining_color: get_color(config, "tracer.remaining_color", defaults.remaining_color)?,
            text_color: get_color(config, "tracer.text_color", defaults.text_color)?,
            text_size: get_float(config, "tracer.text_size", defaults.text_size)?,
        })
    }
}

/// Host side settings: the surface the tracer is drawn on and where frames go.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub size: Size,
    pub background: Rgb888,
    /// Progress change per key press in the simulator.
    pub progress_step: f32,
    pub output_path: PathBuf,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            size: Size::new(240, 240),
            background: Rgb888::WHITE,
            progress_step: 5.0,
            output_path: PathBuf::from("progress-tracer.png"),
        }
    }
}

impl DisplaySettings {
    /// Reads the `display.*` and `output.*` keys of `config`.
    pub fn from_settings(config: &Config) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            size: Size::new(
                get_display_side(config, "display.width", defaults.size.width)?,
                get_display_side(config, "display.height", defaults.size.height)?,
            ),
            background: get_color(config, "display.background", defaults.background)?,
            progress_step: get_float(config, "display.progress_step", defaults.progress_step)?,
            output_path: get_or(
                config,
                "output.path",
                defaults.output_path,
                |config, key| config.get_str(key).map(PathBuf::from),
            )?,
        })
    }
}
