//! Game configuration.

use std::path::{Path, PathBuf};

use miette::{Context, IntoDiagnostic, Result};
use serde::Deserialize;

/// Environment variable pointing to a TOML file with configuration overrides.
pub const CONFIG_ENV_VAR: &str = "SPRITE_DEMOS_CONFIG";

/// Initial game configuration passed to [`crate::Game::run`].
///
/// There's two ways to initialize the config:
///
/// # Example
///
/// ```
/// use sprite_demos::Config;
///
/// Config {
///     title: "My Game".to_owned(),
///     ..Default::default()
/// };
/// ```
///
/// # Example
///
/// ```
/// use sprite_demos::Config;
///
/// Config::default().with_title("My Game");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Amount of horizontal pixels for the canvas.
    ///
    /// Defaults to `640`.
    pub buffer_width: u32,
    /// Amount of vertical pixels for the canvas.
    ///
    /// Defaults to `480`.
    pub buffer_height: u32,
    /// Factor applied to the buffer size for the requested window size.
    ///
    /// Defaults to `1.0`.
    pub scaling: f32,
    /// Name in the title bar.
    ///
    /// Defaults to `"Sprite Demo"`.
    pub title: String,
    /// Amount of seconds between each update tick.
    ///
    /// Defaults to `1 / 60`, 60 ticks per second.
    pub update_delta_time: f32,
    /// Maximum amount of seconds a single frame is allowed to take before the update loop stops catching up.
    ///
    /// Defaults to `1 / 4`.
    pub max_frame_time_secs: f32,
    /// Wait for the vertical blank before presenting a frame.
    ///
    /// Defaults to `true`.
    pub vsync: bool,
    /// Color of the viewport as `0xAARRGGBB`.
    ///
    /// The viewport is the area outside of the buffer when inside a bigger window.
    ///
    /// Defaults to `0xFF202020` (dark gray).
    pub viewport_color: u32,
    /// Color of the background of the buffer as `0xAARRGGBB`, the canvas is cleared with it every frame.
    ///
    /// Defaults to `0xFF000000` (black).
    pub background_color: u32,
    /// Directory images are loaded from.
    ///
    /// Defaults to the `assets/` directory of this crate.
    pub assets_dir: PathBuf,
}

impl Config {
    /// Set the amount of pixels for the canvas.
    #[inline]
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_width: u32, buffer_height: u32) -> Self {
        self.buffer_width = buffer_width;
        self.buffer_height = buffer_height;

        self
    }

    /// Set the factor applied to the buffer size for the requested window size.
    #[inline]
    #[must_use]
    pub fn with_scaling(mut self, scaling: f32) -> Self {
        self.scaling = scaling;

        self
    }

    /// Set the name in the title bar.
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();

        self
    }

    /// Set how many update ticks run per second.
    ///
    /// A value of zero is treated as one.
    #[inline]
    #[must_use]
    pub fn with_updates_per_second(mut self, updates_per_second: u32) -> Self {
        self.update_delta_time = (updates_per_second.max(1) as f32).recip();

        self
    }

    /// Enable or disable waiting for the vertical blank.
    #[inline]
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;

        self
    }

    /// Set the color of the viewport as `0xAARRGGBB`.
    ///
    /// The viewport is the area outside of the buffer when inside a bigger window.
    #[inline]
    #[must_use]
    pub fn with_viewport_color(mut self, viewport_color: u32) -> Self {
        self.viewport_color = viewport_color;

        self
    }

    /// Set the color of the background of the buffer as `0xAARRGGBB`.
    #[inline]
    #[must_use]
    pub fn with_background_color(mut self, background_color: u32) -> Self {
        self.background_color = background_color;

        self
    }

    /// Set the directory images are loaded from.
    #[inline]
    #[must_use]
    pub fn with_assets_dir(mut self, assets_dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = assets_dir.into();

        self
    }

    /// Full path of a file in the assets directory.
    #[inline]
    #[must_use]
    pub fn asset_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.assets_dir.join(file_name)
    }

    /// Apply overrides from the TOML file in the [`CONFIG_ENV_VAR`] environment variable.
    ///
    /// Nothing changes when the variable is not set.
    ///
    /// # Errors
    ///
    /// - When the file can't be read.
    /// - When the file is not valid TOML, contains unknown keys or invalid values.
    pub fn with_overrides_from_env(self) -> Result<Self> {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Ok(self);
        };
        let path = PathBuf::from(path);

        log::info!("Applying configuration overrides from '{}'", path.display());

        let overrides = std::fs::read_to_string(&path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Error reading configuration file '{}'", path.display()))?;

        self.apply_overrides_str(&overrides)
            .wrap_err_with(|| format!("Error in configuration file '{}'", path.display()))
    }

    /// Apply overrides from a TOML string.
    ///
    /// Allowed keys are `title`, `scaling`, `updates_per_second`, `vsync` and `assets_dir`.
    ///
    /// # Errors
    ///
    /// - When the string is not valid TOML or contains unknown keys.
    /// - When `scaling` or `updates_per_second` is not positive.
    pub fn apply_overrides_str(mut self, overrides: &str) -> Result<Self> {
        let ConfigOverrides {
            title,
            scaling,
            updates_per_second,
            vsync,
            assets_dir,
        } = toml::from_str(overrides)
            .into_diagnostic()
            .wrap_err("Error parsing configuration overrides")?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(scaling) = scaling {
            if scaling <= 0.0 || !scaling.is_finite() {
                miette::bail!("Scaling must be a positive number, got {scaling}");
            }
            self.scaling = scaling;
        }
        if let Some(updates_per_second) = updates_per_second {
            if updates_per_second == 0 {
                miette::bail!("Updates per second must be at least 1");
            }
            self = self.with_updates_per_second(updates_per_second);
        }
        if let Some(vsync) = vsync {
            self.vsync = vsync;
        }
        if let Some(assets_dir) = assets_dir {
            self.assets_dir = assets_dir;
        }

        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_width: 640,
            buffer_height: 480,
            scaling: 1.0,
            title: "Sprite Demo".to_owned(),
            update_delta_time: 1.0 / 60.0,
            max_frame_time_secs: 1.0 / 4.0,
            vsync: true,
            viewport_color: 0xFF20_2020,
            background_color: 0xFF00_0000,
            assets_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"),
        }
    }
}

/// Overrides to load from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverrides {
    /// Name in the title bar.
    title: Option<String>,
    /// Window scaling factor.
    scaling: Option<f32>,
    /// Update ticks per second.
    updates_per_second: Option<u32>,
    /// Wait for the vertical blank.
    vsync: Option<bool>,
    /// Directory images are loaded from.
    assets_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{Config, CONFIG_ENV_VAR};

    #[test]
    fn builder() {
        let config = Config::default()
            .with_title("Turns")
            .with_buffer_size(320, 240)
            .with_scaling(2.0)
            .with_updates_per_second(30)
            .with_assets_dir("/tmp/assets");

        assert_eq!(config.title, "Turns");
        assert_eq!((config.buffer_width, config.buffer_height), (320, 240));
        assert!((config.scaling - 2.0).abs() < f32::EPSILON);
        assert!((config.update_delta_time - 1.0 / 30.0).abs() < f32::EPSILON);
        assert_eq!(
            config.asset_path("sprite.png"),
            PathBuf::from("/tmp/assets/sprite.png")
        );
    }

    #[test]
    fn default_assets_exist() {
        assert!(Config::default().asset_path("sprite.png").exists());
    }

    #[test]
    fn overrides() {
        let config = Config::default()
            .apply_overrides_str(
                r#"
                title = "Overridden"
                scaling = 3.0
                vsync = false
                "#,
            )
            .unwrap();

        assert_eq!(config.title, "Overridden");
        assert!((config.scaling - 3.0).abs() < f32::EPSILON);
        assert!(!config.vsync);
        // Untouched
        assert_eq!(config.buffer_width, 640);
    }

    #[test]
    fn empty_overrides_change_nothing() {
        assert_eq!(
            Config::default().apply_overrides_str("").unwrap(),
            Config::default()
        );
    }

    #[test]
    fn invalid_overrides() {
        assert!(Config::default()
            .apply_overrides_str("unknown_key = 1")
            .is_err());
        assert!(Config::default().apply_overrides_str("scaling = 0.0").is_err());
        assert!(Config::default()
            .apply_overrides_str("updates_per_second = 0")
            .is_err());
        assert!(Config::default().apply_overrides_str("title = ").is_err());
    }

    #[test]
    fn overrides_from_env() {
        let path = std::env::temp_dir().join(format!(
            "sprite-demos-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "title = \"From File\"\nupdates_per_second = 30\n").unwrap();

        // No other test touches the variable
        std::env::set_var(CONFIG_ENV_VAR, &path);
        let config = Config::default().with_overrides_from_env();
        std::fs::remove_file(&path).unwrap();
        let missing = Config::default().with_overrides_from_env();
        std::env::remove_var(CONFIG_ENV_VAR);
        let untouched = Config::default().with_overrides_from_env();

        let config = config.unwrap();
        assert_eq!(config.title, "From File");
        assert!((config.update_delta_time - 1.0 / 30.0).abs() < f32::EPSILON);

        // The file is gone
        assert!(missing.is_err());

        assert_eq!(untouched.unwrap(), Config::default());
    }
}
