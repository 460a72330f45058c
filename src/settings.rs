use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use pathlight_search::Heuristic;
use serde::Deserialize;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "PATHLIGHT";

/// Visualizer settings. Grid size and cell width are the only inputs the
/// search core takes from configuration; the rest drives the front end.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Cells per axis.
    pub rows: usize,
    /// Window width and height in pixels.
    pub window_width: u32,
    /// Pause after every search step so the search is watchable.
    pub step_delay_ms: u64,
    pub heuristic: Heuristic,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rows: 50,
            window_width: 800,
            step_delay_ms: 2,
            heuristic: Heuristic::Euclidean,
        }
    }
}

impl Settings {
    /// Whole-pixel cell size, so grid lines land on pixel boundaries.
    pub fn cell_width(&self) -> f32 {
        (self.window_width as usize / self.rows.max(1)) as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::Message("rows must be positive".into()));
        }
        if self.rows > self.window_width as usize {
            return Err(ConfigError::Message(format!(
                "rows ({}) must not exceed window_width ({})",
                self.rows, self.window_width
            )));
        }
        Ok(())
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Settings::default();
    Config::builder()
        .set_default("rows", defaults.rows as u64)?
        .set_default("window_width", u64::from(defaults.window_width))?
        .set_default("step_delay_ms", defaults.step_delay_ms)?
        .set_default("heuristic", defaults.heuristic.to_string())
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(DEFAULT_CONFIG_PATH)
}

/// Layers built-in defaults, the TOML file at `path` (optional) and
/// `PATHLIGHT_*` environment variables, in that order.
pub fn load_settings_from(path: &str) -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let settings = builder_with_defaults().and_then(|builder| {
        finish(
            builder
                .add_source(File::new(path, FileFormat::Toml).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)),
        )
    });

    match settings {
        Ok(settings) => {
            info!(?settings, "Successfully loaded configuration");
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        finish(builder_with_defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn test_defaults_fill_missing_keys() {
        let settings = from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.cell_width(), 16.0);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let settings = from_toml("rows = 20\nstep_delay_ms = 0\nheuristic = \"manhattan\"").unwrap();
        assert_eq!(settings.rows, 20);
        assert_eq!(settings.window_width, 800);
        assert_eq!(settings.step_delay_ms, 0);
        assert_eq!(settings.heuristic, Heuristic::Manhattan);
        assert_eq!(settings.cell_width(), 40.0);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(from_toml("rows = 0").is_err());
        assert!(from_toml("rows = 900").is_err());
        assert!(from_toml("heuristic = \"diagonal\"").is_err());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let settings = load_settings_from("config/does-not-exist.toml").unwrap();
        assert!(settings.rows > 0);
    }
}
