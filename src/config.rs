use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix, e.g. `ASANA_GUIDE__UI__TICK_RATE_MS=100`
pub const ENV_PREFIX: &str = "ASANA_GUIDE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Page content TOML file; the built-in Bridge Pose page when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for `build` output
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

fn default_output_dir() -> String {
    "dist".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval for the terminal viewer
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Width of the step navigation column
    #[serde(default = "default_nav_width")]
    pub nav_width: u16,
}

/// Lower bound for `ui.tick_rate_ms`; a zero poll timeout busy-loops
pub const MIN_TICK_RATE_MS: u64 = 10;

fn default_tick_rate() -> u64 {
    250
}

fn default_nav_width() -> u16 {
    32
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            nav_width: default_nav_width(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Local state directory (logs live under it)
    #[serde(default = "default_state_dir")]
    pub state: String,
}

fn default_state_dir() -> String {
    ".asana-guide".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Project-local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".asana-guide/config.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the tool works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // User config in ~/.config/asana-guide/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("asana-guide").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        let mut config: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.clamp_limits();
        Ok(config)
    }

    /// Raise values below their supported minimum
    fn clamp_limits(&mut self) {
        if self.ui.tick_rate_ms < MIN_TICK_RATE_MS {
            tracing::warn!(
                configured = self.ui.tick_rate_ms,
                using = MIN_TICK_RATE_MS,
                "ui.tick_rate_ms too low"
            );
            self.ui.tick_rate_ms = MIN_TICK_RATE_MS;
        }
    }

    /// Effective configuration as TOML (printed by the `config` command)
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Content file from config, if any
    pub fn content_path(&self) -> Option<PathBuf> {
        self.content.path.as_deref().map(absolute)
    }

    /// Get absolute path to the build output directory
    pub fn output_path(&self) -> PathBuf {
        absolute(&self.output.dir)
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        absolute(&self.paths.state)
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

fn absolute(path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.content.path.is_none());
        assert_eq!(config.output.dir, "dist");
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert_eq!(config.ui.nav_width, 32);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.to_file);
    }

    #[test]
    fn test_default_roundtrips_through_toml() {
        let toml_str = Config::default().to_toml_string().unwrap();
        assert!(!toml_str.contains("path ="));
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.output.dir, "dist");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [ui]
            tick_rate_ms = 100
            "#,
        )
        .unwrap();
        assert_eq!(parsed.ui.tick_rate_ms, 100);
        assert_eq!(parsed.ui.nav_width, 32);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_load_explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[output]\ndir = \"/tmp/site\"\n\n[content]\npath = \"/tmp/pose.toml\""
        )
        .unwrap();

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.output_path(), PathBuf::from("/tmp/site"));
        assert_eq!(config.content_path(), Some(PathBuf::from("/tmp/pose.toml")));
        assert_eq!(config.ui.tick_rate_ms, 250);
    }

    #[test]
    fn test_relative_paths_resolved_from_cwd() {
        let config = Config::default();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.output_path(), cwd.join("dist"));
        assert!(config.logs_path().ends_with(".asana-guide/logs"));
        assert!(config.logs_path().starts_with(&cwd));
    }

    #[test]
    fn test_zero_tick_rate_clamped() {
        let mut config = Config::default();
        config.ui.tick_rate_ms = 0;
        config.clamp_limits();
        assert_eq!(config.ui.tick_rate_ms, MIN_TICK_RATE_MS);

        config.ui.tick_rate_ms = 500;
        config.clamp_limits();
        assert_eq!(config.ui.tick_rate_ms, 500);
    }

    #[test]
    fn test_load_clamps_tick_rate() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[ui]\ntick_rate_ms = 0").unwrap();

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.ui.tick_rate_ms, MIN_TICK_RATE_MS);
    }
}
