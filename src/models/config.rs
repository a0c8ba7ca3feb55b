use pixel_swap::ScanStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable naming an external config file.
pub const CONFIG_ENV: &str = "COLORSWAP_CONFIG";

/// Default configuration compiled into the binary.
pub const EMBEDDED_CONFIG: &str = include_str!("../../config.yaml");

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// How generated files are written
    #[serde(default)]
    pub output: OutputConfig,

    /// How source colors are located in the image
    #[serde(default)]
    pub matching: MatchingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// JPEG quality, 1-100
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Re-compress PNG output with oxipng
    #[serde(default)]
    pub optimize_png: bool,
}

fn default_jpeg_quality() -> u8 {
    75
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            jpeg_quality: default_jpeg_quality(),
            optimize_png: false,
        }
    }
}

/// Encoding of generated files.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "jpeg")]
    Jpg,
    Png,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            "png" => Ok(OutputFormat::Png),
            other => Err(format!("unknown output format '{other}' (expected jpg or png)")),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct MatchingConfig {
    #[serde(default)]
    pub strategy: StrategyName,
}

/// Config spelling of [`ScanStrategy`].
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    #[default]
    SinglePass,
    PerEntry,
}

impl From<StrategyName> for ScanStrategy {
    fn from(name: StrategyName) -> Self {
        match name {
            StrategyName::SinglePass => ScanStrategy::SinglePass,
            StrategyName::PerEntry => ScanStrategy::PerEntry,
        }
    }
}

impl FromStr for StrategyName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "single_pass" => Ok(StrategyName::SinglePass),
            "per_entry" => Ok(StrategyName::PerEntry),
            other => Err(format!(
                "unknown strategy '{other}' (expected single_pass or per_entry)"
            )),
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Embedded => f.write_str("embedded"),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Resolve the config file path: explicit argument first, then `COLORSWAP_CONFIG`.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
    }

    /// Load configuration from `path`, falling back to the embedded config
    pub fn load(path: Option<&Path>) -> Self {
        Self::load_with_source(path).0
    }

    /// Like [`load`](Self::load), also reporting which source was used.
    pub fn load_with_source(path: Option<&Path>) -> (Self, ConfigSource) {
        if let Some(path) = Self::resolve_path(path) {
            let path = path.as_path();
            match std::fs::read_to_string(path) {
                Ok(content) => match Self::from_yaml(&content) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration");
                        return (config, ConfigSource::File(path.to_path_buf()));
                    }
                    Err(e) => {
                        tracing::warn!(
                            %e,
                            path = %path.display(),
                            "Failed to parse config, using embedded"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        %e,
                        path = %path.display(),
                        "Failed to read config, using embedded"
                    );
                }
            }
        }

        match Self::from_yaml(EMBEDDED_CONFIG) {
            Ok(config) => (config, ConfigSource::Embedded),
            Err(e) => {
                tracing::warn!(%e, "Failed to parse embedded config, using defaults");
                (Self::default(), ConfigSource::Defaults)
            }
        }
    }
}
