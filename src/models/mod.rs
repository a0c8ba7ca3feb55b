pub mod config;
pub mod recipe;
pub mod session;

pub use config::{
    AppConfig, ConfigSource, MatchingConfig, OutputConfig, OutputFormat, StrategyName,
};
pub use recipe::{PixelSpec, Recipe, SourceSpec, ToleranceSpec};
pub use session::Session;
