use pixel_swap::{Pixel, PixelMatrix, SourceColorEntry, Tolerance, ToleranceMode};
use serde::Deserialize;
use std::path::Path;

use crate::error::SessionError;

/// Source colors and their targets, read from a YAML file.
///
/// ```yaml
/// sources:
///   - color: "#6496c8"
///     targets: ["#ff0000", [0, 255, 0]]
///     tolerance: { mode: spherical, value: 12 }
///     preserve_difference: true
///   - sample: [10, 4]
///     targets: ["#000"]
/// ```
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Recipe {
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

/// One source color of a recipe.
///
/// Exactly one of `color` and `sample` must be given.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SourceSpec {
    /// Reference color as hex or a channel list
    #[serde(default)]
    pub color: Option<PixelSpec>,

    /// Take the reference color from the source image at `[x, y]`
    #[serde(default)]
    pub sample: Option<[usize; 2]>,

    /// Identifier override (defaults to the hex of the reference color)
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub targets: Vec<PixelSpec>,

    /// Presence enables tolerance matching
    #[serde(default)]
    pub tolerance: Option<ToleranceSpec>,

    #[serde(default)]
    pub preserve_difference: bool,
}

/// A pixel written as a hex string or a list of 1, 3 or 4 channel values.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PixelSpec {
    Hex(String),
    Channels(Vec<i64>),
}

impl PixelSpec {
    pub fn to_pixel(&self) -> Result<Pixel, SessionError> {
        let pixel = match self {
            PixelSpec::Hex(hex) => hex.parse::<Pixel>()?,
            PixelSpec::Channels(channels) => Pixel::try_from_channels(channels)?,
        };
        Ok(pixel)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ToleranceSpec {
    /// `cubic` or `spherical`; anything else matches exactly
    #[serde(default = "default_mode")]
    pub mode: String,
    pub value: u32,
}

fn default_mode() -> String {
    "cubic".to_string()
}

impl From<&ToleranceSpec> for Tolerance {
    fn from(spec: &ToleranceSpec) -> Self {
        Tolerance {
            enabled: true,
            mode: ToleranceMode::parse_lenient(&spec.mode),
            value: spec.value,
        }
    }
}

impl Recipe {
    pub fn from_yaml(content: &str) -> Result<Self, SessionError> {
        serde_yaml::from_str(content).map_err(|e| SessionError::Recipe(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SessionError::Recipe(format!("{}: {e}", path.display())))?;
        let recipe = Self::from_yaml(&content)?;
        tracing::debug!(
            path = %path.display(),
            sources = recipe.sources.len(),
            "Loaded recipe"
        );
        Ok(recipe)
    }

    /// True when some source is sampled from the image rather than given.
    pub fn samples_image(&self) -> bool {
        self.sources.iter().any(|spec| spec.sample.is_some())
    }

    /// Build source color entries, sampling from `image` where requested.
    ///
    /// Sampled references are read from the image as-is, so they share its
    /// channel layout.
    pub fn entries(
        &self,
        image: Option<&PixelMatrix>,
    ) -> Result<Vec<SourceColorEntry>, SessionError> {
        self.sources
            .iter()
            .enumerate()
            .map(|(index, spec)| spec.to_entry(index, image))
            .collect()
    }
}

impl SourceSpec {
    fn reference(&self, index: usize, image: Option<&PixelMatrix>) -> Result<Pixel, SessionError> {
        match (&self.color, self.sample) {
            (Some(color), None) => color.to_pixel(),
            (None, Some([x, y])) => {
                let image = image.ok_or_else(|| {
                    SessionError::Recipe(format!(
                        "source {index}: sampling needs a source image"
                    ))
                })?;
                image.pixel(y, x).ok_or_else(|| {
                    SessionError::Recipe(format!(
                        "source {index}: sample ({x}, {y}) is outside the {}x{} image",
                        image.width(),
                        image.height()
                    ))
                })
            }
            (Some(_), Some(_)) => Err(SessionError::Recipe(format!(
                "source {index}: give either color or sample, not both"
            ))),
            (None, None) => Err(SessionError::Recipe(format!(
                "source {index}: missing color or sample"
            ))),
        }
    }

    fn to_entry(
        &self,
        index: usize,
        image: Option<&PixelMatrix>,
    ) -> Result<SourceColorEntry, SessionError> {
        let mut entry = SourceColorEntry::new(self.reference(index, image)?);
        if let Some(id) = &self.id {
            entry = entry.with_identifier(id.clone());
        }
        let targets = self
            .targets
            .iter()
            .map(PixelSpec::to_pixel)
            .collect::<Result<Vec<_>, _>>()?;
        let tolerance = self.tolerance.as_ref().map(Tolerance::from).unwrap_or_default();

        Ok(entry
            .with_targets(targets)
            .with_tolerance(tolerance)
            .preserve_difference(self.preserve_difference))
    }
}
