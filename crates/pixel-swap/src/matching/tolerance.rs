//! Tolerance settings and the per-pixel match decision.

use std::fmt;

use crate::color::Pixel;

/// Distance metric used when tolerance matching is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToleranceMode {
    /// Byte-exact comparison.
    #[default]
    Exact,
    /// Every channel independently within the tolerance (an axis-aligned cube).
    Cubic,
    /// Euclidean distance over all channels within the tolerance (a sphere).
    Spherical,
}

impl ToleranceMode {
    /// Parse a mode name, falling back to [`ToleranceMode::Exact`].
    ///
    /// Accepts `cubic`, `spherical` and `sphere` in any case. Unknown names
    /// select exact matching rather than failing.
    ///
    /// ```
    /// use pixel_swap::ToleranceMode;
    ///
    /// assert_eq!(ToleranceMode::parse_lenient("Sphere"), ToleranceMode::Spherical);
    /// assert_eq!(ToleranceMode::parse_lenient("manhattan"), ToleranceMode::Exact);
    /// ```
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "cubic" | "cube" => ToleranceMode::Cubic,
            "spherical" | "sphere" => ToleranceMode::Spherical,
            _ => ToleranceMode::Exact,
        }
    }
}

impl fmt::Display for ToleranceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToleranceMode::Exact => "exact",
            ToleranceMode::Cubic => "cubic",
            ToleranceMode::Spherical => "spherical",
        };
        f.write_str(name)
    }
}

/// Tolerance configuration of one source color.
///
/// Matching is exact unless `enabled` is set, `value` is positive and the
/// mode is not [`ToleranceMode::Exact`]; see [`Tolerance::effective_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tolerance {
    pub enabled: bool,
    pub mode: ToleranceMode,
    pub value: u32,
}

impl Tolerance {
    /// Exact matching (tolerance disabled).
    pub fn exact() -> Self {
        Self::default()
    }

    /// Enabled cubic tolerance.
    pub fn cubic(value: u32) -> Self {
        Self {
            enabled: true,
            mode: ToleranceMode::Cubic,
            value,
        }
    }

    /// Enabled spherical tolerance.
    pub fn spherical(value: u32) -> Self {
        Self {
            enabled: true,
            mode: ToleranceMode::Spherical,
            value,
        }
    }

    /// The mode actually applied: exact when disabled or when `value` is 0.
    #[inline]
    pub fn effective_mode(&self) -> ToleranceMode {
        if !self.enabled || self.value == 0 {
            ToleranceMode::Exact
        } else {
            self.mode
        }
    }
}

/// Signed per-channel difference `candidate - reference`.
///
/// Holds as many components as the compared pixels have channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delta {
    values: [i16; 4],
    len: u8,
}

impl Delta {
    /// All-zero delta over `channels` components.
    #[inline]
    pub fn zero(channels: usize) -> Self {
        debug_assert!(channels <= 4);
        Self {
            values: [0; 4],
            len: channels as u8,
        }
    }

    /// Delta from explicit components (at most four).
    pub fn from_components(components: &[i16]) -> Self {
        debug_assert!(components.len() <= 4);
        let mut values = [0i16; 4];
        values[..components.len()].copy_from_slice(components);
        Self {
            values,
            len: components.len() as u8,
        }
    }

    #[inline]
    pub fn components(&self) -> &[i16] {
        &self.values[..self.len as usize]
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.components().iter().all(|&c| c == 0)
    }

    /// Sum of squared components.
    #[inline]
    pub fn squared_norm(&self) -> i64 {
        self.components()
            .iter()
            .map(|&c| i64::from(c) * i64::from(c))
            .sum()
    }
}

/// Outcome of comparing one candidate pixel against a reference color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: bool,
    /// Per-channel delta; always zero under exact matching.
    pub delta: Delta,
}

/// Decide whether `candidate` matches `reference` under `tolerance`.
///
/// - Exact: every channel equal, delta zero.
/// - Cubic: every `|candidate - reference| < value` (strict, per channel).
/// - Spherical: Euclidean norm of the delta `< value` (strict), evaluated
///   as `sum(delta^2) < value^2` in integers.
///
/// Pixels with different channel counts never match.
///
/// # Example
///
/// ```
/// use pixel_swap::{matches, Pixel, Tolerance};
///
/// let reference = Pixel::rgb(100, 100, 100);
/// assert!(matches(&reference, &Pixel::rgb(109, 100, 100), &Tolerance::cubic(10)).matched);
/// assert!(!matches(&reference, &Pixel::rgb(110, 100, 100), &Tolerance::cubic(10)).matched);
/// ```
pub fn matches(reference: &Pixel, candidate: &Pixel, tolerance: &Tolerance) -> MatchResult {
    match_channels(reference.channels(), candidate.channels(), tolerance)
}

/// Slice-level form of [`matches`] used by the table scanners.
#[inline]
pub fn match_channels(reference: &[u8], candidate: &[u8], tolerance: &Tolerance) -> MatchResult {
    let channels = reference.len();
    let miss = MatchResult {
        matched: false,
        delta: Delta::zero(channels),
    };
    if candidate.len() != channels {
        return miss;
    }

    let mode = tolerance.effective_mode();
    if mode == ToleranceMode::Exact {
        return MatchResult {
            matched: reference == candidate,
            delta: Delta::zero(channels),
        };
    }

    let mut values = [0i16; 4];
    for (i, (&r, &c)) in reference.iter().zip(candidate).enumerate() {
        values[i] = i16::from(c) - i16::from(r);
    }
    let delta = Delta {
        values,
        len: channels as u8,
    };
    let limit = i64::from(tolerance.value);

    let matched = match mode {
        ToleranceMode::Cubic => delta
            .components()
            .iter()
            .all(|&d| i64::from(d).abs() < limit),
        ToleranceMode::Spherical => i128::from(delta.squared_norm()) < i128::from(limit).pow(2),
        ToleranceMode::Exact => unreachable!("exact mode handled above"),
    };

    if matched {
        MatchResult { matched, delta }
    } else {
        miss
    }
}
