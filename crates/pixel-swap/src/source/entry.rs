//! Registered source colors and their target candidates.

use crate::color::Pixel;
use crate::matching::Tolerance;

/// A source color registered for replacement.
///
/// The identifier defaults to the hex form of the reference pixel
/// ([`Pixel::to_hex`]) and can be overridden with
/// [`with_identifier`](Self::with_identifier). It is the key the lookup table
/// and the combinations refer to the entry by.
///
/// # Example
///
/// ```
/// use pixel_swap::{Pixel, SourceColorEntry, Tolerance};
///
/// let entry = SourceColorEntry::new(Pixel::rgb(100, 150, 200))
///     .with_targets([Pixel::rgb(255, 0, 0), Pixel::rgb(0, 255, 0)])
///     .with_tolerance(Tolerance::cubic(8))
///     .preserve_difference(true);
///
/// assert_eq!(entry.identifier(), "#6496c8");
/// assert_eq!(entry.targets().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceColorEntry {
    reference: Pixel,
    identifier: String,
    targets: Vec<Pixel>,
    tolerance: Tolerance,
    preserve_difference: bool,
}

impl SourceColorEntry {
    /// New entry with no targets, exact matching and no difference keeping.
    pub fn new(reference: Pixel) -> Self {
        Self {
            reference,
            identifier: reference.to_hex(),
            targets: Vec::new(),
            tolerance: Tolerance::exact(),
            preserve_difference: false,
        }
    }

    /// Replace the derived identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Add targets in order, skipping duplicates.
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Pixel>) -> Self {
        for target in targets {
            self.add_target(target);
        }
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn preserve_difference(mut self, enabled: bool) -> Self {
        self.preserve_difference = enabled;
        self
    }

    #[inline]
    pub fn reference(&self) -> Pixel {
        self.reference
    }

    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    pub fn targets(&self) -> &[Pixel] {
        &self.targets
    }

    #[inline]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    #[inline]
    pub fn keeps_difference(&self) -> bool {
        self.preserve_difference
    }

    /// Append a target color. Returns `false` if it was already present.
    pub fn add_target(&mut self, target: Pixel) -> bool {
        if self.targets.contains(&target) {
            return false;
        }
        self.targets.push(target);
        true
    }

    /// Remove the target at `index`, returning it.
    pub fn remove_target(&mut self, index: usize) -> Option<Pixel> {
        (index < self.targets.len()).then(|| self.targets.remove(index))
    }

    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
    }

    pub fn set_preserve_difference(&mut self, enabled: bool) {
        self.preserve_difference = enabled;
    }
}

/// Remove every entry without target candidates from `entries`.
///
/// This mutates the registry: the removed entries are returned in their
/// original order and are gone for subsequent operations. Run it before
/// [`generate`](crate::combination::generate), which rejects untargeted
/// entries.
///
/// ```
/// use pixel_swap::{purge_untargeted, Pixel, SourceColorEntry};
///
/// let mut entries = vec![
///     SourceColorEntry::new(Pixel::rgb(1, 1, 1)),
///     SourceColorEntry::new(Pixel::rgb(2, 2, 2)).with_targets([Pixel::rgb(0, 0, 0)]),
/// ];
/// let removed = purge_untargeted(&mut entries);
///
/// assert_eq!(removed.len(), 1);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].identifier(), "#020202");
/// ```
pub fn purge_untargeted(entries: &mut Vec<SourceColorEntry>) -> Vec<SourceColorEntry> {
    let mut removed = Vec::new();
    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries.drain(..) {
        if entry.targets.is_empty() {
            removed.push(entry);
        } else {
            kept.push(entry);
        }
    }
    *entries = kept;
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_derived_from_reference() {
        let entry = SourceColorEntry::new(Pixel::rgb(10, 5, 255));
        assert_eq!(entry.identifier(), "#0a05ff");

        let custom = entry.with_identifier("#6496C8");
        assert_eq!(custom.identifier(), "#6496C8");
        assert_eq!(custom.reference(), Pixel::rgb(10, 5, 255));
    }

    #[test]
    fn test_add_target_skips_duplicates() {
        let mut entry = SourceColorEntry::new(Pixel::rgb(0, 0, 0));
        assert!(entry.add_target(Pixel::rgb(255, 0, 0)));
        assert!(!entry.add_target(Pixel::rgb(255, 0, 0)));
        assert!(entry.add_target(Pixel::rgb(0, 0, 255)));
        assert_eq!(
            entry.targets(),
            &[Pixel::rgb(255, 0, 0), Pixel::rgb(0, 0, 255)]
        );
    }

    #[test]
    fn test_remove_target() {
        let mut entry = SourceColorEntry::new(Pixel::rgb(0, 0, 0))
            .with_targets([Pixel::rgb(1, 1, 1), Pixel::rgb(2, 2, 2)]);
        assert_eq!(entry.remove_target(0), Some(Pixel::rgb(1, 1, 1)));
        assert_eq!(entry.remove_target(5), None);
        assert_eq!(entry.targets(), &[Pixel::rgb(2, 2, 2)]);
    }

    #[test]
    fn test_purge_keeps_order() {
        let mut entries = vec![
            SourceColorEntry::new(Pixel::rgb(1, 1, 1)).with_targets([Pixel::rgb(9, 9, 9)]),
            SourceColorEntry::new(Pixel::rgb(2, 2, 2)),
            SourceColorEntry::new(Pixel::rgb(3, 3, 3)).with_targets([Pixel::rgb(9, 9, 9)]),
            SourceColorEntry::new(Pixel::rgb(4, 4, 4)),
        ];
        let removed = purge_untargeted(&mut entries);

        let kept: Vec<_> = entries.iter().map(|e| e.identifier()).collect();
        let gone: Vec<_> = removed.iter().map(|e| e.identifier()).collect();
        assert_eq!(kept, ["#010101", "#030303"]);
        assert_eq!(gone, ["#020202", "#040404"]);
    }
}
