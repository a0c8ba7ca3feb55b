//! Cartesian product of target assignments.

use crate::api::SwapError;
use crate::color::Pixel;
use crate::source::SourceColorEntry;

/// One source color mapped to one of its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub identifier: &'a str,
    pub target: Pixel,
}

/// A full assignment of one target per source color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination<'a> {
    index: usize,
    assignments: Vec<Assignment<'a>>,
}

impl<'a> Combination<'a> {
    /// Build a combination by hand, e.g. to re-render a single output.
    pub fn new(index: usize, assignments: Vec<Assignment<'a>>) -> Self {
        Self { index, assignments }
    }

    /// Position in generation order, starting at 0.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Assignments in source color order.
    #[inline]
    pub fn assignments(&self) -> &[Assignment<'a>] {
        &self.assignments
    }

    /// Target assigned to `identifier`, if it is part of this combination.
    pub fn target_for(&self, identifier: &str) -> Option<Pixel> {
        self.assignments
            .iter()
            .find(|a| a.identifier == identifier)
            .map(|a| a.target)
    }
}

/// Lazy iterator over every combination of target colors.
///
/// Order is lexicographic over the entries' target lists with the **last
/// entry varying fastest**, like nested loops written in entry order.
/// The iterator is finite and cannot be restarted; call
/// [`generate`] again to replay it.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    entries: &'a [SourceColorEntry],
    cursor: Vec<usize>,
    next_index: usize,
    total: usize,
}

/// Enumerate every combination of the entries' targets.
///
/// # Errors
///
/// - [`SwapError::NoSourceColors`] for an empty slice
/// - [`SwapError::MissingTargets`] when an entry has no targets; purge those
///   first with [`purge_untargeted`](crate::purge_untargeted)
/// - [`SwapError::TooManyCombinations`] when the count overflows `usize`
///
/// # Example
///
/// ```
/// use pixel_swap::{generate, Pixel, SourceColorEntry};
///
/// let entries = [
///     SourceColorEntry::new(Pixel::rgb(0, 0, 0))
///         .with_targets([Pixel::rgb(1, 0, 0), Pixel::rgb(2, 0, 0)]),
///     SourceColorEntry::new(Pixel::rgb(9, 9, 9))
///         .with_targets([Pixel::rgb(0, 1, 0), Pixel::rgb(0, 2, 0), Pixel::rgb(0, 3, 0)]),
/// ];
///
/// let combos: Vec<_> = generate(&entries).unwrap().collect();
/// assert_eq!(combos.len(), 6);
/// // last entry varies fastest
/// assert_eq!(combos[1].target_for("#090909"), Some(Pixel::rgb(0, 2, 0)));
/// assert_eq!(combos[1].target_for("#000000"), Some(Pixel::rgb(1, 0, 0)));
/// ```
pub fn generate(entries: &[SourceColorEntry]) -> Result<Combinations<'_>, SwapError> {
    if entries.is_empty() {
        return Err(SwapError::NoSourceColors);
    }

    let mut total: usize = 1;
    for entry in entries {
        if entry.targets().is_empty() {
            return Err(SwapError::MissingTargets {
                identifier: entry.identifier().to_string(),
            });
        }
        total = total
            .checked_mul(entry.targets().len())
            .ok_or(SwapError::TooManyCombinations)?;
    }

    Ok(Combinations {
        entries,
        cursor: vec![0; entries.len()],
        next_index: 0,
        total,
    })
}

impl<'a> Combinations<'a> {
    /// Total number of combinations, consumed or not.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    fn advance(&mut self) {
        for (position, entry) in self.entries.iter().enumerate().rev() {
            self.cursor[position] += 1;
            if self.cursor[position] < entry.targets().len() {
                return;
            }
            self.cursor[position] = 0;
        }
    }
}

impl<'a> Iterator for Combinations<'a> {
    type Item = Combination<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.total {
            return None;
        }

        let entries = self.entries;
        let assignments = entries
            .iter()
            .zip(&self.cursor)
            .map(|(entry, &choice)| Assignment {
                identifier: entry.identifier(),
                target: entry.targets()[choice],
            })
            .collect();
        let combination = Combination::new(self.next_index, assignments);

        self.next_index += 1;
        self.advance();
        Some(combination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

impl std::iter::FusedIterator for Combinations<'_> {}
