//! Backward walk over publication numbers.
//!
//! Starting from an estimated coordinate, [`BackwardSequence`] yields one
//! [`ResourceLocation`] per step with the publication number decreasing by
//! one each time. When the number reaches 0 the walk moves to the previous
//! year, restarting from the number estimated for December 31 of that year.

use std::iter::FusedIterator;
use std::path::PathBuf;

use crate::calendar::last_day_of_previous_year;
use crate::config::DEFAULT_STEP_BUDGET;
use crate::location::{build_location, PublicationCoordinate, ResourceLocation};

/// Lazy, finite iterator over candidate publications, newest first.
///
/// The cursor is private; restart by constructing a new sequence.
#[derive(Debug, Clone)]
pub struct BackwardSequence {
    cursor: PublicationCoordinate,
    remaining: usize,
    cache_root: Option<PathBuf>,
}

impl BackwardSequence {
    /// Create a sequence starting at `start` with the default step budget.
    pub fn new(start: PublicationCoordinate) -> Self {
        Self {
            cursor: start,
            remaining: DEFAULT_STEP_BUDGET,
            cache_root: None,
        }
    }

    /// Set how many locations are yielded at most.
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.remaining = budget;
        self
    }

    /// Set the cache root used for the yielded cache paths.
    pub fn with_cache_root(mut self, cache_root: Option<PathBuf>) -> Self {
        self.cache_root = cache_root;
        self
    }

    /// Move the cursor to the last publication of the previous year.
    ///
    /// Returns `false` if there is no previous year to move to.
    fn roll_over_year(&mut self) -> bool {
        let Some(last_day) = last_day_of_previous_year(self.cursor.year) else {
            return false;
        };
        let table_type = self.cursor.table_type;
        self.cursor = PublicationCoordinate::new(
            self.cursor.year - 1,
            table_type.publication_number(last_day),
            table_type,
        );
        tracing::debug!(
            year = self.cursor.year,
            number = self.cursor.number,
            table = %table_type,
            "Crossed into previous year"
        );
        true
    }
}

impl Iterator for BackwardSequence {
    type Item = ResourceLocation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if self.cursor.number == 0 && !self.roll_over_year() {
            self.remaining = 0;
            return None;
        }

        let location = build_location(self.cursor, self.cache_root.as_deref());
        self.cursor.number -= 1;
        self.remaining -= 1;
        Some(location)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl FusedIterator for BackwardSequence {}

/// Convenience constructor mirroring [`BackwardSequence::new`] with all settings.
pub fn gen_urls(
    start: PublicationCoordinate,
    budget: usize,
    cache_root: Option<PathBuf>,
) -> BackwardSequence {
    BackwardSequence::new(start)
        .with_budget(budget)
        .with_cache_root(cache_root)
}
