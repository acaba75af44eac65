//! Quick access to one show's dates
//!
//! An append-only list of (date, code) pairs. It is never deduplicated or
//! expired; users rebuild it by populating again, and duplicates resolve to
//! the earliest entry.

use crate::browser::BrowserError;
use crate::models::{QuickAccessEntry, ShowListingEntry};

/// Anything that can list a month's shows
pub trait ListingSource {
    fn month_listing(
        &self,
        month: &str,
        filter: Option<&str>,
    ) -> Result<Vec<ShowListingEntry>, BrowserError>;
}

#[derive(Debug, Default, Clone)]
pub struct QuickAccessCache {
    entries: Vec<QuickAccessEntry>,
}

impl QuickAccessCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// List every month with `filter` and append what matched.
    ///
    /// All months are listed before anything is appended, so a failing month
    /// leaves the cache untouched. Returns the number of entries added.
    pub fn populate<S: ListingSource + ?Sized>(
        &mut self,
        source: &S,
        months: &[String],
        filter: &str,
    ) -> Result<usize, BrowserError> {
        let mut found = Vec::new();
        for month in months {
            let listing = source.month_listing(month, Some(filter))?;
            log::info!("{} shows matching {:?} in {}", listing.len(), filter, month);
            found.extend(listing.iter().map(QuickAccessEntry::from));
        }

        let added = found.len();
        self.entries.extend(found);
        Ok(added)
    }

    pub fn push(&mut self, entry: QuickAccessEntry) {
        self.entries.push(entry);
    }

    /// Code of the earliest entry with exactly this date
    pub fn lookup(&self, date: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.date == date)
            .map(|e| e.code.as_str())
    }

    /// Dates in insertion order, duplicates included
    pub fn list_dates(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.date.as_str()).collect()
    }

    pub fn entries(&self) -> &[QuickAccessEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
