//! The coordinating service
//!
//! `BoxOffice` owns the session and the quick-access cache. Every request
//! takes the session lock for its whole navigate → wait → read sequence,
//! so two requests never interleave on the shared tab.

use crate::browser::{BrowserError, Session};
use crate::cache::{ListingSource, QuickAccessCache};
use crate::config::Config;
use crate::extract;
use crate::models::{ShowListingEntry, ShowSalesSummary};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

pub struct BoxOffice {
    session: Mutex<Session>,
    cache: Mutex<QuickAccessCache>,
    config: Config,
}

impl BoxOffice {
    pub fn new(session: Session, config: Config) -> Self {
        Self {
            session: Mutex::new(session),
            cache: Mutex::new(QuickAccessCache::new()),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current sales of one show, or `None` if its page could not be read
    pub fn fetch_show(&self, code: &str) -> Result<Option<ShowSalesSummary>, BrowserError> {
        let url = self.config.back_office.show_url(code);
        let html = self.load_page(&url)?;

        let summary = extract::extract_sales(&html);
        if summary.is_none() {
            log::warn!("Show page for code {} is missing its title or date", code);
        }
        Ok(summary)
    }

    /// Shows of a month (`mm.yyyy`), optionally filtered by title substring
    pub fn list_month(
        &self,
        month: &str,
        filter: Option<&str>,
    ) -> Result<Vec<ShowListingEntry>, BrowserError> {
        let url = self.config.back_office.month_url(month);
        let html = self.load_page(&url)?;

        Ok(extract::extract_month_listing(
            &html,
            &self.config.back_office.show_url_prefix(),
            filter,
        ))
    }

    /// Add the configured show's dates from `months` to quick access
    pub fn populate_quick_access(&self, months: &[String]) -> Result<usize, BrowserError> {
        let filter = self.config.back_office.quick_access_filter.clone();
        let mut cache = self.cache();
        let added = cache.populate(self, months, &filter)?;
        log::info!("Quick access: {} added, {} total", added, cache.len());
        Ok(added)
    }

    pub fn quick_access_code(&self, date: &str) -> Option<String> {
        self.cache().lookup(date).map(str::to_string)
    }

    pub fn quick_access_dates(&self) -> Vec<String> {
        self.cache()
            .list_dates()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Close the browser. Later requests fail with `SessionClosed`.
    pub fn shutdown(&self) {
        self.session().close();
    }

    fn load_page(&self, url: &str) -> Result<String, BrowserError> {
        let timeout = self.config.browser.page_timeout();
        let started = Instant::now();

        let session = self.session();
        session.navigate(url)?;
        session.wait_ready(timeout)?;
        session.wait_for_element(&self.config.back_office.ready_selector, timeout)?;
        let html = session.html()?;

        log::debug!(
            "Loaded {} ({} bytes) in {}ms",
            url,
            html.len(),
            started.elapsed().as_millis()
        );
        Ok(html)
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache(&self) -> MutexGuard<'_, QuickAccessCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ListingSource for BoxOffice {
    fn month_listing(
        &self,
        month: &str,
        filter: Option<&str>,
    ) -> Result<Vec<ShowListingEntry>, BrowserError> {
        self.list_month(month, filter)
    }
}
