use super::config::BrowserConfig;
use super::manager::{BrowserError, BrowserManager};
use super::page::BrowserPage;
use super::sync;
use crate::config::{BackOfficeConfig, BrowserSettings, Credentials};
use std::time::Duration;

/// The process-wide authenticated browser session.
///
/// Owns the page it drives and, for a real browser, the Chrome process and
/// profile directory behind it. Both are released once, by [`Session::close`]
/// or on drop. Callers serialize access (see `BoxOffice`).
pub struct Session {
    page: Box<dyn BrowserPage>,
    manager: Option<BrowserManager>,
    authenticated: bool,
    closed: bool,
}

impl Session {
    /// Launch Chrome and log in to the back office
    pub fn open(
        settings: &BrowserSettings,
        office: &BackOfficeConfig,
        credentials: &Credentials,
    ) -> Result<Self, BrowserError> {
        let manager = BrowserManager::launch(BrowserConfig::from_settings(settings))?;
        let page = manager.new_page()?;

        // On a failed login the session drops here and takes Chrome with it
        let mut session = Session::attach(Box::new(page), Some(manager));
        session.login(office, credentials, settings.login_timeout())?;
        Ok(session)
    }

    /// Wrap an already-open page. `manager` is the browser owning it, if any.
    pub fn attach(page: Box<dyn BrowserPage>, manager: Option<BrowserManager>) -> Self {
        Self {
            page,
            manager,
            authenticated: false,
            closed: false,
        }
    }

    /// Fill in the login form and wait for evidence of a logged-in page
    pub fn login(
        &mut self,
        office: &BackOfficeConfig,
        credentials: &Credentials,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        self.ensure_open()?;
        let login_url = office.login_url();
        log::info!("Logging in to {}", login_url);

        self.page.navigate(&login_url)?;
        self.page.type_into(&office.email_selector, &credentials.email)?;
        self.page.type_into(&office.password_selector, &credentials.password)?;
        self.page.click_xpath(&office.submit_xpath)?;

        sync::wait_for_login(self.page.as_ref(), &office.authenticated_path, timeout)?;

        self.authenticated = true;
        log::info!("Logged in, landed on {}", self.page.current_url());
        Ok(())
    }

    /// Point the browser at `url`. Content readiness is the caller's next step.
    pub fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.ensure_open()?;
        log::debug!("Navigating to {}", url);
        self.page.navigate(url)
    }

    pub fn wait_ready(&self, timeout: Duration) -> Result<(), BrowserError> {
        self.ensure_open()?;
        sync::wait_ready(self.page.as_ref(), timeout)
    }

    pub fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        self.ensure_open()?;
        sync::wait_for_element(self.page.as_ref(), selector, timeout)
    }

    /// Snapshot of the current document
    pub fn html(&self) -> Result<String, BrowserError> {
        self.ensure_open()?;
        self.page.content()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated && !self.closed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn debug_port(&self) -> Option<u16> {
        self.manager.as_ref().map(|m| m.config().debug_port)
    }

    /// Release the tab, the browser and its profile. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.authenticated = false;

        if let Err(e) = self.page.close() {
            log::debug!("Ignoring error while closing tab: {}", e);
        }
        if let Some(manager) = self.manager.take() {
            let profile = manager.profile_dir().display().to_string();
            drop(manager);
            log::info!("Browser closed, profile {} removed", profile);
        }
    }

    fn ensure_open(&self) -> Result<(), BrowserError> {
        if self.closed {
            Err(BrowserError::SessionClosed)
        } else {
            Ok(())
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
