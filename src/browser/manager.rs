use super::config::BrowserConfig;
use super::page::ChromePage;
use headless_chrome::{Browser, LaunchOptions};
use std::ffi::OsStr;
use tempfile::TempDir;

/// Owns the Chrome process and its profile directory.
///
/// Dropping the manager kills the browser and removes the profile.
pub struct BrowserManager {
    browser: Browser,
    profile_dir: TempDir,
    config: BrowserConfig,
}

impl BrowserManager {
    /// Launch Chrome with a fresh profile directory
    pub fn launch(config: BrowserConfig) -> Result<Self, BrowserError> {
        let profile_dir = tempfile::Builder::new()
            .prefix(&config.profile_prefix)
            .tempdir()
            .map_err(|e| BrowserError::InitializationError(format!("Profile directory: {}", e)))?;

        let args: Vec<&OsStr> = config.chrome_flags.iter().map(OsStr::new).collect();
        let launch_options = Self::build_launch_options(&config, &profile_dir, args)?;

        log::info!(
            "Launching Chrome (headless: {}, debug port: {}, profile: {})",
            config.headless,
            config.debug_port,
            profile_dir.path().display()
        );

        let browser = Browser::new(launch_options)
            .map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        Ok(Self {
            browser,
            profile_dir,
            config,
        })
    }

    /// Build Chrome launch options from our config
    fn build_launch_options<'a>(
        config: &BrowserConfig,
        profile_dir: &TempDir,
        args: Vec<&'a OsStr>,
    ) -> Result<LaunchOptions<'a>, BrowserError> {
        LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_size.0, config.window_size.1)))
            .port(Some(config.debug_port))
            .user_data_dir(Some(profile_dir.path().to_path_buf()))
            .idle_browser_timeout(config.idle_timeout)
            .args(args)
            .build()
            .map_err(|e| BrowserError::ConfigurationError(e.to_string()))
    }

    /// Open the tab the session drives. Its navigation waits are bounded by the page timeout.
    pub fn new_page(&self) -> Result<ChromePage, BrowserError> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| BrowserError::TabCreationError(e.to_string()))?;

        tab.set_default_timeout(self.config.page_timeout);
        Ok(ChromePage::new(tab))
    }

    /// Get the browser configuration
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn profile_dir(&self) -> &std::path::Path {
        self.profile_dir.path()
    }
}

/// Errors that can occur during browser operations
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    #[error("Browser configuration error: {0}")]
    ConfigurationError(String),

    #[error("Tab creation failed: {0}")]
    TabCreationError(String),

    #[error("Login was not confirmed: {0}")]
    AuthenticationError(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Timeout waiting for: {0}")]
    NavigationTimeout(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("JavaScript execution error: {0}")]
    JavaScriptError(String),

    #[error("HTML extraction error: {0}")]
    HtmlExtractionError(String),

    #[error("Session is closed")]
    SessionClosed,
}

impl BrowserError {
    /// Timeouts are worth retrying; everything else points at a real fault
    pub fn is_timeout(&self) -> bool {
        matches!(self, BrowserError::NavigationTimeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_build() {
        let config = BrowserConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let args: Vec<&OsStr> = config.chrome_flags.iter().map(OsStr::new).collect();
        let options = BrowserManager::build_launch_options(&config, &dir, args).unwrap();

        assert_eq!(options.port, Some(config.debug_port));
        assert_eq!(options.user_data_dir.as_deref(), Some(dir.path()));
        assert!(options
            .args
            .iter()
            .any(|arg| arg.to_string_lossy().contains("AutomationControlled")));
    }

    #[test]
    fn test_timeout_classification() {
        assert!(BrowserError::NavigationTimeout("page".into()).is_timeout());
        assert!(!BrowserError::AuthenticationError("login".into()).is_timeout());
    }

    #[test]
    #[ignore] // Requires Chrome to be installed
    fn test_browser_manager_creation() {
        let manager = BrowserManager::launch(BrowserConfig::default()).unwrap();
        assert!(manager.profile_dir().exists());
        assert!(manager.new_page().is_ok());
    }
}
