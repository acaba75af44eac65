use super::manager::BrowserError;
use headless_chrome::util::Timeout;
use headless_chrome::Tab;
use serde_json::Value;
use std::error::Error;
use std::sync::Arc;

/// The operations the session needs from a browser tab.
///
/// `ChromePage` is the production implementation; anything that can serve
/// pages and evaluate readiness scripts can stand in for it.
pub trait BrowserPage: Send {
    /// Start a navigation and wait for the navigation event (not for content)
    fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    fn current_url(&self) -> String;

    /// Evaluate a script and return its value, if it produced one
    fn evaluate(&self, script: &str) -> Result<Option<Value>, BrowserError>;

    fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError>;

    fn click_xpath(&self, xpath: &str) -> Result<(), BrowserError>;

    /// Serialized DOM of the current document
    fn content(&self) -> Result<String, BrowserError>;

    fn close(&mut self) -> Result<(), BrowserError>;
}

/// A headless Chrome tab
pub struct ChromePage {
    tab: Arc<Tab>,
}

impl ChromePage {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }
}

impl BrowserPage for ChromePage {
    fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.tab.navigate_to(url).map_err(|e| navigation_failure(url, &*e))?;
        self.tab.wait_until_navigated().map_err(|e| navigation_failure(url, &*e))?;

        Ok(())
    }

    fn current_url(&self) -> String {
        self.tab.get_url()
    }

    fn evaluate(&self, script: &str) -> Result<Option<Value>, BrowserError> {
        self.tab
            .evaluate(script, false)
            .map(|result| result.value)
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))
    }

    fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError> {
        let element = self
            .tab
            .wait_for_element(selector)
            .map_err(|e| BrowserError::ElementNotFound(format!("{}: {}", selector, e)))?;

        element.type_into(text).map_err(|e| {
            BrowserError::JavaScriptError(format!("Typing into {} failed: {}", selector, e))
        })?;

        Ok(())
    }

    fn click_xpath(&self, xpath: &str) -> Result<(), BrowserError> {
        let element = self
            .tab
            .wait_for_xpath(xpath)
            .map_err(|e| BrowserError::ElementNotFound(format!("{}: {}", xpath, e)))?;

        element.click().map_err(|e| {
            BrowserError::JavaScriptError(format!("Click on {} failed: {}", xpath, e))
        })?;

        Ok(())
    }

    fn content(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))
    }

    fn close(&mut self) -> Result<(), BrowserError> {
        self.tab
            .close(true)
            .map(|_| ())
            .map_err(|e| BrowserError::NavigationError(format!("Closing tab failed: {}", e)))
    }
}

/// The driver reports an exceeded wait as `util::Timeout`; everything else is a hard failure
fn navigation_failure(url: &str, error: &(dyn Error + Send + Sync + 'static)) -> BrowserError {
    if error.is::<Timeout>() {
        BrowserError::NavigationTimeout(format!("{}: {}", url, error))
    } else {
        BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, error))
    }
}
