//! Readiness waits.
//!
//! Every wait evaluates a condition inside the page through the driver's
//! bounded poller and fails with `NavigationTimeout` once the bound passes.

use super::manager::BrowserError;
use super::page::BrowserPage;
use headless_chrome::util::Wait;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Document loaded and, when the page uses jQuery, no AJAX request in flight
const READY_SCRIPT: &str =
    "(document.readyState === 'complete') && (window.jQuery ? jQuery.active == 0 : true)";

const ROOT_PRESENT_SCRIPT: &str = "document.querySelector('body') !== null";

/// Block until the document finished loading and its AJAX work settled
pub fn wait_ready(page: &dyn BrowserPage, timeout: Duration) -> Result<(), BrowserError> {
    Wait::new(timeout, POLL_INTERVAL)
        .until(|| script_is_true(page, READY_SCRIPT).then_some(()))
        .map_err(|_| {
            BrowserError::NavigationTimeout(format!(
                "page readiness after {}s ({})",
                timeout.as_secs(),
                page.current_url()
            ))
        })
}

/// Block until an element matching `selector` is rendered and visible
pub fn wait_for_element(
    page: &dyn BrowserPage,
    selector: &str,
    timeout: Duration,
) -> Result<(), BrowserError> {
    let script = visibility_script(selector);

    Wait::new(timeout, POLL_INTERVAL)
        .until(|| script_is_true(page, &script).then_some(()))
        .map_err(|_| {
            BrowserError::NavigationTimeout(format!(
                "visible element {} after {}s",
                selector,
                timeout.as_secs()
            ))
        })
}

/// Block until the browser landed in the authenticated area or the page root rendered
pub fn wait_for_login(
    page: &dyn BrowserPage,
    authenticated_path: &str,
    timeout: Duration,
) -> Result<(), BrowserError> {
    Wait::new(timeout, POLL_INTERVAL)
        .until(|| {
            let confirmed = page.current_url().contains(authenticated_path)
                || script_is_true(page, ROOT_PRESENT_SCRIPT);
            confirmed.then_some(())
        })
        .map_err(|_| {
            BrowserError::AuthenticationError(format!(
                "no sign of a logged-in page after {}s",
                timeout.as_secs()
            ))
        })
}

fn script_is_true(page: &dyn BrowserPage, script: &str) -> bool {
    match page.evaluate(script) {
        Ok(Some(value)) => value.as_bool() == Some(true),
        Ok(None) => false,
        Err(e) => {
            // The context is torn down while a navigation commits; try again next tick
            log::trace!("Readiness probe failed: {}", e);
            false
        }
    }
}

fn visibility_script(selector: &str) -> String {
    // serde_json produces a valid JS string literal, quotes and all
    let literal = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"(function() {{
            const el = document.querySelector({});
            if (!el) return false;
            const style = window.getComputedStyle(el);
            if (style.display === 'none' || style.visibility === 'hidden') return false;
            const rect = el.getBoundingClientRect();
            return rect.width > 0 || rect.height > 0;
        }})()"#,
        literal
    )
}
