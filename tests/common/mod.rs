#![allow(dead_code)]

use rust_ticket_scraper::browser::{BrowserError, BrowserPage, Session};
use rust_ticket_scraper::config::{Config, Credentials};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_URL: &str = "https://tickets.test";

pub const SHOW_INFO: &str = include_str!("../fixtures/show_info.html");
pub const MONTH_MENU: &str = include_str!("../fixtures/month_menu.html");

/// Everything the fake page was asked to do
#[derive(Debug, Default)]
pub struct PageLog {
    pub visited: Vec<String>,
    pub typed: Vec<(String, String)>,
    pub clicked: Vec<String>,
    pub current: String,
    pub closes: usize,
    /// `navigate <url>`, `evaluate` and `content <url>` in call order
    pub events: Vec<String>,
}

/// A page that serves canned HTML by URL and answers every readiness probe with `ready`
pub struct FakePage {
    pages: HashMap<String, String>,
    ready: bool,
    probe_delay: Duration,
    pub log: Arc<Mutex<PageLog>>,
}

impl FakePage {
    pub fn new(ready: bool) -> Self {
        Self {
            pages: HashMap::new(),
            ready,
            probe_delay: Duration::ZERO,
            log: Arc::new(Mutex::new(PageLog::default())),
        }
    }

    pub fn serve(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Make every script evaluation take `delay`, widening the window for races
    pub fn slow_probes(mut self, delay: Duration) -> Self {
        self.probe_delay = delay;
        self
    }
}

impl BrowserPage for FakePage {
    fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let mut log = self.log.lock().unwrap();
        log.visited.push(url.to_string());
        log.events.push(format!("navigate {}", url));
        log.current = url.to_string();
        Ok(())
    }

    fn current_url(&self) -> String {
        self.log.lock().unwrap().current.clone()
    }

    fn evaluate(&self, _script: &str) -> Result<Option<Value>, BrowserError> {
        self.log.lock().unwrap().events.push("evaluate".to_string());
        std::thread::sleep(self.probe_delay);
        Ok(Some(Value::Bool(self.ready)))
    }

    fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError> {
        self.log
            .lock()
            .unwrap()
            .typed
            .push((selector.to_string(), text.to_string()));
        Ok(())
    }

    fn click_xpath(&self, xpath: &str) -> Result<(), BrowserError> {
        self.log.lock().unwrap().clicked.push(xpath.to_string());
        Ok(())
    }

    fn content(&self) -> Result<String, BrowserError> {
        let current = {
            let mut log = self.log.lock().unwrap();
            let current = log.current.clone();
            log.events.push(format!("content {}", current));
            current
        };
        Ok(self
            .pages
            .get(&current)
            .cloned()
            .unwrap_or_else(|| "<html><body></body></html>".to_string()))
    }

    fn close(&mut self) -> Result<(), BrowserError> {
        self.log.lock().unwrap().closes += 1;
        Ok(())
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.back_office.base_url = BASE_URL.to_string();
    config.browser.page_timeout_secs = 1;
    config.browser.login_timeout_secs = 1;
    config
}

pub fn credentials() -> Credentials {
    Credentials::new("box@theatre.test", "s3cret")
}

/// A logged-in session over `page`
pub fn logged_in_session(page: FakePage) -> Session {
    let config = test_config();
    let mut session = Session::attach(Box::new(page), None);
    session
        .login(&config.back_office, &credentials(), config.browser.login_timeout())
        .expect("fake login succeeds");
    session
}
