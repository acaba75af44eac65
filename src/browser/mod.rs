//! Browser session for the back office
//!
//! One headless Chrome instance is launched per process, logged in once and
//! then driven page by page. The session owns the browser; the readiness
//! waits in [`sync`] decide when a page is safe to read.
//!
//! # Example
//!
//! ```no_run
//! use rust_ticket_scraper::browser::Session;
//! use rust_ticket_scraper::config::{Config, Credentials};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load();
//! let credentials = Credentials::from_env()?;
//! let session = Session::open(&config.browser, &config.back_office, &credentials)?;
//!
//! session.navigate(&config.back_office.show_url("123456"))?;
//! session.wait_ready(config.browser.page_timeout())?;
//! let html = session.html()?;
//!
//! println!("Extracted {} bytes of HTML", html.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod page;
pub mod session;
pub mod sync;

// Re-export main types for convenience
pub use config::BrowserConfig;
pub use manager::{BrowserError, BrowserManager};
pub use page::{BrowserPage, ChromePage};
pub use session::Session;
