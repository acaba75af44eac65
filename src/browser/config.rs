use crate::config::BrowserSettings;
use rand::Rng;
use std::time::Duration;

/// Launch parameters for the session's Chrome process
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// Remote-debugging port, chosen once per process start
    pub debug_port: u16,

    /// Prefix of the temporary profile directory
    pub profile_prefix: String,

    /// Idle time after which the driver gives up on the connection
    pub idle_timeout: Duration,

    /// Bound on every driver-side wait of a tab, navigation included
    pub page_timeout: Duration,

    /// Additional Chrome flags
    pub chrome_flags: Vec<String>,
}

/// Flags that keep Chrome from advertising itself as automated
const STEALTH_FLAGS: &[&str] = &[
    "--disable-gpu",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-blink-features=AutomationControlled",
];

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::from_settings(&BrowserSettings::default())
    }
}

impl BrowserConfig {
    /// Build a launch config, picking a random debug port from the configured range
    pub fn from_settings(settings: &BrowserSettings) -> Self {
        let mut flags: Vec<String> = STEALTH_FLAGS.iter().map(|f| f.to_string()).collect();
        flags.extend(settings.chrome_flags.iter().cloned());

        Self {
            headless: settings.headless,
            window_size: settings.window_size,
            debug_port: pick_debug_port(settings.debug_port_min, settings.debug_port_max),
            profile_prefix: settings.profile_prefix.clone(),
            idle_timeout: settings.idle_timeout(),
            page_timeout: settings.page_timeout(),
            chrome_flags: flags,
        }
    }

}

fn pick_debug_port(min: u16, max: u16) -> u16 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    rand::thread_rng().gen_range(low..=high)
}
