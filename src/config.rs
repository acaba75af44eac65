use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Errors raised while loading configuration or credentials
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Missing environment variable: {0}")]
    MissingVariable(&'static str),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub back_office: BackOfficeConfig,
    #[serde(default)]
    pub browser: BrowserSettings,
}

/// Where the back office lives and how its pages are recognised
#[derive(Debug, Deserialize, Clone)]
pub struct BackOfficeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Path prefix of a show's info page; the show code is appended
    #[serde(default = "default_show_info_path")]
    pub show_info_path: String,

    /// Path of the month menu; the `mm.yyyy` month key is appended
    #[serde(default = "default_month_menu_path")]
    pub month_menu_path: String,

    /// URL fragment that only appears once logged in
    #[serde(default = "default_authenticated_path")]
    pub authenticated_path: String,

    #[serde(default = "default_email_selector")]
    pub email_selector: String,

    #[serde(default = "default_password_selector")]
    pub password_selector: String,

    #[serde(default = "default_submit_xpath")]
    pub submit_xpath: String,

    /// Element that renders after the page's AJAX data arrived
    #[serde(default = "default_ready_selector")]
    pub ready_selector: String,

    /// Title substring of the show kept in quick access
    #[serde(default = "default_quick_access_filter")]
    pub quick_access_filter: String,
}

/// Browser launch and wait settings
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default = "default_window_size")]
    pub window_size: (u32, u32),

    /// Extra Chrome flags on top of the built-in stealth flags
    #[serde(default)]
    pub chrome_flags: Vec<String>,

    #[serde(default = "default_debug_port_min")]
    pub debug_port_min: u16,

    #[serde(default = "default_debug_port_max")]
    pub debug_port_max: u16,

    #[serde(default = "default_profile_prefix")]
    pub profile_prefix: String,

    #[serde(default = "default_login_timeout")]
    pub login_timeout_secs: u64,

    #[serde(default = "default_page_timeout")]
    pub page_timeout_secs: u64,

    /// How long the driver keeps an idle connection to Chrome open
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://tickets.afisha.ru".to_string()
}

fn default_login_path() -> String {
    "/admin/login".to_string()
}

fn default_show_info_path() -> String {
    "/admin/events/info/".to_string()
}

fn default_month_menu_path() -> String {
    "/admin/events/menu_date?date=".to_string()
}

fn default_authenticated_path() -> String {
    "/admin".to_string()
}

fn default_email_selector() -> String {
    "#email".to_string()
}

fn default_password_selector() -> String {
    "#password".to_string()
}

fn default_submit_xpath() -> String {
    "//button[contains(., 'Войти')]".to_string()
}

fn default_ready_selector() -> String {
    "div.pull-right.text-primary".to_string()
}

fn default_quick_access_filter() -> String {
    "ЧАЙКА".to_string()
}

fn default_window_size() -> (u32, u32) {
    (1920, 1080)
}

fn default_debug_port_min() -> u16 {
    9200
}

fn default_debug_port_max() -> u16 {
    9400
}

fn default_profile_prefix() -> String {
    "chrome-profile-".to_string()
}

fn default_login_timeout() -> u64 {
    20
}

fn default_page_timeout() -> u64 {
    25
}

fn default_idle_timeout() -> u64 {
    24 * 60 * 60
}

impl Default for BackOfficeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            show_info_path: default_show_info_path(),
            month_menu_path: default_month_menu_path(),
            authenticated_path: default_authenticated_path(),
            email_selector: default_email_selector(),
            password_selector: default_password_selector(),
            submit_xpath: default_submit_xpath(),
            ready_selector: default_ready_selector(),
            quick_access_filter: default_quick_access_filter(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: default_window_size(),
            chrome_flags: vec![],
            debug_port_min: default_debug_port_min(),
            debug_port_max: default_debug_port_max(),
            profile_prefix: default_profile_prefix(),
            login_timeout_secs: default_login_timeout(),
            page_timeout_secs: default_page_timeout(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("{}; using default configuration", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

impl BackOfficeConfig {
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    /// Prefix every show link on a month page starts with
    pub fn show_url_prefix(&self) -> String {
        format!("{}{}", self.base_url, self.show_info_path)
    }

    pub fn show_url(&self, code: &str) -> String {
        format!("{}{}", self.show_url_prefix(), code)
    }

    pub fn month_url(&self, month: &str) -> String {
        format!("{}{}{}", self.base_url, self.month_menu_path, month)
    }
}

impl BrowserSettings {
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Back-office account. The secret never shows up in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Read `THEATER_EMAIL` and `THEATER_PASSWORD`
    pub fn from_env() -> Result<Self, ConfigError> {
        let email = std::env::var("THEATER_EMAIL")
            .map_err(|_| ConfigError::MissingVariable("THEATER_EMAIL"))?;
        let password = std::env::var("THEATER_PASSWORD")
            .map_err(|_| ConfigError::MissingVariable("THEATER_PASSWORD"))?;
        Ok(Self::new(email, password))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
