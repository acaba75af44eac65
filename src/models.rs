use serde::{Deserialize, Serialize};

/// Shown in place of a figure the page did not yield
pub const PLACEHOLDER: &str = "—";

/// A ticket count and the money it brought in, as the page printed them.
/// `None` means the markers for that value were not found.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SalesFigure {
    pub tickets: Option<String>,
    pub revenue: Option<String>,
}

impl SalesFigure {
    pub fn tickets_or_placeholder(&self) -> &str {
        self.tickets.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn revenue_or_placeholder(&self) -> &str {
        self.revenue.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn is_complete(&self) -> bool {
        self.tickets.is_some() && self.revenue.is_some()
    }
}

/// Sales state of one show at the moment its page was read
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ShowSalesSummary {
    pub title: String,
    /// Performance date and time, formatted by the back office
    pub performance: String,
    pub sold: SalesFigure,
    /// Confirmed sales; reported separately from `sold` by the back office
    pub sold_actual: SalesFigure,
    pub reserved: SalesFigure,
}

/// Character span of the date inside a month-menu link text
const DATE_CHARS: std::ops::Range<usize> = 4..15;
/// First character of the title inside a month-menu link text
const TITLE_START: usize = 16;

/// One show link from a month menu
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ShowListingEntry {
    /// Link text with whitespace collapsed, e.g. `"Пт, 12.09 19:00 «ЧАЙКА»"`
    pub text: String,
    pub code: String,
}

impl ShowListingEntry {
    pub fn new(text: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: code.into(),
        }
    }

    /// Date part of the link text, used as the quick-access key
    pub fn display_date(&self) -> String {
        self.text
            .chars()
            .skip(DATE_CHARS.start)
            .take(DATE_CHARS.end - DATE_CHARS.start)
            .collect()
    }

    pub fn display_title(&self) -> String {
        self.text.chars().skip(TITLE_START).collect()
    }
}

/// A (date, code) pair kept for direct lookup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QuickAccessEntry {
    pub date: String,
    pub code: String,
}

impl From<&ShowListingEntry> for QuickAccessEntry {
    fn from(entry: &ShowListingEntry) -> Self {
        Self {
            date: entry.display_date(),
            code: entry.code.clone(),
        }
    }
}
