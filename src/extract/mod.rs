//! Page parsers for the back office
//!
//! Pure functions from rendered HTML to records. Nothing here touches the
//! browser, so the parsers can be exercised with saved pages.
//!
//! Both parsers are fail-soft: a missing figure becomes `None`, a missing
//! menu becomes an empty listing. Only a show page without its title or date
//! label is reported as not found.

mod listing;
mod sales;

pub use listing::extract_month_listing;
pub use sales::extract_sales;
