use crate::browser::BrowserError;
use crate::commands::{self, Command};
use crate::helpers::{current_month_key, quick_access_months};
use crate::render;
use crate::service::BoxOffice;
use chrono::Local;

/// What the console should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Messages(Vec<String>),
    Quit,
}

impl Reply {
    fn text(message: impl Into<String>) -> Self {
        Reply::Messages(vec![message.into()])
    }
}

/// Handle one input line. Blocks while the browser works.
pub fn handle_line(office: &BoxOffice, line: &str) -> Reply {
    match commands::parse(line) {
        Ok(command) => handle(office, command),
        Err(e) => Reply::text(e.to_string()),
    }
}

pub fn handle(office: &BoxOffice, command: Command) -> Reply {
    match command {
        Command::Quit => Reply::Quit,
        Command::Help | Command::Unknown(_) => Reply::text(render::HELP),
        Command::ShowByCode(code) => show_sales(office, &code),
        Command::Month(month) => {
            let month = month.unwrap_or_else(current_month_key);
            match office.list_month(&month, None) {
                Ok(entries) if entries.is_empty() => Reply::text(render::NO_SHOWS),
                Ok(entries) => Reply::Messages(render::month_listing(&entries)),
                Err(e) => failure(e),
            }
        }
        Command::QuickDates => {
            let dates = office.quick_access_dates();
            if dates.is_empty() {
                Reply::text(render::NO_QUICK_DATES)
            } else {
                Reply::text(render::quick_dates(&dates))
            }
        }
        Command::QuickCheck(choice) => match resolve_quick_choice(office, &choice) {
            Some(code) => show_sales(office, &code),
            None if office.quick_access_dates().is_empty() => Reply::text(render::NO_QUICK_DATES),
            None => Reply::text(render::UNKNOWN_DATE),
        },
        Command::Refresh => {
            let months = quick_access_months(Local::now().date_naive());
            match office.populate_quick_access(&months) {
                Ok(0) => Reply::text(render::NO_NEW_DATES),
                Ok(_) => Reply::text(render::DATES_ADDED),
                Err(e) => failure(e),
            }
        }
    }
}

fn show_sales(office: &BoxOffice, code: &str) -> Reply {
    match office.fetch_show(code) {
        Ok(Some(summary)) => Reply::text(render::sales_summary(&summary)),
        Ok(None) => Reply::text(render::NOT_FOUND),
        Err(e) => failure(e),
    }
}

/// A date from the list, or its 1-based position in it
fn resolve_quick_choice(office: &BoxOffice, choice: &str) -> Option<String> {
    if let Some(code) = office.quick_access_code(choice) {
        return Some(code);
    }
    let index = choice.parse::<usize>().ok()?.checked_sub(1)?;
    let date = office.quick_access_dates().into_iter().nth(index)?;
    office.quick_access_code(&date)
}

fn failure(error: BrowserError) -> Reply {
    if error.is_timeout() {
        log::warn!("{}", error);
        Reply::text(render::TRY_AGAIN)
    } else {
        log::error!("{}", error);
        Reply::text(format!("Не получилось: {}", error))
    }
}
