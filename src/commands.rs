use crate::helpers::{is_month_key, is_show_code};

/// A console request, validated just enough to be safe to hand to the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sales of one show by its back-office code
    ShowByCode(String),
    /// Shows of a month; `None` is the current month
    Month(Option<String>),
    /// The quick-access dates
    QuickDates,
    /// Sales of a quick-access show, by date or by its number in the list
    QuickCheck(String),
    /// Collect quick-access dates for this month and the next
    Refresh,
    Help,
    Quit,
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Нужен числовой код показа.")]
    BadCode,

    #[error("Формат: мм.гггг (например, 09.2025)")]
    BadMonth,

    #[error("Укажи дату из списка: check <дата или номер>")]
    MissingDate,
}

/// Parse one input line
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "" | "help" | "?" | "/start" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "code" => {
            if is_show_code(rest) {
                Ok(Command::ShowByCode(rest.to_string()))
            } else {
                Err(CommandError::BadCode)
            }
        }
        "month" if rest.is_empty() => Ok(Command::Month(None)),
        "month" => {
            if is_month_key(rest) {
                Ok(Command::Month(Some(rest.to_string())))
            } else {
                Err(CommandError::BadMonth)
            }
        }
        "dates" => Ok(Command::QuickDates),
        "check" if rest.is_empty() => Err(CommandError::MissingDate),
        "check" => Ok(Command::QuickCheck(rest.to_string())),
        "refresh" => Ok(Command::Refresh),
        _ if is_show_code(line) => Ok(Command::ShowByCode(line.to_string())),
        _ => Ok(Command::Unknown(line.to_string())),
    }
}
