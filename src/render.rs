//! User-facing text
//!
//! The core returns records; this module turns them into the messages the
//! console prints. Month listings are MarkdownV2-escaped so the same text can
//! be sent to a chat renderer.

use crate::helpers::md_escape;
use crate::models::{ShowListingEntry, ShowSalesSummary};

/// Month listings go out in messages of this many shows
pub const LISTING_CHUNK: usize = 20;

pub const NOT_FOUND: &str = "Не получилось просканировать сайт. Попробуй ещё раз.";
pub const TRY_AGAIN: &str = "Сайт отвечает слишком долго. Попробуй ещё раз.";
pub const NO_SHOWS: &str = "Спектаклей не найдено.";
pub const NO_QUICK_DATES: &str =
    "У бота пока нет дат! Выполни `refresh`, чтобы найти и добавить даты.";
pub const NO_NEW_DATES: &str = "Дат на ближайшие пару месяцев не обнаружено…";
pub const DATES_ADDED: &str = "Даты добавлены. Можно смотреть продажи!";
pub const UNKNOWN_DATE: &str = "Такой даты нет в быстром доступе.";

pub const HELP: &str = "Краткая инструкция.\n\n\
<код> или code <код> — продажи спектакля по коду.\n\
month [мм.гггг] — спектакли и коды за месяц (по умолчанию текущий).\n\
refresh — найти и добавить даты в быстрый доступ (этот и следующий месяц).\n\
dates — даты в быстром доступе.\n\
check <дата или номер> — продажи по дате из быстрого доступа.\n\
quit — выход.";

pub fn sales_summary(summary: &ShowSalesSummary) -> String {
    format!(
        "Спектакль \"{}\"\n{}\n\
         Продано билетов: {} на {} рублей\n\
         Продано фактически: {} на {} рублей\n\
         Забронировано: {} на {} рублей",
        summary.title,
        summary.performance,
        summary.sold.tickets_or_placeholder(),
        summary.sold.revenue_or_placeholder(),
        summary.sold_actual.tickets_or_placeholder(),
        summary.sold_actual.revenue_or_placeholder(),
        summary.reserved.tickets_or_placeholder(),
        summary.reserved.revenue_or_placeholder(),
    )
}

/// One escaped message per chunk of shows
pub fn month_listing(entries: &[ShowListingEntry]) -> Vec<String> {
    entries
        .chunks(LISTING_CHUNK)
        .map(|chunk| {
            chunk
                .iter()
                .map(|entry| {
                    md_escape(&format!(
                        "{}\n\"{}\"\nКод: `{}`\n\n",
                        entry.display_date(),
                        entry.display_title(),
                        entry.code
                    ))
                })
                .collect::<String>()
        })
        .collect()
}

/// Numbered so a date can be picked by its position
pub fn quick_dates(dates: &[String]) -> String {
    let mut out = String::from("Выбери дату:");
    for (i, date) in dates.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", i + 1, date));
    }
    out
}
