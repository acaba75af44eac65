use crate::models::{SalesFigure, ShowSalesSummary};
use scraper::{Html, Selector};
use std::sync::LazyLock;

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"a[href*="/admin/shows?name="]"#).expect("title selector")
});

static DATE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.pull-right.text-primary").expect("date selector"));

static FIGURES_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"p[style="margin-bottom: 4px;"]"#).expect("figures selector")
});

const SOLD: &str = "Продано <b>";
const SOLD_ACTUAL: &str = "Продано фактически <b>";
const RESERVED: &str = "Забронировано <b>";

const COUNT_END: &str = "</";
const REVENUE_END: &str = "</b> р.";

/// Parse a show info page.
///
/// Returns `None` when the title link or the date label is missing, which
/// means the page did not render what we expect. Individual figures that
/// cannot be located are left as `None` inside the summary.
pub fn extract_sales(html: &str) -> Option<ShowSalesSummary> {
    let document = Html::parse_document(html);

    let title = document.select(&TITLE_SELECTOR).next()?;
    let date_label = document.select(&DATE_SELECTOR).next()?;

    let title = title.text().collect::<String>().trim().to_string();
    let performance = performance_date(
        &date_label
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<String>(),
    );

    // Figures are located in the serialized markup, bold tags included
    let fragment = document
        .select(&FIGURES_SELECTOR)
        .map(|p| p.html())
        .collect::<Vec<_>>()
        .join(", ");

    let mut sold = figure(&fragment, SOLD);
    // Only the sold sum is printed with kopecks
    sold.revenue = sold
        .revenue
        .map(|sum| sum.split('.').next().unwrap_or_default().to_string());

    Some(ShowSalesSummary {
        title,
        performance,
        sold,
        sold_actual: figure(&fragment, SOLD_ACTUAL),
        reserved: figure(&fragment, RESERVED),
    })
}

/// The label reads like `(Пт) 12 сентября 2025 19:00`; keep what follows the first `)`
fn performance_date(label: &str) -> String {
    label
        .split(')')
        .nth(1)
        .unwrap_or(label)
        .trim()
        .to_string()
}

fn figure(fragment: &str, marker: &str) -> SalesFigure {
    let tickets = between(fragment, marker, COUNT_END).map(|s| s.trim().to_string());
    let revenue = between(fragment, marker, REVENUE_END).map(|s| {
        s.rsplit("<b>")
            .next()
            .unwrap_or_default()
            .trim()
            .to_string()
    });

    if tickets.is_none() || revenue.is_none() {
        log::debug!("Sales markers for {:?} incomplete on page", marker);
    }

    SalesFigure { tickets, revenue }
}

/// Text after the first `left` up to the next `right`
fn between<'a>(text: &'a str, left: &str, right: &str) -> Option<&'a str> {
    let start = text.find(left)? + left.len();
    let rest = &text[start..];
    let end = rest.find(right)?;
    Some(&rest[..end])
}
