//! Текстовые помощники для отрисовки таблицы.

use chrono::{DateTime, Datelike, Utc};

use crate::models::PageMeta;

/// Дата регистрации в виде `1st January 2024` (UTC).
///
/// Отсутствующая дата отображается пустой строкой.
pub fn format_registration_date(created_at: Option<DateTime<Utc>>) -> String {
    match created_at {
        Some(date) => {
            let day = date.day();
            format!("{day}{} {}", ordinal_suffix(day), date.format("%B %Y"))
        }
        None => String::new(),
    }
}

/// Подпись `Page X of Y`.
pub fn page_summary(meta: &PageMeta) -> String {
    format!("Page {} of {}", meta.current_page, meta.last_page)
}

/// Подпись `from to to of total users`.
pub fn range_summary(meta: &PageMeta) -> String {
    format!("{} to {} of {} users", meta.from, meta.to, meta.total)
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
