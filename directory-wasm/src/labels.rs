#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use directory_client::{PAGE_SIZE_OPTIONS, SortKey, SortOrder, SortState};

/// Заголовок колонки со стрелкой у активной сортировки.
pub(crate) fn header_label(title: &str, key: SortKey, sort: SortState) -> String {
    if sort.key != key {
        return title.to_string();
    }
    match sort.order {
        SortOrder::Asc => format!("{title} ▲"),
        SortOrder::Desc => format!("{title} ▼"),
    }
}

/// Значение из селектора размера страницы; незнакомые значения отбрасываются.
pub(crate) fn parse_page_size(raw: &str) -> Option<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|size| PAGE_SIZE_OPTIONS.contains(size))
}
