#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageMeta {
    pub(crate) current_page: u64,
    pub(crate) last_page: u64,
    pub(crate) per_page: u64,
    pub(crate) total: u64,
    pub(crate) from: u64,
    pub(crate) to: u64,
}

impl PageMeta {
    pub(crate) fn new(current_page: u64, per_page: u64, total: u64, item_count: usize) -> Self {
        let per_page = per_page.max(1);
        let last_page = total.div_ceil(per_page).max(1);

        // from/to stay 0 for an empty page, including pages past the end
        let (from, to) = if item_count == 0 {
            (0, 0)
        } else {
            let from = current_page
                .saturating_sub(1)
                .saturating_mul(per_page)
                .saturating_add(1);
            let to = from.saturating_add(item_count as u64 - 1).min(total);
            (from, to)
        };

        Self {
            current_page,
            last_page,
            per_page,
            total,
            from,
            to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Page<T> {
    pub(crate) data: Vec<T>,
    pub(crate) meta: PageMeta,
}

impl<T> Page<T> {
    pub(crate) fn new(data: Vec<T>, current_page: u64, per_page: u64, total: u64) -> Self {
        let meta = PageMeta::new(current_page, per_page, total, data.len());
        Self { data, meta }
    }

    pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
