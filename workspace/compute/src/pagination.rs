//! Client-side paging of the filtered rows.

use model::TableState;

/// Half-open window `[page * page_size, page * page_size + page_size)`.
///
/// Pages past the end, and a zero page size, give an empty slice.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let Some(start) = page.checked_mul(page_size) else {
        return &[];
    };
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// Number of pages needed for `total` rows; zero rows need zero pages.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// The visible window of the content table plus what the pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage<'a, T> {
    pub rows: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<'a, T> TablePage<'a, T> {
    pub fn new(all_rows: &'a [T], table: TableState) -> Self {
        Self {
            rows: paginate(all_rows, table.page, table.page_size),
            page: table.page,
            page_size: table.page_size,
            total_items: all_rows.len(),
            total_pages: page_count(all_rows.len(), table.page_size),
        }
    }

    /// Rows with their 1-based position in the whole result set.
    ///
    /// A page past the end has no rows, so nothing is numbered.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &'a T)> + '_ {
        let offset = self.offset();
        self.rows
            .iter()
            .enumerate()
            .map(move |(i, row)| (offset + i + 1, row))
    }

    /// Index of the first visible row. Only meaningful when `rows` is
    /// non-empty, in which case `page * page_size` is below `total_items`.
    fn offset(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    /// "21–24 of 24", or "0 of 0" for an empty table.
    pub fn range_label(&self) -> String {
        if self.rows.is_empty() {
            return format!("0 of {}", self.total_items);
        }
        let first = self.offset() + 1;
        let last = first + self.rows.len() - 1;
        format!("{}–{} of {}", first, last, self.total_items)
    }
}
