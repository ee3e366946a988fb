use serde::Serialize;

/// Fixed page size for restaurant listings.
pub const PAGE_SIZE: u64 = 12;

/// Parses a 1-based page number, falling back to 1 for missing, malformed or
/// non-positive input.
#[must_use]
pub fn normalize_page(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    #[must_use]
    pub fn new(page: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of a larger result set. `total` counts the whole set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
}

impl<T> PaginatedResult<T> {
    /// Truncates `items` to the page size if a store returned more.
    #[must_use]
    pub fn new(request: PageRequest, mut items: Vec<T>, total: u64) -> Self {
        items.truncate(usize::try_from(request.page_size).unwrap_or(usize::MAX));
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_page_defaults_and_bounds() {
        assert_eq!(normalize_page(None), 1);
        assert_eq!(normalize_page(Some("")), 1);
        assert_eq!(normalize_page(Some("abc")), 1);
        assert_eq!(normalize_page(Some("0")), 1);
        assert_eq!(normalize_page(Some("-3")), 1);
        assert_eq!(normalize_page(Some("4")), 4);
    }

    #[test]
    fn page_request_skip() {
        assert_eq!(PageRequest::new(1).skip(), 0);
        assert_eq!(PageRequest::new(3).skip(), 24);
        assert_eq!(PageRequest::new(0).page, 1);
    }

    #[test]
    fn paginated_result_never_exceeds_page_size() {
        let result = PaginatedResult::new(PageRequest::new(1), (0..20).collect::<Vec<_>>(), 20);
        assert_eq!(result.items.len(), 12);
        assert_eq!(result.total, 20);
    }
}
