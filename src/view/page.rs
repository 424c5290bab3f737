use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 25;

/// A display-level slice of a derived view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

/// Slices `items` to the 1-indexed `page`. A zero page or limit falls back to
/// the first page and the default limit.
pub fn paginate<T>(items: Vec<T>, page: Option<usize>, limit: Option<usize>) -> Page<T> {
    let page = page.filter(|page| *page > 0).unwrap_or(1);
    let limit = limit.filter(|limit| *limit > 0).unwrap_or(DEFAULT_LIMIT);
    let total = items.len();
    let total_pages = total / limit + usize::from(total % limit != 0);

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();

    Page {
        items,
        total,
        page,
        limit,
        total_pages,
    }
}
