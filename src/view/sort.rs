use std::cmp::Ordering;

use super::Enumerated;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl Enumerated for SortOrder {
    const ALL: &'static [SortOrder] = &[SortOrder::Asc, SortOrder::Desc];

    fn label(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Sorts in place, keeping records that compare equal in their original order.
pub fn stable_sort<R, C>(records: &mut [R], compare: C)
where
    C: Fn(&R, &R) -> Ordering,
{
    // slice::sort_by is guaranteed stable
    records.sort_by(|a, b| compare(a, b));
}
