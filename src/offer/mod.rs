use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::store::Record;
use crate::typedid::{TypedId, TypedIdMarker};
use crate::view::filter::{Filterable, Searchable};
use crate::view::sort::SortOrder;
use crate::view::{parse_choice, Criteria, Enumerated, Selection};

pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type OfferId = TypedId<Offer>;

/// A merchant offer shown in the marketplace. Offers are read-only.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Offer {
    pub id: OfferId,
    pub merchant: String,
    pub name: String,
    pub category: OfferCategory,
    /// In cents.
    pub value: u32,
    pub rating: f32,
    pub end_date: DateTime<Utc>,
}

impl TypedIdMarker for Offer {
    fn tag() -> &'static str {
        "OFR"
    }
}

impl Record for Offer {
    const KIND: &'static str = "offer";

    fn id(&self) -> OfferId {
        self.id
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum OfferCategory {
    Dining,
    Retail,
    Travel,
    Entertainment,
    Health,
    Services,
}

impl Enumerated for OfferCategory {
    const ALL: &'static [OfferCategory] = &[
        OfferCategory::Dining,
        OfferCategory::Retail,
        OfferCategory::Travel,
        OfferCategory::Entertainment,
        OfferCategory::Health,
        OfferCategory::Services,
    ];

    fn label(&self) -> &'static str {
        match self {
            OfferCategory::Dining => "Dining",
            OfferCategory::Retail => "Retail",
            OfferCategory::Travel => "Travel",
            OfferCategory::Entertainment => "Entertainment",
            OfferCategory::Health => "Health",
            OfferCategory::Services => "Services",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OfferFilters {
    pub category: Selection<OfferCategory>,
}

impl Searchable for Offer {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.merchant.as_str()),
            Cow::Borrowed(self.name.as_str()),
        ]
    }
}

impl Filterable for Offer {
    type Filters = OfferFilters;

    fn admits(&self, filters: &OfferFilters) -> bool {
        filters.category.admits(&self.category)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OfferSortField {
    Rating,
    Value,
    Merchant,
    EndDate,
}

impl Enumerated for OfferSortField {
    const ALL: &'static [OfferSortField] = &[
        OfferSortField::Rating,
        OfferSortField::Value,
        OfferSortField::Merchant,
        OfferSortField::EndDate,
    ];

    fn label(&self) -> &'static str {
        match self {
            OfferSortField::Rating => "rating",
            OfferSortField::Value => "value",
            OfferSortField::Merchant => "merchant",
            OfferSortField::EndDate => "end_date",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OfferSort {
    pub field: OfferSortField,
    pub order: SortOrder,
}

impl OfferSort {
    pub fn compare(&self, a: &Offer, b: &Offer) -> Ordering {
        let ordering = match self.field {
            OfferSortField::Rating => a.rating.total_cmp(&b.rating),
            OfferSortField::Value => a.value.cmp(&b.value),
            OfferSortField::Merchant => a.merchant.to_lowercase().cmp(&b.merchant.to_lowercase()),
            OfferSortField::EndDate => a.end_date.cmp(&b.end_date),
        };

        self.order.apply(ordering)
    }
}

impl Default for OfferSort {
    fn default() -> OfferSort {
        OfferSort {
            field: OfferSortField::EndDate,
            order: SortOrder::Desc,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct OfferQuery {
    #[serde(default)]
    pub search: String,
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl OfferQuery {
    pub fn criteria(&self) -> Result<Criteria<OfferFilters>, Error> {
        Ok(Criteria {
            search: self.search.clone(),
            filters: OfferFilters {
                category: Selection::parse("category", self.category.as_deref())?,
            },
        })
    }

    pub fn sort(&self) -> Result<OfferSort, Error> {
        let default = OfferSort::default();

        Ok(OfferSort {
            field: parse_choice("sort_by", self.sort_by.as_deref(), default.field)?,
            order: parse_choice("sort_order", self.sort_order.as_deref(), default.order)?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::RecordStore;
    use crate::view::derive;
    use chrono::Duration;

    pub(crate) fn offer(
        number: u32,
        merchant: &str,
        category: OfferCategory,
        value: u32,
        rating: f32,
    ) -> Offer {
        Offer {
            id: OfferId::new(number),
            merchant: merchant.to_string(),
            name: format!("{} reward", merchant),
            category,
            value,
            rating,
            end_date: Utc::now() + Duration::days(number as i64),
        }
    }

    fn store() -> RecordStore<Offer> {
        RecordStore::with_records(vec![
            offer(1, "Bean Bar", OfferCategory::Dining, 500, 4.5),
            offer(2, "Gear Hut", OfferCategory::Retail, 2500, 3.9),
            offer(3, "Noodle House", OfferCategory::Dining, 800, 4.8),
            offer(4, "Sky Air", OfferCategory::Travel, 10000, 4.5),
        ])
        .unwrap()
    }

    fn ids(offers: &[Offer]) -> Vec<String> {
        offers.iter().map(|o| o.id.to_string()).collect()
    }

    #[test]
    fn default_sort_ends_latest_first() {
        let store = store();
        let sort = OfferQuery::default().sort().unwrap();

        let derived = derive(store.get_all(), &Criteria::default(), |a, b| sort.compare(a, b));

        assert_eq!(ids(&derived), vec!["OFR-4", "OFR-3", "OFR-2", "OFR-1"]);
    }

    #[test]
    fn rating_ties_keep_store_order() {
        let store = store();
        let query = OfferQuery {
            sort_by: Some("rating".into()),
            ..Default::default()
        };
        let sort = query.sort().unwrap();

        let derived = derive(store.get_all(), &Criteria::default(), |a, b| sort.compare(a, b));

        assert_eq!(ids(&derived), vec!["OFR-3", "OFR-1", "OFR-4", "OFR-2"]);
    }

    #[test]
    fn category_and_search_combine() {
        let store = store();
        let query = OfferQuery {
            search: "HOUSE".into(),
            category: Some("dining".into()),
            ..Default::default()
        };

        let derived = derive(store.get_all(), &query.criteria().unwrap(), |_, _| {
            Ordering::Equal
        });

        assert_eq!(ids(&derived), vec!["OFR-3"]);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let query = OfferQuery {
            category: Some("Groceries".into()),
            ..Default::default()
        };

        assert_eq!(
            query.criteria().unwrap_err(),
            Error::InvalidCriteria {
                dimension: "category",
                value: "Groceries".to_string(),
            }
        );
    }
}
