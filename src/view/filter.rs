use std::borrow::Cow;

use crate::store::Record;

use super::Criteria;

/// A record that can be matched against free-text search.
pub trait Searchable {
    /// The fields consulted by search. Optional fields that are absent are
    /// simply left out.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

/// A record with a set of discrete filters.
pub trait Filterable: Record + Searchable {
    type Filters: Default;

    fn admits(&self, filters: &Self::Filters) -> bool;
}

/// Combines the search text and the discrete filters into one predicate.
pub fn compose<'a, R: Filterable + 'a>(
    criteria: &'a Criteria<R::Filters>,
) -> impl Fn(&R) -> bool + 'a {
    let needle = criteria.search.trim().to_lowercase();

    move |record: &R| matches_search(record, &needle) && record.admits(&criteria.filters)
}

/// `needle` must already be lowercased. An empty needle matches everything.
pub fn matches_search<R: Searchable>(record: &R, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typedid::{TypedId, TypedIdMarker};
    use crate::view::{Enumerated, Selection};

    #[derive(Copy, Clone, Debug, PartialEq)]
    enum Flavor {
        Sweet,
        Sour,
    }

    impl Enumerated for Flavor {
        const ALL: &'static [Flavor] = &[Flavor::Sweet, Flavor::Sour];

        fn label(&self) -> &'static str {
            match self {
                Flavor::Sweet => "Sweet",
                Flavor::Sour => "Sour",
            }
        }
    }

    #[derive(Copy, Clone, Debug, PartialEq)]
    enum Size {
        Small,
        Large,
    }

    impl Enumerated for Size {
        const ALL: &'static [Size] = &[Size::Small, Size::Large];

        fn label(&self) -> &'static str {
            match self {
                Size::Small => "Small",
                Size::Large => "Large",
            }
        }
    }

    #[derive(Clone, Debug)]
    struct Snack {
        id: TypedId<Snack>,
        name: &'static str,
        blurb: Option<&'static str>,
        flavor: Flavor,
        size: Size,
    }

    #[derive(Default)]
    struct SnackFilters {
        flavor: Selection<Flavor>,
        size: Selection<Size>,
    }

    impl TypedIdMarker for Snack {
        fn tag() -> &'static str {
            "S"
        }
    }

    impl Record for Snack {
        const KIND: &'static str = "snack";

        fn id(&self) -> TypedId<Snack> {
            self.id
        }
    }

    impl Searchable for Snack {
        fn search_fields(&self) -> Vec<Cow<'_, str>> {
            let mut fields = vec![Cow::Owned(self.id.to_string()), Cow::Borrowed(self.name)];
            if let Some(blurb) = self.blurb {
                fields.push(Cow::Borrowed(blurb));
            }
            fields
        }
    }

    impl Filterable for Snack {
        type Filters = SnackFilters;

        fn admits(&self, filters: &SnackFilters) -> bool {
            filters.flavor.admits(&self.flavor) && filters.size.admits(&self.size)
        }
    }

    fn snacks() -> Vec<Snack> {
        vec![
            Snack {
                id: TypedId::new(1),
                name: "Lemon Drop",
                blurb: None,
                flavor: Flavor::Sour,
                size: Size::Small,
            },
            Snack {
                id: TypedId::new(2),
                name: "Caramel Bar",
                blurb: Some("chewy and open-faced"),
                flavor: Flavor::Sweet,
                size: Size::Large,
            },
            Snack {
                id: TypedId::new(3),
                name: "Sour Belt",
                blurb: Some("Open wide"),
                flavor: Flavor::Sour,
                size: Size::Large,
            },
        ]
    }

    fn matching(criteria: &Criteria<SnackFilters>) -> Vec<u32> {
        let predicate = compose(criteria);
        snacks()
            .iter()
            .filter(|snack| predicate(*snack))
            .map(|snack| snack.id.number())
            .collect()
    }

    #[test]
    fn empty_search_matches_everything() {
        assert_eq!(matching(&Criteria::search("")), vec![1, 2, 3]);
        assert_eq!(matching(&Criteria::search("   ")), vec![1, 2, 3]);
    }

    #[test]
    fn search_ignores_case() {
        assert_eq!(matching(&Criteria::search("OPEN")), vec![2, 3]);
        assert_eq!(matching(&Criteria::search("open")), vec![2, 3]);
    }

    #[test]
    fn search_is_unanchored() {
        assert_eq!(matching(&Criteria::search("ram")), vec![2]);
    }

    #[test]
    fn missing_optional_field_still_matches_other_fields() {
        assert_eq!(matching(&Criteria::search("lemon")), vec![1]);
    }

    #[test]
    fn search_covers_id() {
        assert_eq!(matching(&Criteria::search("s-3")), vec![3]);
    }

    #[test]
    fn filters_combine_with_and() {
        let criteria = Criteria {
            search: String::new(),
            filters: SnackFilters {
                flavor: Selection::Only(Flavor::Sour),
                size: Selection::Only(Size::Large),
            },
        };

        assert_eq!(matching(&criteria), vec![3]);
    }

    #[test]
    fn search_and_filters_combine_with_and() {
        let criteria = Criteria {
            search: "open".to_string(),
            filters: SnackFilters {
                flavor: Selection::Only(Flavor::Sweet),
                size: Selection::All,
            },
        };

        assert_eq!(matching(&criteria), vec![2]);
    }
}
