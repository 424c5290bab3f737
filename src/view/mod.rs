use std::cmp::Ordering;

use crate::error::Error;

pub mod filter;
pub mod highlight;
pub mod matches;
pub mod page;
pub mod sort;

use self::filter::Filterable;

/// A closed set of values that can be selected by label.
pub trait Enumerated: Copy + PartialEq + Sized + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.label().eq_ignore_ascii_case(label))
    }
}

/// Parses a required choice such as a sort field, falling back to `default`
/// when the value is missing or blank.
pub fn parse_choice<T: Enumerated>(
    dimension: &'static str,
    raw: Option<&str>,
    default: T,
) -> Result<T, Error> {
    match raw.map(str::trim) {
        None => Ok(default),
        Some(raw) if raw.is_empty() => Ok(default),
        Some(raw) => T::from_label(raw).ok_or_else(|| Error::InvalidCriteria {
            dimension,
            value: raw.to_string(),
        }),
    }
}

/// A discrete filter choice; `All` is the sentinel that admits anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T: Enumerated> Selection<T> {
    /// Parses a raw filter value. Missing, blank and `All` select everything,
    /// anything outside the enumeration is rejected.
    pub fn parse(dimension: &'static str, raw: Option<&str>) -> Result<Selection<T>, Error> {
        let raw = match raw.map(str::trim) {
            None => return Ok(Selection::All),
            Some(raw) if raw.is_empty() || raw.eq_ignore_ascii_case("all") => {
                return Ok(Selection::All)
            }
            Some(raw) => raw,
        };

        T::from_label(raw)
            .map(Selection::Only)
            .ok_or_else(|| Error::InvalidCriteria {
                dimension,
                value: raw.to_string(),
            })
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Selection<T> {
        Selection::All
    }
}

/// The search text and discrete filters describing one derived view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Criteria<F> {
    pub search: String,
    pub filters: F,
}

impl<F: Default> Criteria<F> {
    pub fn search(search: impl Into<String>) -> Criteria<F> {
        Criteria {
            search: search.into(),
            filters: F::default(),
        }
    }
}

/// Filters `records` by `criteria` and stably sorts the survivors.
pub fn derive<R, C>(records: &[R], criteria: &Criteria<R::Filters>, compare: C) -> Vec<R>
where
    R: Filterable,
    C: Fn(&R, &R) -> Ordering,
{
    let predicate = filter::compose(criteria);
    let mut derived: Vec<R> = records
        .iter()
        .filter(|record| predicate(*record))
        .cloned()
        .collect();
    sort::stable_sort(&mut derived, compare);

    derived
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq)]
    enum Shade {
        Light,
        Dark,
    }

    impl Enumerated for Shade {
        const ALL: &'static [Shade] = &[Shade::Light, Shade::Dark];

        fn label(&self) -> &'static str {
            match self {
                Shade::Light => "Light",
                Shade::Dark => "Dark",
            }
        }
    }

    #[test]
    fn parse_defaults_to_all() {
        assert_eq!(Selection::<Shade>::parse("shade", None).unwrap(), Selection::All);
        assert_eq!(Selection::<Shade>::parse("shade", Some("  ")).unwrap(), Selection::All);
        assert_eq!(Selection::<Shade>::parse("shade", Some("ALL")).unwrap(), Selection::All);
    }

    #[test]
    fn parse_matches_labels_case_insensitively() {
        assert_eq!(
            Selection::<Shade>::parse("shade", Some("dark")).unwrap(),
            Selection::Only(Shade::Dark)
        );
    }

    #[test]
    fn parse_rejects_values_outside_enumeration() {
        assert_eq!(
            Selection::<Shade>::parse("shade", Some("Medium")).unwrap_err(),
            Error::InvalidCriteria {
                dimension: "shade",
                value: "Medium".to_string(),
            }
        );
    }

    #[test]
    fn only_admits_equal_values() {
        let selection = Selection::Only(Shade::Light);
        assert!(selection.admits(&Shade::Light));
        assert!(!selection.admits(&Shade::Dark));
        assert!(Selection::All.admits(&Shade::Dark));
    }
}
