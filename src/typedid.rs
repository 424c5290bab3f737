use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{de::Error, Deserialize, Serialize};

pub trait TypedIdMarker {
    fn tag() -> &'static str;
}

/// A numeric record id rendered with its type's tag, e.g. `T-42`.
pub struct TypedId<T: TypedIdMarker>(u32, PhantomData<T>);

impl<T: TypedIdMarker> TypedId<T> {
    pub fn new(number: u32) -> TypedId<T> {
        TypedId(number, PhantomData)
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> TypedId<T> {
        TypedId(self.0 + 1, PhantomData)
    }
}

impl<T: TypedIdMarker> Copy for TypedId<T> {}

impl<T: TypedIdMarker> Clone for TypedId<T> {
    fn clone(&self) -> TypedId<T> {
        *self
    }
}

impl<T: TypedIdMarker> PartialEq for TypedId<T> {
    fn eq(&self, other: &TypedId<T>) -> bool {
        self.0 == other.0
    }
}

impl<T: TypedIdMarker> Eq for TypedId<T> {}

impl<T: TypedIdMarker> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &TypedId<T>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: TypedIdMarker> Ord for TypedId<T> {
    fn cmp(&self, other: &TypedId<T>) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T: TypedIdMarker> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T: TypedIdMarker> Display for TypedId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}-{}", T::tag(), self.0)
    }
}

impl<T: TypedIdMarker> Debug for TypedId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(self, f)
    }
}

impl<T: TypedIdMarker> FromStr for TypedId<T> {
    type Err = TypedIdParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = s.rfind('-').ok_or(TypedIdParseError::InvalidFormat)?;
        let (tag, number) = s.split_at(index);

        if !tag.eq_ignore_ascii_case(T::tag()) {
            return Err(TypedIdParseError::InvalidTag);
        }

        let number = number[1..]
            .parse()
            .map_err(|_| TypedIdParseError::InvalidNumber)?;

        Ok(TypedId(number, PhantomData))
    }
}

impl<T: TypedIdMarker> Serialize for TypedId<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de, T: TypedIdMarker> Deserialize<'de> for TypedId<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TypedId::from_str(&s).map_err(|e| D::Error::custom(e))
    }
}

#[derive(Copy, Clone, Debug)]
pub enum TypedIdParseError {
    InvalidFormat,
    InvalidTag,
    InvalidNumber,
}

impl Display for TypedIdParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl TypedIdMarker for Widget {
        fn tag() -> &'static str {
            "W"
        }
    }

    #[test]
    fn displays_with_tag() {
        let id = TypedId::<Widget>::new(17);
        assert_eq!(id.to_string(), "W-17");
    }

    #[test]
    fn parses_case_insensitive_tag() {
        let id: TypedId<Widget> = "w-3".parse().unwrap();
        assert_eq!(id, TypedId::new(3));
    }

    #[test]
    fn rejects_wrong_tag() {
        let result = "X-3".parse::<TypedId<Widget>>();
        assert!(matches!(result, Err(TypedIdParseError::InvalidTag)));
    }

    #[test]
    fn rejects_missing_number() {
        let result = "W-".parse::<TypedId<Widget>>();
        assert!(matches!(result, Err(TypedIdParseError::InvalidNumber)));
    }
}
