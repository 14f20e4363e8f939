//! Shared types used across the codebase

use serde::{Deserialize, Deserializer};

/// A request field that is either left out of the payload or supplied with a value.
///
/// Partial updates use this instead of `Option` truthiness so that a value
/// supplied as `""` is still an explicit change. JSON `null` counts as absent.
/// Struct fields of this type need `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Absent,
    Present(T),
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Present(v) => Field::Present(f(v)),
        }
    }

    /// Collapse into an `Option`, losing the absent/present distinction.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Absent => None,
            Field::Present(v) => Some(v),
        }
    }

    /// Overwrite `target` only when a value was supplied.
    pub fn apply_to(self, target: &mut T) {
        if let Field::Present(v) = self {
            *target = v;
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Field::Present(v),
            None => Field::Absent,
        })
    }
}
