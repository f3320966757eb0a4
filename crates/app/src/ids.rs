//! Opaque Ids
//!
//! Backend services issue opaque string identifiers. `OpaqueId<T>` keeps a
//! prop id from being handed to an endpoint that expects a cart line id.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

pub struct OpaqueId<T>(String, PhantomData<T>);

impl<T> OpaqueId<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into(), PhantomData)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T> Clone for OpaqueId<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T> Debug for OpaqueId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for OpaqueId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for OpaqueId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for OpaqueId<T> {}

impl<T> Hash for OpaqueId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for OpaqueId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for OpaqueId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<String> for OpaqueId<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> From<&str> for OpaqueId<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> From<OpaqueId<T>> for String {
    fn from(value: OpaqueId<T>) -> Self {
        value.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn ids_compare_by_inner_string() {
        let a: OpaqueId<Marker> = "a".into();
        let b: OpaqueId<Marker> = OpaqueId::new("a");

        assert_eq!(a, b);
        assert_eq!(a.to_string(), "a");
    }
}
