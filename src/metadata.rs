use std::{error::Error, fmt};

use tonic::metadata::{Ascii, KeyAndValueRef, MetadataKey, MetadataMap, MetadataValue};

/// Ordered collection of key/value string pairs attached to a call.
///
/// Unlike [`MetadataMap`], insertion order is preserved and duplicate keys
/// are allowed. A `Metadata` is built once and never mutated; it is the
/// display/iteration view of a call's headers, while [`MetadataMap`] is the
/// wire-side representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Builds a metadata set from pairs, preserving their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key of the `i`th entry, or `None` past the end.
    pub fn key(&self, i: usize) -> Option<&str> {
        self.entries.get(i).map(|(k, _)| k.as_str())
    }

    /// Value of the `i`th entry, or `None` past the end.
    pub fn value(&self, i: usize) -> Option<&str> {
        self.entries.get(i).map(|(_, v)| v.as_str())
    }

    /// Iterates the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Appends every entry to a tonic [`MetadataMap`], keeping duplicates.
    pub fn apply_to(&self, map: &mut MetadataMap) -> Result<(), InvalidEntry> {
        for (key, value) in self.iter() {
            let parsed_key = key
                .parse::<MetadataKey<Ascii>>()
                .map_err(|_| InvalidEntry::new(key))?;
            let parsed_value = value
                .parse::<MetadataValue<Ascii>>()
                .map_err(|_| InvalidEntry::new(key))?;
            map.append(parsed_key, parsed_value);
        }
        Ok(())
    }

    /// Collects the ASCII entries of a tonic [`MetadataMap`].
    pub fn from_map(map: &MetadataMap) -> Self {
        let entries = map
            .iter()
            .filter_map(|entry| match entry {
                KeyAndValueRef::Ascii(key, value) => {
                    let value = value.to_str().ok()?;
                    Some((key.as_str().to_owned(), value.to_owned()))
                }
                KeyAndValueRef::Binary(..) => None,
            })
            .collect();
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Error returned when an entry cannot be represented as gRPC metadata.
#[derive(Debug)]
pub struct InvalidEntry {
    key: String,
}

impl InvalidEntry {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_owned(),
        }
    }

    /// The key of the offending entry.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for InvalidEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "metadata entry {:?} is not valid ascii gRPC metadata",
            self.key
        )
    }
}

impl Error for InvalidEntry {}
