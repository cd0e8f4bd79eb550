//! The name-keyed result of parsing a log line.

use crate::error::{Error, Result};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type alias for the underlying field storage.
/// All field values are stored as strings, with type conversion on demand.
pub type Fields = HashMap<String, String>;

/// A parsed log line, keyed by field name.
///
/// Keys are the field names of the [`CompiledFormat`](crate::CompiledFormat)
/// that produced the entry, so an entry always holds one value per directive.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Entry {
    /// The underlying field storage.
    fields: Fields,
}

impl Entry {
    /// Create a new entry from a fields map.
    pub fn from_fields(fields: Fields) -> Self {
        Self { fields }
    }

    /// Get a field value as a string.
    ///
    /// # Arguments
    ///
    /// * `name` - The field name to retrieve, e.g. `requestHeader:Host`
    ///
    /// # Returns
    ///
    /// The field value as a string, or an error if the field doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use rsapl::Entry;
    /// # use std::collections::HashMap;
    /// let mut fields = HashMap::new();
    /// fields.insert("status".to_string(), "200".to_string());
    /// let entry = Entry::from_fields(fields);
    ///
    /// assert_eq!(entry.field("status").unwrap(), "200");
    /// assert!(entry.field("nonexistent").is_err());
    /// ```
    pub fn field(&self, name: &str) -> Result<&str> {
        self.fields
            .get(name)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::field_not_found(name))
    }

    /// Get a field value as a float.
    pub fn float_field(&self, name: &str) -> Result<f64> {
        let value = self.field(name)?;
        value
            .parse::<f64>()
            .map_err(|e| Error::field_parse_error(name, value, "f64", e))
    }

    /// Get a field value as a 64-bit integer.
    ///
    /// Useful for sizes and microsecond timings (`%B`, `%D`, `%{msec}t`).
    pub fn int64_field(&self, name: &str) -> Result<i64> {
        let value = self.field(name)?;
        value
            .parse::<i64>()
            .map_err(|e| Error::field_parse_error(name, value, "i64", e))
    }

    /// Get a field value as a 32-bit integer.
    pub fn int_field(&self, name: &str) -> Result<i32> {
        let value = self.field(name)?;
        value
            .parse::<i32>()
            .map_err(|e| Error::field_parse_error(name, value, "i32", e))
    }

    /// Get an iterator over all field names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.fields.iter()
    }

    /// Get the number of fields in this entry.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if this entry has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a reference to the underlying fields map.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl From<Fields> for Entry {
    fn from(fields: Fields) -> Self {
        Self::from_fields(fields)
    }
}

impl From<Entry> for Fields {
    fn from(entry: Entry) -> Self {
        entry.fields
    }
}
