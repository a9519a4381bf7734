use std::{borrow::Cow, collections::HashMap};

use serde_json::Value;

/// Read-only view over a record made of an ordered sequence of entries.
///
/// Each entry is a key/value mapping. The generator only ever asks for the
/// text of a named scalar field inside the i-th entry, so any record model can
/// be plugged in by implementing these two methods.
///
/// # Examples
///
/// ```
/// use delimited_generator::core::record::Record;
/// use serde_json::json;
///
/// let record = json!([{"header": "A", "value": 1}, {"header": "B", "value": true}]);
///
/// assert_eq!(record.entry_count(), Some(2));
/// assert_eq!(record.scalar_field(0, "value").as_deref(), Some("1"));
/// assert_eq!(record.scalar_field(1, "value").as_deref(), Some("true"));
/// assert_eq!(record.scalar_field(1, "missing"), None);
/// ```
pub trait Record {
    /// Number of entries, or `None` when the record root is not an entry sequence.
    fn entry_count(&self) -> Option<usize>;

    /// Text of the scalar field `name` of the entry at `entry`.
    ///
    /// Returns `None` when the entry does not exist, the field is absent, or
    /// the field holds a map or a list.
    fn scalar_field(&self, entry: usize, name: &str) -> Option<Cow<'_, str>>;
}

/// A JSON array of objects. `null` renders as the empty string.
impl Record for Value {
    fn entry_count(&self) -> Option<usize> {
        self.as_array().map(Vec::len)
    }

    fn scalar_field(&self, entry: usize, name: &str) -> Option<Cow<'_, str>> {
        let field = self.as_array()?.get(entry)?.as_object()?.get(name)?;
        match field {
            Value::String(text) => Some(Cow::Borrowed(text.as_str())),
            Value::Number(number) => Some(Cow::Owned(number.to_string())),
            Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
            Value::Null => Some(Cow::Borrowed("")),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl Record for Vec<HashMap<String, String>> {
    fn entry_count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn scalar_field(&self, entry: usize, name: &str) -> Option<Cow<'_, str>> {
        self.get(entry)?
            .get(name)
            .map(|text| Cow::Borrowed(text.as_str()))
    }
}
