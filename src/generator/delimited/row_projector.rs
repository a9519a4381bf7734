use std::borrow::Cow;

use crate::{core::record::Record, error::GeneratorError};

/// Header and value cells of one record, one pair per entry in record order.
#[derive(Debug, PartialEq, Eq)]
pub struct ProjectedRow<'a> {
    pub header_cells: Vec<Cow<'a, str>>,
    pub value_cells: Vec<Cow<'a, str>>,
}

/// Projects a record onto a header line and a value line.
///
/// Each entry contributes the text under `header_key` to the header line and
/// the text under `value_key` to the value line.
///
/// # Examples
///
/// ```
/// use delimited_generator::generator::delimited::row_projector::RowProjector;
/// use serde_json::json;
///
/// let projector = RowProjector::new("h", "d");
/// let record = json!([{"h": "A", "d": "a"}, {"h": "B", "d": "b"}]);
///
/// let row = projector.project(&record).unwrap();
/// assert_eq!(row.header_cells, vec!["A", "B"]);
/// assert_eq!(row.value_cells, vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowProjector {
    header_key: String,
    value_key: String,
}

impl RowProjector {
    pub fn new(header_key: impl Into<String>, value_key: impl Into<String>) -> Self {
        Self {
            header_key: header_key.into(),
            value_key: value_key.into(),
        }
    }

    pub fn header_key(&self) -> &str {
        &self.header_key
    }

    pub fn value_key(&self) -> &str {
        &self.value_key
    }

    /// Builds both cell sequences for `record`.
    ///
    /// Fails with [`GeneratorError::MalformedRecord`] when the record root is
    /// not an entry sequence or when any entry lacks either key. Nothing is
    /// returned for a malformed record, so no partial line can be emitted.
    pub fn project<'a>(&self, record: &'a dyn Record) -> Result<ProjectedRow<'a>, GeneratorError> {
        let count = record.entry_count().ok_or_else(|| {
            GeneratorError::MalformedRecord("record is not a list of entries".to_string())
        })?;

        let mut header_cells = Vec::with_capacity(count);
        let mut value_cells = Vec::with_capacity(count);

        for entry in 0..count {
            header_cells.push(Self::field(record, entry, &self.header_key)?);
            value_cells.push(Self::field(record, entry, &self.value_key)?);
        }

        Ok(ProjectedRow {
            header_cells,
            value_cells,
        })
    }

    fn field<'a>(
        record: &'a dyn Record,
        entry: usize,
        key: &str,
    ) -> Result<Cow<'a, str>, GeneratorError> {
        record.scalar_field(entry, key).ok_or_else(|| {
            GeneratorError::MalformedRecord(format!("entry {} has no scalar field '{}'", entry, key))
        })
    }
}
