use std::{
    cell::{Cell, RefCell},
    io::Write,
};

use log::{debug, warn};

use crate::{
    core::{
        generator::{DataGenerator, GeneratorState},
        record::Record,
    },
    error::{GeneratorError, GeneratorResult},
};

use super::{
    delimited_format::{DelimitedFormat, HeaderPolicy},
    row_projector::RowProjector,
};

/// A generator that renders each record as one delimited line.
///
/// Every entry of a record becomes one cell: the text under the value key goes
/// to the value line, and with [`HeaderPolicy::WithHeader`] the texts under the
/// header key of the first written record become a single header line.
///
/// Each line is rendered in memory by the [`DelimitedFormat`] and handed to the
/// sink in one `write_all`; any buffering is the sink's own. The sink is owned
/// from construction until [`close`](DataGenerator::close), which flushes it
/// once and drops it. Afterwards `write` and `flush` fail with
/// [`GeneratorError::ClosedGenerator`].
///
/// # Examples
///
/// ```
/// use delimited_generator::core::generator::DataGenerator;
/// use delimited_generator::generator::delimited::{
///     delimited_format::{DelimitedFormat, HeaderPolicy},
///     delimited_generator::DelimitedGenerator,
/// };
/// use serde_json::json;
///
/// let generator = DelimitedGenerator::new(
///     vec![],
///     DelimitedFormat::default(),
///     HeaderPolicy::WithHeader,
///     "h",
///     "d",
/// );
///
/// generator.write(&json!([{"h": "A", "d": "a"}, {"h": "B", "d": "b"}])).unwrap();
/// generator.write(&json!([{"h": "A", "d": "a"}, {"h": "B", "d": "bb"}])).unwrap();
///
/// let data = String::from_utf8(generator.into_inner().unwrap()).unwrap();
/// assert_eq!(data, "A,B\r\na,b\r\na,bb\r\n");
/// ```
pub struct DelimitedGenerator<W: Write> {
    /// `None` once closed.
    sink: RefCell<Option<W>>,
    format: DelimitedFormat,
    header: HeaderPolicy,
    projector: RowProjector,
    header_emitted: Cell<bool>,
    stage_name: String,
}

impl<W: Write> DelimitedGenerator<W> {
    pub fn new(
        sink: W,
        format: DelimitedFormat,
        header: HeaderPolicy,
        header_key: impl Into<String>,
        value_key: impl Into<String>,
    ) -> Self {
        Self {
            sink: RefCell::new(Some(sink)),
            format,
            header,
            projector: RowProjector::new(header_key, value_key),
            header_emitted: Cell::new(false),
            stage_name: "delimited".to_string(),
        }
    }

    pub(crate) fn with_stage_name(mut self, stage_name: &str) -> Self {
        self.stage_name = stage_name.to_string();
        self
    }

    pub fn format(&self) -> &DelimitedFormat {
        &self.format
    }

    pub fn header(&self) -> HeaderPolicy {
        self.header
    }

    pub fn header_key(&self) -> &str {
        self.projector.header_key()
    }

    pub fn value_key(&self) -> &str {
        self.projector.value_key()
    }

    pub fn state(&self) -> GeneratorState {
        if self.sink.borrow().is_some() {
            GeneratorState::Open
        } else {
            GeneratorState::Closed
        }
    }

    /// Flushes the sink and hands it back.
    ///
    /// Fails with [`GeneratorError::ClosedGenerator`] when the sink has
    /// already been released by `close`.
    pub fn into_inner(self) -> GeneratorResult<W> {
        let mut sink = self
            .sink
            .into_inner()
            .ok_or(GeneratorError::ClosedGenerator)?;
        sink.flush()?;
        Ok(sink)
    }
}

impl<W: Write> DataGenerator for DelimitedGenerator<W> {
    fn write(&self, record: &dyn Record) -> GeneratorResult {
        let mut guard = self.sink.borrow_mut();
        let sink = guard.as_mut().ok_or(GeneratorError::ClosedGenerator)?;

        let row = self.projector.project(record)?;

        if self.header.emits_header() && !self.header_emitted.get() {
            let line = self
                .format
                .render_line(row.header_cells.iter().map(|cell| cell.as_bytes()))?;
            sink.write_all(&line)?;
            self.header_emitted.set(true);
            debug!(
                "[{}] header line written with {} cells",
                self.stage_name,
                row.header_cells.len()
            );
        }

        let line = self
            .format
            .render_line(row.value_cells.iter().map(|cell| cell.as_bytes()))?;
        sink.write_all(&line)?;
        Ok(())
    }

    fn flush(&self) -> GeneratorResult {
        let mut guard = self.sink.borrow_mut();
        let sink = guard.as_mut().ok_or(GeneratorError::ClosedGenerator)?;
        sink.flush()?;
        Ok(())
    }

    fn close(&self) -> GeneratorResult {
        // Taking the sink out is the transition to `Closed`, whatever the
        // outcome of the final flush. The flush is attempted exactly once.
        let Some(mut sink) = self.sink.borrow_mut().take() else {
            return Ok(());
        };

        let result = sink.flush();
        drop(sink);

        match result {
            Ok(()) => {
                debug!("[{}] generator closed", self.stage_name);
                Ok(())
            }
            Err(error) => {
                warn!(
                    "[{}] generator closed but sink failed to release: {}",
                    self.stage_name, error
                );
                Err(GeneratorError::Sink(error))
            }
        }
    }
}
