//! Delimited text generation from key/value records.
//!
//! This module turns records made of ordered key/value entries into delimited
//! lines, one line per record, with an optional header line.
//!
//! # Module Architecture
//!
//! 1. **RowProjector**: reads the header text and the value text of every entry
//!    of a record, in record order.
//!
//! 2. **DelimitedFormat**: the rendering rules (delimiter, quoting, escaping,
//!    line terminator) applied to every line. [`CsvMode`](delimited_format::CsvMode)
//!    offers named presets.
//!
//! 3. **DelimitedGenerator**: owns the sink, decides when the header line is
//!    written according to the [`HeaderPolicy`](delimited_format::HeaderPolicy)
//!    and enforces the write/flush/close lifecycle.
//!
//! 4. **DelimitedGeneratorFactory**: reads the entry key overrides from a config
//!    map and binds fresh generators to sinks.
//!
//! # Ownership Considerations
//!
//! A generator owns its sink until it is closed, at which point the sink is
//! flushed and dropped. To inspect what was written to an in-memory buffer,
//! either call [`into_inner`](delimited_generator::DelimitedGenerator::into_inner)
//! on an open generator or hand it a sink that shares its buffer.
//!
//! # Examples
//!
//! ```
//! use delimited_generator::core::generator::DataGenerator;
//! use delimited_generator::generator::delimited::{
//!     delimited_factory::{register_configs, DelimitedGeneratorFactory, GeneratorContext},
//!     delimited_format::{CsvMode, HeaderPolicy},
//! };
//! use serde_json::{json, Map};
//!
//! let mut configs = Map::new();
//! register_configs(&mut configs);
//!
//! let factory = DelimitedGeneratorFactory::new(
//!     GeneratorContext::new("people"),
//!     CsvMode::Tdf.format(),
//!     HeaderPolicy::WithHeader,
//!     &configs,
//! )
//! .unwrap();
//!
//! let generator = factory.get_generator(vec![]);
//! generator
//!     .write(&json!([
//!         {"header": "name", "value": "Alice"},
//!         {"header": "age", "value": 28},
//!     ]))
//!     .unwrap();
//! generator
//!     .write(&json!([
//!         {"header": "name", "value": "Bob"},
//!         {"header": "age", "value": 35},
//!     ]))
//!     .unwrap();
//!
//! let data = String::from_utf8(generator.into_inner().unwrap()).unwrap();
//! assert_eq!(data, "name\tage\r\nAlice\t28\r\nBob\t35\r\n");
//! ```

/// Builds the factory that hands out generators.
pub mod delimited_factory;

/// Format policy, presets and header policy.
pub mod delimited_format;

/// The generator itself.
pub mod delimited_generator;

/// Record to cell projection.
pub mod row_projector;
