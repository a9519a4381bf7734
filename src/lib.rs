#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # Delimited Generator

 Turns semi-structured records into delimited text (CSV, TSV, ...) and keeps a
 strict write/flush/close lifecycle on the output sink.

 ## Core Concepts

- **Record:** An ordered sequence of entries, each entry a key/value mapping. One
  key supplies the header text of the entry, another the value text. Any record
  model can be plugged in through the [`Record`](crate::core::record::Record) trait;
  JSON arrays of objects work out of the box.
- **HeaderPolicy:** Whether a header line, built from the first written record,
  precedes the value lines.
- **DelimitedFormat:** Delimiter, quoting, escaping and line terminator of every
  rendered line.
- **DataGenerator:** Writes records to a sink it owns, flushes it, and releases it
  on close. After close, writes and flushes fail; closing again is a no-op.
- **DelimitedGeneratorFactory:** Reads the entry key overrides from a config map
  and binds a fresh generator to each sink.

 ## Getting Started

```rust
# use delimited_generator::{
#     core::generator::DataGenerator,
#     error::GeneratorError,
#     generator::delimited::{
#         delimited_factory::{DelimitedGeneratorFactory, GeneratorContext, HEADER_KEY, VALUE_KEY},
#         delimited_format::{DelimitedFormat, HeaderPolicy},
#     },
# };
# use serde_json::{json, Map, Value};
fn main() -> Result<(), GeneratorError> {
    let mut configs = Map::new();
    configs.insert(HEADER_KEY.to_string(), Value::from("h"));
    configs.insert(VALUE_KEY.to_string(), Value::from("d"));

    let factory = DelimitedGeneratorFactory::new(
        GeneratorContext::new("csv-target"),
        DelimitedFormat::default(),
        HeaderPolicy::WithHeader,
        &configs,
    )?;

    let generator = factory.get_generator(vec![]);
    generator.write(&json!([{"h": "A", "d": "a"}, {"h": "B", "d": "b"}]))?;
    generator.write(&json!([{"h": "A", "d": "a"}, {"h": "B", "d": "bb"}]))?;

    let data = generator.into_inner()?;
    assert_eq!(data, b"A,B\r\na,b\r\na,bb\r\n");

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Record read interface and generator lifecycle
pub mod core;

/// Error types for generator operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of generators (for exemple: delimited text generator)
pub mod generator;
