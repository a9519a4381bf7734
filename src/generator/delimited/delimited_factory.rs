use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{GeneratorError, GeneratorResult};

use super::{
    delimited_format::{DelimitedFormat, HeaderPolicy},
    delimited_generator::DelimitedGenerator,
};

/// Config key overriding which entry field supplies header text.
pub const HEADER_KEY: &str = "headerFieldName";

/// Config key overriding which entry field supplies cell text.
pub const VALUE_KEY: &str = "valueFieldName";

pub const DEFAULT_HEADER_KEY: &str = "header";

pub const DEFAULT_VALUE_KEY: &str = "value";

/// Identifiers handed over by the enclosing stage. Only used to tag log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorContext {
    stage_name: String,
}

impl GeneratorContext {
    pub fn new(stage_name: impl Into<String>) -> Self {
        Self {
            stage_name: stage_name.into(),
        }
    }

    pub fn stage_name(&self) -> &str {
        &self.stage_name
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GeneratorConfig {
    header_field_name: String,
    value_field_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            header_field_name: DEFAULT_HEADER_KEY.to_string(),
            value_field_name: DEFAULT_VALUE_KEY.to_string(),
        }
    }
}

impl GeneratorConfig {
    fn from_map(configs: &Map<String, Value>) -> GeneratorResult<Self> {
        let config: GeneratorConfig = serde_json::from_value(Value::Object(configs.clone()))
            .map_err(|error| GeneratorError::InvalidConfig(error.to_string()))?;

        Ok(Self {
            header_field_name: Self::normalize(HEADER_KEY, &config.header_field_name)?,
            value_field_name: Self::normalize(VALUE_KEY, &config.value_field_name)?,
        })
    }

    fn normalize(option: &str, name: &str) -> GeneratorResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GeneratorError::InvalidConfig(format!(
                "'{}' must not be empty",
                option
            )));
        }
        Ok(name.to_string())
    }
}

/// Inserts the default value of every option this factory understands,
/// leaving options already present untouched.
pub fn register_configs(configs: &mut Map<String, Value>) {
    configs
        .entry(HEADER_KEY)
        .or_insert_with(|| Value::from(DEFAULT_HEADER_KEY));
    configs
        .entry(VALUE_KEY)
        .or_insert_with(|| Value::from(DEFAULT_VALUE_KEY));
}

/// Creates [`DelimitedGenerator`]s sharing one format, header policy and pair
/// of entry keys.
///
/// The factory holds no per-sink state: each call to
/// [`get_generator`](DelimitedGeneratorFactory::get_generator) binds a fresh
/// generator to the given sink.
///
/// # Examples
///
/// ```
/// use delimited_generator::core::generator::DataGenerator;
/// use delimited_generator::generator::delimited::{
///     delimited_factory::{DelimitedGeneratorFactory, GeneratorContext, HEADER_KEY, VALUE_KEY},
///     delimited_format::{CsvMode, HeaderPolicy},
/// };
/// use serde_json::{json, Map, Value};
///
/// let mut configs = Map::new();
/// configs.insert(HEADER_KEY.to_string(), Value::from("h"));
/// configs.insert(VALUE_KEY.to_string(), Value::from("d"));
///
/// let factory = DelimitedGeneratorFactory::new(
///     GeneratorContext::new("csv-target"),
///     CsvMode::Csv.format(),
///     HeaderPolicy::NoHeader,
///     &configs,
/// )
/// .unwrap();
///
/// let generator = factory.get_generator(vec![]);
/// generator.write(&json!([{"h": "A", "d": "a"}, {"h": "B", "d": "b"}])).unwrap();
///
/// let data = String::from_utf8(generator.into_inner().unwrap()).unwrap();
/// assert_eq!(data, "a,b\r\n");
/// ```
#[derive(Debug, Clone)]
pub struct DelimitedGeneratorFactory {
    context: GeneratorContext,
    format: DelimitedFormat,
    header: HeaderPolicy,
    header_key: String,
    value_key: String,
}

impl DelimitedGeneratorFactory {
    /// Binds the format and header policy and reads the entry key overrides
    /// from `configs`. Unknown options are ignored.
    ///
    /// Fails with [`GeneratorError::InvalidConfig`] when an override is not a
    /// string or is blank.
    pub fn new(
        context: GeneratorContext,
        format: DelimitedFormat,
        header: HeaderPolicy,
        configs: &Map<String, Value>,
    ) -> GeneratorResult<Self> {
        let config = GeneratorConfig::from_map(configs)?;

        debug!(
            "[{}] delimited generator factory created: header={:?}, header key='{}', value key='{}'",
            context.stage_name(),
            header,
            config.header_field_name,
            config.value_field_name
        );

        Ok(Self {
            context,
            format,
            header,
            header_key: config.header_field_name,
            value_key: config.value_field_name,
        })
    }

    pub fn context(&self) -> &GeneratorContext {
        &self.context
    }

    pub fn format(&self) -> &DelimitedFormat {
        &self.format
    }

    pub fn header(&self) -> HeaderPolicy {
        self.header
    }

    pub fn header_key(&self) -> &str {
        &self.header_key
    }

    pub fn value_key(&self) -> &str {
        &self.value_key
    }

    /// Binds a new generator to `sink`, which it owns until closed.
    pub fn get_generator<W: Write>(&self, sink: W) -> DelimitedGenerator<W> {
        DelimitedGenerator::new(
            sink,
            self.format,
            self.header,
            self.header_key.as_str(),
            self.value_key.as_str(),
        )
        .with_stage_name(self.context.stage_name())
    }

    /// Creates (or truncates) the file at `path` and binds a new generator to it.
    pub fn from_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> GeneratorResult<DelimitedGenerator<BufWriter<File>>> {
        let file = File::create(path)?;
        Ok(self.get_generator(BufWriter::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value};

    use super::{
        register_configs, DelimitedGeneratorFactory, GeneratorContext, HEADER_KEY, VALUE_KEY,
    };
    use crate::{
        core::generator::{DataGenerator, GeneratorState},
        error::GeneratorError,
        generator::delimited::delimited_format::{CsvMode, DelimitedFormat, HeaderPolicy},
    };

    fn factory(configs: &Map<String, Value>) -> Result<DelimitedGeneratorFactory, GeneratorError> {
        DelimitedGeneratorFactory::new(
            GeneratorContext::new("i"),
            DelimitedFormat::default(),
            HeaderPolicy::IgnoreHeader,
            configs,
        )
    }

    #[test]
    fn defaults_should_apply_without_overrides() {
        let mut configs = Map::new();
        register_configs(&mut configs);

        let factory = factory(&configs).unwrap();
        let generator = factory.get_generator(Vec::<u8>::new());

        assert_eq!(generator.format(), &DelimitedFormat::default());
        assert_eq!(generator.header(), HeaderPolicy::IgnoreHeader);
        assert_eq!(generator.header_key(), "header");
        assert_eq!(generator.value_key(), "value");
    }

    #[test]
    fn empty_config_map_should_use_defaults() {
        let factory = factory(&Map::new()).unwrap();

        assert_eq!(factory.header_key(), "header");
        assert_eq!(factory.value_key(), "value");
        assert_eq!(factory.context().stage_name(), "i");
    }

    #[test]
    fn overrides_should_change_the_keys() {
        let mut configs = Map::new();
        register_configs(&mut configs);
        configs.insert(HEADER_KEY.to_string(), Value::from("foo"));
        configs.insert(VALUE_KEY.to_string(), Value::from("bar"));

        let generator = factory(&configs).unwrap().get_generator(Vec::<u8>::new());

        assert_eq!(generator.header_key(), "foo");
        assert_eq!(generator.value_key(), "bar");
    }

    #[test]
    fn register_configs_should_keep_existing_values() {
        let mut configs = Map::new();
        configs.insert(HEADER_KEY.to_string(), Value::from("foo"));

        register_configs(&mut configs);

        assert_eq!(configs[HEADER_KEY], Value::from("foo"));
        assert_eq!(configs[VALUE_KEY], Value::from("value"));
    }

    #[test]
    fn unknown_options_should_be_ignored() {
        let mut configs = Map::new();
        configs.insert("charset".to_string(), Value::from("UTF-8"));
        configs.insert("maxRecordLength".to_string(), Value::from(1024));

        assert!(factory(&configs).is_ok());
    }

    #[test]
    fn overrides_should_be_trimmed() {
        let mut configs = Map::new();
        configs.insert(HEADER_KEY.to_string(), Value::from("  h "));

        assert_eq!(factory(&configs).unwrap().header_key(), "h");
    }

    #[test]
    fn blank_override_should_be_rejected() {
        let mut configs = Map::new();
        configs.insert(VALUE_KEY.to_string(), Value::from("   "));

        assert!(matches!(
            factory(&configs),
            Err(GeneratorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn non_string_override_should_be_rejected() {
        let mut configs = Map::new();
        configs.insert(HEADER_KEY.to_string(), Value::from(42));

        assert!(matches!(
            factory(&configs),
            Err(GeneratorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn each_generator_should_be_independent() {
        let factory = DelimitedGeneratorFactory::new(
            GeneratorContext::new("i"),
            CsvMode::Csv.format(),
            HeaderPolicy::WithHeader,
            &Map::new(),
        )
        .unwrap();

        let first = factory.get_generator(Vec::<u8>::new());
        let second = factory.get_generator(Vec::<u8>::new());

        first.close().unwrap();

        assert_eq!(first.state(), GeneratorState::Closed);
        assert_eq!(second.state(), GeneratorState::Open);
    }
}
