use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, GeneratorResult};

const LINE_CAPACITY: usize = 256;

/// When a header line precedes the value lines.
///
/// `NoHeader` and `IgnoreHeader` produce identical output; the distinction only
/// matters to whoever configured the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeaderPolicy {
    #[default]
    NoHeader,
    IgnoreHeader,
    /// One header line built from the first written record.
    WithHeader,
}

impl HeaderPolicy {
    pub fn emits_header(&self) -> bool {
        matches!(self, HeaderPolicy::WithHeader)
    }
}

/// Which cells get quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// Only cells containing the delimiter, the quote or a line break.
    Necessary,
    Always,
    NonNumeric,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    Crlf,
    Lf,
    Byte(u8),
}

/// Rendering rules for one delimited line: delimiter, quoting, escaping and
/// line terminator.
///
/// The default renders `a,b\r\n`: comma delimiter, `"` quoting only when
/// needed, quotes escaped by doubling, CRLF terminator.
///
/// # Examples
///
/// ```
/// use delimited_generator::generator::delimited::delimited_format::{
///     DelimitedFormat, LineTerminator,
/// };
///
/// let format = DelimitedFormat::default()
///     .delimiter(b';')
///     .terminator(LineTerminator::Lf);
///
/// assert_eq!(format.get_delimiter(), b';');
/// assert_ne!(format, DelimitedFormat::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedFormat {
    delimiter: u8,
    quote: u8,
    escape: u8,
    double_quote: bool,
    quoting: Quoting,
    terminator: LineTerminator,
}

impl Default for DelimitedFormat {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: b'\\',
            double_quote: true,
            quoting: Quoting::Necessary,
            terminator: LineTerminator::Crlf,
        }
    }
}

impl DelimitedFormat {
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Escape byte used in front of quotes when `double_quote` is disabled.
    pub fn escape(mut self, escape: u8) -> Self {
        self.escape = escape;
        self
    }

    pub fn double_quote(mut self, yes: bool) -> Self {
        self.double_quote = yes;
        self
    }

    pub fn quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn terminator(mut self, terminator: LineTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn get_delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn get_terminator(&self) -> LineTerminator {
        self.terminator
    }

    /// Renders `cells` as one terminated line.
    ///
    /// A line without cells is the bare terminator, so it cannot be mistaken
    /// for a line holding a single empty cell.
    ///
    /// ```
    /// use delimited_generator::generator::delimited::delimited_format::DelimitedFormat;
    ///
    /// let format = DelimitedFormat::default();
    ///
    /// assert_eq!(format.render_line(["a", "b"]).unwrap(), b"a,b\r\n");
    /// assert_eq!(format.render_line(Vec::<&str>::new()).unwrap(), b"\r\n");
    /// ```
    pub fn render_line<I>(&self, cells: I) -> GeneratorResult<Vec<u8>>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut cells = cells.into_iter().peekable();
        if cells.peek().is_none() {
            return Ok(self.terminator_bytes());
        }

        let mut line = self.encoder();
        line.write_record(cells)?;
        line.into_inner()
            .map_err(|error| GeneratorError::Sink(error.into_error()))
    }

    fn terminator_bytes(&self) -> Vec<u8> {
        match self.terminator {
            LineTerminator::Crlf => b"\r\n".to_vec(),
            LineTerminator::Lf => vec![b'\n'],
            LineTerminator::Byte(byte) => vec![byte],
        }
    }

    /// In-memory encoder for a single line. Lines may differ in width.
    fn encoder(&self) -> Writer<Vec<u8>> {
        let quote_style = match self.quoting {
            Quoting::Necessary => QuoteStyle::Necessary,
            Quoting::Always => QuoteStyle::Always,
            Quoting::NonNumeric => QuoteStyle::NonNumeric,
            Quoting::Never => QuoteStyle::Never,
        };
        let terminator = match self.terminator {
            LineTerminator::Crlf => Terminator::CRLF,
            LineTerminator::Lf => Terminator::Any(b'\n'),
            LineTerminator::Byte(byte) => Terminator::Any(byte),
        };

        WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .buffer_capacity(LINE_CAPACITY)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .escape(self.escape)
            .double_quote(self.double_quote)
            .quote_style(quote_style)
            .terminator(terminator)
            .from_writer(Vec::new())
    }
}

/// Named format presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CsvMode {
    Csv,
    Excel,
    Rfc4180,
    /// Tab separated.
    Tdf,
    /// Tab separated, LF terminated, never quoted.
    Mysql,
}

impl CsvMode {
    pub fn label(&self) -> &'static str {
        match self {
            CsvMode::Csv => "Default CSV (ignores empty lines)",
            CsvMode::Excel => "Microsoft Excel CSV",
            CsvMode::Rfc4180 => "RFC4180 CSV",
            CsvMode::Tdf => "Tab Separated Values",
            CsvMode::Mysql => "MySQL CSV",
        }
    }

    pub fn format(&self) -> DelimitedFormat {
        match self {
            CsvMode::Csv | CsvMode::Excel | CsvMode::Rfc4180 => DelimitedFormat::default(),
            CsvMode::Tdf => DelimitedFormat::default().delimiter(b'\t'),
            CsvMode::Mysql => DelimitedFormat::default()
                .delimiter(b'\t')
                .quoting(Quoting::Never)
                .terminator(LineTerminator::Lf),
        }
    }
}
