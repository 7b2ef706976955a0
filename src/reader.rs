use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
#[cfg(feature = "mmap")]
use memchr::memchr;
#[cfg(feature = "mmap")]
use memmap2::MmapOptions;

use crate::{chrom::Chrom, svtype::SvType, track::Track};

const SVLEN: &str = "SVLEN";
const SVTYPE: &str = "SVTYPE";
const SEQ: &str = "SEQ";
const BEGIN: &str = "begin";
const END: &str = "end";

/// Number of leading positional fields in every data row: chromosome,
/// begin, and end.
const REQUIRED_FIELDS: usize = 3;

/// Result alias for reader operations.
pub type ReaderResult<T> = Result<T, ReaderError>;

/// An error that can occur when reading a track file or decoding a
/// track name.
#[derive(Debug)]
pub enum ReaderError {
    /// An I/O error.
    Io(io::Error),
    /// An error that occurred when memory-mapping a file.
    #[cfg(feature = "mmap")]
    Mmap(io::Error),
    /// An error that occurred when decoding a line.
    InvalidEncoding {
        /// The line number where the error occurred.
        line: usize,
        /// The error message.
        message: String,
    },
    /// The first line of the file is not a `#`-prefixed header.
    MalformedHeader {
        /// The line number where the error occurred.
        line: usize,
        /// The error message.
        message: String,
    },
    /// An error that occurred when parsing a field.
    InvalidField {
        /// The line number where the error occurred.
        line: usize,
        /// The name of the field that could not be parsed.
        field: &'static str,
        /// The error message.
        message: String,
    },
    /// A row is too short to contain a column declared by the header.
    MissingColumn {
        /// The line number where the error occurred.
        line: usize,
        /// The name of the missing column.
        column: &'static str,
    },
    /// An error that occurred when a row has fewer fields than required.
    UnexpectedFieldCount {
        /// The line number where the error occurred.
        line: usize,
        /// The expected number of fields.
        expected: usize,
        /// The actual number of fields.
        actual: usize,
    },
    /// A track name violates the `<label>@<chrom>_<begin>_<end>` shape.
    MalformedName {
        /// The error message.
        message: String,
    },
    /// An error that occurred when building a reader.
    Builder(String),
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderError::Io(err) => write!(f, "I/O error: {err}"),
            #[cfg(feature = "mmap")]
            ReaderError::Mmap(err) => write!(f, "mmap error: {err}"),
            ReaderError::InvalidEncoding { line, message } => {
                write!(f, "invalid UTF-8 at line {line}: {message}")
            }
            ReaderError::MalformedHeader { line, message } => {
                write!(f, "malformed header at line {line}: {message}")
            }
            ReaderError::InvalidField {
                line,
                field,
                message,
            } => write!(f, "invalid {field} at line {line}: {message}"),
            ReaderError::MissingColumn { line, column } => {
                write!(f, "line {line} is missing the {column} column")
            }
            ReaderError::UnexpectedFieldCount {
                line,
                expected,
                actual,
            } => write!(f, "line {line} had {actual} fields, expected {expected}"),
            ReaderError::MalformedName { message } => {
                write!(f, "malformed track name: {message}")
            }
            ReaderError::Builder(msg) => write!(f, "builder error: {msg}"),
        }
    }
}

impl std::error::Error for ReaderError {
    /// Returns the source error, if any.
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReaderError::Io(err) => Some(err),
            #[cfg(feature = "mmap")]
            ReaderError::Mmap(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ReaderError {
    /// Creates a new `ReaderError` from an `io::Error`.
    fn from(err: io::Error) -> Self {
        ReaderError::Io(err)
    }
}

impl ReaderError {
    /// Creates a new `ReaderError` for an invalid field.
    pub(crate) fn invalid_field(line: usize, field: &'static str, message: String) -> ReaderError {
        ReaderError::InvalidField {
            line,
            field,
            message,
        }
    }

    /// Creates a new `ReaderError` for a malformed header line.
    pub(crate) fn malformed_header(line: usize, message: impl Into<String>) -> ReaderError {
        ReaderError::MalformedHeader {
            line,
            message: message.into(),
        }
    }

    /// Creates a new `ReaderError` for a missing header-declared column.
    pub(crate) fn missing_column(line: usize, column: &'static str) -> ReaderError {
        ReaderError::MissingColumn { line, column }
    }

    /// Creates a new `ReaderError` for an unexpected field count.
    pub(crate) fn unexpected_field_count(
        line: usize,
        expected: usize,
        actual: usize,
    ) -> ReaderError {
        ReaderError::UnexpectedFieldCount {
            line,
            expected,
            actual,
        }
    }

    /// Creates a new `ReaderError` for a malformed track name.
    pub(crate) fn malformed_name(message: impl Into<String>) -> ReaderError {
        ReaderError::MalformedName {
            message: message.into(),
        }
    }

    /// Creates a new `ReaderError` for an invalid encoding.
    #[cfg_attr(not(feature = "mmap"), allow(dead_code))]
    fn invalid_encoding(line: usize, message: impl Into<String>) -> ReaderError {
        ReaderError::InvalidEncoding {
            line,
            message: message.into(),
        }
    }
}

/// The column-name to zero-based-index mapping parsed from the first
/// line of a track file.
///
/// The mapping is built once per file and never mutated afterwards. The
/// first three data columns (chromosome, begin, end) are positional;
/// the header mapping drives the optional `SVLEN`, `SVTYPE`, and `SEQ`
/// columns, whose order after the first three is flexible.
///
/// # Example
///
/// ```
/// use svtrack::reader::Header;
///
/// let header = Header::parse("#CHROM BEGIN END SVLEN", 1)?;
/// assert_eq!(header.index_of("SVLEN"), Some(3));
/// assert_eq!(header.index_of("SEQ"), None);
/// # Ok::<(), svtrack::reader::ReaderError>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Parses the first line of a track file into a `Header`.
    ///
    /// The line must begin with `#`; the remainder splits on whitespace
    /// runs into column names.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::MalformedHeader`] when the `#` marker is
    /// absent.
    pub fn parse(line: &str, line_number: usize) -> ReaderResult<Self> {
        let trimmed = line.trim();
        let rest = trimmed.strip_prefix('#').ok_or_else(|| {
            ReaderError::malformed_header(
                line_number,
                format!("ERROR: expected '#'-prefixed header, got '{trimmed}'"),
            )
        })?;

        Ok(Self {
            columns: rest.split_whitespace().map(str::to_string).collect(),
        })
    }

    /// Returns the zero-based index of a column, if the header names it.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Returns the column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Resolved indices of the optional columns, looked up once per file.
#[derive(Debug, Default, Clone, Copy)]
struct OptionalColumns {
    svlen: Option<usize>,
    svtype: Option<usize>,
    seq: Option<usize>,
}

impl OptionalColumns {
    fn from_header(header: &Header) -> Self {
        Self {
            svlen: header.index_of(SVLEN),
            svtype: header.index_of(SVTYPE),
            seq: header.index_of(SEQ),
        }
    }
}

/// The mode to use when reading a track file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderMode {
    /// Read the file line by line. This is the default.
    Default,
    /// Memory-map the file. This can be faster for large files, but
    /// requires the `mmap` feature.
    Mmap,
}

/// The compression format of the input file.
#[cfg(feature = "gzip")]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Automatically detect the compression format from the file
    /// extension. This is the default.
    #[default]
    Auto,
    /// No compression.
    None,
    /// Gzip compression.
    Gzip,
}

/// Detect compression from file extension
#[cfg(feature = "gzip")]
fn detect_compression_from_extension(path: &Path) -> Compression {
    let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    match ext {
        "gz" => Compression::Gzip,
        _ => Compression::None,
    }
}

/// Returns `true` if the path carries a compressed-file extension.
#[cfg_attr(feature = "gzip", allow(dead_code))]
fn has_compressed_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| matches!(ext.to_str(), Some("gz" | "zst" | "zstd" | "bz2" | "bzip2")))
}

/// A builder for creating a `Reader`.
///
/// # Example
///
/// ```rust,no_run
/// use svtrack::{Reader, ReaderMode};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut reader = Reader::builder()
///         .from_path("data/tracks.bed")
///         .mode(ReaderMode::Default)
///         .buffer_capacity(128 * 1024)
///         .build()?;
///
///     for record in reader.records() {
///         let record = record?;
///         // ...
///     }
///
///     Ok(())
/// }
/// ```
pub struct ReaderBuilder {
    source: Option<ReaderSource>,
    mode: ReaderMode,
    buffer_capacity: usize,
    #[cfg(feature = "gzip")]
    compression: Compression,
}

impl Default for ReaderBuilder {
    fn default() -> Self {
        Self {
            source: None,
            mode: ReaderMode::Default,
            buffer_capacity: 64 * 1024,
            #[cfg(feature = "gzip")]
            compression: Compression::default(),
        }
    }
}

impl ReaderBuilder {
    /// Creates a new `ReaderBuilder` from a path.
    pub fn from_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(ReaderSource::Path(path.as_ref().into()));
        self
    }

    /// Creates a new `ReaderBuilder` from a reader.
    pub fn from_reader<T>(mut self, reader: T) -> Self
    where
        T: Read + Send + 'static,
    {
        self.source = Some(ReaderSource::Reader(Box::new(reader)));
        self
    }

    /// Sets the reading mode.
    pub fn mode(mut self, mode: ReaderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the buffer capacity for the reader.
    ///
    /// The default is 64 KB.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(8 * 1024);
        self
    }

    /// Sets the compression format of the input.
    #[cfg(feature = "gzip")]
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Builds the `Reader`.
    ///
    /// The header line is consumed and validated here, so a successfully
    /// built reader always carries a complete column mapping.
    pub fn build(mut self) -> ReaderResult<Reader> {
        let source = self
            .source
            .take()
            .ok_or_else(|| ReaderError::Builder("ERROR: no input source configured".into()))?;

        match source {
            ReaderSource::Path(path) => match self.mode {
                ReaderMode::Default => {
                    let stream = self.open_path_stream(&path)?;
                    Reader::from_stream(stream, self.buffer_capacity)
                }
                ReaderMode::Mmap => {
                    #[cfg(feature = "mmap")]
                    {
                        self.build_mmap(path)
                    }
                    #[cfg(not(feature = "mmap"))]
                    {
                        Err(ReaderError::Builder(
                            "ERROR: enable the `mmap` feature to use mmap mode".into(),
                        ))
                    }
                }
            },
            ReaderSource::Reader(reader) => match self.mode {
                ReaderMode::Default => Reader::from_stream(reader, self.buffer_capacity),
                ReaderMode::Mmap => Err(ReaderError::Builder(
                    "ERROR: mmap mode requires a filesystem path".into(),
                )),
            },
        }
    }

    /// Opens a path as a stream.
    fn open_path_stream(&self, path: &Path) -> ReaderResult<Box<dyn Read + Send>> {
        #[cfg(feature = "gzip")]
        {
            let file = File::open(path)?;
            let compression = match self.compression {
                Compression::Auto => detect_compression_from_extension(path),
                other => other,
            };

            match compression {
                Compression::None | Compression::Auto => Ok(Box::new(file)),
                Compression::Gzip => Ok(Box::new(MultiGzDecoder::new(file))),
            }
        }

        #[cfg(not(feature = "gzip"))]
        {
            if has_compressed_extension(path) {
                return Err(ReaderError::Builder(
                    "ERROR: enable the `gzip` feature to read compressed inputs".into(),
                ));
            }
            Ok(Box::new(File::open(path)?))
        }
    }

    /// Builds a `Reader` from a memory-mapped file.
    #[cfg(feature = "mmap")]
    fn build_mmap(&self, path: PathBuf) -> ReaderResult<Reader> {
        if has_compressed_extension(&path) {
            return Err(ReaderError::Builder(
                "ERROR: compression is only supported in buffered mode".into(),
            ));
        }

        let map =
            unsafe { MmapOptions::new().map(&File::open(&path)?) }.map_err(ReaderError::Mmap)?;

        Reader::from_parts(InnerSource::Mmap(MmapInner {
            data: map,
            cursor: 0,
        }))
    }
}

/// Reader source
enum ReaderSource {
    Path(PathBuf),
    Reader(Box<dyn Read + Send>),
}

/// Inner reader source
enum InnerSource {
    Buffered(BufReader<Box<dyn Read + Send>>),
    #[cfg(feature = "mmap")]
    Mmap(MmapInner),
}

/// Inner mmap reader source
#[cfg(feature = "mmap")]
struct MmapInner {
    data: memmap2::Mmap,
    cursor: usize,
}

/// A reader for BED-like structural-variant track files.
///
/// The first line of the input is a `#`-prefixed header naming the
/// columns; it is consumed and validated when the reader is built.
/// Subsequent lines decode into [`Track`] records in file order.
///
/// # Example
///
/// ```rust,no_run
/// use svtrack::Reader;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut reader = Reader::from_path("data/tracks.bed")?;
///
///     for record in reader.records() {
///         let record = record?;
///         println!("{}:{}-{}", record.chrom, record.begin, record.end);
///     }
///
///     Ok(())
/// }
/// ```
pub struct Reader {
    inner: InnerSource,
    buffer: String,
    header: Header,
    optional: OptionalColumns,
    line_number: usize,
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("header", &self.header)
            .field("optional", &self.optional)
            .field("line_number", &self.line_number)
            .finish_non_exhaustive()
    }
}

impl Reader {
    /// Creates a new `ReaderBuilder` to configure a `Reader`.
    pub fn builder() -> ReaderBuilder {
        ReaderBuilder::default()
    }

    /// Creates a new `Reader` from a path.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use svtrack::Reader;
    ///
    /// fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let mut reader = Reader::from_path("data/tracks.bed")?;
    ///
    ///     for record in reader.records() {
    ///         // ...
    ///     }
    ///
    ///     Ok(())
    /// }
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> ReaderResult<Self> {
        Self::builder().from_path(path).build()
    }

    /// Creates a new `Reader` from a reader.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use svtrack::Reader;
    ///
    /// fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let mut reader = Reader::from_reader(std::io::stdin())?;
    ///
    ///     for record in reader.records() {
    ///         // ...
    ///     }
    ///
    ///     Ok(())
    /// }
    /// ```
    pub fn from_reader<T>(reader: T) -> ReaderResult<Self>
    where
        T: Read + Send + 'static,
    {
        Self::builder().from_reader(reader).build()
    }

    /// Creates a new `Reader` from a memory-mapped file.
    #[cfg(feature = "mmap")]
    pub fn from_mmap<P: AsRef<Path>>(path: P) -> ReaderResult<Self> {
        Self::builder()
            .from_path(path)
            .mode(ReaderMode::Mmap)
            .build()
    }

    /// Creates a new `Reader` from a stream.
    pub(crate) fn from_stream(
        reader: Box<dyn Read + Send>,
        buffer_capacity: usize,
    ) -> ReaderResult<Self> {
        Self::from_parts(InnerSource::Buffered(BufReader::with_capacity(
            buffer_capacity,
            reader,
        )))
    }

    /// Creates a new `Reader` from an inner source, consuming the header.
    fn from_parts(inner: InnerSource) -> ReaderResult<Self> {
        let mut reader = Self {
            inner,
            buffer: String::with_capacity(1024),
            header: Header::default(),
            optional: OptionalColumns::default(),
            line_number: 0,
        };

        if !reader.fill_buffer()? {
            return Err(ReaderError::malformed_header(
                1,
                "ERROR: empty input, expected a '#'-prefixed header line",
            ));
        }

        reader.line_number = 1;
        reader.header = Header::parse(&reader.buffer, reader.line_number)?;
        reader.optional = OptionalColumns::from_header(&reader.header);

        Ok(reader)
    }

    /// Returns the header parsed from the first line of the input.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the current line number of the reader.
    pub fn current_line(&self) -> usize {
        self.line_number
    }

    /// Returns an iterator over the records in the reader.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use svtrack::Reader;
    ///
    /// fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let mut reader = Reader::from_path("data/tracks.bed")?;
    ///     for record in reader.records() {
    ///         let record = record?;
    ///         // ...
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn records(&mut self) -> Records<'_> {
        Records { reader: self }
    }

    /// Returns the next record in the reader.
    fn next_record(&mut self) -> Option<ReaderResult<Track>> {
        loop {
            match self.fill_buffer() {
                Ok(true) => {
                    self.line_number += 1;
                    if self.buffer.trim().is_empty() {
                        continue;
                    }
                    return Some(parse_row(&self.buffer, &self.optional, self.line_number));
                }
                Ok(false) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }

    /// Fills the buffer with the next line of the reader.
    fn fill_buffer(&mut self) -> ReaderResult<bool> {
        match &mut self.inner {
            InnerSource::Buffered(reader) => {
                self.buffer.clear();
                let bytes = reader.read_line(&mut self.buffer)?;
                if bytes == 0 {
                    return Ok(false);
                }
                trim_line(&mut self.buffer);
                Ok(true)
            }
            #[cfg(feature = "mmap")]
            InnerSource::Mmap(inner) => {
                if inner.cursor >= inner.data.len() {
                    return Ok(false);
                }

                let data = &inner.data[inner.cursor..];
                let rel_end = memchr(b'\n', data);
                let advance = rel_end.map(|pos| pos + 1).unwrap_or(data.len());
                let mut end = rel_end.unwrap_or(data.len());

                if end > 0 && data[end - 1] == b'\r' {
                    end -= 1;
                }

                let line = std::str::from_utf8(&data[..end]).map_err(|err| {
                    ReaderError::invalid_encoding(self.line_number + 1, err.to_string())
                })?;

                self.buffer.clear();
                self.buffer.push_str(line);
                inner.cursor += advance;

                Ok(true)
            }
        }
    }
}

impl Iterator for Reader {
    type Item = ReaderResult<Track>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

/// An iterator over the records in a `Reader`.
///
/// This struct is created by the `records` method on `Reader`.
pub struct Records<'a> {
    reader: &'a mut Reader,
}

impl<'a> Iterator for Records<'a> {
    type Item = ReaderResult<Track>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_record()
    }
}

/// Loads every record of a track file into memory, preserving file order.
///
/// This is all-or-nothing: the first malformed line aborts the load and
/// no partial output is produced.
///
/// # Errors
///
/// Returns [`ReaderError::Io`] when the path cannot be opened,
/// [`ReaderError::MalformedHeader`] when the first line lacks the `#`
/// marker, and a field-level error for the first row that fails to
/// decode.
///
/// # Example
///
/// ```rust,no_run
/// use svtrack::load_tracks;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let tracks = load_tracks("data/tracks.bed")?;
///     println!("{} tracks", tracks.len());
///     Ok(())
/// }
/// ```
pub fn load_tracks<P: AsRef<Path>>(path: P) -> ReaderResult<Vec<Track>> {
    let mut reader = Reader::from_path(path)?;
    reader.records().collect()
}

/// Decodes a single data row into a `Track`.
///
/// Rows split on whitespace runs, matching the header tokenizer. The
/// first three fields are positional (chromosome, begin, end); the
/// optional fields are addressed through the header mapping and their
/// absence from the header is not an error.
fn parse_row(line: &str, optional: &OptionalColumns, line_number: usize) -> ReaderResult<Track> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < REQUIRED_FIELDS {
        return Err(ReaderError::unexpected_field_count(
            line_number,
            REQUIRED_FIELDS,
            fields.len(),
        ));
    }

    let chrom = Chrom::parse(fields[0], line_number)?;
    let begin = __to_u64(fields[1], line_number, BEGIN)?;
    let end = __to_u64(fields[2], line_number, END)?;

    let svlen = match optional.svlen {
        Some(idx) => Some(__to_u64(
            field_at(&fields, idx, line_number, SVLEN)?,
            line_number,
            SVLEN,
        )?),
        None => None,
    };

    let seq = match optional.seq {
        Some(idx) => Some(field_at(&fields, idx, line_number, SEQ)?.to_string()),
        None => None,
    };

    let svtype = match optional.svtype {
        Some(idx) => SvType::parse(field_at(&fields, idx, line_number, SVTYPE)?),
        None => SvType::default(),
    };

    Ok(Track {
        chrom,
        begin,
        end,
        svtype,
        svlen,
        seq,
    })
}

/// Returns the field at a header-mapped index, failing loudly when the
/// row is too short to contain it.
fn field_at<'a>(
    fields: &[&'a str],
    index: usize,
    line: usize,
    column: &'static str,
) -> ReaderResult<&'a str> {
    fields
        .get(index)
        .copied()
        .ok_or_else(|| ReaderError::missing_column(line, column))
}

/// Parses a row field to a u64
fn __to_u64(field: &str, line: usize, label: &'static str) -> ReaderResult<u64> {
    field.parse::<u64>().map_err(|_| {
        ReaderError::invalid_field(
            line,
            label,
            format!("ERROR: expected unsigned integer, got '{field}' in {line}:{label}"),
        )
    })
}

/// Trims trailing line terminators from a buffered line.
fn trim_line(line: &mut String) {
    while line.ends_with(['\n', '\r']) {
        line.pop();
    }
}
