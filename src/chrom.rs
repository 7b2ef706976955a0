use std::fmt;

use crate::reader::{ReaderError, ReaderResult};

/// Code assigned to chromosome X.
const X_CODE: u8 = 22;
/// Code assigned to chromosome Y.
const Y_CODE: u8 = 23;
/// Smallest code in the reserved/unknown range.
const UNKNOWN_CODE: u8 = 24;

/// A compact chromosome code.
///
/// Codes 0-21 are the autosomes `chr1`..`chr22` (code = number - 1),
/// 22 is `chrX`, 23 is `chrY`, and every code >= 24 is reserved and
/// rendered as `chrUn`.
///
/// Parsing and display are exact inverses for `chr1`..`chr22`, `chrX`
/// and `chrY`; reserved codes collapse to `chrUn` on display.
///
/// # Example
///
/// ```
/// use svtrack::chrom::Chrom;
///
/// let chrom = Chrom::parse("chr7", 1)?;
/// assert_eq!(chrom.code(), 6);
/// assert_eq!(chrom.to_string(), "chr7");
/// # Ok::<(), svtrack::reader::ReaderError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chrom(u8);

impl Chrom {
    /// Chromosome X.
    pub const X: Chrom = Chrom(X_CODE);
    /// Chromosome Y.
    pub const Y: Chrom = Chrom(Y_CODE);

    /// Parses a chromosome name of the form `chr{1..22,X,Y}` into a `Chrom`.
    ///
    /// # Errors
    ///
    /// This function returns an error if the name lacks the `chr` prefix, or
    /// if the remainder is not `X`, `Y`, or an integer greater than zero.
    ///
    /// # Example
    ///
    /// ```
    /// use svtrack::chrom::Chrom;
    ///
    /// let chrom = Chrom::parse("chrX", 1)?;
    /// assert_eq!(chrom, Chrom::X);
    /// # Ok::<(), svtrack::reader::ReaderError>(())
    /// ```
    pub fn parse(raw: &str, line: usize) -> ReaderResult<Self> {
        let suffix = raw.strip_prefix("chr").ok_or_else(|| {
            ReaderError::invalid_field(
                line,
                "chrom",
                format!("ERROR: expected 'chr' prefix, got '{raw}' in {line}:chrom"),
            )
        })?;

        match suffix {
            "X" => Ok(Chrom(X_CODE)),
            "Y" => Ok(Chrom(Y_CODE)),
            other => {
                let number = other.parse::<u8>().map_err(|_| {
                    ReaderError::invalid_field(
                        line,
                        "chrom",
                        format!("ERROR: expected X, Y, or an integer, got '{other}' in {line}:chrom"),
                    )
                })?;

                let code = number.checked_sub(1).ok_or_else(|| {
                    ReaderError::invalid_field(
                        line,
                        "chrom",
                        format!("ERROR: chromosome number must be >= 1, got '{other}' in {line}:chrom"),
                    )
                })?;

                Ok(Chrom(code))
            }
        }
    }

    /// Creates a `Chrom` from a raw code.
    ///
    /// Codes >= 24 are accepted and display as `chrUn`.
    pub fn from_code(code: u8) -> Self {
        Chrom(code)
    }

    /// Returns the raw code.
    pub fn code(&self) -> u8 {
        self.0
    }

    /// Returns `true` if the code falls in the reserved/unknown range.
    pub fn is_unknown(&self) -> bool {
        self.0 >= UNKNOWN_CODE
    }
}

impl fmt::Display for Chrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            code if code < X_CODE => write!(f, "chr{}", code + 1),
            X_CODE => f.write_str("chrX"),
            Y_CODE => f.write_str("chrY"),
            _ => f.write_str("chrUn"),
        }
    }
}
