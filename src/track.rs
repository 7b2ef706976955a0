use std::fmt;

use crate::chrom::Chrom;
use crate::reader::{ReaderError, ReaderResult};
use crate::svtype::SvType;

/// Delimiter between the tokens of a track name.
const NAME_DELIMITER: char = '_';
/// Separator between the label and the chromosome inside token 0.
const NAME_SEPARATOR: char = '@';
/// Minimum number of `_`-delimited tokens in a track name.
const NAME_MIN_TOKENS: usize = 3;

/// A single structural-variant interval record.
///
/// The interval is half-open; `begin <= end` is expected but not validated.
/// A `Track` is built fresh per parsed line or decoded name and is owned by
/// the caller.
///
/// # Example
///
/// ```
/// use svtrack::{Chrom, SvType, Track};
///
/// let track = Track {
///     chrom: Chrom::parse("chr1", 0)?,
///     begin: 100,
///     end: 200,
///     svtype: SvType::Del,
///     svlen: Some(100),
///     seq: None,
/// };
///
/// assert_eq!(track.span(), 100);
/// # Ok::<(), svtrack::reader::ReaderError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// The chromosome code of the interval.
    pub chrom: Chrom,
    /// The 0-based starting position of the interval.
    pub begin: u64,
    /// The ending position of the interval (exclusive).
    pub end: u64,
    /// The class of the variant. Defaults to `Misc` when the source
    /// carries no `SVTYPE` column.
    pub svtype: SvType,
    /// The length of the variant, present only when the source carries
    /// an `SVLEN` column.
    pub svlen: Option<u64>,
    /// The inserted/variant sequence, present only when the source
    /// carries a `SEQ` column.
    pub seq: Option<String>,
}

impl Track {
    /// Creates a `Track` from coordinates, leaving the SV metadata at
    /// its defaults.
    pub fn from_coords(chrom: Chrom, begin: u64, end: u64) -> Self {
        Self {
            chrom,
            begin,
            end,
            svtype: SvType::default(),
            svlen: None,
            seq: None,
        }
    }

    /// Decodes a structured track name into a `Track`.
    ///
    /// The name splits on the `_` character (exact single-character split,
    /// no whitespace collapsing) into at least three tokens:
    /// `<label>@<chromosome>`, `begin`, and `end`. Any further tokens are
    /// ignored, and `svtype`/`svlen`/`seq` stay at their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::MalformedName`] when fewer than three tokens
    /// are present or token 0 lacks the `@` separator, and
    /// [`ReaderError::InvalidField`] when the chromosome or either bound
    /// does not parse.
    ///
    /// # Example
    ///
    /// ```
    /// use svtrack::Track;
    ///
    /// let track = Track::from_name("label@chr7_100_200")?;
    /// assert_eq!(track.chrom.to_string(), "chr7");
    /// assert_eq!(track.begin, 100);
    /// assert_eq!(track.end, 200);
    /// # Ok::<(), svtrack::reader::ReaderError>(())
    /// ```
    pub fn from_name(name: &str) -> ReaderResult<Self> {
        let tokens: Vec<&str> = name.split(NAME_DELIMITER).collect();
        if tokens.len() < NAME_MIN_TOKENS {
            return Err(ReaderError::malformed_name(format!(
                "ERROR: expected at least {NAME_MIN_TOKENS} '{NAME_DELIMITER}'-delimited tokens, got {} in '{name}'",
                tokens.len()
            )));
        }

        let (_, chrom_name) = tokens[0].split_once(NAME_SEPARATOR).ok_or_else(|| {
            ReaderError::malformed_name(format!(
                "ERROR: expected '{NAME_SEPARATOR}' separator in '{}' in '{name}'",
                tokens[0]
            ))
        })?;

        let chrom = Chrom::parse(chrom_name, 0)?;
        let begin = __name_to_u64(tokens[1], name, "begin")?;
        let end = __name_to_u64(tokens[2], name, "end")?;

        Ok(Self::from_coords(chrom, begin, end))
    }

    /// Returns the width of the interval.
    ///
    /// Inverted intervals report a width of zero.
    pub fn span(&self) -> u64 {
        self.end.saturating_sub(self.begin)
    }

    /// Returns `true` if the interval has zero width.
    pub fn is_empty(&self) -> bool {
        self.span() == 0
    }

    /// Returns `true` if the interval overlaps `[begin, end)`.
    pub fn overlaps(&self, begin: u64, end: u64) -> bool {
        self.begin < end && begin < self.end
    }
}

/// Parses a track-name token to a u64
fn __name_to_u64(token: &str, name: &str, label: &'static str) -> ReaderResult<u64> {
    token.parse::<u64>().map_err(|_| {
        ReaderError::invalid_field(
            0,
            label,
            format!("ERROR: expected unsigned integer, got '{token}' in '{name}':{label}"),
        )
    })
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.chrom, self.begin, self.end, self.svtype)?;
        if let Some(svlen) = self.svlen {
            write!(f, "\t{svlen}")?;
        }
        if let Some(seq) = &self.seq {
            write!(f, "\t{seq}")?;
        }
        Ok(())
    }
}
