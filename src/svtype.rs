use std::fmt;

/// Represents the class of a structural variant.
///
/// # Example
///
/// ```
/// use svtrack::svtype::SvType;
///
/// let svtype = SvType::parse("DEL");
/// assert_eq!(svtype, SvType::Del);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SvType {
    /// Unclassified variant. This is the default.
    #[default]
    Misc,
    /// Deletion (`DEL`).
    Del,
    /// Insertion (`INS`).
    Ins,
}

impl SvType {
    /// Parses a label into an `SvType`.
    ///
    /// The match is exact and case-sensitive; every label other than `DEL`
    /// and `INS` (including the empty string) classifies as `Misc`. This
    /// function is total and never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use svtrack::svtype::SvType;
    ///
    /// assert_eq!(SvType::parse("INS"), SvType::Ins);
    /// assert_eq!(SvType::parse("del"), SvType::Misc);
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw {
            "DEL" => SvType::Del,
            "INS" => SvType::Ins,
            _ => SvType::Misc,
        }
    }
}

impl fmt::Display for SvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvType::Misc => f.write_str("MISC"),
            SvType::Del => f.write_str("DEL"),
            SvType::Ins => f.write_str("INS"),
        }
    }
}
