//! First-author mini-format parsing
//!
//! BioC stores contributor names in a `name_0` infon whose value is a
//! `;`-separated list of `:`-delimited entries, e.g.
//! `surname:Doe;given-names:Jane`. The first entry's second component
//! holds the formatted name. Source data quality for this field is
//! inconsistent, so callers treat a parse failure as a warning plus an
//! empty name, never as a record failure.

/// Failure to parse a present `name_0` value.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthorFormatError {
    /// The first `;`-entry carried no `:` separator.
    MissingSeparator { raw: String },
}

impl std::fmt::Display for AuthorFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSeparator { raw } => {
                write!(f, "no ':' separator in author entry {raw:?}")
            }
        }
    }
}

impl std::error::Error for AuthorFormatError {}

/// Extract the formatted first-author name from a `name_0` value.
pub fn parse_first_author(raw: &str) -> Result<String, AuthorFormatError> {
    let entry = raw.split(';').next().unwrap_or_default();
    match entry.splitn(3, ':').nth(1) {
        Some(name) => Ok(name.to_string()),
        None => Err(AuthorFormatError::MissingSeparator {
            raw: raw.to_string(),
        }),
    }
}
