//! Input format detection

/// Article document formats found in PMC dump archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JATS XML article tree
    Jats,
    /// BioC JSON passage list
    Bioc,
}

/// Number of leading bytes inspected.
const SNIFF_LEN: usize = 100;

/// Classify raw member content by sniffing its first bytes.
///
/// Cheap heuristic, not a parse: a readable prefix containing an
/// `<article` opening tag is JATS; anything else, including an
/// undecodable prefix, falls through to the more defensive BioC path.
pub fn detect(content: &[u8]) -> Format {
    let head = &content[..content.len().min(SNIFF_LEN)];
    match std::str::from_utf8(head) {
        Ok(text) if text.contains("<article") => Format::Jats,
        _ => Format::Bioc,
    }
}
