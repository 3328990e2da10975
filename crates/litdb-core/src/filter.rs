//! DOI allow-list filtering

use std::path::Path;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

/// Allow-list of DOIs, keyed by prefix (the part before the first `/`).
///
/// Each prefix maps to the suffix-prefixes accepted for it. A DOI
/// matches iff its prefix is a key and its suffix starts with at least
/// one of the stored suffix-prefixes. Pure predicate: the caller owns
/// any counter side effects.
#[derive(Debug, Default)]
pub struct DoiAllowList {
    prefixes: FxHashMap<String, Vec<String>>,
}

/// Split a DOI at the first `/`. A DOI with no `/` is all prefix.
fn split_doi(doi: &str) -> (&str, &str) {
    doi.split_once('/').unwrap_or((doi, ""))
}

impl DoiAllowList {
    /// Load from a newline-delimited DOI file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read DOI list {}", path.display()))?;
        let list = Self::from_lines(text.lines());
        log::info!(
            "Loaded {} DOI patterns ({} prefixes) from {}",
            list.len(),
            list.prefixes.len(),
            path.display()
        );
        Ok(list)
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut prefixes: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for line in lines {
            let doi = line.trim();
            if doi.is_empty() {
                continue;
            }
            let (prefix, suffix) = split_doi(doi);
            prefixes
                .entry(prefix.to_string())
                .or_default()
                .push(suffix.to_string());
        }
        Self { prefixes }
    }

    /// Total number of suffix-prefix patterns.
    pub fn len(&self) -> usize {
        self.prefixes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Whether `doi` matches some (prefix, suffix-prefix) entry.
    pub fn contains(&self, doi: &str) -> bool {
        let (prefix, suffix) = split_doi(doi);
        self.prefixes
            .get(prefix)
            .is_some_and(|entries| entries.iter().any(|e| suffix.starts_with(e.as_str())))
    }
}
