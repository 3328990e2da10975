//! BioC JSON (flat passage format) extraction
//!
//! A BioC document is a flat sequence of passages, each tagged with
//! free-form infon annotations. Article metadata lives on passage 0;
//! sections are reconstructed by classifying passages in order via
//! their `section_type` infon.

use std::collections::HashMap;

use anyhow::{Context, Result};
use litdb_core::{ArticleRecord, RunContext};
use serde::Deserialize;

use crate::author;

const INFON_PMID: &str = "article-id_pmid";
const INFON_DOI: &str = "article-id_doi";
const INFON_YEAR: &str = "year";
const INFON_AUTHOR: &str = "name_0";
const INFON_SECTION: &str = "section_type";

/// Section types excluded from body reconstruction. `ABSTRACT` is
/// handled separately before this set applies.
const EXCLUDED_SECTIONS: &[&str] = &[
    "ACK_FUND",
    "COMP_INT",
    "REF",
    "ABBR",
    "REVIEW_INFO",
    "SUPPL",
    "TABLE",
    "TITLE",
    "APPENDIX",
    "AUTH_CONT",
    "CASE",
    "KEYWORD",
];

#[derive(Debug, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub documents: Vec<BiocDocument>,
}

#[derive(Debug, Deserialize)]
pub struct BiocDocument {
    #[serde(default)]
    pub passages: Vec<Passage>,
}

#[derive(Debug, Deserialize)]
pub struct Passage {
    #[serde(default)]
    pub infons: HashMap<String, String>,
    #[serde(default)]
    pub text: String,
}

/// Extract one normalized record from a BioC JSON document.
///
/// Returns `Ok(None)` when the record is skipped by the minimum-year
/// filter — a cheap early exit taken before DOI counting, author
/// parsing, and section reconstruction. Malformed JSON, an empty
/// `documents` list, and an empty passage list are fatal: there is no
/// defined default for the title, and broken members signal archive
/// corruption.
pub fn extract(
    content: &[u8],
    min_year: Option<i32>,
    ctx: &mut RunContext,
) -> Result<Option<ArticleRecord>> {
    let collection: Collection =
        serde_json::from_slice(content).context("Malformed BioC JSON")?;
    let document = collection
        .documents
        .first()
        .context("BioC collection has no documents")?;
    let passages = &document.passages;
    let first = passages
        .first()
        .context("BioC document has an empty passage list")?;

    let pmid = match first.infons.get(INFON_PMID) {
        Some(raw) => {
            ctx.stats.record_pmid(true);
            raw.trim().parse().unwrap_or(0)
        }
        None => {
            ctx.stats.record_pmid(false);
            0
        }
    };

    // Passage 0's text is the title, verbatim.
    let title = first.text.clone();

    let year = first
        .infons
        .get(INFON_YEAR)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0);
    if min_year.is_some_and(|min| year < min) {
        return Ok(None);
    }

    let doi = match first.infons.get(INFON_DOI) {
        Some(raw) => {
            ctx.stats.record_doi(true);
            raw.clone()
        }
        None => {
            ctx.stats.record_doi(false);
            String::new()
        }
    };

    let first_author = match first.infons.get(INFON_AUTHOR) {
        None => String::new(),
        Some(raw) => match author::parse_first_author(raw) {
            Ok(name) => name,
            Err(e) => {
                log::warn!("Unparseable author entry (DOI {doi:?}): {e}");
                String::new()
            }
        },
    };

    let mut abstract_text = String::new();
    let mut body = String::new();
    let mut current_section = "";
    for passage in passages {
        let Some(section_type) = passage.infons.get(INFON_SECTION).map(String::as_str) else {
            log::warn!("Passage without section_type (DOI {doi:?})");
            continue;
        };
        if section_type == "ABSTRACT" {
            abstract_text.push_str(&passage.text);
            abstract_text.push_str("\n\n");
        } else if !EXCLUDED_SECTIONS.contains(&section_type) {
            ctx.sections.record(section_type);
            // One bare heading line per contiguous run of a section type.
            if current_section != section_type {
                body.push_str(section_type);
                body.push_str("\n\n");
                current_section = section_type;
            }
            body.push_str(&passage.text);
            body.push_str("\n\n");
        }
    }

    // Methods and results are not separately tagged in BioC; they stay
    // at the record default.
    Ok(Some(ArticleRecord {
        pmid,
        title,
        year,
        doi,
        first_author,
        abstract_text,
        content: body,
        ..Default::default()
    }))
}
