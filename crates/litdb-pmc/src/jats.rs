//! JATS XML (tree format) extraction
//!
//! Per-field lookup over a parsed document tree. Every field is
//! independently resilient: a missing title must not prevent DOI
//! extraction. Only an unparseable tree is fatal — that signals archive
//! corruption, not incomplete metadata.

use anyhow::{Context, Result};
use litdb_core::ArticleRecord;
use roxmltree::{Document, Node};

/// Extract one normalized record from a JATS article document.
pub fn extract(xml: &str) -> Result<ArticleRecord> {
    let doc = Document::parse(xml).context("Unparseable JATS XML")?;

    let pmid = article_id(&doc, "pmid")
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or(0);
    let doi = article_id(&doc, "doi").unwrap_or_default();

    let title = find_element(&doc, "article-title")
        .map(subtree_text)
        .unwrap_or_default();

    let year = find_element(&doc, "pub-date")
        .and_then(|node| node.children().find(|c| c.has_tag_name("year")))
        .and_then(|node| node.text())
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or(0);

    let journal_name = find_element(&doc, "journal-title")
        .map(subtree_text)
        .unwrap_or_default();

    let abstract_text = find_element(&doc, "abstract")
        .map(subtree_text)
        .unwrap_or_default();
    let content = find_element(&doc, "body")
        .map(subtree_text)
        .unwrap_or_default();
    let methods = named_section(&doc, "Methods").unwrap_or_default();
    let results = named_section(&doc, "Results").unwrap_or_default();

    Ok(ArticleRecord {
        pmid,
        title,
        year,
        doi,
        journal_name,
        first_author: first_author(&doc),
        abstract_text,
        content,
        methods,
        results,
    })
}

/// First `<article-id pub-id-type="...">` text of the given kind.
fn article_id(doc: &Document<'_>, kind: &str) -> Option<String> {
    doc.descendants()
        .find(|n| n.has_tag_name("article-id") && n.attribute("pub-id-type") == Some(kind))
        .and_then(|n| n.text())
        .map(|text| text.trim().to_string())
}

fn find_element<'a, 'input>(doc: &'a Document<'input>, tag: &str) -> Option<Node<'a, 'input>> {
    doc.descendants().find(|n| n.has_tag_name(tag))
}

/// Full visible text of a subtree, nested children included.
fn subtree_text(node: Node<'_, '_>) -> String {
    let mut out = String::new();
    for text in node.descendants().filter(Node::is_text).filter_map(|n| n.text()) {
        out.push_str(text);
    }
    out.trim().to_string()
}

/// Subtree text of the first `<sec>` whose `<title>` is exactly `title`.
fn named_section(doc: &Document<'_>, title: &str) -> Option<String> {
    doc.descendants()
        .filter(|n| n.has_tag_name("sec"))
        .find(|sec| {
            sec.children()
                .find(|c| c.has_tag_name("title"))
                .is_some_and(|t| subtree_text(t) == title)
        })
        .map(subtree_text)
}

/// First author-typed contributor: given-names and surname, space
/// separated, empty parts allowed. Empty string when no author exists.
fn first_author(doc: &Document<'_>) -> String {
    let name = doc
        .descendants()
        .find(|n| {
            n.has_tag_name("contrib")
                && n.attribute("contrib-type") == Some("author")
                && n.parent().is_some_and(|p| p.has_tag_name("contrib-group"))
        })
        .and_then(|contrib| contrib.children().find(|c| c.has_tag_name("name")));
    let Some(name) = name else {
        return String::new();
    };
    let part = |tag: &str| {
        name.children()
            .find(|c| c.has_tag_name(tag))
            .and_then(|n| n.text())
            .unwrap_or("")
            .trim()
            .to_string()
    };
    format!("{} {}", part("given-names"), part("surname"))
}
