//! Canonical article row schema

/// One normalized article row.
///
/// Always full arity: every field is present for every record regardless
/// of input format or completeness. Missing source data maps to the
/// field's default (0 for the integers, empty string for text), so the
/// row shape stays fixed for positional inserts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleRecord {
    pub pmid: i64,
    pub title: String,
    pub year: i32,
    pub doi: String,
    pub journal_name: String,
    pub first_author: String,
    pub abstract_text: String,
    pub content: String,
    pub methods: String,
    pub results: String,
}
