//! End-to-end pipeline tests over real tar.gz fixtures.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use litdb_core::ProgressContext;
use litdb_pmc::{run_with, Config, JournalLookup};
use rusqlite::Connection;
use serde_json::json;
use tempfile::TempDir;

struct StubLookup;

impl JournalLookup for StubLookup {
    fn journal_for(&self, doi: &str) -> Option<String> {
        doi.starts_with("10.1234/jtm")
            .then(|| "Journal of Testing".to_string())
    }
}

fn write_archive(path: &Path, members: &[(&str, Vec<u8>)]) {
    let file = File::create(path).unwrap();
    let gz = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(gz);
    for (name, content) in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_slice())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

fn jats_member(pmid: u32, doi: &str, year: i32) -> Vec<u8> {
    format!(
        r#"<article>
<front><journal-meta><journal-title-group><journal-title>PLoS Biology</journal-title></journal-title-group></journal-meta>
<article-meta>
<article-id pub-id-type="pmid">{pmid}</article-id>
<article-id pub-id-type="doi">{doi}</article-id>
<title-group><article-title>Tree article {pmid}</article-title></title-group>
<contrib-group><contrib contrib-type="author"><name><surname>Doe</surname><given-names>Jane</given-names></name></contrib></contrib-group>
<pub-date><year>{year}</year></pub-date>
<abstract><p>Tree abstract.</p></abstract>
</article-meta></front>
<body><sec><title>Methods</title><p>Tree methods.</p></sec><sec><title>Results</title><p>Tree results.</p></sec></body>
</article>"#
    )
    .into_bytes()
}

fn bioc_member(pmid: u32, doi: Option<&str>, year: Option<i32>) -> Vec<u8> {
    let mut infons = json!({
        "article-id_pmid": pmid.to_string(),
        "section_type": "TITLE",
        "name_0": "surname:Curie;given-names:Marie"
    });
    if let Some(doi) = doi {
        infons["article-id_doi"] = json!(doi);
    }
    if let Some(year) = year {
        infons["year"] = json!(year.to_string());
    }
    json!({
        "documents": [{
            "passages": [
                { "infons": infons, "text": format!("Flat article {pmid}") },
                { "infons": { "section_type": "ABSTRACT" }, "text": "A" },
                { "infons": { "section_type": "INTRO" }, "text": "B" },
                { "infons": { "section_type": "INTRO" }, "text": "C" },
                { "infons": { "section_type": "REF" }, "text": "D" }
            ]
        }]
    })
    .to_string()
    .into_bytes()
}

struct Fixture {
    _dir: TempDir,
    db: PathBuf,
    archive: PathBuf,
    root: PathBuf,
}

fn fixture(members: &[(&str, Vec<u8>)]) -> Fixture {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("lit.db");
    let archive = dir.path().join("articles.tar.gz");
    let root = dir.path().to_path_buf();
    write_archive(&archive, members);
    Fixture {
        _dir: dir,
        db,
        archive,
        root,
    }
}

fn run(config: &Config) -> litdb_pmc::Summary {
    run_with(config, &StubLookup, &ProgressContext::hidden()).unwrap()
}

fn count_rows(db: &Path) -> i64 {
    let conn = Connection::open(db).unwrap();
    conn.query_row("SELECT COUNT(*) FROM pcw_literature", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn mixed_archive_loads_both_formats() {
    let fx = fixture(&[
        ("tree.xml", jats_member(100, "10.1/tree", 2019)),
        ("flat.json", bioc_member(200, Some("10.2/flat"), Some(2020))),
    ]);
    let summary = run(&Config::new(&fx.db, &fx.archive));

    assert_eq!(summary.members, 2);
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.conflicts, 0);
    assert_eq!(count_rows(&fx.db), 2);

    let conn = Connection::open(&fx.db).unwrap();
    let (title, journal, methods, author): (String, String, String, String) = conn
        .query_row(
            "SELECT title, journal_name, methods, first_author
             FROM pcw_literature WHERE pmid = 100",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap();
    assert_eq!(title, "Tree article 100");
    assert_eq!(journal, "PLoS Biology");
    assert!(methods.contains("Tree methods."));
    assert_eq!(author, "Jane Doe");

    let (abstract_text, content, methods): (String, String, String) = conn
        .query_row(
            "SELECT abstract, content, methods FROM pcw_literature WHERE pmid = 200",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(abstract_text, "A\n\n");
    assert_eq!(content, "INTRO\n\nB\n\nC\n\n");
    assert_eq!(methods, "");
}

#[test]
fn batch_flushes_at_threshold_plus_final_remainder() {
    let members: Vec<(String, Vec<u8>)> = (1..=5)
        .map(|i| (format!("a{i}.json"), bioc_member(i, None, Some(2020))))
        .collect();
    let members: Vec<(&str, Vec<u8>)> = members
        .iter()
        .map(|(n, c)| (n.as_str(), c.clone()))
        .collect();
    let fx = fixture(&members);

    let mut config = Config::new(&fx.db, &fx.archive);
    config.batch_size = 2;
    let summary = run(&config);

    // 2 + 2 from threshold flushes, 1 from the final flush.
    assert_eq!(summary.accepted, 5);
    assert_eq!(summary.inserted, 5);
    assert_eq!(count_rows(&fx.db), 5);
}

#[test]
fn min_year_filters_both_formats() {
    let fx = fixture(&[
        ("old_tree.xml", jats_member(1, "10.1/a", 2005)),
        ("no_year.json", bioc_member(2, None, None)),
        ("recent.json", bioc_member(3, None, Some(2015))),
    ]);

    let mut config = Config::new(&fx.db, &fx.archive);
    config.min_year = Some(2010);
    let summary = run(&config);

    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.skipped, 2);
    assert_eq!(count_rows(&fx.db), 1);

    let conn = Connection::open(&fx.db).unwrap();
    let pmid: i64 = conn
        .query_row("SELECT pmid FROM pcw_literature", [], |r| r.get(0))
        .unwrap();
    assert_eq!(pmid, 3);
}

#[test]
fn allow_list_drops_unmatched_and_sets_journal() {
    let fx = fixture(&[
        ("kept.json", bioc_member(1, Some("10.1234/jtm.2020.001"), Some(2020))),
        ("wrong_suffix.json", bioc_member(2, Some("10.1234/other.1"), Some(2020))),
        ("no_doi.json", bioc_member(3, None, Some(2020))),
    ]);

    let doi_file = fx.root.join("doi.txt");
    std::fs::write(&doi_file, "10.1234/jtm\n").unwrap();

    let mut config = Config::new(&fx.db, &fx.archive);
    config.doi_list = Some(doi_file);
    let summary = run(&config);

    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.stats.filtered_doi, 1);
    assert_eq!(count_rows(&fx.db), 1);

    let conn = Connection::open(&fx.db).unwrap();
    let journal: String = conn
        .query_row("SELECT journal_name FROM pcw_literature", [], |r| r.get(0))
        .unwrap();
    assert_eq!(journal, "Journal of Testing");
}

#[test]
fn journal_name_is_empty_without_allow_list() {
    let fx = fixture(&[("a.json", bioc_member(1, Some("10.1/x"), Some(2020)))]);
    run(&Config::new(&fx.db, &fx.archive));

    let conn = Connection::open(&fx.db).unwrap();
    let journal: String = conn
        .query_row("SELECT journal_name FROM pcw_literature", [], |r| r.get(0))
        .unwrap();
    assert_eq!(journal, "");
}

#[test]
fn rerun_against_unique_table_reports_conflicts_and_completes() {
    let fx = fixture(&[
        ("a.json", bioc_member(1, None, Some(2020))),
        ("b.json", bioc_member(2, None, Some(2020))),
    ]);

    // Curated destination with a uniqueness constraint on pmid.
    let conn = Connection::open(&fx.db).unwrap();
    conn.execute(
        "CREATE TABLE pcw_literature (
            pmid INTEGER UNIQUE, title TEXT, year INTEGER, doi TEXT,
            journal_name TEXT, first_author TEXT, abstract TEXT,
            content TEXT, methods TEXT, results TEXT)",
        [],
    )
    .unwrap();
    drop(conn);

    let config = Config::new(&fx.db, &fx.archive);
    let first = run(&config);
    assert_eq!(first.inserted, 2);
    assert_eq!(first.conflicts, 0);

    let second = run(&config);
    assert_eq!(second.inserted, 0);
    assert_eq!(second.conflicts, 2);
    assert_eq!(count_rows(&fx.db), 2);
}

#[test]
fn section_log_lists_distinct_labels() {
    let fx = fixture(&[
        ("a.json", bioc_member(1, None, Some(2020))),
        ("b.json", bioc_member(2, None, Some(2020))),
    ]);

    let log_path = fx.root.join("sections.txt");
    let mut config = Config::new(&fx.db, &fx.archive);
    config.log_file = Some(log_path.clone());
    run(&config);

    let text = std::fs::read_to_string(&log_path).unwrap();
    // INTRO appears in both members but is logged once; REF and TITLE
    // are excluded from body reconstruction and never logged.
    assert_eq!(text, "INTRO\n");
}

#[test]
fn malformed_jats_member_aborts_the_run() {
    let fx = fixture(&[("bad.xml", b"<article><unclosed>".to_vec())]);
    let config = Config::new(&fx.db, &fx.archive);
    let result = run_with(&config, &StubLookup, &ProgressContext::hidden());
    assert!(result.is_err());
}

#[test]
fn counters_cover_both_formats() {
    // A BioC member with no identifier infons at all.
    let no_ids = json!({
        "documents": [{
            "passages": [
                { "infons": { "section_type": "TITLE" }, "text": "T" }
            ]
        }]
    })
    .to_string()
    .into_bytes();
    let fx = fixture(&[
        ("tree.xml", jats_member(100, "10.1/tree", 2019)),
        ("no_ids.json", no_ids),
    ]);

    let summary = run(&Config::new(&fx.db, &fx.archive));
    assert_eq!(summary.stats.normal_pmid, 1);
    assert_eq!(summary.stats.missing_pmid, 1);
    assert_eq!(summary.stats.normal_doi, 1);
    assert_eq!(summary.stats.missing_doi, 1);
}
