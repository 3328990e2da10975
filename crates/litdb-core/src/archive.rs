//! Gzipped tar archive reading
//!
//! Each member of a PMC dump archive is one article document. Members
//! are fully materialized; later stages never see partial content.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tar::Archive;

/// One archive member, fully read into memory.
#[derive(Debug)]
pub struct Member {
    pub name: String,
    pub content: Vec<u8>,
}

/// Reader over a `.tar.gz` archive of per-article documents.
pub struct ArchiveReader {
    archive: Archive<GzDecoder<File>>,
}

impl ArchiveReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open archive {}", path.display()))?;
        Ok(Self {
            archive: Archive::new(GzDecoder::new(file)),
        })
    }

    /// Iterate members in container order, skipping non-file entries.
    pub fn members(&mut self) -> Result<impl Iterator<Item = Result<Member>> + '_> {
        let entries = self
            .archive
            .entries()
            .context("Failed to read tar entries")?;
        Ok(entries.filter_map(|entry| {
            let mut entry = match entry {
                Ok(e) => e,
                Err(e) => return Some(Err(anyhow::Error::new(e).context("Corrupt tar entry"))),
            };
            if !entry.header().entry_type().is_file() {
                return None;
            }
            let name = match entry.path() {
                Ok(p) => p.display().to_string(),
                Err(e) => return Some(Err(anyhow::Error::new(e).context("Corrupt entry path"))),
            };
            let mut content = Vec::with_capacity(entry.size() as usize);
            if let Err(e) = entry.read_to_end(&mut content) {
                return Some(Err(
                    anyhow::Error::new(e).context(format!("Failed to read member {name}"))
                ));
            }
            Some(Ok(Member { name, content }))
        }))
    }
}
