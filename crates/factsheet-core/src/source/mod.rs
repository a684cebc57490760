//! Document sources: where `(identifier, text)` pairs come from.
//!
//! Fetching factsheets and converting them to text happens elsewhere; these
//! sources only read converter output that is already on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{FactsheetError, Result};

/// One document handed to the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Opaque key, e.g. the fund's ISIN.
    pub identifier: String,
    /// Document text; `None` when it could not be read.
    pub text: Option<String>,
}

/// Trait for anything that yields documents to extract.
pub trait DocumentSource {
    /// All documents, in a deterministic order.
    fn documents(&self) -> Result<Vec<Document>>;
}

/// Explicit list of text files; identifier is the file stem.
#[derive(Debug, Clone)]
pub struct TextFileSource {
    paths: Vec<PathBuf>,
}

impl TextFileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl DocumentSource for TextFileSource {
    fn documents(&self) -> Result<Vec<Document>> {
        let mut documents: Vec<Document> = self
            .paths
            .iter()
            .filter_map(|path| {
                let identifier = identifier_for(path)?;
                Some(Document {
                    identifier,
                    text: read_text(path),
                })
            })
            .collect();

        documents.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Ok(documents)
    }
}

/// Every `*.txt` file directly inside a directory.
#[derive(Debug, Clone)]
pub struct TextDirSource {
    dir: PathBuf,
}

impl TextDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentSource for TextDirSource {
    fn documents(&self) -> Result<Vec<Document>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| FactsheetError::Source {
            path: self.dir.clone(),
            reason: e.to_string(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_txt = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
            if is_txt && path.is_file() {
                paths.push(path);
            }
        }

        TextFileSource::new(paths).documents()
    }
}

fn identifier_for(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?.trim();
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Read converter output leniently; invalid UTF-8 is replaced, I/O errors become `None`.
fn read_text(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dir_source_lists_txt_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PFA000002761.txt"), "b").unwrap();
        fs::write(dir.path().join("PFA000002735.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let docs = TextDirSource::new(dir.path()).documents().unwrap();

        assert_eq!(
            docs,
            vec![
                Document {
                    identifier: "PFA000002735".to_string(),
                    text: Some("a".to_string()),
                },
                Document {
                    identifier: "PFA000002761".to_string(),
                    text: Some("b".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            TextDirSource::new(missing).documents(),
            Err(FactsheetError::Source { .. })
        ));
    }

    #[test]
    fn test_unreadable_file_yields_no_text() {
        let dir = tempfile::tempdir().unwrap();
        let docs = TextFileSource::new(vec![dir.path().join("GONE.txt")])
            .documents()
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].identifier, "GONE");
        assert_eq!(docs[0].text, None);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("X.txt");
        fs::write(&path, b"Indre v\xe6rdi 1,0").unwrap();

        let docs = TextFileSource::new(vec![path]).documents().unwrap();
        assert!(docs[0].text.as_deref().unwrap().contains("1,0"));
    }
}
