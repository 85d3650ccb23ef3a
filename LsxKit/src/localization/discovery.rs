//! Locating localization documents on disk

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::build_handle_map;
use super::handle_map::{HandleMap, MergePolicy};
use crate::error::Result;
use crate::formats::lsx::ParseLimits;

/// Something that can enumerate localization documents.
///
/// Candidates are returned in merge order: with [`MergePolicy::LaterWins`] the
/// last document defining a handle wins.
pub trait LocalizationSource {
    /// Paths of every candidate document.
    ///
    /// # Errors
    /// Returns an error if the source itself cannot be enumerated.
    fn candidates(&self) -> Result<Vec<PathBuf>>;
}

/// All `*.xml` files below a directory, sorted by path
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    max_depth: usize,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            max_depth: usize::MAX,
        }
    }

    /// Limit how deep the walk descends below the root.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LocalizationSource for DirectorySource {
    fn candidates(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("localization directory not found: {}", self.root.display()),
            )
            .into());
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(&self.root)
            .max_depth(self.max_depth)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|p| {
                p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
            })
            .collect();
        paths.sort();
        Ok(paths)
    }
}

/// Read every candidate of `source` and merge them into one map.
///
/// Unreadable files are skipped with a warning.
///
/// # Errors
/// Returns an error only if the source cannot enumerate its candidates.
pub fn load_handle_map(
    source: &dyn LocalizationSource,
    policy: MergePolicy,
    limits: &ParseLimits,
) -> Result<HandleMap> {
    let mut documents = Vec::new();
    for path in source.candidates()? {
        match fs::read(&path) {
            Ok(data) => documents.push(data),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
            }
        }
    }

    let map = build_handle_map(&documents, policy, limits);
    tracing::info!("Loaded {} handles from {} documents", map.len(), documents.len());
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_directory_source_finds_xml_in_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.xml", "<contentList/>");
        write(temp.path(), "a/English.XML", "<contentList/>");
        write(temp.path(), "notes.txt", "ignored");

        let found = DirectorySource::new(temp.path()).candidates().unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, ["a/English.XML", "b.xml"]);
    }

    #[test]
    fn test_load_handle_map_merges_in_candidate_order() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "1_base.xml",
            r#"<contentList><content contentuid="h1" version="1">Base</content></contentList>"#,
        );
        write(
            temp.path(),
            "2_patch.xml",
            r#"<contentList><content contentuid="h1" version="2">Patched</content></contentList>"#,
        );

        let source = DirectorySource::new(temp.path());
        let limits = ParseLimits::default();
        let later = load_handle_map(&source, MergePolicy::LaterWins, &limits).unwrap();
        assert_eq!(later.text("h1"), Some("Patched"));
        let first = load_handle_map(&source, MergePolicy::FirstWins, &limits).unwrap();
        assert_eq!(first.text("h1"), Some("Base"));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let source = DirectorySource::new(temp.path().join("absent"));
        let limits = ParseLimits::default();
        assert!(load_handle_map(&source, MergePolicy::LaterWins, &limits).is_err());
    }
}
