use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: Catalog file discovery and plain file I/O

// @const: Start of a TS document, optional XML declaration then doctype or root
static TS_SIGNATURE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*(<\?xml[^>]*\?>\s*)?(<!DOCTYPE\s+TS\s*>|<TS[\s>])").expect("Invalid TS signature regex")
});

/// Kinds of input files the controller accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Qt Linguist TS catalog
    Catalog,
    /// JSON catalog export
    Json,
    /// Anything else
    Unknown,
}

// @struct: Stateless file helpers
pub struct FileManager;

impl FileManager {
    // @checks: Path names a regular file
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Path names a directory
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory with its parents; empty paths are the working directory
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let dir = path.as_ref();
        if dir.as_os_str().is_empty() || dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {:?}", dir))
    }

    // @generates: `<output_dir>/<input stem>.<extension>`
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = format!("{}.{}", stem, extension.trim_start_matches('.'));
        output_dir.as_ref().join(name)
    }

    /// Files with the given extension anywhere below `dir`, sorted by name
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        Self::collect_files(WalkDir::new(dir.as_ref()).follow_links(true), extension)
    }

    /// Files with the given extension directly inside `dir`, sorted by name
    pub fn find_files_shallow<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        Self::collect_files(WalkDir::new(dir.as_ref()).max_depth(1), extension)
    }

    fn collect_files(walker: WalkDir, extension: &str) -> Result<Vec<PathBuf>> {
        let wanted = extension.trim_start_matches('.');

        walker
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() || entry.path().is_file() => {
                    has_extension(entry.path(), wanted).then(|| Ok(entry.into_path()))
                }
                Ok(_) => None,
                Err(e) => Some(Err(anyhow!(e).context("Failed to walk catalog directory"))),
            })
            .collect()
    }

    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
    }

    /// Write `content`, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
    }

    /// Classify a file by extension, then by its first bytes
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(anyhow!("File does not exist: {:?}", path));
        }

        if has_extension(path, "ts") {
            return Ok(FileType::Catalog);
        }
        if has_extension(path, "json") {
            return Ok(FileType::Json);
        }

        // Unreadable or non-UTF-8 content is simply unknown
        let Ok(content) = fs::read_to_string(path) else {
            return Ok(FileType::Unknown);
        };
        let content = content.trim_start_matches('\u{feff}');

        Ok(if TS_SIGNATURE_REGEX.is_match(content) {
            FileType::Catalog
        } else if content.trim_start().starts_with('{') {
            FileType::Json
        } else {
            FileType::Unknown
        })
    }
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
}
