/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use tscat::file_utils::{FileManager, FileType};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that dir_exists distinguishes directories
#[test]
fn test_dir_exists_withExistingDir_shouldReturnTrue() {
    assert!(FileManager::dir_exists("."));
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));
}

/// Test that generate_output_path swaps the extension
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let output_path = FileManager::generate_output_path(
        Path::new("/tmp/input/app_fr.ts"),
        Path::new("/tmp/output"),
        ".json",
    );

    assert_eq!(output_path, Path::new("/tmp/output/app_fr.json"));
}

/// Test that find_files walks subdirectories
#[test]
fn test_find_files_withNestedCatalogs_shouldFindAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested)?;
    common::create_test_file(temp_dir.path(), "fr.ts", "")?;
    common::create_test_file(&nested, "de.TS", "")?;
    common::create_test_file(temp_dir.path(), "readme.md", "")?;

    let deep = FileManager::find_files(temp_dir.path(), "ts")?;
    let shallow = FileManager::find_files_shallow(temp_dir.path(), ".ts")?;

    assert_eq!(deep.len(), 2);
    assert_eq!(shallow, vec![temp_dir.path().join("fr.ts")]);

    Ok(())
}

/// Test that write_to_file creates parents and read_to_string reads back
#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a").join("b").join("out.json");

    FileManager::write_to_file(&path, "{}")?;

    assert_eq!(FileManager::read_to_string(&path)?, "{}");

    Ok(())
}

/// Test that the file type comes from the extension first
#[test]
fn test_detect_file_type_withExtensions_shouldUseThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let ts = common::create_test_file(temp_dir.path(), "fr.ts", "anything")?;
    let json = common::create_test_file(temp_dir.path(), "fr.json", "anything")?;

    assert_eq!(FileManager::detect_file_type(&ts)?, FileType::Catalog);
    assert_eq!(FileManager::detect_file_type(&json)?, FileType::Json);

    Ok(())
}

/// Test that content sniffing recognises TS documents without the extension
#[test]
fn test_detect_file_type_withoutExtension_shouldSniffContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let ts = common::create_test_file(temp_dir.path(), "catalog.xml", common::SAMPLE_FR_CATALOG)?;
    let json = common::create_test_file(temp_dir.path(), "export.txt", "  {\"contexts\": []}")?;
    let other = common::create_test_file(temp_dir.path(), "notes.txt", "plain text")?;

    assert_eq!(FileManager::detect_file_type(&ts)?, FileType::Catalog);
    assert_eq!(FileManager::detect_file_type(&json)?, FileType::Json);
    assert_eq!(FileManager::detect_file_type(&other)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.ts")).is_err());

    Ok(())
}
