/*!
 * Tests for the TS catalog reader
 */

use anyhow::Result;
use tscat::catalog::{self, Location, TranslationKind, TranslationStatus};
use tscat::errors::CatalogError;
use crate::common;

/// Test that the catalog header attributes are read
#[test]
fn test_parse_str_withSampleCatalog_shouldReadHeader() -> Result<()> {
    let catalog = catalog::parse_str(common::SAMPLE_FR_CATALOG)?;

    assert_eq!(catalog.version, "2.1");
    assert_eq!(catalog.language.as_deref(), Some("fr"));
    assert_eq!(catalog.source_language.as_deref(), Some("en"));
    assert_eq!(catalog.dependencies, vec!["qtbase_fr".to_string()]);
    assert_eq!(catalog.contexts.len(), 2);
    assert_eq!(catalog.message_count(), 9);

    Ok(())
}

/// Test that contexts keep their name, comment and message order
#[test]
fn test_parse_str_withContexts_shouldKeepDocumentOrder() -> Result<()> {
    let catalog = catalog::parse_str(common::SAMPLE_FR_CATALOG)?;

    let main = catalog.context("GMainWindow").expect("context");
    assert_eq!(main.comment.as_deref(), Some("Main window of the application"));
    let sources: Vec<&str> = main.messages.iter().map(|m| m.source.as_str()).collect();
    assert_eq!(
        sources,
        vec!["&File", "Open", "Open", "Loading %1 of %2...", "Untranslated", "Escape"]
    );

    Ok(())
}

/// Test that relative location lines resolve against the previous line of the same file
#[test]
fn test_parse_str_withRelativeLocations_shouldResolveAbsoluteLines() -> Result<()> {
    let catalog = catalog::parse_str(common::SAMPLE_FR_CATALOG)?;
    let main = catalog.context("GMainWindow").expect("context");

    assert_eq!(
        main.messages[0].locations,
        vec![
            Location { filename: "../src/main.cpp".to_string(), line: Some(120) },
            Location { filename: "../src/main.cpp".to_string(), line: Some(123) },
        ]
    );
    assert_eq!(main.messages[1].locations[0].line, Some(133));

    let games = catalog.context("GameList").expect("context");
    assert_eq!(games.messages[0].locations[0].line, Some(42));

    Ok(())
}

/// Test that comments, ids and translator notes are captured
#[test]
fn test_parse_str_withMessageMetadata_shouldFillOptionalFields() -> Result<()> {
    let catalog = catalog::parse_str(common::SAMPLE_FR_CATALOG)?;
    let main = catalog.context("GMainWindow").expect("context");

    assert_eq!(main.messages[0].id.as_deref(), Some("menu_file"));
    assert_eq!(main.messages[1].comment.as_deref(), Some("verb"));
    assert_eq!(main.messages[1].extra_comment.as_deref(), Some("Menu entry"));
    assert_eq!(main.messages[2].comment.as_deref(), Some("adjective"));

    let games = catalog.context("GameList").expect("context");
    assert_eq!(
        games.messages[0].translator_comment.as_deref(),
        Some("Counts installed games")
    );

    Ok(())
}

/// Test that translation status and text are read for every kind of entry
#[test]
fn test_parse_str_withTranslationTypes_shouldMapStatus() -> Result<()> {
    let catalog = catalog::parse_str(common::SAMPLE_FR_CATALOG)?;
    let main = catalog.context("GMainWindow").expect("context");
    let games = catalog.context("GameList").expect("context");

    assert_eq!(main.messages[0].translation.status, TranslationStatus::Finished);
    assert_eq!(main.messages[0].effective_text(), "&Fichier");
    assert_eq!(main.messages[3].translation.status, TranslationStatus::Unfinished);
    assert!(main.messages[4].translation.is_empty());
    assert_eq!(games.messages[1].translation.status, TranslationStatus::Obsolete);
    assert_eq!(games.messages[2].translation.status, TranslationStatus::Vanished);

    Ok(())
}

/// Test that numerus forms are collected in order
#[test]
fn test_parse_str_withNumerusMessage_shouldCollectForms() -> Result<()> {
    let catalog = catalog::parse_str(common::SAMPLE_FR_CATALOG)?;
    let message = &catalog.context("GameList").expect("context").messages[0];

    assert!(message.is_numerus());
    assert_eq!(
        message.translation.kind,
        TranslationKind::Numerus(vec!["%n jeu".to_string(), "%n jeux".to_string()])
    );

    Ok(())
}

/// Test that a header written on one line with the declaration and doctype is read
#[test]
fn test_parse_str_withOneLineHeader_shouldReadRootAttributes() -> Result<()> {
    let catalog = catalog::parse_str(common::FR_ONE_LINE_CATALOG)?;

    assert_eq!(catalog.language.as_deref(), Some("fr"));
    assert_eq!(catalog.version, "2.1");
    assert_eq!(catalog.source_language, None);
    let message = &catalog.context("WaitTreeWidget").expect("context").messages[0];
    assert_eq!(message.source, "&Wait Tree");
    assert_eq!(message.translation.kind, TranslationKind::Singular("Arbre d'attente".to_string()));

    Ok(())
}

/// Test that multi-line HTML sources keep their line breaks and decode every entity
#[test]
fn test_parse_str_withMultiLineHtmlSource_shouldUnescapeEntities() -> Result<()> {
    let catalog = catalog::parse_str(common::DA_EXCERPT_CATALOG)?;

    assert_eq!(catalog.language.as_deref(), Some("da"));
    assert_eq!(catalog.source_language.as_deref(), Some("en_US"));
    let about = catalog.context("AboutDialog").expect("context");
    let html = &about.messages[0].source;
    assert!(html.starts_with("<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.0//EN\""));
    assert!(html.contains("font-family:'Ubuntu';"));
    assert!(html.contains("font-family:'MS Shell Dlg 2';"));
    assert_eq!(html.lines().count(), 5);
    assert_eq!(about.messages[0].translation.status, TranslationStatus::Unfinished);
    assert!(about.messages[1].source.contains("&quot;Nintendo Switch&quot;"));

    Ok(())
}

/// Test that unfinished numerus messages keep one empty entry per form
#[test]
fn test_parse_str_withEmptyNumerusForms_shouldKeepEmptyForms() -> Result<()> {
    let catalog = catalog::parse_str(common::DA_EXCERPT_CATALOG)?;
    let main = catalog.context("GMainWindow").expect("context");

    let remaining = &main.messages[0];
    assert!(remaining.is_numerus());
    assert_eq!(remaining.translation.status, TranslationStatus::Unfinished);
    assert_eq!(
        remaining.translation.kind,
        TranslationKind::Numerus(vec![String::new(), String::new()])
    );
    assert!(remaining.translation.is_empty());

    let installed = &main.messages[2];
    assert_eq!(installed.source, "%n file(s) were newly installed\n");
    assert_eq!(installed.locations[0], Location { filename: "../../src/yuzu/main.cpp".to_string(), line: Some(2301) });
    assert_eq!(catalog.message_count(), 6);

    Ok(())
}

/// Test that byte elements decode to control characters
#[test]
fn test_parse_str_withByteElement_shouldDecodeCharacter() -> Result<()> {
    let catalog = catalog::parse_str(common::SAMPLE_FR_CATALOG)?;
    let main = catalog.context("GMainWindow").expect("context");

    assert_eq!(main.messages[5].effective_text(), "Échap\u{1b}");

    Ok(())
}

/// Test that a leading byte order mark is accepted
#[test]
fn test_parse_str_withByteOrderMark_shouldParse() -> Result<()> {
    let input = format!("\u{feff}{}", common::simple_catalog("de", "Abbrechen"));
    let catalog = catalog::parse_str(&input)?;

    assert_eq!(catalog.language.as_deref(), Some("de"));
    assert_eq!(catalog.contexts[0].messages[0].effective_text(), "Abbrechen");

    Ok(())
}

/// Test that the first length variant is used as the translation
#[test]
fn test_parse_str_withLengthVariants_shouldKeepFirstVariant() -> Result<()> {
    let input = r#"<TS version="2.1" language="de">
<context>
    <name>Toolbar</name>
    <message>
        <source>Preferences</source>
        <translation variants="yes"><lengthvariant>Einstellungen</lengthvariant><lengthvariant>Einst.</lengthvariant></translation>
    </message>
</context>
</TS>"#;
    let catalog = catalog::parse_str(input)?;

    assert_eq!(catalog.contexts[0].messages[0].effective_text(), "Einstellungen");

    Ok(())
}

/// Test that a message without a translation element is treated as unfinished and empty
#[test]
fn test_parse_str_withoutTranslationElement_shouldBeUnfinished() -> Result<()> {
    let input = r#"<TS version="2.1">
<context>
    <name>Dialog</name>
    <message>
        <source>Apply</source>
    </message>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation type="unfinished"/>
    </message>
</context>
</TS>"#;
    let catalog = catalog::parse_str(input)?;
    let messages = &catalog.contexts[0].messages;

    assert_eq!(catalog.language, None);
    assert_eq!(messages[0].translation.status, TranslationStatus::Unfinished);
    assert!(messages[0].translation.is_empty());
    assert_eq!(messages[1].translation.kind, TranslationKind::Numerus(Vec::new()));

    Ok(())
}

/// Test that an empty TS element yields an empty catalog
#[test]
fn test_parse_str_withEmptyRoot_shouldReturnEmptyCatalog() -> Result<()> {
    let catalog = catalog::parse_str(r#"<?xml version="1.0"?><TS version="2.0" language="ja"/>"#)?;

    assert_eq!(catalog.version, "2.0");
    assert!(catalog.contexts.is_empty());

    Ok(())
}

/// Test that a document with another root element is rejected
#[test]
fn test_parse_str_withWrongRoot_shouldFail() {
    let result = catalog::parse_str("<resources><string>x</string></resources>");

    assert!(matches!(result, Err(CatalogError::UnexpectedRoot(name)) if name == "resources"));
}

/// Test that a message without a source is rejected
#[test]
fn test_parse_str_withMissingSource_shouldFail() {
    let input = r#"<TS version="2.1">
<context>
    <name>Dialog</name>
    <message>
        <translation>Annuler</translation>
    </message>
</context>
</TS>"#;

    let result = catalog::parse_str(input);
    assert!(matches!(result, Err(CatalogError::MissingElement { element: "source", .. })));
}

/// Test that a context without a name is rejected
#[test]
fn test_parse_str_withMissingContextName_shouldFail() {
    let input = r#"<TS version="2.1"><context><message><source>a</source></message></context></TS>"#;

    let result = catalog::parse_str(input);
    assert!(matches!(result, Err(CatalogError::MissingElement { element: "name", .. })));
}

/// Test that a numerus message with plain text instead of forms is rejected
#[test]
fn test_parse_str_withNumerusPlainText_shouldFail() {
    let input = r#"<TS version="2.1">
<context>
    <name>GameList</name>
    <message numerus="yes">
        <source>%n game(s)</source>
        <translation>%n jeux</translation>
    </message>
</context>
</TS>"#;

    let result = catalog::parse_str(input);
    assert!(matches!(result, Err(CatalogError::EmptyNumerus { .. })));
}

/// Test that an invalid byte value is reported
#[test]
fn test_parse_str_withInvalidByte_shouldFail() {
    let input = r#"<TS version="2.1">
<context>
    <name>Dialog</name>
    <message>
        <source>Bell</source>
        <translation><byte value="xzz"/></translation>
    </message>
</context>
</TS>"#;

    let result = catalog::parse_str(input);
    assert!(matches!(result, Err(CatalogError::InvalidByte { value, .. }) if value == "xzz"));
}

/// Test that malformed XML reports a position
#[test]
fn test_parse_str_withMismatchedTags_shouldReportLine() {
    let input = "<TS version=\"2.1\">\n<context>\n<name>Dialog</title>\n</context>\n</TS>";

    match catalog::parse_str(input) {
        Err(CatalogError::Xml { line, .. }) => assert!(line >= 3),
        other => panic!("expected XML error, got {:?}", other),
    }
}

/// Test that a truncated document is an error
#[test]
fn test_parse_str_withTruncatedDocument_shouldFail() {
    let input = r#"<TS version="2.1"><context><name>Dialog</name>"#;

    assert!(catalog::parse_str(input).is_err());
}

/// Test that parse_file reports missing files as I/O errors
#[test]
fn test_parse_file_withMissingFile_shouldReturnIoError() {
    let result = catalog::parse_file("does/not/exist.ts");

    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

/// Test that parse_file reads a catalog from disk
#[test]
fn test_parse_file_withSampleFile_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_sample_catalog(temp_dir.path(), "app_fr.ts")?;

    let catalog = catalog::parse_file(&path)?;
    assert_eq!(catalog.message_count(), 9);

    Ok(())
}
