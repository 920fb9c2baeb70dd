/*!
 * Writer for the Qt Linguist TS format.
 *
 * Emits elements in the order lupdate uses, with absolute location lines.
 * Control characters that XML 1.0 cannot carry are written as
 * `<byte value="xNN"/>` elements.
 */

use std::fs;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::catalog::model::{Catalog, Context, Message, Translation, TranslationKind};
use crate::errors::CatalogError;

type XmlWriter = Writer<Vec<u8>>;

/// Serialize a catalog to TS text
pub fn to_string(catalog: &Catalog) -> Result<String, CatalogError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    emit(&mut writer, Event::DocType(BytesText::from_escaped("TS")))?;

    let mut root = BytesStart::new("TS");
    root.push_attribute(("version", catalog.version.as_str()));
    if let Some(language) = &catalog.language {
        root.push_attribute(("language", language.as_str()));
    }
    if let Some(source_language) = &catalog.source_language {
        root.push_attribute(("sourcelanguage", source_language.as_str()));
    }
    emit(&mut writer, Event::Start(root))?;

    if !catalog.dependencies.is_empty() {
        emit(&mut writer, Event::Start(BytesStart::new("dependencies")))?;
        for dependency in &catalog.dependencies {
            let mut element = BytesStart::new("dependency");
            element.push_attribute(("catalog", dependency.as_str()));
            emit(&mut writer, Event::Empty(element))?;
        }
        emit(&mut writer, Event::End(BytesEnd::new("dependencies")))?;
    }

    for context in &catalog.contexts {
        write_context(&mut writer, context)?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("TS")))?;

    let mut output = String::from_utf8(writer.into_inner())
        .map_err(|err| CatalogError::Write(err.to_string()))?;
    output.push('\n');
    Ok(output)
}

/// Serialize a catalog and write it to disk, creating parent directories
pub fn write_file<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<(), CatalogError> {
    let path = path.as_ref();
    let content = to_string(catalog)?;

    let io_error = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, content).map_err(io_error)
}

fn write_context(writer: &mut XmlWriter, context: &Context) -> Result<(), CatalogError> {
    emit(writer, Event::Start(BytesStart::new("context")))?;
    write_text_element(writer, "name", &context.name)?;
    if let Some(comment) = &context.comment {
        write_text_element(writer, "comment", comment)?;
    }
    for message in &context.messages {
        write_message(writer, message)?;
    }
    emit(writer, Event::End(BytesEnd::new("context")))
}

fn write_message(writer: &mut XmlWriter, message: &Message) -> Result<(), CatalogError> {
    let mut start = BytesStart::new("message");
    if let Some(id) = &message.id {
        start.push_attribute(("id", id.as_str()));
    }
    if message.is_numerus() {
        start.push_attribute(("numerus", "yes"));
    }
    emit(writer, Event::Start(start))?;

    for location in &message.locations {
        let mut element = BytesStart::new("location");
        element.push_attribute(("filename", location.filename.as_str()));
        if let Some(line) = location.line {
            element.push_attribute(("line", line.to_string().as_str()));
        }
        emit(writer, Event::Empty(element))?;
    }

    write_text_element(writer, "source", &message.source)?;
    let optional = [
        ("oldsource", &message.old_source),
        ("comment", &message.comment),
        ("oldcomment", &message.old_comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (tag, value) in optional {
        if let Some(value) = value {
            write_text_element(writer, tag, value)?;
        }
    }

    write_translation(writer, &message.translation)?;
    emit(writer, Event::End(BytesEnd::new("message")))
}

fn write_translation(writer: &mut XmlWriter, translation: &Translation) -> Result<(), CatalogError> {
    let mut start = BytesStart::new("translation");
    if let Some(kind) = translation.status.as_attribute() {
        start.push_attribute(("type", kind));
    }
    emit(writer, Event::Start(start))?;

    match &translation.kind {
        TranslationKind::Singular(text) => write_escaped_text(writer, text)?,
        TranslationKind::Numerus(forms) if forms.is_empty() => write_escaped_text(writer, "")?,
        TranslationKind::Numerus(forms) => {
            for form in forms {
                write_text_element(writer, "numerusform", form)?;
            }
        }
    }

    emit(writer, Event::End(BytesEnd::new("translation")))
}

fn write_text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<(), CatalogError> {
    emit(writer, Event::Start(BytesStart::new(tag)))?;
    write_escaped_text(writer, text)?;
    emit(writer, Event::End(BytesEnd::new(tag)))
}

/// Write character data, splitting out control characters as `<byte>`
/// elements. Always emits at least one text event so the closing tag stays
/// on the same line.
fn write_escaped_text(writer: &mut XmlWriter, text: &str) -> Result<(), CatalogError> {
    let mut run_start = 0;

    for (index, ch) in text.char_indices() {
        if !needs_byte_element(ch) {
            continue;
        }
        emit(writer, Event::Text(BytesText::new(&text[run_start..index])))?;

        let mut byte = BytesStart::new("byte");
        byte.push_attribute(("value", format!("x{:x}", ch as u32).as_str()));
        emit(writer, Event::Empty(byte))?;

        run_start = index + ch.len_utf8();
    }

    emit(writer, Event::Text(BytesText::new(&text[run_start..])))
}

fn needs_byte_element(ch: char) -> bool {
    (ch as u32) < 0x20 && !matches!(ch, '\n' | '\r' | '\t')
}

fn emit(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), CatalogError> {
    writer
        .write_event(event)
        .map_err(|err| CatalogError::Write(err.to_string()))
}
