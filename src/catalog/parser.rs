/*!
 * Reader for the Qt Linguist TS format.
 *
 * Walks the document with a pull parser and builds a [`Catalog`]. Location
 * lines may be written relative to the previous location of the same file
 * (`line="+3"`), so the parser keeps a line cursor per file for the whole
 * document.
 */

use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::catalog::model::{
    Catalog, Context, DEFAULT_TS_VERSION, Location, Message, Translation, TranslationKind,
    TranslationStatus,
};
use crate::errors::CatalogError;

/// Parse a TS document held in memory
pub fn parse_str(input: &str) -> Result<Catalog, CatalogError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    TsParser::new(input).parse()
}

/// Read and parse a TS file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_str(&content)?;
    debug!(
        "Parsed {:?}: {} contexts, {} messages",
        path,
        catalog.contexts.len(),
        catalog.message_count()
    );
    Ok(catalog)
}

struct TsParser<'a> {
    input: &'a str,
    reader: Reader<&'a [u8]>,
    // Last absolute line seen per file, for relative `line` attributes
    line_cursors: HashMap<String, u32>,
    last_file: Option<String>,
}

impl<'a> TsParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            reader: Reader::from_str(input),
            line_cursors: HashMap::new(),
            last_file: None,
        }
    }

    fn parse(mut self) -> Result<Catalog, CatalogError> {
        loop {
            match self.next_event()? {
                Event::Start(e) => {
                    let name = tag_name(&e);
                    if name != "TS" {
                        return Err(CatalogError::UnexpectedRoot(name));
                    }
                    return self.parse_ts(&e);
                }
                Event::Empty(e) => {
                    let name = tag_name(&e);
                    if name != "TS" {
                        return Err(CatalogError::UnexpectedRoot(name));
                    }
                    return self.catalog_header(&e);
                }
                Event::Eof => {
                    return Err(CatalogError::MissingElement {
                        element: "TS",
                        line: self.current_line(),
                    });
                }
                // Declaration, doctype, comments and whitespace
                _ => {}
            }
        }
    }

    fn catalog_header(&self, e: &BytesStart) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::new(self.attribute(e, "language")?.filter(|l| !l.is_empty()));
        catalog.version = self
            .attribute(e, "version")?
            .unwrap_or_else(|| DEFAULT_TS_VERSION.to_string());
        catalog.source_language = self
            .attribute(e, "sourcelanguage")?
            .filter(|l| !l.is_empty());
        Ok(catalog)
    }

    fn parse_ts(&mut self, root: &BytesStart) -> Result<Catalog, CatalogError> {
        let mut catalog = self.catalog_header(root)?;

        loop {
            match self.next_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"context" => {
                        let context = self.parse_context()?;
                        catalog.contexts.push(context);
                    }
                    b"dependencies" => {
                        catalog.dependencies = self.parse_dependencies()?;
                    }
                    _ => self.skip(&e)?,
                },
                Event::End(e) if e.name().as_ref() == b"TS" => break,
                Event::Eof => return Err(self.unexpected_eof("TS")),
                _ => {}
            }
        }

        Ok(catalog)
    }

    fn parse_dependencies(&mut self) -> Result<Vec<String>, CatalogError> {
        let mut dependencies = Vec::new();

        loop {
            match self.next_event()? {
                Event::Empty(e) if e.name().as_ref() == b"dependency" => {
                    if let Some(name) = self.attribute(&e, "catalog")? {
                        dependencies.push(name);
                    }
                }
                Event::Start(e) if e.name().as_ref() == b"dependency" => {
                    if let Some(name) = self.attribute(&e, "catalog")? {
                        dependencies.push(name);
                    }
                    self.skip(&e)?;
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(e) if e.name().as_ref() == b"dependencies" => break,
                Event::Eof => return Err(self.unexpected_eof("dependencies")),
                _ => {}
            }
        }

        Ok(dependencies)
    }

    fn parse_context(&mut self) -> Result<Context, CatalogError> {
        let start_line = self.current_line();
        let mut name: Option<String> = None;
        let mut context = Context::new(String::new());

        loop {
            match self.next_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"name" => name = Some(self.read_text("name")?),
                    b"comment" => context.comment = Some(self.read_text("comment")?),
                    b"message" => {
                        let message = self.parse_message(&e)?;
                        context.messages.push(message);
                    }
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"name" => name = Some(String::new()),
                    b"comment" => context.comment = Some(String::new()),
                    b"message" => {
                        return Err(CatalogError::MissingElement {
                            element: "source",
                            line: self.current_line(),
                        });
                    }
                    _ => {}
                },
                Event::End(e) if e.name().as_ref() == b"context" => break,
                Event::Eof => return Err(self.unexpected_eof("context")),
                _ => {}
            }
        }

        context.name = name.ok_or(CatalogError::MissingElement {
            element: "name",
            line: start_line,
        })?;
        Ok(context)
    }

    fn parse_message(&mut self, start: &BytesStart) -> Result<Message, CatalogError> {
        let line = self.current_line();
        let numerus = self.attribute(start, "numerus")?.as_deref() == Some("yes");

        let mut source: Option<String> = None;
        let mut translation: Option<Translation> = None;
        let mut message = Message::new(String::new(), String::new());
        message.id = self.attribute(start, "id")?;

        loop {
            match self.next_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"location" => {
                        let location = self.location(&e)?;
                        message.locations.push(location);
                        self.skip(&e)?;
                    }
                    b"source" => source = Some(self.read_text("source")?),
                    b"oldsource" => message.old_source = Some(self.read_text("oldsource")?),
                    b"comment" => message.comment = Some(self.read_text("comment")?),
                    b"oldcomment" => message.old_comment = Some(self.read_text("oldcomment")?),
                    b"extracomment" => {
                        message.extra_comment = Some(self.read_text("extracomment")?)
                    }
                    b"translatorcomment" => {
                        message.translator_comment = Some(self.read_text("translatorcomment")?)
                    }
                    b"translation" => {
                        translation = Some(self.parse_translation(&e, numerus, line)?);
                    }
                    other => {
                        debug!(
                            "Skipping <{}> in message at line {}",
                            String::from_utf8_lossy(other),
                            line
                        );
                        self.skip(&e)?;
                    }
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"location" => {
                        let location = self.location(&e)?;
                        message.locations.push(location);
                    }
                    b"source" => source = Some(String::new()),
                    b"oldsource" => message.old_source = Some(String::new()),
                    b"comment" => message.comment = Some(String::new()),
                    b"oldcomment" => message.old_comment = Some(String::new()),
                    b"extracomment" => message.extra_comment = Some(String::new()),
                    b"translatorcomment" => message.translator_comment = Some(String::new()),
                    b"translation" => {
                        let status = self.translation_status(&e)?;
                        translation = Some(empty_translation(numerus, status));
                    }
                    _ => {}
                },
                Event::End(e) if e.name().as_ref() == b"message" => break,
                Event::Eof => return Err(self.unexpected_eof("message")),
                _ => {}
            }
        }

        message.source = source.ok_or(CatalogError::MissingElement {
            element: "source",
            line,
        })?;
        message.translation = translation
            .unwrap_or_else(|| empty_translation(numerus, TranslationStatus::Unfinished));
        Ok(message)
    }

    fn parse_translation(
        &mut self,
        start: &BytesStart,
        numerus: bool,
        message_line: usize,
    ) -> Result<Translation, CatalogError> {
        let status = self.translation_status(start)?;
        let mut text = String::new();
        let mut variant: Option<String> = None;
        let mut forms: Vec<String> = Vec::new();

        loop {
            match self.next_event()? {
                Event::Text(t) => {
                    let unescaped = t.unescape().map_err(|err| self.xml_error(err))?;
                    text.push_str(&unescaped);
                }
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::Start(e) => match e.name().as_ref() {
                    b"numerusform" => forms.push(self.read_text("numerusform")?),
                    b"lengthvariant" => {
                        let value = self.read_text("lengthvariant")?;
                        variant.get_or_insert(value);
                    }
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"numerusform" => forms.push(String::new()),
                    b"byte" => text.push(self.byte_char(&e)?),
                    _ => {}
                },
                Event::End(e) if e.name().as_ref() == b"translation" => break,
                Event::Eof => return Err(self.unexpected_eof("translation")),
                _ => {}
            }
        }

        let kind = if numerus {
            if forms.is_empty() && !text.trim().is_empty() {
                return Err(CatalogError::EmptyNumerus {
                    source_text: text.trim().to_string(),
                    line: message_line,
                });
            }
            TranslationKind::Numerus(forms)
        } else {
            TranslationKind::Singular(variant.unwrap_or(text))
        };

        Ok(Translation { kind, status })
    }

    /// Collect character data up to the closing `tag`, decoding `<byte>`
    /// elements and keeping the first `<lengthvariant>` when present.
    fn read_text(&mut self, tag: &str) -> Result<String, CatalogError> {
        let mut text = String::new();
        let mut variant: Option<String> = None;

        loop {
            match self.next_event()? {
                Event::Text(t) => {
                    let unescaped = t.unescape().map_err(|err| self.xml_error(err))?;
                    text.push_str(&unescaped);
                }
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::Empty(e) if e.name().as_ref() == b"byte" => {
                    text.push(self.byte_char(&e)?);
                }
                Event::Start(e) if e.name().as_ref() == b"lengthvariant" => {
                    let value = self.read_text("lengthvariant")?;
                    variant.get_or_insert(value);
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(e) if e.name().as_ref() == tag.as_bytes() => break,
                Event::Eof => return Err(self.unexpected_eof("text element")),
                _ => {}
            }
        }

        Ok(variant.unwrap_or(text))
    }

    fn location(&mut self, e: &BytesStart) -> Result<Location, CatalogError> {
        let filename = match self.attribute(e, "filename")? {
            Some(filename) => filename,
            None => self
                .last_file
                .clone()
                .ok_or(CatalogError::MissingAttribute {
                    element: "location",
                    attribute: "filename",
                    line: self.current_line(),
                })?,
        };

        let line = match self.attribute(e, "line")? {
            Some(raw) => Some(self.resolve_line(&filename, &raw)?),
            None => None,
        };

        if let Some(line) = line {
            self.line_cursors.insert(filename.clone(), line);
        }
        self.last_file = Some(filename.clone());

        Ok(Location { filename, line })
    }

    fn resolve_line(&self, filename: &str, raw: &str) -> Result<u32, CatalogError> {
        let raw = raw.trim();
        // At most one sign; a signed value is relative to the file's last line
        let (sign, digits) = match raw.strip_prefix('+') {
            Some(rest) => (Some(1), rest),
            None => match raw.strip_prefix('-') {
                Some(rest) => (Some(-1), rest),
                None => (None, raw),
            },
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.xml_error(format!("invalid line reference '{}'", raw)));
        }
        let magnitude: i64 = digits
            .parse()
            .map_err(|_| self.xml_error(format!("invalid line reference '{}'", raw)))?;

        let value = match sign {
            Some(sign) => {
                let base = self.line_cursors.get(filename).copied().unwrap_or(0);
                i64::from(base) + sign * magnitude
            }
            None => magnitude,
        };

        u32::try_from(value)
            .map_err(|_| self.xml_error(format!("line reference '{}' resolves to {}", raw, value)))
    }

    fn translation_status(&self, e: &BytesStart) -> Result<TranslationStatus, CatalogError> {
        let raw = self.attribute(e, "type")?.unwrap_or_default();
        Ok(TranslationStatus::from_attribute(&raw).unwrap_or_else(|| {
            warn!(
                "Unknown translation type '{}' at line {}, treating as finished",
                raw,
                self.current_line()
            );
            TranslationStatus::Finished
        }))
    }

    fn byte_char(&self, e: &BytesStart) -> Result<char, CatalogError> {
        let line = self.current_line();
        let value = self
            .attribute(e, "value")?
            .ok_or(CatalogError::MissingAttribute {
                element: "byte",
                attribute: "value",
                line,
            })?;

        let code = match value.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => value.parse::<u32>().ok(),
        };

        code.and_then(char::from_u32)
            .ok_or(CatalogError::InvalidByte { value, line })
    }

    fn attribute(&self, e: &BytesStart, key: &str) -> Result<Option<String>, CatalogError> {
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.xml_error(err))?;
            if attr.key.as_ref() == key.as_bytes() {
                let value = attr.unescape_value().map_err(|err| self.xml_error(err))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn skip(&mut self, e: &BytesStart) -> Result<(), CatalogError> {
        self.reader
            .read_to_end(e.name())
            .map_err(|err| self.xml_error(err))?;
        Ok(())
    }

    fn next_event(&mut self) -> Result<Event<'a>, CatalogError> {
        self.reader.read_event().map_err(|err| self.xml_error(err))
    }

    fn unexpected_eof(&self, inside: &str) -> CatalogError {
        self.xml_error(format!("unexpected end of document inside <{}>", inside))
    }

    fn xml_error(&self, err: impl Display) -> CatalogError {
        let (line, column) = line_column(self.input, self.reader.buffer_position() as usize);
        CatalogError::Xml {
            line,
            column,
            message: err.to_string(),
        }
    }

    fn current_line(&self) -> usize {
        line_column(self.input, self.reader.buffer_position() as usize).0
    }
}

fn empty_translation(numerus: bool, status: TranslationStatus) -> Translation {
    let kind = if numerus {
        TranslationKind::Numerus(Vec::new())
    } else {
        TranslationKind::Singular(String::new())
    };
    Translation { kind, status }
}

fn tag_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// 1-based line and column of a byte offset
fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let prefix = &input.as_bytes()[..offset];
    let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
    let column = match prefix.iter().rposition(|&b| b == b'\n') {
        Some(newline) => offset - newline,
        None => offset + 1,
    };
    (line, column)
}
