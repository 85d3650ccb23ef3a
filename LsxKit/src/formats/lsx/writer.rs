//! LSX writing from the canonical tree
//!
//! `LSLib`'s output conventions are available through [`WriteOptions::lslib`].
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`, 2015 Norbyte (`LSLib`, MIT)
//!
//! SPDX-License-Identifier: MIT

use super::document::Element;
use crate::error::Result;
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Line ending style of the serialized document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

/// Output conventions for [`serialize_lsx`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Indentation character and width, or `None` for a single line.
    pub indent: Option<(u8, usize)>,
    /// Emit `<?xml version="1.0" encoding="utf-8"?>`.
    pub declaration: bool,
    pub line_ending: LineEnding,
    /// Prefix the output with a UTF-8 byte order mark.
    pub bom: bool,
    /// Collapse `<tag></tag>` pairs into `<tag/>`.
    pub minify_empty_tags: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: Some((b'\t', 1)),
            declaration: true,
            line_ending: LineEnding::Lf,
            bom: false,
            minify_empty_tags: true,
        }
    }
}

impl WriteOptions {
    /// Match the files produced by `LSLib` (BOM, CRLF, tab indentation).
    #[must_use]
    pub fn lslib() -> Self {
        WriteOptions {
            line_ending: LineEnding::CrLf,
            bom: true,
            ..Self::default()
        }
    }

    /// Single-line output without a declaration.
    #[must_use]
    pub fn compact() -> Self {
        WriteOptions {
            indent: None,
            declaration: false,
            ..Self::default()
        }
    }
}

/// Write the tree to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_lsx<P: AsRef<Path>>(tree: &Element, path: P, options: &WriteOptions) -> Result<()> {
    let bytes = serialize_lsx(tree, options)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Serialize the tree to XML bytes
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_lsx(tree: &Element, options: &WriteOptions) -> Result<Vec<u8>> {
    let mut output = Vec::new();

    match options.indent {
        Some((ch, width)) => {
            let mut writer = Writer::new_with_indent(&mut output, ch, width);
            write_document(&mut writer, tree, options)?;
        }
        None => {
            let mut writer = Writer::new(&mut output);
            write_document(&mut writer, tree, options)?;
        }
    }

    let mut xml = String::from_utf8(output)?;
    if options.minify_empty_tags {
        xml = minify_empty_tags(&xml);
    }
    xml.push('\n');
    if options.line_ending == LineEnding::CrLf {
        xml = xml.replace('\n', "\r\n");
    }

    let mut bytes = Vec::with_capacity(xml.len() + 3);
    if options.bom {
        bytes.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
    }
    bytes.extend_from_slice(xml.as_bytes());
    Ok(bytes)
}

fn write_document<W: std::io::Write>(
    writer: &mut Writer<W>,
    tree: &Element,
    options: &WriteOptions,
) -> Result<()> {
    if options.declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    }
    write_element(writer, tree)
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, el: &Element) -> Result<()> {
    let mut start = BytesStart::new(el.tag.as_str());
    for (name, value) in el.attrs() {
        start.push_attribute(Attribute {
            key: QName(name.as_bytes()),
            value: Cow::Owned(escape_attr_value(value).into_bytes()),
        });
    }

    if el.text.is_none() && !el.has_children() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start.borrow()))?;
    if let Some(text) = el.text() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in el.children() {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(el.tag.as_str())))?;
    Ok(())
}

/// Escape an attribute value, writing line breaks and tabs as character references.
fn escape_attr_value(value: &str) -> String {
    let escaped = escape(value);
    if !escaped.contains(['\n', '\r', '\t']) {
        return escaped.into_owned();
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for ch in escaped.chars() {
        match ch {
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Collapse every `<tag attrs></tag>` pair into `<tag attrs/>`.
///
/// Hand-authored LSX uses the self-closing form throughout; documents coming out of
/// other writers are brought in line with it here.
#[must_use]
pub fn minify_empty_tags(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;

    while let Some(pos) = rest.find("></") {
        let (head, tail) = rest.split_at(pos);
        let collapsed_end = tail[3..].find('>').map(|i| i + 3).filter(|&end| {
            let closing = tail[3..end].trim_end();
            let Some(open) = head.rfind('<') else {
                return false;
            };
            let opening = &head[open + 1..];
            if opening.is_empty()
                || opening.starts_with(['/', '?', '!'])
                || opening.ends_with('/')
                || opening.contains('>')
            {
                return false;
            }
            let open_name = opening.split(char::is_whitespace).next().unwrap_or_default();
            open_name == closing
        });

        match collapsed_end {
            Some(end) => {
                out.push_str(head.trim_end());
                out.push_str("/>");
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str(head);
                out.push('>');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
