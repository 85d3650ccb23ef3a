//! SPDX-FileCopyrightText: 2025 CyberDeco, 2015 Norbyte (LSLib, MIT)
//!
//! SPDX-License-Identifier: MIT
//!
//! LSX reading into the canonical tree

use super::document::{Element, collapse_whitespace};
use crate::error::{Error, LimitKind, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Safety ceilings applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseLimits {
    /// Maximum number of elements in a document.
    pub max_nodes: usize,
    /// Maximum element nesting depth (the root is depth 1).
    pub max_depth: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        ParseLimits {
            max_nodes: 1_000_000,
            max_depth: 256,
        }
    }
}

/// An element being built, with its pending text segments.
struct Frame {
    element: Element,
    text: String,
    /// A child element closed since the last text segment.
    interrupted: bool,
}

impl Frame {
    fn new(element: Element) -> Self {
        Frame {
            element,
            text: String::new(),
            interrupted: false,
        }
    }

    fn push_text(&mut self, segment: &str) {
        if segment.trim().is_empty() {
            return;
        }
        if self.interrupted && !self.text.is_empty() {
            self.text.push(' ');
        }
        self.interrupted = false;
        self.text.push_str(segment);
    }

    fn finish(mut self) -> Element {
        if !self.text.is_empty() {
            self.element.set_text(collapse_whitespace(&self.text));
        }
        self.element
    }
}

/// Read an LSX file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or is not well-formed.
pub fn read_lsx<P: AsRef<Path>>(path: P, limits: &ParseLimits) -> Result<Element> {
    let data = fs::read(path)?;
    parse_lsx(&data, limits)
}

/// Parse LSX bytes into the canonical tree
///
/// # Errors
/// Returns [`Error::Parse`] for malformed XML and [`Error::DocumentTooLarge`]
/// when a node-count or depth ceiling is exceeded.
pub fn parse_lsx(data: &[u8], limits: &ParseLimits) -> Result<Element> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut reader = Reader::from_reader(data);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Element> = None;
    let mut node_count = 0usize;

    loop {
        let position = reader.buffer_position();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let element = start_element(&e, root.is_some(), position)?;
                enter(&mut node_count, stack.len() + 1, limits)?;
                stack.push(Frame::new(element));
            }
            Ok(Event::Empty(e)) => {
                let element = start_element(&e, root.is_some(), position)?;
                enter(&mut node_count, stack.len() + 1, limits)?;
                close(&mut stack, &mut root, element);
            }
            Ok(Event::End(_)) => {
                let Some(frame) = stack.pop() else {
                    return Err(parse_error(position, "closing tag without an open element"));
                };
                close(&mut stack, &mut root, frame.finish());
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| parse_error(position, &err.to_string()))?;
                match stack.last_mut() {
                    Some(frame) => frame.push_text(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(parse_error(position, "text outside the root element")),
                }
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                let text = String::from_utf8_lossy(&raw);
                match stack.last_mut() {
                    Some(frame) => frame.push_text(&text),
                    None => return Err(parse_error(position, "CDATA outside the root element")),
                }
            }
            Ok(Event::Eof) => break,
            // Declarations, comments, processing instructions and doctypes carry no tree data.
            Ok(_) => {}
            Err(e) => {
                return Err(parse_error(position, &e.to_string()));
            }
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(parse_error(
            reader.buffer_position(),
            &format!("unclosed element <{}>", open.element.tag),
        ));
    }

    root.ok_or_else(|| parse_error(reader.buffer_position(), "document has no root element"))
}

fn start_element(e: &BytesStart<'_>, root_closed: bool, position: usize) -> Result<Element> {
    if root_closed {
        return Err(parse_error(position, "content after the root element"));
    }
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| parse_error(position, &err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| parse_error(position, &err.to_string()))?
            .into_owned();
        element.set_attr(key, value);
    }
    Ok(element)
}

fn enter(node_count: &mut usize, depth: usize, limits: &ParseLimits) -> Result<()> {
    *node_count += 1;
    if *node_count > limits.max_nodes {
        return Err(Error::DocumentTooLarge {
            limit: LimitKind::NodeCount,
            max: limits.max_nodes,
        });
    }
    if depth > limits.max_depth {
        return Err(Error::DocumentTooLarge {
            limit: LimitKind::Depth,
            max: limits.max_depth,
        });
    }
    Ok(())
}

fn close(stack: &mut [Frame], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => {
            parent.element.push_child(element);
            parent.interrupted = true;
        }
        None => *root = Some(element),
    }
}

fn parse_error(position: usize, message: &str) -> Error {
    Error::Parse {
        position,
        message: message.to_string(),
    }
}
