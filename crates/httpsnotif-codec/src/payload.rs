use bytes::Bytes;
use serde_json::{Map, Value};
use tracing::debug;

use crate::encoding::Encoding;
use crate::error::{CodecError, Result};

/// An inbound notification body plus its declared content type.
#[derive(Debug, Clone)]
pub struct RawPayload {
    /// The body bytes as received.
    pub body: Bytes,
    /// The declared `Content-Type` header value, if any.
    pub content_type: Option<String>,
}

impl RawPayload {
    pub fn new(body: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            body: body.into(),
            content_type,
        }
    }

    /// The encoding the declared content type denotes, if recognized.
    pub fn declared_encoding(&self) -> Option<Encoding> {
        self.content_type
            .as_deref()
            .and_then(Encoding::from_content_type)
    }
}

/// An encoding-agnostic notification document.
///
/// Both wire encodings normalize to the same key/value tree so one schema
/// model validates either. The source encoding tag records which parse
/// attempt produced the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    encoding: Encoding,
    root: Value,
}

impl ParsedDocument {
    /// The encoding whose parse attempt produced this document.
    pub fn source_encoding(&self) -> Encoding {
        self.encoding
    }

    /// The document tree.
    pub fn root(&self) -> &Value {
        &self.root
    }
}

/// One failed parse attempt inside the fallback sequence.
#[derive(Debug, Clone)]
pub struct FailedAttempt {
    pub encoding: Encoding,
    pub detail: String,
}

impl std::fmt::Display for FailedAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.encoding, self.detail)
    }
}

/// Parse a body strictly as the given encoding.
pub fn parse(body: &[u8], encoding: Encoding) -> Result<ParsedDocument> {
    let root = match encoding {
        Encoding::Json => {
            serde_json::from_slice(body).map_err(|err| CodecError::ParseFailed {
                encoding,
                detail: err.to_string(),
            })?
        }
        Encoding::Xml => parse_xml(body)?,
    };
    Ok(ParsedDocument { encoding, root })
}

/// Parse with the documented fallback policy: the declared encoding first,
/// then the other recognized encoding exactly once.
///
/// The failure value lists every attempt with its own detail, in attempt
/// order, so a rejection names both formats that were tried.
pub fn parse_with_fallback(body: &[u8], declared: Encoding) -> Result<ParsedDocument> {
    let mut attempts = Vec::with_capacity(2);

    for encoding in [declared, declared.fallback()] {
        match parse(body, encoding) {
            Ok(document) => {
                if encoding != declared {
                    debug!(declared = %declared, parsed = %encoding, "payload parsed via fallback encoding");
                }
                return Ok(document);
            }
            Err(CodecError::ParseFailed { encoding, detail }) => {
                attempts.push(FailedAttempt { encoding, detail });
            }
            Err(other) => return Err(other),
        }
    }

    Err(CodecError::Unparseable { attempts })
}

fn parse_xml(body: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(body).map_err(|err| CodecError::ParseFailed {
        encoding: Encoding::Xml,
        detail: format!("body is not UTF-8: {err}"),
    })?;

    let doc = roxmltree::Document::parse(text).map_err(|err| CodecError::ParseFailed {
        encoding: Encoding::Xml,
        detail: err.to_string(),
    })?;

    let root = doc.root_element();
    let mut map = Map::new();
    map.insert(qualified_name(root), element_value(root));
    Ok(Value::Object(map))
}

fn qualified_name(node: roxmltree::Node<'_, '_>) -> String {
    let name = node.tag_name().name();
    match node
        .tag_name()
        .namespace()
        .and_then(|uri| node.lookup_prefix(uri))
    {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{name}"),
        _ => name.to_string(),
    }
}

fn element_value(node: roxmltree::Node<'_, '_>) -> Value {
    let mut children = node.children().filter(|c| c.is_element()).peekable();
    if children.peek().is_none() {
        return leaf_value(node.text());
    }

    let mut map = Map::new();
    for child in children {
        let key = qualified_name(child);
        let value = element_value(child);
        match map.get_mut(&key) {
            // Repeated sibling elements collapse into an array, preserving order.
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(key, value);
            }
        }
    }
    Value::Object(map)
}

fn leaf_value(text: Option<&str>) -> Value {
    let Some(text) = text else {
        return Value::Null;
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    // Coerce scalar leaves so one schema document describes both encodings.
    if trimmed == "true" {
        return Value::Bool(true);
    }
    if trimmed == "false" {
        return Value::Bool(false);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(f) {
            return Value::Number(number);
        }
    }
    Value::String(trimmed.to_string())
}
