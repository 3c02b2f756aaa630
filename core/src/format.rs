//! Wire format strategy.
//!
//! Both formats encode the same logical schema with camelCase names. XML
//! documents use the type name as root element; collections are a root
//! element whose children are `<item>` elements.

use std::fmt;
use std::str::FromStr;

use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Serialization used for request and response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    #[default]
    Json,
    Xml,
}

/// Collection envelope for XML bodies.
#[derive(Debug, Deserialize)]
struct XmlList<T> {
    #[serde(default = "Vec::new")]
    item: Vec<T>,
}

impl WireFormat {
    /// Media type used for `Accept` and `Content-Type`.
    pub fn content_type(self) -> &'static str {
        match self {
            WireFormat::Json => "application/json",
            WireFormat::Xml => "application/xml",
        }
    }

    pub fn encode<T: Serialize>(self, value: &T) -> Result<Vec<u8>, ApiError> {
        match self {
            WireFormat::Json => {
                serde_json::to_vec(value).map_err(|e| ApiError::Serialization(e.to_string()))
            }
            WireFormat::Xml => quick_xml::se::to_string(value)
                .map(String::into_bytes)
                .map_err(|e| ApiError::Serialization(e.to_string())),
        }
    }

    pub fn decode<T: DeserializeOwned>(self, body: &[u8]) -> Result<T, ApiError> {
        match self {
            WireFormat::Json => {
                serde_json::from_slice(body).map_err(|e| ApiError::Deserialization(e.to_string()))
            }
            WireFormat::Xml => {
                let text = std::str::from_utf8(body)
                    .map_err(|e| ApiError::Deserialization(e.to_string()))?;
                let text = keep_edge_whitespace(text).map_err(ApiError::Deserialization)?;
                quick_xml::de::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))
            }
        }
    }

    /// Decode a collection: a JSON array or an XML `<item>` list.
    pub fn decode_list<T: DeserializeOwned>(self, body: &[u8]) -> Result<Vec<T>, ApiError> {
        match self {
            WireFormat::Json => self.decode(body),
            WireFormat::Xml => self.decode::<XmlList<T>>(body).map(|list| list.item),
        }
    }
}

/// Rewrite leading and trailing whitespace of leaf element text as
/// character references.
///
/// The serde deserializer trims raw text edges; references survive the trim
/// and unescape back to the original characters, so XML values stay
/// byte-identical to their JSON counterparts.
fn keep_edge_whitespace(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut events = Vec::new();
    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Eof => break,
            event => events.push(event.into_owned()),
        }
    }

    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    for (i, event) in events.iter().enumerate() {
        let after_start = i
            .checked_sub(1)
            .and_then(|p| events.get(p))
            .is_some_and(|e| matches!(e, Event::Start(_)));
        let leaf = after_start && matches!(events.get(i + 1), Some(Event::End(_)));
        let written = match event {
            Event::Text(text) if leaf => {
                let raw = std::str::from_utf8(text).map_err(|e| e.to_string())?;
                writer.write_event(Event::Text(BytesText::from_escaped(escape_edges(raw))))
            }
            other => writer.write_event(other.borrow()),
        };
        written.map_err(|e| e.to_string())?;
    }
    String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
}

fn escape_edges(raw: &str) -> String {
    let is_ws = |c: char| matches!(c, ' ' | '\t' | '\n' | '\r');
    let body = raw.trim_matches(is_ws);
    if body.len() == raw.len() {
        return raw.to_string();
    }
    let start = raw.len() - raw.trim_start_matches(is_ws).len();
    let (head, rest) = raw.split_at(start);
    let tail = &rest[body.len()..];
    let reference = |c: char| format!("&#x{:X};", c as u32);
    head.chars()
        .map(reference)
        .chain(std::iter::once(body.to_string()))
        .chain(tail.chars().map(reference))
        .collect()
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Json => f.write_str("json"),
            WireFormat::Xml => f.write_str("xml"),
        }
    }
}

impl FromStr for WireFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(WireFormat::Json),
            "xml" => Ok(WireFormat::Xml),
            other => Err(ApiError::Config(format!("unknown wire format: {other}"))),
        }
    }
}
