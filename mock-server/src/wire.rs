//! Content negotiation, caller identity, and error responses.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use base64::Engine;
use quick_xml::{
    events::{BytesText, Event},
    Reader, Writer,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::model::ErrorBody;

pub const DOMAIN_HEADER: &str = "x-domain";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    fn from_media_type(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.to_ascii_lowercase().contains("xml") => Format::Xml,
            _ => Format::Json,
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }
}

#[derive(Serialize)]
struct XmlList<'a, T> {
    item: &'a [T],
}

/// A non-2xx response, rendered in the caller's negotiated format.
#[derive(Debug)]
pub struct Failure {
    format: Format,
    status: StatusCode,
    body: ErrorBody,
}

impl Failure {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let rendered = match self.format {
            Format::Json => serde_json::to_string(&self.body).ok(),
            Format::Xml => quick_xml::se::to_string_with_root("error", &self.body).ok(),
        };
        let mut response = (
            self.status,
            [(header::CONTENT_TYPE, self.format.content_type())],
            rendered.unwrap_or_default(),
        )
            .into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Basic realm=\"fundraising\""),
            );
        }
        response
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Auth {
    Anonymous,
    Basic { username: String, password: String },
    Malformed,
}

/// Everything a handler needs to know about the caller.
#[derive(Clone, Debug)]
pub struct Ctx {
    /// Format of response bodies (from `Accept`).
    pub reply: Format,
    /// Format of request bodies (from `Content-Type`).
    pub body: Format,
    pub content_type: Option<String>,
    pub auth: Auth,
    pub domain: Option<String>,
    host: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Ctx::from_headers(&parts.headers))
    }
}

impl Ctx {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let text = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = text(header::CONTENT_TYPE.as_str());
        Ctx {
            reply: Format::from_media_type(text(header::ACCEPT.as_str()).as_deref()),
            body: Format::from_media_type(content_type.as_deref()),
            content_type,
            auth: parse_basic(text(header::AUTHORIZATION.as_str()).as_deref()),
            domain: text(DOMAIN_HEADER).filter(|d| !d.trim().is_empty()),
            host: text(header::HOST.as_str()),
        }
    }

    pub fn fail(&self, status: StatusCode, id: &str, desc: impl Into<String>) -> Failure {
        Failure {
            format: self.reply,
            status,
            body: ErrorBody {
                id: id.to_string(),
                desc: desc.into(),
            },
        }
    }

    pub fn bad_request(&self, desc: impl Into<String>) -> Failure {
        self.fail(StatusCode::BAD_REQUEST, "BadRequest", desc)
    }

    pub fn not_found(&self, desc: impl Into<String>) -> Failure {
        self.fail(StatusCode::NOT_FOUND, "NotFound", desc)
    }

    pub fn forbidden(&self, desc: impl Into<String>) -> Failure {
        self.fail(StatusCode::FORBIDDEN, "Forbidden", desc)
    }

    /// Parse a request body in the format named by `Content-Type`.
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, Failure> {
        let parsed = match self.body {
            Format::Json => serde_json::from_slice(body).map_err(|e| e.to_string()),
            Format::Xml => std::str::from_utf8(body)
                .map_err(|e| e.to_string())
                .and_then(pin_leaf_whitespace)
                .and_then(|text| quick_xml::de::from_str(&text).map_err(|e| e.to_string())),
        };
        parsed.map_err(|e| self.bad_request(format!("malformed request body: {e}")))
    }

    pub fn respond<T: Serialize>(
        &self,
        status: StatusCode,
        root: &str,
        value: &T,
    ) -> Result<Response, Failure> {
        let rendered = match self.reply {
            Format::Json => serde_json::to_string(value).map_err(|e| e.to_string()),
            Format::Xml => {
                quick_xml::se::to_string_with_root(root, value).map_err(|e| e.to_string())
            }
        };
        self.rendered(status, rendered)
    }

    /// Collections are JSON arrays or `<root><item>…</item></root>`.
    pub fn respond_list<T: Serialize>(&self, root: &str, items: &[T]) -> Result<Response, Failure> {
        let rendered = match self.reply {
            Format::Json => serde_json::to_string(items).map_err(|e| e.to_string()),
            Format::Xml => quick_xml::se::to_string_with_root(root, &XmlList { item: items })
                .map_err(|e| e.to_string()),
        };
        self.rendered(StatusCode::OK, rendered)
    }

    fn rendered(
        &self,
        status: StatusCode,
        rendered: Result<String, String>,
    ) -> Result<Response, Failure> {
        let body = rendered.map_err(|e| {
            self.fail(StatusCode::INTERNAL_SERVER_ERROR, "InternalError", e)
        })?;
        Ok((status, [(header::CONTENT_TYPE, self.reply.content_type())], body).into_response())
    }

    /// Absolute link for `path` on the host the caller used.
    pub fn link(&self, path: &str) -> String {
        match &self.host {
            Some(host) => format!("http://{host}{path}"),
            None => path.to_string(),
        }
    }
}

/// Turn whitespace at the edges of leaf text into character references so
/// the deserializer's trimming leaves values intact.
fn pin_leaf_whitespace(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    let mut after_start = false;
    let mut held: Option<BytesText<'static>> = None;
    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        if let Some(text) = held.take() {
            let text = if matches!(event, Event::End(_)) {
                let raw = std::str::from_utf8(&text).map_err(|e| e.to_string())?;
                BytesText::from_escaped(reference_edges(raw))
            } else {
                text
            };
            writer.write_event(Event::Text(text)).map_err(|e| e.to_string())?;
        }
        match event {
            Event::Eof => break,
            Event::Text(text) if after_start => {
                held = Some(text.into_owned());
                after_start = false;
                continue;
            }
            other => {
                after_start = matches!(other, Event::Start(_));
                writer.write_event(other).map_err(|e| e.to_string())?;
            }
        }
    }
    String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
}

fn reference_edges(raw: &str) -> String {
    let ws = [' ', '\t', '\n', '\r'];
    let leading = raw.len() - raw.trim_start_matches(&ws[..]).len();
    let trailing = raw.len() - raw.trim_end_matches(&ws[..]).len();
    if leading == raw.len() {
        return raw.chars().map(|c| format!("&#{};", c as u32)).collect();
    }
    let mut out = String::with_capacity(raw.len() + 8 * (leading + trailing));
    raw[..leading].chars().for_each(|c| out.push_str(&format!("&#{};", c as u32)));
    out.push_str(&raw[leading..raw.len() - trailing]);
    raw[raw.len() - trailing..]
        .chars()
        .for_each(|c| out.push_str(&format!("&#{};", c as u32)));
    out
}

fn parse_basic(value: Option<&str>) -> Auth {
    let Some(value) = value else {
        return Auth::Anonymous;
    };
    let Some(encoded) = value.strip_prefix("Basic ") else {
        return Auth::Malformed;
    };
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());
    match decoded.as_deref().and_then(|d| d.split_once(':')) {
        Some((username, password)) => Auth::Basic {
            username: username.to_string(),
            password: password.to_string(),
        },
        None => Auth::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn accept_and_content_type_are_negotiated_separately() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/xml"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let ctx = Ctx::from_headers(&headers);
        assert_eq!(ctx.reply, Format::Xml);
        assert_eq!(ctx.body, Format::Json);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Update {
        message: String,
    }

    #[test]
    fn xml_bodies_keep_edge_whitespace() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        let ctx = Ctx::from_headers(&headers);
        let update: Update = ctx
            .decode(b"<Update>\n  <message> spaced message </message>\n</Update>")
            .unwrap();
        assert_eq!(update.message, " spaced message ");
    }

    #[test]
    fn only_leaf_text_is_rewritten() {
        let pinned = pin_leaf_whitespace("<a>\n<b> x </b>\n</a>").unwrap();
        assert_eq!(pinned, "<a>\n<b>&#32;x&#32;</b>\n</a>");
    }

    #[test]
    fn basic_auth_is_decoded() {
        assert_eq!(parse_basic(None), Auth::Anonymous);
        assert_eq!(
            parse_basic(Some("Basic dXNlcjpwYXNz")),
            Auth::Basic {
                username: "user".to_string(),
                password: "pass".to_string()
            }
        );
        assert_eq!(parse_basic(Some("Bearer abc")), Auth::Malformed);
        assert_eq!(parse_basic(Some("Basic !!!")), Auth::Malformed);
    }

    #[test]
    fn xml_lists_use_item_elements() {
        let ctx = Ctx {
            reply: Format::Xml,
            body: Format::Xml,
            content_type: None,
            auth: Auth::Anonymous,
            domain: None,
            host: None,
        };
        let items = vec![ErrorBody {
            id: "a".to_string(),
            desc: "b".to_string(),
        }];
        let response = ctx.respond_list("errors", &items).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/xml"
        );
    }
}
