//! Response content negotiation (JSON / XML / YAML).
//!
//! Responsibility:
//! - Pick a response serializer from the `Accept` header (capability-based:
//!   a format is a serializer the server can apply, not a type hierarchy).
//! - Render any `Serialize` value with the negotiated serializer and echo the
//!   media type that was matched as the `Content-Type`.
//!
//! Policy:
//! - First supported media range in `Accept` wins.
//! - Missing header, `*/*`, or a list with nothing we support → JSON.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::convert::Infallible;

/// Which serializer renders the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Json,
    Xml,
    Yaml,
}

/// The negotiated response representation: a serializer plus the media type
/// that selected it. `text/xml` and `application/xml` share a serializer but
/// are echoed back as-is, so strict `Accept` clients never see a type they
/// did not ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFormat {
    kind: FormatKind,
    content_type: &'static str,
}

impl ResponseFormat {
    pub const JSON: Self = Self {
        kind: FormatKind::Json,
        content_type: "application/json",
    };

    const fn of(kind: FormatKind, content_type: &'static str) -> Self {
        Self { kind, content_type }
    }

    pub fn from_accept(accept: Option<&str>) -> Self {
        let Some(accept) = accept else {
            return Self::JSON;
        };

        for range in accept.split(',') {
            // Strip parameters (";q=0.9" etc.); we only match the media type.
            let media = range.split(';').next().unwrap_or("").trim().to_ascii_lowercase();

            match media.as_str() {
                "application/json" | "application/*" | "*/*" => return Self::JSON,
                "application/xml" => return Self::of(FormatKind::Xml, "application/xml"),
                "text/xml" => return Self::of(FormatKind::Xml, "text/xml"),
                "application/yaml" => return Self::of(FormatKind::Yaml, "application/yaml"),
                "application/x-yaml" => return Self::of(FormatKind::Yaml, "application/x-yaml"),
                "text/yaml" => return Self::of(FormatKind::Yaml, "text/yaml"),
                _ => {}
            }
        }

        Self::JSON
    }

    pub fn kind(self) -> FormatKind {
        self.kind
    }

    pub fn content_type(self) -> &'static str {
        self.content_type
    }
}

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok());

        Ok(Self::from_accept(accept))
    }
}

/// A response body rendered with the negotiated serializer.
///
/// `root` names the XML document element; JSON and YAML ignore it.
pub struct Negotiated<T> {
    format: ResponseFormat,
    root: &'static str,
    value: T,
}

impl<T> Negotiated<T> {
    pub fn new(format: ResponseFormat, root: &'static str, value: T) -> Self {
        Self {
            format,
            root,
            value,
        }
    }
}

fn render<T: Serialize>(kind: FormatKind, root: &str, value: &T) -> Result<String, String> {
    match kind {
        FormatKind::Json => serde_json::to_string(value).map_err(|e| e.to_string()),
        FormatKind::Xml => {
            quick_xml::se::to_string_with_root(root, value).map_err(|e| e.to_string())
        }
        FormatKind::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
    }
}

impl<T: Serialize> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        match render(self.format.kind, self.root, &self.value) {
            Ok(body) => (
                [(header::CONTENT_TYPE, self.format.content_type)],
                body,
            )
                .into_response(),
            Err(err) => {
                tracing::error!(error = %err, format = ?self.format, "response serialization failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
