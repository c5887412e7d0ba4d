/* 📖 # What does the ResponseEncoder do?

A handler produces either a plain JSON value or a HalDocument. The encoder picks the content
type (HAL documents prefer `hal+json`, plain values `json`), serializes the body, and wraps it
in the HTML preview page when negotiation settled on an HTML type. Every negotiated response
carries `Vary: Accept`.
*/

use halkit_base::HalkitResult;
use halkit_base::http::{HttpResponse, HttpStatusCode};
use serde_json::Value;
use tracing::debug;

use crate::hal::HalDocument;
use crate::json_html::create_html;
use crate::negotiation::ContentNegotiator;
use crate::utils::to_pretty_json;

/// Something a handler can return as a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Renderable {
    Value(Value),
    Hal(HalDocument),
}

impl Renderable {
    /// The negotiation key this kind of body would ideally be served as.
    pub fn preferred_key(&self) -> &'static str {
        match self {
            Renderable::Value(_) => "json",
            Renderable::Hal(_) => "hal+json",
        }
    }

    pub fn to_json(&self) -> HalkitResult<String> {
        match self {
            Renderable::Value(value) => to_pretty_json(value),
            Renderable::Hal(document) => document.to_json(),
        }
    }
}

impl From<Value> for Renderable {
    fn from(value: Value) -> Self {
        Renderable::Value(value)
    }
}

impl From<HalDocument> for Renderable {
    fn from(document: HalDocument) -> Self {
        Renderable::Hal(document)
    }
}

/// A successful handler result: a body and its status, 200 unless stated otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    body: Renderable,
    status: HttpStatusCode,
}

impl Reply {
    pub fn ok(body: impl Into<Renderable>) -> Self {
        Self::with_status(body, HttpStatusCode::OK)
    }

    pub fn created(body: impl Into<Renderable>) -> Self {
        Self::with_status(body, HttpStatusCode::CREATED)
    }

    pub fn with_status(body: impl Into<Renderable>, status: HttpStatusCode) -> Self {
        Self {
            body: body.into(),
            status,
        }
    }

    pub fn body(&self) -> &Renderable {
        &self.body
    }

    pub fn status(&self) -> HttpStatusCode {
        self.status
    }
}

impl From<Renderable> for Reply {
    fn from(body: Renderable) -> Self {
        Reply::ok(body)
    }
}

impl From<HalDocument> for Reply {
    fn from(document: HalDocument) -> Self {
        Reply::ok(document)
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Reply::ok(value)
    }
}

/// A serialized body together with its negotiated content type and status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResponse {
    pub body: String,
    pub content_type: &'static str,
    pub status: HttpStatusCode,
}

impl EncodedResponse {
    pub fn is_html(&self) -> bool {
        self.content_type.contains("html")
    }

    pub fn into_http_response(self) -> HttpResponse {
        HttpResponse::new(self.status)
            .with_content_type(self.content_type)
            .with_header("Vary", "Accept")
            .with_body(self.body)
    }
}

/// Serializes replies in the representation the client asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseEncoder {
    negotiator: ContentNegotiator,
}

impl ResponseEncoder {
    pub fn new(negotiator: ContentNegotiator) -> Self {
        Self { negotiator }
    }

    pub fn negotiator(&self) -> &ContentNegotiator {
        &self.negotiator
    }

    pub fn encode(&self, reply: &Reply, accept: &str) -> HalkitResult<EncodedResponse> {
        let json = reply.body.to_json()?;
        Ok(self.encode_json(json, reply.body.preferred_key(), reply.status, accept))
    }

    /// Negotiates a content type for already serialized JSON and wraps it for HTML clients.
    pub fn encode_json(
        &self,
        json: String,
        preferred_key: &str,
        status: HttpStatusCode,
        accept: &str,
    ) -> EncodedResponse {
        let content_type = self.negotiator.best_content_type(preferred_key, accept);
        let body = if content_type.contains("html") {
            debug!(preferred_key, "Wrapping JSON body in HTML preview");
            create_html(&json)
        } else {
            json
        };
        EncodedResponse {
            body,
            content_type,
            status,
        }
    }
}
