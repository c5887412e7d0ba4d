/* 📖 # What does a handler get to see of the request?

A RequestContext is built once per request, before the handler runs, and is not changed
afterwards. It carries the negotiated `Accept` value, the absolute URI of the request (used to
resolve relative link hrefs) and, for PUT and POST, the body decoded as JSON.

A body that is present but not valid JSON rejects the request with a 400 before the handler is
called. An empty body decodes to nothing rather than to an error.
*/

use halkit_base::http::{HttpMethod, HttpRequest};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::api_error::ApiError;
use crate::hal::{HalContext, HalDocument};
use crate::uri::UriResolver;

pub const BODY_PARSE_ERROR: &str = "Error trying to parse body as JSON";

/// Everything about the current request a resource handler may need.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    method: HttpMethod,
    path: String,
    accept: String,
    request_uri: Option<Url>,
    parsed_body: Option<Value>,
    hal_context: HalContext,
}

impl RequestContext {
    /// Builds the context for `request`.
    ///
    /// `defaults` supplies the curie namespaces and, if it resolves against a base URI, the
    /// URI the request path is appended to, path prefix included. Without one, the `Host`
    /// header is used.
    pub fn from_request(
        request: &HttpRequest,
        defaults: &HalContext,
        default_accept: &str,
    ) -> Result<Self, ApiError> {
        let accept = request
            .headers()
            .get("Accept")
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .unwrap_or(default_accept)
            .to_string();

        let request_uri = absolute_uri(request, defaults.resolver().base());
        let resolver = match &request_uri {
            Some(uri) => UriResolver::new(uri.clone()),
            None => defaults.resolver().clone(),
        };

        let parsed_body = match request.method() {
            HttpMethod::Put | HttpMethod::Post if !request.body().is_empty() => {
                Some(decode_json_body(request)?)
            }
            _ => None,
        };

        Ok(Self {
            method: request.method().clone(),
            path: request.path().to_string(),
            accept,
            request_uri,
            parsed_body,
            hal_context: defaults.clone().with_resolver(resolver),
        })
    }

    pub fn method(&self) -> &HttpMethod {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn accept(&self) -> &str {
        &self.accept
    }

    pub fn request_uri(&self) -> Option<&Url> {
        self.request_uri.as_ref()
    }

    /// The JSON body of a PUT or POST request.
    pub fn parsed_body(&self) -> Option<&Value> {
        self.parsed_body.as_ref()
    }

    pub fn hal_context(&self) -> &HalContext {
        &self.hal_context
    }

    /// An empty document whose relative hrefs resolve against this request's URI.
    pub fn document(&self) -> HalDocument {
        HalDocument::with_context(self.hal_context.clone())
    }
}

/// Decodes the request body as JSON.
pub fn decode_json_body(request: &HttpRequest) -> Result<Value, ApiError> {
    serde_json::from_slice(request.body().as_bytes()).map_err(|e| {
        debug!(path = request.path(), error = %e, "Rejecting request body");
        ApiError::bad_request(BODY_PARSE_ERROR)
    })
}

fn absolute_uri(request: &HttpRequest, base: Option<&Url>) -> Option<Url> {
    let path = request.path().trim_start_matches('/');
    let joined = match base {
        Some(base) => Url::parse(&format!("{}/{}", base.as_str().trim_end_matches('/'), path)),
        None => {
            let host = request.headers().get("Host")?;
            Url::parse(&format!("http://{}/{}", host, path))
        }
    };
    match joined {
        Ok(uri) => Some(uri),
        Err(e) => {
            debug!(path = request.path(), error = %e, "Could not build absolute request URI");
            None
        }
    }
}
