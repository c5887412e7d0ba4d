/* 📖 # Which failures become vnd.error responses?

Handlers return `Result<Reply, Fault>`. Two kinds of fault are answered here:

- [`Fault::Api`]: an [`ApiError`], rendered with its own status and fields;
- [`Fault::DoesNotExist`]: a lookup that found nothing, answered as a plain 404.

Anything else ([`Fault::Unhandled`]) is handed back untouched, so the framework's default
error handling deals with it. Server errors (status >= 500) are additionally reported to the
registered [`ServerErrorHook`]s before the response is built.
*/

use std::fmt;
use std::sync::Arc;

use halkit_base::HalkitError;
use tracing::{debug, error};

use crate::api_error::ApiError;
use crate::encoder::{EncodedResponse, ResponseEncoder};
use crate::hal::{HalContext, HalDocument};

/// Raised by a data-access layer when a requested record does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoesNotExist {
    message: String,
}

impl DoesNotExist {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DoesNotExist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DoesNotExist {}

/// The error half of a handler result.
#[derive(Debug)]
pub enum Fault {
    Api(ApiError),
    DoesNotExist(DoesNotExist),
    Unhandled(Box<HalkitError>),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Api(error) => write!(f, "{}", error),
            Fault::DoesNotExist(missing) => write!(f, "Does not exist: {}", missing),
            Fault::Unhandled(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Fault::Api(error) => Some(error),
            Fault::DoesNotExist(missing) => Some(missing),
            Fault::Unhandled(error) => Some(error.as_ref()),
        }
    }
}

impl From<ApiError> for Fault {
    fn from(error: ApiError) -> Self {
        Fault::Api(error)
    }
}

impl From<DoesNotExist> for Fault {
    fn from(missing: DoesNotExist) -> Self {
        Fault::DoesNotExist(missing)
    }
}

impl From<Box<HalkitError>> for Fault {
    fn from(error: Box<HalkitError>) -> Self {
        Fault::Unhandled(error)
    }
}

/// Receives every server error (status >= 500) answered by an [`ErrorResponder`], e.g. to
/// forward it to an error tracker.
pub trait ServerErrorHook: Send + Sync {
    fn server_error(&self, error: &ApiError);
}

impl<F> ServerErrorHook for F
where
    F: Fn(&ApiError) + Send + Sync,
{
    fn server_error(&self, error: &ApiError) {
        self(error)
    }
}

/// Builds the vnd.error document for an API error.
///
/// `message` is always present; `logref`, `path` and the `about`, `describes` and `help` links
/// only when set on the error.
pub fn vnd_error_document(error: &ApiError, context: HalContext) -> HalDocument {
    let mut document = HalDocument::with_context(context);
    document.add_property("message", error.message());
    if let Some(logref) = error.logref() {
        document.add_property("logref", logref);
    }
    if let Some(path) = error.path() {
        document.add_property("path", path);
    }
    if let Some(about) = error.about() {
        document.add_link("about", about);
    }
    if let Some(describes) = error.describes() {
        document.add_link("describes", describes);
    }
    if let Some(help) = error.help() {
        document.add_link("help", help);
    }
    document
}

/// Turns faults into negotiated vnd.error responses.
#[derive(Clone, Default)]
pub struct ErrorResponder {
    encoder: ResponseEncoder,
    context: HalContext,
    hooks: Vec<Arc<dyn ServerErrorHook>>,
}

impl ErrorResponder {
    pub fn new(encoder: ResponseEncoder) -> Self {
        Self {
            encoder,
            ..Self::default()
        }
    }

    /// Context used by [`ErrorResponder::respond`] to resolve the error's link hrefs.
    pub fn with_context(mut self, context: HalContext) -> Self {
        self.context = context;
        self
    }

    /// Registers a hook notified about server errors.
    pub fn on_server_error(mut self, hook: impl ServerErrorHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Maps a fault onto the API error it is answered with, or hands it back when it is not
    /// this responder's to answer.
    pub fn to_api_error(fault: Fault) -> Result<ApiError, Fault> {
        match fault {
            Fault::Api(error) => Ok(error),
            Fault::DoesNotExist(missing) => {
                debug!(lookup_message = missing.message(), "Answering missing record with 404");
                Ok(ApiError::not_found())
            }
            unhandled @ Fault::Unhandled(_) => Err(unhandled),
        }
    }

    pub fn respond(&self, fault: Fault, accept: &str) -> Result<EncodedResponse, Fault> {
        self.respond_in(fault, accept, self.context.clone())
    }

    /// Like [`ErrorResponder::respond`], resolving link hrefs with a request specific context.
    pub fn respond_in(
        &self,
        fault: Fault,
        accept: &str,
        context: HalContext,
    ) -> Result<EncodedResponse, Fault> {
        let error = Self::to_api_error(fault)?;

        if error.is_server_error() {
            error!(status = error.status(), error_message = error.message(), "Server error answered");
            for hook in &self.hooks {
                hook.server_error(&error);
            }
        } else {
            debug!(status = error.status(), error_message = error.message(), "Client error answered");
        }

        let json = vnd_error_document(&error, context).to_json()?;
        Ok(self
            .encoder
            .encode_json(json, "vnd.error", error.status_code(), accept))
    }
}

impl fmt::Debug for ErrorResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorResponder")
            .field("encoder", &self.encoder)
            .field("context", &self.context)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
