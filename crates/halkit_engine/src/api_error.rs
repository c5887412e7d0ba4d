/* 📖 # What is an ApiError?

An ApiError is a failure meant to be shown to the API client. It serializes to the vnd.error
format (https://github.com/blongden/vnd.error):

- `message`: human readable text that may be displayed to the user of the API
- `logref`: identifier of the error on the server side, e.g. a request number
- `path`: JSON Pointer (RFC6901) to the field of the `about` resource the error refers to
- `about`: link to the resource the error relates to (RFC6903)
- `describes`: link to another representation of the error on the server (RFC6892)
- `help`: link to a document describing the error

Each kind comes with a default status and message. An explicitly supplied status or message
always wins over the kind's default; every other field stays absent unless set.
*/

use std::fmt;

use halkit_base::http::HttpStatusCode;

use crate::hal::Link;

/// The built-in error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Internal,
    BadRequest,
    NotFound,
    Forbidden,
}

impl ApiErrorKind {
    pub fn default_status(&self) -> u16 {
        match self {
            Self::Internal => 500,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Forbidden => 403,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Internal => "Internal server error",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Resource not found",
            Self::Forbidden => "Access denied",
        }
    }
}

/// An error that is answered with a vnd.error document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    kind: ApiErrorKind,
    status: u16,
    message: String,
    logref: Option<String>,
    path: Option<String>,
    about: Option<Link>,
    describes: Option<Link>,
    help: Option<Link>,
}

impl ApiError {
    /// An error of the given kind with the kind's default status and message.
    pub fn new(kind: ApiErrorKind) -> Self {
        Self::with_defaults(kind, kind.default_status(), kind.default_message())
    }

    /// An error with caller-chosen defaults, for application specific error kinds.
    pub fn with_defaults(kind: ApiErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            logref: None,
            path: None,
            about: None,
            describes: None,
            help: None,
        }
    }

    /// 500 "Internal server error".
    pub fn internal() -> Self {
        Self::new(ApiErrorKind::Internal)
    }

    /// 400 with a custom message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::BadRequest).with_message(message)
    }

    /// 404 "Resource not found".
    pub fn not_found() -> Self {
        Self::new(ApiErrorKind::NotFound)
    }

    /// 403 "Access denied".
    pub fn forbidden() -> Self {
        Self::new(ApiErrorKind::Forbidden)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_logref(mut self, logref: impl Into<String>) -> Self {
        self.logref = Some(logref.into());
        self
    }

    /// Sets the RFC6901 JSON pointer into the `about` resource.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_about(mut self, about: impl Into<Link>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn with_describes(mut self, describes: impl Into<Link>) -> Self {
        self.describes = Some(describes.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<Link>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_code(&self) -> HttpStatusCode {
        HttpStatusCode::new(self.status)
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn logref(&self) -> Option<&str> {
        self.logref.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn about(&self) -> Option<&Link> {
        self.about.as_ref()
    }

    pub fn describes(&self) -> Option<&Link> {
        self.describes.as_ref()
    }

    pub fn help(&self) -> Option<&Link> {
        self.help.as_ref()
    }
}

impl Default for ApiError {
    fn default() -> Self {
        Self::internal()
    }
}

impl From<ApiErrorKind> for ApiError {
    fn from(kind: ApiErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl std::error::Error for ApiError {}
