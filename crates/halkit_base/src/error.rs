use std::error::Error as StdError;
use std::fmt;

use tracing_error::{SpanTrace, SpanTraceStatus};

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Better control over error handling
- No dependencies to compile and integrate
- More transparency into error handling logic

Note that this type covers infrastructure failures (serialization, configuration, malformed
input to the builders). Errors that are meant to reach an API client as a vnd.error document
are modelled separately by `halkit_engine::ApiError`.
 */

/// Error variants that can occur in halkit operations.
#[derive(Debug)]
pub enum ErrorKind {
    /// Catch-all for errors described by a message
    Message { message: String },

    /// An error raised by a third-party library
    Wrapped {
        source: Box<dyn StdError + Send + Sync + 'static>,
    },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Message { message } => write!(f, "{}", message),
            ErrorKind::Wrapped { source } => write!(f, "{}", source),
        }
    }
}

/// Error type wrapping an [`ErrorKind`] with context, an optional cause and the span trace
/// active when the error was created.
pub struct HalkitError {
    kind: ErrorKind,
    context: Vec<String>,
    cause: Option<Box<HalkitError>>,
    span_trace: SpanTrace,
}

impl HalkitError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            cause: None,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a message error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Wraps an error from another library.
    pub fn wrap(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::new(ErrorKind::Wrapped {
            source: Box::new(source),
        })
    }

    /// Attaches context to an error.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Records the error that led to this one.
    pub fn caused_by(mut self, cause: HalkitError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the context entries in the order they were attached.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// Returns the error recorded with [`HalkitError::caused_by`], if any.
    pub fn cause(&self) -> Option<&HalkitError> {
        self.cause.as_deref()
    }

    /// Returns the span trace captured at construction.
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// Returns the innermost error in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        let entries = self.context.len() + usize::from(self.cause.is_some());
        for (i, ctx) in self.context.iter().enumerate() {
            let branch = if i + 1 == entries { "└─" } else { "├─" };
            write!(f, "\n{}{} {}", indent, branch, ctx)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, "\n{}└─ cause: {}", indent, cause.kind)?;
            cause.fmt_tree(f, &format!("{}   ", indent))?;
        }
        Ok(())
    }
}

impl From<ErrorKind> for HalkitError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for HalkitError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::Wrapped { source } => Some(source.as_ref()),
            ErrorKind::Message { .. } => self.cause.as_deref().map(|c| c as &dyn StdError),
        }
    }
}

impl fmt::Display for HalkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Outermost context first.
        for ctx in self.context.iter().rev() {
            write!(f, "{}: ", ctx)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Debug for HalkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        self.fmt_tree(f, "")?;
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            write!(f, "\nTrace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

/* 📖 # Why use Box<HalkitError> in the result type?

Boxing the error reduces the size of the result type, making it more efficient to return in the common case.

*/

/// Standard result type for halkit operations.
pub type HalkitResult<T> = std::result::Result<T, Box<HalkitError>>;

/// Extension trait for attaching context to Results.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    fn context(self, context: impl Into<String>) -> HalkitResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> HalkitResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for HalkitResult<T> {
    fn context(self, context: impl Into<String>) -> HalkitResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> HalkitResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}
