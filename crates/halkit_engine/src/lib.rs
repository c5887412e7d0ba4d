pub mod api_error;
pub mod config;
pub mod encoder;
pub mod hal;
pub mod json_html;
pub mod negotiation;
pub mod request;
pub mod responder;
pub mod service;
pub mod uri;
pub mod utils;

pub use api_error::{ApiError, ApiErrorKind};
pub use config::{Config, load_config, parse_config};
pub use encoder::{EncodedResponse, Renderable, Reply, ResponseEncoder};
pub use hal::{EmbeddedSlot, HalContext, HalDocument, Link, LinkBuilder, LinkSlot};
pub use negotiation::{AcceptEntry, ContentNegotiator, best_content_type, parse_accept};
pub use request::{RequestContext, decode_json_body};
pub use responder::{DoesNotExist, ErrorResponder, Fault, ServerErrorHook, vnd_error_document};
pub use service::{HalService, ResourceHandler};
pub use uri::UriResolver;
pub use utils::iso_date;
