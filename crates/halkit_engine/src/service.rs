/* 📖 # How does a request flow through a HalService?

1. The request is turned into a [`RequestContext`]. A malformed JSON body ends the request
   here with a 400 vnd.error response.
2. The [`ResourceHandler`] produces a [`Reply`] or a [`Fault`].
3. Replies are encoded in the negotiated representation. Faults the [`ErrorResponder`] knows
   become vnd.error responses; any other fault is returned as an error, to be dealt with by
   the hosting server.
*/

use std::fmt;

use halkit_base::http::{HttpRequest, HttpResponse, HttpService};
use halkit_base::{HalkitError, HalkitResult};
use tracing::{info, warn};

use crate::config::Config;
use crate::encoder::{EncodedResponse, Reply, ResponseEncoder};
use crate::hal::HalContext;
use crate::request::RequestContext;
use crate::responder::{ErrorResponder, Fault};

/// Application code answering requests for resources.
pub trait ResourceHandler: Send + Sync + 'static {
    fn handle(&self, request: &RequestContext) -> Result<Reply, Fault>;
}

impl<F> ResourceHandler for F
where
    F: Fn(&RequestContext) -> Result<Reply, Fault> + Send + Sync + 'static,
{
    fn handle(&self, request: &RequestContext) -> Result<Reply, Fault> {
        self(request)
    }
}

/// An [`HttpService`] serving a [`ResourceHandler`] as a hypermedia API.
pub struct HalService<H: ResourceHandler> {
    handler: H,
    defaults: HalContext,
    default_accept: String,
    encoder: ResponseEncoder,
    responder: ErrorResponder,
}

impl<H: ResourceHandler> HalService<H> {
    pub fn new(handler: H, config: &Config) -> HalkitResult<Self> {
        let defaults = config
            .hal_context()
            .map_err(|e| Box::new(e.context("Failed to set up HAL service")))?;
        let encoder = ResponseEncoder::new(config.negotiator());
        Ok(Self {
            handler,
            defaults,
            default_accept: config.default_accept().to_string(),
            encoder,
            responder: ErrorResponder::new(encoder),
        })
    }

    /// Replaces the error responder, e.g. with one carrying server error hooks.
    ///
    /// The responder's negotiation settings are kept as configured on it.
    pub fn with_responder(mut self, responder: ErrorResponder) -> Self {
        self.responder = responder;
        self
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    fn respond_to_fault(
        &self,
        fault: Fault,
        accept: &str,
        context: HalContext,
    ) -> HalkitResult<HttpResponse> {
        match self.responder.respond_in(fault, accept, context) {
            Ok(encoded) => Ok(encoded.into_http_response()),
            Err(Fault::Unhandled(error)) => Err(error),
            Err(other) => Err(Box::new(HalkitError::wrap(other))),
        }
    }
}

impl<H: ResourceHandler> HttpService for HalService<H> {
    fn handle_request(&self, request: HttpRequest) -> HalkitResult<HttpResponse> {
        let context = match RequestContext::from_request(&request, &self.defaults, &self.default_accept) {
            Ok(context) => context,
            Err(error) => {
                let accept = request
                    .headers()
                    .get("Accept")
                    .map(String::as_str)
                    .unwrap_or(&self.default_accept);
                warn!(method = %request.method(), path = request.path(), "Rejecting request: {}", error);
                return self.respond_to_fault(error.into(), accept, self.defaults.clone());
            }
        };

        let response = match self.handler.handle(&context) {
            Ok(reply) => self
                .encoder
                .encode(&reply, context.accept())
                .map(EncodedResponse::into_http_response),
            Err(fault) => {
                self.respond_to_fault(fault, context.accept(), context.hal_context().clone())
            }
        };

        match &response {
            Ok(response) => info!(
                method = %context.method(),
                path = context.path(),
                status = response.status().as_u16(),
                "Handled request"
            ),
            Err(error) => warn!(
                method = %context.method(),
                path = context.path(),
                "Request failed: {}",
                error
            ),
        }
        response
    }
}

impl<H: ResourceHandler> fmt::Debug for HalService<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HalService")
            .field("defaults", &self.defaults)
            .field("default_accept", &self.default_accept)
            .field("encoder", &self.encoder)
            .field("responder", &self.responder)
            .finish_non_exhaustive()
    }
}
