use std::path::Path;
use std::sync::Arc;

use halkit_base::{HalkitError, HalkitResult};
use indexmap::IndexMap;
use serde::Deserialize;
use url::Url;

use crate::hal::HalContext;
use crate::negotiation::ContentNegotiator;
use crate::uri::UriResolver;

/// `Accept` value assumed for requests that do not send one.
pub const DEFAULT_ACCEPT: &str = "application/json";

/// Configuration of a halkit API, usually read from `halkit.toml`.
///
/// ```toml
/// base_uri = "https://api.example.com"
/// html_preview = true
///
/// [curies]
/// ord = "/docs/rels/{rel}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Absolute URI the request path is appended to when resolving relative link hrefs.
    /// A path prefix such as `/v1` is kept.
    pub base_uri: Option<String>,
    /// Offer `text/html` to clients that ask for it, rendering JSON inside a preview page.
    pub html_preview: bool,
    /// `Accept` value assumed when a request carries none.
    pub default_accept: Option<String>,
    /// Curie namespaces and the documentation href template of each.
    pub curies: IndexMap<String, String>,
}

impl Config {
    pub fn negotiator(&self) -> ContentNegotiator {
        if self.html_preview {
            ContentNegotiator::with_html_preview()
        } else {
            ContentNegotiator::new()
        }
    }

    pub fn default_accept(&self) -> &str {
        self.default_accept.as_deref().unwrap_or(DEFAULT_ACCEPT)
    }

    /// The parsed `base_uri`, if configured.
    pub fn base_url(&self) -> HalkitResult<Option<Url>> {
        self.base_uri
            .as_deref()
            .map(|base| {
                Url::parse(base).map_err(|e| {
                    Box::new(
                        HalkitError::wrap(e).context(format!("Invalid base_uri '{}'", base)),
                    )
                })
            })
            .transpose()
    }

    /// The context every request's documents start from: the configured curies, and the
    /// base URI (if any) for resolving hrefs.
    pub fn hal_context(&self) -> HalkitResult<HalContext> {
        let resolver = match self.base_url()? {
            Some(base) => UriResolver::new(base),
            None => UriResolver::unresolved(),
        };
        Ok(HalContext::new()
            .with_resolver(resolver)
            .with_curies(Arc::new(self.curies.clone())))
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(text: &str) -> HalkitResult<Config> {
    let config: Config = toml::from_str(text)
        .map_err(|e| Box::new(HalkitError::wrap(e).context("Failed to parse configuration")))?;
    config.base_url()?;
    Ok(config)
}

/// Reads and parses a configuration file.
pub fn load_config(path: &Path) -> HalkitResult<Config> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        Box::new(HalkitError::wrap(e).context(format!("Failed to read {}", path.display())))
    })?;
    parse_config(&text).map_err(|e| Box::new(e.context(format!("In {}", path.display()))))
}
