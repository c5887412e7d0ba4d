use url::Url;

/// Resolves link hrefs against the absolute URI of the request being answered.
///
/// Absolute hrefs are returned unchanged. Relative hrefs are joined onto the base, except for
/// the RFC6570 template part (everything from the first `{`), which is appended verbatim so
/// that expressions like `{?page}` are not percent-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriResolver {
    base: Option<Url>,
}

impl UriResolver {
    /// A resolver that leaves every href as given.
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn new(base: Url) -> Self {
        Self { base: Some(base) }
    }

    /// Parses `base`; an unparsable base yields a resolver that leaves hrefs untouched.
    pub fn parse(base: &str) -> Self {
        match Url::parse(base) {
            Ok(url) => Self::new(url),
            Err(e) => {
                tracing::warn!(base, error = %e, "Ignoring unparsable base URI");
                Self::unresolved()
            }
        }
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Returns the absolute form of `href`.
    pub fn full_uri(&self, href: &str) -> String {
        let Some(base) = &self.base else {
            return href.to_string();
        };
        if Url::parse(href).is_ok() {
            return href.to_string();
        }

        let (resolvable, template) = match href.find('{') {
            Some(index) => href.split_at(index),
            None => (href, ""),
        };
        match base.join(resolvable) {
            Ok(joined) => format!("{}{}", joined, template),
            Err(e) => {
                tracing::warn!(href, error = %e, "Could not resolve href against base URI");
                href.to_string()
            }
        }
    }
}
