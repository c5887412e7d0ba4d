/* 📖 # How is the response content type chosen?

The server keeps an ordered preference table, from the most specific hypermedia type down to
plain JSON, ending in a `default` entry. A caller names the type it would ideally produce
(`vnd.error`, `hal+json` or `json`). Negotiation starts at that entry and walks towards the
generic end of the table, returning the first entry whose key occurs as a substring of any
media range in the `Accept` header. Entries more specific than the preferred one are never
offered.

Quality values (`q=`) are parsed but do not influence the choice, and matching is a plain
case-sensitive substring test on the raw header text.
*/

use indexmap::IndexMap;
use tracing::debug;

/// Key of the mandatory last entry of every preference table.
pub const DEFAULT_KEY: &str = "default";

const FALLBACK_TABLE: &[(&str, &str)] = &[
    ("vnd.error", "application/vnd.error+json; charset=utf-8"),
    ("hal+json", "application/hal+json; charset=utf-8"),
    ("json", "application/json; charset=utf-8"),
    (DEFAULT_KEY, "application/json; charset=utf-8"),
];

const FALLBACK_TABLE_WITH_HTML: &[(&str, &str)] = &[
    ("vnd.error", "application/vnd.error+json; charset=utf-8"),
    ("hal+json", "application/hal+json; charset=utf-8"),
    ("json", "application/json; charset=utf-8"),
    ("html", "text/html; charset=utf-8"),
    (DEFAULT_KEY, "application/json; charset=utf-8"),
];

/// One comma-separated media range of an `Accept` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptEntry {
    /// The media range exactly as received, surrounding whitespace included.
    pub value: String,
    /// `name=value` parameters, trimmed. Segments that are not of that shape are skipped.
    pub params: IndexMap<String, String>,
}

impl AcceptEntry {
    pub fn parse(part: &str) -> Self {
        let mut segments = part.split(';');
        let value = segments.next().unwrap_or_default().to_string();
        let mut params = IndexMap::new();
        for segment in segments {
            let pieces: Vec<&str> = segment.split('=').collect();
            if let [name, param_value] = pieces.as_slice() {
                params.insert(name.trim().to_string(), param_value.trim().to_string());
            }
        }
        Self { value, params }
    }

    /// The `q` parameter, if present and numeric.
    pub fn quality(&self) -> Option<f32> {
        self.params.get("q").and_then(|q| q.parse().ok())
    }
}

/// Splits an `Accept` header into its media ranges, preserving header order.
pub fn parse_accept(header: &str) -> Vec<AcceptEntry> {
    header.split(',').map(AcceptEntry::parse).collect()
}

/// Picks a response content type from a fixed preference table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentNegotiator {
    html_preview: bool,
}

impl ContentNegotiator {
    /// Negotiator over the standard table: `vnd.error`, `hal+json`, `json`, `default`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Negotiator whose table also offers `text/html` between `json` and `default`, so that
    /// browsers get the HTML preview of a JSON body.
    pub fn with_html_preview() -> Self {
        Self { html_preview: true }
    }

    pub fn html_preview(&self) -> bool {
        self.html_preview
    }

    /// The preference table, most specific entry first.
    pub fn table(&self) -> &'static [(&'static str, &'static str)] {
        if self.html_preview {
            FALLBACK_TABLE_WITH_HTML
        } else {
            FALLBACK_TABLE
        }
    }

    /// The content type of the `default` entry.
    pub fn default_content_type(&self) -> &'static str {
        self.table()
            .iter()
            .find(|(key, _)| *key == DEFAULT_KEY)
            .map(|(_, content_type)| *content_type)
            .unwrap_or("application/json; charset=utf-8")
    }

    /// Returns the best content type for `preferred_key` given a raw `Accept` header.
    pub fn best_content_type(&self, preferred_key: &str, accept_header: &str) -> &'static str {
        let table = self.table();
        let Some(start_at) = table.iter().position(|(key, _)| *key == preferred_key) else {
            debug!(preferred_key, "Unknown content type key, using default");
            return self.default_content_type();
        };

        let accepted = parse_accept(accept_header);
        for (key, content_type) in &table[start_at..] {
            if accepted.iter().any(|entry| entry.value.contains(key)) {
                debug!(preferred_key, matched = key, content_type, "Negotiated content type");
                return *content_type;
            }
        }

        debug!(preferred_key, accept_header, "No acceptable match, using default");
        self.default_content_type()
    }
}

/// [`ContentNegotiator::best_content_type`] over the standard table.
pub fn best_content_type(preferred_key: &str, accept_header: &str) -> &'static str {
    ContentNegotiator::new().best_content_type(preferred_key, accept_header)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_JSON: &str = "application/json; charset=utf-8";

    #[test]
    fn test_parse_accept_splits_entries_and_params() {
        let entries = parse_accept("text/html, application/json;q=0.9; level = 1;bogus");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].value, "text/html");
        assert!(entries[0].params.is_empty());
        assert_eq!(entries[1].value, " application/json");
        assert_eq!(entries[1].params.get("q"), Some(&"0.9".to_string()));
        assert_eq!(entries[1].params.get("level"), Some(&"1".to_string()));
        assert_eq!(entries[1].params.len(), 2);
        assert_eq!(entries[1].quality(), Some(0.9));
    }

    #[test]
    fn test_parse_accept_skips_params_with_extra_equals() {
        let entry = AcceptEntry::parse("application/json;a=b=c");
        assert!(entry.params.is_empty());
        assert_eq!(entry.quality(), None);
    }

    #[test]
    fn test_exact_json_match() {
        assert_eq!(best_content_type("json", "application/json"), DEFAULT_JSON);
    }

    #[test]
    fn test_hal_json_match() {
        assert_eq!(
            best_content_type("hal+json", "application/hal+json"),
            "application/hal+json; charset=utf-8"
        );
    }

    #[test]
    fn test_vnd_error_match() {
        assert_eq!(
            best_content_type("vnd.error", "application/vnd.error+json"),
            "application/vnd.error+json; charset=utf-8"
        );
    }

    #[test]
    fn test_html_only_falls_back_to_default() {
        assert_eq!(best_content_type("hal+json", "text/html"), DEFAULT_JSON);
        assert_eq!(best_content_type("vnd.error", "text/html"), DEFAULT_JSON);
    }

    #[test]
    fn test_unknown_key_returns_default() {
        assert_eq!(
            best_content_type("nonexistent-key", "application/hal+json"),
            DEFAULT_JSON
        );
        assert_eq!(best_content_type("html", "text/html"), DEFAULT_JSON);
    }

    #[test]
    fn test_vnd_error_degrades_to_hal_json() {
        assert_eq!(
            best_content_type("vnd.error", "application/hal+json"),
            "application/hal+json; charset=utf-8"
        );
    }

    #[test]
    fn test_more_specific_types_are_never_offered() {
        // hal+json would match, but json was preferred
        assert_eq!(
            best_content_type("json", "application/hal+json"),
            DEFAULT_JSON
        );
        assert_eq!(
            best_content_type("hal+json", "application/vnd.error+json"),
            DEFAULT_JSON
        );
    }

    #[test]
    fn test_quality_values_do_not_rank() {
        assert_eq!(
            best_content_type("vnd.error", "application/json;q=1.0, application/hal+json;q=0.1"),
            "application/hal+json; charset=utf-8"
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(
            best_content_type("hal+json", "application/HAL+JSON"),
            DEFAULT_JSON
        );
    }

    #[test]
    fn test_malformed_headers_degrade_to_default() {
        assert_eq!(best_content_type("hal+json", ""), DEFAULT_JSON);
        assert_eq!(best_content_type("hal+json", ",;;=,"), DEFAULT_JSON);
        assert_eq!(best_content_type("vnd.error", "*/*"), DEFAULT_JSON);
    }

    #[test]
    fn test_html_preview_table() {
        let negotiator = ContentNegotiator::with_html_preview();
        let browser = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

        assert_eq!(
            negotiator.best_content_type("hal+json", browser),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            negotiator.best_content_type("hal+json", "application/json, text/html"),
            DEFAULT_JSON
        );
        assert_eq!(negotiator.default_content_type(), DEFAULT_JSON);
        assert_eq!(negotiator.table().last().map(|(key, _)| *key), Some(DEFAULT_KEY));
    }
}
