use std::sync::LazyLock;

use regex::Regex;

// Quoted http(s) URLs, one line at a time.
static URL_STRING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""(https?://.*)""#).ok());

const PAGE_HEAD: &str = r#"
    <html>
    <head>
    <title>JSON output</title>
    <link rel="stylesheet" href="//cdnjs.cloudflare.com/ajax/libs/highlight.js/8.4/styles/default.min.css">
    </head>
    <body>
    <script src="//cdnjs.cloudflare.com/ajax/libs/highlight.js/8.4/highlight.min.js"></script>
    <script>hljs.initHighlightingOnLoad();</script>
    <pre><code class="json">"#;

const PAGE_TAIL: &str = r#"
    </code>
    </pre>
    </body>
    </html>"#;

/// Wraps serialized JSON in a static page that syntax-highlights it, turning quoted
/// `http(s)://` strings into hyperlinks.
///
/// The JSON is HTML-escaped first, so markup inside string values is shown as text.
pub fn create_html(json: &str) -> String {
    let escaped = html_escape::encode_text(json);
    let linked = match URL_STRING.as_ref() {
        Some(pattern) => pattern
            .replace_all(&escaped, r#""<a href="${1}">${1}</a>""#)
            .into_owned(),
        None => escaped.into_owned(),
    };
    format!("{}{}{}", PAGE_HEAD, linked, PAGE_TAIL)
}
