/* 📖 # How is a HAL document stored?

A HalDocument is an ordered map of top-level fields. Plain properties hold arbitrary JSON
values; the `_links` and `_embedded` fields are typed collections keyed by relation name.
All three share one insertion order, so `_links` renders wherever the first link was added
rather than at a fixed position.

Each link relation holds a [`LinkSlot`]: a single link until a second one arrives under the
same relation, at which point the slot is promoted to a list. Relations written with
[`HalDocument::add_link_list`] are lists from the start.

Curies (compact URIs such as `ord:items`) are documented through a `curies` link list. The
namespace table comes from the [`HalContext`]; the first time a relation in a registered
namespace is used, the matching curie link is added. Curies found on embedded documents are
pulled up to the embedding document, so clients only ever look for them at the top level.
*/

use std::sync::Arc;

use halkit_base::{HalkitError, HalkitResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::uri::UriResolver;
use crate::utils::to_pretty_json;

pub const LINKS_KEY: &str = "_links";
pub const EMBEDDED_KEY: &str = "_embedded";
pub const CURIES_REL: &str = "curies";

// http://www.iana.org/assignments/link-relations/link-relations.xhtml
const DEFAULT_TITLES: &[(&str, &str)] = &[
    ("profile", "Documentation for this resource"),
    ("self", "URI of this resource"),
    ("collection", "Back to the collection"),
    ("create-form", "Form to create a new resource in this collection"),
    ("first", "First page"),
    ("last", "Last page"),
    ("next", "Next page"),
    ("previous", "Previous page"),
    ("prev", "Previous page"),
];

/// Canned human readable title for a well-known link relation.
pub fn default_title(rel: &str) -> Option<&'static str> {
    DEFAULT_TITLES
        .iter()
        .find(|(name, _)| *name == rel)
        .map(|(_, title)| *title)
}

fn curie_namespace(rel: &str) -> Option<&str> {
    rel.split_once(':').map(|(namespace, _)| namespace)
}

fn is_template(href: &str) -> bool {
    href.contains('{') && href.contains('}')
}

/// A HAL link object.
///
/// `templated` is always `Some(true)` when the href contains an RFC6570 template expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LinkBuilder")]
pub struct Link {
    href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    templated: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hreflang: Option<String>,
}

impl Link {
    /// A link with only an href.
    pub fn new(href: impl Into<String>) -> Self {
        let href = href.into();
        let templated = is_template(&href).then_some(true);
        Self {
            href,
            templated,
            media_type: None,
            name: None,
            profile: None,
            title: None,
            hreflang: None,
        }
    }

    pub fn builder() -> LinkBuilder {
        LinkBuilder::default()
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn templated(&self) -> Option<bool> {
        self.templated
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn hreflang(&self) -> Option<&str> {
        self.hreflang.as_deref()
    }

    /// The link as a JSON object with absent fields omitted.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("href".to_string(), Value::from(self.href.as_str()));
        if let Some(templated) = self.templated {
            map.insert("templated".to_string(), Value::Bool(templated));
        }
        let optional = [
            ("type", &self.media_type),
            ("name", &self.name),
            ("profile", &self.profile),
            ("title", &self.title),
            ("hreflang", &self.hreflang),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::from(value.as_str()));
            }
        }
        Value::Object(map)
    }
}

impl From<&str> for Link {
    fn from(href: &str) -> Self {
        Link::new(href)
    }
}

impl From<String> for Link {
    fn from(href: String) -> Self {
        Link::new(href)
    }
}

impl From<&Link> for Link {
    fn from(link: &Link) -> Self {
        link.clone()
    }
}

/// Builder for links carrying more than an href.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkBuilder {
    href: Option<String>,
    templated: Option<bool>,
    #[serde(rename = "type")]
    media_type: Option<String>,
    name: Option<String>,
    profile: Option<String>,
    title: Option<String>,
    hreflang: Option<String>,
}

impl LinkBuilder {
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn templated(mut self, templated: bool) -> Self {
        self.templated = Some(templated);
        self
    }

    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn hreflang(mut self, hreflang: impl Into<String>) -> Self {
        self.hreflang = Some(hreflang.into());
        self
    }

    /// Builds the link. Fails when no href was set.
    pub fn build(self) -> HalkitResult<Link> {
        let Some(href) = self.href else {
            return Err(Box::new(HalkitError::message("A link requires an href")));
        };
        let templated = if is_template(&href) {
            Some(true)
        } else {
            self.templated
        };
        Ok(Link {
            href,
            templated,
            media_type: self.media_type,
            name: self.name,
            profile: self.profile,
            title: self.title,
            hreflang: self.hreflang,
        })
    }
}

impl TryFrom<LinkBuilder> for Link {
    type Error = String;

    fn try_from(builder: LinkBuilder) -> Result<Self, Self::Error> {
        builder.build().map_err(|e| e.to_string())
    }
}

/// The links stored under one relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LinkSlot {
    Single(Link),
    Many(Vec<Link>),
}

impl LinkSlot {
    /// All links of the relation, in insertion order.
    pub fn links(&self) -> &[Link] {
        match self {
            LinkSlot::Single(link) => std::slice::from_ref(link),
            LinkSlot::Many(links) => links,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, LinkSlot::Many(_))
    }

    fn push(self, link: Link) -> Self {
        match self {
            LinkSlot::Single(existing) => LinkSlot::Many(vec![existing, link]),
            LinkSlot::Many(mut links) => {
                links.push(link);
                LinkSlot::Many(links)
            }
        }
    }

    /// Places `newer` ahead of the links already stored.
    fn prepend(self, mut newer: Vec<Link>) -> Self {
        newer.extend(self.into_links());
        LinkSlot::Many(newer)
    }

    fn into_links(self) -> Vec<Link> {
        match self {
            LinkSlot::Single(link) => vec![link],
            LinkSlot::Many(links) => links,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            LinkSlot::Single(link) => link.to_value(),
            LinkSlot::Many(links) => Value::Array(links.iter().map(Link::to_value).collect()),
        }
    }
}

/// The embedded resource data stored under one relation. `None` renders as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EmbeddedSlot {
    Single(Option<Map<String, Value>>),
    Many(Vec<Option<Map<String, Value>>>),
}

impl EmbeddedSlot {
    fn to_value(&self) -> Value {
        fn object(data: &Option<Map<String, Value>>) -> Value {
            data.clone().map(Value::Object).unwrap_or(Value::Null)
        }
        match self {
            EmbeddedSlot::Single(data) => object(data),
            EmbeddedSlot::Many(items) => Value::Array(items.iter().map(object).collect()),
        }
    }
}

/// Per-response settings shared by the documents built for one request: how relative hrefs
/// are resolved and which curie namespaces are known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HalContext {
    resolver: UriResolver,
    curies: Arc<IndexMap<String, String>>,
}

impl HalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(mut self, resolver: UriResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_curies(mut self, curies: Arc<IndexMap<String, String>>) -> Self {
        self.curies = curies;
        self
    }

    /// Registers the documentation href of a curie namespace.
    pub fn with_curie(mut self, namespace: impl Into<String>, href: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.curies).insert(namespace.into(), href.into());
        self
    }

    pub fn resolver(&self) -> &UriResolver {
        &self.resolver
    }

    pub fn curie_href(&self, namespace: &str) -> Option<&str> {
        self.curies.get(namespace).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Field {
    Property(Value),
    Links(IndexMap<String, LinkSlot>),
    Embedded(IndexMap<String, EmbeddedSlot>),
}

/// A HAL representation under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalDocument {
    context: HalContext,
    fields: IndexMap<String, Field>,
}

impl HalDocument {
    /// An empty document without href resolution or curie namespaces.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: HalContext) -> Self {
        Self {
            context,
            fields: IndexMap::new(),
        }
    }

    pub fn context(&self) -> &HalContext {
        &self.context
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Inserts or overwrites a top-level property. Overwriting keeps the original position.
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(name.into(), Field::Property(value.into()));
        self
    }

    /// Like [`HalDocument::add_property`] for any serializable value.
    pub fn add_serialized_property<T: Serialize>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> HalkitResult<&mut Self> {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|e| {
            Box::new(HalkitError::wrap(e).context(format!("Failed to serialize property '{}'", name)))
        })?;
        Ok(self.add_property(name, value))
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        match self.fields.get(name) {
            Some(Field::Property(value)) => Some(value),
            _ => None,
        }
    }

    /// Adds a link under `rel`, accumulating with links already stored there.
    ///
    /// A canned title is set for well-known relations when the link has none.
    pub fn add_link(&mut self, rel: &str, link: impl Into<Link>) -> &mut Self {
        let mut link = self.resolve(link.into());
        if link.title.as_deref().is_none_or(str::is_empty) {
            if let Some(title) = default_title(rel) {
                link.title = Some(title.to_string());
            }
        }
        self.prepare_rel(rel);
        let links = self.links_mut();
        match links.get_mut(rel) {
            Some(slot) => {
                let existing = std::mem::replace(slot, LinkSlot::Many(vec![]));
                *slot = existing.push(link);
            }
            None => {
                links.insert(rel.to_string(), LinkSlot::Single(link));
            }
        }
        self
    }

    /// Adds links under `rel`, always storing a list. The new links come before existing ones.
    pub fn add_link_list<I, L>(&mut self, rel: &str, links: I) -> &mut Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Link>,
    {
        let resolved: Vec<Link> = links
            .into_iter()
            .map(|link| self.resolve(link.into()))
            .collect();
        self.prepare_rel(rel);
        let map = self.links_mut();
        match map.get_mut(rel) {
            Some(slot) => {
                let existing = std::mem::replace(slot, LinkSlot::Many(vec![]));
                *slot = existing.prepend(resolved);
            }
            None => {
                map.insert(rel.to_string(), LinkSlot::Many(resolved));
            }
        }
        self
    }

    /// The links stored under `rel`.
    pub fn links(&self, rel: &str) -> Option<&LinkSlot> {
        match self.fields.get(LINKS_KEY) {
            Some(Field::Links(links)) => links.get(rel),
            _ => None,
        }
    }

    pub fn has_curie(&self, name: &str) -> bool {
        self.links(CURIES_REL)
            .is_some_and(|slot| slot.links().iter().any(|link| link.name() == Some(name)))
    }

    /// Adds a curie link for the namespace unless one is already present.
    pub fn add_curie(&mut self, name: &str, href: &str) -> &mut Self {
        if self.has_curie(name) {
            return self;
        }
        let curie = Link {
            name: Some(name.to_string()),
            ..Link::new(href)
        };
        self.add_link_list(CURIES_REL, [curie])
    }

    /// Embeds a document (or `null`) under `rel`, replacing what was embedded there before.
    pub fn add_object(&mut self, rel: &str, child: impl Into<Option<HalDocument>>) -> &mut Self {
        let child: Option<HalDocument> = child.into();
        let data = child.map(|child| self.adopt(child));
        self.set_embedded(rel, EmbeddedSlot::Single(data))
    }

    /// Embeds a list of documents under `rel`, replacing what was embedded there before.
    pub fn add_object_list<I, D>(&mut self, rel: &str, children: I) -> &mut Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Option<HalDocument>>,
    {
        let items = children
            .into_iter()
            .map(|child| {
                let child: Option<HalDocument> = child.into();
                child.map(|child| self.adopt(child))
            })
            .collect();
        self.set_embedded(rel, EmbeddedSlot::Many(items))
    }

    pub fn embedded(&self, rel: &str) -> Option<&EmbeddedSlot> {
        match self.fields.get(EMBEDDED_KEY) {
            Some(Field::Embedded(embedded)) => embedded.get(rel),
            _ => None,
        }
    }

    /// The document as an ordered JSON object, ready to be embedded elsewhere.
    pub fn to_dict(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(key, field)| {
                let value = match field {
                    Field::Property(value) => value.clone(),
                    Field::Links(links) => Value::Object(
                        links
                            .iter()
                            .map(|(rel, slot)| (rel.clone(), slot.to_value()))
                            .collect(),
                    ),
                    Field::Embedded(embedded) => Value::Object(
                        embedded
                            .iter()
                            .map(|(rel, slot)| (rel.clone(), slot.to_value()))
                            .collect(),
                    ),
                };
                (key.clone(), value)
            })
            .collect()
    }

    pub fn into_dict(self) -> Map<String, Value> {
        self.to_dict()
    }

    /// Pretty-printed JSON with four-space indentation. Non-ASCII text is not escaped.
    pub fn to_json(&self) -> HalkitResult<String> {
        to_pretty_json(self)
    }

    fn resolve(&self, mut link: Link) -> Link {
        link.href = self.context.resolver().full_uri(&link.href);
        link
    }

    /// Adds the curie documenting `rel`'s namespace, if the namespace is registered.
    fn prepare_rel(&mut self, rel: &str) {
        let Some(namespace) = curie_namespace(rel) else {
            return;
        };
        match self.context.curie_href(namespace).map(str::to_string) {
            Some(href) => {
                self.add_curie(namespace, &href);
            }
            None => debug!(rel, namespace, "No curie registered for namespace"),
        }
    }

    /// Moves the child's curies onto this document and returns the child's data.
    fn adopt(&mut self, mut child: HalDocument) -> Map<String, Value> {
        let curies = match child.fields.get_mut(LINKS_KEY) {
            Some(Field::Links(links)) => {
                let curies = links.shift_remove(CURIES_REL);
                if links.is_empty() {
                    child.fields.shift_remove(LINKS_KEY);
                }
                curies
            }
            _ => None,
        };
        for curie in curies.map(LinkSlot::into_links).unwrap_or_default() {
            match curie.name() {
                Some(name) if !self.has_curie(name) => {
                    debug!(name, "Promoting curie of embedded document");
                    self.add_curie(name, curie.href());
                }
                Some(_) => {}
                None => warn!(href = curie.href(), "Dropping curie link without a name"),
            }
        }
        child.into_dict()
    }

    fn set_embedded(&mut self, rel: &str, slot: EmbeddedSlot) -> &mut Self {
        self.prepare_rel(rel);
        let field = self
            .fields
            .entry(EMBEDDED_KEY.to_string())
            .or_insert_with(|| Field::Embedded(IndexMap::new()));
        if !matches!(field, Field::Embedded(_)) {
            *field = Field::Embedded(IndexMap::new());
        }
        if let Field::Embedded(embedded) = field {
            embedded.insert(rel.to_string(), slot);
        }
        self
    }

    fn links_mut(&mut self) -> &mut IndexMap<String, LinkSlot> {
        let field = self
            .fields
            .entry(LINKS_KEY.to_string())
            .or_insert_with(|| Field::Links(IndexMap::new()));
        if !matches!(field, Field::Links(_)) {
            *field = Field::Links(IndexMap::new());
        }
        match field {
            Field::Links(links) => links,
            _ => unreachable!("_links holds a link collection"),
        }
    }
}

impl Serialize for HalDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_dict().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use serde_json::json;

    fn context() -> HalContext {
        HalContext::new()
            .with_resolver(UriResolver::parse("https://api.example.com/orders"))
            .with_curie("ord", "/docs/rels/{rel}")
            .with_curie("cust", "https://docs.example.com/customers/{rel}")
    }

    fn value(doc: &HalDocument) -> Value {
        Value::Object(doc.to_dict())
    }

    #[test]
    fn test_link_template_detection() {
        assert_eq!(Link::new("/orders{?page}").templated(), Some(true));
        assert_eq!(Link::new("/orders").templated(), None);
        assert_eq!(Link::new("/orders{").templated(), None);

        let forced = Link::builder()
            .href("/orders/{id}")
            .templated(false)
            .build()
            .unwrap();
        assert_eq!(forced.templated(), Some(true));
    }

    #[test]
    fn test_link_requires_href() {
        let err = Link::builder().title("no target").build().unwrap_err();
        assert_eq!(err.to_string(), "A link requires an href");

        let parsed: Result<Link, _> = serde_json::from_value(json!({"title": "x"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_link_deserialize_sets_templated() {
        let link: Link = serde_json::from_value(json!({"href": "/o/{id}", "type": "text/plain"})).unwrap();
        assert_eq!(link.templated(), Some(true));
        assert_eq!(link.media_type(), Some("text/plain"));
    }

    #[test]
    fn test_link_omits_absent_fields() {
        let link = Link::builder()
            .href("/orders")
            .media_type("application/hal+json")
            .hreflang("en")
            .build()
            .unwrap();
        assert_eq!(
            link.to_value(),
            json!({"href": "/orders", "type": "application/hal+json", "hreflang": "en"})
        );
        assert_eq!(serde_json::to_value(&link).unwrap(), link.to_value());
    }

    #[test]
    fn test_properties_round_trip() {
        let mut doc = HalDocument::new();
        doc.add_property("a", 1);

        let parsed: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(parsed, json!({"a": 1}));
    }

    #[test]
    fn test_overwriting_property_keeps_position() {
        let mut doc = HalDocument::new();
        doc.add_property("first", 1)
            .add_property("second", 2)
            .add_property("first", "one");

        let keys: Vec<String> = doc.to_dict().keys().cloned().collect();
        assert_eq!(keys, vec!["first", "second"]);
        assert_eq!(doc.property("first"), Some(&json!("one")));
    }

    #[test]
    fn test_add_link_twice_accumulates_in_order() {
        let mut doc = HalDocument::new();
        doc.add_link("item", "/orders/1").add_link("item", "/orders/2");

        let slot = doc.links("item").unwrap();
        assert!(slot.is_list());
        let hrefs: Vec<&str> = slot.links().iter().map(Link::href).collect();
        assert_eq!(hrefs, vec!["/orders/1", "/orders/2"]);

        doc.add_link("item", "/orders/3");
        assert_eq!(doc.links("item").unwrap().links().len(), 3);
    }

    #[test]
    fn test_accumulating_keeps_relation_position() {
        let mut doc = HalDocument::new();
        doc.add_link("item", "/a").add_link("next", "/b").add_link("item", "/c");

        let links = doc.to_dict()[LINKS_KEY].as_object().unwrap().clone();
        let rels: Vec<&String> = links.keys().collect();
        assert_eq!(rels, vec!["item", "next"]);
    }

    #[test]
    fn test_add_link_list_puts_new_links_first() {
        let mut doc = HalDocument::new();
        doc.add_link_list("item", ["/a"]);
        doc.add_link_list("item", ["/b", "/c"]);
        doc.add_link_list("other", Vec::<Link>::new());

        let hrefs: Vec<&str> = doc.links("item").unwrap().links().iter().map(Link::href).collect();
        assert_eq!(hrefs, vec!["/b", "/c", "/a"]);
        assert_eq!(doc.links("other"), Some(&LinkSlot::Many(vec![])));

        doc.add_link("single", "/x");
        doc.add_link_list("single", ["/y"]);
        let hrefs: Vec<&str> = doc.links("single").unwrap().links().iter().map(Link::href).collect();
        assert_eq!(hrefs, vec!["/y", "/x"]);
    }

    #[test]
    fn test_later_curies_come_first() {
        let mut doc = HalDocument::new();
        doc.add_curie("x", "/x/{rel}");
        doc.add_curie("y", "/y/{rel}");

        let names: Vec<Option<&str>> = doc.links(CURIES_REL).unwrap().links().iter().map(Link::name).collect();
        assert_eq!(names, vec![Some("y"), Some("x")]);
    }

    #[test]
    fn test_default_titles() {
        let mut doc = HalDocument::new();
        doc.add_link("self", "/orders/1")
            .add_link("prev", "/orders?page=1")
            .add_link("next", Link::builder().href("/orders?page=3").title("Onwards").build().unwrap())
            .add_link("related", "/customers/1")
            .add_link_list("first", ["/orders?page=0"]);

        let title = |rel: &str| doc.links(rel).unwrap().links()[0].title().map(str::to_string);
        assert_eq!(title("self"), Some("URI of this resource".to_string()));
        assert_eq!(title("prev"), Some("Previous page".to_string()));
        assert_eq!(title("next"), Some("Onwards".to_string()));
        assert_eq!(title("related"), None);
        assert_eq!(title("first"), None);
    }

    #[test]
    fn test_relative_hrefs_are_resolved() {
        let mut doc = HalDocument::with_context(context());
        doc.add_link("self", "/orders/1")
            .add_link("find", "/orders{?id}")
            .add_link("external", "http://elsewhere.example.com/");

        assert_eq!(doc.links("self").unwrap().links()[0].href(), "https://api.example.com/orders/1");
        let find = &doc.links("find").unwrap().links()[0];
        assert_eq!(find.href(), "https://api.example.com/orders{?id}");
        assert_eq!(find.templated(), Some(true));
        assert_eq!(
            doc.links("external").unwrap().links()[0].href(),
            "http://elsewhere.example.com/"
        );
    }

    #[test]
    fn test_curie_added_once_per_namespace() {
        let mut doc = HalDocument::with_context(context());
        doc.add_link("ord:items", "/orders/1/items")
            .add_link("ord:customer", "/customers/7")
            .add_link("cust:addresses", "/customers/7/addresses");

        let curies = doc.links(CURIES_REL).unwrap();
        assert!(curies.is_list());
        let names: Vec<Option<&str>> = curies.links().iter().map(Link::name).collect();
        assert_eq!(names, vec![Some("ord"), Some("cust")]);
        assert_eq!(curies.links()[0].href(), "https://api.example.com/docs/rels/{rel}");
        assert_eq!(curies.links()[0].templated(), Some(true));
    }

    #[test]
    fn test_unknown_namespace_is_skipped() {
        let mut doc = HalDocument::with_context(context());
        doc.add_link("acme:widgets", "/widgets");

        assert!(doc.links(CURIES_REL).is_none());
        assert!(doc.links("acme:widgets").is_some());
    }

    #[test]
    fn test_curies_can_be_added_directly() {
        let mut doc = HalDocument::new();
        doc.add_link(CURIES_REL, Link::builder().href("/docs/{rel}").name("x").build().unwrap());
        doc.add_curie("x", "/other/{rel}");
        doc.add_curie("y", "/why/{rel}");

        assert!(doc.has_curie("x"));
        assert!(doc.has_curie("y"));
        assert_eq!(doc.links(CURIES_REL).unwrap().links().len(), 2);
    }

    #[test]
    fn test_embedded_curies_move_to_top() {
        let mut child = HalDocument::with_context(context());
        child.add_link("ord:items", "/orders/1/items");
        child.add_property("total", 30);

        let mut parent = HalDocument::with_context(context());
        parent.add_object("ord:order", child);

        let curies = parent.links(CURIES_REL).unwrap().links();
        assert_eq!(curies.iter().filter(|c| c.name() == Some("ord")).count(), 1);

        let dict = parent.to_dict();
        let embedded = &dict[EMBEDDED_KEY]["ord:order"];
        assert!(embedded[LINKS_KEY].get(CURIES_REL).is_none());
        assert_eq!(embedded[LINKS_KEY]["ord:items"]["href"], "https://api.example.com/orders/1/items");
    }

    #[test]
    fn test_empty_links_removed_from_embedded() {
        let mut child = HalDocument::new();
        child.add_curie("cust", "https://docs.example.com/customers/{rel}");
        child.add_property("name", "Ada");

        let mut parent = HalDocument::new();
        parent.add_object_list("customers", vec![child, HalDocument::new()]);

        assert!(parent.has_curie("cust"));
        assert_eq!(
            value(&parent)[EMBEDDED_KEY]["customers"],
            json!([{"name": "Ada"}, {}])
        );
    }

    #[test]
    fn test_embedding_null_and_replacing() {
        let mut parent = HalDocument::new();
        parent.add_object("customer", None);
        assert_eq!(value(&parent), json!({"_embedded": {"customer": null}}));

        let mut customer = HalDocument::new();
        customer.add_property("id", 7);
        parent.add_object("customer", customer);
        parent.add_object_list("orders", [None, Some(HalDocument::new())]);
        assert_eq!(
            value(&parent),
            json!({"_embedded": {"customer": {"id": 7}, "orders": [null, {}]}})
        );
    }

    #[test]
    fn test_to_json_layout() {
        let mut doc = HalDocument::with_context(context());
        doc.add_property("id", 1);
        doc.add_link("self", "/orders/1");
        doc.add_property("status", "geöffnet");
        let mut item = HalDocument::new();
        item.add_property("sku", "A-1");
        doc.add_object_list("ord:items", vec![item]);

        expect![[r#"
            {
                "id": 1,
                "_links": {
                    "self": {
                        "href": "https://api.example.com/orders/1",
                        "title": "URI of this resource"
                    },
                    "curies": [
                        {
                            "href": "https://api.example.com/docs/rels/{rel}",
                            "templated": true,
                            "name": "ord"
                        }
                    ]
                },
                "status": "geöffnet",
                "_embedded": {
                    "ord:items": [
                        {
                            "sku": "A-1"
                        }
                    ]
                }
            }"#]]
        .assert_eq(&doc.to_json().unwrap());
    }

    #[test]
    fn test_empty_document_serializes_to_empty_object() {
        assert_eq!(HalDocument::new().to_json().unwrap(), "{}");
    }

    #[test]
    fn test_serialized_property() {
        #[derive(Serialize)]
        struct Total {
            amount: u32,
            currency: &'static str,
        }

        let mut doc = HalDocument::new();
        doc.add_serialized_property("total", &Total { amount: 30, currency: "EUR" })
            .unwrap();
        assert_eq!(value(&doc), json!({"total": {"amount": 30, "currency": "EUR"}}));
    }
}
