//! Pandoc JSON document tree
//!
//! A typed view over pandoc's JSON AST. Only the node kinds the span
//! transforms care about get their own variant. Everything else is kept as a
//! generic element, mapping, sequence or scalar, so re-serializing a parsed
//! tree gives back the same JSON text.
//! Reference: https://hackage.haskell.org/package/pandoc-types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node kinds that have a dedicated variant
const KNOWN_KINDS: [&str; 4] = ["Str", "Space", "Span", "Plain"];

/// Root of a pandoc JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "pandoc-api-version")]
    pub api_version: Vec<u32>,
    pub meta: Node,
    pub blocks: Vec<Node>,
}

impl Document {
    pub fn new(api_version: Vec<u32>, blocks: Vec<Node>) -> Self {
        Self {
            api_version,
            meta: Node::Map(Vec::new()),
            blocks,
        }
    }

    /// Parse a document from pandoc JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON, pretty-printed with two-space indentation or compact
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Text and space tokens in document order, metadata first
    ///
    /// `Space` contributes `" "`. Used to check that a transform kept every
    /// token of the original in place.
    pub fn text_tokens(&self) -> Vec<&str> {
        let mut tokens = Vec::new();
        self.meta.collect_text(&mut tokens);
        for block in &self.blocks {
            block.collect_text(&mut tokens);
        }
        tokens
    }
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Node {
    // Plain inline kinds
    Str(String),
    Space,

    // Grouping kinds touched by the span transforms
    Span(Span),
    Plain(Vec<Node>),

    /// Any other tagged node (`{"t": kind}` or `{"t": kind, "c": content}`)
    Element(Element),
    /// Untagged mapping, keys in source order
    Map(Vec<(String, Node)>),
    Seq(Vec<Node>),
    /// Terminal scalar: null, bool, number or string
    Leaf(Value),
    /// A known kind whose payload has an unexpected shape, kept verbatim
    Opaque(Value),
}

/// Inline grouping node: `{"t": "Span", "c": [attr, [inline...]]}`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Span {
    pub attr: Attr,
    pub content: Vec<Node>,
}

impl Span {
    /// Span with no identifier, classes or attributes
    pub fn wrapper(content: Vec<Node>) -> Self {
        Self {
            attr: Attr::default(),
            content,
        }
    }

    pub fn is_wrapper(&self) -> bool {
        self.attr.is_empty()
    }
}

type AttrTriple = (String, Vec<String>, Vec<(String, String)>);

/// Pandoc attributes: `["id", ["class"...], [["key", "value"]...]]`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "AttrTriple", into = "AttrTriple")]
pub struct Attr {
    pub id: String,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
}

impl Attr {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.classes.is_empty() && self.attributes.is_empty()
    }
}

impl From<AttrTriple> for Attr {
    fn from((id, classes, attributes): AttrTriple) -> Self {
        Self {
            id,
            classes,
            attributes,
        }
    }
}

impl From<Attr> for AttrTriple {
    fn from(attr: Attr) -> Self {
        (attr.id, attr.classes, attr.attributes)
    }
}

impl From<Attr> for Value {
    fn from(attr: Attr) -> Self {
        Value::Array(vec![
            Value::String(attr.id),
            Value::Array(attr.classes.into_iter().map(Value::String).collect()),
            Value::Array(
                attr.attributes
                    .into_iter()
                    .map(|(key, value)| Value::Array(vec![Value::String(key), Value::String(value)]))
                    .collect(),
            ),
        ])
    }
}

/// Tagged node of a kind without a dedicated variant
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: String,
    pub content: Option<Box<Node>>,
}

// Convenience constructors
impl Node {
    pub fn str(text: impl Into<String>) -> Self {
        Node::Str(text.into())
    }

    pub fn plain(children: Vec<Node>) -> Self {
        Node::Plain(children)
    }

    pub fn span(attr: Attr, content: Vec<Node>) -> Self {
        Node::Span(Span { attr, content })
    }

    pub fn wrapper(content: Vec<Node>) -> Self {
        Node::Span(Span::wrapper(content))
    }

    pub fn element(kind: impl Into<String>, content: Option<Node>) -> Self {
        Node::Element(Element {
            kind: kind.into(),
            content: content.map(Box::new),
        })
    }

    /// Split text on single spaces into alternating `Str` and `Space` nodes
    pub fn words(text: &str) -> Vec<Node> {
        let mut nodes = Vec::new();
        for (i, word) in text.split(' ').enumerate() {
            if i > 0 {
                nodes.push(Node::Space);
            }
            if !word.is_empty() {
                nodes.push(Node::str(word));
            }
        }
        nodes
    }

    /// The `t` tag of tagged nodes
    pub fn kind(&self) -> Option<&str> {
        match self {
            Node::Str(_) => Some("Str"),
            Node::Space => Some("Space"),
            Node::Span(_) => Some("Span"),
            Node::Plain(_) => Some("Plain"),
            Node::Element(element) => Some(element.kind.as_str()),
            Node::Opaque(value) => value.get("t").and_then(Value::as_str),
            Node::Map(_) | Node::Seq(_) | Node::Leaf(_) => None,
        }
    }

    /// Whether this is a text token or an inter-word space
    pub fn is_plain_inline(&self) -> bool {
        matches!(self, Node::Str(_) | Node::Space)
    }

    /// Text and space tokens below this node, in order
    pub fn text_tokens(&self) -> Vec<&str> {
        let mut tokens = Vec::new();
        self.collect_text(&mut tokens);
        tokens
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Str(text) => out.push(text),
            Node::Space => out.push(" "),
            Node::Span(Span { content: items, .. }) | Node::Plain(items) | Node::Seq(items) => {
                for item in items {
                    item.collect_text(out);
                }
            }
            Node::Element(element) => {
                if let Some(content) = &element.content {
                    content.collect_text(out);
                }
            }
            Node::Map(entries) => {
                for (_, value) in entries {
                    value.collect_text(out);
                }
            }
            Node::Leaf(_) | Node::Opaque(_) => {}
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Node::Seq(nodes(items)),
            Value::Object(map) if is_tagged(&map) => {
                let mut kind = String::new();
                let mut content = None;
                for (key, value) in map {
                    match (key.as_str(), value) {
                        ("t", Value::String(tag)) => kind = tag,
                        (_, value) => content = Some(value),
                    }
                }
                tagged(kind, content)
            }
            Value::Object(map) => Node::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
            scalar => Node::Leaf(scalar),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Str(text) => tagged_value("Str", Some(Value::String(text))),
            Node::Space => tagged_value("Space", None),
            Node::Span(span) => tagged_value(
                "Span",
                Some(Value::Array(vec![
                    Value::from(span.attr),
                    Value::Array(values(span.content)),
                ])),
            ),
            Node::Plain(items) => tagged_value("Plain", Some(Value::Array(values(items)))),
            Node::Element(element) => {
                tagged_value(element.kind, element.content.map(|c| Value::from(*c)))
            }
            Node::Map(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
            Node::Seq(items) => Value::Array(values(items)),
            Node::Leaf(value) | Node::Opaque(value) => value,
        }
    }
}

/// Objects shaped exactly `{"t": <string>}` or `{"t": <string>, "c": ...}`
fn is_tagged(map: &Map<String, Value>) -> bool {
    let mut keys = map.keys().map(String::as_str);
    matches!(
        (keys.next(), keys.next(), keys.next()),
        (Some("t"), None | Some("c"), None)
    ) && map.get("t").is_some_and(Value::is_string)
}

fn tagged(kind: String, content: Option<Value>) -> Node {
    let content = match (kind.as_str(), content) {
        ("Str", Some(Value::String(text))) => return Node::Str(text),
        ("Space", None) => return Node::Space,
        ("Plain", Some(Value::Array(items))) => return Node::Plain(nodes(items)),
        ("Span", Some(Value::Array(parts))) => match parse_span(parts) {
            Ok(span) => return Node::Span(span),
            Err(parts) => Some(Value::Array(parts)),
        },
        (_, content) => content,
    };

    if KNOWN_KINDS.contains(&kind.as_str()) {
        Node::Opaque(tagged_value(kind, content))
    } else {
        Node::Element(Element {
            kind,
            content: content.map(|c| Box::new(Node::from(c))),
        })
    }
}

/// Returns the payload untouched when it is not `[attr, [inline...]]`
fn parse_span(parts: Vec<Value>) -> Result<Span, Vec<Value>> {
    match <[Value; 2]>::try_from(parts) {
        Ok([attr, Value::Array(inlines)]) => match Attr::deserialize(&attr) {
            Ok(parsed) => Ok(Span {
                attr: parsed,
                content: nodes(inlines),
            }),
            Err(_) => Err(vec![attr, Value::Array(inlines)]),
        },
        Ok(parts) => Err(parts.into()),
        Err(parts) => Err(parts),
    }
}

fn tagged_value(kind: impl Into<String>, content: Option<Value>) -> Value {
    let mut map = Map::new();
    map.insert("t".to_string(), Value::String(kind.into()));
    if let Some(content) = content {
        map.insert("c".to_string(), content);
    }
    Value::Object(map)
}

fn nodes(values: Vec<Value>) -> Vec<Node> {
    values.into_iter().map(Node::from).collect()
}

fn values(nodes: Vec<Node>) -> Vec<Value> {
    nodes.into_iter().map(Value::from).collect()
}
