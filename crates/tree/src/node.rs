// ABOUTME: Node model for ordered mixed-content trees: elements with attributes and text leaves.
// ABOUTME: Provides child replacement, shell cloning, and the children-splicing step used by rewrites.

/// Name of the synthetic root element produced by the markup parsers.
pub const DOCUMENT_NAME: &str = "#document";

/// Ordered attribute map. Keys are unique and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Set a value. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

/// A named element with attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Attributes,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// Builder: append a child.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder: append a text child.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    /// Builder: append several children.
    pub fn with_children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.set(key, value);
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        self.attrs.remove(key)
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn extend<I: IntoIterator<Item = Node>>(&mut self, children: I) {
        self.children.extend(children);
    }

    /// Detach and return all children, leaving the element empty.
    pub fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    /// Swap in a new children sequence.
    ///
    /// Returns `false` and leaves the element untouched when the new sequence
    /// is element-wise equal to the current one. The comparison is against
    /// the attached children, so it only applies while they are still in
    /// place; after [`Element::take_children`] or
    /// [`Element::process_children`] reattach with [`Element::extend`].
    pub fn replace_children(&mut self, new_children: Vec<Node>) -> bool {
        if self.children == new_children {
            return false;
        }
        self.children = new_children;
        true
    }

    /// A new empty element with the same name (no attributes, no children).
    pub fn clone_shell(&self) -> Element {
        Element::new(self.name.clone())
    }

    /// Run `processor` over every element child and splice its results in place.
    ///
    /// Text children pass through untouched. The children are detached from
    /// `self`, which is left empty; the caller decides what to attach
    /// afterwards.
    pub fn process_children<F>(&mut self, mut processor: F) -> Vec<Node>
    where
        F: FnMut(Node) -> Vec<Node>,
    {
        let children = self.take_children();
        let mut result = Vec::with_capacity(children.len());
        for child in children {
            if child.is_element() {
                result.extend(processor(child));
            } else {
                result.push(child);
            }
        }
        result
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A tree node: either an element or a text leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn element(name: impl Into<String>) -> Self {
        Node::Element(Element::new(name))
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// True for the `Element` variant; a text leaf is never a tag.
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// True for the `#document` root returned by the parsers.
    pub fn is_document(&self) -> bool {
        self.name() == Some(DOCUMENT_NAME)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element(elm) => Some(&elm.name),
            Node::Text(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(elm) => Some(elm),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(elm) => Some(elm),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(elm) => elm.children(),
            Node::Text(_) => &[],
        }
    }

    /// Consume the node, yielding its children (empty for text).
    pub fn into_children(self) -> Vec<Node> {
        match self {
            Node::Element(mut elm) => elm.take_children(),
            Node::Text(_) => Vec::new(),
        }
    }

    /// Descendant text concatenated in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Whitespace-only text, or an element holding nothing but whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Node::Text(text) => text.trim().is_empty(),
            Node::Element(elm) => elm.children.iter().all(|c| c.is_text() && c.is_blank()),
        }
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(elm) => {
            for child in &elm.children {
                collect_text(child, out);
            }
        }
    }
}

impl From<Element> for Node {
    fn from(elm: Element) -> Self {
        Node::Element(elm)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}
