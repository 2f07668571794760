//! Element Tree Adapter.
//!
//! # Responsibility
//! - Hold a mutable, clonable XML element tree for one metadata fragment.
//! - Provide case-insensitive child lookup, text access, attribute access,
//!   node removal/replacement and schema-ordered insertion.
//! - Convert between trees and XML text (`read`/`write`).
//!
//! # Invariants
//! - Tag names match ASCII case-insensitively on their local name; the
//!   namespace prefix is ignored.
//! - `Clone` is a deep copy. Edits on a clone never reach the source tree.
//! - Whitespace-only text between child elements is not kept.
//!
//! # See also
//! - `names` for the lower-case <-> schema name table.

pub mod names;
mod read;
mod write;

pub use read::XmlError;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One node inside an element's child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

impl XmlNode {
    /// Returns the element when this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the mutable element when this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// Address of a descendant element, as child-node indices from an ancestor.
///
/// An empty path addresses the ancestor itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path addressing the element the search started from.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Depth below the starting element.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Splits into the parent path and the last child index.
    pub fn split_last(&self) -> Option<(NodePath, usize)> {
        let (last, parent) = self.0.split_last()?;
        Some((NodePath(parent.to_vec()), *last))
    }
}

/// Mutable XML element with attributes and ordered child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl Element {
    /// Creates an empty element.
    ///
    /// Core code passes the lower-case canonical names from [`names`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element holding a single text node.
    pub fn with_text(name: impl Into<String>, text: &str) -> Self {
        let mut element = Self::new(name);
        element.set_text(text);
        element
    }

    /// Parses XML text into a tree rooted at the document element.
    ///
    /// # Errors
    /// - Returns [`XmlError`] for malformed markup, a missing root, or content
    ///   after the root element.
    pub fn parse_str(input: &str) -> Result<Self, XmlError> {
        read::parse_document(input)
    }

    /// Writes the tree as compact XML with schema (camelCase) tag names.
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        write::write_document(self, false)
    }

    /// Writes the tree as two-space indented XML with schema tag names.
    pub fn to_pretty_xml_string(&self) -> Result<String, XmlError> {
        write::write_document(self, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Case-insensitive comparison on local names.
    pub fn is_named(&self, name: &str) -> bool {
        self.local_name().eq_ignore_ascii_case(local_part(name))
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, keeping the original position of an existing key.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self
            .attributes
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))?;
        Some(self.attributes.remove(index).1)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// All child nodes, including text and comments.
    pub fn nodes(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn push_node(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    /// Inserts a node at `index`, clamped to the end of the child list.
    pub fn insert_node(&mut self, index: usize, node: XmlNode) {
        let index = index.min(self.children.len());
        self.children.insert(index, node);
    }

    pub fn remove_node(&mut self, index: usize) -> Option<XmlNode> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    /// Replaces the node at `index`, returning the previous node.
    pub fn replace_node(&mut self, index: usize, node: XmlNode) -> Option<XmlNode> {
        let slot = self.children.get_mut(index)?;
        Some(std::mem::replace(slot, node))
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    pub fn first_element(&self) -> Option<&Element> {
        self.elements().next()
    }

    pub fn first_element_mut(&mut self) -> Option<&mut Element> {
        self.elements_mut().next()
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.is_named(name))
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements_mut().find(|element| element.is_named(name))
    }

    /// Child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.is_named(name))
    }

    pub fn count_children_named(&self, name: &str) -> usize {
        self.children_named(name).count()
    }

    /// The `n`-th (zero-based) child element with the given name.
    pub fn nth_child_named_mut(&mut self, name: &str, n: usize) -> Option<&mut Element> {
        self.elements_mut()
            .filter(|element| element.is_named(name))
            .nth(n)
    }

    /// Child-node indices of the elements with the given name.
    pub fn positions_named(&self, name: &str) -> Vec<usize> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(index, node)| match node {
                XmlNode::Element(element) if element.is_named(name) => Some(index),
                _ => None,
            })
            .collect()
    }

    /// Element stored at a child-node index.
    pub fn element_at_index(&self, index: usize) -> Option<&Element> {
        self.children.get(index).and_then(XmlNode::as_element)
    }

    pub fn element_at_index_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.children.get_mut(index).and_then(XmlNode::as_element_mut)
    }

    /// Concatenated text of all descendant text and CDATA nodes.
    pub fn text(&self) -> String {
        let mut buffer = String::new();
        self.collect_text(&mut buffer);
        buffer
    }

    /// Replaces all children with one text node (none when `text` is empty).
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    /// Text of the first child element with the given name.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(Element::text)
    }

    /// Texts of all child elements with the given name.
    pub fn children_text(&self, name: &str) -> Vec<String> {
        self.children_named(name).map(Element::text).collect()
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn prepend_child(&mut self, child: Element) {
        self.children.insert(0, XmlNode::Element(child));
    }

    /// Inserts `child` right before the first element named `anchor`, or
    /// appends it when there is no such element. Returns the child-node index.
    pub fn insert_before_named(&mut self, child: Element, anchor: &str) -> usize {
        let index = self
            .positions_named(anchor)
            .first()
            .copied()
            .unwrap_or(self.children.len());
        self.children.insert(index, XmlNode::Element(child));
        index
    }

    /// Inserts `child` at its schema position and returns the child-node index.
    ///
    /// `order` lists sibling names in schema order. The child lands after the
    /// last sibling ranked at or before it; failing that, before the first
    /// ranked sibling; failing that, at the end. Siblings missing from `order`
    /// do not influence the position.
    pub fn insert_ordered(&mut self, child: Element, order: &[&str]) -> usize {
        let index = match rank_of(order, child.local_name()) {
            Some(rank) => self.ordered_position(order, rank),
            None => self.children.len(),
        };
        self.children.insert(index, XmlNode::Element(child));
        index
    }

    /// Sets the text of the first child named `name`, creating the child at
    /// its schema position when missing.
    pub fn set_child_text_ordered(&mut self, name: &str, text: &str, order: &[&str]) {
        match self.child_mut(name) {
            Some(existing) => existing.set_text(text),
            None => {
                self.insert_ordered(Element::with_text(name, text), order);
            }
        }
    }

    /// Removes every child element with the given name; returns how many.
    pub fn remove_children_named(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|node| match node {
            XmlNode::Element(element) => !element.is_named(name),
            _ => true,
        });
        before - self.children.len()
    }

    /// Keeps the first `keep` children named `name` and removes the rest.
    /// Returns the number removed.
    pub fn truncate_children_named(&mut self, name: &str, keep: usize) -> usize {
        let surplus: Vec<usize> = self.positions_named(name).into_iter().skip(keep).collect();
        for index in surplus.iter().rev() {
            self.children.remove(*index);
        }
        surplus.len()
    }

    /// Depth-first (pre-order) search including `self`.
    pub fn find_path(&self, predicate: impl Fn(&Element) -> bool) -> Option<NodePath> {
        let mut trail = Vec::new();
        if self.find_path_from(&predicate, &mut trail) {
            Some(NodePath(trail))
        } else {
            None
        }
    }

    /// Path of the first element carrying `id="<id>"`.
    pub fn find_by_id(&self, id: &str) -> Option<NodePath> {
        self.find_path(|element| element.attribute(names::ID_ATTRIBUTE) == Some(id))
    }

    pub fn element_at(&self, path: &NodePath) -> Option<&Element> {
        let mut current = self;
        for index in path.indices() {
            current = current.element_at_index(*index)?;
        }
        Some(current)
    }

    pub fn element_at_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        let mut current = self;
        for index in path.indices() {
            current = current.element_at_index_mut(*index)?;
        }
        Some(current)
    }

    fn find_path_from(&self, predicate: &dyn Fn(&Element) -> bool, trail: &mut Vec<usize>) -> bool {
        if predicate(self) {
            return true;
        }
        for (index, node) in self.children.iter().enumerate() {
            if let XmlNode::Element(child) = node {
                trail.push(index);
                if child.find_path_from(predicate, trail) {
                    return true;
                }
                trail.pop();
            }
        }
        false
    }

    fn ordered_position(&self, order: &[&str], rank: usize) -> usize {
        let mut after_last_preceding = None;
        let mut first_following = None;
        for (index, node) in self.children.iter().enumerate() {
            let Some(sibling_rank) = node
                .as_element()
                .and_then(|element| rank_of(order, element.local_name()))
            else {
                continue;
            };
            if sibling_rank <= rank {
                after_last_preceding = Some(index + 1);
            } else if first_following.is_none() {
                first_following = Some(index);
            }
        }
        after_last_preceding
            .or(first_following)
            .unwrap_or(self.children.len())
    }

    fn collect_text(&self, buffer: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) | XmlNode::CData(text) => buffer.push_str(text),
                XmlNode::Element(element) => element.collect_text(buffer),
                XmlNode::Comment(_) => {}
            }
        }
    }

    pub(crate) fn drop_formatting_whitespace(&mut self) {
        let has_elements = self
            .children
            .iter()
            .any(|node| matches!(node, XmlNode::Element(_)));
        if has_elements {
            self.children.retain(|node| match node {
                XmlNode::Text(text) => !text.trim().is_empty(),
                _ => true,
            });
        }
        for child in self.elements_mut() {
            child.drop_formatting_whitespace();
        }
    }
}

/// Citations and other opaque subtrees travel through serde as XML text.
impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let xml = self.to_xml_string().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&xml)
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Element::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}

fn local_part(name: &str) -> &str {
    match name.rfind(':') {
        Some(index) => &name[index + 1..],
        None => name,
    }
}

fn rank_of(order: &[&str], name: &str) -> Option<usize> {
    order
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(name))
}
