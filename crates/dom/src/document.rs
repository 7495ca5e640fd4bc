use crate::types::{Id, Node, NodeId};
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomError {
    MissingNode(Id),
    WrongNodeKind(Id),
    InvalidParent(Id),
    InvalidSibling { parent: Id, sibling: Id },
    CycleDetected { parent: Id, child: Id },
    Detached(Id),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::MissingNode(id) => write!(f, "node {} does not exist", id.0),
            DomError::WrongNodeKind(id) => write!(f, "node {} has the wrong kind", id.0),
            DomError::InvalidParent(id) => write!(f, "node {} cannot be used as a parent", id.0),
            DomError::InvalidSibling { parent, sibling } => {
                write!(f, "node {} is not a child of node {}", sibling.0, parent.0)
            }
            DomError::CycleDetected { parent, child } => write!(
                f,
                "inserting node {} under node {} would create a cycle",
                child.0, parent.0
            ),
            DomError::Detached(id) => write!(f, "node {} is not attached to a parent", id.0),
        }
    }
}

impl std::error::Error for DomError {}

/// Mutable document tree.
///
/// Nodes live in an arena addressed by [`Id`]. Removing a subtree frees its
/// slots for later nodes, but ids are never reused within one document.
pub struct Document {
    nodes: Vec<Option<NodeRecord>>,
    free: Vec<usize>,
    live: HashMap<Id, usize>,
    next_id: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            live: HashMap::new(),
            next_id: 0,
        };
        let root = doc.alloc(NodeKind::Document);
        debug_assert_eq!(root, Id::DOCUMENT);
        doc
    }

    pub fn root(&self) -> Id {
        Id::DOCUMENT
    }

    pub fn contains(&self, id: Id) -> bool {
        self.live.contains_key(&id)
    }

    pub fn create_element(&mut self, name: &str) -> Id {
        self.alloc(NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
            style: Vec::new(),
        })
    }

    pub fn create_element_with<K, V>(
        &mut self,
        name: &str,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Id
    where
        K: Into<String>,
        V: Into<String>,
    {
        let attributes = attributes
            .into_iter()
            .map(|(k, v)| (k.into().to_ascii_lowercase(), Some(v.into())))
            .collect();
        self.alloc(NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attributes,
            style: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> Id {
        self.alloc(NodeKind::Text { text: text.into() })
    }

    fn alloc(&mut self, kind: NodeKind) -> Id {
        let id = Id(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let record = NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(record);
                index
            }
            None => {
                self.nodes.push(Some(record));
                self.nodes.len() - 1
            }
        };
        self.live.insert(id, index);
        id
    }

    fn record(&self, id: Id) -> Result<&NodeRecord, DomError> {
        self.live
            .get(&id)
            .and_then(|&index| self.nodes.get(index)?.as_ref())
            .ok_or(DomError::MissingNode(id))
    }

    fn record_mut(&mut self, id: Id) -> Result<&mut NodeRecord, DomError> {
        let index = *self.live.get(&id).ok_or(DomError::MissingNode(id))?;
        self.nodes
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or(DomError::MissingNode(id))
    }

    // ---------------------------------------------------------------------
    // Tree navigation
    // ---------------------------------------------------------------------

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.record(id).ok().and_then(|r| r.parent)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.record(id).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    pub fn next_sibling(&self, id: Id) -> Option<Id> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|k| *k == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Walks from `id` up to the root, starting with `id` itself.
    pub fn ancestors(&self, id: Id) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.contains(id).then_some(id),
        }
    }

    /// Returns `true` if the node is reachable from the document root.
    pub fn is_connected(&self, id: Id) -> bool {
        self.ancestors(id).any(|a| a == Id::DOCUMENT)
    }

    /// All nodes below `id` in document (pre-)order, excluding `id`.
    pub fn descendants(&self, id: Id) -> Vec<Id> {
        let mut out = Vec::new();
        let mut stack: Vec<Id> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    // ---------------------------------------------------------------------
    // Tree mutation
    // ---------------------------------------------------------------------

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that is already attached elsewhere is moved.
    pub fn append_child(&mut self, parent: Id, child: Id) -> Result<(), DomError> {
        self.ensure_insertable(parent, child)?;
        self.unlink(child)?;
        self.record_mut(parent)?.children.push(child);
        self.record_mut(child)?.parent = Some(parent);
        Ok(())
    }

    pub fn insert_before(&mut self, parent: Id, child: Id, before: Id) -> Result<(), DomError> {
        if child == before {
            return Ok(());
        }
        self.ensure_insertable(parent, child)?;
        if self.parent(before) != Some(parent) {
            return Err(DomError::InvalidSibling {
                parent,
                sibling: before,
            });
        }
        self.unlink(child)?;
        let siblings = &mut self.record_mut(parent)?.children;
        let pos = siblings
            .iter()
            .position(|k| *k == before)
            .ok_or(DomError::InvalidSibling {
                parent,
                sibling: before,
            })?;
        siblings.insert(pos, child);
        self.record_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Insert `child` directly after `reference` under the same parent.
    pub fn insert_after(&mut self, reference: Id, child: Id) -> Result<(), DomError> {
        let parent = self.parent(reference).ok_or(DomError::Detached(reference))?;
        match self.next_sibling(reference) {
            Some(next) if next != child => self.insert_before(parent, child, next),
            Some(_) => Ok(()),
            None => self.append_child(parent, child),
        }
    }

    /// Put `wrapper` where `target` is and move `target` inside it.
    pub fn wrap(&mut self, target: Id, wrapper: Id) -> Result<(), DomError> {
        let parent = self.parent(target).ok_or(DomError::Detached(target))?;
        if !self.is_element(wrapper) {
            return Err(DomError::WrongNodeKind(wrapper));
        }
        self.insert_before(parent, wrapper, target)?;
        self.append_child(wrapper, target)?;
        log::trace!(target: "dom", "wrapped {} in {}", target.0, wrapper.0);
        Ok(())
    }

    /// Replace the parent of `target` with the parent's children and drop it.
    ///
    /// Returns the id of the removed parent.
    pub fn unwrap(&mut self, target: Id) -> Result<Id, DomError> {
        let parent = self.parent(target).ok_or(DomError::Detached(target))?;
        if !self.is_element(parent) {
            return Err(DomError::InvalidParent(parent));
        }
        let grandparent = self.parent(parent).ok_or(DomError::Detached(parent))?;
        let children = self.children(parent).to_vec();
        for child in children {
            self.insert_before(grandparent, child, parent)?;
        }
        self.remove(parent)?;
        log::trace!(target: "dom", "unwrapped {} from {}", target.0, parent.0);
        Ok(parent)
    }

    /// Detach `id` from its parent, keeping the subtree alive for reinsertion.
    pub fn detach(&mut self, id: Id) -> Result<(), DomError> {
        if id == Id::DOCUMENT {
            return Err(DomError::WrongNodeKind(id));
        }
        self.unlink(id)
    }

    /// Detach `id` and drop it together with its whole subtree.
    pub fn remove(&mut self, id: Id) -> Result<(), DomError> {
        self.detach(id)?;
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for key in doomed {
            if let Some(index) = self.live.remove(&key) {
                self.nodes[index] = None;
                self.free.push(index);
            }
        }
        Ok(())
    }

    fn unlink(&mut self, id: Id) -> Result<(), DomError> {
        let Some(parent) = self.record_mut(id)?.parent.take() else {
            return Ok(());
        };
        if let Ok(record) = self.record_mut(parent) {
            record.children.retain(|k| *k != id);
        }
        Ok(())
    }

    fn ensure_insertable(&self, parent: Id, child: Id) -> Result<(), DomError> {
        let parent_record = self.record(parent)?;
        if !parent_record.allows_children() {
            return Err(DomError::InvalidParent(parent));
        }
        if child == Id::DOCUMENT {
            return Err(DomError::WrongNodeKind(child));
        }
        self.record(child)?;
        if self.ancestors(parent).any(|a| a == child) {
            return Err(DomError::CycleDetected { parent, child });
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Element data
    // ---------------------------------------------------------------------

    pub fn is_element(&self, id: Id) -> bool {
        matches!(
            self.record(id).map(|r| &r.kind),
            Ok(NodeKind::Element { .. })
        )
    }

    /// Lowercase tag name, or `None` for non-elements.
    pub fn tag_name(&self, id: Id) -> Option<&str> {
        match &self.record(id).ok()?.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn attributes(&self, id: Id) -> &[(String, Option<String>)] {
        match self.record(id).map(|r| &r.kind) {
            Ok(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    pub fn attr(&self, id: Id, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn has_class(&self, id: Id, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    // ---------------------------------------------------------------------
    // Inline style
    // ---------------------------------------------------------------------

    /// Inline declarations in insertion order. Property names are lowercase.
    pub fn inline_style(&self, id: Id) -> &[(String, String)] {
        match self.record(id).map(|r| &r.kind) {
            Ok(NodeKind::Element { style, .. }) => style,
            _ => &[],
        }
    }

    pub fn style(&self, id: Id, property: &str) -> Option<&str> {
        self.inline_style(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(property))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_style(&mut self, id: Id, property: &str, value: &str) -> Result<(), DomError> {
        let style = self.element_style_mut(id)?;
        let value = value.trim().to_string();
        match style
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(property))
        {
            Some((_, v)) => *v = value,
            None => style.push((property.to_ascii_lowercase(), value)),
        }
        Ok(())
    }

    /// Returns `true` if a declaration was removed.
    pub fn remove_style(&mut self, id: Id, property: &str) -> Result<bool, DomError> {
        let style = self.element_style_mut(id)?;
        let before = style.len();
        style.retain(|(k, _)| !k.eq_ignore_ascii_case(property));
        Ok(style.len() != before)
    }

    fn element_style_mut(&mut self, id: Id) -> Result<&mut Vec<(String, String)>, DomError> {
        match &mut self.record_mut(id)?.kind {
            NodeKind::Element { style, .. } => Ok(style),
            _ => Err(DomError::WrongNodeKind(id)),
        }
    }

    // ---------------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------------

    pub fn text_content(&self, id: Id) -> String {
        let mut out = String::new();
        if let Ok(NodeKind::Text { text }) = self.record(id).map(|r| &r.kind) {
            out.push_str(text);
            return out;
        }
        for child in self.descendants(id) {
            if let Ok(NodeKind::Text { text }) = self.record(child).map(|r| &r.kind) {
                out.push_str(text);
            }
        }
        out
    }

    // ---------------------------------------------------------------------
    // Snapshots
    // ---------------------------------------------------------------------

    pub fn materialize(&self, id: Id) -> Result<Node, DomError> {
        let record = self.record(id)?;
        let children = record
            .children
            .iter()
            .map(|child| self.materialize(*child))
            .collect::<Result<Vec<_>, _>>()?;
        let node = match &record.kind {
            NodeKind::Document => Node::Document { id, children },
            NodeKind::Element {
                name,
                attributes,
                style,
            } => Node::Element {
                id,
                name: name.clone(),
                attributes: attributes.clone(),
                style: style.clone(),
                children,
            },
            NodeKind::Text { text } => Node::Text {
                id,
                text: text.clone(),
            },
        };
        Ok(node)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<Id>,
}

impl Iterator for Ancestors<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

struct NodeRecord {
    kind: NodeKind,
    parent: Option<Id>,
    children: Vec<Id>,
}

impl NodeRecord {
    fn allows_children(&self) -> bool {
        matches!(self.kind, NodeKind::Document | NodeKind::Element { .. })
    }
}

enum NodeKind {
    Document,
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        style: Vec<(String, String)>,
    },
    Text {
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_form() -> (Document, Id, Id, Id) {
        let mut doc = Document::new();
        let form = doc.create_element("form");
        let a = doc.create_element_with("input", [("type", "text")]);
        let b = doc.create_element("textarea");
        doc.append_child(doc.root(), form).unwrap();
        doc.append_child(form, a).unwrap();
        doc.append_child(form, b).unwrap();
        (doc, form, a, b)
    }

    #[test]
    fn insert_after_places_node_between_siblings() {
        let (mut doc, form, a, b) = doc_with_form();
        let button = doc.create_element("a");
        doc.insert_after(a, button).unwrap();
        assert_eq!(doc.children(form), &[a, button, b]);

        let tail = doc.create_element("span");
        doc.insert_after(b, tail).unwrap();
        assert_eq!(doc.children(form), &[a, button, b, tail]);
    }

    #[test]
    fn wrap_then_unwrap_restores_original_position() {
        let (mut doc, form, a, b) = doc_with_form();
        let wrapper = doc.create_element("div");
        doc.wrap(a, wrapper).unwrap();
        assert_eq!(doc.children(form), &[wrapper, b]);
        assert_eq!(doc.children(wrapper), &[a]);
        assert_eq!(doc.parent(a), Some(wrapper));

        let removed = doc.unwrap(a).unwrap();
        assert_eq!(removed, wrapper);
        assert_eq!(doc.children(form), &[a, b]);
        assert!(!doc.contains(wrapper));
    }

    #[test]
    fn unwrap_moves_every_child_out() {
        let (mut doc, form, a, b) = doc_with_form();
        let wrapper = doc.create_element("div");
        doc.wrap(a, wrapper).unwrap();
        let extra = doc.create_element("a");
        doc.insert_after(a, extra).unwrap();

        doc.unwrap(a).unwrap();
        assert_eq!(doc.children(form), &[a, extra, b]);
    }

    #[test]
    fn wrap_requires_attached_target() {
        let mut doc = Document::new();
        let loose = doc.create_element("input");
        let wrapper = doc.create_element("div");
        assert_eq!(doc.wrap(loose, wrapper), Err(DomError::Detached(loose)));
    }

    #[test]
    fn unwrap_refuses_document_parent() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.append_child(doc.root(), input).unwrap();
        assert_eq!(doc.unwrap(input), Err(DomError::InvalidParent(Id::DOCUMENT)));
    }

    #[test]
    fn append_rejects_cycles() {
        let (mut doc, form, a, _) = doc_with_form();
        let inner = doc.create_element("div");
        doc.append_child(form, inner).unwrap();
        assert_eq!(
            doc.append_child(inner, form),
            Err(DomError::CycleDetected {
                parent: inner,
                child: form
            })
        );
        assert_eq!(doc.append_child(a, inner), Ok(()));
    }

    #[test]
    fn text_nodes_cannot_have_children() {
        let mut doc = Document::new();
        let t = doc.create_text("x");
        let e = doc.create_element("span");
        assert_eq!(doc.append_child(t, e), Err(DomError::InvalidParent(t)));
    }

    #[test]
    fn remove_drops_whole_subtree() {
        let (mut doc, form, a, b) = doc_with_form();
        doc.remove(form).unwrap();
        assert!(!doc.contains(form));
        assert!(!doc.contains(a));
        assert!(!doc.contains(b));
        assert!(doc.children(doc.root()).is_empty());
        assert_eq!(doc.remove(form), Err(DomError::MissingNode(form)));
    }

    #[test]
    fn removed_slots_are_reused_without_reusing_ids() {
        let (mut doc, form, _, _) = doc_with_form();
        let slots = doc.nodes.len();
        for _ in 0..5 {
            let wrapper = doc.create_element("div");
            let button = doc.create_element("a");
            let label = doc.create_text("x");
            doc.append_child(form, wrapper).unwrap();
            doc.append_child(wrapper, button).unwrap();
            doc.append_child(button, label).unwrap();
            doc.remove(wrapper).unwrap();
        }
        assert_eq!(doc.nodes.len(), slots + 3);

        let fresh = doc.create_element("span");
        assert!(fresh.0 as usize >= slots + 15);
        assert_eq!(doc.tag_name(fresh), Some("span"));
        assert_eq!(doc.children(form).len(), 2);
    }

    #[test]
    fn descendants_are_in_document_order() {
        let (mut doc, form, a, b) = doc_with_form();
        let label = doc.create_text("hi");
        doc.append_child(b, label).unwrap();
        assert_eq!(doc.descendants(doc.root()), vec![form, a, b, label]);
    }

    #[test]
    fn connected_tracks_attachment() {
        let (mut doc, _, a, _) = doc_with_form();
        assert!(doc.is_connected(a));
        doc.detach(a).unwrap();
        assert!(!doc.is_connected(a));
        assert!(doc.contains(a));
    }

    #[test]
    fn attributes_are_case_insensitive() {
        let mut doc = Document::new();
        let e = doc.create_element_with("INPUT", [("Type", "Password")]);
        assert_eq!(doc.tag_name(e), Some("input"));
        assert_eq!(doc.attr(e, "type"), Some("Password"));
        assert_eq!(doc.attr(e, "TYPE"), Some("Password"));
        assert_eq!(doc.attr(e, "value"), None);
    }

    #[test]
    fn has_class_matches_whole_tokens() {
        let mut doc = Document::new();
        let e = doc.create_element_with("div", [("class", "a  bb")]);
        assert!(doc.has_class(e, "bb"));
        assert!(!doc.has_class(e, "b"));
    }

    #[test]
    fn inline_style_set_and_remove() {
        let mut doc = Document::new();
        let e = doc.create_element("a");
        doc.set_style(e, "display", "none").unwrap();
        doc.set_style(e, "top", "3px").unwrap();
        doc.set_style(e, "Display", "block").unwrap();
        assert_eq!(doc.style(e, "display"), Some("block"));
        assert_eq!(doc.inline_style(e).len(), 2);
        assert!(doc.remove_style(e, "display").unwrap());
        assert!(!doc.remove_style(e, "display").unwrap());
        assert_eq!(doc.style(e, "display"), None);

        let t = doc.create_text("x");
        assert_eq!(doc.set_style(t, "top", "0"), Err(DomError::WrongNodeKind(t)));
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let mut doc = Document::new();
        let area = doc.create_element("textarea");
        let span = doc.create_element("span");
        let first = doc.create_text("hel");
        let second = doc.create_text("lo");
        doc.append_child(area, first).unwrap();
        doc.append_child(area, span).unwrap();
        doc.append_child(span, second).unwrap();
        assert_eq!(doc.text_content(area), "hello");
        assert_eq!(doc.text_content(second), "lo");
    }
}
