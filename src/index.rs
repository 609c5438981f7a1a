//! Flattened view of every definition in a model.
//!
//! Each definition becomes one [`IndexedNode`] keyed by its identifier, with
//! its path from the root, its direct children (contained and referenced) and
//! a content hash that changes whenever the node or anything below it does.
//! Identity (id, path) is not part of the hash; renames and moves are
//! detected by comparing ids and urls instead.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::trace;

use crate::syntax::{AssuranceModel, Element, GsnDefinition, RefKind, Span};

/// Status assumed for nodes that do not state one.
pub const DEFAULT_STATUS: &str = "NotReviewed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedNode {
    pub id: String,
    pub kind: RefKind,
    pub label: Option<String>,
    pub summary: String,
    pub info: String,
    pub status: String,
    /// `/`-joined identifiers from the outermost definition down to this one.
    pub url: String,
    /// Identifiers of direct children, sorted.
    pub children: Vec<String>,
    pub span: Span,
}

/// An identifier defined more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub id: String,
    pub first: Span,
    pub again: Span,
}

#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    nodes: Vec<IndexedNode>,
    by_id: HashMap<String, usize>,
    duplicates: Vec<Duplicate>,
    hashes: HashMap<String, String>,
}

impl NodeIndex {
    pub fn build(model: &AssuranceModel) -> Self {
        let mut index = NodeIndex::default();
        for definition in &model.definitions {
            index.collect(definition, "");
        }
        index.hash_all();
        index
    }

    pub fn get(&self, id: &str) -> Option<&IndexedNode> {
        self.by_id.get(id).map(|&slot| &self.nodes[slot])
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }

    /// Hex SHA-256 of the node's content and, recursively, its children's.
    pub fn content_hash(&self, id: &str) -> Option<&str> {
        self.hashes.get(id).map(String::as_str)
    }

    fn collect(&mut self, definition: &GsnDefinition, parent_url: &str) {
        let Some(id) = definition.id() else {
            trace!(span = ?definition.span(), "definition without identifier; not indexed");
            return;
        };
        let url = format!("{parent_url}/{id}");

        if let Some(&first) = self.by_id.get(id) {
            self.duplicates.push(Duplicate {
                id: id.to_string(),
                first: self.nodes[first].span,
                again: definition.span(),
            });
        } else {
            self.by_id.insert(id.to_string(), self.nodes.len());
            self.nodes.push(indexed(definition, id, &url));
        }

        for element in definition
            .supported_by()
            .iter()
            .chain(definition.in_context_of())
        {
            if let Element::Definition(child) = element {
                self.collect(child, &url);
            }
        }
    }

    fn hash_all(&mut self) {
        let mut hashes = HashMap::new();
        let mut visiting = HashSet::new();
        for node in &self.nodes {
            self.hash_node(&node.id, &mut hashes, &mut visiting);
        }
        self.hashes = hashes;
    }

    /// `None` when `id` is unknown or already on the current path (a cycle
    /// through references).
    fn hash_node(
        &self,
        id: &str,
        hashes: &mut HashMap<String, String>,
        visiting: &mut HashSet<String>,
    ) -> Option<String> {
        if let Some(hash) = hashes.get(id) {
            return Some(hash.clone());
        }
        let node = self.get(id)?;
        if !visiting.insert(id.to_string()) {
            trace!(id, "reference cycle; child left out of hash");
            return None;
        }

        let children: Vec<String> = node
            .children
            .iter()
            .filter_map(|child| self.hash_node(child, hashes, visiting))
            .collect();
        let labels: Vec<&str> = node.label.iter().map(String::as_str).collect();
        let record = json!({
            "info": node.info,
            "summary": node.summary,
            "status": node.status,
            "labels": labels,
            "children": children,
        });
        let hash = format!("{:x}", Sha256::digest(record.to_string().as_bytes()));

        visiting.remove(id);
        hashes.insert(id.to_string(), hash.clone());
        Some(hash)
    }
}

fn indexed(definition: &GsnDefinition, id: &str, url: &str) -> IndexedNode {
    let base = definition.base();
    let body = |token: Option<&crate::syntax::Token>| {
        token.map(|token| token.text.clone()).unwrap_or_default()
    };

    let mut children: Vec<String> = definition
        .supported_by()
        .iter()
        .chain(definition.in_context_of())
        .filter_map(|element| match element {
            Element::Definition(child) => child.id().map(str::to_string),
            Element::Ref(node_ref) if node_ref.uri.is_none() => {
                node_ref.target.as_ref().map(|target| target.text.clone())
            }
            Element::Ref(_) | Element::Unrecognized(_) => None,
        })
        .collect();
    children.sort();

    IndexedNode {
        id: id.to_string(),
        kind: definition.kind(),
        label: base.label.as_ref().map(|label| label.text.clone()),
        summary: body(base.summary.as_ref().and_then(|s| s.body.as_ref())),
        info: body(base.description.as_ref().and_then(|d| d.body.as_ref())),
        status: definition
            .details()
            .and_then(|details| details.get("status"))
            .unwrap_or(DEFAULT_STATUS)
            .to_string(),
        url: url.to_string(),
        children,
        span: definition.span(),
    }
}
