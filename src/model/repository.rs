// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::ids::NodeId;
use super::node::Node;

/// Flat node collection keyed by id, in insertion order.
///
/// The tree lives entirely in `parent_id` pointers; every traversal is an index lookup over
/// this arena. The repository stores whatever it is given: it does not deduplicate or
/// validate (see `ops::validate_tree`). With duplicate ids, lookups resolve to the first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Node>", into = "Vec<Node>")]
pub struct NodeRepository {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
}

impl PartialEq for NodeRepository {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for NodeRepository {}

impl From<Vec<Node>> for NodeRepository {
    fn from(nodes: Vec<Node>) -> Self {
        Self::replace(nodes)
    }
}

impl From<NodeRepository> for Vec<Node> {
    fn from(repo: NodeRepository) -> Self {
        repo.nodes
    }
}

impl NodeRepository {
    /// Takes a node collection as-is.
    pub fn replace(nodes: Vec<Node>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            index.entry(node.id.clone()).or_insert(position);
        }
        Self { nodes, index }
    }

    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&position| &self.nodes[position])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// The first parentless node in insertion order.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.iter().find(|node| node.is_root())
    }

    /// Children of `parent_id`, sorted by `order`; ties keep insertion order.
    pub fn children(&self, parent_id: &NodeId) -> Vec<&Node> {
        let mut children = self
            .nodes
            .iter()
            .filter(|node| node.parent_id.as_ref() == Some(parent_id))
            .collect::<Vec<_>>();
        children.sort_by_key(|node| node.order);
        children
    }

    pub fn child_count(&self, parent_id: &NodeId) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.parent_id.as_ref() == Some(parent_id))
            .count()
    }

    /// Ids from `id` up to the root, inclusive. Stops early on a cycle or a dangling parent.
    pub fn path_to_root(&self, id: &NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = self.find(id);
        while let Some(node) = cursor {
            if !seen.insert(&node.id) {
                break;
            }
            path.push(node.id.clone());
            cursor = node.parent_id.as_ref().and_then(|parent| self.find(parent));
        }
        path
    }

    /// Every descendant of `id` in post-order (children before parents, siblings by `order`).
    /// `id` itself is not included. Guarded against cyclic input.
    pub fn descendants(&self, id: &NodeId) -> Vec<NodeId> {
        let index = self.child_index();
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(id);

        // `true` marks a node whose children have already been pushed.
        let mut stack = index
            .get(id)
            .into_iter()
            .flatten()
            .rev()
            .map(|&child| (child, false))
            .collect::<Vec<_>>();
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                out.push(node.id.clone());
                continue;
            }
            if !visited.insert(&node.id) {
                continue;
            }
            stack.push((node, true));
            if let Some(children) = index.get(&node.id) {
                stack.extend(children.iter().rev().map(|&child| (child, false)));
            }
        }
        out
    }

    /// Pre-order walk from the root in sibling order. Empty without a root.
    pub fn depth_first(&self) -> Vec<&Node> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        let index = self.child_index();
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut visited = HashSet::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if !visited.insert(&node.id) {
                continue;
            }
            out.push(node);
            if let Some(children) = index.get(&node.id) {
                stack.extend(children.iter().rev().copied());
            }
        }
        out
    }

    /// Parent id to children, each list sorted by `order` with ties in insertion order.
    fn child_index(&self) -> HashMap<&NodeId, Vec<&Node>> {
        let mut index = HashMap::<&NodeId, Vec<&Node>>::new();
        for node in &self.nodes {
            if let Some(parent_id) = &node.parent_id {
                index.entry(parent_id).or_default().push(node);
            }
        }
        for children in index.values_mut() {
            children.sort_by_key(|node| node.order);
        }
        index
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
