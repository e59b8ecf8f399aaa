// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural mutations of the dialog tree.
//!
//! Every operation validates first and then builds a complete new `NodeRepository`; the input
//! snapshot is never touched. A failed operation therefore leaves nothing half-applied.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::model::{MenuOption, Node, NodeId, NodeRepository, NodeType};

mod validate;

pub use validate::{validate_tree, TreeViolation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOperationReason {
    DeleteRoot,
    DeleteMissing,
    InsertBeforeRoot,
}

impl fmt::Display for InvalidOperationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteRoot => f.write_str("the root node cannot be deleted"),
            Self::DeleteMissing => f.write_str("the node does not exist"),
            Self::InsertBeforeRoot => f.write_str("nothing can be inserted before the root node"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node not found (id={node_id})")]
    NotFound { node_id: NodeId },
    #[error("invalid operation on node {node_id}: {reason}")]
    InvalidOperation {
        node_id: NodeId,
        reason: InvalidOperationReason,
    },
}

/// Result of an operation that creates a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inserted {
    pub node: Node,
    pub nodes: NodeRepository,
}

/// Result of `delete_subtree`. `removed` is in post-order and ends with the subtree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub removed: Vec<NodeId>,
    pub former_parent_id: Option<NodeId>,
    pub nodes: NodeRepository,
}

/// Appends a new `question` node as the last child of `parent_id`.
#[instrument(level = "debug", skip_all, fields(parent = %parent_id))]
pub fn add_child(nodes: &NodeRepository, parent_id: &NodeId) -> Result<Inserted, TreeError> {
    add_child_with_id(nodes, parent_id, NodeId::generate())
}

pub(crate) fn add_child_with_id(
    nodes: &NodeRepository,
    parent_id: &NodeId,
    new_id: NodeId,
) -> Result<Inserted, TreeError> {
    if !nodes.contains(parent_id) {
        return Err(TreeError::NotFound {
            node_id: parent_id.clone(),
        });
    }

    let order = nodes.child_count(parent_id) as i64;
    let node = Node::new(new_id, Some(parent_id.clone()), NodeType::Question, order);

    let mut next = nodes.as_slice().to_vec();
    next.push(node.clone());
    debug!(node = %node.id, order, "added child");

    Ok(Inserted {
        node,
        nodes: NodeRepository::replace(next),
    })
}

/// Splices a new node between `target_id` and its parent.
///
/// The new node takes over the target's parent and order, the target becomes its only child,
/// the former parent's options that pointed at the target are redirected to the new node, and
/// the new node gets a single option pointing at the target.
#[instrument(level = "debug", skip_all, fields(target = %target_id))]
pub fn insert_before(nodes: &NodeRepository, target_id: &NodeId) -> Result<Inserted, TreeError> {
    insert_before_with_id(nodes, target_id, NodeId::generate())
}

pub(crate) fn insert_before_with_id(
    nodes: &NodeRepository,
    target_id: &NodeId,
    new_id: NodeId,
) -> Result<Inserted, TreeError> {
    let Some(target) = nodes.find(target_id) else {
        return Err(TreeError::NotFound {
            node_id: target_id.clone(),
        });
    };
    let Some(parent_id) = target.parent_id.clone() else {
        return Err(TreeError::InvalidOperation {
            node_id: target_id.clone(),
            reason: InvalidOperationReason::InsertBeforeRoot,
        });
    };

    let mut inserted = Node::new(new_id, Some(parent_id.clone()), NodeType::Question, target.order);
    inserted.has_options = true;
    inserted.options = vec![MenuOption::new(
        "1",
        target.title.clone(),
        Some(target_id.clone()),
    )];

    // With duplicate ids only the first entry is the target or the parent, as in `find`.
    let mut target_pending = true;
    let mut parent_pending = true;
    let mut next = Vec::with_capacity(nodes.len() + 1);
    let mut redirected = 0usize;
    for node in nodes.iter() {
        let mut node = node.clone();
        if target_pending && &node.id == target_id {
            target_pending = false;
            node.parent_id = Some(inserted.id.clone());
            node.order = 0;
        } else if parent_pending && node.id == parent_id {
            parent_pending = false;
            for option in node.options.iter_mut().filter(|o| o.targets(target_id)) {
                option.target_node_id = Some(inserted.id.clone());
                redirected += 1;
            }
        }
        next.push(node);
    }
    next.push(inserted.clone());
    debug!(node = %inserted.id, parent = %parent_id, redirected, "inserted before");

    Ok(Inserted {
        node: inserted,
        nodes: NodeRepository::replace(next),
    })
}

/// Removes `node_id` and all of its descendants.
///
/// Options on the former parent that targeted `node_id` are left alone; callers follow up
/// with [`strip_option_targets`] (the editor does this in `Editor::delete_node`).
#[instrument(level = "debug", skip_all, fields(node = %node_id))]
pub fn delete_subtree(nodes: &NodeRepository, node_id: &NodeId) -> Result<Removed, TreeError> {
    let Some(node) = nodes.find(node_id) else {
        return Err(TreeError::InvalidOperation {
            node_id: node_id.clone(),
            reason: InvalidOperationReason::DeleteMissing,
        });
    };
    if node.is_root() {
        return Err(TreeError::InvalidOperation {
            node_id: node_id.clone(),
            reason: InvalidOperationReason::DeleteRoot,
        });
    }

    let mut removed = nodes.descendants(node_id);
    removed.push(node_id.clone());
    let doomed = removed.iter().collect::<HashSet<_>>();

    let next = nodes
        .iter()
        .filter(|n| !doomed.contains(&n.id))
        .cloned()
        .collect::<Vec<_>>();
    debug!(count = removed.len(), "deleted subtree");

    Ok(Removed {
        former_parent_id: node.parent_id.clone(),
        removed,
        nodes: NodeRepository::replace(next),
    })
}

/// Replaces a node's content in place. The stored `parent_id` is kept so an update can never
/// change the shape of the tree.
#[instrument(level = "debug", skip_all, fields(node = %node.id))]
pub fn update_node(nodes: &NodeRepository, node: Node) -> Result<NodeRepository, TreeError> {
    let Some(existing) = nodes.find(&node.id) else {
        return Err(TreeError::NotFound { node_id: node.id });
    };
    let parent_id = existing.parent_id.clone();

    let mut replacement = Some(node);
    let next = nodes
        .iter()
        .map(|current| match replacement.take_if(|r| r.id == current.id) {
            Some(mut updated) => {
                updated.parent_id = parent_id.clone();
                updated
            }
            None => current.clone(),
        })
        .collect::<Vec<_>>();

    Ok(NodeRepository::replace(next))
}

/// Drops every option of `owner_id` that targets `target_id`. A missing owner is a no-op.
/// With duplicate ids only the first entry is touched.
pub fn strip_option_targets(
    nodes: &NodeRepository,
    owner_id: &NodeId,
    target_id: &NodeId,
) -> NodeRepository {
    let mut owner_pending = true;
    let next = nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            if owner_pending && &node.id == owner_id {
                owner_pending = false;
                node.options.retain(|option| !option.targets(target_id));
            }
            node
        })
        .collect::<Vec<_>>();
    NodeRepository::replace(next)
}

#[cfg(test)]
mod tests;
