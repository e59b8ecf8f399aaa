// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::model::{NodeId, NodeRepository};

/// A broken tree invariant found by [`validate_tree`].
///
/// Dangling option targets are not reported; they are tolerated while editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeViolation {
    NoRoot,
    MultipleRoots { roots: Vec<NodeId> },
    DuplicateId { node_id: NodeId },
    DanglingParent { node_id: NodeId, parent_id: NodeId },
    Cycle { node_id: NodeId },
}

impl fmt::Display for TreeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRoot => f.write_str("no root node"),
            Self::MultipleRoots { roots } => {
                write!(f, "multiple root nodes: ")?;
                for (idx, root) in roots.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{root}")?;
                }
                Ok(())
            }
            Self::DuplicateId { node_id } => write!(f, "duplicate node id {node_id}"),
            Self::DanglingParent { node_id, parent_id } => {
                write!(f, "node {node_id} references missing parent {parent_id}")
            }
            Self::Cycle { node_id } => write!(f, "node {node_id} is part of a parent cycle"),
        }
    }
}

/// Checks every structural invariant and returns all violations, in collection order.
pub fn validate_tree(nodes: &NodeRepository) -> Vec<TreeViolation> {
    let mut violations = Vec::new();

    let roots = nodes
        .iter()
        .filter(|node| node.is_root())
        .map(|node| node.id.clone())
        .collect::<Vec<_>>();
    match roots.len() {
        0 => violations.push(TreeViolation::NoRoot),
        1 => {}
        _ => violations.push(TreeViolation::MultipleRoots { roots }),
    }

    let mut seen = HashSet::new();
    for node in nodes.iter() {
        if !seen.insert(&node.id) {
            violations.push(TreeViolation::DuplicateId {
                node_id: node.id.clone(),
            });
        }
    }

    let cyclic = cyclic_ids(nodes);
    for node in nodes.iter() {
        let Some(parent_id) = &node.parent_id else {
            continue;
        };
        if !nodes.contains(parent_id) {
            violations.push(TreeViolation::DanglingParent {
                node_id: node.id.clone(),
                parent_id: parent_id.clone(),
            });
            continue;
        }
        if cyclic.contains(&node.id) {
            violations.push(TreeViolation::Cycle {
                node_id: node.id.clone(),
            });
        }
    }

    violations
}

/// Ids whose parent chain leads back to themselves. Each id is walked at most once.
fn cyclic_ids(nodes: &NodeRepository) -> HashSet<&NodeId> {
    let mut settled: HashSet<&NodeId> = HashSet::with_capacity(nodes.len());
    let mut cyclic = HashSet::new();

    for node in nodes.iter() {
        let mut path: Vec<&NodeId> = Vec::new();
        let mut on_path: HashMap<&NodeId, usize> = HashMap::new();
        let mut cursor = Some(&node.id);
        while let Some(id) = cursor {
            if settled.contains(id) {
                break;
            }
            if let Some(&position) = on_path.get(id) {
                cyclic.extend(path[position..].iter().copied());
                break;
            }
            on_path.insert(id, path.len());
            path.push(id);
            cursor = nodes.find(id).and_then(|found| found.parent_id.as_ref());
        }
        settled.extend(path);
    }

    cyclic
}
