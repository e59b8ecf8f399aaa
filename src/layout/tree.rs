// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use smallvec::SmallVec;
use tracing::trace;

use super::metrics::LayoutMetrics;
use crate::model::{Node, NodeId, NodeRepository};

/// Position and size of one node card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Horizontal span reserved for the node and everything below it.
    pub subtree_width: f64,
    pub depth: usize,
}

impl NodePlacement {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Anchor for edges leaving this node (bottom center).
    pub fn bottom_center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.bottom())
    }

    /// Anchor for edges entering this node (top center).
    pub fn top_center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y)
    }
}

/// Overall drawing extent, used to size export canvases.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LayoutBounds {
    pub width: f64,
    pub height: f64,
}

/// Layout of a whole tree: one placement per node reachable from the root.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeLayout {
    placements: BTreeMap<NodeId, NodePlacement>,
    /// Pre-order, siblings by `order`.
    order: Vec<NodeId>,
    bounds: LayoutBounds,
}

impl TreeLayout {
    pub fn placement(&self, node_id: &NodeId) -> Option<&NodePlacement> {
        self.placements.get(node_id)
    }

    pub fn placements(&self) -> &BTreeMap<NodeId, NodePlacement> {
        &self.placements
    }

    /// Node ids in drawing order (pre-order from the root).
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn bounds(&self) -> LayoutBounds {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }
}

type ChildList<'a> = SmallVec<[&'a Node; 8]>;

/// A node reached from the root, stored in pre-order.
struct Slot<'a> {
    node: &'a Node,
    depth: usize,
    height: f64,
    /// Slot indices of the children, in sibling order. Always greater than the own index.
    children: SmallVec<[usize; 8]>,
    subtree_width: f64,
}

struct LayoutPass<'a> {
    metrics: &'a LayoutMetrics,
    slots: Vec<Slot<'a>>,
}

impl<'a> LayoutPass<'a> {
    /// Walks the tree from `root` in pre-order, siblings by `order`. Each id is taken once, so
    /// duplicate ids and parent cycles cannot loop.
    fn walk(nodes: &'a NodeRepository, root: &'a Node, metrics: &'a LayoutMetrics) -> Self {
        let mut children = HashMap::<&NodeId, ChildList<'a>>::new();
        for node in nodes.iter() {
            if let Some(parent_id) = &node.parent_id {
                children.entry(parent_id).or_default().push(node);
            }
        }
        // Stable: ties keep insertion order.
        for list in children.values_mut() {
            list.sort_by_key(|node| node.order);
        }

        let mut slots: Vec<Slot<'a>> = Vec::with_capacity(nodes.len());
        let mut visited = HashSet::with_capacity(nodes.len());
        let mut stack: Vec<(&'a Node, Option<usize>)> = vec![(root, None)];
        while let Some((node, parent)) = stack.pop() {
            if !visited.insert(&node.id) {
                continue;
            }
            let index = slots.len();
            let depth = match parent {
                Some(parent) => {
                    slots[parent].children.push(index);
                    slots[parent].depth + 1
                }
                None => 0,
            };
            slots.push(Slot {
                node,
                depth,
                height: metrics.estimate_node_height(node),
                children: SmallVec::new(),
                subtree_width: metrics.node_width,
            });
            if let Some(list) = children.get(&node.id) {
                stack.extend(list.iter().rev().map(|&child| (child, Some(index))));
            }
        }

        Self { metrics, slots }
    }

    /// Bottom-up: a subtree is as wide as its children side by side, never narrower than a card.
    fn resolve_widths(&mut self) {
        let gap = self.metrics.horizontal_gap;
        for index in (0..self.slots.len()).rev() {
            let slot = &self.slots[index];
            if slot.children.is_empty() {
                continue;
            }
            let mut span = 0.0;
            for (position, &child) in slot.children.iter().enumerate() {
                if position > 0 {
                    span += gap;
                }
                span += self.slots[child].subtree_width;
            }
            self.slots[index].subtree_width = self.metrics.node_width.max(span);
        }
    }

    /// Top-down: each parent hands its children consecutive spans and the row below its own
    /// card, then centers itself over the span it owns.
    fn place(self) -> TreeLayout {
        let metrics = self.metrics;
        let mut origins = vec![(metrics.left_offset, metrics.top_offset); self.slots.len()];
        let mut placements = BTreeMap::new();
        let mut order = Vec::with_capacity(self.slots.len());

        for (index, slot) in self.slots.iter().enumerate() {
            let (start_x, y) = origins[index];
            let child_y = y + slot.height + metrics.vertical_gap;
            let mut cursor = start_x;
            for (position, &child) in slot.children.iter().enumerate() {
                if position > 0 {
                    cursor += metrics.horizontal_gap;
                }
                origins[child] = (cursor, child_y);
                cursor += self.slots[child].subtree_width;
            }

            let x = start_x + ((slot.subtree_width - metrics.node_width) / 2.0).max(0.0);
            trace!(
                node = %slot.node.id,
                x,
                y,
                height = slot.height,
                subtree_width = slot.subtree_width,
                "placed node"
            );
            order.push(slot.node.id.clone());
            placements.insert(
                slot.node.id.clone(),
                NodePlacement {
                    x,
                    y,
                    width: metrics.node_width,
                    height: slot.height,
                    subtree_width: slot.subtree_width,
                    depth: slot.depth,
                },
            );
        }

        let bounds = placements
            .values()
            .fold(LayoutBounds::default(), |acc, placement| LayoutBounds {
                width: acc.width.max(placement.right()),
                height: acc.height.max(placement.bottom()),
            });

        TreeLayout {
            placements,
            order,
            bounds,
        }
    }
}

/// Computes a deterministic, non-overlapping top-down layout of the tree.
///
/// Widths are resolved bottom-up and each parent is centered over its children; vertical
/// position accumulates the actual heights of the ancestors. Without a root the layout is
/// empty. Nodes not reachable from the root are not placed. Both passes iterate over an
/// explicit pre-order list, so depth is bounded only by memory.
pub fn layout_tree(nodes: &NodeRepository, metrics: &LayoutMetrics) -> TreeLayout {
    let Some(root) = nodes.root() else {
        return TreeLayout::default();
    };

    let mut pass = LayoutPass::walk(nodes, root, metrics);
    pass.resolve_widths();
    pass.place()
}
