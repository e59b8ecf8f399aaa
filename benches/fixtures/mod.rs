// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

use std::collections::BTreeMap;

use callflow::model::{MenuOption, Node, NodeId, NodeRepository, NodeType};

pub struct TreeShape {
    pub name: &'static str,
    pub node_count: usize,
    pub fanout: usize,
}

// Case IDs must remain stable so results stay comparable over time.
pub const SHAPES: &[TreeShape] = &[
    TreeShape {
        name: "small",
        node_count: 32,
        fanout: 3,
    },
    TreeShape {
        name: "medium_wide",
        node_count: 400,
        fanout: 9,
    },
    TreeShape {
        name: "large_deep",
        node_count: 2_000,
        fanout: 2,
    },
];

pub fn node_id(idx: usize) -> NodeId {
    NodeId::new(format!("bench_node_{idx:06}")).expect("node id")
}

/// Builds a breadth-first tree where each parent carries up to `fanout` children, menu
/// options pointing at them, and every third node a translation.
pub fn build_tree(shape: &TreeShape) -> NodeRepository {
    let mut nodes: Vec<Node> = Vec::with_capacity(shape.node_count);
    for idx in 0..shape.node_count {
        let (parent, order) = if idx == 0 {
            (None, 0)
        } else {
            let parent = (idx - 1) / shape.fanout;
            (Some(parent), ((idx - 1) % shape.fanout) as i64)
        };
        let node_type = match (idx, idx % 5) {
            (0, _) => NodeType::Greeting,
            (_, 4) => NodeType::Forward,
            _ => NodeType::Question,
        };
        let mut node = Node::new(node_id(idx), parent.map(node_id), node_type, order);
        node.title = format!("Step {idx}");
        node.announcement_text = "Bitte wählen Sie eine der folgenden Optionen aus. ".repeat(idx % 4 + 1);
        if idx % 3 == 0 {
            node.localized_announcement_texts =
                Some(BTreeMap::from([("en".to_owned(), "Please choose an option.".to_owned())]));
        }
        if node_type == NodeType::Forward {
            node.forward_number = Some(format!("+49 30 {idx:06}"));
        }
        nodes.push(node);

        if let Some(parent) = parent {
            let parent_node = &mut nodes[parent];
            parent_node.has_options = true;
            parent_node.options.push(MenuOption::new(
                (order + 1).to_string(),
                format!("Step {idx}"),
                Some(node_id(idx)),
            ));
        }
    }
    nodes.into()
}
