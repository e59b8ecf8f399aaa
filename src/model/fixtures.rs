// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;
use super::node::{MenuOption, Node, NodeType};
use super::repository::NodeRepository;

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn node(id: &str, parent: Option<&str>, order: i64) -> Node {
    Node::new(nid(id), parent.map(nid), NodeType::Question, order)
}

/// ```text
/// root (greeting)
/// ├── menu (question: 1 -> sales, 2 -> support)
/// │   ├── sales (forward)
/// │   └── support (question)
/// │       └── support-hours (action)
/// └── goodbye (end)
/// ```
pub(crate) fn sample_tree() -> NodeRepository {
    let mut root = node("root", None, 0);
    root.node_type = NodeType::Greeting;
    root.title = "Welcome".to_owned();

    let mut menu = node("menu", Some("root"), 0);
    menu.title = "Main menu".to_owned();
    menu.has_options = true;
    menu.options = vec![
        MenuOption::new("1", "Sales", Some(nid("sales"))),
        MenuOption::new("2", "Support", Some(nid("support"))),
    ];

    let mut sales = node("sales", Some("menu"), 0);
    sales.node_type = NodeType::Forward;
    sales.title = "Sales".to_owned();
    sales.forward_number = Some("+49 30 123456".to_owned());

    let mut support = node("support", Some("menu"), 1);
    support.title = "Support".to_owned();

    let mut hours = node("support-hours", Some("support"), 0);
    hours.node_type = NodeType::Action;
    hours.title = "Opening hours".to_owned();

    let mut goodbye = node("goodbye", Some("root"), 1);
    goodbye.node_type = NodeType::End;
    goodbye.title = "Goodbye".to_owned();

    NodeRepository::replace(vec![root, menu, sales, support, hours, goodbye])
}

/// `root <- n1 <- n2 <- ... <- n{len-1}`: a single branch `len` nodes deep.
pub(crate) fn chain(len: usize) -> NodeRepository {
    let nodes = (0..len)
        .map(|idx| {
            let parent = (idx > 0).then(|| nid(&format!("n{}", idx - 1)));
            let mut node = Node::new(nid(&format!("n{idx}")), parent, NodeType::Question, 0);
            if idx == 0 {
                node.node_type = NodeType::Greeting;
            }
            node
        })
        .collect::<Vec<_>>();
    NodeRepository::replace(nodes)
}
