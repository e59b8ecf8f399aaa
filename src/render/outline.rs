// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use super::text::{display_title, truncate_with_ellipsis};
use crate::layout::TreeLayout;
use crate::model::{Configuration, MenuOption, Node, NodeType};

const TITLE_MAX_LEN: usize = 48;
const OPTION_LABEL_MAX_LEN: usize = 32;

fn type_label(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Greeting => "greeting",
        NodeType::Question => "question",
        NodeType::Action => "action",
        NodeType::End => "end",
        NodeType::Forward => "forward",
    }
}

/// Renders the configuration as an indented text outline annotated with layout positions.
///
/// Nodes appear in layout order (pre-order, siblings by `order`). Option targets that do not
/// resolve are shown as such rather than reported.
pub fn render_outline(config: &Configuration, layout: &TreeLayout) -> String {
    let mut out = String::new();
    let bounds = layout.bounds();
    let _ = writeln!(out, "{}", display_title(&config.praxis_name, TITLE_MAX_LEN));
    let _ = writeln!(
        out,
        "{} nodes, canvas {} x {}",
        config.nodes.len(),
        bounds.width,
        bounds.height
    );

    for node_id in layout.order() {
        let (Some(node), Some(placement)) = (config.nodes.find(node_id), layout.placement(node_id))
        else {
            continue;
        };
        let indent = "  ".repeat(placement.depth);
        let _ = write!(
            out,
            "{indent}- [{}] {}",
            type_label(node.node_type),
            display_title(&node.title, TITLE_MAX_LEN)
        );
        write_badges(&mut out, node);
        let _ = writeln!(
            out,
            "  @ ({}, {}) {}x{}",
            placement.x, placement.y, placement.width, placement.height
        );

        for option in node.active_options() {
            let _ = writeln!(out, "{indent}    {}", option_line(config, option));
        }
    }

    while out.ends_with('\n') {
        out.pop();
    }
    out
}

fn write_badges(out: &mut String, node: &Node) {
    if node.is_important {
        out.push_str(" !");
    }
    if let Some(tag) = node.tag() {
        let _ = write!(out, " #{tag}");
    }
    if let Some(number) = node.forward_number() {
        let _ = write!(out, " -> {number}");
    }
    let languages = node.active_languages();
    if !languages.is_empty() {
        let _ = write!(out, " [{}]", languages.join(","));
    }
}

fn option_line(config: &Configuration, option: &MenuOption) -> String {
    let key = if option.key.is_empty() { "*" } else { option.key.as_str() };
    let label = truncate_with_ellipsis(option.label.trim(), OPTION_LABEL_MAX_LEN);
    let target = match &option.target_node_id {
        None => "(unset)".to_owned(),
        Some(id) => match config.nodes.find(id) {
            Some(target) => display_title(&target.title, TITLE_MAX_LEN),
            None => "(unresolved)".to_owned(),
        },
    };
    match &option.ai_keywords {
        Some(keywords) if !keywords.is_empty() => {
            format!("{key} {label:?} -> {target} ({})", keywords.join(", "))
        }
        _ => format!("{key} {label:?} -> {target}"),
    }
}
