// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use crate::model::Node;

/// Every constant the tree layout depends on.
///
/// Deserializing accepts partial documents; missing fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutMetrics {
    pub node_width: f64,
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
    pub left_offset: f64,
    pub top_offset: f64,
    /// Header plus title row.
    pub base_height: f64,
    pub chars_per_line: usize,
    pub line_height: f64,
    pub translation_padding: f64,
    /// Row of badges (tag, forward number, important flag, options count).
    pub badge_row_height: f64,
    pub option_line_height: f64,
    pub min_node_height: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            node_width: 280.0,
            horizontal_gap: 40.0,
            vertical_gap: 60.0,
            left_offset: 40.0,
            top_offset: 40.0,
            base_height: 72.0,
            chars_per_line: 38,
            line_height: 18.0,
            translation_padding: 8.0,
            badge_row_height: 24.0,
            option_line_height: 20.0,
            min_node_height: 100.0,
        }
    }
}

impl LayoutMetrics {
    /// Number of wrapped lines `text` needs: length over characters-per-line, rounded up.
    pub fn wrapped_lines(&self, text: &str) -> usize {
        let len = text.chars().count();
        if len == 0 {
            return 0;
        }
        len.div_ceil(self.chars_per_line.max(1))
    }

    /// Estimated rendered height of a node card. Depends only on the node's own content.
    pub fn estimate_node_height(&self, node: &Node) -> f64 {
        let mut height = self.base_height;
        height += self.wrapped_lines(&node.announcement_text) as f64 * self.line_height;

        for language in node.active_languages() {
            let text = node.localized_announcement_text(language).unwrap_or("");
            height += self.translation_padding
                + self.line_height
                + self.wrapped_lines(text) as f64 * self.line_height;
        }

        let options = node.active_options();
        let has_badges = node.tag().is_some()
            || node.forward_number().is_some()
            || node.is_important
            || !options.is_empty();
        if has_badges {
            height += self.badge_row_height;
        }
        height += options.len() as f64 * self.option_line_height;

        height.max(self.min_node_height)
    }
}
