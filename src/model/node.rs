// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{empty_as_none, NodeId};

/// The kind of dialog step a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Greeting,
    #[default]
    Question,
    Action,
    End,
    Forward,
}

/// How a node's announcement is played back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AnnouncementFormat {
    #[default]
    SyntheticText,
    AudioFile,
}

/// How callers pick an option. Only meaningful while `has_options` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Keypress,
    Keyword,
    Both,
}

/// One selectable branch of a node's menu.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuOption {
    /// Dial-pad digit, or empty for keyword-only options.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_keywords: Option<Vec<String>>,
    /// Expected to reference a child of the owning node. Not enforced.
    #[serde(default, with = "empty_as_none")]
    #[schemars(with = "String")]
    pub target_node_id: Option<NodeId>,
}

impl MenuOption {
    pub fn new(key: impl Into<String>, label: impl Into<String>, target: Option<NodeId>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            ai_keywords: None,
            target_node_id: target,
        }
    }

    pub fn targets(&self, node_id: &NodeId) -> bool {
        self.target_node_id.as_ref() == Some(node_id)
    }
}

/// One step of the dialog tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[schemars(with = "String")]
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub parent_id: Option<NodeId>,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub announcement_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_titles: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_announcement_texts: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub format: AnnouncementFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default)]
    pub has_options: bool,
    #[serde(default)]
    pub input_mode: InputMode,
    #[serde(default)]
    pub options: Vec<MenuOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_fallback_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_retrieve_after_seconds: Option<u32>,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default)]
    pub order: i64,
}

impl Node {
    /// A blank node of the given type. Text fields are left empty for the editor to fill.
    pub fn new(id: NodeId, parent_id: Option<NodeId>, node_type: NodeType, order: i64) -> Self {
        Self {
            id,
            parent_id,
            node_type,
            title: String::new(),
            announcement_text: String::new(),
            localized_titles: None,
            localized_announcement_texts: None,
            format: AnnouncementFormat::SyntheticText,
            audio_file_name: None,
            tag: None,
            has_options: false,
            input_mode: InputMode::Keypress,
            options: Vec::new(),
            forward_number: None,
            forward_fallback_text: None,
            forward_retrieve_after_seconds: None,
            is_important: false,
            order,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Forward settings only apply to `forward` nodes.
    pub fn forward_number(&self) -> Option<&str> {
        match self.node_type {
            NodeType::Forward => self.forward_number.as_deref().filter(|n| !n.is_empty()),
            NodeType::Greeting | NodeType::Question | NodeType::Action | NodeType::End => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    /// Options that take effect. Empty unless the `has_options` gate is set.
    pub fn active_options(&self) -> &[MenuOption] {
        if self.has_options {
            &self.options
        } else {
            &[]
        }
    }

    /// Language codes with a non-empty localized title or announcement, in sorted order.
    pub fn active_languages(&self) -> Vec<&str> {
        let mut languages = BTreeSet::new();
        for map in [&self.localized_titles, &self.localized_announcement_texts]
            .into_iter()
            .flatten()
        {
            for (language, text) in map {
                if !text.trim().is_empty() {
                    languages.insert(language.as_str());
                }
            }
        }
        languages.into_iter().collect()
    }

    pub fn localized_title(&self, language: &str) -> Option<&str> {
        self.localized_titles
            .as_ref()
            .and_then(|map| map.get(language))
            .map(String::as_str)
    }

    pub fn localized_announcement_text(&self, language: &str) -> Option<&str> {
        self.localized_announcement_texts
            .as_ref()
            .and_then(|map| map.get(language))
            .map(String::as_str)
    }
}
