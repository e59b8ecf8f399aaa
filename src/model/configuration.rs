// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{ConfigId, NodeId};
use super::node::{Node, NodeType};
use super::repository::NodeRepository;

/// A complete phone-menu script: display name plus the node tree.
///
/// Configurations are treated as immutable snapshots. Mutations build a new one; see
/// `ops` and `editor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[schemars(with = "String")]
    pub id: ConfigId,
    #[serde(default)]
    pub praxis_name: String,
    #[schemars(with = "Vec<Node>")]
    pub nodes: NodeRepository,
    #[serde(default = "Utc::now")]
    #[schemars(with = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    #[schemars(with = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Configuration {
    /// A fresh configuration holding a single greeting root.
    pub fn new(praxis_name: impl Into<String>) -> Self {
        let now = Utc::now();
        let root = Node::new(NodeId::generate(), None, NodeType::Greeting, 0);
        Self {
            id: ConfigId::generate(),
            praxis_name: praxis_name.into(),
            nodes: NodeRepository::replace(vec![root]),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.root()
    }

    /// Same configuration with a new node collection and a refreshed `updated_at`.
    pub fn with_nodes(&self, nodes: NodeRepository) -> Self {
        Self {
            id: self.id.clone(),
            praxis_name: self.praxis_name.clone(),
            nodes,
            created_at: self.created_at,
            updated_at: Utc::now().max(self.updated_at),
        }
    }
}
