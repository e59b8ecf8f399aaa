// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The editing session: current snapshot plus an injected store.
//!
//! Each edit builds a complete new configuration, checks it with `validate_tree`, saves it,
//! and only then makes it current. If validation or saving fails the previous snapshot stays
//! in place.

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::format::{import_configuration, ImportError};
use crate::layout::{layout_tree, LayoutMetrics, TreeLayout};
use crate::model::{Configuration, Node, NodeId, NodeRepository};
use crate::ops::{self, validate_tree, TreeError, TreeViolation};
use crate::store::{ConfigStore, StoreError};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("configuration breaks the tree invariants: {}", join_violations(.violations))]
    InvalidTree { violations: Vec<TreeViolation> },
}

fn join_violations(violations: &[TreeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug)]
pub struct Editor<S: ConfigStore> {
    store: S,
    config: Configuration,
}

impl<S: ConfigStore> Editor<S> {
    /// Loads the stored configuration, or starts a fresh one named `praxis_name` when nothing
    /// usable is stored. A fresh configuration is not saved until the first edit.
    pub fn open(store: S, praxis_name: &str) -> Self {
        let config = match store.load() {
            Some(config) => config,
            None => {
                info!(praxis_name, "starting a fresh configuration");
                Configuration::new(praxis_name)
            }
        };
        Self { store, config }
    }

    /// Starts from an already loaded snapshot without consulting the store.
    pub fn with_config(store: S, config: Configuration) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn layout(&self, metrics: &LayoutMetrics) -> TreeLayout {
        layout_tree(&self.config.nodes, metrics)
    }

    #[instrument(level = "debug", skip_all, fields(parent = %parent_id))]
    pub fn add_child(&mut self, parent_id: &NodeId) -> Result<Node, EditorError> {
        let inserted = ops::add_child(&self.config.nodes, parent_id)?;
        self.commit_nodes(inserted.nodes)?;
        Ok(inserted.node)
    }

    #[instrument(level = "debug", skip_all, fields(target = %target_id))]
    pub fn insert_before(&mut self, target_id: &NodeId) -> Result<Node, EditorError> {
        let inserted = ops::insert_before(&self.config.nodes, target_id)?;
        self.commit_nodes(inserted.nodes)?;
        Ok(inserted.node)
    }

    /// Deletes the subtree under `node_id` and drops the former parent's options that led to it.
    /// Returns the removed ids in post-order.
    #[instrument(level = "debug", skip_all, fields(node = %node_id))]
    pub fn delete_node(&mut self, node_id: &NodeId) -> Result<Vec<NodeId>, EditorError> {
        let removed = ops::delete_subtree(&self.config.nodes, node_id)?;
        let nodes = match &removed.former_parent_id {
            Some(parent_id) => ops::strip_option_targets(&removed.nodes, parent_id, node_id),
            None => removed.nodes,
        };
        self.commit_nodes(nodes)?;
        Ok(removed.removed)
    }

    #[instrument(level = "debug", skip_all, fields(node = %node.id))]
    pub fn update_node(&mut self, node: Node) -> Result<(), EditorError> {
        let nodes = ops::update_node(&self.config.nodes, node)?;
        self.commit_nodes(nodes)
    }

    pub fn rename(&mut self, praxis_name: impl Into<String>) -> Result<(), EditorError> {
        let mut next = self.config.with_nodes(self.config.nodes.clone());
        next.praxis_name = praxis_name.into();
        self.commit(next)
    }

    /// Replaces the whole working set with an imported document.
    #[instrument(level = "debug", skip_all)]
    pub fn import_json(&mut self, json: &str) -> Result<(), EditorError> {
        let config = import_configuration(json)?;
        info!(id = %config.id, nodes = config.nodes.len(), "imported configuration");
        self.commit(config)
    }

    fn commit_nodes(&mut self, nodes: NodeRepository) -> Result<(), EditorError> {
        let next = self.config.with_nodes(nodes);
        self.commit(next)
    }

    fn commit(&mut self, next: Configuration) -> Result<(), EditorError> {
        let violations = validate_tree(&next.nodes);
        if !violations.is_empty() {
            warn!(count = violations.len(), "rejected snapshot that breaks the tree");
            return Err(EditorError::InvalidTree { violations });
        }
        self.store.save(&next)?;
        debug!(nodes = next.nodes.len(), "committed snapshot");
        self.config = next;
        Ok(())
    }
}
