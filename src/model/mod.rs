// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A configuration holds a flat repository of nodes; the tree is expressed through
//! `parent_id` pointers only.

pub mod configuration;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod node;
pub mod repository;

pub use configuration::Configuration;
pub use ids::{ConfigId, Id, IdError, NodeId};
pub use node::{AnnouncementFormat, InputMode, MenuOption, Node, NodeType};
pub use repository::NodeRepository;
