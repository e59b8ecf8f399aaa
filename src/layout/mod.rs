// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Auto-layout for dialog trees.
//!
//! The layout is a pure function of the node collection and the metrics, so the interactive
//! view and every export adapter place nodes identically.

pub mod metrics;
pub mod tree;

pub use metrics::LayoutMetrics;
pub use tree::{layout_tree, LayoutBounds, NodePlacement, TreeLayout};
