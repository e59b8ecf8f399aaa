// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Callflow: dialog trees for phone menus.
//!
//! The crate keeps a parent-pointer tree of dialog steps consistent under structural edits and
//! computes a deterministic 2-D layout that interactive views and static exports share.

pub mod editor;
pub mod format;
pub mod layout;
pub mod model;
pub mod ops;
pub mod render;
pub mod store;
