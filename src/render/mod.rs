// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only export adapters.
//!
//! Renderers consume a configuration together with its layout and never feed anything back.

pub mod outline;
mod text;

pub use outline::render_outline;
