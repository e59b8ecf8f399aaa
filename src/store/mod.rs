// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence adapters.
//!
//! A store knows how to load and save exactly one configuration. It is injected into the
//! editor instead of being reached through global state.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::Configuration;

pub mod json_file;
pub mod memory;

pub use json_file::{JsonFileStore, WriteDurability};
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait ConfigStore {
    /// The stored configuration. Missing or unparsable data yields `None`.
    fn load(&self) -> Option<Configuration>;

    fn save(&self, config: &Configuration) -> Result<(), StoreError>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn load(&self) -> Option<Configuration> {
        (**self).load()
    }

    fn save(&self, config: &Configuration) -> Result<(), StoreError> {
        (**self).save(config)
    }
}
