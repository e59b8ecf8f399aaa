// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::{Cell, RefCell};

use super::{ConfigStore, StoreError};
use crate::model::Configuration;

/// Keeps the last saved configuration in memory. Single-threaded by construction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<Configuration>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Configuration) -> Self {
        Self {
            slot: RefCell::new(Some(config)),
            saves: Cell::new(0),
        }
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn snapshot(&self) -> Option<Configuration> {
        self.slot.borrow().clone()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Option<Configuration> {
        self.snapshot()
    }

    fn save(&self, config: &Configuration) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(config.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
