/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Lazily materialized buffer contents.
//!
//! The cached-buffer promotion replaces a compute-once external unit with a
//! buffer whose data is produced by running the unit's sub-program exactly
//! once. How and where that sub-program executes is the runtime's business,
//! so execution is injected via [ScriptExecutor]. This module only
//! guarantees the at-most-once caching contract.

use std::sync::OnceLock;

use crate::FlProgram;

///Spatial dimensions of the buffer the sub-program runs against. Taken
/// from the accessing context at materialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

///Opaque handle into the runtime's buffer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

///Runtime capability that executes an embedded sub-program against a
/// freshly sized buffer, returns the resulting active buffer and releases
/// the sub-program's transient resources.
pub trait ScriptExecutor {
    fn run_to_buffer(&self, program: &FlProgram, dims: Dims) -> BufferHandle;
}

///A sub-program paired with its at-most-once result cache.
///
/// Locking for concurrent first access is the runtime's responsibility;
/// [OnceLock] already makes a repeated trigger idempotent.
#[derive(Debug)]
pub struct CachedScript {
    program: FlProgram,
    initialize_on_start: bool,
    cell: OnceLock<BufferHandle>,
}

impl CachedScript {
    pub fn new(program: FlProgram, initialize_on_start: bool) -> Self {
        CachedScript {
            program,
            initialize_on_start,
            cell: OnceLock::new(),
        }
    }

    ///Whether the runtime should materialize eagerly at program load
    /// instead of on first access.
    pub fn initialize_on_start(&self) -> bool {
        self.initialize_on_start
    }

    pub fn program(&self) -> &FlProgram {
        &self.program
    }

    pub fn is_materialized(&self) -> bool {
        self.cell.get().is_some()
    }

    ///Returns the cached buffer, running the sub-program through
    /// `executor` on the first call. Later calls ignore `executor` and
    /// `dims` and return the cached handle.
    pub fn materialize(&self, executor: &dyn ScriptExecutor, dims: Dims) -> BufferHandle {
        *self.cell.get_or_init(|| executor.run_to_buffer(&self.program, dims))
    }
}
