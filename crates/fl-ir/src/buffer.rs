/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use crate::cache::CachedScript;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferModifiers {
    pub read_only: bool,
}

///Where a buffer's data comes from.
#[derive(Debug)]
pub enum BufferSource {
    ///Initialized by running the named GPU kernel over the buffer.
    Kernel { key: String },
    ///Materialized at most once by running an embedded sub-program, see
    /// [CachedScript].
    Script(CachedScript),
}

///A named image buffer definition.
#[derive(Debug)]
pub struct FlBuffer {
    pub name: String,
    pub modifiers: BufferModifiers,
    pub source: BufferSource,
}

impl FlBuffer {
    pub fn kernel_initialized(name: impl ToString, key: impl ToString) -> Self {
        FlBuffer {
            name: name.to_string(),
            modifiers: BufferModifiers::default(),
            source: BufferSource::Kernel {
                key: key.to_string(),
            },
        }
    }

    ///A read-only buffer backed by a cached sub-program result.
    pub fn cached_script(name: impl ToString, cache: CachedScript) -> Self {
        FlBuffer {
            name: name.to_string(),
            modifiers: BufferModifiers { read_only: true },
            source: BufferSource::Script(cache),
        }
    }
}
