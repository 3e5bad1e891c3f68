/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use crate::FlProgram;

///Modifier set of an external unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitModifiers {
    ///The unit's result does not change between invocations, so it may be
    /// collapsed into a cached buffer.
    pub compute_once: bool,
    ///Materialize eagerly at program load instead of on first access.
    pub initialize_on_start: bool,
    ///The unit must not be inlined into callers.
    pub no_jump: bool,
}

///A callable unit that executes its embedded sub-program as an isolated
/// pipeline instead of being inlined into the caller.
#[derive(Debug)]
pub struct ExternalUnit {
    pub name: String,
    pub program: FlProgram,
    pub modifiers: UnitModifiers,
}

impl ExternalUnit {
    pub fn new(name: impl ToString, program: FlProgram, modifiers: UnitModifiers) -> Self {
        ExternalUnit {
            name: name.to_string(),
            program,
            modifiers,
        }
    }
}
