/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Reserved identifiers of the FL language. Every check matches these
//! literally, so they live in one place.

///Name of the function execution starts in. Always live, never removed,
/// renamed or promoted.
pub const ENTRY_FUNCTION: &str = "Main";

///Name of the buffer the runtime binds the input image to.
pub const INPUT_BUFFER: &str = "in";

///Prefix on a buffer identifier meaning "use this buffer, but do not mark
/// it as initializer". Liveness-wise the prefixed form counts as a use of
/// the plain name.
pub const UNMARK_PREFIX: char = '~';

pub const READ_ONLY_MODIFIER: &str = "readonly";
pub const NO_JUMP_MODIFIER: &str = "nojump";
pub const COMPUTE_ONCE_MODIFIER: &str = "once";
pub const INITIALIZE_ON_START_MODIFIER: &str = "onload";
pub const STATIC_MODIFIER: &str = "static";

///The unconditional jump opcode.
pub const JUMP: &str = "jmp";

///All control-flow instruction keys: the unconditional jump and the four
/// comparison branches.
pub const CONTROL_FLOW_KEYS: [&str; 5] = ["jmp", "ble", "bge", "blt", "bgt"];

///Strips the [UNMARK_PREFIX] from a buffer identifier, if present.
pub fn strip_unmark(identifier: &str) -> &str {
    identifier
        .strip_prefix(UNMARK_PREFIX)
        .unwrap_or(identifier)
}

pub fn is_control_flow(key: &str) -> bool {
    CONTROL_FLOW_KEYS.contains(&key)
}
