/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The optimization checks.
//!
//! Ordering between them is expressed through priorities: jump inlining
//! (1) runs before the eliminators (3), promotion to external units (3)
//! before the cached-buffer promotion (4) that consumes its output, and
//! kernel fusion (10) last, since it erases the per-instruction identity
//! every other check keys on.

mod buffer_creation;
mod external_to_cached;
mod inline_jumps;
mod remove_unused_buffers;
mod remove_unused_functions;
mod remove_unused_functions_early;
mod remove_unused_scripts;
mod static_to_external;

pub use buffer_creation::OptimizeBufferCreation;
pub use external_to_cached::ExternalToCachedBuffer;
pub use inline_jumps::InlineJumps;
pub use remove_unused_buffers::RemoveUnusedBuffers;
pub use remove_unused_functions::RemoveUnusedFunctions;
pub use remove_unused_functions_early::RemoveUnusedFunctionsEarly;
pub use remove_unused_scripts::RemoveUnusedScripts;
pub use static_to_external::StaticToExternal;

#[cfg(test)]
pub(crate) mod testutil;
