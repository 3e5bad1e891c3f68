/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The front-end parser capability.
//!
//! The text parser itself lives outside this workspace. Checks that need
//! to re-parse a serialized instruction stream (function promotion) get
//! the parser injected through this trait instead of reaching for a
//! process-wide instance.

use crate::{FlProgram, IrError};

pub trait FlParser {
    ///Parses `lines` into a standalone program. `source_name` names the
    /// origin for diagnostics only.
    fn parse(&self, source_name: &str, lines: &[String]) -> Result<FlProgram, IrError>;
}
