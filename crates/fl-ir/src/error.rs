/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use fl_common::thiserror::{self, Error};

///Errors produced while building or validating the IR.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IrError {
    #[error("unresolved reference \"{identifier}\" in function \"{function}\"")]
    UnresolvedReference {
        identifier: String,
        function: String,
    },

    #[error("duplicate definition of \"{0}\"")]
    DuplicateDefinition(String),

    #[error("failed to parse \"{source_name}\": {text}")]
    Parse { source_name: String, text: String },
}
