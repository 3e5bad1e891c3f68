/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use fl_common::{
    thiserror::{self, Error},
    CheckReport,
};
use fl_ir::IrError;

///Errors a check can abort the pipeline with. An aborted check fails the
/// whole run, no partially rewritten program is handed on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptError {
    ///A `~`-prefixed argument named a buffer that is not defined anywhere
    /// in the program.
    #[error("possible wrong variable name \"{buffer}\" in function \"{function}\"")]
    UnregisteredBuffer { buffer: String, function: String },

    ///Fusion was asked to generate code for an instruction key no kernel
    /// is registered for.
    #[error("no kernel registered for instruction key \"{0}\"")]
    UnknownKernel(String),

    ///The kernel database handed out source text the body extractor could
    /// not make sense of. Not recoverable by any check.
    #[error("kernel source of \"{kernel}\" is malformed: {reason}")]
    MalformedKernelSource { kernel: String, reason: String },

    #[error("preprocessing fused kernel \"{kernel}\" failed: {text}")]
    Preprocess { kernel: String, text: String },

    #[error(transparent)]
    Ir(#[from] IrError),
}

impl OptError {
    ///The user-visible failure report for this error, attributed to the
    /// check named `check`.
    pub fn into_report(self, check: &str) -> CheckReport {
        let identifier = match &self {
            OptError::UnregisteredBuffer { buffer, .. } => Some(buffer.clone()),
            OptError::UnknownKernel(key) => Some(key.clone()),
            OptError::MalformedKernelSource { kernel, .. }
            | OptError::Preprocess { kernel, .. } => Some(kernel.clone()),
            OptError::Ir(IrError::UnresolvedReference { identifier, .. }) => {
                Some(identifier.clone())
            }
            OptError::Ir(_) => None,
        };

        let report = CheckReport::new(check, &self);
        if let Some(identifier) = identifier {
            report.with_identifier(identifier)
        } else {
            report
        }
    }
}
