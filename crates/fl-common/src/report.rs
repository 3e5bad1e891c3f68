/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use std::{error::Error, fmt::Display};

///User-visible failure of a single program check. Carries the check's name,
/// the identifier that tripped it (if any) and a human readable description.
///
/// An aborted check fails the whole compilation, so the report is built once
/// from the terminating error and printed, no recovery happens afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub check: String,
    pub identifier: Option<String>,
    pub description: String,
}

impl CheckReport {
    pub fn new(check: impl ToString, description: impl ToString) -> Self {
        CheckReport {
            check: check.to_string(),
            identifier: None,
            description: description.to_string(),
        }
    }

    ///Builds a report from any error type, keeping the error's display text
    /// as the description.
    pub fn from_error(check: impl ToString, error: &dyn Error) -> Self {
        Self::new(check, error)
    }

    ///Attaches the identifier the check tripped over.
    pub fn with_identifier(mut self, identifier: impl ToString) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    ///Prints the report to stderr.
    pub fn report(&self) {
        eprintln!("{self}");
    }
}

impl Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ident) = &self.identifier {
            write!(
                f,
                "check \"{}\" failed on \"{}\": {}",
                self.check, ident, self.description
            )
        } else {
            write!(f, "check \"{}\" failed: {}", self.check, self.description)
        }
    }
}
