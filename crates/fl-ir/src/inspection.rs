/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The pre-IR "static inspection" view of a script.
//!
//! Produced by the front-end before the full parse: functions are known by
//! name and each instruction only carries its raw argument identifier
//! strings, nothing is resolved yet. The early unused-function check runs
//! on this view so dead functions never reach the expensive parse stage.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectedInstruction {
    pub key: String,
    pub raw_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectedFunction {
    pub name: String,
    pub instructions: Vec<InspectedInstruction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticInspection {
    pub functions: Vec<InspectedFunction>,
}
