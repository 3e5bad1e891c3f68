/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! # FL-Opt
//!
//! The FL optimizer. A pipeline of independent, composable checks that
//! rewrite an [FlProgram](fl_ir::FlProgram) in place: dead-code
//! elimination over functions, buffers and sub-scripts, inlining of
//! unconditional jumps, promotion of static functions into external units
//! (and of compute-once units into cached buffers), and fusion of
//! consecutive kernel invocations into single generated kernels.
//!
//! Each check declares a [priority](ProgramCheck::priority) and a
//! [kind](CheckKind); the [CheckPipeline] filters by enabled kind and runs
//! the survivors in ascending priority order. Checks are idempotent, a
//! check whose precondition no longer holds returns the program unchanged.

mod check;
mod error;
pub mod fusion;
pub mod kernel;
pub mod passes;
mod pipeline;

pub use check::{CheckKind, InspectionCheck, ProgramCheck};
pub use error::OptError;
pub use pipeline::{CheckPipeline, CheckProfile};
