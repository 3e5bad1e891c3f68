/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use fl_ir::{inspection::StaticInspection, FlProgram};

use crate::OptError;

///Classification a check declares for itself. The pipeline's
/// [CheckProfile](crate::CheckProfile) decides which classes run;
/// [CheckKind::Disabled] never runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Mandatory,
    Optimization,
    AggressiveOptimization,
    Disabled,
}

///A single optimization over the full program representation.
///
/// Checks consume and return the program so structural rewrites (promotion,
/// fusion) don't have to happen through a `&mut`-shaped interface. A check
/// whose trigger condition is absent must hand the program back unchanged.
pub trait ProgramCheck {
    fn name(&self) -> &'static str;

    fn kind(&self) -> CheckKind;

    ///Lower priorities run first. Ties are broken by registration order.
    fn priority(&self) -> i32 {
        0
    }

    fn apply(&self, program: FlProgram) -> Result<FlProgram, OptError>;
}

///Same contract as [ProgramCheck], but over the pre-IR
/// [StaticInspection](fl_ir::inspection::StaticInspection) view the
/// front-end produces before the full parse.
pub trait InspectionCheck {
    fn name(&self) -> &'static str;

    fn kind(&self) -> CheckKind;

    fn priority(&self) -> i32 {
        0
    }

    fn apply(&self, inspection: StaticInspection) -> Result<StaticInspection, OptError>;
}
