/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use ahash::AHashMap;
use fl_ir::{inspection::StaticInspection, keywords};

use crate::{CheckKind, InspectionCheck, OptError};

///Variant of [RemoveUnusedFunctions](super::RemoveUnusedFunctions) that
/// runs on the pre-IR static inspection view, before the full parse.
/// Arguments are raw identifier strings here, so a match against a
/// function name is all the liveness information available.
pub struct RemoveUnusedFunctionsEarly;

impl RemoveUnusedFunctionsEarly {
    fn liveness(inspection: &StaticInspection) -> AHashMap<String, bool> {
        let mut funcs = inspection
            .functions
            .iter()
            .map(|f| (f.name.clone(), f.name == keywords::ENTRY_FUNCTION))
            .collect::<AHashMap<_, _>>();

        for function in &inspection.functions {
            for inst in &function.instructions {
                for raw_arg in &inst.raw_args {
                    if let Some(live) = funcs.get_mut(raw_arg.as_str()) {
                        *live = true;
                    }
                }
            }
        }

        funcs
    }
}

impl InspectionCheck for RemoveUnusedFunctionsEarly {
    fn name(&self) -> &'static str {
        "remove-unused-functions-early"
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Optimization
    }

    fn priority(&self) -> i32 {
        -1
    }

    fn apply(&self, mut inspection: StaticInspection) -> Result<StaticInspection, OptError> {
        let mut passes = 0;
        let mut removed = 0;

        loop {
            passes += 1;
            let funcs = Self::liveness(&inspection);
            let before = inspection.functions.len();
            inspection.functions.retain(|f| funcs.get(&f.name).copied().unwrap_or(false));
            removed += before - inspection.functions.len();

            if inspection.functions.len() == before {
                break;
            }
        }

        #[cfg(feature = "log")]
        log::info!("removed {removed} functions in {passes} passes (pre-parse)");
        #[cfg(not(feature = "log"))]
        let _ = (passes, removed);

        Ok(inspection)
    }
}
