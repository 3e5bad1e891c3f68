/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use ahash::AHashMap;
use fl_ir::{keywords, FlProgram};

use crate::{CheckKind, OptError, ProgramCheck};

///Removes functions that are not (transitively) referenced from the entry
/// function.
///
/// Liveness is seeded with the entry function and recomputed from scratch
/// every pass: any instruction argument whose identifier matches a
/// function name marks that function live, even when the referencing
/// function is itself dead. Scan-and-remove passes repeat until one pass
/// removes nothing, so a chain of functions only referencing each other
/// dies one layer per pass.
pub struct RemoveUnusedFunctions;

impl RemoveUnusedFunctions {
    fn liveness(program: &FlProgram) -> AHashMap<String, bool> {
        let mut funcs = program
            .functions
            .iter()
            .map(|f| (f.name.clone(), f.is_entry()))
            .collect::<AHashMap<_, _>>();

        for function in &program.functions {
            for inst in &function.instructions {
                for arg in &inst.args {
                    if let Some(identifier) = arg.identifier() {
                        if let Some(live) = funcs.get_mut(identifier) {
                            *live = true;
                        }
                    }
                }
            }
        }

        funcs
    }
}

impl ProgramCheck for RemoveUnusedFunctions {
    fn name(&self) -> &'static str {
        "remove-unused-functions"
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Optimization
    }

    fn priority(&self) -> i32 {
        3
    }

    fn apply(&self, mut program: FlProgram) -> Result<FlProgram, OptError> {
        let mut passes = 0;
        let mut removed = 0;

        loop {
            passes += 1;
            let funcs = Self::liveness(&program);
            let before = program.functions.len();
            program.functions.retain(|f| funcs.get(&f.name).copied().unwrap_or(false));
            removed += before - program.functions.len();

            if program.functions.len() == before {
                break;
            }
        }

        #[cfg(feature = "log")]
        log::info!("removed {removed} functions in {passes} passes");
        #[cfg(not(feature = "log"))]
        let _ = (passes, removed);

        Ok(program)
    }
}
