/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use ahash::AHashMap;
use fl_ir::{FlArg, FlProgram};

use crate::{CheckKind, OptError, ProgramCheck};

///Removes external units no surviving instruction references, and then
/// repeats the whole elimination inside every surviving unit's
/// sub-program.
///
/// Both script references and external-unit references (the ones function
/// promotion produces) keep a unit alive, they only differ in where the
/// unit came from. Sub-program graphs are assumed acyclic, the recursion
/// carries no visited set.
pub struct RemoveUnusedScripts;

impl RemoveUnusedScripts {
    fn process(&self, program: &mut FlProgram) -> Result<(), OptError> {
        let mut scripts = program
            .external_units
            .iter()
            .map(|u| (u.name.clone(), false))
            .collect::<AHashMap<_, _>>();

        for function in &program.functions {
            for inst in &function.instructions {
                for arg in &inst.args {
                    if let FlArg::Script(name) | FlArg::External(name) = arg {
                        if let Some(live) = scripts.get_mut(name.as_str()) {
                            *live = true;
                        }
                    }
                }
            }
        }

        program.external_units.retain(|u| {
            let live = scripts.get(&u.name).copied().unwrap_or(false);
            #[cfg(feature = "log")]
            if !live {
                log::info!("removing script {}", u.name);
            }
            live
        });

        for unit in &mut program.external_units {
            self.process(&mut unit.program)?;
        }

        Ok(())
    }
}

impl ProgramCheck for RemoveUnusedScripts {
    fn name(&self) -> &'static str {
        "remove-unused-scripts"
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Optimization
    }

    fn priority(&self) -> i32 {
        3
    }

    fn apply(&self, mut program: FlProgram) -> Result<FlProgram, OptError> {
        self.process(&mut program)?;
        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use fl_ir::{keywords, ExternalUnit, FlFunction, FlInstruction, UnitModifiers};

    use super::*;

    fn unit(name: &str, program: FlProgram) -> ExternalUnit {
        ExternalUnit::new(name, program, UnitModifiers::default())
    }

    #[test]
    fn removes_unreferenced_units_and_recurses() {
        //inner program of "used" references nothing, its own unit dies too
        let mut inner = FlProgram::new();
        inner
            .functions
            .push(FlFunction::new(keywords::ENTRY_FUNCTION));
        inner
            .external_units
            .push(unit("nested_dead", FlProgram::new()));

        let mut program = FlProgram::new();
        program.functions.push(FlFunction::with_instructions(
            keywords::ENTRY_FUNCTION,
            [FlInstruction::new(
                "run",
                [FlArg::Script("used".to_string())],
            )],
        ));
        program.external_units.push(unit("used", inner));
        program.external_units.push(unit("dead", FlProgram::new()));

        let program = RemoveUnusedScripts.apply(program).unwrap();
        assert_eq!(program.external_units.len(), 1);
        assert_eq!(program.external_units[0].name, "used");
        assert!(program.external_units[0].program.external_units.is_empty());
    }
}
