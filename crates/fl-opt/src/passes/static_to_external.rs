/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use ahash::AHashMap;
use fl_ir::{parse::FlParser, ExternalUnit, FlProgram, UnitModifiers};

use crate::{CheckKind, OptError, ProgramCheck};

///Prefix that makes a promoted function's unit name distinguishable from
/// the names the script author wrote.
pub const EXTERNAL_PREFIX: &str = "_ext_";

///Promotes every static, non-entry function into an external unit.
///
/// The function body is re-serialized under the entry label and handed
/// back through the injected parser, so the resulting sub-program went
/// through exactly the same front-end as a hand-written script. The new
/// unit is always `nojump`; `once` is carried over from the function.
///
/// Argument rewriting happens only after all promotions are collected:
/// two static functions calling each other must both end up referencing
/// the promoted names.
pub struct StaticToExternal<P: FlParser> {
    parser: P,
}

impl<P: FlParser> StaticToExternal<P> {
    pub fn new(parser: P) -> Self {
        StaticToExternal { parser }
    }
}

impl<P: FlParser> ProgramCheck for StaticToExternal<P> {
    fn name(&self) -> &'static str {
        "static-function-to-external"
    }

    fn kind(&self) -> CheckKind {
        CheckKind::AggressiveOptimization
    }

    fn priority(&self) -> i32 {
        3
    }

    fn apply(&self, mut program: FlProgram) -> Result<FlProgram, OptError> {
        //old name -> promoted unit name
        let mut promoted = AHashMap::new();

        for i in (0..program.functions.len()).rev() {
            if !program.functions[i].modifiers.is_static || program.functions[i].is_entry() {
                continue;
            }

            let function = program.functions.remove(i);
            let unit_name = format!("{EXTERNAL_PREFIX}{}", function.name);

            let lines = function.serialize_as_entry();
            let sub_program = self
                .parser
                .parse(&format!("exported function: {}", function.name), &lines)?;

            #[cfg(feature = "log")]
            log::info!("promoting static function {} to {unit_name}", function.name);

            program.external_units.push(ExternalUnit::new(
                &unit_name,
                sub_program,
                UnitModifiers {
                    no_jump: true,
                    compute_once: function.modifiers.compute_once,
                    initialize_on_start: false,
                },
            ));
            promoted.insert(function.name, unit_name);
        }

        //rewrite the survivors and the promoted sub-programs themselves, so
        //static functions jumping to each other reference the new names too
        rewrite_references(&mut program.functions, &promoted);
        for unit in &mut program.external_units {
            rewrite_references(&mut unit.program.functions, &promoted);
        }

        Ok(program)
    }
}

fn rewrite_references(
    functions: &mut [fl_ir::FlFunction],
    promoted: &AHashMap<String, String>,
) {
    for function in functions {
        for inst in &mut function.instructions {
            for arg in inst.args.iter_mut() {
                if let Some(unit_name) = arg.identifier().and_then(|ident| promoted.get(ident)) {
                    *arg = fl_ir::FlArg::External(unit_name.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use fl_ir::{keywords, FlArg, FlFunction, FlInstruction};

    use super::*;
    use crate::passes::testutil::StreamParser;

    fn static_function(name: &str, instructions: Vec<FlInstruction>) -> FlFunction {
        let mut f = FlFunction::with_instructions(name, instructions);
        f.modifiers.is_static = true;
        f
    }

    #[test]
    fn promotes_and_rewrites_all_references() {
        let mut program = FlProgram::new();
        program.functions.push(FlFunction::with_instructions(
            keywords::ENTRY_FUNCTION,
            [FlInstruction::new(
                keywords::JUMP,
                [FlArg::Function("Precompute".to_string())],
            )],
        ));
        program.functions.push(static_function(
            "Precompute",
            vec![FlInstruction::new(
                "perlin",
                [FlArg::Number(8.0)],
            )],
        ));

        let program = StaticToExternal::new(StreamParser::default())
            .apply(program)
            .unwrap();

        //the function is gone, the unit exists under the prefixed name
        assert!(program.function("Precompute").is_none());
        assert_eq!(program.external_units.len(), 1);
        let unit = &program.external_units[0];
        assert_eq!(unit.name, "_ext_Precompute");
        assert!(unit.modifiers.no_jump);
        assert!(!unit.modifiers.compute_once);

        //the sub-program round-tripped through the parser with the entry label
        let entry = unit.program.entry().unwrap();
        assert_eq!(entry.instructions.len(), 1);
        assert_eq!(entry.instructions[0].key, "perlin");

        //no reference to the pre-promotion name survives anywhere
        for function in &program.functions {
            for inst in &function.instructions {
                for arg in &inst.args {
                    assert_ne!(arg.identifier(), Some("Precompute"));
                }
            }
        }
        assert_eq!(
            program.entry().unwrap().instructions[0].args[0],
            FlArg::External("_ext_Precompute".to_string())
        );
    }

    #[test]
    fn static_functions_calling_each_other_rewrite_consistently() {
        let mut program = FlProgram::new();
        program.functions.push(FlFunction::with_instructions(
            keywords::ENTRY_FUNCTION,
            [FlInstruction::new(
                keywords::JUMP,
                [FlArg::Function("A".to_string())],
            )],
        ));
        program.functions.push(static_function(
            "A",
            vec![FlInstruction::new(
                keywords::JUMP,
                [FlArg::Function("B".to_string())],
            )],
        ));
        program.functions.push(static_function("B", vec![]));

        let program = StaticToExternal::new(StreamParser::default())
            .apply(program)
            .unwrap();

        assert_eq!(
            program.entry().unwrap().instructions[0].args[0],
            FlArg::External("_ext_A".to_string())
        );
        assert!(program.function("A").is_none());
        assert!(program.function("B").is_none());
        assert_eq!(program.external_units.len(), 2);

        //A's promoted sub-program must reference B's promoted name, not B
        let unit_a = program
            .external_units
            .iter()
            .find(|u| u.name == "_ext_A")
            .unwrap();
        assert_eq!(
            unit_a.program.entry().unwrap().instructions[0].args[0],
            FlArg::External("_ext_B".to_string())
        );
    }

    #[test]
    fn entry_and_non_static_functions_stay() {
        let mut program = FlProgram::new();
        let mut entry = FlFunction::new(keywords::ENTRY_FUNCTION);
        entry.modifiers.is_static = true;
        program.functions.push(entry);
        program.functions.push(FlFunction::new("Plain"));

        let program = StaticToExternal::new(StreamParser::default())
            .apply(program)
            .unwrap();
        assert_eq!(program.functions.len(), 2);
        assert!(program.external_units.is_empty());
    }
}
