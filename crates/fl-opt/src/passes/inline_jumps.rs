/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use fl_ir::{keywords, FlArg, FlProgram, IrError};

use crate::{CheckKind, OptError, ProgramCheck};

///Replaces every unconditional jump-to-function with an inlined copy of
/// the target's instruction list.
///
/// Functions are scanned back-to-front so the splice leaves earlier
/// indices valid, and whole-program scans repeat until one pass replaces
/// nothing, which flattens jumps-to-jumps. Locals are not renamed, the
/// target body is assumed collision free. A cyclic jump graph does not
/// terminate here; cycles are outside the language contract.
pub struct InlineJumps;

impl ProgramCheck for InlineJumps {
    fn name(&self) -> &'static str {
        "inline-jump-instructions"
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Optimization
    }

    fn priority(&self) -> i32 {
        1
    }

    fn apply(&self, mut program: FlProgram) -> Result<FlProgram, OptError> {
        let mut inlined = 0;
        loop {
            let mut replaced_one = false;

            for fidx in 0..program.functions.len() {
                for i in (0..program.functions[fidx].instructions.len()).rev() {
                    let target = {
                        let inst = &program.functions[fidx].instructions[i];
                        if inst.key == keywords::JUMP {
                            if let Some(FlArg::Function(name)) = inst.args.first() {
                                Some(name.clone())
                            } else {
                                None
                            }
                        } else {
                            None
                        }
                    };

                    if let Some(name) = target {
                        let body = program
                            .function(&name)
                            .map(|f| f.instructions.clone())
                            .ok_or_else(|| IrError::UnresolvedReference {
                                identifier: name.clone(),
                                function: program.functions[fidx].name.clone(),
                            })?;
                        program.functions[fidx].instructions.splice(i..=i, body);
                        replaced_one = true;
                        inlined += 1;
                    }
                }
            }

            if !replaced_one {
                break;
            }
        }

        #[cfg(feature = "log")]
        log::info!("inlined {inlined} jump instructions");
        #[cfg(not(feature = "log"))]
        let _ = inlined;

        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use fl_ir::{FlFunction, FlInstruction};

    use super::*;

    fn kernel_call(key: &str, buffer: &str) -> FlInstruction {
        FlInstruction::new(key, [FlArg::Buffer(buffer.to_string())])
    }

    fn jump_to(target: &str) -> FlInstruction {
        FlInstruction::new(keywords::JUMP, [FlArg::Function(target.to_string())])
    }

    #[test]
    fn inlines_helper_body_at_the_jump_index() {
        let mut program = FlProgram::new();
        program.functions.push(FlFunction::with_instructions(
            keywords::ENTRY_FUNCTION,
            [
                kernel_call("blur_x", "bufA"),
                kernel_call("sharpen", "bufA"),
                jump_to("Helper"),
            ],
        ));
        program.functions.push(FlFunction::with_instructions(
            "Helper",
            [kernel_call("invert", "bufB"), kernel_call("dilate", "bufB")],
        ));

        let program = InlineJumps.apply(program).unwrap();
        let main = program.entry().unwrap();
        let keys = main
            .instructions
            .iter()
            .map(|inst| inst.key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, ["blur_x", "sharpen", "invert", "dilate"]);
    }

    #[test]
    fn flattens_nested_jumps_to_a_fixed_point() {
        let mut program = FlProgram::new();
        program.functions.push(FlFunction::with_instructions(
            keywords::ENTRY_FUNCTION,
            [jump_to("A")],
        ));
        program
            .functions
            .push(FlFunction::with_instructions("A", [jump_to("B")]));
        program.functions.push(FlFunction::with_instructions(
            "B",
            [kernel_call("invert", "bufA")],
        ));

        let program = InlineJumps.apply(program).unwrap();
        let main = program.entry().unwrap();
        assert_eq!(main.instructions, vec![kernel_call("invert", "bufA")]);

        //a converged program passes through unchanged
        let program = InlineJumps.apply(program).unwrap();
        assert_eq!(
            program.entry().unwrap().instructions,
            vec![kernel_call("invert", "bufA")]
        );
    }

    #[test]
    fn leaves_conditional_branches_alone() {
        let mut program = FlProgram::new();
        program.functions.push(FlFunction::with_instructions(
            keywords::ENTRY_FUNCTION,
            [FlInstruction::new(
                "ble",
                [FlArg::Function("Helper".to_string()), FlArg::Number(0.5)],
            )],
        ));
        program.functions.push(FlFunction::new("Helper"));

        let program = InlineJumps.apply(program).unwrap();
        assert_eq!(program.entry().unwrap().instructions[0].key, "ble");
    }
}
