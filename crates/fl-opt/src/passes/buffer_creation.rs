/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use fl_ir::FlProgram;

use crate::{CheckKind, OptError, ProgramCheck};

///The value-fill opcode this check prepends, when the runtime's
/// instruction set provides it.
pub const SET_VALUE_KEY: &str = "Set_v";

///Prepends a `Set_v 0` to every function that is never the target of a
/// control-flow instruction.
///
/// Such a function always starts on a defined buffer state, so the runtime
/// can skip uploading the buffer's host data before running it. When the
/// runtime instruction set lacks the fill opcode the check is a silent
/// no-op.
pub struct OptimizeBufferCreation {
    ///`None` when the target instruction set has no fill opcode.
    set_value_key: Option<String>,
}

impl OptimizeBufferCreation {
    pub fn new(set_value_key: Option<String>) -> Self {
        OptimizeBufferCreation { set_value_key }
    }
}

impl Default for OptimizeBufferCreation {
    fn default() -> Self {
        OptimizeBufferCreation {
            set_value_key: Some(SET_VALUE_KEY.to_string()),
        }
    }
}

impl ProgramCheck for OptimizeBufferCreation {
    fn name(&self) -> &'static str {
        "optimize-buffer-creation"
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Optimization
    }

    fn priority(&self) -> i32 {
        3
    }

    fn apply(&self, mut program: FlProgram) -> Result<FlProgram, OptError> {
        let Some(set_key) = &self.set_value_key else {
            //instruction set has no fill opcode, nothing to prepend
            return Ok(program);
        };

        let jump_targets = program
            .functions
            .iter()
            .flat_map(|f| f.instructions.iter())
            .filter(|inst| inst.is_control_flow())
            .flat_map(|inst| inst.args.iter())
            .filter_map(|arg| arg.identifier().map(|id| id.to_string()))
            .collect::<ahash::AHashSet<_>>();

        for function in &mut program.functions {
            if !jump_targets.contains(&function.name) {
                function.instructions.insert(
                    0,
                    fl_ir::FlInstruction::new(set_key, [fl_ir::FlArg::Number(0.0)]),
                );
            }
        }

        Ok(program)
    }
}
