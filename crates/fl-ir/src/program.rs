/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use ahash::AHashMap;

use crate::{keywords, ExternalUnit, FlArg, FlBuffer, FlFunction, IrError};

///The whole program representation the checks rewrite in place. Created
/// once by the parser, mutated destructively pass by pass, then handed to
/// the code generator together with any [kernels](FlProgram::kernels) the
/// fusion pass embedded.
#[derive(Debug, Default)]
pub struct FlProgram {
    ///Ordered function list, names are unique.
    pub functions: Vec<FlFunction>,
    pub buffers: Vec<FlBuffer>,
    pub external_units: Vec<ExternalUnit>,
    ///Generated-kernel-name to embedded kernel source text.
    pub kernels: AHashMap<String, String>,
}

impl FlProgram {
    pub fn new() -> Self {
        FlProgram::default()
    }

    pub fn function(&self, name: &str) -> Option<&FlFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn function_mut(&mut self, name: &str) -> Option<&mut FlFunction> {
        self.functions.iter_mut().find(|f| f.name == name)
    }

    pub fn entry(&self) -> Option<&FlFunction> {
        self.function(keywords::ENTRY_FUNCTION)
    }

    pub fn has_buffer(&self, name: &str) -> bool {
        self.buffers.iter().any(|b| b.name == name)
    }

    pub fn has_external_unit(&self, name: &str) -> bool {
        self.external_units.iter().any(|u| u.name == name)
    }

    ///Checks the reference invariant: every identifier used by an
    /// instruction argument must resolve to a function, buffer or external
    /// unit of this program. Does not recurse into sub-programs.
    pub fn validate(&self) -> Result<(), IrError> {
        for function in &self.functions {
            for inst in &function.instructions {
                for arg in &inst.args {
                    let resolved = match arg {
                        FlArg::Number(_) => true,
                        FlArg::Buffer(name) => self.has_buffer(keywords::strip_unmark(name)),
                        FlArg::Function(name) => self.function(name).is_some(),
                        FlArg::External(name) | FlArg::Script(name) => {
                            self.has_external_unit(name)
                        }
                    };
                    if !resolved {
                        return Err(IrError::UnresolvedReference {
                            //constants resolved above, identifier exists
                            identifier: arg.identifier().unwrap_or_default().to_string(),
                            function: function.name.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::FlInstruction;

    use super::*;

    #[test]
    fn validate_flags_unresolved_reference() {
        let mut program = FlProgram::new();
        program.functions.push(FlFunction::with_instructions(
            keywords::ENTRY_FUNCTION,
            [FlInstruction::new(
                "blur_x",
                [FlArg::Buffer("missing".to_string())],
            )],
        ));

        assert_eq!(
            program.validate(),
            Err(IrError::UnresolvedReference {
                identifier: "missing".to_string(),
                function: keywords::ENTRY_FUNCTION.to_string(),
            })
        );

        program
            .buffers
            .push(FlBuffer::kernel_initialized("missing", "id"));
        assert_eq!(program.validate(), Ok(()));
    }
}
