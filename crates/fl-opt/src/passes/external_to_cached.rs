/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use ahash::AHashMap;
use fl_ir::{cache::CachedScript, FlArg, FlBuffer, FlProgram};

use crate::{CheckKind, OptError, ProgramCheck};

///Prefix of the buffer a compute-once unit collapses into.
pub const CACHED_PREFIX: &str = "_cached_";

///Collapses every compute-once external unit into a read-only buffer that
/// materializes lazily from the unit's sub-program.
///
/// Runs at priority 4, after
/// [StaticToExternal](super::StaticToExternal): promotion may have just
/// produced the compute-once units this check consumes. The sub-program
/// moves into a [CachedScript], which the runtime materializes at most
/// once (eagerly at load when the unit was `onload`). Every surviving
/// reference to the unit is rewritten into a buffer reference to the new
/// name.
pub struct ExternalToCachedBuffer;

impl ProgramCheck for ExternalToCachedBuffer {
    fn name(&self) -> &'static str {
        "external-to-cached-buffer"
    }

    fn kind(&self) -> CheckKind {
        CheckKind::AggressiveOptimization
    }

    fn priority(&self) -> i32 {
        4
    }

    fn apply(&self, mut program: FlProgram) -> Result<FlProgram, OptError> {
        //old unit name -> cached buffer name
        let mut converted = AHashMap::new();

        for i in (0..program.external_units.len()).rev() {
            if !program.external_units[i].modifiers.compute_once {
                continue;
            }

            let unit = program.external_units.remove(i);
            let buffer_name = format!("{CACHED_PREFIX}{}", unit.name);

            #[cfg(feature = "log")]
            log::info!("caching compute-once unit {} as {buffer_name}", unit.name);

            program.buffers.push(FlBuffer::cached_script(
                &buffer_name,
                CachedScript::new(unit.program, unit.modifiers.initialize_on_start),
            ));
            converted.insert(unit.name, buffer_name);
        }

        for function in &mut program.functions {
            for inst in &mut function.instructions {
                for arg in inst.args.iter_mut() {
                    if let FlArg::External(name) | FlArg::Script(name) = arg {
                        if let Some(buffer_name) = converted.get(name.as_str()) {
                            *arg = FlArg::Buffer(buffer_name.clone());
                        }
                    }
                }
            }
        }

        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use fl_ir::{
        keywords, BufferSource, ExternalUnit, FlFunction, FlInstruction, UnitModifiers,
    };

    use super::*;

    #[test]
    fn converts_compute_once_units_into_read_only_buffers() {
        let mut sub = FlProgram::new();
        sub.functions
            .push(FlFunction::new(keywords::ENTRY_FUNCTION));

        let mut program = FlProgram::new();
        program.functions.push(FlFunction::with_instructions(
            keywords::ENTRY_FUNCTION,
            [FlInstruction::new(
                "add",
                [FlArg::External("_ext_Noise".to_string())],
            )],
        ));
        program.external_units.push(ExternalUnit::new(
            "_ext_Noise",
            sub,
            UnitModifiers {
                compute_once: true,
                initialize_on_start: true,
                no_jump: true,
            },
        ));
        program.external_units.push(ExternalUnit::new(
            "keep",
            FlProgram::new(),
            UnitModifiers::default(),
        ));

        let program = ExternalToCachedBuffer.apply(program).unwrap();

        assert_eq!(program.external_units.len(), 1);
        assert_eq!(program.external_units[0].name, "keep");

        let buffer = program
            .buffers
            .iter()
            .find(|b| b.name == "_cached__ext_Noise")
            .unwrap();
        assert!(buffer.modifiers.read_only);
        match &buffer.source {
            BufferSource::Script(cache) => {
                assert!(cache.initialize_on_start());
                assert!(!cache.is_materialized());
            }
            BufferSource::Kernel { .. } => panic!("expected script-backed buffer"),
        }

        assert_eq!(
            program.entry().unwrap().instructions[0].args[0],
            FlArg::Buffer("_cached__ext_Noise".to_string())
        );
    }

    #[test]
    fn no_compute_once_units_is_a_no_op() {
        let mut program = FlProgram::new();
        program.external_units.push(ExternalUnit::new(
            "unit",
            FlProgram::new(),
            UnitModifiers::default(),
        ));

        let program = ExternalToCachedBuffer.apply(program).unwrap();
        assert_eq!(program.external_units.len(), 1);
        assert!(program.buffers.is_empty());
    }
}
