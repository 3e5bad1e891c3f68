/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use ahash::AHashMap;
use fl_ir::{keywords, FlProgram};

use crate::{CheckKind, OptError, ProgramCheck};

///Removes buffer definitions no surviving instruction references.
///
/// A single scan suffices: marking a buffer live is idempotent and nothing
/// a buffer removal does can unmark another buffer. Two argument shapes
/// contribute liveness: buffer-category references (their identifier may
/// carry the `~` unmark prefix, which counts as a use of the plain name),
/// and non-buffer arguments whose identifier starts with `~`. The latter
/// must name a defined buffer, otherwise the check aborts — a typo there
/// would otherwise silently drop the buffer the user meant.
pub struct RemoveUnusedBuffers;

impl RemoveUnusedBuffers {
    fn process(&self, program: &mut FlProgram) -> Result<(), OptError> {
        let mut buffers = program
            .buffers
            .iter()
            .map(|b| (b.name.clone(), b.name == keywords::INPUT_BUFFER))
            .collect::<AHashMap<_, _>>();

        for function in &program.functions {
            for inst in &function.instructions {
                for arg in &inst.args {
                    if let Some(target) = arg.buffer_target() {
                        if let Some(live) = buffers.get_mut(target) {
                            *live = true;
                        }
                    } else if let Some(identifier) = arg.identifier() {
                        if let Some(name) = identifier.strip_prefix(keywords::UNMARK_PREFIX) {
                            let live = buffers.get_mut(name).ok_or_else(|| {
                                OptError::UnregisteredBuffer {
                                    buffer: name.to_string(),
                                    function: function.name.clone(),
                                }
                            })?;
                            *live = true;
                        }
                    }
                }
            }
        }

        #[cfg(feature = "log")]
        log::debug!(
            "removing {} unused buffers",
            buffers.values().filter(|live| !**live).count()
        );
        program.buffers.retain(|b| buffers.get(&b.name).copied().unwrap_or(false));

        //subsequent scripts are isolated programs with their own buffers
        for unit in &mut program.external_units {
            self.process(&mut unit.program)?;
        }

        Ok(())
    }
}

impl ProgramCheck for RemoveUnusedBuffers {
    fn name(&self) -> &'static str {
        "remove-unused-buffers"
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
