/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Kernel fusion.
//!
//! Detects maximal runs of consecutive kernel invocations, synthesizes one
//! merged kernel per distinct run signature and splices a single call to
//! it back into the instruction stream. Two call sites with identical
//! ordered kernel sequences share one generated kernel, each keeps its own
//! argument list.
//!
//! Fusion runs last: after it, the per-instruction identity other checks
//! key on is gone.

use std::path::PathBuf;

use ahash::AHashSet;
use fl_ir::{FlInstruction, FlProgram};
use lazy_static::lazy_static;

use crate::{
    kernel::{KernelDb, Preprocessor},
    CheckKind, OptError, ProgramCheck,
};

mod codegen;
mod rewrite;
mod sequence;

lazy_static! {
    ///Registered kernels that must never be merged: stochastic kernels
    /// re-seed per dispatch and neighborhood kernels read pixels their
    /// fused neighbors may already have overwritten.
    pub static ref DEFAULT_FUSION_DENYLIST: AHashSet<String> = ["rnd", "urnd", "perlin", "worley"]
        .into_iter()
        .map(str::to_string)
        .collect();
}

///Configuration of the fusion check.
#[derive(Debug, Clone)]
pub struct FusionConfig {
    ///Kernels excluded from fusion even though they are registered.
    pub denylist: AHashSet<String>,
    ///Include root handed to the preprocessor when assembling the fused
    /// translation unit.
    pub include_root: PathBuf,
    pub include_extension: String,
}

impl Default for FusionConfig {
    fn default() -> Self {
        FusionConfig {
            denylist: DEFAULT_FUSION_DENYLIST.clone(),
            include_root: PathBuf::from("kernel"),
            include_extension: "cl".to_string(),
        }
    }
}

///The fusion check. Kernel metadata and the include/macro preprocessor
/// are injected capabilities, the check itself never touches global state.
pub struct FuseKernels<D: KernelDb, P: Preprocessor> {
    db: D,
    preprocessor: P,
    config: FusionConfig,
}

impl<D: KernelDb, P: Preprocessor> FuseKernels<D, P> {
    pub fn new(db: D, preprocessor: P) -> Self {
        FuseKernels {
            db,
            preprocessor,
            config: FusionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FusionConfig) -> Self {
        self.config = config;
        self
    }

    ///An instruction is fusable iff its key names a registered kernel that
    /// is not denylisted.
    fn is_fusable(&self, key: &str) -> bool {
        self.db.is_kernel(key) && !self.config.denylist.contains(key)
    }

    ///Concatenates the distinct constituent kernels' sources (deduplicated
    /// by compiled-unit identity, declaration order preserved) ahead of
    /// the generated kernel text, then expands includes and macros.
    fn assemble_source(&self, keys: &[String], generated: &str) -> Result<String, OptError> {
        let mut seen_units = AHashSet::new();
        let mut lines = Vec::new();

        for key in keys {
            let info = self
                .db
                .kernel(key)
                .ok_or_else(|| OptError::UnknownKernel(key.clone()))?;
            if seen_units.insert(info.unit) {
                lines.extend(info.source.lines().map(str::to_string));
            }
        }
        lines.extend(generated.lines().map(str::to_string));

        self.preprocessor.process(
            &lines,
            &self.config.include_root,
            &self.config.include_extension,
        )
    }
}

impl<D: KernelDb, P: Preprocessor> ProgramCheck for FuseKernels<D, P> {
    fn name(&self) -> &'static str {
        "fuse-kernels"
    }

    fn kind(&self) -> CheckKind {
        CheckKind::AggressiveOptimization
    }

    fn priority(&self) -> i32 {
        10
    }

    fn apply(&self, mut program: FlProgram) -> Result<FlProgram, OptError> {
        let mut fused_sites = 0;

        for fidx in 0..program.functions.len() {
            let candidates =
                sequence::detect(&program.functions[fidx].instructions, |key| {
                    self.is_fusable(key)
                });

            //splice back-to-front so earlier start indices stay valid
            for candidate in candidates.iter().rev() {
                let name = codegen::fused_name(&candidate.keys);

                if !program.kernels.contains_key(&name) {
                    let generated = codegen::generate(&candidate.keys, &self.db)?;
                    let source = self.assemble_source(&candidate.keys, &generated.text)?;
                    #[cfg(feature = "log")]
                    log::info!(
                        "generated fused kernel {name} from {} instructions",
                        candidate.len
                    );
                    program.kernels.insert(name.clone(), source);
                }

                program.functions[fidx].instructions.splice(
                    candidate.start..candidate.start + candidate.len,
                    [FlInstruction {
                        key: name,
                        args: candidate.args.clone(),
                    }],
                );
                fused_sites += 1;
            }
        }

        #[cfg(feature = "log")]
        log::info!("fused {fused_sites} instruction runs");
        #[cfg(not(feature = "log"))]
        let _ = fused_sites;

        Ok(program)
    }
}
