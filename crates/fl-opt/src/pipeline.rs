/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use fl_ir::{inspection::StaticInspection, FlProgram};

use crate::{CheckKind, InspectionCheck, OptError, ProgramCheck};

///Which check classes the pipeline executes. Mandatory checks always run,
/// [CheckKind::Disabled] checks never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckProfile {
    pub optimizations: bool,
    pub aggressive_optimizations: bool,
}

impl CheckProfile {
    ///Runs only mandatory checks.
    pub fn mandatory_only() -> Self {
        CheckProfile {
            optimizations: false,
            aggressive_optimizations: false,
        }
    }

    ///Runs everything that is not disabled.
    pub fn full() -> Self {
        CheckProfile {
            optimizations: true,
            aggressive_optimizations: true,
        }
    }

    pub fn enables(&self, kind: CheckKind) -> bool {
        match kind {
            CheckKind::Mandatory => true,
            CheckKind::Optimization => self.optimizations,
            CheckKind::AggressiveOptimization => self.aggressive_optimizations,
            CheckKind::Disabled => false,
        }
    }
}

impl Default for CheckProfile {
    fn default() -> Self {
        CheckProfile {
            optimizations: true,
            aggressive_optimizations: false,
        }
    }
}

///Owns the registered checks and executes the enabled ones strictly
/// sequentially in ascending priority order.
pub struct CheckPipeline {
    profile: CheckProfile,
    inspection_checks: Vec<Box<dyn InspectionCheck>>,
    checks: Vec<Box<dyn ProgramCheck>>,
}

impl CheckPipeline {
    pub fn new(profile: CheckProfile) -> Self {
        CheckPipeline {
            profile,
            inspection_checks: Vec::new(),
            checks: Vec::new(),
        }
    }

    pub fn with_check(mut self, check: impl ProgramCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn with_inspection_check(mut self, check: impl InspectionCheck + 'static) -> Self {
        self.inspection_checks.push(Box::new(check));
        self
    }

    ///Runs the enabled pre-IR checks on the parser's static inspection
    /// view.
    pub fn run_inspection(
        &self,
        mut inspection: StaticInspection,
    ) -> Result<StaticInspection, OptError> {
        for idx in ordered(self.inspection_checks.iter().map(|c| {
            (self.profile.enables(c.kind()), c.priority())
        })) {
            let check = &self.inspection_checks[idx];
            #[cfg(feature = "log")]
            log::debug!("running inspection check {}", check.name());
            inspection = check.apply(inspection)?;
        }
        Ok(inspection)
    }

    ///Runs the enabled program checks. Each check sees the fully settled
    /// output of its predecessor; the first error aborts the whole run.
    pub fn run(&self, mut program: FlProgram) -> Result<FlProgram, OptError> {
        for idx in ordered(
            self.checks
                .iter()
                .map(|c| (self.profile.enables(c.kind()), c.priority())),
        ) {
            let check = &self.checks[idx];
            #[cfg(feature = "log")]
            log::debug!("running check {}", check.name());
            program = check.apply(program)?;
        }
        Ok(program)
    }
}

///Indices of the enabled checks, sorted by priority. The sort is stable,
/// so equal priorities keep their registration order.
fn ordered(checks: impl Iterator<Item = (bool, i32)>) -> Vec<usize> {
    let mut enabled = checks
        .enumerate()
        .filter_map(|(idx, (enabled, priority))| enabled.then_some((idx, priority)))
        .collect::<Vec<_>>();
    enabled.sort_by_key(|(_, priority)| *priority);
    enabled.into_iter().map(|(idx, _)| idx).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        name: &'static str,
        kind: CheckKind,
        priority: i32,
    }

    impl ProgramCheck for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }
        fn kind(&self) -> CheckKind {
            self.kind
        }
        fn priority(&self) -> i32 {
            self.priority
        }
        fn apply(&self, mut program: FlProgram) -> Result<FlProgram, OptError> {
            //abuse the kernel map as an execution trace
            let order = program.kernels.len();
            program.kernels.insert(self.name.to_string(), order.to_string());
            Ok(program)
        }
    }

    fn trace(profile: CheckProfile, checks: Vec<Recorder>) -> Vec<(String, String)> {
        let mut pipeline = CheckPipeline::new(profile);
        for check in checks {
            pipeline = pipeline.with_check(check);
        }
        let program = pipeline.run(FlProgram::new()).unwrap();
        let mut entries = program
            .kernels
            .into_iter()
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.1.cmp(&b.1));
        entries
    }

    #[test]
    fn priority_order_with_stable_ties() {
        let entries = trace(
            CheckProfile::full(),
            vec![
                Recorder {
                    name: "b",
                    kind: CheckKind::Optimization,
                    priority: 3,
                },
                Recorder {
                    name: "a",
                    kind: CheckKind::Optimization,
                    priority: -1,
                },
                Recorder {
                    name: "c",
                    kind: CheckKind::Optimization,
                    priority: 3,
                },
            ],
        );
        let names = entries.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn profile_filters_checks() {
        let entries = trace(
            CheckProfile::default(),
            vec![
                Recorder {
                    name: "mandatory",
                    kind: CheckKind::Mandatory,
                    priority: 0,
                },
                Recorder {
                    name: "aggressive",
                    kind: CheckKind::AggressiveOptimization,
                    priority: 0,
                },
                Recorder {
                    name: "disabled",
                    kind: CheckKind::Disabled,
                    priority: -10,
                },
            ],
        );
        let names = entries.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["mandatory"]);
    }
}
