/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Test doubles for the external collaborators: a line parser for the
//! serialized instruction-stream format, an in-memory kernel database and
//! a preprocessor that only concatenates.

use std::path::PathBuf;

use ahash::AHashMap;
use fl_ir::{
    keywords,
    parse::FlParser,
    FlArg, FlFunction, FlInstruction, FlProgram, IrError,
};

use crate::kernel::{KernelDb, KernelInfo, KernelParam, Preprocessor, UnitId};
use crate::OptError;

///Parses the exact line format [FlInstruction]'s `Display` emits:
/// `Name:` labels open a function, every other non-empty line is
/// `key arg...`. Numbers become constants, the first argument of a
/// control-flow key becomes a function reference, everything else a
/// buffer reference.
#[derive(Default)]
pub struct StreamParser;

impl FlParser for StreamParser {
    fn parse(&self, source_name: &str, lines: &[String]) -> Result<FlProgram, IrError> {
        let mut program = FlProgram::new();

        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(label) = line.strip_suffix(':') {
                program.functions.push(FlFunction::new(label));
                continue;
            }

            let mut parts = line.split_whitespace();
            let key = parts.next().unwrap_or_default().to_string();
            let args = parts
                .enumerate()
                .map(|(idx, raw)| {
                    if let Ok(value) = raw.parse::<f64>() {
                        FlArg::Number(value)
                    } else if idx == 0 && keywords::is_control_flow(&key) {
                        FlArg::Function(raw.to_string())
                    } else {
                        FlArg::Buffer(raw.to_string())
                    }
                })
                .collect::<Vec<_>>();

            let function = program.functions.last_mut().ok_or_else(|| IrError::Parse {
                source_name: source_name.to_string(),
                text: format!("instruction \"{line}\" before any function label"),
            })?;
            function.instructions.push(FlInstruction::new(key, args));
        }

        Ok(program)
    }
}

///In-memory kernel database.
#[derive(Default)]
pub struct MockKernelDb {
    kernels: AHashMap<String, KernelInfo>,
}

impl MockKernelDb {
    pub fn insert(
        &mut self,
        key: &str,
        params: Vec<KernelParam>,
        source: &str,
        file: &str,
        unit: UnitId,
    ) {
        self.kernels.insert(
            key.to_string(),
            KernelInfo {
                name: key.to_string(),
                params,
                source: source.to_string(),
                file: PathBuf::from(file),
                unit,
            },
        );
    }
}

impl KernelDb for MockKernelDb {
    fn kernel(&self, key: &str) -> Option<&KernelInfo> {
        self.kernels.get(key)
    }
}

///Preprocessor double that just joins the lines, no include or macro
/// expansion.
#[derive(Default)]
pub struct JoinPreprocessor;

impl Preprocessor for JoinPreprocessor {
    fn process(
        &self,
        lines: &[String],
        _include_root: &std::path::Path,
        _include_extension: &str,
    ) -> Result<String, OptError> {
        Ok(lines.join("\n"))
    }
}
