/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use crate::{keywords, FlInstruction};

///Modifier set of a function, as declared in the script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunctionModifiers {
    ///Static functions have no data dependency on their call site and can
    /// be promoted to external units.
    pub is_static: bool,
    ///The function's result does not change between invocations.
    pub compute_once: bool,
}

///A named, ordered instruction list.
#[derive(Debug, Clone, PartialEq)]
pub struct FlFunction {
    pub name: String,
    pub instructions: Vec<FlInstruction>,
    pub modifiers: FunctionModifiers,
}

impl FlFunction {
    pub fn new(name: impl ToString) -> Self {
        FlFunction {
            name: name.to_string(),
            instructions: Vec::new(),
            modifiers: FunctionModifiers::default(),
        }
    }

    pub fn with_instructions(
        name: impl ToString,
        instructions: impl IntoIterator<Item = FlInstruction>,
    ) -> Self {
        FlFunction {
            name: name.to_string(),
            instructions: instructions.into_iter().collect(),
            modifiers: FunctionModifiers::default(),
        }
    }

    pub fn is_entry(&self) -> bool {
        self.name == keywords::ENTRY_FUNCTION
    }

    ///Serializes the function body into parser input lines, prefixed with
    /// the entry label so the result is a standalone program.
    pub fn serialize_as_entry(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.instructions.len() + 1);
        lines.push(format!("{}:", keywords::ENTRY_FUNCTION));
        for inst in &self.instructions {
            lines.push(inst.to_string());
        }
        lines
    }
}
