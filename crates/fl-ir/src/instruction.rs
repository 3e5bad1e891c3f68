/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use std::fmt::Display;

use smallvec::SmallVec;

use crate::keywords;

///A single instruction argument. The variant decides which liveness set a
/// reference contributes to, so checks match on it exhaustively instead of
/// testing category flags.
#[derive(Debug, Clone, PartialEq)]
pub enum FlArg {
    ///A numeric constant.
    Number(f64),
    ///Reference to a defined buffer. The identifier may still carry the
    /// [UNMARK_PREFIX](keywords::UNMARK_PREFIX).
    Buffer(String),
    ///Reference to a function of the same program.
    Function(String),
    ///Reference to an external unit produced by function promotion.
    External(String),
    ///Reference to an external unit loaded from a sub-script.
    Script(String),
}

impl FlArg {
    ///The identifier of a reference argument. `None` for constants.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            FlArg::Number(_) => None,
            FlArg::Buffer(name)
            | FlArg::Function(name)
            | FlArg::External(name)
            | FlArg::Script(name) => Some(name),
        }
    }

    ///True for any argument that names a buffer.
    pub fn is_buffer(&self) -> bool {
        matches!(self, FlArg::Buffer(_))
    }

    ///For buffer references, the buffer name with the unmark prefix
    /// stripped.
    pub fn buffer_target(&self) -> Option<&str> {
        if let FlArg::Buffer(name) = self {
            Some(keywords::strip_unmark(name))
        } else {
            None
        }
    }
}

impl Display for FlArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlArg::Number(value) => write!(f, "{value}"),
            FlArg::Buffer(name)
            | FlArg::Function(name)
            | FlArg::External(name)
            | FlArg::Script(name) => write!(f, "{name}"),
        }
    }
}

///One positional instruction within a function: an instruction key (a
/// control-flow opcode or a GPU-kernel opcode) plus its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct FlInstruction {
    pub key: String,
    pub args: SmallVec<[FlArg; 4]>,
}

impl FlInstruction {
    pub fn new(key: impl ToString, args: impl IntoIterator<Item = FlArg>) -> Self {
        FlInstruction {
            key: key.to_string(),
            args: args.into_iter().collect(),
        }
    }

    pub fn is_control_flow(&self) -> bool {
        keywords::is_control_flow(&self.key)
    }
}

///Re-serializes the instruction into the line format the parser consumes.
/// Used when a promoted function body is handed back to the front-end.
impl Display for FlInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
