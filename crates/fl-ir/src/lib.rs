/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! # FL-IR
//!
//! The mutable program representation of the FL language. The front-end
//! parser emits one [FlProgram] per script, the optimizer checks in
//! `fl-opt` rewrite it in place, and the runtime consumes the final
//! program together with any kernels the fusion pass embedded.
//!
//! The crate also carries the interface boundaries this representation is
//! built against: the [FlParser](parse::FlParser) capability used by
//! checks that need to re-parse serialized instruction streams, the
//! [StaticInspection](inspection::StaticInspection) pre-IR view the early
//! function eliminator works on, and the lazily materialized
//! [CachedScript](cache::CachedScript) buffer source.

pub mod buffer;
pub mod cache;
mod error;
pub mod external;
pub mod function;
pub mod inspection;
pub mod instruction;
pub mod keywords;
pub mod parse;
mod program;

pub use buffer::{BufferModifiers, BufferSource, FlBuffer};
pub use error::IrError;
pub use external::{ExternalUnit, UnitModifiers};
pub use function::{FlFunction, FunctionModifiers};
pub use instruction::{FlArg, FlInstruction};
pub use program::FlProgram;
