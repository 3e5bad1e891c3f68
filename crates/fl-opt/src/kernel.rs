/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Read-only view onto the GPU kernel database and the include/macro
//! preprocessor. Both live outside this workspace; the fusion check gets
//! them injected as capabilities instead of touching a process-wide
//! instance.

use std::path::{Path, PathBuf};

use crate::OptError;

///Memory scope of a kernel parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemScope {
    None,
    Global,
    Constant,
}

impl MemScope {
    ///The address-space qualifier emitted in a kernel signature, including
    /// the trailing space.
    pub fn qualifier(&self) -> &'static str {
        match self {
            MemScope::None => "",
            MemScope::Global => "__global ",
            MemScope::Constant => "__constant ",
        }
    }
}

///Element type of a kernel parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Uchar,
    Char,
    Int,
    Uint,
    Float,
}

impl DataType {
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Uchar => "uchar",
            DataType::Char => "char",
            DataType::Int => "int",
            DataType::Uint => "uint",
            DataType::Float => "float",
        }
    }
}

///One kernel parameter beyond the five implicit leading ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelParam {
    pub name: String,
    pub scope: MemScope,
    pub ty: DataType,
    ///Arrays are rendered as pointers in generated signatures.
    pub is_array: bool,
}

impl KernelParam {
    ///Renders `scope type[*] name` for a generated kernel signature.
    pub fn render(&self, name: &str) -> String {
        format!(
            "{}{}{} {}",
            self.scope.qualifier(),
            self.ty.type_name(),
            if self.is_array { "*" } else { "" },
            name
        )
    }
}

///Identity of the compiled translation unit a kernel comes from. Two
/// kernels defined in the same unit share one id, independent of the file
/// path they were loaded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(pub u64);

///Metadata of one registered GPU kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelInfo {
    pub name: String,
    ///Parameters beyond the implicit image, dimensions, channel count,
    /// max value and channel-enable mask.
    pub params: Vec<KernelParam>,
    ///Full source text of the translation unit defining the kernel.
    pub source: String,
    pub file: PathBuf,
    pub unit: UnitId,
}

///Lookup capability into the external kernel database.
pub trait KernelDb {
    fn kernel(&self, key: &str) -> Option<&KernelInfo>;

    ///Whether `key` names a registered kernel at all.
    fn is_kernel(&self, key: &str) -> bool {
        self.kernel(key).is_some()
    }
}

///The external include/macro preprocessor that turns assembled source
/// lines into the final compilable translation unit.
pub trait Preprocessor {
    fn process(
        &self,
        lines: &[String],
        include_root: &Path,
        include_extension: &str,
    ) -> Result<String, OptError>;
}
