// WCT - wct-format
// Module: Core module sub-grammar AST
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Core module type sub-grammar.
//!
//! Component types can embed core module types, which carry their own
//! parallel declaration grammar: core imports, core type definitions,
//! aliases and core exports.

use std::sync::Arc;

use crate::alias::Alias;
use crate::binary;

/// Core WebAssembly value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreValType {
    /// 32-bit integer
    I32,
    /// 64-bit integer
    I64,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
    /// 128-bit vector
    V128,
    /// Function reference
    FuncRef,
    /// External reference
    ExternRef,
}

impl CoreValType {
    /// Map a core value-type tag byte to its type.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            binary::CORE_I32 => Some(Self::I32),
            binary::CORE_I64 => Some(Self::I64),
            binary::CORE_F32 => Some(Self::F32),
            binary::CORE_F64 => Some(Self::F64),
            binary::CORE_V128 => Some(Self::V128),
            binary::CORE_FUNCREF => Some(Self::FuncRef),
            binary::CORE_EXTERNREF => Some(Self::ExternRef),
            _ => None,
        }
    }

    /// The tag byte this type is encoded as.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::I32 => binary::CORE_I32,
            Self::I64 => binary::CORE_I64,
            Self::F32 => binary::CORE_F32,
            Self::F64 => binary::CORE_F64,
            Self::V128 => binary::CORE_V128,
            Self::FuncRef => binary::CORE_FUNCREF,
            Self::ExternRef => binary::CORE_EXTERNREF,
        }
    }
}

/// Core function signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreFuncType {
    /// Parameter types
    pub params: Vec<CoreValType>,
    /// Result types
    pub results: Vec<CoreValType>,
}

/// Size limits for tables and memories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Minimum size
    pub min: u32,
    /// Optional maximum size
    pub max: Option<u32>,
}

/// Core table type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableType {
    /// Element reference type
    pub element: CoreValType,
    /// Table size limits
    pub limits: Limits,
}

/// Core memory type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryType {
    /// Memory size limits, in pages
    pub limits: Limits,
}

/// Core global type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalType {
    /// Value type of the global
    pub val_type: CoreValType,
    /// Whether the global is mutable
    pub mutable: bool,
}

/// Core import descriptor: what kind of definition an import or export
/// declaration refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportDesc {
    /// Function with a type index
    Func(u32),
    /// Table
    Table(TableType),
    /// Memory
    Memory(MemoryType),
    /// Global
    Global(GlobalType),
}

/// A core import: module name, field name and descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreImport {
    /// Module name
    pub module: String,
    /// Field name
    pub name: String,
    /// Import descriptor
    pub desc: ImportDesc,
}

/// A core export declaration inside a module type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreExportDecl {
    /// Export name
    pub name: String,
    /// Exported descriptor
    pub desc: ImportDesc,
}

/// A declaration inside a core module type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleDecl {
    /// A core import
    Import(CoreImport),
    /// A core type definition, shared for identity-based index resolution
    Type(Arc<CoreType>),
    /// An alias
    Alias(Alias),
    /// A core export declaration
    Export(CoreExportDecl),
}

/// A core module type: the import/export surface of a core module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleType {
    /// Declarations in order
    pub decls: Vec<ModuleDecl>,
}

/// A core definition type: function signature or module type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreDefType {
    /// Core function signature
    Func(CoreFuncType),
    /// Core module type
    Module(ModuleType),
}

/// A core type entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreType {
    /// The definition
    pub def: CoreDefType,
}
