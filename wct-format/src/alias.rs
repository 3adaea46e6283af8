// WCT - wct-format
// Module: Alias declarations
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Alias declarations.
//!
//! An alias pulls a definition from an enclosing or sibling scope into the
//! current one. This module only models the shape; resolving what an alias
//! points at is downstream work.

/// Sort of a core (module-level) definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreSort {
    /// Core function
    Func,
    /// Table
    Table,
    /// Memory
    Memory,
    /// Global
    Global,
    /// Core type
    Type,
    /// Core module
    Module,
    /// Core instance
    Instance,
}

/// Sort of a component-level definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sort {
    /// A core sort
    Core(CoreSort),
    /// Component-level function
    Func,
    /// Value
    Value,
    /// Type
    Type,
    /// Component
    Component,
    /// Instance
    Instance,
}

/// What an alias points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasTarget {
    /// Export of a component instance
    InstanceExport {
        /// Instance index
        instance_idx: u32,
        /// Export name
        name: String,
    },
    /// Export of a core instance
    CoreInstanceExport {
        /// Core instance index
        instance_idx: u32,
        /// Export name
        name: String,
    },
    /// Definition of an enclosing component
    Outer {
        /// Number of enclosing components to traverse outward
        count: u32,
        /// Index within the sort in that component
        index: u32,
    },
}

/// An alias declaration: a sort and a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// Sort of the aliased definition
    pub sort: Sort,
    /// Where the definition comes from
    pub target: AliasTarget,
}
