// WCT - wct-format
// Module: Binary format constants and encode helpers
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Component-model type-section binary format.
//!
//! Tag bytes for every construct of the type grammar, plus the LEB128 and
//! string encode helpers used by the encoder and by tests to build inputs.
//! Reading is the decoder's job; this module only names the bytes.

//==========================================================================
// Primitive value types (single tag byte, 0x73..0x7f)
//==========================================================================

/// `bool`
pub const VAL_BOOL: u8 = 0x7F;
/// `s8`
pub const VAL_S8: u8 = 0x7E;
/// `u8`
pub const VAL_U8: u8 = 0x7D;
/// `s16`
pub const VAL_S16: u8 = 0x7C;
/// `u16`
pub const VAL_U16: u8 = 0x7B;
/// `s32`
pub const VAL_S32: u8 = 0x7A;
/// `u32`
pub const VAL_U32: u8 = 0x79;
/// `s64`
pub const VAL_S64: u8 = 0x78;
/// `u64`
pub const VAL_U64: u8 = 0x77;
/// `float32`
pub const VAL_FLOAT32: u8 = 0x76;
/// `float64`
pub const VAL_FLOAT64: u8 = 0x75;
/// `char`
pub const VAL_CHAR: u8 = 0x74;
/// `string`
pub const VAL_STRING: u8 = 0x73;

/// Lowest tag byte of the primitive value-type range.
pub const PRIM_VAL_MIN: u8 = VAL_STRING;
/// Highest tag byte of the primitive value-type range.
pub const PRIM_VAL_MAX: u8 = VAL_BOOL;

//==========================================================================
// Compound value types
//==========================================================================

/// `record` definition type
pub const DEF_RECORD: u8 = 0x72;
/// `variant` definition type
pub const DEF_VARIANT: u8 = 0x71;
/// `list` definition type
pub const DEF_LIST: u8 = 0x70;
/// `tuple` definition type
pub const DEF_TUPLE: u8 = 0x6F;
/// `flags` definition type
pub const DEF_FLAGS: u8 = 0x6E;
/// `enum` definition type
pub const DEF_ENUM: u8 = 0x6D;
/// `option` definition type
pub const DEF_OPTION: u8 = 0x6B;
/// `result` definition type
pub const DEF_RESULT: u8 = 0x6A;
/// `own` resource handle
pub const DEF_OWN: u8 = 0x69;
/// `borrow` resource handle
pub const DEF_BORROW: u8 = 0x68;

//==========================================================================
// Higher-order definition types
//==========================================================================

/// Component-level function type
pub const DEF_FUNC: u8 = 0x40;
/// Component type
pub const DEF_COMPONENT: u8 = 0x41;
/// Instance type
pub const DEF_INSTANCE: u8 = 0x42;

/// Result-list shape: a single unnamed type
pub const RESULTLIST_SINGLE: u8 = 0x00;
/// Result-list shape: a named multi-result vector
pub const RESULTLIST_NAMED: u8 = 0x01;

/// Optional-value presence: absent
pub const OPTIONAL_ABSENT: u8 = 0x00;
/// Optional-value presence: present, one value follows
pub const OPTIONAL_PRESENT: u8 = 0x01;

/// Required terminator of a variant case (reserved refinement slot)
pub const CASE_REFINES_NONE: u8 = 0x00;

//==========================================================================
// Component and instance declarations
//==========================================================================

/// Leading byte of an import declaration inside a component type
pub const COMPONENT_DECL_IMPORT: u8 = 0x03;

/// Instance declaration: core:type (recognized, unsupported)
pub const INSTANCE_DECL_CORE_TYPE: u8 = 0x00;
/// Instance declaration: type definition
pub const INSTANCE_DECL_TYPE: u8 = 0x01;
/// Instance declaration: alias
pub const INSTANCE_DECL_ALIAS: u8 = 0x02;
/// Instance declaration: export
pub const INSTANCE_DECL_EXPORT: u8 = 0x04;

/// First fixed byte of an extern descriptor
pub const EXTERN_DESC_PREFIX: u8 = 0x00;
/// Second fixed byte of an extern descriptor (type sort)
pub const EXTERN_DESC_TYPE_SORT: u8 = 0x11;

//==========================================================================
// Core module sub-grammar
//==========================================================================

/// Leading byte of a core module type
pub const CORE_MODULE_TYPE: u8 = 0x50;
/// Leading byte of a core function type
pub const CORE_FUNC_TYPE: u8 = 0x60;

/// Module declaration: core import
pub const MODULE_DECL_IMPORT: u8 = 0x00;
/// Module declaration: core type definition
pub const MODULE_DECL_TYPE: u8 = 0x01;
/// Module declaration: alias
pub const MODULE_DECL_ALIAS: u8 = 0x02;
/// Module declaration: core export
pub const MODULE_DECL_EXPORT: u8 = 0x03;

/// Core value type `i32`
pub const CORE_I32: u8 = 0x7F;
/// Core value type `i64`
pub const CORE_I64: u8 = 0x7E;
/// Core value type `f32`
pub const CORE_F32: u8 = 0x7D;
/// Core value type `f64`
pub const CORE_F64: u8 = 0x7C;
/// Core value type `v128`
pub const CORE_V128: u8 = 0x7B;
/// Core reference type `funcref`
pub const CORE_FUNCREF: u8 = 0x70;
/// Core reference type `externref`
pub const CORE_EXTERNREF: u8 = 0x6F;

/// Core import descriptor: function (type index follows)
pub const IMPORT_DESC_FUNC: u8 = 0x00;
/// Core import descriptor: table
pub const IMPORT_DESC_TABLE: u8 = 0x01;
/// Core import descriptor: memory
pub const IMPORT_DESC_MEMORY: u8 = 0x02;
/// Core import descriptor: global
pub const IMPORT_DESC_GLOBAL: u8 = 0x03;

/// Limits with a minimum only
pub const LIMITS_MIN: u8 = 0x00;
/// Limits with a minimum and a maximum
pub const LIMITS_MIN_MAX: u8 = 0x01;

/// Immutable global flag
pub const GLOBAL_CONST: u8 = 0x00;
/// Mutable global flag
pub const GLOBAL_VAR: u8 = 0x01;

//==========================================================================
// Alias sub-grammar
//==========================================================================

/// Sort: core (a core sort byte follows)
pub const SORT_CORE: u8 = 0x00;
/// Sort: function
pub const SORT_FUNC: u8 = 0x01;
/// Sort: value
pub const SORT_VALUE: u8 = 0x02;
/// Sort: type
pub const SORT_TYPE: u8 = 0x03;
/// Sort: component
pub const SORT_COMPONENT: u8 = 0x04;
/// Sort: instance
pub const SORT_INSTANCE: u8 = 0x05;

/// Core sort: function
pub const CORE_SORT_FUNC: u8 = 0x00;
/// Core sort: table
pub const CORE_SORT_TABLE: u8 = 0x01;
/// Core sort: memory
pub const CORE_SORT_MEMORY: u8 = 0x02;
/// Core sort: global
pub const CORE_SORT_GLOBAL: u8 = 0x03;
/// Core sort: type
pub const CORE_SORT_TYPE: u8 = 0x10;
/// Core sort: module
pub const CORE_SORT_MODULE: u8 = 0x11;
/// Core sort: instance
pub const CORE_SORT_INSTANCE: u8 = 0x12;

/// Alias target: export of a component instance
pub const ALIAS_TARGET_EXPORT: u8 = 0x00;
/// Alias target: export of a core instance
pub const ALIAS_TARGET_CORE_EXPORT: u8 = 0x01;
/// Alias target: outer definition of an enclosing component
pub const ALIAS_TARGET_OUTER: u8 = 0x02;

//==========================================================================
// Encode helpers
//==========================================================================

/// Write a `u32` as unsigned LEB128.
#[must_use]
pub fn write_leb128_u32(value: u32) -> Vec<u8> {
    let mut result = Vec::new();
    let mut remaining = value;

    loop {
        let mut byte = (remaining & 0x7F) as u8;
        remaining >>= 7;
        if remaining != 0 {
            byte |= 0x80;
        }
        result.push(byte);
        if remaining == 0 {
            break;
        }
    }

    result
}

/// Write a length-prefixed UTF-8 string.
#[must_use]
pub fn write_string(value: &str) -> Vec<u8> {
    let mut result = write_leb128_u32(value.len() as u32);
    result.extend_from_slice(value.as_bytes());
    result
}

/// Write a length-prefixed vector, using `write_elem` for each element.
pub fn write_vector<T, F>(elements: &[T], write_elem: F) -> Vec<u8>
where
    F: Fn(&T) -> Vec<u8>,
{
    let mut result = write_leb128_u32(elements.len() as u32);
    for elem in elements {
        result.extend_from_slice(&write_elem(elem));
    }
    result
}
