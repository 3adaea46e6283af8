// WCT - wct-error
// Module: Error codes
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for wct.
//!
//! One code per grammar production that can be structurally violated, plus
//! the cursor-level codes surfaced by the byte reader. Codes are grouped by
//! range: 1000-1999 for cursor/primitive failures, 2000-2999 for type-grammar
//! malformations, 3000-3999 for decoder limits and unsupported forms.

// Cursor / primitive reader codes (1000-1999)

/// Read past the end of the input buffer
pub const UNEXPECTED_END: u16 = 1000;
/// A fixed byte did not have its required value
pub const UNEXPECTED_BYTE: u16 = 1001;
/// LEB128 integer does not fit in 32 bits or runs past 5 bytes
pub const INTEGER_TOO_LARGE: u16 = 1002;
/// Length-prefixed name is not valid UTF-8
pub const INVALID_UTF8: u16 = 1003;
/// Input not fully consumed after a complete section decode
pub const TRAILING_BYTES: u16 = 1004;

// Type-grammar malformation codes (2000-2999)

/// Record type with zero fields
pub const MALFORMED_RECORD_TYPE: u16 = 2000;
/// Variant case with a nonzero refinement byte
pub const MALFORMED_VARIANT_TYPE: u16 = 2001;
/// Tuple type with zero element types
pub const MALFORMED_TUPLE_TYPE: u16 = 2002;
/// Flags type with zero labels
pub const MALFORMED_FLAGS_TYPE: u16 = 2003;
/// Unrecognized tag byte in a definition-type position
pub const MALFORMED_DEF_TYPE: u16 = 2004;
/// Unrecognized tag byte in a core module declaration position
pub const MALFORMED_MODULE_TYPE: u16 = 2005;
/// Unrecognized sort or target tag in an alias
pub const MALFORMED_ALIAS: u16 = 2006;
/// Unrecognized core import descriptor, limits or mutability tag
pub const MALFORMED_IMPORT_DESC: u16 = 2007;

// Decoder limit / support codes (3000-3999)

/// Type nesting exceeds the configured decoder depth limit
pub const NESTING_TOO_DEEP: u16 = 3000;
/// core:type inside an instance declaration is recognized but not supported
pub const UNSUPPORTED_CORE_TYPE: u16 = 3001;
