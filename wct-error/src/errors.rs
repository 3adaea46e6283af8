// WCT - wct-error
// Module: Error types
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Unified error type for wct.
//!
//! Decoder failures are plain values: category, numeric code, static message,
//! the byte offset at which the violation was detected and the grammar
//! production that was being decoded. Whether and how a failure is logged is
//! the caller's decision; nothing in this crate writes to a sink.

use core::fmt;

use crate::codes;

/// Error categories for wct operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Cursor-level failures: truncated input, bad fixed bytes, bad LEB128
    Parse = 1,
    /// Structural malformations of the type grammar
    Type = 2,
    /// Well-formedness violations (emptiness constraints, refinement bytes)
    Validation = 3,
    /// Decoder resource limits (nesting depth)
    Resource = 4,
    /// Recognized but deliberately unsupported constructs
    NotSupported = 5,
}

impl ErrorCategory {
    /// Stable lowercase name, used in `Display` output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Type => "type",
            Self::Validation => "validation",
            Self::Resource => "resource",
            Self::NotSupported => "not-supported",
        }
    }
}

/// Grammar production being decoded when a failure was detected.
///
/// Mirrors the productions of the component-model type grammar; carried on
/// every [`Error`] for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstNode {
    /// A definition-type entry of the type section
    DefType,
    /// A length-prefixed label
    Label,
    /// A value type (primitive or type index)
    ValueType,
    /// A record type
    Record,
    /// A variant type or one of its cases
    Variant,
    /// A list type
    List,
    /// A tuple type
    Tuple,
    /// A flags type
    Flags,
    /// An enum type
    Enum,
    /// An option type
    OptionType,
    /// A result type
    ResultType,
    /// An own or borrow resource handle
    ResourceHandle,
    /// A component-level function type
    FuncType,
    /// A component type and its declarations
    ComponentType,
    /// An instance type and its declarations
    InstanceType,
    /// An extern descriptor
    ExternDesc,
    /// An alias declaration
    Alias,
    /// A core module type and its declarations
    ModuleType,
    /// A core type (core function type or module type)
    CoreType,
    /// A core import or its descriptor
    ImportDesc,
}

impl AstNode {
    /// Stable lowercase name, used in `Display` output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DefType => "deftype",
            Self::Label => "label",
            Self::ValueType => "valtype",
            Self::Record => "record",
            Self::Variant => "variant",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Flags => "flags",
            Self::Enum => "enum",
            Self::OptionType => "option",
            Self::ResultType => "result",
            Self::ResourceHandle => "own/borrow",
            Self::FuncType => "functype",
            Self::ComponentType => "componenttype",
            Self::InstanceType => "instancetype",
            Self::ExternDesc => "externdesc",
            Self::Alias => "alias",
            Self::ModuleType => "moduletype",
            Self::CoreType => "coretype",
            Self::ImportDesc => "importdesc",
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// wct `Error` type
///
/// `Copy` so it can be propagated and stored freely; no allocation on the
/// error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    /// Error category
    pub category: ErrorCategory,
    /// Error code, see [`crate::codes`]
    pub code: u16,
    /// Static error message
    pub message: &'static str,
    /// Byte offset into the decoded buffer at which the violation was detected
    pub offset: usize,
    /// Enclosing grammar production, if one was established
    pub node: Option<AstNode>,
}

impl Error {
    /// Create a new error with no offset or production context yet.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message,
            offset: 0,
            node: None,
        }
    }

    /// Attach the byte offset at which the violation was detected.
    #[must_use]
    pub const fn at_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Attach the enclosing grammar production.
    ///
    /// The innermost production wins: once a node is recorded, outer decoders
    /// propagating the error do not overwrite it.
    #[must_use]
    pub const fn in_node(mut self, node: AstNode) -> Self {
        if self.node.is_none() {
            self.node = Some(node);
        }
        self
    }

    /// Whether this error is a structural-malformation kind (as opposed to a
    /// cursor exhaustion/mismatch surfaced from the reader).
    #[must_use]
    pub const fn is_malformation(&self) -> bool {
        matches!(
            self.category,
            ErrorCategory::Type | ErrorCategory::Validation
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{:04}] {} (offset {:#x}",
            self.category.name(),
            self.code,
            self.message,
            self.offset
        )?;
        if let Some(node) = self.node {
            write!(f, ", in {node}")?;
        }
        f.write_str(")")
    }
}

impl core::error::Error for Error {}

// Constructors for the closed taxonomy. Offsets are attached at the
// detection site via `at_offset`.

impl Error {
    /// Record type with zero fields.
    #[must_use]
    pub const fn malformed_record_type() -> Self {
        Self::new(
            ErrorCategory::Validation,
            codes::MALFORMED_RECORD_TYPE,
            "malformed record type",
        )
    }

    /// Variant case with a nonzero refinement byte.
    #[must_use]
    pub const fn malformed_variant_type() -> Self {
        Self::new(
            ErrorCategory::Validation,
            codes::MALFORMED_VARIANT_TYPE,
            "malformed variant type",
        )
    }

    /// Tuple type with zero element types.
    #[must_use]
    pub const fn malformed_tuple_type() -> Self {
        Self::new(
            ErrorCategory::Validation,
            codes::MALFORMED_TUPLE_TYPE,
            "malformed tuple type",
        )
    }

    /// Flags type with zero labels.
    #[must_use]
    pub const fn malformed_flags_type() -> Self {
        Self::new(
            ErrorCategory::Validation,
            codes::MALFORMED_FLAGS_TYPE,
            "malformed flags type",
        )
    }

    /// Unrecognized tag byte in a definition-type position.
    #[must_use]
    pub const fn malformed_def_type() -> Self {
        Self::new(
            ErrorCategory::Type,
            codes::MALFORMED_DEF_TYPE,
            "malformed definition type",
        )
    }

    /// Unrecognized tag byte in a core module declaration position.
    #[must_use]
    pub const fn malformed_module_type() -> Self {
        Self::new(
            ErrorCategory::Type,
            codes::MALFORMED_MODULE_TYPE,
            "malformed core module type",
        )
    }

    /// Unrecognized sort or target tag in an alias.
    #[must_use]
    pub const fn malformed_alias() -> Self {
        Self::new(
            ErrorCategory::Type,
            codes::MALFORMED_ALIAS,
            "malformed alias",
        )
    }

    /// Unrecognized core import descriptor, limits or mutability tag.
    #[must_use]
    pub const fn malformed_import_desc() -> Self {
        Self::new(
            ErrorCategory::Type,
            codes::MALFORMED_IMPORT_DESC,
            "malformed core import descriptor",
        )
    }

    /// Type nesting exceeds the configured decoder depth limit.
    #[must_use]
    pub const fn nesting_too_deep() -> Self {
        Self::new(
            ErrorCategory::Resource,
            codes::NESTING_TOO_DEEP,
            "type nesting exceeds decoder depth limit",
        )
    }

    /// core:type inside an instance declaration: recognized, not supported.
    #[must_use]
    pub const fn unsupported_core_type() -> Self {
        Self::new(
            ErrorCategory::NotSupported,
            codes::UNSUPPORTED_CORE_TYPE,
            "core:type in type section is not supported",
        )
    }

    /// Read past the end of the input buffer.
    #[must_use]
    pub const fn unexpected_end() -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::UNEXPECTED_END,
            "unexpected end of input",
        )
    }

    /// A fixed byte did not have its required value.
    #[must_use]
    pub const fn unexpected_byte() -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::UNEXPECTED_BYTE,
            "unexpected byte value",
        )
    }

    /// LEB128 integer does not fit in 32 bits or runs past 5 bytes.
    #[must_use]
    pub const fn integer_too_large() -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::INTEGER_TOO_LARGE,
            "LEB128 integer too large",
        )
    }

    /// Length-prefixed name is not valid UTF-8.
    #[must_use]
    pub const fn invalid_utf8() -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::INVALID_UTF8,
            "name is not valid UTF-8",
        )
    }

    /// Input not fully consumed after a complete section decode.
    #[must_use]
    pub const fn trailing_bytes() -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::TRAILING_BYTES,
            "trailing bytes after section contents",
        )
    }
}
