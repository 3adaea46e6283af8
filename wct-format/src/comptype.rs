// WCT - wct-format
// Module: Component type-section AST
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Typed AST for the component-model type section.
//!
//! Every node is built once by the decoder and read-only afterwards.
//! Composites own their children by value; the one exception is a type
//! definition appearing inside a declaration list, which sits behind a
//! shared handle so downstream index resolution can refer to it by identity
//! from sibling declarations.

use std::sync::Arc;

use crate::alias::Alias;
use crate::binary;

/// Primitive value types, one-to-one with tag bytes `0x73..0x7f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimValType {
    /// `bool`
    Bool,
    /// `s8`
    S8,
    /// `u8`
    U8,
    /// `s16`
    S16,
    /// `u16`
    U16,
    /// `s32`
    S32,
    /// `u32`
    U32,
    /// `s64`
    S64,
    /// `u64`
    U64,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `char`
    Char,
    /// `string`
    String,
}

impl PrimValType {
    /// Map a tag byte in the primitive range to its type.
    ///
    /// Returns `None` for any byte outside `0x73..=0x7f`. The range itself
    /// has no holes, so inside the range this is total.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            binary::VAL_BOOL => Some(Self::Bool),
            binary::VAL_S8 => Some(Self::S8),
            binary::VAL_U8 => Some(Self::U8),
            binary::VAL_S16 => Some(Self::S16),
            binary::VAL_U16 => Some(Self::U16),
            binary::VAL_S32 => Some(Self::S32),
            binary::VAL_U32 => Some(Self::U32),
            binary::VAL_S64 => Some(Self::S64),
            binary::VAL_U64 => Some(Self::U64),
            binary::VAL_FLOAT32 => Some(Self::Float32),
            binary::VAL_FLOAT64 => Some(Self::Float64),
            binary::VAL_CHAR => Some(Self::Char),
            binary::VAL_STRING => Some(Self::String),
            _ => None,
        }
    }

    /// The tag byte this type is encoded as.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::Bool => binary::VAL_BOOL,
            Self::S8 => binary::VAL_S8,
            Self::U8 => binary::VAL_U8,
            Self::S16 => binary::VAL_S16,
            Self::U16 => binary::VAL_U16,
            Self::S32 => binary::VAL_S32,
            Self::U32 => binary::VAL_U32,
            Self::S64 => binary::VAL_S64,
            Self::U64 => binary::VAL_U64,
            Self::Float32 => binary::VAL_FLOAT32,
            Self::Float64 => binary::VAL_FLOAT64,
            Self::Char => binary::VAL_CHAR,
            Self::String => binary::VAL_STRING,
        }
    }
}

/// A value type: either a primitive or a reference to a type by index.
///
/// Index references are not resolved here; checking that the index points at
/// a compatible definition is a downstream pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Primitive value type
    Primitive(PrimValType),
    /// Reference to a previously defined type by index
    TypeIndex(u32),
}

/// A labelled value type, used for record fields, parameters and named
/// results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelValType {
    /// Field label; its byte length always equals the declared length prefix
    pub label: String,
    /// Field type
    pub ty: ValueType,
}

/// A record type. Always has at least one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Fields in declaration order
    pub fields: Vec<LabelValType>,
}

/// One case of a variant type.
///
/// The binary form carries a trailing refinement byte reserved for future
/// use; the decoder requires it to be zero and does not store it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    /// Case label
    pub label: String,
    /// Optional payload type
    pub ty: Option<ValueType>,
}

/// A variant type. May have zero cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantType {
    /// Cases in declaration order
    pub cases: Vec<Case>,
}

/// A list type wrapping exactly one element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListType {
    /// Element type
    pub element: ValueType,
}

/// A tuple type. Always has at least one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleType {
    /// Element types in order
    pub elements: Vec<ValueType>,
}

/// A flags type. Always has at least one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagsType {
    /// Flag labels in declaration order
    pub labels: Vec<String>,
}

/// An enum type. May have zero labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    /// Enum labels in declaration order
    pub labels: Vec<String>,
}

/// An option type wrapping exactly one inner type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionType {
    /// Inner type
    pub inner: ValueType,
}

/// A result type with independently optional ok and err types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultType {
    /// Success type, if any
    pub ok: Option<ValueType>,
    /// Error type, if any
    pub err: Option<ValueType>,
}

/// An owned resource handle, referring to a resource type by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnType {
    /// Resource type index
    pub index: u32,
}

/// A borrowed resource handle, referring to a resource type by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorrowType {
    /// Resource type index
    pub index: u32,
}

/// A defined value type: every shape a value-type definition can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefValType {
    /// Primitive value type
    Primitive(PrimValType),
    /// Record type
    Record(Record),
    /// Variant type
    Variant(VariantType),
    /// List type
    List(ListType),
    /// Tuple type
    Tuple(TupleType),
    /// Flags type
    Flags(FlagsType),
    /// Enum type
    Enum(EnumType),
    /// Option type
    Option(OptionType),
    /// Result type
    Result(ResultType),
    /// Owned resource handle
    Own(OwnType),
    /// Borrowed resource handle
    Borrow(BorrowType),
}

/// The result list of a function type: a single unnamed type or a named
/// multi-result vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultList {
    /// One unnamed result type
    Single(ValueType),
    /// Zero or more named result types
    Named(Vec<LabelValType>),
}

/// A component-level function type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncType {
    /// Named parameters in order
    pub params: Vec<LabelValType>,
    /// Result list
    pub results: ResultList,
}

/// An extern descriptor: the simplified single-shape type descriptor carried
/// by import and export declarations (`0x00 0x11 idx` in the binary form).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternDesc {
    /// Type index the descriptor refers to
    pub index: u32,
}

/// An import declaration inside a component type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Import name
    pub name: String,
    /// Imported extern descriptor
    pub desc: ExternDesc,
}

/// An export declaration inside an instance or component type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDecl {
    /// Export name
    pub name: String,
    /// Exported extern descriptor
    pub desc: ExternDesc,
}

/// A declaration inside an instance type.
///
/// The binary form also defines a core:type declaration (tag `0x00`); the
/// decoder rejects it as a named unsupported form, so it has no
/// representation here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceDecl {
    /// A type definition, shared so sibling declarations can refer to it by
    /// index before or after its definition point
    Type(Arc<DefType>),
    /// An alias into an enclosing or sibling scope
    Alias(Alias),
    /// An export declaration
    Export(ExportDecl),
}

/// A declaration inside a component type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentDecl {
    /// An import declaration
    Import(ImportDecl),
    /// Any instance declaration
    Instance(InstanceDecl),
}

/// A component type: the import/export surface of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentType {
    /// Declarations in order
    pub decls: Vec<ComponentDecl>,
}

/// An instance type: the export surface of an instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceType {
    /// Declarations in order
    pub decls: Vec<InstanceDecl>,
}

/// A definition type: the decode target for one type-section entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefType {
    /// A defined value type
    Value(DefValType),
    /// A component-level function type
    Func(FuncType),
    /// A component type
    Component(ComponentType),
    /// An instance type
    Instance(InstanceType),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_tags_round_trip() {
        for tag in binary::PRIM_VAL_MIN..=binary::PRIM_VAL_MAX {
            let prim = PrimValType::from_tag(tag).unwrap();
            assert_eq!(prim.tag(), tag);
        }
    }

    #[test]
    fn bytes_outside_primitive_range_are_rejected() {
        assert_eq!(PrimValType::from_tag(0x72), None);
        assert_eq!(PrimValType::from_tag(0x80), None);
        assert_eq!(PrimValType::from_tag(0x00), None);
    }

    #[test]
    fn shared_type_definitions_compare_by_content() {
        let a = InstanceDecl::Type(Arc::new(DefType::Value(DefValType::Primitive(
            PrimValType::Char,
        ))));
        let b = InstanceDecl::Type(Arc::new(DefType::Value(DefValType::Primitive(
            PrimValType::Char,
        ))));
        assert_eq!(a, b);
    }
}
