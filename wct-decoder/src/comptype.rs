// WCT - wct-decoder
// Module: Component type decoding
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Recursive-descent decoder for component-level definition types.
//!
//! Strictly top-down over one forward-only [`Reader`]: each decoder reads a
//! tag byte or length prefix, branches, and recurses into sub-decoders. No
//! backtracking, no lookahead beyond one byte. Nesting depth is bounded
//! explicitly; attacker-controlled input cannot drive the decoder into
//! native stack overflow.

use std::sync::Arc;

use wct_error::{AstNode, Error, Result};
use wct_format::binary;
use wct_format::comptype::{
    BorrowType, Case, ComponentDecl, ComponentType, DefType, DefValType, EnumType, ExportDecl,
    ExternDesc, FlagsType, FuncType, ImportDecl, InstanceDecl, InstanceType, LabelValType,
    ListType, OptionType, OwnType, PrimValType, Record, ResultList, ResultType, TupleType,
    ValueType, VariantType,
};

use crate::reader::Reader;

/// Default maximum type-nesting depth.
///
/// Deep enough for any realistic interface description; shallow enough that
/// decoding stays well inside the native call stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decoder for one type-section entry.
///
/// Borrows the caller's cursor so framing code can decode several entries in
/// sequence from the same section range.
#[derive(Debug)]
pub struct TypeDecoder<'r, 'a> {
    pub(crate) reader: &'r mut Reader<'a>,
    pub(crate) depth: usize,
    pub(crate) max_depth: usize,
}

impl<'r, 'a> TypeDecoder<'r, 'a> {
    /// Create a decoder with the default nesting-depth limit.
    pub fn new(reader: &'r mut Reader<'a>) -> Self {
        Self::with_max_depth(reader, DEFAULT_MAX_DEPTH)
    }

    /// Create a decoder with an explicit nesting-depth limit.
    pub fn with_max_depth(reader: &'r mut Reader<'a>, max_depth: usize) -> Self {
        Self {
            reader,
            depth: 0,
            max_depth,
        }
    }

    /// Run `f` one nesting level deeper, failing before the call if the
    /// configured limit is reached.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            return Err(Error::nesting_too_deep().at_offset(self.reader.offset()));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Decode a length-prefixed vector, one element at a time.
    ///
    /// Propagates the first element failure. The declared count is
    /// attacker-controlled, so preallocation is capped.
    pub(crate) fn decode_vec<T>(
        &mut self,
        mut elem: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let count = self.reader.read_var_u32()?;
        let mut items = Vec::with_capacity(count.min(64) as usize);
        for _ in 0..count {
            items.push(elem(self)?);
        }
        Ok(items)
    }

    /// Decode an optional value: a presence byte, then on `0x01` one `T`.
    ///
    /// Shared by case payloads and the result type's ok/err slots.
    pub(crate) fn decode_optional<T>(
        &mut self,
        elem: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<Option<T>> {
        let at = self.reader.offset();
        match self.reader.read_byte()? {
            binary::OPTIONAL_ABSENT => Ok(None),
            binary::OPTIONAL_PRESENT => elem(self).map(Some),
            _ => Err(Error::malformed_def_type().at_offset(at)),
        }
    }

    /// Decode a label: one length prefix, then that many UTF-8 bytes.
    pub(crate) fn decode_label(&mut self) -> Result<String> {
        self.reader
            .read_name()
            .map_err(|e| e.in_node(AstNode::Label))
    }

    /// Decode a value type: a primitive tag byte, or the start of a
    /// varint-encoded type index.
    pub fn decode_value_type(&mut self) -> Result<ValueType> {
        let tag = self
            .reader
            .peek_byte()
            .map_err(|e| e.in_node(AstNode::ValueType))?;
        if let Some(prim) = PrimValType::from_tag(tag) {
            self.reader.read_byte()?;
            Ok(ValueType::Primitive(prim))
        } else {
            let index = self
                .reader
                .read_var_u32()
                .map_err(|e| e.in_node(AstNode::ValueType))?;
            Ok(ValueType::TypeIndex(index))
        }
    }

    fn decode_label_val_type(&mut self) -> Result<LabelValType> {
        let label = self.decode_label()?;
        let ty = self.decode_value_type()?;
        Ok(LabelValType { label, ty })
    }

    fn decode_record(&mut self) -> Result<Record> {
        let at = self.reader.offset();
        let fields = self
            .decode_vec(Self::decode_label_val_type)
            .map_err(|e| e.in_node(AstNode::Record))?;
        if fields.is_empty() {
            return Err(Error::malformed_record_type()
                .at_offset(at)
                .in_node(AstNode::Record));
        }
        Ok(Record { fields })
    }

    fn decode_case(&mut self) -> Result<Case> {
        let label = self.decode_label()?;
        let ty = self.decode_optional(Self::decode_value_type)?;
        // Reserved refinement slot, required to be zero.
        let at = self.reader.offset();
        if self.reader.read_var_u32()? != 0 {
            return Err(Error::malformed_variant_type().at_offset(at));
        }
        Ok(Case { label, ty })
    }

    fn decode_variant(&mut self) -> Result<VariantType> {
        let cases = self
            .decode_vec(Self::decode_case)
            .map_err(|e| e.in_node(AstNode::Variant))?;
        Ok(VariantType { cases })
    }

    fn decode_list(&mut self) -> Result<ListType> {
        let element = self
            .decode_value_type()
            .map_err(|e| e.in_node(AstNode::List))?;
        Ok(ListType { element })
    }

    fn decode_tuple(&mut self) -> Result<TupleType> {
        let at = self.reader.offset();
        let elements = self
            .decode_vec(Self::decode_value_type)
            .map_err(|e| e.in_node(AstNode::Tuple))?;
        if elements.is_empty() {
            return Err(Error::malformed_tuple_type()
                .at_offset(at)
                .in_node(AstNode::Tuple));
        }
        Ok(TupleType { elements })
    }

    fn decode_flags(&mut self) -> Result<FlagsType> {
        let at = self.reader.offset();
        let labels = self
            .decode_vec(Self::decode_label)
            .map_err(|e| e.in_node(AstNode::Flags))?;
        if labels.is_empty() {
            return Err(Error::malformed_flags_type()
                .at_offset(at)
                .in_node(AstNode::Flags));
        }
        Ok(FlagsType { labels })
    }

    fn decode_enum(&mut self) -> Result<EnumType> {
        let labels = self
            .decode_vec(Self::decode_label)
            .map_err(|e| e.in_node(AstNode::Enum))?;
        Ok(EnumType { labels })
    }

    fn decode_option_type(&mut self) -> Result<OptionType> {
        let inner = self
            .decode_value_type()
            .map_err(|e| e.in_node(AstNode::OptionType))?;
        Ok(OptionType { inner })
    }

    fn decode_result_type(&mut self) -> Result<ResultType> {
        let ok = self
            .decode_optional(Self::decode_value_type)
            .map_err(|e| e.in_node(AstNode::ResultType))?;
        let err = self
            .decode_optional(Self::decode_value_type)
            .map_err(|e| e.in_node(AstNode::ResultType))?;
        Ok(ResultType { ok, err })
    }

    /// Decode one definition type, the target of a type-section entry.
    ///
    /// The leading tag byte selects among primitives, compound value types,
    /// function types and the higher-order component/instance forms. An
    /// unrecognized tag is a malformed definition type.
    pub fn decode_def_type(&mut self) -> Result<DefType> {
        self.nested(Self::decode_def_type_inner)
            .map_err(|e| e.in_node(AstNode::DefType))
    }

    fn decode_def_type_inner(&mut self) -> Result<DefType> {
        let at = self.reader.offset();
        let tag = self.reader.read_byte()?;
        if let Some(prim) = PrimValType::from_tag(tag) {
            return Ok(DefType::Value(DefValType::Primitive(prim)));
        }
        match tag {
            binary::DEF_RECORD => Ok(DefType::Value(DefValType::Record(self.decode_record()?))),
            binary::DEF_VARIANT => Ok(DefType::Value(DefValType::Variant(self.decode_variant()?))),
            binary::DEF_LIST => Ok(DefType::Value(DefValType::List(self.decode_list()?))),
            binary::DEF_TUPLE => Ok(DefType::Value(DefValType::Tuple(self.decode_tuple()?))),
            binary::DEF_FLAGS => Ok(DefType::Value(DefValType::Flags(self.decode_flags()?))),
            binary::DEF_ENUM => Ok(DefType::Value(DefValType::Enum(self.decode_enum()?))),
            binary::DEF_OPTION => Ok(DefType::Value(DefValType::Option(
                self.decode_option_type()?,
            ))),
            binary::DEF_RESULT => Ok(DefType::Value(DefValType::Result(
                self.decode_result_type()?,
            ))),
            binary::DEF_OWN => {
                let index = self
                    .reader
                    .read_var_u32()
                    .map_err(|e| e.in_node(AstNode::ResourceHandle))?;
                Ok(DefType::Value(DefValType::Own(OwnType { index })))
            }
            binary::DEF_BORROW => {
                let index = self
                    .reader
                    .read_var_u32()
                    .map_err(|e| e.in_node(AstNode::ResourceHandle))?;
                Ok(DefType::Value(DefValType::Borrow(BorrowType { index })))
            }
            binary::DEF_FUNC => Ok(DefType::Func(self.decode_func_type_body()?)),
            binary::DEF_COMPONENT => Ok(DefType::Component(self.decode_component_type_body()?)),
            binary::DEF_INSTANCE => Ok(DefType::Instance(self.decode_instance_type_body()?)),
            _ => Err(Error::malformed_def_type().at_offset(at)),
        }
    }

    fn decode_func_type_body(&mut self) -> Result<FuncType> {
        let params = self
            .decode_vec(Self::decode_label_val_type)
            .map_err(|e| e.in_node(AstNode::FuncType))?;
        let results = self
            .decode_result_list()
            .map_err(|e| e.in_node(AstNode::FuncType))?;
        Ok(FuncType { params, results })
    }

    fn decode_result_list(&mut self) -> Result<ResultList> {
        let at = self.reader.offset();
        match self.reader.read_byte()? {
            binary::RESULTLIST_SINGLE => Ok(ResultList::Single(self.decode_value_type()?)),
            binary::RESULTLIST_NAMED => Ok(ResultList::Named(
                self.decode_vec(Self::decode_label_val_type)?,
            )),
            _ => Err(Error::malformed_def_type().at_offset(at)),
        }
    }

    /// Decode a component type's declaration list. The `0x41` tag has
    /// already been consumed by the caller.
    pub fn decode_component_type(&mut self) -> Result<ComponentType> {
        self.nested(Self::decode_component_type_body)
            .map_err(|e| e.in_node(AstNode::ComponentType))
    }

    fn decode_component_type_body(&mut self) -> Result<ComponentType> {
        let decls = self
            .decode_vec(Self::decode_component_decl)
            .map_err(|e| e.in_node(AstNode::ComponentType))?;
        Ok(ComponentType { decls })
    }

    fn decode_component_decl(&mut self) -> Result<ComponentDecl> {
        // The marker byte is consumed either way; a non-import byte is the
        // instance declaration's own tag (the code points are disjoint).
        let at = self.reader.offset();
        let tag = self.reader.read_byte()?;
        if tag == binary::COMPONENT_DECL_IMPORT {
            Ok(ComponentDecl::Import(self.decode_import_decl()?))
        } else {
            Ok(ComponentDecl::Instance(
                self.decode_instance_decl_with_tag(tag, at)?,
            ))
        }
    }

    fn decode_import_decl(&mut self) -> Result<ImportDecl> {
        let name = self.reader.read_name()?;
        let desc = self.decode_extern_desc()?;
        Ok(ImportDecl { name, desc })
    }

    fn decode_extern_desc(&mut self) -> Result<ExternDesc> {
        let result = (|| {
            self.reader.expect_byte(binary::EXTERN_DESC_PREFIX)?;
            self.reader.expect_byte(binary::EXTERN_DESC_TYPE_SORT)?;
            let index = self.reader.read_var_u32()?;
            Ok(ExternDesc { index })
        })();
        result.map_err(|e: Error| e.in_node(AstNode::ExternDesc))
    }

    /// Decode an instance type's declaration list. The `0x42` tag has
    /// already been consumed by the caller.
    pub fn decode_instance_type(&mut self) -> Result<InstanceType> {
        self.nested(Self::decode_instance_type_body)
            .map_err(|e| e.in_node(AstNode::InstanceType))
    }

    fn decode_instance_type_body(&mut self) -> Result<InstanceType> {
        let decls = self
            .decode_vec(Self::decode_instance_decl)
            .map_err(|e| e.in_node(AstNode::InstanceType))?;
        Ok(InstanceType { decls })
    }

    fn decode_instance_decl(&mut self) -> Result<InstanceDecl> {
        let at = self.reader.offset();
        let tag = self.reader.read_byte()?;
        self.decode_instance_decl_with_tag(tag, at)
    }

    fn decode_instance_decl_with_tag(&mut self, tag: u8, at: usize) -> Result<InstanceDecl> {
        match tag {
            binary::INSTANCE_DECL_CORE_TYPE => {
                // Recognized form, deliberately not decoded: fail before
                // touching the payload bytes.
                Err(Error::unsupported_core_type()
                    .at_offset(at)
                    .in_node(AstNode::InstanceType))
            }
            binary::INSTANCE_DECL_TYPE => {
                // The definition goes behind a shared handle so sibling
                // declarations can refer to it by index with one identity.
                let def = self.decode_def_type()?;
                Ok(InstanceDecl::Type(Arc::new(def)))
            }
            binary::INSTANCE_DECL_ALIAS => Ok(InstanceDecl::Alias(self.decode_alias()?)),
            binary::INSTANCE_DECL_EXPORT => {
                let name = self.reader.read_name()?;
                let desc = self.decode_extern_desc()?;
                Ok(InstanceDecl::Export(ExportDecl { name, desc }))
            }
            _ => Err(Error::malformed_def_type()
                .at_offset(at)
                .in_node(AstNode::InstanceType)),
        }
    }
}
