// WCT - wct-decoder
// Module: Core module type decoding
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Decoding for the embedded core-module sub-grammar.
//!
//! Core def types carry a one-byte discriminator (`0x60` function type,
//! `0x50` module type), so dispatch reads one byte and branches directly;
//! there is no try-one-shape-then-the-other fallback anywhere.

use std::sync::Arc;

use wct_error::{AstNode, Error, Result};
use wct_format::binary;
use wct_format::coremod::{
    CoreDefType, CoreExportDecl, CoreFuncType, CoreImport, CoreType, CoreValType, GlobalType,
    ImportDesc, Limits, MemoryType, ModuleDecl, ModuleType, TableType,
};

use crate::comptype::TypeDecoder;

impl TypeDecoder<'_, '_> {
    /// Decode a core module type, starting at its fixed `0x50` byte.
    pub fn decode_module_type(&mut self) -> Result<ModuleType> {
        self.nested(|d| {
            d.reader.expect_byte(binary::CORE_MODULE_TYPE)?;
            d.decode_module_type_body()
        })
        .map_err(|e| e.in_node(AstNode::ModuleType))
    }

    fn decode_module_type_body(&mut self) -> Result<ModuleType> {
        let decls = self.decode_vec(Self::decode_module_decl)?;
        Ok(ModuleType { decls })
    }

    fn decode_module_decl(&mut self) -> Result<ModuleDecl> {
        let at = self.reader.offset();
        match self.reader.read_byte()? {
            binary::MODULE_DECL_IMPORT => Ok(ModuleDecl::Import(self.decode_core_import()?)),
            binary::MODULE_DECL_TYPE => Ok(ModuleDecl::Type(Arc::new(self.decode_core_type()?))),
            binary::MODULE_DECL_ALIAS => Ok(ModuleDecl::Alias(self.decode_alias()?)),
            binary::MODULE_DECL_EXPORT => Ok(ModuleDecl::Export(self.decode_core_export_decl()?)),
            _ => Err(Error::malformed_module_type()
                .at_offset(at)
                .in_node(AstNode::ModuleType)),
        }
    }

    /// Decode a core type entry: its discriminator byte, then the body.
    pub fn decode_core_type(&mut self) -> Result<CoreType> {
        self.nested(|d| {
            let at = d.reader.offset();
            match d.reader.read_byte()? {
                binary::CORE_FUNC_TYPE => Ok(CoreType {
                    def: CoreDefType::Func(d.decode_core_func_type_body()?),
                }),
                binary::CORE_MODULE_TYPE => Ok(CoreType {
                    def: CoreDefType::Module(d.decode_module_type_body()?),
                }),
                _ => Err(Error::malformed_def_type().at_offset(at)),
            }
        })
        .map_err(|e| e.in_node(AstNode::CoreType))
    }

    fn decode_core_func_type_body(&mut self) -> Result<CoreFuncType> {
        let params = self.decode_vec(Self::decode_core_val_type)?;
        let results = self.decode_vec(Self::decode_core_val_type)?;
        Ok(CoreFuncType { params, results })
    }

    fn decode_core_val_type(&mut self) -> Result<CoreValType> {
        let at = self.reader.offset();
        let tag = self.reader.read_byte()?;
        CoreValType::from_tag(tag).ok_or_else(|| Error::malformed_def_type().at_offset(at))
    }

    fn decode_core_import(&mut self) -> Result<CoreImport> {
        let module = self.reader.read_name()?;
        let name = self.reader.read_name()?;
        let desc = self.decode_import_desc()?;
        Ok(CoreImport { module, name, desc })
    }

    fn decode_core_export_decl(&mut self) -> Result<CoreExportDecl> {
        let name = self.reader.read_name()?;
        let desc = self.decode_import_desc()?;
        Ok(CoreExportDecl { name, desc })
    }

    fn decode_import_desc(&mut self) -> Result<ImportDesc> {
        let result = (|| {
            let at = self.reader.offset();
            match self.reader.read_byte()? {
                binary::IMPORT_DESC_FUNC => Ok(ImportDesc::Func(self.reader.read_var_u32()?)),
                binary::IMPORT_DESC_TABLE => Ok(ImportDesc::Table(self.decode_table_type()?)),
                binary::IMPORT_DESC_MEMORY => Ok(ImportDesc::Memory(MemoryType {
                    limits: self.decode_limits()?,
                })),
                binary::IMPORT_DESC_GLOBAL => Ok(ImportDesc::Global(self.decode_global_type()?)),
                _ => Err(Error::malformed_import_desc().at_offset(at)),
            }
        })();
        result.map_err(|e: Error| e.in_node(AstNode::ImportDesc))
    }

    fn decode_table_type(&mut self) -> Result<TableType> {
        let at = self.reader.offset();
        let element = self.decode_core_val_type()?;
        // Table elements must be reference types.
        if !matches!(element, CoreValType::FuncRef | CoreValType::ExternRef) {
            return Err(Error::malformed_import_desc().at_offset(at));
        }
        let limits = self.decode_limits()?;
        Ok(TableType { element, limits })
    }

    fn decode_limits(&mut self) -> Result<Limits> {
        let at = self.reader.offset();
        match self.reader.read_byte()? {
            binary::LIMITS_MIN => Ok(Limits {
                min: self.reader.read_var_u32()?,
                max: None,
            }),
            binary::LIMITS_MIN_MAX => {
                let min = self.reader.read_var_u32()?;
                let max = self.reader.read_var_u32()?;
                Ok(Limits {
                    min,
                    max: Some(max),
                })
            }
            _ => Err(Error::malformed_import_desc().at_offset(at)),
        }
    }

    fn decode_global_type(&mut self) -> Result<GlobalType> {
        let val_type = self.decode_core_val_type()?;
        let at = self.reader.offset();
        let mutable = match self.reader.read_byte()? {
            binary::GLOBAL_CONST => false,
            binary::GLOBAL_VAR => true,
            _ => return Err(Error::malformed_import_desc().at_offset(at)),
        };
        Ok(GlobalType { val_type, mutable })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Reader;

    fn decode_module(bytes: &[u8]) -> Result<ModuleType> {
        let mut reader = Reader::new(bytes);
        TypeDecoder::new(&mut reader).decode_module_type()
    }

    #[test]
    fn empty_module_type() {
        assert_eq!(
            decode_module(&[0x50, 0x00]).unwrap(),
            ModuleType { decls: vec![] }
        );
    }

    #[test]
    fn module_type_without_leading_byte_fails() {
        let err = decode_module(&[0x51, 0x00]).unwrap_err();
        assert_eq!(err.code, wct_error::codes::UNEXPECTED_BYTE);
        assert_eq!(err.node, Some(AstNode::ModuleType));
    }

    #[test]
    fn module_with_import_type_and_export_decls() {
        let bytes = [
            0x50, 0x03, // module, 3 decls
            0x00, 0x03, b'e', b'n', b'v', 0x01, b'f', 0x00, 0x02, // import env.f: func 2
            0x01, 0x60, 0x01, 0x7F, 0x01, 0x7E, // type: func (i32) -> i64
            0x03, 0x01, b'g', 0x03, 0x7F, 0x01, // export "g": global i32 mut
        ];
        let module = decode_module(&bytes).unwrap();
        assert_eq!(module.decls.len(), 3);

        let ModuleDecl::Import(import) = &module.decls[0] else {
            panic!("expected import");
        };
        assert_eq!(import.module, "env");
        assert_eq!(import.name, "f");
        assert_eq!(import.desc, ImportDesc::Func(2));

        let ModuleDecl::Type(core_ty) = &module.decls[1] else {
            panic!("expected type decl");
        };
        assert_eq!(
            core_ty.def,
            CoreDefType::Func(CoreFuncType {
                params: vec![CoreValType::I32],
                results: vec![CoreValType::I64],
            })
        );

        let ModuleDecl::Export(export) = &module.decls[2] else {
            panic!("expected export decl");
        };
        assert_eq!(export.name, "g");
        assert_eq!(
            export.desc,
            ImportDesc::Global(GlobalType {
                val_type: CoreValType::I32,
                mutable: true,
            })
        );
    }

    #[test]
    fn module_decl_with_table_and_memory_imports() {
        let bytes = [
            0x50, 0x02, // module, 2 decls
            0x00, 0x01, b'm', 0x01, b't', 0x01, 0x70, 0x01, 0x01, 0x0A, // table funcref 1..10
            0x00, 0x01, b'm', 0x01, b'q', 0x02, 0x00, 0x10, // memory min 16
        ];
        let module = decode_module(&bytes).unwrap();
        let ModuleDecl::Import(table) = &module.decls[0] else {
            panic!("expected import");
        };
        assert_eq!(
            table.desc,
            ImportDesc::Table(TableType {
                element: CoreValType::FuncRef,
                limits: Limits {
                    min: 1,
                    max: Some(10),
                },
            })
        );
        let ModuleDecl::Import(memory) = &module.decls[1] else {
            panic!("expected import");
        };
        assert_eq!(
            memory.desc,
            ImportDesc::Memory(MemoryType {
                limits: Limits { min: 16, max: None },
            })
        );
    }

    #[test]
    fn nested_module_type_inside_core_type_decl() {
        let bytes = [
            0x50, 0x01, // module, 1 decl
            0x01, 0x50, 0x00, // type: module {}
        ];
        let module = decode_module(&bytes).unwrap();
        let ModuleDecl::Type(core_ty) = &module.decls[0] else {
            panic!("expected type decl");
        };
        assert_eq!(core_ty.def, CoreDefType::Module(ModuleType { decls: vec![] }));
    }

    #[test]
    fn unknown_module_decl_tag_fails() {
        let err = decode_module(&[0x50, 0x01, 0x04]).unwrap_err();
        assert_eq!(err.code, wct_error::codes::MALFORMED_MODULE_TYPE);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn unknown_core_def_type_discriminator_fails() {
        let err = decode_module(&[0x50, 0x01, 0x01, 0x61]).unwrap_err();
        assert_eq!(err.code, wct_error::codes::MALFORMED_DEF_TYPE);
        assert_eq!(err.node, Some(AstNode::CoreType));
    }

    #[test]
    fn non_reference_table_element_fails() {
        let bytes = [
            0x50, 0x01, 0x00, 0x01, b'm', 0x01, b't', 0x01, 0x7F, 0x00, 0x00,
        ];
        let err = decode_module(&bytes).unwrap_err();
        assert_eq!(err.code, wct_error::codes::MALFORMED_IMPORT_DESC);
        assert_eq!(err.node, Some(AstNode::ImportDesc));
    }

    #[test]
    fn bad_limits_and_mutability_tags_fail() {
        // limits tag 0x02
        let err = decode_module(&[0x50, 0x01, 0x00, 0x01, b'm', 0x01, b'q', 0x02, 0x02, 0x01])
            .unwrap_err();
        assert_eq!(err.code, wct_error::codes::MALFORMED_IMPORT_DESC);

        // global mutability tag 0x02
        let err = decode_module(&[0x50, 0x01, 0x00, 0x01, b'm', 0x01, b'g', 0x03, 0x7F, 0x02])
            .unwrap_err();
        assert_eq!(err.code, wct_error::codes::MALFORMED_IMPORT_DESC);
    }

    #[test]
    fn module_nesting_past_the_limit_fails_cleanly() {
        // module { type: module { type: module { ... } } }
        let mut bytes = vec![0x50, 0x00];
        for _ in 0..200 {
            let mut outer = vec![0x50, 0x01, 0x01];
            outer.extend_from_slice(&bytes);
            bytes = outer;
        }
        let err = decode_module(&bytes).unwrap_err();
        assert_eq!(err.code, wct_error::codes::NESTING_TOO_DEEP);
    }
}
