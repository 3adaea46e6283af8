// WCT - wct-format
// Module: Type-section encoder
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Encoder for the type-section grammar.
//!
//! Serializes decoded AST nodes back into the binary form. Used by tooling
//! and by the decoder test suite to establish decode/encode round-trips.
//! Encoding is infallible: every representable AST node has exactly one
//! binary form, except type indices whose canonical single-byte LEB128 would
//! collide with the primitive tag range (those get the padded two-byte form).

use crate::alias::{Alias, AliasTarget, CoreSort, Sort};
use crate::binary;
use crate::comptype::{
    Case, ComponentDecl, ComponentType, DefType, DefValType, ExportDecl, ExternDesc, FuncType,
    ImportDecl, InstanceDecl, InstanceType, LabelValType, ResultList, ValueType,
};
use crate::coremod::{
    CoreDefType, CoreExportDecl, CoreFuncType, CoreImport, CoreType, ImportDesc, Limits,
    ModuleDecl, ModuleType,
};

/// Encode a value type (primitive tag or type-index varint).
pub fn encode_value_type(out: &mut Vec<u8>, ty: &ValueType) {
    match ty {
        ValueType::Primitive(prim) => out.push(prim.tag()),
        ValueType::TypeIndex(idx) => {
            let bytes = binary::write_leb128_u32(*idx);
            if bytes.len() == 1
                && (binary::PRIM_VAL_MIN..=binary::PRIM_VAL_MAX).contains(&bytes[0])
            {
                // Pad to two bytes so the leading byte stays outside the
                // primitive tag range.
                out.push(bytes[0] | 0x80);
                out.push(0x00);
            } else {
                out.extend_from_slice(&bytes);
            }
        }
    }
}

fn encode_label_val_type(out: &mut Vec<u8>, lt: &LabelValType) {
    out.extend_from_slice(&binary::write_string(&lt.label));
    encode_value_type(out, &lt.ty);
}

fn encode_optional_value_type(out: &mut Vec<u8>, ty: Option<&ValueType>) {
    match ty {
        Some(ty) => {
            out.push(binary::OPTIONAL_PRESENT);
            encode_value_type(out, ty);
        }
        None => out.push(binary::OPTIONAL_ABSENT),
    }
}

fn encode_case(out: &mut Vec<u8>, case: &Case) {
    out.extend_from_slice(&binary::write_string(&case.label));
    encode_optional_value_type(out, case.ty.as_ref());
    out.push(binary::CASE_REFINES_NONE);
}

/// Encode a defined value type with its leading tag byte.
pub fn encode_def_val_type(out: &mut Vec<u8>, ty: &DefValType) {
    match ty {
        DefValType::Primitive(prim) => out.push(prim.tag()),
        DefValType::Record(rec) => {
            out.push(binary::DEF_RECORD);
            out.extend_from_slice(&binary::write_leb128_u32(rec.fields.len() as u32));
            for field in &rec.fields {
                encode_label_val_type(out, field);
            }
        }
        DefValType::Variant(var) => {
            out.push(binary::DEF_VARIANT);
            out.extend_from_slice(&binary::write_leb128_u32(var.cases.len() as u32));
            for case in &var.cases {
                encode_case(out, case);
            }
        }
        DefValType::List(list) => {
            out.push(binary::DEF_LIST);
            encode_value_type(out, &list.element);
        }
        DefValType::Tuple(tuple) => {
            out.push(binary::DEF_TUPLE);
            out.extend_from_slice(&binary::write_leb128_u32(tuple.elements.len() as u32));
            for elem in &tuple.elements {
                encode_value_type(out, elem);
            }
        }
        DefValType::Flags(flags) => {
            out.push(binary::DEF_FLAGS);
            out.extend_from_slice(&binary::write_vector(&flags.labels, |l| {
                binary::write_string(l)
            }));
        }
        DefValType::Enum(en) => {
            out.push(binary::DEF_ENUM);
            out.extend_from_slice(&binary::write_vector(&en.labels, |l| {
                binary::write_string(l)
            }));
        }
        DefValType::Option(opt) => {
            out.push(binary::DEF_OPTION);
            encode_value_type(out, &opt.inner);
        }
        DefValType::Result(res) => {
            out.push(binary::DEF_RESULT);
            encode_optional_value_type(out, res.ok.as_ref());
            encode_optional_value_type(out, res.err.as_ref());
        }
        DefValType::Own(own) => {
            out.push(binary::DEF_OWN);
            out.extend_from_slice(&binary::write_leb128_u32(own.index));
        }
        DefValType::Borrow(borrow) => {
            out.push(binary::DEF_BORROW);
            out.extend_from_slice(&binary::write_leb128_u32(borrow.index));
        }
    }
}

fn encode_result_list(out: &mut Vec<u8>, results: &ResultList) {
    match results {
        ResultList::Single(ty) => {
            out.push(binary::RESULTLIST_SINGLE);
            encode_value_type(out, ty);
        }
        ResultList::Named(list) => {
            out.push(binary::RESULTLIST_NAMED);
            out.extend_from_slice(&binary::write_leb128_u32(list.len() as u32));
            for lt in list {
                encode_label_val_type(out, lt);
            }
        }
    }
}

fn encode_func_type_body(out: &mut Vec<u8>, func: &FuncType) {
    out.extend_from_slice(&binary::write_leb128_u32(func.params.len() as u32));
    for param in &func.params {
        encode_label_val_type(out, param);
    }
    encode_result_list(out, &func.results);
}

fn encode_extern_desc(out: &mut Vec<u8>, desc: &ExternDesc) {
    out.push(binary::EXTERN_DESC_PREFIX);
    out.push(binary::EXTERN_DESC_TYPE_SORT);
    out.extend_from_slice(&binary::write_leb128_u32(desc.index));
}

fn encode_import_decl(out: &mut Vec<u8>, decl: &ImportDecl) {
    out.push(binary::COMPONENT_DECL_IMPORT);
    out.extend_from_slice(&binary::write_string(&decl.name));
    encode_extern_desc(out, &decl.desc);
}

fn encode_export_decl(out: &mut Vec<u8>, decl: &ExportDecl) {
    out.push(binary::INSTANCE_DECL_EXPORT);
    out.extend_from_slice(&binary::write_string(&decl.name));
    encode_extern_desc(out, &decl.desc);
}

/// Encode an alias declaration (sort byte, then target).
pub fn encode_alias(out: &mut Vec<u8>, alias: &Alias) {
    match alias.sort {
        Sort::Core(core) => {
            out.push(binary::SORT_CORE);
            out.push(match core {
                CoreSort::Func => binary::CORE_SORT_FUNC,
                CoreSort::Table => binary::CORE_SORT_TABLE,
                CoreSort::Memory => binary::CORE_SORT_MEMORY,
                CoreSort::Global => binary::CORE_SORT_GLOBAL,
                CoreSort::Type => binary::CORE_SORT_TYPE,
                CoreSort::Module => binary::CORE_SORT_MODULE,
                CoreSort::Instance => binary::CORE_SORT_INSTANCE,
            });
        }
        Sort::Func => out.push(binary::SORT_FUNC),
        Sort::Value => out.push(binary::SORT_VALUE),
        Sort::Type => out.push(binary::SORT_TYPE),
        Sort::Component => out.push(binary::SORT_COMPONENT),
        Sort::Instance => out.push(binary::SORT_INSTANCE),
    }
    match &alias.target {
        AliasTarget::InstanceExport { instance_idx, name } => {
            out.push(binary::ALIAS_TARGET_EXPORT);
            out.extend_from_slice(&binary::write_leb128_u32(*instance_idx));
            out.extend_from_slice(&binary::write_string(name));
        }
        AliasTarget::CoreInstanceExport { instance_idx, name } => {
            out.push(binary::ALIAS_TARGET_CORE_EXPORT);
            out.extend_from_slice(&binary::write_leb128_u32(*instance_idx));
            out.extend_from_slice(&binary::write_string(name));
        }
        AliasTarget::Outer { count, index } => {
            out.push(binary::ALIAS_TARGET_OUTER);
            out.extend_from_slice(&binary::write_leb128_u32(*count));
            out.extend_from_slice(&binary::write_leb128_u32(*index));
        }
    }
}

fn encode_instance_decl(out: &mut Vec<u8>, decl: &InstanceDecl) {
    match decl {
        InstanceDecl::Type(def) => {
            out.push(binary::INSTANCE_DECL_TYPE);
            encode_def_type(out, def);
        }
        InstanceDecl::Alias(alias) => {
            out.push(binary::INSTANCE_DECL_ALIAS);
            encode_alias(out, alias);
        }
        InstanceDecl::Export(export) => encode_export_decl(out, export),
    }
}

fn encode_component_decl(out: &mut Vec<u8>, decl: &ComponentDecl) {
    match decl {
        ComponentDecl::Import(import) => encode_import_decl(out, import),
        ComponentDecl::Instance(inst) => encode_instance_decl(out, inst),
    }
}

/// Encode a component type with its leading `0x41` tag.
pub fn encode_component_type(out: &mut Vec<u8>, ty: &ComponentType) {
    out.push(binary::DEF_COMPONENT);
    out.extend_from_slice(&binary::write_leb128_u32(ty.decls.len() as u32));
    for decl in &ty.decls {
        encode_component_decl(out, decl);
    }
}

/// Encode an instance type with its leading `0x42` tag.
pub fn encode_instance_type(out: &mut Vec<u8>, ty: &InstanceType) {
    out.push(binary::DEF_INSTANCE);
    out.extend_from_slice(&binary::write_leb128_u32(ty.decls.len() as u32));
    for decl in &ty.decls {
        encode_instance_decl(out, decl);
    }
}

/// Encode a definition type with its leading tag byte.
pub fn encode_def_type(out: &mut Vec<u8>, ty: &DefType) {
    match ty {
        DefType::Value(val) => encode_def_val_type(out, val),
        DefType::Func(func) => {
            out.push(binary::DEF_FUNC);
            encode_func_type_body(out, func);
        }
        DefType::Component(comp) => encode_component_type(out, comp),
        DefType::Instance(inst) => encode_instance_type(out, inst),
    }
}

fn encode_limits(out: &mut Vec<u8>, limits: &Limits) {
    match limits.max {
        Some(max) => {
            out.push(binary::LIMITS_MIN_MAX);
            out.extend_from_slice(&binary::write_leb128_u32(limits.min));
            out.extend_from_slice(&binary::write_leb128_u32(max));
        }
        None => {
            out.push(binary::LIMITS_MIN);
            out.extend_from_slice(&binary::write_leb128_u32(limits.min));
        }
    }
}

fn encode_import_desc(out: &mut Vec<u8>, desc: &ImportDesc) {
    match desc {
        ImportDesc::Func(type_idx) => {
            out.push(binary::IMPORT_DESC_FUNC);
            out.extend_from_slice(&binary::write_leb128_u32(*type_idx));
        }
        ImportDesc::Table(table) => {
            out.push(binary::IMPORT_DESC_TABLE);
            out.push(table.element.tag());
            encode_limits(out, &table.limits);
        }
        ImportDesc::Memory(memory) => {
            out.push(binary::IMPORT_DESC_MEMORY);
            encode_limits(out, &memory.limits);
        }
        ImportDesc::Global(global) => {
            out.push(binary::IMPORT_DESC_GLOBAL);
            out.push(global.val_type.tag());
            out.push(if global.mutable {
                binary::GLOBAL_VAR
            } else {
                binary::GLOBAL_CONST
            });
        }
    }
}

fn encode_core_import(out: &mut Vec<u8>, import: &CoreImport) {
    out.extend_from_slice(&binary::write_string(&import.module));
    out.extend_from_slice(&binary::write_string(&import.name));
    encode_import_desc(out, &import.desc);
}

fn encode_core_export_decl(out: &mut Vec<u8>, export: &CoreExportDecl) {
    out.extend_from_slice(&binary::write_string(&export.name));
    encode_import_desc(out, &export.desc);
}

fn encode_core_func_type_body(out: &mut Vec<u8>, func: &CoreFuncType) {
    out.extend_from_slice(&binary::write_vector(&func.params, |p| vec![p.tag()]));
    out.extend_from_slice(&binary::write_vector(&func.results, |r| vec![r.tag()]));
}

fn encode_module_decl(out: &mut Vec<u8>, decl: &ModuleDecl) {
    match decl {
        ModuleDecl::Import(import) => {
            out.push(binary::MODULE_DECL_IMPORT);
            encode_core_import(out, import);
        }
        ModuleDecl::Type(core_ty) => {
            out.push(binary::MODULE_DECL_TYPE);
            encode_core_type(out, core_ty);
        }
        ModuleDecl::Alias(alias) => {
            out.push(binary::MODULE_DECL_ALIAS);
            encode_alias(out, alias);
        }
        ModuleDecl::Export(export) => {
            out.push(binary::MODULE_DECL_EXPORT);
            encode_core_export_decl(out, export);
        }
    }
}

/// Encode a core module type with its leading `0x50` tag.
pub fn encode_module_type(out: &mut Vec<u8>, ty: &ModuleType) {
    out.push(binary::CORE_MODULE_TYPE);
    out.extend_from_slice(&binary::write_leb128_u32(ty.decls.len() as u32));
    for decl in &ty.decls {
        encode_module_decl(out, decl);
    }
}

/// Encode a core type entry (its discriminator byte, then the body).
pub fn encode_core_type(out: &mut Vec<u8>, ty: &CoreType) {
    match &ty.def {
        CoreDefType::Func(func) => {
            out.push(binary::CORE_FUNC_TYPE);
            encode_core_func_type_body(out, func);
        }
        CoreDefType::Module(module) => encode_module_type(out, module),
    }
}
