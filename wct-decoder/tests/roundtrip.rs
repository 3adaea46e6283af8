// WCT - wct-decoder
// Integration tests: encode/decode round-trips
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

use wct_decoder::{decode_def_type, decode_type_section, Reader, TypeDecoder};
use wct_format::alias::{Alias, AliasTarget, CoreSort, Sort};
use wct_format::comptype::{
    BorrowType, Case, ComponentDecl, ComponentType, DefType, DefValType, EnumType, ExportDecl,
    ExternDesc, FlagsType, FuncType, ImportDecl, InstanceDecl, InstanceType, LabelValType,
    ListType, OptionType, OwnType, PrimValType, Record, ResultList, ResultType, TupleType,
    ValueType, VariantType,
};
use wct_format::coremod::{
    CoreDefType, CoreExportDecl, CoreFuncType, CoreImport, CoreType, CoreValType, GlobalType,
    ImportDesc, Limits, MemoryType, ModuleDecl, ModuleType, TableType,
};
use wct_format::encode;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const PRIMITIVES: [PrimValType; 13] = [
    PrimValType::Bool,
    PrimValType::S8,
    PrimValType::U8,
    PrimValType::S16,
    PrimValType::U16,
    PrimValType::S32,
    PrimValType::U32,
    PrimValType::S64,
    PrimValType::U64,
    PrimValType::Float32,
    PrimValType::Float64,
    PrimValType::Char,
    PrimValType::String,
];

fn prim_strategy() -> impl Strategy<Value = PrimValType> {
    proptest::sample::select(PRIMITIVES.to_vec())
}

fn value_type_strategy() -> impl Strategy<Value = ValueType> {
    prop_oneof![
        prim_strategy().prop_map(ValueType::Primitive),
        any::<u32>().prop_map(ValueType::TypeIndex),
    ]
}

fn label_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

fn label_val_type_strategy() -> impl Strategy<Value = LabelValType> {
    (label_strategy(), value_type_strategy()).prop_map(|(label, ty)| LabelValType { label, ty })
}

fn case_strategy() -> impl Strategy<Value = Case> {
    (label_strategy(), option::of(value_type_strategy()))
        .prop_map(|(label, ty)| Case { label, ty })
}

fn def_val_type_strategy() -> impl Strategy<Value = DefValType> {
    prop_oneof![
        prim_strategy().prop_map(DefValType::Primitive),
        vec(label_val_type_strategy(), 1..4)
            .prop_map(|fields| DefValType::Record(Record { fields })),
        vec(case_strategy(), 0..4).prop_map(|cases| DefValType::Variant(VariantType { cases })),
        value_type_strategy().prop_map(|element| DefValType::List(ListType { element })),
        vec(value_type_strategy(), 1..4)
            .prop_map(|elements| DefValType::Tuple(TupleType { elements })),
        vec(label_strategy(), 1..4).prop_map(|labels| DefValType::Flags(FlagsType { labels })),
        vec(label_strategy(), 0..4).prop_map(|labels| DefValType::Enum(EnumType { labels })),
        value_type_strategy().prop_map(|inner| DefValType::Option(OptionType { inner })),
        (
            option::of(value_type_strategy()),
            option::of(value_type_strategy())
        )
            .prop_map(|(ok, err)| DefValType::Result(ResultType { ok, err })),
        (any::<bool>(), any::<u32>()).prop_map(|(own, index)| if own {
            DefValType::Own(OwnType { index })
        } else {
            DefValType::Borrow(BorrowType { index })
        }),
    ]
}

proptest! {
    #[test]
    fn def_val_types_round_trip(def in def_val_type_strategy()) {
        let mut bytes = Vec::new();
        encode::encode_def_val_type(&mut bytes, &def);

        let mut reader = Reader::new(&bytes);
        let decoded = decode_def_type(&mut reader).unwrap();
        prop_assert!(reader.is_at_end(), "decoder left {} bytes", reader.remaining());
        prop_assert_eq!(&decoded, &DefType::Value(def));

        // Re-encoding reproduces the original byte sequence.
        let mut reencoded = Vec::new();
        encode::encode_def_type(&mut reencoded, &decoded);
        prop_assert_eq!(reencoded, bytes);
    }

    #[test]
    fn func_types_round_trip(
        params in vec(label_val_type_strategy(), 0..4),
        results in prop_oneof![
            value_type_strategy().prop_map(ResultList::Single),
            vec(label_val_type_strategy(), 0..3).prop_map(ResultList::Named),
        ],
    ) {
        let def = DefType::Func(FuncType { params, results });
        let mut bytes = Vec::new();
        encode::encode_def_type(&mut bytes, &def);

        let mut reader = Reader::new(&bytes);
        let decoded = decode_def_type(&mut reader).unwrap();
        prop_assert_eq!(decoded, def);
    }
}

#[test]
fn component_type_round_trips() {
    init_logging();

    let component = ComponentType {
        decls: vec![
            ComponentDecl::Import(ImportDecl {
                name: "wasi:io/streams".to_string(),
                desc: ExternDesc { index: 0 },
            }),
            ComponentDecl::Instance(InstanceDecl::Type(Arc::new(DefType::Value(
                DefValType::Record(Record {
                    fields: vec![LabelValType {
                        label: "len".to_string(),
                        ty: ValueType::Primitive(PrimValType::U64),
                    }],
                }),
            )))),
            ComponentDecl::Instance(InstanceDecl::Alias(Alias {
                sort: Sort::Type,
                target: AliasTarget::Outer { count: 1, index: 3 },
            })),
            ComponentDecl::Instance(InstanceDecl::Export(ExportDecl {
                name: "read".to_string(),
                desc: ExternDesc { index: 2 },
            })),
        ],
    };

    let mut bytes = Vec::new();
    encode::encode_component_type(&mut bytes, &component);

    let mut reader = Reader::new(&bytes);
    let decoded = decode_def_type(&mut reader).unwrap();
    assert!(reader.is_at_end());
    assert_eq!(decoded, DefType::Component(component));
}

#[test]
fn instance_type_round_trips_nested_in_section() {
    init_logging();

    let instance = InstanceType {
        decls: vec![
            InstanceDecl::Type(Arc::new(DefType::Func(FuncType {
                params: vec![LabelValType {
                    label: "input".to_string(),
                    ty: ValueType::Primitive(PrimValType::String),
                }],
                results: ResultList::Single(ValueType::TypeIndex(0)),
            }))),
            InstanceDecl::Export(ExportDecl {
                name: "process".to_string(),
                desc: ExternDesc { index: 1 },
            }),
        ],
    };

    let mut section = wct_format::binary::write_leb128_u32(2);
    section.push(0x73); // string
    encode::encode_instance_type(&mut section, &instance);

    let types = decode_type_section(&section).unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[1], DefType::Instance(instance));
}

#[test]
fn module_type_round_trips() {
    let module = ModuleType {
        decls: vec![
            ModuleDecl::Import(CoreImport {
                module: "env".to_string(),
                name: "memory".to_string(),
                desc: ImportDesc::Memory(MemoryType {
                    limits: Limits {
                        min: 1,
                        max: Some(16),
                    },
                }),
            }),
            ModuleDecl::Type(Arc::new(CoreType {
                def: CoreDefType::Func(CoreFuncType {
                    params: vec![CoreValType::I32, CoreValType::I32],
                    results: vec![CoreValType::I64],
                }),
            })),
            ModuleDecl::Alias(Alias {
                sort: Sort::Core(CoreSort::Func),
                target: AliasTarget::CoreInstanceExport {
                    instance_idx: 0,
                    name: "add".to_string(),
                },
            }),
            ModuleDecl::Export(CoreExportDecl {
                name: "table".to_string(),
                desc: ImportDesc::Table(TableType {
                    element: CoreValType::FuncRef,
                    limits: Limits { min: 0, max: None },
                }),
            }),
            ModuleDecl::Export(CoreExportDecl {
                name: "counter".to_string(),
                desc: ImportDesc::Global(GlobalType {
                    val_type: CoreValType::I64,
                    mutable: false,
                }),
            }),
        ],
    };

    let mut bytes = Vec::new();
    encode::encode_module_type(&mut bytes, &module);

    let mut reader = Reader::new(&bytes);
    let decoded = wct_decoder::decode_module_type(&mut reader).unwrap();
    assert!(reader.is_at_end());
    assert_eq!(decoded, module);
}

#[test]
fn depth_limit_is_configurable_per_decoder() {
    // instance { type: instance { type: string } }
    let inner = InstanceType {
        decls: vec![InstanceDecl::Type(Arc::new(DefType::Value(
            DefValType::Primitive(PrimValType::String),
        )))],
    };
    let outer = InstanceType {
        decls: vec![InstanceDecl::Type(Arc::new(DefType::Instance(inner)))],
    };

    let mut bytes = Vec::new();
    encode::encode_instance_type(&mut bytes, &outer);

    // Generous limit decodes fine.
    let mut reader = Reader::new(&bytes[1..]);
    assert!(TypeDecoder::with_max_depth(&mut reader, 8)
        .decode_instance_type()
        .is_ok());

    // Tight limit fails with the dedicated error, not a crash.
    let mut reader = Reader::new(&bytes[1..]);
    let err = TypeDecoder::with_max_depth(&mut reader, 1)
        .decode_instance_type()
        .unwrap_err();
    assert_eq!(err.code, wct_error::codes::NESTING_TOO_DEEP);
}
