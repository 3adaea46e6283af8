// WCT - wct-decoder
// Module: Type-section decoder
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Decoder for the component-model type section.
//!
//! Turns untrusted type-section bytes into the typed AST of `wct-format` by
//! single-pass recursive descent. Any structural violation aborts the whole
//! decode with an error from the closed `wct-error` taxonomy, carrying the
//! byte offset and the grammar production where it was detected; no partial
//! AST is ever returned.
//!
//! One entry point exists per top-level grammar production, each taking a
//! mutable [`Reader`] positioned inside the section:
//!
//! ```
//! use wct_decoder::{decode_def_type, Reader};
//! use wct_format::comptype::{DefType, DefValType, PrimValType};
//!
//! let mut reader = Reader::new(&[0x73]);
//! let decoded = decode_def_type(&mut reader).unwrap();
//! assert_eq!(
//!     decoded,
//!     DefType::Value(DefValType::Primitive(PrimValType::String))
//! );
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod alias;
mod comptype;
mod coremod;
mod reader;

pub use comptype::{TypeDecoder, DEFAULT_MAX_DEPTH};
pub use reader::Reader;
pub use wct_error::{Error, Result};

use wct_format::comptype::{ComponentType, DefType, InstanceType};
use wct_format::coremod::ModuleType;

/// Decode one definition type from the cursor.
pub fn decode_def_type(reader: &mut Reader<'_>) -> Result<DefType> {
    TypeDecoder::new(reader).decode_def_type()
}

/// Decode a component type's declaration list. The leading `0x41` tag must
/// already have been consumed by the section framing.
pub fn decode_component_type(reader: &mut Reader<'_>) -> Result<ComponentType> {
    TypeDecoder::new(reader).decode_component_type()
}

/// Decode an instance type's declaration list. The leading `0x42` tag must
/// already have been consumed by the section framing.
pub fn decode_instance_type(reader: &mut Reader<'_>) -> Result<InstanceType> {
    TypeDecoder::new(reader).decode_instance_type()
}

/// Decode a core module type, starting at its fixed `0x50` byte.
pub fn decode_module_type(reader: &mut Reader<'_>) -> Result<ModuleType> {
    TypeDecoder::new(reader).decode_module_type()
}

/// Decode a whole type section: a vector of definition types.
///
/// `bytes` must span exactly the section contents; leftover bytes after the
/// declared vector are rejected. Whether an error is reported or the whole
/// load aborted is the caller's policy; this function only returns it.
pub fn decode_type_section(bytes: &[u8]) -> Result<Vec<DefType>> {
    let mut reader = Reader::new(bytes);
    let count = reader.read_var_u32()?;
    log::trace!("decoding type section with {count} entries");

    let mut types = Vec::with_capacity(count.min(64) as usize);
    for index in 0..count {
        let mut decoder = TypeDecoder::new(&mut reader);
        let def_type = decoder.decode_def_type()?;
        log::trace!("decoded type {index} at offset {:#x}", reader.offset());
        types.push(def_type);
    }

    if !reader.is_at_end() {
        return Err(Error::trailing_bytes().at_offset(reader.offset()));
    }
    log::debug!("type section complete: {count} types");
    Ok(types)
}
