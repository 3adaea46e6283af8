// WCT - wct-decoder
// Module: Alias decoding
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Alias declaration decoding: a sort byte, then a target.

use wct_error::{AstNode, Error, Result};
use wct_format::alias::{Alias, AliasTarget, CoreSort, Sort};
use wct_format::binary;

use crate::comptype::TypeDecoder;

impl TypeDecoder<'_, '_> {
    /// Decode an alias declaration.
    pub fn decode_alias(&mut self) -> Result<Alias> {
        let result = (|| {
            let sort = self.decode_sort()?;
            let target = self.decode_alias_target()?;
            Ok(Alias { sort, target })
        })();
        result.map_err(|e: Error| e.in_node(AstNode::Alias))
    }

    fn decode_sort(&mut self) -> Result<Sort> {
        let at = self.reader.offset();
        match self.reader.read_byte()? {
            binary::SORT_CORE => Ok(Sort::Core(self.decode_core_sort()?)),
            binary::SORT_FUNC => Ok(Sort::Func),
            binary::SORT_VALUE => Ok(Sort::Value),
            binary::SORT_TYPE => Ok(Sort::Type),
            binary::SORT_COMPONENT => Ok(Sort::Component),
            binary::SORT_INSTANCE => Ok(Sort::Instance),
            _ => Err(Error::malformed_alias().at_offset(at)),
        }
    }

    fn decode_core_sort(&mut self) -> Result<CoreSort> {
        let at = self.reader.offset();
        match self.reader.read_byte()? {
            binary::CORE_SORT_FUNC => Ok(CoreSort::Func),
            binary::CORE_SORT_TABLE => Ok(CoreSort::Table),
            binary::CORE_SORT_MEMORY => Ok(CoreSort::Memory),
            binary::CORE_SORT_GLOBAL => Ok(CoreSort::Global),
            binary::CORE_SORT_TYPE => Ok(CoreSort::Type),
            binary::CORE_SORT_MODULE => Ok(CoreSort::Module),
            binary::CORE_SORT_INSTANCE => Ok(CoreSort::Instance),
            _ => Err(Error::malformed_alias().at_offset(at)),
        }
    }

    fn decode_alias_target(&mut self) -> Result<AliasTarget> {
        let at = self.reader.offset();
        match self.reader.read_byte()? {
            binary::ALIAS_TARGET_EXPORT => Ok(AliasTarget::InstanceExport {
                instance_idx: self.reader.read_var_u32()?,
                name: self.reader.read_name()?,
            }),
            binary::ALIAS_TARGET_CORE_EXPORT => Ok(AliasTarget::CoreInstanceExport {
                instance_idx: self.reader.read_var_u32()?,
                name: self.reader.read_name()?,
            }),
            binary::ALIAS_TARGET_OUTER => {
                let count = self.reader.read_var_u32()?;
                let index = self.reader.read_var_u32()?;
                Ok(AliasTarget::Outer { count, index })
            }
            _ => Err(Error::malformed_alias().at_offset(at)),
        }
    }
}
