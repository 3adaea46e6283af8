// WCT - wct-decoder
// Module: Byte cursor
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Forward-only byte cursor over an in-memory buffer.
//!
//! The cursor tracks its offset so every failure can report where in the
//! input it was detected. There is no rewind; dispatchers that need to look
//! at a byte without committing to it use [`Reader::peek_byte`].

use wct_error::{Error, Result};

/// Sequential reader over an immutable byte buffer.
#[derive(Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the start of `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Current byte offset from the start of the buffer.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes left to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Whether the whole buffer has been consumed.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Look at the next byte without consuming it.
    pub fn peek_byte(&self) -> Result<u8> {
        self.bytes
            .get(self.offset)
            .copied()
            .ok_or_else(|| Error::unexpected_end().at_offset(self.offset))
    }

    /// Read one byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte()?;
        self.offset += 1;
        Ok(byte)
    }

    /// Read one byte and require it to equal `expected`.
    ///
    /// The byte is consumed whether or not it matches.
    pub fn expect_byte(&mut self, expected: u8) -> Result<u8> {
        let at = self.offset;
        let byte = self.read_byte()?;
        if byte == expected {
            Ok(byte)
        } else {
            Err(Error::unexpected_byte().at_offset(at))
        }
    }

    /// Read an unsigned LEB128 `u32`.
    ///
    /// At most five bytes; a continuation bit on the fifth byte or set bits
    /// beyond the 32nd are rejected.
    pub fn read_var_u32(&mut self) -> Result<u32> {
        let start = self.offset;
        let mut result = 0u32;
        let mut shift = 0;

        loop {
            let byte = self.read_byte()?;
            let bits = u32::from(byte & 0x7F);

            if shift == 28 && byte & 0x70 != 0 {
                return Err(Error::integer_too_large().at_offset(start));
            }
            result |= bits << shift;

            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
            if shift >= 32 {
                return Err(Error::integer_too_large().at_offset(start));
            }
        }

        Ok(result)
    }

    /// Read exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| Error::unexpected_end().at_offset(self.bytes.len()))?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    /// Read `len` bytes and validate them as UTF-8.
    pub fn read_utf8(&mut self, len: usize) -> Result<String> {
        let at = self.offset;
        let raw = self.read_bytes(len)?;
        core::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| Error::invalid_utf8().at_offset(at))
    }

    /// Read a length-prefixed UTF-8 name.
    pub fn read_name(&mut self) -> Result<String> {
        let len = self.read_var_u32()?;
        self.read_utf8(len as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wct_error::codes;

    #[test]
    fn reads_bytes_in_order_and_tracks_offset() {
        let mut reader = Reader::new(&[0x01, 0x02]);
        assert_eq!(reader.read_byte().unwrap(), 0x01);
        assert_eq!(reader.offset(), 1);
        assert_eq!(reader.read_byte().unwrap(), 0x02);
        assert!(reader.is_at_end());
    }

    #[test]
    fn read_past_end_reports_offset() {
        let mut reader = Reader::new(&[0x01]);
        reader.read_byte().unwrap();
        let err = reader.read_byte().unwrap_err();
        assert_eq!(err.code, codes::UNEXPECTED_END);
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut reader = Reader::new(&[0x42]);
        assert_eq!(reader.peek_byte().unwrap(), 0x42);
        assert_eq!(reader.offset(), 0);
        assert_eq!(reader.read_byte().unwrap(), 0x42);
    }

    #[test]
    fn expect_byte_consumes_on_mismatch() {
        let mut reader = Reader::new(&[0x01, 0x02]);
        let err = reader.expect_byte(0x03).unwrap_err();
        assert_eq!(err.code, codes::UNEXPECTED_BYTE);
        assert_eq!(err.offset, 0);
        assert_eq!(reader.offset(), 1);
    }

    #[test]
    fn var_u32_accepts_canonical_and_padded_forms() {
        let mut reader = Reader::new(&[0xE5, 0x8E, 0x26]);
        assert_eq!(reader.read_var_u32().unwrap(), 624_485);

        // Non-canonical zero-padded encoding of 0x73
        let mut reader = Reader::new(&[0xF3, 0x00]);
        assert_eq!(reader.read_var_u32().unwrap(), 0x73);
    }

    #[test]
    fn var_u32_rejects_overlong_and_overflowing_forms() {
        let mut reader = Reader::new(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]);
        assert_eq!(
            reader.read_var_u32().unwrap_err().code,
            codes::INTEGER_TOO_LARGE
        );

        // Fifth byte carries bits past the 32nd
        let mut reader = Reader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x7F]);
        assert_eq!(
            reader.read_var_u32().unwrap_err().code,
            codes::INTEGER_TOO_LARGE
        );
    }

    #[test]
    fn var_u32_truncated_input_is_unexpected_end() {
        let mut reader = Reader::new(&[0x80]);
        assert_eq!(
            reader.read_var_u32().unwrap_err().code,
            codes::UNEXPECTED_END
        );
    }

    #[test]
    fn read_name_reads_utf8_and_rejects_garbage() {
        let mut reader = Reader::new(&[0x02, b'h', b'i']);
        assert_eq!(reader.read_name().unwrap(), "hi");

        let mut reader = Reader::new(&[0x02, 0xFF, 0xFE]);
        assert_eq!(reader.read_name().unwrap_err().code, codes::INVALID_UTF8);
    }

    #[test]
    fn read_name_truncated_length_fails() {
        let mut reader = Reader::new(&[0x05, b'a', b'b']);
        assert_eq!(reader.read_name().unwrap_err().code, codes::UNEXPECTED_END);
    }
}
