// WCT - wct-error
// Module: Error handling
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! wct error handling library
//!
//! Provides the closed error taxonomy shared by the wct crates: structural
//! malformation kinds for the component type grammar, cursor-level failure
//! kinds, and decoder-limit kinds. Every error is a plain `Copy` value
//! carrying a category, a numeric code, the byte offset at which the
//! violation was detected and the enclosing grammar production.
//!
//! # Error code ranges
//!
//! - 1000-1999: cursor/primitive reader failures
//! - 2000-2999: type-grammar malformations
//! - 3000-3999: decoder limits and unsupported forms
//!
//! # Usage
//!
//! ```
//! use wct_error::{codes, AstNode, Error};
//!
//! let err = Error::malformed_tuple_type()
//!     .at_offset(0x2a)
//!     .in_node(AstNode::Tuple);
//! assert_eq!(err.code, codes::MALFORMED_TUPLE_TYPE);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Error codes for wct
pub mod codes;
/// Error and error handling types
pub mod errors;

pub use errors::{AstNode, Error, ErrorCategory};

/// A specialized `Result` type for wct operations.
pub type Result<T> = core::result::Result<T, Error>;
