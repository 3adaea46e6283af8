// WCT - wct-format
// Module: Format definitions
//
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Binary-format definitions and typed AST for the component-model type
//! section.
//!
//! This crate names the tag bytes of the grammar ([`binary`]), defines the
//! decode target AST ([`comptype`], [`coremod`], [`alias`]) and provides the
//! inverse encoder ([`encode`]). Decoding itself lives in `wct-decoder`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

/// Alias declaration types
pub mod alias;
/// Tag-byte constants and encode helpers
pub mod binary;
/// Component type-section AST
pub mod comptype;
/// Core module sub-grammar AST
pub mod coremod;
/// AST to binary encoder
pub mod encode;
