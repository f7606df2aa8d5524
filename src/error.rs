// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Error types produced by the payload codec.

use thiserror::Error;

/// Errors produced while packing or unpacking payloads.
///
/// Every failure is terminal for the call that produced it. Callers ingesting
/// data from the network are expected to reject the whole message; there is no
/// partial or best-effort decode.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("truncated input: {field} needs {needed} bytes but {remaining} remain at offset {offset}")]
    TruncatedInput {
        field: &'static str,
        needed: usize,
        remaining: usize,
        offset: usize,
    },
    #[error("unknown payload type {0}")]
    UnknownPayloadType(u32),
    #[error("payload type tag mismatch: expected {expected}, found {found}")]
    TypeTagMismatch { expected: u32, found: u32 },
    #[error("invalid nested payload kind {0}: a milestone may only embed a receipt")]
    InvalidNestedPayloadKind(u32),
    #[error("indexation index length {length} outside allowed range [{min}, {max}]")]
    IndexLengthOutOfRange { length: usize, min: usize, max: usize },
    #[error("unrecognized essence type {0}")]
    UnrecognizedEssenceType(u8),
    #[error("invalid {field} count {count}: allowed range [{min}, {max}]")]
    InvalidCount {
        field: &'static str,
        count: usize,
        min: usize,
        max: usize,
    },
    #[error("unknown address type {0}")]
    UnknownAddressType(u8),
    #[error("unknown input type {0}")]
    UnknownInputType(u8),
    #[error("unknown output type {0}")]
    UnknownOutputType(u8),
    #[error("unknown unlock block type {0}")]
    UnknownUnlockBlockType(u8),
    #[error("unknown signature type {0}")]
    UnknownSignatureType(u8),
    #[error("invalid UTF-8 in {field} at offset {offset}")]
    InvalidStringUtf8 { field: &'static str, offset: usize },
    #[error("string for {field} is {length} bytes long and cannot be length-prefixed (max {max})")]
    StringTooLong {
        field: &'static str,
        length: usize,
        max: usize,
    },
    #[error("payload nesting exceeds the maximum depth of {max}")]
    NestingTooDeep { max: usize },
    #[error("invalid hex representation: {0}")]
    InvalidHex(String),
}
