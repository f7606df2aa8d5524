// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Binary codec for the Chrysalis message payload layer.
//!
//! A message carries at most one payload, framed by a 4-byte length prefix and
//! identified by a 4-byte type tag: a [`TransactionPayload`], a
//! [`MilestonePayload`] (which may itself embed a [`ReceiptPayload`] through
//! the same framing), an [`IndexationPayload`], or a [`ReceiptPayload`]. This
//! crate converts those payloads to and from their wire bytes with strict
//! structural validation, since the bytes may come from an untrusted peer.
//!
//! Packing and unpacking are synchronous, allocate nothing beyond the decoded
//! values, and share no state between calls; a [`Packer`] or [`Unpacker`]
//! belongs to a single call at a time.
//!
//! ```
//! use chrysalis_payload::{IndexationPayload, OptionalPayload, Packable, Payload};
//!
//! let payload = IndexationPayload::new("A", Vec::new())?;
//! let bytes = OptionalPayload::from(Payload::from(payload)).pack_to_vec()?;
//! assert_eq!(bytes.len(), 4 + 11);
//!
//! let decoded = OptionalPayload::unpack_from_slice(&bytes)?;
//! assert!(matches!(decoded.0, Some(Payload::Indexation(_))));
//! # Ok::<(), chrysalis_payload::Error>(())
//! ```

pub mod address;
pub mod error;
pub mod input;
pub mod message_id;
pub mod output;
pub mod packer;
pub mod payload;
pub mod signature;
pub mod tangle;
pub mod unlock_block;
pub mod util;

pub use self::{
    error::Error,
    message_id::MessageId,
    packer::{Packable, Packer, Unpacker},
    payload::{
        IndexationPayload, MilestonePayload, OptionalPayload, Payload, ReceiptPayload,
        TransactionPayload,
    },
    tangle::{MilestoneIndex, MilestoneTimestamp},
};
