// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Payload`] types and the length-prefixed envelope
//! that frames them.
//!
//! Every payload is self-describing: a 4-byte type tag followed by the fields
//! of its kind. The [`OptionalPayload`] envelope prefixes the whole thing with
//! a 4-byte length so that a payload can be skipped, or nested inside another
//! payload, without parsing it. A declared length of zero means "no payload".

use derive_more::Deref;
use serde::{Deserialize, Serialize};
use tracing::trace;

pub mod indexation;
pub mod milestone;
pub mod receipt;
pub mod transaction;

pub use self::{
    indexation::IndexationPayload,
    milestone::MilestonePayload,
    receipt::ReceiptPayload,
    transaction::{TransactionEssence, TransactionPayload},
};
use crate::{
    error::Error,
    packer::{Packable, Packer, Unpacker},
};

/// The payload kinds a message can carry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Payload {
    /// Signals a transaction of tokens.
    Transaction(Box<TransactionPayload>),
    /// A signed checkpoint referencing two parent messages.
    Milestone(Box<MilestonePayload>),
    /// Arbitrary data stored under a short index.
    Indexation(Box<IndexationPayload>),
    /// A record of funds migrated from the legacy network.
    Receipt(Box<ReceiptPayload>),
}

impl Payload {
    /// The name of this payload's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Transaction(_) => "transaction",
            Payload::Milestone(_) => "milestone",
            Payload::Indexation(_) => "indexation",
            Payload::Receipt(_) => "receipt",
        }
    }

    /// The wire type tag of this payload's kind.
    pub fn kind_tag(&self) -> u32 {
        match self {
            Payload::Transaction(_) => TransactionPayload::KIND,
            Payload::Milestone(_) => MilestonePayload::KIND,
            Payload::Indexation(_) => IndexationPayload::KIND,
            Payload::Receipt(_) => ReceiptPayload::KIND,
        }
    }
}

impl From<TransactionPayload> for Payload {
    fn from(value: TransactionPayload) -> Self {
        Self::Transaction(Box::new(value))
    }
}

impl From<MilestonePayload> for Payload {
    fn from(value: MilestonePayload) -> Self {
        Self::Milestone(Box::new(value))
    }
}

impl From<IndexationPayload> for Payload {
    fn from(value: IndexationPayload) -> Self {
        Self::Indexation(Box::new(value))
    }
}

impl From<ReceiptPayload> for Payload {
    fn from(value: ReceiptPayload) -> Self {
        Self::Receipt(Box::new(value))
    }
}

impl Packable for Payload {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        match self {
            Payload::Transaction(payload) => payload.pack(packer),
            Payload::Milestone(payload) => payload.pack(packer),
            Payload::Indexation(payload) => payload.pack(packer),
            Payload::Receipt(payload) => payload.pack(packer),
        }
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        // The tag is only peeked here; the selected variant codec re-reads and
        // validates it as a structural check of its own.
        match unpacker.peek_u32("payload type")? {
            TransactionPayload::KIND => {
                Ok(Self::Transaction(Box::new(TransactionPayload::unpack(unpacker)?)))
            }
            MilestonePayload::KIND => {
                Ok(Self::Milestone(Box::new(MilestonePayload::unpack(unpacker)?)))
            }
            IndexationPayload::KIND => {
                Ok(Self::Indexation(Box::new(IndexationPayload::unpack(unpacker)?)))
            }
            ReceiptPayload::KIND => Ok(Self::Receipt(Box::new(ReceiptPayload::unpack(unpacker)?))),
            tag => Err(Error::UnknownPayloadType(tag)),
        }
    }
}

/// The length-prefixed envelope around an optional [`Payload`].
///
/// Packing writes a placeholder length, packs the payload, then patches the
/// actual body length back into the placeholder, so the length field is
/// correct by construction. Unpacking validates the declared length against
/// the remaining input before touching the body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Deref)]
#[serde(transparent)]
pub struct OptionalPayload(pub Option<Payload>);

impl From<Payload> for OptionalPayload {
    fn from(value: Payload) -> Self {
        Self(Some(value))
    }
}

impl From<Option<Payload>> for OptionalPayload {
    fn from(value: Option<Payload>) -> Self {
        Self(value)
    }
}

impl From<OptionalPayload> for Option<Payload> {
    fn from(value: OptionalPayload) -> Self {
        value.0
    }
}

impl Packable for OptionalPayload {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        let length_offset = packer.position();
        packer.write_u32(0);
        if let Some(payload) = &self.0 {
            let body_start = packer.position();
            payload.pack(packer)?;
            let length = (packer.position() - body_start) as u32;
            packer.patch_u32(length_offset, length);
            trace!(kind = payload.kind(), length, "packed payload envelope");
        }
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        let length = unpacker.read_u32("payload length")? as usize;
        if !unpacker.has_remaining(length) {
            return Err(Error::TruncatedInput {
                field: "payload",
                needed: length,
                remaining: unpacker.remaining(),
                offset: unpacker.position(),
            });
        }
        if length == 0 {
            return Ok(Self(None));
        }
        unpacker.enter_payload()?;
        let payload = Payload::unpack(unpacker);
        unpacker.leave_payload();
        let payload = payload?;
        trace!(kind = payload.kind(), length, "unpacked payload envelope");
        Ok(Self(Some(payload)))
    }
}

/// Produced when coercing a [`Payload`] to a variant it does not hold.
#[derive(Debug, thiserror::Error)]
#[error("wrong payload requested. expected {expected}, found: {found}")]
pub struct WrongPayloadError {
    expected: &'static str,
    found: &'static str,
}

macro_rules! impl_coerce_payload {
    ($kind:literal, $t:ty, $var:ident) => {
        impl TryFrom<Payload> for $t {
            type Error = WrongPayloadError;

            fn try_from(value: Payload) -> Result<Self, Self::Error> {
                if let Payload::$var(payload) = value {
                    Ok(*payload)
                } else {
                    Err(WrongPayloadError {
                        expected: $kind,
                        found: value.kind(),
                    })
                }
            }
        }
    };
}
impl_coerce_payload!("transaction", TransactionPayload, Transaction);
impl_coerce_payload!("milestone", MilestonePayload, Milestone);
impl_coerce_payload!("indexation", IndexationPayload, Indexation);
impl_coerce_payload!("receipt", ReceiptPayload, Receipt);

#[cfg(any(test, feature = "rand"))]
mod rand {
    use ::rand::{thread_rng, Rng};

    use super::*;

    impl Payload {
        /// Generates a random [`Payload`] of any kind.
        pub fn rand() -> Self {
            match thread_rng().gen_range(0..4) {
                0 => TransactionPayload::rand().into(),
                1 => MilestonePayload::rand().into(),
                2 => IndexationPayload::rand().into(),
                _ => ReceiptPayload::rand().into(),
            }
        }
    }

    impl OptionalPayload {
        /// Generates a random [`OptionalPayload`], possibly absent.
        pub fn rand() -> Self {
            if thread_rng().gen_bool(0.5) {
                Self(Some(Payload::rand()))
            } else {
                Self(None)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn absent_payload_is_four_zero_bytes() {
        let bytes = OptionalPayload(None).pack_to_vec().unwrap();
        assert_eq!(bytes, vec![0; 4]);
        assert_eq!(
            OptionalPayload::unpack_from_slice(&bytes).unwrap(),
            OptionalPayload(None)
        );
    }

    #[test]
    fn envelope_length_matches_body() {
        for _ in 0..10 {
            let envelope = OptionalPayload::from(Payload::rand());
            let bytes = envelope.pack_to_vec().unwrap();
            let declared = u32::from_le_bytes(bytes[..4].try_into().unwrap()) as usize;
            assert_eq!(declared, bytes.len() - 4);
        }
    }

    #[test]
    fn envelope_round_trip() {
        for _ in 0..10 {
            let envelope = OptionalPayload::rand();
            let bytes = envelope.pack_to_vec().unwrap();
            assert_eq!(envelope, OptionalPayload::unpack_from_slice(&bytes).unwrap());
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut bytes = OptionalPayload::from(Payload::from(IndexationPayload::rand()))
            .pack_to_vec()
            .unwrap();
        bytes[4..8].copy_from_slice(&7u32.to_le_bytes());
        assert_eq!(
            OptionalPayload::unpack_from_slice(&bytes),
            Err(Error::UnknownPayloadType(7))
        );
    }

    #[test]
    fn declared_length_beyond_input_is_rejected() {
        let bytes = 100u32.to_le_bytes();
        assert_eq!(
            OptionalPayload::unpack_from_slice(&bytes),
            Err(Error::TruncatedInput {
                field: "payload",
                needed: 100,
                remaining: 0,
                offset: 4,
            })
        );
    }

    #[test]
    fn coercion_reports_the_kinds() {
        let payload = Payload::from(IndexationPayload::rand());
        let err = MilestonePayload::try_from(payload).unwrap_err();
        assert_eq!(
            err.to_string(),
            "wrong payload requested. expected milestone, found: indexation"
        );
    }

    #[test]
    fn serde_json_round_trip() {
        let payload = Payload::rand();
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(payload, serde_json::from_str::<Payload>(&json).unwrap());
    }
}
